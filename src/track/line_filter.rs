//! Clips the recorded track against the viewport and segments it into
//! polyline draw events.
//!
//! Track history can be arbitrarily long; replaying it through this filter
//! after every viewport shift bounds rendering work to the segments that are
//! actually visible.

use crate::core::bounds::PixelRect;
use crate::core::geo::PixelPoint;

/// A polyline draw event, in map pixel coordinates.
///
/// Consumers see a balanced stream: every `Append` follows a `Start`, every
/// `Start` is eventually closed by an `End`, and `Reset` discards all
/// segments built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// Open a new visible segment at this point
    Start(PixelPoint),
    /// Extend the open segment to this point
    Append(PixelPoint),
    /// Close the open segment. Carries the first out-of-view point so the
    /// renderer can draw the exit stroke, or `None` when flushed at end of
    /// replay.
    End(Option<PixelPoint>),
    /// Discard every segment built so far
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Inside,
}

/// State machine turning a point stream plus a clip rectangle into
/// [`LineEvent`]s.
///
/// Events accumulate in an internal queue; the caller drains it after each
/// push. Everything is synchronous and single-threaded.
#[derive(Debug, Clone)]
pub struct TrackLineFilter {
    clip: Option<PixelRect>,
    state: State,
    events: Vec<LineEvent>,
}

impl Default for TrackLineFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackLineFilter {
    pub fn new() -> Self {
        Self {
            clip: None,
            state: State::Outside,
            events: Vec::new(),
        }
    }

    /// Sets the rectangle points are tested against. Called once per
    /// viewport recompute, before the history replay.
    pub fn set_clip_area(&mut self, rect: PixelRect) {
        self.clip = Some(rect);
    }

    pub fn clip_area(&self) -> Option<PixelRect> {
        self.clip
    }

    /// Feeds one track point through the state machine.
    ///
    /// Without a clip area this is a no-op: the filter cannot judge
    /// visibility until the viewport is known.
    pub fn push_point(&mut self, point: PixelPoint) {
        let Some(clip) = self.clip else {
            return;
        };
        let visible = clip.contains(&point);

        match (self.state, visible) {
            (State::Outside, true) => {
                self.state = State::Inside;
                self.events.push(LineEvent::Start(point));
            }
            (State::Inside, true) => {
                self.events.push(LineEvent::Append(point));
            }
            (State::Inside, false) => {
                // Best-effort exit stroke; exact edge clipping is left to
                // the renderer.
                self.state = State::Outside;
                self.events.push(LineEvent::End(Some(point)));
            }
            (State::Outside, false) => {}
        }
    }

    /// Flushes a still-open segment after a history replay
    pub fn push_end(&mut self) {
        if self.state == State::Inside {
            self.state = State::Outside;
            self.events.push(LineEvent::End(None));
        }
    }

    /// Discards all visual segments and forces the Outside state.
    /// Emits `Reset` unconditionally, so calling it twice emits twice.
    pub fn reset(&mut self) {
        self.state = State::Outside;
        self.events.push(LineEvent::Reset);
    }

    /// Drains the queued events in emission order
    pub fn drain_events(&mut self) -> Vec<LineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a segment is currently open
    pub fn is_inside(&self) -> bool {
        self.state == State::Inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clipped() -> TrackLineFilter {
        let mut filter = TrackLineFilter::new();
        filter.set_clip_area(PixelRect::new(0, 0, 100, 100));
        filter
    }

    #[test]
    fn test_no_clip_area_is_noop() {
        let mut filter = TrackLineFilter::new();
        filter.push_point(PixelPoint::new(10, 10));
        filter.push_end();
        assert!(filter.drain_events().is_empty());
    }

    #[test]
    fn test_enter_append_exit() {
        let mut filter = clipped();
        filter.push_point(PixelPoint::new(-50, 50)); // outside, no event
        filter.push_point(PixelPoint::new(10, 50)); // enters
        filter.push_point(PixelPoint::new(40, 50)); // inside
        filter.push_point(PixelPoint::new(150, 50)); // leaves
        filter.push_point(PixelPoint::new(200, 50)); // still outside

        assert_eq!(
            filter.drain_events(),
            vec![
                LineEvent::Start(PixelPoint::new(10, 50)),
                LineEvent::Append(PixelPoint::new(40, 50)),
                LineEvent::End(Some(PixelPoint::new(150, 50))),
            ]
        );
    }

    #[test]
    fn test_reentry_opens_second_segment() {
        let mut filter = clipped();
        let trajectory = [
            (10, 10),
            (200, 10), // exit
            (200, 90),
            (90, 90), // re-enter
            (50, 90),
        ];
        for (x, y) in trajectory {
            filter.push_point(PixelPoint::new(x, y));
        }
        filter.push_end();

        assert_eq!(
            filter.drain_events(),
            vec![
                LineEvent::Start(PixelPoint::new(10, 10)),
                LineEvent::End(Some(PixelPoint::new(200, 10))),
                LineEvent::Start(PixelPoint::new(90, 90)),
                LineEvent::Append(PixelPoint::new(50, 90)),
                LineEvent::End(None),
            ]
        );
    }

    #[test]
    fn test_events_balanced() {
        // Alternating inside/outside points must never produce an Append
        // before a Start or two Starts without an End between them.
        let mut filter = clipped();
        for i in 0..20 {
            let x = if i % 2 == 0 { 50 } else { 300 };
            filter.push_point(PixelPoint::new(x, 50));
        }
        filter.push_end();

        let mut open = false;
        for event in filter.drain_events() {
            match event {
                LineEvent::Start(_) => {
                    assert!(!open, "double Start");
                    open = true;
                }
                LineEvent::Append(_) => assert!(open, "Append before Start"),
                LineEvent::End(_) => {
                    assert!(open, "End without Start");
                    open = false;
                }
                LineEvent::Reset => open = false,
            }
        }
        assert!(!open, "unclosed segment after push_end");
    }

    #[test]
    fn test_push_end_outside_is_silent() {
        let mut filter = clipped();
        filter.push_end();
        assert!(filter.drain_events().is_empty());
    }

    #[test]
    fn test_reset_idempotent() {
        let mut filter = clipped();
        filter.push_point(PixelPoint::new(10, 10));

        filter.reset();
        assert!(!filter.is_inside());
        filter.reset();
        assert!(!filter.is_inside());

        let events = filter.drain_events();
        assert_eq!(events[1..], [LineEvent::Reset, LineEvent::Reset]);
    }

    #[test]
    fn test_reset_then_fresh_start() {
        let mut filter = clipped();
        filter.push_point(PixelPoint::new(10, 10));
        filter.reset();
        filter.push_point(PixelPoint::new(20, 20));

        assert_eq!(
            filter.drain_events(),
            vec![
                LineEvent::Start(PixelPoint::new(10, 10)),
                LineEvent::Reset,
                LineEvent::Start(PixelPoint::new(20, 20)),
            ]
        );
    }

    #[test]
    fn test_clip_area_update_applies_to_next_point() {
        let mut filter = clipped();
        filter.push_point(PixelPoint::new(150, 50)); // outside old clip
        filter.set_clip_area(PixelRect::new(100, 0, 100, 100));
        filter.push_point(PixelPoint::new(150, 50)); // inside new clip

        assert_eq!(
            filter.drain_events(),
            vec![LineEvent::Start(PixelPoint::new(150, 50))]
        );
    }
}
