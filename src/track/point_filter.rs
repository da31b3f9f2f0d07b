use crate::core::geo::PixelPoint;

/// Decimates a live stream of pixel-space positions.
///
/// A point is accepted when it lies at least `threshold` pixels from the
/// last accepted point (the first point is always accepted). Rejected points
/// leave no trace; only the last accepted point is retained.
#[derive(Debug, Clone, Default)]
pub struct TrackPointFilter {
    threshold: f64,
    last: Option<PixelPoint>,
    pushed: u64,
    accepted: u64,
}

impl TrackPointFilter {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Minimum distance from the last accepted point before a new point is
    /// accepted. Takes effect from the next push.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Pushes a raw point through the filter, returning it when accepted.
    ///
    /// The caller forwards accepted points downstream; a `None` return means
    /// the point was dropped as redundant.
    pub fn push_point(&mut self, point: PixelPoint) -> Option<PixelPoint> {
        self.pushed += 1;

        if let Some(last) = self.last {
            if last.distance_to(&point) < self.threshold {
                return None;
            }
        }

        self.last = Some(point);
        self.accepted += 1;
        Some(point)
    }

    /// Last accepted point, if any
    pub fn last_point(&self) -> Option<PixelPoint> {
        self.last
    }

    /// Clears the last-accepted state so the next point is unconditionally
    /// accepted. Counters survive the reset.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// (pushed, accepted) counters over the filter's lifetime
    pub fn stats(&self) -> (u64, u64) {
        (self.pushed, self.accepted)
    }
}
