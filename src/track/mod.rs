pub mod line_filter;
pub mod point_filter;
