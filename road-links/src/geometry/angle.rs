use geo_types::Point;

use super::Segment;

/// Angle in radians of the vector pointing from `end` back to `start`,
/// as returned by `atan2`.
pub fn line_direction_angle(segment: &Segment) -> f64 {
    let d = segment.start - segment.end;
    d.y.atan2(d.x)
}

/// `true` when `point` lies within or on the circle around `center`.
pub fn is_in_circle(center: Point<f64>, radius: f64, point: Point<f64>) -> bool {
    let d = center.0 - point.0;
    d.x * d.x + d.y * d.y <= radius * radius
}
