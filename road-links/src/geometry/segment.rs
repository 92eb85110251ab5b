use geo_types::{Line, Point};

/// One edge of a polyline, directed from `start` to `end`.
pub type Segment = Line<f64>;

/// Position of the orthogonal projection of `point` onto `segment`,
/// clamped to `[0, 1]`.
///
/// Returns [`None`] for a zero-length segment, where the projection is undefined.
pub fn projection_parameter(segment: &Segment, point: Point<f64>) -> Option<f64> {
    let side = segment.delta();
    let sum_of_squared_sides = side.x * side.x + side.y * side.y;
    if sum_of_squared_sides == 0.0 {
        return None;
    }

    let ap = point.0 - segment.start;
    let t = (ap.x * side.x + ap.y * side.y) / sum_of_squared_sides;
    Some(t.clamp(0.0, 1.0))
}

/// The point on `segment` closest to `point`.
///
/// A zero-length segment degenerates to its start point.
pub fn nearest_point_on_segment(segment: &Segment, point: Point<f64>) -> Point<f64> {
    match projection_parameter(segment, point) {
        Some(t) => Point::from(segment.start + segment.delta() * t),
        None => Point::from(segment.start),
    }
}

/// Euclidean distance from `point` to the closest point on `segment`.
pub fn distance_to_segment(segment: &Segment, point: Point<f64>) -> f64 {
    let nearest = nearest_point_on_segment(segment, point);
    let d = nearest.0 - point.0;
    (d.x * d.x + d.y * d.y).sqrt()
}
