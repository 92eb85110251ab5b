mod link_index;
pub use link_index::*;

use geo_types::Point;

use crate::Segment;

/// Position of a segment: the feature's row and the segment's index within its polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentRef {
    pub feature: usize,
    pub segment: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub reference: SegmentRef,
    pub segment: Segment,
    pub distance: f64,
}

pub trait NearestSegment {
    /// The segment closest to `point`. On equal distance the lowest [SegmentRef] wins.
    fn nearest_segment(&self, point: Point<f64>) -> Option<SegmentHit>;
}
