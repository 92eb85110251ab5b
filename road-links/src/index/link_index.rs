use geo_types::{LineString, Point};
use rstar::{primitives::GeomWithData, RTree};
use tracing::debug;

use crate::{distance_to_segment, Features, NearestSegment, Segment, SegmentHit, SegmentRef};

type IndexedSegment = GeomWithData<Segment, SegmentRef>;

// Rounding allowance in units of f64::EPSILON times the largest coordinate.
// The tree measures distances with its own formula, so its ordering and
// radius checks can disagree with distance_to_segment by this much.
const SLACK_ULPS: f64 = 64.0;

/// R-tree over every segment of a feature table.
///
/// Positions in [SegmentRef] refer to rows of the table the index was built
/// from, so the index must be rebuilt after rows are deleted.
#[derive(Debug, Clone)]
pub struct LinkIndex {
    pub index: RTree<IndexedSegment>,
    /// Largest absolute coordinate among the indexed segments.
    magnitude: f64,
}

impl LinkIndex {
    pub fn new() -> LinkIndex {
        Self {
            index: RTree::new(),
            magnitude: 0.0,
        }
    }

    pub fn from_geoms<'a>(geoms: impl IntoIterator<Item = &'a LineString<f64>>) -> LinkIndex {
        let segments: Vec<IndexedSegment> = geoms
            .into_iter()
            .enumerate()
            .flat_map(|(feature, geom)| {
                geom.lines().enumerate().map(move |(segment, line)| {
                    GeomWithData::new(line, SegmentRef { feature, segment })
                })
            })
            .collect();
        let magnitude = segments
            .iter()
            .flat_map(|s| [s.geom().start, s.geom().end])
            .fold(0.0_f64, |m, c| m.max(c.x.abs()).max(c.y.abs()));
        debug!(segments = segments.len(), magnitude, "bulk loading link index");

        LinkIndex {
            index: RTree::bulk_load(segments),
            magnitude,
        }
    }

    pub fn from_features<A>(features: &Features<A>) -> LinkIndex {
        Self::from_geoms(&features.geom)
    }

    /// Number of indexed segments.
    pub fn len(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slack(&self, point: Point<f64>, reach: f64) -> f64 {
        let scale = self
            .magnitude
            .max(point.x().abs())
            .max(point.y().abs())
            .max(reach);
        SLACK_ULPS * f64::EPSILON * scale
    }

    /// Every indexed segment the tree places within `reach` of `point`, widened
    /// by the rounding slack and re-scored with [distance_to_segment].
    fn hits_within(&self, point: Point<f64>, reach: f64) -> impl Iterator<Item = SegmentHit> + '_ {
        let search = reach + self.slack(point, reach);
        self.index
            .locate_within_distance(point, search * search)
            .map(move |entry| hit(entry, point))
    }

    /// Every segment within `radius` of `point`, ordered by [SegmentRef].
    pub fn segments_within(&self, point: Point<f64>, radius: f64) -> Vec<SegmentHit> {
        let mut hits: Vec<SegmentHit> = self
            .hits_within(point, radius)
            .filter(|h| h.distance <= radius)
            .collect();
        hits.sort_by_key(|h| h.reference);
        hits
    }
}

fn hit(entry: &IndexedSegment, point: Point<f64>) -> SegmentHit {
    SegmentHit {
        reference: entry.data,
        segment: *entry.geom(),
        distance: distance_to_segment(entry.geom(), point),
    }
}

impl NearestSegment for LinkIndex {
    fn nearest_segment(&self, point: Point<f64>) -> Option<SegmentHit> {
        // any near candidate bounds the winner's distance from above
        let first = hit(self.index.nearest_neighbor(&point)?, point);

        // the tree's own ordering breaks ties arbitrarily, so settle them by row order
        let mut tied: Vec<SegmentHit> = self.hits_within(point, first.distance).collect();
        tied.sort_by_key(|h| h.reference);

        tied.into_iter().fold(None, |best: Option<SegmentHit>, h| {
            if best.is_none_or(|b| h.distance < b.distance) {
                Some(h)
            } else {
                best
            }
        })
    }
}

impl Default for LinkIndex {
    fn default() -> Self {
        Self::new()
    }
}
