use geo::{Closest, ClosestPoint};
use geo_types::{LineString, Point};

use crate::{
    distance_to_segment, nearest_point_on_segment, Feature, FeatureView, Features, Id,
    NearestSegment, Segment, SegmentHit, SegmentRef,
};

/// The feature segment closest to a query point.
#[derive(Debug, PartialEq)]
pub struct NearestLine<'a, A> {
    pub id: Id,
    pub attributes: &'a A,
    pub segment: Segment,
}

impl<A> Clone for NearestLine<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for NearestLine<'_, A> {}

fn nearest_hit<'a, A: 'a>(
    features: impl IntoIterator<Item = FeatureView<'a, A>>,
    point: Point<f64>,
) -> Option<(FeatureView<'a, A>, SegmentHit)> {
    features
        .into_iter()
        .enumerate()
        .flat_map(|(feature_index, feature)| {
            let geom: &'a LineString<f64> = feature.geom;
            geom.lines()
                .enumerate()
                .map(move |(segment_index, segment)| {
                    let hit = SegmentHit {
                        reference: SegmentRef {
                            feature: feature_index,
                            segment: segment_index,
                        },
                        segment,
                        distance: distance_to_segment(&segment, point),
                    };
                    (feature, hit)
                })
        })
        .fold(
            None,
            |best: Option<(FeatureView<'a, A>, SegmentHit)>, (feature, hit)| {
                // only a strict improvement replaces the best, so ties keep the first seen
                if best
                    .as_ref()
                    .is_none_or(|(_, current)| hit.distance < current.distance)
                {
                    Some((feature, hit))
                } else {
                    best
                }
            },
        )
}

/// Scans every consecutive point pair of every feature and returns the
/// segment closest to `point`.
///
/// Features with fewer than two points contribute no segments. When several
/// segments are equally close, the one met first in iteration order is kept.
/// Returns [None] if the input yields no segments at all.
pub fn find_nearest_line<'a, A: 'a, V>(
    features: impl IntoIterator<Item = V>,
    point: Point<f64>,
) -> Option<NearestLine<'a, A>>
where
    V: Into<FeatureView<'a, A>>,
{
    nearest_hit(features.into_iter().map(Into::into), point).map(|(feature, hit)| NearestLine {
        id: feature.id,
        attributes: feature.attributes,
        segment: hit.segment,
    })
}

impl<A> Features<A> {
    pub fn nearest_line(&self, point: Point<f64>) -> Option<NearestLine<'_, A>> {
        find_nearest_line(self.views(), point)
    }
}

impl<A> NearestSegment for Features<A> {
    fn nearest_segment(&self, point: Point<f64>) -> Option<SegmentHit> {
        nearest_hit(self.views(), point).map(|(_, hit)| hit)
    }
}

impl<A> ClosestPoint<f64> for Feature<A> {
    fn closest_point(&self, p: &Point<f64>) -> Closest<f64> {
        match nearest_hit([FeatureView::from(self)], *p) {
            Some((_, hit)) if hit.distance == 0.0 => {
                Closest::Intersection(nearest_point_on_segment(&hit.segment, *p))
            }
            Some((_, hit)) => Closest::SinglePoint(nearest_point_on_segment(&hit.segment, *p)),
            None => Closest::Indeterminate,
        }
    }
}
