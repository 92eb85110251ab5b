mod conf;
pub use conf::*;
mod error;
pub use error::*;

use geo_types::Point;
use rayon::prelude::*;
use road_links::{
    Features, Id, LinkIndex, NearestSegment, Segment, line_direction_angle,
    nearest_point_on_segment,
};
use tracing::{debug, trace};

/// A query point moved onto its nearest link.
#[derive(Debug, PartialEq)]
pub struct Snapped<'a, A> {
    pub id: Id,
    pub attributes: &'a A,
    pub segment: Segment,
    /// Position on `segment` closest to the query.
    pub point: Point<f64>,
    pub distance: f64,
    /// Direction angle of `segment` in radians, used to orient point assets.
    pub bearing: f64,
}

/// Snaps `point` to the closest segment of `features` by a linear scan.
pub fn snap<'a, A>(
    features: &'a Features<A>,
    point: Point<f64>,
    conf: &SnapConf,
) -> Result<Snapped<'a, A>, SnapError> {
    snap_with(features, features, point, conf)
}

fn snap_with<'a, A, N>(
    nearest: &N,
    features: &'a Features<A>,
    point: Point<f64>,
    conf: &SnapConf,
) -> Result<Snapped<'a, A>, SnapError>
where
    N: NearestSegment + ?Sized,
{
    let Some(hit) = nearest.nearest_segment(point) else {
        debug!(x = point.x(), y = point.y(), "no link segment to snap to");
        return Err(SnapError::NoCandidates);
    };
    let feature = features
        .view(hit.reference.feature)
        .ok_or(SnapError::NoCandidates)?;

    conf.check(hit.distance)
        .inspect_err(|err| debug!(id = feature.id, %err, "snap rejected"))?;

    let snapped = nearest_point_on_segment(&hit.segment, point);
    trace!(id = feature.id, distance = hit.distance, "snapped");

    Ok(Snapped {
        id: feature.id,
        attributes: feature.attributes,
        segment: hit.segment,
        point: snapped,
        distance: hit.distance,
        bearing: line_direction_angle(&hit.segment),
    })
}

/// Owns a feature table together with its segment index.
#[derive(Debug, Clone)]
pub struct Snapper<A> {
    features: Features<A>,
    index: LinkIndex,
    conf: SnapConf,
}

impl<A> Snapper<A> {
    pub fn new(features: Features<A>, conf: SnapConf) -> Self {
        let index = LinkIndex::from_features(&features);
        debug!(
            features = features.len(),
            segments = index.len(),
            tolerance = ?conf.tolerance,
            "snapper ready"
        );
        Self {
            features,
            index,
            conf,
        }
    }

    pub fn features(&self) -> &Features<A> {
        &self.features
    }

    pub fn conf(&self) -> &SnapConf {
        &self.conf
    }

    /// Same contract as [snap], answered from the index.
    pub fn snap(&self, point: Point<f64>) -> Result<Snapped<'_, A>, SnapError> {
        snap_with(&self.index, &self.features, point, &self.conf)
    }
}

impl<A: Sync> Snapper<A> {
    /// Snaps every point in parallel. Results keep the order of `points`.
    pub fn snap_many(&self, points: &[Point<f64>]) -> Vec<Result<Snapped<'_, A>, SnapError>> {
        points.par_iter().map(|p| self.snap(*p)).collect()
    }
}
