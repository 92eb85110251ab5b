use serde::{Deserialize, Serialize};

use crate::{ConfError, SnapError};

/// Distance in the projected units of the map.
pub type MapUnit = f64;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConf {
    /// Furthest a point may be from a link and still snap to it. Unbounded when absent.
    #[serde(default)]
    pub tolerance: Option<MapUnit>,
}

impl SnapConf {
    pub fn with_tolerance(tolerance: MapUnit) -> Result<Self, ConfError> {
        Self {
            tolerance: Some(tolerance),
        }
        .validated()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfError> {
        serde_json::from_str::<Self>(json)?.validated()
    }

    fn validated(self) -> Result<Self, ConfError> {
        match self.tolerance {
            Some(t) if !t.is_finite() || t < 0.0 => Err(ConfError::InvalidTolerance(t)),
            _ => Ok(self),
        }
    }

    /// Rejects distances beyond the tolerance.
    pub fn check(&self, distance: MapUnit) -> Result<(), SnapError> {
        match self.tolerance {
            Some(tolerance) if distance > tolerance => {
                Err(SnapError::OutsideTolerance { distance, tolerance })
            }
            _ => Ok(()),
        }
    }
}
