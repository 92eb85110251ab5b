use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SnapError {
    #[error("Cannot snap when no feature has a segment")]
    NoCandidates,
    #[error("Nearest link is {distance} away, tolerance is {tolerance}")]
    OutsideTolerance { distance: f64, tolerance: f64 },
}

#[derive(Error, Debug)]
pub enum ConfError {
    #[error("Could not parse snap configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}
