use thiserror::Error;

/// Request-level validation failures.
///
/// Geometry failures are never surfaced as errors; they are absorbed by the
/// fallback policy in `algebra` and only show up as degradation markers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("coverageList is required & non-empty")]
    EmptyCoverageList,
}
