use thiserror::Error;

use crate::config::AttractorKind;

/// Errors reported by the aggregation library. Configuration errors
/// are raised at assignment time and never silently clamped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("stick coefficient must lie in (0, 1], got {0}")]
    StickCoefficientOutOfRange(f64),

    #[error("attractor kind {kind:?} is not valid on a {dim}D lattice")]
    AttractorDimensionMismatch { kind: AttractorKind, dim: usize },

    #[error("attractor kind {0:?} requires a size of at least 1")]
    EmptyAttractor(AttractorKind),

    #[error("at least one spawn source must remain enabled")]
    NoSpawnSources,

    #[error("malformed point record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
