//! Error type shared by the harness, the driver and the report emitters.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an experiment before or while it runs.
///
/// Numerical divergence between variants is deliberately *not* an error:
/// it is carried in an [`EquivalenceReport`](crate::equivalence::EquivalenceReport)
/// and the sweep keeps going.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The results file could not be created or written.
    #[error("cannot write results to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing results file was written with a different column set.
    #[error("{} has header '{found}', this run writes '{expected}'", path.display())]
    CsvHeaderMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("repetition count must be at least 1")]
    ZeroRepetitions,

    #[error("size sweep is empty")]
    EmptySweep,

    #[error("unknown algorithm '{name}' (available: {available})")]
    UnknownAlgorithm { name: String, available: String },

    #[error("algorithm '{algorithm}' has no variant '{variant}' (available: {available})")]
    UnknownVariant {
        algorithm: &'static str,
        variant: String,
        available: String,
    },

    #[error("invalid sampling range [{low}, {high})")]
    InvalidRange { low: f64, high: f64 },

    #[error("matrix of dimension {dim} needs {expected} values, got {actual}")]
    DimensionMismatch {
        dim: usize,
        expected: usize,
        actual: usize,
    },

    #[error("matrix of dimension {dim} does not fit in memory")]
    MatrixTooLarge { dim: usize },
}

impl BenchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
