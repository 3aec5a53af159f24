use crate::algebra::DenseFactorizationError;
use thiserror::Error;

/// Error type returned by the benchmark harness.
#[derive(Error, Debug)]
pub enum BenchError {
    /// File could not be opened, read or written
    #[error("IO error")]
    Io(#[from] std::io::Error),
    /// A manifest record did not match the `<m>,<n>` pattern
    /// (strict parsing only)
    #[error("malformed manifest record at line {line}")]
    MalformedRecord { line: usize },
    /// A matrix container held fewer values than the supplied shape requires
    #[error("matrix container too short: expected {expected} values, found {found}")]
    ShortContainer { expected: usize, found: usize },
    /// The decomposition backend reported failure for a dataset
    #[error("decomposition failed")]
    Factorization(#[from] DenseFactorizationError),
}
