use thiserror::Error;

/// Error type returned by BLAS-like dense factorization routines.  Errors
/// carry the internal LAPACK info codes; a positive code means the
/// iterative process did not converge and the factors must not be used.
#[allow(clippy::upper_case_acronyms)]
#[derive(Error, Debug)]
pub enum DenseFactorizationError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("SVD error (info = {0})")]
    SVD(i32),
    #[error("Generalized SVD error (info = {0})")]
    GSVD(i32),
}
