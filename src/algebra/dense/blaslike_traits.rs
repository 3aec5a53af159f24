#![allow(non_snake_case)]
use crate::algebra::{DenseFactorizationError, DenseMatrix, Matrix};

/// Capability trait for a standard SVD backend.
///
/// The harness depends only on this contract: column-major input with
/// leading dimension equal to its row count, factors owned by the
/// implementor, convergence surfaced through the `Result`.
pub trait FactorSVD {
    type T;
    /// Compute a full SVD.  Values in A are overwritten as internal
    /// working space.
    fn factor(&mut self, A: &mut Matrix<Self::T>) -> Result<(), DenseFactorizationError>;
}

/// Capability trait for a generalized SVD backend over a matrix pair
/// sharing a column count.
pub trait FactorGSVD {
    type T;
    /// Compute the joint decomposition of the pair (A, B).  Values in
    /// both A and B are overwritten as internal working space.
    fn factor(
        &mut self,
        A: &mut Matrix<Self::T>,
        B: &mut Matrix<Self::T>,
    ) -> Result<(), DenseFactorizationError>;
}

pub trait MultiplyGEMM {
    type T;
    fn mul<MATA, MATB>(&mut self, A: &MATA, B: &MATB, a: Self::T, b: Self::T) -> &Self
    where
        MATA: DenseMatrix<Self::T>,
        MATB: DenseMatrix<Self::T>;
}
