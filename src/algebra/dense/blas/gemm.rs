#![allow(non_snake_case)]

use crate::algebra::*;

impl<S, T> MultiplyGEMM for DenseStorageMatrix<S, T>
where
    T: FloatT,
    S: AsRef<[T]> + AsMut<[T]>,
{
    type T = T;

    // implements self = C = a*A*B + b*C
    fn mul<MATA, MATB>(&mut self, A: &MATA, B: &MATB, a: T, b: T) -> &Self
    where
        MATA: DenseMatrix<T>,
        MATB: DenseMatrix<T>,
    {
        assert!(A.ncols() == B.nrows() && self.nrows() == A.nrows() && self.ncols() == B.ncols());

        if self.nrows() == 0 || self.ncols() == 0 {
            return self;
        }

        // standard BLAS ?gemm arguments for computing
        // general matrix-matrix multiply
        let transA = A.shape().as_blas_char();
        let transB = B.shape().as_blas_char();
        let m = A.nrows().try_into().unwrap();
        let n = B.ncols().try_into().unwrap();
        let k = A.ncols().try_into().unwrap();
        let lda = if A.shape() == MatrixShape::N { m } else { k };
        let ldb = if B.shape() == MatrixShape::N { k } else { n };
        let ldc = m;

        #[rustfmt::skip]
        T::xgemm(transA, transB, m, n, k, a, A.data(), lda, B.data(), ldb, b, self.data_mut(), ldc);

        self
    }
}
