#![allow(non_snake_case)]

use crate::algebra::*;
use core::cmp::min;
use num_traits::ToPrimitive;

/// Algorithm selection for the LAPACK SVD backend.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SVDEngineAlgorithm {
    /// `?gesdd`
    DivideAndConquer,
    /// `?gesvd`
    #[default]
    QRDecomposition,
}

struct SVDBlasWorkVectors<T> {
    work: Vec<T>,
    iwork: Vec<i32>,
}

impl<T: FloatT> Default for SVDBlasWorkVectors<T> {
    fn default() -> Self {
        // must be at least 1 element because the
        // required work size is written into the
        // first element
        let work = vec![T::one()];
        let iwork = vec![1];
        Self { work, iwork }
    }
}

/// Full singular value decomposition of an m x n matrix.
///
/// Owns every output buffer a LAPACK SVD call requires: min(m,n)
/// singular values, an m x m left factor, an n x n (transposed) right
/// factor, plus the float/integer workspaces.  Factors are only valid
/// after `factor` has returned `Ok`.
pub struct SVDEngine<T> {
    /// Computed singular values, descending
    pub s: Vec<T>,

    /// Full left and right singular vector matrices.  Note right
    /// singular vectors are stored in transposed form.
    pub U: Matrix<T>,
    pub Vt: Matrix<T>,

    // BLAS workspace (allocated vecs only)
    blas: Option<SVDBlasWorkVectors<T>>,

    // BLAS factorization method
    pub algorithm: SVDEngineAlgorithm,
}

impl<T> SVDEngine<T>
where
    T: FloatT,
{
    pub fn new(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let s = vec![T::zero(); min(m, n)];
        let U = Matrix::<T>::zeros((m, m));
        let Vt = Matrix::<T>::zeros((n, n));
        let blas = None;
        let algorithm = SVDEngineAlgorithm::default();
        Self {
            s,
            U,
            Vt,
            blas,
            algorithm,
        }
    }

    pub fn singular_values(&self) -> &[T] {
        &self.s
    }

    fn checkdim(&self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        let (m, n) = A.size();

        if m == 0 || n == 0 || self.U.nrows() != m || self.Vt.ncols() != n {
            Err(DenseFactorizationError::IncompatibleDimension)
        } else {
            Ok(())
        }
    }
}

impl<T> FactorSVD for SVDEngine<T>
where
    T: FloatT,
{
    type T = T;

    fn factor(&mut self, A: &mut Matrix<T>) -> Result<(), DenseFactorizationError> {
        self.checkdim(A)?;

        // standard LAPACK ?gesdd and/or ?gesvd arguments for a full SVD

        let m = self.U.nrows();
        let n = self.Vt.ncols();

        // unwrap or populate on the first call
        let blaswork = self.blas.get_or_insert_with(SVDBlasWorkVectors::default);

        let job = b'A'; // all m (resp. n) vectors
        let m: i32 = m.try_into().unwrap();
        let n: i32 = n.try_into().unwrap();
        let a = A.data_mut();
        let lda = m;
        let s = &mut self.s; // singular values go here
        let u = self.U.data_mut(); // U data goes here
        let ldu = m; // leading dim of U
        let vt = self.Vt.data_mut(); // Vt data goes here
        let ldvt = n; // leading dim of Vt
        let work = &mut blaswork.work;
        let mut lwork = -1_i32; // -1 => config to request required work size
        let iwork = &mut blaswork.iwork;
        let info = &mut 0_i32; // output info

        for i in 0..2 {
            // iwork is only used for the DivideAndConquer call and
            // should always be 8*min(m,n) elements in that case
            if self.algorithm == SVDEngineAlgorithm::DivideAndConquer {
                iwork.resize(8 * min(m, n) as usize, 0);
            }

            match self.algorithm {
                SVDEngineAlgorithm::DivideAndConquer => T::xgesdd(
                    job, m, n, a, lda, s, u, ldu, vt, ldvt, work, lwork, iwork, info,
                ),
                SVDEngineAlgorithm::QRDecomposition => T::xgesvd(
                    job, job, m, n, a, lda, s, u, ldu, vt, ldvt, work, lwork, info,
                ),
            }
            if *info != 0 {
                return Err(DenseFactorizationError::SVD(*info));
            }

            // resize work vector and reset length
            if i == 0 {
                lwork = work[0].to_i32().unwrap();
                work.resize(lwork as usize, T::zero());
            }
        }
        Ok(())
    }
}

// ---- unit testing ----

#[cfg(test)]
mod test {
    use super::*;

    const ALGORITHMS: [SVDEngineAlgorithm; 2] = [
        SVDEngineAlgorithm::DivideAndConquer,
        SVDEngineAlgorithm::QRDecomposition,
    ];

    #[rustfmt::skip]
    fn test_factor_data_3x3<T: FloatT>() -> Matrix<T> {
        Matrix::<T>::from(&[
            [(8.0).as_T(), (-2.0).as_T(), (4.0).as_T()],
            [(-2.0).as_T(), (12.0).as_T(), (2.0).as_T()],
            [(4.0).as_T(), (2.0).as_T(), (6.0).as_T()],
        ])
    }

    #[rustfmt::skip]
    fn test_factor_data_2x4<T: FloatT>() -> Matrix<T> {
        Matrix::<T>::from(&[
            [(10.0).as_T(), (2.0).as_T(),  (3.0).as_T(),  (1.0).as_T()],
            [(2.0).as_T(),  (8.0).as_T(),  (0.0).as_T(),  (3.0).as_T()],
        ])
    }

    #[rustfmt::skip]
    fn test_factor_data_4x2<T: FloatT>() -> Matrix<T> {
        Matrix::<T>::from(&[
            [(10.0).as_T(), (2.0).as_T()],
            [(2.0).as_T(),  (8.0).as_T()],
            [(3.0).as_T(),  (1.0).as_T()],
            [(0.0).as_T(),  (3.0).as_T()],
        ])
    }

    fn is_descending_order<T: FloatT>(s: &[T]) -> bool {
        s.windows(2).all(|w| w[0] >= w[1])
    }

    // rebuild A = U * (Σ * Vt) from the full factors
    fn reconstruct<T: FloatT>(eng: &SVDEngine<T>) -> Matrix<T> {
        let m = eng.U.nrows();
        let n = eng.Vt.ncols();

        let mut Sigma = Matrix::<T>::zeros((m, n));
        for (i, &sv) in eng.s.iter().enumerate() {
            Sigma[(i, i)] = sv;
        }

        let mut SVt = Matrix::<T>::zeros((m, n));
        SVt.mul(&Sigma, &eng.Vt, T::one(), T::zero());

        let mut M = Matrix::<T>::zeros((m, n));
        M.mul(&eng.U, &SVt, T::one(), T::zero());
        M
    }

    fn run_svd_factor_test<T>(A: &mut Matrix<T>, tolfn: fn(T) -> T)
    where
        T: FloatT,
    {
        for algorithm in ALGORITHMS {
            let Acopy = A.clone(); //A is corrupted after factorization

            let mut eng = SVDEngine::<T>::new(A.size());
            eng.algorithm = algorithm;

            assert!(eng.factor(A).is_ok());

            let (m, n) = Acopy.size();
            assert_eq!(eng.s.len(), m.min(n));
            assert_eq!(eng.U.size(), (m, m));
            assert_eq!(eng.Vt.size(), (n, n));
            assert!(is_descending_order(&eng.s));
            assert!(eng.s.iter().all(|&sv| sv >= T::zero()));

            let M = reconstruct(&eng);
            assert!(M.data().norm_inf_diff(Acopy.data()) < tolfn((1e-10).as_T()));

            A.copy_from_slice(Acopy.data());
        }
    }

    macro_rules! generate_test_svd_factor {
        ($fxx:ty, $test_name:ident, $tolfn:ident) => {
            #[test]
            fn $test_name() {
                let mut A = test_factor_data_3x3::<$fxx>();
                run_svd_factor_test(&mut A, |x| x.$tolfn());

                let mut A = test_factor_data_2x4::<$fxx>();
                run_svd_factor_test(&mut A, |x| x.$tolfn());

                let mut A = test_factor_data_4x2::<$fxx>();
                run_svd_factor_test(&mut A, |x| x.$tolfn());
            }
        };
    }

    generate_test_svd_factor!(f32, test_svd_factor_f32, sqrt);
    generate_test_svd_factor!(f64, test_svd_factor_f64, abs);

    #[test]
    fn test_svd_diagonal_values() {
        // singular values of a diagonal matrix are the absolute
        // diagonal entries, sorted descending
        let mut A = Matrix::<f64>::zeros((3, 3));
        A[(0, 0)] = 3.0;
        A[(1, 1)] = -5.0;
        A[(2, 2)] = 2.0;

        let mut eng = SVDEngine::<f64>::new((3, 3));
        assert!(eng.factor(&mut A).is_ok());
        assert!(eng.s.norm_inf_diff(&[5.0, 3.0, 2.0]) < 1e-12);
    }

    #[test]
    fn test_svd_singular_value_counts() {
        for (m, n) in [(1, 1), (3, 2), (2, 3), (5, 5)] {
            let mut A = Matrix::<f64>::zeros((m, n));
            for i in 0..m.min(n) {
                A[(i, i)] = (i + 1) as f64;
            }
            let mut eng = SVDEngine::<f64>::new((m, n));
            assert!(eng.factor(&mut A).is_ok());
            assert_eq!(eng.singular_values().len(), m.min(n));
            assert_eq!(eng.U.data().len(), m * m);
            assert_eq!(eng.Vt.data().len(), n * n);
        }
    }

    #[test]
    fn test_svd_dimension_mismatch() {
        let mut eng = SVDEngine::<f64>::new((3, 3));
        let mut A = Matrix::<f64>::zeros((2, 3));
        assert!(matches!(
            eng.factor(&mut A),
            Err(DenseFactorizationError::IncompatibleDimension)
        ));
    }
}
