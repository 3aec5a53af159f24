#![allow(non_snake_case)]

use crate::algebra::*;
use itertools::izip;
use num_traits::ToPrimitive;

struct GSVDBlasWorkVectors<T> {
    work: Vec<T>,
    iwork: Vec<i32>,
}

impl<T: FloatT> GSVDBlasWorkVectors<T> {
    fn new(n: usize) -> Self {
        // work must be at least 1 element because the required
        // size is written into the first element.  iwork is
        // always n elements for ?ggsvd3
        let work = vec![T::one()];
        let iwork = vec![0; n];
        Self { work, iwork }
    }
}

/// Generalized SVD of a matrix pair A (m x n), B (p x n) sharing a
/// column count.
///
/// Owns all output buffers for a `?ggsvd3` call: generalized singular
/// value pairs (alpha, beta) of length n, orthogonal factors U (m x m),
/// V (p x p) and Q (n x n), and the numerical ranks (k, l) of the joint
/// block structure.  Outputs are only valid after `factor` returned `Ok`.
pub struct GSVDEngine<T> {
    /// Generalized singular value pair numerators
    pub alpha: Vec<T>,

    /// Generalized singular value pair denominators
    pub beta: Vec<T>,

    /// Orthogonal factors for A, B and the shared column space
    pub U: Matrix<T>,
    pub V: Matrix<T>,
    pub Q: Matrix<T>,

    // block ranks (k,l) reported by the backend
    ranks: Option<(usize, usize)>,

    // BLAS workspace (allocated vecs only)
    blas: Option<GSVDBlasWorkVectors<T>>,
}

impl<T> GSVDEngine<T>
where
    T: FloatT,
{
    /// Engine for the pair A (m x n), B (p x n).
    pub fn new(m: usize, n: usize, p: usize) -> Self {
        let alpha = vec![T::zero(); n];
        let beta = vec![T::zero(); n];
        let U = Matrix::<T>::zeros((m, m));
        let V = Matrix::<T>::zeros((p, p));
        let Q = Matrix::<T>::zeros((n, n));
        Self {
            alpha,
            beta,
            U,
            V,
            Q,
            ranks: None,
            blas: None,
        }
    }

    /// Numerical ranks (k, l) of the joint block structure, available
    /// after a successful factorization.
    pub fn ranks(&self) -> Option<(usize, usize)> {
        self.ranks
    }

    /// The (alpha, beta) pairs of the generalized singular value block,
    /// i.e. entries k..k+l of the output arrays.
    pub fn value_pairs(&self) -> Vec<(T, T)> {
        let Some((k, l)) = self.ranks else {
            return Vec::new();
        };
        let lo = k.min(self.alpha.len());
        let hi = (k + l).min(self.alpha.len());
        izip!(&self.alpha[lo..hi], &self.beta[lo..hi])
            .map(|(&a, &b)| (a, b))
            .collect()
    }

    /// Generalized singular values alpha/beta over the value block.
    /// Pairs with beta = 0 produce infinite values.
    pub fn values(&self) -> Vec<T> {
        self.value_pairs().iter().map(|&(a, b)| a / b).collect()
    }

    fn checkdim(&self, A: &Matrix<T>, B: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        let (m, n) = A.size();
        let (p, nb) = B.size();

        let ok = m > 0
            && n > 0
            && p > 0
            && n == nb
            && self.U.nrows() == m
            && self.V.nrows() == p
            && self.Q.nrows() == n;

        if ok {
            Ok(())
        } else {
            Err(DenseFactorizationError::IncompatibleDimension)
        }
    }
}

impl<T> FactorGSVD for GSVDEngine<T>
where
    T: FloatT,
{
    type T = T;

    fn factor(
        &mut self,
        A: &mut Matrix<T>,
        B: &mut Matrix<T>,
    ) -> Result<(), DenseFactorizationError> {
        self.checkdim(A, B)?;
        self.ranks = None;

        // standard LAPACK ?ggsvd3 arguments, all three factors requested

        let m: i32 = A.nrows().try_into().unwrap();
        let n: i32 = A.ncols().try_into().unwrap();
        let p: i32 = B.nrows().try_into().unwrap();

        // unwrap or populate on the first call
        let blaswork = self
            .blas
            .get_or_insert_with(|| GSVDBlasWorkVectors::new(n as usize));

        let (jobu, jobv, jobq) = (b'U', b'V', b'Q');
        let mut k = 0_i32;
        let mut l = 0_i32;
        let a = A.data_mut();
        let lda = m;
        let b = B.data_mut();
        let ldb = p;
        let alpha = &mut self.alpha;
        let beta = &mut self.beta;
        let u = self.U.data_mut();
        let ldu = m;
        let v = self.V.data_mut();
        let ldv = p;
        let q = self.Q.data_mut();
        let ldq = n;
        let work = &mut blaswork.work;
        let mut lwork = -1_i32; // -1 => config to request required work size
        let iwork = &mut blaswork.iwork;
        let info = &mut 0_i32; // output info

        for i in 0..2 {
            T::xggsvd3(
                jobu, jobv, jobq, m, n, p, &mut k, &mut l, a, lda, b, ldb, alpha, beta, u, ldu,
                v, ldv, q, ldq, work, lwork, iwork, info,
            );
            if *info != 0 {
                return Err(DenseFactorizationError::GSVD(*info));
            }

            // resize work vector and reset length
            if i == 0 {
                lwork = work[0].to_i32().unwrap();
                work.resize(lwork as usize, T::zero());
            }
        }

        self.ranks = Some((k as usize, l as usize));
        Ok(())
    }
}

// ---- unit testing ----
