#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(clippy::too_many_arguments)]

// standard imports via blas-lapack-rs crates
extern crate blas_src;
extern crate lapack_src;
use blas::*;
use lapack::*;

pub trait BlasFloatT:
    private::BlasFloatSealed
    + XgesddScalar
    + XgesvdScalar
    + Xggsvd3Scalar
    + XgemmScalar
{}

impl BlasFloatT for f32 {}
impl BlasFloatT for f64 {}

mod private {
    pub trait BlasFloatSealed {}
    impl BlasFloatSealed for f32 {}
    impl BlasFloatSealed for f64 {}
}


// --------------------------------------
// ?gesdd : SVD (divide and conquer method)
// --------------------------------------

pub trait XgesddScalar: Sized {
    fn xgesdd(
        jobz: u8, m: i32, n: i32, a: &mut [Self], lda: i32,
        s: &mut [Self], u: &mut [Self], ldu: i32, vt: &mut [Self], ldvt: i32,
        work: &mut [Self], lwork: i32, iwork: &mut [i32], info: &mut i32
    );
}

macro_rules! impl_blas_xgesdd{
    ($T:ty, $XGESDD:path) => {
        impl XgesddScalar for $T {
            fn xgesdd(
                jobz: u8, m: i32, n: i32, a: &mut [Self], lda: i32,
                s: &mut [Self], u: &mut [Self], ldu: i32, vt: &mut [Self], ldvt: i32,
                work: &mut [Self], lwork: i32, iwork: &mut [i32], info: &mut i32
            ) {
                unsafe{
                    $XGESDD(
                        jobz, m, n, a, lda, s, u, ldu, vt, ldvt, work, lwork, iwork, info
                    );
                }
            }
        }
    };
}

impl_blas_xgesdd!(f32, sgesdd);
impl_blas_xgesdd!(f64, dgesdd);


// --------------------------------------
// ?gesvd : SVD (QR method)
// --------------------------------------

pub trait XgesvdScalar: Sized {
    fn xgesvd(
        jobu: u8, jobvt: u8, m: i32, n: i32, a: &mut [Self], lda: i32,
        s: &mut [Self], u: &mut [Self], ldu: i32, vt: &mut [Self], ldvt: i32,
        work: &mut [Self], lwork: i32, info: &mut i32
    );
}

macro_rules! impl_blas_xgesvd{
    ($T:ty, $XGESVD:path) => {
        impl XgesvdScalar for $T {
            fn xgesvd(
                jobu: u8, jobvt: u8, m: i32, n: i32, a: &mut [Self], lda: i32,
                s: &mut [Self], u: &mut [Self], ldu: i32, vt: &mut [Self], ldvt: i32,
                work: &mut [Self], lwork: i32, info: &mut i32
            ) {
                unsafe{
                    $XGESVD(
                        jobu, jobvt, m, n, a, lda, s, u, ldu, vt, ldvt, work, lwork, info
                    );
                }
            }
        }
    };
}

impl_blas_xgesvd!(f32, sgesvd);
impl_blas_xgesvd!(f64, dgesvd);


// --------------------------------------
// ?ggsvd3 : generalized SVD of a matrix pair
// --------------------------------------

pub trait Xggsvd3Scalar: Sized {
    fn xggsvd3(
        jobu: u8, jobv: u8, jobq: u8, m: i32, n: i32, p: i32,
        k: &mut i32, l: &mut i32, a: &mut [Self], lda: i32, b: &mut [Self], ldb: i32,
        alpha: &mut [Self], beta: &mut [Self], u: &mut [Self], ldu: i32,
        v: &mut [Self], ldv: i32, q: &mut [Self], ldq: i32,
        work: &mut [Self], lwork: i32, iwork: &mut [i32], info: &mut i32
    );
}

macro_rules! impl_blas_xggsvd3{
    ($T:ty, $XGGSVD3:path) => {
        impl Xggsvd3Scalar for $T {
            fn xggsvd3(
                jobu: u8, jobv: u8, jobq: u8, m: i32, n: i32, p: i32,
                k: &mut i32, l: &mut i32, a: &mut [Self], lda: i32, b: &mut [Self], ldb: i32,
                alpha: &mut [Self], beta: &mut [Self], u: &mut [Self], ldu: i32,
                v: &mut [Self], ldv: i32, q: &mut [Self], ldq: i32,
                work: &mut [Self], lwork: i32, iwork: &mut [i32], info: &mut i32
            ) {
                unsafe{
                    $XGGSVD3(
                        jobu, jobv, jobq, m, n, p, k, l, a, lda, b, ldb,
                        alpha, beta, u, ldu, v, ldv, q, ldq, work, lwork, iwork, info
                    );
                }
            }
        }
    };
}

impl_blas_xggsvd3!(f32, sggsvd3);
impl_blas_xggsvd3!(f64, dggsvd3);


// --------------------------------------
// ?gemm : matrix matrix multiply
// --------------------------------------

pub trait XgemmScalar: Sized {
    fn xgemm(
        transa: u8, transb: u8, m: i32, n: i32, k: i32, alpha: Self, a: &[Self],
        lda: i32, b: &[Self], ldb: i32, beta: Self, c: &mut [Self], ldc: i32
    );
}

macro_rules! impl_blas_gemm {
    ($T:ty, $XGEMM:path) => {
        impl XgemmScalar for $T {
            fn xgemm(
                transa: u8, transb: u8, m: i32, n: i32, k: i32, alpha: Self, a: &[Self],
                lda: i32, b: &[Self], ldb: i32, beta: Self, c: &mut [Self], ldc: i32
            ) {
                unsafe{
                    $XGEMM(
                        transa, transb, m, n, k, alpha, a,
                        lda, b, ldb, beta, c, ldc
                    );
                }
            }
        }
    };
}

impl_blas_gemm!(f32, sgemm);
impl_blas_gemm!(f64, dgemm);
