//! __svdbench__ is a benchmark harness for dense singular value
//! decomposition.  It loads matrices from shape manifests or binary
//! containers, drives full SVD and generalized SVD calls through a
//! BLAS/LAPACK backend, and records wall-clock time, CPU time and peak
//! resident memory for every dataset processed.
//!
//! The numerical factorizations themselves are delegated entirely to
//! LAPACK (`?gesvd`, `?gesdd` and `?ggsvd3`); this crate's job is correct
//! buffer sizing, column-major argument marshaling and measurement.
//!
//! A concrete BLAS/LAPACK source is selected through cargo features
//! (`openblas` by default, or `netlib` / `accelerate` / `intel-mkl`).

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod bench;
pub mod io;
pub mod timers;
