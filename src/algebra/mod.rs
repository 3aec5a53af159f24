//! Dense matrix types and LAPACK-backed factorization engines.

mod adjoint;
mod error_types;
mod floats;
mod matrix_traits;
mod matrix_types;
mod vecmath;

pub(crate) mod dense;

pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use matrix_traits::*;
pub use matrix_types::*;
pub use vecmath::*;
