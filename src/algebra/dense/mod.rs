mod core;
mod types;
pub use self::types::*;

mod blaslike_traits;
pub use blaslike_traits::*;
mod blas;
pub use self::blas::*;
