mod traits;
pub use traits::*;
mod svd;
pub use svd::*;
mod gsvd;
pub use gsvd::*;

mod gemm;
