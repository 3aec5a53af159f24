//! The benchmark harness: dataset loading, measurement and the
//! per-dataset run pipeline.

mod dataset;
pub use dataset::*;
mod errors;
pub use errors::*;
mod recorder;
pub use recorder::*;
mod rng;
pub use rng::*;
mod runner;
pub use runner::*;
mod rusage;
pub use rusage::*;
mod settings;
pub use settings::*;
