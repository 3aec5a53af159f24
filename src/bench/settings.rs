use crate::algebra::SVDEngineAlgorithm;
use crate::bench::ParseMode;
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Harness configuration, constructed through [`BenchSettingsBuilder`].

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BenchSettings {
    ///directory receiving singular value artifacts and the performance log
    #[builder(default = "String::from(\"svd_results\")")]
    pub output_dir: String,

    ///file name of the shared append-only performance log
    #[builder(default = "String::from(\"performance_log.txt\")")]
    pub perf_log_name: String,

    ///verbose progress printing
    #[builder(default = "true")]
    pub verbose: bool,

    ///shape manifest parsing policy
    #[builder(default = "ParseMode::Lenient")]
    pub parse_mode: ParseMode,

    ///LAPACK SVD algorithm
    #[builder(default = "SVDEngineAlgorithm::QRDecomposition")]
    pub algorithm: SVDEngineAlgorithm,

    ///seed for synthesized matrix content
    #[builder(default = "0x5D7E_BEC5")]
    pub seed: u64,
}

impl Default for BenchSettings {
    fn default() -> Self {
        BenchSettingsBuilder::default().build().unwrap()
    }
}

impl BenchSettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.output_dir {
            if dir.is_empty() {
                return Err("output_dir must be non-empty".to_owned());
            }
        }
        if let Some(name) = &self.perf_log_name {
            if name.is_empty() {
                return Err("perf_log_name must be non-empty".to_owned());
            }
        }
        Ok(())
    }
}
