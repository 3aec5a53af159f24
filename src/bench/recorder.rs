use crate::algebra::FloatT;
use crate::bench::{BenchError, BenchSettings};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Measurements for one processed dataset: one line of the shared
/// performance log.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BenchmarkRecord {
    pub dataset_id: String,
    /// wall-clock time around the decomposition call only (seconds)
    pub elapsed_sec: f64,
    pub user_cpu_sec: f64,
    pub system_cpu_sec: f64,
    /// process RSS high-water mark sampled before the call (KB)
    pub peak_mem_before_kb: i64,
    /// process RSS high-water mark sampled after the call (KB)
    pub peak_mem_after_kb: i64,
    /// size of the singular value artifact file (bytes)
    pub artifact_bytes: u64,
}

/// Writes singular value artifacts and appends to the shared
/// performance log.
///
/// The log is opened, appended and closed per record so that no file
/// handle is held across dataset boundaries.
#[derive(Debug)]
pub struct Recorder {
    output_dir: PathBuf,
    perf_log: PathBuf,
}

impl Recorder {
    /// Creates the output directory if absent (idempotent).
    pub fn new(settings: &BenchSettings) -> Result<Self, BenchError> {
        let output_dir = PathBuf::from(&settings.output_dir);
        fs::create_dir_all(&output_dir)?;
        let perf_log = output_dir.join(&settings.perf_log_name);
        Ok(Self {
            output_dir,
            perf_log,
        })
    }

    pub fn artifact_path(&self, dataset_id: &str) -> PathBuf {
        self.output_dir
            .join(format!("singular_values_{}.txt", dataset_id))
    }

    pub fn perf_log_path(&self) -> &Path {
        &self.perf_log
    }

    /// Write singular values to the per-dataset artifact, one value per
    /// line at 6-decimal fixed precision, and return the artifact size
    /// in bytes.
    pub fn write_singular_values<T: FloatT>(
        &self,
        dataset_id: &str,
        s: &[T],
    ) -> Result<u64, BenchError> {
        let path = self.artifact_path(dataset_id);
        let mut file = BufWriter::new(File::create(&path)?);
        for value in s {
            writeln!(file, "{:.6}", value)?;
        }
        file.flush()?;
        Ok(fs::metadata(&path)?.len())
    }

    /// Append one record to the performance log, fields in fixed order.
    pub fn append_record(&self, record: &BenchmarkRecord) -> Result<(), BenchError> {
        let mut file = self.open_log()?;
        writeln!(
            file,
            "File: {}, Time: {:.6} sec, User CPU Time: {:.6} sec, System CPU Time: {:.6} sec, Peak Mem Before: {} KB, Peak Mem After: {} KB, Output File Size: {} bytes",
            record.dataset_id,
            record.elapsed_sec,
            record.user_cpu_sec,
            record.system_cpu_sec,
            record.peak_mem_before_kb,
            record.peak_mem_after_kb,
            record.artifact_bytes,
        )?;
        Ok(())
    }

    /// Record a dataset that failed to process, keeping the log a
    /// complete account of the run.
    pub fn append_failure(&self, dataset_id: &str, reason: &str) -> Result<(), BenchError> {
        let mut file = self.open_log()?;
        writeln!(file, "File: {}, FAILED: {}", dataset_id, reason)?;
        Ok(())
    }

    // open-append-close per write; never hold the handle
    fn open_log(&self) -> Result<File, BenchError> {
        Ok(OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.perf_log)?)
    }

    /// Write all collected records as a JSON summary next to the
    /// performance log, returning the summary path.
    #[cfg(feature = "serde")]
    pub fn write_json_summary(&self, records: &[BenchmarkRecord]) -> Result<PathBuf, BenchError> {
        let path = self.output_dir.join("summary.json");
        let json = serde_json::to_string_pretty(records).map_err(std::io::Error::from)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bench::BenchSettingsBuilder;

    fn test_recorder(dir: &Path) -> Recorder {
        let settings = BenchSettingsBuilder::default()
            .output_dir(dir.join("results").to_string_lossy().into_owned())
            .build()
            .unwrap();
        Recorder::new(&settings).unwrap()
    }

    fn test_record() -> BenchmarkRecord {
        BenchmarkRecord {
            dataset_id: "0".to_owned(),
            elapsed_sec: 0.125,
            user_cpu_sec: 0.1,
            system_cpu_sec: 0.02,
            peak_mem_before_kb: 1024,
            peak_mem_after_kb: 2048,
            artifact_bytes: 27,
        }
    }

    #[test]
    fn test_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = test_recorder(dir.path());
        assert!(dir.path().join("results").is_dir());

        // idempotent on an existing directory
        let settings = BenchSettingsBuilder::default()
            .output_dir(dir.path().join("results").to_string_lossy().into_owned())
            .build()
            .unwrap();
        assert!(Recorder::new(&settings).is_ok());
        drop(recorder);
    }

    #[test]
    fn test_artifact_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = test_recorder(dir.path());

        let s = [16.848103, 1.068370, 0.0];
        let size = recorder.write_singular_values("0", &s).unwrap();

        let path = recorder.artifact_path("0");
        assert_eq!(size, fs::metadata(&path).unwrap().len());

        // re-reading yields the same sequence at 6-decimal precision
        let text = fs::read_to_string(&path).unwrap();
        let reread: Vec<f64> = text.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(reread.len(), 3);
        for (a, b) in reread.iter().zip(s.iter()) {
            assert!((a - b).abs() < 1e-6);
        }

        // formatting is idempotent
        let rewritten: Vec<String> = reread.iter().map(|v| format!("{:.6}", v)).collect();
        assert_eq!(rewritten.join("\n") + "\n", text);
    }

    #[test]
    fn test_perf_log_format() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = test_recorder(dir.path());

        recorder.append_record(&test_record()).unwrap();
        recorder.append_failure("1", "SVD error").unwrap();

        let log = fs::read_to_string(recorder.perf_log_path()).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "File: 0, Time: 0.125000 sec, User CPU Time: 0.100000 sec, \
             System CPU Time: 0.020000 sec, Peak Mem Before: 1024 KB, \
             Peak Mem After: 2048 KB, Output File Size: 27 bytes"
        );
        assert_eq!(lines[1], "File: 1, FAILED: SVD error");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_summary() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = test_recorder(dir.path());

        let records = vec![test_record()];
        let path = recorder.write_json_summary(&records).unwrap();

        let text = fs::read_to_string(path).unwrap();
        let parsed: Vec<BenchmarkRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records);
    }
}
