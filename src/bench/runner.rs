use crate::algebra::{DenseMatrixMut, FactorSVD, Matrix, SVDEngine, ShapedMatrix};
use crate::bench::{
    read_matrix_container, BenchError, BenchSettings, BenchmarkRecord, Recorder, ResourceUsage,
    ShapeManifest, SplitMix64,
};
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::timers::{timeit, Timers};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Result of processing one dataset.  A `Failed` outcome has already
/// been written to the performance log; the run continues with the
/// next dataset.
#[derive(Debug)]
pub enum RunOutcome {
    Success(BenchmarkRecord),
    Failed { dataset_id: String, reason: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success(_))
    }
}

/// Drives the per-dataset pipeline: load, factor, measure, record.
///
/// Dataset-level failures (unreadable container, LAPACK nonconvergence)
/// are logged and skipped; only failures of the harness itself (the
/// manifest, the output directory, the performance log) abort a run.
#[derive(Debug)]
pub struct BenchRunner {
    pub settings: BenchSettings,
    pub recorder: Recorder,
    pub timers: Timers,
    out: PrintTarget,
}

impl BenchRunner {
    pub fn new(settings: BenchSettings) -> Result<Self, BenchError> {
        let recorder = Recorder::new(&settings)?;
        Ok(Self {
            settings,
            recorder,
            timers: Timers::default(),
            out: PrintTarget::default(),
        })
    }

    /// Run every shape listed in a manifest, synthesizing matrix
    /// content from the configured seed.  Returns one outcome per
    /// manifest record.
    pub fn run_manifest(&mut self, path: impl AsRef<Path>) -> Result<Vec<RunOutcome>, BenchError> {
        let manifest = ShapeManifest::read_from_file(path, self.settings.parse_mode)?;
        self.banner(manifest.len())?;

        let mut outcomes = Vec::with_capacity(manifest.len());
        for (idx, &shape) in manifest.shapes.iter().enumerate() {
            let mut A;
            timeit! {self.timers => "load";
                A = self.synthesize(shape, idx as u64);
            }
            outcomes.push(self.run_one(&idx.to_string(), &mut A)?);
        }
        Ok(outcomes)
    }

    /// Run every container in `paths`, all sharing the supplied shape.
    /// An unreadable container is logged as a failure and skipped.
    pub fn run_containers(
        &mut self,
        paths: &[impl AsRef<Path>],
        size: (usize, usize),
    ) -> Result<Vec<RunOutcome>, BenchError> {
        self.banner(paths.len())?;

        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let dataset_id = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());

            let loaded;
            timeit! {self.timers => "load";
                loaded = read_matrix_container(path, size);
            }
            match loaded {
                Ok(mut A) => outcomes.push(self.run_one(&dataset_id, &mut A)?),
                Err(e) => outcomes.push(self.record_failure(dataset_id, &e)?),
            }
        }
        Ok(outcomes)
    }

    /// Factor one matrix and record the measurements.  The wall-clock
    /// interval covers the decomposition call only; loading and artifact
    /// writing are excluded.
    pub fn run_one(
        &mut self,
        dataset_id: &str,
        A: &mut Matrix<f64>,
    ) -> Result<RunOutcome, BenchError> {
        let mut engine = SVDEngine::<f64>::new(A.size());
        engine.algorithm = self.settings.algorithm;

        let before = ResourceUsage::now();
        let start = Instant::now();
        let result;
        timeit! {self.timers => "factor";
            result = engine.factor(A);
        }
        let elapsed_sec = start.elapsed().as_secs_f64();
        let after = ResourceUsage::now();

        if let Err(e) = result {
            return self.record_failure(dataset_id.to_owned(), &e);
        }

        let artifact_bytes;
        timeit! {self.timers => "record";
            artifact_bytes = self
                .recorder
                .write_singular_values(dataset_id, engine.singular_values())?;
        }

        let (user_cpu_sec, system_cpu_sec) = after.cpu_delta(&before);
        let record = BenchmarkRecord {
            dataset_id: dataset_id.to_owned(),
            elapsed_sec,
            user_cpu_sec,
            system_cpu_sec,
            peak_mem_before_kb: before.max_rss_kb,
            peak_mem_after_kb: after.max_rss_kb,
            artifact_bytes,
        };
        self.recorder.append_record(&record)?;

        if self.settings.verbose {
            writeln!(
                self.out,
                "{}: {} singular values in {:.6} sec",
                dataset_id,
                engine.singular_values().len(),
                elapsed_sec
            )?;
        }
        Ok(RunOutcome::Success(record))
    }

    // log the failure and keep going; only the log write itself is fatal
    fn record_failure(
        &mut self,
        dataset_id: String,
        error: &dyn std::error::Error,
    ) -> Result<RunOutcome, BenchError> {
        let reason = error.to_string();
        self.recorder.append_failure(&dataset_id, &reason)?;
        if self.settings.verbose {
            writeln!(self.out, "{}: FAILED ({})", dataset_id, reason)?;
        }
        Ok(RunOutcome::Failed { dataset_id, reason })
    }

    // fill a shape with uniform entries, seeded per dataset so a run
    // is reproducible and datasets are independent
    fn synthesize(&self, size: (usize, usize), idx: u64) -> Matrix<f64> {
        let mut rng = SplitMix64::new(self.settings.seed ^ idx);
        let mut A = Matrix::<f64>::zeros(size);
        rng.fill_uniform(A.data_mut());
        A
    }

    fn banner(&mut self, ndatasets: usize) -> Result<(), BenchError> {
        if self.settings.verbose {
            writeln!(
                self.out,
                "svdbench v{}: {} datasets, {:?} algorithm",
                crate::VERSION,
                ndatasets,
                self.settings.algorithm
            )?;
        }
        Ok(())
    }
}

impl ConfigurablePrintTarget for BenchRunner {
    fn print_to_stdout(&mut self) {
        self.out.print_to_stdout();
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.out.print_to_file(file);
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.out.print_to_stream(stream);
    }
    fn print_to_buffer(&mut self) {
        self.out.print_to_buffer();
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.out.get_print_buffer()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bench::{write_matrix_container, BenchSettingsBuilder, ParseMode};
    use std::fs;

    fn test_settings(dir: &Path) -> BenchSettings {
        BenchSettingsBuilder::default()
            .output_dir(dir.join("results").to_string_lossy().into_owned())
            .verbose(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_container_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.bin");

        let A = Matrix::from(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        write_matrix_container(&path, &A).unwrap();

        let mut runner = BenchRunner::new(test_settings(dir.path())).unwrap();
        let outcomes = runner.run_containers(&[&path], (3, 3)).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_success());

        // known singular values of the rank-2 1..9 matrix
        let artifact = fs::read_to_string(runner.recorder.artifact_path("0")).unwrap();
        let s: Vec<f64> = artifact.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(s.len(), 3);
        assert!((s[0] - 16.8481).abs() < 1e-3);
        assert!((s[1] - 1.0684).abs() < 1e-3);
        assert!(s[2].abs() < 1e-3);

        // one log line, success format
        let log = fs::read_to_string(runner.recorder.perf_log_path()).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("File: 0, Time: "));
        assert!(lines[0].contains(" KB, Output File Size: "));
    }

    #[test]
    fn test_unreadable_container_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.bin");
        let A = Matrix::from(&[[2.0, 0.0], [0.0, 1.0]]);
        write_matrix_container(&good, &A).unwrap();

        let missing = dir.path().join("missing.bin");

        let mut runner = BenchRunner::new(test_settings(dir.path())).unwrap();
        let outcomes = runner.run_containers(&[&missing, &good], (2, 2)).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].is_success());
        assert!(outcomes[1].is_success());

        let log = fs::read_to_string(runner.recorder.perf_log_path()).unwrap();
        assert!(log.lines().next().unwrap().starts_with("File: missing, FAILED: "));
    }

    #[test]
    fn test_factorization_failure_recorded() {
        use crate::algebra::DenseFactorizationError;

        let dir = tempfile::tempdir().unwrap();
        let mut runner = BenchRunner::new(test_settings(dir.path())).unwrap();

        // a non-convergent decomposition is logged with its info code
        let outcome = runner
            .record_failure("bad".to_owned(), &DenseFactorizationError::SVD(3))
            .unwrap();
        assert!(matches!(
            outcome,
            RunOutcome::Failed { ref reason, .. } if reason == "SVD error (info = 3)"
        ));

        // and the run continues with later datasets
        let mut A = Matrix::from(&[[2.0, 0.0], [0.0, 1.0]]);
        let ok = runner.run_one("good", &mut A).unwrap();
        assert!(ok.is_success());

        let log = fs::read_to_string(runner.recorder.perf_log_path()).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "File: bad, FAILED: SVD error (info = 3)");
        assert!(lines[1].starts_with("File: good, Time: "));
    }

    #[test]
    fn test_manifest_run_synthesizes() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("shapes.csv");
        fs::write(&manifest, "m,n\n8,6\n5,5\nbad-line\n4,7\n").unwrap();

        let mut runner = BenchRunner::new(test_settings(dir.path())).unwrap();
        let outcomes = runner.run_manifest(&manifest).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(RunOutcome::is_success));

        // artifact per dataset, min(m,n) values each
        for (id, count) in [("0", 6), ("1", 5), ("2", 4)] {
            let artifact = fs::read_to_string(runner.recorder.artifact_path(id)).unwrap();
            assert_eq!(artifact.lines().count(), count);
        }
        assert!(runner.timers.elapsed("factor").is_some());
    }

    #[test]
    fn test_manifest_strict_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("shapes.csv");
        fs::write(&manifest, "m,n\n8,6\nbad-line\n").unwrap();

        let mut settings = test_settings(dir.path());
        settings.parse_mode = ParseMode::Strict;

        let mut runner = BenchRunner::new(settings).unwrap();
        let err = runner.run_manifest(&manifest).unwrap_err();
        assert!(matches!(err, BenchError::MalformedRecord { line: 3 }));
    }

    #[test]
    fn test_runs_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("shapes.csv");
        fs::write(&manifest, "m,n\n6,6\n").unwrap();

        let mut first = BenchRunner::new(test_settings(dir.path())).unwrap();
        first.run_manifest(&manifest).unwrap();
        let a = fs::read_to_string(first.recorder.artifact_path("0")).unwrap();

        let mut second = BenchRunner::new(test_settings(dir.path())).unwrap();
        second.run_manifest(&manifest).unwrap();
        let b = fs::read_to_string(second.recorder.artifact_path("0")).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_verbose_banner_to_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("shapes.csv");
        fs::write(&manifest, "m,n\n3,3\n").unwrap();

        let mut settings = test_settings(dir.path());
        settings.verbose = true;

        let mut runner = BenchRunner::new(settings).unwrap();
        runner.print_to_buffer();
        runner.run_manifest(&manifest).unwrap();

        let out = runner.get_print_buffer().unwrap();
        assert!(out.starts_with(&format!("svdbench v{}", crate::VERSION)));
        assert!(out.contains("1 datasets"));
    }
}
