//! Generate a family of 100 x 100 test matrices as binary containers,
//! then benchmark a full SVD over each one.  Results land in
//! `svd_results/`: one singular value artifact per matrix plus the
//! shared performance log.

#![allow(non_snake_case)]

use svdbench::algebra::{DenseMatrixMut, Matrix};
use svdbench::bench::{
    write_matrix_container, BenchError, BenchRunner, BenchSettings, SplitMix64,
};
use std::path::PathBuf;

const N: usize = 100;

fn random(rng: &mut SplitMix64) -> Matrix<f64> {
    let mut A = Matrix::<f64>::zeros((N, N));
    rng.fill_uniform(A.data_mut());
    A
}

fn diagonal(_rng: &mut SplitMix64) -> Matrix<f64> {
    let mut A = Matrix::<f64>::zeros((N, N));
    for i in 0..N {
        A[(i, i)] = (i + 1) as f64;
    }
    A
}

// outer product of two random vectors, so exactly one nonzero
// singular value
fn low_rank(rng: &mut SplitMix64) -> Matrix<f64> {
    let mut u = vec![0.0; N];
    let mut v = vec![0.0; N];
    rng.fill_uniform(&mut u);
    rng.fill_uniform(&mut v);

    let mut A = Matrix::<f64>::zeros((N, N));
    for c in 0..N {
        for r in 0..N {
            A[(r, c)] = u[r] * v[c];
        }
    }
    A
}

fn perturbed_identity(rng: &mut SplitMix64) -> Matrix<f64> {
    let mut A = Matrix::<f64>::identity(N);
    for x in A.data_mut() {
        *x += 1e-3 * (rng.next_f64() - 0.5);
    }
    A
}

fn noisy(rng: &mut SplitMix64) -> Matrix<f64> {
    let mut A = diagonal(rng);
    for x in A.data_mut() {
        *x += 0.1 * rng.next_f64();
    }
    A
}

fn main() -> Result<(), BenchError> {
    let settings = BenchSettings::default();
    let mut runner = BenchRunner::new(settings)?;

    let generators: [(&str, fn(&mut SplitMix64) -> Matrix<f64>); 5] = [
        ("random", random),
        ("diagonal", diagonal),
        ("low_rank", low_rank),
        ("perturbed_identity", perturbed_identity),
        ("noisy", noisy),
    ];

    let dir = std::env::temp_dir().join("svdbench_datasets");
    std::fs::create_dir_all(&dir)?;

    let mut rng = SplitMix64::new(runner.settings.seed);
    let mut paths: Vec<PathBuf> = Vec::with_capacity(generators.len());
    for (name, generate) in generators {
        let path = dir.join(format!("{}.bin", name));
        write_matrix_container(&path, &generate(&mut rng))?;
        paths.push(path);
    }

    let outcomes = runner.run_containers(&paths, (N, N))?;
    println!(
        "performance log: {}",
        runner.recorder.perf_log_path().display()
    );

    if outcomes.iter().all(|o| o.is_success()) {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
