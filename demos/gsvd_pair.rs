//! Generalized SVD of a small matrix pair, printing the (alpha, beta)
//! value pairs and the joint rank structure.

#![allow(non_snake_case)]

use svdbench::algebra::{DenseFactorizationError, FactorGSVD, GSVDEngine, Matrix, ShapedMatrix};

fn main() -> Result<(), DenseFactorizationError> {
    let mut A = Matrix::from(&[
        [1.0, 2.0, 3.0], //
        [4.0, 5.0, 6.0],
        [7.0, 8.0, 9.0],
    ]);
    let mut B = Matrix::from(&[
        [9.0, 8.0, 7.0], //
        [6.0, 5.0, 4.0],
        [3.0, 2.0, 1.0],
    ]);

    let (m, n) = A.size();
    let p = B.nrows();

    let mut engine = GSVDEngine::<f64>::new(m, n, p);
    engine.factor(&mut A, &mut B)?;

    let (k, l) = engine.ranks().unwrap();
    println!("ranks: k = {}, l = {}", k, l);

    println!("generalized singular value pairs:");
    for (alpha, beta) in engine.value_pairs() {
        if beta > 0.0 {
            println!(
                "  alpha = {:.6}, beta = {:.6}, sigma = {:.6}",
                alpha,
                beta,
                alpha / beta
            );
        } else {
            println!("  alpha = {:.6}, beta = {:.6}, sigma = inf", alpha, beta);
        }
    }
    Ok(())
}
