use crate::algebra::{DenseMatrix, Matrix, ShapedMatrix};
use crate::bench::BenchError;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of opaque preamble bytes at the head of a binary matrix
/// container.  The preamble is treated purely as a skip offset; no
/// shape metadata is read from it.
pub const CONTAINER_PREAMBLE_BYTES: usize = 128;

/// Policy for malformed shape manifest records.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseMode {
    /// drop lines that do not match the `<m>,<n>` pattern
    Lenient,
    /// fail on the first line that does not match
    Strict,
}

/// Parsed contents of a shape manifest: a header line (discarded)
/// followed by one `<m>,<n>` record per dataset.
#[derive(Debug, Clone, Default)]
pub struct ShapeManifest {
    pub shapes: Vec<(usize, usize)>,
}

impl ShapeManifest {
    pub fn read_from_file(path: impl AsRef<Path>, mode: ParseMode) -> Result<Self, BenchError> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file), mode)
    }

    pub fn read(reader: impl BufRead, mode: ParseMode) -> Result<Self, BenchError> {
        let mut shapes = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if idx == 0 {
                continue; // header
            }
            match parse_shape_record(&line) {
                Some(shape) => shapes.push(shape),
                None => {
                    if mode == ParseMode::Strict {
                        return Err(BenchError::MalformedRecord { line: idx + 1 });
                    }
                }
            }
        }
        Ok(Self { shapes })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

// A record is exactly two comma-separated positive integers.
fn parse_shape_record(line: &str) -> Option<(usize, usize)> {
    let mut fields = line.trim().split(',');
    let m: usize = fields.next()?.trim().parse().ok()?;
    let n: usize = fields.next()?.trim().parse().ok()?;
    if fields.next().is_some() || m == 0 || n == 0 {
        return None;
    }
    Some((m, n))
}

/// Read an m x n matrix from a binary container: a fixed-length opaque
/// preamble followed by m*n host-endian f64 values in row-major order.
/// The shape must be supplied by the caller; nothing in the container
/// is validated against it beyond the total value count.
pub fn read_matrix_container(
    path: impl AsRef<Path>,
    size: (usize, usize),
) -> Result<Matrix<f64>, BenchError> {
    let (m, n) = size;
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(CONTAINER_PREAMBLE_BYTES as u64))?;

    let nbytes = m * n * std::mem::size_of::<f64>();
    let mut bytes = vec![0u8; nbytes];
    let mut filled = 0;
    while filled < nbytes {
        let count = file.read(&mut bytes[filled..])?;
        if count == 0 {
            return Err(BenchError::ShortContainer {
                expected: m * n,
                found: filled / std::mem::size_of::<f64>(),
            });
        }
        filled += count;
    }

    let values: Vec<f64> = bytes
        .chunks_exact(std::mem::size_of::<f64>())
        .map(|chunk| f64::from_ne_bytes(chunk.try_into().unwrap()))
        .collect();

    Ok(Matrix::from_row_major((m, n), &values))
}

/// Write a matrix to a binary container in the layout expected by
/// [`read_matrix_container`].  The preamble is written as zeros.
pub fn write_matrix_container(
    path: impl AsRef<Path>,
    mat: &Matrix<f64>,
) -> Result<(), BenchError> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&[0u8; CONTAINER_PREAMBLE_BYTES])?;

    // row-major on disk
    for r in 0..mat.nrows() {
        for c in 0..mat.ncols() {
            file.write_all(&mat[(r, c)].to_ne_bytes())?;
        }
    }
    file.flush()?;
    Ok(())
}
