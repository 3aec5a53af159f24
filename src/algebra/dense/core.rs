use crate::algebra::{Adjoint, DenseMatrix, FloatT, Matrix, ShapedMatrix, VectorMath};

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self {
            size,
            data,
            phantom: std::marker::PhantomData::<T>,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        mat.set_identity();
        mat
    }

    pub fn set_identity(&mut self) {
        assert!(self.is_square());
        self.data.set(T::zero());
        for i in 0..self.ncols() {
            self[(i, i)] = T::one();
        }
    }

    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            size,
            data: src.to_vec(),
            phantom: std::marker::PhantomData::<T>,
        }
    }

    /// Build a column-major matrix from values laid out row by row,
    /// e.g. as read from a row-major binary container.
    pub fn from_row_major(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        let mut mat = Matrix::zeros(size);
        for r in 0..m {
            for c in 0..n {
                mat[(r, c)] = src[r * n + c];
            }
        }
        mat
    }

    pub fn copy_from_slice(&mut self, src: &[T]) -> &mut Self {
        self.data.copy_from_slice(src);
        self
    }

    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }
}

impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut mat = Matrix::zeros((R, C));
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                mat[(r, c)] = v;
            }
        }
        mat
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.nrows() {
            write!(f, "[ ")?;
            for j in 0..self.ncols() {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_major() {
        // [[1,2,3],[4,5,6]] row-major becomes column-major [1,4,2,5,3,6]
        let src = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mat = Matrix::from_row_major((2, 3), &src);
        assert_eq!(mat.data, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(mat[(1, 2)], 6.0);
    }

    #[test]
    fn test_identity() {
        let eye = Matrix::<f64>::identity(3);
        assert_eq!(eye.data, vec![1., 0., 0., 0., 1., 0., 0., 0., 1.]);
    }
}
