use crate::algebra::MatrixShape;

/// Dimension and orientation queries common to all matrix-like types.
pub trait ShapedMatrix {
    fn size(&self) -> (usize, usize);
    fn shape(&self) -> MatrixShape;
    fn nrows(&self) -> usize {
        self.size().0
    }
    fn ncols(&self) -> usize {
        self.size().1
    }
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
