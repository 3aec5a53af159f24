use crate::algebra::FloatT;
use std::iter::zip;

/// Elementwise and norm operations on slices of [`FloatT`](crate::algebra::FloatT).
pub trait VectorMath {
    type T;

    /// Apply an elementwise operation on a vector.
    fn scalarop(&mut self, op: impl Fn(Self::T) -> Self::T) -> &mut Self;

    /// Set all elements to a constant.
    fn set(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Maximum absolute difference to another slice (used for unit testing)
    fn norm_inf_diff(&self, b: &Self) -> Self::T;
}

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn scalarop(&mut self, op: impl Fn(T) -> T) -> &mut Self {
        for x in &mut *self {
            *x = op(*x);
        }
        self
    }

    fn set(&mut self, c: T) -> &mut Self {
        self.scalarop(|_x| c)
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.scalarop(|x| x * c)
    }

    fn norm_inf_diff(&self, b: &[T]) -> T {
        zip(self, b).fold(T::zero(), |acc, (x, y)| T::max(acc, T::abs(*x - *y)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_norm_inf_diff() {
        let x = [1.0f64, -3.0, 2.0];
        let y = [1.0f64, -2.5, 2.0];
        assert_eq!(x.norm_inf_diff(&y), 0.5);
        assert_eq!(x.norm_inf_diff(&x), 0.0);
    }

    #[test]
    fn test_scalar_ops() {
        let mut x = [1.0f64, 2.0, 3.0];
        x.scale(2.0);
        assert_eq!(x, [2.0, 4.0, 6.0]);
        x.set(0.0);
        assert_eq!(x, [0.0, 0.0, 0.0]);
    }
}
