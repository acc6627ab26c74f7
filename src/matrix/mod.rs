//! Dense square matrices and the matrix-vector experiments built on them.

pub mod column_dot;

use rand::rngs::StdRng;

use crate::error::{BenchError, Result};
use crate::utils::uniform_vec;

/// An N×N matrix of doubles stored contiguously in row-major order.
///
/// The buffer is allocated for exactly the requested dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareMatrix {
    dim: usize,
    data: Vec<f64>,
}

/// Number of values in a `dim`×`dim` matrix, rejecting dimensions whose
/// buffer size overflows the address space.
pub fn element_count(dim: usize) -> Result<usize> {
    dim.checked_mul(dim)
        .filter(|&n| {
            n.checked_mul(std::mem::size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(BenchError::MatrixTooLarge { dim })
}

impl SquareMatrix {
    pub fn zeros(dim: usize) -> Result<Self> {
        Ok(Self {
            dim,
            data: vec![0.0; element_count(dim)?],
        })
    }

    /// Wrap a row-major buffer of `dim * dim` values.
    pub fn from_row_major(dim: usize, data: Vec<f64>) -> Result<Self> {
        let expected = element_count(dim)?;
        if data.len() != expected {
            return Err(BenchError::DimensionMismatch {
                dim,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dim, data })
    }

    /// Fill a `dim`×`dim` matrix with values drawn uniformly from `[low, high)`.
    pub fn random(dim: usize, rng: &mut StdRng, low: f64, high: f64) -> Result<Self> {
        let data = uniform_vec(rng, element_count(dim)?, low, high)?;
        Ok(Self { dim, data })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.dim + col]
    }

    #[inline(always)]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Rows in order. Yields nothing for a 0×0 matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, and a 0x0 matrix has no rows anyway
        self.data.chunks_exact(self.dim.max(1)).take(self.dim)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::seeded_rng;

    #[test]
    fn test_row_major_layout() {
        let m = SquareMatrix::from_row_major(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), 3.0);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = SquareMatrix::from_row_major(3, vec![0.0; 8]).unwrap_err();
        assert!(matches!(
            err,
            BenchError::DimensionMismatch {
                dim: 3,
                expected: 9,
                actual: 8
            }
        ));
    }

    #[test]
    fn test_random_is_sized_exactly() {
        let mut rng = seeded_rng(3);
        let m = SquareMatrix::random(17, &mut rng, 0.0, 1.0).unwrap();
        assert_eq!(m.as_slice().len(), 17 * 17);
        assert!(m.as_slice().iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_oversized_dimension_is_rejected() {
        let dim = 1usize << (usize::BITS / 2);
        assert!(matches!(
            SquareMatrix::zeros(dim),
            Err(BenchError::MatrixTooLarge { dim: d }) if d == dim
        ));
        let mut rng = seeded_rng(1);
        assert!(matches!(
            SquareMatrix::random(usize::MAX, &mut rng, 0.0, 1.0),
            Err(BenchError::MatrixTooLarge { .. })
        ));
        // fits in usize, but not in bytes
        let dim = 1usize << (usize::BITS / 2 - 2);
        assert!(matches!(element_count(dim), Err(BenchError::MatrixTooLarge { .. })));
        assert_eq!(element_count(1_000).unwrap(), 1_000_000);
    }

    #[test]
    fn test_empty_matrix() {
        let m = SquareMatrix::zeros(0).unwrap();
        assert_eq!(m.dim(), 0);
        assert_eq!(m.rows().count(), 0);
    }
}
