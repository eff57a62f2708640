use crate::error::{Error, Result};
use crate::utils::try_zeros;

use rand::distributions::Distribution;
use rand::Rng;

/// A dense matrix of `f64` stored in a single row-major buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // row-major array
}

impl Mat {
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        Ok(Mat {
            rows,
            cols,
            data: try_zeros(len)?,
        })
    }

    /// Creates a matrix whose entries are sampled from `distribution`, in
    /// row-major order.
    pub fn random<D, R>(
        distribution: D,
        rng: &mut R,
        rows: usize,
        cols: usize,
    ) -> Result<Self>
    where
        D: Distribution<f64>,
        R: Rng + ?Sized,
    {
        let mut mat = Mat::zeros(rows, cols)?;
        for x in mat.data.iter_mut() {
            *x = distribution.sample(rng);
        }
        Ok(mat)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the entry at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.index(row, col).map(|i| self.data[i])
    }

    /// Returns a mutable reference to the entry at `(row, col)`, or `None` if
    /// out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        match self.index(row, col) {
            Some(i) => Some(&mut self.data[i]),
            None => None,
        }
    }

    /// Returns one row as a slice, or `None` if out of bounds.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    /// All entries in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}

fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(Error::AllocationFailure { elements: usize::MAX })
}
