use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::LinalgError;

/// Dense row-major matrix of `f64` values.
///
/// The matrix owns its storage; every operation returns a new value and leaves
/// its operands untouched, so a matrix can be shared freely between threads.
///
/// Serialized as a list of rows, e.g. `[[1.0, 0.0], [0.0, 1.0]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a `rows x cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidShape`] if `data.len() != rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, LinalgError> {
        if data.len() != rows * cols {
            return Err(LinalgError::InvalidShape {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RaggedRows`] if the rows do not all have the
    /// length of the first one.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(LinalgError::RaggedRows {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Create a 3x3 matrix from fixed-size rows.
    pub fn from_array3(rows: &[[f64; 3]; 3]) -> Self {
        Self {
            rows: 3,
            cols: 3,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)` pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major view of the elements.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Borrow row `i`.
    ///
    /// PRECONDITION: `i < self.rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Copy a 3x3 matrix into fixed-size rows.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the matrix is not 3x3.
    pub fn to_array3(&self) -> Result<[[f64; 3]; 3], LinalgError> {
        if self.shape() != (3, 3) {
            return Err(self.mismatch("to_array3", (3, 3)));
        }
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(i));
        }
        Ok(out)
    }

    /// Return the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Matrix product `self * rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `self.cols() != rhs.rows()`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("matmul", rhs.shape()));
        }
        let mut out = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..rhs.cols {
                    out.data[i * rhs.cols + j] += a * rhs.data[k * rhs.cols + j];
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `self * v`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `v.len() != self.cols()`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>, LinalgError> {
        if v.len() != self.cols {
            return Err(self.mismatch("mul_vec", (v.len(), 1)));
        }
        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Inverse by Gauss-Jordan elimination.
    ///
    /// The pivot for column `c` is the first non-zero entry at or below the
    /// diagonal; its row is swapped into place in both the working copy and
    /// the accumulated identity. A forward pass normalises each pivot row and
    /// clears the entries below it, a backward pass clears the entries above.
    ///
    /// # Errors
    ///
    /// - [`LinalgError::NotSquare`] for non-square input.
    /// - [`LinalgError::Singular`] if some column has no usable pivot.
    pub fn inverse(&self) -> Result<Matrix, LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let n = self.rows;
        let mut work = self.data.clone();
        let mut inv = Self::identity(n).data;

        for c in 0..n {
            let pivot_row = (c..n)
                .find(|&r| work[r * n + c] != 0.0)
                .ok_or(LinalgError::Singular { column: c })?;
            if pivot_row != c {
                swap_rows(&mut work, n, c, pivot_row);
                swap_rows(&mut inv, n, c, pivot_row);
            }

            let pivot = work[c * n + c];
            scale_row(&mut work, n, c, 1.0 / pivot);
            scale_row(&mut inv, n, c, 1.0 / pivot);

            for r in (c + 1)..n {
                let factor = work[r * n + c];
                if factor != 0.0 {
                    sub_scaled_row(&mut work, n, r, c, factor);
                    sub_scaled_row(&mut inv, n, r, c, factor);
                }
            }
        }

        for c in (0..n).rev() {
            for r in 0..c {
                let factor = work[r * n + c];
                if factor != 0.0 {
                    sub_scaled_row(&mut work, n, r, c, factor);
                    sub_scaled_row(&mut inv, n, r, c, factor);
                }
            }
        }

        Ok(Matrix {
            rows: n,
            cols: n,
            data: inv,
        })
    }

    /// Determinant of a square matrix, by elimination with row swaps.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NotSquare`] for non-square input.
    pub fn determinant(&self) -> Result<f64, LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let n = self.rows;
        let mut work = self.data.clone();
        let mut det = 1.0;
        for c in 0..n {
            let Some(pivot_row) = (c..n).find(|&r| work[r * n + c] != 0.0) else {
                return Ok(0.0);
            };
            if pivot_row != c {
                swap_rows(&mut work, n, c, pivot_row);
                det = -det;
            }
            let pivot = work[c * n + c];
            det *= pivot;
            for r in (c + 1)..n {
                let factor = work[r * n + c] / pivot;
                if factor != 0.0 {
                    sub_scaled_row(&mut work, n, r, c, factor);
                }
            }
        }
        Ok(det)
    }

    /// Sum of squared element-wise differences between two matrices.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if the shapes differ.
    pub fn squared_distance(&self, other: &Matrix) -> Result<f64, LinalgError> {
        if self.shape() != other.shape() {
            return Err(self.mismatch("squared_distance", other.shape()));
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b) * (a - b))
            .sum())
    }

    fn mismatch(&self, op: &'static str, rhs: (usize, usize)) -> LinalgError {
        LinalgError::DimensionMismatch {
            op,
            left_rows: self.rows,
            left_cols: self.cols,
            right_rows: rhs.0,
            right_cols: rhs.1,
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.data.chunks(m.cols.max(1)).map(|r| r.to_vec()).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = LinalgError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(&rows)
    }
}

fn swap_rows(data: &mut [f64], n: usize, a: usize, b: usize) {
    for j in 0..n {
        data.swap(a * n + j, b * n + j);
    }
}

fn scale_row(data: &mut [f64], n: usize, row: usize, s: f64) {
    for v in &mut data[row * n..(row + 1) * n] {
        *v *= s;
    }
}

// row[dst] -= factor * row[src]
fn sub_scaled_row(data: &mut [f64], n: usize, dst: usize, src: usize, factor: f64) {
    for j in 0..n {
        data[dst * n + j] -= factor * data[src * n + j];
    }
}
