/// Error type for the linear algebra kernel.
#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Serialize)]
pub enum LinalgError {
    /// Operand shapes do not conform for the requested operation.
    #[error("Dimension mismatch in {op}: left is {left_rows}x{left_cols}, right is {right_rows}x{right_cols}")]
    DimensionMismatch {
        /// Name of the operation that failed.
        op: &'static str,
        /// Rows of the left operand.
        left_rows: usize,
        /// Columns of the left operand.
        left_cols: usize,
        /// Rows of the right operand.
        right_rows: usize,
        /// Columns of the right operand.
        right_cols: usize,
    },

    /// The operation is only defined for square matrices.
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// No non-zero pivot exists on or below the diagonal of a column.
    #[error("Matrix is singular: no pivot in column {column}")]
    Singular {
        /// Column where elimination stopped.
        column: usize,
    },

    /// A row has a different length than the first one.
    #[error("Row {row} has {actual} entries, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// Data length does not match the requested shape.
    #[error("Data length ({actual}) does not match the matrix size ({expected})")]
    InvalidShape {
        /// Expected number of elements.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },

    /// The zero vector has no direction.
    #[error("Cannot normalize a zero-length vector")]
    ZeroVector,
}
