use crate::dtype::DType;
use crate::layout::Layout;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    /// The user-facing shape equality error, naming both arguments.
    #[error("matrices {lhs} and {rhs} must have the same shape: got {lhs}.shape = ({lhs_rows}, {lhs_cols}), {rhs}.shape = ({rhs_rows}, {rhs_cols})")]
    ShapeMismatch {
        lhs: String,
        rhs: String,
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },
    #[error("matrices {lhs} and {rhs} must have the same dtype: got {lhs_dtype} and {rhs_dtype}")]
    DTypeMismatch {
        lhs: String,
        rhs: String,
        lhs_dtype: DType,
        rhs_dtype: DType,
    },
    #[error("matrices {lhs} and {rhs} must have the same layout: got {lhs_layout} and {rhs_layout}")]
    LayoutMismatch {
        lhs: String,
        rhs: String,
        lhs_layout: Layout,
        rhs_layout: Layout,
    },
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    MatmulMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("expected {expected} storage, got {got}")]
    WrongStorage { expected: DType, got: DType },
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("unsupported dtype {dtype} for {op}")]
    UnsupportedDType { op: &'static str, dtype: DType },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
