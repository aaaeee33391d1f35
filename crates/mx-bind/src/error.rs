use mx_matrix::{DType, Layout, MatrixError};
use thiserror::Error;

use crate::signature::ScalarType;

#[derive(Error, Debug)]
pub enum BindError {
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("{func}() takes {expected} arguments ({required} required), got {got}")]
    ArityMismatch {
        func: &'static str,
        expected: usize,
        required: usize,
        got: usize,
    },
    #[error("{func}(): argument '{arg}' must be a dense matrix, got {got}")]
    ExpectedMatrix {
        func: &'static str,
        arg: &'static str,
        got: &'static str,
    },
    #[error("{func}(): argument '{arg}' must be a {expected} scalar, got {got}")]
    ExpectedScalar {
        func: &'static str,
        arg: &'static str,
        expected: ScalarType,
        got: &'static str,
    },
    #[error("{func}(): argument '{arg}' has dtype {got}, expected one of [{allowed}]")]
    DTypeNotAllowed {
        func: &'static str,
        arg: &'static str,
        got: DType,
        allowed: String,
    },
    /// The `matches` contract: both operands of an element-wise body must
    /// agree on dtype and memory order.
    #[error("{func}(): arguments '{arg}' and '{other}' must have the same dtype and layout: got {arg_dtype} ({arg_layout}) and {other_dtype} ({other_layout})")]
    ArgumentMismatch {
        func: &'static str,
        arg: &'static str,
        other: &'static str,
        arg_dtype: DType,
        arg_layout: Layout,
        other_dtype: DType,
        other_layout: Layout,
    },
    #[error("{func}(): argument '{arg}' matches unknown or non-dense argument '{other}'")]
    InvalidSpec {
        func: &'static str,
        arg: &'static str,
        other: &'static str,
    },
    /// A handler body failed after its arguments validated.
    #[error("{0}")]
    Execution(String),
    #[error("internal: {0}")]
    Internal(String),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type Result<T> = std::result::Result<T, BindError>;
