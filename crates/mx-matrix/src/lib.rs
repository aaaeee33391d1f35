//! `mx-matrix` - Dense matrix core for the matrix binding template.
//!
//! This crate provides:
//! - A `Matrix` type owning typed storage in row- or column-major order
//! - `DType` and `Layout` tags that travel with every matrix argument
//! - The shape/dtype/layout validation checks the binding layer relies on
//! - Element-wise and matmul kernels used by the example bindings

pub mod dtype;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod ops;
pub mod storage;

// Re-export primary types at the crate root for convenience.
pub use dtype::DType;
pub use error::{MatrixError, Result};
pub use layout::Layout;
pub use matrix::Matrix;
pub use storage::Storage;
