use mx_matrix::{DType, MatrixError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("vertex matrix must be f64 with 2 or 3 columns, got {dtype} with {cols} columns")]
    BadVertexMatrix { dtype: DType, cols: usize },
    #[error("face matrix must be i32 with 3 columns, got {dtype} with {cols} columns")]
    BadFaceMatrix { dtype: DType, cols: usize },
    #[error("face {face} references vertex {index}, but the mesh has {num_vertices} vertices")]
    IndexOutOfRange {
        face: usize,
        index: i64,
        num_vertices: usize,
    },
    #[error("mesh has no faces")]
    EmptyMesh,
    #[error("mesh has zero total area")]
    ZeroArea,
    #[error("rotation matrix must be {dim}x{dim}, got {rows}x{cols}")]
    BadRotation {
        dim: usize,
        rows: usize,
        cols: usize,
    },
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type Result<T> = std::result::Result<T, GeometryError>;
