use mx_matrix::Matrix;

use crate::error::{GeometryError, Result};

/// Rotates every vertex and scales the result: `out = (v @ r^T) * s`.
///
/// Vertices are rows of `v`, so applying a rotation `r` to each vertex is a
/// right-multiplication by the transpose. `r` must be square with dimension
/// equal to the vertex dimension.
pub fn rotate_scale(v: &Matrix, r: &Matrix, s: f64) -> Result<Matrix> {
    let dim = v.cols();
    if r.rows() != dim || r.cols() != dim {
        return Err(GeometryError::BadRotation {
            dim,
            rows: r.rows(),
            cols: r.cols(),
        });
    }
    // transpose flips the layout over the same storage, no element copies
    let mut out = v.matmul(&r.clone().transpose())?;
    out.scale(s)?;
    Ok(out)
}
