//! The `mesh_stats` binding: per-face area statistics plus a vertex
//! transform, showing a body that leans on the geometry crate instead of
//! element-wise kernels.
//!
//! `v` carries vertex positions as f64 rows and `f` the triangle indices as
//! i32 rows, the pairing hosts produce when converting a triangulated mesh.
//! The rotation `r` is declared `matches(v)` so it arrives with the same
//! dtype and layout as the vertices it multiplies.

use mx_bind::{declare_binding, Args, BindError, Value};
use mx_geometry::{double_area, rotate_scale, AreaStats, GeometryError};
use mx_matrix::Matrix;

const DOC: &str = "\
Compute per-face area statistics of a triangulated mesh, then rotate and
double its vertices.

Parameters
----------
v : [#V x 3] vertex positions (f64)
f : [#F x 3] triangle vertex indices (i32)
r : rotation matrix applied to every vertex

Returns
-------
The rotated vertex matrix, scaled by 2. Area statistics (min/mean, max/mean,
relative sigma) are reported alongside through the typed API.
";

declare_binding! {
    name: mesh_stats,
    doc: DOC,
    args: [
        [v: dense(F64)],
        [f: dense(I32)],
        [r: matches(v)],
    ],
    handler: handle,
}

/// Computes area statistics and the transformed vertices `(v @ r^T) * 2`.
pub fn mesh_stats(
    v: &Matrix,
    f: &Matrix,
    r: &Matrix,
) -> Result<(AreaStats, Matrix), GeometryError> {
    let double_areas = double_area(v, f)?;
    let stats = AreaStats::from_double_areas(&double_areas)?;
    let rotated = rotate_scale(v, r, 2.0)?;
    Ok((stats, rotated))
}

fn handle(mut args: Args) -> Result<Value, BindError> {
    let v = args.take_matrix(0)?;
    let f = args.take_matrix(1)?;
    let r = args.take_matrix(2)?;
    let (_stats, rotated) =
        mesh_stats(&v, &f, &r).map_err(|e| BindError::Execution(e.to_string()))?;
    Ok(Value::Matrix(rotated))
}
