use std::fmt;

use mx_matrix::{DType, Matrix};

use crate::error::{GeometryError, Result};

/// Computes twice the area of each triangle in the mesh.
///
/// The doubled-area convention avoids a division per face and matches common
/// geometry-processing libraries; callers halve the values when they want
/// true areas.
///
/// - `v`: [#V x 2] or [#V x 3] f64 vertex positions
/// - `f`: [#F x 3] i32 vertex indices, one triangle per row
///
/// Planar meshes use the signed-determinant form (absolute value taken),
/// spatial meshes the cross-product norm.
pub fn double_area(v: &Matrix, f: &Matrix) -> Result<Vec<f64>> {
    if v.dtype() != DType::F64 || !(v.cols() == 2 || v.cols() == 3) {
        return Err(GeometryError::BadVertexMatrix {
            dtype: v.dtype(),
            cols: v.cols(),
        });
    }
    if f.dtype() != DType::I32 || f.cols() != 3 {
        return Err(GeometryError::BadFaceMatrix {
            dtype: f.dtype(),
            cols: f.cols(),
        });
    }

    let num_vertices = v.rows();
    let spatial = v.cols() == 3;
    let mut areas = Vec::with_capacity(f.rows());

    for face in 0..f.rows() {
        let mut corners = [[0.0f64; 3]; 3];
        for (k, corner) in corners.iter_mut().enumerate() {
            let index = f.get_i64(face, k)?;
            if index < 0 || index as usize >= num_vertices {
                return Err(GeometryError::IndexOutOfRange {
                    face,
                    index,
                    num_vertices,
                });
            }
            for axis in 0..v.cols() {
                corner[axis] = v.get_f64(index as usize, axis)?;
            }
        }

        let [a, b, c] = corners;
        let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let da = if spatial {
            let cross = [
                ab[1] * ac[2] - ab[2] * ac[1],
                ab[2] * ac[0] - ab[0] * ac[2],
                ab[0] * ac[1] - ab[1] * ac[0],
            ];
            (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt()
        } else {
            (ab[0] * ac[1] - ab[1] * ac[0]).abs()
        };
        areas.push(da);
    }

    Ok(areas)
}

/// Per-face area statistics, normalized by the mean face area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaStats {
    /// Mean face area.
    pub mean: f64,
    /// Smallest face area divided by the mean.
    pub min_rel: f64,
    /// Largest face area divided by the mean.
    pub max_rel: f64,
    /// Relative standard deviation: sqrt(mean(((a - mean) / mean)^2)).
    pub sigma: f64,
}

impl AreaStats {
    /// Compute statistics from doubled areas as returned by [`double_area`].
    pub fn from_double_areas(double_areas: &[f64]) -> Result<AreaStats> {
        if double_areas.is_empty() {
            return Err(GeometryError::EmptyMesh);
        }
        let n = double_areas.len() as f64;
        let mean = double_areas.iter().map(|da| da / 2.0).sum::<f64>() / n;
        if mean == 0.0 {
            return Err(GeometryError::ZeroArea);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sq_sum = 0.0;
        for da in double_areas {
            let area = da / 2.0;
            min = min.min(area);
            max = max.max(area);
            let rel = (area - mean) / mean;
            sq_sum += rel * rel;
        }

        Ok(AreaStats {
            mean,
            min_rel: min / mean,
            max_rel: max / mean,
            sigma: (sq_sum / n).sqrt(),
        })
    }
}

impl fmt::Display for AreaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "areas (min/max)/avg sigma: {:.2}/{:.2} ({:.2})",
            self.min_rel, self.max_rel, self.sigma
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_right_triangle_3d() -> (Matrix, Matrix) {
        let v = Matrix::from_f64(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            3,
            3,
        );
        let f = Matrix::from_i32(vec![0, 1, 2], 1, 3);
        (v, f)
    }

    #[test]
    fn test_double_area_3d() {
        let (v, f) = unit_right_triangle_3d();
        let da = double_area(&v, &f).unwrap();
        assert_eq!(da.len(), 1);
        assert_relative_eq!(da[0], 1.0);
    }

    #[test]
    fn test_double_area_2d() {
        let v = Matrix::from_f64(vec![0.0, 0.0, 2.0, 0.0, 0.0, 2.0], 3, 2);
        let f = Matrix::from_i32(vec![0, 1, 2], 1, 3);
        let da = double_area(&v, &f).unwrap();
        assert_relative_eq!(da[0], 4.0);
    }

    #[test]
    fn test_double_area_winding_independent() {
        let v = Matrix::from_f64(vec![0.0, 0.0, 2.0, 0.0, 0.0, 2.0], 3, 2);
        let f = Matrix::from_i32(vec![0, 2, 1], 1, 3);
        let da = double_area(&v, &f).unwrap();
        assert_relative_eq!(da[0], 4.0);
    }

    #[test]
    fn test_bad_inputs() {
        let (v, f) = unit_right_triangle_3d();
        let v_f32 = Matrix::from_f32(vec![0.0; 9], 3, 3);
        assert!(matches!(
            double_area(&v_f32, &f),
            Err(GeometryError::BadVertexMatrix { .. })
        ));

        let f_quad = Matrix::from_i32(vec![0, 1, 2, 0], 1, 4);
        assert!(matches!(
            double_area(&v, &f_quad),
            Err(GeometryError::BadFaceMatrix { .. })
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let (v, _) = unit_right_triangle_3d();
        let f = Matrix::from_i32(vec![0, 1, 3], 1, 3);
        assert!(matches!(
            double_area(&v, &f),
            Err(GeometryError::IndexOutOfRange { face: 0, index: 3, .. })
        ));
    }

    #[test]
    fn test_stats_uniform_mesh() {
        // two identical triangles: sigma 0, min_rel == max_rel == 1
        let stats = AreaStats::from_double_areas(&[1.0, 1.0]).unwrap();
        assert_relative_eq!(stats.mean, 0.5);
        assert_relative_eq!(stats.min_rel, 1.0);
        assert_relative_eq!(stats.max_rel, 1.0);
        assert_relative_eq!(stats.sigma, 0.0);
    }

    #[test]
    fn test_stats_mixed_mesh() {
        // areas 0.5 and 1.5, mean 1.0
        let stats = AreaStats::from_double_areas(&[1.0, 3.0]).unwrap();
        assert_relative_eq!(stats.mean, 1.0);
        assert_relative_eq!(stats.min_rel, 0.5);
        assert_relative_eq!(stats.max_rel, 1.5);
        assert_relative_eq!(stats.sigma, 0.5);
    }

    #[test]
    fn test_stats_degenerate() {
        assert!(matches!(
            AreaStats::from_double_areas(&[]),
            Err(GeometryError::EmptyMesh)
        ));
        assert!(matches!(
            AreaStats::from_double_areas(&[0.0, 0.0]),
            Err(GeometryError::ZeroArea)
        ));
    }

    #[test]
    fn test_stats_display() {
        let stats = AreaStats::from_double_areas(&[1.0, 3.0]).unwrap();
        assert_eq!(
            stats.to_string(),
            "areas (min/max)/avg sigma: 0.50/1.50 (0.50)"
        );
    }
}
