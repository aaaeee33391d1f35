use crate::dtype::DType;
use crate::error::{MatrixError, Result};
use crate::layout::Layout;
use crate::ops;
use crate::storage::Storage;

/// A dense two-dimensional matrix.
///
/// Owns contiguous storage in either row-major or column-major order. The
/// binding layer hands matrices through by value, so results move out to the
/// host without copying element data.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    storage: Storage,
    rows: usize,
    cols: usize,
    layout: Layout,
}

impl Matrix {
    /// Create a matrix from storage, dimensions, and a layout.
    ///
    /// # Panics
    /// Panics if `storage.len() != rows * cols`.
    pub fn new(storage: Storage, rows: usize, cols: usize, layout: Layout) -> Self {
        assert_eq!(
            storage.len(),
            rows * cols,
            "storage length {} does not match {}x{} matrix",
            storage.len(),
            rows,
            cols
        );
        Matrix {
            storage,
            rows,
            cols,
            layout,
        }
    }

    /// Create a row-major f32 matrix from element data.
    pub fn from_f32(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        Matrix::new(Storage::F32(data), rows, cols, Layout::RowMajor)
    }

    /// Create a row-major f64 matrix from element data.
    pub fn from_f64(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Matrix::new(Storage::F64(data), rows, cols, Layout::RowMajor)
    }

    /// Create a row-major i32 matrix from element data.
    pub fn from_i32(data: Vec<i32>, rows: usize, cols: usize) -> Self {
        Matrix::new(Storage::I32(data), rows, cols, Layout::RowMajor)
    }

    /// Create a row-major i64 matrix from element data.
    pub fn from_i64(data: Vec<i64>, rows: usize, cols: usize) -> Self {
        Matrix::new(Storage::I64(data), rows, cols, Layout::RowMajor)
    }

    /// Create a zero-filled row-major matrix of the given dtype.
    pub fn zeros(dtype: DType, rows: usize, cols: usize) -> Self {
        Matrix::new(
            Storage::zeros(dtype, rows * cols),
            rows,
            cols,
            Layout::RowMajor,
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the underlying storage reference.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Consumes the matrix and returns its storage, for handing the buffer
    /// across the C boundary without copying.
    pub fn into_storage(self) -> Storage {
        self.storage
    }

    /// Returns true if `other` has the same row and column counts.
    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Shape equality check with a user-facing error naming both arguments.
    pub fn ensure_same_shape(&self, other: &Matrix, lhs: &str, rhs: &str) -> Result<()> {
        if self.same_shape(other) {
            return Ok(());
        }
        Err(MatrixError::ShapeMismatch {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            lhs_rows: self.rows,
            lhs_cols: self.cols,
            rhs_rows: other.rows,
            rhs_cols: other.cols,
        })
    }

    /// Shared dtype and layout check between two matrix arguments.
    ///
    /// Element-wise kernels walk both storages linearly, which is only valid
    /// when the operands agree on element type and memory order.
    pub fn ensure_compatible(&self, other: &Matrix, lhs: &str, rhs: &str) -> Result<()> {
        if self.dtype() != other.dtype() {
            return Err(MatrixError::DTypeMismatch {
                lhs: lhs.to_string(),
                rhs: rhs.to_string(),
                lhs_dtype: self.dtype(),
                rhs_dtype: other.dtype(),
            });
        }
        if self.layout != other.layout {
            return Err(MatrixError::LayoutMismatch {
                lhs: lhs.to_string(),
                rhs: rhs.to_string(),
                lhs_layout: self.layout,
                rhs_layout: other.layout,
            });
        }
        Ok(())
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        self.layout.offset(self.rows, self.cols, row, col)
    }

    /// Bounds-checked read of an f64 element.
    pub fn get_f64(&self, row: usize, col: usize) -> Result<f64> {
        self.check_bounds(row, col)?;
        let data = self.storage.as_f64_slice()?;
        Ok(data[self.offset(row, col)])
    }

    /// Bounds-checked read of an i32 element, widened to i64.
    pub fn get_i64(&self, row: usize, col: usize) -> Result<i64> {
        self.check_bounds(row, col)?;
        match &self.storage {
            Storage::I32(v) => Ok(v[self.offset(row, col)] as i64),
            Storage::I64(v) => Ok(v[self.offset(row, col)]),
            other => Err(MatrixError::WrongStorage {
                expected: DType::I64,
                got: other.dtype(),
            }),
        }
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Transpose without touching element data: swaps the dimensions and
    /// flips the layout over the same storage.
    pub fn transpose(self) -> Matrix {
        let layout = match self.layout {
            Layout::RowMajor => Layout::ColMajor,
            Layout::ColMajor => Layout::RowMajor,
        };
        Matrix {
            storage: self.storage,
            rows: self.cols,
            cols: self.rows,
            layout,
        }
    }

    /// Element-wise accumulate: `self += other`.
    ///
    /// Requires equal shape, dtype, and layout.
    pub fn add_assign(&mut self, other: &Matrix) -> Result<()> {
        self.add_assign_repeated(other, 1)
    }

    /// Repeated element-wise accumulate: `self += other`, `times` times.
    ///
    /// `times == 0` leaves the receiver unchanged.
    pub fn add_assign_repeated(&mut self, other: &Matrix, times: u64) -> Result<()> {
        self.ensure_same_shape(other, "lhs", "rhs")?;
        self.ensure_compatible(other, "lhs", "rhs")?;
        match (&mut self.storage, &other.storage) {
            (Storage::F32(a), Storage::F32(b)) => ops::repeated_add_assign(a, b, times),
            (Storage::F64(a), Storage::F64(b)) => ops::repeated_add_assign(a, b, times),
            (Storage::I32(a), Storage::I32(b)) => ops::repeated_add_assign(a, b, times),
            (Storage::I64(a), Storage::I64(b)) => ops::repeated_add_assign(a, b, times),
            // ensure_compatible rules out mixed-dtype pairs
            _ => {
                return Err(MatrixError::DTypeMismatch {
                    lhs: "lhs".to_string(),
                    rhs: "rhs".to_string(),
                    lhs_dtype: self.dtype(),
                    rhs_dtype: other.dtype(),
                })
            }
        }
        Ok(())
    }

    /// In-place scalar multiply. Float dtypes only.
    pub fn scale(&mut self, s: f64) -> Result<()> {
        match &mut self.storage {
            Storage::F32(v) => {
                for x in v.iter_mut() {
                    *x *= s as f32;
                }
                Ok(())
            }
            Storage::F64(v) => {
                for x in v.iter_mut() {
                    *x *= s;
                }
                Ok(())
            }
            other => Err(MatrixError::UnsupportedDType {
                op: "scale",
                dtype: other.dtype(),
            }),
        }
    }

    /// Matrix multiplication: `self @ other`, layout-aware, result row-major.
    ///
    /// self is [m, k], other is [k, n], result is [m, n]. Float dtypes only.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        let (m, k) = (self.rows, self.cols);
        let (k2, n) = (other.rows, other.cols);
        if k != k2 {
            return Err(MatrixError::MatmulMismatch { m, k, k2, n });
        }
        if self.dtype() != other.dtype() {
            return Err(MatrixError::DTypeMismatch {
                lhs: "lhs".to_string(),
                rhs: "rhs".to_string(),
                lhs_dtype: self.dtype(),
                rhs_dtype: other.dtype(),
            });
        }
        match (&self.storage, &other.storage) {
            (Storage::F64(a), Storage::F64(b)) => {
                let mut out = vec![0.0f64; m * n];
                for i in 0..m {
                    for j in 0..n {
                        let mut sum = 0.0;
                        for p in 0..k {
                            sum += a[self.offset(i, p)] * b[other.offset(p, j)];
                        }
                        out[i * n + j] = sum;
                    }
                }
                Ok(Matrix::from_f64(out, m, n))
            }
            (Storage::F32(a), Storage::F32(b)) => {
                let mut out = vec![0.0f32; m * n];
                for i in 0..m {
                    for j in 0..n {
                        let mut sum = 0.0;
                        for p in 0..k {
                            sum += a[self.offset(i, p)] * b[other.offset(p, j)];
                        }
                        out[i * n + j] = sum;
                    }
                }
                Ok(Matrix::from_f32(out, m, n))
            }
            _ => Err(MatrixError::UnsupportedDType {
                op: "matmul",
                dtype: self.dtype(),
            }),
        }
    }
}
