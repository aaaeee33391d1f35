use crate::dtype::DType;
use crate::error::{MatrixError, Result};

/// Owned element storage for a dense matrix, one variant per supported dtype.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

impl Storage {
    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        match self {
            Storage::F32(v) => v.len(),
            Storage::F64(v) => v.len(),
            Storage::I32(v) => v.len(),
            Storage::I64(v) => v.len(),
        }
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dtype of this storage.
    pub fn dtype(&self) -> DType {
        match self {
            Storage::F32(_) => DType::F32,
            Storage::F64(_) => DType::F64,
            Storage::I32(_) => DType::I32,
            Storage::I64(_) => DType::I64,
        }
    }

    /// Create zero-filled storage for the given dtype and element count.
    pub fn zeros(dtype: DType, n: usize) -> Self {
        match dtype {
            DType::F32 => Storage::F32(vec![0.0; n]),
            DType::F64 => Storage::F64(vec![0.0; n]),
            DType::I32 => Storage::I32(vec![0; n]),
            DType::I64 => Storage::I64(vec![0; n]),
        }
    }

    /// Returns the data as an f32 slice.
    ///
    /// # Errors
    /// Returns an error if the storage is not F32.
    pub fn as_f32_slice(&self) -> Result<&[f32]> {
        match self {
            Storage::F32(v) => Ok(v.as_slice()),
            other => Err(MatrixError::WrongStorage {
                expected: DType::F32,
                got: other.dtype(),
            }),
        }
    }

    /// Returns the data as an f64 slice.
    ///
    /// # Errors
    /// Returns an error if the storage is not F64.
    pub fn as_f64_slice(&self) -> Result<&[f64]> {
        match self {
            Storage::F64(v) => Ok(v.as_slice()),
            other => Err(MatrixError::WrongStorage {
                expected: DType::F64,
                got: other.dtype(),
            }),
        }
    }

    /// Returns the data as an i32 slice.
    ///
    /// # Errors
    /// Returns an error if the storage is not I32.
    pub fn as_i32_slice(&self) -> Result<&[i32]> {
        match self {
            Storage::I32(v) => Ok(v.as_slice()),
            other => Err(MatrixError::WrongStorage {
                expected: DType::I32,
                got: other.dtype(),
            }),
        }
    }

    /// Returns the data as an i64 slice.
    ///
    /// # Errors
    /// Returns an error if the storage is not I64.
    pub fn as_i64_slice(&self) -> Result<&[i64]> {
        match self {
            Storage::I64(v) => Ok(v.as_slice()),
            other => Err(MatrixError::WrongStorage {
                expected: DType::I64,
                got: other.dtype(),
            }),
        }
    }
}

impl From<Vec<f32>> for Storage {
    fn from(v: Vec<f32>) -> Self {
        Storage::F32(v)
    }
}

impl From<Vec<f64>> for Storage {
    fn from(v: Vec<f64>) -> Self {
        Storage::F64(v)
    }
}

impl From<Vec<i32>> for Storage {
    fn from(v: Vec<i32>) -> Self {
        Storage::I32(v)
    }
}

impl From<Vec<i64>> for Storage {
    fn from(v: Vec<i64>) -> Self {
        Storage::I64(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_dtype() {
        let s = Storage::from(vec![1.0f64, 2.0, 3.0]);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.dtype(), DType::F64);
    }

    #[test]
    fn test_zeros_each_dtype() {
        for dtype in &[DType::F32, DType::F64, DType::I32, DType::I64] {
            let s = Storage::zeros(*dtype, 4);
            assert_eq!(s.len(), 4);
            assert_eq!(s.dtype(), *dtype);
        }
    }

    #[test]
    fn test_typed_access() {
        let s = Storage::from(vec![1i32, 2, 3]);
        assert_eq!(s.as_i32_slice().unwrap(), &[1, 2, 3]);
        assert!(s.as_f64_slice().is_err());
        assert!(s.as_f32_slice().is_err());
        assert!(s.as_i64_slice().is_err());
    }
}
