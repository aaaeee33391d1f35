use std::os::raw::c_void;

use mx_geometry::AreaStats;
use mx_matrix::{DType, Layout};

/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MXStatus {
    Ok = 0,
    ErrorInvalidArgument = 1,
    ErrorShapeMismatch = 2,
    ErrorDTypeMismatch = 3,
    ErrorUnknownFunction = 4,
    ErrorInternal = 5,
}

/// Element type of a matrix buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MXDType {
    F32 = 0,
    F64 = 1,
    I32 = 2,
    I64 = 3,
}

impl MXDType {
    pub fn to_dtype(self) -> DType {
        match self {
            MXDType::F32 => DType::F32,
            MXDType::F64 => DType::F64,
            MXDType::I32 => DType::I32,
            MXDType::I64 => DType::I64,
        }
    }

    pub fn from_dtype(dtype: DType) -> Self {
        match dtype {
            DType::F32 => MXDType::F32,
            DType::F64 => MXDType::F64,
            DType::I32 => MXDType::I32,
            DType::I64 => MXDType::I64,
        }
    }
}

/// Memory order of a matrix buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MXLayout {
    RowMajor = 0,
    ColMajor = 1,
}

impl MXLayout {
    pub fn to_layout(self) -> Layout {
        match self {
            MXLayout::RowMajor => Layout::RowMajor,
            MXLayout::ColMajor => Layout::ColMajor,
        }
    }

    pub fn from_layout(layout: Layout) -> Self {
        match layout {
            Layout::RowMajor => MXLayout::RowMajor,
            Layout::ColMajor => MXLayout::ColMajor,
        }
    }
}

/// A caller-owned matrix buffer passed into a binding.
///
/// `data` must point to `rows * cols` elements of the tagged dtype, stored
/// in the tagged layout. The library never frees this buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MXMatrixView {
    pub data: *const c_void,
    pub rows: usize,
    pub cols: usize,
    pub dtype: MXDType,
    pub layout: MXLayout,
}

/// A library-owned matrix buffer returned from a binding.
///
/// The element buffer is allocated by Rust and handed over without copying;
/// the caller must release it with `mx_matrix_destroy`.
#[repr(C)]
#[derive(Debug)]
pub struct MXMatrix {
    pub data: *mut c_void,
    pub rows: usize,
    pub cols: usize,
    pub dtype: MXDType,
    pub layout: MXLayout,
}

/// Per-face area statistics of a triangulated mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MXAreaStats {
    /// Mean face area.
    pub mean: f64,
    /// Smallest face area divided by the mean.
    pub min_rel: f64,
    /// Largest face area divided by the mean.
    pub max_rel: f64,
    /// Relative standard deviation of the face areas.
    pub sigma: f64,
}

impl From<AreaStats> for MXAreaStats {
    fn from(stats: AreaStats) -> Self {
        MXAreaStats {
            mean: stats.mean,
            min_rel: stats.min_rel,
            max_rel: stats.max_rel,
            sigma: stats.sigma,
        }
    }
}
