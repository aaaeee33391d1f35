//! Conversions between caller-owned buffers and owned matrices.
//!
//! Inputs are copied into owned storage on the way in; results hand their
//! buffer to the caller on the way out without copying element data.

use std::os::raw::c_void;

use mx_matrix::{Matrix, Storage};

use crate::types::{MXDType, MXMatrix, MXMatrixView};

/// Copy a caller-owned buffer into an owned `Matrix`.
///
/// Returns `None` when the view's data pointer is null.
///
/// # Safety
/// `view.data` must point to `view.rows * view.cols` elements of the tagged
/// dtype, valid for reads.
pub unsafe fn matrix_from_view(view: &MXMatrixView) -> Option<Matrix> {
    if view.data.is_null() {
        return None;
    }
    let n = view.rows * view.cols;
    let storage = match view.dtype {
        MXDType::F32 => Storage::F32(slice::<f32>(view.data, n).to_vec()),
        MXDType::F64 => Storage::F64(slice::<f64>(view.data, n).to_vec()),
        MXDType::I32 => Storage::I32(slice::<i32>(view.data, n).to_vec()),
        MXDType::I64 => Storage::I64(slice::<i64>(view.data, n).to_vec()),
    };
    Some(Matrix::new(
        storage,
        view.rows,
        view.cols,
        view.layout.to_layout(),
    ))
}

/// Move an owned matrix out across the boundary.
///
/// The storage vector is leaked into a raw buffer the caller must release
/// with `mx_matrix_destroy`; no element data is copied.
pub fn matrix_into_raw(m: Matrix) -> MXMatrix {
    let rows = m.rows();
    let cols = m.cols();
    let dtype = MXDType::from_dtype(m.dtype());
    let layout = crate::types::MXLayout::from_layout(m.layout());
    let data = match m.into_storage() {
        Storage::F32(v) => Box::into_raw(v.into_boxed_slice()) as *mut f32 as *mut c_void,
        Storage::F64(v) => Box::into_raw(v.into_boxed_slice()) as *mut f64 as *mut c_void,
        Storage::I32(v) => Box::into_raw(v.into_boxed_slice()) as *mut i32 as *mut c_void,
        Storage::I64(v) => Box::into_raw(v.into_boxed_slice()) as *mut i64 as *mut c_void,
    };
    MXMatrix {
        data,
        rows,
        cols,
        dtype,
        layout,
    }
}

/// Reclaim and drop a buffer previously produced by [`matrix_into_raw`].
///
/// # Safety
/// `m` must come from `matrix_into_raw` and must not have been destroyed
/// already. The data pointer is nulled afterwards.
pub unsafe fn matrix_drop(m: &mut MXMatrix) {
    if m.data.is_null() {
        return;
    }
    let n = m.rows * m.cols;
    match m.dtype {
        MXDType::F32 => drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
            m.data as *mut f32,
            n,
        ))),
        MXDType::F64 => drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
            m.data as *mut f64,
            n,
        ))),
        MXDType::I32 => drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
            m.data as *mut i32,
            n,
        ))),
        MXDType::I64 => drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
            m.data as *mut i64,
            n,
        ))),
    }
    m.data = std::ptr::null_mut();
}

/// Borrow a caller buffer as a typed slice.
///
/// # Safety
/// `data` must point to `n` elements of `T`, valid for reads.
pub unsafe fn slice<'a, T>(data: *const c_void, n: usize) -> &'a [T] {
    std::slice::from_raw_parts(data as *const T, n)
}

/// Borrow a caller buffer as a mutable typed slice.
///
/// # Safety
/// `data` must point to `n` elements of `T`, valid for reads and writes.
/// Used by the in-place path, whose contract requires a writable `m2`.
pub unsafe fn slice_mut<'a, T>(data: *const c_void, n: usize) -> &'a mut [T] {
    std::slice::from_raw_parts_mut(data as *mut T, n)
}
