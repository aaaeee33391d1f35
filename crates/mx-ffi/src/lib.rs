//! C FFI boundary for the matrix binding template.
//!
//! Hosts create a context, call the exported bindings with matrix views over
//! their own buffers, and query the registry for function names and
//! docstrings. Every entry point returns an `MXStatus`; on error the full
//! message is retrievable once via `mx_last_error`.

mod context;
mod error;
mod types;
mod view;

pub use context::*;
pub use error::*;
pub use types::*;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use mx_bind::{Args, Value};

/// Execute a closure that returns an `MXStatus`, catching any panics
/// and converting them into `MXStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> MXStatus + std::panic::UnwindSafe>(f: F) -> MXStatus {
    match std::panic::catch_unwind(f) {
        Ok(status) => status,
        Err(_) => {
            set_last_error("internal panic".to_string());
            MXStatus::ErrorInternal
        }
    }
}

/// Create a new binding context.
///
/// On success, writes a heap-allocated `MXContext` pointer into `*ctx_out`
/// and returns `MXStatus::Ok`. The caller must later call
/// `mx_context_destroy` to free the context.
#[no_mangle]
pub extern "C" fn mx_context_create(ctx_out: *mut *mut MXContext) -> MXStatus {
    catch_panic(|| {
        if ctx_out.is_null() {
            set_last_error("ctx_out is null".to_string());
            return MXStatus::ErrorInvalidArgument;
        }
        let ctx = Box::new(MXContext::new());
        unsafe {
            *ctx_out = Box::into_raw(ctx);
        }
        MXStatus::Ok
    })
}

/// Destroy a context previously created by `mx_context_create`.
///
/// Passing a null pointer is a no-op and returns `MXStatus::Ok`.
#[no_mangle]
pub unsafe extern "C" fn mx_context_destroy(ctx: *mut MXContext) -> MXStatus {
    if ctx.is_null() {
        return MXStatus::Ok;
    }
    drop(Box::from_raw(ctx));
    MXStatus::Ok
}

/// Add `m1` into `m2`, `num_additions` times.
///
/// With `in_place` false, the call is dispatched through the binding
/// registry and a new library-owned matrix is written to `*out`; the caller
/// must release it with `mx_matrix_destroy`. With `in_place` true, the sum
/// is accumulated directly into the caller's `m2` buffer (which must be
/// writable), nothing is allocated, and `out` may be null.
///
/// Negative `num_additions` performs zero additions.
#[no_mangle]
pub unsafe extern "C" fn mx_add_matrices(
    ctx: *mut MXContext,
    m1: *const MXMatrixView,
    m2: *const MXMatrixView,
    num_additions: i64,
    in_place: bool,
    out: *mut MXMatrix,
) -> MXStatus {
    catch_panic(|| {
        if ctx.is_null() || m1.is_null() || m2.is_null() {
            set_last_error("null argument".to_string());
            return MXStatus::ErrorInvalidArgument;
        }
        let ctx = unsafe { &mut *ctx };
        let v1 = unsafe { &*m1 };
        let v2 = unsafe { &*m2 };
        if v1.data.is_null() || v2.data.is_null() {
            set_last_error("matrix data pointer is null".to_string());
            return MXStatus::ErrorInvalidArgument;
        }

        if in_place {
            return unsafe { add_in_place(v1, v2, num_additions) };
        }

        if out.is_null() {
            set_last_error("out is null".to_string());
            return MXStatus::ErrorInvalidArgument;
        }
        // matrix_from_view never fails here, both data pointers were checked
        let (m1_owned, m2_owned) =
            match unsafe { (view::matrix_from_view(v1), view::matrix_from_view(v2)) } {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    set_last_error("matrix data pointer is null".to_string());
                    return MXStatus::ErrorInvalidArgument;
                }
            };

        match ctx.registry.call(
            "add_matrices",
            vec![
                m1_owned.into(),
                m2_owned.into(),
                Value::Int(num_additions),
                Value::Bool(false),
            ],
        ) {
            Ok(Value::Matrix(m)) => {
                unsafe { *out = view::matrix_into_raw(m) };
                MXStatus::Ok
            }
            Ok(other) => {
                set_last_error(format!("add_matrices returned {}", other.type_name()));
                MXStatus::ErrorInternal
            }
            Err(e) => {
                set_last_error(e.to_string());
                status_for(&e)
            }
        }
    })
}

/// The in-place path: validate the shared dtype/layout/shape contract on the
/// raw views, then accumulate straight into the caller's `m2` buffer.
unsafe fn add_in_place(m1: &MXMatrixView, m2: &MXMatrixView, num_additions: i64) -> MXStatus {
    if m1.dtype != m2.dtype || m1.layout != m2.layout {
        set_last_error(format!(
            "arguments 'm2' and 'm1' must have the same dtype and layout: \
             got {} ({}) and {} ({})",
            m2.dtype.to_dtype(),
            m2.layout.to_layout(),
            m1.dtype.to_dtype(),
            m1.layout.to_layout()
        ));
        return MXStatus::ErrorDTypeMismatch;
    }
    if m1.rows != m2.rows || m1.cols != m2.cols {
        set_last_error(format!(
            "matrices m2 and m1 must have the same shape: \
             got m2.shape = ({}, {}), m1.shape = ({}, {})",
            m2.rows, m2.cols, m1.rows, m1.cols
        ));
        return MXStatus::ErrorShapeMismatch;
    }

    let n = m1.rows * m1.cols;
    let times = num_additions.max(0) as u64;
    match m1.dtype {
        MXDType::F32 => mx_matrix::ops::repeated_add_assign(
            view::slice_mut::<f32>(m2.data, n),
            view::slice::<f32>(m1.data, n),
            times,
        ),
        MXDType::F64 => mx_matrix::ops::repeated_add_assign(
            view::slice_mut::<f64>(m2.data, n),
            view::slice::<f64>(m1.data, n),
            times,
        ),
        MXDType::I32 => mx_matrix::ops::repeated_add_assign(
            view::slice_mut::<i32>(m2.data, n),
            view::slice::<i32>(m1.data, n),
            times,
        ),
        MXDType::I64 => mx_matrix::ops::repeated_add_assign(
            view::slice_mut::<i64>(m2.data, n),
            view::slice::<i64>(m1.data, n),
            times,
        ),
    }
    MXStatus::Ok
}

/// Compute per-face area statistics of a triangulated mesh and its
/// rotated-and-doubled vertex matrix.
///
/// Arguments are validated against the declared `mesh_stats` spec (`v` must
/// be f64, `f` i32, and `r` must share dtype and layout with `v`). On
/// success the statistics are written to `*stats_out` and a new
/// library-owned vertex matrix to `*v_out`, to be released with
/// `mx_matrix_destroy`.
#[no_mangle]
pub unsafe extern "C" fn mx_mesh_stats(
    ctx: *mut MXContext,
    v: *const MXMatrixView,
    f: *const MXMatrixView,
    r: *const MXMatrixView,
    stats_out: *mut MXAreaStats,
    v_out: *mut MXMatrix,
) -> MXStatus {
    catch_panic(|| {
        if ctx.is_null()
            || v.is_null()
            || f.is_null()
            || r.is_null()
            || stats_out.is_null()
            || v_out.is_null()
        {
            set_last_error("null argument".to_string());
            return MXStatus::ErrorInvalidArgument;
        }
        let ctx = unsafe { &mut *ctx };
        let views = unsafe { [&*v, &*f, &*r] };

        let mut values = Vec::with_capacity(3);
        for view in views {
            match unsafe { view::matrix_from_view(view) } {
                Some(m) => values.push(Value::Matrix(m)),
                None => {
                    set_last_error("matrix data pointer is null".to_string());
                    return MXStatus::ErrorInvalidArgument;
                }
            }
        }

        let binding = match ctx.registry.get("mesh_stats") {
            Some(b) => b,
            None => {
                set_last_error("mesh_stats binding not registered".to_string());
                return MXStatus::ErrorInternal;
            }
        };
        let bound = match mx_bind::bind_args(&binding.spec, values) {
            Ok(b) => b,
            Err(e) => {
                set_last_error(e.to_string());
                return status_for(&e);
            }
        };

        let mut args = Args::new(bound);
        let (v_m, f_m, r_m) = match (
            args.take_matrix(0),
            args.take_matrix(1),
            args.take_matrix(2),
        ) {
            (Ok(a), Ok(b), Ok(c)) => (a, b, c),
            _ => {
                set_last_error("bound arguments missing a matrix".to_string());
                return MXStatus::ErrorInternal;
            }
        };

        match mx_demos::mesh_stats::mesh_stats(&v_m, &f_m, &r_m) {
            Ok((stats, rotated)) => {
                unsafe {
                    *stats_out = stats.into();
                    *v_out = view::matrix_into_raw(rotated);
                }
                MXStatus::Ok
            }
            Err(e) => {
                set_last_error(e.to_string());
                status_for_geometry(&e)
            }
        }
    })
}

/// Number of bindings exposed by the context's registry.
#[no_mangle]
pub unsafe extern "C" fn mx_function_count(
    ctx: *const MXContext,
    count_out: *mut usize,
) -> MXStatus {
    if ctx.is_null() || count_out.is_null() {
        set_last_error("null argument".to_string());
        return MXStatus::ErrorInvalidArgument;
    }
    let ctx = &*ctx;
    *count_out = ctx.registry.names().len();
    MXStatus::Ok
}

/// Name of the binding at `index` (sorted order).
///
/// On success, writes a heap-allocated C string into `*name_out`. The caller
/// must later call `mx_free_string` to free it.
#[no_mangle]
pub unsafe extern "C" fn mx_function_name(
    ctx: *const MXContext,
    index: usize,
    name_out: *mut *mut c_char,
) -> MXStatus {
    catch_panic(|| {
        if ctx.is_null() || name_out.is_null() {
            set_last_error("null argument".to_string());
            return MXStatus::ErrorInvalidArgument;
        }
        let ctx = unsafe { &*ctx };
        let names = ctx.registry.names();
        let name = match names.get(index) {
            Some(n) => *n,
            None => {
                set_last_error(format!(
                    "function index {} out of range for {} bindings",
                    index,
                    names.len()
                ));
                return MXStatus::ErrorInvalidArgument;
            }
        };
        match CString::new(name) {
            Ok(c) => {
                unsafe { *name_out = c.into_raw() };
                MXStatus::Ok
            }
            Err(e) => {
                set_last_error(format!("name encoding error: {}", e));
                MXStatus::ErrorInternal
            }
        }
    })
}

/// Docstring of the named binding, the host-side help channel.
///
/// On success, writes a heap-allocated C string into `*doc_out`. The caller
/// must later call `mx_free_string` to free it.
#[no_mangle]
pub unsafe extern "C" fn mx_function_doc(
    ctx: *const MXContext,
    name: *const c_char,
    doc_out: *mut *mut c_char,
) -> MXStatus {
    catch_panic(|| {
        if ctx.is_null() || name.is_null() || doc_out.is_null() {
            set_last_error("null argument".to_string());
            return MXStatus::ErrorInvalidArgument;
        }
        let ctx = unsafe { &*ctx };
        let name_str = match unsafe { CStr::from_ptr(name) }.to_str() {
            Ok(s) => s,
            Err(e) => {
                set_last_error(format!("invalid function name: {}", e));
                return MXStatus::ErrorInvalidArgument;
            }
        };
        let doc = match ctx.registry.doc(name_str) {
            Some(d) => d,
            None => {
                set_last_error(format!("unknown function '{}'", name_str));
                return MXStatus::ErrorUnknownFunction;
            }
        };
        match CString::new(doc) {
            Ok(c) => {
                unsafe { *doc_out = c.into_raw() };
                MXStatus::Ok
            }
            Err(e) => {
                set_last_error(format!("doc encoding error: {}", e));
                MXStatus::ErrorInternal
            }
        }
    })
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error, or
/// null if no error has occurred. The caller must free the returned string
/// with `mx_free_string`.
#[no_mangle]
pub extern "C" fn mx_last_error() -> *const c_char {
    match take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null(),
    }
}

/// Free a string previously returned by this library.
#[no_mangle]
pub unsafe extern "C" fn mx_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Release a matrix previously returned by a binding.
///
/// Passing a null pointer or an already-destroyed matrix is a no-op.
#[no_mangle]
pub unsafe extern "C" fn mx_matrix_destroy(m: *mut MXMatrix) -> MXStatus {
    if m.is_null() {
        return MXStatus::Ok;
    }
    view::matrix_drop(&mut *m);
    MXStatus::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::raw::c_void;

    fn f64_view(data: &[f64], rows: usize, cols: usize) -> MXMatrixView {
        MXMatrixView {
            data: data.as_ptr() as *const c_void,
            rows,
            cols,
            dtype: MXDType::F64,
            layout: MXLayout::RowMajor,
        }
    }

    fn i32_view(data: &[i32], rows: usize, cols: usize) -> MXMatrixView {
        MXMatrixView {
            data: data.as_ptr() as *const c_void,
            rows,
            cols,
            dtype: MXDType::I32,
            layout: MXLayout::RowMajor,
        }
    }

    fn create_context() -> *mut MXContext {
        let mut ctx: *mut MXContext = std::ptr::null_mut();
        assert_eq!(mx_context_create(&mut ctx), MXStatus::Ok);
        assert!(!ctx.is_null());
        ctx
    }

    #[test]
    fn test_add_matrices_out_of_place() {
        let ctx = create_context();
        let m1 = vec![1.0f64, 2.0, 3.0, 4.0];
        let m2 = vec![10.0f64, 10.0, 10.0, 10.0];
        let mut out = MXMatrix {
            data: std::ptr::null_mut(),
            rows: 0,
            cols: 0,
            dtype: MXDType::F64,
            layout: MXLayout::RowMajor,
        };

        let status = unsafe {
            mx_add_matrices(
                ctx,
                &f64_view(&m1, 2, 2),
                &f64_view(&m2, 2, 2),
                2,
                false,
                &mut out,
            )
        };
        assert_eq!(status, MXStatus::Ok);
        assert_eq!(out.rows, 2);
        assert_eq!(out.cols, 2);
        let result = unsafe { view::slice::<f64>(out.data, 4) };
        assert_eq!(result, &[12.0, 14.0, 16.0, 18.0]);
        // inputs untouched
        assert_eq!(m2, vec![10.0; 4]);

        unsafe {
            assert_eq!(mx_matrix_destroy(&mut out), MXStatus::Ok);
            assert_eq!(mx_context_destroy(ctx), MXStatus::Ok);
        }
    }

    #[test]
    fn test_add_matrices_in_place_writes_m2() {
        let ctx = create_context();
        let m1 = vec![1i32, 1, 1];
        let m2 = vec![0i32, 1, 2];

        let status = unsafe {
            mx_add_matrices(
                ctx,
                &i32_view(&m1, 1, 3),
                &i32_view(&m2, 1, 3),
                3,
                true,
                std::ptr::null_mut(),
            )
        };
        assert_eq!(status, MXStatus::Ok);
        assert_eq!(m2, vec![3, 4, 5]);

        unsafe { mx_context_destroy(ctx) };
    }

    #[test]
    fn test_add_matrices_shape_mismatch() {
        let ctx = create_context();
        let m1 = vec![0.0f64; 6];
        let m2 = vec![0.0f64; 9];
        let mut out = MXMatrix {
            data: std::ptr::null_mut(),
            rows: 0,
            cols: 0,
            dtype: MXDType::F64,
            layout: MXLayout::RowMajor,
        };

        let status = unsafe {
            mx_add_matrices(
                ctx,
                &f64_view(&m1, 2, 3),
                &f64_view(&m2, 3, 3),
                1,
                false,
                &mut out,
            )
        };
        assert_eq!(status, MXStatus::ErrorShapeMismatch);

        let msg = mx_last_error();
        assert!(!msg.is_null());
        let text = unsafe { CStr::from_ptr(msg) }.to_str().unwrap().to_string();
        assert!(text.contains("must have the same shape"), "got: {text}");
        unsafe { mx_free_string(msg as *mut c_char) };

        // the error was taken; a second read reports nothing
        assert!(mx_last_error().is_null());

        unsafe { mx_context_destroy(ctx) };
    }

    #[test]
    fn test_add_matrices_dtype_mismatch_in_place() {
        let ctx = create_context();
        let m1 = vec![1.0f64];
        let m2 = vec![1i32];

        let status = unsafe {
            mx_add_matrices(
                ctx,
                &f64_view(&m1, 1, 1),
                &i32_view(&m2, 1, 1),
                1,
                true,
                std::ptr::null_mut(),
            )
        };
        assert_eq!(status, MXStatus::ErrorDTypeMismatch);

        unsafe { mx_context_destroy(ctx) };
    }

    #[test]
    fn test_mesh_stats_square() {
        let ctx = create_context();
        let v = vec![
            0.0f64, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ];
        let f = vec![0i32, 1, 2, 0, 2, 3];
        let r = vec![1.0f64, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        let mut stats = MXAreaStats {
            mean: 0.0,
            min_rel: 0.0,
            max_rel: 0.0,
            sigma: 0.0,
        };
        let mut v_out = MXMatrix {
            data: std::ptr::null_mut(),
            rows: 0,
            cols: 0,
            dtype: MXDType::F64,
            layout: MXLayout::RowMajor,
        };

        let status = unsafe {
            mx_mesh_stats(
                ctx,
                &f64_view(&v, 4, 3),
                &i32_view(&f, 2, 3),
                &f64_view(&r, 3, 3),
                &mut stats,
                &mut v_out,
            )
        };
        assert_eq!(status, MXStatus::Ok);
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert!((stats.sigma).abs() < 1e-12);
        assert_eq!(v_out.rows, 4);
        let rotated = unsafe { view::slice::<f64>(v_out.data, 12) };
        // identity rotation doubles every vertex
        assert_eq!(rotated[3], 2.0);
        assert_eq!(rotated[7], 2.0);

        unsafe {
            mx_matrix_destroy(&mut v_out);
            mx_context_destroy(ctx);
        }
    }

    #[test]
    fn test_mesh_stats_rejects_f32_rotation() {
        let ctx = create_context();
        let v = vec![0.0f64; 9];
        let f = vec![0i32, 1, 2];
        let r = vec![0.0f32; 9];
        let r_view = MXMatrixView {
            data: r.as_ptr() as *const c_void,
            rows: 3,
            cols: 3,
            dtype: MXDType::F32,
            layout: MXLayout::RowMajor,
        };

        let mut stats = MXAreaStats {
            mean: 0.0,
            min_rel: 0.0,
            max_rel: 0.0,
            sigma: 0.0,
        };
        let mut v_out = MXMatrix {
            data: std::ptr::null_mut(),
            rows: 0,
            cols: 0,
            dtype: MXDType::F64,
            layout: MXLayout::RowMajor,
        };

        let status = unsafe {
            mx_mesh_stats(
                ctx,
                &f64_view(&v, 3, 3),
                &i32_view(&f, 1, 3),
                &r_view,
                &mut stats,
                &mut v_out,
            )
        };
        assert_eq!(status, MXStatus::ErrorDTypeMismatch);

        unsafe { mx_context_destroy(ctx) };
    }

    #[test]
    fn test_introspection() {
        let ctx = create_context();

        let mut count = 0usize;
        assert_eq!(unsafe { mx_function_count(ctx, &mut count) }, MXStatus::Ok);
        assert_eq!(count, 2);

        let mut name: *mut c_char = std::ptr::null_mut();
        assert_eq!(
            unsafe { mx_function_name(ctx, 0, &mut name) },
            MXStatus::Ok
        );
        let name_str = unsafe { CStr::from_ptr(name) }.to_str().unwrap().to_string();
        assert_eq!(name_str, "add_matrices");

        let mut doc: *mut c_char = std::ptr::null_mut();
        assert_eq!(
            unsafe { mx_function_doc(ctx, name, &mut doc) },
            MXStatus::Ok
        );
        let doc_str = unsafe { CStr::from_ptr(doc) }.to_str().unwrap().to_string();
        assert!(doc_str.contains("num_additions"));

        unsafe {
            mx_free_string(name);
            mx_free_string(doc);
        }

        let missing = CString::new("missing").unwrap();
        let mut doc2: *mut c_char = std::ptr::null_mut();
        assert_eq!(
            unsafe { mx_function_doc(ctx, missing.as_ptr(), &mut doc2) },
            MXStatus::ErrorUnknownFunction
        );

        unsafe { mx_context_destroy(ctx) };
    }

    #[test]
    fn test_null_arguments() {
        let mut out = MXMatrix {
            data: std::ptr::null_mut(),
            rows: 0,
            cols: 0,
            dtype: MXDType::F64,
            layout: MXLayout::RowMajor,
        };
        let status = unsafe {
            mx_add_matrices(
                std::ptr::null_mut(),
                std::ptr::null(),
                std::ptr::null(),
                1,
                false,
                &mut out,
            )
        };
        assert_eq!(status, MXStatus::ErrorInvalidArgument);
        assert_eq!(mx_context_create(std::ptr::null_mut()), MXStatus::ErrorInvalidArgument);
        assert_eq!(unsafe { mx_context_destroy(std::ptr::null_mut()) }, MXStatus::Ok);
    }
}
