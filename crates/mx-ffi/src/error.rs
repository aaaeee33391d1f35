use std::cell::RefCell;
use std::ffi::CString;

use mx_bind::BindError;
use mx_geometry::GeometryError;
use mx_matrix::MatrixError;

use crate::types::MXStatus;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Store an error message for later retrieval via `mx_last_error`.
pub fn set_last_error(msg: String) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Take the last error message, leaving `None` in its place.
pub fn take_last_error() -> Option<CString> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Map a dispatch error onto an FFI status code.
pub fn status_for(err: &BindError) -> MXStatus {
    match err {
        BindError::UnknownFunction(_) => MXStatus::ErrorUnknownFunction,
        BindError::ArityMismatch { .. }
        | BindError::ExpectedMatrix { .. }
        | BindError::ExpectedScalar { .. }
        | BindError::Execution(_) => MXStatus::ErrorInvalidArgument,
        BindError::DTypeNotAllowed { .. } | BindError::ArgumentMismatch { .. } => {
            MXStatus::ErrorDTypeMismatch
        }
        BindError::InvalidSpec { .. } | BindError::Internal(_) => MXStatus::ErrorInternal,
        BindError::Matrix(e) => status_for_matrix(e),
    }
}

/// Map a matrix error onto an FFI status code.
pub fn status_for_matrix(err: &MatrixError) -> MXStatus {
    match err {
        MatrixError::ShapeMismatch { .. }
        | MatrixError::MatmulMismatch { .. }
        | MatrixError::IndexOutOfBounds { .. } => MXStatus::ErrorShapeMismatch,
        MatrixError::DTypeMismatch { .. }
        | MatrixError::LayoutMismatch { .. }
        | MatrixError::WrongStorage { .. }
        | MatrixError::UnsupportedDType { .. } => MXStatus::ErrorDTypeMismatch,
        MatrixError::Other(_) => MXStatus::ErrorInternal,
    }
}

/// Map a geometry error onto an FFI status code.
pub fn status_for_geometry(err: &GeometryError) -> MXStatus {
    match err {
        GeometryError::BadVertexMatrix { .. } | GeometryError::BadFaceMatrix { .. } => {
            MXStatus::ErrorDTypeMismatch
        }
        GeometryError::IndexOutOfRange { .. }
        | GeometryError::EmptyMesh
        | GeometryError::ZeroArea
        | GeometryError::BadRotation { .. } => MXStatus::ErrorInvalidArgument,
        GeometryError::Matrix(e) => status_for_matrix(e),
    }
}
