//! `mx-bind` - The binding declaration convention and dispatch contract.
//!
//! A binding is declared once, in one place: the name a host calls it by, a
//! docstring the host can query, and the argument list with per-argument
//! constraints. Bodies receive validated arguments and return a [`Value`];
//! matrix results move out without copying element data.
//!
//! The constraint forms are:
//! - `dense(...)`: the argument is a dense matrix whose dtype must be one of
//!   the listed types.
//! - `matches(other)`: the argument is a dense matrix that must share dtype
//!   and memory layout with the named earlier argument. Element-wise bodies
//!   can only mix operands that agree on both, so the check runs before the
//!   body and produces a targeted error rather than a kernel failure.
//! - `int` / `float` / `bool`: plain scalars, optionally with a default so
//!   the host may omit the argument.
//!
//! Declared bindings are collected in a [`Registry`], which gives the host a
//! single dispatch surface: name enumeration, docstring lookup, and
//! validated calls.

pub mod error;
mod macros;
pub mod registry;
pub mod signature;
pub mod validate;
pub mod value;

// Re-export primary types at the crate root; the macros expand against
// `$crate::` paths and rely on these.
pub use error::BindError;
pub use registry::{Binding, Handler, Registry};
pub use signature::{ArgSpec, ArgType, FunctionSpec, ScalarType, ScalarValue};
pub use validate::bind_args;
pub use value::{Args, Value};

// The macros reference matrix dtypes as `$crate::DType::F64` and so on.
pub use mx_matrix::DType;
