//! The declaration macros.
//!
//! A binding is declared in one place: its exposed name, its docstring, its
//! argument list with per-argument constraints and defaults, and the handler
//! that implements the body. `declare_binding!` expands to a `binding()`
//! constructor suitable for [`Registry::with`](crate::Registry::with).
//!
//! ```
//! use mx_bind::{declare_binding, Args, BindError, Value};
//!
//! fn handle(args: Args) -> Result<Value, BindError> {
//!     Ok(Value::Int(args.int(0)? + args.int(1)?))
//! }
//!
//! declare_binding! {
//!     name: add_ints,
//!     doc: "Adds two integers.",
//!     args: [
//!         [a: int],
//!         [b: int = 1],
//!     ],
//!     handler: handle,
//! }
//!
//! let registry = mx_bind::Registry::new().with(binding());
//! assert!(matches!(registry.call("add_ints", vec![Value::Int(2)]), Ok(Value::Int(3))));
//! ```

/// Expands one bracketed argument declaration to an [`ArgSpec`](crate::ArgSpec).
///
/// Supported forms:
/// - `name: dense(F32, F64, ...)`: dense matrix restricted to the dtype set
/// - `name: matches(other)`: dense matrix sharing dtype and layout with an
///   earlier `dense` argument
/// - `name: int` / `name: float` / `name: bool`: scalar arguments
/// - `name: int = 3` (and float/bool equivalents): scalar with a default,
///   allowing the host to omit the argument
#[macro_export]
macro_rules! arg {
    ($name:ident : dense($($dtype:ident),+ $(,)?)) => {
        $crate::ArgSpec {
            name: stringify!($name),
            ty: $crate::ArgType::Dense(&[$($crate::DType::$dtype),+]),
            default: None,
        }
    };
    ($name:ident : matches($other:ident)) => {
        $crate::ArgSpec {
            name: stringify!($name),
            ty: $crate::ArgType::Matches(stringify!($other)),
            default: None,
        }
    };
    ($name:ident : int) => {
        $crate::ArgSpec {
            name: stringify!($name),
            ty: $crate::ArgType::Scalar($crate::ScalarType::Int),
            default: None,
        }
    };
    ($name:ident : int = $default:expr) => {
        $crate::ArgSpec {
            name: stringify!($name),
            ty: $crate::ArgType::Scalar($crate::ScalarType::Int),
            default: Some($crate::ScalarValue::Int($default)),
        }
    };
    ($name:ident : float) => {
        $crate::ArgSpec {
            name: stringify!($name),
            ty: $crate::ArgType::Scalar($crate::ScalarType::Float),
            default: None,
        }
    };
    ($name:ident : float = $default:expr) => {
        $crate::ArgSpec {
            name: stringify!($name),
            ty: $crate::ArgType::Scalar($crate::ScalarType::Float),
            default: Some($crate::ScalarValue::Float($default)),
        }
    };
    ($name:ident : bool) => {
        $crate::ArgSpec {
            name: stringify!($name),
            ty: $crate::ArgType::Scalar($crate::ScalarType::Bool),
            default: None,
        }
    };
    ($name:ident : bool = $default:expr) => {
        $crate::ArgSpec {
            name: stringify!($name),
            ty: $crate::ArgType::Scalar($crate::ScalarType::Bool),
            default: Some($crate::ScalarValue::Bool($default)),
        }
    };
}

/// Declares a binding and generates its `binding()` constructor.
///
/// Each argument is wrapped in its own brackets so the forms accepted by
/// [`arg!`] can nest commas freely. See the module docs for a worked example.
#[macro_export]
macro_rules! declare_binding {
    (
        name: $name:ident,
        doc: $doc:expr,
        args: [ $( [ $($arg:tt)+ ] ),* $(,)? ],
        handler: $handler:path $(,)?
    ) => {
        /// Constructs the declared binding for registration.
        pub fn binding() -> $crate::Binding {
            $crate::Binding {
                spec: $crate::FunctionSpec {
                    name: stringify!($name),
                    doc: $doc,
                    args: vec![ $( $crate::arg!($($arg)+) ),* ],
                },
                handler: $handler,
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Args, ArgType, BindError, Registry, ScalarType, Value};
    use mx_matrix::DType;

    fn noop(_args: Args) -> Result<Value, BindError> {
        Ok(Value::Bool(true))
    }

    declare_binding! {
        name: example,
        doc: "An example declaration.",
        args: [
            [m1: dense(F32, F64, I32, I64)],
            [m2: matches(m1)],
            [num_additions: int],
            [in_place: bool = false],
        ],
        handler: noop,
    }

    #[test]
    fn test_expansion() {
        let binding = binding();
        assert_eq!(binding.spec.name, "example");
        assert_eq!(binding.spec.doc, "An example declaration.");
        assert_eq!(binding.spec.args.len(), 4);
        assert_eq!(binding.spec.required_args(), 3);

        assert!(matches!(
            binding.spec.args[0].ty,
            ArgType::Dense(dtypes) if dtypes == [DType::F32, DType::F64, DType::I32, DType::I64]
        ));
        assert!(matches!(binding.spec.args[1].ty, ArgType::Matches("m1")));
        assert!(matches!(
            binding.spec.args[2].ty,
            ArgType::Scalar(ScalarType::Int)
        ));
        assert!(binding.spec.args[3].default.is_some());

        // the expanded spec passes registration validation
        let registry = Registry::new().with(binding);
        assert_eq!(registry.names(), vec!["example"]);
    }
}
