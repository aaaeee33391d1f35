use std::fmt;

use mx_matrix::DType;

use crate::value::Value;

/// Non-matrix argument types accepted by bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int,
    Float,
    Bool,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Int => write!(f, "int"),
            ScalarType::Float => write!(f, "float"),
            ScalarType::Bool => write!(f, "bool"),
        }
    }
}

/// A scalar default value carried in a declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ScalarValue {
    pub fn to_value(self) -> Value {
        match self {
            ScalarValue::Int(n) => Value::Int(n),
            ScalarValue::Float(x) => Value::Float(x),
            ScalarValue::Bool(b) => Value::Bool(b),
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarValue::Int(_) => ScalarType::Int,
            ScalarValue::Float(_) => ScalarType::Float,
            ScalarValue::Bool(_) => ScalarType::Bool,
        }
    }
}

/// The constraint a declared argument places on the value bound to it.
#[derive(Debug, Clone, Copy)]
pub enum ArgType {
    /// A dense matrix whose dtype must be one of the listed types.
    Dense(&'static [DType]),
    /// A dense matrix that must share dtype and layout with the named
    /// earlier argument. Element-wise bodies can then mix the two operands
    /// without per-element conversions.
    Matches(&'static str),
    /// A plain scalar converted from the host.
    Scalar(ScalarType),
}

/// One declared argument: a name, a constraint, and an optional default.
///
/// Defaults are only supported on scalar arguments, and defaulted arguments
/// must form a trailing run of the argument list.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: &'static str,
    pub ty: ArgType,
    pub default: Option<ScalarValue>,
}

/// A binding declaration: the exposed name, its docstring, and its arguments.
///
/// The docstring is part of the declaration so hosts can query it for help
/// text without calling the function.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub doc: &'static str,
    pub args: Vec<ArgSpec>,
}

impl FunctionSpec {
    /// Number of arguments that must be provided by the caller.
    pub fn required_args(&self) -> usize {
        self.args
            .iter()
            .take_while(|a| a.default.is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_args() {
        let spec = FunctionSpec {
            name: "f",
            doc: "",
            args: vec![
                ArgSpec {
                    name: "a",
                    ty: ArgType::Scalar(ScalarType::Int),
                    default: None,
                },
                ArgSpec {
                    name: "b",
                    ty: ArgType::Scalar(ScalarType::Bool),
                    default: Some(ScalarValue::Bool(false)),
                },
            ],
        };
        assert_eq!(spec.required_args(), 1);
    }

    #[test]
    fn test_scalar_value_conversion() {
        assert_eq!(ScalarValue::Int(3).scalar_type(), ScalarType::Int);
        assert!(matches!(ScalarValue::Bool(true).to_value(), Value::Bool(true)));
    }
}
