use mx_matrix::Matrix;

use crate::error::BindError;

/// A dynamically typed argument or return value.
///
/// Matrices are carried by value: handing one back from a handler moves the
/// underlying storage out to the host without copying element data.
#[derive(Debug, Clone)]
pub enum Value {
    Matrix(Matrix),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Matrix(_) => "matrix",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Positionally bound arguments handed to a handler after validation.
///
/// Matrix slots can be taken by value exactly once, which is how the
/// in-place path of `add_matrices` comes to own the buffer it mutates.
#[derive(Debug)]
pub struct Args {
    values: Vec<Option<Value>>,
}

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Args {
            values: values.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn slot(&self, index: usize) -> Result<&Value, BindError> {
        self.values
            .get(index)
            .and_then(|v| v.as_ref())
            .ok_or_else(|| BindError::Internal(format!("argument {index} missing or already taken")))
    }

    /// Take ownership of the matrix at `index`.
    pub fn take_matrix(&mut self, index: usize) -> Result<Matrix, BindError> {
        let value = self
            .values
            .get_mut(index)
            .and_then(|v| v.take())
            .ok_or_else(|| BindError::Internal(format!("argument {index} missing or already taken")))?;
        let type_name = value.type_name();
        value
            .into_matrix()
            .ok_or_else(|| BindError::Internal(format!("argument {index} is {type_name}, not a matrix")))
    }

    pub fn int(&self, index: usize) -> Result<i64, BindError> {
        let value = self.slot(index)?;
        value
            .as_int()
            .ok_or_else(|| BindError::Internal(format!("argument {index} is {}, not int", value.type_name())))
    }

    pub fn float(&self, index: usize) -> Result<f64, BindError> {
        let value = self.slot(index)?;
        value
            .as_float()
            .ok_or_else(|| BindError::Internal(format!("argument {index} is {}, not float", value.type_name())))
    }

    pub fn bool(&self, index: usize) -> Result<bool, BindError> {
        let value = self.slot(index)?;
        value
            .as_bool()
            .ok_or_else(|| BindError::Internal(format!("argument {index} is {}, not bool", value.type_name())))
    }
}
