use crate::error::BindError;
use crate::signature::{ArgType, FunctionSpec, ScalarType};
use crate::value::Value;

/// Bind positional values to a declaration.
///
/// Performs the full argument-matching contract:
/// 1. arity check, counting omitted trailing arguments against defaults
/// 2. dtype-set check for `dense` arguments
/// 3. shared dtype/layout check for `matches` arguments
/// 4. scalar type check, promoting int values to float parameters the way
///    dynamic hosts pass integer literals for float arguments
///
/// On success the returned vector has one value per declared argument, with
/// defaults filled in.
pub fn bind_args(spec: &FunctionSpec, mut args: Vec<Value>) -> Result<Vec<Value>, BindError> {
    let required = spec.required_args();
    if args.len() < required || args.len() > spec.args.len() {
        return Err(BindError::ArityMismatch {
            func: spec.name,
            expected: spec.args.len(),
            required,
            got: args.len(),
        });
    }

    for arg_spec in &spec.args[args.len()..] {
        match arg_spec.default {
            Some(default) => args.push(default.to_value()),
            // non-trailing default: the omitted argument has no fallback
            None => {
                return Err(BindError::ArityMismatch {
                    func: spec.name,
                    expected: spec.args.len(),
                    required,
                    got: args.len(),
                })
            }
        }
    }

    for (i, arg_spec) in spec.args.iter().enumerate() {
        match &arg_spec.ty {
            ArgType::Dense(allowed) => {
                let m = args[i].as_matrix().ok_or(BindError::ExpectedMatrix {
                    func: spec.name,
                    arg: arg_spec.name,
                    got: args[i].type_name(),
                })?;
                if !allowed.contains(&m.dtype()) {
                    let allowed = allowed
                        .iter()
                        .map(|d| d.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(BindError::DTypeNotAllowed {
                        func: spec.name,
                        arg: arg_spec.name,
                        got: m.dtype(),
                        allowed,
                    });
                }
            }
            ArgType::Matches(other_name) => {
                let other_name = *other_name;
                let m = args[i].as_matrix().ok_or(BindError::ExpectedMatrix {
                    func: spec.name,
                    arg: arg_spec.name,
                    got: args[i].type_name(),
                })?;
                let other_index = spec
                    .args
                    .iter()
                    .position(|a| {
                        a.name == other_name && matches!(a.ty, ArgType::Dense(_))
                    })
                    .ok_or(BindError::InvalidSpec {
                        func: spec.name,
                        arg: arg_spec.name,
                        other: other_name,
                    })?;
                let other = args[other_index]
                    .as_matrix()
                    .ok_or(BindError::ExpectedMatrix {
                        func: spec.name,
                        arg: spec.args[other_index].name,
                        got: args[other_index].type_name(),
                    })?;
                if m.dtype() != other.dtype() || m.layout() != other.layout() {
                    return Err(BindError::ArgumentMismatch {
                        func: spec.name,
                        arg: arg_spec.name,
                        other: other_name,
                        arg_dtype: m.dtype(),
                        arg_layout: m.layout(),
                        other_dtype: other.dtype(),
                        other_layout: other.layout(),
                    });
                }
            }
            ArgType::Scalar(expected) => {
                match (expected, &args[i]) {
                    (ScalarType::Int, Value::Int(_))
                    | (ScalarType::Float, Value::Float(_))
                    | (ScalarType::Bool, Value::Bool(_)) => {}
                    (ScalarType::Float, Value::Int(n)) => {
                        let promoted = *n as f64;
                        args[i] = Value::Float(promoted);
                    }
                    _ => {
                        return Err(BindError::ExpectedScalar {
                            func: spec.name,
                            arg: arg_spec.name,
                            expected: *expected,
                            got: args[i].type_name(),
                        })
                    }
                }
            }
        }
    }

    Ok(args)
}
