//! The `add_matrices` binding: repeated element-wise matrix addition.
//!
//! This is the smallest complete example of the declaration convention:
//!
//! - `m1` is a dense matrix accepting any of the four supported dtypes.
//! - `m2` is declared with `matches(m1)`, so dispatch rejects calls where the
//!   two operands differ in dtype or memory layout before the body runs.
//! - `num_additions` is a plain scalar.
//! - `in_place` is a defaulted scalar; hosts may omit it.
//!
//! The body performs the one check the `matches` contract does not cover,
//! shape equality, and raises the descriptive user-facing error on mismatch.
//! Whichever matrix the handler returns is moved out, not copied.

use mx_bind::{declare_binding, Args, BindError, Value};
use mx_matrix::Matrix;

const DOC: &str = "\
Add two matrices.

Parameters
----------
m1 : the first matrix to add
m2 : the second matrix to add
num_additions : the number of times to repeat the addition
in_place : if true, the result is stored in m2 (false by default)

Returns
-------
The sum of the two matrices.
";

declare_binding! {
    name: add_matrices,
    doc: DOC,
    args: [
        [m1: dense(F32, F64, I32, I64)],
        [m2: matches(m1)],
        [num_additions: int],
        [in_place: bool = false],
    ],
    handler: handle,
}

/// Accumulates `m1` into a copy of `m2`, `num_additions` times, and returns
/// the copy. Negative counts perform zero additions.
pub fn add_matrices(m1: &Matrix, m2: &Matrix, num_additions: i64) -> mx_matrix::Result<Matrix> {
    let mut out = m2.clone();
    add_matrices_in_place(m1, &mut out, num_additions)?;
    Ok(out)
}

/// Accumulates `m1` directly into `m2`, `num_additions` times.
pub fn add_matrices_in_place(
    m1: &Matrix,
    m2: &mut Matrix,
    num_additions: i64,
) -> mx_matrix::Result<()> {
    m2.ensure_same_shape(m1, "m2", "m1")?;
    m2.add_assign_repeated(m1, num_additions.max(0) as u64)
}

fn handle(mut args: Args) -> Result<Value, BindError> {
    let m1 = args.take_matrix(0)?;
    let mut m2 = args.take_matrix(1)?;
    let num_additions = args.int(2)?;
    let in_place = args.bool(3)?;

    // Dispatch transferred ownership of m2 to the handler, so the in-place
    // path accumulates straight into it and moves the same buffer back out.
    if in_place {
        add_matrices_in_place(&m1, &mut m2, num_additions)?;
        Ok(Value::Matrix(m2))
    } else {
        Ok(Value::Matrix(add_matrices(&m1, &m2, num_additions)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mx_bind::Registry;
    use mx_matrix::{DType, MatrixError};

    fn registry() -> Registry {
        Registry::new().with(binding())
    }

    #[test]
    fn test_typed_add() {
        let m1 = Matrix::from_f64(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        let m2 = Matrix::from_f64(vec![10.0, 10.0, 10.0, 10.0], 2, 2);
        let out = add_matrices(&m1, &m2, 2).unwrap();
        assert_eq!(
            out.storage().as_f64_slice().unwrap(),
            &[12.0, 14.0, 16.0, 18.0]
        );
        // m2 is untouched
        assert_eq!(m2.storage().as_f64_slice().unwrap(), &[10.0; 4]);
    }

    #[test]
    fn test_typed_in_place() {
        let m1 = Matrix::from_i32(vec![1, 1], 1, 2);
        let mut m2 = Matrix::from_i32(vec![0, 0], 1, 2);
        add_matrices_in_place(&m1, &mut m2, 3).unwrap();
        assert_eq!(m2.storage().as_i32_slice().unwrap(), &[3, 3]);
    }

    #[test]
    fn test_negative_count_adds_nothing() {
        let m1 = Matrix::from_f64(vec![5.0], 1, 1);
        let m2 = Matrix::from_f64(vec![1.0], 1, 1);
        let out = add_matrices(&m1, &m2, -4).unwrap();
        assert_eq!(out.storage().as_f64_slice().unwrap(), &[1.0]);
    }

    #[test]
    fn test_shape_mismatch_error_message() {
        let m1 = Matrix::zeros(DType::F64, 2, 3);
        let m2 = Matrix::zeros(DType::F64, 3, 3);
        let err = add_matrices(&m1, &m2, 1).unwrap_err();
        assert!(matches!(err, MatrixError::ShapeMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "matrices m2 and m1 must have the same shape: \
             got m2.shape = (3, 3), m1.shape = (2, 3)"
        );
    }

    #[test]
    fn test_dispatch_with_default() {
        let registry = registry();
        let m1 = Matrix::from_f64(vec![1.0, 2.0], 1, 2);
        let m2 = Matrix::from_f64(vec![3.0, 4.0], 1, 2);
        // in_place omitted, defaults to false
        let result = registry
            .call(
                "add_matrices",
                vec![m1.into(), m2.into(), Value::Int(1)],
            )
            .unwrap();
        let out = result.into_matrix().unwrap();
        assert_eq!(out.storage().as_f64_slice().unwrap(), &[4.0, 6.0]);
    }

    #[test]
    fn test_dispatch_in_place_returns_accumulated() {
        let registry = registry();
        let m1 = Matrix::from_i64(vec![2], 1, 1);
        let m2 = Matrix::from_i64(vec![1], 1, 1);
        let result = registry
            .call(
                "add_matrices",
                vec![m1.into(), m2.into(), Value::Int(5), Value::Bool(true)],
            )
            .unwrap();
        let out = result.into_matrix().unwrap();
        assert_eq!(out.storage().as_i64_slice().unwrap(), &[11]);
    }

    #[test]
    fn test_dispatch_rejects_mixed_dtypes() {
        let registry = registry();
        let m1 = Matrix::zeros(DType::F64, 2, 2);
        let m2 = Matrix::zeros(DType::F32, 2, 2);
        let err = registry
            .call(
                "add_matrices",
                vec![m1.into(), m2.into(), Value::Int(1)],
            )
            .unwrap_err();
        assert!(matches!(err, BindError::ArgumentMismatch { .. }));
    }

    #[test]
    fn test_doc_is_queryable() {
        let registry = registry();
        let doc = registry.doc("add_matrices").unwrap();
        assert!(doc.contains("num_additions"));
    }
}
