//! Element-wise kernels shared by `Matrix` and the C boundary.
//!
//! The FFI in-place path operates on caller-owned buffers, so the kernels are
//! plain slice functions rather than `Matrix` methods.

use std::ops::AddAssign;

/// Accumulate `src` into `dst`, `times` times: `dst[i] += times * src[i]`,
/// performed as `times` separate additions rather than one multiply-add.
///
/// # Panics
/// Panics if the slices have different lengths. Callers validate shapes
/// before reaching the kernel.
pub fn repeated_add_assign<T: AddAssign + Copy>(dst: &mut [T], src: &[T], times: u64) {
    assert_eq!(dst.len(), src.len(), "kernel operands must have equal length");
    for _ in 0..times {
        for (d, s) in dst.iter_mut().zip(src.iter()) {
            *d += *s;
        }
    }
}

/// Single accumulation: `dst[i] += src[i]`.
pub fn add_assign_slice<T: AddAssign + Copy>(dst: &mut [T], src: &[T]) {
    repeated_add_assign(dst, src, 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_add() {
        let mut dst = vec![1.0f64, 2.0];
        repeated_add_assign(&mut dst, &[10.0, 20.0], 3);
        assert_eq!(dst, vec![31.0, 62.0]);
    }

    #[test]
    fn test_zero_times_is_noop() {
        let mut dst = vec![5i32, 6];
        repeated_add_assign(&mut dst, &[1, 1], 0);
        assert_eq!(dst, vec![5, 6]);
    }

    #[test]
    fn test_single_add() {
        let mut dst = vec![1i64, 2];
        add_assign_slice(&mut dst, &[3, 4]);
        assert_eq!(dst, vec![4, 6]);
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        let mut dst = vec![1.0f32];
        repeated_add_assign(&mut dst, &[1.0, 2.0], 1);
    }
}
