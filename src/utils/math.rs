//! Tolerant floating-point comparisons used by the split and pruning rules.

/// Two quantities closer than this are treated as equal.
pub const SMALL: f64 = 1e-6;

#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < SMALL
}

/// `a` is greater than `b` by more than [`SMALL`].
#[inline]
pub fn gr(a: f64, b: f64) -> bool {
    a - b > SMALL
}

/// `a` is smaller than, or within [`SMALL`] of, `b`.
#[inline]
pub fn sm_or_eq(a: f64, b: f64) -> bool {
    a - b < SMALL
}

/// Index of the largest element; ties go to the lowest index. Empty input
/// yields `0`.
pub fn max_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Scales `values` so they sum to one; all-zero input is left untouched.
pub fn normalize(values: &mut [f64]) {
    let sum: f64 = values.iter().sum();
    if approx_eq(sum, 0.0) {
        return;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}
