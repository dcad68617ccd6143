//! Vectors are plain `&[f64]` slices; 3D-only operations take `[f64; 3]`.

use crate::LinalgError;

// NaN components count as zero, like missing ones.
fn component(v: &[f64], i: usize) -> f64 {
    match v.get(i) {
        Some(x) if !x.is_nan() => *x,
        _ => 0.0,
    }
}

/// Component-wise sum. The shorter operand is zero-padded.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    (0..a.len().max(b.len()))
        .map(|i| component(a, i) + component(b, i))
        .collect()
}

/// Component-wise difference `a - b`. The shorter operand is zero-padded.
pub fn subtract(a: &[f64], b: &[f64]) -> Vec<f64> {
    (0..a.len().max(b.len()))
        .map(|i| component(a, i) - component(b, i))
        .collect()
}

/// Multiply every component by `s`.
pub fn scale(v: &[f64], s: f64) -> Vec<f64> {
    v.iter().map(|x| x * s).collect()
}

/// Dot product over the common prefix of `a` and `b`.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
pub fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Divide by the Euclidean norm.
///
/// # Errors
///
/// Returns [`LinalgError::ZeroVector`] if the norm is zero.
pub fn normalize(v: &[f64]) -> Result<Vec<f64>, LinalgError> {
    let n = norm(v);
    if n == 0.0 {
        return Err(LinalgError::ZeroVector);
    }
    Ok(scale(v, 1.0 / n))
}

/// Right-handed cross product, `c[i] = a[i+1] b[i+2] - a[i+2] b[i+1]`.
pub fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    let mut c = [0.0; 3];
    for (i, ci) in c.iter_mut().enumerate() {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;
        *ci = a[j] * b[k] - a[k] * b[j];
    }
    c
}

/// Copy the first three components into an array, zero-padding short input.
pub fn to_array3(v: &[f64]) -> [f64; 3] {
    [component(v, 0), component(v, 1), component(v, 2)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_subtract_pad() {
        assert_eq!(add(&[1.0, 2.0], &[3.0, 4.0, 5.0]), vec![4.0, 6.0, 5.0]);
        assert_eq!(subtract(&[1.0, 2.0, 3.0], &[1.0]), vec![0.0, 2.0, 3.0]);
        assert_eq!(subtract(&[1.0], &[0.0, 2.0]), vec![1.0, -2.0]);
    }

    #[test]
    fn test_nan_counts_as_zero() {
        assert_eq!(add(&[f64::NAN, 1.0], &[2.0, 2.0]), vec![2.0, 3.0]);
        assert_eq!(to_array3(&[1.0, f64::NAN]), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize() -> Result<(), LinalgError> {
        let n = normalize(&[3.0, 0.0, 4.0])?;
        assert_relative_eq!(n[0], 0.6, epsilon = 1e-12);
        assert_relative_eq!(n[2], 0.8, epsilon = 1e-12);
        assert_relative_eq!(norm(&n), 1.0, epsilon = 1e-12);
        assert_eq!(normalize(&[0.0, 0.0]), Err(LinalgError::ZeroVector));
        Ok(())
    }

    #[test]
    fn test_cross_right_handed() {
        assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_eq!(cross(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
        assert_eq!(cross(&[0.0, 0.0, 1.0], &[1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]);

        let a = [1.0, 2.0, 3.0];
        let b = [-2.0, 0.5, 4.0];
        let c = cross(&a, &b);
        assert_relative_eq!(dot(&c, &a), 0.0, epsilon = 1e-12);
        assert_relative_eq!(dot(&c, &b), 0.0, epsilon = 1e-12);
    }
}
