//! Deterministic array generators for test fixtures.
//!
//! Every generator is pure and seeded, so fixtures are reproducible across
//! runs and the expected comparison results can be computed by hand.

use ndarray::{ArrayD, IxDyn};

/// Array where each element equals its flattened (row-major) index.
///
/// Makes read/write integrity easy to verify: `a[[i, j]]` must equal
/// `i * ncols + j` for a 2-D shape.
///
/// # Example
///
/// ```
/// use test_utils::index_array;
///
/// let a = index_array(&[2, 3]);
/// assert_eq!(a[[0, 0]], 0.0);
/// assert_eq!(a[[1, 2]], 5.0);
/// ```
pub fn index_array(shape: &[usize]) -> ArrayD<f64> {
    let len: usize = shape.iter().product();
    ArrayD::from_shape_vec(IxDyn(shape), (0..len).map(|i| i as f64).collect())
        .expect("shape product matches vec length")
}

/// Array of the given shape filled with one value.
pub fn constant_array(shape: &[usize], value: f64) -> ArrayD<f64> {
    ArrayD::from_elem(IxDyn(shape), value)
}

/// Like [`index_array`] but with NaN holes at the given flat positions.
///
/// Useful for testing missing-data handling (fill values become NaN at
/// load time).
pub fn array_with_nans(shape: &[usize], nan_positions: &[usize]) -> ArrayD<f64> {
    let len: usize = shape.iter().product();
    let mut values: Vec<f64> = (0..len).map(|i| i as f64).collect();
    for &pos in nan_positions {
        if pos < len {
            values[pos] = f64::NAN;
        }
    }
    ArrayD::from_shape_vec(IxDyn(shape), values).expect("shape product matches vec length")
}

/// 2-D field varying smoothly in both directions: `row + col / 10`.
///
/// Gives heatmap tests a non-flat range with known corner values.
pub fn gradient_field(height: usize, width: usize) -> ArrayD<f64> {
    let mut values = Vec::with_capacity(height * width);
    for row in 0..height {
        for col in 0..width {
            values.push(row as f64 + col as f64 / 10.0);
        }
    }
    ArrayD::from_shape_vec(IxDyn(&[height, width]), values)
        .expect("shape product matches vec length")
}

/// 1-D sine curve with the given length and amplitude.
pub fn sinusoid(len: usize, amplitude: f64) -> ArrayD<f64> {
    let values: Vec<f64> = (0..len)
        .map(|i| amplitude * (2.0 * std::f64::consts::PI * i as f64 / len as f64).sin())
        .collect();
    ArrayD::from_shape_vec(IxDyn(&[len]), values).expect("shape product matches vec length")
}

/// Deterministic noise in `[0, 1)` from a seeded integer hash.
///
/// Same seed, same array; different seed, different array.
pub fn seeded_noise(shape: &[usize], seed: u32) -> ArrayD<f64> {
    let len: usize = shape.iter().product();
    let values: Vec<f64> = (0..len)
        .map(|i| simple_hash(i as u32, seed) as f64 / u32::MAX as f64)
        .collect();
    ArrayD::from_shape_vec(IxDyn(shape), values).expect("shape product matches vec length")
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_array_values() {
        let a = index_array(&[2, 3]);
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a[[0, 0]], 0.0);
        assert_eq!(a[[0, 2]], 2.0);
        assert_eq!(a[[1, 0]], 3.0);
        assert_eq!(a[[1, 2]], 5.0);
    }

    #[test]
    fn test_constant_array() {
        let a = constant_array(&[4], 42.0);
        assert!(a.iter().all(|&v| v == 42.0));
    }

    #[test]
    fn test_array_with_nans() {
        let a = array_with_nans(&[2, 2], &[0, 3]);
        assert!(a[[0, 0]].is_nan());
        assert_eq!(a[[0, 1]], 1.0);
        assert_eq!(a[[1, 0]], 2.0);
        assert!(a[[1, 1]].is_nan());
    }

    #[test]
    fn test_gradient_field_corners() {
        let a = gradient_field(3, 4);
        assert_eq!(a[[0, 0]], 0.0);
        assert_eq!(a[[0, 3]], 0.3);
        assert_eq!(a[[2, 0]], 2.0);
        assert_eq!(a[[2, 3]], 2.3);
    }

    #[test]
    fn test_sinusoid_starts_at_zero() {
        let a = sinusoid(16, 2.0);
        assert_eq!(a.shape(), &[16]);
        assert!(a[[0]].abs() < 1e-12);
        let max = a.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(max <= 2.0);
        assert!(max > 1.5);
    }

    #[test]
    fn test_seeded_noise_deterministic() {
        let a = seeded_noise(&[10, 10], 42);
        let b = seeded_noise(&[10, 10], 42);
        assert_eq!(a, b, "same seed should produce same data");

        let c = seeded_noise(&[10, 10], 43);
        assert_ne!(a, c, "different seed should produce different data");
    }

    #[test]
    fn test_seeded_noise_range() {
        let a = seeded_noise(&[100], 7);
        assert!(a.iter().all(|&v| (0.0..1.0).contains(&v)));
    }
}
