//! Scalar summaries of a difference array.

use ndarray::ArrayD;

/// Summary statistics over one flattened difference array.
///
/// NaN elements (missing data in either source) are skipped by every
/// reducer. Infinities are real signal and participate normally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    /// Count of non-NaN elements that differ from zero.
    pub nonzero: usize,
}

impl DiffStats {
    /// Reduce an array to its summary. An array with no non-NaN elements
    /// reduces to all-zero statistics.
    pub fn from_array(values: &ArrayD<f64>) -> Self {
        let mut count = 0usize;
        let mut nonzero = 0usize;
        let mut sum = 0.0f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for &v in values.iter() {
            if v.is_nan() {
                continue;
            }
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
            if v != 0.0 {
                nonzero += 1;
            }
        }

        if count == 0 {
            return Self {
                mean: 0.0,
                min: 0.0,
                max: 0.0,
                std_dev: 0.0,
                nonzero: 0,
            };
        }

        let mean = sum / count as f64;
        let variance = values
            .iter()
            .filter(|v| !v.is_nan())
            .map(|&v| (v - mean) * (v - mean))
            .sum::<f64>()
            / count as f64;

        Self {
            mean,
            min,
            max,
            std_dev: variance.sqrt(),
            nonzero,
        }
    }

    /// True when every non-NaN element of the source array was zero.
    pub fn is_all_zero(&self) -> bool {
        self.nonzero == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    fn arr(values: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[values.len()]), values.to_vec()).unwrap()
    }

    #[test]
    fn test_basic_reducers() {
        let stats = DiffStats::from_array(&arr(&[0.0, 0.0, 1.0]));
        assert!((stats.mean - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.nonzero, 1);
    }

    #[test]
    fn test_std_dev_constant_array() {
        let stats = DiffStats::from_array(&arr(&[2.5, 2.5, 2.5, 2.5]));
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean, 2.5);
    }

    #[test]
    fn test_std_dev_known_value() {
        // Population std dev of [1, 3] is 1.
        let stats = DiffStats::from_array(&arr(&[1.0, 3.0]));
        assert!((stats.std_dev - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_elements_skipped() {
        let stats = DiffStats::from_array(&arr(&[f64::NAN, 2.0, f64::NAN, 4.0]));
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.nonzero, 2);
    }

    #[test]
    fn test_all_nan_reduces_to_zero() {
        let stats = DiffStats::from_array(&arr(&[f64::NAN, f64::NAN]));
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
        assert!(stats.is_all_zero());
    }

    #[test]
    fn test_is_all_zero() {
        assert!(DiffStats::from_array(&arr(&[0.0, 0.0])).is_all_zero());
        assert!(!DiffStats::from_array(&arr(&[0.0, 1e-9])).is_all_zero());
        // Symmetric values cancel in the mean but are still differences.
        let symmetric = DiffStats::from_array(&arr(&[-1.0, 1.0]));
        assert_eq!(symmetric.mean, 0.0);
        assert!(!symmetric.is_all_zero());
    }

    #[test]
    fn test_multidimensional_flattening() {
        let values = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let stats = DiffStats::from_array(&values);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.nonzero, 4);
    }
}
