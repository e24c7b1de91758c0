//! Descriptive statistics used by the sentiment/return report.
//!
//! All functions ignore non-finite values, so nullable returns can be passed
//! in as `NaN` without pre-filtering.

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Two-sided 95% normal quantile used for confidence half-widths.
pub const Z_95: f64 = 1.96;

/// Mean and sample standard deviation of a set of observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of finite observations.
    pub n: usize,
    /// Mean of the finite observations; `NaN` when `n == 0`.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator); `NaN` when `n < 2`.
    pub std: f64,
}

impl Summary {
    /// Half-width of the ~95% confidence interval of the mean.
    ///
    /// `None` when fewer than two observations are available.
    #[must_use]
    pub fn ci95_half_width(&self) -> Option<f64> {
        if self.n > 1 && self.std.is_finite() {
            Some(Z_95 * self.std / (self.n as f64).sqrt())
        } else {
            None
        }
    }
}

/// Summarize a slice of values.
///
/// # Examples
///
/// ```
/// use finnews_traits::stats::summarize;
///
/// let s = summarize(&[1.0, 2.0, 3.0, f64::NAN]);
/// assert_eq!(s.n, 3);
/// assert!((s.mean - 2.0).abs() < 1e-12);
/// assert!((s.std - 1.0).abs() < 1e-12);
/// ```
pub fn summarize(values: &[f64]) -> Summary {
    let finite: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    let n = finite.len();
    if n == 0 {
        return Summary {
            n,
            mean: f64::NAN,
            std: f64::NAN,
        };
    }

    let mean = finite.iter().sum::<f64>() / n as f64;

    // Sample variance with N-1 denominator (Bessel's correction)
    let std = if n > 1 {
        (finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Summary { n, mean, std }
}

/// Keep only the index-aligned pairs where both values are finite.
pub fn finite_pairs(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect()
}

/// Pearson correlation of the finite pairs of `x` and `y`.
///
/// Returns `NaN` on length mismatch, fewer than two pairs, or zero variance
/// in either series.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() {
        return f64::NAN;
    }

    let pairs = finite_pairs(x, y);
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x.sqrt() < MIN_STD_THRESHOLD || var_y.sqrt() < MIN_STD_THRESHOLD {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summarize_basic() {
        let s = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.n, 5);
        assert_relative_eq!(s.mean, 3.0);
        assert_relative_eq!(s.std, 2.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_summarize_empty() {
        let s = summarize(&[]);
        assert_eq!(s.n, 0);
        assert!(s.mean.is_nan());
        assert!(s.ci95_half_width().is_none());
    }

    #[test]
    fn test_summarize_single_value_has_no_ci() {
        let s = summarize(&[0.02]);
        assert_relative_eq!(s.mean, 0.02);
        assert!(s.std.is_nan());
        assert!(s.ci95_half_width().is_none());
    }

    #[test]
    fn test_ci_half_width() {
        let s = summarize(&[1.0, 3.0]);
        // std = sqrt(2), n = 2
        let expected = 1.96 * 2.0_f64.sqrt() / 2.0_f64.sqrt();
        assert_relative_eq!(s.ci95_half_width().unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);

        let y_neg = [8.0, 6.0, 4.0, 2.0];
        assert_relative_eq!(pearson(&x, &y_neg), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_skips_nan_pairs() {
        let x = [1.0, 2.0, f64::NAN, 4.0];
        let y = [1.0, 2.0, 100.0, 4.0];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_degenerate() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_nan());
    }
}
