//! Rank information coefficient between sentiment and forward returns.
//!
//! The IC is the Spearman rank correlation between headline sentiment and the
//! forward return that followed. Rows with a null return are passed as `NaN`
//! and dropped pairwise.

use finnews_traits::stats::finite_pairs;
use ndarray::Array1;

/// Spearman rank correlation between `scores` and `forward_returns`.
///
/// Values range from -1 to 1. Returns `NaN` on length mismatch, fewer than
/// two finite pairs, or when either side has no rank variation.
///
/// # Example
///
/// ```
/// use finnews_eval::calculate_ic;
/// use ndarray::array;
///
/// let sentiment = array![0.6, -0.2, 0.0, 0.9];
/// let returns = array![0.02, -0.01, 0.001, 0.03];
/// assert!((calculate_ic(&sentiment, &returns) - 1.0).abs() < 1e-10);
/// ```
pub fn calculate_ic(scores: &Array1<f64>, forward_returns: &Array1<f64>) -> f64 {
    match (scores.as_slice(), forward_returns.as_slice()) {
        (Some(x), Some(y)) => rank_ic(x, y),
        _ => rank_ic(&scores.to_vec(), &forward_returns.to_vec()),
    }
}

/// Slice form of [`calculate_ic`].
pub fn rank_ic(scores: &[f64], forward_returns: &[f64]) -> f64 {
    if scores.len() != forward_returns.len() {
        return f64::NAN;
    }

    let pairs = finite_pairs(scores, forward_returns);
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
    spearman_correlation(&compute_ranks(&x), &compute_ranks(&y))
}

/// Zero-based ranks; ties share their average rank.
fn compute_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && (values[order[j]] - values[order[i]]).abs() < f64::EPSILON {
            j += 1;
        }

        let avg_rank = (i + j - 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }
        i = j;
    }

    ranks
}

fn spearman_correlation(ranks_x: &[f64], ranks_y: &[f64]) -> f64 {
    let n = ranks_x.len() as f64;
    if n < 2.0 {
        return f64::NAN;
    }

    let mean_x = ranks_x.iter().sum::<f64>() / n;
    let mean_y = ranks_y.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (rx, ry) in ranks_x.iter().zip(ranks_y) {
        let dx = rx - mean_x;
        let dy = ry - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_perfect_correlation() {
        let scores = array![0.1, 0.2, 0.3, 0.4, 0.5];
        let returns = array![0.01, 0.02, 0.03, 0.04, 0.05];
        assert_relative_eq!(calculate_ic(&scores, &returns), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_correlation() {
        let scores = array![0.5, 0.4, 0.3, 0.2, 0.1];
        let returns = array![0.01, 0.02, 0.03, 0.04, 0.05];
        assert_relative_eq!(calculate_ic(&scores, &returns), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_monotone_but_nonlinear() {
        let scores = [-0.9, -0.1, 0.0, 0.2, 0.95];
        let returns = [-0.2, -0.001, 0.0, 0.0005, 0.4];
        assert_relative_eq!(rank_ic(&scores, &returns), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_null_returns_dropped_pairwise() {
        let scores = [0.1, 0.2, 0.9, 0.4];
        let returns = [0.01, 0.02, f64::NAN, 0.04];
        assert_relative_eq!(rank_ic(&scores, &returns), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(rank_ic(&[0.1], &[0.2]).is_nan());
        assert!(rank_ic(&[0.1, 0.2], &[0.2]).is_nan());
        // Every headline neutral: no rank variation.
        assert!(rank_ic(&[0.0, 0.0, 0.0], &[0.01, 0.02, 0.03]).is_nan());
    }

    #[test]
    fn test_compute_ranks() {
        assert_eq!(compute_ranks(&[3.0, 1.0, 2.0, 5.0, 4.0]), vec![2.0, 0.0, 1.0, 4.0, 3.0]);
    }

    #[test]
    fn test_compute_ranks_with_ties() {
        let ranks = compute_ranks(&[1.0, 2.0, 2.0, 3.0]);
        assert_relative_eq!(ranks[0], 0.0);
        assert_relative_eq!(ranks[1], 1.5);
        assert_relative_eq!(ranks[2], 1.5);
        assert_relative_eq!(ranks[3], 3.0);
    }
}
