//! Forward returns anchored to a publication date.
//!
//! The anchor `p0` is the last close on or before the publication date. The
//! target for a horizon of `n` calendar days is the first close on or after
//! `published + n`. Missing anchors, zero anchors and missing targets all
//! yield a null return rather than an error.

use chrono::Days;
use finnews_traits::Date;
use serde::{Deserialize, Serialize};

use crate::series::{Observation, PriceSeries};

/// Calendar-day horizons reported in the dataset.
pub const HORIZONS: [u32; 3] = [1, 2, 5];

/// Outcome of a single-horizon forward return lookup.
///
/// `p0_date` is reported whenever an anchor exists, even when the return
/// itself is null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardReturn {
    /// Date of the anchor close.
    pub p0_date: Option<Date>,
    /// Date of the target close.
    pub target_date: Option<Date>,
    /// `(pN - p0) / p0`.
    pub value: Option<f64>,
}

impl ForwardReturn {
    /// Whether the return is non-null.
    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

/// Forward returns for every horizon in [`HORIZONS`] from a shared anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizonReturns {
    /// Date of the anchor close.
    pub p0_date: Option<Date>,
    /// One entry per horizon, in [`HORIZONS`] order.
    pub horizons: [ForwardReturn; 3],
}

impl HorizonReturns {
    /// Whether every horizon's return is null.
    pub fn all_null(&self) -> bool {
        self.horizons.iter().all(|h| !h.is_defined())
    }

    /// The result for horizon `n`, if `n` is one of [`HORIZONS`].
    pub fn get(&self, n: u32) -> Option<&ForwardReturn> {
        HORIZONS
            .iter()
            .position(|h| *h == n)
            .map(|i| &self.horizons[i])
    }
}

/// Return over `horizon` calendar days from `published`.
///
/// # Example
///
/// ```
/// use finnews_returns::{PriceSeries, forward_return};
/// use finnews_traits::Date;
///
/// let d = |m, day| Date::from_ymd_opt(2024, m, day).unwrap();
/// let series = PriceSeries::new("X", vec![(d(1, 1), 100.0), (d(1, 5), 110.0)]);
///
/// let r = forward_return(&series, d(1, 2), 1);
/// assert_eq!(r.p0_date, Some(d(1, 1)));
/// assert_eq!(r.target_date, Some(d(1, 5)));
/// assert!((r.value.unwrap() - 0.10).abs() < 1e-12);
/// ```
pub fn forward_return(series: &PriceSeries, published: Date, horizon: u32) -> ForwardReturn {
    match series.last_on_or_before(published) {
        Some(p0) => from_anchor(series, p0, published, horizon),
        None => ForwardReturn::default(),
    }
}

/// Returns for all of [`HORIZONS`], looking the anchor up once.
pub fn horizon_returns(series: &PriceSeries, published: Date) -> HorizonReturns {
    let Some(p0) = series.last_on_or_before(published) else {
        return HorizonReturns::default();
    };

    HorizonReturns {
        p0_date: Some(p0.date),
        horizons: HORIZONS.map(|n| from_anchor(series, p0, published, n)),
    }
}

fn from_anchor(series: &PriceSeries, p0: Observation, published: Date, horizon: u32) -> ForwardReturn {
    let mut out = ForwardReturn {
        p0_date: Some(p0.date),
        ..Default::default()
    };

    if p0.close == 0.0 {
        return out;
    }

    let Some(pn) = published
        .checked_add_days(Days::new(u64::from(horizon)))
        .and_then(|target| series.first_on_or_after(target))
    else {
        return out;
    };

    out.target_date = Some(pn.date);
    out.value = Some((pn.close - p0.close) / p0.close);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn d(m: u32, day: u32) -> Date {
        Date::from_ymd_opt(2024, m, day).unwrap()
    }

    fn series() -> PriceSeries {
        PriceSeries::new(
            "X",
            vec![
                (d(1, 1), 100.0),
                (d(1, 2), 102.0),
                (d(1, 3), 99.0),
                (d(1, 8), 105.0),
            ],
        )
    }

    #[test]
    fn test_gap_skips_to_next_close() {
        let s = PriceSeries::new("X", vec![(d(1, 1), 100.0), (d(1, 5), 110.0)]);
        let r = forward_return(&s, d(1, 2), 1);
        assert_eq!(r.p0_date, Some(d(1, 1)));
        assert_eq!(r.target_date, Some(d(1, 5)));
        assert_relative_eq!(r.value.unwrap(), 0.10, epsilon = 1e-12);
    }

    #[rstest]
    #[case(1, d(1, 3), 99.0)]
    #[case(2, d(1, 8), 105.0)]
    #[case(5, d(1, 8), 105.0)]
    fn test_horizons(#[case] n: u32, #[case] target: Date, #[case] pn: f64) {
        let r = forward_return(&series(), d(1, 2), n);
        assert_eq!(r.p0_date, Some(d(1, 2)));
        assert_eq!(r.target_date, Some(target));
        assert_relative_eq!(r.value.unwrap(), (pn - 102.0) / 102.0, epsilon = 1e-12);
    }

    #[test]
    fn test_too_fresh_keeps_anchor() {
        let r = horizon_returns(&series(), d(1, 20));
        assert_eq!(r.p0_date, Some(d(1, 8)));
        assert!(r.all_null());
        for h in r.horizons {
            assert_eq!(h.p0_date, Some(d(1, 8)));
            assert!(h.target_date.is_none());
        }
    }

    #[test]
    fn test_older_than_all_prices() {
        let r = horizon_returns(&series(), d(1, 1).pred_opt().unwrap());
        assert_eq!(r, HorizonReturns::default());
        assert!(r.all_null());
    }

    #[test]
    fn test_zero_anchor_is_null_for_every_horizon() {
        let s = PriceSeries::new("X", vec![(d(1, 1), 0.0), (d(1, 3), 10.0), (d(1, 9), 12.0)]);
        let r = horizon_returns(&s, d(1, 1));
        assert_eq!(r.p0_date, Some(d(1, 1)));
        assert!(r.all_null());
    }

    #[test]
    fn test_shared_anchor_matches_single_lookup() {
        let s = series();
        for published in [d(1, 1), d(1, 2), d(1, 4), d(1, 7)] {
            let all = horizon_returns(&s, published);
            for n in HORIZONS {
                assert_eq!(*all.get(n).unwrap(), forward_return(&s, published, n));
            }
        }
    }

    #[test]
    fn test_get_unknown_horizon() {
        assert!(horizon_returns(&series(), d(1, 2)).get(3).is_none());
    }
}
