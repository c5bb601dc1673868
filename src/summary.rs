use alloc::vec::Vec;
use core::fmt;

use num_traits::Float;

use crate::{Kbn, helper::median};

/// Display labels in report order
const LABELS: [&str; 7] = [
    "Mean Yield",
    "Median Yield",
    "Standard Deviation of Yield",
    "Max Yield",
    "Min Yield",
    "Mean Daily Change",
    "Standard Deviation of Daily Change",
];

/// Whole-series aggregates of the yield and its daily change.
///
/// Location statistics of the yield are always defined for a non-empty series.
/// Standard deviations use the sample (N-1) estimator and need two values;
/// daily-change statistics lose one more observation to the differencing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryStatistics {
    /// Arithmetic mean of the yield
    pub mean_yield: f64,
    /// Median of the yield
    pub median_yield: f64,
    /// Sample standard deviation of the yield
    pub std_dev_yield: Option<f64>,
    /// Highest observed yield
    pub max_yield: f64,
    /// Lowest observed yield
    pub min_yield: f64,
    /// Mean day-over-day change
    pub mean_daily_change: Option<f64>,
    /// Sample standard deviation of the day-over-day change
    pub std_dev_daily_change: Option<f64>,
}

impl SummaryStatistics {
    /// Computes the aggregates over yields in date order.
    ///
    /// Returns `None` for an empty slice. Callers are expected to have
    /// validated the values as finite.
    pub(crate) fn from_values(values: &[f64]) -> Option<Self> {
        let (mean_yield, std_dev_yield) = mean_and_stddev(values)?;
        let (min_yield, max_yield) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let median_yield = median(values.iter().copied())?;

        let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        let (mean_daily_change, std_dev_daily_change) = match mean_and_stddev(&changes) {
            Some((mean, std)) => (Some(mean), std),
            None => (None, None),
        };

        Some(Self {
            mean_yield,
            median_yield,
            std_dev_yield,
            max_yield,
            min_yield,
            mean_daily_change,
            std_dev_daily_change,
        })
    }

    /// Returns the seven statistics with their report labels, in report order
    pub fn entries(&self) -> [(&'static str, Option<f64>); 7] {
        let values = [
            Some(self.mean_yield),
            Some(self.median_yield),
            self.std_dev_yield,
            Some(self.max_yield),
            Some(self.min_yield),
            self.mean_daily_change,
            self.std_dev_daily_change,
        ];
        let mut entries = [("", None); 7];
        for (slot, (label, value)) in entries.iter_mut().zip(LABELS.into_iter().zip(values)) {
            *slot = (label, value);
        }
        entries
    }
}

/// Renders the report printed after an analysis run.
///
/// Values are in percentage points and shown with two decimals, so a mean
/// yield of `1.5549` prints as `Mean Yield: 1.55%`.
impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Summary Statistics for 10-Year Treasury Yield:")?;
        for (label, value) in self.entries() {
            match value {
                Some(v) => write!(f, "\n{label}: {v:.2}%")?,
                None => write!(f, "\n{label}: n/a")?,
            }
        }
        Ok(())
    }
}

/// Mean and sample standard deviation in two passes.
///
/// `None` when `values` is empty; the standard deviation is `None` below two values.
fn mean_and_stddev(values: &[f64]) -> Option<(f64, Option<f64>)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;

    let mut sum = Kbn::<f64>::default();
    values.iter().for_each(|&v| sum += v);
    let mean = sum.total() / n;

    let stddev = (values.len() > 1).then(|| {
        let mut ss = Kbn::<f64>::default();
        values.iter().for_each(|&v| ss += (v - mean) * (v - mean));
        Float::sqrt(ss.total() / (n - 1.0))
    });
    Some((mean, stddev))
}
