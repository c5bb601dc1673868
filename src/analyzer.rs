use alloc::vec::Vec;

use crate::{
    AnalysisError, AnalyzerConfig, DerivedRow, DerivedSeries, Observation, Result, RollingMoments,
    SummaryStatistics, series::validate,
};

/// Derives daily changes, rolling statistics and summary aggregates from a
/// yield series.
///
/// The analyzer holds nothing but its configuration. Both operations are pure
/// functions of their input, validate it before doing any work, and return
/// bit-identical results when called again on the same observations.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use treasury_yield_stats::{Observation, YieldSeriesAnalyzer};
/// let d = |day| NaiveDate::from_ymd_opt(2020, 1, day).unwrap();
/// let series = [
///     Observation::new(d(1), 1.50),
///     Observation::new(d(2), 1.60),
///     Observation::new(d(3), 1.55),
/// ];
///
/// let analyzer = YieldSeriesAnalyzer::with_window(2).unwrap();
/// let derived = analyzer.compute_derived(&series).unwrap();
/// assert_eq!(derived.rows()[0].daily_change, None);
/// assert_eq!(derived.rows()[0].rolling_average, None);
/// assert!((derived.rows()[2].rolling_average.unwrap() - 1.575).abs() < 1e-12);
///
/// let summary = analyzer.compute_summary(&series).unwrap();
/// assert_eq!(summary.max_yield, 1.60);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YieldSeriesAnalyzer {
    config: AnalyzerConfig,
}

impl YieldSeriesAnalyzer {
    /// Creates an analyzer from a validated configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Analyzer settings
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The analyzer, or [`AnalysisError::InvalidWindow`]
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates an analyzer with the given rolling window and default settings otherwise
    pub fn with_window(window: usize) -> Result<Self> {
        Self::new(AnalyzerConfig::default().with_window(window))
    }

    /// Returns the analyzer configuration
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Returns the rolling window length
    pub const fn window(&self) -> usize {
        self.config.window
    }

    /// Computes the derived series in a single forward pass.
    ///
    /// For each observation `i`:
    ///
    /// - `daily_change` is `yield[i] - yield[i - 1]`, undefined at `i = 0`
    /// - `rolling_average` is the mean of the trailing `window` yields ending at `i`
    /// - `rolling_std_dev` is their sample (N-1) standard deviation
    ///
    /// Rolling fields are defined iff `i >= window - 1`; a window longer than
    /// the series leaves them undefined everywhere, and a window of one never
    /// defines a standard deviation.
    ///
    /// # Arguments
    ///
    /// * `series` - Observations in strictly increasing date order
    ///
    /// # Returns
    ///
    /// * `Result<DerivedSeries>` - One derived row per observation, or
    ///   [`AnalysisError::EmptyInput`] / [`AnalysisError::InvalidSeries`]
    pub fn compute_derived(&self, series: impl AsRef<[Observation]>) -> Result<DerivedSeries> {
        let observations = series.as_ref();
        let window = self.window();
        log::debug!(
            "deriving series of {} observations with window {window}",
            observations.len()
        );
        validate(observations)?;
        if window > observations.len() {
            log::warn!(
                "window {window} exceeds series length {}, rolling statistics undefined",
                observations.len()
            );
        }

        let mut moments = RollingMoments::new(window);
        moments.set_ddof(true);

        let mut prev: Option<f64> = None;
        let rows: Vec<DerivedRow> = observations
            .iter()
            .map(|obs| {
                moments.next(obs.value);
                let daily_change = prev.map(|p| obs.value - p);
                prev = Some(obs.value);
                DerivedRow {
                    date: obs.date,
                    value: obs.value,
                    daily_change,
                    rolling_average: moments.mean(),
                    rolling_std_dev: moments.stddev(),
                }
            })
            .collect();

        Ok(DerivedSeries::new(window, rows))
    }

    /// Computes the whole-series summary statistics.
    ///
    /// Mean, median, maximum and minimum of the yield are always defined. The
    /// yield's standard deviation and the mean daily change need two
    /// observations; the daily change's standard deviation needs three.
    ///
    /// # Arguments
    ///
    /// * `series` - Observations in strictly increasing date order
    ///
    /// # Returns
    ///
    /// * `Result<SummaryStatistics>` - The aggregates, or
    ///   [`AnalysisError::EmptyInput`] / [`AnalysisError::InvalidSeries`]
    pub fn compute_summary(
        &self,
        series: impl AsRef<[Observation]>,
    ) -> Result<SummaryStatistics> {
        let observations = series.as_ref();
        log::debug!("summarizing series of {} observations", observations.len());
        validate(observations)?;

        let values: Vec<f64> = observations.iter().map(|o| o.value).collect();
        SummaryStatistics::from_values(&values).ok_or(AnalysisError::EmptyInput)
    }
}

/// Computes the derived series with the given rolling window.
///
/// Shorthand for [`YieldSeriesAnalyzer::compute_derived`]; a zero window
/// fails with [`AnalysisError::InvalidWindow`].
pub fn compute_derived(
    series: impl AsRef<[Observation]>,
    window: usize,
) -> Result<DerivedSeries> {
    YieldSeriesAnalyzer::with_window(window)?.compute_derived(series)
}

/// Computes the whole-series summary statistics.
///
/// Shorthand for [`YieldSeriesAnalyzer::compute_summary`].
pub fn compute_summary(series: impl AsRef<[Observation]>) -> Result<SummaryStatistics> {
    YieldSeriesAnalyzer::default().compute_summary(series)
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use assert_approx_eq::assert_approx_eq;
    use chrono::{Days, NaiveDate};

    use super::*;
    use crate::{SeriesDefect, config::DEFAULT_WINDOW};

    fn series(values: &[f64]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Observation::new(start + Days::new(i as u64), v))
            .collect()
    }

    #[test]
    fn three_point_window_two() {
        let derived = compute_derived(series(&[1.50, 1.60, 1.55]), 2).unwrap();
        let rows = derived.rows();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].daily_change, None);
        assert_approx_eq!(rows[1].daily_change.unwrap(), 0.10, 1e-12);
        assert_approx_eq!(rows[2].daily_change.unwrap(), -0.05, 1e-12);

        assert_eq!(rows[0].rolling_average, None);
        assert_eq!(rows[0].rolling_std_dev, None);
        assert_approx_eq!(rows[1].rolling_average.unwrap(), 1.55, 1e-12);
        assert_approx_eq!(rows[2].rolling_average.unwrap(), 1.575, 1e-12);
        assert_approx_eq!(rows[1].rolling_std_dev.unwrap(), 0.070_710_678_118_654_7, 1e-12);
        assert_approx_eq!(rows[2].rolling_std_dev.unwrap(), 0.035_355_339_059_327_4, 1e-12);
    }

    #[test]
    fn default_window_is_thirty() {
        let values: Vec<f64> = (0..40).map(|i| 1.0 + f64::from(i) * 0.01).collect();
        let analyzer = YieldSeriesAnalyzer::default();
        assert_eq!(analyzer.window(), DEFAULT_WINDOW);

        let derived = analyzer.compute_derived(series(&values)).unwrap();
        assert_eq!(derived.window(), 30);
        assert!(derived.rows()[28].rolling_average.is_none());
        assert!(derived.rows()[29].rolling_average.is_some());
        // mean of 1.00..=1.29
        assert_approx_eq!(derived.rows()[29].rolling_average.unwrap(), 1.145, 1e-12);
        assert_eq!(derived.rolling_averages().count(), 11);
    }

    #[test]
    fn window_longer_than_series_leaves_rolling_fields_undefined() {
        let derived = compute_derived(series(&[2.1, 2.2, 2.0]), 5).unwrap();
        assert!(derived
            .iter()
            .all(|row| row.rolling_average.is_none() && row.rolling_std_dev.is_none()));
        assert_eq!(derived.daily_changes().count(), 2);
    }

    #[test]
    fn window_of_one_has_average_but_no_stddev() {
        let derived = compute_derived(series(&[0.9, 1.1]), 1).unwrap();
        for row in &derived {
            assert_eq!(row.rolling_average, Some(row.value));
            assert_eq!(row.rolling_std_dev, None);
        }
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(
            compute_derived(series(&[1.0]), 0),
            Err(AnalysisError::InvalidWindow { window: 0 })
        );
        assert!(YieldSeriesAnalyzer::with_window(0).is_err());
    }

    #[test]
    fn empty_series_fails_both_operations() {
        let empty: Vec<Observation> = vec![];
        assert_eq!(compute_derived(&empty, 30), Err(AnalysisError::EmptyInput));
        assert_eq!(compute_summary(&empty), Err(AnalysisError::EmptyInput));
    }

    #[test]
    fn malformed_series_fails_both_operations() {
        let mut obs = series(&[1.0, 1.1, 1.2]);
        obs[2].date = obs[0].date;
        let expected = Err(AnalysisError::InvalidSeries(SeriesDefect::NotIncreasing {
            index: 2,
            previous: obs[1].date,
            current: obs[0].date,
        }));
        assert_eq!(compute_derived(&obs, 2), expected);
        assert_eq!(compute_summary(&obs).map(|_| ()), expected.map(|_| ()));

        let obs = series(&[1.0, f64::NAN]);
        assert!(matches!(
            compute_summary(&obs),
            Err(AnalysisError::InvalidSeries(SeriesDefect::NonFinite { index: 1, .. }))
        ));
    }

    #[test]
    fn single_observation_summary() {
        let summary = compute_summary(series(&[1.55])).unwrap();
        assert_eq!(summary.mean_yield, 1.55);
        assert_eq!(summary.median_yield, 1.55);
        assert_eq!(summary.min_yield, 1.55);
        assert_eq!(summary.max_yield, 1.55);
        assert_eq!(summary.mean_daily_change, None);
        assert_eq!(summary.std_dev_daily_change, None);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let obs = series(&[3.88, 3.91, 3.79, 3.84, 3.95, 4.02, 3.97]);
        let analyzer = YieldSeriesAnalyzer::with_window(3).unwrap();
        assert_eq!(
            analyzer.compute_derived(&obs).unwrap(),
            analyzer.compute_derived(&obs).unwrap()
        );
        assert_eq!(
            analyzer.compute_summary(&obs).unwrap(),
            analyzer.compute_summary(&obs).unwrap()
        );
    }
}
