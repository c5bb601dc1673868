use alloc::vec::Vec;

use chrono::NaiveDate;

use crate::{AnalysisError, Result, SeriesDefect};

/// A single dated yield reading.
///
/// Yields are stored in natural percentage points, so `1.55` means 1.55%.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Trading date of the reading
    pub date: NaiveDate,
    /// Yield in percent
    #[cfg_attr(feature = "serde", serde(rename = "yield"))]
    pub value: f64,
}

impl Observation {
    /// Creates a new observation
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

impl From<(NaiveDate, f64)> for Observation {
    fn from((date, value): (NaiveDate, f64)) -> Self {
        Self::new(date, value)
    }
}

/// Scans the observations front to back and reports the first defect.
///
/// Dates must be strictly increasing and every yield finite. An empty slice
/// is reported as [`AnalysisError::EmptyInput`] before anything else.
pub fn validate(observations: &[Observation]) -> Result<()> {
    let Some(first) = observations.first() else {
        return Err(AnalysisError::EmptyInput);
    };
    if !first.value.is_finite() {
        return Err(SeriesDefect::NonFinite {
            index: 0,
            value: first.value,
        }
        .into());
    }

    for (index, pair) in observations.windows(2).enumerate() {
        let (prev, curr) = (pair[0], pair[1]);
        let index = index + 1;
        if curr.date <= prev.date {
            return Err(SeriesDefect::NotIncreasing {
                index,
                previous: prev.date,
                current: curr.date,
            }
            .into());
        }
        if !curr.value.is_finite() {
            return Err(SeriesDefect::NonFinite {
                index,
                value: curr.value,
            }
            .into());
        }
    }
    Ok(())
}

/// A non-empty, chronologically ordered yield series.
///
/// Construction validates the observations once; the analyzer still accepts
/// any slice of observations and re-validates, so a `Series` is simply the
/// convenient way to hold input that is already known to be good.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Builds a series from ordered observations
    ///
    /// # Arguments
    ///
    /// * `observations` - Readings in strictly increasing date order
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The series, or the first defect found
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        validate(&observations)?;
        Ok(Self { observations })
    }

    /// Builds a series from raw provider rows, dropping missing readings.
    ///
    /// Rows whose value is `None` or NaN are discarded before validation, the
    /// way a quote feed's empty closes are skipped. Infinite values are kept
    /// and rejected as defects.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDate;
    /// # use treasury_yield_stats::Series;
    /// let d = |day| NaiveDate::from_ymd_opt(2020, 1, day).unwrap();
    /// let series = Series::from_raw([
    ///     (d(2), Some(1.88)),
    ///     (d(3), None),
    ///     (d(6), Some(f64::NAN)),
    ///     (d(7), Some(1.81)),
    /// ])
    /// .unwrap();
    /// assert_eq!(series.len(), 2);
    /// ```
    pub fn from_raw<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        let mut dropped = 0usize;
        let observations: Vec<Observation> = rows
            .into_iter()
            .filter_map(|(date, value)| match value {
                Some(v) if !v.is_nan() => Some(Observation::new(date, v)),
                _ => {
                    dropped += 1;
                    None
                }
            })
            .collect();

        if dropped > 0 {
            log::debug!(
                "dropped {dropped} missing readings, {} remain",
                observations.len()
            );
        }
        Self::new(observations)
    }

    /// Returns the number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns the observations in date order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns an iterator over the yields in date order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.value)
    }

    /// Returns the first and last date covered by the series
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.observations
            .first()
            .zip(self.observations.last())
            .map(|(first, last)| (first.date, last.date))
    }

    /// Consumes the series and returns the observations
    pub fn into_inner(self) -> Vec<Observation> {
        self.observations
    }
}

impl AsRef<[Observation]> for Series {
    fn as_ref(&self) -> &[Observation] {
        &self.observations
    }
}

impl TryFrom<Vec<Observation>> for Series {
    type Error = AnalysisError;

    fn try_from(observations: Vec<Observation>) -> Result<Self> {
        Self::new(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
    }

    #[test]
    fn accepts_ordered_finite_series() {
        let series = Series::new(vec![
            Observation::new(d(1), 1.50),
            Observation::new(d(2), 1.60),
            Observation::new(d(6), -0.25),
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.date_range(), Some((d(1), d(6))));
        assert_eq!(series.values().collect::<Vec<_>>(), vec![1.50, 1.60, -0.25]);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert_eq!(Series::new(vec![]), Err(AnalysisError::EmptyInput));
        assert_eq!(validate(&[]), Err(AnalysisError::EmptyInput));
    }

    #[test]
    fn duplicate_date_is_rejected() {
        let err = Series::new(vec![
            Observation::new(d(1), 1.50),
            Observation::new(d(2), 1.60),
            Observation::new(d(2), 1.61),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidSeries(SeriesDefect::NotIncreasing {
                index: 2,
                previous: d(2),
                current: d(2),
            })
        );
    }

    #[test]
    fn out_of_order_date_is_rejected() {
        let err = validate(&[
            Observation::new(d(3), 1.50),
            Observation::new(d(2), 1.60),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidSeries(SeriesDefect::NotIncreasing { index: 1, .. })
        ));
    }

    #[test]
    fn non_finite_yield_is_rejected() {
        let err = validate(&[Observation::new(d(1), f64::NAN)]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidSeries(SeriesDefect::NonFinite { index: 0, .. })
        ));

        let err = validate(&[
            Observation::new(d(1), 1.0),
            Observation::new(d(2), f64::NEG_INFINITY),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidSeries(SeriesDefect::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn first_defect_wins() {
        let err = validate(&[
            Observation::new(d(2), 1.0),
            Observation::new(d(1), f64::NAN),
            Observation::new(d(3), f64::INFINITY),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidSeries(SeriesDefect::NotIncreasing { index: 1, .. })
        ));
    }

    #[test]
    fn from_raw_drops_missing_but_not_infinite() {
        let series = Series::from_raw([
            (d(1), None),
            (d(2), Some(1.9)),
            (d(3), Some(f64::NAN)),
            (d(6), Some(1.8)),
        ])
        .unwrap();
        assert_eq!(
            series.observations(),
            &[Observation::new(d(2), 1.9), Observation::new(d(6), 1.8)]
        );

        let err = Series::from_raw([(d(1), Some(1.0)), (d(2), Some(f64::INFINITY))]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSeries(_)));
    }

    #[test]
    fn from_raw_with_only_missing_values_is_empty() {
        assert_eq!(
            Series::from_raw([(d(1), None), (d(2), Some(f64::NAN))]),
            Err(AnalysisError::EmptyInput)
        );
    }
}
