use alloc::vec::Vec;

use chrono::NaiveDate;

/// One observation augmented with its derived fields.
///
/// A field is `None` where it is undefined: the first row has no daily change,
/// and rows before the first full window have no rolling statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedRow {
    /// Trading date
    pub date: NaiveDate,
    /// Observed yield in percent
    #[cfg_attr(feature = "serde", serde(rename = "yield"))]
    pub value: f64,
    /// Change from the previous observation's yield
    pub daily_change: Option<f64>,
    /// Mean yield over the trailing window ending at this row
    pub rolling_average: Option<f64>,
    /// Sample standard deviation over the same window
    pub rolling_std_dev: Option<f64>,
}

/// The full derived series, one row per input observation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedSeries {
    window: usize,
    rows: Vec<DerivedRow>,
}

impl DerivedSeries {
    pub(crate) fn new(window: usize, rows: Vec<DerivedRow>) -> Self {
        Self { window, rows }
    }

    /// Returns the rolling window length the series was derived with
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns the rows in date order
    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    /// Returns an iterator over the rows in date order
    pub fn iter(&self) -> core::slice::Iter<'_, DerivedRow> {
        self.rows.iter()
    }

    /// Observed yields as chart points
    pub fn yields(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points(|row| Some(row.value))
    }

    /// Daily changes as chart points, skipping the undefined first row
    pub fn daily_changes(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points(|row| row.daily_change)
    }

    /// Rolling averages as chart points, starting at the first full window
    pub fn rolling_averages(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points(|row| row.rolling_average)
    }

    /// Rolling standard deviations as chart points, starting at the first full window
    pub fn rolling_std_devs(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points(|row| row.rolling_std_dev)
    }

    fn points<F>(&self, field: F) -> impl Iterator<Item = (NaiveDate, f64)> + '_
    where
        F: Fn(&DerivedRow) -> Option<f64> + 'static,
    {
        self.rows
            .iter()
            .filter_map(move |row| field(row).map(|v| (row.date, v)))
    }
}

impl<'a> IntoIterator for &'a DerivedSeries {
    type Item = &'a DerivedRow;
    type IntoIter = core::slice::Iter<'a, DerivedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
