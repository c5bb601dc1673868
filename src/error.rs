use chrono::NaiveDate;
use thiserror::Error;

/// Result type returned by every fallible operation of this crate
pub type Result<T> = core::result::Result<T, AnalysisError>;

/// Errors raised while deriving statistics from a yield series.
///
/// Every operation fails fast: either the whole derived series or summary is
/// produced, or one of these errors is returned and nothing else is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The operation was given zero observations.
    #[error("series is empty")]
    EmptyInput,

    /// The observations violate ordering/uniqueness or contain a non-finite yield.
    #[error("invalid series: {0}")]
    InvalidSeries(#[from] SeriesDefect),

    /// The rolling window length must be at least one observation.
    #[error("rolling window must be positive, got {window}")]
    InvalidWindow {
        /// Requested window length.
        window: usize,
    },
}

/// The first defect found while scanning a series front to back.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SeriesDefect {
    /// Yield is NaN or infinite.
    #[error("non-finite yield {value} at index {index}")]
    NonFinite {
        /// Position of the observation.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Date is not strictly after the previous observation's date.
    #[error("date {current} at index {index} does not follow {previous}")]
    NotIncreasing {
        /// Position of the observation.
        index: usize,
        /// Date of the observation at `index - 1`.
        previous: NaiveDate,
        /// Date of the observation at `index`.
        current: NaiveDate,
    },
}

impl SeriesDefect {
    /// Returns the index of the offending observation
    pub const fn index(&self) -> usize {
        match self {
            Self::NonFinite { index, .. } | Self::NotIncreasing { index, .. } => *index,
        }
    }
}
