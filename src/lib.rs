#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub(crate) use utils::helper;

mod error;
pub use error::{AnalysisError, Result, SeriesDefect};

mod series;
pub use series::{Observation, Series, validate};

mod config;
pub use config::{AnalyzerConfig, DEFAULT_WINDOW};

mod rolling_moments;
pub use rolling_moments::RollingMoments;

mod derived;
pub use derived::{DerivedRow, DerivedSeries};

mod summary;
pub use summary::SummaryStatistics;

mod analyzer;
pub use analyzer::{YieldSeriesAnalyzer, compute_derived, compute_summary};
