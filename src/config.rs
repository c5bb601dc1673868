use crate::{AnalysisError, Result};

/// Trailing window used for the rolling average and rolling standard deviation
pub const DEFAULT_WINDOW: usize = 30;

/// Settings for a [`YieldSeriesAnalyzer`](crate::YieldSeriesAnalyzer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalyzerConfig {
    /// Number of trailing observations in each rolling window
    pub window: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl AnalyzerConfig {
    /// Sets the rolling window length
    ///
    /// # Arguments
    ///
    /// * `window` - Number of trailing observations per window
    ///
    /// # Returns
    ///
    /// * `Self` - The updated config
    pub const fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Checks the settings, rejecting a zero-length window
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(AnalysisError::InvalidWindow {
                window: self.window,
            });
        }
        Ok(())
    }
}
