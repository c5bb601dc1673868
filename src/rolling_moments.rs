use num_traits::Float;

use crate::{Kbn, utils::RingBuffer};

/// Sliding first and second moments over a trailing window.
///
/// Each update retires the evicted value from the running sum and sum of
/// squares and adds the new one, so the mean and variance cost O(1) per
/// element regardless of the window length. Both sums use
/// Kahan-Babuska-Neumaier compensation.
///
/// Values are accumulated relative to the first value ever pushed. Yields sit
/// far from zero compared to their day-to-day dispersion, and the shift keeps
/// `E[x^2] - E[x]^2` from cancelling away most of the significant digits.
#[derive(Debug, Clone)]
pub struct RollingMoments<T> {
    /// Statistics period
    period: usize,
    /// Trailing window of raw values
    buf: RingBuffer<T>,
    /// Reference value subtracted before accumulation
    shift: Option<T>,
    /// Delta Degrees of Freedom
    ddof: bool,
    /// Sum of shifted inputs
    sum: Kbn<T>,
    /// Sum of squared shifted inputs
    sum_sq: Kbn<T>,
}

impl<T: Float + Default> RollingMoments<T> {
    /// Creates a new `RollingMoments` instance with the specified period.
    ///
    /// # Arguments
    ///
    /// * `period` - The period of the statistics
    ///
    /// # Returns
    ///
    /// * `Self` - The statistics object
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            buf: RingBuffer::new(period),
            shift: None,
            ddof: false,
            sum: Kbn::default(),
            sum_sq: Kbn::default(),
        }
    }

    /// Returns the Delta Degrees of Freedom
    #[inline]
    pub const fn ddof(&self) -> bool {
        self.ddof
    }

    /// Sets the Delta Degrees of Freedom
    ///
    /// # Arguments
    ///
    /// * `ddof` - `true` for the sample (N-1) estimator, `false` for population
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The statistics object
    #[inline]
    pub const fn set_ddof(&mut self, ddof: bool) -> &mut Self {
        self.ddof = ddof;
        self
    }

    /// Updates the value to the rolling moments
    ///
    /// # Arguments
    ///
    /// * `value` - The value to update the rolling moments with
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The rolling moments object
    #[inline]
    pub fn next(&mut self, value: T) -> &mut Self {
        let shift = *self.shift.get_or_insert(value);
        if let Some(popped) = self.buf.push(value) {
            let d = popped - shift;
            self.sum -= d;
            self.sum_sq -= d * d;
        }

        let d = value - shift;
        self.sum += d;
        self.sum_sq += d * d;
        self
    }

    /// Returns the window period
    #[inline]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Returns true once the window holds `period` values
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.buf.is_full()
    }

    /// Returns the number of elements in the window
    #[inline]
    pub fn count(&self) -> usize {
        self.buf.len()
    }

    /// Returns an iterator over the window, oldest first
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    /// Returns the mean of all values in the rolling window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The mean of all values if the window is ready, None otherwise
    #[inline]
    pub fn mean(&self) -> Option<T> {
        if !self.is_ready() {
            return None;
        }
        let n = T::from(self.count())?;
        Some(self.shift? + self.sum.total() / n)
    }

    /// Returns the variance of values in the rolling window
    ///
    /// Rounding can push a flat window's variance a hair below zero; that is
    /// reported as exactly zero.
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The variance, or `None` if the window is not full or
    ///   the estimator has no degrees of freedom left
    #[inline]
    pub fn variance(&self) -> Option<T> {
        if !self.is_ready() {
            return None;
        }
        let n = T::from(self.count())?;
        let denom = if self.ddof { n - T::one() } else { n };
        if denom <= T::zero() {
            return None;
        }
        let mean_d = self.sum.total() / n;
        let m2 = (self.sum_sq.total() / n - mean_d * mean_d).max(T::zero());
        Some(m2 * n / denom)
    }

    /// Returns the standard deviation of values in the rolling window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The standard deviation, or `None` if the variance is undefined
    #[inline]
    pub fn stddev(&self) -> Option<T> {
        self.variance().map(T::sqrt)
    }
}
