use alloc::vec::Vec;

use num_traits::Float;
use ordered_float::{OrderedFloat, PrimitiveFloat};

/// Returns the median from a sorted slice
///
/// # Arguments
///
/// * `ss` - The sorted slice
///
/// # Returns
///
/// * `Option<T>` - The median, or `None` if the slice is empty
#[inline]
pub fn median_from_sorted_slice<T: Float>(ss: &[T]) -> Option<T> {
    let len = ss.len();
    if len == 0 {
        return None;
    }
    let mid = len / 2;
    let _2 = T::one() + T::one();
    if len % 2 == 0 {
        Some((ss[mid - 1] + ss[mid]) / _2)
    } else {
        Some(ss[mid])
    }
}

/// Returns the median of unordered values, sorting a copy under a total order
#[inline]
pub fn median<T>(values: impl IntoIterator<Item = T>) -> Option<T>
where
    T: Float + PrimitiveFloat,
{
    let mut sorted: Vec<OrderedFloat<T>> = values.into_iter().map(OrderedFloat).collect();
    sorted.sort_unstable();
    let sorted: Vec<T> = sorted.into_iter().map(|v| v.0).collect();
    median_from_sorted_slice(&sorted)
}
