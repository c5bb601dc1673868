use alloc::{boxed::Box, vec::Vec};

/// Fixed-capacity circular store for the trailing window of observations.
///
/// Once full, every push overwrites the oldest entry and hands it back so the
/// caller can retire it from any running sums.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Slots, allocated once at construction
    data: Box<[T]>,
    /// Index of the oldest entry
    head: usize,
    /// Number of occupied slots
    len: usize,
}

impl<T: Default + Copy> RingBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be positive");
        let mut data = Vec::with_capacity(capacity);
        data.resize_with(capacity, T::default);
        Self {
            data: data.into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `value`, returning the entry it evicted when the buffer was full
    pub fn push(&mut self, value: T) -> Option<T> {
        let cap = self.capacity();
        if self.is_full() {
            let evicted = core::mem::replace(&mut self.data[self.head], value);
            self.head = (self.head + 1) % cap;
            Some(evicted)
        } else {
            self.data[(self.head + self.len) % cap] = value;
            self.len += 1;
            None
        }
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).map(move |i| &self.data[(self.head + i) % self.capacity()])
    }
}
