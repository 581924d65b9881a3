//! Fixed-Size Moving-Average Filter
//!
//! ## Overview
//!
//! Every sampled channel owns one `MovingAverage` holding its most recent
//! converted-and-calibrated values. The window has a compile-time capacity
//! and is *always full*: it starts with every slot set to a seed value
//! (0.0 by default) and the engine pre-fills it with real samples during
//! `init()`. The mean is therefore always taken over exactly `N` samples,
//! never fewer.
//!
//! ## Design Rationale
//!
//! A simple moving average (not exponential) was chosen because:
//! - O(1) update: one slot write plus a sum over `N` floats
//! - Bounded memory: `N` floats and a cursor, no allocation
//! - Deterministic lag: a step change is fully visible after `N` samples
//!
//! ### Memory Layout
//!
//! ```text
//! MovingAverage<5>:
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  0  │  1  │  2  │  3  │  4  │  ← slot indices
//! └─────┴─────┴─────┴─────┴─────┘
//!    ↑
//!    └── write_pos: next slot to overwrite (the oldest sample)
//!
//! Total size = 4 * N + 8 bytes
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use trimix_core::buffer::MovingAverage;
//!
//! let mut filter: MovingAverage<5> = MovingAverage::new();
//! for v in [20.0, 21.0, 22.0, 21.0, 20.0] {
//!     filter.push(v);
//! }
//! assert!((filter.mean() - 20.8).abs() < 1e-4);
//! ```

/// Circular window of the last `N` samples for one channel
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - every slot holds a real value (seeded or pushed), so `mean()` always
///   divides by `N`
///
/// ## Thread Safety
///
/// Not synchronized; owned by a single acquisition engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage<const N: usize> {
    data: [f32; N],
    write_pos: usize,
}

impl<const N: usize> MovingAverage<N> {
    /// Create a window with every slot set to 0.0
    pub const fn new() -> Self {
        Self::seeded(0.0)
    }

    /// Create a window with every slot set to `value`
    pub const fn seeded(value: f32) -> Self {
        Self {
            data: [value; N],
            write_pos: 0,
        }
    }

    /// Overwrite the oldest sample with `value` and return the new mean
    ///
    /// ```rust
    /// # use trimix_core::buffer::MovingAverage;
    /// let mut buf = MovingAverage::<3>::seeded(3.0);
    /// assert_eq!(buf.push(6.0), 4.0); // [6, 3, 3]
    /// ```
    pub fn push(&mut self, value: f32) -> f32 {
        self.data[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % N;
        self.mean()
    }

    /// Arithmetic mean over all `N` slots
    pub fn mean(&self) -> f32 {
        let sum: f32 = self.data.iter().sum();
        sum / N as f32
    }

    /// Most recently pushed value
    pub fn last(&self) -> f32 {
        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx]
    }

    /// Window capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Overwrite every slot with `value` and rewind the cursor
    pub fn fill(&mut self, value: f32) {
        self.data = [value; N];
        self.write_pos = 0;
    }

    /// Iterate samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..N).map(move |i| self.data[(self.write_pos + i) % N])
    }
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}
