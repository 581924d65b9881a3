//! Sampled gas channels
//!
//! The analyzer samples four physical channels. N2 is never sampled; it is
//! derived from O2 and He by mass balance and therefore has no `Channel`
//! variant.

use core::ops::{Index, IndexMut};

use crate::constants::sensors::{
    CO2_PPM_MAX, CO_PPM_MAX, GAS_PCT_MAX, GAS_PCT_MIN, PPM_MIN,
};

/// One physical gas measurement path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Oxygen fraction (%)
    O2,
    /// Helium fraction (%)
    He,
    /// Carbon dioxide (ppm)
    Co2,
    /// Carbon monoxide (ppm)
    Co,
}

/// Closed interval a physical value is clamped into
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalRange {
    /// Lower bound (inclusive)
    pub min: f32,
    /// Upper bound (inclusive)
    pub max: f32,
}

impl PhysicalRange {
    /// Range of a gas fraction, 0–100 %
    pub const PERCENT: Self = Self { min: GAS_PCT_MIN, max: GAS_PCT_MAX };

    /// Create a range; bounds are swapped if given in the wrong order
    pub fn new(min: f32, max: f32) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Clamp a value into the range. NaN clamps to the lower bound.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Check whether a value lies inside the range
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Channel {
    /// All sampled channels in acquisition order
    pub const ALL: [Channel; 4] = [Channel::O2, Channel::He, Channel::Co2, Channel::Co];

    /// Number of sampled channels
    pub const COUNT: usize = 4;

    /// Position of the channel in acquisition order
    pub const fn index(self) -> usize {
        match self {
            Channel::O2 => 0,
            Channel::He => 1,
            Channel::Co2 => 2,
            Channel::Co => 3,
        }
    }

    /// Short display label
    pub const fn label(self) -> &'static str {
        match self {
            Channel::O2 => "O2",
            Channel::He => "He",
            Channel::Co2 => "CO2",
            Channel::Co => "CO",
        }
    }

    /// Physical domain the filtered value is clamped into
    pub const fn default_range(self) -> PhysicalRange {
        match self {
            Channel::O2 | Channel::He => PhysicalRange::PERCENT,
            Channel::Co2 => PhysicalRange { min: PPM_MIN, max: CO2_PPM_MAX },
            Channel::Co => PhysicalRange { min: PPM_MIN, max: CO_PPM_MAX },
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.label())
    }
}

/// Fixed per-channel storage indexed by [`Channel`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelMap<T> {
    slots: [T; Channel::COUNT],
}

impl<T> ChannelMap<T> {
    /// Build from one value per channel in acquisition order
    pub const fn new(slots: [T; Channel::COUNT]) -> Self {
        Self { slots }
    }

    /// Build by calling `f` for every channel
    pub fn from_fn(mut f: impl FnMut(Channel) -> T) -> Self {
        Self {
            slots: [
                f(Channel::O2),
                f(Channel::He),
                f(Channel::Co2),
                f(Channel::Co),
            ],
        }
    }

    /// Iterate `(channel, value)` pairs in acquisition order
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &T)> {
        Channel::ALL.iter().copied().zip(self.slots.iter())
    }
}

impl<T: Copy> ChannelMap<T> {
    /// Same value for every channel
    pub const fn splat(value: T) -> Self {
        Self { slots: [value; Channel::COUNT] }
    }
}

impl<T: Default> Default for ChannelMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Channel> for ChannelMap<T> {
    type Output = T;

    fn index(&self, channel: Channel) -> &T {
        &self.slots[channel.index()]
    }
}

impl<T> IndexMut<Channel> for ChannelMap<T> {
    fn index_mut(&mut self, channel: Channel) -> &mut T {
        &mut self.slots[channel.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_acquisition_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn default_ranges() {
        assert_eq!(Channel::O2.default_range(), PhysicalRange::PERCENT);
        assert_eq!(Channel::Co2.default_range().max, 10_000.0);
        assert_eq!(Channel::Co.default_range().max, 1_000.0);
    }

    #[test]
    fn range_clamping() {
        let range = PhysicalRange::PERCENT;
        assert_eq!(range.clamp(-3.0), 0.0);
        assert_eq!(range.clamp(100.5), 100.0);
        assert_eq!(range.clamp(42.0), 42.0);
        assert_eq!(range.clamp(f32::NAN), 0.0);

        let swapped = PhysicalRange::new(10.0, 0.0);
        assert_eq!(swapped.min, 0.0);
        assert_eq!(swapped.max, 10.0);
    }

    #[test]
    fn channel_map_indexing() {
        let mut map = ChannelMap::splat(1.0f32);
        map[Channel::He] = 2.5;
        assert_eq!(map[Channel::He], 2.5);
        assert_eq!(map[Channel::O2], 1.0);

        let labels: heapless::Vec<&str, 4> = map.iter().map(|(c, _)| c.label()).collect();
        assert_eq!(labels.as_slice(), &["O2", "He", "CO2", "CO"]);
    }
}
