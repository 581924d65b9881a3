//! Acquisition configuration
//!
//! `AcquisitionConfig::default()` reproduces the instrument firmware:
//! 1 s read interval, 10 warm-up reads per channel, the standard pin map,
//! the linear conversions and the physical clamping ranges. Individual
//! fields can be adjusted with the `with_*` builders.
//!
//! ```rust
//! use trimix_core::{AcquisitionConfig, Channel, Conversion};
//! use fugit::MillisDurationU64;
//!
//! fn log_curve(v: f32) -> f32 {
//!     libm::logf(1.0 + v) * 1000.0
//! }
//!
//! let config = AcquisitionConfig::default()
//!     .with_read_interval(MillisDurationU64::millis(500))
//!     .with_conversion(Channel::Co, Conversion::Custom(log_curve));
//! assert_eq!(config.read_interval.to_millis(), 500);
//! ```

use fugit::MillisDurationU64;

use crate::adc::AdcConfig;
use crate::channel::{Channel, ChannelMap, PhysicalRange};
use crate::constants::adc::ADC_MAX_POLL_ATTEMPTS;
use crate::constants::sensors::{CO2_PIN, CO_PIN, HE_PIN, O2_PIN};
use crate::constants::time::{
    PREFILL_SETTLE_MS, READ_INTERVAL_MS, WARMUP_READS, WARMUP_SETTLE_US,
};
use crate::conversion::Conversion;

/// Everything the engine needs to know about its hardware and timing
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionConfig {
    /// Minimum spacing between hardware acquisition cycles
    pub read_interval: MillisDurationU64,

    /// Throwaway reads per channel after configuring the ADC
    pub warmup_reads: u32,

    /// Settling delay between warm-up rounds (µs)
    pub warmup_settle_us: u32,

    /// Settling delay between the pre-fill cycles (ms)
    pub prefill_settle_ms: u32,

    /// Polls spent on a `WouldBlock` read before it counts as timed out
    pub max_poll_attempts: u32,

    /// Converter settings
    pub adc: AdcConfig,

    /// ADC pin per channel
    pub pins: ChannelMap<u8>,

    /// Voltage → unit strategy per channel
    pub conversions: ChannelMap<Conversion>,

    /// Clamping domain per channel
    pub ranges: ChannelMap<PhysicalRange>,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            read_interval: MillisDurationU64::millis(READ_INTERVAL_MS),
            warmup_reads: WARMUP_READS,
            warmup_settle_us: WARMUP_SETTLE_US,
            prefill_settle_ms: PREFILL_SETTLE_MS,
            max_poll_attempts: ADC_MAX_POLL_ATTEMPTS,
            adc: AdcConfig::default(),
            pins: ChannelMap::new([O2_PIN, HE_PIN, CO2_PIN, CO_PIN]),
            conversions: ChannelMap::from_fn(Conversion::default_for),
            ranges: ChannelMap::from_fn(Channel::default_range),
        }
    }
}

impl AcquisitionConfig {
    /// Change the rate-limit interval
    pub fn with_read_interval(mut self, interval: MillisDurationU64) -> Self {
        self.read_interval = interval;
        self
    }

    /// Change the number of warm-up reads
    pub fn with_warmup_reads(mut self, reads: u32) -> Self {
        self.warmup_reads = reads;
        self
    }

    /// Change the poll budget per read
    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts.max(1);
        self
    }

    /// Move a channel to another pin
    pub fn with_pin(mut self, channel: Channel, pin: u8) -> Self {
        self.pins[channel] = pin;
        self
    }

    /// Replace a channel's conversion strategy
    pub fn with_conversion(mut self, channel: Channel, conversion: Conversion) -> Self {
        self.conversions[channel] = conversion;
        self
    }

    /// Replace a channel's clamping range
    pub fn with_range(mut self, channel: Channel, range: PhysicalRange) -> Self {
        self.ranges[channel] = range;
        self
    }

    /// Replace the converter settings
    pub fn with_adc(mut self, adc: AdcConfig) -> Self {
        self.adc = adc;
        self
    }
}
