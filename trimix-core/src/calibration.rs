//! Single-point field calibration
//!
//! Each sampled channel carries a scalar factor applied multiplicatively to
//! the converted sensor output. Calibrating against a reference gas of known
//! concentration sets
//!
//! ```text
//! factor = known_value / uncalibrated_reading
//! ```
//!
//! where `uncalibrated_reading` is a fresh conversion of the raw count with
//! no factor applied.
//!
//! ## State machine (per channel)
//!
//! ```text
//!                 calibrate() ok              calibrate() ok
//! Uncalibrated ─────────────────→ Calibrated(f) ──────────→ Calibrated(f')
//!  (factor 1.0) ←──────────────────────┘
//!                reset()
//! ```
//!
//! A rejected calibration leaves the state untouched. The factor is
//! guaranteed finite and positive after any successful calibration.
//!
//! Samples already sitting in the moving-average window are not rescaled;
//! the filtered output blends old and new scales for up to `N - 1` cycles.

use crate::channel::{Channel, ChannelMap, PhysicalRange};
use crate::constants::sensors::DEFAULT_CALIBRATION_FACTOR;
use crate::errors::{CalibrationError, CalibrationResult};

/// Calibration state of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationState {
    /// Factor is the default 1.0
    Uncalibrated,
    /// Factor was set by a successful calibration
    Calibrated(f32),
}

/// Result of an accepted calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationOutcome {
    /// Channel that was calibrated
    pub channel: Channel,
    /// Factor before the calibration
    pub previous_factor: f32,
    /// Factor now in effect
    pub factor: f32,
    /// Uncalibrated reading the factor was derived from
    pub reading: f32,
}

/// Per-channel calibration factors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationTable {
    factors: ChannelMap<f32>,
    calibrated: ChannelMap<bool>,
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationTable {
    /// Every channel uncalibrated (factor 1.0)
    pub const fn new() -> Self {
        Self {
            factors: ChannelMap::splat(DEFAULT_CALIBRATION_FACTOR),
            calibrated: ChannelMap::splat(false),
        }
    }

    /// Factor currently applied to `channel`
    pub fn factor(&self, channel: Channel) -> f32 {
        self.factors[channel]
    }

    /// Snapshot of all factors, e.g. for checkpointing
    pub fn factors(&self) -> ChannelMap<f32> {
        self.factors
    }

    /// Current state of `channel`
    pub fn state(&self, channel: Channel) -> CalibrationState {
        if self.calibrated[channel] {
            CalibrationState::Calibrated(self.factors[channel])
        } else {
            CalibrationState::Uncalibrated
        }
    }

    /// Scale a converted value by the channel's factor
    pub fn apply(&self, channel: Channel, value: f32) -> f32 {
        value * self.factors[channel]
    }

    /// Check an operator-supplied reference against the channel domain
    pub fn check_reference(known_value: f32, domain: PhysicalRange) -> CalibrationResult<()> {
        if !known_value.is_finite() || !domain.contains(known_value) {
            return Err(CalibrationError::ReferenceOutOfRange {
                value: known_value,
                min: domain.min,
                max: domain.max,
            });
        }
        Ok(())
    }

    /// Derive and store a new factor from a fresh uncalibrated reading
    ///
    /// On any error the previous factor is retained.
    pub fn calibrate_from_reading(
        &mut self,
        channel: Channel,
        known_value: f32,
        uncalibrated_reading: f32,
        domain: PhysicalRange,
    ) -> CalibrationResult<CalibrationOutcome> {
        Self::check_reference(known_value, domain)?;

        // NaN fails this comparison as well
        if !(uncalibrated_reading > 0.0) {
            return Err(CalibrationError::NonPositiveReading { reading: uncalibrated_reading });
        }

        let factor = known_value / uncalibrated_reading;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(CalibrationError::InvalidFactor { factor });
        }

        let previous_factor = self.factors[channel];
        self.factors[channel] = factor;
        self.calibrated[channel] = true;

        log_info!("{} calibrated: factor = {:.3}", channel.label(), factor);

        Ok(CalibrationOutcome {
            channel,
            previous_factor,
            factor,
            reading: uncalibrated_reading,
        })
    }

    /// Return every channel to factor 1.0
    pub fn reset(&mut self) {
        self.factors = ChannelMap::splat(DEFAULT_CALIBRATION_FACTOR);
        self.calibrated = ChannelMap::splat(false);
        log_info!("Calibration reset to defaults");
    }

    /// Re-apply a checkpointed set of factors
    ///
    /// Rejected as a whole if any factor is non-finite or not positive.
    /// Factors other than 1.0 are marked calibrated.
    pub fn restore(&mut self, factors: ChannelMap<f32>) -> CalibrationResult<()> {
        if let Some((_, &bad)) = factors.iter().find(|(_, f)| !f.is_finite() || **f <= 0.0) {
            return Err(CalibrationError::InvalidFactor { factor: bad });
        }

        self.factors = factors;
        self.calibrated = ChannelMap::from_fn(|c| factors[c] != DEFAULT_CALIBRATION_FACTOR);
        Ok(())
    }
}
