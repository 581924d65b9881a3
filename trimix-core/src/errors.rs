//! Error Types for Acquisition and Calibration
//!
//! ## Design Philosophy
//!
//! The acquisition core runs on a single-board instrument that must keep
//! booting and measuring even when a sensor misbehaves, so errors here are
//! mostly *reports*, not aborts:
//!
//! 1. **Small Size**: every variant carries scalars or `&'static str` only,
//!    so errors are `Copy` and can sit in diagnostics without allocation.
//!
//! 2. **Fail Open**: `get_readings()` never returns an error. Hardware
//!    problems surface through `SensorSnapshot::is_valid` and the
//!    per-channel diagnostics counters.
//!
//! 3. **Distinguishable Outcomes**: calibration returns a `Result` so the
//!    UI can tell "rejected because the reference was out of range" apart
//!    from "rejected because the sensor reads zero".
//!
//! ## Error Categories
//!
//! ### Acquisition
//! - `HardwareUnavailable`: the ADC could not be configured
//! - `ReadFailed`: a single sample returned an error
//! - `Timeout`: a sample kept reporting `WouldBlock`
//! - `OutOfRange`: a raw count above the converter's full scale
//! - `NotValid`: no successful acquisition cycle yet
//!
//! ### Calibration
//! - `ReferenceOutOfRange`: operator-supplied value outside the channel domain
//! - `NonPositiveReading`: the uncalibrated sensor output is ≤ 0
//! - `InvalidFactor`: the resulting factor would be ≤ 0 or not finite
//! - `Hardware`: the fresh sample for calibration could not be taken
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use trimix_core::{CalibrationError, Channel};
//!
//! fn toast_for(result: Result<f32, CalibrationError>) -> &'static str {
//!     match result {
//!         Ok(_) => "Calibration successful",
//!         Err(CalibrationError::ReferenceOutOfRange { .. }) => "Reference value out of range",
//!         Err(CalibrationError::NonPositiveReading { .. }) => "Sensor reads zero - check cell",
//!         Err(_) => "Calibration failed",
//!     }
//! }
//! # let _ = toast_for(Ok(1.0));
//! # let _ = Channel::O2;
//! ```

use thiserror_no_std::Error;

/// Result type for acquisition operations
pub type AcquisitionResult<T> = Result<T, AcquisitionError>;

/// Result type for calibration operations
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Hardware and sampling failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionError {
    /// The sampling hardware is absent or refused its configuration
    #[error("Sampling hardware unavailable: {reason}")]
    HardwareUnavailable {
        /// Short description from the driver
        reason: &'static str,
    },

    /// A single read on one pin returned an error
    #[error("ADC read failed on pin {pin}")]
    ReadFailed {
        /// Pin that failed
        pin: u8,
    },

    /// A read kept returning `WouldBlock` past the poll budget
    #[error("ADC read on pin {pin} timed out after {attempts} polls")]
    Timeout {
        /// Pin that timed out
        pin: u8,
        /// Poll attempts spent before giving up
        attempts: u32,
    },

    /// The driver returned a count above full scale
    #[error("Raw count {raw} on pin {pin} above full scale")]
    OutOfRange {
        /// Pin that returned the count
        pin: u8,
        /// Count as returned by the driver
        raw: u16,
    },

    /// No acquisition cycle has completed yet
    #[error("No valid reading available")]
    NotValid,
}

/// Calibration rejections - the previous factor is always retained
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// Reference concentration outside the channel's physical domain
    #[error("Reference {value} outside range [{min}, {max}]")]
    ReferenceOutOfRange {
        /// Value the operator entered
        value: f32,
        /// Lower bound of the channel domain
        min: f32,
        /// Upper bound of the channel domain
        max: f32,
    },

    /// The uncalibrated sensor output is zero or negative
    #[error("Uncalibrated reading {reading} is not positive")]
    NonPositiveReading {
        /// Uncalibrated value the factor would have been derived from
        reading: f32,
    },

    /// The computed factor is zero, negative or not finite
    #[error("Computed calibration factor {factor} is invalid")]
    InvalidFactor {
        /// Rejected factor
        factor: f32,
    },

    /// The fresh calibration sample could not be taken
    #[error("Hardware fault during calibration: {0}")]
    Hardware(AcquisitionError),
}

impl From<AcquisitionError> for CalibrationError {
    fn from(err: AcquisitionError) -> Self {
        Self::Hardware(err)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AcquisitionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::HardwareUnavailable { reason } =>
                defmt::write!(fmt, "Hardware unavailable: {}", reason),
            Self::ReadFailed { pin } =>
                defmt::write!(fmt, "Read failed on pin {}", pin),
            Self::Timeout { pin, attempts } =>
                defmt::write!(fmt, "Pin {} timed out after {} polls", pin, attempts),
            Self::OutOfRange { pin, raw } =>
                defmt::write!(fmt, "Pin {} count {} above full scale", pin, raw),
            Self::NotValid =>
                defmt::write!(fmt, "No valid reading"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ReferenceOutOfRange { value, min, max } =>
                defmt::write!(fmt, "Reference {} outside [{}, {}]", value, min, max),
            Self::NonPositiveReading { reading } =>
                defmt::write!(fmt, "Reading {} not positive", reading),
            Self::InvalidFactor { factor } =>
                defmt::write!(fmt, "Invalid factor {}", factor),
            Self::Hardware(err) =>
                defmt::write!(fmt, "Hardware: {}", err),
        }
    }
}
