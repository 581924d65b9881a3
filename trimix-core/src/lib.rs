//! Sensor acquisition and calibration core for a trimix gas analyzer
//!
//! Samples O2, He, CO2 and CO through a 12-bit ADC, converts and smooths
//! the readings, derives N2 by mass balance and applies single-point field
//! calibration.
//!
//! Key constraints:
//! - Runs on a single-board instrument (ESP32 class), `no_std` capable
//! - No heap allocation anywhere in the acquisition path
//! - Never aborts on hardware trouble; invalid data is flagged instead
//!
//! ```rust
//! use trimix_core::adc::mock::ScriptedAdc;
//! use trimix_core::time::MockTimeSource;
//! use trimix_core::{AcquisitionConfig, AcquisitionEngine, Channel};
//!
//! let clock = MockTimeSource::new(0);
//! let mut engine = AcquisitionEngine::new(
//!     ScriptedAdc::with_level(1300),
//!     &clock,
//!     AcquisitionConfig::default(),
//! );
//! let _ = engine.init();
//!
//! // Reference cylinder of air
//! match engine.calibrate(Channel::O2, 20.9) {
//!     Ok(outcome) => assert!(outcome.factor > 0.0),
//!     Err(e) => panic!("calibration failed: {}", e),
//! }
//!
//! clock.advance(1000);
//! let reading = engine.get_readings(false);
//! assert!(reading.is_valid);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod adc;
pub mod buffer;
pub mod calibration;
pub mod channel;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod diagnostics;
pub mod engine;
pub mod errors;
pub mod history;
pub mod schedule;
pub mod snapshot;
pub mod time;

// Public API
pub use adc::{AdcConfig, AdcSampler};
pub use calibration::{CalibrationOutcome, CalibrationState, CalibrationTable};
pub use channel::{Channel, ChannelMap, PhysicalRange};
pub use config::AcquisitionConfig;
pub use conversion::Conversion;
pub use diagnostics::{ChannelDiagnostics, Diagnostics, FaultKind};
pub use engine::{AcquisitionEngine, EngineState};
pub use errors::{AcquisitionError, AcquisitionResult, CalibrationError, CalibrationResult};
pub use history::{HistoryRecord, HistorySink, SaveError};
pub use schedule::{CalibrationSchedule, ReminderStatus};
pub use snapshot::SensorSnapshot;
pub use time::{TimeSource, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
