//! Constants for the Trimix Analyzer acquisition core
//!
//! All numeric values used by the acquisition engine and the calibration
//! subsystem live here, grouped by domain, with units in the names.
//!
//! ## Organization
//!
//! - **ADC**: converter resolution, reference voltage and hardware timing
//! - **Sensors**: channel pins, conversion constants and physical ranges
//! - **Time**: sampling cadence, settling delays and reminder intervals

/// ADC resolution, reference voltage and converter timing settings.
pub mod adc;

/// Gas sensor pins, conversion constants and physical ranges.
pub mod sensors;

/// Sampling intervals, settling delays and calendar conversions.
pub mod time;

pub use adc::{ADC_MAX_RAW, ADC_REFERENCE_V, ADC_RESOLUTION_BITS};

pub use sensors::{
    FILTER_BUFFER_SIZE, O2_PIN, HE_PIN, CO2_PIN, CO_PIN,
    GAS_PCT_MIN, GAS_PCT_MAX, CO2_PPM_MAX, CO_PPM_MAX,
    CO2_SENSITIVITY, CO_SENSITIVITY,
};

pub use time::{
    MS_PER_SECOND, MS_PER_DAY, READ_INTERVAL_MS,
    WARMUP_READS, DEFAULT_CALIBRATION_INTERVAL_DAYS,
};
