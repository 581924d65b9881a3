//! Gas Sensor Specifications and Limits
//!
//! Pin assignments, conversion constants and physical domains for the four
//! sampled channels (O2, He, CO2, CO). N2 is derived by mass balance and has
//! no pin.

// ===== PIN ASSIGNMENTS =====

/// ADC pin for the oxygen cell.
pub const O2_PIN: u8 = 34;

/// ADC pin for the helium sensor.
pub const HE_PIN: u8 = 35;

/// ADC pin for the CO2 sensor.
pub const CO2_PIN: u8 = 32;

/// ADC pin for the CO sensor.
pub const CO_PIN: u8 = 33;

// ===== FILTERING =====

/// Moving-average window per channel (samples).
///
/// Five samples at 1 Hz gives a worst-case lag of five seconds, which is
/// fine for slowly changing trimix blends.
pub const FILTER_BUFFER_SIZE: usize = 5;

// ===== GAS PERCENTAGE CHANNELS (O2, He, N2) =====

/// Lower bound of a gas fraction (%).
pub const GAS_PCT_MIN: f32 = 0.0;

/// Upper bound of a gas fraction (%).
pub const GAS_PCT_MAX: f32 = 100.0;

/// Voltage that maps to 0 % on the percentage channels (V).
pub const PCT_MIN_VOLTAGE_V: f32 = 0.0;

/// Voltage that maps to 100 % on the percentage channels (V).
pub const PCT_MAX_VOLTAGE_V: f32 = 3.3;

/// Total of O2 + He + N2 in a trimix blend (%).
pub const MASS_BALANCE_TOTAL_PCT: f32 = 100.0;

// ===== PPM CHANNELS (CO2, CO) =====

/// CO2 slope in the linear `V × sensitivity × 1000` mapping.
///
/// A fixed slope rather than a datasheet curve.
pub const CO2_SENSITIVITY: f32 = 0.4;

/// CO slope in the linear `V × sensitivity × 1000` mapping.
pub const CO_SENSITIVITY: f32 = 0.1;

/// Scale from `V × sensitivity` to ppm.
pub const PPM_SCALE: f32 = 1000.0;

/// Lower bound of a ppm reading.
pub const PPM_MIN: f32 = 0.0;

/// Upper bound of the CO2 channel (ppm).
pub const CO2_PPM_MAX: f32 = 10_000.0;

/// Upper bound of the CO channel (ppm).
pub const CO_PPM_MAX: f32 = 1_000.0;

// ===== LOGGING THRESHOLDS =====

/// Change in O2/He/N2 that triggers a snapshot log line (%).
pub const LOG_DELTA_PCT: f32 = 0.1;

/// Change in CO2 that triggers a snapshot log line (ppm).
pub const LOG_DELTA_CO2_PPM: f32 = 10.0;

/// Change in CO that triggers a snapshot log line (ppm).
pub const LOG_DELTA_CO_PPM: f32 = 1.0;

// ===== CALIBRATION =====

/// Factor every channel starts with and returns to on reset.
pub const DEFAULT_CALIBRATION_FACTOR: f32 = 1.0;
