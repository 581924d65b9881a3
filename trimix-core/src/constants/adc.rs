//! ADC Specifications
//!
//! Converter settings for the ESP32 SAR ADC1 the gas sensors are wired to.
//! The raw-count and reference-voltage constants are the only two numbers
//! the voltage conversion depends on.

/// Converter resolution (bits).
///
/// 12 bits gives 4096 codes across the input range.
pub const ADC_RESOLUTION_BITS: u8 = 12;

/// Largest raw count the converter can report.
///
/// Anything above this is treated as a fault and clamped.
pub const ADC_MAX_RAW: u16 = (1 << ADC_RESOLUTION_BITS) - 1;

/// Full-scale input voltage (V).
///
/// With 11 dB attenuation the input range is 0–3.3 V.
pub const ADC_REFERENCE_V: f32 = 3.3;

/// Input attenuation (dB).
///
/// 11 dB maps the full 0–3.3 V sensor swing onto the converter.
pub const ADC_ATTENUATION_DB: u8 = 11;

/// Sampling cycles per conversion.
///
/// Reduced from the default to shorten each read.
pub const ADC_SAMPLE_CYCLES: u8 = 8;

/// Hardware samples averaged per conversion.
pub const ADC_SAMPLES_PER_READ: u8 = 1;

/// ADC clock divider (1 = fastest).
pub const ADC_CLOCK_DIV: u8 = 1;

/// How many times a `WouldBlock` read is re-polled before it counts as a
/// timeout.
pub const ADC_MAX_POLL_ATTEMPTS: u32 = 1000;
