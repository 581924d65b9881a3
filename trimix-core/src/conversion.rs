//! Raw count → voltage → physical unit conversion
//!
//! Conversion is pure: given a raw ADC count it always produces the same
//! value, independent of engine state. The per-channel step from voltage to
//! physical units is a pluggable [`Conversion`] so a real sensor curve can
//! replace the default linear mappings without touching the engine.
//!
//! ## Default mappings
//!
//! ```text
//! voltage = raw / 4095 × 3.3
//!
//! O2, He   : clamp(voltage, 0, 3.3) / 3.3 × 100          (%)
//! CO2      : voltage × 0.4 × 1000                         (ppm)
//! CO       : voltage × 0.1 × 1000                         (ppm)
//! ```
//!
//! The ppm slopes are fixed placeholders, not datasheet curves.

use crate::channel::Channel;
use crate::constants::adc::{ADC_MAX_RAW, ADC_REFERENCE_V};
use crate::constants::sensors::{
    CO2_SENSITIVITY, CO_SENSITIVITY, GAS_PCT_MAX, PCT_MAX_VOLTAGE_V, PCT_MIN_VOLTAGE_V, PPM_SCALE,
};

/// Convert a 12-bit raw count to volts
///
/// Counts above the converter maximum are treated as full scale.
pub fn raw_to_voltage(raw: u16) -> f32 {
    let raw = raw.min(ADC_MAX_RAW);
    (raw as f32 / ADC_MAX_RAW as f32) * ADC_REFERENCE_V
}

/// Voltage → physical unit strategy for one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// Linear percentage across a voltage window; the voltage is clamped
    /// into the window first so the result stays within 0–100 %
    LinearPercent {
        /// Voltage that reads 0 %
        min_v: f32,
        /// Voltage that reads 100 %
        max_v: f32,
    },

    /// `voltage × sensitivity × 1000` ppm
    LinearPpm {
        /// Slope constant
        sensitivity: f32,
    },

    /// Caller-supplied curve, e.g. a logarithmic electrochemical response
    Custom(fn(f32) -> f32),
}

impl Conversion {
    /// Default strategy for a channel
    pub const fn default_for(channel: Channel) -> Self {
        match channel {
            Channel::O2 | Channel::He => Conversion::LinearPercent {
                min_v: PCT_MIN_VOLTAGE_V,
                max_v: PCT_MAX_VOLTAGE_V,
            },
            Channel::Co2 => Conversion::LinearPpm { sensitivity: CO2_SENSITIVITY },
            Channel::Co => Conversion::LinearPpm { sensitivity: CO_SENSITIVITY },
        }
    }

    /// Apply the strategy to a voltage
    pub fn apply(&self, voltage: f32) -> f32 {
        match *self {
            Conversion::LinearPercent { min_v, max_v } => {
                let span = max_v - min_v;
                if span <= 0.0 {
                    return 0.0;
                }
                let v = voltage.clamp(min_v, max_v);
                ((v - min_v) / span) * GAS_PCT_MAX
            }
            Conversion::LinearPpm { sensitivity } => voltage * sensitivity * PPM_SCALE,
            Conversion::Custom(curve) => curve(voltage),
        }
    }

    /// Full raw-count → physical-unit conversion, before calibration
    pub fn convert_raw(&self, raw: u16) -> f32 {
        self.apply(raw_to_voltage(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voltage_endpoints() {
        assert_eq!(raw_to_voltage(0), 0.0);
        assert_eq!(raw_to_voltage(4095), 3.3);
        // Out-of-range counts saturate
        assert_eq!(raw_to_voltage(u16::MAX), 3.3);
    }

    #[test]
    fn percent_channel_endpoints_are_exact() {
        let o2 = Conversion::default_for(Channel::O2);
        assert_eq!(o2.convert_raw(4095), 100.0);
        assert_eq!(o2.convert_raw(0), 0.0);
    }

    #[test]
    fn midscale_values() {
        let raw = 2048;
        let o2 = Conversion::default_for(Channel::O2).convert_raw(raw);
        let co2 = Conversion::default_for(Channel::Co2).convert_raw(raw);
        let co = Conversion::default_for(Channel::Co).convert_raw(raw);

        assert!((o2 - 50.01).abs() < 0.01);
        assert!((co2 - 660.16).abs() < 0.05);
        assert!((co - 165.04).abs() < 0.05);
    }

    #[test]
    fn percent_window_clamps_voltage() {
        let narrow = Conversion::LinearPercent { min_v: 1.0, max_v: 2.0 };
        assert_eq!(narrow.apply(0.5), 0.0);
        assert_eq!(narrow.apply(1.5), 50.0);
        assert_eq!(narrow.apply(3.0), 100.0);

        let degenerate = Conversion::LinearPercent { min_v: 2.0, max_v: 2.0 };
        assert_eq!(degenerate.apply(2.0), 0.0);
    }

    #[test]
    fn custom_curve() {
        fn doubled(v: f32) -> f32 {
            v * 2.0
        }
        let conv = Conversion::Custom(doubled);
        assert_eq!(conv.apply(1.25), 2.5);
    }
}
