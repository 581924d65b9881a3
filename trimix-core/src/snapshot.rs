//! Externally visible readings
//!
//! A [`SensorSnapshot`] is a plain `Copy` value: callers always receive a
//! point-in-time copy, never a handle into engine state.

use crate::channel::{Channel, PhysicalRange};
use crate::constants::sensors::{
    LOG_DELTA_CO2_PPM, LOG_DELTA_CO_PPM, LOG_DELTA_PCT, MASS_BALANCE_TOTAL_PCT,
};

/// Five physical values plus a validity flag
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSnapshot {
    /// Oxygen (%)
    pub o2_pct: f32,
    /// Helium (%)
    pub he_pct: f32,
    /// Nitrogen by mass balance (%)
    pub n2_pct: f32,
    /// Carbon dioxide (ppm)
    pub co2_ppm: f32,
    /// Carbon monoxide (ppm)
    pub co_ppm: f32,
    /// True once at least one acquisition cycle has completed
    pub is_valid: bool,
}

impl SensorSnapshot {
    /// All zeros, not valid
    pub const INVALID: Self = Self {
        o2_pct: 0.0,
        he_pct: 0.0,
        n2_pct: 0.0,
        co2_ppm: 0.0,
        co_ppm: 0.0,
        is_valid: false,
    };

    /// Assemble a valid snapshot from clamped channel values, deriving N2
    pub fn from_channels(o2_pct: f32, he_pct: f32, co2_ppm: f32, co_ppm: f32) -> Self {
        Self {
            o2_pct,
            he_pct,
            n2_pct: derive_n2(o2_pct, he_pct),
            co2_ppm,
            co_ppm,
            is_valid: true,
        }
    }

    /// Value of a sampled channel
    pub fn value(&self, channel: Channel) -> f32 {
        match channel {
            Channel::O2 => self.o2_pct,
            Channel::He => self.he_pct,
            Channel::Co2 => self.co2_ppm,
            Channel::Co => self.co_ppm,
        }
    }

    /// O2 + He + N2 (≈100 % for a valid trimix snapshot)
    pub fn balance_total(&self) -> f32 {
        self.o2_pct + self.he_pct + self.n2_pct
    }

    /// Whether any value moved past its logging threshold since `previous`
    pub fn differs_significantly(&self, previous: &Self) -> bool {
        libm::fabsf(self.o2_pct - previous.o2_pct) > LOG_DELTA_PCT
            || libm::fabsf(self.he_pct - previous.he_pct) > LOG_DELTA_PCT
            || libm::fabsf(self.n2_pct - previous.n2_pct) > LOG_DELTA_PCT
            || libm::fabsf(self.co2_ppm - previous.co2_ppm) > LOG_DELTA_CO2_PPM
            || libm::fabsf(self.co_ppm - previous.co_ppm) > LOG_DELTA_CO_PPM
    }
}

impl core::fmt::Display for SensorSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "O2={:.1}% He={:.1}% N2={:.1}% CO2={:.0}ppm CO={:.0}ppm",
            self.o2_pct, self.he_pct, self.n2_pct, self.co2_ppm, self.co_ppm
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorSnapshot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "O2={}% He={}% N2={}% CO2={}ppm CO={}ppm valid={}",
            self.o2_pct, self.he_pct, self.n2_pct, self.co2_ppm, self.co_ppm, self.is_valid
        )
    }
}

/// N2 = 100 − O2 − He, clamped to 0–100 %
///
/// Assumes the blend is pure trimix; N2 is never sampled.
pub fn derive_n2(o2_pct: f32, he_pct: f32) -> f32 {
    PhysicalRange::PERCENT.clamp(MASS_BALANCE_TOTAL_PCT - o2_pct - he_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_by_default() {
        assert_eq!(SensorSnapshot::default(), SensorSnapshot::INVALID);
        assert!(!SensorSnapshot::INVALID.is_valid);
    }

    #[test]
    fn n2_mass_balance() {
        assert_eq!(derive_n2(21.0, 35.0), 44.0);
        assert_eq!(derive_n2(60.0, 60.0), 0.0);
        assert_eq!(derive_n2(0.0, 0.0), 100.0);

        let snap = SensorSnapshot::from_channels(18.0, 45.0, 400.0, 2.0);
        assert!((snap.balance_total() - 100.0).abs() < 0.1);
        assert_eq!(snap.value(Channel::Co2), 400.0);
    }

    #[test]
    fn significance_thresholds() {
        let a = SensorSnapshot::from_channels(21.0, 0.0, 400.0, 0.0);
        let mut b = a;
        b.co2_ppm += 5.0;
        assert!(!b.differs_significantly(&a));
        b.co2_ppm += 10.0;
        assert!(b.differs_significantly(&a));
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_format() {
        let snap = SensorSnapshot::from_channels(21.0, 35.0, 660.2, 165.0);
        assert_eq!(
            std::format!("{}", snap),
            "O2=21.0% He=35.0% N2=44.0% CO2=660ppm CO=165ppm"
        );
    }
}
