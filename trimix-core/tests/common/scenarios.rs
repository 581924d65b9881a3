//! Reference gas mixes used across integration tests

use trimix_core::adc::mock::ScriptedAdc;
use trimix_core::constants::{CO2_SENSITIVITY, CO_SENSITIVITY};
use trimix_core::{Channel, ChannelMap};

use super::{pin, raw_for_percent, raw_for_ppm};

/// A blend as the sensors should report it
#[derive(Debug, Clone, Copy)]
pub struct GasMix {
    pub name: &'static str,
    pub o2_pct: f32,
    pub he_pct: f32,
    pub co2_ppm: f32,
    pub co_ppm: f32,
}

impl GasMix {
    /// Raw counts that produce this mix under the default conversions
    pub fn raw_levels(&self) -> ChannelMap<u16> {
        ChannelMap::new([
            raw_for_percent(self.o2_pct),
            raw_for_percent(self.he_pct),
            raw_for_ppm(self.co2_ppm, CO2_SENSITIVITY),
            raw_for_ppm(self.co_ppm, CO_SENSITIVITY),
        ])
    }

    /// Scripted ADC whose pins read this mix
    pub fn adc(&self) -> ScriptedAdc {
        let mut adc = ScriptedAdc::with_level(0);
        self.apply(&mut adc);
        adc
    }

    /// Point every pin of `adc` at this mix
    pub fn apply(&self, adc: &mut ScriptedAdc) {
        let levels = self.raw_levels();
        for channel in Channel::ALL {
            adc.set_level(pin(channel), levels[channel]);
        }
    }
}

/// Air as used for O2 calibration
pub const AIR: GasMix = GasMix { name: "air", o2_pct: 20.9, he_pct: 0.0, co2_ppm: 400.0, co_ppm: 0.0 };

/// Common recreational trimix
pub const TRIMIX_21_35: GasMix =
    GasMix { name: "21/35", o2_pct: 21.0, he_pct: 35.0, co2_ppm: 400.0, co_ppm: 1.0 };

/// Deep hypoxic trimix
pub const TRIMIX_10_70: GasMix =
    GasMix { name: "10/70", o2_pct: 10.0, he_pct: 70.0, co2_ppm: 500.0, co_ppm: 2.0 };

/// Pure oxygen deco gas
pub const OXYGEN: GasMix = GasMix { name: "O2", o2_pct: 100.0, he_pct: 0.0, co2_ppm: 0.0, co_ppm: 0.0 };

/// Every mix, for table-driven tests
pub const ALL_MIXES: [GasMix; 4] = [AIR, TRIMIX_21_35, TRIMIX_10_70, OXYGEN];
