//! Hardware sampling capability
//!
//! The acquisition engine talks to the converter only through
//! [`AdcSampler`], so the conversion, filter and calibration logic can run
//! against a scripted fake (see [`mock::ScriptedAdc`]) as easily as against
//! the ESP32 SAR ADC.
//!
//! Reads are non-blocking in the `nb` style: `WouldBlock` means "conversion
//! still in progress". [`read_blocking`] polls with a bounded budget and
//! turns an endless `WouldBlock` into [`AcquisitionError::Timeout`] instead
//! of hanging the UI loop.

pub mod mock;

use crate::constants::adc::{
    ADC_ATTENUATION_DB, ADC_CLOCK_DIV, ADC_RESOLUTION_BITS, ADC_SAMPLES_PER_READ,
    ADC_SAMPLE_CYCLES,
};
use crate::errors::{AcquisitionError, AcquisitionResult};

/// Converter settings applied once by `init()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdcConfig {
    /// Resolution in bits (12 → 0..=4095)
    pub resolution_bits: u8,
    /// Input attenuation in dB (11 → 0–3.3 V)
    pub attenuation_db: u8,
    /// Sampling cycles per conversion
    pub sample_cycles: u8,
    /// Hardware samples averaged per conversion
    pub samples: u8,
    /// Clock divider
    pub clock_div: u8,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            resolution_bits: ADC_RESOLUTION_BITS,
            attenuation_db: ADC_ATTENUATION_DB,
            sample_cycles: ADC_SAMPLE_CYCLES,
            samples: ADC_SAMPLES_PER_READ,
            clock_div: ADC_CLOCK_DIV,
        }
    }
}

/// Analog sampling hardware
///
/// ## Example Implementation
///
/// ```rust
/// use trimix_core::adc::{AdcConfig, AdcSampler};
///
/// struct FixedLevel(u16);
///
/// impl AdcSampler for FixedLevel {
///     type Error = ();
///
///     fn configure(&mut self, _config: &AdcConfig) -> Result<(), ()> {
///         Ok(())
///     }
///
///     fn read_raw(&mut self, _pin: u8) -> nb::Result<u16, ()> {
///         Ok(self.0)
///     }
/// }
/// ```
pub trait AdcSampler {
    /// Driver-specific error
    type Error: core::fmt::Debug;

    /// Apply resolution, attenuation and timing settings
    fn configure(&mut self, config: &AdcConfig) -> Result<(), Self::Error>;

    /// Start or continue a conversion on `pin`
    ///
    /// Returns the raw count (expected 0..=4095) once the conversion is done.
    fn read_raw(&mut self, pin: u8) -> nb::Result<u16, Self::Error>;

    /// Busy-wait for `us` microseconds to let the input settle
    fn settle_us(&mut self, _us: u32) {}
}

impl<A: AdcSampler + ?Sized> AdcSampler for &mut A {
    type Error = A::Error;

    fn configure(&mut self, config: &AdcConfig) -> Result<(), Self::Error> {
        (**self).configure(config)
    }

    fn read_raw(&mut self, pin: u8) -> nb::Result<u16, Self::Error> {
        (**self).read_raw(pin)
    }

    fn settle_us(&mut self, us: u32) {
        (**self).settle_us(us)
    }
}

/// Poll `pin` until a conversion completes or `max_attempts` is spent
pub fn read_blocking<A: AdcSampler + ?Sized>(
    adc: &mut A,
    pin: u8,
    max_attempts: u32,
) -> AcquisitionResult<u16> {
    let attempts = max_attempts.max(1);
    for _ in 0..attempts {
        match adc.read_raw(pin) {
            Ok(raw) => return Ok(raw),
            Err(nb::Error::WouldBlock) => continue,
            Err(nb::Error::Other(_)) => return Err(AcquisitionError::ReadFailed { pin }),
        }
    }
    Err(AcquisitionError::Timeout { pin, attempts })
}
