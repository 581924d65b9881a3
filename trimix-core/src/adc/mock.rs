//! Scripted converter for tests and host simulation
//!
//! `ScriptedAdc` returns a steady level per pin and can queue one-off
//! events (a specific value, a failure, a busy period) that are consumed
//! before falling back to the level.
//!
//! ```rust
//! use trimix_core::adc::AdcSampler;
//! use trimix_core::adc::mock::{MockRead, ScriptedAdc};
//!
//! let mut adc = ScriptedAdc::with_level(2048);
//! adc.script(34, MockRead::Value(0));
//!
//! assert_eq!(adc.read_raw(34), Ok(0));
//! assert_eq!(adc.read_raw(34), Ok(2048));
//! ```

use heapless::{Deque, LinearMap};

use super::{AdcConfig, AdcSampler};

/// Distinct pins the mock can track
pub const MAX_MOCK_PINS: usize = 8;

/// Queued events per pin
pub const MOCK_SCRIPT_DEPTH: usize = 16;

/// One scripted read event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockRead {
    /// Return this raw count once
    Value(u16),
    /// Fail the read once
    Fail,
    /// Report `WouldBlock` for this many polls
    Busy(u32),
}

/// Errors raised by the mock converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockAdcError {
    /// `configure` was set up to fail
    ConfigRejected,
    /// A scripted `Fail` was consumed
    ReadFault,
}

/// Fake ADC driven by per-pin levels and scripts
#[derive(Debug, Clone)]
pub struct ScriptedAdc {
    default_level: u16,
    levels: LinearMap<u8, u16, MAX_MOCK_PINS>,
    scripts: LinearMap<u8, Deque<MockRead, MOCK_SCRIPT_DEPTH>, MAX_MOCK_PINS>,
    reject_configure: bool,
    configured: Option<AdcConfig>,
    configure_calls: u32,
    completed_reads: u32,
    settled_us: u64,
}

impl ScriptedAdc {
    /// Every pin reads `level`
    pub fn with_level(level: u16) -> Self {
        Self {
            default_level: level,
            levels: LinearMap::new(),
            scripts: LinearMap::new(),
            reject_configure: false,
            configured: None,
            configure_calls: 0,
            completed_reads: 0,
            settled_us: 0,
        }
    }

    /// Converter that refuses configuration, as if absent
    pub fn unavailable() -> Self {
        let mut adc = Self::with_level(0);
        adc.reject_configure = true;
        adc
    }

    /// Set the steady level for one pin
    pub fn set_level(&mut self, pin: u8, level: u16) -> &mut Self {
        // Pins beyond the map capacity keep the default level
        let _ = self.levels.insert(pin, level);
        self
    }

    /// Set the steady level for every pin
    pub fn set_all(&mut self, level: u16) -> &mut Self {
        self.default_level = level;
        self.levels.clear();
        self
    }

    /// Queue a one-off event for `pin`; returns false if the queue is full
    pub fn script(&mut self, pin: u8, event: MockRead) -> bool {
        if self.scripts.get(&pin).is_none() && self.scripts.insert(pin, Deque::new()).is_err() {
            return false;
        }
        match self.scripts.get_mut(&pin) {
            Some(queue) => queue.push_back(event).is_ok(),
            None => false,
        }
    }

    /// Make subsequent `configure` calls fail or succeed
    pub fn set_reject_configure(&mut self, reject: bool) -> &mut Self {
        self.reject_configure = reject;
        self
    }

    /// Last accepted configuration
    pub fn configured(&self) -> Option<&AdcConfig> {
        self.configured.as_ref()
    }

    /// Number of `configure` calls, accepted or not
    pub fn configure_calls(&self) -> u32 {
        self.configure_calls
    }

    /// Number of reads that returned a value
    pub fn completed_reads(&self) -> u32 {
        self.completed_reads
    }

    /// Total microseconds requested through `settle_us`
    pub fn settled_us(&self) -> u64 {
        self.settled_us
    }

    fn level(&self, pin: u8) -> u16 {
        self.levels.get(&pin).copied().unwrap_or(self.default_level)
    }
}

impl Default for ScriptedAdc {
    fn default() -> Self {
        Self::with_level(0)
    }
}

impl AdcSampler for ScriptedAdc {
    type Error = MockAdcError;

    fn configure(&mut self, config: &AdcConfig) -> Result<(), Self::Error> {
        self.configure_calls += 1;
        if self.reject_configure {
            return Err(MockAdcError::ConfigRejected);
        }
        self.configured = Some(*config);
        Ok(())
    }

    fn read_raw(&mut self, pin: u8) -> nb::Result<u16, Self::Error> {
        let level = self.level(pin);

        if let Some(queue) = self.scripts.get_mut(&pin) {
            loop {
                match queue.front_mut() {
                    Some(MockRead::Busy(0)) => {
                        queue.pop_front();
                    }
                    Some(MockRead::Busy(polls)) => {
                        *polls -= 1;
                        return Err(nb::Error::WouldBlock);
                    }
                    Some(MockRead::Fail) => {
                        queue.pop_front();
                        return Err(nb::Error::Other(MockAdcError::ReadFault));
                    }
                    Some(MockRead::Value(raw)) => {
                        let raw = *raw;
                        queue.pop_front();
                        self.completed_reads += 1;
                        return Ok(raw);
                    }
                    None => break,
                }
            }
        }

        self.completed_reads += 1;
        Ok(level)
    }

    fn settle_us(&mut self, us: u32) {
        self.settled_us += u64::from(us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_pin_levels() {
        let mut adc = ScriptedAdc::with_level(10);
        adc.set_level(34, 4095);
        assert_eq!(adc.read_raw(34), Ok(4095));
        assert_eq!(adc.read_raw(35), Ok(10));

        adc.set_all(7);
        assert_eq!(adc.read_raw(34), Ok(7));
        assert_eq!(adc.completed_reads(), 3);
    }

    #[test]
    fn scripts_are_consumed_in_order() {
        let mut adc = ScriptedAdc::with_level(1);
        assert!(adc.script(32, MockRead::Busy(1)));
        assert!(adc.script(32, MockRead::Value(99)));
        assert!(adc.script(32, MockRead::Fail));

        assert_eq!(adc.read_raw(32), Err(nb::Error::WouldBlock));
        assert_eq!(adc.read_raw(32), Ok(99));
        assert_eq!(adc.read_raw(32), Err(nb::Error::Other(MockAdcError::ReadFault)));
        assert_eq!(adc.read_raw(32), Ok(1));
    }

    #[test]
    fn configuration_is_recorded() {
        let mut adc = ScriptedAdc::with_level(0);
        adc.configure(&AdcConfig::default()).unwrap();
        assert_eq!(adc.configured().map(|c| c.resolution_bits), Some(12));

        let mut dead = ScriptedAdc::unavailable();
        assert_eq!(dead.configure(&AdcConfig::default()), Err(MockAdcError::ConfigRejected));
        assert!(dead.configured().is_none());
        assert_eq!(dead.configure_calls(), 1);
    }
}
