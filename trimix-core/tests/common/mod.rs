//! Common test utilities for integration tests
//!
//! This module provides:
//! - Engine fixtures wired to a scripted ADC and a mock clock
//! - Raw-count helpers that invert the default conversions
//! - History sinks for exercising `save_reading`
//! - Assertion helpers for float comparisons

#![allow(dead_code)]

use trimix_core::adc::mock::ScriptedAdc;
use trimix_core::constants::{ADC_MAX_RAW, ADC_REFERENCE_V};
use trimix_core::time::MockTimeSource;
use trimix_core::{
    AcquisitionConfig, AcquisitionEngine, Channel, HistoryRecord, HistorySink, SensorSnapshot,
};

pub mod scenarios;

/// Engine under test: scripted ADC and a borrowed mock clock
pub type TestEngine<'a> = AcquisitionEngine<ScriptedAdc, &'a MockTimeSource>;

/// Engine with the default configuration, not yet initialized
pub fn engine_with(adc: ScriptedAdc, clock: &MockTimeSource) -> TestEngine<'_> {
    AcquisitionEngine::new(adc, clock, AcquisitionConfig::default())
}

/// Initialized engine whose pins all read `level`
pub fn ready_engine(level: u16, clock: &MockTimeSource) -> TestEngine<'_> {
    let mut engine = engine_with(ScriptedAdc::with_level(level), clock);
    engine.init().expect("scripted ADC always configures");
    engine
}

/// ADC pin of a channel under the default configuration
pub fn pin(channel: Channel) -> u8 {
    AcquisitionConfig::default().pins[channel]
}

/// Raw count that reads closest to `pct` on a percentage channel
pub fn raw_for_percent(pct: f32) -> u16 {
    let raw = (pct / 100.0 * ADC_MAX_RAW as f32).round();
    raw.clamp(0.0, ADC_MAX_RAW as f32) as u16
}

/// Raw count that reads closest to `ppm` for a `ppm = V × sensitivity × 1000` channel
pub fn raw_for_ppm(ppm: f32, sensitivity: f32) -> u16 {
    let volts = ppm / (sensitivity * 1000.0);
    let raw = (volts / ADC_REFERENCE_V * ADC_MAX_RAW as f32).round();
    raw.clamp(0.0, ADC_MAX_RAW as f32) as u16
}

/// Push `count` forced cycles through the engine
pub fn force_cycles(engine: &mut TestEngine<'_>, count: usize) -> SensorSnapshot {
    let mut last = engine.snapshot();
    for _ in 0..count {
        last = engine.get_readings(true);
    }
    last
}

/// Bit-level equality, so `-0.0 != 0.0` and NaNs compare by payload
pub fn bit_identical(a: &SensorSnapshot, b: &SensorSnapshot) -> bool {
    a.o2_pct.to_bits() == b.o2_pct.to_bits()
        && a.he_pct.to_bits() == b.he_pct.to_bits()
        && a.n2_pct.to_bits() == b.n2_pct.to_bits()
        && a.co2_ppm.to_bits() == b.co2_ppm.to_bits()
        && a.co_ppm.to_bits() == b.co_ppm.to_bits()
        && a.is_valid == b.is_valid
}

/// Assert two floats are within `tolerance`
#[track_caller]
pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Sink that keeps every record
#[derive(Debug, Default)]
pub struct VecSink {
    pub records: Vec<HistoryRecord>,
}

impl HistorySink for VecSink {
    type Error = ();

    fn record(&mut self, record: HistoryRecord) -> Result<(), ()> {
        self.records.push(record);
        Ok(())
    }
}

/// Sink that refuses every record
#[derive(Debug, Default)]
pub struct FullSink;

impl HistorySink for FullSink {
    type Error = &'static str;

    fn record(&mut self, _record: HistoryRecord) -> Result<(), &'static str> {
        Err("storage full")
    }
}
