//! Acquisition engine
//!
//! ## Overview
//!
//! `AcquisitionEngine` owns everything between the converter and the
//! caller: the sampler, the clock, one moving-average filter per channel,
//! the calibration table, the reminder schedule, fault counters and the
//! cached snapshot. It is poll-driven; no sampling happens outside a call
//! to [`AcquisitionEngine::get_readings`] or [`AcquisitionEngine::init`].
//!
//! ## Acquisition cycle
//!
//! ```text
//!  read O2 ─┐
//!  read He ─┤ all four raw counts first
//!  read CO2─┤
//!  read CO ─┘
//!      │
//!      ▼  per channel
//!  raw → voltage → unit → × factor → MovingAverage<5> → clamp
//!      │
//!      ▼
//!  N2 = clamp(100 − O2 − He)  →  SensorSnapshot { is_valid: true }
//! ```
//!
//! A failed or timed-out read stands in as raw 0 and a count above 4095 is
//! clamped to full scale; both are counted in [`Diagnostics`]. A cycle in
//! which every channel failed is discarded without touching the filters or
//! the cached snapshot. The first cycle that does succeed fills every slot
//! of each window, so an average never mixes real samples with the zero
//! seed.
//!
//! ## Lifecycle
//!
//! ```text
//!                 init() ok
//! Uninitialized ───────────────────────→ Ready
//!       │                                  ↑
//!       │ init() fails                     │ due poll, configure ok
//!       │ (configure rejected or           │ and a pre-fill cycle
//!       │  every pre-fill cycle failed)    │ succeeds
//!       └──────→ HardwareUnavailable ──────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use trimix_core::adc::mock::ScriptedAdc;
//! use trimix_core::time::MockTimeSource;
//! use trimix_core::{AcquisitionConfig, AcquisitionEngine};
//!
//! let clock = MockTimeSource::new(0);
//! let mut engine = AcquisitionEngine::new(
//!     ScriptedAdc::with_level(2048),
//!     &clock,
//!     AcquisitionConfig::default(),
//! );
//! let _ = engine.init();
//!
//! let reading = engine.get_readings(false);
//! assert!(reading.is_valid);
//! assert!((reading.o2_pct - 50.0).abs() < 0.1);
//! assert_eq!(reading.n2_pct, 0.0);
//! ```

use crate::adc::{read_blocking, AdcSampler};
use crate::buffer::MovingAverage;
use crate::calibration::{CalibrationOutcome, CalibrationTable};
use crate::channel::{Channel, ChannelMap};
use crate::config::AcquisitionConfig;
use crate::constants::adc::ADC_MAX_RAW;
use crate::constants::sensors::FILTER_BUFFER_SIZE;
use crate::constants::time::US_PER_MS;
use crate::diagnostics::{Diagnostics, FaultKind};
use crate::errors::{AcquisitionError, AcquisitionResult, CalibrationError, CalibrationResult};
use crate::history::{HistoryRecord, HistorySink, SaveError};
use crate::schedule::CalibrationSchedule;
use crate::snapshot::SensorSnapshot;
use crate::time::{elapsed_ms, TimeSource, Timestamp};

/// Filter type used for every channel
pub type ChannelFilter = MovingAverage<FILTER_BUFFER_SIZE>;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// `init()` has not run
    Uninitialized,
    /// The converter refused its configuration; retried on due polls
    HardwareUnavailable,
    /// Configured, warmed up and pre-filled
    Ready,
}

/// Sensor acquisition and calibration for one analyzer
pub struct AcquisitionEngine<A: AdcSampler, T: TimeSource> {
    sampler: A,
    clock: T,
    config: AcquisitionConfig,
    filters: ChannelMap<ChannelFilter>,
    calibration: CalibrationTable,
    schedule: CalibrationSchedule,
    diagnostics: Diagnostics,
    snapshot: SensorSnapshot,
    last_sample: Option<Timestamp>,
    state: EngineState,
    // Filters hold at least one real cycle
    primed: bool,
}

impl<A: AdcSampler, T: TimeSource> AcquisitionEngine<A, T> {
    /// Create an engine; nothing touches the hardware until `init()`
    pub fn new(sampler: A, clock: T, config: AcquisitionConfig) -> Self {
        Self {
            sampler,
            clock,
            config,
            filters: ChannelMap::from_fn(|_| ChannelFilter::new()),
            calibration: CalibrationTable::new(),
            schedule: CalibrationSchedule::default(),
            diagnostics: Diagnostics::new(),
            snapshot: SensorSnapshot::INVALID,
            last_sample: None,
            state: EngineState::Uninitialized,
            primed: false,
        }
    }

    /// Configure the converter, warm it up and pre-fill every filter
    ///
    /// Never fatal: if the hardware is unavailable the engine keeps
    /// reporting `is_valid == false` and retries on later polls. The
    /// returned error is informational.
    pub fn init(&mut self) -> AcquisitionResult<()> {
        let result = self.bring_up();
        match result {
            Ok(()) => log_info!("Sensor acquisition initialized: {}", self.snapshot),
            Err(err) => log_warn!("Sensor acquisition degraded: {}", err),
        }
        result
    }

    /// Current snapshot, sampling first if the read interval has elapsed
    ///
    /// `force` bypasses the rate limit. Hardware problems never surface as
    /// errors here; they show up as `is_valid == false` and in
    /// [`Self::diagnostics`].
    pub fn get_readings(&mut self, force: bool) -> SensorSnapshot {
        let now = self.clock.now();
        if !force && !self.is_due(now) {
            return self.snapshot;
        }

        if self.state != EngineState::Ready {
            // bring_up samples and stamps on success
            if self.bring_up().is_err() {
                self.last_sample = Some(now);
            } else {
                log_info!("Sampling hardware recovered");
            }
            return self.snapshot;
        }

        self.acquire_cycle();
        self.last_sample = Some(now);
        self.snapshot
    }

    /// Calibrate `channel` against a reference of `known_value`
    ///
    /// Takes one fresh sample, converts it without any factor and sets
    /// `factor = known_value / reading`. The previous factor is kept on any
    /// error, including a failed or above-full-scale sample, which is also
    /// counted in [`Self::diagnostics`]. Values already in the filter window
    /// are not rescaled.
    pub fn calibrate(
        &mut self,
        channel: Channel,
        known_value: f32,
    ) -> CalibrationResult<CalibrationOutcome> {
        let result = self.try_calibrate(channel, known_value);
        match &result {
            Ok(outcome) => {
                self.schedule.record(channel, self.clock.now());
                log_debug!(
                    "{} factor {:.3} -> {:.3}",
                    channel.label(),
                    outcome.previous_factor,
                    outcome.factor
                );
            }
            Err(err) => log_warn!("{} calibration rejected: {}", channel.label(), err),
        }
        result
    }

    fn try_calibrate(
        &mut self,
        channel: Channel,
        known_value: f32,
    ) -> CalibrationResult<CalibrationOutcome> {
        let domain = self.config.ranges[channel];
        CalibrationTable::check_reference(known_value, domain)?;

        if self.state != EngineState::Ready {
            return Err(CalibrationError::Hardware(AcquisitionError::HardwareUnavailable {
                reason: "engine not initialized",
            }));
        }

        let raw = self.sample(channel)?;
        let reading = self.config.conversions[channel].convert_raw(raw);

        self.calibration.calibrate_from_reading(channel, known_value, reading, domain)
    }

    /// Return every channel to factor 1.0 and forget calibration dates
    pub fn reset_calibration(&mut self) {
        self.calibration.reset();
        self.schedule.clear();
    }

    /// Re-apply checkpointed factors; rejected as a whole if any is invalid
    pub fn restore_factors(&mut self, factors: ChannelMap<f32>) -> CalibrationResult<()> {
        self.calibration.restore(factors)
    }

    /// Convert a raw count with the channel's conversion and current factor
    ///
    /// Pure with respect to engine state other than the factor: no filter,
    /// no clamping, no hardware access.
    pub fn convert(&self, channel: Channel, raw: u16) -> f32 {
        let value = self.config.conversions[channel].convert_raw(raw);
        self.calibration.apply(channel, value)
    }

    /// Hand the current snapshot to `sink`, stamped with the engine clock
    pub fn save_reading<S: HistorySink>(
        &self,
        sink: &mut S,
    ) -> Result<HistoryRecord, SaveError<S::Error>> {
        self.save_reading_at(sink, self.clock.now())
    }

    /// Hand the current snapshot to `sink` with a caller-supplied timestamp
    pub fn save_reading_at<S: HistorySink>(
        &self,
        sink: &mut S,
        timestamp: Timestamp,
    ) -> Result<HistoryRecord, SaveError<S::Error>> {
        let record = HistoryRecord::from_snapshot(&self.snapshot, timestamp)
            .ok_or(AcquisitionError::NotValid)?;
        sink.record(record).map_err(SaveError::Sink)?;
        Ok(record)
    }

    /// Cached snapshot without sampling
    pub fn snapshot(&self) -> SensorSnapshot {
        self.snapshot
    }

    /// Lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Calibration factors
    pub fn calibration(&self) -> &CalibrationTable {
        &self.calibration
    }

    /// Calibration reminders
    pub fn schedule(&self) -> &CalibrationSchedule {
        &self.schedule
    }

    /// Calibration reminders, e.g. to restore persisted dates
    pub fn schedule_mut(&mut self) -> &mut CalibrationSchedule {
        &mut self.schedule
    }

    /// Whether any tracked channel is due for calibration now
    pub fn calibration_due(&self) -> bool {
        self.schedule.any_due(self.clock.now())
    }

    /// Read fault counters
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Filter window of one channel
    pub fn filter(&self, channel: Channel) -> &ChannelFilter {
        &self.filters[channel]
    }

    /// Active configuration
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Timestamp of the last acquisition cycle or hardware retry
    pub fn last_sample(&self) -> Option<Timestamp> {
        self.last_sample
    }

    /// Clock the engine reads
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Underlying sampler
    pub fn sampler(&self) -> &A {
        &self.sampler
    }

    /// Underlying sampler, mutable
    pub fn sampler_mut(&mut self) -> &mut A {
        &mut self.sampler
    }

    /// Give the sampler and clock back
    pub fn into_parts(self) -> (A, T) {
        (self.sampler, self.clock)
    }

    fn is_due(&self, now: Timestamp) -> bool {
        match self.last_sample {
            None => true,
            Some(last) => elapsed_ms(last, now) >= self.config.read_interval.to_millis(),
        }
    }

    fn bring_up(&mut self) -> AcquisitionResult<()> {
        if self.sampler.configure(&self.config.adc).is_err() {
            self.state = EngineState::HardwareUnavailable;
            return Err(AcquisitionError::HardwareUnavailable {
                reason: "ADC configuration rejected",
            });
        }

        // Throwaway reads until the sample-and-hold settles
        for _ in 0..self.config.warmup_reads {
            for channel in Channel::ALL {
                let pin = self.config.pins[channel];
                let _ = read_blocking(&mut self.sampler, pin, self.config.max_poll_attempts);
            }
            self.sampler.settle_us(self.config.warmup_settle_us);
        }

        let settle_us = self.config.prefill_settle_ms.saturating_mul(US_PER_MS);
        let mut acquired = false;
        for round in 0..FILTER_BUFFER_SIZE {
            acquired |= self.acquire_cycle();
            if round + 1 < FILTER_BUFFER_SIZE {
                self.sampler.settle_us(settle_us);
            }
        }

        if !acquired {
            self.state = EngineState::HardwareUnavailable;
            return Err(AcquisitionError::HardwareUnavailable {
                reason: "no channel responded during pre-fill",
            });
        }

        self.state = EngineState::Ready;
        self.last_sample = Some(self.clock.now());
        Ok(())
    }

    /// One read with range check and fault accounting
    fn sample(&mut self, channel: Channel) -> AcquisitionResult<u16> {
        let pin = self.config.pins[channel];
        let result = match read_blocking(&mut self.sampler, pin, self.config.max_poll_attempts) {
            Ok(raw) if raw > ADC_MAX_RAW => Err(AcquisitionError::OutOfRange { pin, raw }),
            other => other,
        };

        match result {
            Ok(_) => self.diagnostics.record_clean(channel),
            Err(err) => {
                log_warn!("{} read fault: {}", channel.label(), err);
                self.diagnostics.record_fault(channel, FaultKind::from(err));
            }
        }
        result
    }

    /// One full cycle; returns false if the cycle was discarded
    fn acquire_cycle(&mut self) -> bool {
        let mut raw = ChannelMap::splat(0u16);
        let mut failed = 0;

        for channel in Channel::ALL {
            match self.sample(channel) {
                Ok(value) => raw[channel] = value,
                Err(AcquisitionError::OutOfRange { .. }) => raw[channel] = ADC_MAX_RAW,
                Err(_) => failed += 1,
            }
        }

        if failed == Channel::COUNT {
            log_warn!("All channels failed; acquisition cycle discarded");
            self.diagnostics.record_failed_cycle();
            return false;
        }

        let config = &self.config;
        let calibration = &self.calibration;
        let filters = &mut self.filters;
        let primed = self.primed;
        let values = ChannelMap::from_fn(|channel| {
            let converted = config.conversions[channel].convert_raw(raw[channel]);
            let value = calibration.apply(channel, converted);
            let filtered = if primed {
                filters[channel].push(value)
            } else {
                filters[channel].fill(value);
                value
            };
            config.ranges[channel].clamp(filtered)
        });
        self.primed = true;

        let snapshot = SensorSnapshot::from_channels(
            values[Channel::O2],
            values[Channel::He],
            values[Channel::Co2],
            values[Channel::Co],
        );

        if !self.snapshot.is_valid || snapshot.differs_significantly(&self.snapshot) {
            log_debug!("{}", snapshot);
        }
        self.snapshot = snapshot;
        true
    }
}

impl<A, T> core::fmt::Debug for AcquisitionEngine<A, T>
where
    A: AdcSampler,
    T: TimeSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AcquisitionEngine")
            .field("state", &self.state)
            .field("snapshot", &self.snapshot)
            .field("last_sample", &self.last_sample)
            .field("calibration", &self.calibration)
            .finish_non_exhaustive()
    }
}
