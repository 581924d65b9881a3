//! Integration tests for field calibration
//!
//! Covers the single-point factor computation against fresh samples,
//! rejection paths, reset and restore, and the reminder schedule the
//! engine maintains alongside the factors.

mod common;

use trimix_core::adc::mock::MockRead;
use trimix_core::constants::MS_PER_DAY;
use trimix_core::time::MockTimeSource;
use trimix_core::{
    AcquisitionError, CalibrationError, CalibrationState, Channel, ChannelMap, Conversion,
    ReminderStatus, TimeSource,
};

use common::scenarios::AIR;
use common::{assert_close, engine_with, force_cycles, pin, ready_engine};

#[test]
fn test_factor_is_known_over_uncalibrated_reading() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(1300, &clock);

    let outcome = engine.calibrate(Channel::O2, 20.9).unwrap();
    let reading = Conversion::default_for(Channel::O2).convert_raw(1300);

    assert_eq!(outcome.channel, Channel::O2);
    assert_eq!(outcome.reading, reading);
    assert_eq!(outcome.factor, 20.9 / reading);
    assert_eq!(engine.calibration().state(Channel::O2), CalibrationState::Calibrated(outcome.factor));
}

#[test]
fn test_recalibration_uses_uncalibrated_reading() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(1300, &clock);

    let first = engine.calibrate(Channel::He, 30.0).unwrap();
    let second = engine.calibrate(Channel::He, 33.0).unwrap();

    // Both derived from the raw response, not from the scaled output
    assert_eq!(first.reading, second.reading);
    assert_eq!(second.previous_factor, first.factor);
    assert_close(second.factor, 33.0 / first.reading, 1e-6);
}

#[test]
fn test_new_factor_blends_into_filter() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(1300, &clock);
    let uncalibrated = engine.snapshot().o2_pct;

    engine.calibrate(Channel::O2, 20.9).unwrap();

    // Four old-scale samples and one new-scale sample
    let blended = engine.get_readings(true).o2_pct;
    assert_close(blended, (4.0 * uncalibrated + 20.9) / 5.0, 1e-3);

    let settled = force_cycles(&mut engine, 4);
    assert_close(settled.o2_pct, 20.9, 1e-3);
}

#[test]
fn test_zero_reading_leaves_factor_unchanged() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(0, &clock);
    let before = engine.convert(Channel::O2, 2048);

    let err = engine.calibrate(Channel::O2, 20.9).unwrap_err();
    assert_eq!(err, CalibrationError::NonPositiveReading { reading: 0.0 });
    assert_eq!(engine.calibration().state(Channel::O2), CalibrationState::Uncalibrated);
    assert_eq!(engine.convert(Channel::O2, 2048), before);
    assert_eq!(engine.schedule().last_calibrated(Channel::O2), None);
}

#[test]
fn test_reference_outside_domain_is_rejected_without_sampling() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(2048, &clock);
    let reads = engine.sampler().completed_reads();

    let err = engine.calibrate(Channel::He, 101.0).unwrap_err();
    assert_eq!(err, CalibrationError::ReferenceOutOfRange { value: 101.0, min: 0.0, max: 100.0 });
    assert!(engine.calibrate(Channel::O2, f32::NAN).is_err());
    assert_eq!(engine.sampler().completed_reads(), reads);
}

#[test]
fn test_zero_reference_is_an_invalid_factor() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(2048, &clock);

    let err = engine.calibrate(Channel::He, 0.0).unwrap_err();
    assert_eq!(err, CalibrationError::InvalidFactor { factor: 0.0 });
    assert_eq!(engine.calibration().factor(Channel::He), 1.0);
}

#[test]
fn test_failed_sample_is_a_hardware_error() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(2048, &clock);

    engine.sampler_mut().script(pin(Channel::He), MockRead::Fail);
    let err = engine.calibrate(Channel::He, 35.0).unwrap_err();
    assert_eq!(err, CalibrationError::Hardware(AcquisitionError::ReadFailed { pin: pin(Channel::He) }));
    assert_eq!(engine.calibration().factor(Channel::He), 1.0);
}

#[test]
fn test_reset_reproduces_uncalibrated_conversion() {
    let clock = MockTimeSource::new(0);
    let mut engine = engine_with(AIR.adc(), &clock);
    engine.init().unwrap();

    let before: Vec<f32> = (0..=4095).step_by(97).map(|raw| engine.convert(Channel::O2, raw)).collect();

    engine.calibrate(Channel::O2, 21.5).unwrap();
    assert_ne!(
        engine.convert(Channel::O2, 2048),
        Conversion::default_for(Channel::O2).convert_raw(2048)
    );
    engine.reset_calibration();

    let after: Vec<f32> = (0..=4095).step_by(97).map(|raw| engine.convert(Channel::O2, raw)).collect();
    assert_eq!(before, after);
    for channel in Channel::ALL {
        assert_eq!(engine.calibration().state(channel), CalibrationState::Uncalibrated);
    }
}

#[test]
fn test_ppm_channels_are_calibratable() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(2048, &clock);

    let outcome = engine.calibrate(Channel::Co2, 400.0).unwrap();
    assert_close(outcome.reading, 660.16, 0.05);
    assert!(matches!(engine.calibration().state(Channel::Co2), CalibrationState::Calibrated(_)));

    let err = engine.calibrate(Channel::Co, 1500.0).unwrap_err();
    assert!(matches!(err, CalibrationError::ReferenceOutOfRange { max, .. } if max == 1000.0));
}

#[test]
fn test_restore_factors() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(2048, &clock);

    engine.restore_factors(ChannelMap::new([1.05, 0.98, 1.0, 1.0])).unwrap();
    assert_eq!(engine.calibration().state(Channel::O2), CalibrationState::Calibrated(1.05));
    assert_close(engine.convert(Channel::He, 4095), 98.0, 1e-4);

    let err = engine.restore_factors(ChannelMap::new([1.0, f32::INFINITY, 1.0, 1.0])).unwrap_err();
    assert!(matches!(err, CalibrationError::InvalidFactor { .. }));
    assert_eq!(engine.calibration().factor(Channel::He), 0.98);
}

#[test]
fn test_reminders_follow_calibrations() {
    let clock = MockTimeSource::new(0);
    let mut engine = ready_engine(1300, &clock);
    assert!(engine.calibration_due());

    engine.calibrate(Channel::O2, 20.9).unwrap();
    engine.calibrate(Channel::He, 30.0).unwrap();
    assert!(!engine.calibration_due());

    clock.set(29 * MS_PER_DAY);
    assert!(!engine.calibration_due());
    assert_eq!(
        engine.schedule().status(Channel::O2, clock.now()),
        ReminderStatus::Current { due_in_days: 1 }
    );

    clock.set(32 * MS_PER_DAY);
    assert!(engine.calibration_due());
    assert_eq!(
        engine.schedule().status(Channel::He, clock.now()),
        ReminderStatus::Due { days_overdue: 2 }
    );

    engine.schedule_mut().set_enabled(false);
    assert!(!engine.calibration_due());

    engine.reset_calibration();
    assert_eq!(engine.schedule().status(Channel::O2, 0), ReminderStatus::NeverCalibrated);
}
