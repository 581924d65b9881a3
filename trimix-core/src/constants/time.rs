//! Time-Related Constants
//!
//! Sampling cadence, settling delays and calendar conversions used by the
//! acquisition engine and the calibration reminder.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Microseconds per millisecond.
pub const US_PER_MS: u32 = 1000;

/// Seconds per day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Milliseconds per day.
pub const MS_PER_DAY: u64 = MS_PER_SECOND * SECONDS_PER_DAY;

// ===== SAMPLING =====

/// Minimum spacing between two hardware acquisition cycles (milliseconds).
///
/// Polls arriving sooner get the cached snapshot.
pub const READ_INTERVAL_MS: u64 = 1000;

/// Throwaway reads per channel during `init()` to let the ADC settle.
pub const WARMUP_READS: u32 = 10;

/// Pause between warm-up read rounds (microseconds).
pub const WARMUP_SETTLE_US: u32 = 100;

/// Pause between the pre-fill acquisition cycles (milliseconds).
pub const PREFILL_SETTLE_MS: u32 = 10;

// ===== CALIBRATION REMINDERS =====

/// Days between recommended field calibrations.
pub const DEFAULT_CALIBRATION_INTERVAL_DAYS: u32 = 30;
