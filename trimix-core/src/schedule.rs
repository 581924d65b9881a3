//! Calibration reminders
//!
//! Electrochemical O2 cells and He sensors drift, so the instrument nags
//! the operator once a channel has gone `interval_days` without a field
//! calibration. Timestamps come from the same monotonic millisecond clock
//! as rate limiting; the host persists them if reminders must survive a
//! reboot.
//!
//! ```rust
//! use trimix_core::schedule::{CalibrationSchedule, ReminderStatus};
//! use trimix_core::constants::MS_PER_DAY;
//! use trimix_core::Channel;
//!
//! let mut schedule = CalibrationSchedule::new(30);
//! schedule.record(Channel::O2, 0);
//!
//! assert_eq!(
//!     schedule.status(Channel::O2, 32 * MS_PER_DAY),
//!     ReminderStatus::Due { days_overdue: 2 }
//! );
//! ```

use crate::channel::{Channel, ChannelMap};
use crate::constants::time::{DEFAULT_CALIBRATION_INTERVAL_DAYS, MS_PER_DAY};
use crate::time::{elapsed_ms, Timestamp};

/// Where a channel stands relative to its calibration interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderStatus {
    /// No calibration on record
    NeverCalibrated,
    /// Calibrated recently enough
    Current {
        /// Whole days until the next calibration is due
        due_in_days: u32,
    },
    /// Interval elapsed
    Due {
        /// Whole days past the interval (0 on the day it falls due)
        days_overdue: u32,
    },
}

impl ReminderStatus {
    /// Whether the operator should be reminded
    pub fn is_due(&self) -> bool {
        !matches!(self, ReminderStatus::Current { .. })
    }
}

/// Last-calibration timestamps and the reminder interval
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationSchedule {
    last_calibrated: ChannelMap<Option<Timestamp>>,
    tracked: ChannelMap<bool>,
    interval_days: u32,
    enabled: bool,
}

impl Default for CalibrationSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_CALIBRATION_INTERVAL_DAYS)
    }
}

impl CalibrationSchedule {
    /// Remind every `interval_days` for O2 and He
    pub fn new(interval_days: u32) -> Self {
        Self {
            last_calibrated: ChannelMap::splat(None),
            tracked: ChannelMap::new([true, true, false, false]),
            interval_days: interval_days.max(1),
            enabled: true,
        }
    }

    /// Reminder interval in days
    pub fn interval_days(&self) -> u32 {
        self.interval_days
    }

    /// Change the reminder interval
    pub fn set_interval_days(&mut self, days: u32) {
        self.interval_days = days.max(1);
    }

    /// Turn reminders on or off
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether reminders are on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Include or exclude a channel from `any_due`
    pub fn track(&mut self, channel: Channel, tracked: bool) {
        self.tracked[channel] = tracked;
    }

    /// Note a successful calibration at `now`
    pub fn record(&mut self, channel: Channel, now: Timestamp) {
        self.last_calibrated[channel] = Some(now);
    }

    /// Forget every calibration timestamp
    pub fn clear(&mut self) {
        self.last_calibrated = ChannelMap::splat(None);
    }

    /// Timestamp of the last calibration
    pub fn last_calibrated(&self, channel: Channel) -> Option<Timestamp> {
        self.last_calibrated[channel]
    }

    /// Timestamp at which the next calibration falls due
    pub fn next_due(&self, channel: Channel) -> Option<Timestamp> {
        self.last_calibrated[channel]
            .map(|last| last.saturating_add(u64::from(self.interval_days) * MS_PER_DAY))
    }

    /// Status of one channel at `now`
    pub fn status(&self, channel: Channel, now: Timestamp) -> ReminderStatus {
        let Some(last) = self.last_calibrated[channel] else {
            return ReminderStatus::NeverCalibrated;
        };

        let elapsed_days = (elapsed_ms(last, now) / MS_PER_DAY).min(u64::from(u32::MAX)) as u32;
        if elapsed_days >= self.interval_days {
            ReminderStatus::Due { days_overdue: elapsed_days - self.interval_days }
        } else {
            ReminderStatus::Current { due_in_days: self.interval_days - elapsed_days }
        }
    }

    /// Whether any tracked channel needs a reminder
    pub fn any_due(&self, now: Timestamp) -> bool {
        self.enabled
            && Channel::ALL
                .iter()
                .filter(|c| self.tracked[**c])
                .any(|c| self.status(*c, now).is_due())
    }

    /// Whether any tracked, previously calibrated channel is past its interval
    /// by at least one full day
    pub fn any_overdue(&self, now: Timestamp) -> bool {
        self.enabled
            && Channel::ALL.iter().filter(|c| self.tracked[**c]).any(|c| {
                matches!(self.status(*c, now), ReminderStatus::Due { days_overdue } if days_overdue > 0)
            })
    }
}
