//! Read fault counters
//!
//! The engine never stops on a bad read: a failed or timed-out sample is
//! replaced by raw 0 and an out-of-range count is clamped to full scale.
//! These counters make that silent fallback visible so the host can
//! escalate (e.g. flag a sensor as faulty) without changing the fail-open
//! policy.

use crate::channel::{Channel, ChannelMap};
use crate::errors::AcquisitionError;

/// Why a sample was not taken at face value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The driver returned an error
    ReadFailed,
    /// The conversion never completed within the poll budget
    Timeout,
    /// The raw count exceeded the converter range and was clamped
    OutOfRange,
}

impl From<AcquisitionError> for FaultKind {
    fn from(err: AcquisitionError) -> Self {
        match err {
            AcquisitionError::Timeout { .. } => FaultKind::Timeout,
            AcquisitionError::OutOfRange { .. } => FaultKind::OutOfRange,
            _ => FaultKind::ReadFailed,
        }
    }
}

/// Fault counters for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelDiagnostics {
    /// Faults since the last clean read
    pub consecutive_faults: u32,
    /// Faults since start-up
    pub total_faults: u32,
    /// Most recent fault, if any
    pub last_fault: Option<FaultKind>,
}

impl ChannelDiagnostics {
    fn record_fault(&mut self, kind: FaultKind) {
        self.consecutive_faults = self.consecutive_faults.saturating_add(1);
        self.total_faults = self.total_faults.saturating_add(1);
        self.last_fault = Some(kind);
    }

    fn record_clean(&mut self) {
        self.consecutive_faults = 0;
    }
}

/// Fault counters for every channel plus whole-cycle failures
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagnostics {
    channels: ChannelMap<ChannelDiagnostics>,
    failed_cycles: u32,
}

impl Diagnostics {
    /// All counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for one channel
    pub fn channel(&self, channel: Channel) -> &ChannelDiagnostics {
        &self.channels[channel]
    }

    /// Cycles discarded because every channel faulted
    pub fn failed_cycles(&self) -> u32 {
        self.failed_cycles
    }

    /// Whether any channel has reached `limit` consecutive faults
    pub fn is_degraded(&self, limit: u32) -> bool {
        self.channels.iter().any(|(_, d)| d.consecutive_faults >= limit.max(1))
    }

    /// Record a faulted sample
    pub fn record_fault(&mut self, channel: Channel, kind: FaultKind) {
        self.channels[channel].record_fault(kind);
    }

    /// Record a clean sample
    pub fn record_clean(&mut self, channel: Channel) {
        self.channels[channel].record_clean();
    }

    /// Record a discarded cycle
    pub fn record_failed_cycle(&mut self) {
        self.failed_cycles = self.failed_cycles.saturating_add(1);
    }
}
