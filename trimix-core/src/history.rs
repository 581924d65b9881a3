//! Reading history
//!
//! A valid snapshot can be stamped with a timestamp and handed to any
//! [`HistorySink`]. The acquisition core never persists anything itself;
//! the `trimix-history` crate provides the bounded log and file storage.

use crate::errors::AcquisitionError;
use crate::snapshot::SensorSnapshot;
use crate::time::Timestamp;

/// One saved reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryRecord {
    /// When the reading was saved (ms)
    pub timestamp: Timestamp,
    /// Oxygen (%)
    pub o2: f32,
    /// Helium (%)
    pub he: f32,
    /// Nitrogen (%)
    pub n2: f32,
    /// Carbon dioxide (ppm)
    pub co2: f32,
    /// Carbon monoxide (ppm)
    pub co: f32,
}

impl HistoryRecord {
    /// Stamp a snapshot; `None` if the snapshot is not valid
    pub fn from_snapshot(snapshot: &SensorSnapshot, timestamp: Timestamp) -> Option<Self> {
        if !snapshot.is_valid {
            return None;
        }
        Some(Self {
            timestamp,
            o2: snapshot.o2_pct,
            he: snapshot.he_pct,
            n2: snapshot.n2_pct,
            co2: snapshot.co2_ppm,
            co: snapshot.co_ppm,
        })
    }
}

/// Destination for saved readings
pub trait HistorySink {
    /// Storage error
    type Error;

    /// Append one record
    fn record(&mut self, record: HistoryRecord) -> Result<(), Self::Error>;
}

impl<S: HistorySink + ?Sized> HistorySink for &mut S {
    type Error = S::Error;

    fn record(&mut self, record: HistoryRecord) -> Result<(), Self::Error> {
        (**self).record(record)
    }
}

/// Why a reading could not be saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveError<E> {
    /// No valid snapshot to save
    Acquisition(AcquisitionError),
    /// The sink refused the record
    Sink(E),
}

impl<E> From<AcquisitionError> for SaveError<E> {
    fn from(err: AcquisitionError) -> Self {
        SaveError::Acquisition(err)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for SaveError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SaveError::Acquisition(err) => write!(f, "{}", err),
            SaveError::Sink(err) => write!(f, "History sink error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: std::error::Error + 'static> std::error::Error for SaveError<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting(u32);

    impl HistorySink for Counting {
        type Error = ();

        fn record(&mut self, _record: HistoryRecord) -> Result<(), ()> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn invalid_snapshot_is_not_recorded() {
        assert_eq!(HistoryRecord::from_snapshot(&SensorSnapshot::INVALID, 5), None);

        let snap = SensorSnapshot::from_channels(21.0, 35.0, 400.0, 1.0);
        let record = HistoryRecord::from_snapshot(&snap, 5).unwrap();
        assert_eq!(record.timestamp, 5);
        assert_eq!(record.n2, 44.0);
        assert_eq!(record.co2, 400.0);
    }

    #[test]
    fn sink_through_mutable_reference() {
        let mut sink = Counting(0);
        let snap = SensorSnapshot::from_channels(32.0, 0.0, 400.0, 0.0);
        let record = HistoryRecord::from_snapshot(&snap, 1).unwrap();

        fn save<S: HistorySink>(mut sink: S, record: HistoryRecord) -> Result<(), S::Error> {
            sink.record(record)
        }

        save(&mut sink, record).unwrap();
        save(&mut sink, record).unwrap();
        assert_eq!(sink.0, 2);
    }

    #[test]
    fn save_error_from_acquisition() {
        let err: SaveError<()> = AcquisitionError::NotValid.into();
        assert_eq!(err, SaveError::Acquisition(AcquisitionError::NotValid));
    }
}
