//! Reading history for the Trimix Analyzer
//!
//! The acquisition core hands completed readings to a
//! [`trimix_core::HistorySink`]; this crate provides the two sinks the
//! instrument uses:
//!
//! - [`HistoryLog`]: the newest 100 readings in memory, with JSON
//!   encode/decode
//! - [`HistoryFile`]: the same document on disk, with a `.bak` copy taken
//!   before every save and restored if the write fails
//!
//! ```no_run
//! use trimix_core::adc::mock::ScriptedAdc;
//! use trimix_core::time::MonotonicTime;
//! use trimix_core::{AcquisitionConfig, AcquisitionEngine};
//! use trimix_history::{HistoryFile, RecordTimestamp};
//!
//! let mut engine = AcquisitionEngine::new(
//!     ScriptedAdc::with_level(2048),
//!     MonotonicTime::new(),
//!     AcquisitionConfig::default(),
//! );
//! let _ = engine.init();
//!
//! let mut file = HistoryFile::new("/data/history.json");
//! let record = engine.save_reading_at(&mut file, 1_700_000_000_000)?;
//! println!("{} {} O2 {:.1}%", record.date().unwrap_or_default(), record.time().unwrap_or_default(), record.o2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod file;
pub mod records;
pub mod timestamps;

pub use error::{HistoryError, HistoryResult};
pub use file::HistoryFile;
pub use records::{HistoryLog, MAX_RECORDS};
pub use timestamps::{date_string, time_string, RecordTimestamp};
