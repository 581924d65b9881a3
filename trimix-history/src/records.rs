//! Bounded in-memory reading history
//!
//! `HistoryLog` keeps the newest [`MAX_RECORDS`] readings, oldest first, and
//! round-trips through the JSON document the instrument stores on flash:
//!
//! ```json
//! { "records": [ { "timestamp": 1700000000000, "o2": 21.0, "he": 35.0,
//!                  "n2": 44.0, "co2": 400.0, "co": 1.0 } ] }
//! ```

use std::collections::VecDeque;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use trimix_core::{HistoryRecord, HistorySink};

use crate::error::HistoryResult;

/// Records kept before the oldest is evicted
pub const MAX_RECORDS: usize = 100;

#[derive(Serialize)]
struct DocumentRef<'a> {
    records: Vec<&'a HistoryRecord>,
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    records: Vec<HistoryRecord>,
}

/// Newest-last history bounded by a fixed capacity
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// Empty log holding up to [`MAX_RECORDS`]
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECORDS)
    }

    /// Empty log holding up to `capacity` records (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { records: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append a record, evicting the oldest when full
    pub fn push(&mut self, record: HistoryRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Records from oldest to newest
    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> + '_ {
        self.records.iter()
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record is stored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Encode as a `{"records": [...]}` document
    pub fn to_json(&self) -> HistoryResult<String> {
        let doc = DocumentRef { records: self.records.iter().collect() };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Decode a `{"records": [...]}` document into a log of `capacity`
    ///
    /// Only the newest `capacity` records are kept.
    pub fn from_json_with_capacity(json: &str, capacity: usize) -> HistoryResult<Self> {
        let doc: Document = serde_json::from_str(json)?;
        let mut log = Self::with_capacity(capacity);
        let skip = doc.records.len().saturating_sub(log.capacity);
        for record in doc.records.into_iter().skip(skip) {
            log.push(record);
        }
        Ok(log)
    }

    /// Decode a `{"records": [...]}` document, keeping the newest [`MAX_RECORDS`]
    pub fn from_json(json: &str) -> HistoryResult<Self> {
        Self::from_json_with_capacity(json, MAX_RECORDS)
    }
}

impl HistorySink for HistoryLog {
    type Error = Infallible;

    fn record(&mut self, record: HistoryRecord) -> Result<(), Infallible> {
        self.push(record);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryRecord;
    type IntoIter = std::collections::vec_deque::Iter<'a, HistoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
