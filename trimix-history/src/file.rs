//! On-disk history with a backup copy
//!
//! Every save first copies the current file to `<name>.bak`, then stages the
//! new document at `<name>.tmp` and renames it over the file. If staging or
//! the rename fails the backup is copied back, so a crash or full disk never
//! leaves the history truncated. The original write error is what the
//! caller sees even when the restore fails too.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use trimix_core::{HistoryRecord, HistorySink};

use crate::error::{HistoryError, HistoryResult};
use crate::records::{HistoryLog, MAX_RECORDS};

/// Backup suffix appended to the history file name
pub const BACKUP_SUFFIX: &str = ".bak";

/// Suffix of the staging file a new document is written to
pub const TEMP_SUFFIX: &str = ".tmp";

/// History document stored at a fixed path
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
    capacity: usize,
}

impl HistoryFile {
    /// History stored at `path`, bounded to [`MAX_RECORDS`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), capacity: MAX_RECORDS }
    }

    /// Change the number of records kept
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Path of the history document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the backup copy
    pub fn backup_path(&self) -> PathBuf {
        self.with_suffix(BACKUP_SUFFIX)
    }

    /// Path a new document is staged at before it replaces the file
    pub fn temp_path(&self) -> PathBuf {
        self.with_suffix(TEMP_SUFFIX)
    }

    /// Load the stored history
    ///
    /// A missing or empty file is an empty history.
    pub fn load(&self) -> HistoryResult<HistoryLog> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("History file {} does not exist", self.path.display());
                return Ok(HistoryLog::with_capacity(self.capacity));
            }
            Err(err) => return Err(err.into()),
        };

        if json.trim().is_empty() {
            return Ok(HistoryLog::with_capacity(self.capacity));
        }

        let log = HistoryLog::from_json_with_capacity(&json, self.capacity)?;
        log::info!("Loaded {} history records", log.len());
        Ok(log)
    }

    /// Replace the stored history with `log`
    pub fn save(&self, log: &HistoryLog) -> HistoryResult<()> {
        let json = log.to_json()?;
        let backed_up = self.create_backup()?;

        match self.write_document(&json) {
            Ok(()) => {
                log::info!("Saved {} history records ({} bytes)", log.len(), json.len());
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to write history file: {}", err);
                if backed_up {
                    if let Err(restore_err) = self.restore_backup() {
                        log::error!(
                            "Failed to restore backup of {}: {}",
                            self.path.display(),
                            restore_err
                        );
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Load, append one record and save
    pub fn append(&self, record: HistoryRecord) -> HistoryResult<()> {
        let mut log = self.load()?;
        log.push(record);
        self.save(&log)
    }

    /// Delete the stored history; succeeds if there is none
    pub fn clear(&self) -> HistoryResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("History cleared");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Copy the stored history to `destination`
    pub fn export_to(&self, destination: impl AsRef<Path>) -> HistoryResult<()> {
        if !self.path.exists() {
            return Err(HistoryError::NotFound(self.path.clone()));
        }
        fs::copy(&self.path, destination.as_ref())?;
        log::info!("Exported history to {}", destination.as_ref().display());
        Ok(())
    }

    /// Replace the stored history with the document at `source`
    ///
    /// The document is parsed before anything is overwritten, and the
    /// current file is backed up first. Returns the imported log.
    pub fn import_from(&self, source: impl AsRef<Path>) -> HistoryResult<HistoryLog> {
        let source = source.as_ref();
        let json = match fs::read_to_string(source) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(HistoryError::NotFound(source.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };

        let log = HistoryLog::from_json_with_capacity(&json, self.capacity)?;
        self.save(&log)?;
        log::info!("Imported history from {}", source.display());
        Ok(log)
    }

    /// Copy the current file to the backup path; false if there was nothing to copy
    fn create_backup(&self) -> HistoryResult<bool> {
        match fs::copy(&self.path, self.backup_path()) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn restore_backup(&self) -> std::io::Result<()> {
        fs::copy(self.backup_path(), &self.path)?;
        log::info!("Restored backup of {}", self.path.display());
        Ok(())
    }

    fn write_document(&self, json: &str) -> std::io::Result<()> {
        let temp = self.temp_path();
        fs::write(&temp, json.as_bytes())?;
        fs::rename(&temp, &self.path)
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }
}

impl HistorySink for HistoryFile {
    type Error = HistoryError;

    fn record(&mut self, record: HistoryRecord) -> Result<(), HistoryError> {
        self.append(record)
    }
}
