use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage directory missing or not writable: {0}")]
    StorageDir(String),
    #[error("invalid slot name {0:?}")]
    InvalidSlot(String),
    #[error("slot content could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the storage directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::StorageDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::StorageDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::StorageDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Named string slots in durable local storage.
///
/// A slot is read once at startup and overwritten as a whole afterwards.
pub trait SlotStore {
    /// Returns `None` when the slot was never written.
    fn read_slot(&self, slot: &str) -> Result<Option<String>, PersistError>;
    fn write_slot(&self, slot: &str, content: &str) -> Result<(), PersistError>;
}

/// Slot store keeping each slot in `{dir}/{slot}.json`.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
    writer: AtomicFileWriter,
}

impl FileSlotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.clone()),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: &str) -> Result<PathBuf, PersistError> {
        Ok(self.dir.join(slot_filename(slot)?))
    }
}

impl SlotStore for FileSlotStore {
    fn read_slot(&self, slot: &str) -> Result<Option<String>, PersistError> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_slot(&self, slot: &str, content: &str) -> Result<(), PersistError> {
        self.writer.write(&slot_filename(slot)?, content)?;
        Ok(())
    }
}

fn slot_filename(slot: &str) -> Result<String, PersistError> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(PersistError::InvalidSlot(slot.to_string()));
    }
    Ok(format!("{slot}.json"))
}
