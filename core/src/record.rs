use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Seconds;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record file could not be accessed: {0}")]
    Io(#[from] io::Error),
    #[error("record file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store holding the best time of each level.
pub trait RecordStore {
    fn get(&self, key: &str) -> Result<Option<Seconds>, StoreError>;
    fn set(&mut self, key: &str, secs: Seconds) -> Result<(), StoreError>;
}

/// Storage key of a level's best time.
pub fn record_key(level_id: &str) -> String {
    format!("record_{level_id}")
}

impl<R: RecordStore + ?Sized> RecordStore for Box<R> {
    fn get(&self, key: &str) -> Result<Option<Seconds>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, secs: Seconds) -> Result<(), StoreError> {
        (**self).set(key, secs)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryRecordStore {
    records: HashMap<String, Seconds>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, key: &str) -> Result<Option<Seconds>, StoreError> {
        Ok(self.records.get(key).copied())
    }

    fn set(&mut self, key: &str, secs: Seconds) -> Result<(), StoreError> {
        self.records.insert(key.to_owned(), secs);
        Ok(())
    }
}

/// Records kept as one JSON object on disk, rewritten on every update. A missing file reads as empty.
#[derive(Clone, Debug)]
pub struct JsonFileRecordStore {
    path: PathBuf,
}

impl JsonFileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, Seconds>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl RecordStore for JsonFileRecordStore {
    fn get(&self, key: &str) -> Result<Option<Seconds>, StoreError> {
        Ok(self.load()?.get(key).copied())
    }

    fn set(&mut self, key: &str, secs: Seconds) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.insert(key.to_owned(), secs);
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }
}
