use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::Result;
use crate::storage::file::{DocumentLock, read_json, write_json_atomic};

/// Small key-value store of named integers.
///
/// Backed by one JSON object on disk, or by memory only when created with
/// [`Preferences::in_memory`]. The file may be shared by several processes:
/// reads pick up the latest committed document and updates run under an
/// exclusive lock on it.
#[derive(Debug)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: Mutex<BTreeMap<String, i64>>,
}

impl Preferences {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = read_json(&path)?.unwrap_or_default();
        debug!("Opened preferences at {:?}", path);
        Ok(Self {
            path: Some(path),
            values: Mutex::new(values),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Mutex::new(BTreeMap::new()),
        }
    }

    /// Latest value of `key`. Falls back to the last value this handle saw
    /// if the file cannot be read.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        let mut values = self.lock();
        if let Some(path) = &self.path {
            match read_json(path) {
                Ok(latest) => *values = latest.unwrap_or_default(),
                Err(e) => warn!("Failed to refresh preferences {:?}: {}", path, e),
            }
        }
        values.get(key).copied()
    }

    pub fn set_int(&self, key: &str, value: i64) -> Result<()> {
        self.update_int(key, |_| Some(value)).map(|_| ())
    }

    /// Read-modify-write one key under the store lock.
    ///
    /// `f` receives the current value and returns the value to store, or
    /// `None` to leave the key untouched. Returns the value stored afterwards.
    pub fn update_int<F>(&self, key: &str, f: F) -> Result<Option<i64>>
    where
        F: FnOnce(Option<i64>) -> Option<i64>,
    {
        let mut values = self.lock();
        let _document = match &self.path {
            Some(path) => {
                let lock = DocumentLock::acquire(path)?;
                *values = read_json(path)?.unwrap_or_default();
                Some(lock)
            }
            None => None,
        };

        let current = values.get(key).copied();
        let Some(next) = f(current) else {
            return Ok(current);
        };
        if current == Some(next) {
            return Ok(current);
        }

        let mut staged = values.clone();
        staged.insert(key.to_string(), next);
        if let Some(path) = &self.path {
            write_json_atomic(path, &staged)?;
        }
        *values = staged;
        Ok(Some(next))
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, i64>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
