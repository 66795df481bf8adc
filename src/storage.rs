use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::TaskCollection;

/// Outcome of reading a JSON file that may legitimately be absent.
#[derive(Debug, PartialEq)]
pub enum Snapshot<T> {
    Loaded(T),
    Missing,
    Corrupt(String),
}

impl<T: Default> Snapshot<T> {
    pub fn into_inner(self) -> T {
        match self {
            Snapshot::Loaded(value) => value,
            Snapshot::Missing | Snapshot::Corrupt(_) => T::default(),
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Snapshot<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Snapshot::Missing,
        Err(e) => return Snapshot::Corrupt(e.to_string()),
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Snapshot::Loaded(value),
        Err(e) => Snapshot::Corrupt(e.to_string()),
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| Error::persistence(path, std::io::Error::other(e)))?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)
}

/// Writes through a sibling temp file and renames it over `path`, so a crash
/// mid-write never leaves a truncated file behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    let temp_path = path.with_file_name(format!(".{file_name}.tmp.{}", Uuid::new_v4()));

    let result = (|| -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::persistence(path, e));
    }
    debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

pub fn read_text(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(Error::persistence(path, e)),
    }
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes())
}

pub fn load_snapshot(path: &Path) -> Snapshot<TaskCollection> {
    match read_json::<TaskCollection>(path) {
        Snapshot::Loaded(mut collection) => {
            collection.normalize();
            Snapshot::Loaded(collection)
        }
        other => other,
    }
}

/// Never fails: a missing or unreadable snapshot yields an empty collection.
pub fn load_tasks(path: &Path) -> TaskCollection {
    match load_snapshot(path) {
        Snapshot::Loaded(collection) => collection,
        Snapshot::Missing => {
            debug!(path = %path.display(), "no task snapshot, starting empty");
            TaskCollection::default()
        }
        Snapshot::Corrupt(reason) => {
            warn!(path = %path.display(), %reason, "task snapshot unreadable, starting empty");
            TaskCollection::default()
        }
    }
}

pub fn save_tasks(path: &Path, collection: &TaskCollection) -> Result<()> {
    write_json(path, collection)
}
