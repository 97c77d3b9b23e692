use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::model::scores::RadarScore;

pub mod prune;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("radar store format not supported in {0}: expected a JSON object")]
    NotAnObject(PathBuf),
}

/// `radar_scores.json`: username to radar array.
///
/// Entries are kept as raw JSON so a store written by another tool (or an
/// older run) round-trips untouched through pruning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarStore {
    entries: BTreeMap<String, Value>,
}

/// Answer served for a single user, scored or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarLookup {
    pub username: String,
    pub radar: Value,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RadarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            _ => Err(StoreError::NotAnObject(path.to_path_buf())),
        }
    }

    /// A store that was never written reads as empty.
    pub fn load_or_empty(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        Self::load(path)
    }

    /// Overwrites the whole file.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
        serde_json::to_writer_pretty(&mut w, &self.entries).map_err(|source| {
            StoreError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        w.write_all(b"\n").map_err(io_err)?;
        w.flush().map_err(io_err)?;
        Ok(())
    }

    pub fn insert(&mut self, username: &str, radar: &RadarScore) {
        self.entries
            .insert(username.to_string(), Value::from(radar.to_vec()));
    }

    pub fn remove(&mut self, username: &str) -> Option<Value> {
        self.entries.remove(username)
    }

    pub fn get(&self, username: &str) -> Option<&Value> {
        self.entries.get(username)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, username: &str, unscored: &RadarScore) -> RadarLookup {
        match self.entries.get(username) {
            Some(radar) => RadarLookup {
                username: username.to_string(),
                radar: radar.clone(),
                found: true,
                message: None,
            },
            None => RadarLookup {
                username: username.to_string(),
                radar: Value::from(unscored.to_vec()),
                found: false,
                message: Some("User data not calculated yet".to_string()),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/tests.rs"]
mod tests;
