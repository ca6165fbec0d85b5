//! High-score persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access high score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed high score file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Somewhere the best score survives between runs.
pub trait HighScoreStore {
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    high_score: u32,
}

/// `{"high_score": N}` in a JSON file. A missing file reads as 0.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.kamikaze_furry_score.json`, or the working directory when
    /// `HOME` is unset.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".kamikaze_furry_score.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str::<Record>(&text)
            .map(|r| r.high_score)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let text = serde_json::to_string(&Record { high_score: score }).map_err(|source| {
            StoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}

/// Keeps the best score in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub high_score: u32,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.high_score = score;
        Ok(())
    }
}
