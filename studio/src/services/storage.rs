//! Keyed puzzle storage.
//!
//! All puzzles live in a single JSON file, keyed by puzzle id. Reads fail
//! soft: a missing or unreadable file is an empty collection, so a corrupt
//! store never blocks creating new work. Writes propagate their errors.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use puzzle::model::Puzzle;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialize failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct PuzzleStorage {
    path: PathBuf,
}

impl PuzzleStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All stored puzzles. Missing or unparseable files read as empty.
    #[must_use]
    pub fn load_all(&self) -> Vec<Puzzle> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "storage: read failed");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&data) {
            Ok(puzzles) => puzzles,
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "storage: parse failed");
                Vec::new()
            }
        }
    }

    #[must_use]
    pub fn load(&self, id: &str) -> Option<Puzzle> {
        self.load_all().into_iter().find(|p| p.id == id)
    }

    /// Upsert by id.
    pub fn save(&self, puzzle: &Puzzle) -> Result<(), StorageError> {
        let mut puzzles = self.load_all();
        match puzzles.iter_mut().find(|p| p.id == puzzle.id) {
            Some(slot) => *slot = puzzle.clone(),
            None => puzzles.push(puzzle.clone()),
        }
        self.write_all(&puzzles)?;
        info!(id = %puzzle.id, count = puzzles.len(), "storage: saved puzzle");
        Ok(())
    }

    /// Remove a puzzle by id. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut puzzles = self.load_all();
        let before = puzzles.len();
        puzzles.retain(|p| p.id != id);
        if puzzles.len() != before {
            self.write_all(&puzzles)?;
            info!(%id, "storage: deleted puzzle");
        }
        Ok(())
    }

    fn write_all(&self, puzzles: &[Puzzle]) -> Result<(), StorageError> {
        let json = serde_json::to_vec(&puzzles)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
