//! Puzzle model: cells, words, and the aggregate puzzle document.
//!
//! This module defines the data types shared by the geometry engine, the
//! word extractor, and the state machine. A `Puzzle` is the aggregate root:
//! it owns the grid and the derived word list, and is the unit of
//! persistence and sharing. `Selection` is process-local UI state and is
//! never persisted.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::consts::{GRID_SIZE_MAX, GRID_SIZE_MIN};
use crate::grid::Grid;

/// A row/column coordinate into a grid. Validity depends on the owning
/// grid's dimensions; geometry functions return `None` for positions that
/// fall outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Typing/reading direction of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right along a row.
    Across,
    /// Top-to-bottom along a column.
    Down,
}

impl Direction {
    /// The other direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }

    /// Stable id prefix used in word ids (`"across-3"`, `"down-7"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Across => "across",
            Self::Down => "down",
        }
    }
}

/// A single grid square.
///
/// `value` holds zero or one glyph. A glyph may be multi-byte (composed
/// characters such as Hangul syllables are a single glyph), so all "last
/// character" logic works on `char` boundaries, never bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Row of this cell within its grid.
    pub row: usize,
    /// Column of this cell within its grid.
    pub col: usize,
    /// Current glyph, or empty when the cell has no letter yet.
    pub value: String,
    /// Blocking cell. Mutually exclusive with a non-empty `value`.
    #[serde(rename = "isBlack")]
    pub is_black: bool,
    /// Clue number, present iff this cell anchors a word of length >= 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl Cell {
    /// A white cell with no glyph yet — eligible for abandoned-cell cleanup.
    #[must_use]
    pub fn is_abandoned_empty(&self) -> bool {
        !self.is_black && self.value.is_empty()
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSize {
    pub rows: usize,
    pub cols: usize,
}

impl PuzzleSize {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Clamp both dimensions into the supported range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            rows: self.rows.clamp(GRID_SIZE_MIN, GRID_SIZE_MAX),
            cols: self.cols.clamp(GRID_SIZE_MIN, GRID_SIZE_MAX),
        }
    }
}

impl Default for PuzzleSize {
    fn default() -> Self {
        Self { rows: crate::consts::GRID_SIZE_DEFAULT, cols: crate::consts::GRID_SIZE_DEFAULT }
    }
}

/// A derived word entry. Everything except `clue` is recomputed from the
/// grid; `clue` is the only user-editable field and is merged back in by id
/// after each re-extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// `"<direction>-<number>"`; unique because the direction disambiguates
    /// a number shared by an across and a down word.
    pub id: String,
    /// Clue number shared with the anchor cell.
    pub number: u32,
    pub direction: Direction,
    /// Literal concatenation of current cell values along the run. An
    /// incomplete word is simply missing letters, not padded.
    pub text: String,
    /// User-entered clue; empty until edited.
    pub clue: String,
    /// Anchor cell of the run.
    #[serde(rename = "startPosition")]
    pub start_position: Position,
    /// Run length in cells.
    pub length: usize,
}

impl Word {
    /// Build the stable id for a direction/number pair.
    #[must_use]
    pub fn make_id(direction: Direction, number: u32) -> String {
        format!("{}-{number}", direction.as_str())
    }
}

/// The aggregate puzzle document: grid plus derived words plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: String,
    pub title: String,
    pub size: PuzzleSize,
    pub grid: Grid,
    /// Always the re-derivation of `grid` merged with entered clues.
    pub words: Vec<Word>,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Puzzle {
    /// A fresh all-black puzzle of the given size.
    #[must_use]
    pub fn new_blank(size: PuzzleSize, title: impl Into<String>) -> Self {
        let size = size.clamped();
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            size,
            grid: Grid::new_empty(size, true),
            words: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }
}

/// Current cursor position and typing direction. Process-wide UI state,
/// not part of the persisted puzzle.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    /// Selected cell, or `None` when nothing is active.
    pub position: Option<Position>,
    /// Direction the next typed glyph advances in.
    pub direction: Direction,
}

impl Default for Selection {
    fn default() -> Self {
        Self { position: None, direction: Direction::Across }
    }
}
