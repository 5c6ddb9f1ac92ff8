//! Share-link codec.
//!
//! A puzzle is flattened into a compact JSON form (single-letter keys, grid
//! as one char per cell), deflate-compressed, and URL-safe base64 encoded
//! into a `?p=` query parameter. Decoding reverses the pipeline and fails
//! soft: any malformed input yields `None`.
//!
//! The compact form carries word number/direction/text/clue only; anchor
//! positions and cell numbers are re-derived after import.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use std::io::{Read as _, Write as _};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use puzzle::consts::{GRID_SIZE_MAX, GRID_SIZE_MIN};
use puzzle::grid::Grid;
use puzzle::model::{Direction, Position, Puzzle, PuzzleSize, Word};

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("payload codec failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("compression failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unsupported grid size {0}x{1}")]
    Size(usize, usize),
}

// =============================================================
// COMPACT WIRE FORM
// =============================================================

#[derive(Debug, Serialize, Deserialize)]
struct CompactPuzzle {
    t: String,
    s: (usize, usize),
    g: String,
    w: Vec<CompactWord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CompactWord {
    n: u32,
    d: String,
    t: String,
    c: String,
}

fn direction_tag(direction: Direction) -> &'static str {
    match direction {
        Direction::Across => "a",
        Direction::Down => "d",
    }
}

fn tag_direction(tag: &str) -> Option<Direction> {
    match tag {
        "a" => Some(Direction::Across),
        "d" => Some(Direction::Down),
        _ => None,
    }
}

/// One char per cell, row-major: `#` black, `.` empty white, else the glyph.
fn encode_grid(grid: &Grid) -> String {
    let mut out = String::new();
    for cell in grid.iter() {
        if cell.is_black {
            out.push('#');
        } else if let Some(glyph) = cell.value.chars().next_back() {
            out.push(glyph);
        } else {
            out.push('.');
        }
    }
    out
}

/// Inverse of `encode_grid`. A short string reads as trailing empty cells.
fn decode_grid(encoded: &str, size: PuzzleSize) -> Grid {
    let mut grid = Grid::new_empty(size, false);
    let mut chars = encoded.chars();
    for pos in grid.positions() {
        let ch = chars.next().unwrap_or('.');
        let Some(cell) = grid.get_mut(pos) else {
            continue;
        };
        match ch {
            '#' => cell.is_black = true,
            '.' => {}
            glyph => cell.value = glyph.to_string(),
        }
    }
    grid
}

// =============================================================
// PUBLIC API
// =============================================================

/// Encode a puzzle as a shareable URL on the given base.
pub fn encode_share_url(puzzle: &Puzzle, base_url: &str) -> Result<String, ShareError> {
    let compact = CompactPuzzle {
        t: puzzle.title.clone(),
        s: (puzzle.size.rows, puzzle.size.cols),
        g: encode_grid(&puzzle.grid),
        w: puzzle
            .words
            .iter()
            .map(|word| CompactWord {
                n: word.number,
                d: direction_tag(word.direction).to_string(),
                t: word.text.clone(),
                c: word.clue.clone(),
            })
            .collect(),
    };

    let json = serde_json::to_vec(&compact)?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    let param = URL_SAFE_NO_PAD.encode(compressed);
    Ok(format!("{base_url}?p={param}"))
}

/// Decode a share URL back into a puzzle, or `None` when the URL carries no
/// parameter or the payload is malformed. The result has a fresh id and
/// default word anchors; callers re-derive numbering before use.
#[must_use]
pub fn decode_share_url(url: &str) -> Option<Puzzle> {
    let param = share_param(url)?;
    match decode_param(param) {
        Ok(puzzle) => Some(puzzle),
        Err(e) => {
            warn!(error = %e, "share: decode failed");
            None
        }
    }
}

fn share_param(url: &str) -> Option<&str> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "p").then_some(value)
    })
}

fn decode_param(param: &str) -> Result<Puzzle, ShareError> {
    let compressed = URL_SAFE_NO_PAD.decode(param)?;
    let mut json = Vec::new();
    DeflateDecoder::new(compressed.as_slice()).read_to_end(&mut json)?;
    let compact: CompactPuzzle = serde_json::from_slice(&json)?;

    // The payload comes from an untrusted URL; an out-of-range size must
    // never reach grid allocation.
    let (rows, cols) = compact.s;
    let supported = GRID_SIZE_MIN..=GRID_SIZE_MAX;
    if !supported.contains(&rows) || !supported.contains(&cols) {
        return Err(ShareError::Size(rows, cols));
    }
    let size = PuzzleSize::new(rows, cols);
    let grid = decode_grid(&compact.g, size);
    let words = compact
        .w
        .into_iter()
        .filter_map(|word| {
            let direction = tag_direction(&word.d)?;
            Some(Word {
                id: Word::make_id(direction, word.n),
                number: word.n,
                direction,
                length: word.t.chars().count(),
                text: word.t,
                clue: word.c,
                start_position: Position::new(0, 0),
            })
        })
        .collect();

    let now = OffsetDateTime::now_utc();
    Ok(Puzzle {
        id: Uuid::new_v4().to_string(),
        title: compact.t,
        size,
        grid,
        words,
        created_at: now,
        updated_at: now,
    })
}
