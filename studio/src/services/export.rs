//! Plain-text document export.
//!
//! Renders a puzzle into a paginated document: title header, boxed grid
//! (black cells filled, clue numbers on white cells, answer glyphs when
//! requested), then Across/Down clue sections. `export_both` produces the
//! blank puzzle and the answer key in one call.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use unicode_width::UnicodeWidthStr;

use puzzle::grid::Grid;
use puzzle::model::{Direction, Position, Puzzle, PuzzleSize, Word};

const LINES_PER_PAGE: usize = 48;
/// Interior columns of one grid cell, between the `|` separators.
const CELL_WIDTH: usize = 4;
const NO_CLUE_PLACEHOLDER: &str = "(no clue)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

/// Render one variant of the puzzle document.
#[must_use]
pub fn render_document(puzzle: &Puzzle, include_answers: bool) -> Document {
    let mut lines = Vec::new();
    lines.push(puzzle.title.clone());
    lines.push("=".repeat(puzzle.title.chars().count().max(8)));
    lines.push(String::new());
    lines.extend(render_grid(&puzzle.grid, puzzle.size, include_answers));
    lines.push(String::new());

    let across: Vec<&Word> = puzzle.words.iter().filter(|w| w.direction == Direction::Across).collect();
    let down: Vec<&Word> = puzzle.words.iter().filter(|w| w.direction == Direction::Down).collect();

    if !across.is_empty() {
        lines.push("Across".to_string());
        for word in &across {
            lines.push(clue_line(word, include_answers));
        }
        lines.push(String::new());
    }
    if !down.is_empty() {
        lines.push("Down".to_string());
        for word in &down {
            lines.push(clue_line(word, include_answers));
        }
    }

    Document { title: puzzle.title.clone(), pages: paginate(lines) }
}

/// Blank puzzle plus answer key.
#[must_use]
pub fn export_both(puzzle: &Puzzle) -> (Document, Document) {
    (render_document(puzzle, false), render_document(puzzle, true))
}

#[must_use]
pub fn render_text(document: &Document) -> String {
    document
        .pages
        .iter()
        .map(|page| page.lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\u{000C}\n")
}

#[must_use]
pub fn document_filename(title: &str, include_answers: bool) -> String {
    let suffix = if include_answers { "answers" } else { "puzzle" };
    format!("{title}_{suffix}.txt")
}

// =============================================================
// RENDERING
// =============================================================

/// Each grid row renders as a border plus a number line and a value line.
fn render_grid(grid: &Grid, size: PuzzleSize, include_answers: bool) -> Vec<String> {
    let border = format!("+{}", "----+".repeat(size.cols));
    let mut out = Vec::new();

    for row in 0..size.rows {
        out.push(border.clone());
        let mut number_line = String::from("|");
        let mut value_line = String::from("|");
        for col in 0..size.cols {
            let Some(cell) = grid.get(Position::new(row, col)) else {
                continue;
            };
            if cell.is_black {
                number_line.push_str("####|");
                value_line.push_str("####|");
                continue;
            }
            match cell.number {
                Some(n) => number_line.push_str(&format!("{n:<4}|")),
                None => number_line.push_str("    |"),
            }
            if include_answers && !cell.value.is_empty() {
                // Pad by display width, not char count: Hangul glyphs are
                // double-width and would otherwise break the box columns.
                let pad = CELL_WIDTH.saturating_sub(1 + cell.value.width());
                value_line.push_str(&format!(" {}{}|", cell.value, " ".repeat(pad)));
            } else {
                value_line.push_str("    |");
            }
        }
        out.push(number_line);
        out.push(value_line);
    }

    out.push(border);
    out
}

fn clue_line(word: &Word, include_answers: bool) -> String {
    let clue = if !word.clue.is_empty() {
        word.clue.as_str()
    } else if include_answers && !word.text.is_empty() {
        word.text.as_str()
    } else {
        NO_CLUE_PLACEHOLDER
    };
    format!("  {}. {}", word.number, clue)
}

fn paginate(lines: Vec<String>) -> Vec<Page> {
    if lines.is_empty() {
        return vec![Page { lines }];
    }
    lines
        .chunks(LINES_PER_PAGE)
        .map(|chunk| Page { lines: chunk.to_vec() })
        .collect()
}
