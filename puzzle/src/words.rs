//! Word extraction: derive the canonical word list from a numbered grid.
//!
//! A word is emitted for every run of length >= 2 whose anchor is a
//! numbered cell. `text` is the literal concatenation of the run's current
//! values, so an incomplete word is simply missing letters. Clues are the
//! one piece of word state the grid cannot reproduce; `merge_clues` carries
//! them across re-extractions by id.

#[cfg(test)]
#[path = "words_test.rs"]
mod words_test;

use std::collections::HashMap;

use crate::grid::Grid;
use crate::model::{Direction, Puzzle, Word};

/// Scan every numbered cell and emit a `Word` for each run it anchors.
#[must_use]
pub fn extract_words(grid: &Grid) -> Vec<Word> {
    let mut words = Vec::new();

    for pos in grid.positions() {
        let Some(number) = grid.get(pos).and_then(|c| c.number) else {
            continue;
        };

        for direction in [Direction::Across, Direction::Down] {
            let cells = grid.word_cells(pos, direction);
            // The run must actually start here; a numbered cell can sit
            // mid-run in the other direction.
            if cells.len() < 2 || cells[0] != pos {
                continue;
            }
            words.push(Word {
                id: Word::make_id(direction, number),
                number,
                direction,
                text: grid.word_from_cells(&cells),
                clue: String::new(),
                start_position: pos,
                length: cells.len(),
            });
        }
    }

    words
}

/// Copy previously entered clues into a freshly extracted word list,
/// keyed by word id.
pub fn merge_clues(words: &mut [Word], previous: &[Word]) {
    let clues: HashMap<&str, &str> = previous
        .iter()
        .filter(|w| !w.clue.is_empty())
        .map(|w| (w.id.as_str(), w.clue.as_str()))
        .collect();
    for word in words {
        if let Some(clue) = clues.get(word.id.as_str()) {
            word.clue = (*clue).to_string();
        }
    }
}

/// The single normalize step run after any grid-structural mutation:
/// renumber, re-extract, merge clues back in, refresh the timestamp.
pub fn normalize(puzzle: &mut Puzzle, grid: Grid) {
    let numbered = grid.assign_cell_numbers();
    let mut words = extract_words(&numbered);
    merge_clues(&mut words, &puzzle.words);
    puzzle.grid = numbered;
    puzzle.words = words;
    puzzle.size = puzzle.grid.size();
    puzzle.touch();
}

/// Convenience for callers holding a decoded/imported puzzle whose grid was
/// rebuilt from a flat representation: re-derive numbering and words so
/// `start_position`/`length` are exact.
pub fn renumber_and_extract(puzzle: &mut Puzzle) {
    let grid = puzzle.grid.clone();
    normalize(puzzle, grid);
}
