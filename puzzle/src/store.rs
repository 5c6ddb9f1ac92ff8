//! Puzzle/selection state machine.
//!
//! `PuzzleStore` owns the single live puzzle, the current selection, and
//! the derived cell set of the active word. Every operation is a
//! synchronous, total transition: it either leaves state untouched (invalid
//! calls are silent no-ops) or produces a new consistent snapshot in which
//! the grid numbering, word list, and active word cells are all re-derived.
//!
//! Cell lifecycle across operations: Black <-> White-Empty <-> White-Filled.
//! A filled cell is never silently blackened; only an explicit empty write
//! or a direct toggle does that. White-empty cells are "abandoned" and
//! swept to black when the editor's attention moves elsewhere.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::debug;

use crate::grid::Grid;
use crate::model::{Cell, Position, Puzzle, PuzzleSize, Selection};
use crate::words;

/// Raw geometric cursor movement for arrow-key navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

/// The stateful core: current puzzle, selection, and active word cells.
#[derive(Debug, Default)]
pub struct PuzzleStore {
    puzzle: Option<Puzzle>,
    selection: Selection,
    word_cells: Vec<Position>,
    /// Bumped whenever the active word-cell set may have changed; lets
    /// async collaborators (word recommendations) detect stale results.
    selection_epoch: u64,
}

impl PuzzleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    #[must_use]
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Ordered cell positions of the active word run; empty when nothing is
    /// selected or the selected cell is black.
    #[must_use]
    pub fn word_cells(&self) -> &[Position] {
        &self.word_cells
    }

    /// Identity of the current word-cell selection. A recommendation fetch
    /// records this at request time and discards its result if the epoch
    /// has moved on.
    #[must_use]
    pub fn selection_epoch(&self) -> u64 {
        self.selection_epoch
    }

    // --- Puzzle lifecycle ---

    /// Replace the current puzzle with a fresh all-black grid.
    pub fn create_puzzle(&mut self, size: PuzzleSize, title: impl Into<String>) {
        self.puzzle = Some(Puzzle::new_blank(size, title));
        self.reset_selection();
    }

    /// Wholesale replace (load/import).
    pub fn set_puzzle(&mut self, puzzle: Puzzle) {
        self.puzzle = Some(puzzle);
        self.reset_selection();
    }

    /// Drop the current puzzle entirely.
    pub fn clear_puzzle(&mut self) {
        self.puzzle = None;
        self.reset_selection();
    }

    // --- Selection ---

    /// Primary click/tap handler. Unless `skip_finalize`, first sweeps
    /// abandoned empty cells everywhere except the target, then activates
    /// the target (un-blocking it if black). Clicking the already selected
    /// cell toggles the typing direction instead.
    pub fn select_cell(&mut self, position: Position, skip_finalize: bool) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        debug!(row = position.row, col = position.col, skip_finalize, "select cell");

        let grid = if skip_finalize {
            puzzle.grid.clone()
        } else {
            puzzle.grid.blacken_empty_cells(Some(position))
        };

        let Some(cell) = grid.get(position) else {
            return;
        };

        if cell.is_black {
            let mut grid = grid;
            if let Some(cell) = grid.get_mut(position) {
                cell.is_black = false;
            }
            self.commit_grid(grid);
            self.selection.position = Some(position);
            self.refresh_word_cells();
            return;
        }

        let same_cell = self.selection.position == Some(position);
        if same_cell {
            self.selection.direction = self.selection.direction.toggled();
        }

        // Renumber/re-extract anyway: the cleanup pass may have changed the
        // black pattern, and it's a no-op otherwise.
        self.commit_grid(grid);
        self.selection.position = Some(position);
        self.refresh_word_cells();
    }

    /// Flip the typing direction in place. No-op without a selection.
    pub fn toggle_direction(&mut self) {
        if self.puzzle.is_none() || self.selection.position.is_none() {
            return;
        }
        self.selection.direction = self.selection.direction.toggled();
        self.refresh_word_cells();
    }

    /// Context-click handler: flip a cell's black flag directly, bypassing
    /// the abandoned-cell sweep. Un-blocking selects the cell; blocking
    /// clears the selection.
    pub fn toggle_black_cell(&mut self, position: Position) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        let Some(target) = puzzle.grid.get(position) else {
            return;
        };
        let was_black = target.is_black;

        let mut grid = puzzle.grid.clone();
        if let Some(cell) = grid.get_mut(position) {
            cell.is_black = !was_black;
            cell.value.clear();
        }
        self.commit_grid(grid);

        if was_black {
            self.selection.position = Some(position);
        } else {
            self.selection.position = None;
        }
        self.refresh_word_cells();
    }

    // --- Cell edits ---

    /// Write the last character of `value` (upper-cased) into the cell.
    /// An empty write blackens the cell and clears the selection. Unless
    /// `skip_activate_next`, a black cell sitting immediately ahead in the
    /// typing direction is un-blocked so typing extends the word. The
    /// selection itself does not move; advancement is a separate call.
    pub fn set_cell_value(&mut self, position: Position, value: &str, skip_activate_next: bool) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        // Writes to black or out-of-bounds cells are caller errors; drop them.
        if puzzle.grid.get(position).is_none_or(|c| c.is_black) {
            return;
        }

        let new_value = last_glyph_upper(value);
        let becomes_black = new_value.is_empty();
        debug!(row = position.row, col = position.col, value = %new_value, skip_activate_next, "set cell value");

        let mut grid = puzzle.grid.clone();
        if let Some(cell) = grid.get_mut(position) {
            cell.value = new_value;
            cell.is_black = becomes_black;
        }

        if !becomes_black && !skip_activate_next {
            let next = puzzle.grid.next_cell_position(position, self.selection.direction);
            if let Some(next) = next {
                if puzzle.grid.is_black(next) {
                    debug!(row = next.row, col = next.col, "activating next cell");
                    if let Some(cell) = grid.get_mut(next) {
                        cell.is_black = false;
                    }
                }
            }
        }

        self.commit_grid(grid);

        if becomes_black {
            self.selection.position = None;
        }
        self.refresh_word_cells();
    }

    /// Clear a cell's glyph without blackening it.
    pub fn clear_cell_value(&mut self, position: Position) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        if puzzle.grid.get(position).is_none_or(|c| c.is_black) {
            return;
        }

        let mut grid = puzzle.grid.clone();
        if let Some(cell) = grid.get_mut(position) {
            cell.value.clear();
        }
        self.commit_grid(grid);
        self.refresh_word_cells();
    }

    // --- Cursor movement ---

    /// Advance the selection within the current run. No-op at the boundary.
    pub fn move_to_next_cell(&mut self) {
        let (Some(puzzle), Some(position)) = (&self.puzzle, self.selection.position) else {
            return;
        };
        if let Some(next) = puzzle.grid.next_cell(position, self.selection.direction) {
            self.selection.position = Some(next);
            self.refresh_word_cells();
        }
    }

    /// Like `move_to_next_cell`, but a black cell immediately ahead is
    /// un-blocked first and then stepped onto. Used when composed input is
    /// about to start on a forced-next cell.
    pub fn move_to_next_cell_and_activate(&mut self) {
        let (Some(puzzle), Some(position)) = (&self.puzzle, self.selection.position) else {
            return;
        };
        let Some(next) = puzzle.grid.next_cell_position(position, self.selection.direction) else {
            return;
        };

        if puzzle.grid.is_black(next) {
            let mut grid = puzzle.grid.clone();
            if let Some(cell) = grid.get_mut(next) {
                cell.is_black = false;
            }
            self.commit_grid(grid);
        }
        self.selection.position = Some(next);
        self.refresh_word_cells();
    }

    /// Retreat the selection within the current run. No-op at the boundary.
    pub fn move_to_prev_cell(&mut self) {
        let (Some(puzzle), Some(position)) = (&self.puzzle, self.selection.position) else {
            return;
        };
        if let Some(prev) = puzzle.grid.prev_cell(position, self.selection.direction) {
            self.selection.position = Some(prev);
            self.refresh_word_cells();
        }
    }

    /// Backspace-at-empty-cell compound: the current (empty) cell becomes
    /// black, the previous cell in the run has its glyph cleared (not
    /// blackened), and the selection moves onto it. One normalize pass for
    /// the combined change.
    pub fn move_to_prev_cell_and_clear(&mut self) {
        let (Some(puzzle), Some(position)) = (&self.puzzle, self.selection.position) else {
            return;
        };
        let Some(prev) = puzzle.grid.prev_cell(position, self.selection.direction) else {
            return;
        };
        debug!(row = prev.row, col = prev.col, "backspace onto previous cell");

        let mut grid = puzzle.grid.clone();
        if let Some(cell) = grid.get_mut(position) {
            cell.value.clear();
            cell.is_black = true;
        }
        if let Some(cell) = grid.get_mut(prev) {
            cell.value.clear();
        }
        self.commit_grid(grid);
        self.selection.position = Some(prev);
        self.refresh_word_cells();
    }

    /// Raw geometric movement for arrow keys, unconstrained by the active
    /// word run. The departed cell is blackened if it was left empty (the
    /// single-cell form of the abandoned-cell sweep); a black destination
    /// is un-blocked on arrival. Structural work only happens when one of
    /// those applies — otherwise this is a selection-only update.
    pub fn move_in_direction(&mut self, step: Step) {
        let (Some(puzzle), Some(position)) = (&self.puzzle, self.selection.position) else {
            return;
        };

        let target = match step {
            Step::Up => position.row.checked_sub(1).map(|row| Position::new(row, position.col)),
            Step::Down => Some(Position::new(position.row + 1, position.col)),
            Step::Left => position.col.checked_sub(1).map(|col| Position::new(position.row, col)),
            Step::Right => Some(Position::new(position.row, position.col + 1)),
        };
        let Some(target) = target else {
            return;
        };
        if puzzle.grid.get(target).is_none() {
            return;
        }

        let departed_empty = puzzle.grid.get(position).is_some_and(Cell::is_abandoned_empty);
        let arriving_on_black = puzzle.grid.is_black(target);

        if departed_empty || arriving_on_black {
            let mut grid = puzzle.grid.clone();
            if departed_empty {
                if let Some(cell) = grid.get_mut(position) {
                    cell.is_black = true;
                }
            }
            if arriving_on_black {
                if let Some(cell) = grid.get_mut(target) {
                    cell.is_black = false;
                }
            }
            self.commit_grid(grid);
        }

        self.selection.position = Some(target);
        self.refresh_word_cells();
    }

    // --- Bulk / metadata ---

    /// Write a candidate word across the active run, index-aligned and
    /// truncated to the shorter of the two. Trailing run cells keep their
    /// previous values (callers wanting a clean slate clear the run first).
    /// The selection moves to the last written cell.
    pub fn apply_word(&mut self, word: &str) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        if self.word_cells.is_empty() {
            return;
        }

        let glyphs: Vec<String> = word.chars().map(|c| c.to_uppercase().collect()).collect();
        let mut grid = puzzle.grid.clone();
        for (pos, glyph) in self.word_cells.iter().zip(glyphs.iter()) {
            if let Some(cell) = grid.get_mut(*pos) {
                cell.value.clone_from(glyph);
            }
        }
        self.commit_grid(grid);

        let written = glyphs.len().min(self.word_cells.len());
        if written > 0 {
            self.selection.position = Some(self.word_cells[written - 1]);
        }
        self.refresh_word_cells();
    }

    /// Edit a word's clue. Pure metadata; the grid is untouched.
    pub fn update_word_clue(&mut self, word_id: &str, clue: &str) {
        let Some(puzzle) = &mut self.puzzle else {
            return;
        };
        for word in &mut puzzle.words {
            if word.id == word_id {
                word.clue = clue.to_string();
                puzzle.touch();
                return;
            }
        }
    }

    /// Re-map the grid into a new size, preserving overlapping cells and
    /// filling new cells as black. Clears the selection.
    pub fn resize_grid(&mut self, size: PuzzleSize) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        let grid = puzzle.grid.resized(size.clamped());
        self.commit_grid(grid);
        self.selection.position = None;
        self.refresh_word_cells();
    }

    /// Explicit abandoned-cell sweep over the whole grid, excluding at most
    /// one cell. Called on focus loss. The selection stays where it is;
    /// the active word cells are re-derived (empty if the selected cell was
    /// swept).
    pub fn finalize_empty_cells(&mut self, exclude: Option<Position>) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        debug!(?exclude, "finalize empty cells");
        let grid = puzzle.grid.blacken_empty_cells(exclude);
        self.commit_grid(grid);
        self.refresh_word_cells();
    }

    /// Composition commit protocol: write the composed glyph into the cell
    /// it was assembled over, sweep abandoned cells everywhere except
    /// `next`, then move the selection to `next` (un-blocking it if black)
    /// or clear the selection when `next` is absent or out of bounds.
    pub fn commit_composing_and_finalize(
        &mut self,
        composing_position: Position,
        composing_value: &str,
        next: Option<Position>,
    ) {
        let Some(puzzle) = &self.puzzle else {
            return;
        };
        debug!(
            row = composing_position.row,
            col = composing_position.col,
            value = composing_value,
            ?next,
            "commit composing value"
        );

        let mut grid = puzzle.grid.clone();
        // A composed glyph only lands on a white cell; anything else is a
        // caller error and the write is dropped.
        if let Some(cell) = grid.get_mut(composing_position) {
            if !cell.is_black {
                cell.value = last_glyph_upper(composing_value);
            }
        }
        let mut grid = grid.blacken_empty_cells(next);

        match next {
            Some(next_pos) if grid.get(next_pos).is_some() => {
                if grid.is_black(next_pos) {
                    if let Some(cell) = grid.get_mut(next_pos) {
                        cell.is_black = false;
                    }
                }
                self.commit_grid(grid);
                self.selection.position = Some(next_pos);
            }
            _ => {
                self.commit_grid(grid);
                self.selection.position = None;
            }
        }
        self.refresh_word_cells();
    }

    // --- Internals ---

    /// Install a mutated grid: renumber, re-extract words, merge clues,
    /// refresh the timestamp. The one normalize funnel for every
    /// grid-structural change.
    fn commit_grid(&mut self, grid: Grid) {
        if let Some(puzzle) = &mut self.puzzle {
            words::normalize(puzzle, grid);
        }
    }

    fn refresh_word_cells(&mut self) {
        self.word_cells = match (&self.puzzle, self.selection.position) {
            (Some(puzzle), Some(position)) => {
                puzzle.grid.word_cells(position, self.selection.direction)
            }
            _ => Vec::new(),
        };
        self.selection_epoch += 1;
    }

    fn reset_selection(&mut self) {
        self.selection = Selection::default();
        self.refresh_word_cells();
    }
}

/// Reduce an input string to its final character, upper-cased. Operates on
/// `char` boundaries so composed multi-byte glyphs survive intact.
fn last_glyph_upper(value: &str) -> String {
    value
        .chars()
        .last()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
