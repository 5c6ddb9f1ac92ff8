//! Input adapter: raw key/pointer/composition events to store operations.
//!
//! This layer owns the ordering hazards the state machine itself refuses to
//! know about: a click arriving mid-composition, a blur forcing a commit,
//! and direction toggles that must not double-advance the cursor when the
//! composition ends a beat later. The store below stays synchronous and
//! consistent; the adapter just decides which primitive to call.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use tracing::debug;

use crate::compose::{Composition, Interruption};
use crate::grid::Constraint;
use crate::model::Position;
use crate::store::{PuzzleStore, Step};

/// A keyboard event, already decoded by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character key.
    Char(char),
    Backspace,
    Delete,
    /// Direction toggle.
    Tab,
    /// Direction toggle (same as Tab).
    Enter,
    /// Commit any in-flight composition in place.
    Escape,
    Arrow(Step),
}

/// A word-completion query derived from the active run, tagged with the
/// selection epoch it was built from so stale responses can be ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestQuery {
    /// Required word length in glyphs.
    pub length: usize,
    /// Known letters at fixed indices.
    pub constraints: Vec<Constraint>,
    /// `PuzzleStore::selection_epoch` at build time.
    pub epoch: u64,
}

/// Wires raw input events to `PuzzleStore` primitives and owns the
/// provisional composition state.
#[derive(Debug, Default)]
pub struct InputAdapter {
    store: PuzzleStore,
    composition: Composition,
    interruption: Interruption,
    /// Single-use flag: a Tab/Enter toggle mid-composition suppresses the
    /// auto-advance exactly once when that composition commits.
    skip_move_on_composition_end: bool,
}

impl InputAdapter {
    #[must_use]
    pub fn new(store: PuzzleStore) -> Self {
        Self { store, ..Self::default() }
    }

    #[must_use]
    pub fn store(&self) -> &PuzzleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PuzzleStore {
        &mut self.store
    }

    /// The provisional glyph to overlay on a cell while composing.
    #[must_use]
    pub fn composition_overlay(&self, position: Position) -> Option<&str> {
        self.composition.overlay(position)
    }

    // --- Keyboard ---

    pub fn key_down(&mut self, key: KeyEvent) {
        let Some(position) = self.store.selection().position else {
            return;
        };
        if self.store.puzzle().is_none() {
            return;
        }
        // A click flag can only outlive its composition-end if the platform
        // never delivered one; a fresh key event means that moment passed.
        if !self.composition.is_active() {
            self.interruption = Interruption::None;
        }

        if key == KeyEvent::Escape {
            self.commit_composition_in_place();
            return;
        }

        // While composing, the IME owns every other key.
        if self.composition.is_active() {
            if matches!(key, KeyEvent::Tab | KeyEvent::Enter) {
                self.skip_move_on_composition_end = true;
                self.store.toggle_direction();
            }
            return;
        }

        match key {
            KeyEvent::Tab | KeyEvent::Enter => self.store.toggle_direction(),
            KeyEvent::Arrow(step) => self.store.move_in_direction(step),
            KeyEvent::Backspace => {
                let filled = self
                    .store
                    .puzzle()
                    .and_then(|p| p.grid.get(position))
                    .is_some_and(|c| !c.value.is_empty());
                if filled {
                    self.store.set_cell_value(position, "", false);
                } else {
                    self.store.move_to_prev_cell_and_clear();
                }
            }
            KeyEvent::Delete => self.store.set_cell_value(position, "", false),
            KeyEvent::Char(c) if c.is_alphabetic() => {
                self.skip_move_on_composition_end = false;
                self.store.set_cell_value(position, &c.to_string(), false);
                self.store.move_to_next_cell();
            }
            KeyEvent::Char(_) | KeyEvent::Escape => {}
        }
    }

    // --- Composition lifecycle ---

    /// The platform began assembling a glyph over the selected cell.
    pub fn composition_start(&mut self) {
        let Some(position) = self.store.selection().position else {
            return;
        };
        debug!(row = position.row, col = position.col, "composition start");
        self.composition.start(position);
    }

    /// The in-flight glyph changed.
    pub fn composition_update(&mut self, data: &str) {
        self.composition.update(data);
    }

    /// The platform finalized the composition. `data` is the final glyph
    /// string when the platform reports one; otherwise the last update
    /// value applies.
    pub fn composition_end(&mut self, data: Option<&str>) {
        // An interrupting click or blur already committed (or deliberately
        // dropped) this composition; the end event is a no-op apply.
        if self.interruption != Interruption::None {
            debug!(interruption = ?self.interruption, "composition end short-circuited");
            self.interruption = Interruption::None;
            self.skip_move_on_composition_end = false;
            self.composition.discard();
            return;
        }

        let Some(composing) = self.composition.take() else {
            return;
        };
        let value = match data {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => composing.value,
        };
        if value.is_empty() {
            return;
        }

        self.store.set_cell_value(composing.position, &value, false);

        let skip_move = std::mem::take(&mut self.skip_move_on_composition_end);
        if !skip_move && self.store.selection().position == Some(composing.position) {
            self.store.move_to_next_cell();
        }
    }

    // --- Pointer ---

    /// Primary press on a cell. Mid-composition this is an implicit commit
    /// with the clicked cell as the next position; the later
    /// composition-end event is short-circuited.
    pub fn pointer_down(&mut self, position: Position) {
        match self.composition.take() {
            Some(composing) if !composing.value.is_empty() => {
                self.interruption = Interruption::PendingClick(position);
                self.store
                    .commit_composing_and_finalize(composing.position, &composing.value, Some(position));
            }
            _ => {
                self.interruption = Interruption::None;
                self.store.select_cell(position, false);
            }
        }
    }

    /// Secondary (context) press: commit any in-flight glyph in place, then
    /// toggle the cell's black flag directly.
    pub fn pointer_secondary(&mut self, position: Position) {
        self.commit_composition_in_place();
        self.store.toggle_black_cell(position);
    }

    // --- Focus ---

    /// Focus left the grid. Mid-composition this force-commits with no next
    /// position (selection clears); otherwise it runs the abandoned-cell
    /// sweep.
    pub fn blur(&mut self) {
        if let Interruption::PendingClick(_) = self.interruption {
            // The click handler already took over; this blur is part of the
            // same gesture.
            return;
        }

        match self.composition.take() {
            Some(composing) if !composing.value.is_empty() => {
                self.interruption = Interruption::PendingCommit;
                self.store
                    .commit_composing_and_finalize(composing.position, &composing.value, None);
            }
            _ => self.store.finalize_empty_cells(None),
        }
    }

    // --- Recommendations ---

    /// Build a word-completion query for the active run, or `None` when no
    /// run is active. The embedded epoch lets the caller discard responses
    /// that arrive after the selection moved on.
    #[must_use]
    pub fn suggest_query(&self) -> Option<SuggestQuery> {
        let cells = self.store.word_cells();
        if cells.len() < 2 {
            return None;
        }
        let grid = &self.store.puzzle()?.grid;
        Some(SuggestQuery {
            length: cells.len(),
            constraints: grid.word_constraints(cells),
            epoch: self.store.selection_epoch(),
        })
    }

    /// Whether a response built against `epoch` is still current.
    #[must_use]
    pub fn is_epoch_current(&self, epoch: u64) -> bool {
        self.store.selection_epoch() == epoch
    }

    // --- Internals ---

    /// Commit the in-flight glyph into its own cell without advancing.
    fn commit_composition_in_place(&mut self) {
        if let Some(composing) = self.composition.take() {
            if !composing.value.is_empty() {
                self.store.set_cell_value(composing.position, &composing.value, false);
            }
        }
    }
}
