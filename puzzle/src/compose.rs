//! Provisional composed-character state.
//!
//! Multi-keystroke glyph assembly (IME input) lives outside the committed
//! grid: the in-flight glyph and the cell it is being assembled over are
//! tracked here and rendered as an overlay, and only written into the grid
//! by an explicit commit. The grid is therefore never structurally invalid
//! mid-composition.
//!
//! `Interruption` makes the ordering hazard between the composition
//! lifecycle and click/blur events explicit: instead of relying on
//! platform-dependent event order, the interrupting handler records what it
//! already did and the composition-end handler consults that record.

#[cfg(test)]
#[path = "compose_test.rs"]
mod compose_test;

use crate::model::Position;

/// An in-flight composition: the target cell and the provisional glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composing {
    pub position: Position,
    /// Last glyph reported by the platform; empty until the first update.
    pub value: String,
}

/// Nullable composition side-channel with commit/discard transitions.
#[derive(Debug, Default)]
pub struct Composition {
    active: Option<Composing>,
}

impl Composition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin composing over the given cell.
    pub fn start(&mut self, position: Position) {
        self.active = Some(Composing { position, value: String::new() });
    }

    /// Replace the provisional glyph with the last character of the
    /// platform's composition data. No-op when not composing.
    pub fn update(&mut self, data: &str) {
        if let Some(composing) = &mut self.active {
            if let Some(glyph) = data.chars().last() {
                composing.value = glyph.to_string();
            }
        }
    }

    /// Whether a composition is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The current provisional state, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Composing> {
        self.active.as_ref()
    }

    /// The provisional glyph to overlay on `position`, if that cell is the
    /// composition target and a glyph exists.
    #[must_use]
    pub fn overlay(&self, position: Position) -> Option<&str> {
        self.active
            .as_ref()
            .filter(|c| c.position == position && !c.value.is_empty())
            .map(|c| c.value.as_str())
    }

    /// End the composition and hand back its state for committing.
    pub fn take(&mut self) -> Option<Composing> {
        self.active.take()
    }

    /// End the composition without committing anything.
    pub fn discard(&mut self) {
        self.active = None;
    }
}

/// What already interrupted the in-flight composition, consulted by the
/// composition-end handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interruption {
    /// Nothing pending; composition-end applies normally.
    #[default]
    None,
    /// A pointer-down landed on this cell and its handler performed the
    /// authoritative commit; composition-end must be a no-op.
    PendingClick(Position),
    /// A blur (or other forced commit) already wrote the glyph;
    /// composition-end must be a no-op.
    PendingCommit,
}
