//! Grid and selection engine for the crossword authoring tool.
//!
//! This crate owns the full editing lifecycle of a puzzle: translating raw
//! input events into grid mutations, keeping the derived numbering, word
//! list, and active word cells consistent after every change, and tracking
//! provisional composed-character input outside the committed grid. The
//! host layer (CLI or UI) is responsible only for feeding events in and
//! persisting or exporting the resulting [`model::Puzzle`] snapshots.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | The puzzle/selection state machine ([`store::PuzzleStore`]) |
//! | [`model`] | Cell, word, and puzzle data types |
//! | [`grid`] | Pure grid geometry: numbering, runs, neighbor lookups |
//! | [`words`] | Word extraction and the normalize step |
//! | [`compose`] | Provisional composed-character state |
//! | [`input`] | Input adapter: key/pointer/composition events to store calls |
//! | [`consts`] | Grid size limits and defaults |

pub mod compose;
pub mod consts;
pub mod grid;
pub mod input;
pub mod model;
pub mod store;
pub mod words;
