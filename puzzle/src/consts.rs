//! Shared numeric constants for grid sizing.

/// Smallest allowed grid dimension (rows or columns).
pub const GRID_SIZE_MIN: usize = 5;

/// Largest allowed grid dimension (rows or columns).
pub const GRID_SIZE_MAX: usize = 20;

/// Default dimension for a newly created puzzle.
pub const GRID_SIZE_DEFAULT: usize = 7;
