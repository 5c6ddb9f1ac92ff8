//! Grid geometry engine: numbering, run lookups, and neighbor queries.
//!
//! Everything here is a pure function of a grid snapshot. Mutating callers
//! clone the grid first; queries never panic on out-of-bounds positions —
//! they return `None` or an empty sequence instead, and the caller checks.
//!
//! Terminology: a *run* is a maximal contiguous sequence of non-black cells
//! along one direction; the run's first cell is its *anchor* and receives
//! the run's clue number.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::model::{Cell, Direction, Position, PuzzleSize};

/// Rectangular cell matrix, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

/// One known letter inside a word run, used as a word-completion query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Zero-based index within the run.
    pub position: usize,
    /// The glyph already placed at that index.
    pub char: String,
}

impl Grid {
    /// Build a grid of the given size, every cell black (or white) with no
    /// glyph.
    #[must_use]
    pub fn new_empty(size: PuzzleSize, all_black: bool) -> Self {
        let mut cells = Vec::with_capacity(size.rows * size.cols);
        for row in 0..size.rows {
            for col in 0..size.cols {
                cells.push(Cell { row, col, value: String::new(), is_black: all_black, number: None });
            }
        }
        Self { rows: size.rows, cols: size.cols, cells }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn size(&self) -> PuzzleSize {
        PuzzleSize { rows: self.rows, cols: self.cols }
    }

    /// The cell at `pos`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells.get(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Mutable access to the cell at `pos`, or `None` if out of bounds.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells.get_mut(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Iterate all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate all cell positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Position::new(i / cols, i % cols))
    }

    /// Whether the cell at `pos` is black. Out-of-bounds counts as
    /// blocking, which is what every run computation wants at the border.
    #[must_use]
    pub fn is_black(&self, pos: Position) -> bool {
        self.get(pos).is_none_or(|c| c.is_black)
    }

    /// The neighbor of `pos` one step back along `direction`, if in bounds.
    fn step_back(&self, pos: Position, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Across => pos.col.checked_sub(1).map(|col| Position::new(pos.row, col)),
            Direction::Down => pos.row.checked_sub(1).map(|row| Position::new(row, pos.col)),
        }
    }

    /// The neighbor of `pos` one step forward along `direction`, if in bounds.
    fn step_forward(&self, pos: Position, direction: Direction) -> Option<Position> {
        let next = match direction {
            Direction::Across => Position::new(pos.row, pos.col + 1),
            Direction::Down => Position::new(pos.row + 1, pos.col),
        };
        self.get(next).map(|_| next)
    }

    /// Whether `pos` anchors a word in `direction`: it is non-black, has no
    /// non-black predecessor, and its successor exists and is non-black.
    fn is_word_start(&self, pos: Position, direction: Direction) -> bool {
        if self.is_black(pos) {
            return false;
        }
        let starts = self.step_back(pos, direction).is_none_or(|p| self.is_black(p));
        let has_next = self.step_forward(pos, direction).is_some_and(|p| !self.is_black(p));
        starts && has_next
    }

    /// Recompute every cell's clue number: scan row-major and hand the next
    /// sequential number to any cell that anchors a word in either
    /// direction. Numbers depend only on the black/white pattern.
    #[must_use]
    pub fn assign_cell_numbers(&self) -> Grid {
        let mut grid = self.clone();
        for cell in &mut grid.cells {
            cell.number = None;
        }
        let mut number = 1;
        for pos in self.positions() {
            if self.is_black(pos) {
                continue;
            }
            if self.is_word_start(pos, Direction::Across) || self.is_word_start(pos, Direction::Down) {
                if let Some(cell) = grid.get_mut(pos) {
                    cell.number = Some(number);
                    number += 1;
                }
            }
        }
        grid
    }

    /// The ordered positions of the maximal non-black run through `pos`
    /// along `direction`. Empty if `pos` is black or out of bounds.
    #[must_use]
    pub fn word_cells(&self, pos: Position, direction: Direction) -> Vec<Position> {
        if self.is_black(pos) {
            return Vec::new();
        }

        let mut start = pos;
        while let Some(prev) = self.step_back(start, direction) {
            if self.is_black(prev) {
                break;
            }
            start = prev;
        }

        let mut cells = Vec::new();
        let mut current = Some(start);
        while let Some(p) = current {
            if self.is_black(p) {
                break;
            }
            cells.push(p);
            current = self.step_forward(p, direction);
        }
        cells
    }

    /// The next cell strictly inside the current run: `None` when the
    /// adjacent cell is black or out of bounds. Used for linear cursor
    /// advancement while typing.
    #[must_use]
    pub fn next_cell(&self, pos: Position, direction: Direction) -> Option<Position> {
        self.step_forward(pos, direction).filter(|p| !self.is_black(*p))
    }

    /// The previous cell strictly inside the current run.
    #[must_use]
    pub fn prev_cell(&self, pos: Position, direction: Direction) -> Option<Position> {
        self.step_back(pos, direction).filter(|p| !self.is_black(*p))
    }

    /// The raw adjacent position regardless of black/white state, `None`
    /// only at the grid edge. Used when the caller intends to reactivate a
    /// black cell by typing into it.
    #[must_use]
    pub fn next_cell_position(&self, pos: Position, direction: Direction) -> Option<Position> {
        self.step_forward(pos, direction)
    }

    /// Every cell in the full row (across) or column (down) containing
    /// `pos`, independent of black/white state. Visual highlight guide
    /// only; not word logic.
    #[must_use]
    pub fn line_cells(&self, pos: Position, direction: Direction) -> Vec<Position> {
        if self.get(pos).is_none() {
            return Vec::new();
        }
        match direction {
            Direction::Across => (0..self.cols).map(|col| Position::new(pos.row, col)).collect(),
            Direction::Down => (0..self.rows).map(|row| Position::new(row, pos.col)).collect(),
        }
    }

    /// Concatenate the current values along an ordered cell sequence.
    #[must_use]
    pub fn word_from_cells(&self, cells: &[Position]) -> String {
        cells
            .iter()
            .filter_map(|p| self.get(*p))
            .map(|c| c.value.as_str())
            .collect()
    }

    /// The known letters along an ordered cell sequence as `(index, glyph)`
    /// pairs, for use as a word-completion query.
    #[must_use]
    pub fn word_constraints(&self, cells: &[Position]) -> Vec<Constraint> {
        cells
            .iter()
            .enumerate()
            .filter_map(|(index, p)| {
                let cell = self.get(*p)?;
                if cell.value.is_empty() {
                    None
                } else {
                    Some(Constraint { position: index, char: cell.value.clone() })
                }
            })
            .collect()
    }

    /// Blacken every abandoned empty cell (white, no glyph) except the one
    /// at `exclude`, which the editor is still working in.
    #[must_use]
    pub fn blacken_empty_cells(&self, exclude: Option<Position>) -> Grid {
        let mut grid = self.clone();
        for cell in &mut grid.cells {
            if exclude == Some(Position::new(cell.row, cell.col)) {
                continue;
            }
            if cell.is_abandoned_empty() {
                cell.is_black = true;
            }
        }
        grid
    }

    /// Re-map this grid into a new size: overlapping cells keep their
    /// state, new cells start black.
    #[must_use]
    pub fn resized(&self, size: PuzzleSize) -> Grid {
        let mut grid = Grid::new_empty(size, true);
        for pos in grid.positions() {
            let Some(existing) = self.get(pos) else {
                continue;
            };
            let cell = existing.clone();
            if let Some(slot) = grid.get_mut(pos) {
                *slot = cell;
            }
        }
        grid
    }
}
