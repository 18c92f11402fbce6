//! Grid module - the playfield cell matrix
//!
//! The grid is 10x20, each cell empty or filled with the kind of the piece that locked there.
//! Uses a flat row-major array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use std::fmt;

use crate::error::GridError;
use crate::geometry::{Coord, GridPos};
use crate::types::{Cell, PieceKind, GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = WIDTH * HEIGHT;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Cell at an in-bounds position
    #[inline(always)]
    pub fn cell(&self, pos: GridPos) -> Cell {
        self.cells[pos.index()]
    }

    /// Cell at an arbitrary coordinate; `None` when out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        coord.to_grid_pos().map(|pos| self.cell(pos))
    }

    /// Whether a cell holds a locked mino
    ///
    /// Callers are expected to bounds-check first; an out-of-grid coordinate is a broken
    /// precondition and reported as [`GridError::OutOfBounds`].
    pub fn is_occupied(&self, coord: Coord) -> Result<bool, GridError> {
        let pos = coord.to_grid_pos().ok_or(GridError::OutOfBounds(coord))?;
        Ok(self.cell(pos).is_some())
    }

    /// Write a piece-kind marker into a cell
    pub fn set_cell(&mut self, pos: GridPos, kind: PieceKind) {
        self.cells[pos.index()] = Some(kind);
    }

    /// Empty a single cell
    pub fn clear_cell(&mut self, pos: GridPos) {
        self.cells[pos.index()] = None;
    }

    /// Checked write for callers holding a raw coordinate
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<(), GridError> {
        let pos = coord.to_grid_pos().ok_or(GridError::OutOfBounds(coord))?;
        self.cells[pos.index()] = cell;
        Ok(())
    }

    /// One row of cells, top row first
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows from top (y = 0) to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Shift every row above `y` down by one, overwriting row `y`; the top row becomes empty
    fn collapse_row(&mut self, y: usize) {
        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }
        for cell in &mut self.cells[..WIDTH] {
            *cell = None;
        }
    }

    /// Clear all complete rows and return how many were cleared
    ///
    /// Scans top to bottom. After a clear the scan index stays put, so the row that just
    /// shifted into `y` is examined again; one call therefore resolves every full row,
    /// including rows that only become full after a shift.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = 0;
        while y < HEIGHT {
            if self.is_row_full(y) {
                cleared += 1;
                self.collapse_row(y);
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// Numeric view of the grid (0 = empty, otherwise [`PieceKind::code`])
    pub fn write_code_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.map_or(0, |kind| kind.code());
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells = [None; GRID_SIZE];
    }

    /// Build a grid from text rows, top row first
    ///
    /// `.` is empty; a piece letter fills the cell. Missing rows are prepended as empty rows so a
    /// short picture describes the bottom of the grid. Unknown characters count as empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let skip = HEIGHT.saturating_sub(rows.len());
        for (i, line) in rows.iter().take(HEIGHT).enumerate() {
            let y = skip + i;
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                grid.cells[y * WIDTH + x] = PieceKind::from_str(&ch.to_string());
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let ch = cell.map_or('.', |kind| kind.letter());
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i8, y: i8) -> GridPos {
        Coord::new(x, y).to_grid_pos().unwrap()
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new();
        grid.set_cell(pos(0, 0), PieceKind::I);
        grid.set_cell(pos(5, 10), PieceKind::T);

        assert_eq!(grid.cells[0], Some(PieceKind::I));
        assert_eq!(grid.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_is_occupied_out_of_bounds() {
        let grid = Grid::new();
        assert_eq!(
            grid.is_occupied(Coord::new(-1, 3)),
            Err(GridError::OutOfBounds(Coord::new(-1, 3)))
        );
        assert_eq!(grid.is_occupied(Coord::new(3, 3)), Ok(false));
    }

    #[test]
    fn test_collapse_row_empties_top() {
        let mut grid = Grid::new();
        for x in 0..10 {
            grid.set_cell(pos(x, 0), PieceKind::Z);
        }
        grid.set_cell(pos(2, 1), PieceKind::O);
        grid.collapse_row(1);
        assert!(grid.is_row_empty(0));
        assert!(grid.is_row_full(1));
    }

    #[test]
    fn test_from_rows_bottom_aligned() {
        let grid = Grid::from_rows(&["I.........", "IIIIIIIII."]);
        assert_eq!(grid.get(Coord::new(0, 18)), Some(Some(PieceKind::I)));
        assert_eq!(grid.get(Coord::new(9, 19)), Some(None));
        assert_eq!(grid.filled_count(), 10);
    }

    #[test]
    fn test_display_dump() {
        let grid = Grid::from_rows(&["..T......."]);
        let text = grid.to_string();
        assert_eq!(text.lines().count(), 20);
        assert_eq!(text.lines().last(), Some("..T......."));
    }
}
