//! Active piece state machine
//!
//! A [`Tetromino`] is a kind, a rotation index and an origin. Every movement is validated
//! against the grid and reverted if the target does not fit. Locking consumes the piece: its
//! cells go into the grid and the owner spawns a replacement.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::geometry::{Coord, GridPos};
use crate::grid::Grid;
use crate::pieces::{self, PieceShape};
use crate::types::{Direction, PieceKind, CELLS_PER_PIECE, GRID_HEIGHT, SPAWN_ORIGIN};

/// Result of one gravity tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityStep {
    /// Interval not yet exceeded; nothing moved
    Waiting,
    /// The piece moved down one row
    Fell,
    /// The piece is grounded and must be locked now
    Lock,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: PieceKind,
    rotation: usize,
    origin: Coord,
    /// Time accumulated toward the next gravity step
    elapsed_ms: u32,
    /// Set once the piece has been through the hold slot
    stashed: bool,
}

impl Tetromino {
    /// Create a new tetromino at the spawn origin, rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, 0, Coord::from(SPAWN_ORIGIN))
    }

    /// Create a tetromino at an arbitrary origin; the rotation index wraps
    pub fn at(kind: PieceKind, rotation: usize, origin: Coord) -> Self {
        Self {
            kind,
            rotation: rotation % pieces::rotation_count(kind),
            origin,
            elapsed_ms: 0,
            stashed: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn is_stashed(&self) -> bool {
        self.stashed
    }

    /// Move back to the spawn origin and mark as having been stashed
    ///
    /// Rotation and accumulated gravity time are kept.
    pub(crate) fn reset_for_hold(&mut self) {
        self.origin = Coord::from(SPAWN_ORIGIN);
        self.stashed = true;
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        pieces::get_shape(self.kind, self.rotation)
    }

    /// Relative cells of the current rotation state
    pub fn relative_cells(&self) -> [Coord; CELLS_PER_PIECE] {
        self.shape().map(Coord::from)
    }

    /// Absolute cells at the current origin
    pub fn cells(&self) -> [Coord; CELLS_PER_PIECE] {
        self.shape()
            .map(|(dx, dy)| self.origin.offset(dx, dy))
    }

    /// Absolute cells that currently lie inside the grid
    pub fn cells_in_grid(&self) -> ArrayVec<GridPos, CELLS_PER_PIECE> {
        self.cells()
            .into_iter()
            .filter_map(Coord::to_grid_pos)
            .collect()
    }

    /// Every cell is inside the grid and over an empty grid cell
    pub fn is_valid_position(&self, grid: &Grid) -> bool {
        self.cells().iter().all(|coord| match coord.to_grid_pos() {
            Some(pos) => grid.cell(pos).is_none(),
            None => false,
        })
    }

    /// Shift one column; returns whether the piece moved
    pub fn attempt_shift(&mut self, direction: Direction, grid: &Grid) -> bool {
        let previous = self.origin;
        self.origin = self.origin.offset(direction.dx(), 0);
        if self.is_valid_position(grid) {
            return true;
        }
        self.origin = previous;
        false
    }

    /// Rotate one state; returns whether the rotation stuck
    ///
    /// Only the unmodified target state is tried. There is no wall-kick search, so a rotation
    /// blocked by a wall or stack simply fails.
    pub fn attempt_rotate(&mut self, direction: Direction, grid: &Grid) -> bool {
        let previous = self.rotation;
        self.rotation = match direction {
            Direction::Right => pieces::rotate_right(self.kind, self.rotation),
            Direction::Left => pieces::rotate_left(self.kind, self.rotation),
        };
        if self.is_valid_position(grid) {
            return true;
        }
        self.rotation = previous;
        false
    }

    /// True iff some in-grid cell sits on the bottom row or directly above a filled cell
    ///
    /// Cells outside the grid are skipped, so a piece with no in-grid cells never reports
    /// grounded.
    pub fn is_grounded(&self, grid: &Grid) -> bool {
        self.cells_in_grid().iter().any(|pos| match pos.below() {
            Some(below) => grid.cell(below).is_some(),
            None => true,
        })
    }

    /// Accumulate elapsed time and take at most one gravity step
    ///
    /// Once the accumulator exceeds `interval_ms` it resets to zero rather than subtracting the
    /// interval, so a long stall collapses into a single step.
    pub fn tick_gravity(&mut self, elapsed_ms: u32, interval_ms: u32, grid: &Grid) -> GravityStep {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms <= interval_ms {
            return GravityStep::Waiting;
        }
        self.elapsed_ms = 0;

        if self.is_grounded(grid) {
            return GravityStep::Lock;
        }
        self.origin = self.origin.offset(0, 1);
        trace!(kind = ?self.kind, y = self.origin.y, "gravity step");
        GravityStep::Fell
    }

    /// Move straight down until grounded; returns the rows travelled
    ///
    /// Bounded by the grid height so a piece with no in-grid cells cannot descend forever.
    pub fn drop_to_floor(&mut self, grid: &Grid) -> u32 {
        let mut distance = 0;
        while !self.is_grounded(grid) && distance < u32::from(GRID_HEIGHT) {
            self.origin = self.origin.offset(0, 1);
            distance += 1;
        }
        distance
    }

    /// Write the piece into the grid and clear completed rows; returns rows cleared
    ///
    /// Cells outside the grid are dropped.
    pub fn lock(self, grid: &mut Grid) -> usize {
        for pos in self.cells_in_grid() {
            grid.set_cell(pos, self.kind);
        }
        grid.clear_completed_rows()
    }
}
