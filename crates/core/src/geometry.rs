//! Grid coordinates and bounds checking
//!
//! Coordinates are (x, y) with x growing to the right and y growing downward; row 0 is the top.

use serde::{Deserialize, Serialize};

use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// An absolute or relative cell position; may lie outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// True iff 0 <= x < 10 and 0 <= y < 20
    #[inline(always)]
    pub fn within_grid(&self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH as i8 && self.y >= 0 && self.y < GRID_HEIGHT as i8
    }

    /// Bounds-checked conversion to a grid index
    pub fn to_grid_pos(self) -> Option<GridPos> {
        self.within_grid().then_some(GridPos(self))
    }

    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i8, i8)> for Coord {
    fn from((x, y): (i8, i8)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A coordinate proven to be inside the grid
///
/// Only constructible through [`Coord::to_grid_pos`], so grid accessors that take a `GridPos`
/// never need a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos(Coord);

impl GridPos {
    pub fn coord(self) -> Coord {
        self.0
    }

    pub fn x(self) -> usize {
        self.0.x as usize
    }

    pub fn y(self) -> usize {
        self.0.y as usize
    }

    /// Row-major index into a flat cell array
    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.y() * GRID_WIDTH as usize + self.x()
    }

    /// The position directly below, if it is still inside the grid
    pub fn below(self) -> Option<GridPos> {
        self.0.offset(0, 1).to_grid_pos()
    }
}
