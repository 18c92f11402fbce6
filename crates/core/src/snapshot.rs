use serde::{Deserialize, Serialize};

use crate::geometry::Coord;
use crate::session::LockEvent;
use crate::tetromino::Tetromino;
use crate::types::{PieceKind, BASE_DROP_MS, CELLS_PER_PIECE, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub origin: Coord,
    pub stashed: bool,
    /// Absolute cells for the active piece, relative cells for the held preview
    pub cells: [Coord; CELLS_PER_PIECE],
}

impl PieceSnapshot {
    pub fn absolute(piece: &Tetromino) -> Self {
        Self {
            kind: piece.kind(),
            rotation: piece.rotation(),
            origin: piece.origin(),
            stashed: piece.is_stashed(),
            cells: piece.cells(),
        }
    }

    pub fn relative(piece: &Tetromino) -> Self {
        Self {
            cells: piece.relative_cells(),
            ..Self::absolute(piece)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// 0 = empty, otherwise `PieceKind::code`; `grid[y][x]`
    pub grid: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: PieceSnapshot,
    pub held: Option<PieceSnapshot>,
    pub soft_drop: bool,
    pub hard_drop_armed: bool,
    pub can_stash: bool,
    pub drop_interval_ms: u32,
    pub spawn_blocked: bool,
    pub last_lock: Option<LockEvent>,
}

impl SessionSnapshot {
    pub fn new(active: &Tetromino) -> Self {
        Self {
            grid: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: PieceSnapshot::absolute(active),
            held: None,
            soft_drop: false,
            hard_drop_armed: true,
            can_stash: true,
            drop_interval_ms: BASE_DROP_MS,
            spawn_blocked: false,
            last_lock: None,
        }
    }

    /// Row-clear cue for the most recent lock, if any
    pub fn cleared_rows(&self) -> Option<usize> {
        self.last_lock.map(|event| event.rows_cleared)
    }
}
