//! Pieces module - tetromino shape catalog
//!
//! Each kind owns an ordered list of rotation states; each state is 4 mino offsets relative to
//! the piece origin. O has a single state, every other kind has four. Rotation indices wrap
//! modulo the state count.
//!
//! There is no wall-kick table: a rotation is either valid exactly where the piece stands or
//! it does not happen.

use crate::types::{PieceKind, SPAWN_ORIGIN};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

const I_STATES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const J_STATES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 0)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(0, 2), (1, 0), (1, 1), (1, 2)],
];

const L_STATES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (2, 1), (2, 0)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (0, 2), (1, 1), (2, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const O_STATES: [PieceShape; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const S_STATES: [PieceShape; 4] = [
    [(0, 1), (1, 0), (1, 1), (2, 0)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(0, 2), (1, 2), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const T_STATES: [PieceShape; 4] = [
    [(0, 1), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 1)],
    [(0, 1), (1, 1), (1, 2), (2, 1)],
    [(0, 1), (1, 0), (1, 1), (1, 2)],
];

const Z_STATES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 2), (1, 1), (2, 1), (2, 0)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(0, 2), (0, 1), (1, 1), (1, 0)],
];

/// All rotation states for a piece kind, in rotation order
pub fn rotation_states(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Number of rotation states a kind cycles through
pub fn rotation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Get the shape (mino offsets) for a piece kind and rotation index
///
/// The index wraps, so any `usize` is accepted.
pub fn get_shape(kind: PieceKind, rotation: usize) -> PieceShape {
    let states = rotation_states(kind);
    states[rotation % states.len()]
}

/// Next rotation index clockwise ("right"), wrapping to 0 after the last state
pub fn rotate_right(kind: PieceKind, rotation: usize) -> usize {
    (rotation + 1) % rotation_count(kind)
}

/// Previous rotation index ("left"), wrapping from 0 to the last state
pub fn rotate_left(kind: PieceKind, rotation: usize) -> usize {
    let count = rotation_count(kind);
    (rotation % count + count - 1) % count
}

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = SPAWN_ORIGIN;

/// Get initial shape for a new piece at spawn position
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, 0)
}
