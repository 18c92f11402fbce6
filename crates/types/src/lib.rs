//! Shared types module - constants and plain data used by the engine and its collaborators
//!
//! Everything here is pure data: the renderer, the input layer and the audio layer can all
//! depend on this crate without pulling in the simulation.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn origin**: (3, 0) for every piece
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 500 | Gravity interval (one row per interval) |
//! | `SOFT_DROP_DIVISOR` | 4 | Soft drop divides the interval by this |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, GameAction, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.code(), 6);
//!
//! assert_eq!(Direction::Left.dx(), -1);
//!
//! let action = GameAction::from_str("shiftLeft").unwrap();
//! assert_eq!(action, GameAction::ShiftLeft);
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Base gravity interval (500ms per row)
pub const BASE_DROP_MS: u32 = 500;

/// Soft drop divides the gravity interval by this value
pub const SOFT_DROP_DIVISOR: u32 = 4;

/// Origin every new (or stashed) piece is placed at
pub const SPAWN_ORIGIN: (i8, i8) = (3, 0);

/// Number of cells in every rotation state
pub const CELLS_PER_PIECE: usize = 4;


/// The seven tetromino piece kinds
///
/// Each kind has a distinct color used only by rendering collaborators:
/// - **I**: Cyan
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Uppercase letter, used for text dumps of the grid
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Stable numeric code (1..=7); 0 is reserved for an empty cell
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Fill color as a CSS hex string
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#00F0F0",
            PieceKind::J => "#0000F0",
            PieceKind::L => "#F0A000",
            PieceKind::O => "#F0F000",
            PieceKind::S => "#00F000",
            PieceKind::T => "#A000F0",
            PieceKind::Z => "#F00000",
        }
    }
}

/// Color used for empty cells
pub const EMPTY_COLOR: &str = "black";

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Horizontal direction for shifts and rotations
///
/// For rotations, `Right` advances the rotation index and `Left` retreats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for a shift in this direction
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Commands an input collaborator can send to a session
///
/// Keyboard and touch bindings both map onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one column left
    ShiftLeft,
    /// Move piece one column right
    ShiftRight,
    /// Rotate to the previous rotation state
    RotateLeft,
    /// Rotate to the next rotation state
    RotateRight,
    /// Engage soft drop (key down)
    SoftDropOn,
    /// Release soft drop (key up)
    SoftDropOff,
    /// Drop and lock immediately (ignored unless armed)
    HardDrop,
    /// Re-arm hard drop (key up)
    HardDropRelease,
    /// Swap the active piece with the hold slot
    Stash,
}

impl GameAction {
    pub const ALL: [GameAction; 9] = [
        GameAction::ShiftLeft,
        GameAction::ShiftRight,
        GameAction::RotateLeft,
        GameAction::RotateRight,
        GameAction::SoftDropOn,
        GameAction::SoftDropOff,
        GameAction::HardDrop,
        GameAction::HardDropRelease,
        GameAction::Stash,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("rotateRight"), Some(GameAction::RotateRight));
    /// assert_eq!(GameAction::from_str("HARDDROP"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shiftleft" => Some(GameAction::ShiftLeft),
            "shiftright" => Some(GameAction::ShiftRight),
            "rotateleft" => Some(GameAction::RotateLeft),
            "rotateright" => Some(GameAction::RotateRight),
            "softdropon" => Some(GameAction::SoftDropOn),
            "softdropoff" => Some(GameAction::SoftDropOff),
            "harddrop" => Some(GameAction::HardDrop),
            "harddroprelease" => Some(GameAction::HardDropRelease),
            "stash" => Some(GameAction::Stash),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::ShiftLeft => "shiftLeft",
            GameAction::ShiftRight => "shiftRight",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::RotateRight => "rotateRight",
            GameAction::SoftDropOn => "softDropOn",
            GameAction::SoftDropOff => "softDropOff",
            GameAction::HardDrop => "hardDrop",
            GameAction::HardDropRelease => "hardDropRelease",
            GameAction::Stash => "stash",
        }
    }
}

/// Audio cue an observer plays after a piece locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// At least one row was cleared
    Clear,
    /// The piece landed without clearing anything
    Fall,
}

impl SoundCue {
    pub fn for_rows_cleared(rows: usize) -> Self {
        if rows > 0 {
            SoundCue::Clear
        } else {
            SoundCue::Fall
        }
    }
}
