//! Core game logic - pure, synchronous and testable
//!
//! This crate holds every rule of the falling-block game. It has no dependencies on rendering,
//! input or audio; those collaborators send commands to a [`GameSession`] and read its state
//! (or a [`SessionSnapshot`]) back.
//!
//! # Module Structure
//!
//! - [`geometry`]: coordinates and bounds-checked grid positions
//! - [`pieces`]: rotation-state catalog for the seven kinds
//! - [`grid`]: 10x20 playfield, occupancy queries and row clearing
//! - [`tetromino`]: the active piece state machine (shift, rotate, gravity, lock)
//! - [`rng`]: uniform random piece selection
//! - [`session`]: spawn, hold slot, gravity clock and command surface
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Game Rules
//!
//! - **Uniform spawns**: each new piece is drawn independently from the seven kinds
//! - **No wall kicks**: a rotation is tried in place only and reverts if blocked
//! - **Gravity**: one row every 500ms (125ms with soft drop); a grounded piece locks on the
//!   next gravity step, there is no separate lock delay
//! - **Hard drop**: edge-triggered, drops to the floor and locks at once
//! - **Hold**: one slot, one swap per piece until it locks
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, SequenceRandomizer, SessionConfig};
//! use blockfall_core::types::{GameAction, PieceKind};
//!
//! let mut session = GameSession::with_randomizer(
//!     SessionConfig::default(),
//!     SequenceRandomizer::new(vec![PieceKind::O, PieceKind::T]),
//! )
//! .unwrap();
//!
//! session.apply_action(GameAction::ShiftLeft);
//! let event = session.hard_drop().unwrap();
//!
//! assert_eq!(event.kind, PieceKind::O);
//! assert_eq!(session.grid().filled_count(), 4);
//! assert_eq!(session.active().kind(), PieceKind::T);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`] with the elapsed milliseconds of each frame. The gravity
//! accumulator resets to zero on every step, so a long frame yields at most one row.

pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod tetromino;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::SessionConfig;
pub use error::{ConfigError, GridError};
pub use geometry::{Coord, GridPos};
pub use grid::Grid;
pub use pieces::{get_shape, rotation_states, PieceShape};
pub use rng::{Randomizer, SequenceRandomizer, UniformRandomizer};
pub use session::{GameSession, LockEvent};
pub use snapshot::{PieceSnapshot, SessionSnapshot};
pub use tetromino::{GravityStep, Tetromino};
