//! Error types for the engine
//!
//! Invalid placements never show up here: shifts and rotations that would collide are simply
//! reverted. These errors only cover broken preconditions and bad configuration.

use derive_more::{Display, Error};

use crate::geometry::Coord;

/// Checked grid access failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridError {
    #[display("coordinate {_0} is outside the 10x20 grid")]
    OutOfBounds(#[error(not(source))] Coord),
}

/// A [`crate::SessionConfig`] that cannot drive gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    #[display("gravity interval must be greater than zero")]
    ZeroGravityInterval,
    #[display("soft drop divisor must be greater than zero")]
    ZeroSoftDropDivisor,
}
