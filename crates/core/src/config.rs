//! Session configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{BASE_DROP_MS, SOFT_DROP_DIVISOR};

/// Tunables for a [`crate::GameSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Milliseconds per gravity step
    pub gravity_interval_ms: u32,
    /// Soft drop divides the gravity interval by this
    pub soft_drop_divisor: u32,
    /// Seed for piece selection; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity_interval_ms == 0 {
            return Err(ConfigError::ZeroGravityInterval);
        }
        if self.soft_drop_divisor == 0 {
            return Err(ConfigError::ZeroSoftDropDivisor);
        }
        Ok(())
    }

    /// Interval in effect for the given soft-drop state
    pub fn drop_interval_ms(&self, soft_drop: bool) -> u32 {
        if soft_drop {
            self.gravity_interval_ms / self.soft_drop_divisor.max(1)
        } else {
            self.gravity_interval_ms
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity_interval_ms: BASE_DROP_MS,
            soft_drop_divisor: SOFT_DROP_DIVISOR,
            seed: None,
        }
    }
}
