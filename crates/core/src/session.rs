//! Game session - owns the grid, the active piece and the hold slot
//!
//! A session is driven by one caller: input commands and [`GameSession::tick`] take `&mut self`,
//! so they are serialized by construction. Locking always runs in the same order: write cells,
//! clear rows, spawn the next piece.

use tracing::{debug, instrument};

use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::geometry::Coord;
use crate::grid::Grid;
use crate::rng::{Randomizer, UniformRandomizer};
use crate::snapshot::{PieceSnapshot, SessionSnapshot};
use crate::tetromino::{GravityStep, Tetromino};
use crate::types::{Direction, GameAction, PieceKind, SoundCue, CELLS_PER_PIECE};

use serde::{Deserialize, Serialize};

/// Emitted every time a piece locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub rows_cleared: usize,
    pub hard_drop: bool,
}

impl LockEvent {
    pub fn cue(&self) -> SoundCue {
        SoundCue::for_rows_cleared(self.rows_cleared)
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameSession<R: Randomizer = UniformRandomizer> {
    grid: Grid,
    active: Tetromino,
    held: Option<Tetromino>,
    randomizer: R,
    config: SessionConfig,
    soft_drop: bool,
    hard_drop_armed: bool,
    /// Cleared by a stash, restored when a piece locks
    can_stash: bool,
    /// Last lock event (consumed by observers).
    last_lock: Option<LockEvent>,
}

impl GameSession<UniformRandomizer> {
    /// Create a session with uniform random spawns, seeded from `config.seed` when present
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let randomizer = match config.seed {
            Some(seed) => UniformRandomizer::new(seed),
            None => UniformRandomizer::from_entropy(),
        };
        Self::with_randomizer(config, randomizer)
    }
}

impl<R: Randomizer> GameSession<R> {
    /// Create a session drawing piece kinds from `randomizer`
    ///
    /// The first piece is spawned immediately.
    pub fn with_randomizer(config: SessionConfig, mut randomizer: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let active = Tetromino::new(randomizer.next_kind());
        debug!(kind = ?active.kind(), "session started");

        Ok(Self {
            grid: Grid::new(),
            active,
            held: None,
            randomizer,
            config,
            soft_drop: false,
            hard_drop_armed: true,
            can_stash: true,
            last_lock: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for collaborators that prepare a board (puzzles, garbage rows)
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    pub fn held(&self) -> Option<&Tetromino> {
        self.held.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn randomizer(&self) -> &R {
        &self.randomizer
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn hard_drop_armed(&self) -> bool {
        self.hard_drop_armed
    }

    /// Whether [`GameSession::stash`] would do anything right now
    pub fn can_stash(&self) -> bool {
        self.can_stash
    }

    /// Absolute cells of the active piece
    pub fn active_cells(&self) -> [Coord; CELLS_PER_PIECE] {
        self.active.cells()
    }

    /// Kind and relative cells of the held piece, for the preview pane
    pub fn held_preview(&self) -> Option<(PieceKind, [Coord; CELLS_PER_PIECE])> {
        self.held.map(|piece| (piece.kind(), piece.relative_cells()))
    }

    /// Gravity interval in effect right now
    pub fn drop_interval_ms(&self) -> u32 {
        self.config.drop_interval_ms(self.soft_drop)
    }

    /// The active piece overlaps the stack or leaves the grid
    ///
    /// Spawning does not check for room, so this is how a driver notices a topped-out stack.
    pub fn spawn_blocked(&self) -> bool {
        !self.active.is_valid_position(&self.grid)
    }

    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    pub fn shift(&mut self, direction: Direction) -> bool {
        self.active.attempt_shift(direction, &self.grid)
    }

    pub fn shift_left(&mut self) -> bool {
        self.shift(Direction::Left)
    }

    pub fn shift_right(&mut self) -> bool {
        self.shift(Direction::Right)
    }

    pub fn rotate(&mut self, direction: Direction) -> bool {
        self.active.attempt_rotate(direction, &self.grid)
    }

    pub fn rotate_left(&mut self) -> bool {
        self.rotate(Direction::Left)
    }

    pub fn rotate_right(&mut self) -> bool {
        self.rotate(Direction::Right)
    }

    pub fn set_soft_drop(&mut self, engaged: bool) {
        if self.soft_drop != engaged {
            debug!(engaged, "soft drop");
        }
        self.soft_drop = engaged;
    }

    /// Drop the active piece to the floor and lock it, if hard drop is armed
    ///
    /// Disarms until [`GameSession::release_hard_drop`], so a held key drops only once.
    #[instrument(skip(self), level = "debug")]
    pub fn hard_drop(&mut self) -> Option<LockEvent> {
        if !self.hard_drop_armed {
            return None;
        }
        self.hard_drop_armed = false;

        let distance = self.active.drop_to_floor(&self.grid);
        debug!(kind = ?self.active.kind(), distance, "hard drop");
        Some(self.lock_active(true))
    }

    /// Re-arm hard drop (key or touch released)
    pub fn release_hard_drop(&mut self) {
        self.hard_drop_armed = true;
    }

    /// Swap the active piece with the hold slot
    ///
    /// With an empty slot the active piece is parked and a fresh one spawns; otherwise the two
    /// trade places. Either way the outgoing piece returns to the spawn origin and is marked as
    /// stashed. Only one stash is allowed per lock; further requests return false.
    #[instrument(skip(self), level = "debug")]
    pub fn stash(&mut self) -> bool {
        if !self.can_stash || self.active.is_stashed() {
            return false;
        }

        let mut outgoing = self.active;
        outgoing.reset_for_hold();
        self.active = match self.held.replace(outgoing) {
            // The incoming piece keeps its stashed mark until it locks.
            Some(incoming) => incoming,
            None => self.spawn_piece(),
        };
        self.can_stash = false;
        debug!(held = ?outgoing.kind(), active = ?self.active.kind(), "stashed");
        true
    }

    /// Advance the gravity clock; returns the lock event if the piece locked
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<LockEvent> {
        let interval = self.drop_interval_ms();
        match self.active.tick_gravity(elapsed_ms, interval, &self.grid) {
            GravityStep::Lock => Some(self.lock_active(false)),
            GravityStep::Waiting | GravityStep::Fell => None,
        }
    }

    /// Apply a game action
    ///
    /// Returns whether the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::ShiftLeft => self.shift_left(),
            GameAction::ShiftRight => self.shift_right(),
            GameAction::RotateLeft => self.rotate_left(),
            GameAction::RotateRight => self.rotate_right(),
            GameAction::SoftDropOn => {
                let changed = !self.soft_drop;
                self.set_soft_drop(true);
                changed
            }
            GameAction::SoftDropOff => {
                let changed = self.soft_drop;
                self.set_soft_drop(false);
                changed
            }
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::HardDropRelease => {
                let changed = !self.hard_drop_armed;
                self.release_hard_drop();
                changed
            }
            GameAction::Stash => self.stash(),
        }
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.grid.write_code_grid(&mut out.grid);
        out.active = PieceSnapshot::absolute(&self.active);
        out.held = self.held.as_ref().map(PieceSnapshot::relative);
        out.soft_drop = self.soft_drop;
        out.hard_drop_armed = self.hard_drop_armed;
        out.can_stash = self.can_stash;
        out.drop_interval_ms = self.drop_interval_ms();
        out.spawn_blocked = self.spawn_blocked();
        out.last_lock = self.last_lock;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::new(&self.active);
        self.snapshot_into(&mut s);
        s
    }

    /// New piece of a random kind at the spawn origin, rotation 0
    fn spawn_piece(&mut self) -> Tetromino {
        let piece = Tetromino::new(self.randomizer.next_kind());
        debug!(kind = ?piece.kind(), "spawned");
        piece
    }

    /// Lock the active piece, clear rows and spawn the replacement
    fn lock_active(&mut self, hard_drop: bool) -> LockEvent {
        let kind = self.active.kind();
        let rows_cleared = self.active.lock(&mut self.grid);
        if rows_cleared > 0 {
            debug!(rows_cleared, "rows cleared");
        }
        self.active = self.spawn_piece();
        self.can_stash = true;

        let event = LockEvent {
            kind,
            rows_cleared,
            hard_drop,
        };
        debug!(?event, "locked");
        self.last_lock = Some(event);
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRandomizer;

    fn session(kinds: &[PieceKind]) -> GameSession<SequenceRandomizer> {
        GameSession::with_randomizer(SessionConfig::default(), SequenceRandomizer::new(kinds))
            .unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SessionConfig {
            gravity_interval_ms: 0,
            ..SessionConfig::default()
        };
        let result = GameSession::with_randomizer(config, SequenceRandomizer::new(vec![]));
        assert!(matches!(result, Err(ConfigError::ZeroGravityInterval)));
    }

    #[test]
    fn first_piece_spawns_immediately() {
        let s = session(&[PieceKind::T, PieceKind::I]);
        assert_eq!(s.active().kind(), PieceKind::T);
        assert_eq!(s.active().origin(), Coord::new(3, 0));
        assert_eq!(s.randomizer().drawn(), 1);
        assert!(s.held().is_none());
        assert!(s.hard_drop_armed());
    }

    #[test]
    fn hard_drop_is_edge_triggered() {
        let mut s = session(&[PieceKind::O]);
        assert!(s.hard_drop().is_some());
        assert!(s.hard_drop().is_none());
        assert_eq!(s.grid().filled_count(), 4);

        s.release_hard_drop();
        assert!(s.hard_drop().is_some());
        assert_eq!(s.grid().filled_count(), 8);
    }

    #[test]
    fn take_last_lock_consumes() {
        let mut s = session(&[PieceKind::O]);
        s.hard_drop();
        let event = s.take_last_lock().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.cue(), SoundCue::Fall);
        assert!(event.hard_drop);
        assert!(s.take_last_lock().is_none());
    }

    #[test]
    fn soft_drop_action_reports_change() {
        let mut s = session(&[PieceKind::O]);
        assert!(s.apply_action(GameAction::SoftDropOn));
        assert!(!s.apply_action(GameAction::SoftDropOn));
        assert_eq!(s.drop_interval_ms(), 125);
        assert!(s.apply_action(GameAction::SoftDropOff));
        assert_eq!(s.drop_interval_ms(), 500);
    }
}
