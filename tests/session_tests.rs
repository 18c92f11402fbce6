//! Session tests - spawn, hold, gravity clock and locking

use blockfall::core::{Coord, GameSession, SequenceRandomizer, SessionConfig};
use blockfall::types::{GameAction, PieceKind, SoundCue};

fn session(kinds: &[PieceKind]) -> GameSession<SequenceRandomizer> {
    GameSession::with_randomizer(SessionConfig::default(), SequenceRandomizer::new(kinds)).unwrap()
}

#[test]
fn test_o_piece_falls_and_locks_at_bottom() {
    let mut s = session(&[PieceKind::O, PieceKind::T]);

    let mut event = None;
    for _ in 0..100 {
        event = s.tick(501);
        if event.is_some() {
            break;
        }
    }

    let event = event.expect("piece should lock");
    assert_eq!(event.kind, PieceKind::O);
    assert_eq!(event.rows_cleared, 0);
    assert!(!event.hard_drop);
    assert_eq!(event.cue(), SoundCue::Fall);

    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(s.grid().is_occupied(Coord::new(x, y)), Ok(true));
    }
    assert_eq!(s.grid().filled_count(), 4);

    // Next piece spawned fresh
    assert_eq!(s.active().kind(), PieceKind::T);
    assert_eq!(s.active().origin(), Coord::new(3, 0));
    assert_eq!(s.active().rotation(), 0);
}

#[test]
fn test_o_piece_takes_eighteen_steps_then_locks() {
    let mut s = session(&[PieceKind::O]);
    for step in 1..=18 {
        assert!(s.tick(501).is_none());
        assert_eq!(s.active().origin().y, step);
    }
    assert!(s.tick(501).is_some());
}

#[test]
fn test_tick_below_interval_does_not_move() {
    let mut s = session(&[PieceKind::L]);
    for _ in 0..31 {
        s.tick(16);
    }
    // 496ms accumulated
    assert_eq!(s.active().origin(), Coord::new(3, 0));
    s.tick(16);
    assert_eq!(s.active().origin(), Coord::new(3, 1));
    assert_eq!(s.active().elapsed_ms(), 0);
}

#[test]
fn test_soft_drop_quarters_interval() {
    let mut s = session(&[PieceKind::L]);
    s.set_soft_drop(true);
    assert_eq!(s.drop_interval_ms(), 125);

    s.tick(126);
    assert_eq!(s.active().origin().y, 1);

    s.set_soft_drop(false);
    s.tick(126);
    assert_eq!(s.active().origin().y, 1);
}

#[test]
fn test_hard_drop_lands_on_stack_and_spawns() {
    let mut s = session(&[PieceKind::O, PieceKind::I]);
    s.grid_mut().set(Coord::new(4, 19), Some(PieceKind::Z)).unwrap();

    let event = s.hard_drop().unwrap();
    assert!(event.hard_drop);

    for (x, y) in [(4, 17), (5, 17), (4, 18), (5, 18)] {
        assert_eq!(s.grid().is_occupied(Coord::new(x, y)), Ok(true));
    }
    // Lowest reachable: (5, 19) stays empty because (4, 19) blocks the left column
    assert_eq!(s.grid().is_occupied(Coord::new(5, 19)), Ok(false));
    assert_eq!(s.active().kind(), PieceKind::I);
}

#[test]
fn test_hard_drop_clears_rows() {
    let mut s = session(&[PieceKind::I, PieceKind::T]);
    *s.grid_mut() = blockfall::core::Grid::from_rows(&["III....III"]);

    let event = s.hard_drop().unwrap();
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.cue(), SoundCue::Clear);
    assert_eq!(s.grid().filled_count(), 0);
    assert_eq!(s.last_lock(), Some(event));
}

#[test]
fn test_hard_drop_requires_release() {
    let mut s = session(&[PieceKind::O]);
    assert!(s.apply_action(GameAction::HardDrop));
    assert!(!s.apply_action(GameAction::HardDrop));
    assert_eq!(s.grid().filled_count(), 4);

    assert!(s.apply_action(GameAction::HardDropRelease));
    assert!(s.apply_action(GameAction::HardDrop));
    assert_eq!(s.grid().filled_count(), 8);
}

#[test]
fn test_stash_into_empty_slot_spawns_new_piece() {
    let mut s = session(&[PieceKind::S, PieceKind::Z, PieceKind::L]);
    s.shift_right();
    s.rotate_right();
    s.tick(501);

    assert!(s.stash());

    let held = s.held().unwrap();
    assert_eq!(held.kind(), PieceKind::S);
    assert_eq!(held.origin(), Coord::new(3, 0));
    assert_eq!(held.rotation(), 1);
    assert!(held.is_stashed());

    assert_eq!(s.active().kind(), PieceKind::Z);
    assert_eq!(s.active().origin(), Coord::new(3, 0));
    assert!(!s.active().is_stashed());
}

#[test]
fn test_second_stash_before_lock_is_noop() {
    let mut s = session(&[PieceKind::S, PieceKind::Z, PieceKind::L]);
    assert!(s.stash());
    let held = *s.held().unwrap();
    let active = *s.active();

    assert!(!s.stash());
    assert_eq!(*s.held().unwrap(), held);
    assert_eq!(*s.active(), active);
}

#[test]
fn test_stash_swaps_after_lock() {
    let mut s = session(&[PieceKind::S, PieceKind::Z, PieceKind::L]);
    assert!(s.stash()); // hold S, active Z
    s.hard_drop(); // lock Z, active L
    s.release_hard_drop();

    assert!(s.stash());
    assert_eq!(s.active().kind(), PieceKind::S);
    assert!(s.active().is_stashed());
    assert_eq!(s.held().unwrap().kind(), PieceKind::L);

    // The piece that came out of hold cannot go straight back
    assert!(!s.stash());
    assert_eq!(s.active().kind(), PieceKind::S);
}

#[test]
fn test_held_preview_uses_relative_cells() {
    let mut s = session(&[PieceKind::O, PieceKind::T]);
    assert!(s.held_preview().is_none());
    s.stash();
    let (kind, cells) = s.held_preview().unwrap();
    assert_eq!(kind, PieceKind::O);
    assert_eq!(
        cells,
        [Coord::new(1, 0), Coord::new(2, 0), Coord::new(1, 1), Coord::new(2, 1)]
    );
}

#[test]
fn test_invalid_moves_are_noops() {
    let mut s = session(&[PieceKind::O]);
    for _ in 0..10 {
        s.shift_left();
    }
    let before = *s.active();
    assert!(!s.apply_action(GameAction::ShiftLeft));
    assert_eq!(*s.active(), before);
    assert_eq!(s.active_cells()[0].x, 0);
}

#[test]
fn test_spawn_blocked_when_stack_reaches_top() {
    let mut s = session(&[PieceKind::O, PieceKind::O]);
    assert!(!s.spawn_blocked());
    s.grid_mut().set(Coord::new(4, 0), Some(PieceKind::J)).unwrap();
    assert!(s.spawn_blocked());
}

#[test]
fn test_seeded_sessions_match() {
    let mut a = GameSession::new(SessionConfig::with_seed(99)).unwrap();
    let mut b = GameSession::new(SessionConfig::with_seed(99)).unwrap();
    for _ in 0..20 {
        assert_eq!(a.active().kind(), b.active().kind());
        a.hard_drop();
        a.release_hard_drop();
        b.hard_drop();
        b.release_hard_drop();
    }
    assert_eq!(a.grid(), b.grid());
}
