//! Headless Blockfall runner (default binary).
//!
//! Drives a session at a fixed frame delta with a simple autoplay policy and logs every lock.
//! There is no renderer; the final grid is printed as text.

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::core::{GameSession, SessionConfig};
use blockfall::types::{GameAction, SoundCue, BASE_DROP_MS, SOFT_DROP_DIVISOR};

/// Run a falling-block session without a display
#[derive(Debug, Parser)]
#[command(name = "blockfall", version)]
struct Args {
    /// Seed for piece selection (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per gravity step
    #[arg(long, default_value_t = BASE_DROP_MS)]
    gravity_ms: u32,

    /// Soft drop divides the gravity interval by this
    #[arg(long, default_value_t = SOFT_DROP_DIVISOR)]
    soft_drop_divisor: u32,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Milliseconds per frame
    #[arg(long, default_value_t = 16)]
    frame_ms: u32,

    /// Hard drop every N frames (0 lets gravity do all the work)
    #[arg(long, default_value_t = 30)]
    drop_every: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.frame_ms == 0 {
        bail!("--frame-ms must be greater than zero");
    }

    let config = SessionConfig {
        gravity_interval_ms: args.gravity_ms,
        soft_drop_divisor: args.soft_drop_divisor,
        seed: args.seed,
    };
    let mut session = GameSession::new(config)?;
    info!(?config, frames = args.frames, "starting session");

    run(&mut session, &args);

    print!("{}", session.grid());
    Ok(())
}

fn run(session: &mut GameSession, args: &Args) {
    let mut locks = 0u32;
    let mut rows = 0usize;

    // Park the first piece in the hold slot so the swap path is exercised.
    session.apply_action(GameAction::Stash);

    for frame in 1..=args.frames {
        if args.drop_every > 0 && frame % args.drop_every == 0 {
            // Fan pieces across the grid: shift toward a column derived from the lock count.
            let target = (locks % 8) as i8;
            let dir = if session.active().origin().x > target {
                GameAction::ShiftLeft
            } else {
                GameAction::ShiftRight
            };
            while session.active().origin().x != target && session.apply_action(dir) {}
            if locks % 3 == 0 {
                session.apply_action(GameAction::RotateRight);
            }
            session.apply_action(GameAction::HardDrop);
            session.apply_action(GameAction::HardDropRelease);
        }

        session.tick(args.frame_ms);

        if let Some(event) = session.take_last_lock() {
            locks += 1;
            rows += event.rows_cleared;
            match event.cue() {
                SoundCue::Clear => info!(kind = ?event.kind, rows = event.rows_cleared, "clear"),
                SoundCue::Fall => info!(kind = ?event.kind, "fall"),
            }
            if locks % 5 == 0 {
                session.apply_action(GameAction::Stash);
            }
        }

        if session.spawn_blocked() {
            warn!(frame, locks, "stack reached the spawn area");
            break;
        }
    }

    info!(locks, rows, "session finished");
}
