//! Game loop thread — drives the engine at the fixed 2-second tick and
//! publishes snapshots.
//!
//! The engine is created inside the thread; commands arrive over an
//! `mpsc` channel and drain at the tick boundary. If a pass falls behind
//! the tick deadline, ticks coalesce (the deadline resets) rather than
//! overlapping.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use sentinel_core::commands::OperatorCommand;
use sentinel_core::state::WorldSnapshot;
use sentinel_sim::{PersistedState, SecurityEngine, SimConfig};

use crate::persistence::Store;

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub enum GameLoopCommand {
    Operator(OperatorCommand),
    Shutdown,
}

/// Spawn the game loop in a new thread. Returns the command sender for
/// the console to use.
pub fn spawn_game_loop(
    config: SimConfig,
    store: Store,
    latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("sentinel-game-loop".into())
        .spawn(move || {
            run_game_loop(config, store, cmd_rx, &latest_snapshot);
        })
        .expect("failed to spawn game loop thread");

    cmd_tx
}

/// The loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    store: Store,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
) {
    let mut engine = SecurityEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut persisted_height = engine.ledger().height();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Operator(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Write through whenever the audit trail grew
        if snapshot.ledger.height > persisted_height {
            persisted_height = snapshot.ledger.height;
            let state = PersistedState {
                residents: Some(snapshot.residents.clone()),
                access_logs: Some(snapshot.access_logs.clone()),
                ledger_blocks: Some(engine.ledger().blocks().to_vec()),
            };
            if let Err(error) = store.save(&state) {
                tracing::warn!(%error, "write-through persistence failed");
            }
        }

        // 4. Publish the latest snapshot for the console
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next tick deadline
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: coalesce missed ticks instead of spiraling.
            next_tick_time = now;
        }
    }
}
