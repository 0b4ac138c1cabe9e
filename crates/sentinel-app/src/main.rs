//! SENTINEL headless runner.
//!
//! Drives the simulation engine on the fixed tick in a background thread
//! and exposes a small operator console on stdin. The threat classifier
//! runs here, outside the tick loop; its results enter the core as a
//! queued command.

mod classifier;
mod game_loop;
mod persistence;

use std::io::BufRead;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::{info, warn};

use sentinel_core::commands::OperatorCommand;
use sentinel_core::state::WorldSnapshot;
use sentinel_core::types::Point;
use sentinel_sim::SimConfig;

use classifier::{demo_script, ThreatClassifier};
use game_loop::{spawn_game_loop, GameLoopCommand};
use persistence::Store;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let store = Store::new("sentinel-data");
    let persisted = match store.load() {
        Ok(state) => Some(state),
        Err(error) => {
            warn!(%error, "could not load persisted state; starting from seed data");
            None
        }
    };

    let latest_snapshot = Arc::new(Mutex::new(None));
    let cmd_tx = spawn_game_loop(
        SimConfig { seed, persisted },
        store,
        Arc::clone(&latest_snapshot),
    );
    let mut classifier = demo_script();

    info!(seed, "SENTINEL online");
    info!(
        "commands: scan [feed] | drone X Y [DESC] | flag X Y [DESC] | deterrent X Y | \
         register APT NAME | access | panic PHRASE | sos | end | status | quit"
    );

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = match parts.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => {
                let _ = cmd_tx.send(GameLoopCommand::Shutdown);
                break;
            }
            ["status"] => {
                print_status(&latest_snapshot);
                continue;
            }
            ["scan", rest @ ..] => {
                let feed = rest.first().copied().unwrap_or("gate");
                // A failed classification is "no anomalies detected".
                let anomalies = match classifier.analyze(feed) {
                    Ok(anomalies) => anomalies,
                    Err(error) => {
                        warn!(%error, feed, "threat classification failed; treating as no anomalies");
                        Vec::new()
                    }
                };
                info!(feed, count = anomalies.len(), "scan complete");
                OperatorCommand::IngestAnomalies { anomalies }
            }
            ["drone", x, y, desc @ ..] => match parse_point(x, y) {
                Some(target) => OperatorCommand::AssignDrone {
                    target,
                    description: join_or(desc, "operator-directed track"),
                },
                None => {
                    warn!("usage: drone X Y [DESC]");
                    continue;
                }
            },
            ["flag", x, y, desc @ ..] => match parse_point(x, y) {
                Some(target) => OperatorCommand::FlagPerson {
                    target,
                    description: join_or(desc, "person of interest"),
                },
                None => {
                    warn!("usage: flag X Y [DESC]");
                    continue;
                }
            },
            ["deterrent", x, y] => match parse_point(x, y) {
                Some(target) => OperatorCommand::ActivateDeterrent { target },
                None => {
                    warn!("usage: deterrent X Y");
                    continue;
                }
            },
            ["register", apartment, name @ ..] if !name.is_empty() => {
                OperatorCommand::RegisterResident {
                    name: name.join(" "),
                    apartment: (*apartment).into(),
                }
            }
            ["access"] => OperatorCommand::SimulateGateAccess,
            ["panic", phrase @ ..] if !phrase.is_empty() => OperatorCommand::PanicPhrase {
                phrase: phrase.join(" "),
            },
            ["sos"] => OperatorCommand::Sos,
            ["end"] => OperatorCommand::EndBreachProtocol,
            _ => {
                warn!(input = line.as_str(), "unrecognized command");
                continue;
            }
        };

        if cmd_tx.send(GameLoopCommand::Operator(command)).is_err() {
            break;
        }
    }

    Ok(())
}

fn parse_point(x: &str, y: &str) -> Option<Point> {
    Some(Point::new(x.parse().ok()?, y.parse().ok()?))
}

fn join_or(parts: &[&str], fallback: &str) -> String {
    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(" ")
    }
}

fn print_status(latest: &Mutex<Option<WorldSnapshot>>) {
    let Ok(lock) = latest.lock() else { return };
    match lock.as_ref() {
        None => info!("no snapshot yet"),
        Some(snap) => {
            info!(
                tick = snap.time.tick,
                breach = snap.breach.active,
                anomalies = snap.anomalies.len(),
                reports = snap.reports.len(),
                active_drones = snap.active_drones,
                ledger_height = snap.ledger.height,
                "world status"
            );
        }
    }
}
