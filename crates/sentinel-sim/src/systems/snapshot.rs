//! Snapshot system: builds a complete WorldSnapshot from the current
//! world state.
//!
//! Read-only — it never modifies the world.

use sentinel_core::enums::DroneStatus;
use sentinel_core::events::Notification;
use sentinel_core::state::{BreachView, LedgerView, WorldSnapshot};
use sentinel_core::types::SimTime;

use sentinel_ledger::Ledger;

use crate::world::WorldState;

/// Build the per-tick snapshot.
pub fn build_snapshot(
    world: &WorldState,
    time: &SimTime,
    ledger: &Ledger,
    notifications: Vec<Notification>,
) -> WorldSnapshot {
    let active_drones = world
        .units
        .iter()
        .filter(|u| {
            u.drone()
                .is_some_and(|d| d.status != DroneStatus::Charging)
        })
        .count() as u32;

    WorldSnapshot {
        time: *time,
        breach: BreachView {
            active: world.breach.active,
            trigger: world.breach.trigger.clone(),
        },
        units: world.units.clone(),
        anomalies: world.anomalies.clone(),
        reports: world.reports.clone(),
        deterrents: world.deterrents.clone(),
        residents: world.residents.clone(),
        access_logs: world.access_logs.clone(),
        bulletin: world.bulletin.clone(),
        notifications,
        ledger: LedgerView {
            height: ledger.height(),
            head_hash: ledger.head_hash().to_string(),
        },
        active_drones,
    }
}
