//! Apprehension dwell system.
//!
//! Runs before movement, so a unit that arrived on a robbery scene last
//! tick waits the full dwell before its anomaly clears — movement in the
//! arrival tick can never shortcut the dwell.

use sentinel_core::constants::APPREHEND_DWELL_TICKS;
use sentinel_core::enums::{EventKind, GroundStatus, NotifyLevel};
use sentinel_core::events::Notification;
use sentinel_core::types::SimTime;

use sentinel_ledger::Ledger;
use sentinel_map::layout;

use crate::world::WorldState;

/// Advance dwell timers for units already Apprehending; clear the
/// correlated anomaly and hand off once the dwell completes.
pub fn run(
    world: &mut WorldState,
    ledger: &mut Ledger,
    notifications: &mut Vec<Notification>,
    time: SimTime,
) {
    let mut completed = Vec::new();
    for (i, unit) in world.units.iter_mut().enumerate() {
        if let Some(g) = unit.ground_mut() {
            if g.status == GroundStatus::Apprehending {
                g.apprehend_ticks += 1;
                if g.apprehend_ticks >= APPREHEND_DWELL_TICKS {
                    completed.push(i);
                }
            }
        }
    }

    for i in completed {
        let anomaly_id = world.units[i].mission_anomaly;
        let cleared = anomaly_id.is_some_and(|id| {
            if let Some(pos) = world.anomalies.iter().position(|a| a.id == id) {
                world.anomalies.remove(pos);
                true
            } else {
                false
            }
        });

        if cleared {
            let description = format!(
                "Suspect apprehended by {}. Scene is secure.",
                world.units[i].name
            );
            ledger.append(EventKind::Patrol, description.clone(), time);
            notifications.push(Notification {
                message: description,
                level: NotifyLevel::Info,
                kind: Some(EventKind::Patrol),
                tick: time.tick,
            });
            // The incident that drove the breach is resolved.
            world.breach.trigger = None;
        }

        let unit = &mut world.units[i];
        let is_police = unit.is_police();
        unit.clear_mission();
        if let Some(g) = unit.ground_mut() {
            g.apprehend_ticks = 0;
            g.status = if is_police {
                GroundStatus::ReturningToStation
            } else {
                GroundStatus::Patrolling
            };
        }
        if is_police {
            unit.mission_target = Some(layout::GATE_ENTRANCE);
        }
    }
}
