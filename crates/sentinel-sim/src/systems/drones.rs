//! Drone subsystem: battery model, forced transitions, observation
//! expiry, and sector patrol target selection.

use rand_chacha::ChaCha8Rng;

use sentinel_core::constants::*;
use sentinel_core::enums::DroneStatus;
use sentinel_core::types::SimTime;

use sentinel_map::layout;

use crate::world::WorldState;

/// Run per-drone upkeep ahead of navigation and movement.
pub fn run(world: &mut WorldState, rng: &mut ChaCha8Rng, time: SimTime) {
    for unit in &mut world.units {
        let mut teleport_to_base = false;
        let mut expire_observation = false;
        {
            let Some(d) = unit.drone_mut() else { continue };

            if d.status == DroneStatus::Charging {
                d.battery = (d.battery + BATTERY_RECHARGE).min(BATTERY_MAX);
                if d.battery >= BATTERY_MAX {
                    d.status = DroneStatus::Patrolling;
                }
            } else {
                let drain = if matches!(d.status, DroneStatus::Tracking | DroneStatus::Observing) {
                    BATTERY_DRAIN_ACTIVE
                } else {
                    BATTERY_DRAIN_IDLE
                };
                d.battery -= drain;

                if d.battery <= 0.0 {
                    // Depleted: forced recovery at the base pad.
                    d.battery = 0.0;
                    d.status = DroneStatus::Charging;
                    d.patrol_target = None;
                    d.observation_started_secs = None;
                    d.detections.clear();
                    teleport_to_base = true;
                } else if d.battery < BATTERY_LOW_THRESHOLD
                    && !matches!(
                        d.status,
                        DroneStatus::Tracking
                            | DroneStatus::ReturningToBase
                            | DroneStatus::Charging
                    )
                {
                    // Battery preservation overrides everything except an
                    // active track.
                    d.status = DroneStatus::ReturningToBase;
                    d.patrol_target = None;
                }
            }

            if d.status == DroneStatus::Observing {
                if let Some(started) = d.observation_started_secs {
                    if time.elapsed_secs - started > OBSERVATION_DURATION_SECS {
                        d.status = DroneStatus::Patrolling;
                        d.observation_started_secs = None;
                        d.detections.clear();
                        expire_observation = true;
                    }
                }
            } else if !d.detections.is_empty() {
                // Stale detections from a prior observation.
                d.detections.clear();
            }
        }

        if teleport_to_base {
            unit.location = layout::DRONE_BASE;
            unit.clear_mission();
        }
        if expire_observation {
            unit.clear_mission();
        }

        // Sector patrol: a patrolling drone with no resolved target picks
        // a point in its quadrant and keeps it until arrival.
        let needs_patrol_target = unit.mission_target.is_none()
            && unit
                .drone()
                .is_some_and(|d| d.status == DroneStatus::Patrolling && d.patrol_target.is_none());
        if needs_patrol_target {
            let sector = unit.drone().and_then(|d| d.sector);
            let target = layout::patrol_point(sector, rng);
            if let Some(d) = unit.drone_mut() {
                d.patrol_target = Some(target);
            }
        }
    }
}
