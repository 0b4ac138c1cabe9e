//! Movement integration and arrival transitions.
//!
//! Ground units follow their planned path; drones fly direct to their
//! resolved target. Arrival within the threshold pops the next path
//! waypoint or runs the arrival transition; otherwise the unit advances
//! by fractional interpolation toward the target (an exponential-decay
//! approach profile — a documented characteristic of the simulation).

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sentinel_core::constants::*;
use sentinel_core::enums::{DroneStatus, EntityClass, GroundStatus};
use sentinel_core::types::{Point, SimTime};
use sentinel_core::units::{DetectedEntity, UnitKind};

use sentinel_map::layout;

use crate::world::WorldState;

/// Advance every mobile unit one tick.
pub fn run(world: &mut WorldState, rng: &mut ChaCha8Rng, time: SimTime) {
    for i in 0..world.units.len() {
        let target = {
            let unit = &world.units[i];
            match &unit.kind {
                UnitKind::Drone(d) => match d.status {
                    DroneStatus::Charging => None,
                    DroneStatus::ReturningToBase => Some(layout::DRONE_BASE),
                    DroneStatus::Patrolling => unit.mission_target.or(d.patrol_target),
                    _ => unit.mission_target,
                },
                UnitKind::Guard(g) | UnitKind::Vehicle(g) | UnitKind::Police(g) => {
                    if matches!(g.status, GroundStatus::Stationary | GroundStatus::Apprehending) {
                        None
                    } else {
                        // Ground units move only along the planned path;
                        // an empty path is the hold-position condition.
                        unit.path.first().copied()
                    }
                }
            }
        };

        let Some(target) = target else { continue };

        if world.units[i].location.distance_to(&target) < ARRIVAL_THRESHOLD {
            handle_arrival(world, i, rng, time);
        } else {
            let unit = &mut world.units[i];
            let factor = unit.speed_factor();
            unit.location = unit.location.step_toward(&target, factor);
        }
    }
}

/// A unit reached its current target: pop the path head, or run the
/// status transition for a final arrival.
fn handle_arrival(world: &mut WorldState, index: usize, rng: &mut ChaCha8Rng, time: SimTime) {
    {
        let unit = &mut world.units[index];
        if !unit.path.is_empty() {
            unit.path.remove(0);
            if !unit.path.is_empty() {
                return;
            }
        }
    }

    // Police heading home: dock once inside the northern band, otherwise
    // keep the path-following loop running toward the gate.
    let police_returning = {
        let unit = &world.units[index];
        unit.is_police()
            && unit
                .ground()
                .is_some_and(|g| g.status == GroundStatus::ReturningToStation)
    };
    if police_returning {
        let unit = &mut world.units[index];
        if unit.location.y < STATION_DOCK_BAND_Y {
            unit.location = layout::OFF_MAP_STATION;
            unit.clear_mission();
            if let Some(g) = unit.ground_mut() {
                g.status = GroundStatus::Stationary;
            }
        }
        return;
    }

    // A ground unit arriving on a robbery-flagged Responding mission
    // begins the apprehension dwell in place.
    let begins_apprehension = {
        let unit = &world.units[index];
        !unit.is_drone()
            && unit
                .ground()
                .is_some_and(|g| g.status == GroundStatus::Responding)
            && unit.mission_anomaly.is_some_and(|id| {
                world
                    .anomalies
                    .iter()
                    .any(|a| a.id == id && a.is_robbery)
            })
    };
    if begins_apprehension {
        let unit = &mut world.units[index];
        unit.path.clear();
        if let Some(g) = unit.ground_mut() {
            g.status = GroundStatus::Apprehending;
            g.apprehend_ticks = 0;
        }
        return;
    }

    // Ordinary arrival: the mission is complete.
    let unit = &mut world.units[index];
    unit.clear_mission();
    match &mut unit.kind {
        UnitKind::Drone(d) => match d.status {
            DroneStatus::Patrolling | DroneStatus::Tracking | DroneStatus::Responding => {
                d.status = DroneStatus::Observing;
                d.observation_started_secs = Some(time.elapsed_secs);
                d.patrol_target = None;
                d.detections = synthesize_detections(rng);
            }
            DroneStatus::ReturningToBase => {
                d.status = DroneStatus::Charging;
                d.patrol_target = None;
            }
            _ => {}
        },
        UnitKind::Guard(g) | UnitKind::Vehicle(g) | UnitKind::Police(g) => {
            g.status = GroundStatus::Patrolling;
        }
    }
}

/// 1-3 entities at random nearby coordinates, each classified Resident
/// or Unknown.
fn synthesize_detections(rng: &mut ChaCha8Rng) -> Vec<DetectedEntity> {
    let count = rng.gen_range(OBSERVATION_MIN_ENTITIES..=OBSERVATION_MAX_ENTITIES);
    (0..count)
        .map(|_| {
            let class = if rng.gen_bool(OBSERVATION_RESIDENT_PROB) {
                EntityClass::Resident
            } else {
                EntityClass::Unknown
            };
            DetectedEntity {
                class,
                location: Point::new(
                    20.0 + rng.gen::<f64>() * 60.0,
                    20.0 + rng.gen::<f64>() * 60.0,
                ),
            }
        })
        .collect()
}
