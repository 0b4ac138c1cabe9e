//! The threat escalation policy.
//!
//! A pure decision function keyed on threat level. Selection is greedy
//! nearest-by-Euclidean-distance with no unit reservation; a second
//! anomaly may legitimately pick the same unit once it frees up. This is
//! an accepted heuristic, not a global assignment solver.

use sentinel_core::enums::{DroneStatus, GroundStatus, ThreatLevel};
use sentinel_core::types::Point;
use sentinel_core::units::{Unit, UnitKind};
use sentinel_core::world::{Anomaly, DeterrentStation};

/// One step of an escalation plan, applied by the simulation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseAction {
    /// Enter the breach protocol (no-op if already active).
    ActivateBreach,
    /// Put the named drone on Tracking at the anomaly coordinate.
    AssignDroneTracking { unit_id: String },
    /// Fire the named deterrent station.
    ActivateDeterrent { station_id: String },
    /// Relocate the stationary police unit to the gate entrance and set
    /// it Responding.
    DispatchPolice { unit_id: String },
    /// Assign a ground unit to a mission with the given status and text.
    AssignGround {
        unit_id: String,
        status: GroundStatus,
        description: String,
    },
    /// Broadcast a community-wide emergency alert for an incident at the
    /// given location.
    BroadcastAlert { location: Point },
    /// Informational notice, no dispatch.
    Notice { message: String },
    /// Warning-level notice (dispatch shortfall or medium-threat
    /// heads-up); world state is otherwise unchanged.
    Warn { message: String },
}

/// The full plan for one anomaly.
#[derive(Debug, Clone, Default)]
pub struct ResponsePlan {
    pub actions: Vec<ResponseAction>,
}

/// A drone is available for dispatch while patrolling, heading home, or
/// loitering on an observation.
pub fn drone_available(unit: &Unit) -> bool {
    matches!(
        unit.drone().map(|d| d.status),
        Some(DroneStatus::Patrolling | DroneStatus::ReturningToBase | DroneStatus::Observing)
    )
}

/// Guards and vehicles are available only while patrolling. The police
/// unit is dispatched through its own path, never as a generic patrol.
pub fn ground_available(unit: &Unit) -> bool {
    matches!(
        &unit.kind,
        UnitKind::Guard(g) | UnitKind::Vehicle(g) if g.status == GroundStatus::Patrolling
    )
}

fn nearest<'a>(units: impl Iterator<Item = &'a Unit>, target: Point) -> Option<&'a Unit> {
    // min_by keeps the first of equal elements, so distance ties resolve
    // by roster order.
    units.min_by(|a, b| {
        a.location
            .distance_to(&target)
            .total_cmp(&b.location.distance_to(&target))
    })
}

fn nearest_station(stations: &[DeterrentStation], target: Point) -> Option<&DeterrentStation> {
    stations.iter().min_by(|a, b| {
        a.location
            .distance_to(&target)
            .total_cmp(&b.location.distance_to(&target))
    })
}

/// Compute the autonomous escalation plan for one anomaly.
pub fn plan_response(
    anomaly: &Anomaly,
    units: &[Unit],
    stations: &[DeterrentStation],
) -> ResponsePlan {
    let mut actions = Vec::new();
    let target = anomaly.location;

    match anomaly.threat_level {
        ThreatLevel::High => {
            actions.push(ResponseAction::ActivateBreach);

            match nearest(units.iter().filter(|u| drone_available(u)), target) {
                Some(drone) => actions.push(ResponseAction::AssignDroneTracking {
                    unit_id: drone.id.clone(),
                }),
                None => actions.push(ResponseAction::Warn {
                    message: "No drones available for assignment.".into(),
                }),
            }

            if let Some(station) = nearest_station(stations, target) {
                actions.push(ResponseAction::ActivateDeterrent {
                    station_id: station.id.clone(),
                });
            }

            if anomaly.is_robbery {
                let stationary_police = units.iter().find(|u| {
                    u.is_police()
                        && u.ground().is_some_and(|g| g.status == GroundStatus::Stationary)
                });
                match stationary_police {
                    Some(police) => actions.push(ResponseAction::DispatchPolice {
                        unit_id: police.id.clone(),
                    }),
                    None => {
                        actions.push(ResponseAction::Warn {
                            message: "Police unavailable. Dispatching nearest security patrol."
                                .into(),
                        });
                        push_ground_assignment(
                            &mut actions,
                            units,
                            target,
                            GroundStatus::Responding,
                            anomaly.description.clone(),
                        );
                    }
                }
                actions.push(ResponseAction::BroadcastAlert { location: target });
            } else {
                push_ground_assignment(
                    &mut actions,
                    units,
                    target,
                    GroundStatus::Responding,
                    anomaly.description.clone(),
                );
            }
        }
        ThreatLevel::Medium => {
            actions.push(ResponseAction::Warn {
                message:
                    "Medium threat detected. Activating deterrent and dispatching patrol to investigate."
                        .into(),
            });
            if let Some(station) = nearest_station(stations, target) {
                actions.push(ResponseAction::ActivateDeterrent {
                    station_id: station.id.clone(),
                });
            }
            push_ground_assignment(
                &mut actions,
                units,
                target,
                GroundStatus::Investigating,
                "investigate area".into(),
            );
        }
        ThreatLevel::Low => {
            actions.push(ResponseAction::Notice {
                message: format!(
                    "Predictive Threat (Threat: low): {}",
                    anomaly.description
                ),
            });
        }
    }

    ResponsePlan { actions }
}

fn push_ground_assignment(
    actions: &mut Vec<ResponseAction>,
    units: &[Unit],
    target: Point,
    status: GroundStatus,
    description: String,
) {
    match nearest(units.iter().filter(|u| ground_available(u)), target) {
        Some(unit) => actions.push(ResponseAction::AssignGround {
            unit_id: unit.id.clone(),
            status,
            description,
        }),
        None => actions.push(ResponseAction::Warn {
            message: "No patrol units available for dispatch.".into(),
        }),
    }
}
