//! Road-network path planning for ground units.
//!
//! Mission paths run from the waypoint nearest the unit to the waypoint
//! nearest the mission target, with the literal target coordinate
//! appended when it sits off the road, so units end precisely on target.
//! Patrolling units with no plan pick a random waypoint to wander to.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sentinel_core::constants::PATH_TARGET_APPEND_THRESHOLD;
use sentinel_core::enums::GroundStatus;
use sentinel_core::types::Point;

use sentinel_map::{RoadGraph, WaypointId};

use crate::world::WorldState;

/// Plan paths for ground units that need one.
pub fn run(world: &mut WorldState, graph: &RoadGraph, rng: &mut ChaCha8Rng) {
    for unit in &mut world.units {
        let Some(status) = unit.ground().map(|g| g.status) else {
            continue;
        };
        if matches!(status, GroundStatus::Stationary | GroundStatus::Apprehending) {
            continue;
        }
        if !unit.path.is_empty() {
            continue;
        }

        if let Some(target) = unit.mission_target {
            let start = graph.nearest_waypoint(unit.location);
            let end = graph.nearest_waypoint(target);
            let node_path = graph.shortest_path(start, end);
            if node_path.is_empty() {
                // Cannot happen on the connected campus graph; recoverable
                // hold-position condition, flagged as a graph concern.
                tracing::warn!(unit = %unit.id, "no road route to mission target; holding");
                continue;
            }
            let mut path: Vec<Point> = node_path.iter().map(|&id| graph.position(id)).collect();
            if let Some(last) = path.last() {
                if last.distance_to(&target) > PATH_TARGET_APPEND_THRESHOLD {
                    path.push(target);
                }
            }
            unit.path = path;
        } else if status == GroundStatus::Patrolling {
            let start = graph.nearest_waypoint(unit.location);
            let pick = WaypointId(rng.gen_range(0..graph.waypoints().len()));
            if pick != start {
                let node_path = graph.shortest_path(start, pick);
                unit.path = node_path.iter().map(|&id| graph.position(id)).collect();
            }
        }
    }
}
