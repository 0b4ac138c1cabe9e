//! The unit data model: one tagged record covering all four unit variants.
//!
//! The base fields (identity, location, mission, planned path) are shared;
//! variant payloads carry only what that variant uses. All behavior lives
//! in the simulation systems — these are plain data.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{DroneStatus, EntityClass, GroundStatus, Sector};
use crate::types::Point;
use crate::world::AnomalyId;

/// An entity picked up during drone observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedEntity {
    pub class: EntityClass,
    pub location: Point,
}

/// Variant payload for Guard, Vehicle, and Police units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundState {
    pub status: GroundStatus,
    /// Dwell counter, meaningful only while Apprehending.
    pub apprehend_ticks: u32,
}

/// Variant payload for drones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DroneState {
    pub status: DroneStatus,
    /// Battery level, 0..=100.
    pub battery: f64,
    /// Assigned patrol quadrant, if any.
    pub sector: Option<Sector>,
    /// Current sector-patrol waypoint, kept until arrival.
    pub patrol_target: Option<Point>,
    /// Simulation time at which the current observation began.
    pub observation_started_secs: Option<f64>,
    /// Entities detected during the current observation.
    pub detections: Vec<DetectedEntity>,
}

/// Unit variant tag plus variant-specific state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UnitKind {
    Guard(GroundState),
    Vehicle(GroundState),
    Police(GroundState),
    Drone(DroneState),
}

/// A mobile unit. Owned exclusively by the simulation world; created once
/// at world initialization and mutated only by the tick scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub location: Point,
    /// Destination of the current mission, if any.
    pub mission_target: Option<Point>,
    /// Human-readable mission text, display only.
    pub mission_description: Option<String>,
    /// Stable correlation back to the originating anomaly.
    pub mission_anomaly: Option<AnomalyId>,
    /// Planned road path: coordinates not yet reached, in travel order.
    pub path: Vec<Point>,
    pub kind: UnitKind,
}

impl Unit {
    pub fn is_drone(&self) -> bool {
        matches!(self.kind, UnitKind::Drone(_))
    }

    pub fn is_police(&self) -> bool {
        matches!(self.kind, UnitKind::Police(_))
    }

    pub fn ground(&self) -> Option<&GroundState> {
        match &self.kind {
            UnitKind::Guard(g) | UnitKind::Vehicle(g) | UnitKind::Police(g) => Some(g),
            UnitKind::Drone(_) => None,
        }
    }

    pub fn ground_mut(&mut self) -> Option<&mut GroundState> {
        match &mut self.kind {
            UnitKind::Guard(g) | UnitKind::Vehicle(g) | UnitKind::Police(g) => Some(g),
            UnitKind::Drone(_) => None,
        }
    }

    pub fn drone(&self) -> Option<&DroneState> {
        match &self.kind {
            UnitKind::Drone(d) => Some(d),
            _ => None,
        }
    }

    pub fn drone_mut(&mut self) -> Option<&mut DroneState> {
        match &mut self.kind {
            UnitKind::Drone(d) => Some(d),
            _ => None,
        }
    }

    /// Drop all mission state: target, description, correlation, and path.
    pub fn clear_mission(&mut self) {
        self.mission_target = None;
        self.mission_description = None;
        self.mission_anomaly = None;
        self.path.clear();
    }

    /// Per-tick interpolation factor for this unit in its current status.
    pub fn speed_factor(&self) -> f64 {
        match &self.kind {
            UnitKind::Drone(_) => DRONE_SPEED,
            UnitKind::Guard(g) => match g.status {
                GroundStatus::Responding => GUARD_RESPONSE_SPEED,
                _ => GROUND_SPEED,
            },
            UnitKind::Vehicle(g) | UnitKind::Police(g) => match g.status {
                GroundStatus::Responding => VEHICLE_RESPONSE_SPEED,
                _ => GROUND_SPEED,
            },
        }
    }
}
