//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Severity assigned to a detected anomaly by the threat classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    /// Lowercase wire/display name, matching the classifier contract.
    pub fn label(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
        }
    }
}

/// Status of a ground unit (Guard, Vehicle, or Police).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundStatus {
    /// Following a random road-network patrol loop.
    #[default]
    Patrolling,
    /// Holding off-map (Police only, between dispatches).
    Stationary,
    /// En route to an assigned threat.
    Responding,
    /// En route to a medium-severity investigation.
    Investigating,
    /// Holding position at a robbery scene while the dwell timer runs.
    Apprehending,
    /// Police only: heading back to the main gate after an apprehension.
    ReturningToStation,
}

/// Status of a drone unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneStatus {
    /// Wandering its assigned patrol sector.
    #[default]
    Patrolling,
    /// En route to an assigned point.
    Responding,
    /// Pursuing a threat (battery-preservation override does not apply).
    Tracking,
    /// Docked at the drone base, recharging.
    Charging,
    /// Low battery: heading back to the drone base.
    ReturningToBase,
    /// Hovering on station, classifying detected entities.
    Observing,
}

/// One of the four fixed patrol quadrants assigned to drones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Alpha,
    Bravo,
    Charlie,
    Delta,
}

/// Classification of an entity detected during drone observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityClass {
    Resident,
    Unknown,
}

/// Category of an audit-ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Anomaly,
    Registration,
    Deterrent,
    Drone,
    Breach,
    Access,
    Report,
    System,
    Patrol,
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}
