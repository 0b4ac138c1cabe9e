//! World records outside the unit roster: anomalies, residents, reports,
//! access logs, deterrent stations, bulletin traffic, and breach state.

use serde::{Deserialize, Serialize};

use crate::enums::ThreatLevel;
use crate::types::Point;

/// Stable anomaly identifier, assigned at ingestion.
///
/// Mission correlation uses this identifier rather than the description
/// text, so two distinct anomalies with identical wording are never
/// conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnomalyId(pub u64);

/// A transient detected threat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: AnomalyId,
    pub description: String,
    pub location: Point,
    pub threat_level: ThreatLevel,
    /// Robbery anomalies drive the breach protocol and require
    /// apprehension to clear. At most one is active at a time.
    pub is_robbery: bool,
}

/// Raw anomaly data as returned by the external threat classifier,
/// before an identifier is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub threat_level: ThreatLevel,
}

/// Global emergency state. Transition logic lives in sentinel-response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreachProtocol {
    pub active: bool,
    /// The anomaly that triggered the current activation. Cleared when
    /// the incident is apprehended.
    pub trigger: Option<Anomaly>,
}

/// A fixed sonic-deterrent installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeterrentStation {
    pub id: String,
    pub location: Point,
    /// Tick of the most recent activation.
    pub last_activated: Option<u64>,
}

/// A registered resident in the biometric directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resident {
    pub id: String,
    pub name: String,
    pub apartment: String,
    /// Biometric match confidence in percent, drifts within 98.0..=99.9.
    pub biometric_confidence: f64,
    pub last_sync_tick: u64,
    pub home: Option<Point>,
}

/// A crowd-sourced incident report from a resident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidentReport {
    pub id: u64,
    pub tick: u64,
    pub location: Point,
    pub description: String,
}

/// One gate access attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLog {
    pub tick: u64,
    pub location: String,
    pub success: bool,
    pub description: String,
}

/// A message on the community bulletin feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletinMessage {
    pub author: String,
    pub text: String,
    pub tick: u64,
}

impl BreachProtocol {
    /// Whether the triggering anomaly is still present in the active set.
    pub fn trigger_still_active(&self, anomalies: &[Anomaly]) -> bool {
        self.trigger
            .as_ref()
            .is_some_and(|t| anomalies.iter().any(|a| a.id == t.id))
    }
}
