//! Operator commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. The
//! threat classifier's results enter the core through `IngestAnomalies` —
//! the classification call itself runs outside the tick loop.

use serde::{Deserialize, Serialize};

use crate::types::Point;
use crate::world::AnomalyReport;

/// All operator actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperatorCommand {
    // --- Threat ingestion ---
    /// Results of a surveillance-feed scan. Replaces the current
    /// non-robbery anomaly set and runs the escalation policy for each
    /// entry. An empty list clears stale predictive threats.
    IngestAnomalies { anomalies: Vec<AnomalyReport> },

    // --- Manual dispatch ---
    /// Send the nearest available drone to track a target.
    AssignDrone { target: Point, description: String },
    /// Send the nearest available drone to observe a person of interest.
    FlagPerson { target: Point, description: String },
    /// Fire the deterrent station nearest to the target.
    ActivateDeterrent { target: Point },

    // --- Emergencies ---
    /// Panic phrase detected on a voice channel; treated as an active
    /// robbery at the map center.
    PanicPhrase { phrase: String },
    /// Operator SOS; treated as an active robbery at the operator home.
    Sos,
    /// Attempt to stand down the breach protocol. Rejected as a no-op
    /// while a robbery anomaly is outstanding or an apprehension is in
    /// progress.
    EndBreachProtocol,

    // --- Registry & access ---
    /// Register a new resident; home placement derives from the
    /// apartment code.
    RegisterResident { name: String, apartment: String },
    /// Simulate one voice-verified gate access attempt.
    SimulateGateAccess,
}
