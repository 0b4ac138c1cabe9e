//! World snapshot — the complete visible state produced after each tick.

use serde::{Deserialize, Serialize};

use crate::events::Notification;
use crate::types::SimTime;
use crate::units::Unit;
use crate::world::{
    AccessLog, Anomaly, BulletinMessage, DeterrentStation, Resident, ResidentReport,
};

/// Breach protocol status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreachView {
    pub active: bool,
    pub trigger: Option<Anomaly>,
}

/// Audit ledger status for display; full blocks live behind the ledger
/// sink, the snapshot carries only the chain head.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerView {
    pub height: u64,
    pub head_hash: String,
}

/// Complete world state emitted after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub breach: BreachView,
    pub units: Vec<Unit>,
    pub anomalies: Vec<Anomaly>,
    pub reports: Vec<ResidentReport>,
    pub deterrents: Vec<DeterrentStation>,
    pub residents: Vec<Resident>,
    pub access_logs: Vec<AccessLog>,
    pub bulletin: Vec<BulletinMessage>,
    /// Notifications raised during this tick.
    pub notifications: Vec<Notification>,
    pub ledger: LedgerView,
    /// Drones not currently charging.
    pub active_drones: u32,
}
