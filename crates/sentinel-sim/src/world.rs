//! The world-state aggregate owned by the simulation engine.
//!
//! The entire mutable state advances synchronously once per tick; nothing
//! outside the engine holds a reference into it, which is what makes the
//! per-tick pass race-free without locks.

use sentinel_core::constants::*;
use sentinel_core::enums::{DroneStatus, GroundStatus};
use sentinel_core::units::{Unit, UnitKind};
use sentinel_core::world::{
    AccessLog, Anomaly, BreachProtocol, BulletinMessage, DeterrentStation, Resident,
    ResidentReport,
};

use sentinel_map::layout;

/// Complete simulation state.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub units: Vec<Unit>,
    pub anomalies: Vec<Anomaly>,
    pub reports: Vec<ResidentReport>,
    pub residents: Vec<Resident>,
    pub access_logs: Vec<AccessLog>,
    pub bulletin: Vec<BulletinMessage>,
    pub deterrents: Vec<DeterrentStation>,
    pub breach: BreachProtocol,
}

impl WorldState {
    pub fn unit_mut(&mut self, id: &str) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn has_robbery_anomaly(&self) -> bool {
        self.anomalies.iter().any(|a| a.is_robbery)
    }

    /// Append a report, keeping only the most recent few.
    pub fn push_report(&mut self, report: ResidentReport) {
        self.reports.push(report);
        if self.reports.len() > MAX_REPORTS {
            let overflow = self.reports.len() - MAX_REPORTS;
            self.reports.drain(0..overflow);
        }
    }

    /// Append a bulletin message, keeping only the most recent few.
    pub fn push_bulletin(&mut self, message: BulletinMessage) {
        self.bulletin.push(message);
        if self.bulletin.len() > MAX_BULLETIN_MESSAGES {
            let overflow = self.bulletin.len() - MAX_BULLETIN_MESSAGES;
            self.bulletin.drain(0..overflow);
        }
    }

    /// Append an access log entry, keeping only the most recent few.
    pub fn push_access_log(&mut self, log: AccessLog) {
        self.access_logs.push(log);
        if self.access_logs.len() > MAX_ACCESS_LOGS {
            let overflow = self.access_logs.len() - MAX_ACCESS_LOGS;
            self.access_logs.drain(0..overflow);
        }
    }

    /// Breach deactivation: every unit returns to its idle status with
    /// all mission state cleared.
    pub fn reset_units_to_idle(&mut self) {
        for unit in &mut self.units {
            unit.clear_mission();
            match &mut unit.kind {
                UnitKind::Police(g) => {
                    g.status = GroundStatus::Stationary;
                    g.apprehend_ticks = 0;
                    unit.location = layout::OFF_MAP_STATION;
                }
                UnitKind::Guard(g) | UnitKind::Vehicle(g) => {
                    g.status = GroundStatus::Patrolling;
                    g.apprehend_ticks = 0;
                }
                UnitKind::Drone(d) => {
                    d.status = DroneStatus::Patrolling;
                    d.patrol_target = None;
                    d.observation_started_secs = None;
                    d.detections.clear();
                }
            }
        }
    }
}
