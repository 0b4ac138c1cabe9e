//! Simulation engine — the core of the system.
//!
//! `SecurityEngine` owns the world state, processes operator commands,
//! runs all systems in a fixed order, and produces `WorldSnapshot`s.
//! Completely headless, enabling deterministic testing: the same seed
//! always produces the same simulation.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use sentinel_core::commands::OperatorCommand;
use sentinel_core::constants::ACCESS_SUCCESS_PROB;
use sentinel_core::enums::{DroneStatus, EventKind, GroundStatus, NotifyLevel, ThreatLevel};
use sentinel_core::events::Notification;
use sentinel_core::state::WorldSnapshot;
use sentinel_core::types::{Point, SimTime};
use sentinel_core::world::{
    AccessLog, Anomaly, AnomalyId, AnomalyReport, BulletinMessage, Resident,
};

use sentinel_ledger::{Ledger, LedgerBlock};
use sentinel_map::{layout, RoadGraph};
use sentinel_response::policy::drone_available;
use sentinel_response::{breach, plan_response, ResponseAction, ResponsePlan};

use crate::systems;
use crate::world::WorldState;
use crate::world_setup;

/// Durable state restored from the external store at startup. Absent
/// fields fall back to the fixed seed dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    pub residents: Option<Vec<Resident>>,
    pub access_logs: Option<Vec<AccessLog>>,
    pub ledger_blocks: Option<Vec<LedgerBlock>>,
}

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Durable state restored from the external store, if any.
    pub persisted: Option<PersistedState>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            persisted: None,
        }
    }
}

/// The simulation engine. Owns the world and all sim state.
pub struct SecurityEngine {
    world: WorldState,
    graph: RoadGraph,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<OperatorCommand>,
    ledger: Ledger,
    notifications: Vec<Notification>,
    next_anomaly_id: u64,
    next_report_id: u64,
}

impl SecurityEngine {
    /// Create a new engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let persisted = config.persisted.unwrap_or_default();
        let world = world_setup::initial_world(&mut rng, persisted.residents, persisted.access_logs);
        let ledger = match persisted.ledger_blocks {
            Some(blocks) => Ledger::from_blocks(blocks),
            None => Ledger::new(),
        };

        let mut engine = Self {
            world,
            graph: RoadGraph::campus(),
            time: SimTime::default(),
            rng,
            command_queue: VecDeque::new(),
            ledger,
            notifications: Vec::new(),
            next_anomaly_id: 1,
            next_report_id: 1,
        };
        engine.record(EventKind::System, "System online. All units deployed.");
        engine
    }

    /// Queue an operator command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: OperatorCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = OperatorCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let notifications = std::mem::take(&mut self.notifications);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.ledger, notifications)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Read-only view of the world state.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Read-only view of the audit ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Direct world access for test setup.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single operator command.
    fn handle_command(&mut self, command: OperatorCommand) {
        match command {
            OperatorCommand::IngestAnomalies { anomalies } => {
                self.ingest_anomalies(anomalies);
            }
            OperatorCommand::AssignDrone {
                target,
                description,
            } => {
                self.assign_drone_manual(target, description, DroneStatus::Tracking);
            }
            OperatorCommand::FlagPerson {
                target,
                description,
            } => {
                self.assign_drone_manual(target, description, DroneStatus::Observing);
            }
            OperatorCommand::ActivateDeterrent { target } => {
                let nearest = self
                    .world
                    .deterrents
                    .iter()
                    .min_by(|a, b| {
                        a.location
                            .distance_to(&target)
                            .total_cmp(&b.location.distance_to(&target))
                    })
                    .map(|s| s.id.clone());
                if let Some(station_id) = nearest {
                    self.activate_deterrent(&station_id, target, false);
                }
            }
            OperatorCommand::PanicPhrase { phrase } => {
                self.spawn_robbery(format!("Panic Phrase: \"{phrase}\""), Point::new(50.0, 50.0));
            }
            OperatorCommand::Sos => {
                self.spawn_robbery("SOS Signal from Operator".into(), layout::OPERATOR_HOME);
            }
            OperatorCommand::EndBreachProtocol => {
                // Rejected as a no-op while a robbery anomaly is active or
                // an apprehension is in progress.
                if self.world.breach.active
                    && breach::can_deactivate(&self.world.anomalies, &self.world.units)
                {
                    self.deactivate_breach();
                }
            }
            OperatorCommand::RegisterResident { name, apartment } => {
                self.register_resident(name, apartment);
            }
            OperatorCommand::SimulateGateAccess => {
                self.simulate_gate_access();
            }
        }
    }

    /// A surveillance scan supersedes stale predictive threats, but an
    /// active robbery stays until apprehended.
    fn ingest_anomalies(&mut self, reports: Vec<AnomalyReport>) {
        self.world.anomalies.retain(|a| a.is_robbery);

        let mut created = Vec::new();
        for report in reports {
            let anomaly = Anomaly {
                id: AnomalyId(self.next_anomaly_id),
                description: report.description,
                location: Point::new(report.x.clamp(0.0, 100.0), report.y.clamp(0.0, 100.0)),
                threat_level: report.threat_level,
                is_robbery: false,
            };
            self.next_anomaly_id += 1;
            self.record(
                EventKind::Anomaly,
                format!(
                    "Predictive threat ({}): {}",
                    anomaly.threat_level.label(),
                    anomaly.description
                ),
            );
            self.world.anomalies.push(anomaly.clone());
            created.push(anomaly);
        }

        for anomaly in created {
            let plan = plan_response(&anomaly, &self.world.units, &self.world.deterrents);
            self.apply_plan(plan, &anomaly);
        }
    }

    /// Manual drone dispatch: Tracking for threat pursuit, Observing for
    /// person-of-interest flagging.
    fn assign_drone_manual(&mut self, target: Point, description: String, status: DroneStatus) {
        let nearest = self
            .world
            .units
            .iter()
            .filter(|u| drone_available(u))
            .min_by(|a, b| {
                a.location
                    .distance_to(&target)
                    .total_cmp(&b.location.distance_to(&target))
            })
            .map(|u| u.id.clone());

        let Some(unit_id) = nearest else {
            let message = match status {
                DroneStatus::Observing => "No drones available for observation.",
                _ => "No drones available for assignment.",
            };
            self.notify(message, NotifyLevel::Warning, Some(EventKind::Drone));
            return;
        };

        let mut name = String::new();
        let observation_start = self.time.elapsed_secs;
        if let Some(unit) = self.world.unit_mut(&unit_id) {
            name = unit.name.clone();
            unit.mission_target = Some(target);
            unit.mission_description = Some(description.clone());
            unit.mission_anomaly = None;
            unit.path.clear();
            if let Some(d) = unit.drone_mut() {
                d.status = status;
                d.patrol_target = None;
                d.observation_started_secs = match status {
                    DroneStatus::Observing => Some(observation_start),
                    _ => None,
                };
            }
        }

        let message = match status {
            DroneStatus::Observing => {
                format!("{name} assigned to observe person of interest: {description}.")
            }
            _ => format!("{name} assigned to threat: {description}."),
        };
        self.record(EventKind::Drone, message.clone());
        self.notify(message, NotifyLevel::Info, Some(EventKind::Drone));
    }

    fn activate_deterrent(&mut self, station_id: &str, target: Point, autonomous: bool) {
        if let Some(station) = self
            .world
            .deterrents
            .iter_mut()
            .find(|s| s.id == station_id)
        {
            station.last_activated = Some(self.time.tick);
        }
        let prefix = if autonomous { "AUTONOMOUS: " } else { "" };
        let message = format!(
            "{prefix}Sonic deterrent activated near [{:.0}, {:.0}]",
            target.x, target.y
        );
        self.record(EventKind::Deterrent, message.clone());
        self.notify(message, NotifyLevel::Info, Some(EventKind::Deterrent));
    }

    /// Synthesize a robbery-flagged high anomaly and run the full policy.
    /// At most one robbery is active at a time.
    fn spawn_robbery(&mut self, description: String, location: Point) {
        if self.world.has_robbery_anomaly() {
            self.notify(
                "A robbery incident is already in progress.",
                NotifyLevel::Warning,
                Some(EventKind::Breach),
            );
            return;
        }
        let anomaly = Anomaly {
            id: AnomalyId(self.next_anomaly_id),
            description,
            location,
            threat_level: ThreatLevel::High,
            is_robbery: true,
        };
        self.next_anomaly_id += 1;
        self.world.anomalies.push(anomaly.clone());

        let plan = plan_response(&anomaly, &self.world.units, &self.world.deterrents);
        self.apply_plan(plan, &anomaly);
    }

    fn register_resident(&mut self, name: String, apartment: String) {
        let home = layout::home_location_for(&apartment, &mut self.rng);
        let confidence = ((98.5 + self.rng.gen::<f64>() * 1.5) * 10.0).round() / 10.0;
        self.world.residents.push(Resident {
            id: format!("res{}", self.world.residents.len() + 1),
            name: name.clone(),
            apartment,
            biometric_confidence: confidence,
            last_sync_tick: self.time.tick,
            home,
        });

        let message = format!("New resident registered: {name}.");
        self.record(EventKind::Registration, message.clone());
        self.notify(message, NotifyLevel::Info, Some(EventKind::Registration));
    }

    fn simulate_gate_access(&mut self) {
        if self.world.residents.is_empty() {
            return;
        }
        let success = self.rng.gen_bool(ACCESS_SUCCESS_PROB);
        let index = self.rng.gen_range(0..self.world.residents.len());
        let description = if success {
            format!("VoicePrint verified for {}.", self.world.residents[index].name)
        } else {
            "VoicePrint mismatch. Access denied.".to_string()
        };

        self.world.push_access_log(AccessLog {
            tick: self.time.tick,
            location: "Main Gate".into(),
            success,
            description: description.clone(),
        });
        self.record(EventKind::Access, description.clone());
        let level = if success {
            NotifyLevel::Info
        } else {
            NotifyLevel::Warning
        };
        self.notify(description, level, Some(EventKind::Access));
    }

    /// Apply one escalation plan. All plan-driven actions are autonomous
    /// decisions and go to the audit ledger.
    fn apply_plan(&mut self, plan: ResponsePlan, anomaly: &Anomaly) {
        for action in plan.actions {
            match action {
                ResponseAction::ActivateBreach => {
                    if !self.world.breach.active {
                        self.world.breach.active = true;
                        self.world.breach.trigger = Some(anomaly.clone());
                        let message = format!(
                            "AUTONOMOUS: EMERGENCY PROTOCOL ACTIVE: {}",
                            anomaly.description
                        );
                        self.record(EventKind::Breach, message.clone());
                        self.notify(message, NotifyLevel::Error, Some(EventKind::Breach));
                    }
                }
                ResponseAction::AssignDroneTracking { unit_id } => {
                    let mut name = String::new();
                    if let Some(unit) = self.world.unit_mut(&unit_id) {
                        name = unit.name.clone();
                        unit.mission_target = Some(anomaly.location);
                        unit.mission_description = Some(anomaly.description.clone());
                        unit.mission_anomaly = Some(anomaly.id);
                        unit.path.clear();
                        if let Some(d) = unit.drone_mut() {
                            d.status = DroneStatus::Tracking;
                            d.patrol_target = None;
                            d.observation_started_secs = None;
                        }
                    }
                    let message = format!(
                        "AUTONOMOUS: {name} assigned to threat: {}.",
                        anomaly.description
                    );
                    self.record(EventKind::Drone, message.clone());
                    self.notify(message, NotifyLevel::Info, Some(EventKind::Drone));
                }
                ResponseAction::ActivateDeterrent { station_id } => {
                    self.activate_deterrent(&station_id, anomaly.location, true);
                }
                ResponseAction::DispatchPolice { unit_id } => {
                    let mut name = String::new();
                    if let Some(unit) = self.world.unit_mut(&unit_id) {
                        name = unit.name.clone();
                        unit.location = layout::GATE_ENTRANCE;
                        unit.mission_target = Some(anomaly.location);
                        unit.mission_description = Some(anomaly.description.clone());
                        unit.mission_anomaly = Some(anomaly.id);
                        unit.path.clear();
                        if let Some(g) = unit.ground_mut() {
                            g.status = GroundStatus::Responding;
                            g.apprehend_ticks = 0;
                        }
                    }
                    let message = format!(
                        "Police unit {name} dispatched to incident, entering via Main Gate."
                    );
                    self.record(EventKind::Patrol, message.clone());
                    self.notify(message, NotifyLevel::Warning, Some(EventKind::Patrol));
                }
                ResponseAction::AssignGround {
                    unit_id,
                    status,
                    description,
                } => {
                    let mut name = String::new();
                    if let Some(unit) = self.world.unit_mut(&unit_id) {
                        name = unit.name.clone();
                        unit.mission_target = Some(anomaly.location);
                        unit.mission_description = Some(description.clone());
                        unit.mission_anomaly = Some(anomaly.id);
                        unit.path.clear();
                        if let Some(g) = unit.ground_mut() {
                            g.status = status;
                            g.apprehend_ticks = 0;
                        }
                    }
                    let message = format!("AUTONOMOUS: {name} assigned to {description}.");
                    self.record(EventKind::Patrol, message.clone());
                    self.notify(message, NotifyLevel::Info, Some(EventKind::Patrol));
                }
                ResponseAction::BroadcastAlert { location } => {
                    let feature = layout::nearest_feature_name(location);
                    let tick = self.time.tick;
                    self.world.push_bulletin(BulletinMessage {
                        author: "Sentinel Control".into(),
                        text: format!(
                            "EMERGENCY ALERT: Active security incident reported near the \
                             {feature}. Please stay indoors and await further instructions."
                        ),
                        tick,
                    });
                }
                ResponseAction::Notice { message } => {
                    self.notify(message, NotifyLevel::Info, Some(EventKind::Anomaly));
                }
                ResponseAction::Warn { message } => {
                    self.notify(message, NotifyLevel::Warning, Some(EventKind::Anomaly));
                }
            }
        }
    }

    /// Stand the breach protocol down and return every unit to idle.
    fn deactivate_breach(&mut self) {
        self.world.breach.active = false;
        self.world.breach.trigger = None;
        self.world.reset_units_to_idle();

        let message = "Emergency Protocol deactivated. All units returning to patrol status.";
        self.record(EventKind::System, message);
        self.notify(message, NotifyLevel::Info, Some(EventKind::System));
    }

    /// Run all systems in order. Apprehension runs first so a unit that
    /// arrived last tick serves the full dwell before its anomaly clears.
    fn run_systems(&mut self) {
        // 1. Apprehension dwell timers
        systems::apprehension::run(
            &mut self.world,
            &mut self.ledger,
            &mut self.notifications,
            self.time,
        );
        // 2. Drone upkeep: battery, observation expiry, patrol targets
        systems::drones::run(&mut self.world, &mut self.rng, self.time);
        // 3. Road path planning for ground units
        systems::navigation::run(&mut self.world, &self.graph, &mut self.rng);
        // 4. Movement integration and arrival transitions
        systems::movement::run(&mut self.world, &mut self.rng, self.time);
        // 5. Stochastic world events
        let escalated = systems::world_events::run(
            &mut self.world,
            &mut self.rng,
            &mut self.ledger,
            &mut self.notifications,
            self.time,
            &mut self.next_report_id,
            &mut self.next_anomaly_id,
        );
        if let Some(anomaly) = escalated {
            let plan = plan_response(&anomaly, &self.world.units, &self.world.deterrents);
            self.apply_plan(plan, &anomaly);
        }
        // 6. Breach auto-resolution
        if breach::should_auto_resolve(&self.world.breach, &self.world.anomalies, &self.world.units)
        {
            self.deactivate_breach();
        }
    }

    fn record(&mut self, kind: EventKind, description: impl Into<String>) {
        self.ledger.append(kind, description, self.time);
    }

    fn notify(
        &mut self,
        message: impl Into<String>,
        level: NotifyLevel,
        kind: Option<EventKind>,
    ) {
        self.notifications.push(Notification {
            message: message.into(),
            level,
            kind,
            tick: self.time.tick,
        });
    }
}
