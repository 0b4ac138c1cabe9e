//! Stochastic world events, checked once per tick.
//!
//! Resident reports, robbery escalation of an unresolved report, bulletin
//! chatter, and biometric drift. All draws come from the engine's seeded
//! RNG in a fixed order, so runs replay exactly.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sentinel_core::constants::*;
use sentinel_core::enums::{EventKind, NotifyLevel, ThreatLevel};
use sentinel_core::events::Notification;
use sentinel_core::types::SimTime;
use sentinel_core::world::{Anomaly, AnomalyId, BulletinMessage, ResidentReport};

use sentinel_ledger::Ledger;
use sentinel_map::layout;

use crate::world::WorldState;

const RESIDENT_NAMES: &[&str] = &[
    "Olivia Chen",
    "Ben Carter",
    "Sophia Rodriguez",
    "Liam Goldberg",
    "Ava Nguyen",
    "Noah Patel",
];

const CHATTER: &[&str] = &[
    "Anyone see that package delivery?",
    "Is the pool open today?",
    "My dog is loving this weather!",
    "Heard a weird noise near the east fence.",
    "Great job on the new garden area!",
    "Reminder: Community BBQ this Saturday.",
];

/// Run the per-tick stochastic checks. Returns a robbery anomaly if one
/// was escalated this tick; the engine feeds it through the escalation
/// policy.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut WorldState,
    rng: &mut ChaCha8Rng,
    ledger: &mut Ledger,
    notifications: &mut Vec<Notification>,
    time: SimTime,
    next_report_id: &mut u64,
    next_anomaly_id: &mut u64,
) -> Option<Anomaly> {
    let mut escalated = None;

    // An unresolved suspicious report may escalate into a robbery, as
    // long as no robbery is already in progress.
    if rng.gen_bool(ROBBERY_ESCALATION_PROB) && !world.has_robbery_anomaly() {
        if let Some(pos) = world
            .reports
            .iter()
            .position(|r| r.description.contains("Suspicious"))
        {
            let report = world.reports.remove(pos);
            let anomaly = Anomaly {
                id: AnomalyId(*next_anomaly_id),
                description: "Robbery in progress!".into(),
                location: report.location,
                threat_level: ThreatLevel::High,
                is_robbery: true,
            };
            *next_anomaly_id += 1;
            world.anomalies.push(anomaly.clone());
            escalated = Some(anomaly);
        }
    }

    // A resident files a suspicious-person report.
    if rng.gen_bool(REPORT_PROB) {
        let location = layout::report_point(rng);
        let report = ResidentReport {
            id: *next_report_id,
            tick: time.tick,
            location,
            description: "Suspicious person sighted.".into(),
        };
        *next_report_id += 1;
        let description = format!(
            "Resident report: {} [{:.0}, {:.0}]",
            report.description, location.x, location.y
        );
        world.push_report(report);
        ledger.append(EventKind::Report, description.clone(), time);
        notifications.push(Notification {
            message: description,
            level: NotifyLevel::Info,
            kind: Some(EventKind::Report),
            tick: time.tick,
        });
    }

    // Bulletin chatter.
    if rng.gen_bool(BULLETIN_PROB) {
        let author = RESIDENT_NAMES[rng.gen_range(0..RESIDENT_NAMES.len())];
        let text = CHATTER[rng.gen_range(0..CHATTER.len())];
        world.push_bulletin(BulletinMessage {
            author: author.into(),
            text: text.into(),
            tick: time.tick,
        });
    }

    // The registry recalibrates one resident's biometric profile.
    if rng.gen_bool(BIOMETRIC_DRIFT_PROB) && !world.residents.is_empty() {
        let index = rng.gen_range(0..world.residents.len());
        let jitter = (rng.gen::<f64>() - 0.5) * BIOMETRIC_JITTER * 2.0;
        let resident = &mut world.residents[index];
        let old = resident.biometric_confidence;
        let new = ((old + jitter).clamp(BIOMETRIC_MIN_CONFIDENCE, BIOMETRIC_MAX_CONFIDENCE) * 10.0)
            .round()
            / 10.0;
        resident.biometric_confidence = new;
        resident.last_sync_tick = time.tick;

        let description = format!(
            "Registry recalibrated profile for {}. Confidence: {old:.1}% -> {new:.1}%",
            resident.name
        );
        ledger.append(EventKind::System, description.clone(), time);
        notifications.push(Notification {
            message: description,
            level: NotifyLevel::Info,
            kind: Some(EventKind::System),
            tick: time.tick,
        });
    }

    escalated
}
