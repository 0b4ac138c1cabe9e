//! Factories for the initial simulation world.
//!
//! The unit roster is fixed: two ground patrols, one police unit, and six
//! drones. Residents and access logs restore from a persisted snapshot
//! when one exists, otherwise the fixed seed dataset applies.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sentinel_core::enums::{GroundStatus, Sector};
use sentinel_core::types::Point;
use sentinel_core::units::{DroneState, GroundState, Unit, UnitKind};
use sentinel_core::world::{AccessLog, BreachProtocol, DeterrentStation, Resident};

use sentinel_map::layout;

use crate::world::WorldState;

/// Build the initial world.
pub fn initial_world(
    rng: &mut ChaCha8Rng,
    residents: Option<Vec<Resident>>,
    access_logs: Option<Vec<AccessLog>>,
) -> WorldState {
    WorldState {
        units: initial_units(rng),
        anomalies: Vec::new(),
        reports: Vec::new(),
        residents: residents.unwrap_or_else(seed_residents),
        access_logs: access_logs.unwrap_or_default(),
        bulletin: Vec::new(),
        deterrents: initial_deterrents(),
        breach: BreachProtocol::default(),
    }
}

/// The fixed unit roster.
pub fn initial_units(rng: &mut ChaCha8Rng) -> Vec<Unit> {
    let mut units = vec![
        ground_unit("p1", "Patrol 1", UnitVariant::Guard, Point::new(20.0, 88.0)),
        ground_unit("v1", "Vehicle 1", UnitVariant::Vehicle, Point::new(70.0, 88.0)),
        police_unit(),
    ];

    let sectors = [
        Sector::Alpha,
        Sector::Bravo,
        Sector::Charlie,
        Sector::Delta,
        Sector::Alpha,
        Sector::Bravo,
    ];
    for (i, sector) in sectors.into_iter().enumerate() {
        units.push(drone_unit(i, sector, rng));
    }
    units
}

enum UnitVariant {
    Guard,
    Vehicle,
}

fn ground_unit(id: &str, name: &str, variant: UnitVariant, location: Point) -> Unit {
    let state = GroundState {
        status: GroundStatus::Patrolling,
        apprehend_ticks: 0,
    };
    Unit {
        id: id.into(),
        name: name.into(),
        location,
        mission_target: None,
        mission_description: None,
        mission_anomaly: None,
        path: Vec::new(),
        kind: match variant {
            UnitVariant::Guard => UnitKind::Guard(state),
            UnitVariant::Vehicle => UnitKind::Vehicle(state),
        },
    }
}

fn police_unit() -> Unit {
    Unit {
        id: "police1".into(),
        name: "Police-1".into(),
        location: layout::OFF_MAP_STATION,
        mission_target: None,
        mission_description: None,
        mission_anomaly: None,
        path: Vec::new(),
        kind: UnitKind::Police(GroundState {
            status: GroundStatus::Stationary,
            apprehend_ticks: 0,
        }),
    }
}

fn drone_unit(index: usize, sector: Sector, rng: &mut ChaCha8Rng) -> Unit {
    Unit {
        id: format!("d{}", index + 1),
        name: format!("DG-{}", index + 7),
        location: Point::new(45.0 + index as f64 * 4.0, 85.0),
        mission_target: None,
        mission_description: None,
        mission_anomaly: None,
        path: Vec::new(),
        kind: UnitKind::Drone(DroneState {
            battery: 80.0 + rng.gen::<f64>() * 20.0,
            sector: Some(sector),
            ..DroneState::default()
        }),
    }
}

/// The four fixed sonic-deterrent installations.
pub fn initial_deterrents() -> Vec<DeterrentStation> {
    layout::DETERRENT_SITES
        .iter()
        .map(|&(id, location)| DeterrentStation {
            id: id.into(),
            location,
            last_activated: None,
        })
        .collect()
}

/// Fixed resident seed dataset, used when no persisted snapshot exists.
pub fn seed_residents() -> Vec<Resident> {
    let seed: &[(&str, &str, &str, f64, f64, f64)] = &[
        ("res1", "Alex Ray", "A-101", 99.8, 18.0, 25.0),
        ("res2", "Ben Carter", "B-204", 99.1, 65.0, 22.0),
        ("res3", "Olivia Chen", "C-301", 98.7, 75.0, 35.0),
        ("res4", "Sophia Rodriguez", "A-112", 99.5, 30.0, 40.0),
        ("res5", "Liam Goldberg", "D-405", 98.2, 80.0, 18.0),
    ];
    seed.iter()
        .map(|&(id, name, apartment, confidence, x, y)| Resident {
            id: id.into(),
            name: name.into(),
            apartment: apartment.into(),
            biometric_confidence: confidence,
            last_sync_tick: 0,
            home: Some(Point::new(x, y)),
        })
        .collect()
}
