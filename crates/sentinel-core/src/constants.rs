//! Simulation constants and tuning parameters.

/// Simulated seconds per scheduler tick.
pub const TICK_INTERVAL_SECS: f64 = 2.0;

// --- Movement ---

/// Distance below which a unit is considered to have arrived at its target.
pub const ARRIVAL_THRESHOLD: f64 = 1.5;

/// Base interpolation factor per tick for ground units.
pub const GROUND_SPEED: f64 = 0.25;

/// Boosted factor for Police and Vehicle units while Responding.
pub const VEHICLE_RESPONSE_SPEED: f64 = 0.5;

/// Boosted factor for Guard units while Responding.
pub const GUARD_RESPONSE_SPEED: f64 = 0.35;

/// Interpolation factor per tick for drones.
pub const DRONE_SPEED: f64 = 0.1;

/// The literal mission coordinate is appended to a road path when it lies
/// farther than this from the last path waypoint.
pub const PATH_TARGET_APPEND_THRESHOLD: f64 = 1.0;

/// A police unit returning to station docks (goes Stationary, off-map)
/// once it arrives anywhere north of this y coordinate.
pub const STATION_DOCK_BAND_Y: f64 = 15.0;

// --- Apprehension ---

/// Ticks a unit must hold in Apprehending before the anomaly clears.
pub const APPREHEND_DWELL_TICKS: u32 = 2;

// --- Drone battery ---

pub const BATTERY_MAX: f64 = 100.0;

/// Depletion per tick while Tracking or Observing.
pub const BATTERY_DRAIN_ACTIVE: f64 = 0.3;

/// Depletion per tick in any other non-charging status.
pub const BATTERY_DRAIN_IDLE: f64 = 0.1;

/// Recharge per tick while Charging.
pub const BATTERY_RECHARGE: f64 = 1.5;

/// Below this level a drone is forced to return to base unless it is
/// Tracking, already returning, or charging.
pub const BATTERY_LOW_THRESHOLD: f64 = 20.0;

// --- Drone observation ---

/// Seconds of simulated time before an Observing drone returns to patrol.
pub const OBSERVATION_DURATION_SECS: f64 = 8.0;

/// Detected entity count range per observation (inclusive).
pub const OBSERVATION_MIN_ENTITIES: u32 = 1;
pub const OBSERVATION_MAX_ENTITIES: u32 = 3;

/// Probability a detected entity classifies as a known resident.
pub const OBSERVATION_RESIDENT_PROB: f64 = 0.6;

// --- Stochastic world events (per-tick probabilities) ---

/// A resident files a "suspicious person" report.
pub const REPORT_PROB: f64 = 0.05;

/// An unresolved suspicious report escalates into a robbery.
pub const ROBBERY_ESCALATION_PROB: f64 = 0.002;

/// A resident posts bulletin chatter.
pub const BULLETIN_PROB: f64 = 0.1;

/// The registry recalibrates one resident's biometric profile.
pub const BIOMETRIC_DRIFT_PROB: f64 = 0.04;

/// Probability a simulated gate access attempt succeeds.
pub const ACCESS_SUCCESS_PROB: f64 = 0.8;

// --- Retention caps ---

pub const MAX_REPORTS: usize = 6;
pub const MAX_ACCESS_LOGS: usize = 100;
pub const MAX_BULLETIN_MESSAGES: usize = 50;

// --- Biometrics ---

/// Per-recalibration confidence jitter half-range, in percent points.
pub const BIOMETRIC_JITTER: f64 = 0.1;

pub const BIOMETRIC_MIN_CONFIDENCE: f64 = 98.0;
pub const BIOMETRIC_MAX_CONFIDENCE: f64 = 99.9;
