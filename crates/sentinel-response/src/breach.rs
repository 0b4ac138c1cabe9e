//! Breach protocol transition guards.
//!
//! The breach state itself is plain core data (`BreachProtocol`); these
//! functions decide when the state machine may move. Inactive → Active
//! happens through the escalation policy on any high-severity anomaly;
//! Active → Inactive happens on an accepted deactivation, manual or
//! automatic.

use sentinel_core::enums::GroundStatus;
use sentinel_core::units::Unit;
use sentinel_core::world::{Anomaly, BreachProtocol};

/// Whether any unit is currently mid-apprehension.
pub fn apprehension_in_progress(units: &[Unit]) -> bool {
    units
        .iter()
        .any(|u| u.ground().is_some_and(|g| g.status == GroundStatus::Apprehending))
}

/// Manual deactivation guard: rejected while any robbery-flagged anomaly
/// remains active or an apprehension is in progress. A rejected
/// deactivation is a no-op, not an error — callers re-check state.
pub fn can_deactivate(anomalies: &[Anomaly], units: &[Unit]) -> bool {
    !anomalies.iter().any(|a| a.is_robbery) && !apprehension_in_progress(units)
}

/// Automatic resolution: the protocol stands down on its own once no
/// robbery anomaly remains, no apprehension is in progress, and the
/// triggering anomaly has left the active set.
pub fn should_auto_resolve(
    breach: &BreachProtocol,
    anomalies: &[Anomaly],
    units: &[Unit],
) -> bool {
    breach.active && can_deactivate(anomalies, units) && !breach.trigger_still_active(anomalies)
}
