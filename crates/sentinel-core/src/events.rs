//! Events emitted by the simulation for operator feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{EventKind, NotifyLevel};

/// A fire-and-forget notification for the operator console. The core
/// never reads these back; they are drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
    /// Event category, used by consumers to pick an icon.
    pub kind: Option<EventKind>,
    pub tick: u64,
}
