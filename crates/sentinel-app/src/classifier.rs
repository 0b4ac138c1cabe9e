//! Threat-classification boundary.
//!
//! The real classifier is an external service that turns a surveillance
//! feed into structured anomaly reports. The core only sees its results,
//! delivered as an `IngestAnomalies` command; a failed call means "no
//! anomalies detected", never a crash.

use std::collections::VecDeque;

use anyhow::Result;

use sentinel_core::enums::ThreatLevel;
use sentinel_core::world::AnomalyReport;

pub trait ThreatClassifier {
    /// Analyze one surveillance feed and return detected anomalies.
    fn analyze(&mut self, feed: &str) -> Result<Vec<AnomalyReport>>;
}

/// Scripted classifier for the demo console and tests: returns canned
/// responses in order, then no anomalies once exhausted.
#[derive(Default)]
pub struct ScriptedClassifier {
    responses: VecDeque<Result<Vec<AnomalyReport>>>,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_anomalies(&mut self, anomalies: Vec<AnomalyReport>) {
        self.responses.push_back(Ok(anomalies));
    }

    pub fn push_failure(&mut self, message: &str) {
        self.responses.push_back(Err(anyhow::anyhow!(message.to_string())));
    }
}

impl ThreatClassifier for ScriptedClassifier {
    fn analyze(&mut self, _feed: &str) -> Result<Vec<AnomalyReport>> {
        self.responses.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// The canned scan sequence used by the demo console.
pub fn demo_script() -> ScriptedClassifier {
    let mut classifier = ScriptedClassifier::new();
    classifier.push_anomalies(vec![AnomalyReport {
        description: "Loiterer near gate".into(),
        x: 50.0,
        y: 12.0,
        threat_level: ThreatLevel::Medium,
    }]);
    classifier.push_anomalies(vec![
        AnomalyReport {
            description: "Individual casing parked vehicles".into(),
            x: 25.0,
            y: 78.0,
            threat_level: ThreatLevel::Medium,
        },
        AnomalyReport {
            description: "Figure climbing perimeter fence".into(),
            x: 92.0,
            y: 55.0,
            threat_level: ThreatLevel::High,
        },
    ]);
    classifier.push_failure("feed analysis timed out");
    classifier
}
