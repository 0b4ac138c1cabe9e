//! Keyed JSON store for durable state.
//!
//! Residents, access logs, and the audit ledger live in one JSON file
//! each. A missing file is not an error — the engine falls back to its
//! fixed seed dataset.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use sentinel_sim::PersistedState;

pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load whatever durable state exists. Missing files yield `None`
    /// fields; unreadable or corrupt files are errors for the caller to
    /// handle.
    pub fn load(&self) -> Result<PersistedState> {
        Ok(PersistedState {
            residents: read_json(&self.dir.join("residents.json"))?,
            access_logs: read_json(&self.dir.join("access_logs.json"))?,
            ledger_blocks: read_json(&self.dir.join("ledger.json"))?,
        })
    }

    /// Write-through save of all durable state.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create store directory {:?}", self.dir))?;
        write_json(&self.dir.join("residents.json"), &state.residents)?;
        write_json(&self.dir.join("access_logs.json"), &state.access_logs)?;
        write_json(&self.dir.join("ledger.json"), &state.ledger_blocks)?;
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value: Option<T> =
        serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(value)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
