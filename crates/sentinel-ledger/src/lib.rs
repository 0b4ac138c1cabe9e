//! Hash-chained audit ledger for SENTINEL.
//!
//! Every autonomous decision the simulation makes is appended as a block
//! linking to its predecessor through a SHA-256 content hash. The chain
//! is tamper-evident — a change to any recorded block breaks every hash
//! after it — but it is an audit trail, not a security boundary.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use sentinel_core::enums::EventKind;
use sentinel_core::types::SimTime;

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// One audit record, chained to its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerBlock {
    /// Position in the chain; the genesis block is 0.
    pub index: u64,
    /// Simulation tick at which the event was recorded.
    pub tick: u64,
    /// Simulation time at which the event was recorded.
    pub timestamp_secs: f64,
    pub kind: EventKind,
    pub description: String,
    pub previous_hash: String,
    pub hash: String,
}

/// The append-only chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    blocks: Vec<LedgerBlock>,
}

fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn content_hash(
    index: u64,
    tick: u64,
    timestamp_secs: f64,
    description: &str,
    previous_hash: &str,
) -> String {
    sha256_hex(&format!(
        "{index}|{tick}|{timestamp_secs}|{description}|{previous_hash}"
    ))
}

fn genesis_block() -> LedgerBlock {
    let description = "Genesis block";
    LedgerBlock {
        index: 0,
        tick: 0,
        timestamp_secs: 0.0,
        kind: EventKind::System,
        description: description.into(),
        previous_hash: GENESIS_PREVIOUS_HASH.into(),
        hash: content_hash(0, 0, 0.0, description, GENESIS_PREVIOUS_HASH),
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// A fresh chain holding only the genesis block.
    pub fn new() -> Self {
        Self {
            blocks: vec![genesis_block()],
        }
    }

    /// Restore a persisted chain. A chain that fails verification (or is
    /// empty) is discarded in favor of a fresh genesis chain.
    pub fn from_blocks(blocks: Vec<LedgerBlock>) -> Self {
        let candidate = Self { blocks };
        if !candidate.blocks.is_empty() && candidate.verify() {
            candidate
        } else {
            Self::new()
        }
    }

    /// Append one event and return the new block.
    pub fn append(
        &mut self,
        kind: EventKind,
        description: impl Into<String>,
        time: SimTime,
    ) -> &LedgerBlock {
        let description = description.into();
        let index = self.blocks.len() as u64;
        let previous_hash = self
            .blocks
            .last()
            .map(|b| b.hash.clone())
            .unwrap_or_else(|| GENESIS_PREVIOUS_HASH.into());
        let hash = content_hash(index, time.tick, time.elapsed_secs, &description, &previous_hash);
        self.blocks.push(LedgerBlock {
            index,
            tick: time.tick,
            timestamp_secs: time.elapsed_secs,
            kind,
            description,
            previous_hash,
            hash,
        });
        self.blocks.last().expect("chain is never empty")
    }

    pub fn blocks(&self) -> &[LedgerBlock] {
        &self.blocks
    }

    /// Number of blocks in the chain, genesis included.
    pub fn height(&self) -> u64 {
        self.blocks.len() as u64
    }

    pub fn head_hash(&self) -> &str {
        self.blocks
            .last()
            .map(|b| b.hash.as_str())
            .unwrap_or(GENESIS_PREVIOUS_HASH)
    }

    /// Full chain verification: the genesis sentinel, every link, and
    /// every content hash.
    pub fn verify(&self) -> bool {
        for (i, block) in self.blocks.iter().enumerate() {
            if block.index != i as u64 {
                return false;
            }
            let expected_prev = if i == 0 {
                GENESIS_PREVIOUS_HASH
            } else {
                self.blocks[i - 1].hash.as_str()
            };
            if block.previous_hash != expected_prev {
                return false;
            }
            let expected_hash = content_hash(
                block.index,
                block.tick,
                block.timestamp_secs,
                &block.description,
                &block.previous_hash,
            );
            if block.hash != expected_hash {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_tick(tick: u64) -> SimTime {
        SimTime {
            tick,
            elapsed_secs: tick as f64 * 2.0,
        }
    }

    #[test]
    fn test_genesis_is_fixed() {
        let a = Ledger::new();
        let b = Ledger::new();
        assert_eq!(a.blocks()[0], b.blocks()[0]);
        assert_eq!(a.blocks()[0].previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(a.height(), 1);
    }

    #[test]
    fn test_chain_integrity_over_appends() {
        let mut ledger = Ledger::new();
        for i in 0..25u64 {
            ledger.append(EventKind::Patrol, format!("event {i}"), at_tick(i));
        }
        assert_eq!(ledger.height(), 26);
        for i in 1..ledger.blocks().len() {
            assert_eq!(
                ledger.blocks()[i].previous_hash,
                ledger.blocks()[i - 1].hash,
                "link broken at block {i}"
            );
        }
        assert!(ledger.verify());
    }

    #[test]
    fn test_hash_is_deterministic() {
        let mut a = Ledger::new();
        let mut b = Ledger::new();
        a.append(EventKind::Drone, "DG-7 assigned", at_tick(3));
        b.append(EventKind::Drone, "DG-7 assigned", at_tick(3));
        assert_eq!(a.head_hash(), b.head_hash());
    }

    #[test]
    fn test_verify_detects_tampering() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::Breach, "EMERGENCY PROTOCOL ACTIVE", at_tick(1));
        ledger.append(EventKind::Patrol, "Suspect apprehended", at_tick(4));
        assert!(ledger.verify());

        let mut tampered = ledger.clone();
        tampered.blocks[1].description = "nothing happened".into();
        assert!(!tampered.verify());
    }

    #[test]
    fn test_from_blocks_restores_valid_chain() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::Access, "VoicePrint verified", at_tick(2));
        let restored = Ledger::from_blocks(ledger.blocks().to_vec());
        assert_eq!(restored.height(), 2);
        assert_eq!(restored.head_hash(), ledger.head_hash());

        // Appending to the restored chain keeps it valid.
        let mut restored = restored;
        restored.append(EventKind::System, "resumed", at_tick(5));
        assert!(restored.verify());
    }

    #[test]
    fn test_from_blocks_rejects_invalid_chain() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::Report, "report", at_tick(1));
        let mut blocks = ledger.blocks().to_vec();
        blocks[1].previous_hash = "bogus".into();

        let restored = Ledger::from_blocks(blocks);
        assert_eq!(restored.height(), 1, "invalid chain falls back to genesis");
        assert!(restored.verify());
    }

    #[test]
    fn test_block_serde_roundtrip() {
        let mut ledger = Ledger::new();
        ledger.append(EventKind::Deterrent, "Sonic deterrent activated", at_tick(7));
        let json = serde_json::to_string(ledger.blocks()).unwrap();
        let back: Vec<LedgerBlock> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger.blocks());
        assert!(Ledger::from_blocks(back).verify());
    }
}
