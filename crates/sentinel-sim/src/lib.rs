//! Simulation engine for SENTINEL.
//!
//! Owns the world state, processes operator commands at tick boundaries,
//! runs systems at a fixed tick rate, and produces WorldSnapshots.

pub mod engine;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use engine::{PersistedState, SecurityEngine, SimConfig};
pub use sentinel_core as core;

#[cfg(test)]
mod tests;
