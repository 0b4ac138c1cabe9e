//! Static campus map for SENTINEL.
//!
//! The road network graph with A* pathfinding, the campus feature layout,
//! drone patrol sectors, and residential placement. Everything here is
//! fixed data loaded at startup; nothing depends on the simulation engine.

pub mod graph;
pub mod layout;

pub use graph::{RoadGraph, Waypoint, WaypointId};
