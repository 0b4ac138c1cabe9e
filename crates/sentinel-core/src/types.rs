//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position on the campus plane.
/// Coordinates are percentages of the bounded map, x = East, y = South
/// (screen convention). On-map values lie in [0, 100]; the off-map
/// police holding point uses y < 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point in map units.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Fractional step toward a target: `self + (target - self) * factor`.
    /// This is the simulation's movement primitive — an exponential-decay
    /// approach profile, not constant velocity.
    pub fn step_toward(&self, target: &Point, factor: f64) -> Point {
        Point {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }
}

impl SimTime {
    /// Seconds of simulated time per tick.
    pub fn dt(&self) -> f64 {
        crate::constants::TICK_INTERVAL_SECS
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
