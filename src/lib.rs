//! Scan Sim - A 2D LiDAR simulator built on a clearance field
//!
//! Core modules:
//! - `sim`: Deterministic sensor model (angle tables, ray marching, occlusion)
//! - `config`: Data-driven sensor parameters
//! - `error`: Failures surfaced by construction and map ingestion

pub mod config;
pub mod error;
pub mod sim;

pub use config::SensorConfig;
pub use error::{Result, SimError};
pub use sim::{ClearanceField, DistanceTransform, Pose2D, ScanResult, ScanSimulator};

use glam::DVec2;

/// Sensor model constants
pub mod consts {
    /// Clearance assigned to free cells before the distance transform runs
    pub const FREE_CLEARANCE: f64 = 99999.0;

    /// Fixed step used when backing out of an occupied cell (world units)
    pub const BACKOFF_STEP: f64 = 0.01;
    /// Upper bound on coarse sphere-tracing steps per beam
    pub const MAX_MARCH_STEPS: usize = 100_000;

    /// Opponent closer than this counts as "seen" by a detecting sweep
    pub const VISIBILITY_RANGE: f64 = 5.0;

    /// Smallest accepted angle table
    pub const MIN_THETA_DISCRETIZATION: usize = 4;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
