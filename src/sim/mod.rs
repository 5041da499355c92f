//! Deterministic sensor model
//!
//! Everything a sweep needs lives here. Given the same map, poses and noise
//! seed the output is bit-for-bit reproducible:
//! - Angles come from a precomputed table, never from per-beam trig
//! - A sweep reads one immutable field snapshot
//! - Noise comes from a seeded per-simulator generator

pub mod field;
pub mod march;
pub mod noise;
pub mod occlusion;
pub mod pose;
pub mod scanner;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use field::{ClearanceField, DistanceTransform};
pub use march::{MarchResult, march};
pub use noise::RangeNoise;
pub use occlusion::{BeamLine, OpponentBox, VisibilityProbe, resolve};
pub use pose::Pose2D;
pub use scanner::{ScanResult, ScanSimulator};
pub use table::DiscretizationTable;
