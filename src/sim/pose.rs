//! Planar pose shared by the sensor, the opponent and the map origin

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Position and heading in the world frame
///
/// `theta` is not normalized; any number of turns is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}
