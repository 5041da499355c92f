//! Occlusion by the opponent box
//!
//! The beam is handled as the line `x = k*y + b`, which stays finite for
//! vertical beams. Beams along the x axis have no such form; they are
//! resolved by comparing y coordinates and a distance shortcut instead.

use std::f64::consts::{FRAC_PI_4, SQRT_2};

use glam::DVec2;

use super::march::MarchResult;
use super::pose::Pose2D;
use crate::consts::VISIBILITY_RANGE;
use crate::polar_to_cartesian;

/// The opponent: a square of side `side` centred on `pose`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentBox {
    pub pose: Pose2D,
    pub side: f64,
}

impl OpponentBox {
    pub fn new(pose: Pose2D, side: f64) -> Self {
        Self { pose, side }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.pose.position()
    }

    /// Corners counter-clockwise, starting at heading + pi/4
    pub fn corners(&self) -> [DVec2; 4] {
        let r = SQRT_2 * self.side / 2.0;
        let c = self.center();
        let theta = self.pose.theta;
        [1.0, 3.0, 5.0, 7.0].map(|n| c + polar_to_cartesian(r, n * FRAC_PI_4 + theta))
    }
}

/// A beam as the line `x = slope * y + intercept` through its origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamLine {
    pub origin: DVec2,
    /// `None` for beams along the x axis
    pub slope: Option<f64>,
    pub intercept: f64,
}

impl BeamLine {
    pub fn new(origin: DVec2, slope: Option<f64>) -> Self {
        let intercept = slope.map_or(0.0, |k| origin.x - k * origin.y);
        Self {
            origin,
            slope,
            intercept,
        }
    }

    /// Signed side of `p` relative to the line
    #[inline]
    fn side_of(&self, p: DVec2) -> f64 {
        match self.slope {
            Some(k) => k * p.y + self.intercept - p.x,
            None => p.y - self.origin.y,
        }
    }

    /// Intersection with the infinite line through `a` and `b`
    ///
    /// Returns NaN or infinite coordinates when the lines are parallel.
    fn intersect(&self, k: f64, a: DVec2, b: DVec2) -> DVec2 {
        let c = self.intercept;
        let y = (b.y * a.x - b.y * c + a.y * c - a.y * b.x) / (k * b.y - k * a.y - b.x + a.x);
        DVec2::new(k * y + c, y)
    }
}

/// Tracks whether any beam of a sweep saw the opponent up close
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityProbe {
    armed: bool,
    seen: bool,
}

impl VisibilityProbe {
    /// Probe that reports the first close sighting
    pub fn armed() -> Self {
        Self {
            armed: true,
            seen: false,
        }
    }

    /// Probe that never reports
    pub fn disarmed() -> Self {
        Self::default()
    }

    #[inline]
    pub fn seen(&self) -> bool {
        self.seen
    }

    /// First hit within range wins; later beams are not evaluated
    #[inline]
    fn observe(&mut self, sensor_to_opponent: f64) {
        if self.armed && !self.seen && sensor_to_opponent < VISIBILITY_RANGE {
            self.seen = true;
            self.armed = false;
        }
    }
}

/// Range of one beam once the opponent box is taken into account
pub fn resolve(
    beam: &BeamLine,
    march: &MarchResult,
    opponent: &OpponentBox,
    epsilon: f64,
    max_range: f64,
    probe: &mut VisibilityProbe,
) -> f64 {
    let unoccluded = march.clipped(max_range);
    let corners = opponent.corners();

    // Every corner strictly on one side: the line misses the box
    let sides = corners.map(|p| beam.side_of(p));
    if sides.iter().all(|&s| s > 0.0) || sides.iter().all(|&s| s < 0.0) {
        return unoccluded;
    }

    // The box has to sit between the sensor and the marched obstacle
    let center = opponent.center();
    let sensor_to_opponent = beam.origin.distance(center);
    let stop_to_opponent = march.stop.distance(center);
    if sensor_to_opponent >= march.distance || stop_to_opponent >= march.distance {
        return unoccluded;
    }

    probe.observe(sensor_to_opponent);

    let Some(k) = beam.slope else {
        return (sensor_to_opponent - opponent.side / 2.0).clamp(0.0, max_range);
    };

    let nearest = (0..4)
        .filter_map(|i| {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            let hit = beam.intersect(k, a, b);
            (within(a.y, b.y, hit.y, epsilon) && within(a.x, b.x, hit.x, epsilon))
                .then(|| beam.origin.distance(hit))
        })
        .reduce(f64::min);

    match nearest {
        Some(d) => d.min(max_range),
        None => unoccluded,
    }
}

/// `v` between `a` and `b` in either order, with `eps` slack
#[inline]
fn within(a: f64, b: f64, v: f64, eps: f64) -> bool {
    (a + eps >= v && v >= b - eps) || (a - eps <= v && v <= b + eps)
}
