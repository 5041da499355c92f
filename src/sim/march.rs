//! Sphere tracing against the clearance field
//!
//! Each step advances by the clearance at the current point, which by
//! construction cannot cross an obstacle. Once a step lands in an occupied
//! cell the beam backs out in small fixed steps so long straight walls do
//! not show grid banding.

use glam::DVec2;

use super::field::ClearanceField;
use super::table::DiscretizationTable;
use crate::consts::{BACKOFF_STEP, MAX_MARCH_STEPS};

/// Outcome of marching one beam
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchResult {
    /// Distance travelled after boundary correction
    pub distance: f64,
    /// Point where the beam stopped
    pub stop: DVec2,
}

impl MarchResult {
    /// Range reading when nothing else occludes the beam
    #[inline]
    pub fn clipped(&self, max_range: f64) -> f64 {
        self.distance.min(max_range)
    }
}

/// March from `origin` along the direction of `bucket`
pub fn march(
    field: &ClearanceField,
    table: &DiscretizationTable,
    origin: DVec2,
    bucket: usize,
) -> MarchResult {
    march_with_limit(field, table, origin, bucket, MAX_MARCH_STEPS)
}

fn march_with_limit(
    field: &ClearanceField,
    table: &DiscretizationTable,
    origin: DVec2,
    bucket: usize,
    max_steps: usize,
) -> MarchResult {
    let dir = table.direction(bucket);

    let mut p = origin;
    let mut d = field.clearance_at(p);
    let mut total = 0.0;
    let mut steps = 0usize;

    while d != 0.0 {
        if steps == max_steps {
            log::debug!(
                "March from ({:.3}, {:.3}) bucket {} hit the {} step bound",
                origin.x,
                origin.y,
                bucket,
                max_steps
            );
            break;
        }
        steps += 1;

        let step = d;
        p += dir * step;
        total += step;
        d = field.clearance_at(p);

        if d == 0.0 {
            // No free point found: return to where the last step began
            let back = back_out(field, p, dir, step).unwrap_or(step);
            p -= dir * back;
            total -= back;
        }
    }

    MarchResult {
        distance: total.max(0.0),
        stop: p,
    }
}

/// Distance to step back from `hit` along `dir` until the clearance is
/// nonzero, trying at most enough fixed steps to undo `last_step`
fn back_out(field: &ClearanceField, hit: DVec2, dir: DVec2, last_step: f64) -> Option<f64> {
    let max_backoff = (last_step / BACKOFF_STEP).ceil() as usize + 1;
    (1..=max_backoff)
        .map(|i| i as f64 * BACKOFF_STEP)
        .find(|&back| field.clearance_at(hit - dir * back) != 0.0)
}
