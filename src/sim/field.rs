//! Clearance field: per-cell distance to the nearest occupied cell
//!
//! The grid is thresholded here; turning the binary grid into real
//! distances is delegated to a [`DistanceTransform`] supplied by the host.
//! A field is immutable once built, so a map update produces a new field.

use glam::DVec2;

use super::pose::Pose2D;
use crate::consts::FREE_CLEARANCE;
use crate::error::{Result, SimError};

/// Converts a thresholded grid (0 = occupied, [`FREE_CLEARANCE`] = free)
/// into per-cell clearance in world units, in place
pub trait DistanceTransform {
    fn transform(&self, cells: &mut [f64], rows: usize, cols: usize, resolution: f64);
}

impl<F> DistanceTransform for F
where
    F: Fn(&mut [f64], usize, usize, f64),
{
    fn transform(&self, cells: &mut [f64], rows: usize, cols: usize, resolution: f64) {
        self(cells, rows, cols, resolution)
    }
}

/// Rasterized clearance map with its world placement
#[derive(Debug, Clone)]
pub struct ClearanceField {
    rows: usize,
    cols: usize,
    resolution: f64,
    origin: Pose2D,
    origin_cos: f64,
    origin_sin: f64,
    clearance: Vec<f64>,
}

impl ClearanceField {
    /// Threshold raw occupancy values and run the distance transform
    ///
    /// Values in `[0, free_threshold]` are free; everything else (including
    /// negative "unknown" cells) is occupied.
    pub fn from_occupancy(
        raw: &[f64],
        rows: usize,
        cols: usize,
        resolution: f64,
        origin: Pose2D,
        free_threshold: f64,
        transform: &dyn DistanceTransform,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(SimError::invalid_geometry(format!(
                "grid must be non-empty, got {rows}x{cols}"
            )));
        }
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(SimError::invalid_geometry(format!(
                "resolution must be positive, got {resolution}"
            )));
        }
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            SimError::invalid_geometry(format!("grid {rows}x{cols} overflows the cell count"))
        })?;
        if raw.len() != expected {
            return Err(SimError::MapSizeMismatch {
                expected,
                actual: raw.len(),
            });
        }

        let (origin_sin, origin_cos) = origin.theta.sin_cos();
        let clearance =
            threshold_and_transform(raw, rows, cols, resolution, free_threshold, transform);

        log::info!(
            "Clearance field {}x{} @ {} (origin {:.3}, {:.3}, {:.3})",
            rows,
            cols,
            resolution,
            origin.x,
            origin.y,
            origin.theta
        );

        Ok(Self {
            rows,
            cols,
            resolution,
            origin,
            origin_cos,
            origin_sin,
            clearance,
        })
    }

    /// New field with the same geometry and freshly classified cells
    pub fn rethreshold(
        &self,
        raw: &[f64],
        free_threshold: f64,
        transform: &dyn DistanceTransform,
    ) -> Result<Self> {
        let expected = self.clearance.len();
        if raw.len() != expected {
            return Err(SimError::MapSizeMismatch {
                expected,
                actual: raw.len(),
            });
        }
        let clearance = threshold_and_transform(
            raw,
            self.rows,
            self.cols,
            self.resolution,
            free_threshold,
            transform,
        );
        Ok(Self {
            clearance,
            ..self.clone_geometry()
        })
    }

    fn clone_geometry(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            resolution: self.resolution,
            origin: self.origin,
            origin_cos: self.origin_cos,
            origin_sin: self.origin_sin,
            clearance: Vec::new(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    #[inline]
    pub fn origin(&self) -> Pose2D {
        self.origin
    }

    /// Row-major clearance values
    #[inline]
    pub fn cells(&self) -> &[f64] {
        &self.clearance
    }

    /// Grid cell containing a world point, `None` outside the map
    pub fn world_to_cell(&self, point: DVec2) -> Option<(usize, usize)> {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;

        // Rotate by -origin.theta into the grid frame
        let x = dx * self.origin_cos + dy * self.origin_sin;
        let y = -dx * self.origin_sin + dy * self.origin_cos;

        let width = self.cols as f64 * self.resolution;
        let height = self.rows as f64 * self.resolution;
        if !(x >= 0.0 && x < width && y >= 0.0 && y < height) {
            return None;
        }

        // Guard the float edge where x / res rounds up to cols
        let col = ((x / self.resolution).floor() as usize).min(self.cols - 1);
        let row = ((y / self.resolution).floor() as usize).min(self.rows - 1);
        Some((row, col))
    }

    /// Clearance at a world point; unmapped space reads as 0
    #[inline]
    pub fn clearance_at(&self, point: DVec2) -> f64 {
        match self.world_to_cell(point) {
            Some((row, col)) => self.clearance[row * self.cols + col],
            None => 0.0,
        }
    }
}

fn threshold_and_transform(
    raw: &[f64],
    rows: usize,
    cols: usize,
    resolution: f64,
    free_threshold: f64,
    transform: &dyn DistanceTransform,
) -> Vec<f64> {
    let mut cells: Vec<f64> = raw
        .iter()
        .map(|&v| {
            if (0.0..=free_threshold).contains(&v) {
                FREE_CLEARANCE
            } else {
                0.0
            }
        })
        .collect();

    transform.transform(&mut cells, rows, cols, resolution);

    let mut sanitized = 0usize;
    for v in cells.iter_mut() {
        if v.is_nan() || *v < 0.0 {
            *v = 0.0;
            sanitized += 1;
        }
    }
    if sanitized > 0 {
        log::warn!("Distance transform produced {sanitized} negative or NaN cells, clamped to 0");
    }

    cells
}
