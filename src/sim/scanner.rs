//! Sweep assembly
//!
//! One sweep walks every beam in order, marches it against a single
//! snapshot of the clearance field, lets the opponent box occlude it, then
//! adds noise.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::field::{ClearanceField, DistanceTransform};
use super::march::{MarchResult, march};
use super::noise::RangeNoise;
use super::occlusion::{BeamLine, OpponentBox, VisibilityProbe, resolve};
use super::pose::Pose2D;
use super::table::DiscretizationTable;
use crate::config::SensorConfig;
use crate::error::{Result, SimError};

/// Ranges of one sweep, first beam at `angle_min` relative to the heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub ranges: Vec<f64>,
    /// Only meaningful when the sweep asked for opponent detection
    pub opponent_visible: bool,
    pub angle_min: f64,
    pub angle_increment: f64,
}

/// A simulated planar LiDAR
pub struct ScanSimulator {
    config: SensorConfig,
    table: DiscretizationTable,
    field: Option<Arc<ClearanceField>>,
    transform: Box<dyn DistanceTransform + Send + Sync>,
    noise: RangeNoise,
    opponent_visible: bool,
}

impl ScanSimulator {
    /// Validate `config`, build the angle table and seed the noise source
    pub fn new<T>(config: SensorConfig, transform: T) -> Result<Self>
    where
        T: DistanceTransform + Send + Sync + 'static,
    {
        config.validate()?;

        let table = DiscretizationTable::new(config.theta_discretization, config.angle_increment());
        let noise = match config.seed {
            Some(seed) => RangeNoise::new(config.noise_std_dev, seed),
            None => RangeNoise::from_entropy(config.noise_std_dev),
        };

        log::info!(
            "Scan simulator: {} beams over {:.3} rad, {} buckets, noise std {} (seed {})",
            config.num_beams,
            config.field_of_view,
            config.theta_discretization,
            config.noise_std_dev,
            noise.seed()
        );

        Ok(Self {
            config,
            table,
            field: None,
            transform: Box::new(transform),
            noise,
            opponent_visible: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    #[inline]
    pub fn table(&self) -> &DiscretizationTable {
        &self.table
    }

    /// Current map snapshot, if any
    #[inline]
    pub fn field(&self) -> Option<&Arc<ClearanceField>> {
        self.field.as_ref()
    }

    #[inline]
    pub fn noise_seed(&self) -> u64 {
        self.noise.seed()
    }

    /// Restart the noise sequence (for replaying a run)
    pub fn reseed(&mut self, seed: u64) {
        self.noise.reseed(seed);
    }

    /// Replace the map: threshold, transform and swap in as one unit
    pub fn set_map(
        &mut self,
        raw: &[f64],
        rows: usize,
        cols: usize,
        resolution: f64,
        origin: Pose2D,
        free_threshold: f64,
    ) -> Result<()> {
        let field = ClearanceField::from_occupancy(
            raw,
            rows,
            cols,
            resolution,
            origin,
            free_threshold,
            &*self.transform,
        )?;
        self.field = Some(Arc::new(field));
        Ok(())
    }

    /// Re-threshold the current map without touching its geometry
    pub fn update_map(&mut self, raw: &[f64], free_threshold: f64) -> Result<()> {
        let current = self.field.as_ref().ok_or(SimError::NoMap)?;
        let field = current.rethreshold(raw, free_threshold, &*self.transform)?;
        self.field = Some(Arc::new(field));
        Ok(())
    }

    /// Use a field built elsewhere, e.g. shared with other vehicles
    pub fn set_field(&mut self, field: Arc<ClearanceField>) {
        self.field = Some(field);
    }

    /// Whether the most recent detecting sweep saw the opponent
    #[inline]
    pub fn sees_opponent(&self) -> bool {
        self.opponent_visible
    }

    /// Run one sweep
    pub fn scan(
        &mut self,
        pose: &Pose2D,
        opponent: Option<&Pose2D>,
        detect_opponent: bool,
    ) -> ScanResult {
        let mut ranges = vec![0.0; self.config.num_beams];
        let opponent_visible = self.scan_into(pose, opponent, detect_opponent, &mut ranges);
        ScanResult {
            ranges,
            opponent_visible,
            angle_min: self.config.angle_min(),
            angle_increment: self.config.angle_increment(),
        }
    }

    /// Run one sweep into a caller buffer
    ///
    /// Writes `min(out.len(), num_beams)` beams and returns the visibility
    /// flag. Without a map every beam reads as blocked.
    pub fn scan_into(
        &mut self,
        pose: &Pose2D,
        opponent: Option<&Pose2D>,
        detect_opponent: bool,
        out: &mut [f64],
    ) -> bool {
        // One snapshot for the whole sweep
        let field = self.field.clone();
        let origin = pose.position();
        let max_range = self.config.max_range;
        let epsilon = self.config.ray_tracing_epsilon;
        let opponent = opponent.map(|p| OpponentBox::new(*p, self.config.cube_width));
        let mut probe = if detect_opponent {
            VisibilityProbe::armed()
        } else {
            VisibilityProbe::disarmed()
        };

        let mut position = self.table.start_position(pose.theta, self.config.field_of_view);

        for slot in out.iter_mut().take(self.config.num_beams) {
            let bucket = self.table.round_bucket(position);

            let marched = match field.as_deref() {
                Some(field) => march(field, &self.table, origin, bucket),
                None => MarchResult {
                    distance: 0.0,
                    stop: origin,
                },
            };

            let range = match &opponent {
                Some(opponent) => {
                    let beam = BeamLine::new(origin, self.table.cot(bucket));
                    resolve(&beam, &marched, opponent, epsilon, max_range, &mut probe)
                }
                None => marched.clipped(max_range),
            };

            *slot = (range + self.noise.sample()).clamp(0.0, max_range);

            position = self.table.advance(position);
        }

        self.opponent_visible = probe.seen();
        self.opponent_visible
    }
}

impl std::fmt::Debug for ScanSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanSimulator")
            .field("config", &self.config)
            .field("has_map", &self.field.is_some())
            .field("noise_seed", &self.noise.seed())
            .field("opponent_visible", &self.opponent_visible)
            .finish()
    }
}
