//! Sensor configuration
//!
//! Loaded from JSON by the host simulation; every field has a default so a
//! partial file only overrides what it names.

use std::f64::consts::TAU;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_THETA_DISCRETIZATION;
use crate::error::{Result, SimError};

/// Parameters of one simulated planar LiDAR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Beams per sweep (at least 2)
    pub num_beams: usize,
    /// Angular span of a sweep (radians)
    pub field_of_view: f64,
    /// Readings are clipped to this range (world units)
    pub max_range: f64,
    /// Standard deviation of additive range noise (0 disables noise)
    pub noise_std_dev: f64,
    /// Side length of the opponent box
    pub cube_width: f64,
    /// Slack applied to edge bound checks in the occlusion resolver
    pub ray_tracing_epsilon: f64,
    /// Number of angle buckets per full turn
    pub theta_discretization: usize,
    /// Noise seed; `None` draws one from system entropy
    pub seed: Option<u64>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            num_beams: 1080,
            field_of_view: 4.7,
            max_range: 10.0,
            noise_std_dev: 0.01,
            cube_width: 0.5,
            ray_tracing_epsilon: 0.0001,
            theta_discretization: 2000,
            seed: None,
        }
    }
}

impl SensorConfig {
    /// Hokuyo UST-10LX: 1081 beams over 270 degrees, 10 m range
    pub fn hokuyo_ust_10lx() -> Self {
        Self {
            num_beams: 1081,
            field_of_view: 270.0_f64.to_radians(),
            ..Self::default()
        }
    }

    /// Noise-free sweep covering a full turn
    ///
    /// The last beam lands on the first one's angle, so `num_beams` spans
    /// `num_beams - 1` intervals.
    pub fn full_turn(num_beams: usize) -> Self {
        Self {
            num_beams,
            field_of_view: TAU,
            noise_std_dev: 0.0,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded sensor config from {}", path.display());
        Ok(config)
    }

    /// Check every parameter against its valid range
    pub fn validate(&self) -> Result<()> {
        if self.num_beams < 2 {
            return Err(SimError::invalid_config(format!(
                "num_beams must be at least 2, got {}",
                self.num_beams
            )));
        }
        if !(self.field_of_view.is_finite() && self.field_of_view > 0.0) {
            return Err(SimError::invalid_config(format!(
                "field_of_view must be positive, got {}",
                self.field_of_view
            )));
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(SimError::invalid_config(format!(
                "max_range must be positive, got {}",
                self.max_range
            )));
        }
        if !(self.noise_std_dev.is_finite() && self.noise_std_dev >= 0.0) {
            return Err(SimError::invalid_config(format!(
                "noise_std_dev must be non-negative, got {}",
                self.noise_std_dev
            )));
        }
        if !(self.cube_width.is_finite() && self.cube_width >= 0.0) {
            return Err(SimError::invalid_config(format!(
                "cube_width must be non-negative, got {}",
                self.cube_width
            )));
        }
        if !(self.ray_tracing_epsilon.is_finite() && self.ray_tracing_epsilon >= 0.0) {
            return Err(SimError::invalid_config(format!(
                "ray_tracing_epsilon must be non-negative, got {}",
                self.ray_tracing_epsilon
            )));
        }
        if self.theta_discretization < MIN_THETA_DISCRETIZATION {
            return Err(SimError::invalid_config(format!(
                "theta_discretization must be at least {}, got {}",
                MIN_THETA_DISCRETIZATION, self.theta_discretization
            )));
        }
        Ok(())
    }

    /// Angle between neighbouring beams
    #[inline]
    pub fn angle_increment(&self) -> f64 {
        self.field_of_view / (self.num_beams - 1) as f64
    }

    /// Angle of the first beam relative to the sensor heading
    #[inline]
    pub fn angle_min(&self) -> f64 {
        -self.field_of_view / 2.0
    }

    /// Angle of the last beam relative to the sensor heading
    #[inline]
    pub fn angle_max(&self) -> f64 {
        self.field_of_view / 2.0
    }

    /// Undiscretized world-frame beam angles for a sensor heading
    pub fn beam_angles(&self, heading: f64) -> Vec<f64> {
        let start = heading + self.angle_min();
        let step = self.angle_increment();
        (0..self.num_beams).map(|i| start + step * i as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SensorConfig::default().validate().is_ok());
        assert!(SensorConfig::hokuyo_ust_10lx().validate().is_ok());
        assert!(SensorConfig::full_turn(360).validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SensorConfig::from_json_str(r#"{"num_beams": 11, "seed": 7}"#).unwrap();
        assert_eq!(config.num_beams, 11);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.theta_discretization, 2000);
        assert_eq!(config.max_range, 10.0);
    }

    #[test]
    fn test_rejects_single_beam() {
        let err = SensorConfig::from_json_str(r#"{"num_beams": 1}"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            SensorConfig {
                field_of_view: 0.0,
                ..Default::default()
            },
            SensorConfig {
                max_range: f64::NAN,
                ..Default::default()
            },
            SensorConfig {
                noise_std_dev: -0.1,
                ..Default::default()
            },
            SensorConfig {
                cube_width: -1.0,
                ..Default::default()
            },
            SensorConfig {
                ray_tracing_epsilon: f64::INFINITY,
                ..Default::default()
            },
            SensorConfig {
                theta_discretization: 3,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = SensorConfig::from_json_str("{num_beams: }").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn test_beam_angles_span_field_of_view() {
        let config = SensorConfig {
            num_beams: 5,
            field_of_view: 2.0,
            ..Default::default()
        };
        let angles = config.beam_angles(1.0);
        assert_eq!(angles.len(), 5);
        assert!((angles[0] - 0.0).abs() < 1e-12);
        assert!((angles[2] - 1.0).abs() < 1e-12);
        assert!((angles[4] - 2.0).abs() < 1e-12);
        assert!((config.angle_increment() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SensorConfig::load("/nonexistent/scan_sim.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
