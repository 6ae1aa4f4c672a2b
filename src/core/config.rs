//! Generation configuration with documented constants
//!
//! All warp-lane tunables are collected here with explanations of their
//! purpose and how they interact with each other. They are configurable
//! constants, not hard law; the defaults reproduce the reference behavior.

use serde::{Deserialize, Serialize};

use crate::core::error::{CosmogenError, Result};

/// Tunables for the warp lane builder
///
/// These values have been tuned to produce long, smooth-looking lanes on
/// galaxies in the low thousands of stars. Changing them affects lane shape
/// and the failure rate on sparse populations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpLaneConfig {
    /// Minimum start-to-end separation as a fraction of galaxy radius
    ///
    /// Lanes are meant to be long-distance routes; endpoints closer than
    /// this fraction are rejected during endpoint selection.
    pub min_separation_factor: f64,

    /// Target distance per hop as a fraction of galaxy radius
    ///
    /// Hop count for a lane is `distance / (radius * this)`, floored at
    /// `min_hops`. Smaller = denser waypoint sampling along the curve.
    pub hop_distance_factor: f64,

    /// Minimum hop count per lane, including both endpoints
    pub min_hops: usize,

    /// Bezier control-point offset as a fraction of galaxy radius
    ///
    /// The curve bends through a control point pushed off the midpoint by
    /// up to this fraction of the radius. Larger = more dramatic arcs.
    pub control_offset_factor: f64,

    /// Maximum perpendicular deviation for refinement candidates,
    /// as a fraction of galaxy radius
    ///
    /// During segment refinement, a star further than this from the segment
    /// line is not considered part of the corridor.
    pub max_deviation_factor: f64,

    /// Refinement insertions attempted per coarse-path segment
    pub refinement_insertions_per_segment: usize,

    /// Endpoint-pair selection attempts before a lane attempt is abandoned
    pub start_attempts: usize,

    /// Full lane-construction attempts per requested lane
    ///
    /// When exhausted the lane is skipped and the generator emits fewer
    /// lanes than requested (logged degradation, never an error).
    pub lane_attempts: usize,
}

impl Default for WarpLaneConfig {
    fn default() -> Self {
        Self {
            min_separation_factor: 0.6,
            hop_distance_factor: 0.1,
            min_hops: 4,
            control_offset_factor: 0.4,
            max_deviation_factor: 0.2,
            refinement_insertions_per_segment: 3,
            start_attempts: 12,
            lane_attempts: 10,
        }
    }
}

impl WarpLaneConfig {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_separation_factor) {
            return Err(CosmogenError::InvalidConfig(format!(
                "min_separation_factor ({}) must be in [0, 1]",
                self.min_separation_factor
            )));
        }
        if self.hop_distance_factor <= 0.0 || !self.hop_distance_factor.is_finite() {
            return Err(CosmogenError::InvalidConfig(format!(
                "hop_distance_factor ({}) must be positive and finite",
                self.hop_distance_factor
            )));
        }
        if self.min_hops < 2 {
            return Err(CosmogenError::InvalidConfig(format!(
                "min_hops ({}) must be at least 2 (a lane needs both endpoints)",
                self.min_hops
            )));
        }
        if self.max_deviation_factor <= 0.0 || !self.max_deviation_factor.is_finite() {
            return Err(CosmogenError::InvalidConfig(format!(
                "max_deviation_factor ({}) must be positive and finite",
                self.max_deviation_factor
            )));
        }
        if self.start_attempts == 0 || self.lane_attempts == 0 {
            return Err(CosmogenError::InvalidConfig(
                "start_attempts and lane_attempts must be nonzero".into(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration, loadable from a TOML file
///
/// Only the warp lane builder has tunables today; the table is nested so
/// future sections slot in without breaking existing files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub warp: WarpLaneConfig,
}

impl GenerationConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GenerationConfig = toml::from_str(text)?;
        config.warp.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WarpLaneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_hop_factor() {
        let config = WarpLaneConfig {
            hop_distance_factor: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_min_hops_below_two() {
        let config = WarpLaneConfig {
            min_hops: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = GenerationConfig::from_toml_str(
            "[warp]\nmin_separation_factor = 0.5\nlane_attempts = 20\n",
        )
        .unwrap();
        assert_eq!(config.warp.min_separation_factor, 0.5);
        assert_eq!(config.warp.lane_attempts, 20);
        // Unnamed fields keep their defaults.
        assert_eq!(config.warp.min_hops, 4);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let result = GenerationConfig::from_toml_str("[warp]\nmin_separation_factor = 1.5\n");
        assert!(result.is_err());
    }
}
