//! Tunables for layout and scroll physics.
//!
//! Every field has a default, so a JSON document only needs the keys it wants
//! to override:
//!
//! ```
//! let config = lazygrid::GridConfig::from_json(r#"{ "cell_height": 48 }"#).unwrap();
//! assert_eq!(config.cell_height, 48);
//! assert_eq!(config.max_overscroll, 150.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Fixed row height used when no config is supplied.
pub const DEFAULT_CELL_HEIGHT: i32 = 150;

/// Fraction of a drag delta that turns into overscroll once past a bound.
pub const DEFAULT_OVERSCROLL_PULL_MULTIPLIER: f32 = 0.3;

/// Hard limit for the overscroll displacement, in pixels.
pub const DEFAULT_MAX_OVERSCROLL: f32 = 150.0;

/// "Medium-low" spring stiffness used for the overscroll spring-back.
pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;

/// Critically damped: no bounce past zero.
pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

/// Platform scroll friction fed into the fling spline.
pub const DEFAULT_SCROLL_FRICTION: f32 = 0.015;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Height of every row, header row included.
    pub cell_height: i32,
    pub overscroll_pull_multiplier: f32,
    pub max_overscroll: f32,
    pub spring_stiffness: f32,
    pub spring_damping_ratio: f32,
    /// Distance from the target under which the spring counts as settled.
    pub spring_visibility_threshold: f32,
    pub scroll_friction: f32,
    /// Screen density (physical pixels per logical pixel) for fling distances.
    pub density: f32,
    /// Pointer samples older than this are ignored when computing release velocity.
    pub velocity_horizon_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_height: DEFAULT_CELL_HEIGHT,
            overscroll_pull_multiplier: DEFAULT_OVERSCROLL_PULL_MULTIPLIER,
            max_overscroll: DEFAULT_MAX_OVERSCROLL,
            spring_stiffness: STIFFNESS_MEDIUM_LOW,
            spring_damping_ratio: DAMPING_RATIO_NO_BOUNCY,
            spring_visibility_threshold: 0.01,
            scroll_friction: DEFAULT_SCROLL_FRICTION,
            density: 1.0,
            velocity_horizon_ms: 100,
        }
    }
}

impl GridConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the layout and physics code cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.cell_height <= 0 {
            return Err(GridError::InvalidConfig(format!(
                "cell_height must be positive, got {}",
                self.cell_height
            )));
        }
        check_non_negative("overscroll_pull_multiplier", self.overscroll_pull_multiplier)?;
        check_non_negative("max_overscroll", self.max_overscroll)?;
        check_positive("spring_stiffness", self.spring_stiffness)?;
        check_positive("spring_damping_ratio", self.spring_damping_ratio)?;
        check_positive("spring_visibility_threshold", self.spring_visibility_threshold)?;
        check_positive("scroll_friction", self.scroll_friction)?;
        check_positive("density", self.density)?;
        if self.velocity_horizon_ms == 0 {
            return Err(GridError::InvalidConfig(
                "velocity_horizon_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidConfig(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidConfig(format!(
            "{name} must be a finite number >= 0, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_height, 150);
        assert_eq!(config.overscroll_pull_multiplier, 0.3);
        assert_eq!(config.max_overscroll, 150.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = GridConfig::from_json(r#"{ "max_overscroll": 80.0, "density": 2.5 }"#)
            .expect("valid config");
        assert_eq!(config.max_overscroll, 80.0);
        assert_eq!(config.density, 2.5);
        assert_eq!(config.cell_height, DEFAULT_CELL_HEIGHT);
        assert_eq!(config.spring_stiffness, STIFFNESS_MEDIUM_LOW);
    }

    #[test]
    fn rejects_bad_values() {
        let err = GridConfig::from_json(r#"{ "cell_height": 0 }"#).unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(_)));

        let err = GridConfig::from_json(r#"{ "spring_stiffness": -1.0 }"#).unwrap_err();
        assert!(err.to_string().contains("spring_stiffness"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GridConfig::from_json("{ cell_height: ").unwrap_err();
        assert!(matches!(err, GridError::ConfigParse(_)));
    }
}
