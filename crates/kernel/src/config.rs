use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tilewalk_tilemap::MapConfig;

use crate::bounds::BoundPolicyKind;
use crate::entity::{DEFAULT_SMOOTHING, Integration, ResolveMode, Shape};
use crate::timing::FIXED_DELTA_TIME;

/// Errors from reading or validating a simulation config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Level and player setup. Every field has a default, so a YAML file only
/// needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Camera view width.
    pub screen_width: f32,
    /// Camera view height.
    pub screen_height: f32,
    pub map: MapConfig,
    /// Target speed added per held direction, scaled by `delta_time`.
    pub entity_speed: f32,
    pub entity_shape: Shape,
    /// Top-left corner of the player at level start.
    pub spawn: Vec2,
    pub velocity_smoothing: f32,
    pub camera_lerp: f32,
    /// Step used by the fixed frame clock.
    pub fixed_delta: f32,
    pub integration: Integration,
    pub resolve_mode: ResolveMode,
    pub bound_policy: BoundPolicyKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: 640.0,
            screen_height: 480.0,
            map: MapConfig::default(),
            entity_speed: 200.0,
            entity_shape: Shape::Circle { radius: 10.0 },
            spawn: Vec2::new(100.0, 100.0),
            velocity_smoothing: DEFAULT_SMOOTHING,
            camera_lerp: 0.20,
            fixed_delta: FIXED_DELTA_TIME,
            integration: Integration::PerFrame,
            resolve_mode: ResolveMode::Penetration,
            bound_policy: BoundPolicyKind::Revert,
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the simulation cannot run with. NaN and infinities fail
    /// every check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if !(positive(self.screen_width) && positive(self.screen_height)) {
            return invalid("screen size must be positive");
        }
        if !(positive(self.map.tile_width) && positive(self.map.tile_height)) {
            return invalid("tile size must be positive");
        }
        if !(self.entity_speed.is_finite() && self.entity_speed >= 0.0) {
            return invalid("entity_speed must not be negative");
        }
        let extent = self.entity_shape.extent();
        if !(positive(extent.x) && positive(extent.y)) {
            return invalid("entity_shape must have a positive size");
        }
        if !self.spawn.is_finite() {
            return invalid("spawn must be finite");
        }
        if !(self.velocity_smoothing > 0.0 && self.velocity_smoothing <= 1.0) {
            return invalid("velocity_smoothing must be in (0, 1]");
        }
        if !(self.camera_lerp > 0.0 && self.camera_lerp <= 1.0) {
            return invalid("camera_lerp must be in (0, 1]");
        }
        if !positive(self.fixed_delta) {
            return invalid("fixed_delta must be positive");
        }
        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
