//! Arena configuration loaded from JSON.

use crate::constants::*;
use crate::error::{ArenaError, Result};
use crate::services::GridTransform;
use serde::Deserialize;
use std::path::Path;

/// Tunables for an arena. Every field falls back to the `constants` default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Board to screen mapping used when the host doesn't inject its own
    pub board: GridTransform,
    /// Pixels per second for every creature's move binding
    pub move_speed: f32,
    pub creature_depth: i32,
    pub projectile_depth: i32,
    pub detail_offset: [f32; 2],
    pub body_scale: f32,
    pub effect_icon_spacing: f32,
    pub effect_icon_scale: f32,
    /// Orientation for creatures that arrive without one
    pub default_orientation: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            board: GridTransform::default(),
            move_speed: CREATURE_MOVE_SPEED,
            creature_depth: CREATURE_DEPTH,
            projectile_depth: PROJECTILE_DEPTH,
            detail_offset: [DETAIL_OFFSET_X, DETAIL_OFFSET_Y],
            body_scale: BODY_SCALE,
            effect_icon_spacing: EFFECT_ICON_SPACING,
            effect_icon_scale: EFFECT_ICON_SCALE,
            default_orientation: "DOWNLEFT".to_string(),
        }
    }
}

impl ArenaConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ArenaError::Config(format!("Failed to parse arena config: {}", e)))?;
        // Reject a bad default up front rather than on first spawn
        config
            .default_orientation
            .parse::<crate::creature::Orientation>()
            .map_err(|e| ArenaError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ArenaError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = ArenaConfig::from_json("{}").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.move_speed, 300.0);
        assert_eq!(config.projectile_depth, 7);
    }

    #[test]
    fn test_partial_override() {
        let config = ArenaConfig::from_json(
            r#"{ "move_speed": 150.0, "board": { "origin": [0.0, 0.0], "cell": [10.0, 10.0] } }"#,
        )
        .unwrap();
        assert_eq!(config.move_speed, 150.0);
        assert_eq!(config.board.cell, Vec2::new(10.0, 10.0));
        assert_eq!(config.creature_depth, CREATURE_DEPTH);
    }

    #[test]
    fn test_bad_default_orientation_rejected() {
        let err = ArenaConfig::from_json(r#"{ "default_orientation": "SIDEWAYS" }"#).unwrap_err();
        assert!(matches!(err, ArenaError::Config(_)));
    }
}
