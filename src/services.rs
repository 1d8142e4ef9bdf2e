//! Pure lookup services supplied by the host renderer.
//!
//! The creature core never reaches for globals: coordinate mapping and
//! attack sprite metadata come in through these traits.

use crate::constants::*;
use crate::error::{ArenaError, Result};
use glam::{IVec2, Vec2};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Board cell to screen point
pub trait CoordinateTransform {
    fn to_screen(&self, board: IVec2) -> Vec2;
}

/// Attack sprite key to sprite scale factors
pub trait ScaleTable {
    fn scale_of(&self, key: &str) -> Option<Vec2>;
}

/// Attack sprite key to animation clip
pub trait ClipRegistry {
    fn clip(&self, key: &str) -> Option<&AttackClip>;
}

/// Affine grid mapping: `origin + board * cell`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GridTransform {
    pub origin: Vec2,
    pub cell: Vec2,
}

impl GridTransform {
    pub fn new(origin: Vec2, cell: Vec2) -> Self {
        Self { origin, cell }
    }
}

impl Default for GridTransform {
    fn default() -> Self {
        Self {
            origin: Vec2::new(BOARD_ORIGIN_X, BOARD_ORIGIN_Y),
            cell: Vec2::new(BOARD_CELL_WIDTH, BOARD_CELL_HEIGHT),
        }
    }
}

impl CoordinateTransform for GridTransform {
    fn to_screen(&self, board: IVec2) -> Vec2 {
        self.origin + board.as_vec2() * self.cell
    }
}

/// A looping attack animation registered under its sprite key
#[derive(Debug, Clone, PartialEq)]
pub struct AttackClip {
    pub frames: u32,
    pub frame_rate: f32,
    pub repeat: i32,
}

impl AttackClip {
    pub fn looping(frames: u32) -> Self {
        Self {
            frames,
            frame_rate: DEFAULT_CLIP_FRAME_RATE,
            repeat: CLIP_REPEAT_FOREVER,
        }
    }
}

/// Raw sprite table entry. An entry without `frames` registers no clip and
/// one without `scale` registers no scale; either gap is a missing asset.
#[derive(Debug, Clone, Deserialize)]
struct SpriteEntry {
    scale: Option<[f32; 2]>,
    frames: Option<u32>,
    frame_rate: Option<f32>,
    repeat: Option<i32>,
}

/// Attack sprite metadata loaded from JSON; serves as both scale table and clip registry
#[derive(Debug, Clone, Default)]
pub struct AttackSpriteTable {
    scales: HashMap<String, Vec2>,
    clips: HashMap<String, AttackClip>,
}

impl AttackSpriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{ "KEY": { "scale": [sx, sy], "frames": n, ... }, ... }`
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, SpriteEntry> = serde_json::from_str(json)
            .map_err(|e| ArenaError::Config(format!("Failed to parse sprite table: {}", e)))?;

        let mut table = Self::new();
        for (key, entry) in raw {
            if let Some([sx, sy]) = entry.scale {
                table.scales.insert(key.clone(), Vec2::new(sx, sy));
            }
            if let Some(frames) = entry.frames {
                let clip = AttackClip {
                    frames,
                    frame_rate: entry.frame_rate.unwrap_or(DEFAULT_CLIP_FRAME_RATE),
                    repeat: entry.repeat.unwrap_or(CLIP_REPEAT_FOREVER),
                };
                table.clips.insert(key, clip);
            }
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ArenaError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Register a key with both its clip and its scale
    pub fn insert(&mut self, key: impl Into<String>, scale: Vec2, clip: AttackClip) {
        let key = key.into();
        self.scales.insert(key.clone(), scale);
        self.clips.insert(key, clip);
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl ScaleTable for AttackSpriteTable {
    fn scale_of(&self, key: &str) -> Option<Vec2> {
        self.scales.get(key).copied()
    }
}

impl ClipRegistry for AttackSpriteTable {
    fn clip(&self, key: &str) -> Option<&AttackClip> {
        self.clips.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_transform_maps_cells() {
        let t = GridTransform::new(Vec2::new(100.0, 500.0), Vec2::new(10.0, -20.0));
        assert_eq!(t.to_screen(IVec2::new(0, 0)), Vec2::new(100.0, 500.0));
        assert_eq!(t.to_screen(IVec2::new(2, 3)), Vec2::new(120.0, 440.0));
    }

    #[test]
    fn test_sprite_table_from_json() {
        let table = AttackSpriteTable::from_json(
            r#"{
                "FIRE": { "scale": [2.0, 3.0], "frames": 8, "frame_rate": 12.0 },
                "ROCK": { "scale": [1.0, 1.0], "frames": 4 }
            }"#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.scale_of("FIRE"), Some(Vec2::new(2.0, 3.0)));
        assert_eq!(table.clip("FIRE").map(|c| c.frame_rate), Some(12.0));
        assert_eq!(table.clip("ROCK").map(|c| c.repeat), Some(CLIP_REPEAT_FOREVER));
        assert!(table.clip("WATER").is_none());
        assert!(table.scale_of("WATER").is_none());
    }

    #[test]
    fn test_sprite_table_entry_without_scale() {
        let table = AttackSpriteTable::from_json(r#"{ "GHOST": { "frames": 6 } }"#).unwrap();
        assert!(table.clip("GHOST").is_some());
        assert!(table.scale_of("GHOST").is_none());
    }

    #[test]
    fn test_sprite_table_entry_without_frames() {
        let table = AttackSpriteTable::from_json(r#"{ "DUST": { "scale": [1.0, 1.0] } }"#).unwrap();
        assert!(table.clip("DUST").is_none());
        assert_eq!(table.scale_of("DUST"), Some(Vec2::ONE));
    }

    #[test]
    fn test_sprite_table_rejects_bad_json() {
        let err = AttackSpriteTable::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ArenaError::Config(_)));
    }
}
