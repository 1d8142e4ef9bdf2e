//! Scene node components.
//!
//! Every drawable in the arena is a hecs entity built from these.

use glam::Vec2;

/// Screen position of a node. Children store an offset from their container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPos(pub Vec2);

/// Draw order; higher draws on top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible(pub bool);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteScale(pub Vec2);

/// Radians; only touched by movers bound with `rotate_to_target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(pub f32);

/// Texture frame plus the clip currently playing on it (if any)
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteClip {
    pub texture: String,
    pub frame: String,
    pub playing: Option<String>,
}

impl SpriteClip {
    pub fn still(texture: impl Into<String>, frame: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            frame: frame.into(),
            playing: None,
        }
    }
}

/// What a node is, used to find children by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Creature,
    Socle,
    Body,
    LifeBar,
    Effect,
    Detail,
    Projectile,
}

/// A node that owns other nodes
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub children: Vec<hecs::Entity>,
}

/// Back-link from a child to its container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildOf(pub hecs::Entity);

/// Marker: the host may drag this container
#[derive(Debug, Clone, Copy)]
pub struct Draggable;

/// Attack projectile, tagged with the creature id that owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projectile {
    pub owner: String,
}

/// Life bar widget data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeBar {
    pub max: i32,
    pub current: i32,
    pub color: u32,
}

/// Status effect icon (or its border frame)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectIcon {
    pub effect: String,
    pub border: bool,
}

/// Hover detail card contents
#[derive(Debug, Clone, PartialEq)]
pub struct DetailCard {
    pub name: String,
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spe_def: i32,
    pub attack_type: String,
    pub range: u32,
    pub atk_speed: f32,
}
