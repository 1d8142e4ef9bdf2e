//! Battle creature state and construction.
//!
//! A `Creature` is the authoritative record behind one unit on the arena
//! board: identity and stats from the server payload, the board position
//! and target written by the combat driver each tick, and the scene
//! container its visuals hang from.

use crate::attack::{AttackAnimator, AttackContext, AttackPhase};
use crate::components::{
    DetailCard, Draggable, EffectIcon, LifeBar, NodeKind, SpriteClip, SpriteScale,
};
use crate::config::ArenaConfig;
use crate::constants::*;
use crate::error::{ArenaError, AssetKind, Result};
use crate::flight::{FlightId, FlightPath};
use crate::movement::{MoveHandle, MovementService};
use crate::scene::Scene;
use crate::services::{ClipRegistry, CoordinateTransform, ScaleTable};
use glam::{IVec2, Vec2};
use hecs::Entity;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Melee or ranged, derived from the range stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeType {
    Melee,
    Ranged,
}

impl RangeType {
    pub fn classify(range: u32) -> Self {
        if range > MELEE_MAX_RANGE {
            RangeType::Ranged
        } else {
            RangeType::Melee
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Idle,
    Moving,
    Attacking,
}

impl Default for ActionStatus {
    fn default() -> Self {
        ActionStatus::Moving
    }
}

impl FromStr for ActionStatus {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "IDLE" => Ok(ActionStatus::Idle),
            "MOVING" => Ok(ActionStatus::Moving),
            "ATTACKING" => Ok(ActionStatus::Attacking),
            other => Err(ArenaError::InvalidState(format!("unknown action `{}`", other))),
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionStatus::Idle => "IDLE",
            ActionStatus::Moving => "MOVING",
            ActionStatus::Attacking => "ATTACKING",
        };
        f.write_str(s)
    }
}

/// Facing direction of the body sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Down,
    DownLeft,
    Left,
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::DownLeft
    }
}

impl FromStr for Orientation {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DOWN" => Ok(Orientation::Down),
            "DOWNLEFT" => Ok(Orientation::DownLeft),
            "LEFT" => Ok(Orientation::Left),
            "UPLEFT" => Ok(Orientation::UpLeft),
            "UP" => Ok(Orientation::Up),
            "UPRIGHT" => Ok(Orientation::UpRight),
            "RIGHT" => Ok(Orientation::Right),
            "DOWNRIGHT" => Ok(Orientation::DownRight),
            other => Err(ArenaError::InvalidState(format!("unknown orientation `{}`", other))),
        }
    }
}

/// Construction payload as sent by the game server
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureSpec {
    pub index: String,
    pub name: String,
    pub id: String,
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spe_def: i32,
    pub range: u32,
    /// Milliseconds per attack cycle
    pub atk_speed: f32,
    pub attack_type: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attack_sprite: String,
    pub position_x: i32,
    pub position_y: i32,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub life: Option<i32>,
    #[serde(default)]
    pub team: u32,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub effects: Vec<String>,
}

impl CreatureSpec {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ArenaError::Config(format!("Failed to parse creature: {}", e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub index: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub spe_def: i32,
    pub range: u32,
    pub atk_speed: f32,
    pub attack_type: String,
    pub kind: String,
    pub attack_sprite: String,
}

/// Scene, movement and asset plumbing a creature needs while being built
pub struct SpawnContext<'a> {
    pub scene: &'a mut Scene,
    pub movement: &'a mut dyn MovementService,
    pub transform: &'a dyn CoordinateTransform,
    pub scales: &'a dyn ScaleTable,
    pub clips: &'a dyn ClipRegistry,
    pub config: &'a ArenaConfig,
}

#[derive(Debug)]
pub struct Creature {
    identity: Identity,
    stats: Stats,
    position: IVec2,
    target: Option<IVec2>,
    orientation: Orientation,
    action: ActionStatus,
    life: Option<i32>,
    team: u32,
    container: Entity,
    mover: MoveHandle,
    attack: AttackAnimator,
}

impl Creature {
    /// Validate the payload and its attack sprite, then build the container
    /// and its visuals. Nothing is spawned if validation fails.
    pub fn spawn(spec: CreatureSpec, draggable: bool, ctx: &mut SpawnContext) -> Result<Self> {
        if ctx.clips.clip(&spec.attack_sprite).is_none() {
            return Err(ArenaError::AssetNotFound {
                key: spec.attack_sprite,
                asset: AssetKind::Clip,
            });
        }
        if ctx.scales.scale_of(&spec.attack_sprite).is_none() {
            return Err(ArenaError::AssetNotFound {
                key: spec.attack_sprite,
                asset: AssetKind::Scale,
            });
        }
        let orientation: Orientation = match spec.orientation.as_deref() {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => ctx.config.default_orientation.parse()?,
        };
        let action: ActionStatus = match spec.action.as_deref() {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => ActionStatus::default(),
        };

        let position = IVec2::new(spec.position_x, spec.position_y);
        let container = ctx.scene.spawn_container(
            ctx.transform.to_screen(position),
            ctx.config.creature_depth,
            NodeKind::Creature,
        );
        let mover = ctx.movement.bind(container, ctx.config.move_speed, false);

        let creature = Self {
            identity: Identity {
                index: spec.index,
                name: spec.name,
                id: spec.id,
            },
            stats: Stats {
                hp: spec.hp,
                atk: spec.atk,
                def: spec.def,
                spe_def: spec.spe_def,
                range: spec.range,
                atk_speed: spec.atk_speed,
                attack_type: spec.attack_type,
                kind: spec.kind,
                attack_sprite: spec.attack_sprite,
            },
            position,
            target: None,
            orientation,
            action,
            life: spec.life,
            team: spec.team,
            container,
            mover,
            attack: AttackAnimator::new(),
        };

        creature.attach_visuals(ctx.scene, ctx.config, &spec.rarity, &spec.effects)?;
        if draggable {
            ctx.scene.insert_one(container, Draggable)?;
        }
        Ok(creature)
    }

    fn attach_visuals(
        &self,
        scene: &mut Scene,
        config: &ArenaConfig,
        rarity: &str,
        effects: &[String],
    ) -> Result<()> {
        // Layout follows the unscaled frame height
        let body_height = BODY_FRAME_HEIGHT;

        scene.add_child(
            self.container,
            Vec2::new(0.0, body_height),
            NodeKind::Socle,
            (SpriteClip::still("socle", ""),),
        )?;
        scene.add_child(
            self.container,
            Vec2::ZERO,
            NodeKind::Body,
            (
                SpriteClip::still(rarity, format!("{}/0/1/0", self.identity.index)),
                SpriteScale(Vec2::splat(config.body_scale)),
            ),
        )?;

        if let Some(life) = self.life {
            let color = if self.team == HOME_TEAM {
                LIFE_BAR_FRIENDLY_COLOR
            } else {
                LIFE_BAR_HOSTILE_COLOR
            };
            scene.add_child(
                self.container,
                Vec2::new(LIFE_BAR_OFFSET_X, body_height / 2.0 + 5.0),
                NodeKind::LifeBar,
                (LifeBar {
                    max: self.stats.hp,
                    current: life,
                    color,
                },),
            )?;
        }

        let icon_y = body_height + EFFECT_ROW_OFFSET;
        let icon_scale = SpriteScale(Vec2::splat(config.effect_icon_scale));
        for (c, effect) in effects.iter().enumerate() {
            let x = c as f32 * config.effect_icon_spacing - config.effect_icon_spacing;
            for border in [false, true] {
                let frame = if border { "border" } else { effect.as_str() };
                scene.add_child(
                    self.container,
                    Vec2::new(x, icon_y),
                    NodeKind::Effect,
                    (
                        SpriteClip::still("effects", frame),
                        icon_scale,
                        EffectIcon {
                            effect: effect.clone(),
                            border,
                        },
                    ),
                )?;
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn target(&self) -> Option<IVec2> {
        self.target
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn action(&self) -> ActionStatus {
        self.action
    }

    pub fn life(&self) -> Option<i32> {
        self.life
    }

    pub fn container(&self) -> Entity {
        self.container
    }

    pub fn mover(&self) -> MoveHandle {
        self.mover
    }

    /// Always derived from the current range, so range changes can't leave it stale
    pub fn range_type(&self) -> RangeType {
        RangeType::classify(self.stats.range)
    }

    pub fn attack_phase(&self) -> AttackPhase {
        self.attack.phase()
    }

    pub fn projectile(&self) -> Option<Entity> {
        self.attack.projectile()
    }

    pub fn flight(&self) -> Option<FlightId> {
        self.attack.flight()
    }

    pub fn set_target(&mut self, x: i32, y: i32) {
        self.target = Some(IVec2::new(x, y));
    }

    /// Apply a nullable target pair from a tick payload.
    /// Both set or both cleared; one without the other is rejected.
    pub fn apply_target(&mut self, x: Option<i32>, y: Option<i32>) -> Result<()> {
        match (x, y) {
            (Some(x), Some(y)) => self.set_target(x, y),
            (None, None) => self.clear_target(),
            _ => {
                return Err(ArenaError::InvalidState(format!(
                    "{}: target must set both coordinates, got ({:?}, {:?})",
                    self.identity.id, x, y
                )))
            }
        }
        Ok(())
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn set_action(&mut self, action: ActionStatus) {
        self.action = action;
    }

    pub fn set_action_str(&mut self, action: &str) -> Result<()> {
        self.action = action.parse()?;
        Ok(())
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Board position, written by the combat driver between ticks
    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    pub fn set_range(&mut self, range: u32) {
        self.stats.range = range;
    }

    pub fn set_life(&mut self, scene: &mut Scene, life: i32) {
        self.life = Some(life);
        if let Some(bar) = scene.first_child(self.container, NodeKind::LifeBar) {
            let _ = scene.modify::<LifeBar, _>(bar, |b| b.current = life);
        }
    }

    pub fn move_toward(&self, movement: &mut dyn MovementService, destination: Vec2) {
        movement.move_to(self.mover, destination);
    }

    /// Flight source and destination for the current position and target.
    /// Ranged attackers shoot from their cell; melee plays in place on the target.
    pub fn flight_path(&self, transform: &dyn CoordinateTransform) -> Result<FlightPath> {
        let target = self.target.ok_or_else(|| {
            ArenaError::InvalidState(format!("{}: attack without a target", self.identity.id))
        })?;
        let destination = transform.to_screen(target);
        let source = match self.range_type() {
            RangeType::Ranged => transform.to_screen(self.position),
            RangeType::Melee => destination,
        };
        Ok(FlightPath {
            source,
            destination,
            duration: self.stats.atk_speed,
        })
    }

    /// Begin an attack cycle; a no-op while one is already in flight
    pub fn start_attack(&mut self, ctx: &mut AttackContext) -> Result<()> {
        if !self.attack.is_idle() {
            return Ok(());
        }
        let path = self.flight_path(ctx.transform)?;
        self.attack.start(
            &self.identity.id,
            self.container,
            &self.stats.attack_sprite,
            path,
            ctx,
        )
    }

    /// Flight arrival: replay while still attacking, otherwise let the projectile go
    pub fn on_flight_complete(&mut self, flight: FlightId, ctx: &mut AttackContext) {
        let next = match self.action {
            ActionStatus::Attacking => self.flight_path(ctx.transform).ok(),
            _ => None,
        };
        self.attack
            .complete(&self.identity.id, flight, self.container, next, ctx);
    }

    /// Show the detail card, unless one is already up
    pub fn hover_enter(&self, scene: &mut Scene, config: &ArenaConfig) {
        if scene.first_child(self.container, NodeKind::Detail).is_some() {
            return;
        }
        let card = DetailCard {
            name: self.identity.name.clone(),
            hp: self.life.unwrap_or(self.stats.hp),
            atk: self.stats.atk,
            def: self.stats.def,
            spe_def: self.stats.spe_def,
            attack_type: self.stats.attack_type.clone(),
            range: self.stats.range,
            atk_speed: self.stats.atk_speed,
        };
        // Torn-down container: nothing to show the card on
        let _ = scene.add_child(
            self.container,
            Vec2::from(config.detail_offset),
            NodeKind::Detail,
            (card,),
        );
    }

    pub fn hover_exit(&self, scene: &mut Scene) {
        if let Some(detail) = scene.first_child(self.container, NodeKind::Detail) {
            let _ = scene.remove_child(self.container, detail);
        }
    }

    /// Tear down the rendering context. Any projectile in flight is cleaned
    /// up when its completion arrives.
    pub fn despawn_view(&self, scene: &mut Scene) {
        let _ = scene.despawn(self.container);
    }
}
