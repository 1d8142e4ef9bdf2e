//! Attack projectile animation.
//!
//! Each creature owns one `AttackAnimator`, which owns at most one projectile
//! node. The lifecycle:
//! 1. `start` spawns the projectile at the flight source and schedules a flight
//! 2. The flight scheduler tweens it and reports the arrival once
//! 3. `complete` hides it, then either relaunches the same node (still
//!    attacking) or destroys it (stopped attacking, or owner torn down)
//!
//! Nothing here returns `StaleContext`: a dead owner container means the
//! projectile is destroyed and the animator goes back to idle.

use crate::components::{NodeKind, Projectile, SpriteClip};
use crate::constants::*;
use crate::error::{ArenaError, AssetKind, Result};
use crate::events::{ArenaEvent, DestroyReason, EventQueue};
use crate::flight::{FlightId, FlightPath, FlightScheduler};
use crate::scene::Scene;
use crate::services::{ClipRegistry, CoordinateTransform, ScaleTable};
use hecs::Entity;
use log::{debug, warn};

/// Everything the animator touches outside its own creature
pub struct AttackContext<'a> {
    pub scene: &'a mut Scene,
    pub flights: &'a mut FlightScheduler,
    pub transform: &'a dyn CoordinateTransform,
    pub scales: &'a dyn ScaleTable,
    pub clips: &'a dyn ClipRegistry,
    pub events: &'a mut EventQueue,
    pub projectile_depth: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    Idle,
    InFlight,
    Completing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttackState {
    Idle,
    InFlight { projectile: Entity, flight: FlightId },
    Completing { projectile: Entity },
}

#[derive(Debug)]
pub struct AttackAnimator {
    state: AttackState,
}

impl Default for AttackAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackAnimator {
    pub fn new() -> Self {
        Self {
            state: AttackState::Idle,
        }
    }

    pub fn phase(&self) -> AttackPhase {
        match self.state {
            AttackState::Idle => AttackPhase::Idle,
            AttackState::InFlight { .. } => AttackPhase::InFlight,
            AttackState::Completing { .. } => AttackPhase::Completing,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == AttackState::Idle
    }

    /// The projectile currently owned, if any
    pub fn projectile(&self) -> Option<Entity> {
        match self.state {
            AttackState::Idle => None,
            AttackState::InFlight { projectile, .. } | AttackState::Completing { projectile } => {
                Some(projectile)
            }
        }
    }

    pub fn flight(&self) -> Option<FlightId> {
        match self.state {
            AttackState::InFlight { flight, .. } => Some(flight),
            _ => None,
        }
    }

    /// Spawn a projectile for `sprite_key` at `path.source` and launch it.
    /// A no-op while a projectile is already out.
    pub fn start(
        &mut self,
        owner: &str,
        container: Entity,
        sprite_key: &str,
        path: FlightPath,
        ctx: &mut AttackContext,
    ) -> Result<()> {
        if !self.is_idle() {
            debug!("{}: attack already in flight, ignoring start", owner);
            return Ok(());
        }

        if ctx.clips.clip(sprite_key).is_none() {
            return Err(ArenaError::AssetNotFound {
                key: sprite_key.to_string(),
                asset: AssetKind::Clip,
            });
        }
        let scale = ctx.scales.scale_of(sprite_key).ok_or_else(|| ArenaError::AssetNotFound {
            key: sprite_key.to_string(),
            asset: AssetKind::Scale,
        })?;

        let projectile = ctx.scene.spawn_sprite(
            path.source,
            SpriteClip::still(ATTACK_ATLAS, format!("{}/{}", sprite_key, ATTACK_FIRST_FRAME)),
            NodeKind::Projectile,
            (Projectile {
                owner: owner.to_string(),
            },),
        );
        // Just spawned, these cannot be stale
        let _ = ctx.scene.set_scale(projectile, scale);
        let _ = ctx.scene.play(projectile, sprite_key);
        let _ = ctx.scene.set_depth(projectile, ctx.projectile_depth);

        debug!("{}: spawned {} projectile {:?}", owner, sprite_key, projectile);
        ctx.events.push(ArenaEvent::ProjectileSpawned {
            owner: owner.to_string(),
            projectile,
            at: path.source,
        });

        self.launch(owner, container, projectile, path, ctx);
        Ok(())
    }

    /// Handle the arrival of `flight`.
    ///
    /// `next` is the path for another cycle, computed from the owner's state
    /// at this moment; `None` means the owner is no longer attacking.
    pub fn complete(
        &mut self,
        owner: &str,
        flight: FlightId,
        container: Entity,
        next: Option<FlightPath>,
        ctx: &mut AttackContext,
    ) {
        let projectile = match self.state {
            AttackState::InFlight {
                projectile,
                flight: expected,
            } if expected == flight => projectile,
            _ => {
                warn!(
                    "{}: completion for {:?} does not match state {:?}, ignoring",
                    owner, flight, self.state
                );
                return;
            }
        };
        self.state = AttackState::Completing { projectile };

        let _ = ctx.scene.set_visible(projectile, false);

        if !ctx.scene.is_alive(container) {
            warn!("{}: owner torn down mid-flight, dropping projectile", owner);
            self.destroy(owner, projectile, DestroyReason::StaleContext, ctx);
            return;
        }

        let Some(path) = next else {
            self.destroy(owner, projectile, DestroyReason::Finished, ctx);
            return;
        };

        let replayed = ctx
            .scene
            .set_position(projectile, path.source)
            .and_then(|_| ctx.scene.set_visible(projectile, true))
            .and_then(|_| ctx.scene.set_depth(projectile, ctx.projectile_depth));
        if replayed.is_err() {
            warn!("{}: projectile {:?} vanished before replay", owner, projectile);
            self.state = AttackState::Idle;
            return;
        }

        debug!("{}: replaying projectile {:?}", owner, projectile);
        ctx.events.push(ArenaEvent::ProjectileReplayed {
            owner: owner.to_string(),
            projectile,
        });
        self.launch(owner, container, projectile, path, ctx);
    }

    /// Schedule a flight, unless the owner is already gone
    fn launch(
        &mut self,
        owner: &str,
        container: Entity,
        projectile: Entity,
        path: FlightPath,
        ctx: &mut AttackContext,
    ) {
        if !ctx.scene.is_alive(container) {
            warn!("{}: owner torn down before launch, dropping projectile", owner);
            self.destroy(owner, projectile, DestroyReason::StaleContext, ctx);
            return;
        }

        let flight = ctx.flights.schedule(owner, projectile, path);
        debug!(
            "{}: flight {:?} {:?} -> {:?} over {}ms",
            owner, flight, path.source, path.destination, path.duration
        );
        ctx.events.push(ArenaEvent::FlightScheduled {
            owner: owner.to_string(),
            flight,
            source: path.source,
            destination: path.destination,
            duration: path.duration,
        });
        self.state = AttackState::InFlight { projectile, flight };
    }

    fn destroy(
        &mut self,
        owner: &str,
        projectile: Entity,
        reason: DestroyReason,
        ctx: &mut AttackContext,
    ) {
        let _ = ctx.scene.despawn(projectile);
        self.state = AttackState::Idle;
        debug!("{}: destroyed projectile {:?} ({:?})", owner, projectile, reason);
        ctx.events.push(ArenaEvent::ProjectileDestroyed {
            owner: owner.to_string(),
            projectile,
            reason,
        });
    }
}
