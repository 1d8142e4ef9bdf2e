//! Arena driver - owns the scene and sequences every creature's visuals.
//!
//! The host's combat driver calls the tick mutators (`set_target`,
//! `set_action`, `start_attack`, `move_creature`) between frames and
//! `update` once per frame. `update` advances movement and flights and
//! hands every flight completion back to the creature that launched it.

use crate::attack::AttackContext;
use crate::config::ArenaConfig;
use crate::creature::{ActionStatus, Creature, CreatureSpec, SpawnContext};
use crate::error::{ArenaError, Result};
use crate::events::{ArenaEvent, EventQueue};
use crate::flight::FlightScheduler;
use crate::movement::{MoveTo, MovementService};
use crate::scene::Scene;
use crate::services::{AttackSpriteTable, ClipRegistry, CoordinateTransform, ScaleTable};
use glam::IVec2;
use hecs::Entity;
use log::{debug, warn};
use std::collections::HashMap;

pub struct Arena {
    config: ArenaConfig,
    scene: Scene,
    flights: FlightScheduler,
    transform: Box<dyn CoordinateTransform>,
    scales: Box<dyn ScaleTable>,
    clips: Box<dyn ClipRegistry>,
    movement: Box<dyn MovementService>,
    creatures: HashMap<String, Creature>,
    /// Torn-down creatures keyed by their projectile still in the air
    lingering: HashMap<Entity, Creature>,
    events: EventQueue,
}

/// Split borrow of the arena pieces a flight needs
fn attack_context<'a>(
    scene: &'a mut Scene,
    flights: &'a mut FlightScheduler,
    transform: &'a dyn CoordinateTransform,
    scales: &'a dyn ScaleTable,
    clips: &'a dyn ClipRegistry,
    events: &'a mut EventQueue,
    config: &ArenaConfig,
) -> AttackContext<'a> {
    AttackContext {
        scene,
        flights,
        transform,
        scales,
        clips,
        events,
        projectile_depth: config.projectile_depth,
    }
}

impl Arena {
    /// Arena using the configured board mapping, a `MoveTo` mover and one sprite table
    pub fn new(config: ArenaConfig, sprites: AttackSpriteTable) -> Self {
        let transform = Box::new(config.board);
        Self::with_services(
            config,
            transform,
            Box::new(sprites.clone()),
            Box::new(sprites),
            Box::new(MoveTo::new()),
        )
    }

    pub fn with_services(
        config: ArenaConfig,
        transform: Box<dyn CoordinateTransform>,
        scales: Box<dyn ScaleTable>,
        clips: Box<dyn ClipRegistry>,
        movement: Box<dyn MovementService>,
    ) -> Self {
        Self {
            config,
            scene: Scene::new(),
            flights: FlightScheduler::new(),
            transform,
            scales,
            clips,
            movement,
            creatures: HashMap::new(),
            lingering: HashMap::new(),
            events: EventQueue::new(),
        }
    }

    /// Build a creature from its server payload. Returns its container node.
    pub fn spawn_creature(&mut self, spec: CreatureSpec, draggable: bool) -> Result<Entity> {
        if self.creatures.contains_key(&spec.id) {
            return Err(ArenaError::InvalidState(format!(
                "creature `{}` already exists",
                spec.id
            )));
        }
        let mut ctx = SpawnContext {
            scene: &mut self.scene,
            movement: self.movement.as_mut(),
            transform: self.transform.as_ref(),
            scales: self.scales.as_ref(),
            clips: self.clips.as_ref(),
            config: &self.config,
        };
        let creature = Creature::spawn(spec, draggable, &mut ctx)?;
        let id = creature.id().to_string();
        let container = creature.container();

        debug!("spawned creature {} ({:?})", id, container);
        self.events.push(ArenaEvent::CreatureSpawned {
            id: id.clone(),
            container,
        });
        self.creatures.insert(id, creature);
        Ok(container)
    }

    /// Tear down a creature's rendering context and free its id. A creature
    /// with a flight still out lingers, off the roster, until that
    /// completion has been handled.
    pub fn despawn_creature(&mut self, id: &str) -> Result<()> {
        let creature = self
            .creatures
            .remove(id)
            .ok_or_else(|| ArenaError::UnknownCreature(id.to_string()))?;
        creature.despawn_view(&mut self.scene);
        if let Some(projectile) = creature.projectile() {
            self.lingering.insert(projectile, creature);
        }

        debug!("despawned creature {}", id);
        self.events.push(ArenaEvent::CreatureDespawned { id: id.to_string() });
        Ok(())
    }

    pub fn set_target(&mut self, id: &str, x: i32, y: i32) -> Result<()> {
        self.creature_mut(id)?.set_target(x, y);
        Ok(())
    }

    pub fn apply_target(&mut self, id: &str, x: Option<i32>, y: Option<i32>) -> Result<()> {
        self.creature_mut(id)?.apply_target(x, y)
    }

    pub fn clear_target(&mut self, id: &str) -> Result<()> {
        self.creature_mut(id)?.clear_target();
        Ok(())
    }

    pub fn set_action(&mut self, id: &str, action: ActionStatus) -> Result<()> {
        self.creature_mut(id)?.set_action(action);
        Ok(())
    }

    pub fn set_action_str(&mut self, id: &str, action: &str) -> Result<()> {
        self.creature_mut(id)?.set_action_str(action)
    }

    /// Begin an attack animation cycle (no-op if one is in flight)
    pub fn start_attack(&mut self, id: &str) -> Result<()> {
        let creature = self
            .creatures
            .get_mut(id)
            .ok_or_else(|| ArenaError::UnknownCreature(id.to_string()))?;
        let mut ctx = attack_context(
            &mut self.scene,
            &mut self.flights,
            self.transform.as_ref(),
            self.scales.as_ref(),
            self.clips.as_ref(),
            &mut self.events,
            &self.config,
        );
        creature.start_attack(&mut ctx)
    }

    /// Record a new board cell and walk the container toward it
    pub fn move_creature(&mut self, id: &str, board: IVec2) -> Result<()> {
        let creature = self
            .creatures
            .get_mut(id)
            .ok_or_else(|| ArenaError::UnknownCreature(id.to_string()))?;
        creature.set_position(board);
        creature.move_toward(self.movement.as_mut(), self.transform.to_screen(board));
        Ok(())
    }

    pub fn hover_enter(&mut self, id: &str) -> Result<()> {
        let creature = self
            .creatures
            .get(id)
            .ok_or_else(|| ArenaError::UnknownCreature(id.to_string()))?;
        creature.hover_enter(&mut self.scene, &self.config);
        Ok(())
    }

    pub fn hover_exit(&mut self, id: &str) -> Result<()> {
        let creature = self
            .creatures
            .get(id)
            .ok_or_else(|| ArenaError::UnknownCreature(id.to_string()))?;
        creature.hover_exit(&mut self.scene);
        Ok(())
    }

    /// Advance one frame
    pub fn update(&mut self, dt_ms: f32) {
        puffin::profile_function!();

        self.movement.advance(&mut self.scene, dt_ms);

        for done in self.flights.advance(&mut self.scene, dt_ms) {
            let creature = match self.lingering.get_mut(&done.projectile) {
                Some(creature) => Some(creature),
                None => self.creatures.get_mut(&done.owner),
            };
            match creature {
                Some(creature) => {
                    let mut ctx = attack_context(
                        &mut self.scene,
                        &mut self.flights,
                        self.transform.as_ref(),
                        self.scales.as_ref(),
                        self.clips.as_ref(),
                        &mut self.events,
                        &self.config,
                    );
                    creature.on_flight_complete(done.flight, &mut ctx);
                }
                None => {
                    warn!("flight {:?} finished for unknown owner {}", done.flight, done.owner);
                    let _ = self.scene.despawn(done.projectile);
                }
            }
        }

        self.lingering.retain(|_, c| c.projectile().is_some());
    }

    pub fn creature(&self, id: &str) -> Option<&Creature> {
        self.creatures.get(id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn flights(&self) -> &FlightScheduler {
        &self.flights
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn transform(&self) -> &dyn CoordinateTransform {
        self.transform.as_ref()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        self.events.drain().collect()
    }

    fn creature_mut(&mut self, id: &str) -> Result<&mut Creature> {
        self.creatures
            .get_mut(id)
            .ok_or_else(|| ArenaError::UnknownCreature(id.to_string()))
    }
}
