//! Move-to capability injected into creatures.

use crate::components::Rotation;
use crate::scene::Scene;
use glam::Vec2;
use hecs::Entity;

/// Binding returned by `MovementService::bind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveHandle(usize);

pub trait MovementService {
    /// Bind a node to this service with a fixed speed (pixels per second)
    fn bind(&mut self, node: Entity, speed: f32, rotate_to_target: bool) -> MoveHandle;

    /// Head toward `destination`, replacing any previous destination
    fn move_to(&mut self, handle: MoveHandle, destination: Vec2);

    /// Step every binding forward by `dt_ms`
    fn advance(&mut self, scene: &mut Scene, dt_ms: f32);
}

#[derive(Debug, Clone)]
struct Mover {
    node: Entity,
    speed: f32,
    rotate_to_target: bool,
    destination: Option<Vec2>,
}

/// Constant-speed straight-line mover
#[derive(Debug, Default)]
pub struct MoveTo {
    movers: Vec<Option<Mover>>,
    /// Slots freed by dead nodes, reused by the next `bind`
    free: Vec<usize>,
}

impl MoveTo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_moving(&self, handle: MoveHandle) -> bool {
        self.movers
            .get(handle.0)
            .and_then(|m| m.as_ref())
            .map_or(false, |m| m.destination.is_some())
    }

    /// Number of bindings still attached to live nodes
    pub fn bound(&self) -> usize {
        self.movers.iter().flatten().count()
    }
}

impl MovementService for MoveTo {
    fn bind(&mut self, node: Entity, speed: f32, rotate_to_target: bool) -> MoveHandle {
        let mover = Some(Mover {
            node,
            speed,
            rotate_to_target,
            destination: None,
        });
        match self.free.pop() {
            Some(slot) => {
                self.movers[slot] = mover;
                MoveHandle(slot)
            }
            None => {
                self.movers.push(mover);
                MoveHandle(self.movers.len() - 1)
            }
        }
    }

    fn move_to(&mut self, handle: MoveHandle, destination: Vec2) {
        if let Some(Some(mover)) = self.movers.get_mut(handle.0) {
            mover.destination = Some(destination);
        }
    }

    fn advance(&mut self, scene: &mut Scene, dt_ms: f32) {
        for (index, slot) in self.movers.iter_mut().enumerate() {
            let Some(mover) = slot else { continue };
            let Some(current) = scene.position(mover.node) else {
                // Node is gone, drop the binding
                *slot = None;
                self.free.push(index);
                continue;
            };
            let Some(target) = mover.destination else { continue };

            let delta = target - current;
            let dist = delta.length();
            let step = mover.speed * dt_ms / 1000.0;

            let next = if step >= dist || dist < 0.01 {
                mover.destination = None;
                target
            } else {
                current + delta / dist * step
            };
            let _ = scene.set_position(mover.node, next);

            if mover.rotate_to_target && dist >= 0.01 {
                let _ = scene.insert_one(mover.node, Rotation(delta.y.atan2(delta.x)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::NodeKind;

    #[test]
    fn test_moves_at_fixed_speed() {
        let mut scene = Scene::new();
        let node = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        let mut movement = MoveTo::new();
        let handle = movement.bind(node, 300.0, false);

        movement.move_to(handle, Vec2::new(600.0, 0.0));
        movement.advance(&mut scene, 1000.0);
        assert_eq!(scene.position(node), Some(Vec2::new(300.0, 0.0)));
        assert!(movement.is_moving(handle));

        movement.advance(&mut scene, 1000.0);
        assert_eq!(scene.position(node), Some(Vec2::new(600.0, 0.0)));
        assert!(!movement.is_moving(handle));
    }

    #[test]
    fn test_no_rotation_when_disabled() {
        let mut scene = Scene::new();
        let node = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        let mut movement = MoveTo::new();
        let handle = movement.bind(node, 300.0, false);

        movement.move_to(handle, Vec2::new(0.0, 100.0));
        movement.advance(&mut scene, 100.0);
        assert!(scene.world().get::<&Rotation>(node).is_err());
    }

    #[test]
    fn test_rotates_toward_target_when_enabled() {
        let mut scene = Scene::new();
        let node = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        let mut movement = MoveTo::new();
        let handle = movement.bind(node, 300.0, true);

        movement.move_to(handle, Vec2::new(0.0, 100.0));
        movement.advance(&mut scene, 100.0);
        let rotation = scene.world().get::<&Rotation>(node).map(|r| r.0).unwrap();
        assert!((rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_binding_dropped_with_node() {
        let mut scene = Scene::new();
        let node = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        let mut movement = MoveTo::new();
        let handle = movement.bind(node, 300.0, false);
        movement.move_to(handle, Vec2::new(50.0, 0.0));

        scene.despawn(node).unwrap();
        movement.advance(&mut scene, 16.0);
        assert_eq!(movement.bound(), 0);
    }

    #[test]
    fn test_dead_slots_reused() {
        let mut scene = Scene::new();
        let mut movement = MoveTo::new();
        let first = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        let handle = movement.bind(first, 300.0, false);

        for _ in 0..3 {
            let node = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
            let _ = movement.bind(node, 300.0, false);
            scene.despawn(node).unwrap();
            movement.advance(&mut scene, 16.0);
        }
        assert_eq!(movement.movers.len(), 2);
        assert_eq!(movement.bound(), 1);

        // Surviving binding keeps its handle and still moves
        movement.move_to(handle, Vec2::new(30.0, 0.0));
        movement.advance(&mut scene, 100.0);
        assert_eq!(scene.position(first), Some(Vec2::new(30.0, 0.0)));
    }
}
