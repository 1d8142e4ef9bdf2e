//! Scene graph backed by a hecs world.
//!
//! Nodes are addressed by `hecs::Entity`, whose generation makes a despawned
//! handle permanently invalid. Every mutation checks the handle first and
//! reports `ArenaError::StaleContext` instead of touching a reused slot.

use crate::components::{
    ChildOf, Container, Depth, NodeKind, Projectile, ScreenPos, SpriteClip, SpriteScale, Visible,
};
use crate::error::{ArenaError, Result};
use glam::Vec2;
use hecs::{Component, DynamicBundle, Entity, World};

#[derive(Default)]
pub struct Scene {
    world: World,
}

impl Scene {
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    /// Read-only access for queries and rendering
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_alive(&self, node: Entity) -> bool {
        self.world.contains(node)
    }

    /// Spawn an empty top-level container
    pub fn spawn_container(&mut self, position: Vec2, depth: i32, kind: NodeKind) -> Entity {
        self.world.spawn((
            ScreenPos(position),
            Depth(depth),
            Visible(true),
            kind,
            Container::default(),
        ))
    }

    /// Spawn a top-level sprite not parented to any container
    pub fn spawn_sprite(
        &mut self,
        position: Vec2,
        clip: SpriteClip,
        kind: NodeKind,
        extra: impl DynamicBundle,
    ) -> Entity {
        let node = self.world.spawn((
            ScreenPos(position),
            Depth(0),
            Visible(true),
            SpriteScale(Vec2::ONE),
            clip,
            kind,
        ));
        // Freshly spawned, cannot fail
        let _ = self.world.insert(node, extra);
        node
    }

    /// Attach a new child node at `offset` from the container origin
    pub fn add_child(
        &mut self,
        container: Entity,
        offset: Vec2,
        kind: NodeKind,
        extra: impl DynamicBundle,
    ) -> Result<Entity> {
        if self.world.get::<&Container>(container).is_err() {
            return Err(ArenaError::StaleContext);
        }
        let child = self
            .world
            .spawn((ScreenPos(offset), Visible(true), kind, ChildOf(container)));
        let _ = self.world.insert(child, extra);
        self.modify::<Container, _>(container, |c| c.children.push(child))?;
        Ok(child)
    }

    /// Detach and despawn one child
    pub fn remove_child(&mut self, container: Entity, child: Entity) -> Result<()> {
        self.modify::<Container, _>(container, |c| c.children.retain(|&e| e != child))?;
        self.despawn(child)
    }

    /// First child of the given kind, in insertion order
    pub fn first_child(&self, container: Entity, kind: NodeKind) -> Option<Entity> {
        let children = self.world.get::<&Container>(container).ok()?;
        children
            .children
            .iter()
            .copied()
            .find(|&child| self.kind(child) == Some(kind))
    }

    pub fn children(&self, container: Entity) -> Vec<Entity> {
        self.world
            .get::<&Container>(container)
            .map(|c| c.children.clone())
            .unwrap_or_default()
    }

    /// Despawn a node, its children, and its link from any parent
    pub fn despawn(&mut self, node: Entity) -> Result<()> {
        if !self.world.contains(node) {
            return Err(ArenaError::StaleContext);
        }
        for child in self.children(node) {
            let _ = self.despawn(child);
        }
        let parent = self.world.get::<&ChildOf>(node).ok().map(|p| p.0);
        if let Some(parent) = parent {
            let _ = self.modify::<Container, _>(parent, |c| c.children.retain(|&e| e != node));
        }
        self.world.despawn(node).map_err(|_| ArenaError::StaleContext)
    }

    pub fn set_position(&mut self, node: Entity, position: Vec2) -> Result<()> {
        self.modify::<ScreenPos, _>(node, |p| p.0 = position)
    }

    pub fn set_visible(&mut self, node: Entity, visible: bool) -> Result<()> {
        self.modify::<Visible, _>(node, |v| v.0 = visible)
    }

    pub fn set_depth(&mut self, node: Entity, depth: i32) -> Result<()> {
        self.modify::<Depth, _>(node, |d| d.0 = depth)
    }

    pub fn set_scale(&mut self, node: Entity, scale: Vec2) -> Result<()> {
        self.modify::<SpriteScale, _>(node, |s| s.0 = scale)
    }

    /// Start a named clip on a sprite
    pub fn play(&mut self, node: Entity, clip: &str) -> Result<()> {
        self.modify::<SpriteClip, _>(node, |c| c.playing = Some(clip.to_string()))
    }

    /// Add or replace a component on a live node
    pub fn insert_one(&mut self, node: Entity, component: impl Component) -> Result<()> {
        self.world
            .insert_one(node, component)
            .map_err(|_| ArenaError::StaleContext)
    }

    pub fn position(&self, node: Entity) -> Option<Vec2> {
        self.world.get::<&ScreenPos>(node).ok().map(|p| p.0)
    }

    pub fn is_visible(&self, node: Entity) -> Option<bool> {
        self.world.get::<&Visible>(node).ok().map(|v| v.0)
    }

    pub fn depth(&self, node: Entity) -> Option<i32> {
        self.world.get::<&Depth>(node).ok().map(|d| d.0)
    }

    pub fn kind(&self, node: Entity) -> Option<NodeKind> {
        self.world.get::<&NodeKind>(node).ok().map(|k| *k)
    }

    /// Live projectile nodes owned by a creature id
    pub fn projectiles_owned_by(&self, owner: &str) -> Vec<Entity> {
        self.world
            .query::<&Projectile>()
            .iter()
            .filter(|(_, p)| p.owner == owner)
            .map(|(e, _)| e)
            .collect()
    }

    /// Mutate one component of a live node
    pub fn modify<T: Component, R>(&mut self, node: Entity, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let mut component = self
            .world
            .get::<&mut T>(node)
            .map_err(|_| ArenaError::StaleContext)?;
        Ok(f(&mut component))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find_child() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        let socle = scene.add_child(root, Vec2::ZERO, NodeKind::Socle, ()).unwrap();
        let body = scene.add_child(root, Vec2::ZERO, NodeKind::Body, ()).unwrap();

        assert_eq!(scene.first_child(root, NodeKind::Body), Some(body));
        assert_eq!(scene.first_child(root, NodeKind::Socle), Some(socle));
        assert_eq!(scene.first_child(root, NodeKind::Detail), None);
        assert_eq!(scene.children(root), vec![socle, body]);
    }

    #[test]
    fn test_despawn_container_takes_children() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        let body = scene.add_child(root, Vec2::ZERO, NodeKind::Body, ()).unwrap();

        scene.despawn(root).unwrap();
        assert!(!scene.is_alive(root));
        assert!(!scene.is_alive(body));
    }

    #[test]
    fn test_remove_child_unlinks() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        let detail = scene.add_child(root, Vec2::ZERO, NodeKind::Detail, ()).unwrap();

        scene.remove_child(root, detail).unwrap();
        assert!(scene.children(root).is_empty());
        assert!(!scene.is_alive(detail));
    }

    #[test]
    fn test_stale_handle_rejected() {
        let mut scene = Scene::new();
        let root = scene.spawn_container(Vec2::ZERO, 5, NodeKind::Creature);
        scene.despawn(root).unwrap();

        // Slot gets reused, but the old handle stays dead
        let other = scene.spawn_container(Vec2::ONE, 5, NodeKind::Creature);
        assert_ne!(root, other);
        assert_eq!(scene.set_position(root, Vec2::ZERO), Err(ArenaError::StaleContext));
        assert_eq!(
            scene.add_child(root, Vec2::ZERO, NodeKind::Body, ()),
            Err(ArenaError::StaleContext)
        );
        assert_eq!(scene.position(other), Some(Vec2::ONE));
    }

    #[test]
    fn test_sprite_mutators() {
        let mut scene = Scene::new();
        let sprite = scene.spawn_sprite(
            Vec2::new(1.0, 2.0),
            SpriteClip::still("attacks", "FIRE/000"),
            NodeKind::Projectile,
            (Projectile { owner: "a".into() },),
        );
        scene.set_visible(sprite, false).unwrap();
        scene.set_depth(sprite, 7).unwrap();
        scene.play(sprite, "FIRE").unwrap();

        assert_eq!(scene.is_visible(sprite), Some(false));
        assert_eq!(scene.depth(sprite), Some(7));
        assert_eq!(scene.projectiles_owned_by("a"), vec![sprite]);
        assert!(scene.projectiles_owned_by("b").is_empty());
    }
}
