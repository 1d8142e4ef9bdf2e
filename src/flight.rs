//! Timed projectile flights.
//!
//! A flight is a linear tween of one projectile node from a source to a
//! destination screen point. The scheduler owns every outstanding flight,
//! moves the nodes each frame, and hands back each completion exactly once,
//! earliest first. Completions are returned whether or not the owning
//! creature still exists; deciding what that means is the owner's job.

use crate::scene::Scene;
use glam::Vec2;
use hecs::Entity;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Unique per scheduler, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightId(u64);

/// Where a flight goes and how long it takes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPath {
    pub source: Vec2,
    pub destination: Vec2,
    /// Milliseconds
    pub duration: f32,
}

/// A flight that reached its destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightCompleted {
    pub flight: FlightId,
    pub owner: String,
    pub projectile: Entity,
}

#[derive(Debug, Clone)]
struct Flight {
    owner: String,
    projectile: Entity,
    path: FlightPath,
    started_at: f32,
}

impl Flight {
    /// Progress from 0.0 (just launched) to 1.0 (arrived)
    fn progress(&self, now: f32) -> f32 {
        if self.path.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.path.duration).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledCompletion {
    flight: FlightId,
    completion_time: f32,
}

impl PartialEq for ScheduledCompletion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledCompletion {}

impl PartialOrd for ScheduledCompletion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledCompletion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior; ties complete in launch order
        other
            .completion_time
            .partial_cmp(&self.completion_time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.flight.cmp(&self.flight))
    }
}

#[derive(Debug, Default)]
pub struct FlightScheduler {
    /// Scheduler clock in milliseconds
    now: f32,
    next_id: u64,
    flights: HashMap<FlightId, Flight>,
    pending: BinaryHeap<ScheduledCompletion>,
}

impl FlightScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    /// Start a flight from the current clock
    pub fn schedule(&mut self, owner: &str, projectile: Entity, path: FlightPath) -> FlightId {
        let flight = FlightId(self.next_id);
        self.next_id += 1;

        self.flights.insert(
            flight,
            Flight {
                owner: owner.to_string(),
                projectile,
                path,
                started_at: self.now,
            },
        );
        self.pending.push(ScheduledCompletion {
            flight,
            completion_time: self.now + path.duration.max(0.0),
        });
        flight
    }

    /// Advance the clock, move every in-flight node, and collect arrivals
    pub fn advance(&mut self, scene: &mut Scene, dt_ms: f32) -> Vec<FlightCompleted> {
        puffin::profile_function!();
        self.now += dt_ms.max(0.0);

        for flight in self.flights.values() {
            let t = flight.progress(self.now);
            let position = flight.path.source.lerp(flight.path.destination, t);
            // A node torn down mid-flight just stops being drawn
            let _ = scene.set_position(flight.projectile, position);
        }

        let mut completed = Vec::new();
        while let Some(next) = self.pending.peek() {
            if next.completion_time > self.now {
                break;
            }
            let Some(scheduled) = self.pending.pop() else {
                break;
            };
            if let Some(flight) = self.flights.remove(&scheduled.flight) {
                completed.push(FlightCompleted {
                    flight: scheduled.flight,
                    owner: flight.owner,
                    projectile: flight.projectile,
                });
            }
        }
        completed
    }

    pub fn is_outstanding(&self, flight: FlightId) -> bool {
        self.flights.contains_key(&flight)
    }

    /// Outstanding flights launched for one owner
    pub fn outstanding_for(&self, owner: &str) -> usize {
        self.flights.values().filter(|f| f.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{NodeKind, SpriteClip};

    fn projectile(scene: &mut Scene, at: Vec2) -> Entity {
        scene.spawn_sprite(at, SpriteClip::still("attacks", "FIRE/000"), NodeKind::Projectile, ())
    }

    fn path(duration: f32) -> FlightPath {
        FlightPath {
            source: Vec2::new(0.0, 0.0),
            destination: Vec2::new(100.0, 0.0),
            duration,
        }
    }

    #[test]
    fn test_flight_interpolates_linearly() {
        let mut scene = Scene::new();
        let mut flights = FlightScheduler::new();
        let p = projectile(&mut scene, Vec2::ZERO);
        flights.schedule("a", p, path(500.0));

        assert!(flights.advance(&mut scene, 250.0).is_empty());
        assert_eq!(scene.position(p), Some(Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn test_completion_delivered_once() {
        let mut scene = Scene::new();
        let mut flights = FlightScheduler::new();
        let p = projectile(&mut scene, Vec2::ZERO);
        let id = flights.schedule("a", p, path(500.0));

        let done = flights.advance(&mut scene, 600.0);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].flight, id);
        assert_eq!(done[0].owner, "a");
        assert_eq!(scene.position(p), Some(Vec2::new(100.0, 0.0)));
        assert!(!flights.is_outstanding(id));

        assert!(flights.advance(&mut scene, 600.0).is_empty());
    }

    #[test]
    fn test_completions_ordered_by_time() {
        let mut scene = Scene::new();
        let mut flights = FlightScheduler::new();
        let p1 = projectile(&mut scene, Vec2::ZERO);
        let p2 = projectile(&mut scene, Vec2::ZERO);
        let slow = flights.schedule("slow", p1, path(400.0));
        let fast = flights.schedule("fast", p2, path(100.0));

        let done = flights.advance(&mut scene, 1000.0);
        let order: Vec<FlightId> = done.iter().map(|c| c.flight).collect();
        assert_eq!(order, vec![fast, slow]);
    }

    #[test]
    fn test_completion_fires_for_despawned_node() {
        let mut scene = Scene::new();
        let mut flights = FlightScheduler::new();
        let p = projectile(&mut scene, Vec2::ZERO);
        flights.schedule("a", p, path(100.0));
        scene.despawn(p).unwrap();

        let done = flights.advance(&mut scene, 100.0);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].projectile, p);
    }

    #[test]
    fn test_zero_duration_completes_on_next_advance() {
        let mut scene = Scene::new();
        let mut flights = FlightScheduler::new();
        let p = projectile(&mut scene, Vec2::ZERO);
        flights.schedule("a", p, path(0.0));
        assert_eq!(flights.outstanding_for("a"), 1);

        assert_eq!(flights.advance(&mut scene, 0.0).len(), 1);
        assert!(flights.is_empty());
    }
}
