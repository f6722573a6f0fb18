//! Physics boundary
//!
//! Collisions and trigger overlaps are detected by whatever physics backend
//! hosts the game. It pushes [`PhysicsEvent`]s into an [`EventQueue`], which the
//! simulation drains once at the start of each tick. Commands flow the other way
//! through [`PhysicsWorld`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::CatalogEntry;

/// Identity of a spawned obstacle, unique for the life of a `GameState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// Something the physics backend observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsEvent {
    /// Player body touched an obstacle. Ends the run.
    PlayerHitObstacle,
    /// A collider entered the dodge trigger behind the player.
    ///
    /// `obstacle` is the owning obstacle of the collider (the backend walks
    /// child colliders up to their root), `None` for unrelated geometry.
    DodgeTriggerEntered { obstacle: Option<ObstacleId> },
    /// Backend removed an obstacle that scrolled off screen
    ObstacleLeftWorld { obstacle: ObstacleId },
}

/// Events queued between ticks
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: Vec<PhysicsEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PhysicsEvent) {
        self.pending.push(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every queued event in arrival order
    pub fn drain(&mut self) -> Vec<PhysicsEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Commands the simulation issues to the physics backend
pub trait PhysicsWorld {
    /// Create an obstacle body at `position` moving with `velocity`
    fn spawn_obstacle(
        &mut self,
        id: ObstacleId,
        entry: &CatalogEntry,
        position: Vec2,
        velocity: Vec2,
    );
    /// Remove every obstacle body
    fn destroy_all_obstacles(&mut self);
    /// Overwrite the player's vertical velocity (jump impulse)
    fn set_player_vertical_velocity(&mut self, velocity: f32);
}

/// Backend that ignores every command (menus, tests that only care about stats)
#[derive(Debug, Default)]
pub struct NullWorld;

impl PhysicsWorld for NullWorld {
    fn spawn_obstacle(&mut self, _: ObstacleId, _: &CatalogEntry, _: Vec2, _: Vec2) {}
    fn destroy_all_obstacles(&mut self) {}
    fn set_player_vertical_velocity(&mut self, _: f32) {}
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Backend that records commands for assertions
    #[derive(Debug, Default)]
    pub(crate) struct RecordingWorld {
        pub spawned: Vec<(ObstacleId, String, Vec2, Vec2)>,
        pub clears: u32,
        pub vertical_velocity: Vec<f32>,
    }

    impl PhysicsWorld for RecordingWorld {
        fn spawn_obstacle(
            &mut self,
            id: ObstacleId,
            entry: &CatalogEntry,
            position: Vec2,
            velocity: Vec2,
        ) {
            self.spawned.push((id, entry.name.clone(), position, velocity));
        }

        fn destroy_all_obstacles(&mut self) {
            self.clears += 1;
        }

        fn set_player_vertical_velocity(&mut self, velocity: f32) {
            self.vertical_velocity.push(velocity);
        }
    }

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut queue = EventQueue::new();
        queue.push(PhysicsEvent::DodgeTriggerEntered { obstacle: Some(ObstacleId(2)) });
        queue.push(PhysicsEvent::PlayerHitObstacle);
        assert_eq!(queue.len(), 2);

        let events = queue.drain();
        assert_eq!(events[1], PhysicsEvent::PlayerHitObstacle);
        assert!(queue.is_empty());
    }
}
