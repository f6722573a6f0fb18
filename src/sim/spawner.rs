//! Obstacle spawning
//!
//! A countdown accumulator paced by the difficulty ramp. Live obstacles are
//! tracked here (sorted by id) so dodge crossings can be resolved to a record.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::tuning::{DifficultyConfig, SpawnerConfig};

use super::difficulty::{self, DifficultyScaling};
use super::events::{ObstacleId, PhysicsWorld};
use super::session::RunSession;

/// A live obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Index into the spawner catalog
    pub kind: usize,
    pub velocity: Vec2,
    /// Set once the obstacle has been counted as dodged
    pub counted: bool,
    /// False for catalog entries that are scenery, not obstacles
    pub is_obstacle: bool,
}

#[derive(Debug)]
pub struct ObstacleSpawner {
    config: SpawnerConfig,
    difficulty: DifficultyConfig,
    rng: Pcg32,
    accumulator: f32,
    live: Vec<Obstacle>,
    next_id: u32,
    last_scaling: Option<DifficultyScaling>,
}

impl ObstacleSpawner {
    /// `config` must already be validated (non-empty catalog)
    pub fn new(config: SpawnerConfig, difficulty: DifficultyConfig, seed: u64) -> Self {
        Self {
            config,
            difficulty,
            rng: Pcg32::seed_from_u64(seed),
            accumulator: 0.0,
            live: Vec::new(),
            next_id: 1,
            last_scaling: None,
        }
    }

    /// Advance one tick. Does nothing unless the session is playing.
    pub fn update(&mut self, dt: f32, session: &mut RunSession, world: &mut dyn PhysicsWorld) {
        if !session.is_playing() || !(dt > 0.0) {
            return;
        }

        self.accumulator += dt;
        let scaling = difficulty::scaling(session.elapsed(), session.mode(), &self.difficulty);
        self.last_scaling = Some(scaling);
        session.register_speed_sample(scaling.speed_multiplier);

        if self.accumulator >= scaling.spawn_interval {
            self.spawn(scaling.obstacle_speed, world);
            self.accumulator = 0.0;
        }
    }

    fn spawn(&mut self, speed: f32, world: &mut dyn PhysicsWorld) {
        let kind = self.rng.random_range(0..self.config.catalog.len());
        let entry = &self.config.catalog[kind];

        let id = ObstacleId(self.next_id);
        self.next_id += 1;

        let position = self.config.spawn_position + Vec2::new(0.0, entry.y_offset);
        let velocity = Vec2::NEG_X * speed;
        world.spawn_obstacle(id, entry, position, velocity);
        log::debug!("Spawned {} #{} at speed {:.2}", entry.name, id.0, speed);

        // ids are handed out in increasing order, so push keeps `live` sorted
        self.live.push(Obstacle {
            id,
            kind,
            velocity,
            counted: false,
            is_obstacle: entry.counts_as_obstacle,
        });
    }

    /// Run started: restart the countdown and drop leftovers from a discarded run
    pub fn on_play_started(&mut self, world: &mut dyn PhysicsWorld) {
        self.accumulator = 0.0;
        self.last_scaling = None;
        if !self.live.is_empty() {
            self.clear_all(world);
        }
    }

    /// Run ended: destroy every live obstacle
    pub fn on_game_ended(&mut self, world: &mut dyn PhysicsWorld) {
        self.clear_all(world);
    }

    fn clear_all(&mut self, world: &mut dyn PhysicsWorld) {
        log::debug!("Clearing {} obstacles", self.live.len());
        self.live.clear();
        world.destroy_all_obstacles();
    }

    /// Forget an obstacle the backend removed on its own
    pub fn despawn(&mut self, id: ObstacleId) -> Option<Obstacle> {
        let idx = self.live.binary_search_by_key(&id, |o| o.id).ok()?;
        Some(self.live.remove(idx))
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        let idx = self.live.binary_search_by_key(&id, |o| o.id).ok()?;
        self.live.get_mut(idx)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.live
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Pacing computed on the most recent playing tick
    pub fn last_scaling(&self) -> Option<DifficultyScaling> {
        self.last_scaling
    }

    pub fn catalog_name(&self, kind: usize) -> Option<&str> {
        self.config.catalog.get(kind).map(|e| e.name.as_str())
    }
}
