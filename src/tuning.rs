//! Data-driven game balance
//!
//! Every number the simulation reads comes from [`GameConfig`]. Defaults live in
//! [`crate::consts`]; a JSON override may supply any subset of fields. Values are
//! checked once by [`GameConfig::validate`] so the per-tick code can stay total.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Difficulty ramp constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub base_spawn_interval: f32,
    pub spawn_time_exponent: f32,
    pub base_obstacle_speed: f32,
    pub speed_exponent: f32,
    pub min_spawn_interval: f32,
    pub max_obstacle_speed: f32,
    pub hard_spawn_multiplier: f32,
    pub hard_speed_multiplier: f32,
    pub hard_ramp_multiplier: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            spawn_time_exponent: SPAWN_TIME_EXPONENT,
            base_obstacle_speed: BASE_OBSTACLE_SPEED,
            speed_exponent: SPEED_EXPONENT,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            max_obstacle_speed: MAX_OBSTACLE_SPEED,
            hard_spawn_multiplier: HARD_SPAWN_MULTIPLIER,
            hard_speed_multiplier: HARD_SPEED_MULTIPLIER,
            hard_ramp_multiplier: HARD_RAMP_MULTIPLIER,
        }
    }
}

impl DifficultyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("base_spawn_interval", self.base_spawn_interval)?;
        positive("base_obstacle_speed", self.base_obstacle_speed)?;
        positive("min_spawn_interval", self.min_spawn_interval)?;
        unit_exponent("spawn_time_exponent", self.spawn_time_exponent)?;
        unit_exponent("speed_exponent", self.speed_exponent)?;

        if self.min_spawn_interval > self.base_spawn_interval {
            return Err(ConfigError::SpawnFloorAboveBase {
                min: self.min_spawn_interval,
                base: self.base_spawn_interval,
            });
        }
        if !(self.max_obstacle_speed >= self.base_obstacle_speed) {
            return Err(ConfigError::SpeedCeilingBelowBase {
                max: self.max_obstacle_speed,
                base: self.base_obstacle_speed,
            });
        }
        if !(self.hard_spawn_multiplier > 0.0 && self.hard_spawn_multiplier <= 1.0) {
            return Err(ConfigError::HardSpawnMultiplier(self.hard_spawn_multiplier));
        }
        at_least_one("hard_speed_multiplier", self.hard_speed_multiplier)?;
        at_least_one("hard_ramp_multiplier", self.hard_ramp_multiplier)?;
        Ok(())
    }
}

/// Player movement constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub jump_force: f32,
    /// Max seconds a held jump keeps pushing upward
    pub jump_time: f32,
    pub crouch_height: f32,
    pub stand_height: f32,
    pub crouch_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            jump_force: JUMP_FORCE,
            jump_time: JUMP_TIME,
            crouch_height: CROUCH_HEIGHT,
            stand_height: STAND_HEIGHT,
            crouch_speed: CROUCH_SPEED,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("jump_force", self.jump_force)?;
        positive("jump_time", self.jump_time)?;
        positive("crouch_height", self.crouch_height)?;
        positive("stand_height", self.stand_height)?;
        positive("crouch_speed", self.crouch_speed)?;
        if self.crouch_height > self.stand_height {
            return Err(ConfigError::CrouchTallerThanStand {
                crouch: self.crouch_height,
                stand: self.stand_height,
            });
        }
        Ok(())
    }
}

/// One spawnable obstacle prefab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Vertical offset from the spawn point (high entries must be ducked)
    #[serde(default)]
    pub y_offset: f32,
    /// False for decoration that rides along but never scores a dodge
    #[serde(default = "default_true")]
    pub counts_as_obstacle: bool,
}

impl CatalogEntry {
    pub fn new(name: &str, y_offset: f32) -> Self {
        Self {
            name: name.to_string(),
            y_offset,
            counts_as_obstacle: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Spawner placement and obstacle catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub spawn_position: Vec2,
    pub catalog: Vec<CatalogEntry>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_position: Vec2::new(SPAWN_X, SPAWN_Y),
            catalog: vec![
                CatalogEntry::new("spike", 0.0),
                CatalogEntry::new("spike_row", 0.0),
                CatalogEntry::new("drone", 2.5),
            ],
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(())
    }
}

/// Background parallax constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollerConfig {
    pub base_scroll_speed: f32,
    pub speed_factor: f32,
    pub tile_width: f32,
    pub seam_fix_offset: f32,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            base_scroll_speed: BASE_SCROLL_SPEED,
            speed_factor: SCROLL_SPEED_FACTOR,
            tile_width: SCROLL_TILE_WIDTH,
            seam_fix_offset: SEAM_FIX_OFFSET,
        }
    }
}

impl ScrollerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("base_scroll_speed", self.base_scroll_speed)?;
        positive("tile_width", self.tile_width)?;
        unit_exponent("scroll speed_factor", self.speed_factor)?;
        if !(self.seam_fix_offset >= 0.0 && self.seam_fix_offset < self.tile_width) {
            return Err(ConfigError::SeamWiderThanTile {
                seam: self.seam_fix_offset,
                width: self.tile_width,
            });
        }
        Ok(())
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: DifficultyConfig,
    pub player: PlayerConfig,
    pub spawner: SpawnerConfig,
    pub scroller: ScrollerConfig,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.difficulty.validate()?;
        self.player.validate()?;
        self.spawner.validate()?;
        self.scroller.validate()?;
        Ok(())
    }
}

// `!(x > 0.0)` style checks below also reject NaN

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn unit_exponent(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ExponentOutOfRange { field, value });
    }
    Ok(())
}

fn at_least_one(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value >= 1.0) || !value.is_finite() {
        return Err(ConfigError::BelowOne { field, value });
    }
    Ok(())
}
