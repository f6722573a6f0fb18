//! Cyber Run - an endless runner simulation core
//!
//! Core modules:
//! - `sim`: Run simulation (session state machine, difficulty ramp, spawning, player)
//! - `highscores`: Lifetime statistics and per-difficulty highscores
//! - `persistence`: Load/save contract and storage backends
//! - `tuning`: Data-driven game balance, validated at startup
//! - `settings`: Player preferences
//! - `audio`: Music/sfx cue routing

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioCue, AudioManager, AudioOutput, LogOutput, MusicTrack, SoundEffect};
pub use error::{ConfigError, PersistenceError};
pub use highscores::PersistentRecord;
pub use persistence::{FileStore, MemoryStore, RecordStore};
pub use settings::Settings;
pub use sim::{DifficultyMode, GameState, PhysicsEvent, PhysicsWorld, TickInput};
pub use tuning::GameConfig;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Demo driver timestep (the core accepts any positive dt)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Storage key for the persistent record
    pub const SAVE_KEY: &str = "save";
    /// Storage key for player preferences
    pub const SETTINGS_KEY: &str = "settings";

    /// Base seconds between obstacle spawns at t=0
    pub const BASE_SPAWN_INTERVAL: f32 = 3.0;
    /// How strongly the spawn interval shrinks over run time
    pub const SPAWN_TIME_EXPONENT: f32 = 0.1;
    /// Base obstacle speed (units/s) at t=0
    pub const BASE_OBSTACLE_SPEED: f32 = 7.0;
    /// How strongly obstacle speed grows over run time
    pub const SPEED_EXPONENT: f32 = 0.2;
    /// Spawn interval floor
    pub const MIN_SPAWN_INTERVAL: f32 = 0.6;
    /// Obstacle speed ceiling
    pub const MAX_OBSTACLE_SPEED: f32 = 24.0;

    /// Hard mode: spawn interval scale (< 1 = more frequent)
    pub const HARD_SPAWN_MULTIPLIER: f32 = 0.75;
    /// Hard mode: obstacle speed scale
    pub const HARD_SPEED_MULTIPLIER: f32 = 1.25;
    /// Hard mode: run clock runs this much faster for ramp purposes
    pub const HARD_RAMP_MULTIPLIER: f32 = 1.5;

    /// Upward velocity applied while a jump is sustained
    pub const JUMP_FORCE: f32 = 10.0;
    /// Maximum jump hold duration (seconds)
    pub const JUMP_TIME: f32 = 0.25;
    pub const CROUCH_HEIGHT: f32 = 3.5;
    pub const STAND_HEIGHT: f32 = 5.0;
    /// Height smoothing rate (higher = faster transition)
    pub const CROUCH_SPEED: f32 = 15.0;

    /// Where new obstacles appear (world units)
    pub const SPAWN_X: f32 = 12.0;
    pub const SPAWN_Y: f32 = -3.0;

    /// Background scroll
    pub const BASE_SCROLL_SPEED: f32 = 4.0;
    pub const SCROLL_SPEED_FACTOR: f32 = 0.2;
    pub const SCROLL_TILE_WIDTH: f32 = 20.0;
    /// Small overlap so wrapped tiles never show a gap
    pub const SEAM_FIX_OFFSET: f32 = 0.02;
}

/// Round seconds to the whole number shown in the HUD and menus.
///
/// Ties go to the even neighbour (2.5 shows as 2, 3.5 as 4).
#[inline]
pub fn display_seconds(seconds: f32) -> i64 {
    seconds.round_ties_even() as i64
}
