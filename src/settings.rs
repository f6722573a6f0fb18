//! Player preferences
//!
//! Persisted separately from the stats record, under its own storage key.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::error::PersistenceError;
use crate::persistence::{self, RecordStore};
use crate::sim::DifficultyMode;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty selected on the start menu
    pub difficulty: DifficultyMode,
    /// Mute all audio
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyMode::Normal,
            muted: false,
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Clamp volumes into range
    pub fn sanitized(mut self) -> Self {
        self.master_volume = clamp_volume(self.master_volume);
        self.music_volume = clamp_volume(self.music_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }

    pub fn load(store: &dyn RecordStore) -> Self {
        persistence::load_or_default::<Settings>(store, SETTINGS_KEY).sanitized()
    }

    pub fn save(&self, store: &mut dyn RecordStore) -> Result<(), PersistenceError> {
        persistence::save_value(store, SETTINGS_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn clamp_volume(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 }
}
