//! Audio cue routing
//!
//! The simulation only decides *when* music changes or a sound plays. Actual
//! playback sits behind [`AudioOutput`], which is fire-and-forget: nothing it
//! does is reported back to the game.

use crate::settings::Settings;

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Start menu / game over screen
    Menu,
    /// During a run
    Game,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Player hit an obstacle
    Death,
}

/// Anything the audio manager asked the output to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCue {
    StartMusic { track: MusicTrack, gain: f32 },
    StopMusic,
    MusicGain(f32),
    Sfx { effect: SoundEffect, gain: f32 },
}

/// Playback backend
pub trait AudioOutput {
    fn cue(&mut self, cue: AudioCue);
}

/// Default output: logs every cue
#[derive(Debug, Default)]
pub struct LogOutput;

impl AudioOutput for LogOutput {
    fn cue(&mut self, cue: AudioCue) {
        log::debug!("audio: {:?}", cue);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    output: Box<dyn AudioOutput>,
    current_music: Option<MusicTrack>,
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogOutput))
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("current_music", &self.current_music)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

impl AudioManager {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        let defaults = Settings::default();
        Self {
            output,
            current_music: None,
            master_volume: defaults.master_volume,
            music_volume: defaults.music_volume,
            sfx_volume: defaults.sfx_volume,
            muted: defaults.muted,
        }
    }

    /// Take volumes and mute state from player settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume;
        self.music_volume = settings.music_volume;
        self.sfx_volume = settings.sfx_volume;
        self.muted = settings.muted;
        if self.current_music.is_some() {
            let gain = self.music_gain();
            self.output.cue(AudioCue::MusicGain(gain));
        }
    }

    pub fn now_playing(&self) -> Option<MusicTrack> {
        self.current_music
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Toggle all game audio on/off. Music keeps its place while muted.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        let gain = self.music_gain();
        self.output.cue(AudioCue::MusicGain(gain));
        log::info!("Sound: {}", if self.muted { "Off" } else { "On" });
        self.muted
    }

    pub fn play_menu_music(&mut self) {
        self.switch_music(MusicTrack::Menu);
    }

    pub fn play_game_music(&mut self) {
        self.switch_music(MusicTrack::Game);
    }

    pub fn stop_music(&mut self) {
        if self.current_music.take().is_some() {
            self.output.cue(AudioCue::StopMusic);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let gain = self.sfx_gain();
        if gain <= 0.0 {
            return;
        }
        self.output.cue(AudioCue::Sfx { effect, gain });
    }

    /// Start `track` unless it is already the one playing
    fn switch_music(&mut self, track: MusicTrack) {
        if self.current_music == Some(track) {
            return;
        }
        self.stop_music();
        let gain = self.music_gain();
        self.output.cue(AudioCue::StartMusic { track, gain });
        self.current_music = Some(track);
    }

    fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
