//! Run session state machine
//!
//! Idle -> Playing on `start_game`, Playing -> Idle on `game_over`. The session
//! owns the lifetime record and is the only thing that mutates it.

use crate::audio::AudioManager;
use crate::consts::SAVE_KEY;
use crate::display_seconds;
use crate::highscores::PersistentRecord;
use crate::persistence::{self, RecordStore};

use super::difficulty::DifficultyMode;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Menus; not scoring
    Idle,
    /// Active run
    Playing,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub mode: DifficultyMode,
    /// Seconds survived
    pub score: f32,
    pub obstacles_dodged: u32,
    pub max_speed_multiplier: f32,
    pub new_highscore: bool,
}

/// Lifecycle notification delivered to observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// A run began. `restarted` is set when it replaced a run in progress.
    PlayStarted {
        mode: DifficultyMode,
        restarted: bool,
    },
    /// A run ended and the record was saved
    GameEnded(RunReport),
}

pub type SessionObserver = Box<dyn FnMut(&SessionEvent)>;

pub struct RunSession {
    phase: SessionPhase,
    mode: DifficultyMode,
    elapsed: f32,
    obstacles_dodged: u32,
    max_speed_multiplier: f32,
    record: PersistentRecord,
    store: Box<dyn RecordStore>,
    audio: AudioManager,
    observers: Vec<SessionObserver>,
}

impl std::fmt::Debug for RunSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunSession")
            .field("phase", &self.phase)
            .field("mode", &self.mode)
            .field("elapsed", &self.elapsed)
            .field("obstacles_dodged", &self.obstacles_dodged)
            .field("max_speed_multiplier", &self.max_speed_multiplier)
            .field("record", &self.record)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl RunSession {
    /// Create the session, loading the record from `store` once.
    pub fn new(store: Box<dyn RecordStore>, audio: AudioManager) -> Self {
        let record = persistence::load_record(store.as_ref(), SAVE_KEY);
        log::info!(
            "Record loaded: {} runs played, normal best {:.1}s, hard best {:.1}s",
            record.total_runs_played,
            record.normal_highscore,
            record.hard_highscore
        );
        Self {
            phase: SessionPhase::Idle,
            mode: DifficultyMode::Normal,
            elapsed: 0.0,
            obstacles_dodged: 0,
            max_speed_multiplier: 0.0,
            record,
            store,
            audio,
            observers: Vec::new(),
        }
    }

    /// Register a lifecycle observer. Observers run in registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Begin a run. Calling this mid-run discards the current run (its stats
    /// are never finalized) and starts a fresh one; returns true in that case.
    pub fn start_game(&mut self) -> bool {
        let restarted = self.is_playing();
        if restarted {
            log::warn!(
                "Run restarted after {:.2}s; discarding unfinished run",
                self.elapsed
            );
        }

        self.phase = SessionPhase::Playing;
        self.elapsed = 0.0;
        self.obstacles_dodged = 0;
        self.max_speed_multiplier = 0.0;
        self.record.total_runs_played += 1;

        log::info!(
            "Run {} started ({})",
            self.record.total_runs_played,
            self.mode.as_str()
        );
        self.notify(SessionEvent::PlayStarted {
            mode: self.mode,
            restarted,
        });
        self.audio.play_game_music();
        restarted
    }

    /// Advance the run clock. Ignored while idle or for a non-positive `dt`.
    pub fn tick(&mut self, dt: f32) {
        if !self.is_playing() || !(dt > 0.0) {
            return;
        }
        self.elapsed += dt;
    }

    /// Count one obstacle as dodged. The caller guarantees one call per obstacle.
    pub fn register_obstacle_dodged(&mut self) {
        self.obstacles_dodged += 1;
        self.record.total_obstacles_cleared += 1;
    }

    /// Feed the current effective speed multiplier (every tick)
    pub fn register_speed_sample(&mut self, multiplier: f32) {
        if multiplier > self.max_speed_multiplier {
            self.max_speed_multiplier = multiplier;
        }
    }

    /// End the run, fold it into the record and save. No-op while idle.
    pub fn game_over(&mut self) -> Option<RunReport> {
        if !self.is_playing() {
            return None;
        }
        self.phase = SessionPhase::Idle;

        self.record.total_score_ever += self.elapsed;
        self.record.ratchet_fastest_speed(self.max_speed_multiplier);
        let new_highscore = self
            .record
            .submit_run(self.mode, self.elapsed, self.obstacles_dodged);

        if let Err(e) = persistence::save_value(self.store.as_mut(), SAVE_KEY, &self.record) {
            log::error!("Failed to save record: {}", e);
        }

        let report = RunReport {
            mode: self.mode,
            score: self.elapsed,
            obstacles_dodged: self.obstacles_dodged,
            max_speed_multiplier: self.max_speed_multiplier,
            new_highscore,
        };
        log::info!(
            "Game over: {:.2}s, {} dodged, top speed {:.2}x{}",
            report.score,
            report.obstacles_dodged,
            report.max_speed_multiplier,
            if new_highscore { " (new highscore)" } else { "" }
        );

        self.notify(SessionEvent::GameEnded(report));
        self.audio.play_menu_music();
        Some(report)
    }

    /// Change difficulty. Refused (returns false) during a run.
    pub fn set_mode(&mut self, mode: DifficultyMode) -> bool {
        if self.is_playing() {
            log::warn!("Difficulty change ignored during a run");
            return false;
        }
        self.mode = mode;
        true
    }

    /// Flip Normal/Hard from the menu; returns the mode now in effect
    pub fn toggle_difficulty(&mut self) -> DifficultyMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn mode(&self) -> DifficultyMode {
        self.mode
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Survival time is the score
    pub fn score(&self) -> f32 {
        self.elapsed
    }

    pub fn obstacles_dodged(&self) -> u32 {
        self.obstacles_dodged
    }

    pub fn max_speed_multiplier(&self) -> f32 {
        self.max_speed_multiplier
    }

    pub fn record(&self) -> &PersistentRecord {
        &self.record
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// HUD score
    pub fn display_score(&self) -> i64 {
        display_seconds(self.elapsed)
    }

    /// Highscore for the active difficulty, as shown on the game over panel
    pub fn display_highscore(&self) -> i64 {
        display_seconds(self.record.highscore(self.mode))
    }

    fn notify(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}
