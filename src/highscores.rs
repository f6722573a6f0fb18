//! Lifetime statistics and per-difficulty highscores
//!
//! Persisted as a flat camelCase JSON object (`normalHighscore`, `totalRunsPlayed`,
//! ...), the layout existing save files already use.

use serde::{Deserialize, Serialize};

use crate::display_seconds;
use crate::sim::DifficultyMode;

/// Everything that survives between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistentRecord {
    /// Best seconds survived on Normal
    pub normal_highscore: f32,
    /// Best seconds survived on Hard
    pub hard_highscore: f32,
    /// Obstacles dodged in the run that set `normal_highscore`
    pub normal_best_streak: u32,
    /// Obstacles dodged in the run that set `hard_highscore`
    pub hard_best_streak: u32,
    /// Highest speed multiplier ever reached (ratchet only)
    pub fastest_speed_ever: f32,
    pub total_obstacles_cleared: u32,
    pub total_score_ever: f32,
    pub total_runs_played: u32,
}

impl PersistentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highscore(&self, mode: DifficultyMode) -> f32 {
        match mode {
            DifficultyMode::Normal => self.normal_highscore,
            DifficultyMode::Hard => self.hard_highscore,
        }
    }

    pub fn best_streak(&self, mode: DifficultyMode) -> u32 {
        match mode {
            DifficultyMode::Normal => self.normal_best_streak,
            DifficultyMode::Hard => self.hard_best_streak,
        }
    }

    /// Record a finished run's score for `mode`.
    ///
    /// Only a strictly greater score replaces the highscore, and the best streak
    /// always follows the run that set it (even if an earlier, lower-scoring run
    /// dodged more). Returns true when a new highscore was set.
    pub fn submit_run(&mut self, mode: DifficultyMode, score: f32, dodged: u32) -> bool {
        if score <= self.highscore(mode) {
            return false;
        }
        match mode {
            DifficultyMode::Normal => {
                self.normal_highscore = score;
                self.normal_best_streak = dodged;
            }
            DifficultyMode::Hard => {
                self.hard_highscore = score;
                self.hard_best_streak = dodged;
            }
        }
        true
    }

    /// Raise the fastest-ever multiplier if `multiplier` beats it
    pub fn ratchet_fastest_speed(&mut self, multiplier: f32) {
        if multiplier > self.fastest_speed_ever {
            self.fastest_speed_ever = multiplier;
        }
    }

    /// Clamp values a hand-edited or damaged save could carry
    pub fn sanitized(mut self) -> Self {
        for value in [
            &mut self.normal_highscore,
            &mut self.hard_highscore,
            &mut self.fastest_speed_ever,
            &mut self.total_score_ever,
        ] {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
            }
        }
        self
    }

    /// Rows for the stats panel
    pub fn stats_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Normal Best Run: {}s  ({} dodged)",
                display_seconds(self.normal_highscore),
                self.normal_best_streak
            ),
            format!(
                "Hard Best Run: {}s  ({} dodged)",
                display_seconds(self.hard_highscore),
                self.hard_best_streak
            ),
            format!("Fastest Speed Reached: {:.1}x", self.fastest_speed_ever),
            format!(
                "Obstacles Cleared (All Time): {}",
                self.total_obstacles_cleared
            ),
            format!(
                "Total Score (All Time): {}",
                display_seconds(self.total_score_ever)
            ),
            format!("Total Runs Played: {}", self.total_runs_played),
        ]
    }
}
