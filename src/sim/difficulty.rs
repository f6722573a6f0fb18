//! Time-driven difficulty ramp
//!
//! Spawn interval shrinks and obstacle speed grows with run time. Both ramps are
//! evaluated on `t + 1` so t=0 yields exactly the base values and a fractional
//! exponent never sees zero.

use serde::{Deserialize, Serialize};

use crate::tuning::DifficultyConfig;

/// Global difficulty, chosen before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DifficultyMode {
    #[default]
    Normal,
    Hard,
}

impl DifficultyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyMode::Normal => "Normal",
            DifficultyMode::Hard => "Hard",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DifficultyMode::Normal => DifficultyMode::Hard,
            DifficultyMode::Hard => DifficultyMode::Normal,
        }
    }
}

/// Pacing for one instant of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyScaling {
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Leftward obstacle speed
    pub obstacle_speed: f32,
    /// `obstacle_speed / base_obstacle_speed`
    pub speed_multiplier: f32,
}

/// Evaluate the ramp at `elapsed` seconds into a run
pub fn scaling(elapsed: f32, mode: DifficultyMode, config: &DifficultyConfig) -> DifficultyScaling {
    let (ramp_time, spawn_mult, speed_mult) = match mode {
        DifficultyMode::Normal => (elapsed, 1.0, 1.0),
        DifficultyMode::Hard => (
            elapsed * config.hard_ramp_multiplier,
            config.hard_spawn_multiplier,
            config.hard_speed_multiplier,
        ),
    };

    let spawn_divisor = (ramp_time + 1.0).powf(config.spawn_time_exponent);
    let speed_factor = (ramp_time + 1.0).powf(config.speed_exponent);

    let raw_interval = config.base_spawn_interval * spawn_mult / spawn_divisor;
    let raw_speed = config.base_obstacle_speed * speed_mult * speed_factor;

    let spawn_interval = raw_interval.max(config.min_spawn_interval);
    let obstacle_speed = raw_speed.min(config.max_obstacle_speed);

    DifficultyScaling {
        spawn_interval,
        obstacle_speed,
        speed_multiplier: obstacle_speed / config.base_obstacle_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn base_values_at_time_zero() {
        let config = DifficultyConfig::default();
        let s = scaling(0.0, DifficultyMode::Normal, &config);
        assert_eq!(s.obstacle_speed, config.base_obstacle_speed);
        assert_eq!(s.spawn_interval, config.base_spawn_interval);
        assert_eq!(s.speed_multiplier, 1.0);
    }

    #[test]
    fn hard_applies_multipliers_at_time_zero() {
        let config = DifficultyConfig::default();
        let s = scaling(0.0, DifficultyMode::Hard, &config);
        assert!(
            (s.obstacle_speed - config.base_obstacle_speed * config.hard_speed_multiplier).abs()
                < 1e-5
        );
        assert!(
            (s.spawn_interval - config.base_spawn_interval * config.hard_spawn_multiplier).abs()
                < 1e-5
        );
    }

    #[test]
    fn ramp_matches_formula() {
        let config = DifficultyConfig {
            max_obstacle_speed: 1000.0,
            min_spawn_interval: 0.01,
            ..DifficultyConfig::default()
        };
        let t = 15.0_f32;
        let s = scaling(t, DifficultyMode::Normal, &config);
        let expected_speed = config.base_obstacle_speed * 16.0_f32.powf(config.speed_exponent);
        let expected_interval =
            config.base_spawn_interval / 16.0_f32.powf(config.spawn_time_exponent);
        assert!((s.obstacle_speed - expected_speed).abs() < 1e-4);
        assert!((s.spawn_interval - expected_interval).abs() < 1e-4);
    }

    #[test]
    fn clamps_hold_late_in_a_run() {
        let config = DifficultyConfig::default();
        let s = scaling(1.0e9, DifficultyMode::Hard, &config);
        assert_eq!(s.obstacle_speed, config.max_obstacle_speed);
        assert_eq!(s.spawn_interval, config.min_spawn_interval);
        assert_eq!(
            s.speed_multiplier,
            config.max_obstacle_speed / config.base_obstacle_speed
        );
    }

    #[test]
    fn zero_exponents_freeze_the_ramp() {
        let config = DifficultyConfig {
            spawn_time_exponent: 0.0,
            speed_exponent: 0.0,
            ..DifficultyConfig::default()
        };
        let s = scaling(500.0, DifficultyMode::Normal, &config);
        assert_eq!(s.obstacle_speed, config.base_obstacle_speed);
        assert_eq!(s.spawn_interval, config.base_spawn_interval);
    }

    #[test]
    fn toggled_flips_mode() {
        assert_eq!(DifficultyMode::Normal.toggled(), DifficultyMode::Hard);
        assert_eq!(DifficultyMode::Hard.toggled(), DifficultyMode::Normal);
    }

    proptest! {
        #[test]
        fn clamps_hold_for_all_times(t in 0.0f32..100_000.0, hard in any::<bool>()) {
            let config = DifficultyConfig::default();
            let mode = if hard { DifficultyMode::Hard } else { DifficultyMode::Normal };
            let s = scaling(t, mode, &config);
            prop_assert!(s.spawn_interval >= config.min_spawn_interval);
            prop_assert!(s.obstacle_speed <= config.max_obstacle_speed);
            prop_assert!(s.speed_multiplier >= 1.0);
        }

        #[test]
        fn hard_is_never_easier(t in 0.0f32..100_000.0) {
            let config = DifficultyConfig::default();
            let normal = scaling(t, DifficultyMode::Normal, &config);
            let hard = scaling(t, DifficultyMode::Hard, &config);
            prop_assert!(hard.obstacle_speed >= normal.obstacle_speed);
            prop_assert!(hard.spawn_interval <= normal.spawn_interval);
        }
    }
}
