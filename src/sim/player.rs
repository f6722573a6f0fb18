//! Player vertical state machine
//!
//! Standing / Jumping / Crouching, driven by button edges and the grounded
//! sensor. Physics owns the actual body; the controller only hands back the
//! vertical velocity to impose this tick.

use crate::tuning::PlayerConfig;

use super::difficulty::DifficultyMode;

/// Button state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// Jump went down this tick
    pub jump_pressed: bool,
    pub jump_held: bool,
    /// Jump came up this tick
    pub jump_released: bool,
    pub crouch_held: bool,
    /// Crouch came up this tick
    pub crouch_released: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Standing,
    Jumping,
    Crouching,
}

/// What the controller wants applied this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerOutput {
    /// Vertical velocity to impose on the body, if any
    pub vertical_velocity: Option<f32>,
    /// A jump began this tick (cue the jump sound)
    pub jump_started: bool,
}

#[derive(Debug, Clone)]
pub struct CharacterController {
    config: PlayerConfig,
    grounded: bool,
    was_grounded: bool,
    jumping: bool,
    jump_timer: f32,
    crouching: bool,
    crouch_requested: bool,
    crouch_held_last_frame: bool,
    /// Visual height, eased toward the stance target
    height: f32,
}

impl CharacterController {
    pub fn new(config: PlayerConfig) -> Self {
        let height = config.stand_height;
        Self {
            config,
            grounded: false,
            was_grounded: false,
            jumping: false,
            jump_timer: 0.0,
            crouching: false,
            crouch_requested: false,
            crouch_held_last_frame: false,
            height,
        }
    }

    /// Drop every latch and go back to Standing
    pub fn reset(&mut self) {
        self.grounded = false;
        self.was_grounded = false;
        self.jumping = false;
        self.jump_timer = 0.0;
        self.crouching = false;
        self.crouch_requested = false;
        self.crouch_held_last_frame = false;
    }

    /// Advance one tick
    pub fn update(
        &mut self,
        input: &PlayerInput,
        grounded: bool,
        mode: DifficultyMode,
        playing: bool,
        dt: f32,
    ) -> PlayerOutput {
        if !playing {
            self.reset();
            self.ease_height(dt);
            return PlayerOutput::default();
        }

        let mut out = PlayerOutput::default();
        self.grounded = grounded;

        // Jump start cancels crouch and any buffered crouch
        if grounded && input.jump_pressed && self.jump_allowed(input, mode) {
            self.crouching = false;
            self.crouch_requested = false;
            self.jumping = true;
            self.jump_timer = 0.0;
            out.vertical_velocity = Some(self.config.jump_force);
            out.jump_started = true;
        }

        // Variable jump height: keep pushing while held, up to jump_time
        if self.jumping && input.jump_held {
            if self.jump_timer < self.config.jump_time {
                out.vertical_velocity = Some(self.config.jump_force);
                self.jump_timer += dt;
            } else {
                self.jumping = false;
            }
        }

        if input.jump_released {
            self.jumping = false;
            self.jump_timer = 0.0;
        }

        self.latch_crouch(input, mode);

        // Landing applies a crouch that was buffered in the air
        if grounded && !self.was_grounded && self.crouch_requested {
            self.crouching = true;
        }
        if grounded && !self.jumping {
            self.crouching = self.crouch_requested;
        }

        self.was_grounded = grounded;
        self.crouch_held_last_frame = input.crouch_held;
        self.ease_height(dt);
        out
    }

    fn jump_allowed(&self, input: &PlayerInput, mode: DifficultyMode) -> bool {
        match mode {
            DifficultyMode::Normal => true,
            DifficultyMode::Hard => !(self.crouching || input.crouch_held),
        }
    }

    /// Normal: level-triggered, buffers while held (also mid-air).
    /// Hard: needs a fresh press on the ground; holding never re-arms it.
    fn latch_crouch(&mut self, input: &PlayerInput, mode: DifficultyMode) {
        match mode {
            DifficultyMode::Normal => {
                if input.crouch_held {
                    self.crouch_requested = true;
                }
                if input.crouch_released {
                    self.crouch_requested = false;
                }
            }
            DifficultyMode::Hard => {
                let fresh_press = input.crouch_held && !self.crouch_held_last_frame;
                if fresh_press && self.grounded && !self.jumping {
                    self.crouch_requested = true;
                }
                if input.crouch_released || !input.crouch_held {
                    self.crouch_requested = false;
                }
            }
        }
    }

    fn ease_height(&mut self, dt: f32) {
        let target = if self.crouching {
            self.config.crouch_height
        } else {
            self.config.stand_height
        };
        let t = (self.config.crouch_speed * dt.max(0.0)).min(1.0);
        self.height += (target - self.height) * t;
    }

    pub fn stance(&self) -> Stance {
        if self.jumping {
            Stance::Jumping
        } else if self.crouching {
            Stance::Crouching
        } else {
            Stance::Standing
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn crouch_requested(&self) -> bool {
        self.crouch_requested
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.1;

    fn controller() -> CharacterController {
        CharacterController::new(PlayerConfig::default())
    }

    fn jump_press() -> PlayerInput {
        PlayerInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        }
    }

    fn jump_hold() -> PlayerInput {
        PlayerInput {
            jump_held: true,
            ..Default::default()
        }
    }

    fn crouch_hold() -> PlayerInput {
        PlayerInput {
            crouch_held: true,
            ..Default::default()
        }
    }

    fn crouch_release() -> PlayerInput {
        PlayerInput {
            crouch_released: true,
            ..Default::default()
        }
    }

    #[test]
    fn grounded_press_starts_jump() {
        let mut c = controller();
        let out = c.update(&jump_press(), true, DifficultyMode::Normal, true, DT);
        assert!(out.jump_started);
        assert_eq!(out.vertical_velocity, Some(PlayerConfig::default().jump_force));
        assert_eq!(c.stance(), Stance::Jumping);
    }

    #[test]
    fn airborne_press_does_nothing() {
        let mut c = controller();
        let out = c.update(&jump_press(), false, DifficultyMode::Normal, true, DT);
        assert!(!out.jump_started);
        assert_eq!(out.vertical_velocity, None);
        assert_eq!(c.stance(), Stance::Standing);
    }

    #[test]
    fn held_jump_is_capped_by_jump_time() {
        let mut c = controller();
        // jump_time 0.25 at dt 0.1: pushes on ticks 1-3, stops on 4
        let mode = DifficultyMode::Normal;
        let out = c.update(&jump_press(), true, mode, true, DT);
        assert!(out.vertical_velocity.is_some());
        for _ in 0..2 {
            let out = c.update(&jump_hold(), false, mode, true, DT);
            assert!(out.vertical_velocity.is_some());
        }
        let out = c.update(&jump_hold(), false, mode, true, DT);
        assert_eq!(out.vertical_velocity, None);
        assert!(!c.is_jumping());
    }

    #[test]
    fn release_ends_jump() {
        let mut c = controller();
        c.update(&jump_press(), true, DifficultyMode::Normal, true, DT);
        let release = PlayerInput {
            jump_released: true,
            ..Default::default()
        };
        c.update(&release, false, DifficultyMode::Normal, true, DT);
        assert!(!c.is_jumping());
        let out = c.update(&jump_hold(), false, DifficultyMode::Normal, true, DT);
        assert_eq!(out.vertical_velocity, None);
    }

    #[test]
    fn normal_crouch_follows_button() {
        let mut c = controller();
        c.update(&crouch_hold(), true, DifficultyMode::Normal, true, DT);
        assert_eq!(c.stance(), Stance::Crouching);
        c.update(&crouch_release(), true, DifficultyMode::Normal, true, DT);
        assert_eq!(c.stance(), Stance::Standing);
    }

    #[test]
    fn normal_allows_jump_from_crouch_and_recrouches_on_landing() {
        let mut c = controller();
        let mode = DifficultyMode::Normal;
        c.update(&crouch_hold(), true, mode, true, DT);
        assert!(c.is_crouching());

        let press = PlayerInput {
            crouch_held: true,
            ..jump_press()
        };
        let out = c.update(&press, true, mode, true, DT);
        assert!(out.jump_started);
        assert!(!c.is_crouching());

        let air = PlayerInput {
            crouch_held: true,
            jump_held: true,
            ..Default::default()
        };
        c.update(&air, false, mode, true, DT);
        assert!(!c.is_crouching());

        let land = PlayerInput {
            crouch_held: true,
            jump_released: true,
            ..Default::default()
        };
        c.update(&land, true, mode, true, DT);
        assert!(c.is_crouching());
    }

    #[test]
    fn hard_refuses_jump_while_crouching() {
        let mut c = controller();
        let mode = DifficultyMode::Hard;
        c.update(&crouch_hold(), true, mode, true, DT);
        assert!(c.is_crouching());

        let press = PlayerInput {
            crouch_held: true,
            ..jump_press()
        };
        let out = c.update(&press, true, mode, true, DT);
        assert!(!out.jump_started);
        assert_eq!(c.stance(), Stance::Crouching);
    }

    #[test]
    fn hard_crouch_needs_fresh_press_after_landing() {
        let mut c = controller();
        let mode = DifficultyMode::Hard;

        assert!(c.update(&jump_press(), true, mode, true, DT).jump_started);
        // Crouch goes down mid-air and stays held through the landing
        let air = PlayerInput {
            crouch_held: true,
            jump_held: true,
            ..Default::default()
        };
        c.update(&air, false, mode, true, DT);
        c.update(&air, false, mode, true, DT);
        let land = PlayerInput {
            crouch_held: true,
            jump_released: true,
            ..Default::default()
        };
        c.update(&land, true, mode, true, DT);
        assert!(!c.is_crouching());
        c.update(&crouch_hold(), true, mode, true, DT);
        assert!(!c.is_crouching());

        // Release and press again
        c.update(&crouch_release(), true, mode, true, DT);
        c.update(&crouch_hold(), true, mode, true, DT);
        assert!(c.is_crouching());
    }

    #[test]
    fn normal_crouch_held_through_air_applies_on_landing() {
        let mut c = controller();
        let mode = DifficultyMode::Normal;
        c.update(&jump_press(), true, mode, true, DT);
        let air = PlayerInput {
            crouch_held: true,
            jump_held: true,
            ..Default::default()
        };
        c.update(&air, false, mode, true, DT);
        assert!(c.crouch_requested());
        c.update(&crouch_hold(), true, mode, true, DT);
        assert!(c.is_crouching());
    }

    #[test]
    fn not_playing_resets_everything() {
        let mut c = controller();
        c.update(&crouch_hold(), true, DifficultyMode::Normal, true, DT);
        assert!(c.is_crouching());
        let out = c.update(&jump_press(), true, DifficultyMode::Normal, false, DT);
        assert_eq!(out, PlayerOutput::default());
        assert_eq!(c.stance(), Stance::Standing);
        assert!(!c.crouch_requested());
        assert!(!c.is_grounded());
    }

    #[test]
    fn height_eases_toward_crouch() {
        let config = PlayerConfig::default();
        let mut c = controller();
        assert_eq!(c.height(), config.stand_height);

        c.update(&crouch_hold(), true, DifficultyMode::Normal, true, 0.01);
        let h1 = c.height();
        assert!(h1 < config.stand_height && h1 > config.crouch_height);
        for _ in 0..200 {
            c.update(&crouch_hold(), true, DifficultyMode::Normal, true, 0.01);
        }
        assert!((c.height() - config.crouch_height).abs() < 1e-3);
    }

    #[test]
    fn huge_dt_does_not_overshoot() {
        let config = PlayerConfig::default();
        let mut c = controller();
        c.update(&crouch_hold(), true, DifficultyMode::Normal, true, 5.0);
        assert_eq!(c.height(), config.crouch_height);
    }
}
