//! Fixed timestep simulation tick
//!
//! Core game loop. One call advances every component in a fixed order:
//! physics events, player, run clock, spawner, background.

use crate::audio::SoundEffect;

use super::events::{PhysicsEvent, PhysicsWorld};
use super::player::PlayerInput;
use super::state::GameState;

/// Input sampled by the host for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Ground check result for the player body
    pub grounded: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub crouch_held: bool,
    pub crouch_released: bool,
}

impl TickInput {
    fn buttons(&self) -> PlayerInput {
        PlayerInput {
            jump_pressed: self.jump_pressed,
            jump_held: self.jump_held,
            jump_released: self.jump_released,
            crouch_held: self.crouch_held,
            crouch_released: self.crouch_released,
        }
    }
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, world: &mut dyn PhysicsWorld) {
    state.time_ticks += 1;

    // Collisions reported since the last tick, in arrival order
    for event in state.events.drain() {
        match event {
            PhysicsEvent::PlayerHitObstacle => {
                if state.is_playing() {
                    state.session.audio_mut().play(SoundEffect::Death);
                    state.game_over(world);
                }
            }
            PhysicsEvent::DodgeTriggerEntered { obstacle } => {
                if state.is_playing() {
                    state
                        .dodge
                        .on_trigger_entered(obstacle, &mut state.spawner, &mut state.session);
                }
            }
            PhysicsEvent::ObstacleLeftWorld { obstacle } => {
                state.spawner.despawn(obstacle);
            }
        }
    }

    let playing = state.is_playing();
    let out = state
        .player
        .update(&input.buttons(), input.grounded, state.session.mode(), playing, dt);
    if let Some(velocity) = out.vertical_velocity {
        world.set_player_vertical_velocity(velocity);
    }
    if out.jump_started {
        state.session.audio_mut().play(SoundEffect::Jump);
    }

    state.session.tick(dt);
    state.spawner.update(dt, &mut state.session, world);
    state
        .scroller
        .update(dt, state.session.elapsed(), state.session.is_playing());
}
