//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - The host picks the timestep and passes it in
//! - Seeded RNG only
//! - Stable iteration order (by obstacle id)
//! - Physics is reached only through [`PhysicsWorld`] and [`EventQueue`]

pub mod difficulty;
pub mod dodge;
pub mod events;
pub mod player;
pub mod scroller;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use difficulty::{DifficultyMode, DifficultyScaling, scaling};
pub use dodge::DodgeCounter;
pub use events::{EventQueue, NullWorld, ObstacleId, PhysicsEvent, PhysicsWorld};
pub use player::{CharacterController, PlayerInput, PlayerOutput, Stance};
pub use scroller::BackgroundScroller;
pub use session::{RunReport, RunSession, SessionEvent, SessionObserver, SessionPhase};
pub use spawner::{Obstacle, ObstacleSpawner};
pub use state::GameState;
pub use tick::{TickInput, tick};
