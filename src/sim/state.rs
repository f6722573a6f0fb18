//! Game state
//!
//! Everything a running game owns. No globals: the host keeps one `GameState`
//! and passes its physics backend into each call.

use crate::audio::AudioManager;
use crate::error::ConfigError;
use crate::persistence::RecordStore;
use crate::tuning::GameConfig;

use super::difficulty::DifficultyMode;
use super::dodge::DodgeCounter;
use super::events::{EventQueue, PhysicsEvent, PhysicsWorld};
use super::player::CharacterController;
use super::scroller::BackgroundScroller;
use super::session::{RunReport, RunSession, SessionEvent};
use super::spawner::ObstacleSpawner;

/// Owns every component of a game.
///
/// Run transitions only go through [`GameState::start_game`] and
/// [`GameState::game_over`], which reset the per-run components along with
/// the session. The session itself is read-only from outside the crate:
///
/// ```compile_fail
/// use cyber_run::{AudioManager, GameConfig, GameState, MemoryStore};
///
/// let mut state = GameState::new(
///     GameConfig::default(),
///     Box::new(MemoryStore::new()),
///     AudioManager::default(),
///     1,
/// )
/// .unwrap();
/// state.session.game_over();
/// ```
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) config: GameConfig,
    pub(crate) session: RunSession,
    pub(crate) spawner: ObstacleSpawner,
    pub(crate) dodge: DodgeCounter,
    pub(crate) player: CharacterController,
    pub(crate) scroller: BackgroundScroller,
    /// Physics events waiting for the next tick
    pub(crate) events: EventQueue,
}

impl GameState {
    /// Validate `config` and build a state in the Idle phase
    pub fn new(
        config: GameConfig,
        store: Box<dyn RecordStore>,
        audio: AudioManager,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let session = RunSession::new(store, audio);
        let spawner =
            ObstacleSpawner::new(config.spawner.clone(), config.difficulty.clone(), seed);
        let player = CharacterController::new(config.player.clone());
        let scroller = BackgroundScroller::new(config.scroller.clone(), 0.0);

        Ok(Self {
            seed,
            time_ticks: 0,
            config,
            session,
            spawner,
            dodge: DodgeCounter::new(),
            player,
            scroller,
            events: EventQueue::new(),
        })
    }

    /// Start (or restart) a run and reset every per-run component
    pub fn start_game(&mut self, world: &mut dyn PhysicsWorld) -> bool {
        let restarted = self.session.start_game();
        // Events queued against the previous run are stale
        self.events.clear();
        self.spawner.on_play_started(world);
        self.player.reset();
        self.scroller.on_play_started();
        restarted
    }

    /// End the run. `None` when no run was in progress.
    pub fn game_over(&mut self, world: &mut dyn PhysicsWorld) -> Option<RunReport> {
        let report = self.session.game_over()?;
        self.spawner.on_game_ended(world);
        self.player.reset();
        Some(report)
    }

    pub fn toggle_difficulty(&mut self) -> DifficultyMode {
        self.session.toggle_difficulty()
    }

    /// Pick the difficulty from the menu. Refused (false) during a run.
    pub fn set_mode(&mut self, mode: DifficultyMode) -> bool {
        self.session.set_mode(mode)
    }

    /// Queue something the physics backend observed for the next tick
    pub fn push_event(&mut self, event: PhysicsEvent) {
        self.events.push(event);
    }

    /// Menu-side audio control (mute, settings)
    pub fn audio_mut(&mut self) -> &mut AudioManager {
        self.session.audio_mut()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &RunSession {
        &self.session
    }

    pub fn spawner(&self) -> &ObstacleSpawner {
        &self.spawner
    }

    pub fn dodge(&self) -> &DodgeCounter {
        &self.dodge
    }

    pub fn player(&self) -> &CharacterController {
        &self.player
    }

    pub fn scroller(&self) -> &BackgroundScroller {
        &self.scroller
    }

    pub fn pending_events(&self) -> &EventQueue {
        &self.events
    }

    /// Register a lifecycle observer (UI panels, analytics)
    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) {
        self.session.subscribe(observer);
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::consts::SIM_DT;
    use crate::persistence::MemoryStore;
    use crate::sim::events::ObstacleId;
    use crate::sim::events::tests::RecordingWorld;
    use crate::sim::player::Stance;
    use crate::sim::tick::{TickInput, tick};

    fn state() -> GameState {
        GameState::new(
            GameConfig::default(),
            Box::new(MemoryStore::new()),
            AudioManager::default(),
            42,
        )
        .expect("default config is valid")
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.spawner.catalog.clear();
        let result =
            GameState::new(config, Box::new(MemoryStore::new()), AudioManager::default(), 1);
        assert_eq!(result.err(), Some(ConfigError::EmptyCatalog));
    }

    #[test]
    fn starts_idle() {
        let state = state();
        assert!(!state.is_playing());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn start_drops_stale_events() {
        let mut state = state();
        let mut world = RecordingWorld::default();
        state.events.push(PhysicsEvent::PlayerHitObstacle);
        state.events.push(PhysicsEvent::DodgeTriggerEntered {
            obstacle: Some(ObstacleId(1)),
        });
        assert!(!state.start_game(&mut world));
        assert!(state.events.is_empty());
        assert!(state.is_playing());
    }

    #[test]
    fn game_over_while_idle_is_noop() {
        let mut state = state();
        let mut world = RecordingWorld::default();
        assert!(state.game_over(&mut world).is_none());
        assert_eq!(world.clears, 0);
    }

    #[test]
    fn observers_see_start_then_end() {
        let mut state = state();
        let mut world = RecordingWorld::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state.subscribe(move |e| sink.borrow_mut().push(*e));

        state.start_game(&mut world);
        state.game_over(&mut world);
        state.game_over(&mut world);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], SessionEvent::PlayStarted { restarted: false, .. }));
        assert!(matches!(seen[1], SessionEvent::GameEnded(_)));
    }

    #[test]
    fn toggle_only_from_menu() {
        let mut state = state();
        let mut world = RecordingWorld::default();
        assert_eq!(state.toggle_difficulty(), DifficultyMode::Hard);
        state.start_game(&mut world);
        assert_eq!(state.toggle_difficulty(), DifficultyMode::Hard);
        state.game_over(&mut world);
        assert_eq!(state.toggle_difficulty(), DifficultyMode::Normal);
    }

    fn play_for(state: &mut GameState, world: &mut RecordingWorld, ticks: u32, input: TickInput) {
        for _ in 0..ticks {
            tick(state, &input, SIM_DT, world);
        }
    }

    #[test]
    fn every_run_end_clears_obstacles() {
        let mut state = state();
        let mut world = RecordingWorld::default();
        let crouch = TickInput {
            grounded: true,
            crouch_held: true,
            ..Default::default()
        };

        // Explicit game over from the host
        state.start_game(&mut world);
        play_for(&mut state, &mut world, 600, crouch);
        assert!(!state.spawner().obstacles().is_empty());
        assert_eq!(state.player().stance(), Stance::Crouching);
        assert!(state.game_over(&mut world).is_some());
        assert!(state.spawner().obstacles().is_empty());
        assert_eq!(state.player().stance(), Stance::Standing);
        assert_eq!(world.clears, 1);

        // Terminal collision reported by physics
        state.start_game(&mut world);
        play_for(&mut state, &mut world, 600, crouch);
        assert!(!state.spawner().obstacles().is_empty());
        state.push_event(PhysicsEvent::PlayerHitObstacle);
        play_for(&mut state, &mut world, 1, TickInput::default());
        assert!(!state.is_playing());
        assert!(state.spawner().obstacles().is_empty());
        assert_eq!(world.clears, 2);
    }

    #[test]
    fn restart_resets_per_run_components() {
        let mut state = state();
        let mut world = RecordingWorld::default();
        let crouch = TickInput {
            grounded: true,
            crouch_held: true,
            ..Default::default()
        };
        state.start_game(&mut world);
        play_for(&mut state, &mut world, 300, crouch);
        assert!(state.player().is_crouching());
        assert_ne!(state.scroller().position(), 0.0);

        assert!(state.start_game(&mut world));
        assert!(!state.player().is_crouching());
        assert_eq!(state.scroller().position(), 0.0);
        assert_eq!(state.spawner().accumulator(), 0.0);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn set_mode_refused_mid_run() {
        let mut state = state();
        let mut world = RecordingWorld::default();
        assert!(state.set_mode(DifficultyMode::Hard));
        state.start_game(&mut world);
        assert!(!state.set_mode(DifficultyMode::Normal));
        assert_eq!(state.session().mode(), DifficultyMode::Hard);
    }
}
