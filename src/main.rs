//! Cyber Run demo entry point
//!
//! Headless autopilot: a toy kinematic lane stands in for the physics engine and
//! a simple bot plays a few runs, so the whole core (spawning, dodging, scoring,
//! persistence, audio cues) can be watched through the log.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use cyber_run::consts::SIM_DT;
use cyber_run::sim::{ObstacleId, PhysicsEvent, PhysicsWorld, TickInput, tick};
use cyber_run::tuning::CatalogEntry;
use cyber_run::{AudioManager, GameConfig, GameState, RecordStore, Settings};

/// Runs per demo session
const DEMO_RUNS: u32 = 4;
/// Safety cap so a lucky bot cannot run forever
const MAX_RUN_SECONDS: f32 = 120.0;

const GRAVITY: f32 = 30.0;
const GROUND_Y: f32 = -3.0;
/// Player collider scale relative to the controller's visual height
const BODY_SCALE: f32 = 0.6;
const OBSTACLE_SIZE: f32 = 1.0;
/// Dodge trigger line just behind the player
const TRIGGER_X: f32 = -1.5;
const DESPAWN_X: f32 = -15.0;

#[derive(Debug)]
struct Body {
    id: ObstacleId,
    pos: Vec2,
    vel: Vec2,
    passed: bool,
}

/// Minimal one-lane physics: a player box at x=0 and boxes sliding left
#[derive(Debug)]
struct Lane {
    obstacles: Vec<Body>,
    player_y: f32,
    player_vy: f32,
}

impl Lane {
    fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            player_y: GROUND_Y,
            player_vy: 0.0,
        }
    }

    fn grounded(&self) -> bool {
        self.player_y <= GROUND_Y && self.player_vy <= 0.0
    }

    /// Integrate one step and report contacts for the next tick
    fn step(&mut self, dt: f32, player_height: f32) -> Vec<PhysicsEvent> {
        let mut events = Vec::new();
        self.player_vy -= GRAVITY * dt;
        self.player_y += self.player_vy * dt;
        if self.player_y <= GROUND_Y {
            self.player_y = GROUND_Y;
            self.player_vy = 0.0;
        }

        let half = OBSTACLE_SIZE / 2.0;
        let top = self.player_y + player_height * BODY_SCALE;
        let mut hit = false;
        for body in &mut self.obstacles {
            body.pos += body.vel * dt;

            let overlaps_x = body.pos.x - half < 0.5 && body.pos.x + half > -0.5;
            let overlaps_y = body.pos.y < top && body.pos.y + OBSTACLE_SIZE > self.player_y;
            hit |= overlaps_x && overlaps_y;

            if !body.passed && body.pos.x + half < TRIGGER_X {
                body.passed = true;
                events.push(PhysicsEvent::DodgeTriggerEntered {
                    obstacle: Some(body.id),
                });
            }
        }
        if hit {
            events.push(PhysicsEvent::PlayerHitObstacle);
        }

        self.obstacles.retain(|body| {
            let keep = body.pos.x > DESPAWN_X;
            if !keep {
                events.push(PhysicsEvent::ObstacleLeftWorld { obstacle: body.id });
            }
            keep
        });
        events
    }
}

impl PhysicsWorld for Lane {
    fn spawn_obstacle(
        &mut self,
        id: ObstacleId,
        _entry: &CatalogEntry,
        position: Vec2,
        velocity: Vec2,
    ) {
        self.obstacles.push(Body {
            id,
            pos: position,
            vel: velocity,
            passed: false,
        });
    }

    fn destroy_all_obstacles(&mut self) {
        self.obstacles.clear();
    }

    fn set_player_vertical_velocity(&mut self, velocity: f32) {
        self.player_vy = velocity;
    }
}

/// Autopilot that jumps ground obstacles and ducks overhead ones,
/// occasionally missing a cue on purpose
struct Bot {
    rng: Pcg32,
    miss_chance: f64,
    threat: Option<ObstacleId>,
    ignoring: bool,
    jump_held: bool,
    crouch_held: bool,
}

impl Bot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            miss_chance: 0.08,
            threat: None,
            ignoring: false,
            jump_held: false,
            crouch_held: false,
        }
    }

    fn input(&mut self, lane: &Lane) -> TickInput {
        let grounded = lane.grounded();
        let next = lane
            .obstacles
            .iter()
            .filter(|b| b.pos.x + OBSTACLE_SIZE / 2.0 > -0.5)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

        let mut wants_jump = false;
        let mut wants_crouch = false;
        if let Some(body) = next {
            if self.threat != Some(body.id) {
                self.threat = Some(body.id);
                self.ignoring = self.rng.random_bool(self.miss_chance);
            }
            let speed = -body.vel.x;
            let dx = body.pos.x;
            let overhead = body.pos.y > GROUND_Y + OBSTACLE_SIZE;
            if !self.ignoring {
                if overhead {
                    wants_crouch = dx < speed * 0.4 + 1.5;
                } else {
                    wants_jump = dx < speed * 0.3 + 1.0;
                }
            }
        }

        // Let go once falling so the next jump is a fresh press
        let jump_held = wants_jump && (grounded || lane.player_vy > 0.0);
        let crouch_held = wants_crouch;
        let input = TickInput {
            grounded,
            jump_pressed: jump_held && !self.jump_held,
            jump_held,
            jump_released: !jump_held && self.jump_held,
            crouch_held,
            crouch_released: !crouch_held && self.crouch_held,
        };
        self.jump_held = jump_held;
        self.crouch_held = crouch_held;
        input
    }
}

fn run_demo<S>(store: S, seed: u64)
where
    S: RecordStore + Clone + 'static,
{
    let mut settings_store = store.clone();
    let settings = Settings::load(&settings_store);

    let mut audio = AudioManager::default();
    audio.apply_settings(&settings);
    audio.play_menu_music();

    let mut state = match GameState::new(GameConfig::default(), Box::new(store), audio, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid game config: {}", e);
            return;
        }
    };
    state.set_mode(settings.difficulty);
    state.subscribe(|event| log::debug!("session event: {:?}", event));

    log::info!("Game initialized with seed: {}", seed);

    let mut bot = Bot::new(seed ^ 0x5eed);

    for run in 0..DEMO_RUNS {
        if run == DEMO_RUNS / 2 {
            let mode = state.toggle_difficulty();
            log::info!("Switching to {} mode", mode.as_str());
        }

        let mut lane = Lane::new();
        state.start_game(&mut lane);
        while state.is_playing() {
            let input = bot.input(&lane);
            tick(&mut state, &input, SIM_DT, &mut lane);
            for event in lane.step(SIM_DT, state.player().height()) {
                state.push_event(event);
            }

            if state.session().elapsed() >= MAX_RUN_SECONDS {
                log::info!("Run reached {}s, calling it", MAX_RUN_SECONDS);
                state.game_over(&mut lane);
            }
        }
        println!(
            "Run {}: {}s, {} dodged (highscore {}s)",
            run + 1,
            state.session().display_score(),
            state.session().obstacles_dodged(),
            state.session().display_highscore()
        );
    }

    let settings = Settings {
        difficulty: state.session().mode(),
        ..settings
    };
    if let Err(e) = settings.save(&mut settings_store) {
        log::warn!("Failed to save settings: {}", e);
    }

    println!();
    for line in state.session().record().stats_lines() {
        println!("{}", line);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cyber Run (native) starting...");

    let seed: u64 = rand::random();
    run_demo(cyber_run::FileStore::new("saves"), seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Cyber Run (web) starting...");

    let seed: u64 = rand::random();
    run_demo(cyber_run::persistence::LocalStorageStore::new("cyber_run_"), seed);
}
