use serde::Serialize;

use crate::constants::{
    ALIEN_HORIZONTAL_SPEED, EDGE_MARGIN, FIRE_COOLDOWN_MS, FRAME_INTERVAL_MS, GAME_OVER_MARGIN,
    SPACESHIP_WIDTH, SPACESHIP_Y_OFFSET,
};
use crate::entities::{aabb_contains, Bullet, Direction, EntityStore};
use crate::input::FrameInput;
use crate::stars::{Star, Starfield};
use crate::viewport::Viewport;
use crate::wave::{self, Formation};

mod game;

use game::Game;

/// `Running -> Paused <-> Running -> GameOver`. Game over is terminal until
/// [`LiveGame::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

/// What happened during one tick, for hosts that react to events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub fired: bool,
    pub kills: u32,
    pub wave_cleared: bool,
    pub game_over: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayResult {
    pub final_score: u32,
    pub final_wave: u32,
    pub frame_count: u32,
    pub game_over: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShipSnapshot {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BulletSnapshot {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AlienSnapshot {
    pub x: f64,
    pub y: f64,
    pub half_width: f64,
    pub half_height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub frame_count: u32,
    pub status: GameStatus,
    pub score: u32,
    pub wave: u32,
    pub formation: Formation,
    pub direction: Direction,
    pub vertical_speed: f64,
    pub has_first_kill: bool,
    pub show_wave_counter: bool,
    pub ship: ShipSnapshot,
    pub bullets: Vec<BulletSnapshot>,
    pub aliens: Vec<AlienSnapshot>,
}

impl WorldSnapshot {
    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver)
    }
}

/// One game session. Owns every piece of mutable simulation state; hosts
/// drive it with one [`LiveGame::tick`] per display refresh.
pub struct LiveGame {
    game: Game,
}

/// Runs a whole input sequence headlessly on a 60 Hz host clock.
pub fn replay(seed: u32, viewport: Viewport, inputs: &[FrameInput]) -> ReplayResult {
    let mut game = Game::new(seed, viewport);

    for (frame, input) in inputs.iter().enumerate() {
        game.tick(*input, viewport, host_time_ms(frame as u32 + 1));
    }

    game.result()
}

/// Host clock reading for the given 1-based frame of a headless run.
#[inline]
pub fn host_time_ms(frame: u32) -> f64 {
    f64::from(frame) * FRAME_INTERVAL_MS
}

impl LiveGame {
    pub fn new(seed: u32, viewport: Viewport) -> Self {
        Self {
            game: Game::new(seed, viewport),
        }
    }

    /// Applies staged input, then advances the simulation one step unless
    /// paused or over. `now_ms` is the host clock, used for the fire cooldown.
    #[inline]
    pub fn tick(&mut self, input: FrameInput, viewport: Viewport, now_ms: f64) -> TickReport {
        self.game.tick(input, viewport, now_ms)
    }

    #[inline]
    pub fn toggle_pause(&mut self) {
        self.game.toggle_pause();
    }

    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.game.set_paused(paused);
    }

    /// Discards the session and starts over at wave 1.
    #[inline]
    pub fn reset(&mut self) {
        self.game.reset();
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.game.score()
    }

    #[inline]
    pub fn wave(&self) -> u32 {
        self.game.wave()
    }

    #[inline]
    pub fn entities(&self) -> &EntityStore {
        self.game.entities()
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        self.game.stars()
    }

    #[inline]
    pub fn snapshot(&self) -> WorldSnapshot {
        self.game.world_snapshot()
    }

    #[inline]
    pub fn result(&self) -> ReplayResult {
        self.game.result()
    }
}

/// Normalized ship top edge, recomputed from the live viewport.
#[inline]
pub(crate) fn ship_y(viewport: &Viewport) -> f64 {
    (viewport.height - viewport.scaled(SPACESHIP_Y_OFFSET)) / viewport.height
}

/// Normalized ship center, keeping the hull one ship width inside each edge.
#[inline]
pub(crate) fn ship_x(pointer_x: f64, viewport: &Viewport) -> f64 {
    let ship_width = viewport.scaled(SPACESHIP_WIDTH);
    let pixel_x = ship_width.max((viewport.width - ship_width).min(pointer_x * viewport.width));
    pixel_x / viewport.width
}
