//! Gameplay tunables.
//!
//! Every length and speed is expressed at the 1920x1080 reference resolution
//! and multiplied by [`crate::Viewport::scale`] before use.

pub const REF_WIDTH: f64 = 1920.0;
pub const REF_HEIGHT: f64 = 1080.0;

pub const SPACESHIP_WIDTH: f64 = 40.0;
/// Distance of the ship's top edge from the bottom of the viewport.
pub const SPACESHIP_Y_OFFSET: f64 = 80.0;
pub const SPACESHIP_DESIGNS: usize = 5;

pub const ALIEN_WIDTH: f64 = 60.0;
pub const ALIEN_HEIGHT: f64 = 60.0;
pub const ALIEN_START_Y: f64 = 100.0;
pub const ALIEN_SPACING: f64 = 70.0;
pub const ALIEN_ROW_SPACING: f64 = 50.0;
pub const ALIEN_VERTICAL_SPEED: f64 = 0.3;
pub const ALIEN_HORIZONTAL_SPEED: f64 = 1.0;
/// Per-wave multiplier applied to the vertical descent speed.
pub const WAVE_SPEED_GROWTH: f64 = 1.1;

pub const X_FORMATION_SPACING: f64 = 25.0;
pub const X_FORMATION_OFFSET: f64 = 150.0;
pub const X_FORMATION_ARM_LEN: usize = 5;

pub const BULLET_SPEED: f64 = 8.0;
pub const BULLET_WIDTH: f64 = 4.0;
pub const BULLET_HEIGHT: f64 = 12.0;
/// Bullets above this normalized y are culled.
pub const BULLET_CULL_Y: f64 = -0.05;
pub const FIRE_COOLDOWN_MS: f64 = 150.0;

pub const EDGE_MARGIN: f64 = 50.0;
/// Distance from the bottom at which a descending alien ends the game.
pub const GAME_OVER_MARGIN: f64 = 100.0;

pub const FORMATION_PATTERNS: u32 = 7;

pub const STAR_COUNT: usize = 50;
pub const STAR_MIN_SPEED: f64 = 0.3;
pub const STAR_SPEED_RANGE: f64 = 1.0;
pub const STAR_MIN_SIZE: f64 = 1.0;
pub const STAR_SIZE_RANGE: f64 = 2.0;
pub const STAR_TRAIL_FACTOR: f64 = 5.0;

pub const PIXEL_SIZE: f64 = 6.0;
pub const SHIP_SHADE: i16 = -30;
pub const ALIEN_SHADE: i16 = 30;

pub const HUD_FONT_SIZE: f64 = 16.0;
pub const HUD_MIN_FONT_SIZE: f64 = 12.0;
pub const HUD_MARGIN_X: f64 = 20.0;
pub const HUD_SCORE_Y: f64 = 40.0;
pub const HUD_WAVE_Y: f64 = 70.0;
pub const BANNER_FONT_SIZE: f64 = 32.0;

pub const DEFAULT_THEME_COLOR: &str = "#00ff00";

/// Host clock step used by headless replays (60 Hz display refresh).
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;
