//! Render Surface: turns a session into draw calls for any 2D target.
//!
//! The host owns the actual canvas. [`render`] only issues filled rectangles,
//! circles and text through [`Surface`], in pixel coordinates of the viewport
//! it is given. [`DisplayList`] records those calls for hosts that replay them
//! elsewhere and for tests.

use serde::Serialize;

use crate::color::Rgb;
use crate::constants::{
    ALIEN_SHADE, BANNER_FONT_SIZE, BULLET_HEIGHT, BULLET_WIDTH, HUD_FONT_SIZE, HUD_MARGIN_X,
    HUD_MIN_FONT_SIZE, HUD_SCORE_Y, HUD_WAVE_Y, PIXEL_SIZE, SHIP_SHADE,
};
use crate::sim::{GameStatus, LiveGame, WorldSnapshot};
use crate::stars::Star;
use crate::viewport::Viewport;

mod sprites;

pub use sprites::{ship_design, Sprite, ALIEN_SPRITE, SHIP_DESIGNS};

const TRAIL_MAX_ALPHA: f64 = 0.5;
const TRAIL_RADIUS_FACTOR: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: f64,
}

impl Paint {
    pub const fn solid(color: Rgb) -> Self {
        Self { color, alpha: 1.0 }
    }

    pub const fn translucent(color: Rgb, alpha: f64) -> Self {
        Self { color, alpha }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
}

/// Minimal immediate-mode drawing target. Coordinates are pixels, origin top
/// left; text is positioned by its baseline.
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: Paint);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, align: TextAlign, paint: Paint);
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: Paint,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        paint: Paint,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        align: TextAlign,
        paint: Paint,
    },
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            paint,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: Paint) {
        self.commands.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            paint,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, align: TextAlign, paint: Paint) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            x,
            y,
            size,
            align,
            paint,
        });
    }
}

/// Player cosmetics: ship accent color and hull design.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub color: Rgb,
    pub spaceship_type: u32,
}

impl Theme {
    /// Unparseable colors fall back to the default green.
    pub fn new(color: &str, spaceship_type: u32) -> Self {
        Self {
            color: Rgb::parse_or_default(color),
            spaceship_type,
        }
    }

    fn ship_palette(&self, cell: u8) -> Option<Rgb> {
        match cell {
            1 => Some(self.color),
            2 => Some(self.color.adjust(SHIP_SHADE)),
            3 => Some(Rgb::WHITE),
            _ => None,
        }
    }

    fn alien_palette(&self, cell: u8) -> Option<Rgb> {
        let inverse = self.color.inverse();
        match cell {
            1 => Some(inverse),
            2 => Some(inverse.adjust(ALIEN_SHADE)),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            color: Rgb::DEFAULT_THEME,
            spaceship_type: 0,
        }
    }
}

/// Draws one frame: background, starfield, aliens, bullets, ship, HUD and
/// any status banner, in that order.
pub fn render<S: Surface + ?Sized>(
    game: &LiveGame,
    viewport: &Viewport,
    theme: &Theme,
    surface: &mut S,
) {
    render_world(&game.snapshot(), game.stars(), viewport, theme, surface);
}

/// [`render`] over an already captured snapshot.
pub fn render_world<S: Surface + ?Sized>(
    world: &WorldSnapshot,
    stars: &[Star],
    viewport: &Viewport,
    theme: &Theme,
    surface: &mut S,
) {
    let scale = viewport.scale();

    surface.fill_rect(
        0.0,
        0.0,
        viewport.width,
        viewport.height,
        Paint::solid(Rgb::BLACK),
    );

    for star in stars {
        draw_star(star, viewport, surface);
    }

    for alien in &world.aliens {
        draw_sprite(
            ALIEN_SPRITE,
            viewport.x_to_px(alien.x),
            viewport.y_to_px(alien.y),
            scale,
            true,
            |cell| theme.alien_palette(cell),
            surface,
        );
    }

    let bullet_width = viewport.scaled(BULLET_WIDTH);
    let bullet_height = viewport.scaled(BULLET_HEIGHT);
    for bullet in &world.bullets {
        surface.fill_rect(
            viewport.x_to_px(bullet.x) - bullet_width / 2.0,
            viewport.y_to_px(bullet.y),
            bullet_width,
            bullet_height,
            Paint::solid(theme.color),
        );
    }

    draw_sprite(
        ship_design(theme.spaceship_type),
        viewport.x_to_px(world.ship.x),
        viewport.y_to_px(world.ship.y),
        scale,
        false,
        |cell| theme.ship_palette(cell),
        surface,
    );

    if world.has_first_kill {
        let size = hud_font_size(viewport);
        let x = viewport.scaled(HUD_MARGIN_X);
        let paint = Paint::solid(theme.color);
        surface.fill_text(
            &format!("Score: {}", world.score),
            x,
            viewport.scaled(HUD_SCORE_Y),
            size,
            TextAlign::Left,
            paint,
        );
        if world.show_wave_counter {
            surface.fill_text(
                &format!("Wave: {}", world.wave),
                x,
                viewport.scaled(HUD_WAVE_Y),
                size,
                TextAlign::Left,
                paint,
            );
        }
    }

    let banner = match world.status {
        GameStatus::Running => None,
        GameStatus::Paused => Some("PAUSED"),
        GameStatus::GameOver => Some("GAME OVER"),
    };
    if let Some(text) = banner {
        surface.fill_text(
            text,
            viewport.width / 2.0,
            viewport.height / 2.0,
            viewport.scaled(BANNER_FONT_SIZE).max(HUD_MIN_FONT_SIZE),
            TextAlign::Center,
            Paint::solid(theme.color),
        );
    }
}

#[inline]
pub fn hud_font_size(viewport: &Viewport) -> f64 {
    viewport.scaled(HUD_FONT_SIZE).max(HUD_MIN_FONT_SIZE)
}

fn draw_star<S: Surface + ?Sized>(star: &Star, viewport: &Viewport, surface: &mut S) {
    let steps = star.trail.len() as f64 + 1.0;
    for (i, &(x, y)) in star.trail.iter().enumerate() {
        let alpha = (i as f64 + 1.0) / steps * TRAIL_MAX_ALPHA;
        surface.fill_circle(
            viewport.x_to_px(x),
            viewport.y_to_px(y),
            star.size * TRAIL_RADIUS_FACTOR,
            Paint::translucent(Rgb::WHITE, alpha),
        );
    }
    surface.fill_circle(
        viewport.x_to_px(star.x),
        viewport.y_to_px(star.y),
        star.size,
        Paint::solid(Rgb::WHITE),
    );
}

/// Draws `sprite` horizontally centered on `center_x` with its top row at
/// `top`. Cells are `ceil(pixel)` squares so neighbours overlap instead of
/// leaving seams; `snap` floors each cell origin to whole pixels.
fn draw_sprite<S: Surface + ?Sized>(
    sprite: Sprite,
    center_x: f64,
    top: f64,
    scale: f64,
    snap: bool,
    palette: impl Fn(u8) -> Option<Rgb>,
    surface: &mut S,
) {
    let pixel = PIXEL_SIZE * scale;
    let cell = pixel.ceil();
    let left = center_x - sprites::sprite_width(sprite) as f64 * pixel / 2.0;

    for (row_index, row) in sprite.iter().enumerate() {
        for (col_index, &value) in row.iter().enumerate() {
            let Some(color) = palette(value) else {
                continue;
            };
            let mut x = left + col_index as f64 * pixel;
            let mut y = top + row_index as f64 * pixel;
            if snap {
                x = x.floor();
                y = y.floor();
            }
            surface.fill_rect(x, y, cell, cell, Paint::solid(color));
        }
    }
}
