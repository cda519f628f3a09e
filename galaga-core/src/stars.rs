//! Cosmetic falling starfield with speed-proportional trails.

use std::collections::VecDeque;

use crate::constants::{
    STAR_COUNT, STAR_MIN_SIZE, STAR_MIN_SPEED, STAR_SIZE_RANGE, STAR_SPEED_RANGE,
    STAR_TRAIL_FACTOR,
};
use crate::rng::SeededRng;
use crate::viewport::Viewport;

#[derive(Clone, Debug)]
pub struct Star {
    /// Normalized position.
    pub x: f64,
    pub y: f64,
    /// Fall speed in pixels per tick.
    pub speed: f64,
    /// Radius in pixels.
    pub size: f64,
    /// Previous positions, oldest first.
    pub trail: VecDeque<(f64, f64)>,
}

impl Star {
    #[inline]
    pub fn max_trail_len(&self) -> usize {
        (self.speed * STAR_TRAIL_FACTOR).floor() as usize
    }
}

#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    rng: SeededRng,
}

impl Starfield {
    pub fn new(seed: u32) -> Self {
        let mut rng = SeededRng::new(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.next_unit(),
                y: rng.next_unit(),
                speed: rng.next_in(STAR_MIN_SPEED, STAR_SPEED_RANGE),
                size: rng.next_in(STAR_MIN_SIZE, STAR_SIZE_RANGE),
                trail: VecDeque::new(),
            })
            .collect();
        Self { stars, rng }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn update(&mut self, viewport: &Viewport) {
        for star in &mut self.stars {
            star.trail.push_back((star.x, star.y));
            let max_len = star.max_trail_len();
            while star.trail.len() > max_len {
                star.trail.pop_front();
            }

            star.y += viewport.px_to_y(star.speed);
            if star.y > 1.0 {
                star.y = 0.0;
                star.x = self.rng.next_unit();
                star.trail.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_has_fixed_count_and_ranges() {
        let field = Starfield::new(99);
        assert_eq!(field.stars().len(), STAR_COUNT);
        for star in field.stars() {
            assert!((0.0..1.0).contains(&star.x));
            assert!((0.0..1.0).contains(&star.y));
            assert!((0.3..1.3).contains(&star.speed));
            assert!((1.0..3.0).contains(&star.size));
            assert!(star.trail.is_empty());
        }
    }

    #[test]
    fn trails_are_bounded_by_speed() {
        let vp = Viewport::new(1920.0, 100_000.0);
        let mut field = Starfield::new(5);
        for _ in 0..20 {
            field.update(&vp);
        }
        for star in field.stars() {
            assert!(star.trail.len() <= star.max_trail_len());
        }
    }

    #[test]
    fn star_wraps_to_top_and_clears_trail() {
        let vp = Viewport::new(100.0, 10.0);
        let mut field = Starfield::new(11);
        field.stars[0].y = 0.999;
        field.stars[0].speed = 1.2;
        field.update(&vp);
        let star = &field.stars()[0];
        assert_eq!(star.y, 0.0);
        assert!(star.trail.is_empty());
    }
}
