//! Pixel-art sprites. Cell values index a palette; 0 is transparent.

use crate::constants::SPACESHIP_DESIGNS;

pub type Sprite = &'static [&'static [u8]];

/// Selected by `spaceship_type % SPACESHIP_DESIGNS`. Every design is 11 cells wide.
pub const SHIP_DESIGNS: [Sprite; SPACESHIP_DESIGNS] = [
    // classic
    &[
        &[0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0],
        &[0, 0, 1, 1, 2, 2, 2, 1, 1, 0, 0],
        &[0, 1, 1, 2, 2, 3, 2, 2, 1, 1, 0],
        &[1, 1, 1, 2, 2, 2, 2, 2, 1, 1, 1],
        &[1, 1, 1, 1, 2, 2, 2, 1, 1, 1, 1],
        &[1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1],
        &[0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        &[0, 0, 1, 1, 0, 0, 0, 1, 1, 0, 0],
        &[0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0],
    ],
    // wide wing
    &[
        &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 2, 3, 2, 1, 0, 0, 0],
        &[1, 1, 1, 2, 2, 2, 2, 2, 1, 1, 1],
        &[1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
        &[1, 2, 2, 1, 1, 1, 1, 1, 2, 2, 1],
        &[1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1],
        &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    ],
    // arrow
    &[
        &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 1, 3, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 2, 2, 2, 1, 0, 0, 0],
        &[0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0],
        &[0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0],
        &[1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
        &[1, 2, 2, 2, 1, 1, 1, 2, 2, 2, 1],
        &[1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1],
        &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    ],
    // heavy
    &[
        &[0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0],
        &[0, 0, 1, 2, 2, 3, 2, 2, 1, 0, 0],
        &[0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0],
        &[1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
        &[1, 2, 2, 1, 2, 2, 2, 1, 2, 2, 1],
        &[1, 2, 1, 0, 1, 2, 1, 0, 1, 2, 1],
        &[1, 1, 0, 0, 1, 2, 1, 0, 0, 1, 1],
        &[0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    ],
    // compact
    &[
        &[0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
        &[0, 0, 0, 1, 2, 3, 2, 1, 0, 0, 0],
        &[0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0],
        &[0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0],
        &[1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
        &[1, 2, 1, 2, 2, 2, 2, 2, 1, 2, 1],
        &[1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1],
    ],
];

pub const ALIEN_SPRITE: Sprite = &[
    &[0, 1, 1, 1, 1, 1, 0],
    &[1, 1, 2, 1, 2, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 2, 1, 1, 1, 2, 1],
    &[0, 1, 0, 0, 0, 1, 0],
];

#[inline]
pub fn ship_design(spaceship_type: u32) -> Sprite {
    SHIP_DESIGNS[spaceship_type as usize % SPACESHIP_DESIGNS]
}

#[inline]
pub(crate) fn sprite_width(sprite: Sprite) -> usize {
    sprite.first().map_or(0, |row| row.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ship_designs_are_eleven_wide() {
        for (i, design) in SHIP_DESIGNS.iter().enumerate() {
            assert!(design.iter().all(|row| row.len() == 11), "design {i}");
            assert!(design.iter().flat_map(|row| row.iter()).all(|&c| c <= 3));
        }
    }

    #[test]
    fn design_selection_wraps() {
        assert_eq!(ship_design(0), ship_design(5));
        assert_eq!(ship_design(3), ship_design(13));
        assert_eq!(ship_design(u32::MAX), SHIP_DESIGNS[u32::MAX as usize % 5]);
    }

    #[test]
    fn alien_sprite_is_seven_by_five() {
        assert_eq!(ALIEN_SPRITE.len(), 5);
        assert_eq!(sprite_width(ALIEN_SPRITE), 7);
    }
}
