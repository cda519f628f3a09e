//! Wave Generator: deterministic formation layouts per wave number.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ALIEN_ROW_SPACING, ALIEN_SPACING, ALIEN_START_Y, ALIEN_VERTICAL_SPEED, FORMATION_PATTERNS,
    WAVE_SPEED_GROWTH, X_FORMATION_ARM_LEN, X_FORMATION_OFFSET, X_FORMATION_SPACING,
};
use crate::entities::{Alien, Direction};
use crate::viewport::Viewport;

/// The seven base layouts, cycled with period [`FORMATION_PATTERNS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formation {
    /// Rows of 5, 5.
    Block,
    /// Rows of 6, 5, 6.
    Staggered,
    /// Rows of 1 through 6.
    AscendingTriangle,
    /// Rows of 7, 6, 7.
    WideStaggered,
    /// Rows of 6, 8, 8, 6.
    Diamond,
    /// Rows of 6 down to 1.
    DescendingTriangle,
    /// Two diagonal X groups laid out by offset math, 22 units.
    TwinX,
}

impl Formation {
    pub const ALL: [Formation; FORMATION_PATTERNS as usize] = [
        Formation::Block,
        Formation::Staggered,
        Formation::AscendingTriangle,
        Formation::WideStaggered,
        Formation::Diamond,
        Formation::DescendingTriangle,
        Formation::TwinX,
    ];

    /// 1-based pattern index for a wave: `((wave - 1) mod 7) + 1`.
    #[inline]
    pub fn pattern_index(wave: u32) -> u32 {
        (wave.max(1) - 1) % FORMATION_PATTERNS + 1
    }

    pub fn for_wave(wave: u32) -> Self {
        Self::ALL[(Self::pattern_index(wave) - 1) as usize]
    }

    /// Row widths for grid formations; `None` for the diagonal layout.
    pub fn rows(self) -> Option<&'static [usize]> {
        match self {
            Self::Block => Some(&[5, 5]),
            Self::Staggered => Some(&[6, 5, 6]),
            Self::AscendingTriangle => Some(&[1, 2, 3, 4, 5, 6]),
            Self::WideStaggered => Some(&[7, 6, 7]),
            Self::Diamond => Some(&[6, 8, 8, 6]),
            Self::DescendingTriangle => Some(&[6, 5, 4, 3, 2, 1]),
            Self::TwinX => None,
        }
    }

    pub fn unit_count(self) -> usize {
        match self.rows() {
            Some(rows) => rows.iter().sum(),
            // apex + two arms, per X
            None => 2 * (1 + 2 * X_FORMATION_ARM_LEN),
        }
    }
}

/// Descent speed for a wave in reference pixels per tick; grows 10% per wave.
#[inline]
pub fn vertical_speed_for_wave(wave: u32) -> f64 {
    ALIEN_VERTICAL_SPEED * WAVE_SPEED_GROWTH.powf(f64::from(wave.max(1) - 1))
}

/// Odd waves open moving right, even waves moving left.
#[inline]
pub fn initial_direction(wave: u32) -> Direction {
    if wave % 2 == 1 {
        Direction::Right
    } else {
        Direction::Left
    }
}

#[derive(Clone, Debug)]
pub struct WaveSpawn {
    pub wave: u32,
    pub formation: Formation,
    pub vertical_speed: f64,
    pub direction: Direction,
    pub aliens: Vec<Alien>,
}

/// Lays out the formation for `wave` against the current viewport.
pub fn generate(wave: u32, viewport: &Viewport) -> WaveSpawn {
    let formation = Formation::for_wave(wave);
    let mut aliens = Vec::with_capacity(formation.unit_count());
    let start_y = viewport.norm_y(ALIEN_START_Y);

    match formation.rows() {
        Some(rows) => {
            let spacing = viewport.norm_x(ALIEN_SPACING);
            let row_spacing = viewport.norm_y(ALIEN_ROW_SPACING);
            for (row, &cols) in rows.iter().enumerate() {
                let left = 0.5 - (cols as f64 * spacing) / 2.0;
                let y = start_y + row as f64 * row_spacing;
                for col in 0..cols {
                    aliens.push(Alien::new(left + col as f64 * spacing, y));
                }
            }
        }
        None => push_twin_x(&mut aliens, viewport, start_y),
    }

    WaveSpawn {
        wave,
        formation,
        vertical_speed: vertical_speed_for_wave(wave),
        direction: initial_direction(wave),
        aliens,
    }
}

/// Each X is an apex unit with two diagonal arms fanning down-left and
/// down-right. The arms start one step below the apex so no two units share a
/// cell, and the groups sit symmetrically either side of center so their arms
/// never meet.
fn push_twin_x(aliens: &mut Vec<Alien>, viewport: &Viewport, start_y: f64) {
    let step_x = viewport.norm_x(X_FORMATION_SPACING);
    let step_y = viewport.norm_y(X_FORMATION_SPACING);
    let offset = viewport.norm_x(X_FORMATION_OFFSET);

    for center_x in [0.5 - offset, 0.5 + offset] {
        aliens.push(Alien::new(center_x, start_y));
        for i in 1..=X_FORMATION_ARM_LEN {
            let y = start_y + i as f64 * step_y;
            aliens.push(Alien::new(center_x - i as f64 * step_x, y));
            aliens.push(Alien::new(center_x + i as f64 * step_x, y));
        }
    }
}
