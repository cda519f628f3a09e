use galaga_core::constants::{ALIEN_HORIZONTAL_SPEED, BULLET_SPEED};
use galaga_core::sim::{AlienSnapshot, WorldSnapshot};
use galaga_core::{FrameInput, Viewport};

pub trait Pilot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, seed: u32, viewport: Viewport);
    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput;
}

const PILOT_IDS: [&str; 3] = ["idle", "sweeper", "spray"];

pub fn pilot_ids() -> &'static [&'static str] {
    &PILOT_IDS
}

pub fn create_pilot(id: &str) -> Option<Box<dyn Pilot + Send>> {
    match id {
        "idle" => Some(Box::new(IdlePilot)),
        "sweeper" => Some(Box::new(SweeperPilot::default())),
        "spray" => Some(Box::new(SprayPilot::default())),
        _ => None,
    }
}

pub fn describe_pilots() -> Vec<(&'static str, &'static str)> {
    PILOT_IDS
        .iter()
        .filter_map(|id| create_pilot(id))
        .map(|pilot| (pilot.id(), pilot.description()))
        .collect()
}

struct IdlePilot;

impl Pilot for IdlePilot {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "Never moves or fires; measures how long a wave takes to breach"
    }

    fn reset(&mut self, _seed: u32, _viewport: Viewport) {}

    fn next_input(&mut self, _world: &WorldSnapshot) -> FrameInput {
        FrameInput::default()
    }
}

/// Chases the lowest alien, leading it by the bullet's flight time.
struct SweeperPilot {
    viewport: Viewport,
}

impl Default for SweeperPilot {
    fn default() -> Self {
        Self {
            viewport: Viewport::REFERENCE,
        }
    }
}

impl SweeperPilot {
    fn lead(&self, world: &WorldSnapshot, target: &AlienSnapshot) -> f64 {
        let vp = &self.viewport;
        let closing = vp.norm_y(BULLET_SPEED) + vp.norm_y(world.vertical_speed);
        let flight = ((world.ship.y - target.y) / closing).max(0.0);
        let drift = world.direction.sign() * vp.norm_x(ALIEN_HORIZONTAL_SPEED) * flight;
        (target.x + drift).clamp(0.0, 1.0)
    }
}

impl Pilot for SweeperPilot {
    fn id(&self) -> &'static str {
        "sweeper"
    }

    fn description(&self) -> &'static str {
        "Tracks the lowest alien with lead and fires once lined up"
    }

    fn reset(&mut self, _seed: u32, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput {
        let Some(target) = world.aliens.iter().max_by(|a, b| a.y.total_cmp(&b.y)) else {
            return FrameInput::default();
        };
        let aim = self.lead(world, target);
        // Hold fire while the ship is still catching up to the lead point.
        if (aim - world.ship.x).abs() <= target.half_width {
            FrameInput::aim_and_fire(aim)
        } else {
            FrameInput::aim(aim)
        }
    }
}

/// Triangle-wave sweep across the screen with the trigger held down.
#[derive(Default)]
struct SprayPilot {
    phase: u32,
}

const SPRAY_PERIOD_FRAMES: u32 = 240;

impl Pilot for SprayPilot {
    fn id(&self) -> &'static str {
        "spray"
    }

    fn description(&self) -> &'static str {
        "Sweeps the pointer edge to edge, firing every frame"
    }

    fn reset(&mut self, seed: u32, _viewport: Viewport) {
        self.phase = seed % SPRAY_PERIOD_FRAMES;
    }

    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput {
        let t = (world.frame_count + self.phase) % SPRAY_PERIOD_FRAMES;
        let half = SPRAY_PERIOD_FRAMES / 2;
        let x = if t < half {
            f64::from(t) / f64::from(half)
        } else {
            f64::from(SPRAY_PERIOD_FRAMES - t) / f64::from(half)
        };
        FrameInput::aim_and_fire(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaga_core::LiveGame;

    #[test]
    fn every_listed_pilot_can_be_created() {
        for id in pilot_ids() {
            let pilot = create_pilot(id).expect("listed pilot must exist");
            assert_eq!(pilot.id(), *id);
        }
        assert!(create_pilot("nope").is_none());
        assert_eq!(describe_pilots().len(), pilot_ids().len());
    }

    #[test]
    fn idle_pilot_never_touches_the_controls() {
        let game = LiveGame::new(1, Viewport::REFERENCE);
        let mut pilot = create_pilot("idle").expect("idle");
        pilot.reset(1, Viewport::REFERENCE);
        assert_eq!(pilot.next_input(&game.snapshot()), FrameInput::default());
    }

    #[test]
    fn sweeper_aims_inside_the_screen() {
        let game = LiveGame::new(7, Viewport::REFERENCE);
        let mut pilot = create_pilot("sweeper").expect("sweeper");
        pilot.reset(7, Viewport::REFERENCE);
        let input = pilot.next_input(&game.snapshot());
        let x = input.pointer_x.expect("sweeper always aims while aliens remain");
        assert!((0.0..=1.0).contains(&x));
        assert!(!input.toggle_pause);
    }

    #[test]
    fn spray_sweeps_edge_to_edge() {
        let mut game = LiveGame::new(0, Viewport::REFERENCE);
        let mut pilot = create_pilot("spray").expect("spray");
        pilot.reset(0, Viewport::REFERENCE);

        let mut xs = Vec::new();
        for frame in 1..=SPRAY_PERIOD_FRAMES {
            let snapshot = game.snapshot();
            let input = pilot.next_input(&snapshot);
            assert!(input.fire);
            xs.push(input.pointer_x.expect("spray always aims"));
            game.tick(input, Viewport::REFERENCE, galaga_core::sim::host_time_ms(frame));
        }
        assert_eq!(xs[0], 0.0);
        assert!(xs.iter().any(|x| *x == 1.0));
    }
}
