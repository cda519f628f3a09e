use crate::pilots::{create_pilot, Pilot};
use anyhow::{anyhow, Result};
use galaga_core::sim::host_time_ms;
use galaga_core::{LiveGame, Viewport};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub pilot_id: String,
    pub seed: u32,
    pub viewport: Viewport,
    pub max_frames: u32,
    pub frame_count: u32,
    pub final_score: u32,
    pub final_wave: u32,
    pub game_over: bool,
    pub shots_fired: u32,
    pub waves_cleared: u32,
}

impl RunMetrics {
    /// Kills per shot; zero when nothing was fired.
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            0.0
        } else {
            f64::from(self.final_score) / f64::from(self.shots_fired)
        }
    }
}

pub fn run_pilot(
    pilot_id: &str,
    seed: u32,
    viewport: Viewport,
    max_frames: u32,
) -> Result<RunMetrics> {
    let mut pilot = create_pilot(pilot_id).ok_or_else(|| anyhow!("unknown pilot '{pilot_id}'"))?;
    run_pilot_instance(pilot.as_mut(), seed, viewport, max_frames)
}

/// Plays one session on a 60 Hz host clock until the game ends or
/// `max_frames` simulated frames have elapsed.
pub fn run_pilot_instance(
    pilot: &mut dyn Pilot,
    seed: u32,
    viewport: Viewport,
    max_frames: u32,
) -> Result<RunMetrics> {
    if max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }

    pilot.reset(seed, viewport);

    let mut game = LiveGame::new(seed, viewport);
    let mut snapshot = game.snapshot();
    let mut shots_fired = 0u32;
    let mut waves_cleared = 0u32;
    let mut host_frame = 0u32;

    while snapshot.frame_count < max_frames && !snapshot.is_over() {
        let input = pilot.next_input(&snapshot);
        host_frame += 1;
        let report = game.tick(input, viewport, host_time_ms(host_frame));
        if report.fired {
            shots_fired += 1;
        }
        if report.wave_cleared {
            waves_cleared += 1;
        }
        snapshot = game.snapshot();

        // A pilot that leaves the game paused would spin forever.
        if host_frame > max_frames.saturating_mul(4) {
            return Err(anyhow!(
                "pilot '{}' stalled the session at frame {}",
                pilot.id(),
                snapshot.frame_count
            ));
        }
    }

    let result = game.result();
    Ok(RunMetrics {
        pilot_id: pilot.id().to_string(),
        seed,
        viewport,
        max_frames,
        frame_count: result.frame_count,
        final_score: result.final_score,
        final_wave: result.final_wave,
        game_over: result.game_over,
        shots_fired,
        waves_cleared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_pilot_is_an_error() {
        assert!(run_pilot("ghost", 1, Viewport::REFERENCE, 10).is_err());
    }

    #[test]
    fn zero_frame_budget_is_rejected() {
        assert!(run_pilot("idle", 1, Viewport::REFERENCE, 0).is_err());
    }

    #[test]
    fn idle_run_stops_at_the_frame_budget() -> Result<()> {
        let metrics = run_pilot("idle", 3, Viewport::REFERENCE, 300)?;
        assert_eq!(metrics.frame_count, 300);
        assert_eq!(metrics.final_score, 0);
        assert_eq!(metrics.shots_fired, 0);
        assert!(!metrics.game_over);
        assert_eq!(metrics.accuracy(), 0.0);
        Ok(())
    }

    #[test]
    fn runs_are_deterministic() -> Result<()> {
        let a = run_pilot("sweeper", 0xC0FFEE, Viewport::new(1280.0, 720.0), 1_200)?;
        let b = run_pilot("sweeper", 0xC0FFEE, Viewport::new(1280.0, 720.0), 1_200)?;
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.shots_fired, b.shots_fired);
        assert_eq!(a.frame_count, b.frame_count);
        Ok(())
    }
}
