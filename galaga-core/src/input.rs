//! Host input staged between ticks.
//!
//! Event callbacks only record intent here; the simulation consumes it at the
//! next tick boundary via [`InputStage::take`].

use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

/// Everything the simulation reads from the host for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Latest pointer x as a fraction of the width, if it moved.
    pub pointer_x: Option<f64>,
    pub fire: bool,
    pub toggle_pause: bool,
}

impl FrameInput {
    pub fn aim(x: f64) -> Self {
        Self {
            pointer_x: Some(x),
            ..Self::default()
        }
    }

    pub fn aim_and_fire(x: f64) -> Self {
        Self {
            pointer_x: Some(x),
            fire: true,
            toggle_pause: false,
        }
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    pub fn pause() -> Self {
        Self {
            toggle_pause: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct InputStage {
    pending: FrameInput,
}

impl InputStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer move in pixels, normalized against the viewport at
    /// the time of the event.
    pub fn pointer_moved(&mut self, pixel_x: f64, viewport: &Viewport) {
        self.pending.pointer_x = Some(viewport.px_to_x(pixel_x));
    }

    /// Repeated presses before the next tick collapse into one request.
    pub fn fire_pressed(&mut self) {
        self.pending.fire = true;
    }

    /// Two toggles before the next tick cancel out.
    pub fn pause_toggled(&mut self) {
        self.pending.toggle_pause = !self.pending.toggle_pause;
    }

    pub fn take(&mut self) -> FrameInput {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_pending_intents() {
        let vp = Viewport::new(1000.0, 500.0);
        let mut stage = InputStage::new();
        stage.pointer_moved(250.0, &vp);
        stage.pointer_moved(750.0, &vp);
        stage.fire_pressed();
        stage.fire_pressed();

        let input = stage.take();
        assert_eq!(input.pointer_x, Some(0.75));
        assert!(input.fire);
        assert!(!input.toggle_pause);

        assert_eq!(stage.take(), FrameInput::default());
    }

    #[test]
    fn double_pause_toggle_cancels() {
        let mut stage = InputStage::new();
        stage.pause_toggled();
        stage.pause_toggled();
        assert!(!stage.take().toggle_pause);

        stage.pause_toggled();
        assert!(stage.take().toggle_pause);
    }
}
