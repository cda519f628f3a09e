//! Galaga-style arcade core: wave layouts, motion and collisions, starfield
//! and a host-agnostic render pass, all in normalized coordinates.

pub mod color;
pub mod constants;
pub mod entities;
pub mod error;
pub mod input;
pub mod render;
pub mod rng;
pub mod sim;
pub mod stars;
pub mod viewport;
pub mod wave;

pub use color::Rgb;
pub use error::ColorError;
pub use input::{FrameInput, InputStage};
pub use render::{render, DisplayList, Surface, Theme};
pub use sim::{replay, GameStatus, LiveGame, ReplayResult, TickReport, WorldSnapshot};
pub use viewport::Viewport;
