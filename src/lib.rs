//! Shooting Game - A vertical arcade shooter with a laser special attack
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, laser, collisions, game state)
//! - `session`: Host-side frame driver (fixed-step accumulator, spawn timer hook)
//! - `view`: Per-frame snapshot handed to the presentation layer
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser/native capability detection
//! - `renderer`: Canvas 2D presenter (wasm32 only)

pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod view;

pub use session::Session;
pub use tuning::{Tuning, TuningError};
pub use view::{FrameSnapshot, Presenter, Summary};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Motion speeds in `Tuning` are per tick at this rate.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta the host will feed the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
