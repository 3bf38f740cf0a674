//! Per-frame snapshot for the presentation layer
//!
//! The simulation never draws. Each frame the session captures a
//! `FrameSnapshot` and hands it to a `Presenter`.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GameEvent, GamePhase, GameState, Rect, beam_rect};

pub use crate::sim::Summary;

/// Receives frames from a running session
pub trait Presenter {
    /// Called once per host frame with the latest state
    fn present(&mut self, frame: &FrameSnapshot);

    /// Called exactly once when the session ends
    fn finish(&mut self, summary: &Summary);
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub ship: Rect,
    pub projectiles: Vec<Vec2>,
    pub enemies: Vec<Rect>,
    /// Beam geometry while the laser is firing
    pub beam: Option<Rect>,
    /// Cooldown gauge fill in [0, 1]
    pub gauge: f32,
    pub laser_ready: bool,
    pub score: u32,
    pub lives: u32,
    pub elapsed_secs: u64,
    pub phase: GamePhase,
    pub summary: Option<Summary>,
    /// Events since the previous frame
    pub events: Vec<GameEvent>,
}

impl FrameSnapshot {
    /// Capture the state at host time `now` (ms), taking pending events
    pub fn capture(state: &mut GameState, now: f64) -> Self {
        let events = state.drain_events();
        let beam = state
            .laser
            .is_active()
            .then(|| beam_rect(&state.ship, state.tuning.beam_width));
        Self {
            ship: state.ship.hitbox(),
            projectiles: state.ship.projectiles.iter().map(|p| p.pos).collect(),
            enemies: state.enemies.iter().map(|e| e.hitbox()).collect(),
            beam,
            gauge: state.laser.gauge(now),
            laser_ready: state.laser.is_ready(),
            score: state.score,
            lives: state.lives(),
            elapsed_secs: state.elapsed_secs(),
            phase: state.phase,
            summary: state.summary(),
            events,
        }
    }

    /// JSON form for hosts that render outside Rust
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
