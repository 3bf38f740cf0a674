//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can override them from JSON.
//! Motion speeds are pixels per simulation tick; durations are milliseconds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("ship friction must lie in (0, 1) (got {0})")]
    Friction(f32),
    #[error("win score must be at least 1")]
    ZeroWinScore,
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship_width: f32,
    pub ship_height: f32,
    /// Distance per tick while a direction key is held
    pub ship_step: f32,
    /// Velocity multiplier applied each tick in the inertial scheme
    pub ship_friction: f32,
    /// Inertial velocity below this magnitude snaps to zero
    pub drift_epsilon: f32,
    /// Gap between the ship's bottom edge and the playfield bottom
    pub keyboard_bottom_margin: f32,
    pub touch_bottom_margin: f32,
    pub starting_lives: u32,

    pub projectile_speed: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,
    /// Width of the band (centred on the playfield) enemies spawn in
    pub spawn_band: f32,
    pub spawn_interval_ms: f64,

    pub laser_duration_ms: f64,
    pub laser_cooldown_ms: f64,
    pub beam_width: f32,

    pub win_score: u32,
    /// Velocity given to the ship by a horizontal flick
    pub flick_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_width: 50.0,
            ship_height: 50.0,
            ship_step: 15.0,
            ship_friction: 0.9,
            drift_epsilon: 0.01,
            keyboard_bottom_margin: 80.0,
            touch_bottom_margin: 120.0,
            starting_lives: 3,

            projectile_speed: 7.0,

            enemy_width: 50.0,
            enemy_height: 50.0,
            enemy_speed: 4.0,
            spawn_band: 400.0,
            spawn_interval_ms: 1000.0,

            laser_duration_ms: 5000.0,
            laser_cooldown_ms: 10000.0,
            beam_width: 10.0,

            win_score: 50,
            flick_speed: 20.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning override: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive: [(&'static str, f64); 14] = [
            ("ship_width", self.ship_width as f64),
            ("ship_height", self.ship_height as f64),
            ("ship_step", self.ship_step as f64),
            ("projectile_speed", self.projectile_speed as f64),
            ("enemy_width", self.enemy_width as f64),
            ("enemy_height", self.enemy_height as f64),
            ("enemy_speed", self.enemy_speed as f64),
            ("spawn_band", self.spawn_band as f64),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("laser_duration_ms", self.laser_duration_ms),
            ("laser_cooldown_ms", self.laser_cooldown_ms),
            ("beam_width", self.beam_width as f64),
            ("flick_speed", self.flick_speed as f64),
            ("starting_lives", self.starting_lives as f64),
        ];
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(TuningError::NotPositive { field, value });
        }
        if !(self.ship_friction > 0.0 && self.ship_friction < 1.0) {
            return Err(TuningError::Friction(self.ship_friction));
        }
        if self.win_score == 0 {
            return Err(TuningError::ZeroWinScore);
        }
        Ok(())
    }
}
