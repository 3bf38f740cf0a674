//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One tick per call, advanced by the host
//! - Wall-clock time passed in, never read
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod laser;
pub mod state;
pub mod tick;

pub use collision::{beam_hits, overlaps, projectile_hits, ship_hits};
pub use entity::{ControlScheme, Enemy, Playfield, Projectile, Rect, Ship};
pub use laser::{Laser, LaserPhase, beam_rect};
pub use state::{GameEvent, GamePhase, GameState, KillCause, Summary};
pub use tick::{TickInput, TickResult, resolve_collisions, sweep_beam, tick};
