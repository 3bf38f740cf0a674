//! Laser special attack: Ready → Active → Cooldown → Ready
//!
//! Timing is wall-clock (milliseconds from the host clock), so the laser lasts
//! the same real time regardless of frame rate.

use serde::{Deserialize, Serialize};

use super::entity::{Rect, Ship};

/// Laser phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserPhase {
    Ready,
    Active,
    Cooldown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub phase: LaserPhase,
    /// Time the current phase began (ms); meaningless while Ready
    pub phase_start: f64,
    pub duration_ms: f64,
    pub cooldown_ms: f64,
}

impl Laser {
    pub fn new(duration_ms: f64, cooldown_ms: f64) -> Self {
        Self {
            phase: LaserPhase::Ready,
            phase_start: 0.0,
            duration_ms,
            cooldown_ms,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.phase == LaserPhase::Ready
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == LaserPhase::Active
    }

    /// Start firing. Returns false (and changes nothing) unless Ready.
    pub fn fire(&mut self, now: f64) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.phase = LaserPhase::Active;
        self.phase_start = now;
        true
    }

    /// Evaluate timed transitions; returns the new phase if one happened
    pub fn advance(&mut self, now: f64) -> Option<LaserPhase> {
        let elapsed = now - self.phase_start;
        match self.phase {
            LaserPhase::Active if elapsed >= self.duration_ms => {
                self.phase = LaserPhase::Cooldown;
                self.phase_start = now;
                Some(LaserPhase::Cooldown)
            }
            LaserPhase::Cooldown if elapsed >= self.cooldown_ms => {
                self.phase = LaserPhase::Ready;
                Some(LaserPhase::Ready)
            }
            _ => None,
        }
    }

    /// Gauge fill in [0, 1]: empty while firing, full when ready
    pub fn gauge(&self, now: f64) -> f32 {
        match self.phase {
            LaserPhase::Ready => 1.0,
            LaserPhase::Active => 0.0,
            LaserPhase::Cooldown => {
                ((now - self.phase_start) / self.cooldown_ms).clamp(0.0, 1.0) as f32
            }
        }
    }
}

/// Damage region of the beam: a vertical strip from the top of the
/// playfield down to the ship's top edge, centred on the ship
pub fn beam_rect(ship: &Ship, beam_width: f32) -> Rect {
    Rect::new(
        ship.center_x() - beam_width / 2.0,
        0.0,
        beam_width,
        ship.pos.y.max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laser() -> Laser {
        Laser::new(5000.0, 10000.0)
    }

    #[test]
    fn test_full_cycle() {
        let mut laser = laser();
        let t0 = 1234.0;
        assert!(laser.fire(t0));
        assert_eq!(laser.phase, LaserPhase::Active);

        assert_eq!(laser.advance(t0 + 4999.0), None);
        assert_eq!(laser.advance(t0 + 5000.0), Some(LaserPhase::Cooldown));
        assert_eq!(laser.phase_start, t0 + 5000.0);

        assert_eq!(laser.advance(t0 + 14_999.0), None);
        assert_eq!(laser.advance(t0 + 15_000.0), Some(LaserPhase::Ready));
        assert!(laser.is_ready());
    }

    #[test]
    fn test_fire_rejected_unless_ready() {
        let mut laser = laser();
        assert!(laser.fire(0.0));
        assert!(!laser.fire(100.0));
        assert_eq!(laser.phase_start, 0.0);

        laser.advance(5000.0);
        assert!(!laser.fire(6000.0));
        assert_eq!(laser.phase, LaserPhase::Cooldown);
        assert_eq!(laser.phase_start, 5000.0);
    }

    #[test]
    fn test_gauge() {
        let mut laser = laser();
        assert_eq!(laser.gauge(0.0), 1.0);
        laser.fire(0.0);
        assert_eq!(laser.gauge(2500.0), 0.0);
        laser.advance(5000.0);
        assert_eq!(laser.gauge(5000.0), 0.0);
        assert!((laser.gauge(10_000.0) - 0.5).abs() < 1e-6);
        // Clamped if a frame lands late
        laser.phase_start = 0.0;
        assert_eq!(laser.gauge(50_000.0), 1.0);
    }
}
