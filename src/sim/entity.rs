//! Ship, projectile and enemy entities
//!
//! Screen coordinates: origin at the playfield's top-left, y grows downward.
//! Entities are passive; the tick decides when they move and die.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Zero-size rectangle at a point
    pub fn point(p: Vec2) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// How the ship is steered for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Held left/right flags move the ship a fixed step per tick
    Keyboard,
    /// Flicks set a horizontal velocity that decays by friction
    Touch,
}

impl ControlScheme {
    /// Gap between the ship and the playfield bottom (leaves room for the gauge)
    pub fn bottom_margin(self, tuning: &Tuning) -> f32 {
        match self {
            ControlScheme::Keyboard => tuning.keyboard_bottom_margin,
            ControlScheme::Touch => tuning.touch_bottom_margin,
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn advance(&mut self, speed: f32) {
        self.pos.y -= speed;
    }

    /// Still inside the playfield (exits through the top edge)
    pub fn in_play(&self) -> bool {
        self.pos.y > 0.0
    }

    /// Projectiles collide as points
    pub fn hitbox(&self) -> Rect {
        Rect::point(self.pos)
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(tuning.enemy_width, tuning.enemy_height),
            speed: tuning.enemy_speed,
        }
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity (inertial scheme only)
    pub vx: f32,
    pub lives: u32,
    pub move_left: bool,
    pub move_right: bool,
    /// Active projectiles, oldest first
    pub projectiles: Vec<Projectile>,
}

impl Ship {
    /// Ship centred horizontally, resting above the bottom margin
    pub fn new(playfield: Playfield, scheme: ControlScheme, tuning: &Tuning) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(tuning.ship_width, tuning.ship_height),
            vx: 0.0,
            lives: tuning.starting_lives,
            move_left: false,
            move_right: false,
            projectiles: Vec::new(),
        };
        ship.recenter(playfield, scheme, tuning);
        ship
    }

    /// Re-centre after a playfield resize
    pub fn recenter(&mut self, playfield: Playfield, scheme: ControlScheme, tuning: &Tuning) {
        self.pos.x = playfield.width / 2.0 - self.size.x / 2.0;
        self.pos.y = playfield.height - self.size.y - scheme.bottom_margin(tuning);
    }

    #[inline]
    pub fn max_x(&self, playfield: Playfield) -> f32 {
        (playfield.width - self.size.x).max(0.0)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Move one tick under the session's control scheme, then clamp
    pub fn advance(&mut self, scheme: ControlScheme, playfield: Playfield, tuning: &Tuning) {
        let max_x = self.max_x(playfield);
        match scheme {
            ControlScheme::Keyboard => {
                if self.move_left {
                    self.pos.x -= tuning.ship_step;
                }
                if self.move_right {
                    self.pos.x += tuning.ship_step;
                }
                self.pos.x = self.pos.x.clamp(0.0, max_x);
            }
            ControlScheme::Touch => {
                self.pos.x += self.vx;
                self.vx *= tuning.ship_friction;
                if self.vx.abs() < tuning.drift_epsilon {
                    self.vx = 0.0;
                }
                if self.pos.x < 0.0 {
                    self.pos.x = 0.0;
                    self.vx = 0.0;
                }
                if self.pos.x > max_x {
                    self.pos.x = max_x;
                    self.vx = 0.0;
                }
            }
        }
    }

    /// Spawn a projectile at the ship's nose
    pub fn fire(&mut self) {
        self.projectiles
            .push(Projectile::new(Vec2::new(self.center_x(), self.pos.y)));
    }

    /// Move projectiles and drop those that left through the top
    pub fn advance_projectiles(&mut self, speed: f32) {
        for projectile in &mut self.projectiles {
            projectile.advance(speed);
        }
        self.projectiles.retain(Projectile::in_play);
    }
}
