//! Game state and session-level bookkeeping
//!
//! One `GameState` is one play session. Restarting means building a new one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{ControlScheme, Enemy, Playfield, Ship};
use super::laser::{Laser, LaserPhase};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Score reached the win threshold
    Won,
    /// Ship ran out of lives
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Playing
    }
}

/// What destroyed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    Projectile,
    Laser,
}

/// Notable things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    EnemyDestroyed { id: u32, cause: KillCause },
    ShipHit { lives_left: u32 },
    ProjectileFired,
    LaserFired,
    LaserPhaseChanged { phase: LaserPhase },
    Won { score: u32, clear_time_secs: u64 },
    Lost { score: u32 },
}

/// Final result of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub outcome: GamePhase,
    pub score: u32,
    /// Whole seconds from session start to the terminal tick
    pub clear_time_secs: u64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub playfield: Playfield,
    /// Fixed for the lifetime of the session
    scheme: ControlScheme,
    pub ship: Ship,
    /// Live enemies (membership only; order carries no meaning)
    pub enemies: Vec<Enemy>,
    /// Spawned since the last tick; admitted at the start of the next one
    pub pending_spawns: Vec<Enemy>,
    pub laser: Laser,
    pub score: u32,
    pub phase: GamePhase,
    /// Host clock reading when the session began (ms)
    pub start_time: f64,
    /// Host clock minus `start_time` as of the last tick (ms)
    pub elapsed_ms: f64,
    /// Set when the session ends
    pub clear_time_secs: Option<u64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        playfield: Playfield,
        scheme: ControlScheme,
        now: f64,
    ) -> Self {
        let ship = Ship::new(playfield, scheme, &tuning);
        let laser = Laser::new(tuning.laser_duration_ms, tuning.laser_cooldown_ms);
        Self {
            seed,
            tuning,
            playfield,
            scheme,
            ship,
            enemies: Vec::new(),
            pending_spawns: Vec::new(),
            laser,
            score: 0,
            phase: GamePhase::Playing,
            start_time: now,
            elapsed_ms: 0.0,
            clear_time_secs: None,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn lives(&self) -> u32 {
        self.ship.lives
    }

    /// Whole seconds since the session began
    pub fn elapsed_secs(&self) -> u64 {
        (self.elapsed_ms.max(0.0) / 1000.0).floor() as u64
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a new enemy just above the top edge, at a random x within the
    /// spawn band centred on the playfield
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let band = self.tuning.spawn_band;
        let x = if band > 0.0 {
            let offset: f32 = self.rng.random_range(0.0..band);
            self.playfield.width / 2.0 - band / 2.0 + offset
        } else {
            (self.playfield.width - self.tuning.enemy_width) / 2.0
        };
        let y = -self.tuning.enemy_height;
        self.pending_spawns
            .push(Enemy::new(id, Vec2::new(x, y), &self.tuning));
        self.events.push(GameEvent::EnemySpawned { id });
        log::debug!("Spawned enemy {} at x={:.1}", id, x);
        id
    }

    /// Move queued spawns into the live set
    pub fn admit_spawns(&mut self) {
        self.enemies.append(&mut self.pending_spawns);
    }

    /// Held-left flag (keyboard scheme only)
    pub fn move_left(&mut self, held: bool) {
        if self.scheme == ControlScheme::Keyboard {
            self.ship.move_left = held;
        }
    }

    /// Held-right flag (keyboard scheme only)
    pub fn move_right(&mut self, held: bool) {
        if self.scheme == ControlScheme::Keyboard {
            self.ship.move_right = held;
        }
    }

    /// Flick velocity (touch scheme only); non-finite values are dropped
    pub fn set_horizontal_velocity(&mut self, vx: f32) {
        if self.scheme == ControlScheme::Touch && vx.is_finite() {
            self.ship.vx = vx;
        }
    }

    pub fn fire_projectile(&mut self) {
        if self.is_over() {
            return;
        }
        self.ship.fire();
        self.events.push(GameEvent::ProjectileFired);
    }

    /// Fire the laser. Silently ignored unless it is Ready.
    pub fn fire_laser(&mut self, now: f64) -> bool {
        if self.is_over() || !self.laser.fire(now) {
            return false;
        }
        self.events.push(GameEvent::LaserFired);
        log::info!("Laser fired at {:.0} ms", now - self.start_time);
        true
    }

    /// Apply a new playfield size; the ship is re-centred
    pub fn resize(&mut self, playfield: Playfield) {
        self.playfield = playfield;
        self.ship.recenter(playfield, self.scheme, &self.tuning);
    }

    /// Count one destroyed enemy. Returns true if this kill won the game.
    pub fn award_kill(&mut self, id: u32, cause: KillCause, now: f64) -> bool {
        self.score += 1;
        self.events.push(GameEvent::EnemyDestroyed { id, cause });
        if self.score >= self.tuning.win_score {
            self.finish(GamePhase::Won, now);
            return true;
        }
        false
    }

    /// The ship rammed an enemy. Returns true if that was the last life.
    pub fn ship_hit(&mut self, now: f64) -> bool {
        self.ship.lives = self.ship.lives.saturating_sub(1);
        self.events.push(GameEvent::ShipHit {
            lives_left: self.ship.lives,
        });
        log::debug!("Ship hit, {} lives left", self.ship.lives);
        if self.ship.lives == 0 {
            self.finish(GamePhase::Lost, now);
            return true;
        }
        false
    }

    /// Record a laser transition
    pub fn note_laser_phase(&mut self, phase: LaserPhase) {
        log::debug!("Laser -> {:?}", phase);
        self.events.push(GameEvent::LaserPhaseChanged { phase });
    }

    fn finish(&mut self, outcome: GamePhase, now: f64) {
        if self.is_over() {
            return;
        }
        self.phase = outcome;
        self.elapsed_ms = now - self.start_time;
        let clear_time_secs = self.elapsed_secs();
        self.clear_time_secs = Some(clear_time_secs);
        match outcome {
            GamePhase::Won => {
                log::info!(
                    "Game won! Score: {}, clear time: {}s",
                    self.score,
                    clear_time_secs
                );
                self.events.push(GameEvent::Won {
                    score: self.score,
                    clear_time_secs,
                });
            }
            GamePhase::Lost => {
                log::info!("Game over, score {}", self.score);
                self.events.push(GameEvent::Lost { score: self.score });
            }
            GamePhase::Playing => {}
        }
    }

    /// Final summary once the session has ended
    pub fn summary(&self) -> Option<Summary> {
        if !self.is_over() {
            return None;
        }
        Some(Summary {
            outcome: self.phase,
            score: self.score,
            clear_time_secs: self.clear_time_secs.unwrap_or_else(|| self.elapsed_secs()),
        })
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(scheme: ControlScheme) -> GameState {
        GameState::new(
            7,
            Tuning::default(),
            Playfield::new(800.0, 600.0),
            scheme,
            1000.0,
        )
    }

    #[test]
    fn test_spawns_are_queued_in_band() {
        let mut state = state(ControlScheme::Keyboard);
        for _ in 0..50 {
            state.spawn_enemy();
        }
        assert!(state.enemies.is_empty());
        assert_eq!(state.pending_spawns.len(), 50);
        for enemy in &state.pending_spawns {
            assert!(enemy.pos.x >= 200.0 && enemy.pos.x < 600.0);
            assert_eq!(enemy.pos.y, -50.0);
        }

        state.admit_spawns();
        assert_eq!(state.enemies.len(), 50);
        assert!(state.pending_spawns.is_empty());
    }

    #[test]
    fn test_spawn_positions_follow_seed() {
        let mut a = state(ControlScheme::Keyboard);
        let mut b = state(ControlScheme::Keyboard);
        a.spawn_enemy();
        b.spawn_enemy();
        assert_eq!(a.pending_spawns[0].pos, b.pending_spawns[0].pos);
    }

    #[test]
    fn test_zero_spawn_band_spawns_centred() {
        let tuning = Tuning {
            spawn_band: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(
            7,
            tuning,
            Playfield::new(800.0, 600.0),
            ControlScheme::Keyboard,
            0.0,
        );
        state.spawn_enemy();
        assert_eq!(state.pending_spawns[0].pos.x, 375.0);
    }

    #[test]
    fn test_non_finite_velocity_is_dropped() {
        let mut touch = state(ControlScheme::Touch);
        touch.set_horizontal_velocity(12.0);
        touch.set_horizontal_velocity(f32::NAN);
        touch.set_horizontal_velocity(f32::INFINITY);
        assert_eq!(touch.ship.vx, 12.0);
    }

    #[test]
    fn test_commands_respect_scheme() {
        let mut keyboard = state(ControlScheme::Keyboard);
        keyboard.set_horizontal_velocity(20.0);
        keyboard.move_left(true);
        assert_eq!(keyboard.ship.vx, 0.0);
        assert!(keyboard.ship.move_left);

        let mut touch = state(ControlScheme::Touch);
        touch.move_right(true);
        touch.set_horizontal_velocity(-20.0);
        assert!(!touch.ship.move_right);
        assert_eq!(touch.ship.vx, -20.0);
    }

    #[test]
    fn test_win_at_threshold() {
        let mut state = state(ControlScheme::Keyboard);
        state.score = 49;
        assert!(state.award_kill(1, KillCause::Projectile, 4500.0));
        assert_eq!(state.phase, GamePhase::Won);
        let summary = state.summary().unwrap();
        assert_eq!(summary.score, 50);
        assert_eq!(summary.clear_time_secs, 3);
    }

    #[test]
    fn test_lose_on_last_life() {
        let mut state = state(ControlScheme::Touch);
        state.ship.lives = 1;
        assert!(state.ship_hit(2000.0));
        assert_eq!(state.phase, GamePhase::Lost);
        assert!(state.drain_events().contains(&GameEvent::Lost { score: 0 }));
    }

    #[test]
    fn test_fire_laser_twice() {
        let mut state = state(ControlScheme::Keyboard);
        assert!(state.fire_laser(1500.0));
        assert!(!state.fire_laser(1600.0));
        assert_eq!(state.laser.phase_start, 1500.0);
    }

    #[test]
    fn test_resize_recentres_ship() {
        let mut state = state(ControlScheme::Keyboard);
        state.resize(Playfield::new(400.0, 300.0));
        assert_eq!(state.ship.pos, Vec2::new(175.0, 170.0));
    }
}
