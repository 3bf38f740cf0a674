//! Per-frame simulation tick
//!
//! Advances entities, resolves collisions, runs the laser and checks for the
//! end of the session.

use super::collision::{beam_hits, projectile_hits, ship_hits};
use super::entity::ControlScheme;
use super::laser::beam_rect;
use super::state::{GameState, KillCause, Summary};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left pressed or released (keyboard scheme); `None` leaves the ship's
    /// held flag alone
    pub move_left: Option<bool>,
    /// Right pressed or released (keyboard scheme)
    pub move_right: Option<bool>,
    /// Flick velocity (touch scheme)
    pub flick: Option<f32>,
    /// Projectiles to fire, one per press
    pub fire: u32,
    /// Fire the laser (ignored unless ready)
    pub fire_laser: bool,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

impl TickInput {
    /// Drop commands after a tick consumed them; the held state lives on the ship
    pub fn clear_one_shots(&mut self) {
        self.move_left = None;
        self.move_right = None;
        self.flick = None;
        self.fire = 0;
        self.fire_laser = false;
    }
}

/// Whether the session continues after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Continue,
    /// The session is over; stop scheduling ticks
    Finished(Summary),
}

/// Advance the game by one tick at host time `now` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> TickResult {
    if let Some(summary) = state.summary() {
        return TickResult::Finished(summary);
    }

    state.admit_spawns();

    let input = if input.autopilot {
        autopilot_input(state, input)
    } else {
        input.clone()
    };
    apply_input(state, &input, now);

    state.time_ticks += 1;

    // Motion
    let scheme = state.scheme();
    let playfield = state.playfield;
    state.ship.advance(scheme, playfield, &state.tuning);
    state.ship.advance_projectiles(state.tuning.projectile_speed);
    for enemy in &mut state.enemies {
        enemy.advance();
    }
    // Past the bottom edge an enemy can never touch anything again
    state.enemies.retain(|e| e.pos.y < playfield.height);

    resolve_collisions(state, now);

    if !state.is_over() {
        if state.laser.is_active() {
            sweep_beam(state, now);
        }
        if let Some(phase) = state.laser.advance(now) {
            state.note_laser_phase(phase);
        }
    }

    if !state.is_over() {
        state.elapsed_ms = now - state.start_time;
    }

    match state.summary() {
        Some(summary) => TickResult::Finished(summary),
        None => TickResult::Continue,
    }
}

fn apply_input(state: &mut GameState, input: &TickInput, now: f64) {
    match state.scheme() {
        ControlScheme::Keyboard => {
            if let Some(held) = input.move_left {
                state.move_left(held);
            }
            if let Some(held) = input.move_right {
                state.move_right(held);
            }
        }
        ControlScheme::Touch => {
            if let Some(vx) = input.flick {
                state.set_horizontal_velocity(vx);
            }
        }
    }
    for _ in 0..input.fire {
        state.fire_projectile();
    }
    if input.fire_laser {
        state.fire_laser(now);
    }
}

/// Resolve projectile×enemy and ship×enemy collisions for this frame.
///
/// Hits are found against the current collections, then removed in one pass.
/// Stops awarding as soon as the session ends. Returns the number of enemies
/// removed.
pub fn resolve_collisions(state: &mut GameState, now: f64) -> usize {
    let shots = projectile_hits(&state.ship.projectiles, &state.enemies);
    let mut dead = vec![false; state.enemies.len()];
    let mut spent = vec![false; state.ship.projectiles.len()];

    for &(proj_idx, enemy_idx) in &shots.pairs {
        dead[enemy_idx] = true;
        spent[proj_idx] = true;
        let id = state.enemies[enemy_idx].id;
        if state.award_kill(id, KillCause::Projectile, now) {
            break;
        }
    }

    if !state.is_over() {
        for enemy_idx in ship_hits(&state.ship, &state.enemies, &dead) {
            dead[enemy_idx] = true;
            if state.ship_hit(now) {
                break;
            }
        }
    }

    retain_unmarked(&mut state.ship.projectiles, &spent);
    retain_unmarked(&mut state.enemies, &dead)
}

/// Destroy every enemy inside the beam (laser must be active)
pub fn sweep_beam(state: &mut GameState, now: f64) -> usize {
    let beam = beam_rect(&state.ship, state.tuning.beam_width);
    let mut dead = vec![false; state.enemies.len()];
    for enemy_idx in beam_hits(beam, &state.enemies) {
        dead[enemy_idx] = true;
        let id = state.enemies[enemy_idx].id;
        if state.award_kill(id, KillCause::Laser, now) {
            break;
        }
    }
    retain_unmarked(&mut state.enemies, &dead)
}

/// Remove marked items, preserving order; returns how many were removed
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) -> usize {
    let before = items.len();
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marked.get(idx).copied().unwrap_or(false);
        idx += 1;
        keep
    });
    before - items.len()
}

/// Demo mode: chase the lowest enemy, shoot when lined up, laser when ready
fn autopilot_input(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let ship = &state.ship;

    let target = state
        .enemies
        .iter()
        .filter(|e| e.hitbox().bottom() < ship.pos.y)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    input.move_left = Some(false);
    input.move_right = Some(false);
    input.flick = None;
    input.fire = 0;

    if let Some(enemy) = target {
        let dx = (enemy.pos.x + enemy.size.x / 2.0) - ship.center_x();
        let slack = state.tuning.ship_step / 2.0;
        match state.scheme() {
            ControlScheme::Keyboard => {
                input.move_left = Some(dx < -slack);
                input.move_right = Some(dx > slack);
            }
            ControlScheme::Touch => {
                if dx.abs() > ship.size.x / 2.0 && ship.vx == 0.0 {
                    input.flick = Some(state.tuning.flick_speed.copysign(dx));
                }
            }
        }
        let lined_up = dx.abs() < enemy.size.x / 2.0;
        input.fire = u32::from(lined_up && state.time_ticks.is_multiple_of(8));
    }

    input.fire_laser = state.laser.is_ready() && state.enemies.len() >= 3;
    input
}
