use glam::Vec2;
use proptest::prelude::*;

use shooting_game::Tuning;
use shooting_game::sim::{
    ControlScheme, Enemy, GameEvent, GameState, LaserPhase, Playfield, Projectile, TickInput,
    TickResult, tick,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn new_state(scheme: ControlScheme, seed: u64) -> GameState {
    GameState::new(
        seed,
        Tuning::default(),
        Playfield::new(800.0, 600.0),
        scheme,
        0.0,
    )
}

#[derive(Debug, Clone)]
enum Command {
    Left(bool),
    Right(bool),
    Flick(f32),
    Fire,
    Laser,
    Spawn,
    Idle,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        any::<bool>().prop_map(Command::Left),
        any::<bool>().prop_map(Command::Right),
        (-60.0f32..60.0).prop_map(Command::Flick),
        Just(Command::Fire),
        Just(Command::Laser),
        Just(Command::Spawn),
        Just(Command::Idle),
    ]
}

fn scheme() -> impl Strategy<Value = ControlScheme> {
    prop_oneof![Just(ControlScheme::Keyboard), Just(ControlScheme::Touch)]
}

/// Feed one command into the persistent input, run a tick
fn step(state: &mut GameState, input: &mut TickInput, cmd: &Command, now: f64) -> TickResult {
    match *cmd {
        Command::Left(held) => input.move_left = Some(held),
        Command::Right(held) => input.move_right = Some(held),
        Command::Flick(vx) => input.flick = Some(vx),
        Command::Fire => input.fire += 1,
        Command::Laser => input.fire_laser = true,
        Command::Spawn => {
            state.spawn_enemy();
        }
        Command::Idle => {}
    }
    let result = tick(state, input, now);
    input.clear_one_shots();
    result
}

proptest! {
    #[test]
    fn ship_stays_on_the_playfield(
        scheme in scheme(),
        cmds in prop::collection::vec(command(), 1..400),
    ) {
        let mut state = new_state(scheme, 1);
        let mut input = TickInput::default();
        let max_x = 800.0 - state.ship.size.x;
        for (i, cmd) in cmds.iter().enumerate() {
            step(&mut state, &mut input, cmd, i as f64 * FRAME_MS);
            prop_assert!(state.ship.pos.x >= 0.0 && state.ship.pos.x <= max_x);
        }
    }

    #[test]
    fn score_counts_every_kill_and_never_drops(
        scheme in scheme(),
        seed in any::<u64>(),
        cmds in prop::collection::vec(command(), 1..600),
    ) {
        let mut state = new_state(scheme, seed);
        let mut input = TickInput::default();
        let mut last_score = 0;
        let mut last_lives = state.lives();
        for (i, cmd) in cmds.iter().enumerate() {
            let height = state.playfield.height;
            // Live enemies that this tick's motion carries off the bottom
            let culled = state
                .enemies
                .iter()
                .filter(|e| e.pos.y + e.speed >= height)
                .count();
            let before = state.enemies.len() + state.pending_spawns.len()
                + usize::from(matches!(cmd, Command::Spawn));
            let finished = matches!(
                step(&mut state, &mut input, cmd, i as f64 * FRAME_MS),
                TickResult::Finished(_)
            );
            let after = state.enemies.len() + state.pending_spawns.len();

            let events = state.drain_events();
            let destroyed = events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
                .count();
            let rams = events
                .iter()
                .filter(|e| matches!(e, GameEvent::ShipHit { .. }))
                .count();

            prop_assert!(state.score >= last_score);
            prop_assert_eq!((state.score - last_score) as usize, destroyed);
            prop_assert_eq!((last_lives - state.lives()) as usize, rams);
            prop_assert_eq!(destroyed + rams + culled, before - after);

            last_score = state.score;
            last_lives = state.lives();
            if finished {
                break;
            }
        }
    }

    #[test]
    fn laser_fire_outside_ready_changes_nothing(
        offset in 1.0f64..14_000.0,
        enemy_x in 0.0f32..750.0,
    ) {
        let mut state = new_state(ControlScheme::Keyboard, 5);
        prop_assert!(state.fire_laser(0.0));
        if offset >= 5000.0 {
            state.laser.advance(offset);
            prop_assert_eq!(state.laser.phase, LaserPhase::Cooldown);
        }
        state.enemies.push(Enemy::new(1, Vec2::new(enemy_x, 100.0), &state.tuning));
        let phase = state.laser.phase;
        let start = state.laser.phase_start;

        prop_assert!(!state.fire_laser(offset + 1.0));
        prop_assert_eq!(state.laser.phase, phase);
        prop_assert_eq!(state.laser.phase_start, start);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn projectile_inside_enemy_box_always_hits(
        ex in 0.0f32..700.0,
        ey in 0.0f32..300.0,
        px in 1.0f32..49.0,
        py in 1.0f32..49.0,
    ) {
        let mut state = new_state(ControlScheme::Keyboard, 9);
        let speed = state.tuning.enemy_speed;
        let proj_speed = state.tuning.projectile_speed;
        state.enemies.push(Enemy::new(1, Vec2::new(ex, ey - speed), &state.tuning));
        state
            .ship
            .projectiles
            .push(Projectile::new(Vec2::new(ex + px, ey + py + proj_speed)));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        prop_assert_eq!(state.score, 1);
        prop_assert!(state.enemies.is_empty());
        prop_assert!(state.ship.projectiles.is_empty());
    }
}
