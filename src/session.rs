//! Host-side session driver
//!
//! Owns the game state and the pending input, turns irregular display frames
//! into fixed simulation ticks, and reports to a `Presenter`.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{ControlScheme, GameState, Playfield, TickInput, TickResult, tick};
use crate::tuning::Tuning;
use crate::view::{FrameSnapshot, Presenter};

pub struct Session {
    pub state: GameState,
    /// Commands waiting for the next tick
    pub input: TickInput,
    accumulator: f32,
    last_time: Option<f64>,
    finished: bool,
}

impl Session {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        playfield: Playfield,
        scheme: ControlScheme,
        now: f64,
    ) -> Self {
        log::info!("Session started with seed {} ({:?} controls)", seed, scheme);
        Self {
            state: GameState::new(seed, tuning, playfield, scheme, now),
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: None,
            finished: false,
        }
    }

    /// Throw the current session away and start over with the same setup
    pub fn restart(&mut self, seed: u64, now: f64) {
        let tuning = self.state.tuning.clone();
        let playfield = self.state.playfield;
        let scheme = self.state.scheme();
        self.state = GameState::new(seed, tuning, playfield, scheme, now);
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.last_time = None;
        self.finished = false;
        log::info!("Session restarted with seed {}", seed);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Spawn-timer hook; the enemy joins play on the next tick
    pub fn spawn_enemy(&mut self) -> Option<u32> {
        if self.finished || self.state.is_over() {
            return None;
        }
        Some(self.state.spawn_enemy())
    }

    pub fn resize(&mut self, playfield: Playfield) {
        self.state.resize(playfield);
    }

    /// Run the ticks owed for a display frame at host time `now` (ms).
    ///
    /// Returns false once the session has ended; the host should stop
    /// scheduling frames.
    pub fn frame(&mut self, now: f64, presenter: &mut impl Presenter) -> bool {
        if self.finished {
            return false;
        }

        let dt = match self.last_time {
            Some(last) => ((now - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(now);
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut summary = None;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let result = tick(&mut self.state, &self.input, now);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_one_shots();

            if let TickResult::Finished(s) = result {
                summary = Some(s);
                break;
            }
        }

        let snapshot = FrameSnapshot::capture(&mut self.state, now);
        presenter.present(&snapshot);

        match summary {
            Some(summary) => {
                self.finished = true;
                presenter.finish(&summary);
                false
            }
            None => true,
        }
    }
}
