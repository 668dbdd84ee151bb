//! Fixed-step clock
//!
//! Display frames arrive at whatever rate the host refreshes; logic advances
//! in fixed-duration steps whose length shrinks as the score climbs. The
//! clock holds the elapsed real time not yet converted into steps and drains
//! it on every frame.

use crate::consts::{BASE_STEP_MS, MAX_FRAME_DELTA_MS, MIN_STEP_MS, SCORE_PER_LEVEL, SPEED_STEP_MS};
use crate::sim::state::{GameEvent, GamePhase, GameState};
use crate::sim::tick::step;

/// Duration of one logical step at the given score: 165 ms at level one,
/// 7 ms faster per level, floored at 70 ms.
pub fn step_interval_ms(score: u32) -> f64 {
    let decrease = f64::from(score / SCORE_PER_LEVEL) * SPEED_STEP_MS;
    MIN_STEP_MS.max(BASE_STEP_MS - decrease)
}

/// Converts frame timestamps into logical steps.
#[derive(Debug, Clone, Default)]
pub struct StepClock {
    /// Timestamp of the previous frame, ms; `None` until the first frame
    last_timestamp: Option<f64>,
    /// Real time not yet spent on steps, ms
    accumulator: f64,
}

impl StepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any banked time, keeping the frame baseline. Called on game
    /// restart so a new run does not begin with a stale burst of steps.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Feed one frame timestamp (ms, monotonic) and run however many steps
    /// fit. Drain stops the moment a step ends the game, so a terminated
    /// game is never stepped again within the frame.
    pub fn on_frame(&mut self, now_ms: f64, state: &mut GameState, events: &mut Vec<GameEvent>) {
        let delta = match self.last_timestamp {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        if state.phase != GamePhase::Running {
            return;
        }
        self.accumulator += delta;

        while self.accumulator >= step_interval_ms(state.score) {
            self.accumulator -= step_interval_ms(state.score);
            step(state, events);
            if state.phase != GamePhase::Running {
                break;
            }
        }
    }
}
