//! Input mapping
//!
//! Translates raw key/pointer identifiers into game actions and applies the
//! phase-dependent rules (restart on move, start gating). Platform-free so
//! the rules are testable off the browser.

use crate::sim::grid::Direction;
use crate::sim::state::{GamePhase, GameState};

/// An atomic input signal. Repeats are harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Request a direction change
    Steer(Direction),
    /// Start or restart the game
    Start,
    /// Toggle sound on/off
    ToggleSound,
}

/// Map a DOM `KeyboardEvent.key` value to an action. Arrows and WASD steer,
/// space/enter start, `m` toggles sound. Unknown keys map to `None`.
pub fn action_for_key(key: &str) -> Option<Action> {
    match key.to_ascii_lowercase().as_str() {
        "arrowup" | "w" => Some(Action::Steer(Direction::Up)),
        "arrowdown" | "s" => Some(Action::Steer(Direction::Down)),
        "arrowleft" | "a" => Some(Action::Steer(Direction::Left)),
        "arrowright" | "d" => Some(Action::Steer(Direction::Right)),
        " " | "enter" => Some(Action::Start),
        "m" => Some(Action::ToggleSound),
        _ => None,
    }
}

/// Map a d-pad button's `data-dir` attribute to a direction.
pub fn direction_for_name(name: &str) -> Option<Direction> {
    match name {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

/// Apply a steering intent. After a loss any movement input restarts the
/// game first, so play resumes on the very keypress. On the attract screen
/// the intent is forwarded and rejected by the engine; only [`start`] leaves
/// the attract screen.
pub fn steer(state: &mut GameState, dir: Direction) {
    if state.phase == GamePhase::GameOver {
        state.reset();
    }
    state.request_direction(dir);
}

/// Apply the start/restart action. A running game is left alone.
pub fn start(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        state.reset();
    }
}
