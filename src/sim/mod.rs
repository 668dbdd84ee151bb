//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete grid, fixed logical steps only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod grid;
pub mod state;
pub mod tick;

pub use grid::{Cell, Direction};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::step;
