//! The logical step
//!
//! One call to [`step`] moves the snake by exactly one cell. Everything the
//! outside world needs to react to is pushed into the caller's event buffer;
//! no side effects happen here.

use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game by one step.
///
/// The pending direction is latched, the head advances one cell, and the
/// outcome is one of: collision (phase becomes [`GamePhase::GameOver`], the
/// snake is left untouched), growth (fruit eaten, tail kept), or plain
/// movement (tail dropped).
pub fn step(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.direction = state.pending;

    let next_head = state.direction.advance(state.head());

    // The tail cell counts as occupied: it only vacates after a non-growing
    // move, and the head arrives before that happens.
    let next_head = match next_head {
        Some(cell) if !state.on_snake(cell) => cell,
        _ => {
            end_game(state, events);
            return;
        }
    };

    state.snake.push_back(next_head);

    if next_head == state.fruit {
        state.score += 1;
        if state.score > state.high_score {
            state.high_score = state.score;
            events.push(GameEvent::HighScore {
                score: state.high_score,
            });
        }
        state.spawn_fruit();
        events.push(GameEvent::FruitEaten { score: state.score });
    } else {
        state.snake.pop_front();
    }
}

/// Terminal transition: freeze the board, settle the high score, and emit
/// the collision event carrying the final score.
fn end_game(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    if state.score > state.high_score {
        state.high_score = state.score;
        events.push(GameEvent::HighScore {
            score: state.high_score,
        });
    }
    events.push(GameEvent::Collided { score: state.score });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_SIZE;
    use crate::sim::grid::{Cell, Direction};
    use proptest::prelude::*;
    use std::collections::VecDeque;

    fn running_state() -> GameState {
        let mut state = GameState::new(7, 0);
        state.reset();
        state
    }

    /// Snake/fruit layout from a known board, head at the back
    fn with_layout(cells: &[Cell], direction: Direction, fruit: Cell) -> GameState {
        let mut state = running_state();
        state.snake = VecDeque::from(cells.to_vec());
        state.direction = direction;
        state.pending = direction;
        state.fruit = fruit;
        state
    }

    #[test]
    fn eating_fruit_grows_and_scores() {
        let mut state = with_layout(
            &[Cell::new(10, 12), Cell::new(11, 12), Cell::new(12, 12)],
            Direction::Right,
            Cell::new(13, 12),
        );
        let mut events = Vec::new();
        step(&mut state, &mut events);

        assert_eq!(
            Vec::from(state.snake.clone()),
            vec![
                Cell::new(10, 12),
                Cell::new(11, 12),
                Cell::new(12, 12),
                Cell::new(13, 12),
            ]
        );
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert_ne!(state.fruit, Cell::new(13, 12));
        assert!(!state.on_snake(state.fruit));
        assert_eq!(
            events,
            vec![
                GameEvent::HighScore { score: 1 },
                GameEvent::FruitEaten { score: 1 },
            ]
        );
    }

    #[test]
    fn plain_movement_keeps_length() {
        let mut state = with_layout(
            &[Cell::new(10, 12), Cell::new(11, 12), Cell::new(12, 12)],
            Direction::Right,
            Cell::new(0, 0),
        );
        let mut events = Vec::new();
        step(&mut state, &mut events);

        assert_eq!(
            Vec::from(state.snake.clone()),
            vec![Cell::new(11, 12), Cell::new(12, 12), Cell::new(13, 12)],
        );
        assert_eq!(state.score, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn wall_collision_ends_the_game() {
        let mut state = with_layout(
            &[
                Cell::new(GRID_SIZE - 3, 12),
                Cell::new(GRID_SIZE - 2, 12),
                Cell::new(GRID_SIZE - 1, 12),
            ],
            Direction::Right,
            Cell::new(0, 0),
        );
        let before = state.snake.clone();
        let mut events = Vec::new();
        step(&mut state, &mut events);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.snake, before);
        assert_eq!(events, vec![GameEvent::Collided { score: 0 }]);
    }

    #[test]
    fn body_collision_ends_the_game() {
        // Hook shape, head curling back into the middle of the body.
        let mut state = with_layout(
            &[
                Cell::new(9, 10),
                Cell::new(10, 10),
                Cell::new(11, 10),
                Cell::new(11, 11),
                Cell::new(10, 11),
            ],
            Direction::Up,
            Cell::new(0, 0),
        );
        let mut events = Vec::new();
        step(&mut state, &mut events);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::Collided { score: 0 }]);
    }

    #[test]
    fn tail_cell_is_still_solid() {
        // A 2x2 loop: the head moves onto the tail cell, which would only
        // vacate later this same step. That counts as a collision.
        let mut state = with_layout(
            &[
                Cell::new(10, 10),
                Cell::new(11, 10),
                Cell::new(11, 11),
                Cell::new(10, 11),
            ],
            Direction::Up,
            Cell::new(0, 0),
        );
        let mut events = Vec::new();
        step(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn step_is_a_noop_after_game_over() {
        let mut state = running_state();
        state.phase = GamePhase::GameOver;
        let before = state.snake.clone();
        let mut events = Vec::new();
        step(&mut state, &mut events);
        assert_eq!(state.snake, before);
        assert!(events.is_empty());
    }

    #[test]
    fn high_score_raised_at_game_over() {
        let mut state = with_layout(
            &[Cell::new(21, 12), Cell::new(22, 12), Cell::new(23, 12)],
            Direction::Right,
            Cell::new(0, 0),
        );
        // Score accrued without the high score having caught up (as after
        // loading a fresh state).
        state.score = 5;
        state.high_score = 2;
        let mut events = Vec::new();
        step(&mut state, &mut events);

        assert_eq!(state.high_score, 5);
        assert_eq!(
            events,
            vec![
                GameEvent::HighScore { score: 5 },
                GameEvent::Collided { score: 5 },
            ]
        );
    }

    #[test]
    fn high_score_is_monotonic_across_resets() {
        let mut state = with_layout(
            &[Cell::new(10, 12), Cell::new(11, 12), Cell::new(12, 12)],
            Direction::Right,
            Cell::new(13, 12),
        );
        let mut events = Vec::new();
        step(&mut state, &mut events);
        assert_eq!(state.high_score, 1);

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 1);
    }

    #[test]
    fn pending_direction_latches_on_step() {
        let mut state = with_layout(
            &[Cell::new(10, 12), Cell::new(11, 12), Cell::new(12, 12)],
            Direction::Right,
            Cell::new(0, 0),
        );
        state.request_direction(Direction::Up);
        let mut events = Vec::new();
        step(&mut state, &mut events);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.head(), Cell::new(12, 11));
    }

    fn arb_directions() -> impl Strategy<Value = Vec<Direction>> {
        prop::collection::vec(prop::sample::select(Direction::ALL.to_vec()), 0..200)
    }

    proptest! {
        /// Driving a fresh game with arbitrary inputs never breaks the board
        /// invariants: cells in bounds, no overlaps, fruit off the snake,
        /// growth only on eat.
        #[test]
        fn invariants_hold_under_arbitrary_input(seed in 0u64..1000, dirs in arb_directions()) {
            let mut state = GameState::new(seed, 0);
            state.reset();
            let mut events = Vec::new();

            for d in dirs {
                state.request_direction(d);
                let len_before = state.snake.len();
                let score_before = state.score;
                step(&mut state, &mut events);

                for &cell in &state.snake {
                    prop_assert!(cell.in_bounds());
                }
                let mut seen = std::collections::HashSet::new();
                for &cell in &state.snake {
                    prop_assert!(seen.insert(cell), "duplicate snake cell");
                }
                prop_assert!(!state.on_snake(state.fruit));

                if state.phase == GamePhase::Running {
                    if state.score > score_before {
                        prop_assert_eq!(state.snake.len(), len_before + 1);
                    } else {
                        prop_assert_eq!(state.snake.len(), len_before);
                    }
                } else {
                    break;
                }
            }
        }
    }
}
