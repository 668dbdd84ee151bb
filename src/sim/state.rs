//! Game state and core simulation types

use std::collections::VecDeque;

use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Cell, Direction};
use crate::consts::{FRUIT_SAMPLE_LIMIT, GRID_SIZE, INITIAL_SNAKE_LENGTH, SCORE_PER_LEVEL};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Attract screen, before the first start or after a replay prompt
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for a restart
    GameOver,
}

/// Semantic events emitted by the simulation, consumed by the audio and
/// persistence adapters. The simulation never performs side effects itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake ate a fruit; `score` is the new total
    FruitEaten { score: u32 },
    /// The high score rose to `score` and should be written through
    HighScore { score: u32 },
    /// The snake hit a wall or itself; `score` is the final score
    Collided { score: u32 },
}

/// Complete game state. Owned by the shell, mutated only through
/// [`reset`](GameState::reset), [`request_direction`](GameState::request_direction)
/// and [`step`](super::tick::step).
#[derive(Debug, Clone)]
pub struct GameState {
    /// RNG for fruit placement
    pub(super) rng: Pcg32,
    /// Body cells, tail at the front, head at the back
    pub snake: VecDeque<Cell>,
    /// The one fruit on the board, never on the snake
    pub fruit: Cell,
    /// Direction applied on the current step
    pub direction: Direction,
    /// Latest requested direction, applied at the start of the next step
    pub pending: Direction,
    /// Fruits eaten this run
    pub score: u32,
    /// Best score across runs; seeded from storage, raised by the sim
    pub high_score: u32,
    /// Current phase
    pub phase: GamePhase,
}

impl GameState {
    /// Create a game on the attract screen. The snake is laid out exactly as
    /// [`reset`](Self::reset) will place it, so the board always has
    /// something to draw and the snake is never empty.
    pub fn new(seed: u64, high_score: u32) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            snake: VecDeque::new(),
            fruit: Cell::new(0, 0),
            direction: Direction::Right,
            pending: Direction::Right,
            score: 0,
            high_score,
            phase: GamePhase::Idle,
        };
        state.place_snake();
        state.spawn_fruit();
        state
    }

    /// Start (or restart) a run: centered snake moving right, score 0,
    /// fresh fruit. High score and RNG carry over.
    pub fn reset(&mut self) {
        self.place_snake();
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.phase = GamePhase::Running;
        self.spawn_fruit();
    }

    /// Buffer a direction change for the next step. Ignored unless the game
    /// is running, and ignored when `d` would reverse the snake into the
    /// segment directly behind its head. The test is against the *applied*
    /// direction, not the pending one, so two quick turns within one step
    /// cannot queue a 180° reversal.
    pub fn request_direction(&mut self, d: Direction) {
        if self.phase != GamePhase::Running {
            return;
        }
        if d == self.direction.opposite() {
            return;
        }
        self.pending = d;
    }

    /// The snake's head cell
    pub fn head(&self) -> Cell {
        *self.snake.back().expect("snake is never empty")
    }

    /// Whether `cell` is occupied by any snake segment
    pub fn on_snake(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    /// Difficulty level shown on the HUD, derived from score
    pub fn level(&self) -> u32 {
        1 + self.score / SCORE_PER_LEVEL
    }

    /// Place the fruit on a uniformly random free cell. Rejection sampling
    /// with a bounded number of draws; a crowded board falls back to an
    /// exhaustive scan of the free cells. If the snake fills the whole board
    /// the fruit stays where it is.
    pub(super) fn spawn_fruit(&mut self) {
        for _ in 0..FRUIT_SAMPLE_LIMIT {
            let candidate = Cell::new(
                self.rng.random_range(0..GRID_SIZE),
                self.rng.random_range(0..GRID_SIZE),
            );
            if !self.on_snake(candidate) {
                self.fruit = candidate;
                return;
            }
        }
        let snake = &self.snake;
        let free = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|c| !snake.contains(c))
            .choose(&mut self.rng);
        if let Some(cell) = free {
            self.fruit = cell;
        }
    }

    /// Centered three-segment snake, head to the east
    fn place_snake(&mut self) {
        let mid = GRID_SIZE / 2;
        self.snake.clear();
        for i in (0..INITIAL_SNAKE_LENGTH).rev() {
            self.snake.push_back(Cell::new(mid - i as u8, mid));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> GameState {
        let mut state = GameState::new(7, 0);
        state.reset();
        state
    }

    #[test]
    fn reset_places_centered_snake_moving_right() {
        let state = test_state();
        let mid = GRID_SIZE / 2;
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.pending, Direction::Right);
        assert_eq!(
            Vec::from(state.snake.clone()),
            vec![
                Cell::new(mid - 2, mid),
                Cell::new(mid - 1, mid),
                Cell::new(mid, mid),
            ]
        );
    }

    #[test]
    fn fruit_never_spawns_on_snake() {
        for seed in 0..50 {
            let mut state = GameState::new(seed, 0);
            state.reset();
            assert!(!state.on_snake(state.fruit), "seed {seed}");
        }
    }

    #[test]
    fn spawn_fruit_falls_back_to_scan_on_crowded_board() {
        let mut state = test_state();
        // Fill every cell except one; sampling will almost surely miss it.
        state.snake = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|&c| c != Cell::new(3, 17))
            .collect();
        state.spawn_fruit();
        assert_eq!(state.fruit, Cell::new(3, 17));
    }

    #[test]
    fn reversal_request_is_ignored() {
        let mut state = test_state();
        state.request_direction(Direction::Left);
        assert_eq!(state.pending, Direction::Right);
    }

    #[test]
    fn reversal_test_uses_applied_direction() {
        let mut state = test_state();
        // Turn up, then immediately ask for down. Down is not the opposite
        // of the applied direction (still Right), so it replaces the pending
        // Up rather than being refused -- and no reversal results, because
        // Up was never applied.
        state.request_direction(Direction::Up);
        state.request_direction(Direction::Down);
        assert_eq!(state.pending, Direction::Down);
    }

    #[test]
    fn direction_requests_ignored_unless_running() {
        let mut state = GameState::new(7, 0);
        assert_eq!(state.phase, GamePhase::Idle);
        state.request_direction(Direction::Up);
        assert_eq!(state.pending, Direction::Right);

        state.phase = GamePhase::GameOver;
        state.request_direction(Direction::Up);
        assert_eq!(state.pending, Direction::Right);
    }

    #[test]
    fn idle_state_still_has_a_board_to_draw() {
        let state = GameState::new(7, 0);
        assert_eq!(state.snake.len(), INITIAL_SNAKE_LENGTH);
        assert!(!state.on_snake(state.fruit));
    }

    #[test]
    fn level_advances_every_four_points() {
        let mut state = test_state();
        for (score, level) in [(0, 1), (3, 1), (4, 2), (7, 2), (8, 3), (40, 11)] {
            state.score = score;
            assert_eq!(state.level(), level);
        }
    }
}
