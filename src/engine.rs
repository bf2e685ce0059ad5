use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    BOARD_SHRINK_PER_POINT, Direction, EAT_DISTANCE, GROWTH_PER_FOOD, GameState, MAX_SCORE,
    MIN_BOARD_SIZE, SPEED_INCREMENT, change_direction, food::spawn_food, initial_state, start,
};

/// Everything that may change a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place the first food. Sent once after the state is created.
    Initialize,
    Start,
    Restart,
    ChangeDirection(Direction),
    Tick,
}

/// Owns the randomness; every transition is otherwise a pure function of the
/// incoming state.
#[derive(Debug)]
pub struct GameEngine<R = ChaCha8Rng> {
    rng: R,
}

impl GameEngine<ChaCha8Rng> {
    /// Engine with non-deterministic seed
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for GameEngine<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn dispatch(&mut self, state: GameState, action: Action) -> GameState {
        match action {
            Action::Initialize => self.initialize(state),
            Action::Start => start(state),
            Action::Restart => self.restart(),
            Action::ChangeDirection(dir) => change_direction(state, dir),
            Action::Tick => self.tick(state),
        }
    }

    /// Replace the placeholder food with a real one.
    pub fn initialize(&mut self, state: GameState) -> GameState {
        if state.is_initialized {
            return state;
        }
        let food = spawn_food(&state.snake, state.board_size, &mut self.rng);
        GameState {
            food,
            is_initialized: true,
            ..state
        }
    }

    /// Fresh game, food already placed and already running.
    pub fn restart(&mut self) -> GameState {
        info!("game restarted");
        let fresh = initial_state();
        let food = spawn_food(&fresh.snake, fresh.board_size, &mut self.rng);
        GameState {
            food,
            is_initialized: true,
            is_game_started: true,
            direction: Some(Direction::Right),
            ..fresh
        }
    }

    /// Advance the game by one tick.
    pub fn tick(&mut self, state: GameState) -> GameState {
        let (Some(dir), Some(&old_head)) = (state.direction, state.snake.front()) else {
            return state;
        };
        if !state.is_active() {
            return state;
        }

        let head = old_head.moved(dir, state.speed);

        // Dying leaves the snake where it was.
        if state.hits_wall(head) {
            info!("hit the wall at ({:.1}, {:.1}), score {}", head.x, head.y, state.score);
            return GameState {
                is_game_over: true,
                ..state
            };
        }
        if state.hits_body(head) {
            info!("ran into itself at ({:.1}, {:.1}), score {}", head.x, head.y, state.score);
            return GameState {
                is_game_over: true,
                ..state
            };
        }

        let mut next = state;
        next.snake.push_front(head);

        if head.distance(next.food.position) < EAT_DISTANCE {
            let eaten = next.food;
            next.score = (next.score + eaten.score).min(MAX_SCORE);
            debug!("ate {} worth {}, score {}", eaten.kind, eaten.score, next.score);

            if next.score >= MAX_SCORE {
                info!("reached the maximum score of {MAX_SCORE}");
                next.is_game_over = true;
                return next;
            }

            next.speed += SPEED_INCREMENT;
            next.board_size = (next.board_size - BOARD_SHRINK_PER_POINT * f64::from(eaten.score))
                .max(MIN_BOARD_SIZE);
            next.food = spawn_food(&next.snake, next.board_size, &mut self.rng);
            next.segments_to_add += GROWTH_PER_FOOD;
            debug!("board shrank to {}, speed {:.2}", next.board_size, next.speed);
        }

        if next.segments_to_add > 0 {
            next.segments_to_add -= 1;
        } else {
            next.snake.pop_back();
        }
        next
    }
}
