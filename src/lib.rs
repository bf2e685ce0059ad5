use std::collections::VecDeque;

use log::info;

pub mod clock;
pub mod engine;
pub mod food;
pub mod input;
pub mod render;
pub mod session;

pub use engine::{Action, GameEngine};
pub use food::{Food, FoodType, spawn_food};

/// Side length of the full square board, in pixels.
pub const BOARD_SIZE: f64 = 500.0;
/// Side length of one snake segment, in pixels.
pub const SNAKE_SIZE: f64 = 15.0;
/// Side length of a food item, in pixels.
pub const FOOD_SIZE: f64 = 20.0;
pub const INITIAL_SNAKE_LENGTH: usize = 10;
/// Default tick interval (~60 steps per second).
pub const GAME_TICK_MS: u64 = 16;
/// Pixels moved per tick at the start of a game.
pub const INITIAL_SPEED: f64 = 2.0;
pub const SPEED_INCREMENT: f64 = 0.05;
/// Pixels the board loses per point scored.
pub const BOARD_SHRINK_PER_POINT: f64 = 2.0;
pub const MIN_BOARD_SIZE: f64 = SNAKE_SIZE * 10.0;
pub const MAX_SCORE: u32 = 100;
/// Segments added (one per tick) for every food eaten.
pub const GROWTH_PER_FOOD: u32 = 5;
/// Body indices below this (counting the new head as 0) never trigger a
/// self collision: neighbouring segments always overlap.
pub const SELF_COLLISION_WINDOW: usize = 15;
/// Minimum distance between a freshly spawned food and any segment.
pub const FOOD_CLEARANCE: f64 = SNAKE_SIZE * 2.0;
/// Head-to-food distance below which the food is eaten.
pub const EAT_DISTANCE: f64 = (SNAKE_SIZE + FOOD_SIZE) / 2.0;

const HALF_SEGMENT: f64 = SNAKE_SIZE / 2.0;

/// Position in board pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// This point displaced `step` pixels along `dir`.
    #[inline]
    pub fn moved(self, dir: Direction, step: f64) -> Self {
        let (dx, dy) = dir.dx_dy();
        Self::new(self.x + dx * step, self.y + dy * step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit step on screen axes (y grows downward).
    #[inline]
    pub fn dx_dy(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }
}

/// Complete game snapshot. The renderer reads it; only the engine and the
/// free transition functions below produce new ones.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Head first, tail last. Must not be empty while the game runs; an
    /// empty snake is never advanced.
    pub snake: VecDeque<Point>,
    pub food: Food,
    /// `None` until the game is started.
    pub direction: Option<Direction>,
    /// Pixels per tick.
    pub speed: f64,
    pub score: u32,
    pub is_game_over: bool,
    pub is_game_started: bool,
    pub is_initialized: bool,
    pub board_size: f64,
    /// Ticks left during which the tail is kept.
    pub segments_to_add: u32,
}

impl GameState {
    pub fn head(&self) -> Point {
        *self.snake.front().expect("snake is non-empty")
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// True while the tick timer should be running.
    pub fn is_active(&self) -> bool {
        self.is_game_started && !self.is_game_over
    }

    /// Game ended by reaching the score cap rather than by a collision.
    pub fn is_won(&self) -> bool {
        self.is_game_over && self.score >= MAX_SCORE
    }

    /// Head outside `[SNAKE_SIZE / 2, board_size - SNAKE_SIZE / 2)` on either axis.
    pub fn hits_wall(&self, p: Point) -> bool {
        let max = self.board_size - HALF_SEGMENT;
        p.x < HALF_SEGMENT || p.x >= max || p.y < HALF_SEGMENT || p.y >= max
    }

    /// Tests `p` as the next head against the current body.
    pub fn hits_body(&self, p: Point) -> bool {
        // The body shifts by one index once `p` is pushed in front of it.
        self.snake
            .iter()
            .skip(SELF_COLLISION_WINDOW - 1)
            .any(|&s| p.distance(s) < HALF_SEGMENT)
    }
}

/// The fixed starting body: a horizontal line heading right, half a segment
/// between neighbours.
pub fn initial_snake() -> VecDeque<Point> {
    (0..INITIAL_SNAKE_LENGTH)
        .map(|i| Point::new(100.0 - i as f64 * HALF_SEGMENT, 100.0))
        .collect()
}

/// Fresh, not yet initialized game with a placeholder food off the board.
pub fn initial_state() -> GameState {
    GameState {
        snake: initial_snake(),
        food: Food::placeholder(),
        direction: None,
        speed: INITIAL_SPEED,
        score: 0,
        is_game_over: false,
        is_game_started: false,
        is_initialized: false,
        board_size: BOARD_SIZE,
        segments_to_add: 0,
    }
}

/// Apply a steering input. Rejects an instant 180° reversal.
pub fn change_direction(state: GameState, dir: Direction) -> GameState {
    match state.direction {
        Some(current) if current.is_opposite(dir) => state,
        _ => GameState {
            direction: Some(dir),
            ..state
        },
    }
}

/// Begin play heading right. Only meaningful before the first start.
pub fn start(state: GameState) -> GameState {
    if state.is_game_started {
        return state;
    }
    info!("game started");
    GameState {
        is_game_started: true,
        direction: Some(Direction::Right),
        ..state
    }
}
