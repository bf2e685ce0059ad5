use crypto_snake::{
    Action, BOARD_SHRINK_PER_POINT, BOARD_SIZE, Direction, FOOD_CLEARANCE, Food, FoodType,
    GROWTH_PER_FOOD, GameEngine, GameState, INITIAL_SNAKE_LENGTH, MAX_SCORE, MIN_BOARD_SIZE,
    Point, SNAKE_SIZE, initial_state,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn run(engine: &mut GameEngine, state: GameState, actions: &[Action]) -> GameState {
    actions
        .iter()
        .fold(state, |s, &a| engine.dispatch(s, a))
}

fn feed(state: &mut GameState, kind: FoodType) {
    let dir = state.direction.expect("running game has a direction");
    state.food = Food::new(state.head().moved(dir, state.speed), kind.spec());
}

#[test]
fn stepwise_session_to_a_win_and_back() {
    let mut engine = GameEngine::with_seed(2024);
    let mut state = run(
        &mut engine,
        initial_state(),
        &[Action::Initialize, Action::Start, Action::ChangeDirection(Direction::Down)],
    );
    assert_eq!(state.direction, Some(Direction::Down));
    assert_eq!(state.len(), INITIAL_SNAKE_LENGTH);

    // Plain step.
    let head = state.head();
    state = engine.tick(state);
    assert_eq!(state.head().y, head.y + 2.0);
    assert_eq!(state.len(), INITIAL_SNAKE_LENGTH);

    // One coin: five segments of growth spread over five ticks.
    feed(&mut state, FoodType::Btc);
    state = engine.tick(state);
    for _ in 1..GROWTH_PER_FOOD {
        state = engine.tick(state);
    }
    assert_eq!(state.len(), INITIAL_SNAKE_LENGTH + GROWTH_PER_FOOD as usize);
    assert_eq!(state.score, 1);
    state = engine.tick(state);
    assert_eq!(state.len(), INITIAL_SNAKE_LENGTH + GROWTH_PER_FOOD as usize);

    // Steer right and bank AARNA tokens until the cap.
    state = engine.dispatch(state, Action::ChangeDirection(Direction::Right));
    while !state.is_game_over {
        feed(&mut state, FoodType::Aarna);
        state = engine.tick(state);
    }
    assert_eq!(state.score, MAX_SCORE);
    assert!(state.is_won());

    let frozen = state.clone();
    assert_eq!(engine.dispatch(state, Action::Tick), frozen);

    let state = engine.dispatch(frozen, Action::Restart);
    assert!(state.is_game_started && !state.is_game_over);
    assert_eq!(state.score, 0);
    assert_eq!(state.board_size, BOARD_SIZE);
    assert_eq!(state.len(), INITIAL_SNAKE_LENGTH);
}

/// Ticks a swing-wide turn is held before steering resumes.
const HOLD_TICKS: u32 = 10;

/// Chases the food along the longer axis, with a little noise. A reversal is
/// never requested: the snake turns toward the board centre instead and holds
/// that heading long enough to clear its own neck.
struct Chaser {
    rng: ChaCha8Rng,
    hold: u32,
}

impl Chaser {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            hold: 0,
        }
    }

    fn steer(&mut self, state: &GameState) -> Option<Direction> {
        if self.hold > 0 {
            self.hold -= 1;
            return None;
        }
        let current = state.direction?;
        let head = state.head();
        let dx = state.food.position.x - head.x;
        let dy = state.food.position.y - head.y;

        let sideways = match current {
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
        };
        let want = if self.rng.random_bool(0.05) {
            sideways[self.rng.random_range(0..2)]
        } else if dx.abs() >= dy.abs() {
            if dx < 0.0 { Direction::Left } else { Direction::Right }
        } else if dy < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };

        if want != current.opposite() {
            return Some(want);
        }
        self.hold = HOLD_TICKS;
        let centre = state.board_size / 2.0;
        let toward_centre = match current {
            Direction::Left | Direction::Right if head.y < centre => Direction::Down,
            Direction::Left | Direction::Right => Direction::Up,
            _ if head.x < centre => Direction::Right,
            _ => Direction::Left,
        };
        Some(toward_centre)
    }
}

#[test]
fn chasing_play_keeps_invariants() {
    let mut eats = 0;
    let mut reached_floor = false;

    for seed in 0..20 {
        let mut engine = GameEngine::with_seed(seed);
        let mut chaser = Chaser::new(seed + 1000);
        let mut state = initial_state();
        // Odd seeds start two points above the floor so it is hit early.
        if seed % 2 == 1 {
            state.board_size = MIN_BOARD_SIZE + 2.0 * BOARD_SHRINK_PER_POINT;
        }
        let mut state = run(&mut engine, state, &[Action::Initialize, Action::Start]);

        for _ in 0..5_000 {
            if let Some(dir) = chaser.steer(&state) {
                state = engine.dispatch(state, Action::ChangeDirection(dir));
            }

            let before = state.clone();
            state = engine.tick(state);

            assert!(!state.is_empty());
            assert!(state.score >= before.score);
            assert!(state.score <= MAX_SCORE);
            assert!(state.speed >= before.speed);
            assert!(state.board_size <= before.board_size);
            assert!(state.board_size >= MIN_BOARD_SIZE);

            if state.score > before.score {
                eats += 1;
            }
            reached_floor |= state.board_size == MIN_BOARD_SIZE;

            // A saturated board falls back to the centre.
            let centre = state.board_size / 2.0;
            if state.food != before.food && state.food.position != Point::new(centre, centre) {
                for seg in &state.snake {
                    assert!(seg.distance(state.food.position) >= FOOD_CLEARANCE);
                }
            }

            if state.is_game_over {
                if state.score < MAX_SCORE {
                    // Collisions never commit the fatal move.
                    assert_eq!(state.snake, before.snake);
                }
                break;
            }

            // Checked against the board the move was made on; eating may
            // shrink the wall past the head, which only kills next tick.
            let h = state.head();
            let half = SNAKE_SIZE / 2.0;
            assert!(h.x >= half && h.x < before.board_size - half);
            assert!(h.y >= half && h.y < before.board_size - half);
        }
    }

    assert!(eats >= 40, "only {eats} foods eaten over 20 games");
    assert!(reached_floor, "no game shrank the board to its floor");
}
