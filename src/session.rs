use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::clock::Clock;
use crate::input::{Command, actions_for};
use crate::{Action, GameEngine, GameState, initial_state};

/// One running game: every stimulus becomes an [`Action`] on a single queue
/// that is applied in arrival order.
#[derive(Debug)]
pub struct Session<R = ChaCha8Rng> {
    engine: GameEngine<R>,
    state: GameState,
    queue: VecDeque<Action>,
    clock: Clock,
}

impl<R: Rng> Session<R> {
    /// Fresh, waiting game with the first food placement already queued.
    pub fn new(engine: GameEngine<R>, tick_interval: Duration) -> Self {
        Self {
            engine,
            state: initial_state(),
            queue: VecDeque::from([Action::Initialize]),
            clock: Clock::new(tick_interval),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    pub fn submit(&mut self, cmd: Command) {
        let actions = actions_for(cmd, &self.state);
        self.queue.extend(actions);
    }

    /// Apply everything queued, then start or stop the clock to match.
    pub fn drain(&mut self, now: Instant) {
        while let Some(action) = self.queue.pop_front() {
            let state = std::mem::replace(&mut self.state, initial_state());
            self.state = self.engine.dispatch(state, action);
        }
        self.clock.sync(self.state.is_active(), now);
    }

    /// Queue a tick if one is due, and drain.
    pub fn pump(&mut self, now: Instant) {
        self.drain(now);
        if self.clock.poll(now) {
            self.push(Action::Tick);
            self.drain(now);
        }
    }

    /// How long the caller may wait for input before the next tick.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.clock.time_until_tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Point};

    const TICK: Duration = Duration::from_millis(16);

    fn session() -> Session {
        Session::new(GameEngine::with_seed(9), TICK)
    }

    #[test]
    fn starts_initialized_and_idle() {
        let mut s = session();
        let t0 = Instant::now();
        s.pump(t0);
        assert!(s.state().is_initialized);
        assert!(!s.state().is_game_started);
        assert!(!s.clock().is_running());
    }

    #[test]
    fn first_steer_starts_clock_and_ticks_follow() {
        let mut s = session();
        let t0 = Instant::now();
        s.pump(t0);
        s.submit(Command::Steer(Direction::Down));
        s.pump(t0);
        assert!(s.clock().is_running());
        assert_eq!(s.state().direction, Some(Direction::Down));

        let head = s.state().head();
        s.pump(t0 + TICK);
        assert_eq!(s.state().head(), Point::new(head.x, head.y + 2.0));
    }

    #[test]
    fn first_reverse_steer_is_rejected_against_initial_heading() {
        let mut s = session();
        let t0 = Instant::now();
        s.submit(Command::Steer(Direction::Left));
        s.pump(t0);
        assert!(s.state().is_game_started);
        assert_eq!(s.state().direction, Some(Direction::Right));
    }

    #[test]
    fn game_over_releases_the_timer_and_restart_reacquires() {
        let mut s = session();
        let t0 = Instant::now();
        s.submit(Command::Start);
        s.submit(Command::Steer(Direction::Up));
        s.pump(t0);

        // Head starts at y = 100 moving 2 px up: the wall is reached well
        // within 100 ticks.
        let mut now = t0;
        for _ in 0..100 {
            now += TICK;
            s.pump(now);
            if s.state().is_game_over {
                break;
            }
        }
        assert!(s.state().is_game_over);
        assert!(!s.clock().is_running());
        assert_eq!(s.time_until_tick(now), None);

        let frozen = s.state().clone();
        s.pump(now + 10 * TICK);
        assert_eq!(s.state(), &frozen);

        s.submit(Command::Restart);
        s.pump(now);
        assert!(s.clock().is_running());
        assert!(!s.state().is_game_over);
        assert_eq!(s.state().score, 0);
    }
}
