//! Fixed-interval tick scheduling.
//!
//! A [`TickTimer`] only exists while the game is active. [`Clock::sync`]
//! creates it on entering the active condition and drops it on every exit, so
//! a stopped game can never receive a stray tick.

use std::time::{Duration, Instant};

use log::debug;

/// A running interval. Dropping it cancels all further ticks.
#[derive(Debug)]
pub struct TickTimer {
    interval: Duration,
    next_due: Instant,
}

impl TickTimer {
    fn start(interval: Duration, now: Instant) -> Self {
        debug!("tick timer started ({} ms)", interval.as_millis());
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// At most one tick per poll; a late poll does not replay missed ticks.
    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        debug!("tick timer cancelled");
    }
}

#[derive(Debug)]
pub struct Clock {
    interval: Duration,
    timer: Option<TickTimer>,
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timer: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Acquire the timer when `active`, release it otherwise. An already
    /// running timer keeps its phase.
    pub fn sync(&mut self, active: bool, now: Instant) {
        if active {
            if self.timer.is_none() {
                self.timer = Some(TickTimer::start(self.interval, now));
            }
        } else {
            self.timer = None;
        }
    }

    /// `None` while stopped.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.as_ref().map(|t| t.time_until_due(now))
    }

    /// True when a tick is due. Always false while stopped.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.timer.as_mut().is_some_and(|t| t.poll(now))
    }
}
