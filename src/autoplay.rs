//! Ownership of a carousel's repeating autoplay timer.

use std::time::Duration;

use crate::timers::{TimerId, Timers};

/// Holds at most one live repeating timer. `enabled` is the user's
/// start/stop choice, `paused` follows the pointer; the timer only runs
/// when enabled and not paused.
#[derive(Debug)]
pub struct Autoplay {
    interval: Duration,
    handle: Option<TimerId>,
    enabled: bool,
    paused: bool,
}

impl Autoplay {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            handle: None,
            enabled: false,
            paused: false,
        }
    }

    /// Cancel the current timer and start a fresh one when allowed. Never
    /// runs with fewer than two slides.
    pub fn restart<W: Copy>(&mut self, timers: &mut Timers<W>, wake: W, slides: usize) -> bool {
        self.cancel(timers);
        if !self.enabled || self.paused || slides <= 1 {
            return false;
        }
        self.handle = Some(timers.every(self.interval, wake));
        true
    }

    pub fn cancel<W: Copy>(&mut self, timers: &mut Timers<W>) {
        if let Some(handle) = self.handle.take() {
            timers.cancel(handle);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TimerId> {
        self.handle
    }
}
