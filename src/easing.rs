//! How an opacity change should be animated.
//!
//! The engine only describes a fade; rendering targets that animate on
//! their own, like the viewer, run it with their own tweens.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    EaseInOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    pub duration: Duration,
    pub easing: Easing,
}

impl Fade {
    pub fn ease_in_out(duration: Duration) -> Self {
        Self { duration, easing: Easing::EaseInOut }
    }
}
