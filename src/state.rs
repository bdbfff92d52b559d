use crate::crossfade::Crossfade;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    Idle,                     // Current pair fully shown
    Transitioning(Crossfade), // One pair fading out, one fading in
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    Pending { attempts: u32 }, // Not mounted yet
    Mounted,
    Abandoned,                 // Retry budget spent, the carousel stays inert
}

/// What happened to a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Started { from: usize, to: usize },
    Busy,       // A transition is already running
    SameSlide,  // Target is already current
    NotMounted,
}

impl Outcome {
    pub fn started(self) -> bool {
        matches!(self, Outcome::Started { .. })
    }
}

/// Timer events of the hero carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Discovery,
    Frame,
    TransitionEnd,
    Autoplay,
}
