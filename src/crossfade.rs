//! Two-phase crossfade between two slide pairs.
//!
//! `commit` puts the incoming pair on top, transparent, and flushes so the
//! rendering target registers that starting point. `animate` must run on a
//! later frame: it starts both fades together. Running both in one frame
//! makes the incoming slide pop in instead of fading.

use crate::constants::*;
use crate::easing::Fade;
use crate::slide::SlidePair;
use crate::surface::{Prop, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossfade {
    pub outgoing: SlidePair,
    pub incoming: SlidePair,
    pub fade: Fade,
}

impl Crossfade {
    pub fn new(outgoing: SlidePair, incoming: SlidePair, fade: Fade) -> Self {
        Self { outgoing, incoming, fade }
    }

    pub fn commit(&self, surface: &mut dyn Surface) {
        self.incoming.apply(surface, Prop::ZIndex(Z_INCOMING));
        self.incoming.apply(surface, Prop::Opacity { value: 0.0, fade: None });
        self.incoming.apply(surface, Prop::Visible(true));
        surface.flush();
    }

    pub fn animate(&self, surface: &mut dyn Surface) {
        let fade = Some(self.fade);
        self.outgoing.apply(surface, Prop::Opacity { value: 0.0, fade });
        self.incoming.apply(surface, Prop::Opacity { value: 1.0, fade });
        self.incoming.apply(surface, Prop::Interactive(true));
    }

    /// Settle stacking order once the fade has run its course.
    pub fn finish(&self, surface: &mut dyn Surface) {
        self.outgoing.apply(surface, Prop::ZIndex(Z_RESTING));
        self.outgoing.apply(surface, Prop::Interactive(false));
        self.incoming.apply(surface, Prop::ZIndex(Z_CURRENT));
    }
}
