//! The crossfading carousel engine.
//!
//! One `CarouselEngine` per carousel area. It owns its slide registry, its
//! timers and its autoplay handle, so several carousels on one page never
//! share state. Time only moves through [`CarouselEngine::tick`].

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::autoplay::Autoplay;
use crate::config::CarouselConfig;
use crate::crossfade::Crossfade;
use crate::easing::Fade;
use crate::slide::{CarouselSelector, SlideRegistry, normalize};
use crate::state::{Discovery, Outcome, TransitionState, Wake};
use crate::surface::{ElementId, Prop, Surface};
use crate::timers::{TimerId, Timers};

#[derive(Debug)]
pub struct CarouselEngine {
    config: CarouselConfig,
    selector: CarouselSelector,
    registry: Option<SlideRegistry>,
    discovery: Discovery,
    retry: Option<TimerId>,
    current: usize,
    state: TransitionState,
    timers: Timers<Wake>,
    autoplay: Autoplay,
}

impl CarouselEngine {
    pub fn new(config: CarouselConfig) -> Self {
        Self::with_selector(config, CarouselSelector::default())
    }

    pub fn with_selector(config: CarouselConfig, selector: CarouselSelector) -> Self {
        let mut autoplay = Autoplay::new(config.autoplay_interval());
        autoplay.set_enabled(config.autoplay);
        Self {
            config,
            selector,
            registry: None,
            discovery: Discovery::Pending { attempts: 0 },
            retry: None,
            current: 0,
            state: TransitionState::Idle,
            timers: Timers::new(),
            autoplay,
        }
    }

    /// Discover and lay out the slides, once the page guarantees they
    /// exist. Returns `false` when nothing usable was found; the engine
    /// stays inert until mounted.
    pub fn mount(&mut self, surface: &mut dyn Surface) -> bool {
        match self.discovery {
            Discovery::Mounted => return true,
            Discovery::Abandoned => return false,
            Discovery::Pending { .. } => {}
        }

        let Some(mut registry) = SlideRegistry::discover(surface, &self.selector) else {
            return false;
        };
        registry.layout(surface);
        info!(
            slides = registry.len(),
            text_height = registry.text_height(),
            media_height = registry.media_height(),
            "carousel mounted"
        );

        if let Some(retry) = self.retry.take() {
            self.timers.cancel(retry);
        }
        self.registry = Some(registry);
        self.discovery = Discovery::Mounted;
        self.current = 0;
        self.state = TransitionState::Idle;

        self.restart_autoplay();
        true
    }

    /// Like [`mount`](Self::mount), but keeps trying every
    /// `retry_interval` while the slides are not there yet, up to
    /// `max_discovery_retries` retries.
    pub fn mount_or_retry(&mut self, surface: &mut dyn Surface) -> bool {
        if self.mount(surface) {
            return true;
        }
        self.schedule_retry();
        false
    }

    pub fn next(&mut self, surface: &mut dyn Surface) -> Outcome {
        self.navigate(self.current as i64 + 1, surface)
    }

    pub fn previous(&mut self, surface: &mut dyn Surface) -> Outcome {
        self.navigate(self.current as i64 - 1, surface)
    }

    /// Jump to any index; out-of-range values wrap around.
    pub fn go_to(&mut self, index: i64, surface: &mut dyn Surface) -> Outcome {
        self.navigate(index, surface)
    }

    pub fn start_autoplay(&mut self) {
        self.autoplay.set_enabled(true);
        self.restart_autoplay();
    }

    pub fn stop_autoplay(&mut self) {
        self.autoplay.set_enabled(false);
        self.autoplay.cancel(&mut self.timers);
    }

    /// Pointer entered the carousel area: pause autoplay.
    pub fn pointer_enter(&mut self) {
        self.autoplay.set_paused(true);
        self.autoplay.cancel(&mut self.timers);
    }

    /// Pointer left the carousel area: resume autoplay.
    pub fn pointer_leave(&mut self) {
        self.autoplay.set_paused(false);
        self.restart_autoplay();
    }

    /// A registered media element failed to load. It gets the placeholder
    /// treatment and stays in rotation.
    pub fn on_media_error(&mut self, element: ElementId, surface: &mut dyn Surface) -> bool {
        let registered = self
            .registry
            .as_ref()
            .is_some_and(|registry| registry.contains_media(element));
        if !registered {
            return false;
        }
        warn!(?element, "media failed to load, showing placeholder");
        surface.apply(element, Prop::Placeholder);
        true
    }

    /// Advance virtual time by `dt`, firing every wake that falls due.
    pub fn tick(&mut self, dt: Duration, surface: &mut dyn Surface) {
        let until = self.timers.now() + dt;
        while let Some(wake) = self.timers.pop_due(until) {
            trace!(?wake, now = ?self.timers.now(), "wake");
            self.handle(wake, surface);
        }
        self.timers.advance_to(until);
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.registry.as_ref().map_or(0, SlideRegistry::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_mounted(&self) -> bool {
        self.discovery == Discovery::Mounted
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning(_))
    }

    pub fn discovery(&self) -> Discovery {
        self.discovery
    }

    pub fn registry(&self) -> Option<&SlideRegistry> {
        self.registry.as_ref()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    /// When autoplay will fire next, if it is running.
    pub fn next_autoplay_at(&self) -> Option<Duration> {
        self.autoplay.handle().and_then(|handle| self.timers.due(handle))
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// One flag per slide pair, set on the current one.
    pub fn indicators(&self) -> Vec<bool> {
        (0..self.len()).map(|index| index == self.current).collect()
    }

    fn navigate(&mut self, index: i64, surface: &mut dyn Surface) -> Outcome {
        let count = self.len();
        if count == 0 {
            return Outcome::NotMounted;
        }
        let outcome = self.request(normalize(index, count), surface);
        // Manual interaction pushes the next automatic advance back
        self.restart_autoplay();
        outcome
    }

    fn request(&mut self, target: usize, surface: &mut dyn Surface) -> Outcome {
        let Some(registry) = self.registry.as_ref() else {
            return Outcome::NotMounted;
        };
        if self.is_transitioning() {
            debug!(target, current = self.current, "transition running, request dropped");
            return Outcome::Busy;
        }
        if target == self.current {
            return Outcome::SameSlide;
        }
        let (Some(outgoing), Some(incoming)) =
            (registry.get(self.current).copied(), registry.get(target).copied())
        else {
            return Outcome::NotMounted;
        };

        let from = self.current;
        let duration = self.config.transition_duration();
        let crossfade = Crossfade::new(outgoing, incoming, Fade::ease_in_out(duration));

        // Readers see the destination right away; visuals follow
        self.current = target;
        self.state = TransitionState::Transitioning(crossfade);
        crossfade.commit(surface);
        self.timers.next_frame(Wake::Frame);
        self.timers.once(duration, Wake::TransitionEnd);

        info!(from, to = target, "transition started");
        Outcome::Started { from, to: target }
    }

    fn handle(&mut self, wake: Wake, surface: &mut dyn Surface) {
        match wake {
            Wake::Discovery => {
                self.retry = None;
                if !self.mount(surface) {
                    self.schedule_retry();
                }
            }
            Wake::Frame => {
                if let TransitionState::Transitioning(crossfade) = self.state {
                    crossfade.animate(surface);
                }
            }
            Wake::TransitionEnd => {
                if let TransitionState::Transitioning(crossfade) = self.state {
                    crossfade.finish(surface);
                    self.state = TransitionState::Idle;
                    debug!(current = self.current, "transition finished");
                    // Give the new slide a full interval on screen
                    if self.autoplay.is_running() {
                        self.restart_autoplay();
                    }
                }
            }
            Wake::Autoplay => {
                let count = self.len();
                if count > 1 {
                    let target = (self.current + 1) % count;
                    if self.request(target, surface) == Outcome::Busy {
                        trace!("autoplay tick dropped");
                    }
                }
            }
        }
    }

    fn schedule_retry(&mut self) {
        let Discovery::Pending { attempts } = self.discovery else {
            return;
        };
        let attempts = attempts + 1;
        if attempts > self.config.max_discovery_retries {
            warn!(attempts, "carousel slides never appeared, giving up");
            self.discovery = Discovery::Abandoned;
            return;
        }
        self.discovery = Discovery::Pending { attempts };

        if let Some(previous) = self.retry.take() {
            self.timers.cancel(previous);
        }
        debug!(attempts, "slides not ready, retrying later");
        self.retry = Some(self.timers.once(self.config.retry_interval(), Wake::Discovery));
    }

    fn restart_autoplay(&mut self) {
        let slides = self.len();
        self.autoplay.restart(&mut self.timers, Wake::Autoplay, slides);
    }
}
