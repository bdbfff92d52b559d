//! Multi-card carousel: a horizontal track of cards shown a page at a time.
//!
//! The number of cards per page follows three fixed width tiers. Paging
//! wraps, autoplay advances one page at a time, and a resize settles after
//! a debounce before the page resets to the first one.

use std::time::Duration;

use tracing::debug;

use crate::autoplay::Autoplay;
use crate::config::PagedConfig;
use crate::constants::*;
use crate::slide::normalize;
use crate::timers::{TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Narrow,
    Medium,
    Wide,
}

impl Tier {
    pub fn for_width(width: f32) -> Self {
        if width >= WIDE_BREAKPOINT {
            Tier::Wide
        } else if width >= MEDIUM_BREAKPOINT {
            Tier::Medium
        } else {
            Tier::Narrow
        }
    }

    pub fn cards_per_page(self) -> usize {
        match self {
            Tier::Narrow => 1,
            Tier::Medium => 2,
            Tier::Wide => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagedWake {
    Autoplay,
    Resize,
}

#[derive(Debug)]
pub struct PagedCarousel {
    config: PagedConfig,
    cards: usize,
    tier: Tier,
    page: usize,
    pending_width: Option<f32>,
    resize: Option<TimerId>,
    timers: Timers<PagedWake>,
    autoplay: Autoplay,
}

impl PagedCarousel {
    /// A track of `cards` cards in a viewport `width` wide. Autoplay starts
    /// right away when there is more than one page.
    pub fn new(cards: usize, width: f32, config: PagedConfig) -> Self {
        let mut autoplay = Autoplay::new(config.autoplay_interval());
        autoplay.set_enabled(true);
        let mut carousel = Self {
            config,
            cards,
            tier: Tier::for_width(width),
            page: 0,
            pending_width: None,
            resize: None,
            timers: Timers::new(),
            autoplay,
        };
        carousel.restart_autoplay();
        carousel
    }

    pub fn pages(&self) -> usize {
        self.cards.div_ceil(self.tier.cards_per_page())
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn next(&mut self) -> usize {
        self.navigate(self.page as i64 + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.navigate(self.page as i64 - 1)
    }

    pub fn go_to(&mut self, page: i64) -> usize {
        self.navigate(page)
    }

    /// The viewport changed width. Applied once no further resize arrives
    /// for `resize_debounce_ms`.
    pub fn resize(&mut self, width: f32) {
        self.pending_width = Some(width);
        if let Some(previous) = self.resize.take() {
            self.timers.cancel(previous);
        }
        self.resize = Some(self.timers.once(self.config.resize_debounce(), PagedWake::Resize));
    }

    pub fn pointer_enter(&mut self) {
        self.autoplay.set_paused(true);
        self.autoplay.cancel(&mut self.timers);
    }

    pub fn pointer_leave(&mut self) {
        self.autoplay.set_paused(false);
        self.restart_autoplay();
    }

    pub fn start_autoplay(&mut self) {
        self.autoplay.set_enabled(true);
        self.restart_autoplay();
    }

    pub fn stop_autoplay(&mut self) {
        self.autoplay.set_enabled(false);
        self.autoplay.cancel(&mut self.timers);
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    pub fn tick(&mut self, dt: Duration) {
        let until = self.timers.now() + dt;
        while let Some(wake) = self.timers.pop_due(until) {
            match wake {
                PagedWake::Autoplay => {
                    let pages = self.pages();
                    if pages > 0 {
                        self.page = (self.page + 1) % pages;
                    }
                }
                PagedWake::Resize => self.settle_resize(),
            }
        }
        self.timers.advance_to(until);
    }

    /// Index of the leftmost card on the current page. The last page is
    /// pulled back so the track never shows empty space past the last card.
    pub fn first_visible_card(&self) -> usize {
        let per_page = self.tier.cards_per_page();
        (self.page * per_page).min(self.cards.saturating_sub(per_page))
    }

    pub fn card_width(&self, container_width: f32) -> f32 {
        let per_page = self.tier.cards_per_page() as f32;
        (container_width - self.config.gap * (per_page - 1.0)) / per_page
    }

    /// Horizontal translation of the track, zero or negative.
    pub fn offset(&self, container_width: f32) -> f32 {
        let step = self.card_width(container_width) + self.config.gap;
        -(self.first_visible_card() as f32 * step)
    }

    pub fn indicators(&self) -> Vec<bool> {
        (0..self.pages()).map(|page| page == self.page).collect()
    }

    fn navigate(&mut self, page: i64) -> usize {
        let pages = self.pages();
        if pages > 0 {
            self.page = normalize(page, pages);
        }
        self.restart_autoplay();
        self.page
    }

    fn settle_resize(&mut self) {
        self.resize = None;
        let Some(width) = self.pending_width.take() else {
            return;
        };
        let tier = Tier::for_width(width);
        debug!(width, ?tier, "viewport resized");
        self.tier = tier;
        self.page = 0;
        self.restart_autoplay();
    }

    fn restart_autoplay(&mut self) {
        let pages = self.pages();
        self.autoplay.restart(&mut self.timers, PagedWake::Autoplay, pages);
    }
}
