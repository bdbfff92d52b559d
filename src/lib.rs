//! Crossfading slide carousels driven by virtual-time timers.
//!
//! [`CarouselEngine`] rotates paired text/media slides on any [`Surface`];
//! [`PagedCarousel`] pages a track of cards across three width tiers.

pub mod autoplay;
pub mod config;
pub mod constants;
pub mod crossfade;
pub mod easing;
pub mod engine;
pub mod error;
pub mod media;
pub mod paged;
pub mod slide;
pub mod state;
pub mod surface;
pub mod timers;

pub use config::{CarouselConfig, Config, PagedConfig};
pub use engine::CarouselEngine;
pub use error::ConfigError;
pub use paged::{PagedCarousel, Tier};
pub use slide::{CarouselSelector, SlidePair, SlideRegistry};
pub use state::{Discovery, Outcome};
pub use surface::{ElementId, MemorySurface, Position, Prop, Surface};
