pub const RETRY_INTERVAL_MS: u64 = 200;        // Spacing between discovery attempts
pub const MAX_DISCOVERY_RETRIES: u32 = 20;     // Discovery attempts before giving up
pub const TRANSITION_DURATION_MS: u64 = 1000;  // Crossfade length
pub const AUTOPLAY_INTERVAL_MS: u64 = 5000;    // Time a slide stays fully visible

pub const DEFAULT_TEXT_HEIGHT: f32 = 300.0;    // Text container height when nothing measured
pub const DEFAULT_MEDIA_HEIGHT: f32 = 600.0;   // Media height when an image is not loaded yet

pub const Z_RESTING: i32 = 1;                  // Hidden slides
pub const Z_CURRENT: i32 = 2;                  // Current slide when idle
pub const Z_INCOMING: i32 = 10;                // Incoming slide during a crossfade

// Paged (multi-card) carousel
pub const PAGED_AUTOPLAY_INTERVAL_MS: u64 = 4000;
pub const PAGED_RESIZE_DEBOUNCE_MS: u64 = 250;
pub const PAGED_GAP: f32 = 24.0;
pub const WIDE_BREAKPOINT: f32 = 1024.0;       // 3 cards per page at or above
pub const MEDIUM_BREAKPOINT: f32 = 768.0;      // 2 cards per page at or above

// Hero markup selectors
pub const TEXT_CONTAINER: &str = "slide-one-item-alt-text";
pub const TEXT_SLIDE: &str = "slide-text";
pub const MEDIA_CONTAINER: &str = "slide-one-item-alt";
pub const MEDIA_SLIDE: &str = "img";

pub const PLACEHOLDER_RGB: (u8, u8, u8) = (0xf0, 0xf0, 0xf0);
