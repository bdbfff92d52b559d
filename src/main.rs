use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use carousel::constants::*;
use carousel::media::{caption_for, load_sorted_image_paths, shuffle_paths};
use carousel::{CarouselEngine, Config};

mod texture_loader;
mod viewer;

use crate::texture_loader::load_texture_with_exif_rotation;
use crate::viewer::{DESIGN_WIDTH, MARGIN, MEDIA_WIDTH, RaylibSurface, TEXT_WIDTH, with_alpha};

const WINDOW_WIDTH: i32 = 1280;
const WINDOW_HEIGHT: i32 = 720;
const FPS: u32 = 60;

const DIGIT_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

/// Crossfading photo carousel with captions.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory of images to rotate through
    dir: PathBuf,

    /// Text file with one caption per image, in file name order
    #[arg(long)]
    captions: Option<PathBuf>,

    /// TOML file with carousel timings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show images in random order
    #[arg(long)]
    shuffle: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut paths = load_sorted_image_paths(&args.dir)?;
    if args.shuffle {
        shuffle_paths(&mut paths);
    }
    let captions: Vec<String> = match &args.captions {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read captions {}", path.display()))?
            .lines()
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };
    info!(dir = %args.dir.display(), images = paths.len(), "starting carousel");

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Build the page ---
    let mut surface = RaylibSurface::new();
    let text_root = surface.add_container(TEXT_CONTAINER, TEXT_WIDTH);
    let media_root = surface.add_container(MEDIA_CONTAINER, MEDIA_WIDTH);
    let mut broken = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        let caption = captions.get(i).cloned().unwrap_or_else(|| caption_for(path));
        surface.add_caption(text_root, TEXT_SLIDE, &caption);

        let texture = match load_texture_with_exif_rotation(&mut rl, &thread, path) {
            Ok(texture) => Some(texture),
            Err(e) => {
                warn!("skipping image pixels: {e:#}");
                None
            }
        };
        let failed = texture.is_none();
        let picture = surface.add_picture(media_root, MEDIA_SLIDE, texture);
        if failed {
            broken.push(picture);
        }
    }

    let mut engine = CarouselEngine::new(config.carousel);
    if !engine.mount(&mut surface) {
        bail!("no slides to show");
    }
    for picture in broken {
        engine.on_media_error(picture, &mut surface);
    }

    // --- Main Loop ---
    let mut hovered = false;
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            engine.next(&mut surface);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            engine.previous(&mut surface);
        }
        for (index, key) in DIGIT_KEYS.iter().enumerate() {
            if rl.is_key_pressed(*key) {
                engine.go_to(index as i64, &mut surface);
            }
        }

        let scale = rl.get_screen_width() as f32 / DESIGN_WIDTH;
        let max_height = rl.get_screen_height() as f32 - 3.0 * MARGIN * scale;
        let text_area = Rectangle::new(
            MARGIN * scale,
            MARGIN * scale,
            TEXT_WIDTH * scale,
            (surface.container_height(text_root) * scale).min(max_height),
        );
        let media_area = Rectangle::new(
            (2.0 * MARGIN + TEXT_WIDTH) * scale,
            MARGIN * scale,
            MEDIA_WIDTH * scale,
            (surface.container_height(media_root) * scale).min(max_height),
        );

        let mouse = rl.get_mouse_position();
        let inside = contains(text_area, mouse) || contains(media_area, mouse);
        if inside != hovered {
            hovered = inside;
            if hovered {
                engine.pointer_enter();
            } else {
                engine.pointer_leave();
            }
        }

        engine.tick(Duration::from_secs_f32(dt), &mut surface);
        surface.update(dt);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        surface.draw(&mut d, text_root, text_area);
        surface.draw(&mut d, media_root, media_area);

        // Indicator dots under the pictures
        let indicators = engine.indicators();
        let spacing = 24.0 * scale;
        let start_x = media_area.x + (media_area.width - spacing * indicators.len() as f32) * 0.5;
        let y = media_area.y + media_area.height + MARGIN * 0.5 * scale;
        for (i, active) in indicators.iter().enumerate() {
            let alpha = if *active { 1.0 } else { 0.35 };
            d.draw_circle(
                (start_x + spacing * (i as f32 + 0.5)) as i32,
                y as i32,
                6.0 * scale,
                with_alpha(Color::WHITE, alpha),
            );
        }
    }

    Ok(())
}

fn contains(area: Rectangle, point: Vector2) -> bool {
    point.x >= area.x
        && point.x <= area.x + area.width
        && point.y >= area.y
        && point.y <= area.y + area.height
}
