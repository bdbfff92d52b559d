//! End-to-end timelines of the hero carousel against an in-memory page.

use std::time::Duration;

use carousel::constants::*;
use carousel::{
    CarouselConfig, CarouselEngine, Discovery, MemorySurface, Outcome, Surface,
};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn page(texts: usize, media: usize) -> MemorySurface {
    let mut surface = MemorySurface::new();
    let text_root = surface.add_container(TEXT_CONTAINER);
    let media_root = surface.add_container(MEDIA_CONTAINER);
    for _ in 0..texts {
        surface.add_child(text_root, TEXT_SLIDE, Some(120.0));
    }
    for _ in 0..media {
        surface.add_child(media_root, MEDIA_SLIDE, Some(480.0));
    }
    surface
}

fn timing(transition: u64, autoplay: u64) -> CarouselConfig {
    CarouselConfig {
        transition_duration_ms: transition,
        autoplay_interval_ms: autoplay,
        ..CarouselConfig::default()
    }
}

/// Opacity of the text and media halves of every pair.
fn opacities(engine: &CarouselEngine, surface: &MemorySurface) -> Vec<(f32, f32)> {
    engine
        .registry()
        .unwrap()
        .pairs()
        .iter()
        .map(|pair| (surface.style(pair.text).opacity, surface.style(pair.media).opacity))
        .collect()
}

fn visible_pairs(engine: &CarouselEngine, surface: &MemorySurface) -> usize {
    opacities(engine, surface)
        .into_iter()
        .filter(|(text, media)| *text == 1.0 && *media == 1.0)
        .count()
}

#[test]
fn exactly_one_pair_visible_after_mount() {
    for count in 1..6 {
        let mut surface = page(count, count);
        let mut engine = CarouselEngine::new(CarouselConfig::default());
        assert!(engine.mount(&mut surface));

        let opacities = opacities(&engine, &surface);
        assert_eq!(visible_pairs(&engine, &surface), 1);
        assert_eq!(opacities[0], (1.0, 1.0));
        assert!(opacities[1..].iter().all(|pair| *pair == (0.0, 0.0)));
    }
}

#[test]
fn autoplay_then_dropped_previous_then_rearm() {
    let mut surface = page(3, 3);
    let mut engine = CarouselEngine::new(timing(1000, 5000));
    assert!(engine.mount(&mut surface));
    assert_eq!(engine.current_index(), 0);

    // t=5000: autoplay fires, transition to 1 begins
    engine.tick(ms(5000), &mut surface);
    assert_eq!(engine.current_index(), 1);
    assert!(engine.is_transitioning());

    // t=5100: manual previous is dropped mid-transition
    engine.tick(ms(100), &mut surface);
    assert_eq!(engine.previous(&mut surface), Outcome::Busy);
    assert_eq!(engine.current_index(), 1);

    // t=6000: transition done, index 1 fully shown, next fire at 11000
    engine.tick(ms(900), &mut surface);
    assert!(!engine.is_transitioning());
    assert_eq!(opacities(&engine, &surface)[1], (1.0, 1.0));
    assert_eq!(engine.next_autoplay_at(), Some(ms(11_000)));

    engine.tick(ms(4999), &mut surface);
    assert_eq!(engine.current_index(), 1);
    engine.tick(ms(1), &mut surface);
    assert_eq!(engine.current_index(), 2);
}

#[test]
fn autoplay_keeps_rotating_until_stopped() {
    let mut surface = page(3, 3);
    let mut engine = CarouselEngine::new(timing(1000, 5000));
    engine.mount(&mut surface);

    let mut seen = Vec::new();
    for _ in 0..7 {
        engine.tick(ms(6000), &mut surface);
        seen.push(engine.current_index());
    }
    assert_eq!(seen, vec![1, 2, 0, 1, 2, 0, 1]);

    engine.stop_autoplay();
    engine.tick(ms(60_000), &mut surface);
    assert_eq!(engine.current_index(), 1);
}

#[test]
fn mismatched_counts_use_the_shorter_side() {
    let mut surface = page(4, 2);
    let mut engine = CarouselEngine::new(timing(1000, 5000));
    engine.mount(&mut surface);
    assert_eq!(engine.len(), 2);

    let text_root = surface.find_container(TEXT_CONTAINER).unwrap();
    let texts = surface.find_children(text_root, TEXT_SLIDE);
    for _ in 0..10 {
        engine.next(&mut surface);
        engine.tick(ms(1000), &mut surface);
        assert!(engine.current_index() < 2);
    }
    for surplus in &texts[2..] {
        assert_eq!(surface.style(*surplus).opacity, 1.0, "surplus slides are never touched");
        assert!(surface.log().iter().all(|(element, _)| element != surplus));
    }
}

#[test]
fn go_to_minus_one_wraps_to_last() {
    let mut surface = page(5, 5);
    let mut engine = CarouselEngine::new(CarouselConfig::default());
    engine.mount(&mut surface);

    assert_eq!(engine.go_to(-1, &mut surface), Outcome::Started { from: 0, to: 4 });
    assert_eq!(engine.current_index(), 4);
}

#[test]
fn completed_transition_restores_stacking_and_interaction() {
    let mut surface = page(3, 3);
    let mut engine = CarouselEngine::new(timing(1000, 5000));
    engine.mount(&mut surface);

    engine.go_to(2, &mut surface);
    engine.tick(ms(1000), &mut surface);

    let pairs = engine.registry().unwrap().pairs().to_vec();
    for element in pairs[0].elements() {
        let style = surface.style(element);
        assert_eq!(style.z_index, Z_RESTING);
        assert!(!style.interactive);
        assert_eq!(style.opacity, 0.0);
    }
    for element in pairs[2].elements() {
        let style = surface.style(element);
        assert_eq!(style.z_index, Z_CURRENT);
        assert!(style.interactive);
        assert_eq!(style.opacity, 1.0);
    }
    assert_eq!(visible_pairs(&engine, &surface), 1);
}

#[test]
fn manual_navigation_resets_autoplay() {
    let mut surface = page(3, 3);
    let mut engine = CarouselEngine::new(timing(1000, 5000));
    engine.mount(&mut surface);

    engine.tick(ms(4000), &mut surface);
    engine.next(&mut surface);
    assert_eq!(engine.next_autoplay_at(), Some(ms(9000)));

    // Completion at 5000 re-arms from there
    engine.tick(ms(1000), &mut surface);
    assert_eq!(engine.next_autoplay_at(), Some(ms(10_000)));
    assert_eq!(engine.current_index(), 1);
}

#[test]
fn discovery_retries_until_slides_appear() {
    let mut surface = MemorySurface::new();
    let mut engine = CarouselEngine::new(CarouselConfig::default());
    assert!(!engine.mount_or_retry(&mut surface));
    assert_eq!(engine.discovery(), Discovery::Pending { attempts: 1 });

    engine.tick(ms(RETRY_INTERVAL_MS), &mut surface);
    assert_eq!(engine.discovery(), Discovery::Pending { attempts: 2 });

    // Slides arrive from an independent rendering step
    let text_root = surface.add_container(TEXT_CONTAINER);
    let media_root = surface.add_container(MEDIA_CONTAINER);
    for _ in 0..2 {
        surface.add_child(text_root, TEXT_SLIDE, Some(50.0));
        surface.add_child(media_root, MEDIA_SLIDE, None);
    }

    engine.tick(ms(RETRY_INTERVAL_MS), &mut surface);
    assert!(engine.is_mounted());
    assert_eq!(engine.len(), 2);
    assert_eq!(engine.registry().unwrap().media_height(), DEFAULT_MEDIA_HEIGHT);
}

#[test]
fn discovery_gives_up_after_the_retry_cap() {
    let mut surface = MemorySurface::new();
    let config = CarouselConfig { max_discovery_retries: 3, ..CarouselConfig::default() };
    let mut engine = CarouselEngine::new(config);
    engine.mount_or_retry(&mut surface);

    engine.tick(ms(10 * RETRY_INTERVAL_MS), &mut surface);
    assert_eq!(engine.discovery(), Discovery::Abandoned);

    // Late slides are ignored for good
    let text_root = surface.add_container(TEXT_CONTAINER);
    let media_root = surface.add_container(MEDIA_CONTAINER);
    surface.add_child(text_root, TEXT_SLIDE, None);
    surface.add_child(media_root, MEDIA_SLIDE, None);
    assert!(!engine.mount(&mut surface));
    engine.tick(ms(10 * RETRY_INTERVAL_MS), &mut surface);
    assert!(!engine.is_mounted());
}

#[test]
fn zero_retries_means_a_single_attempt() {
    let mut surface = MemorySurface::new();
    let config = CarouselConfig { max_discovery_retries: 0, ..CarouselConfig::default() };
    let mut engine = CarouselEngine::new(config);

    assert!(!engine.mount_or_retry(&mut surface));
    assert_eq!(engine.discovery(), Discovery::Abandoned);
    assert_eq!(engine.next_autoplay_at(), None);
}

#[test]
fn stop_during_discovery_survives_the_late_mount() {
    let mut surface = MemorySurface::new();
    let mut engine = CarouselEngine::new(timing(1000, 5000));
    assert!(!engine.mount_or_retry(&mut surface));
    engine.stop_autoplay();

    let text_root = surface.add_container(TEXT_CONTAINER);
    let media_root = surface.add_container(MEDIA_CONTAINER);
    for _ in 0..3 {
        surface.add_child(text_root, TEXT_SLIDE, Some(50.0));
        surface.add_child(media_root, MEDIA_SLIDE, Some(300.0));
    }

    engine.tick(ms(RETRY_INTERVAL_MS), &mut surface);
    assert!(engine.is_mounted());
    assert!(!engine.is_autoplaying());

    engine.tick(ms(6000), &mut surface);
    assert_eq!(engine.current_index(), 0);
}

#[test]
fn autoplay_ticks_during_a_transition_are_dropped() {
    let mut surface = page(3, 3);
    let mut engine = CarouselEngine::new(timing(1000, 400));
    assert!(engine.mount(&mut surface));

    // t=400: first advance starts a 1000 ms crossfade
    engine.tick(ms(400), &mut surface);
    assert_eq!(engine.current_index(), 1);

    // t=800 and t=1200 land mid-transition and are dropped
    engine.tick(ms(900), &mut surface);
    assert_eq!(engine.now(), ms(1300));
    assert_eq!(engine.current_index(), 1);
    assert!(engine.is_transitioning());

    // Re-armed at completion (t=1400), so the next advance is at t=1800
    engine.tick(ms(499), &mut surface);
    assert_eq!(engine.current_index(), 1);
    engine.tick(ms(1), &mut surface);
    assert_eq!(engine.current_index(), 2);
}

#[test]
fn two_carousels_keep_separate_state() {
    let mut first_page = page(3, 3);
    let mut second_page = page(4, 4);
    let mut first = CarouselEngine::new(timing(1000, 5000));
    let mut second = CarouselEngine::new(timing(500, 2000));
    first.mount(&mut first_page);
    second.mount(&mut second_page);

    second.next(&mut second_page);
    first.tick(ms(1000), &mut first_page);
    second.tick(ms(1000), &mut second_page);

    assert_eq!(first.current_index(), 0);
    assert_eq!(second.current_index(), 1);
    assert!(!first.is_transitioning());
}

#[test]
fn failed_media_keeps_rotating() {
    let mut surface = page(2, 2);
    let mut engine = CarouselEngine::new(timing(1000, 5000));
    engine.mount(&mut surface);

    let broken = engine.registry().unwrap().pairs()[1].media;
    assert!(engine.on_media_error(broken, &mut surface));

    engine.tick(ms(6000), &mut surface);
    assert_eq!(engine.current_index(), 1);
    assert!(surface.style(broken).placeholder);
    assert_eq!(surface.style(broken).opacity, 1.0);
}
