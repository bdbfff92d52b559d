use tracing::debug;

use crate::constants::*;
use crate::surface::{ElementId, Position, Prop, Surface};

/// One text element and one media element shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidePair {
    pub index: usize,
    pub text: ElementId,
    pub media: ElementId,
}

impl SlidePair {
    pub fn elements(&self) -> [ElementId; 2] {
        [self.text, self.media]
    }

    /// Apply the same property to both halves of the pair.
    pub fn apply(&self, surface: &mut dyn Surface, prop: Prop) {
        for element in self.elements() {
            surface.apply(element, prop);
        }
    }
}

/// Where a carousel finds its slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselSelector {
    pub text_container: String,
    pub text_slide: String,
    pub media_container: String,
    pub media_slide: String,
}

impl Default for CarouselSelector {
    fn default() -> Self {
        Self {
            text_container: TEXT_CONTAINER.to_string(),
            text_slide: TEXT_SLIDE.to_string(),
            media_container: MEDIA_CONTAINER.to_string(),
            media_slide: MEDIA_SLIDE.to_string(),
        }
    }
}

/// Wrap any integer onto `[0, count)`. `count` must be non-zero.
pub fn normalize(index: i64, count: usize) -> usize {
    let count = count as i64;
    (((index % count) + count) % count) as usize
}

/// The discovered slide pairs of one carousel and its container sizing.
#[derive(Debug, Clone)]
pub struct SlideRegistry {
    pairs: Vec<SlidePair>,
    text_container: ElementId,
    media_container: ElementId,
    text_height: f32,
    media_height: f32,
}

impl SlideRegistry {
    /// Look up the containers and their slides. Returns `None` when either
    /// side has nothing yet; surplus slides on the longer side are left
    /// alone.
    pub fn discover(surface: &dyn Surface, selector: &CarouselSelector) -> Option<Self> {
        let text_container = surface.find_container(&selector.text_container)?;
        let media_container = surface.find_container(&selector.media_container)?;

        let texts = surface.find_children(text_container, &selector.text_slide);
        let media = surface.find_children(media_container, &selector.media_slide);
        if texts.is_empty() || media.is_empty() {
            debug!(texts = texts.len(), media = media.len(), "slides not found");
            return None;
        }
        if texts.len() != media.len() {
            debug!(
                texts = texts.len(),
                media = media.len(),
                "mismatched slide counts, keeping the common prefix"
            );
        }

        let pairs = texts
            .into_iter()
            .zip(media)
            .enumerate()
            .map(|(index, (text, media))| SlidePair { index, text, media })
            .collect();

        Some(Self {
            pairs,
            text_container,
            media_container,
            text_height: DEFAULT_TEXT_HEIGHT,
            media_height: DEFAULT_MEDIA_HEIGHT,
        })
    }

    /// Measure every slide, pin the container heights to the tallest one per
    /// side and stack the slides for crossfading with pair 0 showing.
    pub fn layout(&mut self, surface: &mut dyn Surface) {
        // Put everything in flow, hidden, so it can be measured without flashing
        for pair in &self.pairs {
            pair.apply(surface, Prop::Position(Position::Static));
            pair.apply(surface, Prop::Visible(false));
            pair.apply(surface, Prop::Opacity { value: 0.0, fade: None });
        }
        surface.flush();

        let max_text = self
            .pairs
            .iter()
            .filter_map(|pair| surface.natural_height(pair.text))
            .fold(0.0_f32, f32::max);
        // Media that has not loaded yet reserves the default height
        let max_media = self
            .pairs
            .iter()
            .map(|pair| {
                surface
                    .natural_height(pair.media)
                    .filter(|height| *height > 0.0)
                    .unwrap_or(DEFAULT_MEDIA_HEIGHT)
            })
            .fold(0.0_f32, f32::max);

        self.text_height = if max_text > 0.0 { max_text } else { DEFAULT_TEXT_HEIGHT };
        self.media_height = if max_media > 0.0 { max_media } else { DEFAULT_MEDIA_HEIGHT };
        surface.apply(self.text_container, Prop::Height(self.text_height));
        surface.apply(self.media_container, Prop::Height(self.media_height));

        for pair in &self.pairs {
            let current = pair.index == 0;
            pair.apply(surface, Prop::Position(Position::Absolute));
            pair.apply(surface, Prop::Opacity { value: if current { 1.0 } else { 0.0 }, fade: None });
            pair.apply(surface, Prop::Visible(true));
            pair.apply(surface, Prop::Interactive(current));
            pair.apply(surface, Prop::ZIndex(if current { Z_CURRENT } else { Z_RESTING }));
        }
        surface.flush();
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlidePair> {
        self.pairs.get(index)
    }

    pub fn pairs(&self) -> &[SlidePair] {
        &self.pairs
    }

    pub fn contains_media(&self, element: ElementId) -> bool {
        self.pairs.iter().any(|pair| pair.media == element)
    }

    pub fn text_height(&self) -> f32 {
        self.text_height
    }

    pub fn media_height(&self) -> f32 {
        self.media_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use proptest::prelude::*;

    fn page(texts: &[Option<f32>], media: &[Option<f32>]) -> MemorySurface {
        let mut surface = MemorySurface::new();
        let text_root = surface.add_container(TEXT_CONTAINER);
        let media_root = surface.add_container(MEDIA_CONTAINER);
        for height in texts {
            surface.add_child(text_root, TEXT_SLIDE, *height);
        }
        for height in media {
            surface.add_child(media_root, MEDIA_SLIDE, *height);
        }
        surface
    }

    #[test]
    fn discovery_needs_both_sides() {
        let selector = CarouselSelector::default();
        assert!(SlideRegistry::discover(&page(&[Some(10.0)], &[]), &selector).is_none());
        assert!(SlideRegistry::discover(&page(&[], &[Some(10.0)]), &selector).is_none());
        assert!(SlideRegistry::discover(&MemorySurface::new(), &selector).is_none());
    }

    #[test]
    fn surplus_slides_are_left_untouched() {
        let mut surface = page(&[Some(1.0); 4], &[Some(1.0); 2]);
        let mut registry = SlideRegistry::discover(&surface, &CarouselSelector::default()).unwrap();
        assert_eq!(registry.len(), 2);

        registry.layout(&mut surface);
        let text_root = surface.find_container(TEXT_CONTAINER).unwrap();
        let texts = surface.find_children(text_root, TEXT_SLIDE);
        for surplus in &texts[2..] {
            assert!(surface.log().iter().all(|(element, _)| element != surplus));
        }
    }

    #[test]
    fn containers_take_the_tallest_slide() {
        let mut surface = page(&[Some(120.0), Some(180.0)], &[Some(400.0), Some(450.0)]);
        let mut registry = SlideRegistry::discover(&surface, &CarouselSelector::default()).unwrap();
        registry.layout(&mut surface);

        assert_eq!(registry.text_height(), 180.0);
        assert_eq!(registry.media_height(), 450.0);
        let text_root = surface.find_container(TEXT_CONTAINER).unwrap();
        assert_eq!(surface.style(text_root).height, Some(180.0));
    }

    #[test]
    fn unmeasurable_slides_fall_back_to_defaults() {
        let mut surface = page(&[None, Some(0.0)], &[Some(200.0), None]);
        let mut registry = SlideRegistry::discover(&surface, &CarouselSelector::default()).unwrap();
        registry.layout(&mut surface);

        assert_eq!(registry.text_height(), DEFAULT_TEXT_HEIGHT);
        // An image still loading reserves the default media height
        assert_eq!(registry.media_height(), DEFAULT_MEDIA_HEIGHT);
    }

    #[test]
    fn layout_shows_only_the_first_pair() {
        let mut surface = page(&[Some(1.0); 3], &[Some(1.0); 3]);
        let mut registry = SlideRegistry::discover(&surface, &CarouselSelector::default()).unwrap();
        registry.layout(&mut surface);

        for pair in registry.pairs() {
            for element in pair.elements() {
                let style = surface.style(element);
                assert_eq!(style.position, Position::Absolute);
                assert!(style.visible);
                if pair.index == 0 {
                    assert_eq!(style.opacity, 1.0);
                    assert!(style.interactive);
                    assert_eq!(style.z_index, Z_CURRENT);
                } else {
                    assert_eq!(style.opacity, 0.0);
                    assert!(!style.interactive);
                    assert_eq!(style.z_index, Z_RESTING);
                }
            }
        }
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert_eq!(normalize(-1, 5), 4);
        assert_eq!(normalize(5, 5), 0);
        assert_eq!(normalize(-11, 5), 4);
        assert_eq!(normalize(2, 5), 2);
    }

    proptest! {
        #[test]
        fn normalize_matches_modular_formula(index in any::<i32>(), count in 1usize..64) {
            let index = index as i64;
            let n = count as i64;
            let expected = (((index % n) + n) % n) as usize;
            let wrapped = normalize(index, count);
            prop_assert_eq!(wrapped, expected);
            prop_assert!(wrapped < count);
        }
    }
}
