//! The rendering target a carousel drives.
//!
//! A `Surface` is a queryable tree of elements with writable visual
//! properties: a browser DOM, the raylib viewer, or [`MemorySurface`] in
//! tests. The engine only touches the elements it registered.

mod memory;

pub use memory::{MemorySurface, Style};

use crate::easing::Fade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// In normal flow, measurable.
    #[default]
    Static,
    /// Stacked on top of its siblings for crossfading.
    Absolute,
}

/// One imperative style mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prop {
    Position(Position),
    ZIndex(i32),
    /// Set opacity, animated when `fade` is given.
    Opacity { value: f32, fade: Option<Fade> },
    Interactive(bool),
    Visible(bool),
    /// Fixed height of a container.
    Height(f32),
    /// Neutral treatment for media that failed to load.
    Placeholder,
}

pub trait Surface {
    fn find_container(&self, selector: &str) -> Option<ElementId>;

    /// Children of `container` matching `selector`, in document order.
    fn find_children(&self, container: ElementId, selector: &str) -> Vec<ElementId>;

    /// Natural height of an element, `None` when it cannot be measured yet
    /// (media still loading, or the element is not in measurable layout).
    fn natural_height(&self, element: ElementId) -> Option<f32>;

    fn apply(&mut self, element: ElementId, prop: Prop);

    /// Commit pending style changes so later changes animate from them.
    fn flush(&mut self);
}
