use crate::easing::Fade;
use crate::surface::{ElementId, Position, Prop, Surface};

/// Last applied style of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub position: Position,
    pub z_index: i32,
    pub opacity: f32,
    pub fade: Option<Fade>,
    pub interactive: bool,
    pub visible: bool,
    pub height: Option<f32>,
    pub placeholder: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            position: Position::Static,
            z_index: 0,
            opacity: 1.0,
            fade: None,
            interactive: true,
            visible: true,
            height: None,
            placeholder: false,
        }
    }
}

#[derive(Debug)]
struct Node {
    class: String,
    parent: Option<ElementId>,
    natural_height: Option<f32>,
    style: Style,
}

/// In-memory element tree that records every mutation.
#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: Vec<Node>,
    log: Vec<(ElementId, Prop)>,
    flushes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&mut self, class: &str) -> ElementId {
        self.push(class, None, None)
    }

    pub fn add_child(&mut self, parent: ElementId, class: &str, natural_height: Option<f32>) -> ElementId {
        self.push(class, Some(parent), natural_height)
    }

    pub fn style(&self, element: ElementId) -> Style {
        self.nodes.get(element.0).map(|node| node.style).unwrap_or_default()
    }

    pub fn log(&self) -> &[(ElementId, Prop)] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    fn push(&mut self, class: &str, parent: Option<ElementId>, natural_height: Option<f32>) -> ElementId {
        self.nodes.push(Node {
            class: class.to_string(),
            parent,
            natural_height,
            style: Style::default(),
        });
        ElementId(self.nodes.len() - 1)
    }
}

impl Surface for MemorySurface {
    fn find_container(&self, selector: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|node| node.class == selector)
            .map(ElementId)
    }

    fn find_children(&self, container: ElementId, selector: &str) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent == Some(container) && node.class == selector)
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn natural_height(&self, element: ElementId) -> Option<f32> {
        let node = self.nodes.get(element.0)?;
        // Absolutely positioned elements are out of flow and measure nothing
        if node.style.position != Position::Static {
            return None;
        }
        node.natural_height
    }

    fn apply(&mut self, element: ElementId, prop: Prop) {
        let Some(node) = self.nodes.get_mut(element.0) else {
            return;
        };
        let style = &mut node.style;
        match prop {
            Prop::Position(position) => style.position = position,
            Prop::ZIndex(z) => style.z_index = z,
            Prop::Opacity { value, fade } => {
                style.opacity = value;
                style.fade = fade;
            }
            Prop::Interactive(interactive) => style.interactive = interactive,
            Prop::Visible(visible) => style.visible = visible,
            Prop::Height(height) => style.height = Some(height),
            Prop::Placeholder => style.placeholder = true,
        }
        self.log.push((element, prop));
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
