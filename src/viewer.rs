//! raylib-backed `Surface`: captions on the left, pictures on the right,
//! with opacity fades run by per-element tweens.

use carousel::constants::PLACEHOLDER_RGB;
use carousel::easing::{Easing, Fade};
use carousel::{ElementId, Position, Prop, Surface};
use raylib::prelude::*;

pub const DESIGN_WIDTH: f32 = 1920.0;   // Layout is computed at this width, then scaled
pub const TEXT_WIDTH: f32 = 640.0;
pub const MEDIA_WIDTH: f32 = 1088.0;
pub const MARGIN: f32 = 64.0;

const FONT_SIZE: i32 = 40;
const LINE_HEIGHT: f32 = 52.0;
const GLYPH_WIDTH: f32 = 22.0;          // Average advance at FONT_SIZE
const TEXT_PADDING: f32 = 32.0;

enum Content {
    Container { width: f32 },
    Caption(Vec<String>),
    Picture(Option<Texture2D>),
}

struct Node {
    class: &'static str,
    parent: Option<ElementId>,
    content: Content,
    position: Position,
    z_index: i32,
    opacity: f32,
    fade: Option<ease::Tween>,
    visible: bool,
    height: Option<f32>,
    placeholder: bool,
}

#[derive(Default)]
pub struct RaylibSurface {
    nodes: Vec<Node>,
}

impl RaylibSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A root container laid out `width` design units wide.
    pub fn add_container(&mut self, class: &'static str, width: f32) -> ElementId {
        self.push(class, None, Content::Container { width })
    }

    pub fn add_caption(&mut self, parent: ElementId, class: &'static str, text: &str) -> ElementId {
        let max_chars = ((TEXT_WIDTH - 2.0 * TEXT_PADDING) / GLYPH_WIDTH) as usize;
        self.push(class, Some(parent), Content::Caption(wrap(text, max_chars)))
    }

    /// `None` for an image that failed to load.
    pub fn add_picture(&mut self, parent: ElementId, class: &'static str, texture: Option<Texture2D>) -> ElementId {
        self.push(class, Some(parent), Content::Picture(texture))
    }

    /// Advance running fades by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for node in &mut self.nodes {
            if let Some(tween) = node.fade.as_mut() {
                node.opacity = tween.apply(dt);
            }
        }
    }

    /// Height of a container in design units.
    pub fn container_height(&self, container: ElementId) -> f32 {
        self.nodes
            .get(container.0)
            .and_then(|node| node.height)
            .unwrap_or(0.0)
    }

    /// Draw the children of `container` inside `area`, lowest z first.
    pub fn draw(&self, d: &mut RaylibDrawHandle, container: ElementId, area: Rectangle) {
        let mut children: Vec<&Node> = self
            .nodes
            .iter()
            .filter(|node| node.parent == Some(container) && node.visible)
            .collect();
        children.sort_by_key(|node| node.z_index);

        let scale = match self.nodes.get(container.0).map(|node| &node.content) {
            Some(Content::Container { width }) if *width > 0.0 => area.width / width,
            _ => return,
        };
        for node in children {
            let alpha = node.opacity;
            if alpha <= 0.0 {
                continue;
            }
            match &node.content {
                Content::Container { .. } => {}
                Content::Caption(lines) => {
                    let font_size = (FONT_SIZE as f32 * scale) as i32;
                    for (i, line) in lines.iter().enumerate() {
                        let x = area.x + TEXT_PADDING * scale;
                        let y = area.y + (TEXT_PADDING + i as f32 * LINE_HEIGHT) * scale;
                        d.draw_text(line, x as i32, y as i32, font_size, with_alpha(Color::WHITE, alpha));
                    }
                }
                Content::Picture(texture) => {
                    if node.placeholder {
                        let (r, g, b) = PLACEHOLDER_RGB;
                        d.draw_rectangle_rec(area, with_alpha(Color::new(r, g, b, 255), alpha));
                    }
                    if let Some(texture) = texture {
                        draw_contained(d, texture, area, alpha);
                    }
                }
            }
        }
    }

    fn push(&mut self, class: &'static str, parent: Option<ElementId>, content: Content) -> ElementId {
        self.nodes.push(Node {
            class,
            parent,
            content,
            position: Position::Static,
            z_index: 0,
            opacity: 1.0,
            fade: None,
            visible: true,
            height: None,
            placeholder: false,
        });
        ElementId(self.nodes.len() - 1)
    }
}

impl Surface for RaylibSurface {
    fn find_container(&self, selector: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|node| node.parent.is_none() && node.class == selector)
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
        if node.position != Position::Static {
            return None;
        }
        match &node.content {
            Content::Container { .. } => node.height,
            Content::Caption(lines) => Some(lines.len() as f32 * LINE_HEIGHT + 2.0 * TEXT_PADDING),
            Content::Picture(Some(texture)) if texture.width() > 0 => {
                Some(texture.height() as f32 * MEDIA_WIDTH / texture.width() as f32)
            }
            Content::Picture(_) => None,
        }
    }

    fn apply(&mut self, element: ElementId, prop: Prop) {
        let Some(node) = self.nodes.get_mut(element.0) else {
            return;
        };
        match prop {
            Prop::Position(position) => node.position = position,
            Prop::ZIndex(z) => node.z_index = z,
            Prop::Opacity { value, fade: Some(fade) } if !fade.duration.is_zero() => {
                node.fade = Some(tween(fade, node.opacity, value));
            }
            Prop::Opacity { value, .. } => {
                node.opacity = value;
                node.fade = None;
            }
            // Pointer hit-testing is done on the whole carousel area
            Prop::Interactive(_) => {}
            Prop::Visible(visible) => node.visible = visible,
            Prop::Height(height) => node.height = Some(height),
            Prop::Placeholder => node.placeholder = true,
        }
    }

    fn flush(&mut self) {
        // Styles are applied immediately; fades start from the committed value
    }
}

fn tween(fade: Fade, from: f32, to: f32) -> ease::Tween {
    let easer = match fade.easing {
        Easing::EaseInOut => ease::sine_in_out,
    };
    ease::Tween::new(easer, from, to, fade.duration.as_secs_f32())
}

fn draw_contained(d: &mut RaylibDrawHandle, texture: &Texture2D, area: Rectangle, alpha: f32) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return;
    }
    let scale = (area.width / tex_width).min(area.height / tex_height);
    let width = tex_width * scale;
    let height = tex_height * scale;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(
            area.x + (area.width - width) * 0.5,
            area.y + (area.height - height) * 0.5,
            width,
            height,
        ),
        Vector2::new(0.0, 0.0),
        0.0,
        with_alpha(Color::WHITE, alpha),
    );
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

/// Greedy word wrap to at most `max_chars` per line.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
