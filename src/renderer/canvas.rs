//! Drawing surface abstraction
//!
//! The scene is described against `Canvas`, a small 2D-context-like API
//! with a save/restore transform stack. `DrawList` records the calls so a
//! backend (or a test) can replay them.

use glam::Vec2;

use super::assets::SpriteId;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font and fill for a text run
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Pixel height
    pub size: f32,
    pub color: [f32; 4],
    pub align: TextAlign,
    pub bold: bool,
}

impl TextStyle {
    pub const HUD: TextStyle = TextStyle {
        size: 40.0,
        color: [0.0, 0.0, 0.0, 1.0],
        align: TextAlign::Left,
        bold: false,
    };
    pub const BANNER: TextStyle = TextStyle {
        size: 120.0,
        color: [1.0, 0.0, 0.0, 1.0],
        align: TextAlign::Center,
        bold: true,
    };
    pub const INDICATOR: TextStyle = TextStyle {
        size: 20.0,
        color: [1.0, 0.85, 0.1, 1.0],
        align: TextAlign::Center,
        bold: true,
    };
}

/// Rendering target for the scene
pub trait Canvas {
    /// Draw a sprite with its top-left corner at `pos`
    fn draw_image(&mut self, sprite: SpriteId, pos: Vec2);
    /// Push the current transform and alpha
    fn save(&mut self);
    /// Pop back to the last saved transform and alpha
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn scale(&mut self, factor: Vec2);
    /// Rotate by `radians`, clockwise on a y-down canvas
    fn rotate(&mut self, radians: f32);
    /// Global alpha for subsequent draws
    fn set_alpha(&mut self, alpha: f32);
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Image { sprite: SpriteId, pos: Vec2 },
    Save,
    Restore,
    Translate(Vec2),
    Scale(Vec2),
    Rotate(f32),
    Alpha(f32),
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Canvas that records every call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Sprites drawn, in draw order
    pub fn images(&self) -> impl Iterator<Item = (SpriteId, Vec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Image { sprite, pos } => Some((*sprite, *pos)),
            _ => None,
        })
    }

    /// Text runs drawn, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn draw_image(&mut self, sprite: SpriteId, pos: Vec2) {
        self.commands.push(DrawCommand::Image { sprite, pos });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn scale(&mut self, factor: Vec2) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style: style.clone(),
        });
    }
}
