//! Tessellation of recorded draw calls into colored triangles
//!
//! Each sprite becomes one quad covering its visible box, pushed through
//! the canvas transform stack. Text can't be drawn by the GPU pipeline, so
//! text runs are resolved to canvas space and handed back to the caller.

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};

use super::assets::{SpriteId, SpriteInfo, SpriteSheet};
use super::canvas::{DrawCommand, DrawList, TextStyle};

/// Colored triangle corner. Tessellation emits canvas pixels; the pipeline
/// rewrites `position` to clip space in place before upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// A text draw resolved to canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
    pub alpha: f32,
}

/// Output of a tessellation pass
#[derive(Debug, Clone, Default)]
pub struct Tessellation {
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextRun>,
    /// Sprites that had no sheet entry and were skipped
    pub skipped: Vec<SpriteId>,
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Affine2,
    alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// Replay a draw list against the sprite sheet
pub fn tessellate(list: &DrawList, sheet: &SpriteSheet) -> Tessellation {
    let mut out = Tessellation {
        vertices: Vec::with_capacity(list.len() * 6),
        ..Default::default()
    };
    let mut current = DrawState::default();
    let mut stack: Vec<DrawState> = Vec::new();

    for command in list.commands() {
        match command {
            DrawCommand::Image { sprite, pos } => match sheet.get(*sprite) {
                Some(info) => {
                    out.vertices
                        .extend(sprite_quad(info, *pos, current.transform, current.alpha));
                }
                None => {
                    if !out.skipped.contains(sprite) {
                        out.skipped.push(*sprite);
                    }
                }
            },
            DrawCommand::Save => stack.push(current),
            // Unbalanced restores are ignored, as on a 2D canvas
            DrawCommand::Restore => current = stack.pop().unwrap_or(current),
            DrawCommand::Translate(offset) => {
                current.transform = current.transform * Affine2::from_translation(*offset);
            }
            DrawCommand::Scale(factor) => {
                current.transform = current.transform * Affine2::from_scale(*factor);
            }
            DrawCommand::Rotate(radians) => {
                current.transform = current.transform * Affine2::from_angle(*radians);
            }
            DrawCommand::Alpha(alpha) => current.alpha = alpha.clamp(0.0, 1.0),
            DrawCommand::Text { text, pos, style } => out.texts.push(TextRun {
                text: text.clone(),
                pos: current.transform.transform_point2(*pos),
                style: style.clone(),
                alpha: current.alpha,
            }),
        }
    }

    if !out.skipped.is_empty() {
        log::debug!("Sprites missing from sheet: {:?}", out.skipped);
    }
    out
}

/// Generate vertices for one sprite drawn at `origin` (sprite-local top left)
pub fn sprite_quad(info: &SpriteInfo, origin: Vec2, transform: Affine2, alpha: f32) -> [Vertex; 6] {
    let min = origin + info.visible_min;
    let max = min + info.visible_size;
    let mut color = info.tint;
    color[3] *= alpha;

    let corner = |x: f32, y: f32| {
        let p = transform.transform_point2(Vec2::new(x, y));
        Vertex::new(p.x, p.y, color)
    };
    let tl = corner(min.x, min.y);
    let tr = corner(max.x, min.y);
    let bl = corner(min.x, max.y);
    let br = corner(max.x, max.y);

    // Two triangles
    [tl, bl, tr, tr, bl, br]
}
