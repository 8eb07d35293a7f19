//! Rendering module
//!
//! The scene is drawn against the `Canvas` trait. `DrawList` records a frame
//! and the WebGPU backend turns the recording into flat-colored sprite quads.

pub mod assets;
pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod shapes;

pub use assets::{SpriteId, SpriteInfo, SpriteSheet};
pub use canvas::{Canvas, DrawCommand, DrawList, TextAlign, TextStyle};
pub use pipeline::RenderState;
pub use scene::render as render_scene;
pub use shapes::{Tessellation, TextRun, Vertex, tessellate};
