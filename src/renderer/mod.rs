//! Rendering module
//!
//! Backend-agnostic: each frame becomes an ordered list of draw commands
//! (circles, triangles, text, overlays) that any 2D backend can paint.

pub mod draw;
pub mod scene;
pub mod starfield;

pub use draw::{DrawCommand, colors};
pub use scene::Renderer;
pub use starfield::Starfield;
