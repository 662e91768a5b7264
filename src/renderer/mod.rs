//! WebGPU rendering module
//!
//! Draws the show as vertex-colored triangles: circle fans for rocket
//! heads and sparks, quads for rocket tails, alpha-blended over a dark
//! clear. Rendering is a pure read of simulation state.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{ResolvedPalette, frame_vertices};
pub use vertex::Vertex;
