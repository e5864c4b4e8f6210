//! WebGPU rendering module
//!
//! Draw calls are tessellated into flat-colored triangles by `VertexCanvas`
//! and uploaded once per frame by `RenderState`.

pub mod canvas;
pub mod pipeline;
pub mod shapes;

pub use canvas::{Frame, TextItem, Vertex, VertexCanvas};
pub use pipeline::RenderState;
