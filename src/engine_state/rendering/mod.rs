//! # Rendering Module
//!
//! GPU-facing half of the engine: the vertex format chunk meshing emits,
//! texture management (depth buffer and sprite atlas), and the world
//! renderer that owns the pipelines and draws the visible chunk window.

pub mod renderer;
pub mod texture;
pub mod vertex;

pub use renderer::{ChunkGpuMesh, WorldRenderer};
pub use vertex::Vertex;
