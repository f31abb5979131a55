//! # Voxels Module
//!
//! Everything that defines the block world: block types and faces, chunk
//! storage with generation and meshing, and the world-level chunk registry.

pub mod block;
pub mod chunk;
pub mod world;
