//! # Chunk Module
//!
//! A chunk is the fundamental unit of world storage and meshing: a dense
//! 16x16x16 grid of block-type cells with an owning world-space origin, two
//! CPU vertex buffers (opaque geometry and water geometry), an optional
//! GPU-resident copy of those buffers, and a dirty flag.
//!
//! ## Mesh lifecycle
//!
//! The mesh buffers are valid renderable state only while `dirty == false`.
//! Any block mutation marks the chunk dirty; the mesh is rebuilt lazily the
//! first time the chunk is asked to render afterwards (see
//! [`Chunk::rebuild_mesh`]), never eagerly.

use cgmath::Point3;

use crate::engine_state::rendering::{ChunkGpuMesh, Vertex};

use super::block::block_type::BlockType;
use super::block::BlockTypeSize;

pub mod chunk_generation;
pub mod chunk_meshing;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_VOLUME: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Represents a 16x16x16 collection of voxel blocks in the world.
pub struct Chunk {
    /// World-space origin of this chunk's local `(0, 0, 0)` cell
    /// (chunk-grid coordinate multiplied by [`CHUNK_DIMENSION`]).
    pub position: Point3<f32>,

    /// Dense block storage in `x + z * 16 + y * 256` order, one
    /// [`BlockTypeSize`] tag per cell.
    blocks: Box<[BlockTypeSize; CHUNK_VOLUME as usize]>,

    /// CPU-side vertex buffer for all non-water geometry.
    pub opaque_vertices: Vec<Vertex>,

    /// CPU-side vertex buffer for water geometry, drawn by the translucent pass.
    pub water_vertices: Vec<Vertex>,

    /// GPU-resident copy of the two vertex buffers, created by the renderer
    /// on first render and recreated whenever the mesh is rebuilt.
    pub gpu_mesh: Option<ChunkGpuMesh>,

    /// Set on any block mutation; cleared by [`Chunk::rebuild_mesh`].
    pub dirty: bool,
}

/// Converts chunk-local coordinates to an index into the dense block array.
#[inline]
fn block_index(cx: usize, cy: usize, cz: usize) -> usize {
    cx + cz * CHUNK_DIMENSION as usize + cy * CHUNK_PLANE_SIZE as usize
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `position` - World-space origin of the chunk
    pub fn empty(position: Point3<f32>) -> Self {
        Chunk {
            position,
            blocks: Box::new([BlockType::AIR as BlockTypeSize; CHUNK_VOLUME as usize]),
            opaque_vertices: Vec::new(),
            water_vertices: Vec::new(),
            gpu_mesh: None,
            dirty: true,
        }
    }

    /// Gets the block type at the specified chunk-local coordinates.
    ///
    /// # Panics
    /// Panics if any coordinate is outside `0..CHUNK_DIMENSION`.
    pub fn get_block(&self, cx: usize, cy: usize, cz: usize) -> BlockType {
        BlockType::from_int(self.blocks[block_index(cx, cy, cz)])
    }

    /// Sets the block at the specified chunk-local coordinates and marks the
    /// chunk dirty so the mesh is rebuilt before the next render.
    pub fn set_block(&mut self, cx: usize, cy: usize, cz: usize, btype: BlockType) {
        self.blocks[block_index(cx, cy, cz)] = btype as BlockTypeSize;
        self.dirty = true;
    }

    /// Checks whether the block at the specified chunk-local coordinates is
    /// solid, using the single solidity rule shared with the physics
    /// integrator ([`BlockType::is_solid`]).
    pub fn is_block_solid(&self, cx: usize, cy: usize, cz: usize) -> bool {
        self.get_block(cx, cy, cz).is_solid()
    }

    /// Number of vertices in the opaque mesh buffer.
    pub fn opaque_vertex_count(&self) -> u32 {
        self.opaque_vertices.len() as u32
    }

    /// Number of vertices in the water mesh buffer.
    pub fn water_vertex_count(&self) -> u32 {
        self.water_vertices.len() as u32
    }
}
