//! # Chunk Meshing
//!
//! Converts a chunk's block grid into renderable vertex data using culled
//! face emission: a face is emitted only where a non-air cell borders an
//! out-of-bounds neighbor or an air cell. Interior faces between two solid
//! cells are never emitted. Solidity is never tested across a chunk
//! boundary, so edge faces are always emitted even when the adjacent chunk
//! has a matching solid neighbor; that is an over-draw cost, not a
//! correctness bug within a single chunk.
//!
//! Output is two interleaved vertex buffers (`position xyz, normal xyz,
//! uv xy`, 6 vertices per visible quad, no index buffer): one for opaque
//! geometry and one for water, which is drawn by a separate translucent
//! pipeline.

use log::debug;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::block::{sprite_slot, MAX_SPRITE};

use super::{Chunk, CHUNK_DIMENSION};

/// One face template: 6 vertices of `x, y, z, nx, ny, nz, u, v`, spanning a
/// unit cube centered on the origin. Translated by the cell's local integer
/// coordinate when emitted.
type FaceTemplate = [[f32; 8]; 6];

#[rustfmt::skip]
const FRONT_FACE: FaceTemplate = [
    [-0.5, -0.5,  0.5,  0.0, 0.0, 1.0,  0.0, 0.0],
    [ 0.5, -0.5,  0.5,  0.0, 0.0, 1.0,  1.0, 0.0],
    [ 0.5,  0.5,  0.5,  0.0, 0.0, 1.0,  1.0, 1.0],
    [-0.5, -0.5,  0.5,  0.0, 0.0, 1.0,  0.0, 0.0],
    [ 0.5,  0.5,  0.5,  0.0, 0.0, 1.0,  1.0, 1.0],
    [-0.5,  0.5,  0.5,  0.0, 0.0, 1.0,  0.0, 1.0],
];

#[rustfmt::skip]
const BACK_FACE: FaceTemplate = [
    [-0.5, -0.5, -0.5,  0.0, 0.0, -1.0,  0.0, 0.0],
    [ 0.5,  0.5, -0.5,  0.0, 0.0, -1.0,  1.0, 1.0],
    [ 0.5, -0.5, -0.5,  0.0, 0.0, -1.0,  1.0, 0.0],
    [-0.5, -0.5, -0.5,  0.0, 0.0, -1.0,  0.0, 0.0],
    [-0.5,  0.5, -0.5,  0.0, 0.0, -1.0,  0.0, 1.0],
    [ 0.5,  0.5, -0.5,  0.0, 0.0, -1.0,  1.0, 1.0],
];

#[rustfmt::skip]
const BOTTOM_FACE: FaceTemplate = [
    [-0.5, -0.5, -0.5,  0.0, -1.0, 0.0,  0.0, 1.0],
    [ 0.5, -0.5, -0.5,  0.0, -1.0, 0.0,  1.0, 1.0],
    [ 0.5, -0.5,  0.5,  0.0, -1.0, 0.0,  1.0, 0.0],
    [-0.5, -0.5, -0.5,  0.0, -1.0, 0.0,  0.0, 1.0],
    [ 0.5, -0.5,  0.5,  0.0, -1.0, 0.0,  1.0, 0.0],
    [-0.5, -0.5,  0.5,  0.0, -1.0, 0.0,  0.0, 0.0],
];

#[rustfmt::skip]
const TOP_FACE: FaceTemplate = [
    [-0.5,  0.5, -0.5,  0.0, 1.0, 0.0,  0.0, 1.0],
    [ 0.5,  0.5, -0.5,  0.0, 1.0, 0.0,  1.0, 1.0],
    [ 0.5,  0.5,  0.5,  0.0, 1.0, 0.0,  1.0, 0.0],
    [-0.5,  0.5, -0.5,  0.0, 1.0, 0.0,  0.0, 1.0],
    [ 0.5,  0.5,  0.5,  0.0, 1.0, 0.0,  1.0, 0.0],
    [-0.5,  0.5,  0.5,  0.0, 1.0, 0.0,  0.0, 0.0],
];

#[rustfmt::skip]
const LEFT_FACE: FaceTemplate = [
    [-0.5, -0.5, -0.5,  -1.0, 0.0, 0.0,  0.0, 0.0],
    [-0.5, -0.5,  0.5,  -1.0, 0.0, 0.0,  1.0, 0.0],
    [-0.5,  0.5,  0.5,  -1.0, 0.0, 0.0,  1.0, 1.0],
    [-0.5, -0.5, -0.5,  -1.0, 0.0, 0.0,  0.0, 0.0],
    [-0.5,  0.5,  0.5,  -1.0, 0.0, 0.0,  1.0, 1.0],
    [-0.5,  0.5, -0.5,  -1.0, 0.0, 0.0,  0.0, 1.0],
];

#[rustfmt::skip]
const RIGHT_FACE: FaceTemplate = [
    [ 0.5, -0.5,  0.5,  1.0, 0.0, 0.0,  0.0, 0.0],
    [ 0.5, -0.5, -0.5,  1.0, 0.0, 0.0,  1.0, 0.0],
    [ 0.5,  0.5, -0.5,  1.0, 0.0, 0.0,  1.0, 1.0],
    [ 0.5, -0.5,  0.5,  1.0, 0.0, 0.0,  0.0, 0.0],
    [ 0.5,  0.5, -0.5,  1.0, 0.0, 0.0,  1.0, 1.0],
    [ 0.5,  0.5,  0.5,  1.0, 0.0, 0.0,  0.0, 1.0],
];

/// Face templates indexed by [`BlockSide`] as `usize`.
const FACE_TEMPLATES: [&FaceTemplate; 6] = [
    &FRONT_FACE,
    &BACK_FACE,
    &BOTTOM_FACE,
    &TOP_FACE,
    &LEFT_FACE,
    &RIGHT_FACE,
];

/// Appends one quad face (6 vertices) to `buffer`, translated to the cell at
/// `(bx, by, bz)`. The U texture coordinate indexes the atlas strip:
/// `(1 / MAX_SPRITE) * (template_u + sprite_slot)`.
fn add_face(
    buffer: &mut Vec<Vertex>,
    side: BlockSide,
    bx: usize,
    by: usize,
    bz: usize,
    btype: BlockType,
) {
    let slot = sprite_slot(btype, side) as f32;
    for row in FACE_TEMPLATES[side as usize] {
        buffer.push(Vertex {
            position: [
                row[0] + bx as f32,
                row[1] + by as f32,
                row[2] + bz as f32,
            ],
            normal: [row[3], row[4], row[5]],
            tex_coords: [(1.0 / MAX_SPRITE as f32) * (row[6] + slot), row[7]],
        });
    }
}

impl Chunk {
    /// Rebuilds both CPU vertex buffers from the block grid and clears the
    /// dirty flag. The stale GPU mesh is dropped so the renderer re-uploads
    /// on the next render.
    ///
    /// Triggered lazily by the render path the first time a dirty chunk is
    /// drawn; it never self-triggers otherwise.
    pub fn rebuild_mesh(&mut self) {
        self.opaque_vertices.clear();
        self.water_vertices.clear();

        let dim = CHUNK_DIMENSION as usize;
        for x in 0..dim {
            for y in 0..dim {
                for z in 0..dim {
                    let btype = self.get_block(x, y, z);
                    if btype == BlockType::AIR {
                        continue;
                    }

                    // Split borrow: pick the target buffer without holding
                    // `self` mutably across the neighbor queries.
                    let mut faces: Vec<BlockSide> = Vec::new();

                    if x == 0 || self.get_block(x - 1, y, z) == BlockType::AIR {
                        faces.push(BlockSide::LEFT);
                    }
                    if x == dim - 1 || self.get_block(x + 1, y, z) == BlockType::AIR {
                        faces.push(BlockSide::RIGHT);
                    }
                    if z == dim - 1 || self.get_block(x, y, z + 1) == BlockType::AIR {
                        faces.push(BlockSide::FRONT);
                    }
                    if z == 0 || self.get_block(x, y, z - 1) == BlockType::AIR {
                        faces.push(BlockSide::BACK);
                    }
                    if y == dim - 1 || self.get_block(x, y + 1, z) == BlockType::AIR {
                        faces.push(BlockSide::TOP);
                    }
                    if y == 0 || self.get_block(x, y - 1, z) == BlockType::AIR {
                        faces.push(BlockSide::BOTTOM);
                    }

                    let target = if btype == BlockType::WATER {
                        &mut self.water_vertices
                    } else {
                        &mut self.opaque_vertices
                    };
                    for side in faces {
                        add_face(target, side, x, y, z, btype);
                    }
                }
            }
        }

        self.gpu_mesh = None;
        self.dirty = false;

        debug!(
            "rebuilt chunk mesh at {:?}: {} opaque / {} water vertices",
            self.position,
            self.opaque_vertex_count(),
            self.water_vertex_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn empty_chunk() -> Chunk {
        Chunk::empty(Point3::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn single_block_emits_six_faces() {
        let mut chunk = empty_chunk();
        chunk.set_block(8, 8, 8, BlockType::DIRT);
        chunk.rebuild_mesh();
        // 6 faces, 6 vertices each.
        assert_eq!(chunk.opaque_vertex_count(), 36);
        assert_eq!(chunk.water_vertex_count(), 0);
        assert!(!chunk.dirty);
    }

    #[test]
    fn enclosed_interior_emits_no_faces() {
        // A 2x2x2 solid block embedded in air: only the 24 outward faces
        // appear, zero faces between the interior solid pairs.
        let mut chunk = empty_chunk();
        for x in 4..6 {
            for y in 4..6 {
                for z in 4..6 {
                    chunk.set_block(x, y, z, BlockType::DIRT);
                }
            }
        }
        chunk.rebuild_mesh();
        assert_eq!(chunk.opaque_vertex_count(), 24 * 6);
    }

    #[test]
    fn full_chunk_emits_only_surface_faces() {
        let mut chunk = empty_chunk();
        let dim = CHUNK_DIMENSION as usize;
        for x in 0..dim {
            for y in 0..dim {
                for z in 0..dim {
                    chunk.set_block(x, y, z, BlockType::DIRT);
                }
            }
        }
        chunk.rebuild_mesh();
        // 6 sides of 16x16 boundary cells, one face each, 6 vertices per face.
        assert_eq!(chunk.opaque_vertex_count(), 6 * 16 * 16 * 6);
    }

    #[test]
    fn water_faces_land_exclusively_in_the_water_buffer() {
        let mut chunk = empty_chunk();
        chunk.set_block(0, 0, 0, BlockType::WATER);
        chunk.set_block(5, 5, 5, BlockType::GRASS);
        chunk.rebuild_mesh();
        assert_eq!(chunk.water_vertex_count(), 36);
        assert_eq!(chunk.opaque_vertex_count(), 36);
    }

    #[test]
    fn water_culls_faces_like_any_solid_neighbor() {
        // Two adjacent water cells share a hidden face pair: 12 - 2 = 10
        // faces total.
        let mut chunk = empty_chunk();
        chunk.set_block(3, 3, 3, BlockType::WATER);
        chunk.set_block(4, 3, 3, BlockType::WATER);
        chunk.rebuild_mesh();
        assert_eq!(chunk.water_vertex_count(), 10 * 6);
    }

    #[test]
    fn meshing_and_collision_agree_on_solidity() {
        // A block that meshing treats as air-like must also be non-colliding
        // and vice versa: faces are emitted for a cell exactly when the cell
        // is solid.
        for btype in [
            BlockType::AIR,
            BlockType::DIRT,
            BlockType::GRASS,
            BlockType::WATER,
            BlockType::OAK,
            BlockType::LEAF,
        ] {
            let mut chunk = empty_chunk();
            chunk.set_block(8, 8, 8, btype);
            chunk.rebuild_mesh();
            let emitted = chunk.opaque_vertex_count() + chunk.water_vertex_count() > 0;
            assert_eq!(emitted, btype.is_solid());
            assert_eq!(chunk.is_block_solid(8, 8, 8), btype.is_solid());
        }
    }

    #[test]
    fn uv_coordinates_index_the_atlas_strip() {
        let mut chunk = empty_chunk();
        chunk.set_block(0, 0, 0, BlockType::GRASS);
        chunk.rebuild_mesh();
        let slot_width = 1.0 / MAX_SPRITE as f32;
        for vertex in &chunk.opaque_vertices {
            let u = vertex.tex_coords[0];
            assert!((0.0..=1.0).contains(&u));
            // Every U lies inside (or on the edge of) some atlas slot.
            assert!(u / slot_width <= MAX_SPRITE as f32);
        }
    }
}
