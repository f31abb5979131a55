//! # Chunk Generation
//!
//! Procedural terrain synthesis for a single chunk: an octave-noise height
//! field with a fixed sea level, followed by a seeded tree-scatter pass.
//!
//! Generation is fully deterministic. The height field comes from the fixed
//! permutation noise in [`crate::engine_state::noise`], and the tree scatter
//! derives its RNG seed from the chunk-grid coordinate, so regenerating the
//! same world produces identical chunks.

use cgmath::{Point2, Point3};

use crate::engine_state::noise::Perlin;

use super::super::block::block_type::BlockType;
use super::{Chunk, CHUNK_DIMENSION};

/// Frequency factor applied to world coordinates before noise sampling.
pub const TERRAIN_FREQUENCY: f32 = 0.1;
/// Maximum terrain column height in blocks.
///
/// The physics collision early-out assumes terrain never exceeds a chunk's
/// vertical extent; raising this above 16 requires revisiting
/// [`crate::engine_state::physics`].
pub const MAX_TERRAIN_HEIGHT: f32 = 20.0;
/// Every cell with world-Y below this is water, regardless of terrain height.
pub const SEA_LEVEL: i32 = 3;
/// A tree sprouts on a grass cell with probability `1 / TREE_CHANCE` per column row.
pub const TREE_CHANCE: u32 = 63;
/// Height of an oak trunk in blocks.
const TRUNK_HEIGHT: usize = 3;

impl Chunk {
    /// Generates a chunk's terrain at the given chunk-grid coordinate.
    ///
    /// For every column, octave noise sampled at frequency-scaled world
    /// coordinates is remapped to `[0, 1]`, eased with a cubic power and
    /// scaled to [`MAX_TERRAIN_HEIGHT`] to produce the column's height. The
    /// column is then filled bottom-up: water below [`SEA_LEVEL`], dirt below
    /// the surface, a single grass cap, air above. A tree-scatter pass
    /// follows (see [`Chunk::scatter_trees`]).
    ///
    /// # Arguments
    /// * `grid_position` - The chunk's coordinate on the world's chunk grid
    /// * `noise` - The shared deterministic noise generator
    pub fn generate(grid_position: Point2<i32>, noise: &Perlin) -> Self {
        let origin = Point3::new(
            (grid_position.x * CHUNK_DIMENSION) as f32,
            0.0,
            (grid_position.y * CHUNK_DIMENSION) as f32,
        );
        let mut chunk = Chunk::empty(origin);

        for cx in 0..CHUNK_DIMENSION as usize {
            for cz in 0..CHUNK_DIMENSION as usize {
                let world_x = origin.x + cx as f32;
                let world_z = origin.z + cz as f32;

                let noise_val = noise.octave_noise(
                    world_x * TERRAIN_FREQUENCY,
                    0.0,
                    world_z * TERRAIN_FREQUENCY,
                );
                let normalized = noise_val * 0.5 + 0.5;
                let max_height = (normalized.powi(3) * MAX_TERRAIN_HEIGHT) as i32;

                for cy in 0..CHUNK_DIMENSION {
                    let btype = if cy < SEA_LEVEL {
                        BlockType::WATER
                    } else if cy < max_height - 1 {
                        BlockType::DIRT
                    } else if cy == max_height - 1 {
                        BlockType::GRASS
                    } else {
                        BlockType::AIR
                    };
                    chunk.set_block(cx, cy as usize, cz, btype);
                }
            }
        }

        chunk.scatter_trees(grid_position);
        chunk
    }

    /// Derives the tree-scatter RNG seed from a chunk-grid coordinate.
    ///
    /// Each chunk gets its own reproducible random stream; two runs of the
    /// program place trees in exactly the same cells.
    fn tree_seed(grid_position: Point2<i32>) -> u64 {
        ((grid_position.x as u32 as u64) << 32) | grid_position.y as u32 as u64
    }

    /// Scatters oak trees over the chunk's interior grass cells.
    ///
    /// Only interior columns are considered (chunk edges excluded, so every
    /// canopy fits inside the chunk), and only rows low enough for a full
    /// tree to fit vertically. Each qualifying grass cell sprouts with
    /// probability `1 / TREE_CHANCE`: a 3-tall trunk, a full 3x3 leaf layer
    /// above the trunk top, orthogonal X and Z leaf stencils one higher, and
    /// a single capping leaf above that. Leaves are only written into cells
    /// that are currently air.
    fn scatter_trees(&mut self, grid_position: Point2<i32>) {
        let mut rng = fastrand::Rng::with_seed(Self::tree_seed(grid_position));
        let dim = CHUNK_DIMENSION as usize;

        for cx in 1..dim - 1 {
            for cz in 1..dim - 1 {
                for cy in 0..dim - (TRUNK_HEIGHT + 4) {
                    if rng.u32(0..TREE_CHANCE) != 0 {
                        continue;
                    }
                    if self.get_block(cx, cy, cz) != BlockType::GRASS {
                        continue;
                    }

                    for dy in 1..=TRUNK_HEIGHT {
                        self.set_block(cx, cy + dy, cz, BlockType::OAK);
                    }

                    // Full 3x3 leaf layer directly above the trunk top.
                    for dx in -1..=1i32 {
                        for dz in -1..=1i32 {
                            let lx = (cx as i32 + dx) as usize;
                            let lz = (cz as i32 + dz) as usize;
                            if self.get_block(lx, cy + TRUNK_HEIGHT + 1, lz) == BlockType::AIR {
                                self.set_block(lx, cy + TRUNK_HEIGHT + 1, lz, BlockType::LEAF);
                            }
                        }
                    }

                    // Orthogonal cross stencils one layer higher.
                    for dx in -1..=1i32 {
                        let lx = (cx as i32 + dx) as usize;
                        if self.get_block(lx, cy + TRUNK_HEIGHT + 2, cz) == BlockType::AIR {
                            self.set_block(lx, cy + TRUNK_HEIGHT + 2, cz, BlockType::LEAF);
                        }
                    }
                    for dz in -1..=1i32 {
                        let lz = (cz as i32 + dz) as usize;
                        if self.get_block(cx, cy + TRUNK_HEIGHT + 2, lz) == BlockType::AIR {
                            self.set_block(cx, cy + TRUNK_HEIGHT + 2, lz, BlockType::LEAF);
                        }
                    }

                    // Single capping leaf.
                    if self.get_block(cx, cy + TRUNK_HEIGHT + 3, cz) == BlockType::AIR {
                        self.set_block(cx, cy + TRUNK_HEIGHT + 3, cz, BlockType::LEAF);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;

    #[test]
    fn generation_is_reproducible() {
        let noise = Perlin::new();
        let a = Chunk::generate(Point2::new(3, 7), &noise);
        let b = Chunk::generate(Point2::new(3, 7), &noise);
        for cy in 0..CHUNK_DIMENSION as usize {
            for cz in 0..CHUNK_DIMENSION as usize {
                for cx in 0..CHUNK_DIMENSION as usize {
                    assert_eq!(a.get_block(cx, cy, cz), b.get_block(cx, cy, cz));
                }
            }
        }
    }

    #[test]
    fn every_cell_below_sea_level_is_water() {
        let noise = Perlin::new();
        for grid in [Point2::new(0, 0), Point2::new(5, 2), Point2::new(11, 11)] {
            let chunk = Chunk::generate(grid, &noise);
            for cy in 0..SEA_LEVEL as usize {
                for cz in 0..CHUNK_DIMENSION as usize {
                    for cx in 0..CHUNK_DIMENSION as usize {
                        assert_eq!(chunk.get_block(cx, cy, cz), BlockType::WATER);
                    }
                }
            }
        }
    }

    #[test]
    fn trunks_stand_on_grass_and_leaves_never_replace_terrain() {
        let noise = Perlin::new();
        // Scan a handful of chunks; trees are sparse but 16x14x16 candidate
        // cells per chunk at 1/63 odds make at least one overwhelmingly likely.
        let mut saw_tree = false;
        for gx in 0..6 {
            for gz in 0..6 {
                let chunk = Chunk::generate(Point2::new(gx, gz), &noise);
                for cy in 1..CHUNK_DIMENSION as usize {
                    for cz in 0..CHUNK_DIMENSION as usize {
                        for cx in 0..CHUNK_DIMENSION as usize {
                            let below = chunk.get_block(cx, cy - 1, cz);
                            match chunk.get_block(cx, cy, cz) {
                                BlockType::OAK => {
                                    saw_tree = true;
                                    assert!(
                                        below == BlockType::GRASS || below == BlockType::OAK,
                                        "trunk must rise from grass"
                                    );
                                }
                                BlockType::LEAF => {
                                    assert_ne!(below, BlockType::DIRT);
                                }
                                _ => {}
                            }
                        }
                    }
                }
            }
        }
        assert!(saw_tree, "expected at least one tree in 36 chunks");
    }
}
