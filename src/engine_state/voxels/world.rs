//! # World Module
//!
//! The chunk registry: a map from chunk-grid coordinates to generated
//! chunks, plus the render-window query that selects which chunks are drawn
//! around the camera each frame.
//!
//! The world is a finite `width x height` grid of chunks on the XZ plane,
//! generated eagerly at startup. Chunk-grid coordinates are integer pairs
//! `(x, z)`; a chunk at grid `(x, z)` spans world
//! `[x * 16, (x + 1) * 16) x [z * 16, (z + 1) * 16)` on those axes.

use std::collections::HashMap;

use cgmath::{Point2, Point3};
use log::info;
use web_time::Instant;

use crate::engine_state::noise::Perlin;

use super::chunk::{Chunk, CHUNK_DIMENSION};

/// The collection of all chunks in the world, keyed by chunk-grid coordinate.
pub struct World {
    chunks: HashMap<Point2<i32>, Chunk>,
    /// Extent of the chunk grid along world X, in chunks.
    pub width: i32,
    /// Extent of the chunk grid along world Z, in chunks.
    pub height: i32,
}

impl World {
    /// Eagerly generates a `width x height` grid of chunks.
    ///
    /// Every chunk is fully terrain-generated up front; meshing stays lazy
    /// and happens per chunk the first time the renderer draws it.
    ///
    /// # Arguments
    /// * `width` - Number of chunks along world X
    /// * `height` - Number of chunks along world Z
    /// * `noise` - The shared deterministic noise generator
    pub fn generate(width: i32, height: i32, noise: &Perlin) -> Self {
        let start = Instant::now();
        let mut chunks = HashMap::with_capacity((width * height) as usize);
        for grid_x in 0..width {
            for grid_z in 0..height {
                let grid = Point2::new(grid_x, grid_z);
                chunks.insert(grid, Chunk::generate(grid, noise));
            }
        }
        info!(
            "generated {}x{} chunk world in {:?}",
            width,
            height,
            start.elapsed()
        );
        World {
            chunks,
            width,
            height,
        }
    }

    /// Builds a world by calling `build` for every grid coordinate. Used by
    /// tests to construct worlds with hand-placed blocks.
    pub fn from_generator(
        width: i32,
        height: i32,
        mut build: impl FnMut(Point2<i32>) -> Chunk,
    ) -> Self {
        let mut chunks = HashMap::with_capacity((width * height) as usize);
        for grid_x in 0..width {
            for grid_z in 0..height {
                let grid = Point2::new(grid_x, grid_z);
                chunks.insert(grid, build(grid));
            }
        }
        World {
            chunks,
            width,
            height,
        }
    }

    /// Looks up the chunk at a chunk-grid coordinate.
    ///
    /// Returns `None` outside the generated grid. Callers treat a missing
    /// chunk as empty space, so queries beyond the world edge never collide
    /// and never render.
    pub fn get_chunk_at(&self, grid_position: Point2<i32>) -> Option<&Chunk> {
        self.chunks.get(&grid_position)
    }

    /// Mutable variant of [`World::get_chunk_at`].
    pub fn get_chunk_at_mut(&mut self, grid_position: Point2<i32>) -> Option<&mut Chunk> {
        self.chunks.get_mut(&grid_position)
    }

    /// Selects the chunk-grid coordinates inside the square render window
    /// centered on the camera.
    ///
    /// The camera's world position is mapped to a grid coordinate by
    /// truncating division, then a `(2 * radius + 1)` square window around it
    /// is intersected with the world bounds. Only existing chunks are
    /// returned.
    pub fn chunks_in_render_radius(
        &self,
        camera_position: Point3<f32>,
        radius: i32,
    ) -> Vec<Point2<i32>> {
        let center_x = (camera_position.x / CHUNK_DIMENSION as f32) as i32;
        let center_z = (camera_position.z / CHUNK_DIMENSION as f32) as i32;

        let mut visible = Vec::new();
        for grid_x in center_x - radius..=center_x + radius {
            if grid_x < 0 || grid_x >= self.width {
                continue;
            }
            for grid_z in center_z - radius..=center_z + radius {
                if grid_z < 0 || grid_z >= self.height {
                    continue;
                }
                visible.push(Point2::new(grid_x, grid_z));
            }
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_world(width: i32, height: i32) -> World {
        World::from_generator(width, height, |grid| {
            Chunk::empty(Point3::new(
                (grid.x * CHUNK_DIMENSION) as f32,
                0.0,
                (grid.y * CHUNK_DIMENSION) as f32,
            ))
        })
    }

    #[test]
    fn lookup_inside_and_outside_the_grid() {
        let world = empty_world(4, 4);
        assert!(world.get_chunk_at(Point2::new(0, 0)).is_some());
        assert!(world.get_chunk_at(Point2::new(3, 3)).is_some());
        assert!(world.get_chunk_at(Point2::new(4, 0)).is_none());
        assert!(world.get_chunk_at(Point2::new(-1, 2)).is_none());
    }

    #[test]
    fn render_window_clips_to_world_bounds() {
        let world = empty_world(16, 16);
        // Camera in the corner chunk: the window extends past the low edge
        // and is clipped, leaving a 6x6 block of valid coordinates.
        let visible = world.chunks_in_render_radius(Point3::new(2.0, 8.0, 2.0), 5);
        assert_eq!(visible.len(), 36);
        for grid in &visible {
            assert!((0..=5).contains(&grid.x));
            assert!((0..=5).contains(&grid.y));
        }
    }

    #[test]
    fn full_window_in_the_interior() {
        let world = empty_world(16, 16);
        let visible = world.chunks_in_render_radius(Point3::new(120.0, 8.0, 120.0), 2);
        assert_eq!(visible.len(), 25);
    }

    #[test]
    fn camera_position_maps_to_grid_by_truncation() {
        let world = empty_world(4, 4);
        let visible = world.chunks_in_render_radius(Point3::new(31.9, 0.0, 15.9), 0);
        assert_eq!(visible, vec![Point2::new(1, 0)]);
        let visible = world.chunks_in_render_radius(Point3::new(32.0, 0.0, 16.0), 0);
        assert_eq!(visible, vec![Point2::new(2, 1)]);
    }
}
