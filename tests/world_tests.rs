//! End-to-end tests for world generation, chunk lookup, and meshing.

use cgmath::{Point2, Point3};

use voxel_world::engine_state::noise::Perlin;
use voxel_world::engine_state::voxels::block::block_type::BlockType;
use voxel_world::engine_state::voxels::chunk::{CHUNK_DIMENSION, CHUNK_VOLUME};
use voxel_world::engine_state::voxels::world::World;

#[test]
fn generated_world_contains_every_grid_chunk() {
    let noise = Perlin::new();
    let world = World::generate(4, 3, &noise);

    for grid_x in 0..4 {
        for grid_z in 0..3 {
            let chunk = world
                .get_chunk_at(Point2::new(grid_x, grid_z))
                .expect("chunk inside the grid must exist");
            assert_eq!(
                chunk.position,
                Point3::new(
                    (grid_x * CHUNK_DIMENSION) as f32,
                    0.0,
                    (grid_z * CHUNK_DIMENSION) as f32
                )
            );
        }
    }
    assert!(world.get_chunk_at(Point2::new(4, 0)).is_none());
    assert!(world.get_chunk_at(Point2::new(0, 3)).is_none());
}

#[test]
fn two_generations_of_the_same_world_are_identical() {
    let noise = Perlin::new();
    let a = World::generate(3, 3, &noise);
    let b = World::generate(3, 3, &noise);

    for grid_x in 0..3 {
        for grid_z in 0..3 {
            let grid = Point2::new(grid_x, grid_z);
            let chunk_a = a.get_chunk_at(grid).unwrap();
            let chunk_b = b.get_chunk_at(grid).unwrap();
            let dim = CHUNK_DIMENSION as usize;
            for cy in 0..dim {
                for cz in 0..dim {
                    for cx in 0..dim {
                        assert_eq!(
                            chunk_a.get_block(cx, cy, cz),
                            chunk_b.get_block(cx, cy, cz),
                            "block mismatch in chunk {:?} at ({}, {}, {})",
                            grid,
                            cx,
                            cy,
                            cz
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn every_column_is_wet_at_the_bottom() {
    let noise = Perlin::new();
    let world = World::generate(4, 4, &noise);
    let dim = CHUNK_DIMENSION as usize;

    for grid_x in 0..4 {
        for grid_z in 0..4 {
            let chunk = world.get_chunk_at(Point2::new(grid_x, grid_z)).unwrap();
            for cx in 0..dim {
                for cz in 0..dim {
                    // Sea level fills rows 0 through 2 before terrain is
                    // carved, so the bottom row is always water.
                    assert_eq!(chunk.get_block(cx, 0, cz), BlockType::WATER);
                }
            }
        }
    }
}

#[test]
fn generated_chunks_mesh_to_nonempty_buffers() {
    let noise = Perlin::new();
    let mut world = World::generate(2, 2, &noise);

    let chunk = world.get_chunk_at_mut(Point2::new(0, 0)).unwrap();
    assert!(chunk.dirty);
    chunk.rebuild_mesh();
    assert!(!chunk.dirty);

    // The water sea alone guarantees visible geometry somewhere.
    let total = chunk.opaque_vertex_count() + chunk.water_vertex_count();
    assert!(total > 0);
    assert_eq!(total % 6, 0, "meshes are built from whole quads");
    // Far fewer vertices than a cell-by-cell worst case.
    assert!(total < CHUNK_VOLUME as u32 * 36);
}

#[test]
fn render_window_tracks_the_camera() {
    let noise = Perlin::new();
    let world = World::generate(8, 8, &noise);

    // Center of the world with a radius-2 window: a full 5x5 block.
    let visible = world.chunks_in_render_radius(Point3::new(64.0, 10.0, 64.0), 2);
    assert_eq!(visible.len(), 25);
    for grid in &visible {
        assert!((2..=6).contains(&grid.x));
        assert!((2..=6).contains(&grid.y));
    }

    // Beyond the far corner only the clipped quadrant remains.
    let visible = world.chunks_in_render_radius(Point3::new(126.0, 10.0, 126.0), 2);
    assert_eq!(visible.len(), 9);
}
