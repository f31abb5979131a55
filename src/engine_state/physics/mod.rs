//! # Physics Module
//!
//! Axis-separated AABB collision for the player against the block world.
//!
//! The player is an axis-aligned box standing on its position: the position
//! is the feet, the box extends [`PLAYER_HEIGHT`] up and [`PLAYER_WIDTH`]
//! across in X and Z. Each frame is split into [`MAX_PHYSICS_STEPS`]
//! substeps, and within each substep the Y, X, and Z components of movement
//! are applied and collision-tested independently: a colliding axis is
//! reverted and its velocity zeroed while the other axes proceed, which
//! gives wall sliding for free.
//!
//! Blocks occupy the unit cell `[i, i + 1)` on each axis. The overlap test
//! widens the box's block range with `ceil`, so contact registers up to one
//! block early; resting positions settle inside that margin rather than in
//! exact face contact.

use cgmath::{Point2, Point3, Vector3};

use crate::engine_state::camera_state::camera::Camera;
use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;
use crate::engine_state::voxels::world::World;

/// Width of the player's collision box in X and Z.
pub const PLAYER_WIDTH: f32 = 0.6;
/// Height of the player's collision box.
pub const PLAYER_HEIGHT: f32 = 1.8;
/// Number of movement substeps per frame.
pub const MAX_PHYSICS_STEPS: u32 = 5;

/// Tests whether the player box at `position` overlaps any solid block.
///
/// Missing chunks are treated as empty space. Because terrain never exceeds
/// a single chunk vertically, any box whose bottom is at or above
/// `CHUNK_DIMENSION` trivially cannot collide.
///
/// # Arguments
/// * `world` - The chunk registry to test against
/// * `position` - Candidate feet position of the player box
pub fn collision_check(world: &World, position: Point3<f32>) -> bool {
    let chunk_size = CHUNK_DIMENSION as f32;

    let min_x = position.x - PLAYER_WIDTH / 2.0;
    let max_x = position.x + PLAYER_WIDTH / 2.0;
    let min_y = position.y;
    let max_y = position.y + PLAYER_HEIGHT;
    let min_z = position.z - PLAYER_WIDTH / 2.0;
    let max_z = position.z + PLAYER_WIDTH / 2.0;

    if min_y >= chunk_size {
        return false;
    }

    let min_chunk_x = (min_x / chunk_size).floor() as i32;
    let max_chunk_x = (max_x / chunk_size).floor() as i32;
    let min_chunk_z = (min_z / chunk_size).floor() as i32;
    let max_chunk_z = (max_z / chunk_size).floor() as i32;

    for chunk_x in min_chunk_x..=max_chunk_x {
        for chunk_z in min_chunk_z..=max_chunk_z {
            let Some(chunk) = world.get_chunk_at(Point2::new(chunk_x, chunk_z)) else {
                continue;
            };

            let origin_x = chunk_x as f32 * chunk_size;
            let origin_z = chunk_z as f32 * chunk_size;

            let start_x = ((min_x - origin_x).floor() as i32).max(0);
            let end_x = ((max_x - origin_x).ceil() as i32).min(CHUNK_DIMENSION - 1);
            let start_y = (min_y.floor() as i32).max(0);
            let end_y = (max_y.ceil() as i32).min(CHUNK_DIMENSION - 1);
            let start_z = ((min_z - origin_z).floor() as i32).max(0);
            let end_z = ((max_z - origin_z).ceil() as i32).min(CHUNK_DIMENSION - 1);

            for cell_x in start_x..=end_x {
                for cell_y in start_y..=end_y {
                    for cell_z in start_z..=end_z {
                        if chunk.is_block_solid(cell_x as usize, cell_y as usize, cell_z as usize) {
                            return true;
                        }
                    }
                }
            }
        }
    }

    false
}

/// Advances the player one frame of movement.
///
/// Applies the current velocity over `dt` in [`MAX_PHYSICS_STEPS`] substeps,
/// testing Y then X then Z per substep. A colliding axis keeps its previous
/// coordinate and has its velocity component zeroed. The camera position is
/// only written back once at the end.
///
/// # Arguments
/// * `world` - The chunk registry to collide against
/// * `camera` - The camera whose position is integrated
/// * `velocity` - Current velocity, mutated when an axis collides
/// * `dt` - Frame duration in seconds
///
/// # Returns
/// `true` if a downward collision occurred this frame (the player is
/// standing on ground).
pub fn step(world: &World, camera: &mut Camera, velocity: &mut Vector3<f32>, dt: f32) -> bool {
    let mut grounded = false;
    let mut position = camera.position;
    let sub_dt = dt / MAX_PHYSICS_STEPS as f32;

    for _ in 0..MAX_PHYSICS_STEPS {
        position.y += velocity.y * sub_dt;
        if collision_check(world, position) {
            position.y -= velocity.y * sub_dt;
            if velocity.y < 0.0 {
                grounded = true;
            }
            velocity.y = 0.0;
        }

        position.x += velocity.x * sub_dt;
        if collision_check(world, position) {
            position.x -= velocity.x * sub_dt;
            velocity.x = 0.0;
        }

        position.z += velocity.z * sub_dt;
        if collision_check(world, position) {
            position.z -= velocity.z * sub_dt;
            velocity.z = 0.0;
        }
    }

    camera.set_x_position(position.x);
    camera.set_y_position(position.y);
    camera.set_z_position(position.z);

    grounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::chunk::Chunk;
    use cgmath::Deg;

    /// A 1x1 chunk world with a solid dirt floor filling rows 0 through 2.
    fn floor_world() -> World {
        World::from_generator(1, 1, |_| {
            let mut chunk = Chunk::empty(Point3::new(0.0, 0.0, 0.0));
            for x in 0..CHUNK_DIMENSION as usize {
                for y in 0..3 {
                    for z in 0..CHUNK_DIMENSION as usize {
                        chunk.set_block(x, y, z, BlockType::DIRT);
                    }
                }
            }
            chunk
        })
    }

    fn camera_at(position: Point3<f32>) -> Camera {
        Camera::new(position, Deg(-90.0), Deg(0.0))
    }

    #[test]
    fn no_collision_above_chunk_height() {
        let world = floor_world();
        assert!(!collision_check(&world, Point3::new(8.0, 16.0, 8.0)));
        assert!(!collision_check(&world, Point3::new(8.0, 40.0, 8.0)));
    }

    #[test]
    fn missing_chunks_are_empty_space() {
        let world = floor_world();
        // Well outside the 1x1 grid, below floor height.
        assert!(!collision_check(&world, Point3::new(100.0, 1.0, 100.0)));
    }

    #[test]
    fn box_inside_floor_collides() {
        let world = floor_world();
        assert!(collision_check(&world, Point3::new(8.0, 1.0, 8.0)));
        assert!(!collision_check(&world, Point3::new(8.0, 6.0, 8.0)));
    }

    #[test]
    fn falling_player_lands_on_the_floor() {
        let world = floor_world();
        let mut camera = camera_at(Point3::new(8.0, 10.0, 8.0));
        let mut velocity = Vector3::new(2.0, 0.0, 0.0);
        let dt = 1.0 / 60.0;

        let mut grounded = false;
        for _ in 0..120 {
            velocity.y += -20.0 * dt;
            grounded = step(&world, &mut camera, &mut velocity, dt);
            if grounded {
                break;
            }
        }

        assert!(grounded);
        assert_eq!(velocity.y, 0.0);
        // Feet settle just above the floor top at y = 3, inside the ceil
        // overlap margin.
        assert!(camera.position.y >= 3.0);
        assert!(camera.position.y < 3.5);
        // Sliding along the floor must not consume horizontal velocity.
        assert_eq!(velocity.x, 2.0);
    }

    #[test]
    fn wall_stops_one_axis_and_lets_the_other_slide() {
        let world = World::from_generator(1, 1, |_| {
            let mut chunk = Chunk::empty(Point3::new(0.0, 0.0, 0.0));
            for x in 0..CHUNK_DIMENSION as usize {
                for y in 0..3 {
                    for z in 0..CHUNK_DIMENSION as usize {
                        chunk.set_block(x, y, z, BlockType::DIRT);
                    }
                }
            }
            // Wall plane at x = 8, tall enough to block the player box.
            for y in 3..9 {
                for z in 0..CHUNK_DIMENSION as usize {
                    chunk.set_block(8, y, z, BlockType::DIRT);
                }
            }
            chunk
        });

        let mut camera = camera_at(Point3::new(5.0, 3.05, 6.0));
        let mut velocity = Vector3::new(5.0, 0.0, 3.0);
        let dt = 1.0 / 60.0;
        for _ in 0..60 {
            step(&world, &mut camera, &mut velocity, dt);
        }

        assert_eq!(velocity.x, 0.0);
        assert_eq!(velocity.z, 3.0);
        // X stopped short of the wall, Z kept advancing.
        assert!(camera.position.x < 8.0);
        assert!(camera.position.z > 6.5);
    }
}
