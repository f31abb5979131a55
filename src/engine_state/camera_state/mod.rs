//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - GPU uniform buffer management
//!
//! The camera's position is owned here but written by the physics
//! integrator; input only steers orientation and desired velocity.

use cgmath::{Deg, Point3};
use wgpu::util::DeviceExt;

pub mod camera;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 90.0;
/// Near clipping plane distance.
pub const ZNEAR: f32 = 0.1;
/// Far clipping plane distance.
pub const ZFAR: f32 = 1000.0;
/// Default yaw, looking down negative Z.
pub const DEFAULT_YAW_DEGREES: f32 = -90.0;

/// Manages the camera, its projection, and the GPU uniform buffer that
/// mirrors them.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// Perspective projection parameters
    pub projection: camera::Projection,
    /// GPU-optimized camera data for shaders
    pub camera_uniform: camera::CameraUniform,
    /// Uniform buffer holding [`camera::CameraUniform`]
    pub camera_buffer: wgpu::Buffer,
}

impl CameraState {
    /// Creates a new camera state and its backing uniform buffer.
    ///
    /// # Arguments
    /// * `device` - The GPU device used to allocate the uniform buffer
    /// * `width` - Initial viewport width in pixels
    /// * `height` - Initial viewport height in pixels
    /// * `position` - The camera's spawn position in world space
    pub fn new(device: &wgpu::Device, width: u32, height: u32, position: Point3<f32>) -> Self {
        let camera = camera::Camera::new(position, Deg(DEFAULT_YAW_DEGREES), Deg(0.0));
        let projection = camera::Projection::new(width, height, Deg(FOV_DEGREES), ZNEAR, ZFAR);

        let mut camera_uniform = camera::CameraUniform::new();
        camera_uniform.update_view_proj_and_pos(&camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        CameraState {
            camera,
            projection,
            camera_uniform,
            camera_buffer,
        }
    }

    /// Updates the projection's aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// Recomputes the camera uniform and uploads it to the GPU.
    ///
    /// Called once per frame after physics has settled the camera position.
    pub fn write_buffer(&mut self, queue: &wgpu::Queue) {
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, &self.projection);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }
}
