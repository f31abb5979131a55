//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and view matrix calculation
//! - Projection matrix handling
//! - GPU uniform buffer layout
//!
//! The camera is moved by the physics integrator rather than directly by
//! input, so it exposes per-axis position setters and a front vector instead
//! of a self-contained controller.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// WGPU NDC ranges from -1 to 1 in X and Y but 0 to 1 in Z, so the
/// perspective matrix's Z output is scaled and shifted into that range.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,  // Scale Z from [-1,1] to [-0.5,0.5]
    0.0, 0.0, 0.5, 1.0,  // Translate Z from [-0.5,0.5] to [0,1]
);

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// The camera maintains its position and orientation in the world and
/// provides the view matrix and direction vectors derived from them. The
/// default orientation looks down negative Z with a level horizon.
#[derive(Debug)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw (horizontal rotation around Y axis)
    /// * `pitch` - Initial pitch (vertical rotation around X axis)
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Sets the camera's world-space X coordinate.
    pub fn set_x_position(&mut self, x: f32) {
        self.position.x = x;
    }

    /// Sets the camera's world-space Y coordinate.
    pub fn set_y_position(&mut self, y: f32) {
        self.position.y = y;
    }

    /// Sets the camera's world-space Z coordinate.
    pub fn set_z_position(&mut self, z: f32) {
        self.position.z = z;
    }

    /// Gets the camera's forward direction vector.
    ///
    /// # Returns
    /// A normalized 3D vector pointing in the direction the camera is facing,
    /// including pitch.
    pub fn front_vector(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }

    /// Gets the camera's horizontal movement basis.
    ///
    /// # Returns
    /// `(forward, right)` unit vectors on the XZ plane, derived from yaw
    /// only, so walking never converts look-pitch into vertical motion.
    pub fn horizontal_basis(&self) -> (Vector3<f32>, Vector3<f32>) {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let forward = Vector3::new(yaw_cos, 0.0, yaw_sin).normalize();
        let right = Vector3::new(-yaw_sin, 0.0, yaw_cos).normalize();
        (forward, right)
    }

    /// Applies a mouse-look rotation delta and clamps pitch.
    ///
    /// # Arguments
    /// * `delta_yaw` - Horizontal rotation in radians (positive turns right)
    /// * `delta_pitch` - Vertical rotation in radians (positive looks up)
    pub fn rotate(&mut self, delta_yaw: Rad<f32>, delta_pitch: Rad<f32>) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;

        // Clamp pitch to prevent gimbal lock
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }

    /// Calculates the view matrix for this camera.
    ///
    /// # Returns
    /// A 4x4 view matrix transforming world coordinates to view space
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.front_vector(), Vector3::unit_y())
    }
}

/// Represents a camera's projection matrix and related parameters.
///
/// This handles the perspective projection used to render the 3D scene.
/// It manages the aspect ratio, field of view, and near/far clipping planes.
#[derive(Debug)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    ///
    /// # Arguments
    /// * `width` - New viewport width in pixels
    /// * `height` - New viewport height in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Calculates the projection matrix.
    ///
    /// Combines the perspective projection with the OpenGL to WGPU coordinate
    /// system transform.
    ///
    /// # Returns
    /// A 4x4 projection matrix ready for use in shaders
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// GPU-friendly representation of camera data for shaders.
///
/// Matches the uniform layout expected by the vertex and fragment shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // cgmath types are not Pod, so the matrix is flattened into arrays.
    view_proj: [[f32; 4]; 4],
    position: [f32; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with an identity matrix and zero position.
    pub fn new() -> Self {
        Self {
            view_proj: cgmath::Matrix4::identity().into(),
            position: [0.0, 0.0, 0.0, 0.0],
        }
    }

    /// Updates the view-projection matrix and position from the current
    /// camera state.
    ///
    /// # Arguments
    /// * `camera` - The camera to take the view matrix and position from
    /// * `projection` - The projection to use
    pub fn update_view_proj_and_pos(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
        let pos3: [f32; 3] = camera.position.into();
        self.position = [pos3[0], pos3[1], pos3[2], 0.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_vector_follows_yaw() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(-90.0), Deg(0.0));
        let front = camera.front_vector();
        assert!(front.x.abs() < 1e-6);
        assert!((front.z + 1.0).abs() < 1e-6);
        assert!(front.y.abs() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        camera.rotate(Rad(0.0), Rad(10.0));
        assert!(camera.pitch.0 < FRAC_PI_2);
        camera.rotate(Rad(0.0), Rad(-20.0));
        assert!(camera.pitch.0 > -FRAC_PI_2);
    }

    #[test]
    fn horizontal_basis_ignores_pitch() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(-90.0), Deg(45.0));
        let (forward, right) = camera.horizontal_basis();
        assert!(forward.y.abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);
        assert!(forward.dot(right).abs() < 1e-6);
    }
}
