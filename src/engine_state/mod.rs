//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the
//! voxel world.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Handles camera positioning and orientation
//! * `config` - Runtime-tunable engine parameters
//! * `noise` - Deterministic gradient noise for terrain
//! * `physics` - Player collision and movement integration
//! * `rendering` - Rendering pipelines and GPU resources
//! * `voxels` - Voxel data, chunks, and world generation
//!
//! ## Frame Order
//!
//! Each frame processes input into a velocity, integrates physics, and only
//! then renders. The render window is therefore always computed from the
//! camera position physics settled on this frame, never a stale one.

use cgmath::{InnerSpace, Point3, Rad, Vector3};
use log::error;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use camera_state::CameraState;
use config::EngineConfig;
use noise::Perlin;
use rendering::WorldRenderer;
use voxels::world::World;

pub mod camera_state;
pub mod config;
pub mod noise;
pub mod physics;
pub mod rendering;
pub mod voxels;

/// Player inputs collected for one frame.
///
/// Movement flags are true while the key is held; `rotate_view` carries the
/// accumulated mouse delta for the frame when the mouse moved.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,

    /// True while the jump key is held; only takes effect when grounded
    pub jump: bool,

    /// View rotation - Some if the mouse moved this frame
    pub rotate_view: Option<(f64, f64)>,
}

/// The main state container for the engine.
///
/// Owns the world, the camera, the renderer, and the GPU handles, and
/// advances them all once per frame via [`EngineState::update`] and
/// [`EngineState::render`].
pub struct EngineState {
    /// Engine configuration loaded at startup
    pub config: EngineConfig,
    /// The voxel world containing all chunk data
    pub world: World,
    /// Camera state managing position and orientation
    pub camera_state: CameraState,
    /// Current player velocity in blocks per second
    pub velocity: Vector3<f32>,
    /// True when the player ended the last physics step standing on ground
    pub grounded: bool,
    renderer: WorldRenderer,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    device: Device,
    queue: Queue,
}

impl EngineState {
    /// Creates a new engine state with all subsystems initialized.
    ///
    /// Loads the configuration, generates the full chunk grid, and spawns
    /// the player above the center of the world so the first frames of
    /// gravity settle them onto the terrain.
    ///
    /// # Arguments
    /// * `surface` - The rendering surface
    /// * `surface_config` - Configuration for the rendering surface
    /// * `device` - The GPU device
    /// * `queue` - The GPU command queue
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
    ) -> Self {
        let config = EngineConfig::load();

        let noise = Perlin::new();
        let world = World::generate(config.world_width, config.world_height, &noise);

        let spawn = Point3::new(
            (config.world_width * voxels::chunk::CHUNK_DIMENSION) as f32 / 2.0,
            (voxels::chunk::CHUNK_DIMENSION + 8) as f32,
            (config.world_height * voxels::chunk::CHUNK_DIMENSION) as f32 / 2.0,
        );
        let camera_state = CameraState::new(
            &device,
            surface_config.width,
            surface_config.height,
            spawn,
        );

        let renderer = WorldRenderer::new(&device, &queue, &surface_config, &camera_state);

        Self {
            config,
            world,
            camera_state,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            grounded: false,
            renderer,
            surface,
            surface_config,
            device,
            queue,
        }
    }

    /// Resizes the rendering surface when the window size changes.
    ///
    /// # Arguments
    /// * `size` - The new physical size of the window
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.camera_state.resize(size.width, size.height);
        self.renderer.resize(&self.device, &self.surface_config);
    }

    /// Advances the simulation by one frame.
    ///
    /// Applies mouse look, converts held movement keys into a horizontal
    /// velocity in the camera's yaw frame, accumulates gravity, handles
    /// jumping, and runs the collision integrator. The camera uniform is
    /// re-uploaded afterwards so rendering sees the settled position.
    ///
    /// # Arguments
    /// * `actions` - The player's input for this frame
    /// * `dt` - Frame duration in seconds
    pub fn update(&mut self, actions: &PlayerAction, dt: f32) {
        let camera = &mut self.camera_state.camera;

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            camera.rotate(
                Rad(delta_x as f32 * self.config.mouse_sensitivity),
                Rad(-delta_y as f32 * self.config.mouse_sensitivity),
            );
        }

        let (forward, right) = camera.horizontal_basis();
        let mut direction = Vector3::new(0.0, 0.0, 0.0);
        if actions.move_forward {
            direction += forward;
        }
        if actions.move_backward {
            direction -= forward;
        }
        if actions.move_right {
            direction += right;
        }
        if actions.move_left {
            direction -= right;
        }
        let horizontal = if direction.magnitude2() > 0.0 {
            direction.normalize() * self.config.move_speed
        } else {
            Vector3::new(0.0, 0.0, 0.0)
        };
        self.velocity.x = horizontal.x;
        self.velocity.z = horizontal.z;

        self.velocity.y += self.config.gravity * dt;
        if actions.jump && self.grounded {
            self.velocity.y = self.config.jump_speed;
        }

        self.grounded = physics::step(&self.world, camera, &mut self.velocity, dt);

        self.camera_state.write_buffer(&self.queue);
    }

    /// Renders the current frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped;
    /// other surface errors are logged and skipped.
    pub fn render(&mut self) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                return;
            }
            Err(err) => {
                error!("failed to acquire surface frame: {}", err);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            &mut self.world,
            self.camera_state.camera.position,
            self.config.render_radius,
        );

        frame.present();
    }
}
