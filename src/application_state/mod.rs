//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Window and graphics initialization
//! - Input handling
//! - Application lifecycle events
//!
//! Graphics initialization is asynchronous in the WebGPU API, so the window
//! and device are created on the first `resumed` event and driven to
//! completion with `pollster` before the engine state is constructed.

pub mod input_manager;

use std::sync::Arc;

use input_manager::InputManager;
use log::warn;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::engine_state::EngineState;

/// The main application state container that manages the application's
/// lifecycle. Implements `ApplicationHandler` to receive window and device
/// events; stays empty until the first `resumed` event initializes graphics.
#[derive(Default)]
pub struct ApplicationState {
    /// The initialized application state, if the application has started
    pub state: Option<InitializedApplicationState>,
}

/// Represents the fully initialized and running state of the application.
pub struct InitializedApplicationState {
    /// The core game engine state and logic
    pub engine_state: EngineState,
    /// Handle to the application window
    pub window: Arc<Window>,
    /// Manages input state and event processing
    pub input_manager: InputManager,
    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: web_time::Instant,
}

/// Creates the window, WebGPU device, and configured surface.
///
/// # Panics
/// Panics if no suitable adapter or device is available; the application
/// cannot run without one.
fn create_graphics(
    event_loop: &ActiveEventLoop,
) -> (
    Arc<Window>,
    wgpu::Surface<'static>,
    wgpu::SurfaceConfiguration,
    wgpu::Device,
    wgpu::Queue,
) {
    let window_attrs = Window::default_attributes().with_title("voxel-world");
    let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

    // The instance is a handle to our GPU
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        backend_options: wgpu::BackendOptions::from_env_or_default(),
    });

    let surface = instance.create_surface(window.clone()).unwrap();

    let (device, queue, surface_config) = pollster::block_on(async {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .unwrap();

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        (device, queue, surface_config)
    });

    (window, surface, surface_config, device, queue)
}

impl ApplicationHandler for ApplicationState {
    /// Initializes graphics and the engine on the first resume.
    ///
    /// # Arguments
    /// * `event_loop` - Reference to the active event loop
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let (window, surface, surface_config, device, queue) = create_graphics(event_loop);

        // Mouse look wants a captured, hidden cursor. Not every platform
        // supports locking, so fall back to confinement.
        if window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .is_err()
        {
            warn!("cursor grab is not available on this platform");
        }
        window.set_cursor_visible(false);

        let engine_state = EngineState::new(surface, surface_config, device, queue);

        window.request_redraw();
        self.state = Some(InitializedApplicationState {
            engine_state,
            window,
            input_manager: InputManager::new(),
            last_wait_time: web_time::Instant::now(),
        });
    }

    /// Handles window-related events such as resize, focus changes, and
    /// input events.
    ///
    /// # Arguments
    /// * `event_loop` - Reference to the active event loop
    /// * `_window_id` - ID of the window that generated the event
    /// * `event` - The window event to process
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            if matches!(event, WindowEvent::CloseRequested) {
                event_loop.exit();
            }
            return;
        };

        state.input_manager.intake_input(&event);

        match event {
            WindowEvent::Resized(size) => {
                state.engine_state.resize_surface(size);
            }
            WindowEvent::Focused(is_focused) => {
                if !is_focused {
                    state.input_manager.reset_inputs();
                }
            }
            WindowEvent::RedrawRequested => {
                state.engine_state.render();
            }
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            _ => (),
        }
    }

    /// Handles device-level input events such as mouse motion.
    ///
    /// # Arguments
    /// * `_event_loop` - Reference to the active event loop
    /// * `_device_id` - ID of the device that generated the event
    /// * `event` - The device event to process
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_mouse_motion(delta);
            }
        }
    }

    /// Advances the simulation and schedules the next frame.
    ///
    /// # Arguments
    /// * `_event_loop` - Reference to the active event loop
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let now = web_time::Instant::now();
            let dt = (now - state.last_wait_time).as_secs_f32();
            state.last_wait_time = now;

            let actions = state.input_manager.collect_actions();
            state.engine_state.update(&actions, dt);

            state.window.request_redraw();
        }
    }
}
