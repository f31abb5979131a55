#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel world explorer built with Rust and WGPU.
//!
//! The world is a finite grid of 16x16x16 chunks generated from deterministic
//! octave noise, meshed with per-face culling, and explored with a first
//! person camera subject to gravity and AABB collision.
//!
//! ## Key Modules
//!
//! * `application_state` - Manages the application lifecycle and window management
//! * `engine_state` - The main engine components: noise, voxels, physics, camera, rendering
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_world::run();
//! }
//! ```

use log::info;
use winit::event_loop::EventLoop;

use application_state::ApplicationState;

mod application_state;
pub mod engine_state;

/// Initializes logging, builds the event loop, and runs the application
/// until the window is closed.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
    let event_loop = EventLoop::new().unwrap();

    let mut state = ApplicationState::default();
    let _ = event_loop.run_app(&mut state);
}
