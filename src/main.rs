//! # Voxel World Application Entry Point
//!
//! This is the main entry point for the native application. It simply calls
//! into the library's `run()` function to initialize and start the engine.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release
//! ```

fn main() {
    voxel_world::run();
}
