//! # Engine Configuration
//!
//! Runtime-tunable engine parameters, loaded from an optional `config.json`
//! next to the executable. Every field has a default, so a missing file or a
//! partial file both work; a present-but-malformed file is reported and the
//! defaults are used.

use log::{info, warn};
use serde::Deserialize;

/// Path probed for a configuration file at startup.
const CONFIG_PATH: &str = "config.json";

/// Tunable engine parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World extent along X, in chunks.
    pub world_width: i32,
    /// World extent along Z, in chunks.
    pub world_height: i32,
    /// Half-width of the square chunk render window around the camera.
    pub render_radius: i32,
    /// Vertical acceleration in blocks per second squared. Negative is down.
    pub gravity: f32,
    /// Horizontal walk speed in blocks per second.
    pub move_speed: f32,
    /// Initial upward velocity of a jump in blocks per second.
    pub jump_speed: f32,
    /// Mouse-look sensitivity in radians per pixel of mouse travel.
    pub mouse_sensitivity: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            world_width: 16,
            world_height: 16,
            render_radius: 5,
            gravity: -20.0,
            move_speed: 5.0,
            jump_speed: 8.0,
            mouse_sensitivity: 0.0125,
        }
    }
}

impl EngineConfig {
    /// Loads the configuration, falling back to defaults when no file is
    /// present or it fails to parse.
    pub fn load() -> Self {
        match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => match serde_json::from_str::<EngineConfig>(&contents) {
                Ok(config) => {
                    info!("loaded configuration from {}", CONFIG_PATH);
                    config
                }
                Err(err) => {
                    warn!("failed to parse {}: {}; using defaults", CONFIG_PATH, err);
                    EngineConfig::default()
                }
            },
            Err(_) => {
                info!("no {} found, using default configuration", CONFIG_PATH);
                EngineConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "world_width": 4, "move_speed": 2.5 }"#).unwrap();
        assert_eq!(config.world_width, 4);
        assert_eq!(config.move_speed, 2.5);
        assert_eq!(config.world_height, EngineConfig::default().world_height);
        assert_eq!(config.render_radius, EngineConfig::default().render_radius);
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.render_radius, 5);
        assert_eq!(config.gravity, -20.0);
    }
}
