//! Game tuning
//!
//! Every numeric knob the simulation reads lives here. Loaded from JSON on
//! native builds, validated once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game configuration bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === World ===
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// World width in pixels
    pub world_width: u32,
    /// World height in pixels
    pub world_height: u32,

    // === Enemy spawn curve ===
    /// Spawn delay at the start of a level (ms)
    pub initial_spawn_delay: f32,
    /// Spawn delay once the ramp has finished (ms)
    pub min_spawn_delay: f32,
    /// Time to ramp from initial to min delay (ms)
    pub time_to_final_spawn_delay_ms: f32,

    // === Player ===
    /// Horizontal speed (px per 100ms)
    pub player_speed: f32,
    /// Upward speed applied on jump (px per 100ms)
    pub jump_speed: f32,
    /// Added to vertical speed every tick
    pub gravity_accel: f32,
    /// Minimum time between shots (ms)
    pub fire_throttle_ms: f32,
    /// Bullet speed (px per 100ms)
    pub bullet_speed: f32,
    /// Player ignores hazards
    pub god_mode: bool,

    // === Session ===
    /// Delay between player death and game over (ms)
    pub game_over_delay_ms: f32,
    /// Upper bound on live host entities
    pub max_entities: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            initial_spawn_delay: 2000.0,
            min_spawn_delay: 500.0,
            time_to_final_spawn_delay_ms: 60_000.0,

            player_speed: 8.0,
            jump_speed: 22.0,
            gravity_accel: 1.5,
            fire_throttle_ms: 250.0,
            bullet_speed: 15.0,
            god_mode: false,

            game_over_delay_ms: 2000.0,
            max_entities: 4096,
        }
    }
}

impl Config {
    /// World width in tiles
    pub fn width_in_tiles(&self) -> i32 {
        (self.world_width / self.tile_width.max(1)) as i32
    }

    /// World height in tiles
    pub fn height_in_tiles(&self) -> i32 {
        (self.world_height / self.tile_height.max(1)) as i32
    }

    /// Reject tunings the generator or spawner cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(ConfigError::ZeroTileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        if self.world_width % self.tile_width != 0 {
            return Err(ConfigError::MisalignedWorld {
                axis: "x",
                world: self.world_width,
                tile: self.tile_width,
            });
        }
        if self.world_height % self.tile_height != 0 {
            return Err(ConfigError::MisalignedWorld {
                axis: "y",
                world: self.world_height,
                tile: self.tile_height,
            });
        }
        if self.width_in_tiles() < MIN_WIDTH_IN_TILES {
            return Err(ConfigError::WorldTooNarrow {
                width_in_tiles: self.width_in_tiles(),
                min: MIN_WIDTH_IN_TILES,
            });
        }
        if self.initial_spawn_delay <= 0.0 || self.min_spawn_delay <= 0.0 {
            return Err(ConfigError::NonPositiveSpawnDelay {
                initial: self.initial_spawn_delay,
                min: self.min_spawn_delay,
            });
        }
        if self.min_spawn_delay > self.initial_spawn_delay {
            return Err(ConfigError::InvertedSpawnDelay {
                initial: self.initial_spawn_delay,
                min: self.min_spawn_delay,
            });
        }
        if self.time_to_final_spawn_delay_ms <= 0.0 {
            return Err(ConfigError::NonPositiveRamp(
                self.time_to_final_spawn_delay_ms,
            ));
        }
        if self.max_entities == 0 {
            return Err(ConfigError::ZeroEntityCapacity);
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width_in_tiles(), 12);
        assert_eq!(config.height_in_tiles(), 16);
    }

    #[test]
    fn test_rejects_narrow_world() {
        let config = Config {
            world_width: 160,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WorldTooNarrow { width_in_tiles: 8, .. })
        ));
    }

    #[test]
    fn test_rejects_misaligned_world() {
        let config = Config {
            world_height: 330,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MisalignedWorld { axis: "y", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_spawn_delays() {
        let config = Config {
            initial_spawn_delay: 400.0,
            min_spawn_delay: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedSpawnDelay { .. })
        ));

        let config = Config {
            time_to_final_spawn_delay_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveRamp(_))
        ));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = Config::from_json(r#"{ "initial_spawn_delay": 3000.0, "god_mode": true }"#)
            .expect("valid config");
        assert_eq!(config.initial_spawn_delay, 3000.0);
        assert!(config.god_mode);
        assert_eq!(config.world_width, WORLD_WIDTH);
    }

    #[test]
    fn test_from_json_validates() {
        let err = Config::from_json(r#"{ "tile_width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTileSize { .. }));

        let err = Config::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
