//! Blorp - An endless vertical-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, scrolling, spawning)
//! - `config`: Data-driven game tuning
//! - `error`: Simulation and configuration errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::Config;
pub use error::{ConfigError, SimError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Default tile size in pixels
    pub const TILE_WIDTH: u32 = 20;
    pub const TILE_HEIGHT: u32 = 20;

    /// Default world dimensions in pixels (12 x 16 tiles)
    pub const WORLD_WIDTH: u32 = 240;
    pub const WORLD_HEIGHT: u32 = 320;

    /// Narrowest world the row patterns can fill (widest fixed-width pattern)
    pub const MIN_WIDTH_IN_TILES: i32 = 10;

    /// Row generation gives up after this many rejected retries
    pub const MAX_ROW_RETRIES: u32 = 20;

    /// Horizontal jump reach in tiles used by the reachability test
    pub const JUMP_GAP_TILES: i32 = 2;

    /// World scroll speed: pixels moved per 100ms of frame time
    pub const SCROLL_SPEED: f32 = 3.0;

    /// Player hitbox in pixels
    pub const PLAYER_WIDTH: f32 = 11.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;

    /// Player spawn height above the bottom of the world
    pub const PLAYER_START_OFFSET: f32 = 100.0;

    /// Bullet hitbox in pixels
    pub const BULLET_SIZE: f32 = 2.0;
}

/// Convert a tile column/row to the pixel center of that tile
#[inline]
pub fn tile_center(tile_x: i32, tile_y: i32, tile_width: f32, tile_height: f32) -> glam::Vec2 {
    glam::Vec2::new(
        (tile_x as f32 + 0.5) * tile_width,
        (tile_y as f32 + 0.5) * tile_height,
    )
}
