//! Simulation and configuration errors

use thiserror::Error;

/// Errors raised while the simulation is running
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Every candidate row was rejected by the reachability check.
    /// Not recoverable: the run must stop rather than place an unreachable row.
    #[error("could not create a reachable row after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    /// The entity host refused to create another entity
    #[error("entity limit of {limit} reached")]
    EntityCapacity { limit: usize },
}

/// Errors raised when validating or loading a [`crate::Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tile size must be non-zero (got {width}x{height})")]
    ZeroTileSize { width: u32, height: u32 },
    #[error("world size {world} is not a multiple of tile size {tile} along {axis}")]
    MisalignedWorld {
        axis: &'static str,
        world: u32,
        tile: u32,
    },
    #[error("world is {width_in_tiles} tiles wide, at least {min} are required")]
    WorldTooNarrow { width_in_tiles: i32, min: i32 },
    #[error("spawn delays must be positive (initial {initial}, min {min})")]
    NonPositiveSpawnDelay { initial: f32, min: f32 },
    #[error("min spawn delay {min} exceeds initial spawn delay {initial}")]
    InvertedSpawnDelay { initial: f32, min: f32 },
    #[error("time to final spawn delay must be positive (got {0})")]
    NonPositiveRamp(f32),
    #[error("entity capacity must be non-zero")]
    ZeroEntityCapacity,
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
