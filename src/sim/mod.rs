//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame time is the only clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod entities;
pub mod player;
pub mod reach;
pub mod rng;
pub mod rowgen;
pub mod section;
pub mod session;
pub mod tick;
pub mod timer;
pub mod world;

pub use difficulty::{EnemySpawner, spawn_delay};
pub use entities::{Block, Bullet, Entities, EntityId, EntityKind, TileSink, create_block_rectangle};
pub use player::{Player, PlayerEvents, PlayerInput, PlayerState, Shot};
pub use reach::{is_reachable, section_reachable};
pub use rng::{RandomSource, RngState};
pub use rowgen::{RowGenerator, RowPattern, SPAWN_TILE_Y, SpawnedRow, max_hole_width};
pub use section::{EdgeFlags, Row, Section};
pub use session::{GamePhase, Session};
pub use tick::{TickInput, tick};
pub use timer::Timer;
pub use world::{AdvanceReport, ScrollState, World, scroll_step};
