//! A single play session
//!
//! Owns everything one run needs: tuning, the seeded RNG, the entity host,
//! the current world and the enemy spawner.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::EnemySpawner;
use super::entities::Entities;
use super::rng::RngState;
use super::timer::Timer;
use super::world::World;
use crate::config::Config;
use crate::error::SimError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player is dead; the world keeps scrolling until the timer runs out
    Dying { timer: Timer },
    /// Run ended, waiting for restart
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub entities: Entities,
    pub world: World,
    pub spawner: EnemySpawner,
    pub phase: GamePhase,
    pub points: u64,
    /// Enemy spawns requested by the spawner this level
    pub enemy_spawns: u64,
    /// Frame time accumulated this level (ms)
    pub time_ms: f64,
}

impl Session {
    /// Start a run. `config` is expected to have passed [`Config::validate`].
    pub fn new(config: Config, seed: u64) -> Result<Self, SimError> {
        debug_assert!(config.validate().is_ok(), "session started with invalid config");

        let mut entities = Entities::new(
            config.tile_width as f32,
            config.tile_height as f32,
            config.max_entities,
        );
        let world = World::new(&config, &mut entities)?;
        let spawner = EnemySpawner::new(&config);
        log::info!("Session started with seed {}", seed);

        Ok(Self {
            rng: RngState::new(seed).to_rng(),
            seed,
            entities,
            world,
            spawner,
            phase: GamePhase::Playing,
            points: 0,
            enemy_spawns: 0,
            time_ms: 0.0,
            config,
        })
    }

    pub fn add_points(&mut self, points: u64) {
        self.points += points;
    }

    /// Player died: game over follows after a short delay
    pub fn died(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Dying {
                timer: Timer::new(self.config.game_over_delay_ms),
            };
        }
    }

    /// Tear down the current level and enter a fresh one
    ///
    /// The RNG carries on rather than reseeding, so each level of a run differs.
    pub fn restart(&mut self) -> Result<(), SimError> {
        self.world.destroy(&mut self.entities);
        self.entities.clear();
        self.world = World::new(&self.config, &mut self.entities)?;
        self.spawner = EnemySpawner::new(&self.config);
        self.phase = GamePhase::Playing;
        self.points = 0;
        self.enemy_spawns = 0;
        self.time_ms = 0.0;
        log::info!("Level restarted");
        Ok(())
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
