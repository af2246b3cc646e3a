//! Enemy spawn pacing
//!
//! The difficulty curve is defined by three points: the starting spawn
//! delay, the final spawn delay, and how long it takes to get from one to
//! the other. The delay falls linearly and then holds at the final value.

use serde::{Deserialize, Serialize};

use super::timer::Timer;
use crate::config::Config;

/// Spawn delay after `elapsed` ms of a level
pub fn spawn_delay(elapsed: f32, initial: f32, min: f32, ramp_ms: f32) -> f32 {
    let amount_to_drop = initial - min;
    let amount_dropped = elapsed * (amount_to_drop / ramp_ms);
    (initial - amount_dropped).max(min)
}

/// Paces enemy creation using the difficulty curve
///
/// Creating the enemies is left to the caller; `update` only reports when
/// one is due.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpawner {
    total: Timer,
    countdown: Timer,
    spawned: u64,
}

impl EnemySpawner {
    pub fn new(config: &Config) -> Self {
        Self {
            total: Timer::stopwatch(),
            countdown: Timer::new(config.initial_spawn_delay),
            spawned: 0,
        }
    }

    /// Current delay between spawns
    pub fn spawn_delay(&self, config: &Config) -> f32 {
        spawn_delay(
            self.total.elapsed(),
            config.initial_spawn_delay,
            config.min_spawn_delay,
            config.time_to_final_spawn_delay_ms,
        )
    }

    /// Time since the spawner was created (ms)
    pub fn elapsed(&self) -> f32 {
        self.total.elapsed()
    }

    /// Spawn events emitted so far
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Advance the clocks. Returns true when an enemy should be created.
    pub fn update(&mut self, dt: f32, config: &Config) -> bool {
        self.total.update(dt);
        self.countdown.update(dt);
        self.countdown.set_duration(self.spawn_delay(config));

        if !self.countdown.expired() {
            return false;
        }
        self.countdown.reset();
        self.spawned += 1;
        log::debug!(
            "Enemy spawn #{} at {:.0}ms (delay {:.0}ms)",
            self.spawned,
            self.total.elapsed(),
            self.countdown.duration()
        );
        true
    }
}
