//! The player character
//!
//! Collision resolution belongs to the host; it reports landings through
//! [`Player::land`] and hazard contact through [`Player::hit_hazard`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::timer::Timer;
use crate::config::Config;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// Player state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Walking,
    Dead,
}

/// Buttons held or pressed this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    /// Jump (pressed this tick)
    pub jump: bool,
    /// Fire (pressed this tick)
    pub shoot: bool,
    /// Aim upward while firing
    pub aim_up: bool,
}

/// A bullet the player wants created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// What happened to the player during an update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerEvents {
    pub died: bool,
    pub shot: Option<Shot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Pixel center
    pub pos: Vec2,
    /// Pixels per 100ms
    pub vel: Vec2,
    pub size: Vec2,
    pub state: PlayerState,
    pub facing_left: bool,
    pub grounded: bool,
    shot_throttle: Timer,
}

impl Player {
    pub fn new(pos: Vec2, config: &Config) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            state: PlayerState::Walking,
            facing_left: false,
            grounded: false,
            shot_throttle: Timer::new(config.fire_throttle_ms),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    /// Bottom edge of the hitbox
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Kill the player if it has dropped below `world_height`.
    /// Returns true only on the tick the player dies.
    pub fn check_fall(&mut self, world_height: f32) -> bool {
        if self.state == PlayerState::Walking && self.bottom() > world_height {
            self.enter_dead();
            return true;
        }
        false
    }

    /// Touched an enemy or spikes. Returns true if this killed the player.
    pub fn hit_hazard(&mut self, god_mode: bool) -> bool {
        if god_mode || self.is_dead() {
            return false;
        }
        self.enter_dead();
        true
    }

    /// Stand on a surface whose top is at `surface_y`
    pub fn land(&mut self, surface_y: f32) {
        if self.is_dead() {
            return;
        }
        self.pos.y = surface_y - self.size.y / 2.0;
        self.vel.y = 0.0;
        self.grounded = true;
    }

    pub fn jump(&mut self, jump_speed: f32) {
        self.vel.y = -jump_speed;
    }

    /// Advance one tick of `dt` ms
    pub fn update(
        &mut self,
        input: &PlayerInput,
        config: &Config,
        world_height: f32,
        dt: f32,
    ) -> PlayerEvents {
        match self.state {
            PlayerState::Walking => self.update_walking(input, config, world_height, dt),
            PlayerState::Dead => PlayerEvents::default(),
        }
    }

    fn update_walking(
        &mut self,
        input: &PlayerInput,
        config: &Config,
        world_height: f32,
        dt: f32,
    ) -> PlayerEvents {
        let mut events = PlayerEvents::default();
        self.shot_throttle.update(dt);

        let step = dt / 100.0;

        if self.vel.y != 0.0 {
            self.grounded = false;
        }

        if self.check_fall(world_height) {
            events.died = true;
            return events;
        }

        // No horizontal acceleration: speed is all or nothing
        self.vel.x = 0.0;

        if input.jump && self.grounded {
            self.jump(config.jump_speed);
        }

        if input.shoot {
            events.shot = self.shoot(input.aim_up, config.bullet_speed);
        }

        if input.left {
            self.vel.x = -config.player_speed;
            self.facing_left = true;
        } else if input.right {
            self.vel.x = config.player_speed;
            self.facing_left = false;
        }

        self.vel.y += config.gravity_accel;
        self.pos += self.vel * step;

        events
    }

    fn shoot(&mut self, aim_up: bool, speed: f32) -> Option<Shot> {
        if !self.shot_throttle.expired() {
            return None;
        }
        self.shot_throttle.reset();

        let dir = if aim_up {
            Vec2::new(0.0, -1.0)
        } else if self.facing_left {
            Vec2::new(-1.0, 0.0)
        } else {
            Vec2::new(1.0, 0.0)
        };
        Some(Shot {
            pos: self.pos,
            vel: dir * speed,
        })
    }

    fn enter_dead(&mut self) {
        self.state = PlayerState::Dead;
        self.vel = Vec2::ZERO;
        log::info!("Player died at ({:.1}, {:.1})", self.pos.x, self.pos.y);
    }
}
