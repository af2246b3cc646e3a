//! Entity host
//!
//! The level generator only ever asks for blocks through [`TileSink`]. The
//! in-memory [`Entities`] store plays the host framework for the rest of the
//! simulation: it owns blocks and bullets, hands out ids, and supports
//! iteration by kind and destruction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::section::EdgeFlags;
use crate::consts::BULLET_SIZE;
use crate::error::SimError;
use crate::tile_center;

/// Stable handle for a host entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Entity classes the host can iterate over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Block,
    Bullet,
}

/// Capability to materialize one 1x1 tile block
pub trait TileSink {
    fn create_block(
        &mut self,
        tile_x: i32,
        tile_y: i32,
        edges: EdgeFlags,
    ) -> Result<EntityId, SimError>;
}

/// Create one block per cell of a w x h tile rectangle
///
/// Stops at the first host failure; blocks created before it stay alive and
/// their ids are lost to the caller, which is about to abort anyway.
pub fn create_block_rectangle<S: TileSink + ?Sized>(
    sink: &mut S,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
) -> Result<Vec<EntityId>, SimError> {
    let mut ids = Vec::with_capacity((w.max(0) * h.max(0)) as usize);
    for i in 0..w {
        for j in 0..h {
            let edges = EdgeFlags::for_cell(i, j, w, h);
            ids.push(sink.create_block(x + i, y + j, edges)?);
        }
    }
    Ok(ids)
}

/// A static 1x1 tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: EntityId,
    pub tile_x: i32,
    /// Pixel center (moves as the world scrolls)
    pub pos: Vec2,
    pub edges: EdgeFlags,
}

/// A projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    /// Pixels per 100ms
    pub vel: Vec2,
}

impl Bullet {
    /// Move along velocity
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * (dt / 100.0);
    }

    /// Bullet has left the world rectangle
    pub fn out_of_bounds(&self, width: f32, height: f32) -> bool {
        let half = BULLET_SIZE / 2.0;
        self.pos.x + half < 0.0
            || self.pos.x - half > width
            || self.pos.y + half < 0.0
            || self.pos.y - half > height
    }
}

/// In-memory entity store (blocks and bullets sorted by id)
#[derive(Debug, Clone)]
pub struct Entities {
    tile_width: f32,
    tile_height: f32,
    capacity: usize,
    blocks: Vec<Block>,
    bullets: Vec<Bullet>,
    next_id: u32,
}

impl Entities {
    pub fn new(tile_width: f32, tile_height: f32, capacity: usize) -> Self {
        Self {
            tile_width,
            tile_height,
            capacity,
            blocks: Vec::new(),
            bullets: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.blocks.len() + self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn block(&self, id: EntityId) -> Option<&Block> {
        self.blocks
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.blocks[i])
    }

    /// Allocate a new entity ID, failing once the host is full
    fn next_entity_id(&mut self) -> Result<EntityId, SimError> {
        if self.len() >= self.capacity {
            return Err(SimError::EntityCapacity {
                limit: self.capacity,
            });
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;
        Ok(id)
    }

    /// Spawn a bullet at a pixel position
    pub fn create_bullet(&mut self, pos: Vec2, vel: Vec2) -> Result<EntityId, SimError> {
        let id = self.next_entity_id()?;
        self.bullets.push(Bullet { id, pos, vel });
        Ok(id)
    }

    /// Visit the position of every entity of one kind
    pub fn all(&mut self, kind: EntityKind, mut visitor: impl FnMut(EntityId, &mut Vec2)) {
        match kind {
            EntityKind::Block => {
                for block in &mut self.blocks {
                    visitor(block.id, &mut block.pos);
                }
            }
            EntityKind::Bullet => {
                for bullet in &mut self.bullets {
                    visitor(bullet.id, &mut bullet.pos);
                }
            }
        }
    }

    /// Move a single entity vertically. Returns false if it no longer exists.
    pub fn translate(&mut self, id: EntityId, dy: f32) -> bool {
        if let Ok(i) = self.blocks.binary_search_by_key(&id, |b| b.id) {
            self.blocks[i].pos.y += dy;
            return true;
        }
        if let Ok(i) = self.bullets.binary_search_by_key(&id, |b| b.id) {
            self.bullets[i].pos.y += dy;
            return true;
        }
        false
    }

    /// Remove an entity. Returns false if it was already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if let Ok(i) = self.blocks.binary_search_by_key(&id, |b| b.id) {
            self.blocks.remove(i);
            return true;
        }
        if let Ok(i) = self.bullets.binary_search_by_key(&id, |b| b.id) {
            self.bullets.remove(i);
            return true;
        }
        false
    }

    /// Move bullets and drop any that left the world. Returns how many were dropped.
    pub fn update_bullets(&mut self, dt: f32, width: f32, height: f32) -> usize {
        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        let before = self.bullets.len();
        self.bullets.retain(|b| !b.out_of_bounds(width, height));
        before - self.bullets.len()
    }

    /// Remove every entity (ids keep counting up)
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.bullets.clear();
    }
}

impl TileSink for Entities {
    fn create_block(
        &mut self,
        tile_x: i32,
        tile_y: i32,
        edges: EdgeFlags,
    ) -> Result<EntityId, SimError> {
        let id = self.next_entity_id()?;
        let pos = tile_center(tile_x, tile_y, self.tile_width, self.tile_height);
        self.blocks.push(Block {
            id,
            tile_x,
            pos,
            edges,
        });
        Ok(id)
    }
}
