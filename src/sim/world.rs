//! Scrolling world
//!
//! The player never climbs: the world slides down underneath them. Every
//! tick the world moves all of its tiles, the player and any bullets down by
//! the scroll step, and once it has scrolled a full spawn gap it asks the
//! row generator for a fresh row just above the top of the screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Entities, EntityId, EntityKind, create_block_rectangle};
use super::player::Player;
use super::rng::RandomSource;
use super::rowgen::{RowGenerator, SpawnedRow};
use super::section::Section;
use crate::config::Config;
use crate::consts::{PLAYER_START_OFFSET, SCROLL_SPEED};
use crate::error::SimError;

/// Vertical distance between starting platform layers, in tiles
const INITIAL_LAYER_GAP: i32 = 3;

/// Scroll distance in pixels covered by `dt` ms
#[inline]
pub fn scroll_step(dt: f32) -> f32 {
    dt / 100.0 * SCROLL_SPEED
}

/// How far the world has scrolled and when the next row is due
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Total distance scrolled (px)
    pub scroll_y: f32,
    /// Scroll position at the last row spawn (px)
    pub last_spawn_y: f32,
    /// Distance between row spawns (px)
    pub spawn_gap: f32,
}

impl ScrollState {
    pub fn new(last_spawn_y: f32, spawn_gap: f32) -> Self {
        Self {
            scroll_y: 0.0,
            last_spawn_y,
            spawn_gap,
        }
    }

    /// Advance by `dt` ms, returning the step in pixels
    pub fn advance(&mut self, dt: f32) -> f32 {
        let step = scroll_step(dt);
        self.scroll_y += step;
        step
    }

    pub fn spawn_due(&self) -> bool {
        self.scroll_y > self.last_spawn_y + self.spawn_gap
    }

    /// Record a spawn at the current scroll position.
    /// Flooring makes the real gap drift a little from `spawn_gap`.
    pub fn mark_spawned(&mut self) {
        self.last_spawn_y = self.scroll_y.floor();
    }
}

/// Outcome of one world tick
#[derive(Debug, Clone, Default)]
pub struct AdvanceReport {
    /// Scroll step applied this tick (px)
    pub step: f32,
    /// Row generated this tick, if any
    pub spawned: Option<SpawnedRow>,
    /// Tiles destroyed after scrolling off the bottom
    pub culled: usize,
    /// The player dropped below the world this tick
    pub player_fell: bool,
}

#[derive(Debug, Clone)]
pub struct World {
    width: f32,
    height: f32,
    tile_height: f32,
    /// Tiles owned by this world, for scrolling and teardown
    objects: Vec<EntityId>,
    generator: RowGenerator,
    scroll: ScrollState,
    player: Player,
    rows_spawned: u64,
}

impl World {
    /// Build the starting platforms and place the player
    pub fn new(config: &Config, entities: &mut Entities) -> Result<Self, SimError> {
        let width_in_tiles = config.width_in_tiles();
        let tile_height = config.tile_height as f32;
        let width = config.world_width as f32;
        let height = config.world_height as f32;

        let mut world = Self {
            width,
            height,
            tile_height,
            objects: Vec::new(),
            generator: RowGenerator::new(width_in_tiles, Vec::new()),
            scroll: ScrollState::new(-tile_height, 3.0 * tile_height),
            player: Player::new(
                Vec2::new(width / 2.0, height - PLAYER_START_OFFSET),
                config,
            ),
            rows_spawned: 0,
        };
        world.create_initial_platforms(config, entities)?;
        log::info!(
            "World created: {}x{} tiles, {} starting blocks",
            width_in_tiles,
            config.height_in_tiles(),
            world.objects.len()
        );
        Ok(world)
    }

    /// Full floor, then alternating split and center layers above it
    fn create_initial_platforms(
        &mut self,
        config: &Config,
        entities: &mut Entities,
    ) -> Result<(), SimError> {
        let width_in_tiles = config.width_in_tiles();
        let start = config.height_in_tiles() - 3;
        let gap = INITIAL_LAYER_GAP;
        let split = [Section::new(0, 4), Section::new(width_in_tiles - 4, 4)];
        let center = Section::new(width_in_tiles / 2 - 3, 6);

        let floor = [Section::new(0, width_in_tiles)];
        let middle = [center];

        let layers: [(i32, &[Section]); 4] = [
            (start, &floor[..]),
            (start - gap, &split[..]),
            (start - gap * 2, &middle[..]),
            (start - gap * 3, &split[..]),
        ];
        for (y, sections) in layers {
            for section in sections {
                let ids = create_block_rectangle(entities, section.x, y, section.width, 1)?;
                self.objects.extend(ids);
            }
        }

        self.generator = RowGenerator::new(width_in_tiles, split.to_vec());
        Ok(())
    }

    /// World height in pixels; the player dies below it
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Replace the scroll state (e.g. to resume a run)
    pub fn set_scroll(&mut self, scroll: ScrollState) {
        self.scroll = scroll;
    }

    pub fn generator(&self) -> &RowGenerator {
        &self.generator
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Tiles currently owned by this world
    pub fn objects(&self) -> &[EntityId] {
        &self.objects
    }

    pub fn rows_spawned(&self) -> u64 {
        self.rows_spawned
    }

    /// Scroll the world by one tick of `dt` ms
    pub fn advance<R: RandomSource + ?Sized>(
        &mut self,
        dt: f32,
        entities: &mut Entities,
        rng: &mut R,
    ) -> Result<AdvanceReport, SimError> {
        let step = self.scroll.advance(dt);

        for &id in &self.objects {
            entities.translate(id, step);
        }
        self.player.pos.y += step;
        entities.all(EntityKind::Bullet, |_, pos| pos.y += step);

        let mut report = AdvanceReport {
            step,
            ..Default::default()
        };

        if self.scroll.spawn_due() {
            let spawned = self.generator.spawn_next_row(rng, entities)?;
            self.objects.extend(spawned.blocks.iter().copied());
            self.scroll.mark_spawned();
            self.rows_spawned += 1;
            log::debug!(
                "Row {} at scroll {:.1}: {:?}",
                self.rows_spawned,
                self.scroll.scroll_y,
                spawned.sections
            );
            report.spawned = Some(spawned);
        }

        report.culled = self.cull_offscreen(entities);
        report.player_fell = self.player.check_fall(self.height);
        Ok(report)
    }

    /// Destroy tiles that have scrolled entirely below the world
    fn cull_offscreen(&mut self, entities: &mut Entities) -> usize {
        let limit = self.height + self.tile_height / 2.0;
        let before = self.objects.len();
        self.objects.retain(|&id| {
            match entities.block(id).map(|block| block.pos.y > limit) {
                Some(true) => {
                    entities.destroy(id);
                    false
                }
                Some(false) => true,
                None => false,
            }
        });
        before - self.objects.len()
    }

    /// Destroy every tile this world owns
    pub fn destroy(&mut self, entities: &mut Entities) {
        for id in self.objects.drain(..) {
            entities.destroy(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::reach::is_reachable;
    use crate::sim::rng::RngState;

    fn setup() -> (Config, Entities, World) {
        let config = Config::default();
        let mut entities = Entities::new(
            config.tile_width as f32,
            config.tile_height as f32,
            config.max_entities,
        );
        let world = World::new(&config, &mut entities).expect("world builds");
        (config, entities, world)
    }

    #[test]
    fn test_initial_platforms() {
        let (_, entities, world) = setup();
        // Floor (12) + two splits (2 x 8) + center (6)
        assert_eq!(world.objects().len(), 12 + 16 + 6);
        assert_eq!(entities.blocks().len(), 34);
        assert_eq!(
            world.generator().last_sections(),
            &[Section::new(0, 4), Section::new(8, 4)]
        );
        assert_eq!(world.scroll().last_spawn_y, -20.0);
        assert_eq!(world.scroll().spawn_gap, 60.0);

        // Floor sits on tile row 13 of 16
        let floor_y = (13.0 + 0.5) * 20.0;
        let floor = entities
            .blocks()
            .iter()
            .filter(|b| b.pos.y == floor_y)
            .count();
        assert_eq!(floor, 12);

        assert_eq!(world.player().pos, Vec2::new(120.0, 220.0));
    }

    #[test]
    fn test_scroll_step() {
        assert_eq!(scroll_step(100.0), 3.0);
        assert_eq!(scroll_step(50.0), 1.5);
    }

    #[test]
    fn test_advance_moves_everything_down() {
        let (_, mut entities, mut world) = setup();
        let mut rng = RngState::new(1).to_rng();
        let bullet = entities
            .create_bullet(Vec2::new(50.0, 50.0), Vec2::ZERO)
            .unwrap();
        let first = world.objects()[0];
        let block_y = entities.block(first).unwrap().pos.y;
        let player_y = world.player().pos.y;

        let report = world.advance(50.0, &mut entities, &mut rng).unwrap();
        assert_eq!(report.step, 1.5);
        assert!(report.spawned.is_none());
        assert_eq!(entities.block(first).unwrap().pos.y, block_y + 1.5);
        assert_eq!(world.player().pos.y, player_y + 1.5);
        let moved = entities.bullets().iter().find(|b| b.id == bullet).unwrap();
        assert_eq!(moved.pos.y, 51.5);
    }

    #[test]
    fn test_spawn_triggers_once_and_floors_scroll() {
        let (_, mut entities, mut world) = setup();
        let mut rng = RngState::new(5).to_rng();
        let gap = 60.0;
        world.set_scroll(ScrollState::new(0.0, gap));

        let mut spawns = 0;
        while spawns == 0 {
            let report = world.advance(50.0, &mut entities, &mut rng).unwrap();
            if report.spawned.is_some() {
                spawns += 1;
            }
        }

        // 41 steps of 1.5px: first past 60 at 61.5
        let scroll = *world.scroll();
        assert_eq!(scroll.scroll_y, 61.5);
        assert_eq!(scroll.last_spawn_y, 61.0);
        assert_ne!(scroll.last_spawn_y, gap);
        assert_eq!(world.rows_spawned(), 1);

        // Nothing more until the next full gap
        let report = world.advance(50.0, &mut entities, &mut rng).unwrap();
        assert!(report.spawned.is_none());
    }

    #[test]
    fn test_spawned_row_sits_above_screen() {
        let (config, mut entities, mut world) = setup();
        let mut rng = RngState::new(8).to_rng();
        world.set_scroll(ScrollState::new(0.0, 0.0));

        let previous = world.generator().last_sections().to_vec();
        let report = world.advance(50.0, &mut entities, &mut rng).unwrap();
        let spawned = report.spawned.expect("row due immediately");

        assert!(is_reachable(&spawned.sections, &previous, config.width_in_tiles()));
        for id in &spawned.blocks {
            let block = entities.block(*id).expect("block created");
            assert_eq!(block.pos.y, -10.0);
            assert!(world.objects().contains(id));
        }
    }

    #[test]
    fn test_player_falls_out_of_world() {
        let (_, mut entities, mut world) = setup();
        let mut rng = RngState::new(2).to_rng();
        world.player_mut().pos.y = 309.0;

        // Bottom edge 319 + 1.5 = 320.5 > 320
        let report = world.advance(50.0, &mut entities, &mut rng).unwrap();
        assert!(report.player_fell);
        assert!(world.player().is_dead());

        // Only reported once
        let report = world.advance(50.0, &mut entities, &mut rng).unwrap();
        assert!(!report.player_fell);
    }

    #[test]
    fn test_tiles_culled_below_world() {
        let (_, mut entities, mut world) = setup();
        let mut rng = RngState::new(4).to_rng();
        // Park the spawn threshold out of reach so only culling happens
        world.set_scroll(ScrollState::new(0.0, 1.0e6));

        // Floor top at 260: it is gone once its top passes 320, i.e. after more than 60px
        let mut culled = 0;
        for _ in 0..41 {
            culled += world.advance(50.0, &mut entities, &mut rng).unwrap().culled;
        }
        assert_eq!(culled, 12);
        assert_eq!(world.objects().len(), 22);
        assert_eq!(entities.blocks().len(), 22);
    }

    #[test]
    fn test_destroy_removes_all_tiles() {
        let (_, mut entities, mut world) = setup();
        world.destroy(&mut entities);
        assert!(world.objects().is_empty());
        assert!(entities.is_empty());
    }
}
