//! Procedural row generation
//!
//! Each spawn picks one of four row shapes at random, synthesizes its
//! sections, and keeps trying until the new row is reachable from the last
//! one. Only the most recently accepted row is remembered.

use serde::{Deserialize, Serialize};

use super::entities::{EntityId, TileSink, create_block_rectangle};
use super::reach::is_reachable;
use super::rng::RandomSource;
use super::section::{Row, Section};
use crate::consts::MAX_ROW_RETRIES;
use crate::error::SimError;

/// Tile row new platforms appear on (one above the visible top)
pub const SPAWN_TILE_Y: i32 = -1;

/// Attempts after which a warning is logged
const WARN_AFTER_ATTEMPTS: u32 = 10;

/// Row shape, carrying the parameters drawn for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowPattern {
    /// Full row with a gap: `hole_width` tiles centered on column `center`
    Hole { hole_width: i32, center: i32 },
    /// Platform against the left wall
    LeftEdge { width: i32 },
    /// Platform against the right wall
    RightEdge { width: i32 },
    /// Platform centered in the row
    Center { width: i32 },
}

impl RowPattern {
    /// Draw a pattern kind uniformly, then its parameters
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R, width_in_tiles: i32) -> Self {
        match rng.rand_int(0, 3) {
            0 => {
                let hole_width = (rng.rand_int(1, 4) * 2).min(max_hole_width(width_in_tiles));
                let center = rng.rand_int(hole_width, width_in_tiles - hole_width);
                RowPattern::Hole { hole_width, center }
            }
            1 => RowPattern::LeftEdge {
                width: rng.rand_int(2, 10),
            },
            2 => RowPattern::RightEdge {
                width: rng.rand_int(2, 10),
            },
            _ => RowPattern::Center {
                width: rng.rand_int(1, 5) * 2,
            },
        }
    }

    /// Sections making up this pattern in a row of the given width
    pub fn sections(&self, width_in_tiles: i32) -> Row {
        match *self {
            RowPattern::Hole { hole_width, center } => {
                let left_width = center - hole_width / 2;
                let right_x = center + hole_width / 2;
                vec![
                    Section::new(0, left_width),
                    Section::new(right_x, width_in_tiles - right_x),
                ]
            }
            RowPattern::LeftEdge { width } => vec![Section::new(0, width)],
            RowPattern::RightEdge { width } => vec![Section::new(width_in_tiles - width, width)],
            RowPattern::Center { width } => vec![Section::new(width_in_tiles / 2 - width / 2, width)],
        }
    }
}

/// Widest even hole that still leaves a platform on both sides
///
/// The hole center is drawn from `[hw, W - hw]`, which is empty once
/// `2 * hw > W`. Narrow worlds get their hole width capped instead.
pub fn max_hole_width(width_in_tiles: i32) -> i32 {
    ((width_in_tiles / 2) & !1).max(2)
}

/// An accepted row and the blocks created for it
#[derive(Debug, Clone)]
pub struct SpawnedRow {
    pub pattern: RowPattern,
    pub sections: Row,
    pub blocks: Vec<EntityId>,
}

/// Generates reachable rows one spawn at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowGenerator {
    width_in_tiles: i32,
    last_sections: Row,
}

impl RowGenerator {
    pub fn new(width_in_tiles: i32, last_sections: Row) -> Self {
        Self {
            width_in_tiles,
            last_sections,
        }
    }

    pub fn width_in_tiles(&self) -> i32 {
        self.width_in_tiles
    }

    /// The most recently accepted row
    pub fn last_sections(&self) -> &[Section] {
        &self.last_sections
    }

    /// Pick a row reachable from the last one without committing it
    pub fn next_row<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(RowPattern, Row), SimError> {
        let width = self.width_in_tiles;
        self.next_row_with(rng, |candidate, previous| {
            is_reachable(candidate, previous, width)
        })
    }

    /// Pick a row accepted by `accept(candidate, previous)`
    ///
    /// Makes at most `MAX_ROW_RETRIES + 1` attempts.
    pub fn next_row_with<R, F>(&self, rng: &mut R, mut accept: F) -> Result<(RowPattern, Row), SimError>
    where
        R: RandomSource + ?Sized,
        F: FnMut(&[Section], &[Section]) -> bool,
    {
        let max_attempts = MAX_ROW_RETRIES + 1;
        for attempt in 1..=max_attempts {
            let pattern = RowPattern::random(rng, self.width_in_tiles);
            let candidate = pattern.sections(self.width_in_tiles);
            if accept(&candidate, &self.last_sections) {
                log::debug!("Row accepted on attempt {}: {:?}", attempt, pattern);
                return Ok((pattern, candidate));
            }
            if attempt == WARN_AFTER_ATTEMPTS {
                log::warn!(
                    "{} rows rejected in a row above {:?}",
                    attempt,
                    self.last_sections
                );
            }
        }

        log::error!(
            "No reachable row after {} attempts above {:?}",
            max_attempts,
            self.last_sections
        );
        Err(SimError::GenerationExhausted {
            attempts: max_attempts,
        })
    }

    /// Generate the next row, materialize its tiles, and remember it
    pub fn spawn_next_row<R, S>(&mut self, rng: &mut R, sink: &mut S) -> Result<SpawnedRow, SimError>
    where
        R: RandomSource + ?Sized,
        S: TileSink + ?Sized,
    {
        let (pattern, sections) = self.next_row(rng)?;

        let mut blocks = Vec::new();
        for section in &sections {
            blocks.extend(create_block_rectangle(
                sink,
                section.x,
                SPAWN_TILE_Y,
                section.width,
                1,
            )?);
        }

        self.last_sections = sections.clone();
        Ok(SpawnedRow {
            pattern,
            sections,
            blocks,
        })
    }
}
