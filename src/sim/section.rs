//! Platform sections on the tile grid
//!
//! A section is a contiguous horizontal run of solid tiles within one row:
//! - x: leftmost tile column
//! - width: number of tiles (right edge = x + width, exclusive)

use serde::{Deserialize, Serialize};

/// A horizontal platform span in tile units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    /// Leftmost tile column
    pub x: i32,
    /// Width in tiles
    pub width: i32,
}

/// All sections placed at one spawn event. Order is not left-to-right.
pub type Row = Vec<Section>;

impl Section {
    pub const fn new(x: i32, width: i32) -> Self {
        Self { x, width }
    }

    /// Left edge (inclusive tile column)
    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive tile column)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Section lies within a row of the given width and is non-empty
    pub fn fits(&self, width_in_tiles: i32) -> bool {
        self.x >= 0 && self.width >= 1 && self.right() <= width_in_tiles
    }

    /// Section spans the whole row
    pub fn is_full_width(&self, width_in_tiles: i32) -> bool {
        self.x <= 0 && self.right() >= width_in_tiles
    }
}

/// Which sides of a tile take part in collision
///
/// Interior faces of a rectangle are left open so the player doesn't snag
/// on seams between neighbouring tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl EdgeFlags {
    /// Flags for cell (i, j) of a w x h rectangle
    pub fn for_cell(i: i32, j: i32, w: i32, h: i32) -> Self {
        Self {
            top: j == 0,
            bottom: j == h - 1,
            left: i == 0,
            right: i == w - 1,
        }
    }
}
