//! Reachability of a new row from the row below it
//!
//! The player can hop up onto a section from a platform that ends no more
//! than [`JUMP_GAP_TILES`] tiles short of the section's left or right edge.

use super::section::Section;
use crate::consts::JUMP_GAP_TILES;

/// Check whether every section in `candidate` can be reached from `previous`
///
/// A section touching both world boundaries is never reachable: neither
/// approach is tested for it.
pub fn is_reachable(candidate: &[Section], previous: &[Section], width_in_tiles: i32) -> bool {
    candidate
        .iter()
        .all(|section| section_reachable(section, previous, width_in_tiles))
}

/// Check a single section against the previous row
pub fn section_reachable(section: &Section, previous: &[Section], width_in_tiles: i32) -> bool {
    if section.left() > 0 && reachable_from_left(section, previous) {
        return true;
    }
    if section.right() < width_in_tiles && reachable_from_right(section, previous) {
        return true;
    }
    false
}

/// A platform below starts left of the section and ends within jump range of it
fn reachable_from_left(section: &Section, previous: &[Section]) -> bool {
    let x = section.left();
    previous
        .iter()
        .any(|below| below.left() < x && below.right() > x - JUMP_GAP_TILES)
}

/// A platform below ends right of the section and starts within jump range of it
fn reachable_from_right(section: &Section, previous: &[Section]) -> bool {
    let edge = section.right();
    previous
        .iter()
        .any(|below| below.right() > edge && below.left() < edge + JUMP_GAP_TILES)
}
