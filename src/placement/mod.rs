//! Tree placement inside chapter regions
//!
//! Both layouts return XZ points in placement order; the n-th point belongs
//! to the chapter's n-th follower slot. The spiral is fully deterministic.
//! The grid draws its jitter from a caller-supplied [`rand::Rng`], so a
//! fixed-seed generator reproduces it exactly.

pub mod spiral;
pub mod grid;

pub use spiral::{layout_spiral, GOLDEN_RATIO, SPIRAL_SPACING, SPIRAL_FILL};
pub use grid::{layout_grid, GRID_OVERSAMPLE, GRID_JITTER, FALLBACK_FILL};

use glam::Vec2;
use rand::Rng;

use crate::chapter::{Chapter, ChapterTable};

/// Which algorithm lays out a chapter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Spiral,
    Grid,
}

impl Layout {
    /// The central chapter spirals; every other chapter uses the grid
    pub fn for_chapter(table: &ChapterTable, chapter: &Chapter) -> Self {
        if table.is_central(chapter) {
            Layout::Spiral
        } else {
            Layout::Grid
        }
    }

    pub fn place<R: Rng + ?Sized>(self, count: usize, chapter: &Chapter, rng: &mut R) -> Vec<Vec2> {
        match self {
            Layout::Spiral => layout_spiral(count, chapter),
            Layout::Grid => layout_grid(count, chapter, rng),
        }
    }
}
