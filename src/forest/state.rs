//! Forest state: the live set of placed trees
//!
//! Every rebuild discards the previous instances and lays the whole forest
//! out again from the follower list. Tree heights are read from the
//! heightfield at rebuild time, so a terrain change needs a rebuild too.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::assign::Assignment;
use super::follower::Follower;
use crate::chapter::ChapterTable;
use crate::placement::Layout;
use crate::terrain::Heightfield;

/// One placed tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeInstance {
    /// Archetype id within the active roster
    pub archetype: usize,
    pub scale: f32,
    pub position: Vec3,
    /// Rotation about the vertical axis, radians in [0, 2π)
    pub rotation_y: f32,
    /// Absolute index of the follower this tree belongs to
    pub follower_index: usize,
    pub chapter_id: u32,
}

/// Trees a chapter was owed versus how many its layout produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterStats {
    pub id: u32,
    pub owed: usize,
    pub placed: usize,
}

/// Owns the tree instances produced by the last rebuild
#[derive(Clone, Debug, Default)]
pub struct ForestState {
    trees: Vec<TreeInstance>,
    chapter_stats: Vec<ChapterStats>,
}

impl ForestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trees(&self) -> &[TreeInstance] {
        &self.trees
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Per-chapter results of the last rebuild, in chapter order. Chapters
    /// skipped for having no followers are omitted.
    pub fn chapter_stats(&self) -> &[ChapterStats] {
        &self.chapter_stats
    }

    /// The tree belonging to a follower, if one was placed
    pub fn tree_for_follower(&self, follower_index: usize) -> Option<&TreeInstance> {
        self.trees.iter().find(|t| t.follower_index == follower_index)
    }

    pub fn clear(&mut self) {
        self.trees.clear();
        self.chapter_stats.clear();
    }

    /// Replace the instance set with a fresh layout of `followers`.
    ///
    /// Chapters are visited in ascending order; a chapter is skipped when
    /// there are fewer followers than its `min_count`. The central chapter
    /// uses the spiral, the rest the jittered grid. `rng` drives grid jitter
    /// and per-tree rotation.
    pub fn rebuild<R: Rng + ?Sized>(
        &mut self,
        followers: &[Follower],
        chapters: &ChapterTable,
        heightfield: &Heightfield,
        archetype_count: usize,
        rng: &mut R,
    ) -> &[TreeInstance] {
        self.clear();
        let total = followers.len();

        for chapter in chapters.iter() {
            if total < chapter.min_count {
                continue;
            }

            let owed = chapter.trees_owed(total);
            let layout = Layout::for_chapter(chapters, chapter);
            let points = layout.place(owed, chapter, rng);

            for (local, point) in points.iter().enumerate() {
                let follower_index = chapter.first_index() + local;
                let Some(follower) = followers.get(follower_index) else {
                    break;
                };
                let assignment = Assignment::for_name(&follower.name, archetype_count);
                let y = heightfield.sample_height(point.x, point.y);

                self.trees.push(TreeInstance {
                    archetype: assignment.archetype,
                    scale: assignment.scale,
                    position: Vec3::new(point.x, y, point.y),
                    rotation_y: rng.gen_range(0.0..TAU),
                    follower_index,
                    chapter_id: chapter.id,
                });
            }

            if points.len() < owed {
                log::debug!(
                    "Chapter {}: {:?} layout placed {}/{} trees",
                    chapter.id, layout, points.len(), owed
                );
            }

            self.chapter_stats.push(ChapterStats {
                id: chapter.id,
                owed,
                placed: points.len(),
            });
        }

        log::debug!("Rebuilt forest: {} trees for {} followers", self.trees.len(), total);
        &self.trees
    }
}
