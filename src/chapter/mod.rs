//! Chapter partition table
//!
//! Chapters split the follower count range into contiguous bands, each owning
//! a circular region of the world. The first chapter is the central one.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// A circular world region tied to a follower-count band
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    /// First follower count (1-based) that belongs to this chapter
    pub min_count: usize,
    /// Last follower count that belongs to this chapter
    pub max_count: usize,
    /// Region center on the XZ plane
    pub center: Vec2,
    pub radius: f32,
}

impl Chapter {
    pub fn new(id: u32, min_count: usize, max_count: usize, center: Vec2, radius: f32) -> Self {
        Self { id, min_count, max_count, center, radius }
    }

    /// Number of follower slots in this chapter
    pub fn capacity(&self) -> usize {
        self.max_count + 1 - self.min_count
    }

    pub fn contains_count(&self, count: usize) -> bool {
        (self.min_count..=self.max_count).contains(&count)
    }

    /// Tree slots this chapter must render for `total` followers
    pub fn trees_owed(&self, total: usize) -> usize {
        let before = self.min_count.saturating_sub(1);
        total.saturating_sub(before).min(self.capacity())
    }

    /// Absolute follower index of this chapter's first slot
    pub fn first_index(&self) -> usize {
        self.min_count.saturating_sub(1)
    }
}

/// How far the current count has progressed through its chapter
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChapterProgress {
    pub chapter_id: u32,
    pub count: usize,
    pub max: usize,
    /// Fraction of the chapter filled, in [0, 1]
    pub fraction: f32,
}

/// Static, validated chapter configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ChapterTable {
    chapters: Vec<Chapter>,
}

impl ChapterTable {
    /// Validate and wrap a chapter list.
    ///
    /// The list must be non-empty, start at count 1, use distinct ids, and
    /// each chapter must begin exactly one past the previous chapter's
    /// `max_count`.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self> {
        let Some(first) = chapters.first() else {
            return Err(Error::InvalidChapters("no chapters".into()));
        };
        if first.min_count != 1 {
            return Err(Error::InvalidChapters(format!(
                "first chapter starts at {}, expected 1",
                first.min_count
            )));
        }

        let mut expected = 1;
        let mut ids = HashSet::with_capacity(chapters.len());
        for chapter in &chapters {
            if !ids.insert(chapter.id) {
                return Err(Error::InvalidChapters(format!(
                    "chapter id {} appears more than once",
                    chapter.id
                )));
            }
            if chapter.min_count != expected {
                return Err(Error::InvalidChapters(format!(
                    "chapter {} starts at {}, expected {}",
                    chapter.id, chapter.min_count, expected
                )));
            }
            if chapter.max_count < chapter.min_count {
                return Err(Error::InvalidChapters(format!(
                    "chapter {} has max {} below min {}",
                    chapter.id, chapter.max_count, chapter.min_count
                )));
            }
            if !(chapter.radius > 0.0) {
                return Err(Error::InvalidChapters(format!(
                    "chapter {} has non-positive radius",
                    chapter.id
                )));
            }
            expected = chapter.max_count + 1;
        }

        Ok(Self { chapters })
    }

    /// The four-chapter layout the forest ships with
    pub fn reference() -> Self {
        Self {
            chapters: vec![
                Chapter::new(1, 1, 100, Vec2::new(0.0, 0.0), 120.0),
                Chapter::new(2, 101, 599, Vec2::new(0.0, -250.0), 140.0),
                Chapter::new(3, 600, 1500, Vec2::new(250.0, 0.0), 150.0),
                Chapter::new(4, 1501, 3000, Vec2::new(-250.0, 0.0), 160.0),
            ],
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// The central chapter, laid out as a spiral
    pub fn central(&self) -> &Chapter {
        &self.chapters[0]
    }

    /// Whether `chapter`, borrowed from this table, is its first entry
    pub fn is_central(&self, chapter: &Chapter) -> bool {
        std::ptr::eq(chapter, self.central())
    }

    /// Hard cap on total followers
    pub fn max_followers(&self) -> usize {
        self.chapters.last().map_or(0, |c| c.max_count)
    }

    /// Chapter the given follower count falls in; the first chapter for 0
    pub fn chapter_for(&self, count: usize) -> &Chapter {
        self.chapters
            .iter()
            .rev()
            .find(|c| c.min_count <= count)
            .unwrap_or_else(|| self.central())
    }

    /// Progress of `count` through its chapter
    pub fn progress(&self, count: usize) -> ChapterProgress {
        let chapter = self.chapter_for(count);
        let filled = (count + 1).saturating_sub(chapter.min_count);
        let fraction = (filled as f32 / chapter.capacity() as f32).clamp(0.0, 1.0);
        ChapterProgress {
            chapter_id: chapter.id,
            count,
            max: chapter.max_count,
            fraction,
        }
    }
}

impl Default for ChapterTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chapters() -> ChapterTable {
        ChapterTable::new(vec![
            Chapter::new(1, 1, 100, Vec2::ZERO, 120.0),
            Chapter::new(2, 101, 599, Vec2::new(0.0, -250.0), 140.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_reference_is_valid() {
        let table = ChapterTable::reference();
        assert_eq!(ChapterTable::new(table.chapters().to_vec()).unwrap(), table);
        assert_eq!(table.max_followers(), 3000);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_chapter_for_covers_every_count() {
        let table = ChapterTable::reference();
        for n in 0..=3000 {
            let chapter = table.chapter_for(n);
            if n == 0 {
                assert_eq!(chapter.id, 1);
            } else {
                assert!(chapter.contains_count(n), "count {} -> chapter {}", n, chapter.id);
                let hits = table.iter().filter(|c| c.contains_count(n)).count();
                assert_eq!(hits, 1);
            }
        }
    }

    #[test]
    fn test_chapter_boundaries() {
        let table = ChapterTable::reference();
        assert_eq!(table.chapter_for(100).id, 1);
        assert_eq!(table.chapter_for(101).id, 2);
        assert_eq!(table.chapter_for(599).id, 2);
        assert_eq!(table.chapter_for(600).id, 3);
        assert_eq!(table.chapter_for(1501).id, 4);
        // Past the cap still resolves to the last chapter
        assert_eq!(table.chapter_for(5000).id, 4);
    }

    #[test]
    fn test_trees_owed_scenario() {
        let table = two_chapters();
        let c1 = table.get(1).unwrap();
        let c2 = table.get(2).unwrap();
        assert_eq!(c1.trees_owed(150), 100);
        assert_eq!(c2.trees_owed(150), 50);
        assert_eq!(c2.trees_owed(100), 0);
        assert_eq!(c2.trees_owed(10), 0);
        assert_eq!(c2.trees_owed(10_000), 499);
    }

    #[test]
    fn test_trees_owed_monotonic() {
        let table = ChapterTable::reference();
        for chapter in table.iter() {
            let mut prev = 0;
            for total in 0..=3100 {
                let owed = chapter.trees_owed(total);
                assert!(owed >= prev);
                if total < chapter.min_count {
                    assert_eq!(owed, 0);
                }
                prev = owed;
            }
        }
    }

    #[test]
    fn test_rejects_gaps_and_overlaps() {
        let gap = vec![
            Chapter::new(1, 1, 100, Vec2::ZERO, 10.0),
            Chapter::new(2, 102, 200, Vec2::ZERO, 10.0),
        ];
        assert!(matches!(ChapterTable::new(gap), Err(Error::InvalidChapters(_))));

        let overlap = vec![
            Chapter::new(1, 1, 100, Vec2::ZERO, 10.0),
            Chapter::new(2, 100, 200, Vec2::ZERO, 10.0),
        ];
        assert!(ChapterTable::new(overlap).is_err());

        let late_start = vec![Chapter::new(1, 2, 100, Vec2::ZERO, 10.0)];
        assert!(ChapterTable::new(late_start).is_err());

        assert!(ChapterTable::new(Vec::new()).is_err());

        let flat = vec![Chapter::new(1, 1, 100, Vec2::ZERO, 0.0)];
        assert!(ChapterTable::new(flat).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let chapters = vec![
            Chapter::new(1, 1, 100, Vec2::ZERO, 120.0),
            Chapter::new(1, 101, 599, Vec2::new(0.0, -250.0), 5.0),
        ];
        let err = ChapterTable::new(chapters).unwrap_err();
        assert!(matches!(err, Error::InvalidChapters(msg) if msg.contains("id 1")));
    }

    #[test]
    fn test_central_is_first_entry() {
        let table = ChapterTable::new(vec![
            Chapter::new(7, 1, 100, Vec2::ZERO, 120.0),
            Chapter::new(3, 101, 599, Vec2::new(0.0, -250.0), 140.0),
        ])
        .unwrap();
        let chapters = table.chapters();
        assert!(table.is_central(&chapters[0]));
        assert!(!table.is_central(&chapters[1]));
        assert_eq!(table.central().id, 7);
    }

    #[test]
    fn test_progress() {
        let table = ChapterTable::reference();

        let p = table.progress(50);
        assert_eq!(p.chapter_id, 1);
        assert_eq!(p.max, 100);
        assert!((p.fraction - 0.5).abs() < 1e-6);

        let p = table.progress(101);
        assert_eq!(p.chapter_id, 2);
        assert!((p.fraction - 1.0 / 499.0).abs() < 1e-6);

        assert_eq!(table.progress(0).fraction, 0.0);
        assert_eq!(table.progress(9000).fraction, 1.0);
    }
}
