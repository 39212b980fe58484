//! The forest facade: owns followers, chapters, terrain and tree instances.
//!
//! Every mutation that changes who is in the roster, or where trees stand,
//! is followed by a full rebuild before the call returns. Callers never see
//! tree positions that disagree with the follower list.

use std::path::Path;

use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::archetype::{Archetype, Quality, Season};
use super::exchange;
use super::follower::{Follower, Roster, SortOrder, today};
use super::mesh::{self, MeshOptions, TreeMesh};
use super::state::{ChapterStats, ForestState, TreeInstance};
use crate::animation::{AnimationTarget, Easing, Scheduler, Tween};
use crate::chapter::{Chapter, ChapterProgress, ChapterTable};
use crate::core::Result;
use crate::core::time::FrameClock;
use crate::generation::config::ForestConfig;
use crate::terrain::{Heightfield, Perlin2, TerrainGenerator, TerrainParams, TerrainProfile};

/// Glow burst expands to this radius multiplier before the tree grows
const GLOW_SCALE: f32 = 2.0;
const GLOW_OPACITY: f32 = 0.5;
const GLOW_DURATION: f32 = 0.5;
const GROW_DURATION: f32 = 1.0;
const SHRINK_DURATION: f32 = 0.5;

/// Snapshot of forest size and chapter fill
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestStats {
    pub follower_count: usize,
    pub tree_count: usize,
    pub current_chapter: u32,
    pub per_chapter: Vec<ChapterStats>,
}

/// A tree whose follower was removed, shrinking away
#[derive(Clone, Debug, PartialEq)]
pub struct DepartingTree {
    pub key: u64,
    pub tree: TreeInstance,
}

pub struct ForestCore {
    config: ForestConfig,
    roster: Roster,
    chapters: ChapterTable,
    terrain: TerrainGenerator,
    heightfield: Heightfield,
    state: ForestState,
    scheduler: Scheduler,
    clock: FrameClock,
    departing: Vec<DepartingTree>,
    next_departure: u64,
    rng: Box<dyn RngCore>,
}

impl ForestCore {
    /// Build an empty forest. Randomness is seeded from `config.seed`.
    pub fn new(config: ForestConfig) -> Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Build an empty forest drawing placement jitter, rotations and sample
    /// followers from `rng`.
    pub fn with_rng(config: ForestConfig, rng: impl RngCore + 'static) -> Result<Self> {
        let chapters = config.chapter_table()?;
        let noise = match config.noise_seed {
            Some(seed) => Perlin2::seeded(seed),
            None => Perlin2::classic(),
        };
        let terrain = TerrainGenerator::with_noise(config.terrain.clone(), noise);
        let heightfield = terrain.generate();

        log::info!(
            "Forest created: {} chapters, cap {}, {:?} terrain at {:?} quality",
            chapters.len(),
            config.max_followers.min(chapters.max_followers()),
            config.terrain.profile,
            config.quality
        );

        Ok(Self {
            config,
            roster: Roster::new(),
            chapters,
            terrain,
            heightfield,
            state: ForestState::new(),
            scheduler: Scheduler::new(),
            clock: FrameClock::new(),
            departing: Vec::new(),
            next_departure: 0,
            rng: Box::new(rng),
        })
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn followers(&self) -> &[Follower] {
        self.roster.as_slice()
    }

    pub fn follower_count(&self) -> usize {
        self.roster.len()
    }

    pub fn chapters(&self) -> &ChapterTable {
        &self.chapters
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    pub fn terrain_params(&self) -> &TerrainParams {
        self.terrain.params()
    }

    pub fn quality(&self) -> Quality {
        self.config.quality
    }

    pub fn season(&self) -> Season {
        self.config.season
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Upper bound for `set_follower_count`: the configured cap, limited by
    /// the last chapter's `max_count`
    pub fn max_followers(&self) -> usize {
        self.config.max_followers.min(self.chapters.max_followers())
    }

    /// Number of archetypes in the active roster
    pub fn archetype_count(&self) -> usize {
        Archetype::roster(self.config.quality).len()
    }

    // --- Follower mutations ---

    /// Add a follower joining today. Returns their index.
    ///
    /// The new tree grows in after a short glow burst.
    pub fn add_follower(&mut self, name: &str) -> Result<usize> {
        let index = self.roster.add(name, today())?;
        self.rebuild();
        self.schedule_growth(index);
        log::info!("Added follower {} ({} total)", index, self.roster.len());
        Ok(index)
    }

    /// Remove a follower; later followers shift down by one.
    pub fn remove_follower(&mut self, index: usize) -> Result<Follower> {
        let tree = self.state.tree_for_follower(index).cloned();
        let factor = self
            .scheduler
            .value(AnimationTarget::TreeScale(index))
            .unwrap_or(1.0);
        let follower = self.roster.remove(index)?;
        self.scheduler.follower_removed(index);
        self.rebuild();

        if let Some(tree) = tree {
            let key = self.next_departure;
            self.next_departure += 1;
            // Shrink from whatever size the tree had reached
            self.scheduler.schedule(
                AnimationTarget::Departing(key),
                Tween::new(factor, 0.0, SHRINK_DURATION, Easing::Power2In),
            );
            self.departing.push(DepartingTree { key, tree });
        }

        log::info!("Removed follower {} ({} remaining)", index, self.roster.len());
        Ok(follower)
    }

    /// Rename a follower. Trees are not rebuilt; the new name takes effect
    /// on the next rebuild.
    pub fn rename_follower(&mut self, index: usize, name: &str) -> Result<()> {
        self.roster.rename(index, name)?;
        log::debug!("Renamed follower {}", index);
        Ok(())
    }

    /// Resize the roster to `count`, clamped to `[0, max_followers()]`.
    /// Growing appends sample followers; shrinking drops from the end.
    /// Returns the resulting count.
    pub fn set_follower_count(&mut self, count: usize) -> usize {
        let count = count.min(self.max_followers());
        let current = self.roster.len();
        if count > current {
            self.roster.extend_with_samples(count - current, &mut *self.rng);
        } else {
            self.roster.truncate(count);
        }
        self.scheduler
            .retain(|a| a.target.follower_index().is_none_or(|i| i < count));
        self.rebuild();
        log::info!("Follower count set to {}", count);
        count
    }

    /// Replace the roster wholesale
    pub fn import_followers(&mut self, followers: Vec<Follower>) -> usize {
        self.roster = Roster::from_followers(followers);
        self.scheduler.clear();
        self.departing.clear();
        self.rebuild();
        log::info!("Imported {} followers", self.roster.len());
        self.roster.len()
    }

    /// Parse an export document and import its followers. On error the
    /// current roster is kept.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let followers = exchange::parse_import(json)?;
        Ok(self.import_followers(followers))
    }

    pub fn export_json(&self) -> Result<String> {
        exchange::export_json(self.roster.as_slice())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        exchange::save(path, self.roster.as_slice())?;
        log::info!("Saved {} followers to {}", self.roster.len(), path.display());
        Ok(())
    }

    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let followers = exchange::load(path)?;
        Ok(self.import_followers(followers))
    }

    // --- Terrain and appearance ---

    /// Switch terrain profile, regenerate the heightfield and rebuild
    pub fn set_terrain_profile(&mut self, profile: TerrainProfile) {
        self.config.terrain = self.config.terrain.clone().with_profile(profile);
        self.regenerate_terrain();
        self.rebuild();
        log::info!("Terrain profile set to {:?}", profile);
    }

    /// Switch quality: changes the archetype roster and mesh detail.
    /// Terrain is left as configured.
    pub fn set_quality(&mut self, quality: Quality) {
        self.config.quality = quality;
        self.rebuild();
        log::info!("Quality set to {:?}", quality);
    }

    /// Change season. Only mesh appearance depends on it.
    pub fn set_season(&mut self, season: Season) {
        self.config.season = season;
        log::info!("Season set to {:?}", season);
    }

    /// Rebuild every tree from the current roster
    pub fn regenerate_forest(&mut self) {
        self.rebuild();
    }

    fn regenerate_terrain(&mut self) {
        self.terrain = TerrainGenerator::with_noise(self.config.terrain.clone(), self.terrain.noise().clone());
        self.heightfield = self.terrain.generate();
    }

    fn rebuild(&mut self) {
        let archetype_count = self.archetype_count();
        self.state.rebuild(
            self.roster.as_slice(),
            &self.chapters,
            &self.heightfield,
            archetype_count,
            &mut *self.rng,
        );
    }

    // --- Queries ---

    pub fn trees(&self) -> &[TreeInstance] {
        self.state.trees()
    }

    pub fn tree_for_follower(&self, index: usize) -> Option<&TreeInstance> {
        self.state.tree_for_follower(index)
    }

    pub fn chapter_for(&self, count: usize) -> &Chapter {
        self.chapters.chapter_for(count)
    }

    pub fn current_chapter(&self) -> &Chapter {
        self.chapters.chapter_for(self.roster.len())
    }

    pub fn progress(&self) -> ChapterProgress {
        self.chapters.progress(self.roster.len())
    }

    /// Terrain height at world `(x, z)`; 0 outside the grid
    pub fn sample_terrain_height(&self, x: f32, z: f32) -> f32 {
        self.heightfield.sample_height(x, z)
    }

    pub fn stats(&self) -> ForestStats {
        ForestStats {
            follower_count: self.roster.len(),
            tree_count: self.state.tree_count(),
            current_chapter: self.current_chapter().id,
            per_chapter: self.state.chapter_stats().to_vec(),
        }
    }

    pub fn search(&self, term: &str) -> Vec<(usize, &Follower)> {
        self.roster.search(term)
    }

    pub fn sorted(&self, order: SortOrder) -> Vec<(usize, &Follower)> {
        self.roster.sorted(order)
    }

    /// Mesh descriptions for the active roster, season and quality
    pub fn meshes(&self) -> Vec<TreeMesh> {
        mesh::build_roster(MeshOptions {
            quality: self.config.quality,
            season: self.config.season,
        })
    }

    // --- Animation ---

    /// Advance the frame clock and animations by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let dt = self.clock.advance(dt);
        for finished in self.scheduler.tick(dt) {
            if let AnimationTarget::Departing(key) = finished.target {
                self.departing.retain(|d| d.key != key);
            }
        }
    }

    /// Rendered scale of a follower's tree, including any growth in progress
    pub fn animated_scale(&self, index: usize) -> Option<f32> {
        let tree = self.state.tree_for_follower(index)?;
        let factor = self
            .scheduler
            .value(AnimationTarget::TreeScale(index))
            .unwrap_or(1.0);
        Some(tree.scale * factor)
    }

    /// Glow burst `(radius multiplier, opacity)` at a follower's tree, while
    /// one is playing
    pub fn glow(&self, index: usize) -> Option<(f32, f32)> {
        let radius = self.scheduler.value(AnimationTarget::Glow(index))?;
        let opacity = self
            .scheduler
            .value(AnimationTarget::GlowOpacity(index))
            .unwrap_or(GLOW_OPACITY);
        Some((radius, opacity))
    }

    /// Removed trees still shrinking, with their current scale
    pub fn departing_trees(&self) -> impl Iterator<Item = (&TreeInstance, f32)> {
        self.departing.iter().map(|d| {
            let factor = self
                .scheduler
                .value(AnimationTarget::Departing(d.key))
                .unwrap_or(0.0);
            (&d.tree, d.tree.scale * factor)
        })
    }

    fn schedule_growth(&mut self, index: usize) {
        self.scheduler.schedule(
            AnimationTarget::Glow(index),
            Tween::new(0.0, GLOW_SCALE, GLOW_DURATION, Easing::Power2Out),
        );
        self.scheduler.schedule(
            AnimationTarget::TreeScale(index),
            Tween::new(0.0, 1.0, GROW_DURATION, Easing::GROW).after(GLOW_DURATION),
        );
        self.scheduler.schedule(
            AnimationTarget::GlowOpacity(index),
            Tween::new(GLOW_OPACITY, 0.0, GROW_DURATION, Easing::Power2Out).after(GLOW_DURATION),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, NameError};
    use glam::Vec2;
    use tempfile::TempDir;

    fn small_config() -> ForestConfig {
        ForestConfig {
            terrain: TerrainParams { resolution: 32, ..Default::default() },
            ..Default::default()
        }
    }

    fn core() -> ForestCore {
        ForestCore::new(small_config()).unwrap()
    }

    #[test]
    fn test_new_is_empty() {
        let core = core();
        assert_eq!(core.follower_count(), 0);
        assert!(core.trees().is_empty());
        assert_eq!(core.current_chapter().id, 1);
        assert_eq!(core.terrain_params().octaves, 6);
    }

    #[test]
    fn test_configured_octaves_kept() {
        let config = ForestConfig {
            terrain: TerrainParams { resolution: 32, octaves: 2, ..Default::default() },
            quality: Quality::Ultra,
            ..Default::default()
        };
        let core = ForestCore::new(config).unwrap();
        assert_eq!(core.terrain_params().octaves, 2);
        let expected = TerrainGenerator::new(core.terrain_params().clone()).generate();
        assert_eq!(core.heightfield(), &expected);
    }

    #[test]
    fn test_invalid_chapters_rejected() {
        let config = ForestConfig {
            chapters: vec![Chapter::new(1, 2, 10, Vec2::ZERO, 50.0)],
            ..small_config()
        };
        assert!(matches!(ForestCore::new(config), Err(Error::InvalidChapters(_))));
    }

    #[test]
    fn test_set_follower_count_two_chapters() {
        let config = ForestConfig {
            chapters: vec![
                Chapter::new(1, 1, 100, Vec2::ZERO, 120.0),
                Chapter::new(2, 101, 599, Vec2::new(0.0, -250.0), 140.0),
            ],
            max_followers: 599,
            ..small_config()
        };
        let mut core = ForestCore::new(config).unwrap();
        assert_eq!(core.set_follower_count(150), 150);

        let stats = core.stats();
        assert_eq!(stats.tree_count, 150);
        assert_eq!(stats.current_chapter, 2);
        assert_eq!(stats.per_chapter[0].owed, 100);
        assert_eq!(stats.per_chapter[1].owed, 50);
    }

    #[test]
    fn test_duplicate_chapter_ids_rejected() {
        let config = ForestConfig {
            chapters: vec![
                Chapter::new(1, 1, 100, Vec2::ZERO, 120.0),
                Chapter::new(1, 101, 599, Vec2::new(0.0, -250.0), 5.0),
            ],
            ..small_config()
        };
        assert!(matches!(ForestCore::new(config), Err(Error::InvalidChapters(_))));
    }

    #[test]
    fn test_count_clamped_to_chapter_cap() {
        let config = ForestConfig {
            chapters: vec![
                Chapter::new(1, 1, 100, Vec2::ZERO, 120.0),
                Chapter::new(2, 101, 599, Vec2::new(0.0, -250.0), 140.0),
            ],
            ..small_config()
        };
        assert_eq!(config.max_followers, 3000);
        let mut core = ForestCore::new(config).unwrap();
        assert_eq!(core.max_followers(), 599);
        assert_eq!(core.set_follower_count(3000), 599);
        assert_eq!(core.follower_count(), 599);
        assert_eq!(core.trees().len(), 599);
    }

    #[test]
    fn test_count_clamped_to_configured_cap() {
        let config = ForestConfig { max_followers: 250, ..small_config() };
        let mut core = ForestCore::new(config).unwrap();
        assert_eq!(core.max_followers(), 250);
        assert_eq!(core.set_follower_count(1000), 250);
    }

    #[test]
    fn test_set_follower_count_clamps() {
        let mut core = core();
        assert_eq!(core.set_follower_count(5000), 3000);
        assert_eq!(core.follower_count(), 3000);
        assert_eq!(core.trees().len(), core.stats().per_chapter.iter().map(|c| c.placed).sum::<usize>());
        assert_eq!(core.set_follower_count(10), 10);
        assert_eq!(core.trees().len(), 10);
        assert_eq!(core.set_follower_count(0), 0);
        assert!(core.trees().is_empty());
    }

    #[test]
    fn test_sample_names_unique() {
        let mut core = core();
        core.set_follower_count(1200);
        let mut names: Vec<String> = core.followers().iter().map(|f| f.name.to_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 1200);
    }

    #[test]
    fn test_add_rejects_short_name() {
        let mut core = core();
        let err = core.add_follower("Al").unwrap_err();
        assert!(matches!(err, Error::InvalidName(NameError::TooShort { min: 3 })));
        assert_eq!(core.follower_count(), 0);
        assert!(core.trees().is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_case_insensitive() {
        let mut core = core();
        assert_eq!(core.add_follower("Alice").unwrap(), 0);
        let err = core.add_follower("alice").unwrap_err();
        assert!(matches!(err, Error::InvalidName(NameError::Duplicate)));
        assert_eq!(core.follower_count(), 1);
        assert_eq!(core.trees().len(), 1);
    }

    #[test]
    fn test_add_places_tree() {
        let mut core = core();
        let index = core.add_follower("  Maple Fan  ").unwrap();
        assert_eq!(core.followers()[index].name, "Maple Fan");
        let tree = core.tree_for_follower(index).unwrap();
        assert_eq!(tree.chapter_id, 1);
        assert_eq!(tree.position.y, core.sample_terrain_height(tree.position.x, tree.position.z));
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut core = core();
        core.add_follower("Alice").unwrap();
        core.add_follower("Bob the Builder").unwrap();
        core.add_follower("Carol").unwrap();

        let removed = core.remove_follower(1).unwrap();
        assert_eq!(removed.name, "Bob the Builder");
        assert_eq!(core.follower_count(), 2);
        assert_eq!(core.followers()[1].name, "Carol");
        assert!(core.tree_for_follower(1).is_some());
        assert!(core.tree_for_follower(2).is_none());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut core = core();
        core.add_follower("Alice").unwrap();
        assert!(matches!(
            core.remove_follower(4),
            Err(Error::FollowerIndex { index: 4, len: 1 })
        ));
        assert_eq!(core.follower_count(), 1);
    }

    #[test]
    fn test_rename() {
        let mut core = core();
        core.add_follower("Alice").unwrap();
        core.add_follower("Bobby").unwrap();
        assert!(core.rename_follower(0, "BOBBY").is_err());
        core.rename_follower(0, "alice").unwrap();
        assert_eq!(core.followers()[0].name, "alice");
    }

    #[test]
    fn test_import_replaces_roster() {
        let mut core = core();
        core.set_follower_count(20);
        let json = r#"{"followers":[{"name":"Ann Lee","date":"2024-01-01"},{"name":"Bo Kim","date":"2024-02-01"}]}"#;
        assert_eq!(core.import_json(json).unwrap(), 2);
        assert_eq!(core.followers()[1], Follower::new("Bo Kim", "2024-02-01"));
        assert_eq!(core.trees().len(), 2);
    }

    #[test]
    fn test_bad_import_keeps_state() {
        let mut core = core();
        core.set_follower_count(20);
        let before = core.followers().to_vec();
        assert!(matches!(core.import_json(r#"{"fans":[]}"#), Err(Error::Import(_))));
        assert!(core.import_json("not json").is_err());
        assert_eq!(core.followers(), before.as_slice());
        assert_eq!(core.trees().len(), 20);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forest.json");

        let mut a = core();
        a.set_follower_count(42);
        a.save(&path).unwrap();

        let mut b = core();
        assert_eq!(b.load(&path).unwrap(), 42);
        assert_eq!(a.followers(), b.followers());
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut a = core();
        a.set_follower_count(30);
        let json = a.export_json().unwrap();
        let mut b = core();
        b.import_json(&json).unwrap();
        assert_eq!(a.followers(), b.followers());
    }

    #[test]
    fn test_terrain_profile_regenerates() {
        let mut core = core();
        core.set_follower_count(50);
        let before = core.heightfield().clone();
        core.set_terrain_profile(TerrainProfile::Hills);
        assert_eq!(core.terrain_params().height_scale, 30.0);
        assert_ne!(core.heightfield(), &before);
        for tree in core.trees() {
            assert_eq!(tree.position.y, core.sample_terrain_height(tree.position.x, tree.position.z));
        }
    }

    #[test]
    fn test_quality_changes_roster() {
        let mut core = core();
        core.set_follower_count(200);
        let heights = core.heightfield().clone();
        core.set_quality(Quality::Ultra);
        assert_eq!(core.archetype_count(), 8);
        assert_eq!(core.terrain_params().octaves, 6);
        assert_eq!(core.heightfield(), &heights);
        assert!(core.trees().iter().all(|t| t.archetype < 8));
        assert_eq!(core.meshes().len(), 8);
    }

    #[test]
    fn test_season_keeps_placement() {
        let mut core = core();
        core.set_follower_count(80);
        let before = core.trees().to_vec();
        core.set_season(Season::Winter);
        assert_eq!(core.trees(), before.as_slice());
        assert_eq!(core.season(), Season::Winter);
    }

    #[test]
    fn test_regenerate_keeps_assignment() {
        let mut core = core();
        core.set_follower_count(300);
        let before: Vec<_> = core.trees().iter().map(|t| (t.archetype, t.scale, t.follower_index)).collect();
        core.regenerate_forest();
        let after: Vec<_> = core.trees().iter().map(|t| (t.archetype, t.scale, t.follower_index)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sample_out_of_bounds() {
        let core = core();
        assert_eq!(core.sample_terrain_height(1250.0, 0.0), 0.0);
        assert_eq!(core.sample_terrain_height(-5000.0, 0.0), 0.0);
    }

    #[test]
    fn test_growth_animation() {
        let mut core = core();
        let index = core.add_follower("Sprout").unwrap();
        let target = core.tree_for_follower(index).unwrap().scale;

        assert_eq!(core.animated_scale(index), Some(0.0));
        assert_eq!(core.glow(index), Some((0.0, GLOW_OPACITY)));

        core.tick(0.25);
        assert_eq!(core.animated_scale(index), Some(0.0));
        let (radius, _) = core.glow(index).unwrap();
        assert!(radius > 0.0 && radius < GLOW_SCALE);

        core.tick(0.75);
        let mid = core.animated_scale(index).unwrap();
        assert!(mid > 0.0);

        core.tick(1.0);
        assert_eq!(core.animated_scale(index), Some(target));
        assert_eq!(core.glow(index), None);
        assert!(core.scheduler().is_empty());
    }

    #[test]
    fn test_remove_leaves_shrinking_tree() {
        let mut core = core();
        core.add_follower("Alice").unwrap();
        core.tick(2.0);
        core.remove_follower(0).unwrap();

        let departing: Vec<(f32, f32)> =
            core.departing_trees().map(|(tree, scale)| (tree.scale, scale)).collect();
        assert_eq!(departing.len(), 1);
        let (full, start) = departing[0];
        assert_eq!(start, full);

        core.tick(0.25);
        let (_, scale) = core.departing_trees().next().unwrap();
        assert!(scale > 0.0 && scale < full);

        core.tick(0.3);
        assert_eq!(core.departing_trees().count(), 0);
    }

    #[test]
    fn test_remove_mid_growth_shrinks_from_current_size() {
        let mut core = core();
        core.add_follower("Alice").unwrap();
        core.tick(0.25);
        // Still waiting behind the glow burst
        assert_eq!(core.animated_scale(0), Some(0.0));
        core.remove_follower(0).unwrap();
        let (_, scale) = core.departing_trees().next().unwrap();
        assert_eq!(scale, 0.0);

        let mut core = ForestCore::new(small_config()).unwrap();
        core.add_follower("Alice").unwrap();
        core.tick(0.6);
        let partial = core.animated_scale(0).unwrap();
        core.remove_follower(0).unwrap();
        let (tree, scale) = core.departing_trees().next().unwrap();
        assert!((scale - partial).abs() < 1e-6);
        assert!(scale < tree.scale);
    }

    #[test]
    fn test_remove_retargets_growth() {
        let mut core = core();
        core.add_follower("Alice").unwrap();
        core.add_follower("Bobby").unwrap();
        core.remove_follower(0).unwrap();
        // Bobby's growth now belongs to index 0
        assert_eq!(core.animated_scale(0), Some(0.0));
        core.tick(2.0);
        assert_eq!(core.animated_scale(0), Some(core.trees()[0].scale));
    }

    #[test]
    fn test_tick_drives_clock() {
        let mut core = core();
        core.tick(0.5);
        core.tick(0.5);
        assert_eq!(core.clock().frame_count(), 2);
        assert!((core.clock().elapsed() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_noise_differs() {
        let a = core();
        let b = ForestCore::new(ForestConfig { noise_seed: Some(9), ..small_config() }).unwrap();
        assert_ne!(a.heightfield(), b.heightfield());
    }

    #[test]
    fn test_search_and_sort() {
        let mut core = core();
        core.import_followers(vec![
            Follower::new("Zed Young", "2024-01-05"),
            Follower::new("Amy Zed", "2024-03-01"),
            Follower::new("Bob Ray", "2023-12-31"),
        ]);
        let found: Vec<usize> = core.search("zed").iter().map(|(i, _)| *i).collect();
        assert_eq!(found, vec![0, 1]);
        let newest: Vec<usize> = core.sorted(SortOrder::Newest).iter().map(|(i, _)| *i).collect();
        assert_eq!(newest, vec![1, 0, 2]);
    }

    #[test]
    fn test_custom_rng() {
        let mut a = ForestCore::with_rng(small_config(), ChaCha8Rng::seed_from_u64(5)).unwrap();
        let mut b = ForestCore::with_rng(small_config(), ChaCha8Rng::seed_from_u64(5)).unwrap();
        a.set_follower_count(700);
        b.set_follower_count(700);
        assert_eq!(a.followers(), b.followers());
        assert_eq!(a.trees(), b.trees());
    }
}
