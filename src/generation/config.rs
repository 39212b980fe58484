//! Forest configuration

use serde::{Deserialize, Serialize};

use crate::chapter::{Chapter, ChapterTable};
use crate::core::Result;
use crate::forest::archetype::{Quality, Season};
use crate::terrain::generator::{TerrainParams, TerrainProfile};

/// Everything needed to stand up a [`crate::forest::ForestCore`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Seed for placement jitter, tree rotation and sample followers.
    pub seed: u64,
    /// Seed for the noise permutation. `None` uses the classic table.
    pub noise_seed: Option<u64>,
    /// Terrain grid and shaping
    pub terrain: TerrainParams,
    pub chapters: Vec<Chapter>,
    pub quality: Quality,
    pub season: Season,
    /// Upper bound for `set_follower_count`.
    pub max_followers: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        let chapters = ChapterTable::reference();
        Self {
            seed: 12345,
            noise_seed: None,
            terrain: TerrainParams::default(),
            max_followers: chapters.max_followers(),
            chapters: chapters.chapters().to_vec(),
            quality: Quality::default(),
            season: Season::default(),
        }
    }
}

impl ForestConfig {
    /// Default configuration with a different terrain profile
    pub fn with_profile(profile: TerrainProfile) -> Self {
        Self {
            terrain: TerrainParams::default().with_profile(profile),
            ..Default::default()
        }
    }

    /// Validated chapter table
    pub fn chapter_table(&self) -> Result<ChapterTable> {
        ChapterTable::new(self.chapters.clone())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
