//! Heightfield synthesis from layered gradient noise

use serde::{Deserialize, Serialize};

use super::noise::Perlin2;

/// Post-shaping applied to accumulated fBm elevation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainProfile {
    #[default]
    Normal,
    /// Sign-preserving power 1.5 to exaggerate peaks
    Hills,
    /// Compress low elevations to flatten valley floors
    Valleys,
}

impl TerrainProfile {
    pub const ALL: [TerrainProfile; 3] = [Self::Normal, Self::Hills, Self::Valleys];

    /// Vertical scale each profile is authored for
    pub fn default_height_scale(self) -> f32 {
        match self {
            Self::Normal => 15.0,
            Self::Hills => 30.0,
            Self::Valleys => 25.0,
        }
    }

    /// Shape a raw elevation into world height
    pub fn shape(self, elevation: f64, height_scale: f64) -> f64 {
        let shaped = match self {
            Self::Normal => elevation,
            Self::Hills => elevation.signum() * elevation.abs().powf(1.5),
            Self::Valleys => {
                if elevation.abs() < 0.2 {
                    elevation * 0.5
                } else {
                    elevation
                }
            }
        };
        shaped * height_scale
    }
}

/// Parameters controlling heightfield synthesis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    pub resolution: usize, // Grid cells per side
    pub world_size: f32,   // World extent covered by the grid
    pub height_scale: f32, // Vertical scale
    pub octaves: u32,      // fBm octaves (detail levels)
    pub profile: TerrainProfile,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            resolution: 128,
            world_size: 2500.0,
            height_scale: TerrainProfile::Normal.default_height_scale(),
            octaves: 6,
            profile: TerrainProfile::Normal,
        }
    }
}

impl TerrainParams {
    /// Switch profile and adopt its authored height scale
    pub fn with_profile(mut self, profile: TerrainProfile) -> Self {
        self.profile = profile;
        self.height_scale = profile.default_height_scale();
        self
    }
}

/// Immutable square elevation grid, indexed `i * resolution + j` with `i`
/// along world X and `j` along world Z.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    resolution: usize,
    world_size: f32,
    heights: Vec<f32>,
}

impl Heightfield {
    /// Build a grid from precomputed heights. Returns `None` when the
    /// length does not match `resolution * resolution`.
    pub fn from_heights(resolution: usize, world_size: f32, heights: Vec<f32>) -> Option<Self> {
        if heights.len() != resolution * resolution {
            return None;
        }
        Some(Self { resolution, world_size, heights })
    }

    /// A flat field of zeros
    pub fn flat(resolution: usize, world_size: f32) -> Self {
        Self {
            resolution,
            world_size,
            heights: vec![0.0; resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn world_size(&self) -> f32 {
        self.world_size
    }

    /// Raw grid access; `None` outside the grid
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.resolution || j >= self.resolution {
            return None;
        }
        self.heights.get(i * self.resolution + j).copied()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height at world position (x, z); 0 outside the covered square.
    ///
    /// The normalized coordinate must be in `[0, 1)`, so the far edge at
    /// `+world_size / 2` is excluded.
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        if self.resolution == 0 || self.world_size <= 0.0 {
            return 0.0;
        }

        let half = self.world_size / 2.0;
        let norm_x = (x + half) / self.world_size;
        let norm_z = (z + half) / self.world_size;

        if !(0.0..1.0).contains(&norm_x) || !(0.0..1.0).contains(&norm_z) {
            return 0.0;
        }

        let last = (self.resolution - 1) as f32;
        let i = (norm_x * last).floor() as usize;
        let j = (norm_z * last).floor() as usize;
        self.get(i, j).unwrap_or(0.0)
    }

    /// (min, max) over the whole grid
    pub fn height_bounds(&self) -> (f32, f32) {
        if self.heights.is_empty() {
            return (0.0, 0.0);
        }
        let min_h = self.heights.iter().copied().fold(f32::INFINITY, f32::min);
        let max_h = self.heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        (min_h, max_h)
    }
}

/// Procedural terrain generator using fractal Brownian motion (fBm)
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    params: TerrainParams,
    noise: Perlin2,
}

impl TerrainGenerator {
    /// Generator over the reference permutation
    pub fn new(params: TerrainParams) -> Self {
        Self::with_noise(params, Perlin2::classic())
    }

    pub fn with_noise(params: TerrainParams, noise: Perlin2) -> Self {
        Self { params, noise }
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    pub fn noise(&self) -> &Perlin2 {
        &self.noise
    }

    /// Raw fBm elevation at normalized grid coordinates
    pub fn elevation(&self, nx: f64, ny: f64) -> f64 {
        let mut elevation = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        for _ in 0..self.params.octaves {
            elevation += self.noise.sample(nx * frequency, ny * frequency) * amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        elevation
    }

    /// Synthesize a full heightfield
    pub fn generate(&self) -> Heightfield {
        let res = self.params.resolution;
        let scale = self.params.height_scale as f64;
        let mut heights = Vec::with_capacity(res * res);

        for i in 0..res {
            for j in 0..res {
                let nx = i as f64 / res as f64;
                let ny = j as f64 / res as f64;
                let elevation = self.elevation(nx, ny);
                heights.push(self.params.profile.shape(elevation, scale) as f32);
            }
        }

        log::debug!(
            "Synthesized {}x{} heightfield ({:?}, {} octaves)",
            res, res, self.params.profile, self.params.octaves
        );

        Heightfield {
            resolution: res,
            world_size: self.params.world_size,
            heights,
        }
    }
}

/// One-shot synthesis over the reference noise
pub fn generate(
    resolution: usize,
    world_size: f32,
    height_scale: f32,
    octaves: u32,
    profile: TerrainProfile,
) -> Heightfield {
    TerrainGenerator::new(TerrainParams {
        resolution,
        world_size,
        height_scale,
        octaves,
        profile,
    })
    .generate()
}
