//! Procedural terrain generation

pub mod noise;
pub use noise::Perlin2;

pub mod generator;
pub use generator::{Heightfield, TerrainGenerator, TerrainParams, TerrainProfile};
