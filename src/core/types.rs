//! Core type aliases and re-exports

pub use glam::{Vec2, Vec3};

/// Standard Result type for the forest core
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
