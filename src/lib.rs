//! Grove - a procedural forest where every follower is a tree

pub mod core;
pub mod terrain;
pub mod chapter;
pub mod placement;
pub mod forest;
pub mod animation;
pub mod generation;
