//! Frame-driven tween animation

pub mod easing;
pub mod scheduler;

pub use easing::Easing;
pub use scheduler::{Animation, AnimationId, AnimationTarget, Scheduler, Tween};
