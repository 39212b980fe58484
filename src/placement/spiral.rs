//! Golden-angle spiral layout

use std::f32::consts::TAU;

use glam::Vec2;

use crate::chapter::Chapter;

pub const GOLDEN_RATIO: f32 = 1.618_033_988_749_895;

/// Radial spacing factor: ring radius is `SPIRAL_SPACING * sqrt(i)`
pub const SPIRAL_SPACING: f32 = 2.0;

/// Fraction of the chapter radius the spiral may reach
pub const SPIRAL_FILL: f32 = 0.85;

/// Lay out up to `count` points on a golden-angle spiral around the chapter
/// center. Stops early once the spiral leaves `SPIRAL_FILL * radius`, so the
/// result may be shorter than `count`.
pub fn layout_spiral(count: usize, chapter: &Chapter) -> Vec<Vec2> {
    let max_radius = chapter.radius * SPIRAL_FILL;
    let mut points = Vec::with_capacity(count);

    for i in 0..count {
        let angle = i as f32 * TAU / GOLDEN_RATIO;
        let radius = SPIRAL_SPACING * (i as f32).sqrt();
        if radius > max_radius {
            break;
        }
        points.push(chapter.center + Vec2::new(angle.cos(), angle.sin()) * radius);
    }

    points
}
