//! Jittered grid layout with disk-sampling fallback

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::chapter::Chapter;

/// Grid cells per requested point; absorbs corner cells that fall off the disk
pub const GRID_OVERSAMPLE: f32 = 1.5;

/// Jitter span as a fraction of cell size (±35%)
pub const GRID_JITTER: f32 = 0.7;

/// Fallback points are drawn inside this fraction of the chapter radius
pub const FALLBACK_FILL: f32 = 0.9;

/// Fallback candidates tried per missing point before spacing is waived
const FALLBACK_ATTEMPTS_PER_POINT: usize = 64;

/// Fallback candidates closer than this fraction of a cell to an accepted
/// point are rejected while attempts remain
const FALLBACK_SPACING: f32 = 0.25;

/// Lay out exactly `count` points inside the chapter disk.
///
/// Scans a `ceil(sqrt(count * 1.5))` square grid row by row, jittering each
/// cell center and keeping points within the chapter radius. If the scan runs
/// out of cells, the remainder is drawn uniformly in angle and radius inside
/// `0.9 * radius`, preferring candidates that keep a minimum spacing. The
/// spacing preference is dropped after `64 * missing` attempts.
pub fn layout_grid<R: Rng + ?Sized>(count: usize, chapter: &Chapter, rng: &mut R) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }

    let radius = chapter.radius;
    let center = chapter.center;
    let grid_size = ((count as f32 * GRID_OVERSAMPLE).sqrt().ceil() as usize).max(1);
    let cell_size = radius * 2.0 / grid_size as f32;
    let start = center - Vec2::splat(radius) + Vec2::splat(cell_size / 2.0);

    let mut points = Vec::with_capacity(count);

    'rows: for row in 0..grid_size {
        for col in 0..grid_size {
            if points.len() >= count {
                break 'rows;
            }
            let base = start + Vec2::new(col as f32, row as f32) * cell_size;
            let jitter = Vec2::new(rng.r#gen::<f32>() - 0.5, rng.r#gen::<f32>() - 0.5)
                * cell_size
                * GRID_JITTER;
            let p = base + jitter;
            if p.distance(center) <= radius {
                points.push(p);
            }
        }
    }

    let missing = count - points.len();
    if missing > 0 {
        log::debug!(
            "Chapter {}: grid produced {}/{} points, sampling {} in fallback",
            chapter.id,
            points.len(),
            count,
            missing
        );
        fill_disk(&mut points, count, chapter, cell_size * FALLBACK_SPACING, rng);
    }

    points
}

fn fill_disk<R: Rng + ?Sized>(
    points: &mut Vec<Vec2>,
    count: usize,
    chapter: &Chapter,
    min_spacing: f32,
    rng: &mut R,
) {
    let budget = (count - points.len()) * FALLBACK_ATTEMPTS_PER_POINT;
    let mut attempts = 0;
    let mut warned = false;

    while points.len() < count {
        let angle = rng.r#gen::<f32>() * TAU;
        let dist = rng.r#gen::<f32>() * chapter.radius * FALLBACK_FILL;
        let p = chapter.center + Vec2::new(angle.cos(), angle.sin()) * dist;

        attempts += 1;
        let spaced = points.iter().all(|q| q.distance(p) >= min_spacing);
        if spaced || attempts > budget {
            if !spaced && !warned {
                log::warn!(
                    "Chapter {}: fallback exhausted {} attempts, placing without spacing",
                    chapter.id,
                    budget
                );
                warned = true;
            }
            points.push(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn chapter(radius: f32) -> Chapter {
        Chapter::new(2, 101, 599, Vec2::new(0.0, -250.0), radius)
    }

    #[test]
    fn test_exact_count_inside_disk() {
        let c = chapter(140.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for count in [1, 2, 7, 50, 499] {
            let points = layout_grid(count, &c, &mut rng);
            assert_eq!(points.len(), count);
            for p in &points {
                assert!(p.distance(c.center) <= c.radius + 1e-3);
            }
        }
    }

    #[test]
    fn test_zero_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(layout_grid(0, &chapter(140.0), &mut rng).is_empty());
    }

    #[test]
    fn test_reproducible_with_seed() {
        let c = chapter(140.0);
        let a = layout_grid(200, &c, &mut ChaCha8Rng::seed_from_u64(42));
        let b = layout_grid(200, &c, &mut ChaCha8Rng::seed_from_u64(42));
        let other = layout_grid(200, &c, &mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, other);
    }

    #[test]
    fn test_points_stay_near_cells() {
        // 10 points -> 4x4 grid of 50m cells; twelve cells lie fully inside
        // the disk even after jitter, so no fallback points are involved.
        let c = chapter(100.0);
        let cell = 50.0;
        let points = layout_grid(10, &c, &mut ChaCha8Rng::seed_from_u64(5));
        let origin = c.center - Vec2::splat(100.0);
        for p in points {
            let local = (p - origin) / cell;
            let offset = local - local.floor() - Vec2::splat(0.5);
            assert!(offset.x.abs() <= 0.351 && offset.y.abs() <= 0.351, "offset {:?}", offset);
        }
    }

    #[test]
    fn test_single_point() {
        // Two-by-two grid; every cell center lies inside the disk
        let c = chapter(10.0);
        let points = layout_grid(1, &c, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_fallback_fills_remainder() {
        let c = chapter(50.0);
        let mut points = vec![c.center];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        fill_disk(&mut points, 30, &c, 2.0, &mut rng);
        assert_eq!(points.len(), 30);
        for p in &points {
            assert!(p.distance(c.center) <= 50.0 * FALLBACK_FILL + 1e-3);
        }
    }

    #[test]
    fn test_fallback_terminates_when_spacing_impossible() {
        // Spacing larger than the disk: every candidate after the first
        // fails the check, so the attempt budget must end the loop.
        let c = chapter(1.0);
        let mut points = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        fill_disk(&mut points, 5, &c, 100.0, &mut rng);
        assert_eq!(points.len(), 5);
    }
}
