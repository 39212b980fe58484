//! Archetype to mesh description
//!
//! Produces a flat list of primitives in tree-local space (base at origin,
//! +Y up). Renderers instance these per tree with the tree's scale, rotation
//! and position; nothing here depends on placement.

use std::f32::consts::TAU;

use glam::Vec3;

use super::archetype::{
    bark_color, Archetype, ArchetypeParams, Foliage, Quality, Rgb, Season, Trunk,
};

/// Samples along curved trunks and branches
const CURVE_SAMPLES: usize = 10;

/// Geometric primitive
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32, segments: u32 },
    Cone { radius: f32, height: f32, segments: u32 },
    Sphere { radius: f32, segments: u32 },
    /// Tube swept along a polyline
    Tube { points: Vec<Vec3>, radius: f32, segments: u32 },
}

/// One positioned primitive
#[derive(Clone, Debug, PartialEq)]
pub struct MeshPart {
    pub primitive: Primitive,
    /// Offset of the primitive's center from the tree base
    pub translation: Vec3,
    /// Rotation about Y, then tilt about Z (radians)
    pub heading: f32,
    pub tilt: f32,
    pub color: Rgb,
}

impl MeshPart {
    fn new(primitive: Primitive, translation: Vec3, color: Rgb) -> Self {
        Self { primitive, translation, heading: 0.0, tilt: 0.0, color }
    }

    fn tilted(mut self, heading: f32, tilt: f32) -> Self {
        self.heading = heading;
        self.tilt = tilt;
        self
    }
}

/// Renderable description of one archetype
#[derive(Clone, Debug, PartialEq)]
pub struct TreeMesh {
    pub archetype: Archetype,
    pub parts: Vec<MeshPart>,
}

impl TreeMesh {
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Highest point reached by any part's center
    pub fn top(&self) -> f32 {
        self.parts.iter().map(|p| p.translation.y).fold(0.0, f32::max)
    }
}

/// Options that shape geometry without affecting placement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshOptions {
    pub quality: Quality,
    pub season: Season,
}

/// Build the mesh description for an archetype
pub fn build_mesh(archetype: Archetype, options: MeshOptions) -> TreeMesh {
    build_from_params(&archetype.params(options.quality), options)
}

/// Build meshes for every archetype in the quality's roster, in id order
pub fn build_roster(options: MeshOptions) -> Vec<TreeMesh> {
    Archetype::roster(options.quality)
        .iter()
        .map(|a| build_mesh(*a, options))
        .collect()
}

/// Pure function from parameters to geometry
pub fn build_from_params(params: &ArchetypeParams, options: MeshOptions) -> TreeMesh {
    let segments = options.quality.radial_segments();
    let bark = bark_color(options.season);
    let leaf = params.leaf_kind.color(options.season);
    let mut parts = Vec::new();

    match &params.trunk {
        Trunk::Straight { radius_top, radius_bottom, height } => {
            parts.push(MeshPart::new(
                Primitive::Cylinder {
                    radius_top: *radius_top,
                    radius_bottom: *radius_bottom,
                    height: *height,
                    segments: if params.bark_noise { segments + 2 } else { segments },
                },
                Vec3::new(0.0, height / 2.0, 0.0),
                bark,
            ));
        }
        Trunk::Curved { radius, control } => {
            parts.push(MeshPart::new(
                Primitive::Tube {
                    points: sample_cubic(control, CURVE_SAMPLES),
                    radius: *radius,
                    segments,
                },
                Vec3::ZERO,
                bark,
            ));
        }
    }

    let top = params.trunk.height();

    match &params.foliage {
        Foliage::Cones { layers, base_y, spacing, base_radius, shrink, cone_height } => {
            if let Some(color) = leaf {
                for i in 0..*layers {
                    let radius = base_radius - i as f32 * shrink;
                    if radius <= 0.0 {
                        break;
                    }
                    parts.push(MeshPart::new(
                        Primitive::Cone { radius, height: *cone_height, segments: segments * 2 },
                        Vec3::new(0.0, base_y + i as f32 * spacing, 0.0),
                        color,
                    ));
                }
            }
        }
        Foliage::Crown { center_y, radius, limbs, ring } => {
            for limb in limbs {
                parts.push(
                    MeshPart::new(
                        Primitive::Cylinder {
                            radius_top: limb.thickness * 0.7,
                            radius_bottom: limb.thickness,
                            height: limb.length,
                            segments: 5,
                        },
                        Vec3::new(0.0, limb.start_y, 0.0),
                        bark,
                    )
                    .tilted(0.0, limb.angle),
                );
                if let Some(color) = leaf {
                    parts.push(MeshPart::new(
                        Primitive::Sphere { radius: limb.length * 0.4, segments: 6 },
                        limb.tip(),
                        color,
                    ));
                }
            }
            if let Some(color) = leaf {
                parts.push(MeshPart::new(
                    Primitive::Sphere { radius: *radius, segments: segments + 2 },
                    Vec3::new(0.0, *center_y, 0.0),
                    color,
                ));
                if let Some(ring) = ring {
                    for i in 0..ring.count {
                        let angle = i as f32 / ring.count as f32 * TAU;
                        parts.push(MeshPart::new(
                            Primitive::Sphere { radius: ring.cluster_radius, segments: 6 },
                            Vec3::new(
                                angle.cos() * ring.radius,
                                center_y - 0.5,
                                angle.sin() * ring.radius,
                            ),
                            color,
                        ));
                    }
                }
            }
        }
        Foliage::Fronds { count, reach, leaflets } => {
            let color = leaf.unwrap_or(bark);
            for i in 0..*count {
                let angle = i as f32 / *count as f32 * TAU;
                let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
                let control = [
                    Vec3::ZERO,
                    dir * (reach * 0.5) + Vec3::Y * 0.5,
                    dir * *reach - Vec3::Y * 0.5,
                ];
                let stem = sample_quadratic(&control, CURVE_SAMPLES);
                let base = Vec3::new(0.0, top, 0.0);
                for j in 0..*leaflets {
                    let t = j as f32 / leaflets.saturating_sub(1).max(1) as f32;
                    let at = quadratic(&control, t);
                    parts.push(
                        MeshPart::new(
                            Primitive::Sphere { radius: 0.2 + t * 0.3, segments: 4 },
                            base + at,
                            color,
                        )
                        .tilted(angle, 0.0),
                    );
                }
                parts.push(MeshPart::new(
                    Primitive::Tube { points: stem, radius: 0.1, segments },
                    base,
                    color,
                ));
            }
        }
        Foliage::Drooping { count, top_y, spread, drop } => {
            // Bare willows keep half their strands
            let (count, color) = match leaf {
                Some(color) => (*count, color),
                None => (count / 2, bark),
            };
            for i in 0..count {
                let angle = i as f32 / count as f32 * TAU;
                let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
                let control = [
                    Vec3::ZERO,
                    dir * (spread * 0.4) - Vec3::Y * (drop / 7.0),
                    dir * (spread * 0.8) - Vec3::Y * (drop * 4.0 / 7.0),
                    dir * *spread - Vec3::Y * *drop,
                ];
                parts.push(MeshPart::new(
                    Primitive::Tube {
                        points: sample_cubic(&control, CURVE_SAMPLES),
                        radius: 0.05,
                        segments: 4,
                    },
                    Vec3::new(0.0, *top_y, 0.0),
                    color,
                ));
            }
        }
        Foliage::Blossoms { branches, crown_y, crown_radius, flowers } => {
            for i in 0..*branches {
                let heading = i as f32 / *branches as f32 * TAU;
                parts.push(
                    MeshPart::new(
                        Primitive::Cylinder {
                            radius_top: 0.09,
                            radius_bottom: 0.15,
                            height: 1.8,
                            segments: 5,
                        },
                        Vec3::new(0.0, top * 0.7, 0.0),
                        bark,
                    )
                    .tilted(heading, std::f32::consts::FRAC_PI_4),
                );
            }
            if let Some(color) = leaf {
                parts.push(MeshPart::new(
                    Primitive::Sphere { radius: *crown_radius, segments: segments + 2 },
                    Vec3::new(0.0, *crown_y, 0.0),
                    color,
                ));
                // Golden-angle scatter over the crown surface
                for i in 0..*flowers {
                    let y = 1.0 - 2.0 * (i as f32 + 0.5) / *flowers as f32;
                    let r = (1.0 - y * y).sqrt();
                    let theta = i as f32 * TAU / crate::placement::GOLDEN_RATIO;
                    let offset = Vec3::new(theta.cos() * r, y.abs(), theta.sin() * r) * *crown_radius;
                    parts.push(MeshPart::new(
                        Primitive::Sphere { radius: 0.2, segments: 4 },
                        Vec3::new(0.0, *crown_y, 0.0) + offset,
                        Rgb(0xf48fb1),
                    ));
                }
            }
        }
    }

    TreeMesh { archetype: params.archetype, parts }
}

fn cubic(c: &[Vec3; 4], t: f32) -> Vec3 {
    let u = 1.0 - t;
    c[0] * (u * u * u) + c[1] * (3.0 * u * u * t) + c[2] * (3.0 * u * t * t) + c[3] * (t * t * t)
}

fn quadratic(c: &[Vec3; 3], t: f32) -> Vec3 {
    let u = 1.0 - t;
    c[0] * (u * u) + c[1] * (2.0 * u * t) + c[2] * (t * t)
}

fn sample_cubic(c: &[Vec3; 4], samples: usize) -> Vec<Vec3> {
    (0..=samples).map(|i| cubic(c, i as f32 / samples as f32)).collect()
}

fn sample_quadratic(c: &[Vec3; 3], samples: usize) -> Vec<Vec3> {
    (0..=samples).map(|i| quadratic(c, i as f32 / samples as f32)).collect()
}
