//! Tree archetypes and their parametric descriptions
//!
//! Placement only needs an archetype's integer id. The parameters here are
//! consumed by [`super::mesh::build_mesh`] to describe renderable geometry.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Render quality preset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Medium,
    High,
    Ultra,
}

impl Quality {
    /// Radial segments for cylinders, cones and spheres
    pub fn radial_segments(self) -> u32 {
        match self {
            Quality::Medium => 8,
            Quality::High => 12,
            Quality::Ultra => 16,
        }
    }
}

/// Season, which only changes foliage appearance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    #[default]
    Summer,
    Autumn,
    Winter,
}

/// Packed 0xRRGGBB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn channels(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }
}

/// Leaf family, used to pick seasonal colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Needle,
    Broadleaf,
    Blossom,
    Frond,
}

impl LeafKind {
    /// Seasonal foliage color; `None` when the tree is bare
    pub fn color(self, season: Season) -> Option<Rgb> {
        use LeafKind::*;
        use Season::*;
        let hex = match (self, season) {
            (Needle, Spring) => 0x33a02c,
            (Needle, Summer) => 0x228b22,
            (Needle, Autumn) => 0x33691e,
            (Needle, Winter) => 0x78909c,
            (Broadleaf, Spring) => 0x66bb6a,
            (Broadleaf, Summer) => 0x2e7d32,
            (Broadleaf, Autumn) => 0xff5722,
            (Broadleaf | Blossom, Winter) => return None,
            (Blossom, Spring) => 0xf8bbd0,
            (Blossom, Summer) => 0x4caf50,
            (Blossom, Autumn) => 0xe65100,
            (Frond, Winter) => 0x90a4ae,
            (Frond, _) => 0x388e3c,
        };
        Some(Rgb(hex))
    }
}

/// Bark color per season
pub fn bark_color(season: Season) -> Rgb {
    Rgb(match season {
        Season::Spring => 0x8d6e63,
        Season::Summer => 0x795548,
        Season::Autumn => 0x5d4037,
        Season::Winter => 0x4e342e,
    })
}

/// A named tree-shape template
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Conifer,
    Oak,
    Pine,
    Maple,
    Bonsai,
    Palm,
    Flowering,
    Willow,
}

impl Archetype {
    pub const ALL: [Archetype; 8] = [
        Archetype::Conifer,
        Archetype::Oak,
        Archetype::Pine,
        Archetype::Maple,
        Archetype::Bonsai,
        Archetype::Palm,
        Archetype::Flowering,
        Archetype::Willow,
    ];

    /// Archetypes available at a quality, in id order
    pub fn roster(quality: Quality) -> &'static [Archetype] {
        match quality {
            Quality::Medium => &Self::ALL[..5],
            Quality::High => &Self::ALL[..7],
            Quality::Ultra => &Self::ALL,
        }
    }

    /// Look up by integer id within a quality's roster
    pub fn from_id(id: usize, quality: Quality) -> Option<Archetype> {
        Self::roster(quality).get(id).copied()
    }

    pub fn id(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Conifer => "conifer",
            Archetype::Oak => "oak",
            Archetype::Pine => "pine",
            Archetype::Maple => "maple",
            Archetype::Bonsai => "bonsai",
            Archetype::Palm => "palm",
            Archetype::Flowering => "flowering",
            Archetype::Willow => "willow",
        }
    }

    pub fn leaf_kind(self) -> LeafKind {
        match self {
            Archetype::Conifer | Archetype::Pine => LeafKind::Needle,
            Archetype::Palm => LeafKind::Frond,
            Archetype::Flowering => LeafKind::Blossom,
            _ => LeafKind::Broadleaf,
        }
    }

    /// Parametric description at the given quality
    pub fn params(self, quality: Quality) -> ArchetypeParams {
        let ultra = quality == Quality::Ultra;
        let detailed = quality != Quality::Medium;

        let (trunk, foliage) = match self {
            Archetype::Conifer => (
                Trunk::straight(0.4, 0.6, 6.0),
                Foliage::Cones {
                    layers: if ultra { 5 } else { 4 },
                    base_y: 4.0,
                    spacing: 2.5,
                    base_radius: 4.0,
                    shrink: 0.7,
                    cone_height: 3.0,
                },
            ),
            Archetype::Oak => (
                Trunk::straight(0.5, 0.7, 6.0),
                Foliage::Crown {
                    center_y: 8.0,
                    radius: 3.5,
                    limbs: vec![
                        Limb::new(3.0, 2.0, 0.2, std::f32::consts::FRAC_PI_4),
                        Limb::new(4.0, 2.2, 0.2, -std::f32::consts::FRAC_PI_4),
                        Limb::new(5.0, 1.8, 0.15, std::f32::consts::FRAC_PI_3),
                        Limb::new(5.5, 1.6, 0.15, -std::f32::consts::FRAC_PI_3),
                    ],
                    ring: None,
                },
            ),
            Archetype::Pine => (
                Trunk::straight(0.4, 0.5, 8.0),
                Foliage::Cones {
                    layers: 6,
                    base_y: 3.0,
                    spacing: 1.5,
                    base_radius: 4.0,
                    shrink: 0.5,
                    cone_height: 1.5,
                },
            ),
            Archetype::Maple => (
                Trunk::curved(
                    0.35,
                    [
                        Vec3::ZERO,
                        Vec3::new(0.0, 2.2, 0.0),
                        Vec3::new(0.25, 4.4, 0.0),
                        Vec3::new(0.1, 6.4, 0.0),
                    ],
                ),
                Foliage::Crown {
                    center_y: 7.0,
                    radius: 4.0,
                    limbs: Vec::new(),
                    ring: Some(Ring { count: 6, radius: 2.5, cluster_radius: 1.75 }),
                },
            ),
            Archetype::Bonsai => (
                Trunk::curved(
                    0.3,
                    [
                        Vec3::ZERO,
                        Vec3::new(0.1, 1.3, 0.0),
                        Vec3::new(0.25, 2.7, 0.0),
                        Vec3::new(0.3, 4.0, 0.0),
                    ],
                ),
                Foliage::Crown {
                    center_y: 4.0,
                    radius: 2.0,
                    limbs: Vec::new(),
                    ring: None,
                },
            ),
            Archetype::Palm => (
                Trunk::curved(
                    0.3,
                    [
                        Vec3::ZERO,
                        Vec3::new(0.4, 2.7, 0.0),
                        Vec3::new(0.4, 5.3, 0.0),
                        Vec3::new(0.0, 8.0, 0.0),
                    ],
                ),
                Foliage::Fronds { count: 7, reach: 3.0, leaflets: 5 },
            ),
            Archetype::Flowering => (
                Trunk::straight(0.3, 0.4, 5.0),
                Foliage::Blossoms {
                    branches: if ultra { 5 } else { 3 },
                    crown_y: 5.5,
                    crown_radius: 2.5,
                    flowers: match quality {
                        Quality::Medium => 0,
                        Quality::High => 8,
                        Quality::Ultra => 15,
                    },
                },
            ),
            Archetype::Willow => (
                Trunk::straight(0.6, 0.8, 8.0),
                Foliage::Drooping { count: 30, top_y: 7.0, spread: 5.0, drop: 7.0 },
            ),
        };

        ArchetypeParams {
            archetype: self,
            trunk,
            foliage,
            leaf_kind: self.leaf_kind(),
            bark_noise: detailed,
        }
    }
}

/// Trunk shape: a tapered cylinder or a tube along a cubic Bezier
#[derive(Clone, Debug, PartialEq)]
pub enum Trunk {
    Straight { radius_top: f32, radius_bottom: f32, height: f32 },
    Curved { radius: f32, control: [Vec3; 4] },
}

impl Trunk {
    fn straight(radius_top: f32, radius_bottom: f32, height: f32) -> Self {
        Trunk::Straight { radius_top, radius_bottom, height }
    }

    fn curved(radius: f32, control: [Vec3; 4]) -> Self {
        Trunk::Curved { radius, control }
    }

    /// Height of the trunk top above the base
    pub fn height(&self) -> f32 {
        match self {
            Trunk::Straight { height, .. } => *height,
            Trunk::Curved { control, .. } => control[3].y,
        }
    }
}

/// A side branch tilted away from the trunk, ending in a leaf cluster
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limb {
    pub start_y: f32,
    pub length: f32,
    pub thickness: f32,
    /// Tilt from vertical around Z, radians
    pub angle: f32,
}

impl Limb {
    pub const fn new(start_y: f32, length: f32, thickness: f32, angle: f32) -> Self {
        Self { start_y, length, thickness, angle }
    }

    /// Tip position relative to the tree base
    pub fn tip(&self) -> Vec3 {
        Vec3::new(
            self.angle.sin() * self.length,
            self.start_y + self.angle.cos() * self.length,
            0.0,
        )
    }
}

/// Clusters arranged in a horizontal ring around the crown
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub count: u32,
    pub radius: f32,
    pub cluster_radius: f32,
}

/// Foliage layout
#[derive(Clone, Debug, PartialEq)]
pub enum Foliage {
    /// Stacked cones shrinking upward
    Cones {
        layers: u32,
        base_y: f32,
        spacing: f32,
        base_radius: f32,
        shrink: f32,
        cone_height: f32,
    },
    /// One rounded canopy with optional limbs and cluster ring
    Crown {
        center_y: f32,
        radius: f32,
        limbs: Vec<Limb>,
        ring: Option<Ring>,
    },
    /// Arching fronds from the trunk top
    Fronds { count: u32, reach: f32, leaflets: u32 },
    /// Branches cascading down from the crown
    Drooping { count: u32, top_y: f32, spread: f32, drop: f32 },
    /// Short branches carrying blossom clusters
    Blossoms { branches: u32, crown_y: f32, crown_radius: f32, flowers: u32 },
}

/// Everything needed to generate an archetype's geometry
#[derive(Clone, Debug, PartialEq)]
pub struct ArchetypeParams {
    pub archetype: Archetype,
    pub trunk: Trunk,
    pub foliage: Foliage,
    pub leaf_kind: LeafKind,
    /// Roughen the trunk silhouette
    pub bark_noise: bool,
}
