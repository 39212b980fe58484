//! Classic 2D gradient noise over a fixed lattice permutation

use noise::NoiseFn;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Reference permutation of 0..=255
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Perlin-style gradient noise in two dimensions.
///
/// The 256-entry table is stored twice so `perm[x + 1]` and `perm[a + 1]`
/// never need wrapping. Output is roughly in [-1, 1] and always finite.
#[derive(Clone)]
pub struct Perlin2 {
    perm: [u8; 512],
}

impl Perlin2 {
    /// Noise over the reference permutation
    pub fn classic() -> Self {
        Self::from_table(&PERMUTATION)
    }

    /// Noise over the reference values shuffled by a seeded ChaCha stream
    pub fn seeded(seed: u64) -> Self {
        let mut table = PERMUTATION;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        table.shuffle(&mut rng);
        Self::from_table(&table)
    }

    fn from_table(table: &[u8; 256]) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    /// Sample the noise field at (x, y)
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;

        let x = x - xf;
        let y = y - yf;

        let u = fade(x);
        let v = fade(y);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;

        lerp(
            v,
            lerp(u, grad(p[a], x, y), grad(p[b], x - 1.0, y)),
            lerp(u, grad(p[a + 1], x, y - 1.0), grad(p[b + 1], x - 1.0, y - 1.0)),
        )
    }
}

impl Default for Perlin2 {
    fn default() -> Self {
        Self::classic()
    }
}

impl std::fmt::Debug for Perlin2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perlin2").field("perm0", &self.perm[0]).finish()
    }
}

impl NoiseFn<f64, 2> for Perlin2 {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

/// Quintic fade curve 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Gradient dot product selected by the low 4 bits of the hash
#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let gx = if h < 8 { x } else { y };
    let gy = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let gx = if h & 1 != 0 { -gx } else { gx };
    let gy = if h & 2 != 0 { -gy } else { gy };
    gx + gy
}
