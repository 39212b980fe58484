//! Name-seeded tree assignment
//!
//! A follower's archetype and size depend only on their name, so the same
//! name always renders as the same tree wherever it lands.

/// Rolling 31x string hash over UTF-16 code units with 32-bit signed
/// wraparound at every step; the result is the absolute value.
pub fn name_hash(name: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(unit as i32);
    }
    hash.unsigned_abs()
}

/// Archetype slot for a name among `archetype_count` templates
pub fn archetype_index(name: &str, archetype_count: usize) -> usize {
    if archetype_count == 0 {
        return 0;
    }
    name_hash(name) as usize % archetype_count
}

/// Uniform scale in [0.8, 1.2] in steps of 0.1
pub fn scale_factor(name: &str) -> f32 {
    0.8 + (name_hash(name) % 5) as f32 / 10.0
}

/// Archetype and scale for a name, computed from a single hash
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assignment {
    pub archetype: usize,
    pub scale: f32,
}

impl Assignment {
    pub fn for_name(name: &str, archetype_count: usize) -> Self {
        let hash = name_hash(name);
        Self {
            archetype: if archetype_count == 0 { 0 } else { hash as usize % archetype_count },
            scale: 0.8 + (hash % 5) as f32 / 10.0,
        }
    }
}
