//! Golden moat values.
//!
//! Size and farthest member of the origin's component for a given jump,
//! measured with the octant explorer and checked against published runs.

pub struct GoldenMoat {
    pub jump: f64,
    pub size: u64,
    pub farthest: (i64, i64),
    /// Takes more than a few seconds in a debug build.
    pub slow: bool,
}

pub const GOLDEN_MOATS: &[GoldenMoat] = &[
    GoldenMoat {
        jump: 2.0,
        size: 92,
        farthest: (42, 17),
        slow: false,
    },
    GoldenMoat {
        jump: 3.0,
        size: 380,
        farthest: (84, 41),
        slow: false,
    },
    GoldenMoat {
        jump: 3.5,
        size: 31_221,
        farthest: (976, 311),
        slow: false,
    },
    GoldenMoat {
        jump: 4.0,
        size: 347_638,
        farthest: (3297, 2780),
        slow: true,
    },
];

/// Origin component size for jump 4.3 from the streaming explorer.
pub const SEGMENTED_GOLDEN: (f64, u64) = (4.3, 2_386_129);

pub fn fast_moats() -> impl Iterator<Item = &'static GoldenMoat> {
    GOLDEN_MOATS.iter().filter(|m| !m.slow)
}
