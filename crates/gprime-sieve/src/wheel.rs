//! Mod-10 wheel tables for the packed sieves.
//!
//! A residue pair `(c, d)` mod 10 survives the wheel when `c + di` is
//! coprime to 10, i.e. not divisible by `1+i`, `2+i` or `2-i`. Exactly
//! 32 of the 100 pairs qualify, so one 10×10 block of the plane packs
//! into a single `u32`. The tables are computed at compile time from that
//! rule; nothing here is transcribed by hand.

/// The wheel modulus.
pub const MODULUS: i64 = 10;

/// Number of surviving residue pairs per 10×10 block.
pub const RESIDUES: usize = 32;

/// Marker for residue pairs that are not coprime to 10.
pub const NO_BIT: u8 = u8::MAX;

/// Residue pair tables, indexed `[real residue][imaginary residue]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WheelTables {
    /// First valid imaginary residue in each row.
    pub start: [u8; 10],
    /// Distance from a valid `(c, d)` to the next valid residue in row
    /// `c`, wrapping past 9. Zero for invalid pairs.
    pub gap: [[u8; 10]; 10],
    /// Bit position of each valid pair, row-major; [`NO_BIT`] otherwise.
    pub bit: [[u8; 10]; 10],
    /// Real residue of each bit.
    pub real: [u8; RESIDUES],
    /// Imaginary residue of each bit.
    pub imag: [u8; RESIDUES],
}

/// The tables, built once at compile time.
pub const WHEEL: WheelTables = WheelTables::generate();

/// `true` when `c + di` is coprime to 10, for residues `c, d < 10`.
pub const fn is_coprime_residue(c: usize, d: usize) -> bool {
    // 1+i divides c+di iff c+d is even; 2+i iff c-2d ≡ 0; 2-i iff c+2d ≡ 0 (mod 5)
    (c + d) % 2 == 1 && (c + 20 - 2 * d) % 5 != 0 && (c + 2 * d) % 5 != 0
}

impl WheelTables {
    const fn generate() -> Self {
        let mut t = Self {
            start: [0; 10],
            gap: [[0; 10]; 10],
            bit: [[NO_BIT; 10]; 10],
            real: [0; RESIDUES],
            imag: [0; RESIDUES],
        };
        let mut n = 0;
        let mut c = 0;
        while c < 10 {
            let mut seen = false;
            let mut d = 0;
            while d < 10 {
                if is_coprime_residue(c, d) {
                    if !seen {
                        t.start[c] = d as u8;
                        seen = true;
                    }
                    t.bit[c][d] = n as u8;
                    t.real[n] = c as u8;
                    t.imag[n] = d as u8;
                    n += 1;

                    let mut k = 1;
                    while !is_coprime_residue(c, (d + k) % 10) {
                        k += 1;
                    }
                    t.gap[c][d] = k as u8;
                }
                d += 1;
            }
            c += 1;
        }
        t
    }

    /// Bit position for a pair of non-negative coordinates, if coprime.
    #[inline]
    pub fn bit_of(&self, u: u64, v: u64) -> Option<u32> {
        let bit = self.bit[(u % 10) as usize][(v % 10) as usize];
        (bit != NO_BIT).then_some(bit as u32)
    }

    /// Step from imaginary residue `d` to the next valid one in row `c`.
    ///
    /// Both arguments may be any integer; they are reduced mod 10 first.
    /// Returns zero when `(c, d)` itself is not coprime to 10.
    #[inline]
    pub fn step(&self, c: i64, d: i64) -> i64 {
        let c = c.rem_euclid(MODULUS) as usize;
        let d = d.rem_euclid(MODULUS) as usize;
        self.gap[c][d] as i64
    }
}
