//! Region-shaped cell storage for the sieves.
//!
//! Both grids are column-major and jagged: column `u` has its own height,
//! so the octant and disk shapes waste no cells. Both pack their flags
//! into machine words. All access goes through
//! signed `(u, v)` pairs validated against the column bounds; reads
//! outside the grid report "not set" and writes outside it are refused.

use crate::wheel::{MODULUS, WHEEL};

/// One survival bit per cell, packed 64 to a word.
///
/// Columns are laid end to end in bit order: column `u` occupies bits
/// `starts[u]..starts[u + 1]`. A set bit means no seed multiple has struck
/// the cell yet and no explorer has consumed it. Bits past the last column
/// stay clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagGrid {
    words: Vec<u64>,
    starts: Vec<usize>,
}

impl Default for FlagGrid {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            starts: vec![0],
        }
    }
}

const WORD_BITS: usize = u64::BITS as usize;

impl FlagGrid {
    /// A grid whose column `u` holds `heights[u]` cells, all set.
    pub fn jagged<I: IntoIterator<Item = usize>>(heights: I) -> Self {
        let mut starts = vec![0];
        let mut total = 0;
        for h in heights {
            total += h;
            starts.push(total);
        }
        let mut words = vec![u64::MAX; total.div_ceil(WORD_BITS)];
        if let (Some(last), rem @ 1..) = (words.last_mut(), total % WORD_BITS) {
            *last = (1u64 << rem) - 1;
        }
        Self { words, starts }
    }

    /// A `width × height` rectangle, all set.
    pub fn rectangle(width: usize, height: usize) -> Self {
        Self::jagged(std::iter::repeat_n(height, width))
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.starts.len() - 1
    }

    /// Height of column `u` (zero past the last column).
    pub fn height(&self, u: usize) -> usize {
        match (self.starts.get(u), self.starts.get(u + 1)) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0,
        }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.starts.last().copied().unwrap_or(0)
    }

    /// Number of `u64` words allocated.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Bit position of `(u, v)`, or `None` outside the grid.
    fn bit(&self, u: i64, v: i64) -> Option<usize> {
        let u = usize::try_from(u).ok()?;
        let v = usize::try_from(v).ok()?;
        (v < self.height(u)).then(|| self.starts[u] + v)
    }

    /// The flag at `(u, v)`, or `None` outside the grid.
    pub fn get(&self, u: i64, v: i64) -> Option<bool> {
        self.bit(u, v)
            .map(|b| (self.words[b / WORD_BITS] >> (b % WORD_BITS)) & 1 != 0)
    }

    /// `true` when `(u, v)` is inside the grid and set.
    #[inline]
    pub fn is_set(&self, u: i64, v: i64) -> bool {
        self.get(u, v).unwrap_or(false)
    }

    /// Write `flag` at `(u, v)`. Returns `false` if the cell is outside.
    pub fn put(&mut self, u: i64, v: i64, flag: bool) -> bool {
        match self.bit(u, v) {
            Some(b) => {
                let mask = 1u64 << (b % WORD_BITS);
                if flag {
                    self.words[b / WORD_BITS] |= mask;
                } else {
                    self.words[b / WORD_BITS] &= !mask;
                }
                true
            }
            None => false,
        }
    }

    /// Clear the flag at `(u, v)` and return whether it was set.
    pub fn take(&mut self, u: i64, v: i64) -> bool {
        match self.bit(u, v) {
            Some(b) => {
                let mask = 1u64 << (b % WORD_BITS);
                let word = &mut self.words[b / WORD_BITS];
                let was = *word & mask != 0;
                *word &= !mask;
                was
            }
            None => false,
        }
    }

    /// Coordinates of every set cell, column by column.
    pub fn survivors(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.starts.windows(2).enumerate().flat_map(move |(u, span)| {
            let (lo, hi) = (span[0], span[1]);
            let first = lo / WORD_BITS;
            let last = hi.div_ceil(WORD_BITS);
            self.words[first..last]
                .iter()
                .enumerate()
                .flat_map(move |(i, &word)| {
                    let base = (first + i) * WORD_BITS;
                    BitIter(word)
                        .map(move |bit| base + bit)
                        .filter(move |&b| (lo..hi).contains(&b))
                        .map(move |b| (u as i64, (b - lo) as i64))
                })
        })
    }

    /// Number of set cells.
    pub fn count_set(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Wheel-compressed flags: one `u32` per 10×10 block of points.
///
/// Only points coprime to 10 have a bit (see [`crate::wheel`]); they are
/// addressed by point coordinates and mapped to `(block, bit)` here.
/// Points that are not coprime to 10 read as unset and cannot be written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedGrid {
    columns: Vec<Vec<u32>>,
}

impl PackedGrid {
    /// A grid whose block column `u` holds `heights[u]` blocks, all bits set.
    pub fn jagged<I: IntoIterator<Item = usize>>(heights: I) -> Self {
        Self {
            columns: heights.into_iter().map(|h| vec![u32::MAX; h]).collect(),
        }
    }

    /// A `width × height` rectangle of blocks, all bits set.
    pub fn rectangle(width: usize, height: usize) -> Self {
        Self::jagged(std::iter::repeat_n(height, width))
    }

    /// Number of block columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of `u32` words allocated.
    pub fn word_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    fn locate(&self, u: i64, v: i64) -> Option<(usize, usize, u32)> {
        let u = u64::try_from(u).ok()?;
        let v = u64::try_from(v).ok()?;
        let bit = WHEEL.bit_of(u, v)?;
        let m = MODULUS as u64;
        let (bu, bv) = ((u / m) as usize, (v / m) as usize);
        let col = self.columns.get(bu)?;
        (bv < col.len()).then_some((bu, bv, 1u32 << bit))
    }

    /// `true` when the point `(u, v)` has a bit and it is set.
    #[inline]
    pub fn is_set(&self, u: i64, v: i64) -> bool {
        self.locate(u, v)
            .is_some_and(|(bu, bv, mask)| self.columns[bu][bv] & mask != 0)
    }

    /// Write `flag` at point `(u, v)`. Returns `false` if it has no bit.
    pub fn put(&mut self, u: i64, v: i64, flag: bool) -> bool {
        match self.locate(u, v) {
            Some((bu, bv, mask)) => {
                if flag {
                    self.columns[bu][bv] |= mask;
                } else {
                    self.columns[bu][bv] &= !mask;
                }
                true
            }
            None => false,
        }
    }

    /// Point coordinates of every set bit, block column by block column.
    pub fn survivors(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.columns.iter().enumerate().flat_map(|(bu, col)| {
            col.iter().enumerate().flat_map(move |(bv, &word)| {
                BitIter(u64::from(word)).map(move |bit| {
                    let u = bu as i64 * MODULUS + WHEEL.real[bit] as i64;
                    let v = bv as i64 * MODULUS + WHEEL.imag[bit] as i64;
                    (u, v)
                })
            })
        })
    }
}

/// Positions of the set bits of a word, lowest first.
struct BitIter(u64);

impl Iterator for BitIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}
