//! Wheel-compressed full-disk sieve over the first octant.

use crate::engine::{fold_octant, SieveEngine};
use crate::grid::PackedGrid;
use crate::wheel::WHEEL;
use gprime_core::{isqrt, GaussianInteger};

/// Primes of norm at most 5 are the ones dividing the wheel modulus.
const WHEEL_PRIME_NORM: u64 = 5;

/// Octant sieve that stores only points coprime to 10.
///
/// Same region and output as [`OctantSieve`](crate::OctantSieve), using a
/// bit per surviving residue: 32 bits per 10×10 block instead of 100
/// flags. Multiples of `1+i`, `2+i` and `2-i` never have a bit, so those
/// three primes are not swept and are added back at harvest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonutSieve {
    bound: u64,
    grid: PackedGrid,
}

impl DonutSieve {
    /// Wheel sieve for norms up to `bound`.
    pub fn new(bound: u64) -> Self {
        Self {
            bound,
            grid: PackedGrid::default(),
        }
    }

    /// The norm bound.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Block rows stored in block column `a`.
    fn column_blocks(&self, a: u64) -> usize {
        let top = if a <= isqrt(self.bound / 200) {
            a
        } else {
            isqrt(self.bound / 100 - a * a)
        };
        top as usize + 1
    }

    fn wheel_primes(&self) -> impl Iterator<Item = GaussianInteger> + '_ {
        [
            (2, GaussianInteger::ONE_PLUS_I),
            (5, GaussianInteger::new(2, 1)),
            (5, GaussianInteger::new(1, 2)),
        ]
        .into_iter()
        .filter(|&(norm, _)| norm <= self.bound)
        .map(|(_, g)| g)
    }

    /// Octant survivors strictly below the diagonal, within the bound.
    fn octant_survivors(&self) -> impl Iterator<Item = GaussianInteger> + '_ {
        self.grid
            .survivors()
            .map(|(a, b)| GaussianInteger::new(a, b))
            .filter(|g| g.a > 0 && g.a > g.b && g.norm() <= self.bound)
    }
}

impl SieveEngine for DonutSieve {
    fn name(&self) -> &'static str {
        "donut"
    }

    fn seed_bound(&self) -> u64 {
        isqrt(self.bound)
    }

    fn allocate(&mut self) {
        let width = isqrt(self.bound) / 10 + 1;
        self.grid = PackedGrid::jagged((0..width).map(|a| self.column_blocks(a)));
        self.grid.put(1, 0, false);
        self.grid.put(0, 1, false);
    }

    fn cross_off(&mut self, p: GaussianInteger) {
        let n = p.norm();
        if n <= WHEEL_PRIME_NORM {
            return;
        }
        let (ga, gb) = fold_octant(p.a, p.b);
        let m = self.bound / n;
        let (a, b) = (p.a, p.b);
        for c in 0..=isqrt(m) {
            let top = c.min(isqrt(m - c * c)) as i64;
            let c = c as i64;
            let mut d = WHEEL.start[(c % 10) as usize] as i64;
            while d <= top {
                let (u, v) = fold_octant(a * c - b * d, b * c + a * d);
                let struck = self.grid.put(u, v, false);
                debug_assert!(struck, "({u}, {v}) has no bit");
                d += WHEEL.step(c, d);
            }
        }
        self.grid.put(ga, gb, true);
    }

    fn harvest(&self) -> Vec<GaussianInteger> {
        let mut out: Vec<_> = self.wheel_primes().collect();
        for g in self.octant_survivors() {
            out.push(g);
            if g.b > 0 {
                out.push(g.flip());
            }
        }
        out.sort_unstable();
        out
    }

    fn count(&self) -> u64 {
        let wheel = self.wheel_primes().count() as u64;
        let rest: u64 = self
            .octant_survivors()
            .map(|g| if g.b > 0 { 2 } else { 1 })
            .sum();
        4 * (wheel + rest)
    }

    fn cell_count(&self) -> usize {
        self.grid.word_count()
    }
}
