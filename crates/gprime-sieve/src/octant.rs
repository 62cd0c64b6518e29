//! Full-disk sieve over the first octant.

use crate::engine::{fold_octant, SieveEngine};
use crate::grid::FlagGrid;
use gprime_core::{isqrt, GaussianInteger};

/// Sieve of every Gaussian prime with norm `<= bound`.
///
/// Only the octant `a >= b >= 0` is stored: column `a` runs up to the
/// diagonal or the circle, whichever is lower. Multiples are folded into
/// the octant as they are struck. Harvesting unfolds each survivor `g`
/// into `g` and `flip(g)`, giving one representative per associate class
/// in the first quadrant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OctantSieve {
    bound: u64,
    grid: FlagGrid,
}

impl OctantSieve {
    /// Octant sieve for norms up to `bound`. Nothing is allocated until
    /// the driver calls [`SieveEngine::allocate`].
    pub fn new(bound: u64) -> Self {
        Self {
            bound,
            grid: FlagGrid::default(),
        }
    }

    /// The norm bound.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Highest `b` stored in column `a`.
    fn column_top(&self, a: u64) -> u64 {
        if a <= isqrt(self.bound / 2) {
            a
        } else {
            isqrt(self.bound - a * a)
        }
    }

    /// `true` when the octant point `(a, b)` is inside the region and
    /// still surviving.
    pub fn is_alive(&self, a: i64, b: i64) -> bool {
        self.grid.is_set(a, b)
    }

    /// Consume the octant point `(a, b)`, returning whether it was a
    /// surviving cell. Used by explorers to mark primes as visited.
    pub fn claim(&mut self, a: i64, b: i64) -> bool {
        self.grid.take(a, b)
    }

    /// Surviving octant cells `a >= b >= 0` excluding `1+i`, as points.
    fn octant_survivors(&self) -> impl Iterator<Item = GaussianInteger> + '_ {
        self.grid
            .survivors()
            .filter(|&(a, b)| a >= 2 && b < a)
            .map(|(a, b)| GaussianInteger::new(a, b))
    }
}

impl SieveEngine for OctantSieve {
    fn name(&self) -> &'static str {
        "octant"
    }

    fn seed_bound(&self) -> u64 {
        isqrt(self.bound)
    }

    fn allocate(&mut self) {
        let width = isqrt(self.bound) + 1;
        self.grid = FlagGrid::jagged((0..width).map(|a| self.column_top(a) as usize + 1));
        self.grid.put(0, 0, false);
        // 1 and i both fold to (1, 0)
        self.grid.put(1, 0, false);
    }

    fn cross_off(&mut self, p: GaussianInteger) {
        let (ga, gb) = fold_octant(p.a, p.b);
        if !self.grid.is_set(ga, gb) {
            return;
        }
        let n = p.norm();
        let m = self.bound / n;
        let (a, b) = (p.a, p.b);
        for c in 1..=isqrt(m) {
            let top = c.min(isqrt(m - c * c)) as i64;
            let c = c as i64;
            let (mut u, mut v) = (c * a, c * b);
            for _ in 0..=top {
                let (fu, fv) = fold_octant(u, v);
                self.grid.put(fu, fv, false);
                u -= b;
                v += a;
            }
        }
        self.grid.put(ga, gb, true);
    }

    fn harvest(&self) -> Vec<GaussianInteger> {
        let mut out = Vec::new();
        if self.bound >= 2 {
            out.push(GaussianInteger::ONE_PLUS_I);
        }
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
        let ramified = u64::from(self.bound >= 2);
        let classes: u64 = self
            .octant_survivors()
            .map(|g| if g.b > 0 { 2 } else { 1 })
            .sum();
        4 * (ramified + classes)
    }

    fn cell_count(&self) -> usize {
        self.grid.cell_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::engine::run;
    use crate::oracle::RecursiveOracle;
    use gprime_test_utils::naive;

    fn sieve(bound: u64) -> OctantSieve {
        let oracle = RecursiveOracle::builtin().unwrap();
        let mut s = OctantSieve::new(bound);
        crate::engine::prepare(&mut s, &oracle).unwrap();
        s
    }

    fn pairs(v: &[GaussianInteger]) -> Vec<(i64, i64)> {
        v.iter().map(|&g| g.into()).collect()
    }

    // ── Reference values ────────────────────────────────────────

    #[test]
    fn primes_up_to_ten() {
        assert_eq!(
            pairs(&sieve(10).harvest()),
            vec![(1, 1), (2, 1), (1, 2), (3, 0)]
        );
    }

    #[test]
    fn known_counts() {
        for (bound, expected) in [
            (0, 0),
            (1, 0),
            (2, 4),
            (5, 12),
            (9, 16),
            (10, 16),
            (100, 100),
            (1000, 668),
            (10_000, 4928),
            (100_000, 38404),
        ] {
            assert_eq!(sieve(bound).count(), expected, "count({bound})");
        }
    }

    #[test]
    fn count_up_to_a_million() {
        let oracle = RecursiveOracle::builtin().unwrap();
        let h = run(&mut OctantSieve::new(1_000_000), &oracle).unwrap();
        assert_eq!(h.count, 313_752);
        assert_eq!(h.count, 4 * h.primes.len() as u64);
    }

    #[test]
    fn matches_naive_primality() {
        let bound = 5000;
        assert_eq!(sieve(bound).harvest(), naive::first_quadrant_primes(bound));
    }

    // ── Shape ───────────────────────────────────────────────────

    #[test]
    fn array_is_octant_shaped() {
        let s = sieve(50);
        // columns 0..=7; diagonal up to isqrt(25) = 5, then the circle
        assert_eq!(s.grid.width(), 8);
        assert_eq!(s.grid.height(5), 6);
        assert_eq!(s.grid.height(6), 4);
        assert_eq!(s.grid.height(7), 2);
    }

    #[test]
    fn units_and_zero_are_cleared() {
        let s = sieve(100);
        assert!(!s.is_alive(0, 0));
        assert!(!s.is_alive(1, 0));
    }

    #[test]
    fn claim_consumes_a_prime_once() {
        let mut s = sieve(100);
        assert!(s.claim(3, 2));
        assert!(!s.claim(3, 2));
        assert!(!s.claim(4, 0));
        assert!(!s.claim(200, 0));
    }

    // ── Contract ────────────────────────────────────────────────

    #[test]
    fn engine_contract() {
        let s = sieve(3000);
        compliance::assert_harvest_deterministic(&s);
        compliance::assert_output_well_formed(&s.harvest(), 3000);
        compliance::assert_cross_off_idempotent(&s, GaussianInteger::new(2, 1));
        compliance::assert_cross_off_idempotent(&s, GaussianInteger::new(7, 0));
    }

    #[test]
    fn reallocate_restarts_the_sieve() {
        let mut s = sieve(500);
        let before = s.harvest();
        s.allocate();
        assert!(s.harvest().len() > before.len());
        let oracle = RecursiveOracle::builtin().unwrap();
        crate::engine::prepare(&mut s, &oracle).unwrap();
        assert_eq!(s.harvest(), before);
    }
}
