//! Angular sector regions and their sieve.

use crate::engine::SieveEngine;
use crate::grid::FlagGrid;
use gprime_core::{isqrt, ConfigError, GaussianInteger};
use std::f64::consts::FRAC_PI_4;

/// Slack applied to every trigonometric boundary comparison.
///
/// A point within this distance of a sector edge is decided by the same
/// rounded table for every caller, so adjacent sectors never both claim
/// or both drop a boundary point.
pub const ANGLE_TOLERANCE: f64 = 1e-10;

/// The wedge `{ g : norm(g) <= bound, alpha <= arg(g) < beta }` inside the
/// first octant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    bound: u64,
    alpha: f64,
    beta: f64,
}

impl Sector {
    /// Validate and construct a sector. Requires finite angles with
    /// `0 <= alpha < beta <= π/4`.
    pub fn new(bound: u64, alpha: f64, beta: f64) -> Result<Self, ConfigError> {
        let valid = alpha.is_finite()
            && beta.is_finite()
            && alpha >= 0.0
            && alpha < beta
            && beta <= FRAC_PI_4 + ANGLE_TOLERANCE;
        if !valid {
            return Err(ConfigError::InvalidSector { alpha, beta });
        }
        Ok(Self {
            bound,
            alpha,
            beta: beta.min(FRAC_PI_4),
        })
    }

    /// The whole octant below the diagonal.
    pub fn octant(bound: u64) -> Self {
        Self {
            bound,
            alpha: 0.0,
            beta: FRAC_PI_4,
        }
    }

    /// Norm bound.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Lower angle, inclusive.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Upper angle, exclusive.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Inclusive range of `b` inside the sector for real part `a >= 1`.
    ///
    /// `b >= a·tan(alpha)` and `b < a·tan(beta)`, each relaxed by
    /// [`ANGLE_TOLERANCE`], clipped to the circle. Empty when `hi < lo`.
    pub fn column(&self, a: u64) -> (i64, i64) {
        let af = a as f64;
        let lo = (af * self.alpha.tan() - ANGLE_TOLERANCE).ceil().max(0.0) as i64;
        let edge = (af * self.beta.tan() - ANGLE_TOLERANCE).ceil() as i64 - 1;
        let circle = match self.bound.checked_sub(a * a) {
            Some(rest) => isqrt(rest) as i64,
            None => -1,
        };
        (lo, edge.min(circle))
    }
}

/// Sieve of the Gaussian primes inside a [`Sector`].
///
/// Column `a` stores only the rows `lo(a)..=hi(a)` of the sector, shifted
/// down by `lo(a)`, so a thin wedge far from the real axis still gets a
/// small array. Membership is decided once per column by
/// [`Sector::column`]; the cross-off sweep widens its angular bounds by
/// one row on each side and lets that table have the final word.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorSieve {
    sector: Sector,
    /// Per-column `(lo, hi)`; column 0 is empty.
    rows: Vec<(i64, i64)>,
    grid: FlagGrid,
}

impl SectorSieve {
    /// Sieve over `sector`.
    pub fn new(sector: Sector) -> Self {
        Self {
            sector,
            rows: Vec::new(),
            grid: FlagGrid::default(),
        }
    }

    /// The region.
    pub fn sector(&self) -> &Sector {
        &self.sector
    }

    /// `true` when `(a, b)` belongs to the sector.
    pub fn contains(&self, a: i64, b: i64) -> bool {
        self.local(a, b).is_some()
    }

    fn local(&self, a: i64, b: i64) -> Option<(i64, i64)> {
        let (lo, hi) = *self.rows.get(usize::try_from(a).ok()?)?;
        (a >= 1 && lo <= b && b <= hi).then_some((a, b - lo))
    }

    fn put(&mut self, a: i64, b: i64, flag: bool) {
        if let Some((u, v)) = self.local(a, b) {
            self.grid.put(u, v, flag);
        }
    }

    fn survivors(&self) -> impl Iterator<Item = GaussianInteger> + '_ {
        self.grid
            .survivors()
            .map(|(u, v)| GaussianInteger::new(u, v + self.rows[u as usize].0))
    }
}

impl SieveEngine for SectorSieve {
    fn name(&self) -> &'static str {
        "sector"
    }

    fn seed_bound(&self) -> u64 {
        isqrt(self.sector.bound)
    }

    fn allocate(&mut self) {
        let width = isqrt(self.sector.bound) + 1;
        self.rows = (0..width)
            .map(|a| if a == 0 { (0, -1) } else { self.sector.column(a) })
            .collect();
        self.grid = FlagGrid::jagged(
            self.rows
                .iter()
                .map(|&(lo, hi)| usize::try_from(hi - lo + 1).unwrap_or(0)),
        );
        self.put(1, 0, false);
    }

    fn cross_off(&mut self, p: GaussianInteger) {
        let (a, b) = (p.a, p.b);
        let m = self.sector.bound / p.norm();
        let theta = p.arg();
        let lower = (self.sector.alpha - theta).tan();
        let upper = (self.sector.beta - theta).tan();
        for c in 1..=isqrt(m) {
            let r = isqrt(m - c * c) as i64;
            let cf = c as f64;
            let c = c as i64;
            let d_lo = ((cf * lower).floor() as i64 - 1).max(-r);
            let d_hi = ((cf * upper).ceil() as i64 + 1).min(r);
            for d in d_lo..=d_hi {
                self.put(a * c - b * d, b * c + a * d, false);
            }
        }
        self.put(a, b, true);
    }

    fn harvest(&self) -> Vec<GaussianInteger> {
        let mut out: Vec<_> = self.survivors().collect();
        out.sort_unstable();
        out
    }

    fn count(&self) -> u64 {
        self.grid.count_set() as u64
    }

    fn cell_count(&self) -> usize {
        self.grid.cell_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::engine::{prepare, run};
    use crate::octant::OctantSieve;
    use crate::oracle::RecursiveOracle;
    use proptest::prelude::*;

    fn sector_primes(bound: u64, alpha: f64, beta: f64) -> Vec<GaussianInteger> {
        let oracle = RecursiveOracle::builtin().unwrap();
        let s = Sector::new(bound, alpha, beta).unwrap();
        run(&mut SectorSieve::new(s), &oracle).unwrap().primes
    }

    fn octant_primes_below_diagonal(bound: u64) -> Vec<GaussianInteger> {
        let oracle = RecursiveOracle::builtin().unwrap();
        run(&mut OctantSieve::new(bound), &oracle)
            .unwrap()
            .primes
            .into_iter()
            .filter(|g| g.a > g.b)
            .collect()
    }

    // ── Sector ──────────────────────────────────────────────────

    #[test]
    fn rejects_bad_angles() {
        for (alpha, beta) in [(0.5, 0.2), (0.3, 0.3), (-0.1, 0.2), (0.0, 1.0), (f64::NAN, 0.5)] {
            assert!(
                matches!(Sector::new(100, alpha, beta), Err(ConfigError::InvalidSector { .. })),
                "[{alpha}, {beta}) accepted"
            );
        }
        assert!(Sector::new(100, 0.0, FRAC_PI_4).is_ok());
    }

    #[test]
    fn column_bounds_are_half_open() {
        let s = Sector::octant(10_000);
        // diagonal excluded, real axis included
        assert_eq!(s.column(5), (0, 4));
        let s = Sector::new(10_000, 1f64.atan2(2.0), FRAC_PI_4).unwrap();
        // b >= a/2 exactly on the edge is included
        assert_eq!(s.column(10).0, 5);
        assert_eq!(s.column(11).0, 6);
    }

    #[test]
    fn column_clipped_by_circle() {
        let s = Sector::octant(50);
        assert_eq!(s.column(7), (0, 1));
        assert_eq!(s.column(8).1, -1);
    }

    // ── Sieve ───────────────────────────────────────────────────

    #[test]
    fn full_octant_matches_octant_sieve() {
        let bound = 40_000;
        assert_eq!(
            sector_primes(bound, 0.0, FRAC_PI_4),
            octant_primes_below_diagonal(bound)
        );
    }

    #[test]
    fn thin_wedge_keeps_a_small_array() {
        let oracle = RecursiveOracle::builtin().unwrap();
        let s = Sector::new(1_000_000, 0.70, 0.71).unwrap();
        let mut sieve = SectorSieve::new(s);
        prepare(&mut sieve, &oracle).unwrap();
        let mut octant = OctantSieve::new(1_000_000);
        octant.allocate();
        assert!(sieve.cell_count() * 20 < octant.cell_count());
    }

    #[test]
    fn unit_cleared_only_on_the_real_axis() {
        let oracle = RecursiveOracle::builtin().unwrap();
        let mut s = SectorSieve::new(Sector::octant(100));
        prepare(&mut s, &oracle).unwrap();
        assert!(!s.harvest().contains(&GaussianInteger::ONE));
    }

    #[test]
    fn engine_contract() {
        let oracle = RecursiveOracle::builtin().unwrap();
        let mut s = SectorSieve::new(Sector::new(30_000, 0.1, 0.6).unwrap());
        prepare(&mut s, &oracle).unwrap();
        compliance::assert_harvest_deterministic(&s);
        compliance::assert_output_well_formed(&s.harvest(), 30_000);
        compliance::assert_cross_off_idempotent(&s, GaussianInteger::new(2, 1));
        compliance::assert_cross_off_idempotent(&s, GaussianInteger::new(1, 2));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn adjacent_sectors_partition_the_octant(split in 0.01f64..0.78) {
            let bound = 20_000;
            let mut joined = sector_primes(bound, 0.0, split);
            joined.extend(sector_primes(bound, split, FRAC_PI_4));
            joined.sort();
            prop_assert_eq!(joined, octant_primes_below_diagonal(bound));
        }

        #[test]
        fn sector_is_octant_restricted_to_angles(alpha in 0.0f64..0.7, width in 0.001f64..0.3) {
            let beta = (alpha + width).min(FRAC_PI_4);
            let bound = 20_000;
            let s = Sector::new(bound, alpha, beta).unwrap();
            let expected: Vec<_> = octant_primes_below_diagonal(bound)
                .into_iter()
                .filter(|g| {
                    let (lo, hi) = s.column(g.a as u64);
                    lo <= g.b && g.b <= hi
                })
                .collect();
            prop_assert_eq!(sector_primes(bound, alpha, beta), expected);
        }
    }
}
