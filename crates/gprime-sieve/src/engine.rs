//! The sieve strategy contract and its generic driver.
//!
//! Every strategy follows the same four steps: obtain seed primes up to
//! the square root of its region's largest norm, allocate an array shaped
//! like the region, cross off the in-region multiples of every seed, and
//! harvest whatever survives. [`SieveEngine`] is that contract; [`prepare`]
//! and [`run`] are the single driver shared by all strategies.

use crate::metrics::SieveMetrics;
use crate::oracle::PrimeOracle;
use gprime_core::{GaussianInteger, SieveError};
use std::time::Instant;

/// A region strategy for sieving Gaussian primes.
///
/// # Contract
///
/// - [`allocate`](Self::allocate) resets the array to "all surviving"
///   except the cells of `0` and the units, and may be called again to
///   restart.
/// - [`cross_off`](Self::cross_off) strikes every in-region multiple of a
///   first-quadrant prime `p` and leaves `p` itself (and its in-region
///   first-quadrant associates) surviving. Calling it twice with the same
///   prime changes nothing the first call did not.
/// - [`harvest`](Self::harvest) is read-only and returns the surviving
///   primes sorted by the [`GaussianInteger`] order. It is only meaningful
///   after every seed prime up to [`seed_bound`](Self::seed_bound) has been
///   crossed off.
pub trait SieveEngine {
    /// Short strategy name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Largest seed norm the sweep needs: the integer square root of the
    /// largest norm in the region.
    fn seed_bound(&self) -> u64;

    /// Obtain the seed primes from `oracle`.
    fn seed_primes(&self, oracle: &dyn PrimeOracle) -> Result<Vec<GaussianInteger>, SieveError> {
        Ok(oracle.primes_up_to(self.seed_bound())?)
    }

    /// Size the array to the region and reset every cell.
    fn allocate(&mut self);

    /// Strike the in-region multiples of `p`, then re-mark `p`.
    fn cross_off(&mut self, p: GaussianInteger);

    /// Surviving primes in the strategy's output format.
    fn harvest(&self) -> Vec<GaussianInteger>;

    /// Number of primes the region holds.
    ///
    /// Full-disk strategies count every associate; window and sector
    /// strategies count their survivors.
    fn count(&self) -> u64;

    /// Number of cells or packed words currently allocated.
    fn cell_count(&self) -> usize;
}

/// Output of a complete [`run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Harvest {
    /// Surviving primes, sorted.
    pub primes: Vec<GaussianInteger>,
    /// The engine's [`SieveEngine::count`].
    pub count: u64,
    /// What the run cost.
    pub metrics: SieveMetrics,
}

fn elapsed_us(since: Instant) -> u64 {
    since.elapsed().as_micros() as u64
}

/// Allocate `engine` and cross off `seeds`, leaving the array ready for
/// harvesting or exploration.
///
/// Seeds with norm above the engine's seed bound are skipped, so callers
/// can pass a longer shared table.
pub fn prepare_with_seeds<E>(engine: &mut E, seeds: &[GaussianInteger]) -> SieveMetrics
where
    E: SieveEngine + ?Sized,
{
    let bound = engine.seed_bound();
    let start = Instant::now();
    engine.allocate();
    let allocate_us = elapsed_us(start);

    let start = Instant::now();
    let mut used = 0;
    for &p in seeds.iter().take_while(|p| p.norm() <= bound) {
        engine.cross_off(p);
        used += 1;
    }
    let sweep_us = elapsed_us(start);

    let metrics = SieveMetrics {
        engine: engine.name(),
        seed_primes: used,
        cells: engine.cell_count(),
        seed_us: 0,
        allocate_us,
        sweep_us,
    };
    tracing::debug!(
        engine = metrics.engine,
        seeds = metrics.seed_primes,
        cells = metrics.cells,
        sweep_us = metrics.sweep_us,
        "sieve swept"
    );
    metrics
}

/// Seed `engine` from `oracle`, allocate it and sweep it.
pub fn prepare<E>(engine: &mut E, oracle: &dyn PrimeOracle) -> Result<SieveMetrics, SieveError>
where
    E: SieveEngine + ?Sized,
{
    let start = Instant::now();
    let seeds = engine.seed_primes(oracle)?;
    let seed_us = elapsed_us(start);
    let mut metrics = prepare_with_seeds(engine, &seeds);
    metrics.seed_us = seed_us;
    Ok(metrics)
}

/// Seed, allocate, sweep and harvest.
pub fn run<E>(engine: &mut E, oracle: &dyn PrimeOracle) -> Result<Harvest, SieveError>
where
    E: SieveEngine + ?Sized,
{
    let metrics = prepare(engine, oracle)?;
    Ok(Harvest {
        primes: engine.harvest(),
        count: engine.count(),
        metrics,
    })
}

/// Fold a product with non-negative imaginary part into the octant
/// `a >= b >= 0`, returning the point whose cell represents it.
///
/// Products of a first-quadrant prime and an octant cofactor always have
/// `v >= 0`; the four cases are identity, reflection, rotation by `-i`,
/// and rotation followed by reflection.
#[inline]
pub(crate) fn fold_octant(u: i64, v: i64) -> (i64, i64) {
    debug_assert!(v >= 0, "fold_octant expects v >= 0, got ({u}, {v})");
    if u > 0 {
        if u >= v {
            (u, v)
        } else {
            (v, u)
        }
    } else if v >= -u {
        (v, -u)
    } else {
        (-u, v)
    }
}
