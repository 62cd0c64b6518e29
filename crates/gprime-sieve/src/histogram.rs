//! Angular distribution of the primes in the first octant.

use crate::engine::run;
use crate::octant::OctantSieve;
use crate::oracle::PrimeOracle;
use gprime_core::SieveError;
use std::f64::consts::FRAC_PI_4;

/// Histogram of `arg(g)` over the octant primes `a >= b >= 0` with norm
/// `<= bound`, in `bins` equal slices of `[0, π/4]`.
///
/// Points on the diagonal land in the last bin. Zero bins gives an empty
/// histogram.
pub fn angular_distribution(
    bound: u64,
    bins: usize,
    oracle: &dyn PrimeOracle,
) -> Result<Vec<u64>, SieveError> {
    let mut hist = vec![0; bins];
    if bins == 0 {
        return Ok(hist);
    }
    let harvest = run(&mut OctantSieve::new(bound), oracle)?;
    for g in harvest.primes.into_iter().filter(|g| g.a >= g.b) {
        let slot = (g.arg() / FRAC_PI_4 * bins as f64) as usize;
        hist[slot.min(bins - 1)] += 1;
    }
    Ok(hist)
}
