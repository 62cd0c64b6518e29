//! One-call queries over the built-in seed oracle.
//!
//! These are the narrow interface for callers that only want a list of
//! `(a, b)` pairs or a count and do not care which strategy runs.

use crate::donut::DonutSieve;
use crate::engine::{run, Harvest};
use crate::octant::OctantSieve;
use crate::oracle::RecursiveOracle;
use crate::sector::{Sector, SectorSieve};
use crate::window::{Window, WindowSieve};
use crate::window_donut::WindowDonutSieve;
use gprime_core::{GaussianInteger, SieveError};

fn oracle() -> Result<RecursiveOracle, SieveError> {
    Ok(RecursiveOracle::builtin()?)
}

/// First-quadrant primes (`a > 0`, `b >= 0`) with norm `<= bound`.
pub fn primes_up_to(bound: u64) -> Result<Vec<GaussianInteger>, SieveError> {
    Ok(run(&mut OctantSieve::new(bound), &oracle()?)?.primes)
}

/// Number of Gaussian primes with norm `<= bound`, all associates counted.
pub fn count_up_to(bound: u64) -> Result<u64, SieveError> {
    Ok(run(&mut OctantSieve::new(bound), &oracle()?)?.count)
}

/// As [`primes_up_to`], using the wheel-compressed array.
pub fn primes_up_to_packed(bound: u64) -> Result<Vec<GaussianInteger>, SieveError> {
    Ok(run(&mut DonutSieve::new(bound), &oracle()?)?.primes)
}

/// As [`count_up_to`], using the wheel-compressed array.
pub fn count_up_to_packed(bound: u64) -> Result<u64, SieveError> {
    Ok(run(&mut DonutSieve::new(bound), &oracle()?)?.count)
}

fn window_harvest(x: u64, y: u64, dx: u64, dy: u64) -> Result<Harvest, SieveError> {
    let window = Window::new(x, y, dx, dy)?;
    run(&mut WindowSieve::new(window), &oracle()?)
}

/// Primes with `a > 0` in `[x, x+dx) × [y, y+dy)`.
pub fn primes_in_window(
    x: u64,
    y: u64,
    dx: u64,
    dy: u64,
) -> Result<Vec<GaussianInteger>, SieveError> {
    Ok(window_harvest(x, y, dx, dy)?.primes)
}

/// Number of primes with `a > 0` in `[x, x+dx) × [y, y+dy)`.
pub fn count_in_window(x: u64, y: u64, dx: u64, dy: u64) -> Result<u64, SieveError> {
    Ok(window_harvest(x, y, dx, dy)?.count)
}

/// As [`primes_in_window`] on the packed array; every argument must be a
/// multiple of 10.
pub fn primes_in_window_packed(
    x: u64,
    y: u64,
    dx: u64,
    dy: u64,
) -> Result<Vec<GaussianInteger>, SieveError> {
    let mut sieve = WindowDonutSieve::new(Window::new(x, y, dx, dy)?)?;
    Ok(run(&mut sieve, &oracle()?)?.primes)
}

/// Primes with norm `<= bound` and `alpha <= arg < beta`.
pub fn primes_in_sector(
    bound: u64,
    alpha: f64,
    beta: f64,
) -> Result<Vec<GaussianInteger>, SieveError> {
    let mut sieve = SectorSieve::new(Sector::new(bound, alpha, beta)?);
    Ok(run(&mut sieve, &oracle()?)?.primes)
}

/// Number of primes with norm `<= bound` and `alpha <= arg < beta`.
pub fn count_in_sector(bound: u64, alpha: f64, beta: f64) -> Result<u64, SieveError> {
    let mut sieve = SectorSieve::new(Sector::new(bound, alpha, beta)?);
    Ok(run(&mut sieve, &oracle()?)?.count)
}
