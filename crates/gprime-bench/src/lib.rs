//! Benchmark profiles for the Gaussian prime sieves and moat explorers.
//!
//! - [`reference_disk`]: full-disk bound for sieve comparisons
//! - [`reference_window`]: a wheel-aligned window far from the origin
//! - [`batch_windows`]: equal windows tiling a strip, for the worker pool
//! - [`moat_profile`] / [`streaming_profile`]: explorer configurations

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gprime_core::ConfigError;
use gprime_moat::{MoatConfig, SegmentedConfig};
use gprime_sieve::Window;

/// Norm bound of the reference full-disk sieve (~78K primes).
pub const REFERENCE_BOUND: u64 = 1_000_000;

/// Full-disk bound used by the sieve benchmarks.
pub fn reference_disk() -> u64 {
    REFERENCE_BOUND
}

/// A 500×500 window at `(10^6, 10^6)`, aligned to the mod-10 wheel.
pub fn reference_window() -> Result<Window, ConfigError> {
    Window::new(1_000_000, 1_000_000, 500, 500)
}

/// `count` windows of `width × height` side by side starting at
/// `(x, y)`.
pub fn batch_windows(
    x: u64,
    y: u64,
    width: u64,
    height: u64,
    count: u64,
) -> Result<Vec<Window>, ConfigError> {
    (0..count)
        .map(|k| Window::new(x + k * width, y, width, height))
        .collect()
}

/// Full-disk explorer for `jump` with its default bound.
pub fn moat_profile(jump: f64) -> Result<MoatConfig, ConfigError> {
    let config = MoatConfig::new(jump);
    config.validate()?;
    Ok(config)
}

/// Streaming explorer for `jump` with `block_cells` per block.
pub fn streaming_profile(jump: f64, block_cells: u64) -> Result<SegmentedConfig, ConfigError> {
    let config = SegmentedConfig::new(jump).with_block_cells(block_cells);
    config.validate()?;
    Ok(config)
}
