//! Per-run metrics for the sieve driver.
//!
//! [`SieveMetrics`] captures what one seed → allocate → sweep pass cost,
//! so callers such as the segmented moat can report per-block numbers.

/// Timing and sizing data collected during one sieve run.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SieveMetrics {
    /// Name of the strategy that ran.
    pub engine: &'static str,
    /// Number of seed primes crossed off.
    pub seed_primes: usize,
    /// Number of cells (or packed words) allocated.
    pub cells: usize,
    /// Time spent obtaining seed primes, in microseconds.
    pub seed_us: u64,
    /// Time spent allocating the array, in microseconds.
    pub allocate_us: u64,
    /// Time spent crossing off multiples, in microseconds.
    pub sweep_us: u64,
}

impl SieveMetrics {
    /// Sum of the phase timings.
    pub fn total_us(&self) -> u64 {
        self.seed_us + self.allocate_us + self.sweep_us
    }
}
