//! Wide windows covered by a sequence of narrow ones.

use crate::engine::{prepare_with_seeds, SieveEngine};
use crate::oracle::PrimeOracle;
use crate::window::{Window, WindowSieve};
use gprime_core::{isqrt, GaussianInteger, SieveError};

/// Sieve of a [`Window`] that allocates at most `segment_width` columns at
/// a time.
///
/// Seeds are fetched once for the whole window and reused by every
/// segment, so the result is identical to a single [`WindowSieve`] while
/// the live array stays `segment_width × dy`.
#[derive(Clone, Debug)]
pub struct SegmentedWindowSieve {
    window: Window,
    segment_width: u64,
}

impl SegmentedWindowSieve {
    /// Cover `window` in segments of `segment_width` columns (at least 1).
    pub fn new(window: Window, segment_width: u64) -> Self {
        Self {
            window,
            segment_width: segment_width.max(1),
        }
    }

    /// The full region.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Sieve each segment in turn and hand it to `visit`, left to right.
    pub fn for_each_segment<F>(
        &self,
        oracle: &dyn PrimeOracle,
        mut visit: F,
    ) -> Result<(), SieveError>
    where
        F: FnMut(&WindowSieve),
    {
        let seeds = oracle.primes_up_to(isqrt(self.window.max_norm()))?;
        for part in self.window.columns(self.segment_width) {
            let mut sieve = WindowSieve::new(part);
            prepare_with_seeds(&mut sieve, &seeds);
            visit(&sieve);
        }
        Ok(())
    }

    /// All primes in the window, sorted.
    pub fn harvest(&self, oracle: &dyn PrimeOracle) -> Result<Vec<GaussianInteger>, SieveError> {
        let mut out = Vec::new();
        self.for_each_segment(oracle, |s| out.extend(s.harvest()))?;
        out.sort_unstable();
        Ok(out)
    }

    /// Number of primes in the window.
    pub fn count(&self, oracle: &dyn PrimeOracle) -> Result<u64, SieveError> {
        let mut total = 0;
        self.for_each_segment(oracle, |s| total += s.count())?;
        Ok(total)
    }
}
