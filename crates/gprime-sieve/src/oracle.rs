//! Seed prime supply.
//!
//! Every sieve needs the primes up to the square root of its region's
//! largest norm. [`RecursiveOracle`] produces them by running a smaller
//! [`OctantSieve`] that is itself seeded from the same oracle, bottoming
//! out in a [`ReferenceTable`] of small primes injected at construction.

use crate::engine::{prepare_with_seeds, SieveEngine};
use crate::octant::OctantSieve;
use gprime_core::{isqrt, GaussianInteger, OracleError};
use std::path::Path;

/// Source of first-quadrant Gaussian primes.
pub trait PrimeOracle {
    /// Every prime `a + bi` with `a > 0`, `b >= 0` and norm `<= bound`,
    /// sorted by the [`GaussianInteger`] order.
    fn primes_up_to(&self, bound: u64) -> Result<Vec<GaussianInteger>, OracleError>;

    /// Largest bound this oracle can answer, or `None` when unlimited.
    fn reach(&self) -> Option<u64>;
}

/// Text of the reference table compiled into the crate.
const BUILTIN_TABLE: &str = include_str!("../data/small_primes.txt");

/// A precomputed, sorted list of small primes.
///
/// The table is complete up to the norm of its last entry. Asking for more
/// is [`OracleError::Exhausted`]; the table never guesses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    primes: Vec<GaussianInteger>,
}

impl ReferenceTable {
    /// The table shipped with the crate (norms up to 10 000).
    pub fn builtin() -> Result<Self, OracleError> {
        Self::parse(BUILTIN_TABLE)
    }

    /// Read a table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| OracleError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&text)
    }

    /// Parse `a b` pairs, one per line. Blank lines and lines starting
    /// with `#` are skipped. Entries must be first-quadrant and strictly
    /// increasing in the [`GaussianInteger`] order.
    pub fn parse(text: &str) -> Result<Self, OracleError> {
        let mut primes: Vec<GaussianInteger> = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let err = |reason: String| OracleError::Parse { line: i + 1, reason };
            let mut fields = line.split_whitespace();
            let mut next = |name: &str| -> Result<i64, OracleError> {
                fields
                    .next()
                    .ok_or_else(|| err(format!("missing {name}")))?
                    .parse()
                    .map_err(|e| err(format!("bad {name}: {e}")))
            };
            let g = GaussianInteger::new(next("real part")?, next("imaginary part")?);
            if fields.next().is_some() {
                return Err(err("trailing fields".into()));
            }
            if g.a <= 0 || g.b < 0 {
                return Err(err(format!("{g} is not in the first quadrant")));
            }
            if primes.last().is_some_and(|&last| last >= g) {
                return Err(err(format!("{g} is out of order")));
            }
            primes.push(g);
        }
        Ok(Self { primes })
    }

    /// The entries.
    pub fn primes(&self) -> &[GaussianInteger] {
        &self.primes
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    /// `true` when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Norm of the last entry.
    pub fn max_norm(&self) -> u64 {
        self.primes.last().map_or(0, |g| g.norm())
    }
}

impl PrimeOracle for ReferenceTable {
    fn primes_up_to(&self, bound: u64) -> Result<Vec<GaussianInteger>, OracleError> {
        // nothing has norm below 2, so an empty answer is always right there
        if bound >= 2 && bound > self.max_norm() {
            return Err(OracleError::Exhausted {
                requested: bound,
                reach: self.max_norm(),
            });
        }
        let end = self.primes.partition_point(|g| g.norm() <= bound);
        Ok(self.primes[..end].to_vec())
    }

    fn reach(&self) -> Option<u64> {
        Some(self.max_norm())
    }
}

/// Answers from its base table when it can, otherwise sieves.
///
/// A request for bound `n` beyond the base's reach runs an
/// [`OctantSieve`] over `n`, whose seeds (up to `isqrt(n)`) are again
/// requested from this oracle. Each level takes a square root, so the
/// recursion reaches the base table after a few steps.
#[derive(Clone, Debug)]
pub struct RecursiveOracle<B = ReferenceTable> {
    base: B,
}

impl RecursiveOracle<ReferenceTable> {
    /// Recursion over the built-in reference table.
    pub fn builtin() -> Result<Self, OracleError> {
        Ok(Self::new(ReferenceTable::builtin()?))
    }
}

impl<B: PrimeOracle> RecursiveOracle<B> {
    /// Recursion bottoming out in `base`.
    pub fn new(base: B) -> Self {
        Self { base }
    }

    /// The injected base case.
    pub fn base(&self) -> &B {
        &self.base
    }
}

impl<B: PrimeOracle> PrimeOracle for RecursiveOracle<B> {
    fn primes_up_to(&self, bound: u64) -> Result<Vec<GaussianInteger>, OracleError> {
        match self.base.reach() {
            Some(reach) if bound > reach && bound >= 2 => {
                let seeds = self.primes_up_to(isqrt(bound))?;
                let mut sieve = OctantSieve::new(bound);
                prepare_with_seeds(&mut sieve, &seeds);
                tracing::trace!(bound, seeds = seeds.len(), "seed primes sieved");
                Ok(sieve.harvest())
            }
            _ => self.base.primes_up_to(bound),
        }
    }

    fn reach(&self) -> Option<u64> {
        None
    }
}
