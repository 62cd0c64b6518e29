//! A seed prime table that grows on demand.

use crate::oracle::{PrimeOracle, RecursiveOracle};
use gprime_core::{GaussianInteger, OracleError};

/// Seed primes shared by a sequence of sieves whose regions keep growing.
///
/// [`ensure`](Self::ensure) doubles the table's bound until it covers a
/// request and recomputes the list from the oracle. Growth stops at a
/// hard cap; past it the request fails with
/// [`OracleError::SeedCapExceeded`].
#[derive(Clone, Debug)]
pub struct SeedTable<O = RecursiveOracle> {
    oracle: O,
    bound: u64,
    cap: u64,
    primes: Vec<GaussianInteger>,
    grown: u32,
}

impl<O: PrimeOracle> SeedTable<O> {
    /// Default cap on the table's norm bound.
    pub const DEFAULT_CAP: u64 = 1 << 62;

    /// Table holding every prime up to `initial_bound`.
    pub fn new(oracle: O, initial_bound: u64) -> Result<Self, OracleError> {
        Self::with_cap(oracle, initial_bound, Self::DEFAULT_CAP)
    }

    /// As [`new`](Self::new) with an explicit cap.
    pub fn with_cap(oracle: O, initial_bound: u64, cap: u64) -> Result<Self, OracleError> {
        if initial_bound > cap {
            return Err(OracleError::SeedCapExceeded {
                requested: initial_bound,
                cap,
            });
        }
        let primes = oracle.primes_up_to(initial_bound)?;
        Ok(Self {
            oracle,
            bound: initial_bound,
            cap,
            primes,
            grown: 0,
        })
    }

    /// Current norm bound.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Number of times the table has been regrown.
    pub fn times_grown(&self) -> u32 {
        self.grown
    }

    /// Every prime in the table.
    pub fn primes(&self) -> &[GaussianInteger] {
        &self.primes
    }

    /// Grow the table until it covers `bound`, then return the primes up
    /// to `bound`.
    pub fn ensure(&mut self, bound: u64) -> Result<&[GaussianInteger], OracleError> {
        if bound > self.bound {
            if bound > self.cap {
                return Err(OracleError::SeedCapExceeded {
                    requested: bound,
                    cap: self.cap,
                });
            }
            let mut next = self.bound.max(1);
            while next < bound {
                next = next.saturating_mul(2).min(self.cap);
            }
            tracing::warn!(from = self.bound, to = next, "growing seed table");
            self.primes = self.oracle.primes_up_to(next)?;
            self.bound = next;
            self.grown += 1;
        }
        Ok(self.up_to(bound))
    }

    /// Prefix of the table with norm `<= bound`, without growing.
    pub fn up_to(&self, bound: u64) -> &[GaussianInteger] {
        let end = self.primes.partition_point(|g| g.norm() <= bound);
        &self.primes[..end]
    }
}

impl<O: PrimeOracle> PrimeOracle for SeedTable<O> {
    fn primes_up_to(&self, bound: u64) -> Result<Vec<GaussianInteger>, OracleError> {
        if bound > self.bound {
            return Err(OracleError::Exhausted {
                requested: bound,
                reach: self.bound,
            });
        }
        Ok(self.up_to(bound).to_vec())
    }

    fn reach(&self) -> Option<u64> {
        Some(self.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(initial: u64) -> SeedTable {
        SeedTable::new(RecursiveOracle::builtin().unwrap(), initial).unwrap()
    }

    #[test]
    fn ensure_within_bound_does_not_grow() {
        let mut t = table(10_000);
        assert_eq!(t.ensure(100).unwrap().len(), 25);
        assert_eq!(t.times_grown(), 0);
        assert_eq!(t.bound(), 10_000);
    }

    #[test]
    fn ensure_doubles_until_covered() {
        let mut t = table(10_000);
        let seeds = t.ensure(50_000).unwrap().to_vec();
        assert!(seeds.iter().all(|g| g.norm() <= 50_000));
        assert_eq!(t.bound(), 80_000);
        assert_eq!(t.times_grown(), 1);
        assert!(t.primes().last().unwrap().norm() > 50_000);
        assert_eq!(seeds.len(), t.up_to(50_000).len());
    }

    #[test]
    fn growth_stops_at_the_cap() {
        let mut t = SeedTable::with_cap(RecursiveOracle::builtin().unwrap(), 1000, 3000).unwrap();
        let n = t.ensure(2500).unwrap().len();
        assert_eq!(n, t.up_to(2500).len());
        assert_eq!(t.bound(), 3000);
        assert_eq!(
            t.ensure(3001),
            Err(OracleError::SeedCapExceeded {
                requested: 3001,
                cap: 3000
            })
        );
    }

    #[test]
    fn answers_as_an_oracle_within_its_bound() {
        let t = table(1000);
        assert_eq!(t.primes_up_to(1000).unwrap().len() * 4, 668);
        assert!(matches!(
            t.primes_up_to(1001),
            Err(OracleError::Exhausted { .. })
        ));
    }
}
