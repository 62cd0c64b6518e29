//! SieveEngine contract test helpers.
//!
//! These functions check the invariants every strategy promises. They are
//! reused by the test modules of each strategy.

use crate::engine::SieveEngine;
use gprime_core::GaussianInteger;
use std::collections::HashSet;
use std::fmt::Debug;

/// Two harvests with no mutation in between return the same sequence.
pub fn assert_harvest_deterministic<E: SieveEngine>(engine: &E) {
    let a = engine.harvest();
    let b = engine.harvest();
    assert_eq!(a, b, "{} harvest is non-deterministic", engine.name());
}

/// Crossing off `p` a second time leaves the array as the first call did.
pub fn assert_cross_off_idempotent<E>(engine: &E, p: GaussianInteger)
where
    E: SieveEngine + Clone + PartialEq + Debug,
{
    let mut once = engine.clone();
    once.cross_off(p);
    let mut twice = once.clone();
    twice.cross_off(p);
    assert_eq!(once, twice, "{} cross_off({p}) is not idempotent", engine.name());
}

/// Output is strictly sorted, lies in the first quadrant `a > 0, b >= 0`,
/// has norms within `bound`, and holds one member per associate class.
pub fn assert_output_well_formed(primes: &[GaussianInteger], bound: u64) {
    for w in primes.windows(2) {
        assert!(w[0] < w[1], "output not strictly sorted at {} / {}", w[0], w[1]);
    }
    let mut classes = HashSet::new();
    for &g in primes {
        assert!(g.a > 0 && g.b >= 0, "{g} is outside the first quadrant");
        assert!(g.norm() <= bound, "{g} has norm {} > {bound}", g.norm());
        assert!(
            classes.insert(g.to_first_quadrant()),
            "{g} is an associate of an earlier result"
        );
    }
}
