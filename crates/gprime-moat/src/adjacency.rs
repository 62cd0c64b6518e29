//! Step offsets for a jump size.

use crate::config::JUMP_TOLERANCE;
use gprime_core::{ConfigError, GaussianInteger};
use smallvec::SmallVec;
use std::f64::consts::SQRT_2;

/// Every lattice step `(u, v) != (0, 0)` no longer than a jump.
///
/// Odd Gaussian primes all have `a + b` odd, so a step between two of them
/// has `u + v` even; steps of mixed parity are left out. `1+i` is the only
/// prime of even parity and explorers seed it by hand.
#[derive(Clone, Debug)]
pub struct Adjacency {
    jump: f64,
    reach: f64,
    offsets: SmallVec<[(i64, i64); 64]>,
}

impl Adjacency {
    /// Offsets for `jump`, widened by [`JUMP_TOLERANCE`].
    pub fn new(jump: f64) -> Result<Self, ConfigError> {
        if !(jump.is_finite() && jump > 0.0) {
            return Err(ConfigError::InvalidJump { jump });
        }
        let reach = jump + JUMP_TOLERANCE;
        let r = reach.floor() as i64;
        let mut offsets = SmallVec::new();
        for u in -r..=r {
            for v in -r..=r {
                if (u, v) == (0, 0) || u.abs() % 2 != v.abs() % 2 {
                    continue;
                }
                if ((u * u + v * v) as f64) <= reach * reach {
                    offsets.push((u, v));
                }
            }
        }
        Ok(Self {
            jump,
            reach,
            offsets,
        })
    }

    /// The configured jump.
    pub fn jump(&self) -> f64 {
        self.jump
    }

    /// The jump plus tolerance.
    pub fn reach(&self) -> f64 {
        self.reach
    }

    /// All admissible steps.
    pub fn offsets(&self) -> &[(i64, i64)] {
        &self.offsets
    }

    /// `true` when `1+i` can step to `2+i`, i.e. the origin's component
    /// is not empty.
    pub fn leaves_origin(&self) -> bool {
        self.reach > SQRT_2
    }

    /// Columns shared by two consecutive blocks: `floor(reach)`, the
    /// longest horizontal step. Equals `ceil(reach - 1)` unless the reach
    /// is a whole number, where the step `(reach, 0)` would otherwise skip
    /// the seam.
    pub fn strip_width(&self) -> u64 {
        (self.reach.floor() as u64).max(1)
    }

    /// Points one step away from `g`.
    pub fn neighbours(&self, g: GaussianInteger) -> impl Iterator<Item = GaussianInteger> + '_ {
        self.offsets
            .iter()
            .map(move |&(u, v)| GaussianInteger::new(g.a + u, g.b + v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_two_has_eight_steps() {
        let adj = Adjacency::new(2.0).unwrap();
        let mut got: Vec<_> = adj.offsets().to_vec();
        got.sort_unstable();
        assert_eq!(
            got,
            vec![
                (-2, 0),
                (-1, -1),
                (-1, 1),
                (0, -2),
                (0, 2),
                (1, -1),
                (1, 1),
                (2, 0)
            ]
        );
    }

    #[test]
    fn exact_lattice_distance_is_included() {
        // √8 ≈ 2.8284 is reachable with jump 2.8284 thanks to the tolerance.
        let adj = Adjacency::new(2.8284).unwrap();
        assert!(adj.offsets().contains(&(2, 2)));
        let adj = Adjacency::new(2.82).unwrap();
        assert!(!adj.offsets().contains(&(2, 2)));
    }

    #[test]
    fn offsets_are_symmetric_and_even() {
        let adj = Adjacency::new(4.3).unwrap();
        for &(u, v) in adj.offsets() {
            assert_eq!((u + v).rem_euclid(2), 0);
            assert!(adj.offsets().contains(&(-u, -v)));
            assert!(adj.offsets().contains(&(v, u)));
        }
    }

    #[test]
    fn origin_and_strip() {
        assert!(!Adjacency::new(1.4).unwrap().leaves_origin());
        assert!(Adjacency::new(1.5).unwrap().leaves_origin());
        assert_eq!(Adjacency::new(1.5).unwrap().strip_width(), 1);
        assert_eq!(Adjacency::new(3.0).unwrap().strip_width(), 3);
        assert_eq!(Adjacency::new(4.3).unwrap().strip_width(), 4);
    }

    #[test]
    fn whole_reach_widens_the_strip() {
        // 1.999 + 1e-3 is exactly 2.0, so (2, 0) is a step
        let adj = Adjacency::new(1.999).unwrap();
        assert_eq!(adj.reach(), 2.0);
        assert!(adj.offsets().contains(&(2, 0)));
        assert_eq!(adj.strip_width(), 2);
        for &(u, _) in adj.offsets() {
            assert!(u.unsigned_abs() <= adj.strip_width());
        }
    }

    #[test]
    fn bad_jump() {
        assert!(Adjacency::new(0.0).is_err());
        assert!(Adjacency::new(f64::NAN).is_err());
    }
}
