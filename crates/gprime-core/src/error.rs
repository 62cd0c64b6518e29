//! Error types for the gprime workspace.
//!
//! Organized by concern: region and explorer configuration, the seed
//! prime oracle, sieve runs, and moat exploration. Lower layers convert
//! upward through `From` so `?` works across crate boundaries.

use crate::gint::GaussianInteger;
use std::error::Error;
use std::fmt;

/// Invalid parameters, rejected at construction time.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A window with zero width or height.
    EmptyWindow {
        /// Requested width.
        dx: u64,
        /// Requested height.
        dy: u64,
    },
    /// A wheel-compressed window whose origin or extent is not a
    /// multiple of the wheel modulus.
    WheelMisaligned {
        /// Which parameter is misaligned (`"x"`, `"y"`, `"dx"`, `"dy"`).
        field: &'static str,
        /// Its value.
        value: u64,
        /// The required modulus.
        modulus: u64,
    },
    /// Sector angles outside `0 <= alpha < beta <= π/4`, or not finite.
    InvalidSector {
        /// Lower angle in radians.
        alpha: f64,
        /// Upper angle in radians.
        beta: f64,
    },
    /// Jump size not finite or not positive.
    InvalidJump {
        /// The offending jump size.
        jump: f64,
    },
    /// No default region bound is known for a jump this large.
    JumpTooLarge {
        /// The offending jump size.
        jump: f64,
        /// Largest jump the default table covers (exclusive).
        max: f64,
    },
    /// A segmented search with a zero block budget.
    ZeroBlockBudget,
    /// A region whose corner norm does not fit in a `u64`.
    NormOverflow {
        /// The corner that overflowed.
        corner: GaussianInteger,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWindow { dx, dy } => write!(f, "window is empty ({dx} x {dy})"),
            Self::WheelMisaligned {
                field,
                value,
                modulus,
            } => write!(
                f,
                "window {field} = {value} is not a multiple of the wheel modulus {modulus}"
            ),
            Self::InvalidSector { alpha, beta } => write!(
                f,
                "sector [{alpha}, {beta}) must satisfy 0 <= alpha < beta <= pi/4"
            ),
            Self::InvalidJump { jump } => write!(f, "jump size {jump} must be finite and positive"),
            Self::JumpTooLarge { jump, max } => write!(
                f,
                "no default region bound for jump size {jump} (limit {max}); pass an explicit bound"
            ),
            Self::ZeroBlockBudget => write!(f, "block budget must be at least one cell"),
            Self::NormOverflow { corner } => {
                write!(f, "norm of region corner {corner} overflows u64")
            }
        }
    }
}

impl Error for ConfigError {}

/// Failures supplying seed primes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OracleError {
    /// The reference table ran out before the requested bound.
    Exhausted {
        /// Norm bound that was asked for.
        requested: u64,
        /// Largest norm the table can vouch for.
        reach: u64,
    },
    /// A growing seed table would have to pass its hard cap.
    SeedCapExceeded {
        /// Norm bound that was asked for.
        requested: u64,
        /// The cap.
        cap: u64,
    },
    /// A malformed reference table line.
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// The reference table file could not be read.
    Io {
        /// Path that was opened.
        path: String,
        /// Underlying I/O error text.
        reason: String,
    },
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { requested, reach } => write!(
                f,
                "reference table exhausted: need primes up to norm {requested}, table reaches {reach}"
            ),
            Self::SeedCapExceeded { requested, cap } => {
                write!(f, "seed table bound {requested} exceeds cap {cap}")
            }
            Self::Parse { line, reason } => {
                write!(f, "reference table line {line}: {reason}")
            }
            Self::Io { path, reason } => {
                write!(f, "cannot read reference table '{path}': {reason}")
            }
        }
    }
}

impl Error for OracleError {}

/// Errors from a sieve run.
#[derive(Clone, Debug, PartialEq)]
pub enum SieveError {
    /// Region parameters were rejected.
    Config(ConfigError),
    /// Seed primes could not be produced.
    Oracle(OracleError),
}

impl fmt::Display for SieveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid sieve region: {e}"),
            Self::Oracle(e) => write!(f, "seeding failed: {e}"),
        }
    }
}

impl Error for SieveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Oracle(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SieveError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<OracleError> for SieveError {
    fn from(e: OracleError) -> Self {
        Self::Oracle(e)
    }
}

/// Errors from moat exploration.
#[derive(Clone, Debug, PartialEq)]
pub enum MoatError {
    /// Explorer parameters were rejected.
    Config(ConfigError),
    /// Sieving the search region failed.
    Sieve(SieveError),
    /// The origin's component reached the edge of the sieved region, so
    /// finiteness could not be established inside it.
    EscapedRegion {
        /// Jump size being explored.
        jump: f64,
        /// The prime whose neighbourhood left the region.
        position: GaussianInteger,
        /// Norm bound of the region.
        bound: u64,
    },
    /// A segmented search ran past its configured real-part limit while
    /// the origin's component was still propagating.
    SearchLimit {
        /// Configured limit on the real part.
        limit: u64,
        /// Real part of the block that crossed it.
        reached: u64,
    },
    /// A vertical moat search kept punching through the right wall of its
    /// block; the starting real part is too small.
    NoVerticalMoat {
        /// Jump size being explored.
        jump: f64,
        /// Real part the search started from.
        real_part: u64,
        /// Consecutive moves to the right before giving up.
        steps_right: u32,
    },
    /// Exploration from the top of a vertical moat block came back down
    /// through its bottom edge.
    LowerWallBreached {
        /// Prime the offending exploration started from.
        start: GaussianInteger,
        /// Prime whose neighbourhood crossed the bottom edge.
        position: GaussianInteger,
    },
}

impl fmt::Display for MoatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid moat configuration: {e}"),
            Self::Sieve(e) => write!(f, "{e}"),
            Self::EscapedRegion {
                jump,
                position,
                bound,
            } => write!(
                f,
                "jump size {jump}: component left the region of norm <= {bound} at {position}"
            ),
            Self::SearchLimit { limit, reached } => write!(
                f,
                "origin component still propagating at real part {reached} (limit {limit})"
            ),
            Self::NoVerticalMoat {
                jump,
                real_part,
                steps_right,
            } => write!(
                f,
                "jump size {jump}: no vertical moat from real part {real_part} \
                 after {steps_right} steps right"
            ),
            Self::LowerWallBreached { start, position } => write!(
                f,
                "exploration from {start} crossed the bottom of its block at {position}"
            ),
        }
    }
}

impl Error for MoatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Sieve(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for MoatError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SieveError> for MoatError {
    fn from(e: SieveError) -> Self {
        Self::Sieve(e)
    }
}

impl From<OracleError> for MoatError {
    fn from(e: OracleError) -> Self {
        Self::Sieve(SieveError::Oracle(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_parameters() {
        let e = ConfigError::WheelMisaligned {
            field: "dx",
            value: 25,
            modulus: 10,
        };
        assert!(e.to_string().contains("dx = 25"));

        let e = OracleError::Exhausted {
            requested: 20_000,
            reach: 9973,
        };
        assert!(e.to_string().contains("20000"));
        assert!(e.to_string().contains("9973"));
    }

    #[test]
    fn escaped_region_reports_jump_and_position() {
        let e = MoatError::EscapedRegion {
            jump: 3.0,
            position: GaussianInteger::new(84, 41),
            bound: 5000,
        };
        let s = e.to_string();
        assert!(s.contains("jump size 3"));
        assert!(s.contains("84+41i"));
    }

    #[test]
    fn vertical_moat_failures_name_their_positions() {
        let e = MoatError::NoVerticalMoat {
            jump: 10.0,
            real_part: 100,
            steps_right: 11,
        };
        assert!(e.to_string().contains("real part 100"));
        assert!(e.source().is_none());
        let e = MoatError::LowerWallBreached {
            start: GaussianInteger::new(120, 90),
            position: GaussianInteger::new(121, 3),
        };
        assert!(e.to_string().contains("120+90i"));
        assert!(e.to_string().contains("121+3i"));
    }

    #[test]
    fn oracle_error_converts_through_layers() {
        let e: MoatError = OracleError::SeedCapExceeded {
            requested: 1,
            cap: 0,
        }
        .into();
        assert!(matches!(e, MoatError::Sieve(SieveError::Oracle(_))));
        assert!(e.source().is_some());
    }
}
