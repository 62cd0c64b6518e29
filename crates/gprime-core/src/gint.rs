//! The Gaussian integer value type.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A Gaussian integer `a + bi`.
///
/// Ordering is by norm first, then by real part descending, so among the
/// associates of a prime in the first quadrant the one closer to the real
/// axis sorts first: `2+i < 1+2i`. Components are expected to stay below
/// `2^31` in magnitude so that [`norm`](Self::norm) fits in a `u64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GaussianInteger {
    /// Real part.
    pub a: i64,
    /// Imaginary part.
    pub b: i64,
}

impl GaussianInteger {
    /// `0`.
    pub const ZERO: Self = Self::new(0, 0);
    /// `1`.
    pub const ONE: Self = Self::new(1, 0);
    /// `i`.
    pub const I: Self = Self::new(0, 1);
    /// `1 + i`, the ramified prime above 2.
    pub const ONE_PLUS_I: Self = Self::new(1, 1);

    /// Construct `a + bi`.
    pub const fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// `a² + b²`.
    #[inline]
    pub fn norm(self) -> u64 {
        let a = self.a.unsigned_abs();
        let b = self.b.unsigned_abs();
        a * a + b * b
    }

    /// `a² + b²`, or `None` when it does not fit in a `u64`.
    pub fn checked_norm(self) -> Option<u64> {
        let a = self.a.unsigned_abs();
        let b = self.b.unsigned_abs();
        a.checked_mul(a)?.checked_add(b.checked_mul(b)?)
    }

    /// Argument in radians, in `(-π, π]`.
    pub fn arg(self) -> f64 {
        (self.b as f64).atan2(self.a as f64)
    }

    /// Reflection across the diagonal: `(a, b) -> (b, a)`.
    ///
    /// This is `i · conj(self)`, so a prime's flip is again prime.
    #[inline]
    pub const fn flip(self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Complex conjugate.
    #[inline]
    pub const fn conj(self) -> Self {
        Self::new(self.a, -self.b)
    }

    /// Multiplication by `i`.
    #[inline]
    pub const fn mul_i(self) -> Self {
        Self::new(-self.b, self.a)
    }

    /// `true` for the four units `±1`, `±i`.
    pub fn is_unit(self) -> bool {
        self.norm() == 1
    }

    /// The associate lying in the first quadrant, `a > 0` and `b >= 0`.
    ///
    /// Zero maps to itself.
    pub fn to_first_quadrant(self) -> Self {
        let Self { a, b } = self;
        if a > 0 && b >= 0 {
            self
        } else if a <= 0 && b > 0 {
            // times -i
            Self::new(b, -a)
        } else if a < 0 && b <= 0 {
            -self
        } else if a >= 0 && b < 0 {
            self.mul_i()
        } else {
            Self::ZERO
        }
    }

    /// Canonical representative in the first octant `a >= b >= 0`.
    ///
    /// Folds both unit multiplication and conjugation, so the eight
    /// numbers `u·g` and `u·conj(g)` all map to the same point.
    pub fn to_octant(self) -> Self {
        let q = self.to_first_quadrant();
        if q.b > q.a {
            q.flip()
        } else {
            q
        }
    }

    /// `true` when `other` is a unit multiple of `self`.
    pub fn is_associate_of(self, other: Self) -> bool {
        self.to_first_quadrant() == other.to_first_quadrant()
    }
}

impl Ord for GaussianInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        self.norm()
            .cmp(&other.norm())
            .then_with(|| other.a.cmp(&self.a))
            .then_with(|| other.b.cmp(&self.b))
    }
}

impl PartialOrd for GaussianInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for GaussianInteger {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.a + rhs.a, self.b + rhs.b)
    }
}

impl Sub for GaussianInteger {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.a - rhs.a, self.b - rhs.b)
    }
}

impl Mul for GaussianInteger {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.a * rhs.a - self.b * rhs.b,
            self.a * rhs.b + self.b * rhs.a,
        )
    }
}

impl Neg for GaussianInteger {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.a, -self.b)
    }
}

impl From<(i64, i64)> for GaussianInteger {
    fn from((a, b): (i64, i64)) -> Self {
        Self::new(a, b)
    }
}

impl From<GaussianInteger> for (i64, i64) {
    fn from(g: GaussianInteger) -> Self {
        (g.a, g.b)
    }
}

impl fmt::Display for GaussianInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.b < 0 {
            write!(f, "{}-{}i", self.a, -self.b)
        } else {
            write!(f, "{}+{}i", self.a, self.b)
        }
    }
}
