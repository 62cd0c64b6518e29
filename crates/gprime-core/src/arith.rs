//! Exact integer helpers shared by every sieve strategy.
//!
//! Loop bounds in the cross-off sweeps are solutions of linear and
//! quadratic inequalities over the integers. Computing them through
//! floating point drifts at large norms, so everything here is exact.

/// Integer square root: the largest `r` with `r * r <= n`.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    n.isqrt()
}

/// `floor(n / d)` for a strictly positive divisor.
///
/// Unlike `/`, which truncates toward zero, this rounds toward negative
/// infinity for negative numerators.
#[inline]
pub fn floor_div(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0, "floor_div requires a positive divisor, got {d}");
    n.div_euclid(d)
}

/// `ceil(n / d)` for a strictly positive divisor.
#[inline]
pub fn ceil_div(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0, "ceil_div requires a positive divisor, got {d}");
    -(-n).div_euclid(d)
}

/// Residue of `n` modulo `m` in `0..m`, whatever the sign of `n`.
#[inline]
pub fn positive_mod(n: i64, m: i64) -> i64 {
    debug_assert!(m > 0, "positive_mod requires a positive modulus, got {m}");
    n.rem_euclid(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn isqrt_small_values() {
        let expected = [0, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3];
        for (n, &r) in expected.iter().enumerate() {
            assert_eq!(isqrt(n as u64), r, "isqrt({n})");
        }
    }

    #[test]
    fn isqrt_near_u64_max() {
        let r = isqrt(u64::MAX);
        assert_eq!(r, u32::MAX as u64);
        assert_eq!(isqrt((1u64 << 62) - 1), (1u64 << 31) - 1);
    }

    #[test]
    fn floor_and_ceil_with_negative_numerators() {
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(ceil_div(-7, 2), -3);
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(ceil_div(7, 2), 4);
        assert_eq!(floor_div(-6, 3), -2);
        assert_eq!(ceil_div(-6, 3), -2);
        assert_eq!(ceil_div(0, 5), 0);
    }

    #[test]
    fn positive_mod_wraps_negatives() {
        assert_eq!(positive_mod(-1, 10), 9);
        assert_eq!(positive_mod(-10, 10), 0);
        assert_eq!(positive_mod(23, 10), 3);
    }

    proptest! {
        #[test]
        fn isqrt_is_tight(n in 0u64..(1u64 << 50)) {
            let r = isqrt(n);
            prop_assert!(r * r <= n);
            prop_assert!((r + 1) * (r + 1) > n);
        }

        #[test]
        fn floor_ceil_bracket_the_quotient(n in -1_000_000i64..1_000_000, d in 1i64..1000) {
            let lo = floor_div(n, d);
            let hi = ceil_div(n, d);
            prop_assert!(lo * d <= n && n < (lo + 1) * d);
            prop_assert!((hi - 1) * d < n && n <= hi * d);
            prop_assert!(hi - lo <= 1);
        }

        #[test]
        fn positive_mod_in_range(n in any::<i32>(), m in 1i64..100) {
            let r = positive_mod(n as i64, m);
            prop_assert!((0..m).contains(&r));
            prop_assert_eq!((n as i64 - r) % m, 0);
        }
    }
}
