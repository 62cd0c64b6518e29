//! Trial-division reference for Gaussian primality.
//!
//! `a + bi` is prime exactly when its norm is a rational prime, or it is
//! an associate of a rational prime `p ≡ 3 (mod 4)`.

use gprime_core::GaussianInteger;

pub fn is_rational_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

pub fn is_gaussian_prime(g: GaussianInteger) -> bool {
    match (g.a.unsigned_abs(), g.b.unsigned_abs()) {
        (0, 0) => false,
        (p, 0) | (0, p) => p % 4 == 3 && is_rational_prime(p),
        _ => is_rational_prime(g.norm()),
    }
}

/// Every prime with `a > 0`, `b >= 0` and norm `<= bound`, sorted.
pub fn first_quadrant_primes(bound: u64) -> Vec<GaussianInteger> {
    let r = (bound as f64).sqrt() as i64 + 1;
    let mut out: Vec<_> = (1..=r)
        .flat_map(|a| (0..=r).map(move |b| GaussianInteger::new(a, b)))
        .filter(|g| g.norm() <= bound && is_gaussian_prime(*g))
        .collect();
    out.sort();
    out
}

/// Every prime in `[x, x+dx) × [y, y+dy)`, sorted. Includes the
/// imaginary axis when `x == 0`.
pub fn primes_in_rect(x: u64, y: u64, dx: u64, dy: u64) -> Vec<GaussianInteger> {
    let mut out: Vec<_> = (x..x + dx)
        .flat_map(|a| (y..y + dy).map(move |b| GaussianInteger::new(a as i64, b as i64)))
        .filter(|&g| is_gaussian_prime(g))
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_cases() {
        let g = GaussianInteger::new;
        assert!(is_gaussian_prime(g(1, 1)));
        assert!(is_gaussian_prime(g(3, 0)));
        assert!(is_gaussian_prime(g(0, -7)));
        assert!(!is_gaussian_prime(g(5, 0)));
        assert!(!is_gaussian_prime(g(2, 0)));
        assert!(!is_gaussian_prime(g(1, 0)));
        assert!(is_gaussian_prime(g(-2, 1)));
    }

    #[test]
    fn counts_match_known_values() {
        assert_eq!(first_quadrant_primes(100).len() * 4, 100);
        assert_eq!(first_quadrant_primes(1000).len() * 4, 668);
    }
}
