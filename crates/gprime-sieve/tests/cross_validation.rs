//! Randomized cross-validation of every strategy against a reference.
//!
//! Window, sector and packed results restricted to a region must equal the
//! full octant sieve (or trial division) restricted to the same region.

use gprime_core::GaussianInteger;
use gprime_sieve::engine::run;
use gprime_sieve::{
    DonutSieve, OctantSieve, RecursiveOracle, Sector, SectorSieve, Window, WindowDonutSieve,
    WindowSieve,
};
use gprime_test_utils::naive;
use gprime_test_utils::regions::RegionGen;

fn oracle() -> RecursiveOracle {
    RecursiveOracle::builtin().unwrap()
}

#[test]
fn random_windows_match_trial_division() {
    let oracle = oracle();
    let mut rg = RegionGen::new(0x5eed);
    for _ in 0..40 {
        let (x, y, dx, dy) = rg.window(20_000, 40);
        let w = Window::new(x, y, dx, dy).unwrap();
        let got = run(&mut WindowSieve::new(w), &oracle).unwrap().primes;
        let expected: Vec<_> = naive::primes_in_rect(x, y, dx, dy)
            .into_iter()
            .filter(|g| g.a > 0)
            .collect();
        assert_eq!(got, expected, "window {x} {y} {dx} {dy}");
    }
}

#[test]
fn random_windows_near_the_origin_match_octant() {
    let oracle = oracle();
    let full = run(&mut OctantSieve::new(2 * 300 * 300), &oracle).unwrap().primes;
    let mut rg = RegionGen::new(17);
    for _ in 0..40 {
        let (x, y, dx, dy) = rg.window(250, 50);
        let w = Window::new(x, y, dx, dy).unwrap();
        let got = run(&mut WindowSieve::new(w), &oracle).unwrap().primes;
        let expected: Vec<GaussianInteger> =
            full.iter().copied().filter(|&g| w.contains(g)).collect();
        assert_eq!(got, expected, "window {x} {y} {dx} {dy}");
    }
}

#[test]
fn random_aligned_windows_agree_packed_and_plain() {
    let oracle = oracle();
    let mut rg = RegionGen::new(99);
    for _ in 0..25 {
        let (x, y, dx, dy) = rg.aligned_window(100_000, 150);
        let w = Window::new(x, y, dx, dy).unwrap();
        let packed = run(&mut WindowDonutSieve::new(w).unwrap(), &oracle).unwrap();
        let plain = run(&mut WindowSieve::new(w), &oracle).unwrap();
        assert_eq!(packed.primes, plain.primes, "window {x} {y} {dx} {dy}");
    }
}

#[test]
fn random_sectors_match_octant() {
    let oracle = oracle();
    let bound = 250_000;
    let full: Vec<_> = run(&mut OctantSieve::new(bound), &oracle)
        .unwrap()
        .primes
        .into_iter()
        .filter(|g| g.a > g.b)
        .collect();
    let mut rg = RegionGen::new(3);
    for _ in 0..25 {
        let (alpha, beta) = rg.sector(0.001);
        let sector = Sector::new(bound, alpha, beta).unwrap();
        let got = run(&mut SectorSieve::new(sector), &oracle).unwrap().primes;
        let expected: Vec<_> = full
            .iter()
            .copied()
            .filter(|g| {
                let (lo, hi) = sector.column(g.a as u64);
                (lo..=hi).contains(&g.b)
            })
            .collect();
        assert_eq!(got, expected, "sector [{alpha}, {beta})");
        // the tolerance never moves a point by more than a hair
        for g in &got {
            let t = g.arg();
            assert!(t >= alpha - 1e-9 && t < beta + 1e-9, "{g} at {t}");
        }
    }
}

#[test]
fn random_bounds_packed_and_plain_octant_agree() {
    let oracle = oracle();
    let mut rg = RegionGen::new(11);
    for _ in 0..15 {
        let bound = rg.bound(0, 400_000);
        let donut = run(&mut DonutSieve::new(bound), &oracle).unwrap();
        let octant = run(&mut OctantSieve::new(bound), &oracle).unwrap();
        assert_eq!(donut.primes, octant.primes, "bound {bound}");
        assert_eq!(donut.count, octant.count, "bound {bound}");
    }
}

#[test]
fn counts_are_four_times_first_quadrant_classes() {
    let oracle = oracle();
    for bound in [2, 5, 50, 999, 12_345] {
        let h = run(&mut OctantSieve::new(bound), &oracle).unwrap();
        assert_eq!(h.count, 4 * h.primes.len() as u64);
        let octant_reps = h.primes.iter().filter(|g| g.a >= g.b).count() as u64;
        let degenerate = h.primes.iter().filter(|g| g.b == 0 || g.a == g.b).count() as u64;
        assert_eq!(h.count, 8 * octant_reps - 4 * degenerate, "bound {bound}");
    }
}

#[test]
#[ignore] // slow in debug builds; run with `cargo test --release -- --ignored`
fn count_up_to_ten_million() {
    let oracle = oracle();
    let h = run(&mut DonutSieve::new(10_000_000), &oracle).unwrap();
    let o = run(&mut OctantSieve::new(10_000_000), &oracle).unwrap();
    assert_eq!(h.count, o.count);
}
