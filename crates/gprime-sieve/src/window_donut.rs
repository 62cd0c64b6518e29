//! Wheel-compressed window sieve.

use crate::engine::SieveEngine;
use crate::grid::PackedGrid;
use crate::wheel::{MODULUS, WHEEL};
use crate::window::{CofactorBounds, Window};
use gprime_core::{isqrt, ConfigError, GaussianInteger};

/// [`WindowSieve`](crate::WindowSieve) over packed 10×10 blocks.
///
/// The window's origin and extents must be multiples of 10 so that block
/// boundaries line up with the wheel. Output matches the unpacked window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowDonutSieve {
    window: Window,
    grid: PackedGrid,
}

impl WindowDonutSieve {
    /// Validate the wheel alignment and construct the sieve.
    pub fn new(window: Window) -> Result<Self, ConfigError> {
        let m = MODULUS as u64;
        for (field, value) in [
            ("x", window.x()),
            ("y", window.y()),
            ("dx", window.dx()),
            ("dy", window.dy()),
        ] {
            if value % m != 0 {
                return Err(ConfigError::WheelMisaligned {
                    field,
                    value,
                    modulus: m,
                });
            }
        }
        Ok(Self {
            window,
            grid: PackedGrid::default(),
        })
    }

    /// The region.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The window touches the wheel primes only when it holds the origin
    /// block.
    fn holds_origin(&self) -> bool {
        self.window.x() == 0 && self.window.y() == 0
    }

    fn survivors(&self) -> impl Iterator<Item = GaussianInteger> + '_ {
        self.grid
            .survivors()
            .map(|(u, v)| self.window.global(u, v))
            .filter(|g| g.a > 0)
    }

    fn set_global(&mut self, g: GaussianInteger, flag: bool) {
        if let Some((u, v)) = self.window.local(g) {
            self.grid.put(u, v, flag);
        }
    }
}

impl SieveEngine for WindowDonutSieve {
    fn name(&self) -> &'static str {
        "window-donut"
    }

    fn seed_bound(&self) -> u64 {
        isqrt(self.window.max_norm())
    }

    fn allocate(&mut self) {
        let m = MODULUS as u64;
        self.grid = PackedGrid::rectangle(
            (self.window.dx() / m) as usize,
            (self.window.dy() / m) as usize,
        );
        self.set_global(GaussianInteger::ONE, false);
        self.set_global(GaussianInteger::I, false);
    }

    fn cross_off(&mut self, p: GaussianInteger) {
        if p.norm() <= 5 {
            return;
        }
        let bounds = CofactorBounds::new(&self.window, p);
        let (c_lo, c_hi) = bounds.c_range();
        for c in c_lo..=c_hi {
            let (d_lo, d_hi) = bounds.d_range(c);
            let mut d = d_lo;
            // every row has a coprime residue within ten steps
            while d <= d_hi && WHEEL.step(c, d) == 0 {
                d += 1;
            }
            while d <= d_hi {
                let (u, v) = bounds.local(c, d);
                let struck = self.grid.put(u, v, false);
                debug_assert!(struck, "{p} · ({c}, {d}) has no bit in the window");
                d += WHEEL.step(c, d);
            }
        }
        self.set_global(p, true);
        self.set_global(p.flip(), true);
    }

    fn harvest(&self) -> Vec<GaussianInteger> {
        let mut out: Vec<_> = self.survivors().collect();
        if self.holds_origin() {
            out.extend([
                GaussianInteger::ONE_PLUS_I,
                GaussianInteger::new(2, 1),
                GaussianInteger::new(1, 2),
            ]);
        }
        out.sort_unstable();
        out
    }

    fn count(&self) -> u64 {
        let wheel = if self.holds_origin() { 3 } else { 0 };
        wheel + self.survivors().count() as u64
    }

    fn cell_count(&self) -> usize {
        self.grid.word_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::engine::{prepare, run};
    use crate::oracle::RecursiveOracle;
    use crate::window::WindowSieve;
    use proptest::prelude::*;

    #[test]
    fn misaligned_window_is_rejected() {
        let w = Window::new(10, 20, 25, 10).unwrap();
        assert_eq!(
            WindowDonutSieve::new(w),
            Err(ConfigError::WheelMisaligned {
                field: "dx",
                value: 25,
                modulus: 10
            })
        );
        let w = Window::new(3, 0, 10, 10).unwrap();
        assert!(WindowDonutSieve::new(w).is_err());
    }

    #[test]
    fn origin_window_injects_wheel_primes() {
        let oracle = RecursiveOracle::builtin().unwrap();
        let w = Window::new(0, 0, 10, 10).unwrap();
        let h = run(&mut WindowDonutSieve::new(w).unwrap(), &oracle).unwrap();
        let plain = run(&mut WindowSieve::new(w), &oracle).unwrap();
        assert_eq!(h.primes, plain.primes);
        assert!(h.primes.contains(&GaussianInteger::new(2, 1)));
    }

    #[test]
    fn engine_contract() {
        let oracle = RecursiveOracle::builtin().unwrap();
        let w = Window::new(1000, 300, 200, 100).unwrap();
        let mut s = WindowDonutSieve::new(w).unwrap();
        prepare(&mut s, &oracle).unwrap();
        compliance::assert_harvest_deterministic(&s);
        compliance::assert_output_well_formed(&s.harvest(), w.max_norm());
        compliance::assert_cross_off_idempotent(&s, GaussianInteger::new(3, 2));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn agrees_with_plain_window(
            bx in 0u64..400,
            by in 0u64..400,
            bw in 1u64..12,
            bh in 1u64..12,
        ) {
            let oracle = RecursiveOracle::builtin().unwrap();
            let w = Window::new(bx * 10, by * 10, bw * 10, bh * 10).unwrap();
            let packed = run(&mut WindowDonutSieve::new(w).unwrap(), &oracle).unwrap();
            let plain = run(&mut WindowSieve::new(w), &oracle).unwrap();
            prop_assert_eq!(packed.primes, plain.primes);
            prop_assert_eq!(packed.count, plain.count);
        }
    }
}
