//! Rectangular window regions and their sieve.

use crate::engine::SieveEngine;
use crate::grid::FlagGrid;
use gprime_core::{ceil_div, floor_div, isqrt, ConfigError, GaussianInteger};

/// The half-open rectangle `[x, x+dx) × [y, y+dy)` in the first quadrant.
///
/// Validated at construction: non-empty, and the far corner's norm must
/// fit in a `u64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    x: u64,
    y: u64,
    dx: u64,
    dy: u64,
}

impl Window {
    /// Largest coordinate a window may reach, keeping every product in the
    /// cross-off sweep inside `i64`.
    pub const MAX_COORD: u64 = 1 << 31;

    /// Validate and construct a window.
    pub fn new(x: u64, y: u64, dx: u64, dy: u64) -> Result<Self, ConfigError> {
        if dx == 0 || dy == 0 {
            return Err(ConfigError::EmptyWindow { dx, dy });
        }
        let corner = GaussianInteger::new(
            x.saturating_add(dx - 1).min(i64::MAX as u64) as i64,
            y.saturating_add(dy - 1).min(i64::MAX as u64) as i64,
        );
        if corner.a as u64 >= Self::MAX_COORD || corner.b as u64 >= Self::MAX_COORD {
            return Err(ConfigError::NormOverflow { corner });
        }
        Ok(Self { x, y, dx, dy })
    }

    /// Real part of the lower-left corner.
    pub fn x(&self) -> u64 {
        self.x
    }

    /// Imaginary part of the lower-left corner.
    pub fn y(&self) -> u64 {
        self.y
    }

    /// Width.
    pub fn dx(&self) -> u64 {
        self.dx
    }

    /// Height.
    pub fn dy(&self) -> u64 {
        self.dy
    }

    /// The corner farthest from the origin, `(x+dx-1, y+dy-1)`.
    pub fn far_corner(&self) -> GaussianInteger {
        GaussianInteger::new((self.x + self.dx - 1) as i64, (self.y + self.dy - 1) as i64)
    }

    /// Largest norm of any point in the window.
    pub fn max_norm(&self) -> u64 {
        self.far_corner().norm()
    }

    /// `true` when `g` lies inside the window.
    pub fn contains(&self, g: GaussianInteger) -> bool {
        self.local(g).is_some()
    }

    /// Window-local coordinates of `g`, if inside.
    pub fn local(&self, g: GaussianInteger) -> Option<(i64, i64)> {
        let u = g.a - self.x as i64;
        let v = g.b - self.y as i64;
        ((0..self.dx as i64).contains(&u) && (0..self.dy as i64).contains(&v)).then_some((u, v))
    }

    /// Global point for window-local coordinates.
    pub fn global(&self, u: i64, v: i64) -> GaussianInteger {
        GaussianInteger::new(self.x as i64 + u, self.y as i64 + v)
    }

    /// Sub-windows of at most `width` columns covering this one left to
    /// right.
    pub fn columns(&self, width: u64) -> impl Iterator<Item = Window> + '_ {
        let width = width.max(1);
        (0..self.dx.div_ceil(width)).map(move |k| {
            let x = self.x + k * width;
            Window {
                x,
                y: self.y,
                dx: width.min(self.x + self.dx - x),
                dy: self.dy,
            }
        })
    }
}

/// Cofactor ranges whose products with a seed prime land in a window.
///
/// Each bound is an exact floor or ceiling of a rational expression, so
/// no product falls outside the window and none inside it is missed.
/// Degenerate ranges (`hi < lo`) are simply empty.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CofactorBounds {
    a: i64,
    b: i64,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl CofactorBounds {
    pub(crate) fn new(w: &Window, p: GaussianInteger) -> Self {
        debug_assert!(p.a > 0 && p.b >= 0, "{p} is not a first-quadrant prime");
        let far = w.far_corner();
        Self {
            a: p.a,
            b: p.b,
            x0: w.x as i64,
            y0: w.y as i64,
            x1: far.a,
            y1: far.b,
        }
    }

    /// Inclusive range of `c`.
    pub(crate) fn c_range(&self) -> (i64, i64) {
        let Self { a, b, x0, y0, x1, y1 } = *self;
        if b == 0 {
            (ceil_div(x0, a), floor_div(x1, a))
        } else {
            let n = a * a + b * b;
            (ceil_div(a * x0 + b * y0, n), floor_div(a * x1 + b * y1, n))
        }
    }

    /// Inclusive range of `d` for a given `c`.
    pub(crate) fn d_range(&self, c: i64) -> (i64, i64) {
        let Self { a, b, x0, y0, x1, y1 } = *self;
        if b == 0 {
            (ceil_div(y0, a), floor_div(y1, a))
        } else {
            let lo = ceil_div(a * c - x1, b).max(ceil_div(y0 - b * c, a));
            let hi = floor_div(a * c - x0, b).min(floor_div(y1 - b * c, a));
            (lo, hi)
        }
    }

    /// Window-local coordinates of `p · (c + di)`.
    #[inline]
    pub(crate) fn local(&self, c: i64, d: i64) -> (i64, i64) {
        (
            self.a * c - self.b * d - self.x0,
            self.b * c + self.a * d - self.y0,
        )
    }
}

/// Sieve of the Gaussian primes inside a [`Window`].
///
/// Seeds come from a full sieve up to the square root of the far corner's
/// norm, never filtered to the window. Output is every surviving point
/// with `a > 0`; the imaginary axis only holds associates of real-axis
/// primes and is left out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSieve {
    window: Window,
    grid: FlagGrid,
}

impl WindowSieve {
    /// Sieve over `window`.
    pub fn new(window: Window) -> Self {
        Self {
            window,
            grid: FlagGrid::default(),
        }
    }

    /// The region.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// `true` when the window-local cell `(u, v)` is still surviving.
    pub fn is_alive_local(&self, u: i64, v: i64) -> bool {
        self.grid.is_set(u, v)
    }

    /// Consume the window-local cell `(u, v)`, returning whether it was
    /// surviving.
    pub fn claim_local(&mut self, u: i64, v: i64) -> bool {
        self.grid.take(u, v)
    }

    /// `true` when the global point `g` is in the window and surviving.
    pub fn is_alive(&self, g: GaussianInteger) -> bool {
        self.window
            .local(g)
            .is_some_and(|(u, v)| self.grid.is_set(u, v))
    }

    /// Consume the global point `g`, returning whether it was surviving.
    pub fn claim(&mut self, g: GaussianInteger) -> bool {
        match self.window.local(g) {
            Some((u, v)) => self.grid.take(u, v),
            None => false,
        }
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

impl SieveEngine for WindowSieve {
    fn name(&self) -> &'static str {
        "window"
    }

    fn seed_bound(&self) -> u64 {
        isqrt(self.window.max_norm())
    }

    fn allocate(&mut self) {
        self.grid = FlagGrid::rectangle(self.window.dx as usize, self.window.dy as usize);
        for g in [GaussianInteger::ZERO, GaussianInteger::ONE, GaussianInteger::I] {
            self.set_global(g, false);
        }
    }

    fn cross_off(&mut self, p: GaussianInteger) {
        let bounds = CofactorBounds::new(&self.window, p);
        let (c_lo, c_hi) = bounds.c_range();
        for c in c_lo..=c_hi {
            let (d_lo, d_hi) = bounds.d_range(c);
            for d in d_lo..=d_hi {
                let (u, v) = bounds.local(c, d);
                let struck = self.grid.put(u, v, false);
                debug_assert!(struck, "{p} · ({c}, {d}) fell outside the window");
            }
        }
        self.set_global(p, true);
        self.set_global(p.flip(), true);
    }

    fn harvest(&self) -> Vec<GaussianInteger> {
        let mut out: Vec<_> = self.survivors().collect();
        out.sort_unstable();
        out
    }

    fn count(&self) -> u64 {
        self.survivors().count() as u64
    }

    fn cell_count(&self) -> usize {
        self.grid.cell_count()
    }
}
