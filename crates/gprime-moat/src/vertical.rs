//! Search for a vertical moat crossing the octant.
//!
//! A vertical moat at real part `x` is a wall, no prime of which lies
//! within one jump of the other side, running from the real axis up to the
//! diagonal. Finding one to the right of a component proves the component
//! finite without ever exploring it.
//!
//! The search stacks blocks `[x, x + dx) × [y, y + dy)` upwards:
//!
//! 1. Flood every prime within one jump of the block's left wall. If a
//!    flood comes within one jump of the right wall, the wall is not here:
//!    the block moves right by its width.
//! 2. Otherwise flood every prime within one jump of the top wall. The
//!    lowest prime of those floods that comes within one jump of the right
//!    wall marks where the next block starts, so that paths leaving through
//!    the top are picked up again.
//! 3. Stop once the block's lower edge passes the diagonal.
//!
//! Narrow left-wall floods shrink the next block; punching through the
//! right wall widens it again.

use crate::adjacency::Adjacency;
use crate::config::VerticalMoatConfig;
use gprime_core::{GaussianInteger, MoatError};
use gprime_sieve::engine::prepare_with_seeds;
use gprime_sieve::{PrimeOracle, RecursiveOracle, SeedTable, SieveEngine, Window, WindowSieve};

/// What one block of a vertical moat search did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerticalBlockReport {
    /// Lower-left corner of the block.
    pub corner: (u64, u64),
    /// Block width.
    pub dx: u64,
    /// Block height.
    pub dy: u64,
    /// Whether a left-wall flood reached the right wall.
    pub punched_right: bool,
    /// Primes visited in the block.
    pub visited: u64,
    /// Rightmost block-local column reached from the left wall.
    pub farthest_right: u64,
    /// Lower-left corner of the next block.
    pub next: (u64, u64),
}

/// Result of a successful vertical moat search.
#[derive(Clone, Debug, PartialEq)]
pub struct VerticalMoatOutcome {
    /// Jump size searched.
    pub jump: f64,
    /// Configured starting real part.
    pub start_real_part: u64,
    /// Real part of the left wall of the final column of blocks.
    pub moat_real_part: u64,
    /// Blocks sieved.
    pub blocks: u64,
    /// Total moves to the right.
    pub steps_right: u32,
    /// Primes visited across all blocks.
    pub visited: u64,
    /// Norm bound the seed table grew to.
    pub seed_bound: u64,
}

/// Block-by-block search for a vertical moat.
#[derive(Debug)]
pub struct VerticalMoatSearch<O = RecursiveOracle> {
    adjacency: Adjacency,
    seeds: SeedTable<O>,
    config: VerticalMoatConfig,
    x: u64,
    y: u64,
    dx: u64,
    dy: u64,
    consecutive_right: u32,
    steps_right: u32,
    blocks: u64,
    visited: u64,
}

impl VerticalMoatSearch<RecursiveOracle> {
    /// Search seeded from the built-in table.
    pub fn new(config: VerticalMoatConfig) -> Result<Self, MoatError> {
        Self::with_oracle(config, RecursiveOracle::builtin()?)
    }
}

impl<O: PrimeOracle> VerticalMoatSearch<O> {
    /// Search seeded from `oracle`.
    pub fn with_oracle(config: VerticalMoatConfig, oracle: O) -> Result<Self, MoatError> {
        config.validate()?;
        let adjacency = Adjacency::new(config.jump)?;
        let seeds = SeedTable::new(oracle, config.initial_seed_bound)?;
        let dx = config.max_width;
        Ok(Self {
            adjacency,
            seeds,
            x: config.real_part,
            y: 0,
            dx,
            dy: config.block_cells / dx,
            config,
            consecutive_right: 0,
            steps_right: 0,
            blocks: 0,
            visited: 0,
        })
    }

    /// Lower-left corner of the next block.
    pub fn position(&self) -> (u64, u64) {
        (self.x, self.y)
    }

    /// `true` once the blocks have climbed past the diagonal.
    pub fn is_finished(&self) -> bool {
        self.y >= self.x
    }

    /// Summary so far; final once [`is_finished`](Self::is_finished).
    pub fn outcome(&self) -> VerticalMoatOutcome {
        VerticalMoatOutcome {
            jump: self.config.jump,
            start_real_part: self.config.real_part,
            moat_real_part: self.x,
            blocks: self.blocks,
            steps_right: self.steps_right,
            visited: self.visited,
            seed_bound: self.seeds.bound(),
        }
    }

    /// Narrowest block worth searching.
    fn min_width(&self) -> u64 {
        4 * self.adjacency.strip_width()
    }

    fn set_width(&mut self, dx: u64) {
        self.dx = dx.clamp(self.min_width().min(self.config.max_width), self.config.max_width);
        self.dy = (self.config.block_cells / self.dx).max(1);
    }

    /// Sieve and search the next block. `None` once finished.
    pub fn step(&mut self) -> Result<Option<VerticalBlockReport>, MoatError> {
        if self.is_finished() {
            return Ok(None);
        }
        let (x, y, dx, dy) = (self.x, self.y, self.dx, self.dy);
        let mut sieve = WindowSieve::new(Window::new(x, y, dx, dy)?);
        let seeds = self.seeds.ensure(sieve.seed_bound())?;
        prepare_with_seeds(&mut sieve, seeds);

        let mut block = WallBlock {
            adjacency: &self.adjacency,
            sieve,
            dx: dx as i64,
            dy: dy as i64,
            visited: 0,
            farthest_right: 0,
            top_punch: dy as i64,
        };
        let punched_right = block.explore_left_wall();
        if !punched_right {
            block.explore_top_wall()?;
        }
        let WallBlock {
            visited,
            farthest_right,
            top_punch,
            ..
        } = block;

        let next = if punched_right {
            self.consecutive_right += 1;
            self.steps_right += 1;
            self.set_width(dx.saturating_mul(2));
            (x + dx, y)
        } else {
            self.consecutive_right = 0;
            if farthest_right < dx / 2 {
                self.set_width(2 * farthest_right);
            }
            (x, y + top_punch as u64)
        };
        self.blocks += 1;
        self.visited += visited;

        let report = VerticalBlockReport {
            corner: (x, y),
            dx,
            dy,
            punched_right,
            visited,
            farthest_right,
            next,
        };
        tracing::debug!(
            x,
            y,
            dx,
            dy,
            punched_right,
            visited,
            "vertical moat block searched"
        );
        if self.consecutive_right > self.config.max_steps_right {
            return Err(MoatError::NoVerticalMoat {
                jump: self.config.jump,
                real_part: self.config.real_part,
                steps_right: self.consecutive_right,
            });
        }
        (self.x, self.y) = next;
        if self.is_finished() {
            tracing::info!(
                jump = self.config.jump,
                real_part = self.x,
                blocks = self.blocks,
                "vertical moat found"
            );
        }
        Ok(Some(report))
    }

    /// Step until the moat is found or the search gives up.
    pub fn run(&mut self) -> Result<VerticalMoatOutcome, MoatError> {
        while self.step()?.is_some() {}
        Ok(self.outcome())
    }
}

/// Borrowed state for searching one block, in block-local coordinates.
struct WallBlock<'a> {
    adjacency: &'a Adjacency,
    sieve: WindowSieve,
    dx: i64,
    dy: i64,
    visited: u64,
    farthest_right: u64,
    top_punch: i64,
}

impl WallBlock<'_> {
    /// Columns or rows within one jump of a wall.
    fn wall_depth(&self) -> i64 {
        self.adjacency.reach().ceil() as i64
    }

    fn global(&self, u: i64, v: i64) -> GaussianInteger {
        self.sieve.window().global(u, v)
    }

    /// `true` as soon as a flood gets within one jump of the right wall.
    fn explore_left_wall(&mut self) -> bool {
        for u in 0..self.wall_depth().min(self.dx) {
            for v in 0..self.dy {
                if self.sieve.claim_local(u, v) && self.flood_from_left(u, v) {
                    return true;
                }
            }
        }
        false
    }

    fn flood_from_left(&mut self, u: i64, v: i64) -> bool {
        let mut stack = vec![(u, v)];
        while let Some((a, b)) = stack.pop() {
            self.visited += 1;
            for &(du, dv) in self.adjacency.offsets() {
                let (na, nb) = (a + du, b + dv);
                if na >= self.dx {
                    tracing::trace!(
                        start = %self.global(u, v),
                        at = %self.global(a, b),
                        "right wall reached"
                    );
                    return true;
                }
                if na >= 0 && nb >= 0 && nb < self.dy && self.sieve.claim_local(na, nb) {
                    self.farthest_right = self.farthest_right.max(na as u64);
                    stack.push((na, nb));
                }
            }
        }
        false
    }

    fn explore_top_wall(&mut self) -> Result<(), MoatError> {
        let lowest = (self.dy - self.wall_depth()).max(0);
        for v in (lowest..self.dy).rev() {
            for u in 0..self.dx {
                if self.sieve.claim_local(u, v) {
                    self.flood_from_top(u, v)?;
                }
            }
        }
        Ok(())
    }

    fn flood_from_top(&mut self, u: i64, v: i64) -> Result<(), MoatError> {
        let mut stack = vec![(u, v)];
        while let Some((a, b)) = stack.pop() {
            self.visited += 1;
            for &(du, dv) in self.adjacency.offsets() {
                let (na, nb) = (a + du, b + dv);
                if na >= self.dx {
                    self.top_punch = self.top_punch.min(b);
                }
                if nb < 0 {
                    return Err(MoatError::LowerWallBreached {
                        start: self.global(u, v),
                        position: self.global(a, b),
                    });
                }
                let inside = (0..self.dx).contains(&na) && nb < self.dy;
                if inside && self.sieve.claim_local(na, nb) {
                    stack.push((na, nb));
                }
            }
        }
        Ok(())
    }
}
