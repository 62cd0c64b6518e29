//! Streaming exploration of the origin's component.
//!
//! The octant is cut into vertical blocks `[x, x + dx) × [0, x + dx)`, each
//! holding about the configured number of cells, and sieved one at a time.
//! Block `k + 1` overlaps block `k` by a strip of `floor(jump + 1e-3)` columns;
//! the component ids written into that strip are all that crosses the
//! seam. Within a block:
//!
//! 1. components arriving through the left strip are flooded in ascending
//!    id order, absorbing any higher id they run into,
//! 2. components that failed to reach the right strip are freed; if that
//!    includes the origin's, the search is over,
//! 3. every unclaimed prime in the right strip starts a new component, so
//!    that the next block sees every prime of the seam labelled.
//!
//! Primes are counted the first time they are reached outside the left
//! strip, which the previous block already counted.

use crate::adjacency::Adjacency;
use crate::boundary::BoundaryStrip;
use crate::config::SegmentedConfig;
use crate::ledger::{ComponentId, ComponentLedger};
use gprime_core::{ConfigError, GaussianInteger, MoatError};
use gprime_sieve::engine::prepare_with_seeds;
use gprime_sieve::{
    PrimeOracle, RecursiveOracle, SeedTable, SieveEngine, SieveMetrics, Window, WindowSieve,
};

/// What one block did.
#[derive(Clone, Debug)]
pub struct BlockReport {
    /// Zero-based block number.
    pub index: u64,
    /// First real part of the block.
    pub x: u64,
    /// Block width.
    pub dx: u64,
    /// Block height (`x + dx`).
    pub dy: u64,
    /// Origin component size after the block.
    pub origin_size: u64,
    /// Whether the origin's component reached the right strip.
    pub origin_propagated: bool,
    /// Live components (origin included) handed to the next block.
    pub live_components: usize,
    /// Components absorbed into lower ids during the block.
    pub merges: u64,
    /// Primes recorded in the right strip.
    pub seam_cells: usize,
    /// Sieve cost of the block.
    pub sieve: SieveMetrics,
}

/// Result of a completed streaming search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentedOutcome {
    /// Primes in the origin's component, `1+i` included.
    pub component_size: u64,
    /// Member of largest norm.
    pub farthest: Option<GaussianInteger>,
    /// Blocks sieved.
    pub blocks: u64,
    /// Real part just past the last block.
    pub explored_real_part: u64,
    /// Most live components held between two blocks.
    pub peak_live_components: usize,
    /// Norm bound the seed table grew to.
    pub seed_bound: u64,
}

/// Mutable state carried from block to block.
///
/// [`step`](Self::step) processes one block; a session is finished once
/// the origin's component fails to reach the right edge of a block.
#[derive(Debug)]
pub struct MoatSession<O = RecursiveOracle> {
    adjacency: Adjacency,
    seeds: SeedTable<O>,
    ledger: ComponentLedger,
    left: BoundaryStrip,
    block_cells: u64,
    max_real_part: Option<u64>,
    x: u64,
    reached: u64,
    blocks: u64,
    peak_live: usize,
    finished: bool,
}

impl MoatSession<RecursiveOracle> {
    /// Session seeded from the built-in table.
    pub fn new(config: &SegmentedConfig) -> Result<Self, MoatError> {
        Self::with_oracle(config, RecursiveOracle::builtin()?)
    }
}

impl<O: PrimeOracle> MoatSession<O> {
    /// Session seeded from `oracle`.
    pub fn with_oracle(config: &SegmentedConfig, oracle: O) -> Result<Self, MoatError> {
        config.validate()?;
        let adjacency = Adjacency::new(config.jump)?;
        let seeds = SeedTable::new(oracle, config.initial_seed_bound)?;
        let finished = !adjacency.leaves_origin();
        Ok(Self {
            adjacency,
            seeds,
            ledger: ComponentLedger::new(),
            left: BoundaryStrip::default(),
            block_cells: config.resolved_block_cells(),
            max_real_part: config.max_real_part,
            x: 0,
            reached: 0,
            blocks: 0,
            peak_live: 0,
            finished,
        })
    }

    /// `true` once the origin's component is known in full.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// First real part of the next block.
    pub fn next_x(&self) -> u64 {
        self.x
    }

    /// Current cell budget per block.
    pub fn block_cells(&self) -> u64 {
        self.block_cells
    }

    /// The component ledger.
    pub fn ledger(&self) -> &ComponentLedger {
        &self.ledger
    }

    /// The shared seed table.
    pub fn seeds(&self) -> &SeedTable<O> {
        &self.seeds
    }

    /// Result so far; final once [`is_finished`](Self::is_finished).
    pub fn outcome(&self) -> SegmentedOutcome {
        SegmentedOutcome {
            component_size: self.ledger.size(ComponentId::ORIGIN),
            farthest: self.ledger.farthest(ComponentId::ORIGIN),
            blocks: self.blocks,
            explored_real_part: self.reached,
            peak_live_components: self.peak_live,
            seed_bound: self.seeds.bound(),
        }
    }

    /// Width of the next block, doubling the budget until it is at least
    /// twice the jump.
    fn block_width(&mut self) -> u64 {
        let x = self.x as f64;
        loop {
            let cells = self.block_cells as f64;
            let dx = ((cells + x * x / 4.0).sqrt() - x / 2.0).floor();
            if dx >= 2.0 * self.adjacency.reach() {
                return dx as u64;
            }
            self.block_cells = self.block_cells.saturating_mul(2);
            tracing::warn!(
                x = self.x,
                block_cells = self.block_cells,
                "block too narrow for the seam, budget doubled"
            );
        }
    }

    /// Sieve and explore the next block. `None` once finished.
    pub fn step(&mut self) -> Result<Option<BlockReport>, MoatError> {
        if self.finished {
            return Ok(None);
        }
        if let Some(limit) = self.max_real_part {
            if self.x > limit {
                return Err(MoatError::SearchLimit {
                    limit,
                    reached: self.x,
                });
            }
        }
        let x = self.x;
        let dx = self.block_width();
        let dy = x + dx;
        let width = self.adjacency.strip_width();
        let right_start = dx - width;

        let mut sieve = WindowSieve::new(Window::new(x, 0, dx, dy)?);
        let seeds = self.seeds.ensure(sieve.seed_bound())?;
        let metrics = prepare_with_seeds(&mut sieve, seeds);
        self.ledger.reset_propagation();

        let mut block = Block {
            adjacency: &self.adjacency,
            ledger: &mut self.ledger,
            left: &mut self.left,
            right: BoundaryStrip::new(width as usize, dy as usize),
            sieve,
            x: x as i64,
            dx: dx as i64,
            dy: dy as i64,
            right_start: right_start as i64,
            merges: 0,
        };

        if x == 0 {
            block.sieve.claim_local(1, 1);
            block.ledger.record(ComponentId::ORIGIN, GaussianInteger::ONE_PLUS_I);
            if block.sieve.claim_local(2, 1) {
                block.explore(ComponentId::ORIGIN, vec![(2, 1)]);
            }
        }
        block.continue_from_left();
        block.drop_stranded();
        let origin_propagated = block.ledger.has_propagated(ComponentId::ORIGIN);
        if origin_propagated {
            block.sweep_right();
        }

        let Block { right, merges, .. } = block;
        let report = BlockReport {
            index: self.blocks,
            x,
            dx,
            dy,
            origin_size: self.ledger.size(ComponentId::ORIGIN),
            origin_propagated,
            live_components: self.ledger.live_count(),
            merges,
            seam_cells: right.cell_count(),
            sieve: metrics,
        };
        tracing::info!(
            block = report.index,
            x,
            dx,
            origin_size = report.origin_size,
            live = report.live_components,
            merges,
            "moat block explored"
        );

        self.blocks += 1;
        self.reached = x + dx;
        self.peak_live = self.peak_live.max(report.live_components);
        if origin_propagated {
            self.left = right;
            self.x += right_start;
        } else {
            self.finished = true;
        }
        Ok(Some(report))
    }

    /// Step until finished, calling `on_block` after every block.
    pub fn run_to_end<F>(&mut self, mut on_block: F) -> Result<SegmentedOutcome, MoatError>
    where
        F: FnMut(&BlockReport),
    {
        while let Some(report) = self.step()? {
            on_block(&report);
        }
        Ok(self.outcome())
    }
}

/// Borrowed state for exploring one block.
struct Block<'a> {
    adjacency: &'a Adjacency,
    ledger: &'a mut ComponentLedger,
    left: &'a mut BoundaryStrip,
    right: BoundaryStrip,
    sieve: WindowSieve,
    x: i64,
    dx: i64,
    dy: i64,
    right_start: i64,
    merges: u64,
}

impl Block<'_> {
    /// Flood `id` from the claimed cells on `stack`.
    fn explore(&mut self, id: ComponentId, mut stack: Vec<(i64, i64)>) {
        while let Some((u, v)) = stack.pop() {
            match self.left.lookup(u, v) {
                Some(other) if other != id => {
                    debug_assert!(other > id, "{other} reached before {id}");
                    let cells = self.left.relabel(other, id);
                    tracing::trace!(
                        into = %id,
                        from = %other,
                        cells = cells.len(),
                        "components merged"
                    );
                    self.ledger.absorb(id, other);
                    self.merges += 1;
                    for (cu, cv) in cells {
                        self.sieve.claim_local(cu, cv);
                        stack.push((cu, cv));
                    }
                }
                Some(_) => {}
                None => {
                    self.ledger.record(id, GaussianInteger::new(self.x + u, v));
                    if u >= self.right_start {
                        self.right.record(id, u - self.right_start, v);
                        self.ledger.mark_propagated(id);
                    }
                }
            }
            for &(du, dv) in self.adjacency.offsets() {
                let (nu, nv) = (u + du, v + dv);
                let inside = (0..self.dx).contains(&nu) && (0..self.dy).contains(&nv);
                if inside && nv <= self.x + nu && self.sieve.claim_local(nu, nv) {
                    stack.push((nu, nv));
                }
            }
        }
    }

    fn continue_from_left(&mut self) {
        for id in self.left.ids() {
            if self.ledger.size(id) == 0 {
                continue;
            }
            let stack: Vec<_> = self
                .left
                .cells(id)
                .iter()
                .copied()
                .filter(|&(u, v)| self.sieve.claim_local(u, v))
                .collect();
            self.explore(id, stack);
        }
    }

    fn drop_stranded(&mut self) {
        for id in self.ledger.live_ids() {
            if id != ComponentId::ORIGIN && !self.ledger.has_propagated(id) {
                self.ledger.tombstone(id);
            }
        }
    }

    fn sweep_right(&mut self) {
        for u in self.right_start..self.dx {
            for v in 0..self.dy.min(self.x + u + 1) {
                if self.sieve.claim_local(u, v) {
                    let id = self.ledger.allocate();
                    self.explore(id, vec![(u, v)]);
                }
            }
        }
    }
}

/// Runs a [`MoatSession`] to completion.
#[derive(Clone, Debug)]
pub struct SegmentedMoatExplorer {
    config: SegmentedConfig,
}

impl SegmentedMoatExplorer {
    /// Explorer for a validated `config`.
    pub fn new(config: SegmentedConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration.
    pub fn config(&self) -> &SegmentedConfig {
        &self.config
    }

    /// Explore the origin's component, seeding from the built-in table.
    pub fn run(&self) -> Result<SegmentedOutcome, MoatError> {
        MoatSession::new(&self.config)?.run_to_end(|_| {})
    }

    /// Explore the origin's component, seeding from `oracle`.
    pub fn run_with_oracle<O: PrimeOracle>(
        &self,
        oracle: O,
    ) -> Result<SegmentedOutcome, MoatError> {
        MoatSession::with_oracle(&self.config, oracle)?.run_to_end(|_| {})
    }
}
