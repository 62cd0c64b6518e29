//! Flood-fill exploration over a fully sieved octant.

use crate::adjacency::Adjacency;
use crate::component::Component;
use crate::config::MoatConfig;
use gprime_core::{GaussianInteger, MoatError};
use gprime_sieve::engine::prepare;
use gprime_sieve::{OctantSieve, PrimeOracle, RecursiveOracle, SieveEngine, Window, WindowSieve};

/// Depth-first flood from `stack`.
///
/// `visit(from, to)` decides whether the candidate `to` joins the
/// component (claiming it in the sieve); an error aborts the flood.
pub(crate) fn flood<F>(
    adjacency: &Adjacency,
    mut stack: Vec<GaussianInteger>,
    members: &mut Vec<GaussianInteger>,
    mut visit: F,
) -> Result<(), MoatError>
where
    F: FnMut(GaussianInteger, GaussianInteger) -> Result<bool, MoatError>,
{
    while let Some(p) = stack.pop() {
        for h in adjacency.neighbours(p) {
            if visit(p, h)? {
                members.push(h);
                stack.push(h);
            }
        }
    }
    Ok(())
}

/// Components of the Gaussian prime graph inside the disk of norm
/// `<= bound`, folded to the octant `0 <= b <= a`.
///
/// The graph is invariant under units and conjugation, so a component of
/// the full plane folds onto a component of the octant. Every explore
/// call claims the primes it visits; a prime belongs to at most one
/// returned component per explorer.
#[derive(Debug)]
pub struct MoatExplorer {
    adjacency: Adjacency,
    sieve: OctantSieve,
}

impl MoatExplorer {
    /// Sieve the disk for `config`, seeding from the built-in table.
    pub fn new(config: &MoatConfig) -> Result<Self, MoatError> {
        let oracle = RecursiveOracle::builtin()?;
        Self::with_oracle(config, &oracle)
    }

    /// Sieve the disk for `config`, seeding from `oracle`.
    pub fn with_oracle(config: &MoatConfig, oracle: &dyn PrimeOracle) -> Result<Self, MoatError> {
        let bound = config.resolved_bound()?;
        let adjacency = Adjacency::new(config.jump)?;
        let mut sieve = OctantSieve::new(bound);
        let metrics = prepare(&mut sieve, oracle)?;
        tracing::debug!(
            jump = config.jump,
            bound,
            sweep_us = metrics.sweep_us,
            "moat disk sieved"
        );
        Ok(Self { adjacency, sieve })
    }

    /// Norm bound of the sieved disk.
    pub fn bound(&self) -> u64 {
        self.sieve.bound()
    }

    /// The step set.
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// The component of the origin: `1+i` and every prime reachable from
    /// it.
    ///
    /// Fails with [`MoatError::EscapedRegion`] when the flood touches the
    /// edge of the disk, since the component may continue outside it.
    pub fn explore_origin(&mut self) -> Result<Component, MoatError> {
        let mut members = Vec::new();
        if !self.adjacency.leaves_origin() {
            return Ok(Component::from_members(members));
        }
        let mut stack = Vec::new();
        if self.sieve.claim(1, 1) {
            members.push(GaussianInteger::ONE_PLUS_I);
        }
        let start = GaussianInteger::new(2, 1);
        if self.sieve.claim(start.a, start.b) {
            members.push(start);
            stack.push(start);
        }
        let bound = self.sieve.bound();
        let jump = self.adjacency.jump();
        let sieve = &mut self.sieve;
        flood(&self.adjacency, stack, &mut members, |from, h| {
            if h.norm() > bound {
                return Err(MoatError::EscapedRegion {
                    jump,
                    position: from,
                    bound,
                });
            }
            Ok(in_octant(h) && sieve.claim(h.a, h.b))
        })?;
        tracing::info!(
            jump,
            size = members.len(),
            "origin component explored"
        );
        Ok(Component::from_members(members))
    }

    /// The component containing `start`, folded into the octant first.
    ///
    /// Empty if `start` is not a prime of the disk or was already claimed.
    /// Unlike [`explore_origin`](Self::explore_origin), the flood is
    /// silently clipped at the disk edge.
    pub fn explore_from(&mut self, start: GaussianInteger) -> Component {
        let start = start.to_octant();
        let mut members = Vec::new();
        if !self.sieve.claim(start.a, start.b) {
            return Component::from_members(members);
        }
        members.push(start);
        self.flood_clipped(vec![start], &mut members);
        Component::from_members(members)
    }

    /// Partition every remaining octant prime of the disk into components,
    /// ordered by their smallest member.
    pub fn explore_all(&mut self) -> Vec<Component> {
        let starts: Vec<_> = self
            .sieve
            .harvest()
            .into_iter()
            .filter(|g| g.a >= g.b)
            .collect();
        let mut out = Vec::new();
        for start in starts {
            if !self.sieve.claim(start.a, start.b) {
                continue;
            }
            let mut members = vec![start];
            self.flood_clipped(vec![start], &mut members);
            out.push(Component::from_members(members));
        }
        tracing::debug!(components = out.len(), "disk partitioned");
        out
    }

    fn flood_clipped(&mut self, stack: Vec<GaussianInteger>, members: &mut Vec<GaussianInteger>) {
        let sieve = &mut self.sieve;
        let result = flood(&self.adjacency, stack, members, |_, h| {
            Ok(in_octant(h) && sieve.claim(h.a, h.b))
        });
        debug_assert!(result.is_ok());
    }
}

fn in_octant(g: GaussianInteger) -> bool {
    g.b >= 0 && g.b <= g.a
}

/// Components of the primes with `a > 0` inside `window`, ignoring
/// anything outside it. Each component is returned sorted; components are
/// ordered by their smallest member.
pub fn window_components(
    jump: f64,
    window: Window,
    oracle: &dyn PrimeOracle,
) -> Result<Vec<Component>, MoatError> {
    let adjacency = Adjacency::new(jump)?;
    let mut sieve = WindowSieve::new(window);
    prepare(&mut sieve, oracle)?;
    let mut out = Vec::new();
    for start in sieve.harvest() {
        if !sieve.claim(start) {
            continue;
        }
        let mut members = vec![start];
        let sieve = &mut sieve;
        flood(&adjacency, vec![start], &mut members, |_, h| {
            Ok(h.a > 0 && sieve.claim(h))
        })?;
        members.sort_unstable();
        out.push(Component::from_members(members));
    }
    Ok(out)
}
