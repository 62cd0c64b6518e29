//! Sieves for Gaussian primes over bounded regions of the plane.
//!
//! Every strategy implements [`SieveEngine`] and runs through the same
//! driver ([`engine::run`]): seed, allocate, sweep, harvest.
//!
//! # Strategies
//!
//! - [`OctantSieve`]: every prime up to a norm bound, stored as the first
//!   octant and unfolded at harvest
//! - [`DonutSieve`]: the same region packed with the mod-10 wheel
//! - [`WindowSieve`]: an arbitrary rectangle, anywhere in the quadrant
//! - [`WindowDonutSieve`]: a wheel-aligned rectangle, packed
//! - [`SectorSieve`]: an angular wedge inside the octant
//! - [`SegmentedWindowSieve`]: a wide rectangle, a few columns at a time
//!
//! # Seeds
//!
//! Seed primes come from a [`PrimeOracle`]. [`RecursiveOracle`] sieves
//! them on demand from a smaller octant, bottoming out in a
//! [`ReferenceTable`]; [`SeedTable`] keeps a growing list for callers that
//! run many sieves.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod donut;
pub mod engine;
pub mod grid;
pub mod histogram;
pub mod metrics;
pub mod octant;
pub mod oracle;
pub mod query;
pub mod sector;
pub mod seeds;
pub mod segmented;
pub mod wheel;
pub mod window;
pub mod window_donut;

#[cfg(test)]
pub(crate) mod compliance;

pub use donut::DonutSieve;
pub use engine::{Harvest, SieveEngine};
pub use grid::{FlagGrid, PackedGrid};
pub use histogram::angular_distribution;
pub use metrics::SieveMetrics;
pub use octant::OctantSieve;
pub use oracle::{PrimeOracle, RecursiveOracle, ReferenceTable};
pub use sector::{Sector, SectorSieve};
pub use seeds::SeedTable;
pub use segmented::SegmentedWindowSieve;
pub use window::{Window, WindowSieve};
pub use window_donut::WindowDonutSieve;
