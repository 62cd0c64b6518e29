//! Gprime: sieves for Gaussian primes and Gaussian moat exploration.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the gprime sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use gprime::prelude::*;
//! use gprime::sieve::engine::run;
//!
//! // Every Gaussian prime of norm <= 10 000, one per associate class.
//! let oracle = RecursiveOracle::builtin().unwrap();
//! let mut sieve = OctantSieve::new(10_000);
//! let harvest = run(&mut sieve, &oracle).unwrap();
//! assert!(harvest.primes.contains(&GaussianInteger::new(2, 1)));
//! assert!(!harvest.primes.contains(&GaussianInteger::new(3, 1)));
//!
//! // The primes reachable from 1+i with steps of length <= 2.
//! let mut explorer = MoatExplorer::new(&MoatConfig::new(2.0)).unwrap();
//! let component = explorer.explore_origin().unwrap();
//! assert_eq!(component.size(), 92);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gprime-core` | `GaussianInteger`, integer helpers, errors |
//! | [`sieve`] | `gprime-sieve` | Sieve strategies, seed oracles, queries, batches |
//! | [`moat`] | `gprime-moat` | Full-disk and streaming moat explorers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Gaussian integers, integer helpers and error types (`gprime-core`).
pub use gprime_core as types;

/// Sieve strategies and seed oracles (`gprime-sieve`).
///
/// Every strategy implements [`sieve::SieveEngine`]; drive one with
/// [`sieve::engine::run`], or use the one-call helpers in
/// [`sieve::query`].
pub use gprime_sieve as sieve;

/// Moat explorers (`gprime-moat`).
///
/// [`moat::MoatExplorer`] for a fully sieved disk,
/// [`moat::SegmentedMoatExplorer`] for block-by-block streaming,
/// [`moat::VerticalMoatSearch`] for bounding components by a vertical moat.
pub use gprime_moat as moat;

/// Common imports for typical usage.
///
/// ```rust
/// use gprime::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use gprime_core::{ConfigError, GaussianInteger, MoatError, OracleError, SieveError};

    // Sieves
    pub use gprime_sieve::{
        DonutSieve, Harvest, OctantSieve, PrimeOracle, RecursiveOracle, ReferenceTable, Sector,
        SectorSieve, SeedTable, SieveEngine, SieveMetrics, Window, WindowDonutSieve, WindowSieve,
    };

    // Moat
    pub use gprime_moat::{
        Component, MoatConfig, MoatExplorer, SegmentedConfig, SegmentedMoatExplorer,
        SegmentedOutcome, VerticalMoatConfig, VerticalMoatOutcome, VerticalMoatSearch,
    };
}
