//! Gaussian moat exploration.
//!
//! Two Gaussian primes are adjacent when their distance is at most the
//! jump size. The origin's component is the set of primes reachable from
//! `1+i` by such jumps; it is finite whenever a moat of that width
//! surrounds the origin.
//!
//! - [`MoatExplorer`] sieves a disk large enough for the jump and floods
//!   it. Good up to jump 4 or so.
//! - [`SegmentedMoatExplorer`] sieves vertical blocks left to right and
//!   only keeps a boundary strip of component ids between them, so memory
//!   stays at one block regardless of how far the component reaches.
//! - [`VerticalMoatSearch`] looks for a moat from the real axis to the
//!   diagonal right of a given real part, bounding every component to
//!   its left.
//!
//! Both work in the octant `0 <= b <= a`; the graph is symmetric under
//! units and conjugation, so sizes are per octant, `1+i` included.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod boundary;
pub mod component;
pub mod config;
pub mod explorer;
pub mod ledger;
pub mod segmented;
pub mod vertical;

pub use adjacency::Adjacency;
pub use boundary::BoundaryStrip;
pub use component::Component;
pub use config::{MoatConfig, SegmentedConfig, VerticalMoatConfig};
pub use explorer::{window_components, MoatExplorer};
pub use ledger::{ComponentId, ComponentLedger};
pub use segmented::{BlockReport, MoatSession, SegmentedMoatExplorer, SegmentedOutcome};
pub use vertical::{VerticalBlockReport, VerticalMoatOutcome, VerticalMoatSearch};
