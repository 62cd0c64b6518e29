//! Core types for the gprime workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! Gaussian integer value type, the exact integer arithmetic every sieve
//! strategy leans on, and the error enums shared across the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arith;
pub mod error;
pub mod gint;

pub use arith::{ceil_div, floor_div, isqrt, positive_mod};
pub use error::{ConfigError, MoatError, OracleError, SieveError};
pub use gint::GaussianInteger;
