//! Test utilities for gprime development.
//!
//! Provides a slow but obviously correct primality reference
//! ([`naive`]), seeded random region generators for cross-validation
//! ([`regions`]), and golden moat values ([`fixtures`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod naive;
pub mod regions;
