//! Core trait abstractions for the prospecting library.
//!
//! These traits define the seams applications plug into: provider lookups
//! and persistence.

pub mod finder;
pub mod store;
