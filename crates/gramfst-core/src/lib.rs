#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for gramfst transition graphs.
//!
//! - [`Label`]: the closed set of sentinel transition kinds plus interned
//!   symbols and rule references
//! - [`Arc`]: a directed transition between two vertex handles
//! - [`Interner`]: string to [`Symbol`] interning for words, tags and rule names
//!
//! Vertices are never materialized; they exist only as `VertexId` handles
//! referenced by arcs.

mod arc;
mod colors;
mod interner;
mod invariants;
mod label;

#[cfg(test)]
mod interner_tests;

pub use arc::{Arc, PhoneContext, Target, VertexId};
pub use colors::Colors;
pub use interner::{Interner, Symbol};
pub use label::{Label, RuleId};
