//! Core query services for iati-mcp.
//!
//! This crate turns typed operation requests into datastore queries, performs
//! the single upstream round trip each operation needs, and normalizes the
//! engine's reply into the compact result envelopes exposed to tool callers.

pub mod control;
pub mod normalize;
pub mod query;
pub mod upstream;
pub mod validate;
