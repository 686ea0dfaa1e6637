//! Request, result, and schema types for iati-mcp.
//!
//! This crate defines the records that flow through a single query: the typed
//! request for each operation, the normalized result envelope handed back to
//! the tool caller, and the upstream field names queries are built from.

pub mod models;
pub mod schema;

pub use models::*;
