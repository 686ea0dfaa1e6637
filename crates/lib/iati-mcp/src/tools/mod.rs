//! MCP tool modules.
//!
//! Tools are grouped by domain: datastore search operations and contextual
//! help for callers.

pub mod search;
mod context;
