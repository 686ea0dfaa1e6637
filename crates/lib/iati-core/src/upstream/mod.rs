//! Upstream datastore access.
//!
//! The fetch layer issues one authenticated GET per operation and decodes the
//! reply into a fully-defaulted response record.

pub mod http;
pub mod response;

pub use http::{
    DEFAULT_BASE_URL,
    DEV_SUBSCRIPTION_KEY,
    FetchError,
    HttpFetcher,
    SUBSCRIPTION_KEY_HEADER,
    UpstreamConfig,
};
pub use response::SolrResponse;
