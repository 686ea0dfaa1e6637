use std::{error::Error, fmt};

use crate::upstream::{FetchError, HttpFetcher, UpstreamConfig};

pub mod projects;
pub mod recipients;
pub mod transactions;

#[derive(Debug)]
pub enum ControlError {
    Fetch(FetchError),
    InvalidParameter(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "{err}"),
            Self::InvalidParameter(message) => write!(f, "invalid parameter: {message}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::InvalidParameter(_) => None,
        }
    }
}

impl From<FetchError> for ControlError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

/// Entry point for the three datastore operations. Cheap to clone; holds no
/// per-call state.
#[derive(Clone)]
pub struct IatiControlPlane {
    fetcher: HttpFetcher,
}

impl IatiControlPlane {
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            fetcher: HttpFetcher::new(config),
        }
    }
}
