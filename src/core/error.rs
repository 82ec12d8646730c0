//! Error returned by the core `Gateway`.
//!
//! Error | Context | Description
//! ---|---|---
//! `UpstreamQuery` | Retrieval | The store could not be queried. Recoverable per-request, surfaced as a 500.
//! `Transformation` | Grouping | A row could not be reshaped. Should not occur with well-formed rows; treated as a bug but still surfaced as a 500 instead of crashing the process.
use std::panic::Location;

use conflict_gateway_located_error::LocatedError;

/// Retrieval or transformation error returned by the core `Gateway`.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("Failed to load conflict events from the store: {source}")]
    UpstreamQuery {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("Malformed row returned by the store, {location}")]
    Transformation { location: &'static Location<'static> },
}

impl From<super::databases::error::Error> for Error {
    #[track_caller]
    fn from(err: super::databases::error::Error) -> Self {
        let e: conflict_gateway_located_error::DynError = std::sync::Arc::new(err);
        Error::UpstreamQuery { source: e.into() }
    }
}
