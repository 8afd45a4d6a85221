//! fieldmap-source: Field description retrieval.
//!
//! A [`FieldSource`] produces a parsed [`FieldDescription`]: over HTTP
//! ([`HttpSource`]) or from the built-in fixture ([`MockSource`]).
//! [`FieldCache`] wraps a source so the field is fetched and validated at
//! most once per cache.

use std::future::Future;

use fieldmap_layout::{FieldDescription, LayoutError};

pub mod cache;
pub mod http;
pub mod mock;

pub use cache::FieldCache;
pub use http::{DEFAULT_FIELD_URL, HttpSource};
pub use mock::MockSource;

/// Errors that can occur while retrieving a field.
///
/// `Fetch`, `Status`, and `Parse` are the fetch failures: the field
/// could not be obtained at all. `Layout` means it was obtained but
/// violates the field invariants.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request could not be sent or the body could not be read.
    #[error("failed to fetch field: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("field endpoint returned {0}")]
    Status(reqwest::StatusCode),

    /// The body is not a field description.
    #[error("failed to parse field description: {0}")]
    Parse(#[from] serde_json::Error),

    /// The description violates the field invariants.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl SourceError {
    /// Whether the field could not be obtained at all.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Status(_) | Self::Parse(_))
    }
}

/// Something that can produce a field description.
pub trait FieldSource {
    /// Retrieve and parse one field description.
    fn fetch(&self) -> impl Future<Output = Result<FieldDescription, SourceError>> + Send;
}
