//! Fixture-backed field source.

use std::sync::atomic::{AtomicUsize, Ordering};

use fieldmap_layout::FieldDescription;
use fieldmap_layout::mock::mock_field_description;

use crate::{FieldSource, SourceError};

/// Serves a fixed description and counts how often it was asked.
#[derive(Debug)]
pub struct MockSource {
    description: FieldDescription,
    fetches: AtomicUsize,
}

impl MockSource {
    /// Serve `description` on every fetch.
    #[must_use]
    pub const fn new(description: FieldDescription) -> Self {
        Self {
            description,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of fetches so far.
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(mock_field_description())
    }
}

impl FieldSource for MockSource {
    async fn fetch(&self) -> Result<FieldDescription, SourceError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.description.clone())
    }
}
