//! Fetch-once field cache.
//!
//! The first successful [`FieldCache::get`] fetches, validates, and
//! stores the field. Every later call returns the stored field without
//! touching the source. A failed fetch stores nothing, so the next call
//! tries again. There is no invalidation besides [`FieldCache::reset`].

use std::sync::Arc;

use tokio::sync::OnceCell;

use fieldmap_layout::Field;

use crate::{FieldSource, SourceError};

/// Caches the field produced by a [`FieldSource`].
#[derive(Debug)]
pub struct FieldCache<S> {
    source: S,
    field: OnceCell<Arc<Field>>,
}

impl<S: FieldSource> FieldCache<S> {
    /// Empty cache in front of `source`.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            field: OnceCell::new(),
        }
    }

    /// The cached field, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the fetch fails, or
    /// [`SourceError::Layout`] if the description is not a valid field.
    pub async fn get(&self) -> Result<Arc<Field>, SourceError> {
        self.field
            .get_or_try_init(|| async {
                let description = self.source.fetch().await?;
                let field = Field::from_description(&description)?;
                tracing::info!("field description loaded");
                Ok::<_, SourceError>(Arc::new(field))
            })
            .await
            .map(Arc::clone)
    }

    /// Whether a field is cached.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.field.initialized()
    }

    /// Drop the cached field so the next `get` fetches again.
    pub fn reset(&mut self) {
        self.field.take();
    }

    /// The wrapped source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}
