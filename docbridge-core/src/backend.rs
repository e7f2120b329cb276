//! Storage backend abstraction for the model layer.
//!
//! This module defines the trait the model layer drives its document store
//! through. The surface is deliberately narrow: the model layer only ever
//! reads a document by identifier, creates a new document, and runs an
//! equality-filtered, ordered collection query. There is no update or
//! delete; document lifecycle past creation belongs to the remote store.
//!
//! # Traits
//!
//! - [`DocumentBackend`]: the async storage interface
//! - [`BackendBuilder`]: factory trait for constructing backend instances
//!
//! # Examples
//!
//! ```ignore
//! use docbridge::backend::DocumentBackend;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//! let id = backend
//!     .create_document(None, doc! { "name": "Alice" }, "teacher")
//!     .await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::Document as BsonDocument;
use std::fmt::Debug;

use crate::{document::RawDocument, error::ModelStoreResult, query::CollectionQuery};

/// Abstract interface for document storage backends.
///
/// Implementations must be thread-safe and support concurrent access from
/// multiple async tasks; every operation is a single logical round trip
/// against the store with no retries.
///
/// Operations return [`ModelStoreResult<T>`](crate::error::ModelStoreResult).
/// Implementers should document which error variants each operation
/// produces.
#[async_trait]
pub trait DocumentBackend: Send + Sync + Debug {
    /// Retrieves one document by identifier.
    ///
    /// Returns `Ok(None)` when no document lives at the identifier; a
    /// missing collection is indistinguishable from an empty one.
    async fn get_document(
        &self,
        id: &str,
        collection: &str,
    ) -> ModelStoreResult<Option<RawDocument>>;

    /// Creates a new document, strictly.
    ///
    /// With `id` given, the document is created at that identifier and a
    /// [`DocumentAlreadyExists`](crate::error::ModelStoreError::DocumentAlreadyExists)
    /// error is returned when the identifier is already in use. With `id`
    /// absent, the backend generates an identifier. The collection is
    /// created implicitly if it does not exist.
    ///
    /// Returns the identifier the document was created at.
    async fn create_document(
        &self,
        id: Option<&str>,
        data: BsonDocument,
        collection: &str,
    ) -> ModelStoreResult<String>;

    /// Runs a translated query against a collection.
    ///
    /// Applies the query's equality clauses and ordering directives and
    /// returns every match; a query with no clauses lists the whole
    /// collection. The full result is materialized in one round trip,
    /// never streamed.
    async fn query_documents(
        &self,
        query: CollectionQuery,
        collection: &str,
    ) -> ModelStoreResult<Vec<RawDocument>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op; backends holding external
    /// connections should override this.
    async fn shutdown(self) -> ModelStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait BackendBuilder {
    /// The backend type this builder produces.
    type Backend: DocumentBackend;

    /// Consumes the builder, establishing whatever connection the backend
    /// needs.
    async fn build(self) -> ModelStoreResult<Self::Backend>;
}
