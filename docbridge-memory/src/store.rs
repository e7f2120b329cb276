//! In-memory storage implementation for the model layer.
//!
//! This module provides a simple but complete in-memory backend that stores
//! documents as BSON mappings in ordered maps behind an async-safe
//! read-write lock.

use async_trait::async_trait;
use bson::{Bson, Document as BsonDocument};
use mea::rwlock::RwLock;
use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};
use uuid::Uuid;

use docbridge_core::{
    backend::{BackendBuilder, DocumentBackend},
    document::RawDocument,
    error::{ModelStoreError, ModelStoreResult},
    query::{CollectionQuery, SortDirection},
    value::{bson_cmp, bson_eq},
};

// Ordered maps keep unordered listings stable by document identifier.
type CollectionMap = BTreeMap<String, BsonDocument>;
type StoreMap = BTreeMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// This struct implements the [`DocumentBackend`] trait entirely in memory
/// using an async-aware read-write lock. Documents are stored as BSON
/// mappings keyed by their identifier string.
///
/// # Thread Safety
///
/// `InMemoryBackend` is cloneable and uses an `Arc`-wrapped internal state,
/// allowing it to be safely shared across async tasks. Clones of the same
/// instance share the same underlying data.
///
/// # Performance
///
/// Queries scan all documents in a collection (no indexing). For the small
/// to medium datasets this layer targets, that is acceptable; for larger
/// datasets use the MongoDB backend.
///
/// # Example
///
/// ```ignore
/// use docbridge_memory::InMemoryBackend;
/// use docbridge::backend::DocumentBackend;
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = InMemoryBackend::new();
///
///     let id = backend
///         .create_document(Some("Alice"), doc! { "name": "Alice" }, "teacher")
///         .await?;
///     assert_eq!(id, "Alice");
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryBackend {
    /// The main storage map: collection_name -> (document_id -> document)
    collections: Arc<RwLock<StoreMap>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    ///
    /// The returned backend is ready for use and contains no collections or
    /// documents.
    pub fn new() -> Self {
        Self { collections: Arc::new(RwLock::new(StoreMap::new())) }
    }

    /// Creates a builder for constructing an `InMemoryBackend`.
    ///
    /// The builder carries no options today; it exists so code written
    /// against [`BackendBuilder`] can construct any backend uniformly.
    pub fn builder() -> InMemoryBackendBuilder {
        InMemoryBackendBuilder::default()
    }
}

#[async_trait]
impl DocumentBackend for InMemoryBackend {
    async fn get_document(
        &self,
        id: &str,
        collection: &str,
    ) -> ModelStoreResult<Option<RawDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .map(|data| RawDocument::new(id, data.clone())))
    }

    async fn create_document(
        &self,
        id: Option<&str>,
        data: BsonDocument,
        collection: &str,
    ) -> ModelStoreResult<String> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        let key = match id {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        if documents.contains_key(&key) {
            return Err(ModelStoreError::DocumentAlreadyExists(
                key,
                collection.to_string(),
            ));
        }

        log::debug!("created document {key} in collection {collection}");
        documents.insert(key.clone(), data);

        Ok(key)
    }

    async fn query_documents(
        &self,
        query: CollectionQuery,
        collection: &str,
    ) -> ModelStoreResult<Vec<RawDocument>> {
        let collections = self.collections.read().await;
        let documents = match collections.get(collection) {
            Some(documents) => documents,
            None => return Ok(vec![]),
        };

        let mut matches = documents
            .iter()
            .filter(|(_, data)| {
                query.clauses.iter().all(|clause| {
                    data.get(&clause.field)
                        .is_some_and(|value| bson_eq(value, &clause.value))
                })
            })
            .map(|(id, data)| RawDocument::new(id.clone(), data.clone()))
            .collect::<Vec<_>>();

        if !query.order.is_empty() {
            // Stable sort: ties keep the identifier order from the map scan.
            matches.sort_by(|a, b| {
                for sort in &query.order {
                    let left = a.data.get(&sort.field).unwrap_or(&Bson::Null);
                    let right = b.data.get(&sort.field).unwrap_or(&Bson::Null);
                    let ordering = match sort.direction {
                        SortDirection::Asc => bson_cmp(left, right),
                        SortDirection::Desc => bson_cmp(right, left),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }

                Ordering::Equal
            });
        }

        Ok(matches)
    }
}

/// Builder for constructing [`InMemoryBackend`] instances.
///
/// # Example
///
/// ```ignore
/// use docbridge_memory::InMemoryBackend;
/// use docbridge::backend::BackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let backend = InMemoryBackend::builder().build().await.unwrap();
/// }
/// ```
#[derive(Default)]
pub struct InMemoryBackendBuilder;

#[async_trait]
impl BackendBuilder for InMemoryBackendBuilder {
    type Backend = InMemoryBackend;

    /// Builds and returns a new [`InMemoryBackend`] instance.
    ///
    /// This always succeeds and returns a freshly initialized backend.
    async fn build(self) -> ModelStoreResult<Self::Backend> {
        Ok(InMemoryBackend::new())
    }
}
