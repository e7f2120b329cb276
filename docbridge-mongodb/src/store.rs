use std::time::Duration;

use async_trait::async_trait;
use bson::{Bson, Document as BsonDocument, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    error::{Error as MongoError, ErrorKind, WriteError, WriteFailure},
    options::{ClientOptions, FindOptions},
};
use uuid::Uuid;

use docbridge_core::{
    backend::{BackendBuilder, DocumentBackend},
    document::RawDocument,
    error::{ModelStoreError, ModelStoreResult},
    query::{CollectionQuery, SortDirection},
};

/// MongoDB-backed document store.
///
/// Documents are stored with the docbridge identifier as the `_id` field,
/// so identifier uniqueness is enforced by the server itself.
#[derive(Debug)]
pub struct MongoBackend {
    client: Client,
    database: String,
}

impl MongoBackend {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoBackendBuilder {
        MongoBackendBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<BsonDocument> {
        self.client.database(&self.database).collection(collection_name)
    }

    fn prepare_document(&self, id: &str, data: BsonDocument) -> BsonDocument {
        BsonDocument::from_iter(
            [("_id".to_string(), Bson::String(id.to_string()))]
                .into_iter()
                .chain(data),
        )
    }

    fn restore_document(&self, mut document: BsonDocument) -> ModelStoreResult<RawDocument> {
        let id = match document.remove("_id") {
            Some(Bson::String(id)) => id,
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            other => {
                return Err(ModelStoreError::Backend(format!(
                    "Document has no usable _id: {other:?}"
                )));
            }
        };

        Ok(RawDocument::new(id, document))
    }
}

fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        *error.kind,
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: 11000, .. }))
    )
}

#[async_trait]
impl DocumentBackend for MongoBackend {
    async fn get_document(
        &self,
        id: &str,
        collection: &str,
    ) -> ModelStoreResult<Option<RawDocument>> {
        self.get_collection(collection)
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| ModelStoreError::Backend(e.to_string()))?
            .map(|document| self.restore_document(document))
            .transpose()
    }

    async fn create_document(
        &self,
        id: Option<&str>,
        data: BsonDocument,
        collection: &str,
    ) -> ModelStoreResult<String> {
        let key = match id {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        log::debug!("Creating document {key} in collection {collection}");

        self.get_collection(collection)
            .insert_one(self.prepare_document(&key, data))
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    ModelStoreError::DocumentAlreadyExists(key.clone(), collection.to_string())
                } else {
                    ModelStoreError::Backend(e.to_string())
                }
            })?;

        Ok(key)
    }

    async fn query_documents(
        &self,
        query: CollectionQuery,
        collection: &str,
    ) -> ModelStoreResult<Vec<RawDocument>> {
        let mut filter = BsonDocument::new();
        for clause in &query.clauses {
            filter.insert(clause.field.clone(), clause.value.clone());
        }

        let mut options = FindOptions::default();
        if !query.order.is_empty() {
            let mut sort = BsonDocument::new();
            for entry in &query.order {
                sort.insert(
                    entry.field.clone(),
                    match entry.direction {
                        SortDirection::Asc => 1,
                        SortDirection::Desc => -1,
                    },
                );
            }
            options.sort = Some(sort);
        }

        self.get_collection(collection)
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| ModelStoreError::Backend(e.to_string()))?
            .try_collect::<Vec<BsonDocument>>()
            .await
            .map_err(|e| ModelStoreError::Backend(e.to_string()))?
            .into_iter()
            .map(|document| self.restore_document(document))
            .collect()
    }

    async fn shutdown(self) -> ModelStoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

/// Builder for [`MongoBackend`] instances.
///
/// The optional request timeout applies to both connection establishment
/// and server selection, bounding how long any single operation can stall
/// on an unreachable deployment.
pub struct MongoBackendBuilder {
    dsn: String,
    database: String,
    request_timeout: Option<Duration>,
}

impl MongoBackendBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
            request_timeout: None,
        }
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl BackendBuilder for MongoBackendBuilder {
    type Backend = MongoBackend;

    async fn build(self) -> ModelStoreResult<Self::Backend> {
        let mut options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| ModelStoreError::Initialization(e.to_string()))?;

        if let Some(timeout) = self.request_timeout {
            options.connect_timeout = Some(timeout);
            options.server_selection_timeout = Some(timeout);
        }

        Ok(MongoBackend::new(
            Client::with_options(options)
                .map_err(|e| ModelStoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}
