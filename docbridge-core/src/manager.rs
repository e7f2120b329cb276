//! Per-model entry points.
//!
//! A [`Manager`] binds one model type to a backend and a store
//! configuration, and hands out query façades over the model's active
//! collection. It also exposes the one direct read operation external
//! tooling needs: [`Manager::get_by_id`].
//!
//! # Example
//!
//! ```ignore
//! use docbridge::prelude::*;
//!
//! # async fn example(store: &docbridge::store::ModelStore<impl docbridge::backend::DocumentBackend>) -> docbridge::error::ModelStoreResult<()> {
//! let teachers = store.objects::<Teacher>();
//! let all = teachers.all().iterator().await?;
//! let alice = teachers.get([("name", "Alice")]).await?;
//! # Ok(()) }
//! ```

use bson::Bson;
use std::marker::PhantomData;

use crate::{
    backend::DocumentBackend,
    config::StoreConfig,
    error::{ModelStoreError, ModelStoreResult},
    filter::Expr,
    model::{Model, ModelExt},
    queryset::QuerySet,
};

/// The manager-like entry point for one model type.
///
/// Cheap to construct and copy around; holds only the backend reference and
/// the store configuration.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
/// * `M` - The model type this manager serves
#[derive(Debug)]
pub struct Manager<'a, B: DocumentBackend, M: Model> {
    backend: &'a B,
    config: StoreConfig,
    _marker: PhantomData<fn() -> M>,
}

impl<'a, B: DocumentBackend, M: Model> Manager<'a, B, M> {
    /// Creates a manager over the given backend and configuration.
    pub fn new(backend: &'a B, config: StoreConfig) -> Self {
        Self { backend, config, _marker: PhantomData }
    }

    pub(crate) fn backend(&self) -> &'a B {
        self.backend
    }

    pub(crate) fn config(&self) -> StoreConfig {
        self.config
    }

    /// The collection this manager addresses under the store's mode.
    pub fn collection_name(&self) -> &'static str {
        M::descriptor().collection_name(self.config.mode())
    }

    /// A façade over the whole collection, no filters applied.
    pub fn all(&self) -> QuerySet<'a, B, M> {
        QuerySet::new(self.backend, self.config)
    }

    /// A façade filtered by the given expression.
    pub fn filter(&self, expr: Expr) -> QuerySet<'a, B, M> {
        self.all().filter(expr)
    }

    /// Executes an unfiltered query and returns the first instance matching
    /// every lookup pair.
    ///
    /// Shorthand for [`QuerySet::get`] on [`Manager::all`]; see there for
    /// the matching and error contract.
    pub async fn get<I, K, V>(&self, lookups: I) -> ModelStoreResult<M>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Bson>,
    {
        self.all().get(lookups).await
    }

    /// Fetches one instance directly by document identifier.
    ///
    /// This is a single-document read, not a collection scan.
    ///
    /// # Errors
    ///
    /// `DoesNotExist` when no document lives at the identifier.
    pub async fn get_by_id(&self, id: &str) -> ModelStoreResult<M> {
        let raw = self
            .backend
            .get_document(id, self.collection_name())
            .await?;
        match raw {
            Some(document) => M::from_document(document),
            None => Err(ModelStoreError::DoesNotExist { model: M::descriptor().model_name() }),
        }
    }
}

impl<'a, B: DocumentBackend, M: Model> Clone for Manager<'a, B, M> {
    fn clone(&self) -> Self {
        Self { backend: self.backend, config: self.config, _marker: PhantomData }
    }
}

impl<'a, B: DocumentBackend, M: Model> Copy for Manager<'a, B, M> {}
