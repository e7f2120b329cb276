//! The query façade.
//!
//! A [`QuerySet`] is what application code holds while composing a query:
//! it accumulates a filter expression and ordering specs without touching
//! the store, then materializes the full result into a private cache on the
//! first execution-triggering call (`get`, `iterator`, `index`, `exists`,
//! `count`, or `fetch` itself). Deriving a new façade through `filter` or
//! `order_by` carries the query definition only; every derived façade
//! re-executes independently.
//!
//! # Example
//!
//! ```ignore
//! use docbridge::prelude::*;
//!
//! let mut teachers = store.objects::<Teacher>().all();
//! let alice = teachers.get([("name", "Alice")]).await?;
//! ```

use bson::Bson;

use crate::{
    backend::DocumentBackend,
    config::StoreConfig,
    error::{ModelStoreError, ModelStoreResult},
    filter::Expr,
    materialize::{build_query, materialize},
    model::Model,
    value::bson_eq,
};

/// A lazily-executed query over one model's collection.
///
/// Execution happens at most once per façade; the materialized sequence is
/// cached and every subsequent read answers from the cache. The cache is
/// private to this value and is never shared with or copied into a derived
/// façade.
pub struct QuerySet<'a, B: DocumentBackend, M: Model> {
    backend: &'a B,
    config: StoreConfig,
    filter: Option<Expr>,
    ordering: Vec<String>,
    cache: Option<Vec<M>>,
}

impl<'a, B: DocumentBackend, M: Model> QuerySet<'a, B, M> {
    pub(crate) fn new(backend: &'a B, config: StoreConfig) -> Self {
        Self { backend, config, filter: None, ordering: Vec::new(), cache: None }
    }

    /// The collection this façade addresses under the store's mode.
    pub fn collection_name(&self) -> &'static str {
        M::descriptor().collection_name(self.config.mode())
    }

    /// Derives a façade with `expr` ANDed onto the current filter.
    ///
    /// Purely structural: no execution happens, and the derived façade
    /// starts with an empty cache.
    pub fn filter(&self, expr: Expr) -> Self {
        let filter = match self.filter.clone() {
            Some(existing) => Some(existing.and(expr)),
            None => Some(expr),
        };
        Self {
            backend: self.backend,
            config: self.config,
            filter,
            ordering: self.ordering.clone(),
            cache: None,
        }
    }

    /// Derives a façade ordered by the given specs, replacing any previous
    /// ordering.
    ///
    /// Specs follow the `"field"` / `"-field"` convention; `-` means
    /// descending. Primary-key specs are ignored at execution time.
    pub fn order_by<I, S>(&self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            backend: self.backend,
            config: self.config,
            filter: self.filter.clone(),
            ordering: specs.into_iter().map(Into::into).collect(),
            cache: None,
        }
    }

    /// Executes the query if this façade has not executed yet, then returns
    /// the cached sequence.
    pub async fn fetch(&mut self) -> ModelStoreResult<&[M]> {
        if self.cache.is_none() {
            let query = build_query(M::descriptor(), self.filter.as_ref(), &self.ordering);
            let results = materialize(self.backend, query, self.collection_name()).await?;
            self.cache = Some(results);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    /// Returns the first cached instance matching every lookup pair.
    ///
    /// Each lookup compares an attribute's current value against the given
    /// value; a lookup naming a reference field's base name falls back to
    /// its `"<name>_id"` accessor when the base name has no accessor of its
    /// own. Comparison is by normalized value, so integer lookups match
    /// regardless of stored width.
    ///
    /// # Errors
    ///
    /// `DoesNotExist` when no cached instance matches (always the case on
    /// an empty collection), `UnknownAttribute` when a lookup names an
    /// attribute outside the model's access table.
    pub async fn get<I, K, V>(&mut self, lookups: I) -> ModelStoreResult<M>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Bson>,
    {
        let lookups: Vec<(String, Bson)> = lookups
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        self.fetch().await?;
        let cache = self.cache.as_deref().unwrap_or_default();

        for instance in cache {
            let mut matched = true;
            for (attribute, expected) in &lookups {
                let actual = lookup_attribute(instance, attribute)?;
                if !bson_eq(&actual, expected) {
                    matched = false;
                    break;
                }
            }
            if matched {
                return Ok(instance.clone());
            }
        }

        Err(ModelStoreError::DoesNotExist { model: M::descriptor().model_name() })
    }

    /// Materializes and returns the whole result sequence.
    pub async fn iterator(&mut self) -> ModelStoreResult<Vec<M>> {
        self.fetch().await?;
        Ok(self.cache.clone().unwrap_or_default())
    }

    /// Materializes and returns the instance at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index` is outside the materialized sequence.
    pub async fn index(&mut self, index: usize) -> ModelStoreResult<M> {
        self.fetch().await?;
        let cache = self.cache.as_deref().unwrap_or_default();
        cache
            .get(index)
            .cloned()
            .ok_or(ModelStoreError::IndexOutOfRange { index, len: cache.len() })
    }

    /// Materializes and reports whether any instance matched.
    pub async fn exists(&mut self) -> ModelStoreResult<bool> {
        Ok(!self.fetch().await?.is_empty())
    }

    /// Materializes and returns the number of matching instances.
    pub async fn count(&mut self) -> ModelStoreResult<usize> {
        Ok(self.fetch().await?.len())
    }
}

// A clone carries the query definition, never the cache.
impl<'a, B: DocumentBackend, M: Model> Clone for QuerySet<'a, B, M> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend,
            config: self.config,
            filter: self.filter.clone(),
            ordering: self.ordering.clone(),
            cache: None,
        }
    }
}

/// Resolves an attribute value through the access table, falling back to
/// the `"<name>_id"` entry for reference fields looked up by base name.
fn lookup_attribute<M: Model>(instance: &M, attribute: &str) -> ModelStoreResult<Bson> {
    if let Some(value) = instance.attribute(attribute) {
        return Ok(value);
    }
    let with_suffix = format!("{attribute}_id");
    instance
        .attribute(&with_suffix)
        .ok_or_else(|| ModelStoreError::UnknownAttribute {
            model: M::descriptor().model_name(),
            attribute: attribute.to_string(),
        })
}
