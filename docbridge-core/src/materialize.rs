//! Query execution and instance hydration.
//!
//! The materializer sits between the façade and the backend: it folds the
//! translated filter clauses and ordering specs into a [`CollectionQuery`],
//! keyed by stored names, runs the query in one round trip, and hydrates
//! every returned document into a model instance. The full sequence is
//! built in memory before anything is returned; nothing streams.

use crate::{
    backend::DocumentBackend,
    error::ModelStoreResult,
    fieldmap::FieldMap,
    filter::{Expr, extract_equality},
    model::{Model, ModelDescriptor, ModelExt},
    query::{CollectionQuery, SortDirection},
};

/// Translates a filter expression and ordering specs into a backend query.
///
/// Filter attributes and ordering fields are rewritten to their stored keys
/// so renamed fields match what the store actually holds. Ordering specs
/// use the `"field"` / `"-field"` convention, `-` meaning descending;
/// primary-key specs (`"pk"` or the declared primary-key attribute) are
/// skipped because the store has no primary-key ordering of its own.
pub fn build_query(
    descriptor: &ModelDescriptor,
    filter: Option<&Expr>,
    ordering: &[String],
) -> CollectionQuery {
    let field_map = FieldMap::for_model(descriptor);
    let mut query = CollectionQuery::new();

    if let Some(expr) = filter {
        for (attribute, value) in extract_equality(expr) {
            query = query.where_eq(field_map.stored_key_for(&attribute), value);
        }
    }

    for spec in ordering {
        let (attribute, direction) = match spec.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (spec.as_str(), SortDirection::Asc),
        };
        if attribute == "pk" || attribute == descriptor.primary_key() {
            continue;
        }
        query = query.order_by(field_map.stored_key_for(attribute), direction);
    }

    query
}

/// Runs a translated query and hydrates every returned document.
///
/// # Errors
///
/// Backend failures propagate unchanged; a document that fails to
/// deserialize into `M` aborts the whole materialization with a
/// `Serialization` error.
pub async fn materialize<B, M>(
    backend: &B,
    query: CollectionQuery,
    collection: &str,
) -> ModelStoreResult<Vec<M>>
where
    B: DocumentBackend,
    M: Model,
{
    log::debug!(
        "materializing {} from collection {} ({} clause(s), {} ordering(s))",
        M::descriptor().model_name(),
        collection,
        query.clauses.len(),
        query.order.len(),
    );
    let documents = backend.query_documents(query, collection).await?;
    documents.into_iter().map(M::from_document).collect()
}
