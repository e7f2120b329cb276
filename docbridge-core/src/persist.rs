//! Model persistence.
//!
//! The write path, as a second `impl` block on [`Manager`]: serializing an
//! instance to its stored mapping, creating the document (strictly a
//! create, never an upsert), and running uniqueness validation against the
//! existing collection contents.

use crate::{
    backend::DocumentBackend,
    error::{ModelStoreError, ModelStoreResult, ValidationErrors},
    manager::Manager,
    model::{Model, ModelExt},
};

impl<'a, B: DocumentBackend, M: Model> Manager<'a, B, M> {
    /// Persists `instance` as a new document in the active collection.
    ///
    /// The document identifier comes from the instance's
    /// [`generate_document_id`](Model::generate_document_id) hook; the
    /// default of `None` lets the store assign one. On success the
    /// instance's primary-key attribute is set to the assigned identifier.
    ///
    /// Uniqueness checks are not run here; callers that declare
    /// unique-together constraints invoke
    /// [`validate_unique`](Self::validate_unique) first.
    ///
    /// # Errors
    ///
    /// `DocumentAlreadyExists` when a generated identifier is already in
    /// use. Serialization and backend failures propagate unchanged.
    pub async fn save(&self, instance: &mut M) -> ModelStoreResult<()> {
        let document_id = instance.generate_document_id();
        let data = instance.to_document()?;
        log::debug!(
            "saving {} into collection {}",
            M::descriptor().model_name(),
            self.collection_name(),
        );
        let assigned = self
            .backend()
            .create_document(document_id.as_deref(), data, self.collection_name())
            .await?;
        instance.set_document_id(assigned);
        Ok(())
    }

    /// Checks `instance` against every declared unique-together constraint.
    ///
    /// For each constraint, the candidate's current attribute values
    /// (reference fields contribute their identifier string) are matched
    /// against the collection with a `get`. Violations accumulate across
    /// all constraints; the pass never stops at the first failed
    /// constraint.
    ///
    /// # Errors
    ///
    /// `Validation` carrying one entry per violated constraint, in
    /// declaration order. Backend failures during a check propagate
    /// unchanged.
    pub async fn validate_unique(&self, instance: &M) -> ModelStoreResult<()> {
        let descriptor = M::descriptor();
        let mut errors = ValidationErrors::new();

        for constraint in descriptor.unique_together() {
            let mut lookups = Vec::with_capacity(constraint.len());
            for attribute in *constraint {
                let value = instance
                    .attribute(attribute)
                    .or_else(|| instance.attribute(&format!("{attribute}_id")))
                    .ok_or_else(|| ModelStoreError::UnknownAttribute {
                        model: descriptor.model_name(),
                        attribute: (*attribute).to_string(),
                    })?;
                lookups.push(((*attribute).to_string(), value));
            }

            match self.all().get(lookups).await {
                Ok(_) => {
                    let fields = constraint.join(", ");
                    errors.push(
                        fields.clone(),
                        format!(
                            "{} with this {} already exists.",
                            descriptor.model_name(),
                            fields
                        ),
                    );
                }
                Err(ModelStoreError::DoesNotExist { .. }) => {}
                Err(other) => return Err(other),
            }
        }

        errors.into_result()
    }
}
