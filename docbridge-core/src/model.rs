//! Core traits and types for persistable model declaration.
//!
//! This module provides the [`Model`] trait every persistable type
//! implements (normally through `#[derive(Model)]`), the static
//! [`ModelDescriptor`] describing a type's collections and fields, and the
//! [`ModelExt`] codec helpers between instances and stored documents.

use bson::{Bson, Document as BsonDocument, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use serde_json::{Value, to_value};

use crate::{
    config::StoreMode,
    document::RawDocument,
    error::{ModelStoreError, ModelStoreResult},
    fieldmap::FieldMap,
};

/// Declaration of one model field.
///
/// `stored_key` is only set when the stored name differs from the attribute
/// name; `reference` marks foreign-key-style fields whose value is another
/// document's identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// The attribute name on the model type.
    pub name: &'static str,
    /// The key the field is stored under, when it differs from `name`.
    pub stored_key: Option<&'static str>,
    /// Whether the field holds another document's identifier.
    pub reference: bool,
}

impl FieldDef {
    /// A plain field stored under its own name.
    pub fn new(name: &'static str) -> Self {
        Self { name, stored_key: None, reference: false }
    }

    /// A reference field holding another document's identifier.
    pub fn reference(name: &'static str) -> Self {
        Self { name, stored_key: None, reference: true }
    }

    /// Overrides the stored key.
    pub fn stored_as(mut self, key: &'static str) -> Self {
        self.stored_key = Some(key);
        self
    }
}

/// Static, per-type declaration of collections, fields and constraints.
///
/// Built once per model type (the derive macro holds it in a `LazyLock`)
/// and immutable thereafter. Construction validates the declaration; a
/// missing collection name is a [`ModelStoreError::Configuration`] failure.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    model_name: &'static str,
    prod_collection: &'static str,
    test_collection: &'static str,
    primary_key: &'static str,
    fields: Vec<FieldDef>,
    unique_together: Vec<&'static [&'static str]>,
}

impl ModelDescriptor {
    /// Starts building a descriptor for the named model type.
    pub fn builder(model_name: &'static str) -> ModelDescriptorBuilder {
        ModelDescriptorBuilder {
            model_name,
            prod_collection: None,
            test_collection: None,
            primary_key: None,
            fields: Vec::new(),
            unique_together: Vec::new(),
        }
    }

    /// The model type's name, used in error reporting.
    pub fn model_name(&self) -> &'static str {
        self.model_name
    }

    /// The collection addressed under the given mode.
    pub fn collection_name(&self, mode: StoreMode) -> &'static str {
        match mode {
            StoreMode::Production => self.prod_collection,
            StoreMode::Test => self.test_collection,
        }
    }

    /// The primary-key attribute name.
    pub fn primary_key(&self) -> &'static str {
        self.primary_key
    }

    /// The declared fields, primary key excluded.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Looks up a field declaration by attribute name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The declared unique-together constraints, in declaration order.
    pub fn unique_together(&self) -> &[&'static [&'static str]] {
        &self.unique_together
    }
}

/// Fallible builder for [`ModelDescriptor`].
#[derive(Debug)]
pub struct ModelDescriptorBuilder {
    model_name: &'static str,
    prod_collection: Option<&'static str>,
    test_collection: Option<&'static str>,
    primary_key: Option<&'static str>,
    fields: Vec<FieldDef>,
    unique_together: Vec<&'static [&'static str]>,
}

impl ModelDescriptorBuilder {
    /// Sets the production collection name.
    pub fn prod_collection(mut self, name: &'static str) -> Self {
        self.prod_collection = Some(name);
        self
    }

    /// Sets the test collection name.
    pub fn test_collection(mut self, name: &'static str) -> Self {
        self.test_collection = Some(name);
        self
    }

    /// Names the primary-key attribute.
    pub fn primary_key(mut self, name: &'static str) -> Self {
        self.primary_key = Some(name);
        self
    }

    /// Declares a field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares a unique-together constraint over the named attributes.
    pub fn unique_together(mut self, attributes: &'static [&'static str]) -> Self {
        self.unique_together.push(attributes);
        self
    }

    /// Validates the declaration and builds the descriptor.
    ///
    /// # Errors
    ///
    /// a `Configuration` error when either collection name or the primary
    /// key is missing or empty.
    pub fn build(self) -> ModelStoreResult<ModelDescriptor> {
        let prod_collection = self
            .prod_collection
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ModelStoreError::Configuration(format!(
                    "model {} is missing its production collection name",
                    self.model_name
                ))
            })?;
        let test_collection = self
            .test_collection
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ModelStoreError::Configuration(format!(
                    "model {} is missing its test collection name",
                    self.model_name
                ))
            })?;
        let primary_key = self
            .primary_key
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ModelStoreError::Configuration(format!(
                    "model {} is missing its primary-key field",
                    self.model_name
                ))
            })?;

        Ok(ModelDescriptor {
            model_name: self.model_name,
            prod_collection,
            test_collection,
            primary_key,
            fields: self.fields,
            unique_together: self.unique_together,
        })
    }
}

/// A named accessor into a model instance.
///
/// Accessor tables are generated per model type and replace runtime
/// attribute introspection: every lookupable attribute has an entry, and
/// reference fields get a secondary `"<name>_id"` entry yielding the same
/// identifier string.
pub struct FieldAccessor<M> {
    /// The attribute name the accessor answers for.
    pub name: &'static str,
    /// Extracts the attribute's current value as BSON.
    pub get: fn(&M) -> Bson,
}

/// Core trait that all persistable model types implement.
///
/// Normally implemented through `#[derive(Model)]`; the derive builds the
/// descriptor from container attributes, wires the primary-key accessors
/// and generates the field-access table.
///
/// # Example
///
/// ```ignore
/// use docbridge::prelude::*;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize, Model)]
/// #[model(prod_collection = "teacher", test_collection = "test_teacher")]
/// pub struct Teacher {
///     #[model(primary_key)]
///     pub id: Option<String>,
///     pub name: String,
/// }
/// ```
pub trait Model: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns this type's descriptor.
    ///
    /// # Panics
    ///
    /// Implementations generated by the derive macro build the descriptor
    /// lazily and panic on first access when the declaration is invalid
    /// (consistent with a configuration error being fatal).
    fn descriptor() -> &'static ModelDescriptor;

    /// The instance's document identifier, when it has one.
    ///
    /// Unsaved instances without a generated identifier return `None`.
    fn document_id(&self) -> Option<&str>;

    /// Records the identifier assigned by the store.
    fn set_document_id(&mut self, id: String);

    /// The type's field-access table.
    fn accessors() -> &'static [FieldAccessor<Self>];

    /// Produces the document identifier to persist under.
    ///
    /// The default lets the store generate one. Override (via the derive's
    /// `document_id_with` attribute) to derive a deterministic identifier
    /// from a natural key.
    fn generate_document_id(&self) -> Option<String> {
        None
    }

    /// Reads an attribute's current value through the access table.
    fn attribute(&self, name: &str) -> Option<Bson> {
        Self::accessors()
            .iter()
            .find(|accessor| accessor.name == name)
            .map(|accessor| (accessor.get)(self))
    }
}

/// Extension trait providing codec utilities between instances and stored
/// documents.
///
/// Automatically implemented for all [`Model`] types.
pub trait ModelExt: Model {
    /// Serializes the instance to its stored field mapping.
    ///
    /// The primary-key attribute is excluded (identifiers live outside the
    /// stored data) and renamed fields are written under their stored keys.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the instance does not
    /// serialize to a mapping.
    fn to_document(&self) -> ModelStoreResult<BsonDocument>;

    /// Hydrates an instance from a stored document.
    ///
    /// Stored keys are rewritten to attribute names and the document's
    /// identifier is injected under the primary-key attribute before
    /// deserializing.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    fn from_document(raw: RawDocument) -> ModelStoreResult<Self>;

    /// Converts the instance to a JSON value for display surfaces.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_json(&self) -> ModelStoreResult<Value>;
}

impl<M: Model> ModelExt for M {
    fn to_document(&self) -> ModelStoreResult<BsonDocument> {
        let descriptor = Self::descriptor();
        let serialized = serialize_to_bson(self)?;
        let mut data = match serialized {
            Bson::Document(data) => data,
            other => {
                return Err(ModelStoreError::Serialization(format!(
                    "model {} serialized to non-document BSON: {:?}",
                    descriptor.model_name(),
                    other.element_type()
                )));
            }
        };
        data.remove(descriptor.primary_key());
        Ok(FieldMap::for_model(descriptor).to_stored_fields(data))
    }

    fn from_document(raw: RawDocument) -> ModelStoreResult<Self> {
        let descriptor = Self::descriptor();
        let mut data = FieldMap::for_model(descriptor).to_instance_fields(raw.data);
        data.insert(descriptor.primary_key(), raw.id);
        Ok(deserialize_from_bson(Bson::Document(data))?)
    }

    fn to_json(&self) -> ModelStoreResult<Value> {
        Ok(to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_without_prod_collection_is_rejected() {
        let result = ModelDescriptor::builder("Teacher")
            .test_collection("test_teacher")
            .primary_key("id")
            .build();

        assert!(matches!(result, Err(ModelStoreError::Configuration(_))));
    }

    #[test]
    fn descriptor_without_test_collection_is_rejected() {
        let result = ModelDescriptor::builder("Teacher")
            .prod_collection("teacher")
            .primary_key("id")
            .build();

        assert!(matches!(result, Err(ModelStoreError::Configuration(_))));
    }

    #[test]
    fn empty_collection_name_counts_as_missing() {
        let result = ModelDescriptor::builder("Teacher")
            .prod_collection("")
            .test_collection("test_teacher")
            .primary_key("id")
            .build();

        assert!(matches!(result, Err(ModelStoreError::Configuration(_))));
    }

    #[test]
    fn complete_descriptor_builds() {
        let descriptor = ModelDescriptor::builder("Teacher")
            .prod_collection("teacher")
            .test_collection("test_teacher")
            .primary_key("id")
            .field(FieldDef::new("name"))
            .unique_together(&["name"])
            .build()
            .unwrap();

        assert_eq!(descriptor.collection_name(StoreMode::Production), "teacher");
        assert_eq!(descriptor.collection_name(StoreMode::Test), "test_teacher");
        assert_eq!(descriptor.unique_together().len(), 1);
        assert_eq!(descriptor.unique_together()[0], ["name"]);
    }
}
