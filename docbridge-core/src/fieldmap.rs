//! Stored-key to attribute-name translation.
//!
//! A model may store a field under a key that differs from its attribute
//! name (a reference field `teacher` stored as `"teacherId"`, say). The
//! [`FieldMap`] holds exactly the non-identity pairs and rewrites documents
//! in both directions: stored keys to attribute names on the read path,
//! attribute names back to stored keys on the write path. Keys outside the
//! map pass through untouched, and a key missing from a document is simply
//! not translated.

use bson::Document as BsonDocument;

use crate::model::ModelDescriptor;

/// The non-identity (stored-key, attribute) pairs of one model type.
#[derive(Debug, Clone)]
pub struct FieldMap {
    entries: Vec<(&'static str, &'static str)>,
}

impl FieldMap {
    /// Builds the map from a descriptor, keeping only fields whose stored
    /// key differs from their attribute name.
    pub fn for_model(descriptor: &ModelDescriptor) -> Self {
        let entries = descriptor
            .fields()
            .iter()
            .filter_map(|field| {
                field
                    .stored_key
                    .filter(|stored| *stored != field.name)
                    .map(|stored| (stored, field.name))
            })
            .collect();
        Self { entries }
    }

    /// Rewrites stored keys to attribute names.
    ///
    /// For every mapped pair whose stored key is present, the value moves to
    /// the attribute name and the stored key is removed.
    pub fn to_instance_fields(&self, mut data: BsonDocument) -> BsonDocument {
        for (stored_key, attribute) in &self.entries {
            if let Some(value) = data.remove(stored_key) {
                data.insert(*attribute, value);
            }
        }
        data
    }

    /// Rewrites attribute names back to stored keys. The inverse of
    /// [`to_instance_fields`](Self::to_instance_fields), used on the write
    /// path.
    pub fn to_stored_fields(&self, mut data: BsonDocument) -> BsonDocument {
        for (stored_key, attribute) in &self.entries {
            if let Some(value) = data.remove(attribute) {
                data.insert(*stored_key, value);
            }
        }
        data
    }

    /// The stored key for an attribute; the attribute itself when unmapped.
    pub fn stored_key_for<'a>(&'a self, attribute: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(_, attr)| *attr == attribute)
            .map(|(stored, _)| *stored)
            .unwrap_or(attribute)
    }

    /// Returns `true` when no field needs translation.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use crate::model::{FieldDef, ModelDescriptor};

    fn descriptor() -> ModelDescriptor {
        ModelDescriptor::builder("Student")
            .prod_collection("student")
            .test_collection("test_student")
            .primary_key("id")
            .field(FieldDef::new("name"))
            .field(FieldDef::reference("teacher").stored_as("teacherId"))
            .build()
            .unwrap()
    }

    #[test]
    fn stored_keys_move_to_attribute_names() {
        let map = FieldMap::for_model(&descriptor());
        let mapped = map.to_instance_fields(doc! { "teacherId": "t1", "name": "Bob" });

        assert_eq!(mapped, doc! { "name": "Bob", "teacher": "t1" });
        assert!(!mapped.contains_key("teacherId"));
    }

    #[test]
    fn unmapped_keys_pass_through() {
        let map = FieldMap::for_model(&descriptor());
        let mapped = map.to_instance_fields(doc! { "name": "Bob", "extra": 3 });

        assert_eq!(mapped, doc! { "name": "Bob", "extra": 3 });
    }

    #[test]
    fn write_path_restores_stored_keys() {
        let map = FieldMap::for_model(&descriptor());
        let stored = map.to_stored_fields(doc! { "name": "Bob", "teacher": "t1" });

        assert_eq!(stored, doc! { "name": "Bob", "teacherId": "t1" });
    }

    #[test]
    fn stored_key_lookup_defaults_to_identity() {
        let map = FieldMap::for_model(&descriptor());

        assert_eq!(map.stored_key_for("teacher"), "teacherId");
        assert_eq!(map.stored_key_for("name"), "name");
    }
}
