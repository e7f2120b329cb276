//! Reference fields.
//!
//! A [`ForeignKey`] stores the referenced document's identifier string and
//! nothing else: materializing a model never loads the referenced instance.
//! Dereferencing is explicit, through [`ForeignKey::resolve`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

use crate::{
    backend::DocumentBackend,
    error::ModelStoreResult,
    manager::Manager,
    model::Model,
};

/// A typed reference to another model's document.
///
/// Serializes as the bare identifier string, so a stored reference field is
/// indistinguishable from a plain string key in the document.
pub struct ForeignKey<M> {
    id: String,
    _marker: PhantomData<fn() -> M>,
}

impl<M> ForeignKey<M> {
    /// Creates a reference to the document with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), _marker: PhantomData }
    }

    /// The referenced document's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<M: Model> ForeignKey<M> {
    /// References a saved instance by its identifier.
    ///
    /// Returns `None` when the instance has not been persisted yet and so
    /// has no identifier to reference.
    pub fn to(target: &M) -> Option<Self> {
        target.document_id().map(Self::new)
    }

    /// Loads the referenced instance through the given manager.
    ///
    /// # Errors
    ///
    /// `DoesNotExist` when no document lives at the referenced identifier.
    pub async fn resolve<B: DocumentBackend>(
        &self,
        manager: &Manager<'_, B, M>,
    ) -> ModelStoreResult<M> {
        manager.get_by_id(&self.id).await
    }
}

impl<M> Clone for ForeignKey<M> {
    fn clone(&self) -> Self {
        Self { id: self.id.clone(), _marker: PhantomData }
    }
}

impl<M> std::fmt::Debug for ForeignKey<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ForeignKey").field(&self.id).finish()
    }
}

impl<M> std::fmt::Display for ForeignKey<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

impl<M> PartialEq for ForeignKey<M> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<M> Eq for ForeignKey<M> {}

impl<M> Serialize for ForeignKey<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

impl<'de, M> Deserialize<'de> for ForeignKey<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(String::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{Bson, ser::serialize_to_bson};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Marker;

    #[test]
    fn serializes_as_bare_identifier() {
        let fk: ForeignKey<Marker> = ForeignKey::new("Alice");
        assert_eq!(serialize_to_bson(&fk).unwrap(), Bson::String("Alice".into()));
    }

    #[test]
    fn deserializes_from_bare_identifier() {
        let fk: ForeignKey<Marker> =
            bson::de::deserialize_from_bson(Bson::String("Alice".into())).unwrap();
        assert_eq!(fk.id(), "Alice");
    }
}
