//! The raw document shape exchanged with storage backends.
//!
//! Backends deal exclusively in [`RawDocument`]: a string identifier plus the
//! stored field mapping, with no knowledge of the model type it hydrates
//! into. All shape handling (field renames, primary-key injection) happens in
//! the model layer above.

use bson::Document as BsonDocument;
use serde::{Deserialize, Serialize};

/// A document as stored: identifier plus field mapping.
///
/// The identifier is never part of `data`; backends lift it out of whatever
/// native representation they use (a map key, an `_id` field) before handing
/// the document up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// The document's identifier within its collection.
    pub id: String,
    /// The stored fields, keyed by stored key name.
    pub data: BsonDocument,
}

impl RawDocument {
    /// Creates a raw document from an identifier and its stored fields.
    pub fn new(id: impl Into<String>, data: BsonDocument) -> Self {
        Self { id: id.into(), data }
    }
}
