//! Main docbridge crate providing an ORM-style model layer over document
//! stores.
//!
//! This crate is the primary entry point for users of the docbridge
//! framework. It re-exports the core model layer from various sub-crates
//! and provides convenient access to the different storage backends.
//!
//! # Features
//!
//! - **Declarative models** - Describe collections, fields and constraints with `#[derive(Model)]`
//! - **Familiar querying** - Lazily-executed, chainable query façades with `filter`, `order_by` and `get`
//! - **Two-mode collections** - Every model names a production and a test collection, switched by store configuration
//! - **Multiple backends** - In-memory and MongoDB storage behind one narrow backend trait
//! - **Strict creation** - Saves never overwrite; a duplicate identifier is reported as an error
//!
//! # Quick Start
//!
//! ```ignore
//! use docbridge::{prelude::*, memory::InMemoryBackend};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Model)]
//! #[model(prod_collection = "teacher", test_collection = "test_teacher")]
//! pub struct Teacher {
//!     #[model(primary_key)]
//!     pub id: Option<String>,
//!     pub name: String,
//!     pub subject: String,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // Create a store over the in-memory backend, addressing each
//!     // model's test collection
//!     let backend = InMemoryBackend::builder().build().await.unwrap();
//!     let store = ModelStore::new(backend, StoreConfig::test());
//!
//!     // Get the manager for Teacher documents
//!     let teachers = store.objects::<Teacher>();
//!
//!     // Persist a new instance; the store assigns the identifier
//!     let mut newton = Teacher {
//!         id: None,
//!         name: "Isaac".to_string(),
//!         subject: "physics".to_string(),
//!     };
//!     teachers.save(&mut newton).await.unwrap();
//!
//!     // Compose and run a query
//!     let found = teachers
//!         .filter(Q::eq("subject", "physics"))
//!         .order_by(["name"])
//!         .iterator()
//!         .await
//!         .unwrap();
//!
//!     println!("physics teachers: {:?}", found);
//!
//!     // Shutdown the store
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Uniqueness validation
//!
//! Models may declare `unique_together` constraints. Validation is an
//! explicit step before saving, and every violated constraint is reported
//! in one pass:
//!
//! ```ignore
//! use docbridge::prelude::*;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Model)]
//! #[model(
//!     prod_collection = "course",
//!     test_collection = "test_course",
//!     unique_together = "name, semester"
//! )]
//! pub struct Course {
//!     #[model(primary_key)]
//!     pub id: Option<String>,
//!     pub name: String,
//!     pub semester: String,
//! }
//!
//! # async fn example(courses: Manager<'_, impl DocumentBackend, Course>, mut candidate: Course) -> ModelStoreResult<()> {
//! courses.validate_unique(&candidate).await?;
//! courses.save(&mut candidate).await?;
//! # Ok(()) }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires the `mongodb` feature)

pub mod prelude;

pub use docbridge_core::{
    backend, config, document, error, fieldmap, fields, filter, manager, model, query, queryset,
    store, value,
};

// Re-export the derive macro and BSON types for convenience
pub use bson;
pub use docbridge_derive::Model;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docbridge_memory::{InMemoryBackend, InMemoryBackendBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docbridge_mongodb::{MongoBackend, MongoBackendBuilder};
}
