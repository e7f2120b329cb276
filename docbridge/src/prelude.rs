//! Convenient re-exports of commonly used types from docbridge.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use docbridge::prelude::*;
//! ```
//!
//! This provides access to:
//! - The `Model` trait, its derive macro and the codec extension trait
//! - Store, manager and query façade types
//! - Filter construction through `Q`
//! - Backend traits for wiring up storage
//! - Error and validation types

pub use docbridge_core::{
    backend::{BackendBuilder, DocumentBackend},
    config::{StoreConfig, StoreMode},
    document::RawDocument,
    error::{ConstraintViolation, ModelStoreError, ModelStoreResult, ValidationErrors},
    fields::ForeignKey,
    filter::{Expr, Lookup, Q},
    manager::Manager,
    model::{FieldAccessor, FieldDef, Model, ModelDescriptor, ModelExt},
    query::{CollectionQuery, Sort, SortDirection},
    queryset::QuerySet,
    store::ModelStore,
};
pub use docbridge_derive::Model;
