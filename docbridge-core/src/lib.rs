//! An ORM-style model layer over document stores: relational-looking
//! queries (filter, order, get, save) translated onto a schemaless
//! document database.
//!
//! This crate is the core of the docbridge project and provides:
//!
//! - **Model traits** ([`model`]) - Declaration of persistable model types and their descriptors
//! - **Reference fields** ([`fields`]) - Foreign-key style fields holding document identifiers
//! - **Filter expressions** ([`filter`]) - The filter tree and its equality-only translator
//! - **Translated queries** ([`query`]) - The clause/ordering shape sent to backends
//! - **Field mapping** ([`fieldmap`]) - Stored-key to attribute-name translation
//! - **Materialization** ([`materialize`]) - Query execution and instance hydration
//! - **Query façades** ([`queryset`], [`manager`]) - The lazy, cached query surface
//! - **Persistence** ([`persist`]) - Create-only saves and uniqueness validation
//! - **Store backend abstraction** ([`backend`]) - The async trait storage implementations fill in
//! - **Store interface** ([`store`]) - The per-process entry point
//! - **Error handling** ([`error`]) - Comprehensive error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docbridge::prelude::*;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Model)]
//! #[model(prod_collection = "teacher", test_collection = "test_teacher")]
//! pub struct Teacher {
//!     #[model(primary_key)]
//!     pub id: Option<String>,
//!     pub name: String,
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_core;

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod fieldmap;
pub mod fields;
pub mod filter;
pub mod manager;
pub mod materialize;
pub mod model;
pub mod persist;
pub mod query;
pub mod queryset;
pub mod store;
pub mod value;
