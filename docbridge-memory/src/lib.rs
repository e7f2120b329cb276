//! In-memory storage backend for docbridge.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `DocumentBackend` trait. It uses async-aware read-write locks for
//! concurrent access and is ideal for development and tests: collections
//! live in ordered maps, so unordered listings come back in a stable
//! identifier order run after run.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Strict creates** - Creating at an occupied identifier fails, never overwrites
//! - **Equality queries with ordering** - The full translated-query contract
//! - **Deterministic listings** - Unordered results come back sorted by identifier
//!
//! # Quick Start
//!
//! ```ignore
//! use docbridge::prelude::*;
//! use docbridge::memory::InMemoryBackend;
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryBackend::new();
//!     let id = backend
//!         .create_document(None, doc! { "name": "Alice" }, "teacher")
//!         .await?;
//!     let fetched = backend.get_document(&id, "teacher").await?;
//!     assert!(fetched.is_some());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_memory;

pub mod store;

pub use store::{InMemoryBackend, InMemoryBackendBuilder};
