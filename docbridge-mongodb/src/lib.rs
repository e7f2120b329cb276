//! MongoDB backend implementation for docbridge.
//!
//! This crate provides a MongoDB-based implementation of the `DocumentBackend`
//! trait, persisting model documents to a MongoDB deployment with the model
//! layer's equality filters and ordering pushed down to the server.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docbridge = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Persistent storage** - Data is persisted to MongoDB Atlas or self-hosted MongoDB
//! - **Server-side queries** - Equality filters and sorts run in MongoDB's query engine
//! - **Strict creation** - Duplicate identifiers are rejected by the server's `_id` index
//! - **Async/await** - Fully asynchronous API built on MongoDB's async driver
//!
//! # Connection
//!
//! To use this backend, you need a MongoDB connection string. This can be
//! provided through the builder pattern, along with an optional request
//! timeout applied to connection establishment and server selection.
//!
//! # Example
//!
//! ```ignore
//! use docbridge::{backend::BackendBuilder, mongodb::MongoBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MongoBackend::builder("mongodb://localhost:27017", "my_database")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_mongodb;

pub mod store;

pub use store::{MongoBackend, MongoBackendBuilder};
