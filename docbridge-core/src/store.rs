//! Main store interface binding a backend to the model layer.
//!
//! A [`ModelStore`] owns a backend and a [`StoreConfig`] and hands out
//! per-model [`Manager`]s. It is the one value application code constructs
//! at startup.
//!
//! # Example
//!
//! ```ignore
//! use docbridge::store::ModelStore;
//! use docbridge::config::StoreConfig;
//!
//! let store = ModelStore::new(backend, StoreConfig::production());
//! let teachers = store.objects::<Teacher>();
//! ```

use crate::{
    backend::DocumentBackend,
    config::StoreConfig,
    error::ModelStoreResult,
    manager::Manager,
    model::Model,
};

/// A model store bound to a specific backend implementation.
///
/// Construct one per process; the backend handle inside is safe for
/// concurrent use across tasks, and every manager handed out borrows it.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct ModelStore<B: DocumentBackend> {
    backend: B,
    config: StoreConfig,
}

impl<B: DocumentBackend> ModelStore<B> {
    /// Creates a new store over the given backend and configuration.
    pub fn new(backend: B, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    /// The store's configuration.
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// A reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The manager for a model type.
    ///
    /// The collection the manager addresses is determined by the model's
    /// descriptor and this store's mode.
    pub fn objects<M: Model>(&self) -> Manager<'_, B, M> {
        Manager::new(&self.backend, self.config)
    }

    /// Shuts down the store and releases backend resources.
    ///
    /// This consumes the store and should be called when no longer needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown operation fails.
    pub async fn shutdown(self) -> ModelStoreResult<()> {
        self.backend.shutdown().await?;

        Ok(())
    }
}
