//! Store configuration.
//!
//! Every [`ModelStore`](crate::store::ModelStore) carries an explicit
//! [`StoreConfig`] selecting which of a model's two declared collections is
//! addressed. There is no ambient global switch; the mode is fixed at store
//! construction.

/// Which collection-name declaration a store addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Use each model's production collection name.
    Production,
    /// Use each model's test collection name.
    Test,
}

/// Configuration handed to a store at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    mode: StoreMode,
}

impl StoreConfig {
    /// Creates a configuration with the given mode.
    pub fn new(mode: StoreMode) -> Self {
        Self { mode }
    }

    /// Shorthand for a production-mode configuration.
    pub fn production() -> Self {
        Self::new(StoreMode::Production)
    }

    /// Shorthand for a test-mode configuration.
    pub fn test() -> Self {
        Self::new(StoreMode::Test)
    }

    /// The configured mode.
    pub fn mode(&self) -> StoreMode {
        self.mode
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::production()
    }
}
