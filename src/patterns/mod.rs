//! The built-in pattern examples.
//!
//! Each submodule is a self-contained demonstration exposing a
//! `descriptor()` that the catalog registers at startup.

pub mod builder;
pub mod delegate;
pub mod injection;

use crate::catalog::{ExampleDescriptor, PatternCatalog};
use crate::config::CatalogConfig;
use crate::error::Result;

/// Built-in descriptors in their canonical registration order.
pub fn builtin_descriptors() -> Vec<ExampleDescriptor> {
    vec![
        builder::descriptor(),
        delegate::descriptor(),
        injection::descriptor(),
    ]
}

impl PatternCatalog {
    pub fn with_builtins() -> Result<Self> {
        Self::from_config(&CatalogConfig::default())
    }

    /// Registers every built-in example that the config does not disable.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut catalog = PatternCatalog::new();
        for descriptor in builtin_descriptors() {
            if config.is_disabled(descriptor.name()) {
                tracing::debug!(name = descriptor.name(), "pattern disabled by config");
                continue;
            }
            catalog.register(descriptor)?;
        }
        Ok(catalog)
    }
}
