//! # Pattern Catalog
//!
//! A small in-process catalog of runnable design-pattern demonstrations.
//!
//! ## Patterns Covered
//!
//! 1. **Builder** (creational) - a hamburger assembled through setters and
//!    frozen into an immutable product by `build()`
//! 2. **Delegation** (behavioral) - a subject forwarding two optional
//!    callbacks to a weakly held delegate
//! 3. **Dependency Injection** (structural) - one storage dependency supplied
//!    by constructor, by property and by method argument
//!
//! ## Usage
//!
//! ```
//! use pattern_catalog::{ExampleRunner, PatternCatalog};
//! use serde_json::json;
//!
//! let catalog = PatternCatalog::with_builtins().unwrap();
//! let builder = catalog.lookup("Builder").unwrap();
//!
//! let input = json!({ "patties": 2, "cheese": true });
//! let output = ExampleRunner::new().run(builder, Some(&input)).unwrap();
//! assert_eq!(output.value.unwrap()["patties"], 2);
//! ```
//!
//! Run the command-line host with: `cargo run -- list`

pub mod catalog;
pub mod config;
pub mod error;
pub mod patterns;
pub mod runner;

pub use catalog::{Category, ExampleDescriptor, Listing, PatternCatalog};
pub use config::CatalogConfig;
pub use error::{CatalogError, ExampleFailure, Result};
pub use runner::{ExampleRunner, Output, Transcript};
