//! The pattern registry.
//!
//! A [`PatternCatalog`] is populated once at startup and read afterwards.
//! It holds only immutable [`ExampleDescriptor`]s, so a finished catalog can
//! be shared between threads behind an `Arc` without further locking.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogError, ExampleFailure, Result};
use crate::runner::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Creational,
    Structural,
    Behavioral,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Creational,
        Category::Structural,
        Category::Behavioral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Creational => "Creational",
            Category::Structural => "Structural",
            Category::Behavioral => "Behavioral",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// The runnable part of a descriptor.
pub type ExampleFn =
    dyn Fn(Option<&Value>) -> std::result::Result<Output, ExampleFailure> + Send + Sync;

/// Immutable description of one pattern example.
#[derive(Clone)]
pub struct ExampleDescriptor {
    name: String,
    category: Category,
    description: String,
    sample_input: Option<Value>,
    run: Arc<ExampleFn>,
}

impl ExampleDescriptor {
    pub fn new<F>(
        name: impl Into<String>,
        category: Category,
        description: impl Into<String>,
        run: F,
    ) -> Self
    where
        F: Fn(Option<&Value>) -> std::result::Result<Output, ExampleFailure>
            + Send
            + Sync
            + 'static,
    {
        ExampleDescriptor {
            name: name.into(),
            category,
            description: description.into(),
            sample_input: None,
            run: Arc::new(run),
        }
    }

    /// Attaches an input that shows off the example, for display only.
    pub fn with_sample_input(mut self, input: Value) -> Self {
        self.sample_input = Some(input);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sample_input(&self) -> Option<&Value> {
        self.sample_input.as_ref()
    }

    pub(crate) fn invoke(
        &self,
        input: Option<&Value>,
    ) -> std::result::Result<Output, ExampleFailure> {
        (self.run)(input)
    }
}

impl fmt::Debug for ExampleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Registry of examples keyed by unique name, kept in registration order.
#[derive(Debug, Default)]
pub struct PatternCatalog {
    entries: Vec<ExampleDescriptor>,
    index: HashMap<String, usize>,
}

impl PatternCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ExampleDescriptor) -> Result<()> {
        if self.index.contains_key(descriptor.name()) {
            return Err(CatalogError::conflict(descriptor.name()));
        }

        debug!(
            name = descriptor.name(),
            category = %descriptor.category(),
            "registered pattern"
        );
        self.index
            .insert(descriptor.name().to_string(), self.entries.len());
        self.entries.push(descriptor);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&ExampleDescriptor> {
        debug!(name, "looking up pattern");
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| CatalogError::not_found(name))
    }

    pub fn list(&self, category: Option<Category>) -> Listing<'_> {
        Listing {
            entries: &self.entries,
            category,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|d| d.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A filtered view over the catalog. Nothing is evaluated until iterated,
/// and every call to [`Listing::iter`] starts again from the first entry.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    entries: &'a [ExampleDescriptor],
    category: Option<Category>,
}

impl<'a> Listing<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a ExampleDescriptor> + Clone + 'a {
        let category = self.category;
        self.entries
            .iter()
            .filter(move |d| category.map_or(true, |c| d.category() == c))
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }
}

impl<'a> IntoIterator for Listing<'a> {
    type Item = &'a ExampleDescriptor;
    type IntoIter = Box<dyn Iterator<Item = &'a ExampleDescriptor> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
