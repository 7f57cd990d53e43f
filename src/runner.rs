use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::{ExampleDescriptor, PatternCatalog};
use crate::error::{CatalogError, Result};

/// What an example produced: the text it would have printed, and optionally
/// a structured result for assertions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Output {
    pub fn text_only(text: impl Into<String>) -> Self {
        Output {
            text: text.into(),
            value: None,
        }
    }

    pub fn with_value(text: impl Into<String>, value: Value) -> Self {
        Output {
            text: text.into(),
            value: Some(value),
        }
    }
}

/// Stands in for the console while an example runs.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_output(self, value: Option<Value>) -> Output {
        Output {
            text: self.lines.join("\n"),
            value,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExampleRunner;

impl ExampleRunner {
    pub fn new() -> Self {
        ExampleRunner
    }

    /// Runs one example. Both an `Err` from the example and a panic inside it
    /// come back as [`CatalogError::ExecutionError`] naming the descriptor.
    ///
    /// A panic still goes through the process panic hook first, which by
    /// default prints to stderr. Hosts that need a silent run should install
    /// their own hook with [`std::panic::set_hook`].
    pub fn run(&self, descriptor: &ExampleDescriptor, input: Option<&Value>) -> Result<Output> {
        debug!(name = descriptor.name(), has_input = input.is_some(), "running example");

        match panic::catch_unwind(AssertUnwindSafe(|| descriptor.invoke(input))) {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(source)) => Err(CatalogError::execution(descriptor.name(), source)),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "example panicked".to_string());
                warn!(name = descriptor.name(), %message, "example panicked");
                Err(CatalogError::execution(descriptor.name(), message.into()))
            }
        }
    }

    pub fn run_named(
        &self,
        catalog: &PatternCatalog,
        name: &str,
        input: Option<&Value>,
    ) -> Result<Output> {
        let descriptor = catalog.lookup(name)?;
        self.run(descriptor, input)
    }
}
