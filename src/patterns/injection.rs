//! Dependency injection: the same storage dependency supplied three ways.
//!
//! - constructor injection fixes the storage for the object's lifetime,
//! - property injection lets anyone swap it at any time,
//! - method injection passes it in for a single call.
//!
//! Property injection is the risky one. Swapping storage while another
//! caller is mid-way through a save leaves that caller talking to a backend
//! it never chose; nothing here prevents it, the swap is only logged.

use std::cell::RefCell;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::catalog::{Category, ExampleDescriptor};
use crate::error::ExampleFailure;
use crate::runner::{Output, Transcript};

pub const NAME: &str = "Dependency Injection";

pub trait Storage {
    fn name(&self) -> &'static str;
    fn save(&self, data: &str) -> String;
    fn load(&self) -> String;
}

#[derive(Debug, Default)]
pub struct DiskStorage {
    saved: RefCell<Vec<String>>,
}

impl Storage for DiskStorage {
    fn name(&self) -> &'static str {
        "disk"
    }

    fn save(&self, data: &str) -> String {
        self.saved.borrow_mut().push(data.to_string());
        format!("disk: wrote '{data}'")
    }

    fn load(&self) -> String {
        match self.saved.borrow().last() {
            Some(data) => format!("disk: read '{data}'"),
            None => "disk: nothing stored".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CloudStorage {
    saved: RefCell<Vec<String>>,
}

impl Storage for CloudStorage {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn save(&self, data: &str) -> String {
        self.saved.borrow_mut().push(data.to_string());
        format!("cloud: uploaded '{data}'")
    }

    fn load(&self) -> String {
        match self.saved.borrow().last() {
            Some(data) => format!("cloud: downloaded '{data}'"),
            None => "cloud: bucket empty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectionStrategy {
    Constructor,
    Property,
    Method,
}

impl fmt::Display for InjectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InjectionStrategy::Constructor => "constructor injection",
            InjectionStrategy::Property => "property injection",
            InjectionStrategy::Method => "method injection",
        };
        f.write_str(name)
    }
}

/// Which strategy ran, against which storage, and the save/load trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectionReport {
    pub strategy: InjectionStrategy,
    pub storage: Option<&'static str>,
    pub trace: Vec<String>,
}

/// Storage is fixed at construction.
pub struct DataManager {
    storage: Box<dyn Storage>,
}

impl DataManager {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        DataManager { storage }
    }

    pub fn storage_name(&self) -> &'static str {
        self.storage.name()
    }

    pub fn save(&self, data: &str) -> String {
        self.storage.save(data)
    }

    pub fn load(&self) -> String {
        self.storage.load()
    }
}

/// Storage is a public, replaceable property.
#[derive(Default)]
pub struct SwitchableDataManager {
    pub storage: Option<Box<dyn Storage>>,
}

impl SwitchableDataManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage_name(&self) -> Option<&'static str> {
        self.storage.as_ref().map(|s| s.name())
    }

    pub fn save(&self, data: &str) -> String {
        match &self.storage {
            Some(storage) => storage.save(data),
            None => format!("no storage set, dropped '{data}'"),
        }
    }

    pub fn load(&self) -> String {
        match &self.storage {
            Some(storage) => storage.load(),
            None => "no storage set, nothing to load".to_string(),
        }
    }
}

pub fn construct_data_storage(dependency: Box<dyn Storage>) -> InjectionReport {
    let manager = DataManager::new(dependency);
    let trace = vec![
        format!("constructed with {} storage", manager.storage_name()),
        manager.save("settings"),
        manager.load(),
    ];

    InjectionReport {
        strategy: InjectionStrategy::Constructor,
        storage: Some(manager.storage_name()),
        trace,
    }
}

pub fn assign_storage_dependency(
    target: &mut SwitchableDataManager,
    dependency: Box<dyn Storage>,
) -> InjectionReport {
    let mut trace = Vec::new();

    match target.storage_name() {
        Some(previous) => {
            warn!(
                from = previous,
                to = dependency.name(),
                "replacing storage of a live data manager"
            );
            trace.push(format!("replaced {previous} storage with {}", dependency.name()));
        }
        None => trace.push(format!("assigned {} storage", dependency.name())),
    }
    target.storage = Some(dependency);

    trace.push(target.save("settings"));
    trace.push(target.load());

    InjectionReport {
        strategy: InjectionStrategy::Property,
        storage: target.storage_name(),
        trace,
    }
}

/// The dependency lives only for the duration of `method`.
pub fn call_with_dependency<F>(method: F, dependency: &dyn Storage) -> InjectionReport
where
    F: FnOnce(&dyn Storage) -> Vec<String>,
{
    let mut trace = vec![format!("calling with {} storage", dependency.name())];
    trace.extend(method(dependency));

    InjectionReport {
        strategy: InjectionStrategy::Method,
        storage: Some(dependency.name()),
        trace,
    }
}

fn run(_input: Option<&Value>) -> std::result::Result<Output, ExampleFailure> {
    let mut reports = Vec::new();

    reports.push(construct_data_storage(Box::new(DiskStorage::default())));

    let mut switchable = SwitchableDataManager::new();
    reports.push(assign_storage_dependency(
        &mut switchable,
        Box::new(DiskStorage::default()),
    ));
    reports.push(assign_storage_dependency(
        &mut switchable,
        Box::new(CloudStorage::default()),
    ));

    let cloud = CloudStorage::default();
    reports.push(call_with_dependency(
        |storage| vec![storage.save("report"), storage.load()],
        &cloud,
    ));

    let mut out = Transcript::new();
    for report in &reports {
        out.line(format!("== {} ==", report.strategy));
        for step in &report.trace {
            out.line(format!("  {step}"));
        }
    }

    Ok(out.into_output(Some(serde_json::to_value(&reports)?)))
}

pub fn descriptor() -> ExampleDescriptor {
    ExampleDescriptor::new(
        NAME,
        Category::Structural,
        "Supplies a storage backend by constructor, by property and by method argument",
        run,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_injection_uses_fixed_storage() {
        let report = construct_data_storage(Box::new(CloudStorage::default()));

        assert_eq!(report.strategy, InjectionStrategy::Constructor);
        assert_eq!(report.storage, Some("cloud"));
        assert_eq!(
            report.trace,
            vec![
                "constructed with cloud storage",
                "cloud: uploaded 'settings'",
                "cloud: downloaded 'settings'",
            ]
        );
    }

    #[test]
    fn test_property_injection_can_be_replaced() {
        let mut manager = SwitchableDataManager::new();
        assert_eq!(manager.load(), "no storage set, nothing to load");

        let first = assign_storage_dependency(&mut manager, Box::new(DiskStorage::default()));
        assert_eq!(first.trace[0], "assigned disk storage");
        assert_eq!(first.storage, Some("disk"));

        let second = assign_storage_dependency(&mut manager, Box::new(CloudStorage::default()));
        assert_eq!(second.strategy, InjectionStrategy::Property);
        assert_eq!(second.trace[0], "replaced disk storage with cloud");
        assert_eq!(manager.storage_name(), Some("cloud"));
    }

    #[test]
    fn test_replacing_storage_loses_earlier_saves() {
        let mut manager = SwitchableDataManager::new();
        manager.storage = Some(Box::new(DiskStorage::default()));
        manager.save("draft");

        manager.storage = Some(Box::new(CloudStorage::default()));
        assert_eq!(manager.load(), "cloud: bucket empty");
    }

    #[test]
    fn test_method_injection_is_scoped_to_call() {
        let disk = DiskStorage::default();
        let report = call_with_dependency(|storage| vec![storage.load()], &disk);

        assert_eq!(report.strategy, InjectionStrategy::Method);
        assert_eq!(report.trace, vec!["calling with disk storage", "disk: nothing stored"]);
        assert!(disk.saved.borrow().is_empty());
    }

    #[test]
    fn test_run_covers_all_strategies() {
        let output = run(None).unwrap();
        let strategies: Vec<_> = output
            .value
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["strategy"].as_str().unwrap().to_string())
            .collect();

        assert_eq!(strategies, vec!["constructor", "property", "property", "method"]);
        assert!(output.text.contains("== method injection =="));
    }
}
