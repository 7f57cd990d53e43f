//! Delegation pattern: a subject hands two callbacks off to whoever is bound
//! as its delegate, without owning it.

use std::rc::{Rc, Weak};

use serde::Serialize;
use serde_json::Value;

use crate::catalog::{Category, ExampleDescriptor};
use crate::error::ExampleFailure;
use crate::runner::{Output, Transcript};

pub const NAME: &str = "Delegate";

/// Capability set a delegate can provide. Both methods are optional;
/// `None` means the delegate chose not to implement that one.
pub trait Delegate {
    fn method_one(&self) -> Option<String> {
        None
    }

    fn method_two(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "reply", rename_all = "snake_case")]
pub enum DelegateCall {
    Dispatched(String),
    Unimplemented,
    NoDelegate,
}

/// Holds at most one non-owning binding to a delegate.
#[derive(Debug, Default)]
pub struct DelegateExample {
    delegate: Option<Weak<dyn Delegate>>,
}

impl DelegateExample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_delegate<D: Delegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// True only while the bound delegate is still alive.
    pub fn has_delegate(&self) -> bool {
        self.delegate
            .as_ref()
            .map_or(false, |weak| weak.strong_count() > 0)
    }

    pub fn invoke_one(&self) -> DelegateCall {
        self.dispatch(|d| d.method_one())
    }

    pub fn invoke_two(&self) -> DelegateCall {
        self.dispatch(|d| d.method_two())
    }

    fn dispatch(&self, call: impl FnOnce(&dyn Delegate) -> Option<String>) -> DelegateCall {
        match self.delegate.as_ref().and_then(Weak::upgrade) {
            None => DelegateCall::NoDelegate,
            Some(delegate) => call(delegate.as_ref())
                .map_or(DelegateCall::Unimplemented, DelegateCall::Dispatched),
        }
    }
}

struct Listener;

impl Delegate for Listener {
    fn method_one(&self) -> Option<String> {
        Some("Listener handled method one".to_string())
    }

    fn method_two(&self) -> Option<String> {
        Some("Listener handled method two".to_string())
    }
}

// Only answers the first callback.
struct QuietListener;

impl Delegate for QuietListener {
    fn method_one(&self) -> Option<String> {
        Some("QuietListener handled method one".to_string())
    }
}

fn describe(call: &DelegateCall) -> String {
    match call {
        DelegateCall::Dispatched(reply) => reply.clone(),
        DelegateCall::Unimplemented => "delegate does not implement this method".to_string(),
        DelegateCall::NoDelegate => "no delegate bound, nothing happened".to_string(),
    }
}

fn run(_input: Option<&Value>) -> std::result::Result<Output, ExampleFailure> {
    let mut out = Transcript::new();
    let mut calls = Vec::new();
    let mut subject = DelegateExample::new();

    let mut record = |stage: &str, call: DelegateCall, out: &mut Transcript| {
        out.line(format!("[{stage}] {}", describe(&call)));
        calls.push(serde_json::json!({ "stage": stage, "call": call }));
    };

    record("unbound", subject.invoke_one(), &mut out);

    let listener = Rc::new(Listener);
    subject.set_delegate(&listener);
    record("listener", subject.invoke_one(), &mut out);
    record("listener", subject.invoke_two(), &mut out);

    let quiet = Rc::new(QuietListener);
    subject.set_delegate(&quiet);
    record("quiet", subject.invoke_one(), &mut out);
    record("quiet", subject.invoke_two(), &mut out);

    drop(quiet);
    record("dropped", subject.invoke_one(), &mut out);

    Ok(out.into_output(Some(Value::Array(calls))))
}

pub fn descriptor() -> ExampleDescriptor {
    ExampleDescriptor::new(
        NAME,
        Category::Behavioral,
        "Forwards two callbacks to a weakly held delegate; an absent delegate is a no-op",
        run,
    )
}
