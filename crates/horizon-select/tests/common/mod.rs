//! Shared fixtures for the select integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use horizon_select::{Select, Signal};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Records every emission of a signal.
pub struct Recorder<T> {
    events: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn attach(signal: &Signal<T>) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        signal.connect(move |value: &T| sink.lock().push(value.clone()));
        Self { events }
    }

    pub fn events(&self) -> Vec<T> {
        self.events.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    pub fn last(&self) -> Option<T> {
        self.events.lock().last().cloned()
    }
}

pub fn strings(items: &[&str]) -> Vec<Value> {
    items.iter().map(|s| json!(s)).collect()
}

/// A single select over `one`, `two`, `three`.
pub fn default_select() -> Select {
    Select::builder()
        .with_options(strings(&["one", "two", "three"]))
        .build()
        .unwrap()
}

/// A multi select over `one`, `two`, `three`.
pub fn multi_select() -> Select {
    Select::builder()
        .with_options(strings(&["one", "two", "three"]))
        .with_multiple(true)
        .build()
        .unwrap()
}

pub fn labelled(label: &str, value: Value) -> Value {
    json!({"label": label, "value": value})
}

/// Route log output to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_select=trace")
        .with_test_writer()
        .try_init();
}
