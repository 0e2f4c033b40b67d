//! A status sink that shares one ordered event log with step callables.

use qk_core::engine::StatusSink;
use std::sync::{Arc, Mutex};

/// Something observable that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A live line was drawn.
    Write(String),
    /// A line was committed.
    Persist(String),
    /// A step callable was invoked.
    Call(String),
}

/// Ordered log shared between a [`LoggingSink`] and test callables.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call(&self, name: &str) {
        self.push(Event::Call(name.to_string()));
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Names of the callables invoked, in order.
    pub fn calls(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Call(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn persisted(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Persist(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    /// Position of the first event matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events().iter().position(predicate)
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

/// Sink appending writes and persisted lines to an [`EventLog`].
pub struct LoggingSink {
    log: EventLog,
    current: Mutex<String>,
}

impl LoggingSink {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            current: Mutex::new(String::new()),
        }
    }
}

impl StatusSink for LoggingSink {
    fn write(&self, line: &str) {
        *self.current.lock().unwrap() = line.to_string();
        self.log.push(Event::Write(line.to_string()));
    }

    fn persist(&self) {
        let line = std::mem::take(&mut *self.current.lock().unwrap());
        self.log.push(Event::Persist(line));
    }
}
