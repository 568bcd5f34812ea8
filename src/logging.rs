use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Sink for the diagnostics an input source emits. Passed into each source
/// rather than looked up globally.
pub trait Logger {
    fn warn(&self, target: &str, message: &str);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn warn(&self, target: &str, message: &str) {
        (**self).warn(target, message)
    }
}

impl<L: Logger + ?Sized> Logger for Rc<L> {
    fn warn(&self, target: &str, message: &str) {
        (**self).warn(target, message)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn warn(&self, target: &str, message: &str) {
        (**self).warn(target, message)
    }
}

/// Forwards to the `log` crate facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn warn(&self, target: &str, message: &str) {
        log::warn!(target: target, "{}", message);
    }
}

/// Keeps every message in memory. Handy for asserting on warnings in tests.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: RefCell<Vec<(String, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(target, message)` pairs in emission order.
    pub fn records(&self) -> Vec<(String, String)> {
        self.records.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records.borrow().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, target: &str, message: &str) {
        self.records
            .borrow_mut()
            .push((target.to_string(), message.to_string()));
    }
}
