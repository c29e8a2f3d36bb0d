//! Test doubles and a wiring harness.
//!
//! Public so downstream crates can test their routes and views the same way
//! this crate tests itself: [`TestApp`] is a recording
//! [`Application`](crate::app::Application), [`Headless`] a toolkit that
//! builds a component tree without any native UI, and [`Rig`] wires the
//! whole stack together in the mandatory bootstrap order.

mod harness;

pub use harness::{fire, Headless, Rig, RigBuilder};

use std::cell::Cell;
use std::collections::HashMap;

use crate::app::Application;

/// An application double that records terminations and serves fixed config.
#[derive(Debug, Default)]
pub struct TestApp {
    terminated: Cell<usize>,
    config: HashMap<String, String>,
}

impl TestApp {
    /// Create an app with no configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form: add a configuration entry.
    pub fn configure(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// How many times [`Application::terminate`] has been called.
    pub fn terminations(&self) -> usize {
        self.terminated.get()
    }
}

impl Application for TestApp {
    fn terminate(&self) {
        self.terminated.set(self.terminated.get() + 1);
    }

    fn config(&self, key: &str) -> Option<String> {
        self.config.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_every_termination() {
        let app = TestApp::new();
        assert_eq!(app.terminations(), 0);
        app.terminate();
        app.terminate();
        assert_eq!(app.terminations(), 2);
    }

    #[test]
    fn serves_configured_values() {
        let app = TestApp::new().configure("views.dir", "fixtures");
        assert_eq!(app.config("views.dir"), Some("fixtures".to_owned()));
        assert_eq!(app.config("other"), None);
    }
}
