//! View sources: where markup comes from.
//!
//! The renderer loads views by logical name through the [`ViewSource`] seam.
//! [`DirSource`] is the production implementation, reading
//! `<dir>/<name>.view.xml`; [`MemorySource`] backs tests and embedded views.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::app::Application;
use crate::error::{Error, Result};

/// Provides raw markup for a view name.
pub trait ViewSource {
    /// Load the markup for `name`.
    ///
    /// Fails with [`Error::ViewNotFound`] when the source has no such view.
    fn load(&self, name: &str) -> Result<String>;
}

/// Filesystem-backed view source.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    /// Serve views from a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Serve views from the application's configured directory
    /// (`views.dir`, defaulting to `resources/views`).
    pub fn from_app(app: &dyn Application) -> Self {
        Self::new(app.config_or("views.dir", "resources/views"))
    }
}

impl ViewSource for DirSource {
    fn load(&self, name: &str) -> Result<String> {
        let path = self.dir.join(format!("{name}.view.xml"));
        match std::fs::read_to_string(&path) {
            Ok(markup) => Ok(markup),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(Error::ViewNotFound(name.to_owned()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory view source.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    views: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with_view(mut self, name: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(name, markup);
        self
    }

    /// Add or replace a view.
    pub fn insert(&mut self, name: impl Into<String>, markup: impl Into<String>) {
        self.views.insert(name.into(), markup.into());
    }
}

impl ViewSource for MemorySource {
    fn load(&self, name: &str) -> Result<String> {
        self.views
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ViewNotFound(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_round_trips() {
        let source = MemorySource::new().with_view("main", "<Window/>");
        assert_eq!(source.load("main").expect("present"), "<Window/>");
    }

    #[test]
    fn memory_source_misses_by_name() {
        let source = MemorySource::new();
        let err = source.load("ghost").expect_err("absent");
        assert!(matches!(err, Error::ViewNotFound(ref name) if name == "ghost"));
    }

    #[test]
    fn dir_source_reads_view_files() {
        let dir = std::env::temp_dir().join("vellum-dir-source-test");
        std::fs::create_dir_all(&dir).expect("temp dir");
        std::fs::write(dir.join("main.view.xml"), "<Window/>").expect("write view");

        let source = DirSource::new(&dir);
        assert_eq!(source.load("main").expect("present"), "<Window/>");

        let err = source.load("ghost").expect_err("absent");
        assert!(matches!(err, Error::ViewNotFound(ref name) if name == "ghost"));
    }

    #[test]
    fn dir_source_honors_configured_directory() {
        use std::collections::HashMap;

        struct App(HashMap<String, String>);
        impl Application for App {
            fn terminate(&self) {}
            fn config(&self, key: &str) -> Option<String> {
                self.0.get(key).cloned()
            }
        }

        let app = App(HashMap::from([(
            "views.dir".to_owned(),
            "custom/views".to_owned(),
        )]));
        let source = DirSource::from_app(&app);
        assert_eq!(source.dir, PathBuf::from("custom/views"));
    }
}
