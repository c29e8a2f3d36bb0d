//! Host-application collaborator.
//!
//! The routing core does not own the native application object; it only needs
//! two things from it: the ability to terminate the process when dispatch
//! fails, and configuration value lookup. [`Application`] is that seam.
//! Implementations live in host code (or [`crate::testing::TestApp`] in
//! tests).

/// The host application as seen by the router and renderer.
///
/// Implementations are expected to use interior mutability where needed;
/// the core only ever holds shared references.
pub trait Application {
    /// Unconditionally shut the application down.
    ///
    /// Called by [`Router::handle`](crate::routing::Router::handle) before
    /// re-raising any dispatch error. Must be safe to call more than once.
    fn terminate(&self);

    /// Look up a configuration value by key.
    fn config(&self, key: &str) -> Option<String>;

    /// Look up a configuration value, falling back to `default`.
    fn config_or(&self, key: &str, default: &str) -> String {
        self.config(key).unwrap_or_else(|| default.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedConfig(HashMap<String, String>);

    impl Application for FixedConfig {
        fn terminate(&self) {}

        fn config(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    #[test]
    fn config_or_prefers_configured_value() {
        let app = FixedConfig(HashMap::from([(
            "views.dir".to_owned(),
            "custom/views".to_owned(),
        )]));
        assert_eq!(app.config_or("views.dir", "resources/views"), "custom/views");
    }

    #[test]
    fn config_or_falls_back_to_default() {
        let app = FixedConfig(HashMap::new());
        assert_eq!(
            app.config_or("views.dir", "resources/views"),
            "resources/views"
        );
    }
}
