//! Handler registry: names to callables, without reflection.
//!
//! String-named targets (`"show_main"`, `"Main@show"`) need something to
//! resolve against at run time. [`HandlerRegistry`] holds that mapping:
//! function names to handler closures, and controller names to factories
//! producing [`Controller`] trait objects. Names are stored with the leading
//! `\` stripped so rooted and unrooted spellings resolve identically.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;
use crate::routing::request::Request;
use crate::routing::target::{Handler, HandlerFn};
use crate::value::Value;

/// A controller instance: string-keyed method dispatch.
///
/// Implementations match on the method name and return
/// [`Error::UnknownMethod`](crate::Error::UnknownMethod) for anything they do
/// not expose. A fresh instance is constructed for every invocation, so
/// implementations should be cheap to build and hold no per-request state.
pub trait Controller {
    /// Invoke the named method against the current request.
    fn invoke(&self, method: &str, request: &Request<'_>) -> Result<Value>;
}

/// Constructs a controller instance with no arguments.
pub type ControllerFactory = Rc<dyn Fn() -> Box<dyn Controller>>;

/// Registry of invokable names.
#[derive(Default)]
pub struct HandlerRegistry {
    functions: HashMap<String, Handler>,
    controllers: HashMap<String, ControllerFactory>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a free function under a (possibly qualified) name.
    ///
    /// Later registrations under the same name replace earlier ones.
    pub fn register_function(
        &mut self,
        name: &str,
        handler: impl Fn(&Request<'_>) -> Result<Value> + 'static,
    ) -> &mut Self {
        self.functions
            .insert(normalize(name), Rc::new(handler) as Rc<HandlerFn>);
        self
    }

    /// Register a controller factory under a (possibly qualified) class name.
    pub fn register_controller(
        &mut self,
        name: &str,
        factory: impl Fn() -> Box<dyn Controller> + 'static,
    ) -> &mut Self {
        self.controllers.insert(normalize(name), Rc::new(factory));
        self
    }

    /// Look up a function handler.
    pub fn function(&self, name: &str) -> Option<&Handler> {
        self.functions.get(&normalize(name))
    }

    /// Look up a controller factory.
    pub fn controller(&self, name: &str) -> Option<&ControllerFactory> {
        self.controllers.get(&normalize(name))
    }

    /// Number of registered functions.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Number of registered controllers.
    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }
}

/// Strip the leading root separator; names are otherwise case-sensitive.
fn normalize(name: &str) -> String {
    name.trim_start_matches('\\').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn registers_and_finds_function() {
        let mut registry = HandlerRegistry::new();
        registry.register_function("show_main", |_req| Ok(Value::Null));
        assert!(registry.function("show_main").is_some());
        assert!(registry.function("other").is_none());
    }

    #[test]
    fn rooted_and_unrooted_names_are_equivalent() {
        let mut registry = HandlerRegistry::new();
        registry.register_function("Controllers\\show", |_req| Ok(Value::Null));
        assert!(registry.function("\\Controllers\\show").is_some());

        registry.register_controller("\\Controllers\\Main", || Box::new(Nop));
        assert!(registry.controller("Controllers\\Main").is_some());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut registry = HandlerRegistry::new();
        registry.register_function("f", |_req| Ok(Value::Int(1)));
        registry.register_function("f", |_req| Ok(Value::Int(2)));
        assert_eq!(registry.function_count(), 1);
    }

    struct Nop;

    impl Controller for Nop {
        fn invoke(&self, method: &str, _request: &Request<'_>) -> Result<Value> {
            Err(Error::UnknownMethod {
                class: "Nop".into(),
                method: method.into(),
            })
        }
    }

    #[test]
    fn factory_builds_fresh_instances() {
        let mut registry = HandlerRegistry::new();
        registry.register_controller("Nop", || Box::new(Nop));
        let factory = registry.controller("Nop").expect("registered");
        let _first = factory();
        let _second = factory();
        assert_eq!(registry.controller_count(), 1);
    }
}
