//! Route: a named binding from an id to an invokable target.

use crate::error::{Error, Result};
use crate::name;
use crate::routing::registry::HandlerRegistry;
use crate::routing::request::Request;
use crate::routing::target::RouteTarget;
use crate::value::Value;

/// A middleware is a route-shaped unit run before the matched route, purely
/// for its side effects; its return value is discarded.
pub type Middleware = Route;

/// One named endpoint.
///
/// The target is normalized at construction and the route is immutable
/// thereafter. Construction never resolves names or instantiates anything;
/// that happens only in [`Route::run`].
#[derive(Debug, Clone)]
pub struct Route {
    id: String,
    target: RouteTarget,
}

impl Route {
    /// Create a route from an already-normalized target.
    pub fn new(id: impl Into<String>, target: RouteTarget) -> Self {
        Self {
            id: id.into(),
            target,
        }
    }

    /// Create a route from a string target (`"func"` or `"Class@method"`).
    ///
    /// Fails with [`Error::InvalidTarget`] for more than one `@`.
    pub fn parse(id: impl Into<String>, target: &str) -> Result<Self> {
        Ok(Self::new(id, RouteTarget::parse(target)?))
    }

    /// Create a route bound directly to a closure.
    pub fn handler(
        id: impl Into<String>,
        f: impl Fn(&Request<'_>) -> Result<Value> + 'static,
    ) -> Self {
        Self::new(id, RouteTarget::handler(f))
    }

    /// Create a route bound to a class/method pair.
    pub fn method(id: impl Into<String>, class: &str, method: &str) -> Self {
        Self::new(id, RouteTarget::from((class, method)))
    }

    /// The route id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The normalized target.
    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    /// The class-like part of a method target.
    pub fn class(&self) -> Option<&str> {
        self.target.class()
    }

    /// The function or method name of a named target.
    pub fn function_name(&self) -> Option<&str> {
        self.target.function_name()
    }

    /// Execute the target against a request.
    ///
    /// Named targets that are not already namespace-qualified are qualified
    /// with `base_namespace` first, then resolved through the registry.
    /// Closure targets are invoked directly. Every failure (unknown name,
    /// unknown method, an error from the body) propagates unmodified;
    /// the router owns the termination policy.
    pub fn run(
        &self,
        request: &Request<'_>,
        registry: &HandlerRegistry,
        base_namespace: Option<&str>,
    ) -> Result<Value> {
        match &self.target {
            RouteTarget::Handler(handler) => handler(request),
            RouteTarget::Function(func) => {
                let qualified = name::qualify(func, base_namespace);
                let handler = registry
                    .function(&qualified)
                    .ok_or_else(|| Error::UnknownFunction(qualified.clone()))?;
                handler(request)
            }
            RouteTarget::Method { class, method } => {
                let qualified = name::qualify(class, base_namespace);
                let factory = registry
                    .controller(&qualified)
                    .ok_or_else(|| Error::UnknownController(qualified.clone()))?;
                let controller = factory();
                controller.invoke(method, request)
            }
        }
    }
}
