//! Request: the context handed to every handler, middleware and controller.
//!
//! A request is built fresh for each dispatch and borrows the matched route
//! for the duration of the call. It carries shared handles to the application
//! and the router (handlers may re-enter the router for follow-up
//! navigation), the renderer when one is attached, and the positional
//! arguments supplied by the caller, typically empty for programmatic
//! dispatch and populated by event bindings.

use std::rc::Rc;

use crate::app::Application;
use crate::error::{Error, Result};
use crate::routing::route::Route;
use crate::routing::router::Router;
use crate::value::Value;
use crate::view::Renderer;

/// Out-of-range argument lookups resolve here instead of panicking.
static ABSENT: Value = Value::Null;

/// Per-dispatch context.
pub struct Request<'r> {
    app: Rc<dyn Application>,
    router: Rc<Router>,
    route: &'r Route,
    renderer: Option<Rc<Renderer>>,
    args: Vec<Value>,
}

impl<'r> Request<'r> {
    /// Assemble a request. Normally only the router does this.
    pub fn new(
        app: Rc<dyn Application>,
        router: Rc<Router>,
        route: &'r Route,
        renderer: Option<Rc<Renderer>>,
        args: Vec<Value>,
    ) -> Self {
        Self {
            app,
            router,
            route,
            renderer,
            args,
        }
    }

    /// The running application.
    pub fn app(&self) -> &Rc<dyn Application> {
        &self.app
    }

    /// The router that dispatched this request.
    pub fn router(&self) -> &Rc<Router> {
        &self.router
    }

    /// The matched route.
    pub fn route(&self) -> &Route {
        self.route
    }

    /// The attached renderer, if the router has one.
    pub fn renderer(&self) -> Option<&Rc<Renderer>> {
        self.renderer.as_ref()
    }

    /// All positional arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Whether a positional argument was supplied.
    pub fn has_arg(&self, index: usize) -> bool {
        index < self.args.len()
    }

    /// A positional argument, or [`Value::Null`] when out of range.
    pub fn arg(&self, index: usize) -> &Value {
        self.args.get(index).unwrap_or(&ABSENT)
    }

    /// Render a named view through the attached renderer.
    ///
    /// Convenience for the common controller body; fails when the router has
    /// no renderer attached.
    pub fn render(&self, view: &str) -> Result<()> {
        match &self.renderer {
            Some(renderer) => renderer.render(view),
            None => Err(Error::invocation("no renderer attached")),
        }
    }
}
