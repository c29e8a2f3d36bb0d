//! Router: the dispatch engine tying groups, registry and renderer together.
//!
//! Lifecycle is build-then-freeze: the router is constructed and populated
//! mutably (`new`, `with_namespaces`, `create`, `registry_mut`), then frozen
//! into an `Rc` before the first dispatch. [`Router::handle`] takes
//! `self: &Rc<Self>` precisely so the route table cannot change once
//! dispatch begins. The renderer is attached after freezing through interior
//! mutability, since renderer construction itself needs the shared router.
//!
//! Error policy: any failure during dispatch asks the application to
//! terminate, then propagates the original error unmodified to the caller.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::app::Application;
use crate::error::Result;
use crate::routing::group::RouteGroup;
use crate::routing::registry::HandlerRegistry;
use crate::routing::request::Request;
use crate::value::Value;
use crate::view::Renderer;

/// The application's route table and dispatch entry point.
pub struct Router {
    app: Rc<dyn Application>,
    root: RouteGroup,
    registry: HandlerRegistry,
    controller_ns: Option<String>,
    middleware_ns: Option<String>,
    renderer: RefCell<Weak<Renderer>>,
}

impl Router {
    /// Create a router with an empty root group and registry.
    pub fn new(app: Rc<dyn Application>) -> Self {
        Self {
            app,
            root: RouteGroup::new(),
            registry: HandlerRegistry::new(),
            controller_ns: None,
            middleware_ns: None,
            renderer: RefCell::new(Weak::new()),
        }
    }

    /// Set the base namespaces used to qualify bare controller and
    /// middleware names at dispatch time.
    pub fn with_namespaces(
        mut self,
        controllers: impl Into<String>,
        middleware: impl Into<String>,
    ) -> Self {
        self.controller_ns = Some(controllers.into());
        self.middleware_ns = Some(middleware.into());
        self
    }

    /// Populate the root group through a builder callback.
    pub fn create(
        &mut self,
        builder: impl FnOnce(&mut RouteGroup) -> Result<()>,
    ) -> Result<&mut Self> {
        builder(&mut self.root)?;
        Ok(self)
    }

    /// The handler registry, for registering functions and controllers
    /// during bootstrap.
    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// The running application.
    pub fn app(&self) -> &Rc<dyn Application> {
        &self.app
    }

    /// Attach the renderer. Held weakly; the renderer holds the router
    /// weakly in turn, so neither keeps the other alive.
    pub fn attach_renderer(&self, renderer: &Rc<Renderer>) {
        *self.renderer.borrow_mut() = Rc::downgrade(renderer);
    }

    /// The attached renderer, if still alive.
    pub fn renderer(&self) -> Option<Rc<Renderer>> {
        self.renderer.borrow().upgrade()
    }

    /// Dispatch a route by id.
    ///
    /// Middleware along the matched path runs first, ancestors before
    /// descendants, each sharing the same request; then the route target
    /// runs and its value is returned. On any failure the application is
    /// asked to terminate and the original error propagates.
    pub fn handle(self: &Rc<Self>, id: &str, args: Vec<Value>) -> Result<Value> {
        match self.dispatch(id, args) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(route = id, error = %err, "dispatch failed, terminating");
                self.app.terminate();
                Err(err)
            }
        }
    }

    fn dispatch(self: &Rc<Self>, id: &str, args: Vec<Value>) -> Result<Value> {
        let resolved = self.root.find_route(id, &[])?;
        tracing::debug!(
            route = id,
            middlewares = resolved.middlewares.len(),
            "dispatching"
        );

        let request = Request::new(
            Rc::clone(&self.app),
            Rc::clone(self),
            resolved.route,
            self.renderer(),
            args,
        );

        for middleware in &resolved.middlewares {
            middleware.run(&request, &self.registry, self.middleware_ns.as_deref())?;
        }
        resolved
            .route
            .run(&request, &self.registry, self.controller_ns.as_deref())
    }
}
