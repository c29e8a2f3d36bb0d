//! Route resolution and dispatch: targets, routes, groups, registry, router.

pub mod group;
pub mod registry;
pub mod request;
pub mod route;
pub mod router;
pub mod target;

pub use group::{ResolvedRoute, RouteGroup};
pub use registry::{Controller, ControllerFactory, HandlerRegistry};
pub use request::Request;
pub use route::{Middleware, Route};
pub use router::Router;
pub use target::{Handler, RouteTarget};
