//! Route groups: a scope tree of routes, nested groups and middleware.
//!
//! Resolution is a depth-first search: a group checks its own routes first,
//! then each child group in registration order, and the first match wins.
//! Middleware accumulates root-to-leaf along the search path, so ancestors
//! run before the group owning the matched route.
//!
//! Groups are populated once during application bootstrap (normally through
//! [`RouteGroup::create`] or [`Router::create`](crate::routing::Router::create))
//! and must not be mutated afterwards. The [`Router`](crate::routing::Router)
//! enforces this by freezing itself into an `Rc` before dispatch becomes
//! possible.

use crate::error::{Error, Result};
use crate::routing::request::Request;
use crate::routing::route::{Middleware, Route};
use crate::value::Value;

/// The result of a successful route search.
#[derive(Debug)]
pub struct ResolvedRoute<'g> {
    /// The matched route.
    pub route: &'g Route,
    /// Accumulated middleware in execution order: ancestor groups first,
    /// then the owning group, registration order within each. Empty when no
    /// group on the path declared any.
    pub middlewares: Vec<&'g Route>,
}

/// A tree node bundling named routes, child groups and middleware.
#[derive(Debug, Default)]
pub struct RouteGroup {
    routes: Vec<Route>,
    groups: Vec<RouteGroup>,
    middlewares: Vec<Middleware>,
}

impl RouteGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate this group through a builder callback, consuming and
    /// returning it so nested groups read declaratively:
    ///
    /// ```text
    /// group.group(RouteGroup::new().create(|g| { ... })?);
    /// ```
    pub fn create(mut self, builder: impl FnOnce(&mut RouteGroup) -> Result<()>) -> Result<Self> {
        builder(&mut self)?;
        Ok(self)
    }

    /// Register a route with a string target (`"func"` or `"Class@method"`).
    ///
    /// Registering an id that already exists replaces the earlier route in
    /// place, so the last registration wins.
    pub fn route(&mut self, id: &str, target: &str) -> Result<&mut Self> {
        let route = Route::parse(id, target)?;
        Ok(self.add(route))
    }

    /// Register a route bound directly to a closure.
    pub fn route_fn(
        &mut self,
        id: &str,
        f: impl Fn(&Request<'_>) -> Result<Value> + 'static,
    ) -> &mut Self {
        self.add(Route::handler(id, f))
    }

    /// Register a route bound to a class/method pair.
    pub fn route_to(&mut self, id: &str, class: &str, method: &str) -> &mut Self {
        self.add(Route::method(id, class, method))
    }

    /// Register an already-built route, with the same overwrite semantics.
    pub fn add(&mut self, route: Route) -> &mut Self {
        if let Some(existing) = self.routes.iter_mut().find(|r| r.id() == route.id()) {
            *existing = route;
        } else {
            self.routes.push(route);
        }
        self
    }

    /// Append a child group.
    pub fn group(&mut self, group: RouteGroup) -> &mut Self {
        self.groups.push(group);
        self
    }

    /// Append a middleware. Registration order is execution order.
    pub fn middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    /// Number of routes registered directly on this group.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Find a route by id.
    ///
    /// `inherited` carries the middleware accumulated from ancestor groups;
    /// callers other than the recursion pass `&[]`. Fails with
    /// [`Error::RouteNotFound`] when no group in the subtree owns the id.
    pub fn find_route<'g>(
        &'g self,
        id: &str,
        inherited: &[&'g Route],
    ) -> Result<ResolvedRoute<'g>> {
        let mut merged: Vec<&'g Route> = inherited.to_vec();
        merged.extend(self.middlewares.iter());

        // This group's own routes take precedence over any child group.
        if let Some(route) = self.routes.iter().find(|r| r.id() == id) {
            return Ok(ResolvedRoute {
                route,
                middlewares: merged,
            });
        }

        for group in &self.groups {
            match group.find_route(id, &merged) {
                Ok(resolved) => return Ok(resolved),
                Err(Error::RouteNotFound(_)) => continue,
                Err(other) => return Err(other),
            }
        }

        Err(Error::RouteNotFound(id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(resolved: &ResolvedRoute<'_>) -> Vec<String> {
        resolved
            .middlewares
            .iter()
            .map(|m| m.id().to_owned())
            .collect()
    }

    // ── Registration ─────────────────────────────────────────────────

    #[test]
    fn create_populates_the_group() {
        let group = RouteGroup::new()
            .create(|g| {
                g.route("main", "Main@show")?;
                g.route_fn("kill", |_req| Ok(Value::Null));
                Ok(())
            })
            .expect("builder succeeds");
        assert_eq!(group.route_count(), 2);
    }

    #[test]
    fn route_rejects_invalid_target() {
        let result = RouteGroup::new().create(|g| {
            g.route("bad", "A@b@c")?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::InvalidTarget(_))));
    }

    #[test]
    fn duplicate_id_overwrites_in_place() {
        let mut group = RouteGroup::new();
        group.route_to("main", "Early", "show");
        group.route_to("main", "Late", "show");
        assert_eq!(group.route_count(), 1);

        let resolved = group.find_route("main", &[]).expect("found");
        assert_eq!(resolved.route.class(), Some("Late"));
    }

    // ── Search order ─────────────────────────────────────────────────

    #[test]
    fn finds_own_route() {
        let mut group = RouteGroup::new();
        group.route_fn("main", |_req| Ok(Value::Null));
        let resolved = group.find_route("main", &[]).expect("found");
        assert_eq!(resolved.route.id(), "main");
        assert!(resolved.middlewares.is_empty());
    }

    #[test]
    fn own_routes_win_over_child_groups() {
        let mut root = RouteGroup::new();
        root.route_to("main", "Root", "show");

        let mut child = RouteGroup::new();
        child.route_to("main", "Child", "show");
        root.group(child);

        let resolved = root.find_route("main", &[]).expect("found");
        assert_eq!(resolved.route.class(), Some("Root"));
    }

    #[test]
    fn first_child_group_wins() {
        let mut root = RouteGroup::new();

        let mut first = RouteGroup::new();
        first.route_to("x", "First", "show");
        let mut second = RouteGroup::new();
        second.route_to("x", "Second", "show");

        root.group(first).group(second);

        let resolved = root.find_route("x", &[]).expect("found");
        assert_eq!(resolved.route.class(), Some("First"));
    }

    #[test]
    fn recurses_into_deep_groups() {
        let mut inner = RouteGroup::new();
        inner.route_to("deep", "Deep", "show");
        let mut middle = RouteGroup::new();
        middle.group(inner);
        let mut root = RouteGroup::new();
        root.group(middle);

        let resolved = root.find_route("deep", &[]).expect("found");
        assert_eq!(resolved.route.id(), "deep");
    }

    #[test]
    fn missing_id_names_exactly_that_id() {
        let mut root = RouteGroup::new();
        root.route_fn("main", |_req| Ok(Value::Null));
        let err = root.find_route("ghost", &[]).expect_err("not found");
        assert!(matches!(err, Error::RouteNotFound(ref id) if id == "ghost"));
    }

    // ── Middleware accumulation ──────────────────────────────────────

    #[test]
    fn ancestor_middleware_runs_first() {
        let mut child = RouteGroup::new();
        child.middleware(Middleware::handler("B", |_req| Ok(Value::Null)));
        child.route_fn("target", |_req| Ok(Value::Null));

        let mut root = RouteGroup::new();
        root.middleware(Middleware::handler("A", |_req| Ok(Value::Null)));
        root.group(child);

        let resolved = root.find_route("target", &[]).expect("found");
        assert_eq!(ids(&resolved), vec!["A", "B"]);
    }

    #[test]
    fn registration_order_within_a_group_is_preserved() {
        let mut root = RouteGroup::new();
        root.middleware(Middleware::handler("first", |_req| Ok(Value::Null)));
        root.middleware(Middleware::handler("second", |_req| Ok(Value::Null)));
        root.route_fn("target", |_req| Ok(Value::Null));

        let resolved = root.find_route("target", &[]).expect("found");
        assert_eq!(ids(&resolved), vec!["first", "second"]);
    }

    #[test]
    fn sibling_group_middleware_does_not_apply() {
        let mut sibling = RouteGroup::new();
        sibling.middleware(Middleware::handler("sibling", |_req| Ok(Value::Null)));

        let mut owner = RouteGroup::new();
        owner.route_fn("target", |_req| Ok(Value::Null));

        let mut root = RouteGroup::new();
        root.group(sibling).group(owner);

        let resolved = root.find_route("target", &[]).expect("found");
        assert!(resolved.middlewares.is_empty());
    }

    #[test]
    fn middleware_on_root_applies_to_own_routes() {
        let mut root = RouteGroup::new();
        root.middleware(Middleware::handler("only", |_req| Ok(Value::Null)));
        root.route_fn("target", |_req| Ok(Value::Null));

        let resolved = root.find_route("target", &[]).expect("found");
        assert_eq!(ids(&resolved), vec!["only"]);
    }
}
