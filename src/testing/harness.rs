//! Headless toolkit and full-stack wiring.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use slotmap::SlotMap;

use crate::app::Application;
use crate::error::{Error, Result};
use crate::markup::Attributes;
use crate::name;
use crate::routing::Router;
use crate::testing::TestApp;
use crate::toolkit::{ComponentId, EventCallback, Toolkit};
use crate::view::{MemorySource, Renderer};

#[derive(Debug)]
struct ComponentRecord {
    identifier: String,
    attributes: Attributes,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
}

/// A toolkit that records construction instead of drawing anything.
///
/// Permissive by default: every identifier constructs. [`Headless::strict`]
/// restricts construction to a fixed identifier set, for exercising
/// [`Error::UnknownComponent`] paths.
#[derive(Default)]
pub struct Headless {
    components: SlotMap<ComponentId, ComponentRecord>,
    order: Vec<ComponentId>,
    allowed: Option<HashSet<String>>,
    bindings: HashMap<(ComponentId, String), Vec<EventCallback>>,
}

impl Headless {
    /// A toolkit that accepts every identifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// A toolkit that only constructs the given identifiers.
    ///
    /// Identifiers compare with the leading `\` stripped and ASCII case
    /// ignored, matching how names compare elsewhere.
    pub fn strict<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: Some(
                identifiers
                    .into_iter()
                    .map(|id| canonical(id.as_ref()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Number of constructed components.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been constructed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Components in construction order.
    pub fn constructed(&self) -> &[ComponentId] {
        &self.order
    }

    /// The first component whose identifier ends with `suffix`
    /// (case-insensitive), in construction order.
    pub fn find(&self, suffix: &str) -> Option<ComponentId> {
        self.order
            .iter()
            .copied()
            .find(|id| name::suffix_matches(&self.components[*id].identifier, suffix))
    }

    /// A component's identifier, exactly as the renderer passed it.
    pub fn identifier(&self, component: ComponentId) -> Option<&str> {
        self.components
            .get(component)
            .map(|record| record.identifier.as_str())
    }

    /// A component's parent.
    pub fn parent(&self, component: ComponentId) -> Option<ComponentId> {
        self.components.get(component).and_then(|record| record.parent)
    }

    /// A component's children, in construction order.
    pub fn children(&self, component: ComponentId) -> &[ComponentId] {
        self.components
            .get(component)
            .map(|record| record.children.as_slice())
            .unwrap_or(&[])
    }

    /// An attribute the component was constructed with (case-insensitive).
    pub fn attribute(&self, component: ComponentId, attribute: &str) -> Option<String> {
        self.components
            .get(component)?
            .attributes
            .get_ignore_case(attribute)
            .map(str::to_owned)
    }

    /// Callbacks bound for an event on a component, cloned out so callers
    /// can invoke them without holding a borrow of the toolkit.
    pub fn callbacks(&self, component: ComponentId, event: &str) -> Vec<EventCallback> {
        self.bindings
            .get(&(component, event.to_owned()))
            .cloned()
            .unwrap_or_default()
    }
}

impl Toolkit for Headless {
    fn construct(
        &mut self,
        identifier: &str,
        attributes: &Attributes,
        parent: Option<ComponentId>,
    ) -> Result<ComponentId> {
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(&canonical(identifier)) {
                return Err(Error::UnknownComponent(identifier.to_owned()));
            }
        }
        let component = self.components.insert(ComponentRecord {
            identifier: identifier.to_owned(),
            attributes: attributes.clone(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            if let Some(record) = self.components.get_mut(parent) {
                record.children.push(component);
            }
        }
        self.order.push(component);
        Ok(component)
    }

    fn bind(&mut self, component: ComponentId, event: &str, callback: EventCallback) {
        self.bindings
            .entry((component, event.to_owned()))
            .or_default()
            .push(callback);
    }
}

fn canonical(identifier: &str) -> String {
    identifier.trim_start_matches('\\').to_ascii_lowercase()
}

/// Invoke every callback bound for an event, like a native toolkit would.
///
/// Callbacks are cloned out before invocation: they typically re-enter the
/// router, which may render and construct further components through the
/// same toolkit.
pub fn fire(toolkit: &Rc<RefCell<Headless>>, component: ComponentId, event: &str) {
    let callbacks = toolkit.borrow().callbacks(component, event);
    for callback in callbacks {
        callback();
    }
}

/// A fully wired stack: app, router, headless toolkit and renderer.
pub struct Rig {
    /// The application double.
    pub app: Rc<TestApp>,
    /// The frozen router.
    pub router: Rc<Router>,
    /// The recording toolkit.
    pub toolkit: Rc<RefCell<Headless>>,
    /// The renderer attached to the router.
    pub renderer: Rc<Renderer>,
}

/// Builder for [`Rig`], hiding the bootstrap ordering the stack requires:
/// populate the router mutably, freeze it, construct the renderer over it,
/// then attach.
#[derive(Default)]
pub struct RigBuilder {
    app: TestApp,
    views: MemorySource,
    namespaces: Option<(String, String)>,
}

impl RigBuilder {
    /// Start an empty rig.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a view to the in-memory source.
    pub fn view(mut self, viewname: impl Into<String>, markup: impl Into<String>) -> Self {
        self.views.insert(viewname, markup);
        self
    }

    /// Add an application configuration entry.
    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.app = self.app.configure(key, value);
        self
    }

    /// Set controller and middleware base namespaces on the router.
    pub fn namespaces(
        mut self,
        controllers: impl Into<String>,
        middleware: impl Into<String>,
    ) -> Self {
        self.namespaces = Some((controllers.into(), middleware.into()));
        self
    }

    /// Build the rig, populating the router through `routes`.
    pub fn build(self, routes: impl FnOnce(&mut Router) -> Result<()>) -> Result<Rig> {
        self.build_with(routes, |_renderer| {})
    }

    /// Build the rig, additionally customizing the renderer (extra
    /// processors, style handlers, event listeners) before it is attached.
    pub fn build_with(
        self,
        routes: impl FnOnce(&mut Router) -> Result<()>,
        customize: impl FnOnce(&mut Renderer),
    ) -> Result<Rig> {
        let app = Rc::new(self.app);
        let mut router = Router::new(app.clone() as Rc<dyn Application>);
        if let Some((controllers, middleware)) = self.namespaces {
            router = router.with_namespaces(controllers, middleware);
        }
        routes(&mut router)?;
        let router = Rc::new(router);

        let toolkit = Rc::new(RefCell::new(Headless::new()));
        let mut renderer = Renderer::new(
            &router,
            toolkit.clone() as Rc<RefCell<dyn Toolkit>>,
            Box::new(self.views),
        );
        customize(&mut renderer);
        let renderer = Rc::new(renderer);
        router.attach_renderer(&renderer);

        Ok(Rig {
            app,
            router,
            toolkit,
            renderer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn headless_records_tree_shape() {
        let mut toolkit = Headless::new();
        let window = toolkit
            .construct("\\Toolkit\\Window", &Attributes::new(), None)
            .expect("constructs");
        let button = toolkit
            .construct("\\Button", &Attributes::new(), Some(window))
            .expect("constructs");

        assert_eq!(toolkit.len(), 2);
        assert_eq!(toolkit.parent(button), Some(window));
        assert_eq!(toolkit.children(window), &[button]);
        assert_eq!(toolkit.find("button"), Some(button));
    }

    #[test]
    fn strict_toolkit_rejects_unknown_identifiers() {
        let mut toolkit = Headless::strict(["\\Toolkit\\Window"]);
        assert!(toolkit
            .construct("toolkit\\window", &Attributes::new(), None)
            .is_ok());
        let err = toolkit
            .construct("\\Bogus", &Attributes::new(), None)
            .expect_err("rejected");
        assert!(matches!(err, Error::UnknownComponent(ref id) if id == "\\Bogus"));
    }

    #[test]
    fn fire_invokes_bindings_in_order() {
        let toolkit = Rc::new(RefCell::new(Headless::new()));
        let component = toolkit
            .borrow_mut()
            .construct("\\Button", &Attributes::new(), None)
            .expect("constructs");

        let hits = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let hits = Rc::clone(&hits);
            toolkit
                .borrow_mut()
                .bind(component, "click", Rc::new(move || hits.borrow_mut().push(tag)));
        }

        fire(&toolkit, component, "click");
        assert_eq!(*hits.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn rig_wires_router_and_renderer_together() {
        let rig = RigBuilder::new()
            .view("main", "<Window/>")
            .build(|router| {
                router.create(|root| {
                    root.route_fn("main", |req| {
                        req.render("main")?;
                        Ok(Value::Null)
                    });
                    Ok(())
                })?;
                Ok(())
            })
            .expect("builds");

        rig.router.handle("main", Vec::new()).expect("dispatches");
        assert_eq!(rig.toolkit.borrow().len(), 1);
        assert_eq!(rig.app.terminations(), 0);
    }
}
