//! Renderer: walks parsed markup and drives the toolkit.
//!
//! A render is one depth-first walk over a view document. Each element is
//! resolved to a class-like name, run through the style handlers that match
//! its attributes, handed to the first matching processor (or constructed
//! directly when none matches), wired to event handlers, and finally its
//! children are walked with the container state the processor left behind.
//!
//! All three registries are registration-ordered vectors, not maps: processor
//! lookup is a suffix match where the first registered key wins, and style
//! and event handlers run in registration order. `use` aliases live in a
//! per-render [`RenderScope`], so nothing declared in one render leaks into
//! the next, including renders that fail partway.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{Error, Result};
use crate::markup::{self, Node};
use crate::name;
use crate::routing::Router;
use crate::toolkit::{ComponentId, EventCallback, Toolkit};
use crate::view::builtins;
use crate::view::source::ViewSource;

/// An element processor: may construct a component, may rewrite the node,
/// may change the container for the element's children.
///
/// Receives the mutable walk state for this element's subtree, the node
/// (already style-processed) and the resolved class-like name. Returns the
/// constructed component, or `None` when the element produces nothing
/// (`use` declarations).
pub type Processor =
    Box<dyn Fn(&mut ProcessContext<'_>, &mut Node, &str) -> Result<Option<ComponentId>>>;

/// A style handler: rewrites node attributes before construction.
///
/// Arguments are the matched attribute name, its value, the node, the
/// resolved class-like name and the (read-only) walk state of the enclosing
/// container.
pub type StyleHandler = Box<dyn Fn(&str, &str, &mut Node, &str, &WalkState) -> Result<()>>;

/// An event handler: binds toolkit callbacks for a declared event attribute.
pub type EventHandler = Box<dyn Fn(&EventContext<'_>) -> Result<()>>;

/// Mutable state threaded down the walk.
///
/// Cloned at each element so mutations made for a subtree never escape it.
#[derive(Debug, Clone)]
pub struct WalkState {
    container: Option<ComponentId>,
    container_node: Option<Node>,
    namespace: String,
}

impl Default for WalkState {
    fn default() -> Self {
        Self {
            container: None,
            container_node: None,
            namespace: "\\".to_owned(),
        }
    }
}

impl WalkState {
    /// The component children will be parented to.
    pub fn container(&self) -> Option<ComponentId> {
        self.container
    }

    /// The markup node that produced the current container.
    pub fn container_node(&self) -> Option<&Node> {
        self.container_node.as_ref()
    }

    /// The namespace inherited by elements without an explicit one.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Per-render alias scope populated by `use` declarations.
#[derive(Debug, Default)]
pub struct RenderScope {
    uses: Vec<String>,
}

impl RenderScope {
    fn declare(&mut self, class: &str) {
        self.uses.push(name::rooted(class));
    }

    /// Resolve a rooted tag name against declared aliases, first declaration
    /// wins.
    fn resolve(&self, tag: &str) -> Option<&str> {
        self.uses
            .iter()
            .find(|full| name::suffix_matches(full, tag))
            .map(String::as_str)
    }
}

/// What a processor gets to work with.
pub struct ProcessContext<'a> {
    renderer: &'a Renderer,
    scope: &'a mut RenderScope,
    state: &'a mut WalkState,
}

impl ProcessContext<'_> {
    /// The current container component.
    pub fn container(&self) -> Option<ComponentId> {
        self.state.container
    }

    /// Make `component` the container for this element's children.
    pub fn set_container(&mut self, component: ComponentId) {
        self.state.container = Some(component);
    }

    /// Declare a `use` alias for the rest of this render.
    pub fn declare_use(&mut self, class: &str) {
        self.scope.declare(class);
    }

    /// Resolve `name` to a full identifier and construct it via the toolkit.
    pub fn create_component(
        &mut self,
        name: &str,
        node: &Node,
        parent: Option<ComponentId>,
    ) -> Result<ComponentId> {
        let identifier = self.renderer.resolve_identifier(self.scope, name);
        self.renderer
            .toolkit
            .borrow_mut()
            .construct(&identifier, node.attributes(), parent)
    }
}

/// What an event handler gets to work with.
pub struct EventContext<'a> {
    /// The component the event attribute was declared on.
    pub component: ComponentId,
    /// The attribute value, conventionally a route id.
    pub value: &'a str,
    /// The component's fully-qualified tag name (rooted; aliases are not
    /// applied here).
    pub name: &'a str,
    /// The enclosing container component, if any.
    pub container: Option<ComponentId>,
    /// The markup node, after style processing.
    pub node: &'a Node,
    /// The markup node of the enclosing container, if any.
    pub container_node: Option<&'a Node>,
    /// The router, for dispatching when the event later fires.
    pub router: Weak<Router>,
    toolkit: &'a Rc<RefCell<dyn Toolkit>>,
}

impl EventContext<'_> {
    /// Register a native-event callback on the component.
    pub fn bind(&self, event: &str, callback: EventCallback) {
        self.toolkit.borrow_mut().bind(self.component, event, callback);
    }
}

/// Compiles view markup into toolkit components.
pub struct Renderer {
    router: Weak<Router>,
    toolkit: Rc<RefCell<dyn Toolkit>>,
    source: Box<dyn ViewSource>,
    processors: Vec<(String, Processor)>,
    styles: Vec<(String, StyleHandler)>,
    events: Vec<(String, EventHandler)>,
}

impl Renderer {
    /// Create a renderer over a router, toolkit and view source.
    ///
    /// The router is held weakly; freeze it into an `Rc` first, construct
    /// the renderer, then attach via
    /// [`Router::attach_renderer`](crate::routing::Router::attach_renderer).
    /// The built-in processors (`use`, `Toolkit\Window`, `Toolkit\Panel`),
    /// the `align` style handler and the `onclick` event handler are
    /// registered here, ahead of anything added later.
    pub fn new(
        router: &Rc<Router>,
        toolkit: Rc<RefCell<dyn Toolkit>>,
        source: Box<dyn ViewSource>,
    ) -> Self {
        let mut renderer = Self {
            router: Rc::downgrade(router),
            toolkit,
            source,
            processors: Vec::new(),
            styles: Vec::new(),
            events: Vec::new(),
        };
        renderer.add_processor("use", builtins::use_processor);
        renderer.add_processor("Toolkit\\Window", builtins::window_processor);
        renderer.add_processor("Toolkit\\Panel", builtins::panel_processor);
        renderer.add_style_handler("align", builtins::align);
        renderer.add_event_listener("onclick", builtins::on_click);
        renderer
    }

    /// Register a processor under a class-like key (stored rooted).
    ///
    /// Lookup is a case-insensitive suffix match of the key against the
    /// element's resolved name; the first registered match wins, so nothing
    /// can shadow an earlier registration.
    pub fn add_processor(
        &mut self,
        key: &str,
        processor: impl Fn(&mut ProcessContext<'_>, &mut Node, &str) -> Result<Option<ComponentId>>
            + 'static,
    ) -> &mut Self {
        self.processors
            .push((name::rooted(key), Box::new(processor)));
        self
    }

    /// Register a style handler for an attribute name
    /// (matched case-insensitively). Handlers run in registration order.
    pub fn add_style_handler(
        &mut self,
        attribute: &str,
        handler: impl Fn(&str, &str, &mut Node, &str, &WalkState) -> Result<()> + 'static,
    ) -> &mut Self {
        self.styles.push((attribute.to_owned(), Box::new(handler)));
        self
    }

    /// Register an event handler for an attribute name
    /// (matched case-insensitively). Handlers run in registration order.
    pub fn add_event_listener(
        &mut self,
        attribute: &str,
        handler: impl Fn(&EventContext<'_>) -> Result<()> + 'static,
    ) -> &mut Self {
        self.events.push((attribute.to_owned(), Box::new(handler)));
        self
    }

    /// The router this renderer dispatches through, if still alive.
    pub fn router(&self) -> Option<Rc<Router>> {
        self.router.upgrade()
    }

    /// Render a view by name.
    ///
    /// Loads, parses and walks the document. The alias scope and walk state
    /// are fresh for every call; failures abandon the walk where they occur
    /// and leave already-constructed components in the toolkit.
    pub fn render(&self, view: &str) -> Result<()> {
        let markup = self.source.load(view)?;
        tracing::debug!(view, bytes = markup.len(), "rendering");

        // Views may have several top-level elements; wrap so the document
        // still has a single root.
        let wrapped = format!("<view>{markup}</view>");
        let root = markup::parse(&wrapped)?;

        let mut scope = RenderScope::default();
        let state = WalkState::default();
        if let Some(children) = root.value().as_children() {
            for child in children {
                self.process_node(child, &mut scope, &state)?;
            }
        }
        Ok(())
    }

    /// Process one element and recurse into its children.
    fn process_node(&self, node: &Node, scope: &mut RenderScope, state: &WalkState) -> Result<()> {
        let (ns, local) = node
            .qualified_parts()
            .ok_or_else(|| Error::InvalidNodeName(format!("{:?}", node.tag_name())))?;
        // The walk name is always rooted, so suffix matches cannot cross a
        // path separator ('\ow' never matches '\Toolkit\Window'). The default
        // namespace is constant; only explicit Clark fragments override it.
        let namespace = if ns.is_empty() {
            state.namespace.clone()
        } else {
            ns.to_owned()
        };
        let resolved = name::rooted(&name::join(&namespace, local));

        // Processors and style handlers may rewrite the node; work on a copy
        // so the parsed document stays pristine for sibling walks.
        let mut node = node.clone();
        let mut next = state.clone();

        self.apply_styles(&resolved, &mut node, state)?;

        let created = match self.find_processor(&resolved) {
            Some(index) => {
                let processor = &self.processors[index].1;
                let mut ctx = ProcessContext {
                    renderer: self,
                    scope,
                    state: &mut next,
                };
                processor(&mut ctx, &mut node, &resolved)?
            }
            None => Some(self.process_unhandled(scope, &mut next, &mut node, &resolved)?),
        };

        if let Some(component) = created {
            self.apply_events(
                component,
                &resolved,
                &node,
                next.container,
                state.container_node.as_ref(),
            )?;
        }

        // A processor that claimed this element as a container makes this
        // node the container node its children measure against.
        if next.container != state.container {
            next.container_node = Some(node.clone());
        }

        if let Some(children) = node.value().as_children() {
            for child in children {
                self.process_node(child, scope, &next)?;
            }
        }
        Ok(())
    }

    /// Default handling for elements no processor claims: plain construction
    /// under the current container, with any text content exposed as `value`
    /// and `text` attributes.
    fn process_unhandled(
        &self,
        scope: &mut RenderScope,
        state: &mut WalkState,
        node: &mut Node,
        resolved: &str,
    ) -> Result<ComponentId> {
        if let Some(text) = node.value().as_text().map(str::to_owned) {
            if !text.is_empty() {
                node.attributes_mut().set("value", text.clone());
                node.attributes_mut().set("text", text);
            }
        }
        let mut ctx = ProcessContext {
            renderer: self,
            scope,
            state,
        };
        let parent = ctx.container();
        ctx.create_component(resolved, node, parent)
    }

    fn find_processor(&self, resolved: &str) -> Option<usize> {
        self.processors
            .iter()
            .position(|(key, _)| name::suffix_matches(key, resolved))
    }

    /// Resolve a walk name to the identifier handed to the toolkit:
    /// processor keys first, then `use` aliases, then the name itself rooted.
    fn resolve_identifier(&self, scope: &RenderScope, resolved: &str) -> String {
        if let Some((key, _)) = self
            .processors
            .iter()
            .find(|(key, _)| name::suffix_matches(key, resolved))
        {
            return key.clone();
        }
        if let Some(class) = scope.resolve(resolved) {
            return class.to_owned();
        }
        name::rooted(resolved)
    }

    fn apply_styles(&self, resolved: &str, node: &mut Node, state: &WalkState) -> Result<()> {
        for (attribute, handler) in &self.styles {
            let matched = node
                .attributes()
                .get_ignore_case(attribute)
                .map(str::to_owned);
            if let Some(value) = matched {
                handler(attribute, &value, node, resolved, state)?;
            }
        }
        Ok(())
    }

    fn apply_events(
        &self,
        component: ComponentId,
        tag: &str,
        node: &Node,
        container: Option<ComponentId>,
        container_node: Option<&Node>,
    ) -> Result<()> {
        for (attribute, handler) in &self.events {
            if let Some(value) = node.attributes().get_ignore_case(attribute) {
                let ctx = EventContext {
                    component,
                    value,
                    name: tag,
                    container,
                    node,
                    container_node,
                    router: self.router.clone(),
                    toolkit: &self.toolkit,
                };
                handler(&ctx)?;
            }
        }
        Ok(())
    }
}
