//! Component-factory collaborator.
//!
//! The renderer never talks to a concrete widget library. It resolves a
//! component identifier (a `\`-separated class-like name) and asks the
//! [`Toolkit`] to construct it, optionally parented to an existing component.
//! Event handlers likewise register callbacks through the toolkit rather than
//! on any concrete widget type.

use std::rc::Rc;

use slotmap::new_key_type;

use crate::error::Result;
use crate::markup::Attributes;

new_key_type! {
    /// Handle to a constructed toolkit component. Copy, lightweight (u64).
    pub struct ComponentId;
}

/// A callback registered for a native UI event.
///
/// Stored behind `Rc` so the toolkit can hand clones out for invocation
/// without holding its own borrow across the call (event callbacks re-enter
/// the router, which may render and construct further components).
pub type EventCallback = Rc<dyn Fn()>;

/// The native widget toolkit as seen by the renderer.
pub trait Toolkit {
    /// Construct a component.
    ///
    /// `identifier` is the fully-resolved class-like name (leading `\`
    /// optional), `attributes` the declared markup attributes after style
    /// handling, and `parent` the current container, if any. Fails with
    /// [`Error::UnknownComponent`](crate::Error::UnknownComponent) when the
    /// identifier is not constructible; that failure propagates untranslated
    /// out of [`Renderer::render`](crate::view::Renderer::render).
    fn construct(
        &mut self,
        identifier: &str,
        attributes: &Attributes,
        parent: Option<ComponentId>,
    ) -> Result<ComponentId>;

    /// Register a callback for a native event on a component.
    ///
    /// `event` is the native event name (e.g. `click`). A component may carry
    /// any number of callbacks per event; they fire in registration order.
    fn bind(&mut self, component: ComponentId, event: &str, callback: EventCallback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<ComponentId>();
    }
}
