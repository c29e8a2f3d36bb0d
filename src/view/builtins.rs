//! Built-in processors, style handlers and event handlers.
//!
//! Registered by [`Renderer::new`](crate::view::Renderer::new) ahead of
//! anything host code adds, so these defaults always win the first-match
//! lookup for the names they cover.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::markup::Node;
use crate::toolkit::ComponentId;
use crate::value::Value;
use crate::view::renderer::{EventContext, ProcessContext, WalkState};

/// `use`: declare a class alias for the rest of the render. Produces no
/// component.
pub(crate) fn use_processor(
    ctx: &mut ProcessContext<'_>,
    node: &mut Node,
    _name: &str,
) -> Result<Option<ComponentId>> {
    let class = node
        .attributes()
        .get_ignore_case("class")
        .ok_or(Error::MissingUseClass)?
        .to_owned();
    ctx.declare_use(&class);
    Ok(None)
}

/// `Toolkit\Window`: a top-level container. Constructed parentless and made
/// the container for its children.
pub(crate) fn window_processor(
    ctx: &mut ProcessContext<'_>,
    node: &mut Node,
    name: &str,
) -> Result<Option<ComponentId>> {
    let component = ctx.create_component(name, node, None)?;
    ctx.set_container(component);
    Ok(Some(component))
}

/// `Toolkit\Panel`: a nested container. Constructed under the current
/// container and made the container for its children.
pub(crate) fn panel_processor(
    ctx: &mut ProcessContext<'_>,
    node: &mut Node,
    name: &str,
) -> Result<Option<ComponentId>> {
    let parent = ctx.container();
    let component = ctx.create_component(name, node, parent)?;
    ctx.set_container(component);
    Ok(Some(component))
}

/// `align="center"`: compute a `left` offset centering the element inside
/// its container, from the two declared `width` attributes.
///
/// Anything other than `center`, or a missing/unparsable width on either
/// side, logs a warning and leaves the node untouched.
pub(crate) fn align(
    _attribute: &str,
    value: &str,
    node: &mut Node,
    name: &str,
    state: &WalkState,
) -> Result<()> {
    if !value.eq_ignore_ascii_case("center") {
        tracing::warn!(component = name, align = value, "unsupported align value");
        return Ok(());
    }

    let own = node
        .attributes()
        .get_ignore_case("width")
        .and_then(|w| w.parse::<f64>().ok());
    let container = state
        .container_node()
        .and_then(|n| n.attributes().get_ignore_case("width"))
        .and_then(|w| w.parse::<f64>().ok());

    match (own, container) {
        (Some(own), Some(container)) => {
            let left = container / 2.0 - own / 2.0;
            node.attributes_mut().set("left", format_length(left));
        }
        _ => {
            tracing::warn!(component = name, "align=center needs a width on both the element and its container");
        }
    }
    Ok(())
}

/// Render whole-valued lengths without a fractional part.
fn format_length(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// `onclick="route"`: bind a toolkit `click` callback that dispatches the
/// named route with the standard event arguments: the component, its full
/// identifier, the container, the markup node and the container's node.
pub(crate) fn on_click(ctx: &EventContext<'_>) -> Result<()> {
    let route = ctx.value.to_owned();
    let args = vec![
        Value::Component(ctx.component),
        Value::from(ctx.name),
        ctx.container.map(Value::Component).unwrap_or(Value::Null),
        Value::Node(ctx.node.clone()),
        ctx.container_node
            .cloned()
            .map(Value::Node)
            .unwrap_or(Value::Null),
    ];
    let router = ctx.router.clone();

    ctx.bind(
        "click",
        Rc::new(move || {
            let Some(router) = router.upgrade() else {
                tracing::warn!(route = %route, "click fired after router was dropped");
                return;
            };
            // Dispatch errors already terminate the application; here they
            // only need logging, since the native event loop has no caller
            // to propagate to.
            if let Err(err) = router.handle(&route, args.clone()) {
                tracing::error!(route = %route, error = %err, "click dispatch failed");
            }
        }),
    );
    Ok(())
}
