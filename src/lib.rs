//! # vellum
//!
//! Route-driven controllers and declarative XML views for native desktop
//! toolkits.
//!
//! vellum splits a desktop application into two halves: a [`routing`] layer
//! that maps string route ids onto closures, named functions and controller
//! methods, and a [`view`] layer that compiles XML view markup into widgets
//! of whatever toolkit the host plugs in behind the [`toolkit::Toolkit`]
//! seam. Event attributes in markup dispatch back through the router, so a
//! whole application can be expressed as routes plus views.
//!
//! ## Core Systems
//!
//! - **[`routing`]** — Route targets, nested groups with middleware, the
//!   handler registry and the dispatching [`Router`]
//! - **[`markup`]** — XML tokenizer, namespace-aware parser and node model
//! - **[`view`]** — View sources and the [`Renderer`] with its processor,
//!   style and event registries
//! - **[`toolkit`]** — The widget-toolkit seam: component construction and
//!   event binding
//! - **[`app`]** — The host-application seam: termination and configuration
//! - **[`testing`]** — [`TestApp`](testing::TestApp), the
//!   [`Headless`](testing::Headless) toolkit and the [`Rig`](testing::Rig)
//!   wiring harness
//!
//! ## Quick start
//!
//! ```
//! use vellum::testing::RigBuilder;
//! use vellum::Value;
//!
//! let rig = RigBuilder::new()
//!     .view("main", r#"<Window title="hello"><Button label="go"/></Window>"#)
//!     .build(|router| {
//!         router.create(|root| {
//!             root.route_fn("main", |req| {
//!                 req.render("main")?;
//!                 Ok(Value::Null)
//!             });
//!             Ok(())
//!         })?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! rig.router.handle("main", Vec::new()).unwrap();
//! assert_eq!(rig.toolkit.borrow().len(), 2);
//! ```

// Foundation
pub mod error;
pub mod name;
pub mod value;

// Collaborator seams
pub mod app;
pub mod toolkit;

// Core systems
pub mod markup;
pub mod routing;
pub mod view;

// Test support
pub mod testing;

pub use app::Application;
pub use error::{Error, Result};
pub use routing::{Route, RouteGroup, Router};
pub use toolkit::{ComponentId, Toolkit};
pub use value::Value;
pub use view::Renderer;
