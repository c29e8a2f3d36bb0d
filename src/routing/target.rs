//! Route targets: what a route id is bound to.
//!
//! A target is normalized exactly once, at construction. String targets
//! follow the grammar `^[^@]*(@[^@]*)?$`: zero `@` names a free function, one
//! `@` splits into a class/method pair, and anything with two or more `@` is
//! rejected up front. Resolution of names to actual callables happens only at
//! run time, against the [`HandlerRegistry`](crate::routing::HandlerRegistry);
//! a target is a pure value and never touches the registry itself.

use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::routing::request::Request;
use crate::value::Value;

/// The callable type behind direct closure targets and registered functions.
pub type HandlerFn = dyn Fn(&Request<'_>) -> Result<Value>;

/// A shared, invokable handler.
pub type Handler = Rc<HandlerFn>;

/// A normalized route target.
#[derive(Clone)]
pub enum RouteTarget {
    /// A closure bound directly at registration time.
    Handler(Handler),
    /// A named free function, resolved through the registry at run time.
    Function(String),
    /// A class/method pair, instantiated through the registry at run time.
    Method {
        /// Class-like controller name, possibly namespace-qualified.
        class: String,
        /// Method name on that controller.
        method: String,
    },
}

impl RouteTarget {
    /// Parse a string target.
    ///
    /// The input is trimmed first. Fails with [`Error::InvalidTarget`] when
    /// the string contains more than one `@`.
    pub fn parse(target: &str) -> Result<Self> {
        let target = target.trim();
        let parts: Vec<&str> = target.split('@').collect();
        match parts.len() {
            1 => Ok(RouteTarget::Function(parts[0].to_owned())),
            2 => Ok(RouteTarget::Method {
                class: parts[0].to_owned(),
                method: parts[1].to_owned(),
            }),
            _ => Err(Error::InvalidTarget(target.to_owned())),
        }
    }

    /// Wrap a closure as a target.
    pub fn handler(f: impl Fn(&Request<'_>) -> Result<Value> + 'static) -> Self {
        RouteTarget::Handler(Rc::new(f))
    }

    /// The class-like part, for method targets.
    pub fn class(&self) -> Option<&str> {
        match self {
            RouteTarget::Method { class, .. } => Some(class),
            _ => None,
        }
    }

    /// The function or method name, for named targets.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            RouteTarget::Function(name) => Some(name),
            RouteTarget::Method { method, .. } => Some(method),
            RouteTarget::Handler(_) => None,
        }
    }
}

impl fmt::Debug for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::Handler(_) => f.write_str("Handler(..)"),
            RouteTarget::Function(name) => f.debug_tuple("Function").field(name).finish(),
            RouteTarget::Method { class, method } => f
                .debug_struct("Method")
                .field("class", class)
                .field("method", method)
                .finish(),
        }
    }
}

impl From<(String, String)> for RouteTarget {
    /// The 2-tuple `[classLike, method]` registration form.
    fn from((class, method): (String, String)) -> Self {
        RouteTarget::Method { class, method }
    }
}

impl From<(&str, &str)> for RouteTarget {
    fn from((class, method): (&str, &str)) -> Self {
        RouteTarget::Method {
            class: class.to_owned(),
            method: method.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── String grammar ───────────────────────────────────────────────

    #[test]
    fn zero_at_is_a_function() {
        let target = RouteTarget::parse("show_main").expect("valid target");
        assert!(matches!(target, RouteTarget::Function(ref name) if name == "show_main"));
        assert_eq!(target.function_name(), Some("show_main"));
        assert_eq!(target.class(), None);
    }

    #[test]
    fn one_at_splits_class_and_method() {
        let target = RouteTarget::parse("MainController@show").expect("valid target");
        assert_eq!(target.class(), Some("MainController"));
        assert_eq!(target.function_name(), Some("show"));
    }

    #[test]
    fn two_ats_fail_at_construction() {
        let err = RouteTarget::parse("A@b@c").expect_err("must fail");
        assert!(matches!(err, Error::InvalidTarget(ref input) if input == "A@b@c"));
    }

    #[test]
    fn many_ats_fail() {
        assert!(RouteTarget::parse("a@b@c@d").is_err());
    }

    #[test]
    fn input_is_trimmed() {
        let target = RouteTarget::parse("  Main@show  ").expect("valid target");
        assert_eq!(target.class(), Some("Main"));
    }

    // ── Grammar edges ────────────────────────────────────────────────

    #[test]
    fn empty_string_is_a_function_target() {
        // `^[^@]*$` admits the empty string; it fails later at lookup.
        let target = RouteTarget::parse("").expect("grammar admits empty");
        assert_eq!(target.function_name(), Some(""));
    }

    #[test]
    fn lone_at_is_an_empty_pair() {
        let target = RouteTarget::parse("@").expect("grammar admits '@'");
        assert_eq!(target.class(), Some(""));
        assert_eq!(target.function_name(), Some(""));
    }

    // ── Other forms ──────────────────────────────────────────────────

    #[test]
    fn tuple_form() {
        let target: RouteTarget = ("MainController", "kill").into();
        assert_eq!(target.class(), Some("MainController"));
        assert_eq!(target.function_name(), Some("kill"));
    }

    #[test]
    fn handler_form_has_no_names() {
        let target = RouteTarget::handler(|_req| Ok(Value::Null));
        assert_eq!(target.class(), None);
        assert_eq!(target.function_name(), None);
        assert_eq!(format!("{target:?}"), "Handler(..)");
    }
}
