//! Crate-wide error type.
//!
//! Everything fallible in this crate returns [`Result`]. Dispatch and
//! rendering failures each carry the name that failed to resolve, so the
//! message alone locates the problem in application code.

use crate::markup::ParseError;

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure from routing, markup parsing or rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A string route target with more than one `@`.
    #[error("invalid route target '{0}': at most one '@' allowed")]
    InvalidTarget(String),

    /// No route with the requested id anywhere in the group tree.
    #[error("no route named '{0}'")]
    RouteNotFound(String),

    /// A named function target missing from the registry.
    #[error("unknown handler function '{0}'")]
    UnknownFunction(String),

    /// A controller name missing from the registry.
    #[error("unknown controller '{0}'")]
    UnknownController(String),

    /// A controller exists but does not expose the requested method.
    #[error("controller '{class}' has no method '{method}'")]
    UnknownMethod {
        /// Controller name as registered.
        class: String,
        /// Requested method.
        method: String,
    },

    /// The view source has no view under the requested name.
    #[error("view '{0}' not found")]
    ViewNotFound(String),

    /// The view markup did not parse.
    #[error("markup error: {0}")]
    Parse(#[from] ParseError),

    /// A markup node without a usable tag name reached the renderer.
    #[error("node has no usable name: {0}")]
    InvalidNodeName(String),

    /// A `use` declaration without its mandatory `class` attribute.
    #[error("'use' requires a 'class' attribute")]
    MissingUseClass,

    /// The toolkit cannot construct the resolved identifier.
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// A handler, middleware or controller body failed.
    #[error("{0}")]
    Invocation(String),

    /// Filesystem failure while loading a view.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a handler-body failure.
    pub fn invocation(message: impl Into<String>) -> Self {
        Error::Invocation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_failing_name() {
        assert_eq!(
            Error::RouteNotFound("main".into()).to_string(),
            "no route named 'main'"
        );
        assert_eq!(
            Error::UnknownMethod {
                class: "Main".into(),
                method: "show".into(),
            }
            .to_string(),
            "controller 'Main' has no method 'show'"
        );
    }

    #[test]
    fn parse_errors_convert() {
        let err: Error = ParseError::UnexpectedEof("unterminated tag".into()).into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
