//! Loosely-typed values passed through dispatch.
//!
//! Handlers return a [`Value`] and event bindings pass them as positional
//! arguments. The variants cover what actually flows through routing:
//! scalars, component handles and markup nodes.

use crate::markup::Node;
use crate::toolkit::ComponentId;

/// A dynamically-typed dispatch value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value; also what out-of-range argument lookups yield.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string.
    Str(String),
    /// A constructed toolkit component.
    Component(ComponentId),
    /// A markup node, passed by value.
    Node(Node),
}

impl Value {
    /// `true` only for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The component handle, if this is a component.
    pub fn as_component(&self) -> Option<ComponentId> {
        match self {
            Value::Component(id) => Some(*id),
            _ => None,
        }
    }

    /// The node payload, if this is a node.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<ComponentId> for Value {
    fn from(id: ComponentId) -> Self {
        Value::Component(id)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` maps to [`Value::Null`].
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_are_variant_exact() {
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(3i64).as_int(), Some(3));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert!(Value::Null.is_null());
        assert_eq!(Value::from(3i64).as_str(), None);
    }

    #[test]
    fn option_none_is_null() {
        let value: Value = Option::<i64>::None.into();
        assert!(value.is_null());
        let value: Value = Some("x").into();
        assert_eq!(value.as_str(), Some("x"));
    }
}
