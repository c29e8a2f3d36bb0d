//! Node types: Node, NodeValue, Attributes.
//!
//! Element names are stored in Clark notation, `{namespace}local`, with the
//! namespace fragment resolved from `xmlns` declarations at parse time. An
//! empty fragment (`{}Button`) means "inherit the default namespace", which
//! the renderer substitutes during the walk.

/// Attributes declared on a markup element.
///
/// Insertion-ordered; later `set` calls for an existing name replace the
/// value in place. Lookup is available both exact and ASCII-case-insensitive
/// (style and event handler keys match case-insensitively).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs, with replace-on-duplicate semantics.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attrs = Self::new();
        for (name, value) in pairs {
            attrs.set(name, value);
        }
        attrs
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// ASCII-case-insensitive lookup.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing entry with the same exact name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Whether an attribute with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// The content of an element: either text or child elements.
///
/// Mixed content collapses to `Children`; an element with no content at all
/// carries an empty `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// Trimmed character data.
    Text(String),
    /// Child elements in document order.
    Children(Vec<Node>),
}

impl NodeValue {
    /// The text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NodeValue::Text(text) => Some(text),
            NodeValue::Children(_) => None,
        }
    }

    /// The child elements, if any.
    pub fn as_children(&self) -> Option<&[Node]> {
        match self {
            NodeValue::Children(children) => Some(children),
            NodeValue::Text(_) => None,
        }
    }
}

/// One parsed markup element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    tag_name: Option<String>,
    attributes: Attributes,
    value: NodeValue,
}

impl Node {
    /// Create an element node with a Clark-notation tag name.
    pub fn element(
        tag_name: impl Into<String>,
        attributes: Attributes,
        value: NodeValue,
    ) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            attributes,
            value,
        }
    }

    /// Create a tagless node. The walk descends straight into its children.
    pub fn anonymous(value: NodeValue) -> Self {
        Self {
            tag_name: None,
            attributes: Attributes::new(),
            value,
        }
    }

    /// The Clark-notation tag name, if this node has one.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    /// Declared attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable attributes, for style handlers that rewrite or add values.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// The node's content.
    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    /// Split the tag name into its `(namespace, local)` parts.
    ///
    /// Returns `None` when the node is tagless or the name is not wrapped in
    /// `{...}`; the renderer turns that into
    /// [`Error::InvalidNodeName`](crate::Error::InvalidNodeName).
    pub fn qualified_parts(&self) -> Option<(&str, &str)> {
        let tag = self.tag_name.as_deref()?;
        let rest = tag.strip_prefix('{')?;
        let close = rest.find('}')?;
        Some((&rest[..close], &rest[close + 1..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Attributes ───────────────────────────────────────────────────

    #[test]
    fn attributes_preserve_declaration_order() {
        let attrs = Attributes::from_pairs([("b", "1"), ("a", "2")]);
        let names: Vec<&str> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut attrs = Attributes::from_pairs([("width", "100"), ("height", "50")]);
        attrs.set("width", "200");
        assert_eq!(attrs.get("width"), Some("200"));
        assert_eq!(attrs.len(), 2);
        let names: Vec<&str> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["width", "height"]);
    }

    #[test]
    fn get_ignore_case() {
        let attrs = Attributes::from_pairs([("OnClick", "main")]);
        assert_eq!(attrs.get_ignore_case("onclick"), Some("main"));
        assert_eq!(attrs.get("onclick"), None);
    }

    // ── qualified_parts ──────────────────────────────────────────────

    #[test]
    fn splits_clark_name() {
        let node = Node::element(
            "{Gui\\Components}Window",
            Attributes::new(),
            NodeValue::Text(String::new()),
        );
        assert_eq!(node.qualified_parts(), Some(("Gui\\Components", "Window")));
    }

    #[test]
    fn splits_empty_namespace() {
        let node = Node::element("{}Button", Attributes::new(), NodeValue::Text(String::new()));
        assert_eq!(node.qualified_parts(), Some(("", "Button")));
    }

    #[test]
    fn rejects_unwrapped_name() {
        let node = Node::element("Button", Attributes::new(), NodeValue::Text(String::new()));
        assert_eq!(node.qualified_parts(), None);
    }

    #[test]
    fn anonymous_node_has_no_parts() {
        let node = Node::anonymous(NodeValue::Children(Vec::new()));
        assert_eq!(node.tag_name(), None);
        assert_eq!(node.qualified_parts(), None);
    }

    // ── NodeValue ────────────────────────────────────────────────────

    #[test]
    fn value_accessors() {
        let text = NodeValue::Text("hi".into());
        assert_eq!(text.as_text(), Some("hi"));
        assert!(text.as_children().is_none());

        let children = NodeValue::Children(vec![]);
        assert!(children.as_text().is_none());
        assert_eq!(children.as_children(), Some(&[][..]));
    }
}
