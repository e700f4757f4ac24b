//! Plain-text extraction from render hook output.
//!
//! A render hook returns a tree of virtual UI nodes. Nothing is rendered here;
//! the tree is only walked for visible text. Nodes are classified into
//! [`RenderNode`] variants up front, so extraction is a plain `match`.

use crate::value::format_number;

/// A virtual UI node as returned by a `render_cell` hook.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RenderNode {
    /// Nothing rendered.
    #[default]
    Empty,
    /// A text leaf.
    Text(String),
    /// A numeric leaf.
    Number(f64),
    /// Sibling nodes, rendered side by side.
    Sequence(Vec<RenderNode>),
    /// A component. A non-empty `label` stands in for the whole subtree.
    Element {
        label: Option<String>,
        children: Box<RenderNode>,
    },
    /// Something that carries no extractable text.
    Opaque,
}

impl RenderNode {
    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        RenderNode::Text(text.into())
    }

    /// A component wrapping `children`.
    pub fn element(children: impl Into<RenderNode>) -> Self {
        RenderNode::Element {
            label: None,
            children: Box::new(children.into()),
        }
    }

    /// A component with an explicit label and no children.
    pub fn labeled(label: impl Into<String>) -> Self {
        RenderNode::Element {
            label: Some(label.into()),
            children: Box::new(RenderNode::Empty),
        }
    }

    /// Set the label of an element. Other variants are returned unchanged.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        match self {
            RenderNode::Element { children, .. } => RenderNode::Element {
                label: Some(label.into()),
                children,
            },
            other => other,
        }
    }

    /// Classify a JSON-shaped virtual node.
    ///
    /// Objects are elements only when they expose a `props` object; their
    /// `props.label` (string or number) and `props.children` are picked up
    /// from there. Booleans and other objects are opaque.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => RenderNode::Empty,
            Value::String(s) => RenderNode::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(RenderNode::Number).unwrap_or(RenderNode::Opaque),
            Value::Array(items) => RenderNode::Sequence(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => match map.get("props") {
                Some(Value::Object(props)) => {
                    let label = match props.get("label") {
                        Some(Value::String(s)) => Some(s.clone()),
                        Some(Value::Number(n)) => n.as_f64().map(format_number),
                        _ => None,
                    };
                    let children = props
                        .get("children")
                        .map(Self::from_json)
                        .unwrap_or_default();
                    RenderNode::Element {
                        label,
                        children: Box::new(children),
                    }
                }
                _ => RenderNode::Opaque,
            },
            Value::Bool(_) => RenderNode::Opaque,
        }
    }
}

impl From<&str> for RenderNode {
    fn from(text: &str) -> Self {
        RenderNode::Text(text.to_string())
    }
}

impl From<String> for RenderNode {
    fn from(text: String) -> Self {
        RenderNode::Text(text)
    }
}

impl From<f64> for RenderNode {
    fn from(n: f64) -> Self {
        RenderNode::Number(n)
    }
}

impl From<i64> for RenderNode {
    fn from(n: i64) -> Self {
        RenderNode::Number(n as f64)
    }
}

impl<T: Into<RenderNode>> From<Vec<T>> for RenderNode {
    fn from(nodes: Vec<T>) -> Self {
        RenderNode::Sequence(nodes.into_iter().map(Into::into).collect())
    }
}

/// Extract the visible text of a render hook result.
///
/// Sequences join their non-empty parts with a single space. An element
/// with a non-empty label yields the label; otherwise its children are
/// searched, where nested labels are not consulted.
pub fn extract_text(node: &RenderNode) -> String {
    match node {
        RenderNode::Sequence(items) => join_non_empty(items.iter().map(extract_text)),
        RenderNode::Element {
            label: Some(label), ..
        } if !label.is_empty() => label.clone(),
        RenderNode::Element { children, .. } => extract_child_text(children),
        leaf => leaf_text(leaf),
    }
}

fn extract_child_text(node: &RenderNode) -> String {
    match node {
        RenderNode::Sequence(items) => join_non_empty(items.iter().map(extract_child_text)),
        RenderNode::Element { children, .. } => extract_child_text(children),
        leaf => leaf_text(leaf),
    }
}

fn leaf_text(node: &RenderNode) -> String {
    match node {
        RenderNode::Text(text) => text.clone(),
        RenderNode::Number(n) => format_number(*n),
        _ => String::new(),
    }
}

fn join_non_empty(parts: impl Iterator<Item = String>) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
