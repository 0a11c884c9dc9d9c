//! Node model.
//!
//! All nodes live in the [`Document`](crate::Document)'s backing vector and
//! are referenced by [`NodeId`]. The tree structure is encoded via
//! parent/child/sibling links stored directly on each node.

/// A handle into the document's node store.
///
/// Ids are plain indices: the store is append-only, so an id issued once
/// stays valid for the lifetime of the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The raw index into the node store.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

/// A single attribute on an element (e.g. `href="#about"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Element data
// ---------------------------------------------------------------------------

/// Data specific to element nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementData {
    pub tag_name: String,
    pub attrs: Vec<Attr>,
    /// Cached `id` attribute value for fast lookup.
    pub id: Option<String>,
    /// Live class list. Seeded from the `class` attribute, mutated through
    /// the class-list operations on [`Document`](crate::Document).
    pub classes: Vec<String>,
    /// Inline style declarations in insertion order; last write per
    /// property wins.
    pub style: Vec<(String, String)>,
}

impl ElementData {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns `true` if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Read back an inline style property.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }
}

// ---------------------------------------------------------------------------
// Node data (variant per node type)
// ---------------------------------------------------------------------------

/// The payload that distinguishes different kinds of nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text { data: String },
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single node in the document tree.
///
/// Tree links form an intrusive doubly-linked child list so that
/// insertions and detachments are O(1).
#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,

    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    /// Create a new detached node.
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Returns `true` if this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Returns `true` if this node is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    /// If this is an element, return a reference to its [`ElementData`].
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// If this is an element, return a mutable reference to its [`ElementData`].
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }
}
