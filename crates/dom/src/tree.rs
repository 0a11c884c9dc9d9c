//! Document tree operations.
//!
//! [`Document`] owns the node store and provides tree construction,
//! traversal, and the mutation surface the interaction engine writes
//! through: class-list edits, inline style edits, and text content.

use crate::node::{Attr, ElementData, Node, NodeData, NodeId};
use crate::selector::{Selector, SelectorError, SelectorList};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The complete document tree.
///
/// Storage is append-only: nodes are never deallocated, so every issued
/// [`NodeId`] stays valid until the document is dropped. Detached nodes
/// (e.g. text replaced by [`set_text_content`](Document::set_text_content))
/// simply become unreachable.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the document root node.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.allocate(Node::new(NodeData::Document));
        doc
    }

    /// The document root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the store (including detached ones).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    // =======================================================================
    // Node creation
    // =======================================================================

    /// Create an element with no attributes.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.create_element_with(tag_name, Vec::new())
    }

    /// Create an element.
    ///
    /// The `id` and class-list caches are extracted from `attrs`
    /// automatically.
    pub fn create_element_with(&mut self, tag_name: &str, attrs: Vec<Attr>) -> NodeId {
        let id = attrs
            .iter()
            .find(|a| a.name == "id")
            .map(|a| a.value.clone());

        let classes = attrs
            .iter()
            .find(|a| a.name == "class")
            .map(|a| {
                a.value
                    .split_whitespace()
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        self.allocate(Node::new(NodeData::Element(ElementData {
            tag_name: tag_name.to_string(),
            attrs,
            id,
            classes,
            style: Vec::new(),
        })))
    }

    /// Create a text node.
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.allocate(Node::new(NodeData::Text {
            data: data.to_string(),
        }))
    }

    // =======================================================================
    // Tree construction
    // =======================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// If `child` already has a parent it is first detached from its
    /// current position.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(child).parent.is_some() {
            self.detach(child);
        }

        let old_last = self.node(parent).last_child;

        if let Some(old_last_id) = old_last {
            self.node_mut(old_last_id).next_sibling = Some(child);
        }

        {
            let child_node = self.node_mut(child);
            child_node.parent = Some(parent);
            child_node.prev_sibling = old_last;
            child_node.next_sibling = None;
        }

        let parent_node = self.node_mut(parent);
        if parent_node.first_child.is_none() {
            parent_node.first_child = Some(child);
        }
        parent_node.last_child = Some(child);
    }

    /// Detach a node from its parent without deallocating it.
    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let n = self.node(id);
            (n.parent, n.prev_sibling, n.next_sibling)
        };

        if let Some(prev_id) = prev {
            self.node_mut(prev_id).next_sibling = next;
        }
        if let Some(next_id) = next {
            self.node_mut(next_id).prev_sibling = prev;
        }
        if let Some(parent_id) = parent {
            let parent_node = self.node_mut(parent_id);
            if parent_node.first_child == Some(id) {
                parent_node.first_child = next;
            }
            if parent_node.last_child == Some(id) {
                parent_node.last_child = prev;
            }
        }

        let node = self.node_mut(id);
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    // =======================================================================
    // Traversal
    // =======================================================================

    /// The immediate children of `parent` in document order.
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.node(parent).first_child;
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.node(id).next_sibling;
        }
        out
    }

    /// The chain of ancestors from `node` up to the root; the first element
    /// is the direct parent, the last is the root.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.node(node).parent;
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.node(id).parent;
        }
        out
    }

    /// All descendants of `node` in pre-order DFS, not including `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();

        for &child in self.children(node).iter().rev() {
            stack.push(child);
        }
        while let Some(id) = stack.pop() {
            out.push(id);
            for &gc in self.children(id).iter().rev() {
                stack.push(gc);
            }
        }
        out
    }

    /// Returns `true` when `inner` is `outer` itself or a descendant of it.
    ///
    /// This is the containment test behind "was the click inside the
    /// sidebar" style checks.
    pub fn contains(&self, outer: NodeId, inner: NodeId) -> bool {
        inner == outer || self.ancestors(inner).contains(&outer)
    }

    // =======================================================================
    // Queries
    // =======================================================================

    /// Find the first element with the given `id` attribute (pre-order DFS
    /// from the root).
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root).into_iter().find(|&n| {
            self.node(n)
                .as_element()
                .is_some_and(|e| e.id.as_deref() == Some(id))
        })
    }

    /// All elements matching an already-parsed selector list, in pre-order.
    pub fn select(&self, selectors: &SelectorList) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&n| self.matches(n, selectors))
            .collect()
    }

    /// All elements matching `selector`, in pre-order.
    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(self.select(&SelectorList::parse(selector)?))
    }

    /// The first element matching `selector`, if any.
    pub fn query(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// Returns `true` when `node` is an element matching any selector in
    /// the list.
    pub fn matches(&self, node: NodeId, selectors: &SelectorList) -> bool {
        match self.node(node).as_element() {
            Some(elem) => selectors.iter().any(|s| s.matches(elem)),
            None => false,
        }
    }

    /// Read an attribute off an element node.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).as_element()?.attribute(name)
    }

    // =======================================================================
    // Class list
    // =======================================================================

    /// Returns `true` if `node` is an element carrying `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .as_element()
            .is_some_and(|e| e.has_class(class))
    }

    /// Add `class` to the element's class list. No-op on duplicates and on
    /// non-element nodes.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(elem) = self.node_mut(node).as_element_mut() {
            if !elem.has_class(class) {
                elem.classes.push(class.to_string());
            }
        }
    }

    /// Remove `class` from the element's class list. No-op when absent.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(elem) = self.node_mut(node).as_element_mut() {
            elem.classes.retain(|c| c != class);
        }
    }

    /// Flip `class` on the element and return the new presence state.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    // =======================================================================
    // Inline style
    // =======================================================================

    /// Set an inline style property. Last write per property wins;
    /// insertion order is preserved for unrelated properties.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(elem) = self.node_mut(node).as_element_mut() {
            if let Some(slot) = elem.style.iter_mut().find(|(p, _)| p == property) {
                slot.1 = value.to_string();
            } else {
                elem.style.push((property.to_string(), value.to_string()));
            }
        }
    }

    /// Read back an inline style property.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).as_element()?.style_value(property)
    }

    // =======================================================================
    // Text content
    // =======================================================================

    /// Concatenated text of `node` and all its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let NodeData::Text { data } = &self.node(node).data {
            out.push_str(data);
        }
        for desc in self.descendants(node) {
            if let NodeData::Text { data } = &self.node(desc).data {
                out.push_str(data);
            }
        }
        out
    }

    /// Replace the children of `node` with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        for child in self.children(node) {
            self.detach(child);
        }
        let text_node = self.create_text(text);
        self.append_child(node, text_node);
    }

    // =======================================================================
    // Builder conveniences
    // =======================================================================

    /// Create an element with the given class attribute and append it to
    /// `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, class: &str) -> NodeId {
        let el = self.create_element_with(tag, vec![Attr::new("class", class)]);
        self.append_child(parent, el);
        el
    }

    /// Create an element from (name, value) attribute pairs and append it
    /// to `parent`.
    pub fn append_element_with(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let attrs = attrs.iter().map(|(n, v)| Attr::new(n, v)).collect();
        let el = self.create_element_with(tag, attrs);
        self.append_child(parent, el);
        el
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let t = self.create_text(text);
        self.append_child(parent, t);
        t
    }

    fn matches_selector(&self, node: NodeId, selector: &Selector) -> bool {
        self.node(node)
            .as_element()
            .is_some_and(|e| selector.matches(e))
    }

    /// Find the nearest ancestor-or-self element matching `selector`.
    ///
    /// Mirrors how a listener registered on an element also sees clicks on
    /// its descendants.
    pub fn closest(&self, node: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        if selectors.iter().any(|s| self.matches_selector(node, s)) {
            return Some(node);
        }
        self.ancestors(node)
            .into_iter()
            .find(|&a| selectors.iter().any(|s| self.matches_selector(a, s)))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a small page skeleton.
    ///
    /// ```text
    /// document
    /// └── body
    ///     ├── nav.sidebar
    ///     │   ├── a.nav-link href=#about
    ///     │   └── a.nav-link href=#future
    ///     └── section#about.section
    ///         └── "About me"
    /// ```
    fn build_page() -> (Document, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let root = doc.root();
        doc.append_child(root, body);

        let sidebar = doc.append_element(body, "nav", "sidebar");
        let link_about = doc.append_element_with(
            sidebar,
            "a",
            &[("class", "nav-link"), ("href", "#about")],
        );
        let link_future = doc.append_element_with(
            sidebar,
            "a",
            &[("class", "nav-link"), ("href", "#future")],
        );
        let about = doc.append_element_with(
            body,
            "section",
            &[("class", "section"), ("id", "about")],
        );
        doc.append_text(about, "About me");

        (doc, body, sidebar, link_about, link_future, about)
    }

    // -- construction -------------------------------------------------------

    #[test]
    fn new_document_has_root() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(matches!(doc.node(doc.root()).data, NodeData::Document));
    }

    #[test]
    fn create_element_extracts_id_and_classes() {
        let mut doc = Document::new();
        let el = doc.create_element_with(
            "div",
            vec![Attr::new("id", "main"), Attr::new("class", "foo bar")],
        );
        let elem = doc.node(el).as_element().unwrap();
        assert_eq!(elem.id.as_deref(), Some("main"));
        assert_eq!(elem.classes, vec!["foo", "bar"]);
    }

    #[test]
    fn append_child_sets_links() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let a = doc.create_element("span");
        let b = doc.create_text("hi");

        doc.append_child(parent, a);
        doc.append_child(parent, b);

        let p = doc.node(parent);
        assert_eq!(p.first_child, Some(a));
        assert_eq!(p.last_child, Some(b));
        assert_eq!(doc.node(a).next_sibling, Some(b));
        assert_eq!(doc.node(b).prev_sibling, Some(a));
        assert_eq!(doc.children(parent), vec![a, b]);
    }

    #[test]
    fn append_child_moves_from_old_parent() {
        let (mut doc, _body, sidebar, link_about, ..) = build_page();
        let elsewhere = doc.create_element("div");
        doc.append_child(elsewhere, link_about);
        assert_eq!(doc.children(elsewhere), vec![link_about]);
        assert!(!doc.children(sidebar).contains(&link_about));
    }

    // -- traversal ----------------------------------------------------------

    #[test]
    fn ancestors_chain() {
        let (doc, body, sidebar, link_about, ..) = build_page();
        assert_eq!(
            doc.ancestors(link_about),
            vec![sidebar, body, doc.root()]
        );
    }

    #[test]
    fn contains_self_and_descendants() {
        let (doc, body, sidebar, link_about, _link_future, about) = build_page();
        assert!(doc.contains(sidebar, sidebar));
        assert!(doc.contains(sidebar, link_about));
        assert!(doc.contains(body, about));
        assert!(!doc.contains(sidebar, about));
        assert!(!doc.contains(about, sidebar));
    }

    // -- queries ------------------------------------------------------------

    #[test]
    fn element_by_id_found() {
        let (doc, .., about) = build_page();
        assert_eq!(doc.element_by_id("about"), Some(about));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn query_all_by_class() {
        let (doc, _body, _sidebar, link_about, link_future, _about) = build_page();
        let links = doc.query_all(".nav-link").unwrap();
        assert_eq!(links, vec![link_about, link_future]);
    }

    #[test]
    fn query_attr_prefix() {
        let (doc, _body, _sidebar, link_about, link_future, _about) = build_page();
        let anchors = doc.query_all(r##"a[href^="#"]"##).unwrap();
        assert_eq!(anchors, vec![link_about, link_future]);
    }

    #[test]
    fn query_attr_exact() {
        let (doc, _body, _sidebar, link_about, ..) = build_page();
        let found = doc.query(r##"a[href="#about"]"##).unwrap();
        assert_eq!(found, Some(link_about));
    }

    #[test]
    fn query_selector_list() {
        let (doc, _body, sidebar, .., about) = build_page();
        let hits = doc.query_all(".section, .sidebar").unwrap();
        assert_eq!(hits, vec![sidebar, about]);
    }

    #[test]
    fn closest_walks_up() {
        let (doc, _body, sidebar, link_about, ..) = build_page();
        let list = SelectorList::parse(".sidebar").unwrap();
        assert_eq!(doc.closest(link_about, &list), Some(sidebar));
        assert_eq!(doc.closest(sidebar, &list), Some(sidebar));
        let missing = SelectorList::parse(".hero").unwrap();
        assert_eq!(doc.closest(link_about, &missing), None);
    }

    // -- class list ---------------------------------------------------------

    #[test]
    fn add_class_is_idempotent() {
        let (mut doc, _body, sidebar, ..) = build_page();
        doc.add_class(sidebar, "active");
        doc.add_class(sidebar, "active");
        let elem = doc.node(sidebar).as_element().unwrap();
        assert_eq!(elem.classes, vec!["sidebar", "active"]);
    }

    #[test]
    fn remove_class_absent_is_noop() {
        let (mut doc, _body, sidebar, ..) = build_page();
        doc.remove_class(sidebar, "active");
        assert!(doc.has_class(sidebar, "sidebar"));
    }

    #[test]
    fn toggle_class_flips() {
        let (mut doc, _body, sidebar, ..) = build_page();
        assert!(doc.toggle_class(sidebar, "active"));
        assert!(doc.has_class(sidebar, "active"));
        assert!(!doc.toggle_class(sidebar, "active"));
        assert!(!doc.has_class(sidebar, "active"));
    }

    #[test]
    fn class_ops_on_text_are_noop() {
        let mut doc = Document::new();
        let t = doc.create_text("hi");
        doc.add_class(t, "active");
        assert!(!doc.has_class(t, "active"));
    }

    // -- style --------------------------------------------------------------

    #[test]
    fn set_style_last_write_wins() {
        let (mut doc, _body, sidebar, ..) = build_page();
        doc.set_style(sidebar, "opacity", "0");
        doc.set_style(sidebar, "transform", "translateY(20px)");
        doc.set_style(sidebar, "opacity", "1");
        assert_eq!(doc.style(sidebar, "opacity"), Some("1"));
        assert_eq!(doc.style(sidebar, "transform"), Some("translateY(20px)"));
        let elem = doc.node(sidebar).as_element().unwrap();
        assert_eq!(elem.style.len(), 2);
    }

    // -- text content -------------------------------------------------------

    #[test]
    fn text_content_concatenates() {
        let (doc, .., about) = build_page();
        assert_eq!(doc.text_content(about), "About me");
    }

    #[test]
    fn set_text_content_replaces_children() {
        let (mut doc, .., about) = build_page();
        doc.set_text_content(about, "07");
        assert_eq!(doc.text_content(about), "07");
        assert_eq!(doc.children(about).len(), 1);
        doc.set_text_content(about, "08");
        assert_eq!(doc.text_content(about), "08");
    }
}
