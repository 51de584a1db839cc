//! Arena-backed document tree.
//!
//! Nodes live in a single `Vec` and are addressed by [`NodeId`] handles that
//! stay valid for the life of the [`Document`]. Detaching a node never frees
//! its slot; it simply becomes unreachable from the root.

/// Stable handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// Character data, escaped on output.
    Text(String),
    /// Raw fragment emitted verbatim inside a CDATA section.
    Literal(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Where [`Document::insert_block`] places a node among a parent's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPosition<'a> {
    Start,
    End,
    /// Before the first child element with this name, else at the start.
    Before(&'a str),
    /// After the last child element with this name, else at the start.
    AfterLast(&'a str),
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

/// Element name without its namespace prefix.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl Document {
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Node {
            kind: NodeKind::Element {
                name: root_name.into(),
                attributes: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element.
    pub fn element(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Element {
            name: name.into(),
            attributes: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn text(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(content.into()))
    }

    /// Create a detached literal fragment.
    pub fn literal(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Literal(content.into()))
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId, name: &str) -> bool {
        self.name(id).is_some_and(|n| local_name(n) == name)
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or overwrite an attribute. No-op on non-element nodes.
    pub fn set_attr(&mut self, id: NodeId, key: &str, value: impl Into<String>) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind {
            let value = value.into();
            match attributes.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value,
                None => attributes.push((key.to_string(), value)),
            }
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(node) = current {
            if node == candidate {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let index = self.nodes[parent.0].children.len();
        self.insert_at(parent, index, child);
    }

    /// Attach `child` under `parent` at `index` (clamped), detaching it from
    /// any previous parent first. Attaching a node under itself or one of
    /// its descendants is ignored.
    pub fn insert_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        self.remove(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.element(name);
        self.append(parent, id);
        id
    }

    /// Detach a node from its parent. The node and its subtree stay valid.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn position_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// Child elements of `parent` with the given local name.
    pub fn child_elements<'a>(
        &'a self,
        parent: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(parent)
            .iter()
            .copied()
            .filter(move |child| self.is_element(*child, name))
    }

    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(parent, name).next()
    }

    pub fn find_child_by_attr(
        &self,
        parent: NodeId,
        name: &str,
        key: &str,
        value: &str,
    ) -> Option<NodeId> {
        self.child_elements(parent, name)
            .find(|child| self.attr(*child, key) == Some(value))
    }

    /// `from` and everything below it, in document order.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// First descendant element of `from` (excluding `from`) with the given
    /// local name, depth-first.
    pub fn find_first(&self, from: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(from)
            .into_iter()
            .skip(1)
            .find(|id| self.is_element(*id, name))
    }

    pub fn find_all(&self, from: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(from)
            .into_iter()
            .skip(1)
            .filter(|id| self.is_element(*id, name))
            .collect()
    }

    /// Concatenated text and literal content of direct children.
    pub fn text_content(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .filter_map(|child| match self.kind(*child) {
                NodeKind::Text(text) | NodeKind::Literal(text) => Some(text.as_str()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    /// Replace all children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) {
        self.clear_children(id);
        let text = self.text(content);
        self.append(id, text);
    }

    fn resolve_position(&self, parent: NodeId, position: BlockPosition<'_>) -> usize {
        match position {
            BlockPosition::Start => 0,
            BlockPosition::End => self.children(parent).len(),
            BlockPosition::Before(name) => self
                .children(parent)
                .iter()
                .position(|child| self.is_element(*child, name))
                .unwrap_or(0),
            BlockPosition::AfterLast(name) => self
                .children(parent)
                .iter()
                .rposition(|child| self.is_element(*child, name))
                .map_or(0, |idx| idx + 1),
        }
    }

    pub fn insert_block(&mut self, parent: NodeId, block: NodeId, position: BlockPosition<'_>) {
        self.remove(block);
        let index = self.resolve_position(parent, position);
        self.insert_at(parent, index, block);
    }

    /// Remove every child `<tag name="block_name">` of `parent`, then insert
    /// `block` at `position` (resolved after the removal).
    ///
    /// Returns the handles that were detached.
    pub fn replace_named_block(
        &mut self,
        parent: NodeId,
        tag: &str,
        block_name: &str,
        block: NodeId,
        position: BlockPosition<'_>,
    ) -> Vec<NodeId> {
        let stale: Vec<NodeId> = self
            .child_elements(parent, tag)
            .filter(|child| self.attr(*child, "name") == Some(block_name))
            .collect();
        for id in &stale {
            self.remove(*id);
        }
        self.insert_block(parent, block, position);
        stale
    }

    /// `id` attribute values of every reachable element, in document order.
    pub fn ids(&self) -> Vec<&str> {
        self.descendants(self.root)
            .into_iter()
            .filter_map(|id| self.attr(id, "id"))
            .collect()
    }

    /// `id` attributes that parse as integers.
    pub fn numeric_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids()
            .into_iter()
            .filter_map(|id| id.trim().parse::<u64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(doc: &Document, parent: NodeId) -> Vec<String> {
        doc.children(parent)
            .iter()
            .filter_map(|id| doc.name(*id).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_append_and_insert() {
        let mut doc = Document::new("report");
        let root = doc.root();
        doc.append_element(root, "property");
        doc.append_element(root, "body");
        let method = doc.element("method");
        doc.insert_at(root, 1, method);
        assert_eq!(names(&doc, root), vec!["property", "method", "body"]);
        assert_eq!(doc.parent(method), Some(root));
        assert_eq!(doc.position_of(root, method), Some(1));
    }

    #[test]
    fn test_reattach_moves_node() {
        let mut doc = Document::new("report");
        let root = doc.root();
        let a = doc.append_element(root, "a");
        let b = doc.append_element(root, "b");
        doc.append(a, b);
        assert_eq!(names(&doc, root), vec!["a"]);
        assert_eq!(doc.parent(b), Some(a));
    }

    #[test]
    fn test_cycle_is_ignored() {
        let mut doc = Document::new("report");
        let root = doc.root();
        let a = doc.append_element(root, "a");
        let b = doc.append_element(a, "b");
        doc.append(b, a);
        doc.append(a, a);
        assert_eq!(doc.parent(a), Some(root));
        assert_eq!(doc.parent(b), Some(a));
        assert_eq!(doc.children(a), &[b]);
    }

    #[test]
    fn test_replace_named_block() {
        let mut doc = Document::new("report");
        let root = doc.root();
        doc.append_element(root, "property");
        let old = doc.append_element(root, "method");
        doc.set_attr(old, "name", "initialize");
        let other = doc.append_element(root, "method");
        doc.set_attr(other, "name", "beforeFactory");
        doc.append_element(root, "property");
        doc.append_element(root, "body");

        let new = doc.element("method");
        doc.set_attr(new, "name", "initialize");
        let removed =
            doc.replace_named_block(root, "method", "initialize", new, BlockPosition::AfterLast("property"));

        assert_eq!(removed, vec![old]);
        assert_eq!(doc.parent(old), None);
        assert_eq!(
            names(&doc, root),
            vec!["property", "method", "property", "method", "body"]
        );
        assert_eq!(doc.position_of(root, new), Some(3));
    }

    #[test]
    fn test_block_position_fallbacks() {
        let mut doc = Document::new("report");
        let root = doc.root();
        doc.append_element(root, "body");
        let params = doc.element("parameters");
        doc.insert_block(root, params, BlockPosition::Before("data-sources"));
        assert_eq!(names(&doc, root), vec!["parameters", "body"]);
        let method = doc.element("method");
        doc.insert_block(root, method, BlockPosition::AfterLast("property"));
        assert_eq!(names(&doc, root), vec!["method", "parameters", "body"]);
    }

    #[test]
    fn test_find_uses_local_names() {
        let mut doc = Document::new("ns0:report");
        let root = doc.root();
        let sets = doc.append_element(root, "ns0:data-sets");
        let set = doc.append_element(sets, "ns0:oda-data-set");
        assert_eq!(doc.find_first(root, "oda-data-set"), Some(set));
        assert_eq!(doc.find_child(root, "data-sets"), Some(sets));
        assert_eq!(doc.find_first(root, "report"), None);
    }

    #[test]
    fn test_clear_and_text() {
        let mut doc = Document::new("report");
        let root = doc.root();
        let prop = doc.append_element(root, "property");
        doc.set_text(prop, "first");
        doc.set_text(prop, "second");
        assert_eq!(doc.children(prop).len(), 1);
        assert_eq!(doc.text_content(prop), "second");
        doc.clear_children(root);
        assert!(doc.children(root).is_empty());
        assert_eq!(doc.parent(prop), None);
    }

    #[test]
    fn test_ids_skip_detached_nodes() {
        let mut doc = Document::new("report");
        let root = doc.root();
        doc.set_attr(root, "id", "1");
        let a = doc.append_element(root, "grid");
        doc.set_attr(a, "id", "7");
        let b = doc.append_element(root, "label");
        doc.set_attr(b, "id", "x");
        let c = doc.append_element(root, "cell");
        doc.set_attr(c, "id", "42");
        doc.remove(c);
        assert_eq!(doc.ids(), vec!["1", "7", "x"]);
        assert_eq!(doc.numeric_ids().max(), Some(7));
    }
}
