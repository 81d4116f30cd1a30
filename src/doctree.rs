//! Arena-backed document tree.
//!
//! Every node is stored in one vector and refers to its relatives by index:
//! children are owned through `children_indices`, the parent is a plain
//! back-reference in `parent_index`. Upward searches follow those indices and
//! terminate at the root, so there is no reference cycle to manage.

use crate::node::NodeKind;

/// Index of a node within its [`DocTree`].
pub type NodeId = usize;

#[derive(Clone, Debug)]
/// One node of the tree together with its position in the hierarchy.
pub struct NodeData {
    /// What the node is and the data it carries.
    pub kind: NodeKind,
    /// Index of the containing node, `None` for the root.
    pub parent_index: Option<NodeId>,
    /// Indices of directly nested nodes in document order.
    pub children_indices: Vec<NodeId>,
}

#[derive(Clone, Debug)]
/// Document tree rooted at index 0.
pub struct DocTree {
    nodes: Vec<NodeData>,
}

impl DocTree {
    /// Index of the root node.
    pub const ROOT: NodeId = 0;

    #[must_use]
    /// Create a tree holding only a root of the given kind.
    pub fn new(root: NodeKind) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: root,
                parent_index: None,
                children_indices: Vec::new(),
            }],
        }
    }

    #[must_use]
    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// A tree always has its root, so this is never true; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a new last child under `parent` and return its index.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a node of this tree.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            kind,
            parent_index: Some(parent),
            children_indices: Vec::new(),
        });
        self.nodes[parent].children_indices.push(id);
        id
    }

    /// Move every node of `other` under `parent`, keeping its shape.
    ///
    /// Returns the new index of `other`'s root.
    pub fn graft(&mut self, parent: NodeId, other: DocTree) -> NodeId {
        let offset = self.nodes.len();
        for mut data in other.nodes {
            data.parent_index = Some(data.parent_index.map_or(parent, |p| p + offset));
            for child in &mut data.children_indices {
                *child += offset;
            }
            self.nodes.push(data);
        }
        self.nodes[parent].children_indices.push(offset);
        offset
    }

    #[must_use]
    /// Kind of node `id`.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    /// Mutable access to the kind of node `id`, used to fill in links in place.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id].kind
    }

    #[must_use]
    /// Containing node of `id`, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent_index
    }

    #[must_use]
    /// Direct children of `id` in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children_indices
    }

    #[must_use]
    /// Pre-order walk over the nodes below `id`, not including `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    #[must_use]
    /// All nodes matching `pred`, in document order.
    pub fn find_all<'a, P>(&'a self, pred: P) -> impl Iterator<Item = NodeId> + 'a
    where
        P: Fn(&NodeKind) -> bool + 'a,
    {
        std::iter::once(Self::ROOT)
            .chain(self.descendants(Self::ROOT))
            .filter(move |&id| pred(self.kind(id)))
    }

    #[must_use]
    /// First node below `id` in pre-order that matches `pred`.
    pub fn first_descendant<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&NodeKind) -> bool,
    {
        self.descendants(id).find(|&d| pred(self.kind(d)))
    }

    #[must_use]
    /// First direct child of `id` that matches `pred`.
    pub fn first_child<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&NodeKind) -> bool,
    {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| pred(self.kind(c)))
    }

    #[must_use]
    /// Whether `ancestor` lies on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    #[must_use]
    /// Closest strict ancestor of `id` that matches `pred`.
    pub fn nearest_ancestor<P>(&self, id: NodeId, pred: P) -> Option<NodeId>
    where
        P: Fn(&NodeKind) -> bool,
    {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if pred(self.kind(ancestor)) {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    #[must_use]
    /// Plain text of the subtree rooted at `id`.
    ///
    /// Block containers join their children with a blank line, everything else
    /// concatenates. Targets contribute nothing.
    pub fn astext(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Text(text) | NodeKind::Literal(text) | NodeKind::LiteralBlock(text) => {
                text.clone()
            }
            NodeKind::Link(link) => link.text().to_string(),
            NodeKind::Target { .. } => String::new(),
            kind => {
                let parts = self.children(id).iter().map(|&c| self.astext(c));
                if kind.is_block_container() {
                    parts.collect::<Vec<_>>().join("\n\n")
                } else {
                    parts.collect()
                }
            }
        }
    }
}

/// Iterator returned by [`DocTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a DocTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
#[path = "tests/doctree.rs"]
mod tests;
