use crate::nodes::{Location, NodeKind, SyntaxNode};
use rustc_hash::{FxHashMap, FxHashSet};

/// Flat node table. Nodes refer to each other by id; the id is the node's identity.
#[derive(Default, Clone, Debug)]
pub struct Arena {
    pub(crate) nodes: FxHashMap<u32, SyntaxNode>,
    root: Option<u32>,
    next_id: u32,
}

impl Arena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node with a fresh id and stores it. Ids start at 1; 0 is never handed out.
    pub fn alloc(&mut self, location: Location, kind: NodeKind) -> u32 {
        let id = self.fresh_id();
        self.add_node(SyntaxNode::new(id, location, kind));
        id
    }

    /// Adds a node to the arena.
    ///
    /// # Panics
    ///
    /// Panics if `node.id` is zero or if a node with the same ID already exists in the arena.
    pub fn add_node(&mut self, node: SyntaxNode) {
        assert!(node.id != 0, "Node ID must be non-zero");
        assert!(
            !self.nodes.contains_key(&node.id),
            "Node with ID {} already exists in the arena",
            node.id
        );
        self.next_id = self.next_id.max(node.id);
        self.nodes.insert(node.id, node);
    }

    pub fn set_root(&mut self, id: u32) {
        self.root = Some(id);
    }

    #[must_use]
    pub fn root(&self) -> Option<u32> {
        self.root
    }

    #[must_use]
    pub fn find_node(&self, id: u32) -> Option<&SyntaxNode> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn find_parent_node(&self, id: u32) -> Option<u32> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Replaces the payload of an existing node, keeping its id, location and parent.
    /// Returns `false` if no such node exists.
    pub fn replace_kind(&mut self, id: u32, kind: NodeKind) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Ancestors of `id` from the closest outwards, following parent links.
    /// Stops at the first repeated id, so corrupted links cannot loop.
    #[must_use]
    pub fn ancestors(&self, id: u32) -> Vec<u32> {
        let mut result = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(id);
        let mut current = self.find_parent_node(id);
        while let Some(parent) = current {
            if !seen.insert(parent) {
                break;
            }
            result.push(parent);
            current = self.find_parent_node(parent);
        }
        result
    }

    /// Statements directly under the `Program` root, in source order.
    #[must_use]
    pub fn top_level_statements(&self) -> Vec<u32> {
        match self.root.and_then(|root| self.find_node(root)) {
            Some(SyntaxNode {
                kind: NodeKind::Program { body },
                ..
            }) => body.clone(),
            _ => vec![],
        }
    }

    pub fn filter_nodes<T: Fn(&SyntaxNode) -> bool>(&self, fn_predicate: T) -> Vec<&SyntaxNode> {
        let mut nodes: Vec<&SyntaxNode> = self
            .nodes
            .values()
            .filter(|node| fn_predicate(node))
            .collect();
        nodes.sort_by_key(|node| node.id);
        nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node_mut(&mut self, id: u32) -> Option<&mut SyntaxNode> {
        self.nodes.get_mut(&id)
    }

    fn fresh_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}
