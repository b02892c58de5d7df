//! Parent back-references.
//!
//! The builder only records parent-to-child edges. [`augment`] walks the tree once
//! and stores the reverse edge on every reachable node so callers can climb from a
//! located node to its enclosing declaration. This is the only pass that mutates
//! an [`Arena`] after construction.

use rustc_hash::FxHashSet;

use crate::arena::Arena;

/// Assigns `parent` on every node reachable from the root. The root's parent is `None`.
///
/// Nodes are deduplicated by id, so a node referenced from several places (a shorthand
/// property's key and value, or a hand-built aliased tree) is visited once and keeps the
/// parent that reached it first in pre-order. Cycles terminate for the same reason.
pub fn augment(arena: &mut Arena) {
    let Some(root) = arena.root() else {
        return;
    };
    let mut visited = FxHashSet::default();
    augment_from(arena, root, &mut visited);
}

/// Reentrant form of [`augment`] starting at an arbitrary node.
///
/// `root`'s parent is reset to `None`. Ids already in `visited` are skipped, which lets a
/// caller augment several disjoint subtrees while sharing one identity set.
pub fn augment_from(arena: &mut Arena, root: u32, visited: &mut FxHashSet<u32>) {
    let mut stack: Vec<(u32, Option<u32>)> = vec![(root, None)];
    while let Some((id, parent)) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = arena.node_mut(id) else {
            continue;
        };
        node.parent = parent;
        let children = node.children();
        stack.extend(children.into_iter().rev().map(|child| (child, Some(id))));
    }
    log::debug!("augmented {} node(s) from {root}", visited.len());
}
