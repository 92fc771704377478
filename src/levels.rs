//! Hierarchy depth computation.
//!
//! Disclosure levels are hop distances from the top-level frontier: the
//! set of nodes no other node lists as a child. `max_depth` bounds how
//! far drill-down can go.
//!
//! User-drawn connections append the target to the source's child list,
//! so the hierarchy may contain diamonds and cycles. Traversal carries a
//! path set and a memo table: cyclic reachback counts as a leaf instead
//! of recursing forever, and shared subtrees are measured once.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::GraphModel;
use crate::types::NodeId;

/// Nodes that no other node lists as a child.
///
/// On an authored map this is the single root; removing a parent or
/// cross-linking can grow the frontier.
pub fn top_level_nodes(model: &GraphModel) -> BTreeSet<NodeId> {
    let mut referenced: BTreeSet<&NodeId> = BTreeSet::new();
    for children in model.hierarchy().values() {
        referenced.extend(children.iter());
    }
    model
        .nodes()
        .map(|node| node.id.clone())
        .filter(|id| !referenced.contains(id))
        .collect()
}

/// Longest child chain below the top-level frontier, in hops.
///
/// An empty map and a map of isolated nodes both have depth zero.
pub fn max_depth(model: &GraphModel) -> usize {
    let mut on_path = BTreeSet::new();
    let mut memo = BTreeMap::new();
    top_level_nodes(model)
        .iter()
        .map(|id| depth_below(model, id, &mut on_path, &mut memo))
        .max()
        .unwrap_or(0)
}

fn depth_below(
    model: &GraphModel,
    id: &NodeId,
    on_path: &mut BTreeSet<NodeId>,
    memo: &mut BTreeMap<NodeId, usize>,
) -> usize {
    if let Some(depth) = memo.get(id) {
        return *depth;
    }
    if !on_path.insert(id.clone()) {
        // Already on the current path: cycle, count as a leaf.
        return 0;
    }
    let depth = model
        .children(id)
        .iter()
        .map(|child| depth_below(model, child, on_path, memo))
        .max()
        .map_or(0, |below| below + 1);
    on_path.remove(id);
    memo.insert(id.clone(), depth);
    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: usize) -> (GraphModel, Vec<NodeId>) {
        let mut model = GraphModel::new();
        let mut ids = Vec::new();
        for i in 0..len {
            let parent = ids.last().cloned();
            let id = model
                .add_node(&format!("n{i}"), "", parent.as_ref())
                .unwrap();
            ids.push(id);
        }
        (model, ids)
    }

    #[test]
    fn test_empty_model_has_no_levels() {
        let model = GraphModel::new();

        assert!(top_level_nodes(&model).is_empty());
        assert_eq!(max_depth(&model), 0);
    }

    #[test]
    fn test_chain_depth_is_length_minus_one() {
        let (model, ids) = chain(4);

        assert_eq!(top_level_nodes(&model), [ids[0].clone()].into());
        assert_eq!(max_depth(&model), 3);
    }

    #[test]
    fn test_isolated_nodes_are_all_top_level() {
        let mut model = GraphModel::new();
        let a = model.add_node("a", "", None).unwrap();
        let b = model.add_node("b", "", None).unwrap();

        assert_eq!(top_level_nodes(&model), [a, b].into());
        assert_eq!(max_depth(&model), 0);
    }

    #[test]
    fn test_removing_parent_promotes_orphans() {
        let (mut model, ids) = chain(3);
        model.remove_node(&ids[1]).unwrap();

        let top = top_level_nodes(&model);
        assert!(top.contains(&ids[0]));
        assert!(top.contains(&ids[2]));
        assert_eq!(max_depth(&model), 0);
    }

    #[test]
    fn test_cross_link_extends_depth() {
        // root -> a, root -> b, then a -> b by connection: b sits one
        // hop deeper through a than through root.
        let mut model = GraphModel::new();
        let root = model.add_node("root", "", None).unwrap();
        let a = model.add_node("a", "", Some(&root)).unwrap();
        let b = model.add_node("b", "", Some(&root)).unwrap();
        model.connect(&a, &b).unwrap();

        assert_eq!(max_depth(&model), 2);
    }

    #[test]
    fn test_cycle_terminates_and_counts_as_leaf() {
        let mut model = GraphModel::new();
        let root = model.add_node("root", "", None).unwrap();
        let a = model.add_node("a", "", Some(&root)).unwrap();
        let b = model.add_node("b", "", Some(&a)).unwrap();
        model.connect(&b, &a).unwrap();

        // a -> b -> a loops; the revisit stops the walk.
        assert_eq!(top_level_nodes(&model), [root].into());
        assert!(max_depth(&model) <= model.node_count());
    }

    #[test]
    fn test_fully_cyclic_component_has_empty_frontier() {
        let mut model = GraphModel::new();
        let a = model.add_node("a", "", None).unwrap();
        let b = model.add_node("b", "", None).unwrap();
        model.connect(&a, &b).unwrap();
        model.connect(&b, &a).unwrap();

        // Both nodes are referenced as children, so nothing is top-level.
        assert!(top_level_nodes(&model).is_empty());
        assert_eq!(max_depth(&model), 0);
    }
}
