//! Property tests for graph mutations.
//!
//! Random mutation sequences must never break referential integrity,
//! and removal must scrub every reference to the removed node.

use std::collections::BTreeSet;

use proptest::prelude::*;

use mindmap_kernel::{max_depth, top_level_nodes, GraphModel, ModelError, NodeId, VisibleSet};

// ─────────────────────────────────────────────────────────────────────────────
// Operation Generator
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    AddRoot,
    AddChild(usize),
    Remove(usize),
    Connect(usize, usize),
    Rename(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddRoot),
        (0usize..64).prop_map(Op::AddChild),
        (0usize..64).prop_map(Op::Remove),
        ((0usize..64), (0usize..64)).prop_map(|(a, b)| Op::Connect(a, b)),
        (0usize..64).prop_map(Op::Rename),
    ]
}

/// Pick an existing node by wrapping the index, or `None` on an empty map.
fn nth_node(model: &GraphModel, index: usize) -> Option<NodeId> {
    let ids: Vec<&NodeId> = model.nodes().map(|node| &node.id).collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].clone())
    }
}

fn apply(model: &mut GraphModel, op: &Op) {
    match op {
        Op::AddRoot => {
            model.add_node("node", "summary", None).unwrap();
        }
        Op::AddChild(i) => {
            if let Some(parent) = nth_node(model, *i) {
                model.add_node("child", "summary", Some(&parent)).unwrap();
            }
        }
        Op::Remove(i) => {
            if let Some(id) = nth_node(model, *i) {
                model.remove_node(&id).unwrap();
            }
        }
        Op::Connect(a, b) => {
            if let (Some(source), Some(target)) = (nth_node(model, *a), nth_node(model, *b)) {
                match model.connect(&source, &target) {
                    Ok(_)
                    | Err(ModelError::SelfLoop(_))
                    | Err(ModelError::DuplicateEdge(_)) => {}
                    Err(err) => panic!("unexpected connect failure: {err}"),
                }
            }
        }
        Op::Rename(i) => {
            if let Some(id) = nth_node(model, *i) {
                model.rename_node(&id, "renamed").unwrap();
            }
        }
    }
}

fn assert_invariants(model: &GraphModel) {
    for edge in model.edges() {
        assert!(
            model.contains_node(&edge.source),
            "edge {} has dangling source",
            edge.id
        );
        assert!(
            model.contains_node(&edge.target),
            "edge {} has dangling target",
            edge.id
        );
        assert_ne!(edge.source, edge.target, "edge {} is a self-loop", edge.id);
    }

    for (parent, children) in model.hierarchy() {
        assert!(model.contains_node(parent), "dangling hierarchy key");
        for child in children {
            assert!(model.contains_node(child), "dangling hierarchy child");
        }
    }

    let referenced: BTreeSet<&NodeId> = model.hierarchy().values().flatten().collect();
    for id in &top_level_nodes(model) {
        assert!(!referenced.contains(id), "top-level node is referenced");
    }

    assert!(max_depth(model) <= model.node_count());

    let snapshot = model.snapshot();
    assert!(snapshot.validate().is_ok(), "snapshot failed validation");
}

// ─────────────────────────────────────────────────────────────────────────────
// PROPERTIES
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn test_mutation_sequences_preserve_invariants(
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let mut model = GraphModel::new();
        for op in &ops {
            apply(&mut model, op);
            assert_invariants(&model);
        }
    }

    #[test]
    fn test_removal_scrubs_every_reference(
        ops in prop::collection::vec(op_strategy(), 1..30),
        pick in 0usize..64,
    ) {
        let mut model = GraphModel::new();
        model.add_node("seed", "", None).unwrap();
        for op in &ops {
            apply(&mut model, op);
        }

        if let Some(victim) = nth_node(&model, pick) {
            model.remove_node(&victim).unwrap();

            prop_assert!(!model.contains_node(&victim));
            for edge in model.edges() {
                prop_assert_ne!(&edge.source, &victim);
                prop_assert_ne!(&edge.target, &victim);
            }
            prop_assert!(!model.hierarchy().contains_key(&victim));
            for children in model.hierarchy().values() {
                prop_assert!(!children.contains(&victim));
            }
            prop_assert!(!top_level_nodes(&model).contains(&victim));
            prop_assert!(!VisibleSet::all(&model).contains_node(&victim));
            for level in 0..=model.node_count() {
                prop_assert!(!VisibleSet::up_to_level(&model, level).contains_node(&victim));
            }
        }
    }

    #[test]
    fn test_snapshot_fingerprint_tracks_content(
        ops in prop::collection::vec(op_strategy(), 1..20)
    ) {
        let mut model = GraphModel::new();
        model.add_node("seed", "", None).unwrap();
        for op in &ops {
            apply(&mut model, op);
        }

        let snapshot = model.snapshot();
        // Rebuilding from the snapshot reproduces the same fingerprint.
        let rebuilt = GraphModel::from_snapshot(snapshot.clone()).unwrap();
        prop_assert_eq!(rebuilt.snapshot().fingerprint(), snapshot.fingerprint());
    }
}
