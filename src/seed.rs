//! Built-in default dataset.
//!
//! Loaded whenever the store is empty or holds an unusable payload, so
//! the editor always opens onto a real map. The map is a three-level
//! overview of a web application architecture.

use std::collections::BTreeMap;

use crate::types::{
    Edge, MapMetadata, MapSnapshot, NodeData, NodeEntry, NodeId, NodeKind,
};

fn entry(id: &str, label: &str, kind: NodeKind, summary: &str) -> NodeEntry {
    NodeEntry {
        id: NodeId::new(id),
        data: NodeData {
            label: label.to_string(),
            kind,
            summary: summary.to_string(),
        },
    }
}

/// The default mind map.
pub fn default_snapshot() -> MapSnapshot {
    let nodes = vec![
        entry(
            "root",
            "System Overview",
            NodeKind::Root,
            "Top-level view of the application architecture.",
        ),
        entry(
            "cat_frontend",
            "Frontend",
            NodeKind::Category,
            "Everything the user sees and interacts with.",
        ),
        entry(
            "cat_backend",
            "Backend",
            NodeKind::Category,
            "Services that handle requests and business logic.",
        ),
        entry(
            "cat_data",
            "Data Layer",
            NodeKind::Category,
            "Where application state is stored and cached.",
        ),
        entry(
            "sub_ui",
            "UI Components",
            NodeKind::Component,
            "Reusable building blocks of the interface.",
        ),
        entry(
            "sub_state",
            "State Management",
            NodeKind::Component,
            "Client-side state kept consistent across views.",
        ),
        entry(
            "sub_api",
            "API Service",
            NodeKind::Component,
            "HTTP endpoints exposed to clients.",
        ),
        entry(
            "sub_workers",
            "Background Workers",
            NodeKind::Component,
            "Jobs that run outside the request path.",
        ),
        entry(
            "sub_primary_db",
            "Primary Database",
            NodeKind::Component,
            "Durable source of truth for application data.",
        ),
        entry(
            "sub_cache",
            "Cache",
            NodeKind::Component,
            "Hot data kept close for fast reads.",
        ),
    ];

    let links = [
        ("root", "cat_frontend"),
        ("root", "cat_backend"),
        ("root", "cat_data"),
        ("cat_frontend", "sub_ui"),
        ("cat_frontend", "sub_state"),
        ("cat_backend", "sub_api"),
        ("cat_backend", "sub_workers"),
        ("cat_data", "sub_primary_db"),
        ("cat_data", "sub_cache"),
    ];

    let edges = links
        .iter()
        .map(|(source, target)| Edge::connects(NodeId::new(*source), NodeId::new(*target)))
        .collect();

    let mut hierarchy: BTreeMap<NodeId, Vec<NodeId>> = nodes
        .iter()
        .map(|entry| (entry.id.clone(), Vec::new()))
        .collect();
    for (source, target) in links {
        hierarchy
            .entry(NodeId::new(source))
            .or_default()
            .push(NodeId::new(target));
    }

    MapSnapshot {
        metadata: Some(MapMetadata {
            topic: "layered overview of a web application architecture".to_string(),
            content_type: "mindmap".to_string(),
            node_count: nodes.len() as u64,
        }),
        nodes,
        edges,
        hierarchy,
    }
}
