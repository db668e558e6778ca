//! JSON format output for diagram data.

use super::DiagramSink;
use crate::graph::builder::{Edge, Node};
use ahash::AHashSet;
use schemars::JsonSchema;
use serde::Serialize;

/// JSON representation of the diagram
#[derive(Debug, Default, Serialize, JsonSchema)]
pub struct DiagramJson {
    pub nodes: Vec<NodeJson>,
    pub edges: Vec<EdgeJson>,
    pub stats: DiagramStats,
}

/// JSON representation of a table node
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct NodeJson {
    pub id: String,
    /// Hover text (HTML fragment)
    pub title: String,
    /// SVG data URI
    pub image: String,
    pub width: u32,
    pub height: u32,
}

/// JSON representation of a foreign-key edge
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct EdgeJson {
    pub from: String,
    pub to: String,
    pub label: String,
    pub color: String,
}

/// Diagram statistics
#[derive(Debug, Default, Serialize, JsonSchema)]
pub struct DiagramStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges with an endpoint that is not a node
    pub dangling_edge_count: usize,
}

/// Sink collecting a [`DiagramJson`] document
#[derive(Debug, Default)]
pub struct JsonSink {
    nodes: Vec<NodeJson>,
    edges: Vec<EdgeJson>,
}

impl JsonSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected document with statistics filled in
    pub fn to_diagram(&self) -> DiagramJson {
        let ids: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let dangling = self
            .edges
            .iter()
            .filter(|e| !ids.contains(e.from.as_str()) || !ids.contains(e.to.as_str()))
            .count();

        DiagramJson {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            stats: DiagramStats {
                node_count: self.nodes.len(),
                edge_count: self.edges.len(),
                dangling_edge_count: dangling,
            },
        }
    }
}

impl DiagramSink for JsonSink {
    fn add_node(&mut self, node: &Node) {
        self.nodes.push(NodeJson {
            id: node.id.clone(),
            title: node.title.clone(),
            image: node.image.clone(),
            width: node.width,
            height: node.height,
        });
    }

    fn add_edge(&mut self, edge: &Edge) {
        self.edges.push(EdgeJson {
            from: edge.from.clone(),
            to: edge.to.clone(),
            label: edge.label.clone(),
            color: edge.color.clone(),
        });
    }

    fn render(&self) -> String {
        serde_json::to_string_pretty(&self.to_diagram()).unwrap_or_else(|_| "{}".to_string())
    }
}
