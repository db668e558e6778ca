//! Relationship graph construction: one image node per table, one edge per
//! foreign-key reference.

use super::reference::collect_references;
use crate::config::DiagramConfig;
use crate::render;
use crate::schema::Table;
use ahash::AHashSet;

/// Node label; the image already shows the table name
const BLANK_LABEL: &str = " ";

/// A table node in the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Table name, unique within a graph
    pub id: String,
    pub label: String,
    /// Hover text: bold table name followed by `name (type)` lines
    pub title: String,
    /// Inline SVG data URI
    pub image: String,
    pub width: u32,
    pub height: u32,
}

/// A directed foreign-key edge from the referencing to the referenced table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// `FK: <source column>`
    pub label: String,
    pub color: String,
}

/// Nodes and edges of a schema diagram, in insertion order
#[derive(Debug, Clone, Default)]
pub struct DiagramGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_ids: AHashSet<String>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; a node with an id already present is ignored
    pub fn add_node(&mut self, node: Node) -> bool {
        if !self.node_ids.insert(node.id.clone()) {
            tracing::debug!(table = %node.id, "duplicate table name, keeping first node");
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Append an edge. Endpoints are not required to exist as nodes.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges whose endpoint has no node
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|e| !self.has_node(&e.from) || !self.has_node(&e.to))
    }
}

/// Result of building a diagram
#[derive(Debug)]
pub enum BuildOutcome {
    /// No tables were supplied; nothing should be materialized
    EmptySchema,
    Built(DiagramGraph),
}

impl BuildOutcome {
    pub fn into_graph(self) -> Option<DiagramGraph> {
        match self {
            BuildOutcome::EmptySchema => None,
            BuildOutcome::Built(graph) => Some(graph),
        }
    }
}

/// Build the diagram graph for a schema.
///
/// All nodes are added before any edge. References to tables that are not in
/// the schema still produce edges.
pub fn build(tables: &[Table], config: &DiagramConfig) -> BuildOutcome {
    if tables.is_empty() {
        return BuildOutcome::EmptySchema;
    }

    let mut graph = DiagramGraph::new();

    for table in tables {
        let image = render::render(&table.name, &table.columns, &config.style);
        graph.add_node(Node {
            id: table.name.clone(),
            label: BLANK_LABEL.to_string(),
            title: hover_text(table),
            width: image.width(),
            height: image.height(),
            image: image.data_uri,
        });
    }

    for table in tables {
        for reference in collect_references(table) {
            graph.add_edge(Edge {
                label: reference.label(),
                from: reference.source_table,
                to: reference.target_table,
                color: config.style.edge_color.clone(),
            });
        }
    }

    for edge in graph.dangling_edges() {
        tracing::debug!(from = %edge.from, to = %edge.to, "edge references unknown table");
    }

    BuildOutcome::Built(graph)
}

/// Hover summary: `<b>table</b><br>col (type)<br>...`
pub fn hover_text(table: &Table) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| format!("{} ({})", escape_html(&c.name), escape_html(&c.col_type)))
        .collect::<Vec<_>>()
        .join("<br>");

    format!("<b>{}</b><br>{}", escape_html(&table.name), columns)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
