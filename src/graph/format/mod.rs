//! Rendering sinks for the diagram graph.
//!
//! A sink receives every node, then every edge, and is materialized exactly
//! once at the end of a run.

mod html;
pub(crate) mod json;

pub use html::HtmlNetwork;
pub use json::JsonSink;
#[allow(unused_imports)]
pub use json::{DiagramJson, DiagramStats, EdgeJson, NodeJson};

use crate::error::DiagramError;
use crate::graph::builder::{DiagramGraph, Edge, Node};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Receiver of a finished diagram
pub trait DiagramSink {
    fn add_node(&mut self, node: &Node);

    fn add_edge(&mut self, edge: &Edge);

    /// The complete artifact text
    fn render(&self) -> String;

    /// Write the artifact to `path`
    fn save(&self, path: &Path) -> Result<(), DiagramError> {
        fs::write(path, self.render()).map_err(|e| DiagramError::write(path, e))
    }
}

/// Feed a graph into a sink: all nodes first, then all edges
pub fn emit<S: DiagramSink + ?Sized>(graph: &DiagramGraph, sink: &mut S) {
    for node in graph.nodes() {
        sink.add_node(node);
    }
    for edge in graph.edges() {
        sink.add_edge(edge);
    }
}

/// Output format for ERD export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Interactive force-directed HTML document
    #[default]
    Html,
    /// JSON nodes and edges for programmatic use
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Valid options: html, json", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "html" | "htm" => Some(OutputFormat::Html),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DiagramSink for Recorder {
        fn add_node(&mut self, node: &Node) {
            self.calls.push(format!("node:{}", node.id));
        }

        fn add_edge(&mut self, edge: &Edge) {
            self.calls.push(format!("edge:{}->{}", edge.from, edge.to));
        }

        fn render(&self) -> String {
            self.calls.join("\n")
        }
    }

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            label: " ".to_string(),
            title: String::new(),
            image: String::new(),
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn test_emit_nodes_before_edges() {
        let mut graph = DiagramGraph::new();
        graph.add_node(node("a"));
        graph.add_edge(Edge {
            from: "a".to_string(),
            to: "b".to_string(),
            label: "FK: b_id".to_string(),
            color: "#3388ff".to_string(),
        });
        graph.add_node(node("b"));

        let mut sink = Recorder::default();
        emit(&graph, &mut sink);
        assert_eq!(sink.calls, vec!["node:a", "node:b", "edge:a->b"]);
    }

    #[test]
    fn test_save_failure_is_write_error() {
        let sink = Recorder::default();
        let err = sink
            .save(Path::new("/nonexistent-dir/for-sure/out.html"))
            .unwrap_err();
        assert!(matches!(err, DiagramError::Write { .. }));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("dot".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::from_extension("htm"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::from_extension("svg"), None);
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
