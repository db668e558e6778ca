//! ERD (Entity-Relationship Diagram) graph construction.
//!
//! This module provides:
//! - Foreign-key reference extraction from every constraint shape
//! - The node/edge graph handed to the force-directed renderer
//! - Table include/exclude filtering with glob patterns
//! - Output sinks: interactive HTML network and JSON

pub mod builder;
pub mod format;
pub mod reference;
pub mod view;

pub use builder::{build, hover_text, BuildOutcome, DiagramGraph, Edge, Node};
pub use format::{emit, DiagramSink, HtmlNetwork, JsonSink, OutputFormat};
pub use reference::{collect_references, ForeignKeyReference, ReferenceOrigin};
pub use view::TableFilter;
