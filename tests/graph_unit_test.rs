//! Tests for relationship graph building across constraint shapes.

use serde_json::{json, Value};
use sql_erd::config::DiagramConfig;
use sql_erd::graph::{build, emit, BuildOutcome, DiagramGraph, DiagramSink, JsonSink};
use sql_erd::render::decode_data_uri;
use sql_erd::schema::{normalize, ParsedTable, Table};

fn tables(records: Value) -> Vec<Table> {
    let parsed: Vec<ParsedTable> = serde_json::from_value(records).unwrap();
    normalize(parsed)
}

fn graph(records: Value) -> DiagramGraph {
    match build(&tables(records), &DiagramConfig::default()) {
        BuildOutcome::Built(graph) => graph,
        BuildOutcome::EmptySchema => panic!("expected a graph"),
    }
}

#[test]
fn test_mapping_reference_yields_labelled_edge() {
    let graph = graph(json!([
        {
            "table_name": "Customers",
            "columns": [{"name": "id", "type": "INT"}],
            "constraints": {}
        },
        {
            "table_name": "Orders",
            "columns": [
                {"name": "id", "type": "INT"},
                {"name": "customer_id", "type": "INT"}
            ],
            "constraints": {
                "references": [{"table": "Customers", "columns": ["customer_id"]}]
            }
        }
    ]));

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);

    let edge = &graph.edges()[0];
    assert_eq!(edge.from, "Orders");
    assert_eq!(edge.to, "Customers");
    assert_eq!(edge.label, "FK: customer_id");
    assert_eq!(edge.color, "#3388ff");
}

#[test]
fn test_flat_foreign_keys_field() {
    let graph = graph(json!([
        {"name": "users", "columns": [{"name": "id", "type": "INT"}]},
        {
            "name": "posts",
            "columns": [{"name": "author_id", "type": "INT"}],
            "foreign_keys": [{"reference_table": "users", "columns": ["author_id"]}]
        }
    ]));

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges()[0].from, "posts");
    assert_eq!(graph.edges()[0].to, "users");
    assert_eq!(graph.edges()[0].label, "FK: author_id");
}

#[test]
fn test_same_key_in_both_places_yields_two_edges() {
    let graph = graph(json!([
        {"name": "users", "columns": []},
        {
            "name": "posts",
            "columns": [{"name": "author_id", "type": "INT"}],
            "constraints": {
                "references": [{"table": "users", "columns": ["author_id"]}]
            },
            "foreign_keys": [{"reference_table": "users", "columns": ["author_id"]}]
        }
    ]));

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges()[0], graph.edges()[1]);
}

#[test]
fn test_list_constraints_contribute_no_edges() {
    let graph = graph(json!([
        {"name": "users", "columns": []},
        {
            "name": "posts",
            "columns": [],
            "constraints": [
                {"references": [{"table": "users", "columns": ["author_id"]}]}
            ]
        }
    ]));

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_list_constraints_do_not_suppress_flat_keys() {
    let graph = graph(json!([
        {"name": "users", "columns": []},
        {
            "name": "posts",
            "columns": [],
            "constraints": [],
            "foreign_keys": [{"reference_table": "users", "columns": ["author_id"]}]
        }
    ]));

    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_reference_to_unknown_table_is_kept() {
    let graph = graph(json!([
        {
            "name": "orders",
            "columns": [{"name": "missing_id", "type": "INT"}],
            "constraints": {
                "references": [{"table": "Missing", "columns": ["missing_id"]}]
            }
        }
    ]));

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges()[0].to, "Missing");
    assert!(!graph.has_node("Missing"));
    assert_eq!(graph.dangling_edges().count(), 1);
}

#[test]
fn test_reference_without_columns_has_empty_label_suffix() {
    let graph = graph(json!([
        {"name": "a", "columns": []},
        {"name": "b", "columns": [], "constraints": {"references": [{"table": "a"}]}}
    ]));

    assert_eq!(graph.edges()[0].label, "FK: ");
}

#[test]
fn test_reference_without_target_is_skipped() {
    let graph = graph(json!([
        {"name": "a", "columns": [], "constraints": {"references": [{"columns": ["x"]}]}},
        {"name": "b", "columns": [], "foreign_keys": [{"columns": ["y"]}]}
    ]));

    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_self_reference() {
    let graph = graph(json!([
        {
            "name": "categories",
            "columns": [{"name": "parent_id", "type": "INT"}],
            "foreign_keys": [{"reference_table": "categories", "columns": ["parent_id"]}]
        }
    ]));

    assert_eq!(graph.edges()[0].from, "categories");
    assert_eq!(graph.edges()[0].to, "categories");
    assert_eq!(graph.dangling_edges().count(), 0);
}

#[test]
fn test_non_string_column_values_are_stringified() {
    let graph = graph(json!([
        {"name": "t", "columns": [{"name": 42, "type": null}, {"type": "INT"}]}
    ]));

    let svg = decode_data_uri(&graph.nodes()[0].image).unwrap();
    assert!(svg.contains(">42</text>"));
    assert!(svg.contains(">INT</text>"));
    assert_eq!(graph.nodes()[0].title, "<b>t</b><br>42 ()<br> (INT)");
}

#[test]
fn test_empty_input_is_empty_schema() {
    let outcome = build(&[], &DiagramConfig::default());
    assert!(matches!(outcome, BuildOutcome::EmptySchema));
}

#[test]
fn test_node_dimensions_match_image() {
    let graph = graph(json!([
        {"name": "users", "columns": [
            {"name": "id", "type": "INT"},
            {"name": "email", "type": "VARCHAR(255)"}
        ]}
    ]));

    let node = &graph.nodes()[0];
    let svg = decode_data_uri(&node.image).unwrap();
    assert_eq!(node.label, " ");
    assert_eq!(node.height, 72);
    assert!(svg.contains(&format!("width=\"{}\" height=\"{}\"", node.width, node.height)));
}

#[test]
fn test_configured_edge_color() {
    let mut config = DiagramConfig::default();
    config.style.edge_color = "#ff8800".to_string();

    let tables = tables(json!([
        {"name": "a", "columns": []},
        {"name": "b", "columns": [], "foreign_keys": [{"reference_table": "a", "columns": ["a_id"]}]}
    ]));
    let graph = build(&tables, &config).into_graph().unwrap();

    assert_eq!(graph.edges()[0].color, "#ff8800");
}

#[test]
fn test_json_sink_receives_whole_graph() {
    let graph = graph(json!([
        {"name": "a", "columns": [{"name": "id", "type": "INT"}]},
        {"name": "b", "columns": [], "foreign_keys": [{"reference_table": "a", "columns": ["a_id"]}]},
        {"name": "c", "columns": [], "foreign_keys": [{"reference_table": "zzz", "columns": ["z"]}]}
    ]));

    let mut sink = JsonSink::new();
    emit(&graph, &mut sink);
    let value: Value = serde_json::from_str(&sink.render()).unwrap();

    assert_eq!(value["stats"]["node_count"], 3);
    assert_eq!(value["stats"]["edge_count"], 2);
    assert_eq!(value["stats"]["dangling_edge_count"], 1);
    assert_eq!(value["edges"][0]["label"], "FK: a_id");
}
