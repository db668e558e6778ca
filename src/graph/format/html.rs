//! Interactive HTML output: a vis-network force-directed graph with one
//! image node per table.

use super::DiagramSink;
use crate::config::DiagramConfig;
use crate::graph::builder::{Edge, Node};
use serde_json::{json, Value};

const VIS_NETWORK_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/vis-network.min.js";
const VIS_NETWORK_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/dist/vis-network.min.css";

/// HTML document sink.
///
/// Physics and canvas settings are copied from the config at construction and
/// passed to the browser runtime unchanged.
#[derive(Debug, Clone)]
pub struct HtmlNetwork {
    title: String,
    config: DiagramConfig,
    nodes: Vec<Value>,
    edges: Vec<Value>,
}

impl HtmlNetwork {
    pub fn new(title: impl Into<String>, config: &DiagramConfig) -> Self {
        Self {
            title: title.into(),
            config: config.clone(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// vis-network `options` object
    pub fn options(&self) -> Value {
        let physics = &self.config.physics;
        json!({
            "nodes": {
                "shapeProperties": { "useImageSize": true }
            },
            "edges": {
                "arrows": { "to": { "enabled": self.config.canvas.directed } },
                "smooth": { "type": "continuous" }
            },
            "interaction": { "hover": true },
            "physics": {
                "enabled": true,
                "solver": "barnesHut",
                "barnesHut": {
                    "gravitationalConstant": physics.gravity,
                    "centralGravity": physics.central_gravity,
                    "springLength": physics.spring_length,
                    "springConstant": physics.spring_strength,
                    "damping": physics.damping,
                    "avoidOverlap": physics.overlap
                }
            }
        })
    }
}

impl DiagramSink for HtmlNetwork {
    fn add_node(&mut self, node: &Node) {
        self.nodes.push(json!({
            "id": node.id,
            "label": node.label,
            "title": node.title,
            "shape": "image",
            "image": node.image,
            "font": { "color": self.config.canvas.font_color }
        }));
    }

    fn add_edge(&mut self, edge: &Edge) {
        let mut value = json!({
            "from": edge.from,
            "to": edge.to,
            "title": edge.label,
            "color": edge.color
        });
        if self.config.canvas.directed {
            value["arrows"] = json!("to");
        }
        self.edges.push(value);
    }

    fn render(&self) -> String {
        let canvas = &self.config.canvas;
        let stats = format!(
            "{} tables · {} relationships",
            self.nodes.len(),
            self.edges.len()
        );

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <script src="{js}"></script>
  <link rel="stylesheet" href="{css}">
  <style>
    body {{
      margin: 0;
      font-family: -apple-system, BlinkMacSystemFont, sans-serif;
      background: {background};
      color: {font_color};
    }}

    #network {{
      width: {width};
      height: {height};
      background-color: {background};
      border: 1px solid lightgray;
      position: relative;
      float: left;
    }}

    .bottom-bar {{
      clear: both;
      display: flex;
      justify-content: space-between;
      padding: 8px 16px;
      font-size: 13px;
      opacity: 0.7;
    }}
  </style>
</head>
<body>
  <div id="network"></div>
  <div class="bottom-bar">
    <span class="title">{title}</span>
    <span class="stats">{stats}</span>
  </div>

  <script>
    function htmlTitle(html) {{
      const el = document.createElement("div");
      el.innerHTML = html;
      return el;
    }}

    const nodeData = {nodes};
    const edgeData = {edges};
    nodeData.forEach(n => {{ n.title = htmlTitle(n.title); }});
    edgeData.forEach(e => {{ e.title = htmlTitle(e.title); }});

    const nodes = new vis.DataSet(nodeData);
    const edges = new vis.DataSet(edgeData);
    const container = document.getElementById("network");
    const options = {options};

    const network = new vis.Network(container, {{ nodes: nodes, edges: edges }}, options);
  </script>
</body>
</html>
"##,
            title = escape_html(&self.title),
            js = VIS_NETWORK_JS,
            css = VIS_NETWORK_CSS,
            background = escape_css(&canvas.background),
            font_color = escape_css(&canvas.font_color),
            width = escape_css(&canvas.width),
            height = escape_css(&canvas.height),
            stats = stats,
            nodes = script_json(&Value::Array(self.nodes.clone())),
            edges = script_json(&Value::Array(self.edges.clone())),
            options = script_json(&self.options()),
        )
    }
}

/// Serialize JSON for embedding inside a `<script>` element
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Drop characters that could end a CSS declaration or the style element
fn escape_css(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}
