use anyhow::{Context, Result};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::connection::Connection;
use crate::palette::Palette;
use crate::pipeline::Analysis;

const VIS_NETWORK_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/vis-network.min.js";

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="document-id" content="__DOC_ID__">
<title>Entity network</title>
<script src="__VIS_JS__"></script>
<style>
  body { margin: 0; background-color: #222222; }
  #mynetwork { width: 100%; height: 750px; background-color: #222222; border: 1px solid #444444; }
</style>
</head>
<body>
<div id="mynetwork"></div>
<script>
  var graph = __GRAPH__;
  document.title = graph.title;
  var nodes = new vis.DataSet(graph.nodes);
  var edges = new vis.DataSet(graph.edges);
  var container = document.getElementById("mynetwork");
  var options = {
    nodes: { shape: "dot", size: 12, font: { color: "white" } },
    edges: { color: { inherit: true }, smooth: false },
    physics: { stabilization: { iterations: 200 } }
  };
  var network = new vis.Network(container, { nodes: nodes, edges: edges }, options);
</script>
</body>
</html>
"#;

pub struct OutputPaths {
    pub html: PathBuf,
    pub csv: PathBuf,
}

/// `<dir>/<stem>_network.html` and `<dir>/<stem>_connections.csv` next to the input
pub fn output_paths(input: &Path) -> OutputPaths {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());

    OutputPaths {
        html: input.with_file_name(format!("{}_network.html", stem)),
        csv: input.with_file_name(format!("{}_connections.csv", stem)),
    }
}

pub fn write_connections_csv(path: &Path, connections: &[Connection]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .context(format!("Failed to create CSV file: {:?}", path))?;

    if connections.is_empty() {
        writer.write_record(["Entity 1", "Entity 2", "Type 1", "Type 2", "Context"])?;
    }

    for connection in connections {
        writer
            .serialize(connection)
            .context("Failed to write connection row")?;
    }

    writer.flush().context("Failed to flush CSV file")?;

    info!(path = %path.display(), rows = connections.len(), "Wrote connections");
    Ok(())
}

/// JSON safe to place inside a <script> element
fn script_json(value: &serde_json::Value) -> Result<String> {
    let json = serde_json::to_string(value).context("Failed to serialize graph data")?;
    Ok(json.replace("</", "<\\/"))
}

pub fn render_network_html(
    analysis: &Analysis,
    palette: &Palette,
    title: &str,
    doc_id: &str,
) -> Result<String> {
    let nodes: Vec<_> = analysis
        .entities
        .iter()
        .map(|entity| {
            json!({
                "id": entity.text,
                "label": entity.text,
                "color": palette.node_color(entity),
                "title": format!(
                    "Type: {}, Certain: {}",
                    entity.label,
                    if entity.certain { "True" } else { "False" }
                ),
            })
        })
        .collect();

    let edges: Vec<_> = analysis
        .connections
        .iter()
        .map(|c| {
            json!({
                "from": c.source,
                "to": c.target,
                "title": c.context,
            })
        })
        .collect();

    let graph = script_json(&json!({
        "title": title,
        "nodes": nodes,
        "edges": edges,
    }))?;

    // Graph data goes in last so placeholders inside it stay untouched; doc ids are hex
    let html = HTML_TEMPLATE
        .replace("__DOC_ID__", doc_id)
        .replace("__VIS_JS__", VIS_NETWORK_JS)
        .replace("__GRAPH__", &graph);

    Ok(html)
}

pub fn write_network_html(
    path: &Path,
    analysis: &Analysis,
    palette: &Palette,
    title: &str,
    doc_id: &str,
) -> Result<()> {
    let html = render_network_html(analysis, palette, title, doc_id)?;
    std::fs::write(path, html).context(format!("Failed to write network file: {:?}", path))?;

    info!(
        path = %path.display(),
        nodes = analysis.entities.len(),
        edges = analysis.connections.len(),
        "Wrote network"
    );
    Ok(())
}
