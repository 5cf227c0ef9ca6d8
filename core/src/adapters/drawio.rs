//! # draw.io Diagram Sink
//!
//! Builds an `mxfile` document that diagrams.net opens and edits directly.
//! Every page becomes one `<diagram>` element; nodes are vertices labelled
//! with their id and links are undirected edges carrying their label.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use tracing::debug;
use topomap_common::ports::diagram::{DiagramError, DiagramSink, LayoutAlgorithm};
use topomap_common::topology::node::NodeId;

const VERTEX_WIDTH: f64 = 120.0;
const VERTEX_HEIGHT: f64 = 60.0;
const MARGIN: f64 = 40.0;
const GRID_GAP: f64 = 80.0;
const MIN_RADIUS: f64 = 150.0;

const VERTEX_STYLE: &str = "rounded=1;whiteSpace=wrap;";
const EDGE_STYLE: &str = "endArrow=none;startArrow=none;";

#[derive(Debug, Clone)]
struct Vertex {
    cell_id: String,
    label: NodeId,
    x: f64,
    y: f64,
}

#[derive(Debug, Clone)]
struct Edge {
    cell_id: String,
    source: String,
    target: String,
    label: String,
}

#[derive(Debug, Clone)]
struct Page {
    name: String,
    vertices: Vec<Vertex>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
}

impl Page {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            vertices: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    fn cell_of(&self, id: &NodeId) -> Result<String, DiagramError> {
        self.index
            .get(id)
            .map(|&idx| self.vertices[idx].cell_id.clone())
            .ok_or_else(|| DiagramError::UnknownNode {
                page: self.name.clone(),
                id: id.to_string(),
            })
    }

    fn place(&mut self, algorithm: LayoutAlgorithm) {
        let count: usize = self.vertices.len();
        for (idx, vertex) in self.vertices.iter_mut().enumerate() {
            let (x, y) = match algorithm {
                LayoutAlgorithm::Circle => circle_position(idx, count),
                LayoutAlgorithm::Grid => grid_position(idx, count),
            };
            vertex.x = x;
            vertex.y = y;
        }
    }
}

fn circle_position(idx: usize, count: usize) -> (f64, f64) {
    if count == 1 {
        return (MARGIN, MARGIN);
    }
    let circumference: f64 = count as f64 * (VERTEX_WIDTH + MARGIN);
    let radius: f64 = (circumference / (2.0 * PI)).max(MIN_RADIUS);
    let angle: f64 = idx as f64 * 2.0 * PI / count as f64 - PI / 2.0;
    // Vertex origins are top-left corners; the ring is centred on vertex centres.
    let centre_x: f64 = MARGIN + radius + VERTEX_WIDTH / 2.0;
    let centre_y: f64 = MARGIN + radius + VERTEX_HEIGHT / 2.0;
    (
        centre_x + radius * angle.cos() - VERTEX_WIDTH / 2.0,
        centre_y + radius * angle.sin() - VERTEX_HEIGHT / 2.0,
    )
}

fn grid_position(idx: usize, count: usize) -> (f64, f64) {
    let columns: usize = (count as f64).sqrt().ceil().max(1.0) as usize;
    let (row, column) = (idx / columns, idx % columns);
    (
        MARGIN + column as f64 * (VERTEX_WIDTH + GRID_GAP),
        MARGIN + row as f64 * (VERTEX_HEIGHT + GRID_GAP),
    )
}

/// An in-memory draw.io document.
#[derive(Debug, Clone, Default)]
pub struct DrawioDiagram {
    pages: Vec<Page>,
}

impl DrawioDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_names(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.name.as_str()).collect()
    }

    fn current_page(&mut self) -> Result<&mut Page, DiagramError> {
        self.pages.last_mut().ok_or(DiagramError::NoPage)
    }

    /// Serializes the document to draw.io XML.
    pub fn render(&self) -> String {
        let mut xml = String::new();
        // fmt::Write into a String is infallible.
        let _ = self.write_xml(&mut xml);
        xml
    }

    fn write_xml(&self, out: &mut String) -> fmt::Result {
        writeln!(out, r#"<mxfile host="topomap" type="device">"#)?;
        for (page_idx, page) in self.pages.iter().enumerate() {
            writeln!(
                out,
                r#"  <diagram id="page-{page_idx}" name="{}">"#,
                escape_xml(&page.name)
            )?;
            writeln!(
                out,
                r#"    <mxGraphModel grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" math="0" shadow="0">"#
            )?;
            writeln!(out, "      <root>")?;
            writeln!(out, r#"        <mxCell id="0"/>"#)?;
            writeln!(out, r#"        <mxCell id="1" parent="0"/>"#)?;

            for vertex in &page.vertices {
                writeln!(
                    out,
                    r#"        <mxCell id="{}" value="{}" style="{VERTEX_STYLE}" vertex="1" parent="1">"#,
                    vertex.cell_id,
                    escape_xml(vertex.label.as_str())
                )?;
                writeln!(
                    out,
                    r#"          <mxGeometry x="{:.0}" y="{:.0}" width="{VERTEX_WIDTH:.0}" height="{VERTEX_HEIGHT:.0}" as="geometry"/>"#,
                    vertex.x, vertex.y
                )?;
                writeln!(out, "        </mxCell>")?;
            }

            for edge in &page.edges {
                writeln!(
                    out,
                    r#"        <mxCell id="{}" value="{}" style="{EDGE_STYLE}" edge="1" parent="1" source="{}" target="{}">"#,
                    edge.cell_id,
                    escape_xml(&edge.label),
                    edge.source,
                    edge.target
                )?;
                writeln!(out, r#"          <mxGeometry relative="1" as="geometry"/>"#)?;
                writeln!(out, "        </mxCell>")?;
            }

            writeln!(out, "      </root>")?;
            writeln!(out, "    </mxGraphModel>")?;
            writeln!(out, "  </diagram>")?;
        }
        writeln!(out, "</mxfile>")
    }
}

impl DiagramSink for DrawioDiagram {
    fn new_page(&mut self, name: &str) -> Result<(), DiagramError> {
        self.pages.push(Page::new(name));
        Ok(())
    }

    fn add_node(&mut self, id: &NodeId) -> Result<(), DiagramError> {
        let page_idx: usize = self.pages.len().saturating_sub(1);
        let page: &mut Page = self.current_page()?;
        if page.index.contains_key(id) {
            return Ok(());
        }

        let idx: usize = page.vertices.len();
        page.vertices.push(Vertex {
            cell_id: format!("p{page_idx}-n{idx}"),
            label: id.clone(),
            x: 0.0,
            y: 0.0,
        });
        page.index.insert(id.clone(), idx);
        Ok(())
    }

    fn add_link(&mut self, from: &NodeId, to: &NodeId, label: &str) -> Result<(), DiagramError> {
        let page_idx: usize = self.pages.len().saturating_sub(1);
        let page: &mut Page = self.current_page()?;
        let source: String = page.cell_of(from)?;
        let target: String = page.cell_of(to)?;

        let idx: usize = page.edges.len();
        page.edges.push(Edge {
            cell_id: format!("p{page_idx}-e{idx}"),
            source,
            target,
            label: label.to_owned(),
        });
        Ok(())
    }

    fn layout(&mut self, algorithm: LayoutAlgorithm) -> Result<(), DiagramError> {
        for page in &mut self.pages {
            page.place(algorithm);
        }
        debug!(%algorithm, pages = self.pages.len(), "Laid out diagram");
        Ok(())
    }

    fn write(&mut self, path: &Path) -> Result<(), DiagramError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#xa;"),
            '\r' => escaped.push_str("&#xd;"),
            c => escaped.push(c),
        }
    }
    escaped
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn nodes_need_an_open_page() {
        let mut diagram = DrawioDiagram::new();
        assert!(matches!(diagram.add_node(&id("R1")), Err(DiagramError::NoPage)));
    }

    #[test]
    fn links_need_known_nodes() {
        let mut diagram = DrawioDiagram::new();
        diagram.new_page("OSPF").unwrap();
        diagram.add_node(&id("R1")).unwrap();

        let err = diagram.add_link(&id("R1"), &id("R9"), "x").unwrap_err();
        assert!(matches!(err, DiagramError::UnknownNode { ref id, .. } if id == "R9"));
    }

    #[test]
    fn renders_pages_vertices_and_edges() {
        let mut diagram = DrawioDiagram::new();
        diagram.new_page("OSPF").unwrap();
        diagram.add_node(&id("R1")).unwrap();
        diagram.add_node(&id("R2")).unwrap();
        diagram.add_link(&id("R1"), &id("R2"), "R1 == FULL == R2").unwrap();
        diagram.new_page("BGP").unwrap();
        diagram.add_node(&id("edge\n(65001)")).unwrap();

        let xml = diagram.render();

        assert_eq!(diagram.page_names(), vec!["OSPF", "BGP"]);
        assert!(xml.starts_with("<mxfile"));
        assert!(xml.contains(r#"<diagram id="page-0" name="OSPF">"#));
        assert!(xml.contains(r#"<diagram id="page-1" name="BGP">"#));
        assert!(xml.contains(r#"id="p0-e0" value="R1 == FULL == R2""#));
        assert!(xml.contains(r#"source="p0-n0" target="p0-n1""#));
        assert!(xml.contains(r#"value="edge&#xa;(65001)""#));
        assert_eq!(xml.matches(r#"vertex="1""#).count(), 3);
        assert_eq!(xml.matches(r#"edge="1""#).count(), 1);
    }

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn grid_layout_fills_rows() {
        assert_eq!(grid_position(0, 4), (MARGIN, MARGIN));
        assert_eq!(grid_position(1, 4), (MARGIN + VERTEX_WIDTH + GRID_GAP, MARGIN));
        assert_eq!(grid_position(2, 4), (MARGIN, MARGIN + VERTEX_HEIGHT + GRID_GAP));
    }

    #[test]
    fn circle_layout_spreads_vertices() {
        let mut diagram = DrawioDiagram::new();
        diagram.new_page("L3").unwrap();
        for name in ["a", "b", "c", "d"] {
            diagram.add_node(&id(name)).unwrap();
        }

        diagram.layout(LayoutAlgorithm::Circle).unwrap();

        let positions: Vec<(i64, i64)> = diagram.pages[0]
            .vertices
            .iter()
            .map(|v| (v.x.round() as i64, v.y.round() as i64))
            .collect();
        let mut unique = positions.clone();
        unique.dedup();
        assert_eq!(unique.len(), 4);
        assert!(positions.iter().all(|&(x, y)| x >= 0 && y >= 0));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("map.drawio");
        let mut diagram = DrawioDiagram::new();
        diagram.new_page("OSPF").unwrap();
        diagram.add_node(&id("R1")).unwrap();

        diagram.write(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#"value="R1""#));
    }
}
