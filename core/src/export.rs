//! # Diagram Export
//!
//! Replays finished layer graphs into a [`DiagramSink`].
//!
//! This is the only code that touches the diagram document. It performs no
//! deduplication of its own and relies on [`LayerGraph`]'s invariants.

use std::path::Path;

use tracing::debug;
use topomap_common::notice;
use topomap_common::ports::diagram::{DiagramError, DiagramSink, LayoutAlgorithm};
use topomap_common::topology::layer::Layer;

use crate::graph::LayerGraph;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Names of the pages written, in order.
    pub pages: Vec<String>,
    pub written: bool,
}

/// Opens `page` and replays every node, then every link, in insertion order.
///
/// An empty graph produces no page. Returns whether a page was written.
pub fn export_layer(
    graph: &LayerGraph,
    page: &str,
    sink: &mut dyn DiagramSink,
) -> Result<bool, DiagramError> {
    if graph.is_empty() {
        return Ok(false);
    }

    sink.new_page(page)?;
    for node in graph.nodes() {
        sink.add_node(node)?;
    }
    for link in graph.links() {
        sink.add_link(&link.from, &link.to, &link.label)?;
    }

    debug!(page, nodes = graph.node_count(), links = graph.link_count(), "Exported page");
    Ok(true)
}

/// Exports every completed layer in OSPF, BGP, L3 order, then lays out and
/// writes the document once.
///
/// Nothing is written when no layer produced a page.
pub fn export_all<'g>(
    layers: impl IntoIterator<Item = (Layer, &'g LayerGraph)>,
    sink: &mut dyn DiagramSink,
    layout: LayoutAlgorithm,
    path: &Path,
) -> Result<ExportSummary, DiagramError> {
    let mut layers: Vec<(Layer, &LayerGraph)> = layers.into_iter().collect();
    layers.sort_by_key(|(layer, _)| *layer);

    let mut summary = ExportSummary::default();
    for (layer, graph) in layers {
        if export_layer(graph, layer.page_name(), sink)? {
            summary.pages.push(layer.page_name().to_owned());
        }
    }

    if summary.pages.is_empty() {
        notice!("No layer produced a diagram page, skipping {}", path.display());
        return Ok(summary);
    }

    sink.layout(layout)?;
    sink.write(path)?;
    summary.written = true;
    Ok(summary)
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
    use std::path::PathBuf;
    use topomap_common::topology::node::NodeId;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Page(String),
        Node(String),
        Link(String, String, String),
        Layout(LayoutAlgorithm),
        Write(PathBuf),
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Call>,
    }

    impl DiagramSink for RecordingSink {
        fn new_page(&mut self, name: &str) -> Result<(), DiagramError> {
            self.calls.push(Call::Page(name.into()));
            Ok(())
        }

        fn add_node(&mut self, id: &NodeId) -> Result<(), DiagramError> {
            self.calls.push(Call::Node(id.to_string()));
            Ok(())
        }

        fn add_link(&mut self, from: &NodeId, to: &NodeId, label: &str) -> Result<(), DiagramError> {
            self.calls
                .push(Call::Link(from.to_string(), to.to_string(), label.into()));
            Ok(())
        }

        fn layout(&mut self, algorithm: LayoutAlgorithm) -> Result<(), DiagramError> {
            self.calls.push(Call::Layout(algorithm));
            Ok(())
        }

        fn write(&mut self, path: &Path) -> Result<(), DiagramError> {
            self.calls.push(Call::Write(path.to_path_buf()));
            Ok(())
        }
    }

    fn graph(links: &[(&str, &str)]) -> LayerGraph {
        let mut graph = LayerGraph::new();
        for (a, b) in links {
            let (a, b) = (NodeId::from(*a), NodeId::from(*b));
            graph.add_node(&a).unwrap();
            graph.add_node(&b).unwrap();
            graph.add_link(&a, &b, format!("{a}-{b}")).unwrap();
        }
        graph
    }

    #[test]
    fn replays_nodes_before_links() {
        let mut sink = RecordingSink::default();
        let g = graph(&[("R1", "R2")]);

        assert!(export_layer(&g, "OSPF", &mut sink).unwrap());
        assert_eq!(
            sink.calls,
            vec![
                Call::Page("OSPF".into()),
                Call::Node("R1".into()),
                Call::Node("R2".into()),
                Call::Link("R1".into(), "R2".into(), "R1-R2".into()),
            ]
        );
    }

    #[test]
    fn empty_layers_get_no_page() {
        let mut sink = RecordingSink::default();
        let ospf = graph(&[("R1", "R2")]);
        let l3 = LayerGraph::new();

        let summary = export_all(
            [(Layer::L3, &l3), (Layer::Ospf, &ospf)],
            &mut sink,
            LayoutAlgorithm::Grid,
            Path::new("out.drawio"),
        )
        .unwrap();

        assert_eq!(summary.pages, vec!["OSPF".to_owned()]);
        assert!(summary.written);
        assert!(!sink.calls.contains(&Call::Page("L3".into())));
        assert_eq!(
            &sink.calls[sink.calls.len() - 2..],
            &[
                Call::Layout(LayoutAlgorithm::Grid),
                Call::Write(PathBuf::from("out.drawio"))
            ]
        );
    }

    #[test]
    fn pages_follow_layer_order() {
        let mut sink = RecordingSink::default();
        let (ospf, bgp, l3) = (graph(&[("a", "b")]), graph(&[("c", "d")]), graph(&[("e", "f")]));

        let summary = export_all(
            [(Layer::L3, &l3), (Layer::Bgp, &bgp), (Layer::Ospf, &ospf)],
            &mut sink,
            LayoutAlgorithm::Circle,
            Path::new("map.drawio"),
        )
        .unwrap();

        assert_eq!(summary.pages, vec!["OSPF", "BGP", "L3"]);
    }

    #[test]
    fn nothing_is_written_without_pages() {
        let mut sink = RecordingSink::default();
        let empty = LayerGraph::new();

        let summary = export_all(
            [(Layer::Ospf, &empty)],
            &mut sink,
            LayoutAlgorithm::Circle,
            Path::new("map.drawio"),
        )
        .unwrap();

        assert!(!summary.written);
        assert!(sink.calls.is_empty());
    }
}
