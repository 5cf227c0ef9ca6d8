#![cfg(test)]
use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use topomap_common::config::Config;
use topomap_common::ports::diagram::LayoutAlgorithm;
use topomap_common::ports::report::ReportFormat;
use topomap_common::topology::layer::Layer;
use topomap_common::topology::node::NodeId;
use topomap_core::adapters::drawio::DrawioDiagram;
use topomap_core::adapters::snapshot::JsonSnapshotSource;
use topomap_core::adapters::workbook::JsonWorkbookSink;
use topomap_core::adapters::xlsx::XlsxWorkbookSink;
use topomap_core::builder::LayerState;
use topomap_core::mapping::MappingService;
use topomap_core::report::ReportService;

const HOME_NETWORK: &str = include_str!("../../fixtures/home_network.json");

fn home_network() -> JsonSnapshotSource {
    let value: Value = serde_json::from_str(HOME_NETWORK).expect("fixture is valid JSON");
    JsonSnapshotSource::from_value(value).expect("fixture is an object of tables")
}

fn config_in(dir: &Path) -> Config {
    let mut cfg = Config::new("Home_network");
    cfg.output_dir = dir.join("Home_network_Reports");
    cfg
}

/// OSPF sessions seen from both routers collapse into one link carrying the
/// label of the first observation.
#[test]
fn ospf_sessions_are_deduplicated_with_first_label() {
    let facts = home_network();

    let outcomes = MappingService::new(&facts).build_layers();

    let ospf = outcomes[0].graph.as_ref().expect("OSPF layer builds");
    let nodes: Vec<&str> = ospf.nodes().iter().map(NodeId::as_str).collect();
    assert_eq!(nodes, vec!["R1", "R2", "R3"]);
    assert_eq!(ospf.link_count(), 2);
    assert_eq!(
        ospf.links()[0].label,
        "R1(10.0.0.1)(AreaID=0) == ESTABLISHED == R2(10.0.0.2)(AreaID=0)"
    );
    assert_eq!(outcomes[0].stats.duplicate_links, 1);
}

#[test]
fn bgp_reverse_session_is_one_link_between_as_qualified_speakers() {
    let facts = home_network();

    let outcomes = MappingService::new(&facts).build_layers();

    let bgp = outcomes[1].graph.as_ref().expect("BGP layer builds");
    let nodes: Vec<&str> = bgp.nodes().iter().map(NodeId::as_str).collect();
    assert_eq!(nodes, vec!["A\n(65001)", "B\n(65002)"]);
    assert_eq!(bgp.link_count(), 1);
    assert_eq!(
        bgp.links()[0].label,
        "A\n(65001)(192.0.2.1) == ESTABLISHED == B\n(65002)(192.0.2.2)"
    );
}

#[test]
fn empty_l3_layer_produces_no_page() {
    let facts = home_network();
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let mut diagram = DrawioDiagram::new();

    let summary = MappingService::new(&facts)
        .run(&mut diagram, LayoutAlgorithm::Circle, &cfg.diagram_path())
        .unwrap();

    assert_eq!(summary.pages, vec!["OSPF".to_owned(), "BGP".to_owned()]);
    assert_eq!(diagram.page_names(), vec!["OSPF", "BGP"]);
    assert_eq!(summary.layers[2].state, LayerState::Complete);
    assert!(summary.failed_layers().is_empty());
}

#[test]
fn drawio_file_holds_expected_pages_vertices_and_edges() {
    let facts = home_network();
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let mut diagram = DrawioDiagram::new();

    let summary = MappingService::new(&facts)
        .run(&mut diagram, LayoutAlgorithm::Grid, &cfg.diagram_path())
        .unwrap();

    let path = summary.diagram.expect("diagram is written");
    assert_eq!(path, dir.path().join("Home_network_Reports/Home_network_network_map.drawio"));

    let xml = fs::read_to_string(&path).unwrap();
    assert!(xml.starts_with("<mxfile"));
    assert_eq!(xml.matches("<diagram ").count(), 2);
    assert_eq!(xml.matches(r#"vertex="1""#).count(), 5);
    assert_eq!(xml.matches(r#"edge="1""#).count(), 3);
    assert!(xml.contains(r#"value="A&#xa;(65001)""#));
    assert!(!xml.contains(r#"name="L3""#));
}

#[test]
fn repeated_runs_render_identical_documents() {
    let facts = home_network();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.drawio");

    let render = || {
        let mut diagram = DrawioDiagram::new();
        MappingService::new(&facts)
            .run(&mut diagram, LayoutAlgorithm::Circle, &path)
            .unwrap();
        diagram.render()
    };

    assert_eq!(render(), render());
}

#[test]
fn malformed_bgp_record_only_fails_its_own_layer() {
    let facts = JsonSnapshotSource::from_value(json!({
        "ospf_session": [{
            "Interface": "R1[Gi0/0]", "IP": "10.0.0.1", "Area": 0,
            "Remote_Interface": "R2[Gi0/0]", "Remote_IP": "10.0.0.2", "Remote_Area": 0,
            "Session_Status": "ESTABLISHED"
        }],
        "bgp_session": { "3": { "Node": "A", "Local_AS": 65001 } },
        "l3_edges": [{
            "Interface": "R1[Vlan10]", "IPs": ["10.10.0.1"],
            "Remote_Interface": "SW1[Vlan10]", "Remote_IPs": ["10.10.0.2"]
        }]
    }))
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.drawio");
    let mut diagram = DrawioDiagram::new();

    let summary = MappingService::new(&facts)
        .run(&mut diagram, LayoutAlgorithm::Circle, &path)
        .unwrap();

    assert_eq!(summary.failed_layers(), vec![Layer::Bgp]);
    assert_eq!(
        summary.layers[1].error.as_deref(),
        Some("BGP record '3' is missing field 'Remote_Node'")
    );
    assert_eq!(summary.pages, vec!["OSPF".to_owned(), "L3".to_owned()]);

    let l3 = summary.layers[2].graph.as_ref().unwrap();
    assert_eq!(
        l3.links()[0].label,
        "R1(['10.10.0.1']) == VLAN 0 == SW1(['10.10.0.2'])"
    );
}

#[test]
fn report_keeps_every_table_in_snapshot_order() {
    let facts = home_network();
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config_in(dir.path());
    cfg.report_format = ReportFormat::Json;
    let mut sink = JsonWorkbookSink::new(cfg.report_path());

    let sheets = ReportService::new(&facts).run(&mut sink).unwrap();

    assert_eq!(sheets, 4);
    let written: Value =
        serde_json::from_str(&fs::read_to_string(cfg.report_path()).unwrap()).unwrap();
    let names: Vec<&str> = written["sheets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|sheet| sheet["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ospf_session", "bgp_session", "l3_edges", "node_properties"]);
    assert_eq!(written["sheets"][3]["rows"][2]["Node"], "R3");
}

#[test]
fn default_report_is_an_excel_workbook() {
    let facts = home_network();
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let mut sink = XlsxWorkbookSink::new(cfg.report_path());

    let sheets = ReportService::new(&facts).run(&mut sink).unwrap();

    assert_eq!(sheets, 4);
    assert_eq!(
        cfg.report_path(),
        dir.path().join("Home_network_Reports/Home_network_analysis_report.xlsx")
    );
    assert!(fs::read(cfg.report_path()).unwrap().starts_with(b"PK"));
}

#[test]
fn snapshot_without_adjacencies_writes_no_diagram() {
    let facts = JsonSnapshotSource::from_value(json!({ "node_properties": [] })).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.drawio");
    let mut diagram = DrawioDiagram::new();

    let summary = MappingService::new(&facts)
        .run(&mut diagram, LayoutAlgorithm::Circle, &path)
        .unwrap();

    assert!(summary.pages.is_empty());
    assert!(summary.diagram.is_none());
    assert!(!path.exists());
}
