//! Builder API tests for harness construction and graph assembly

use harnessviz::prelude::*;
use harnessviz::{awg_equivalent, serialize_label, translate_color, Connection, LabelTree};

fn connectors(harness: &mut Harness, pins: usize) {
    harness
        .add_node(NodeSpec::new("X1").with_pins(pins).with_ports(false, true))
        .expect("X1");
    harness
        .add_node(NodeSpec::new("X2").with_pins(pins).with_ports(true, false))
        .expect("X2");
}

#[test]
fn test_translate_color_modes() {
    for mode in ColorMode::ALL {
        assert_eq!(translate_color("", mode).unwrap(), "");
    }
    assert_eq!(translate_color("RD", ColorMode::FullLower).unwrap(), "red");
    assert_eq!(translate_color("RD", ColorMode::HexUpper).unwrap(), "#FF0000");
    assert_eq!(translate_color("RD", ColorMode::GerLower).unwrap(), "rt");
}

#[test]
fn test_unknown_display_mode() {
    let err = "fancy".parse::<ColorMode>().unwrap_err();
    assert!(matches!(err, HarnessError::UnknownDisplayMode(_)));
}

#[test]
fn test_awg_lookup() {
    assert_eq!(awg_equivalent("1.5"), Some(16));
    assert_eq!(awg_equivalent("999"), None);
}

#[test]
fn test_din_cable_colors() {
    let mut harness = Harness::new();
    let cable = harness
        .add_cable(CableSpec::new("W1").with_wires(5).with_color_code(ColorCode::Din))
        .unwrap();
    assert_eq!(cable.colors(), ["WH", "BN", "GN", "YE", "GY"]);

    let cable = harness
        .add_cable(CableSpec::new("W2").with_wires(12).with_color_code(ColorCode::Din))
        .unwrap();
    let colors = cable.colors();
    assert_eq!(colors.len(), 12);
    assert_eq!(colors[10], colors[0]);
    assert_eq!(colors[11], colors[1]);
}

#[test]
fn test_unknown_color_code_name() {
    let err = "RAINBOW".parse::<ColorCode>().unwrap_err();
    assert!(matches!(err, HarnessError::UnknownColorCode(_)));
}

#[test]
fn test_connect_all_straight_four_wires() {
    let mut harness = Harness::new();
    connectors(&mut harness, 4);
    harness
        .add_cable(CableSpec::new("W1").with_wires(4))
        .unwrap();
    harness.connect_all_straight("W1", "X1", "X2").unwrap();

    let expected: Vec<Connection> = (1..=4)
        .map(|n| Connection {
            from_node: "X1".to_string(),
            from_pin: Some(n),
            via: WireRef::Wire(n),
            to_node: "X2".to_string(),
            to_pin: Some(n),
        })
        .collect();
    assert_eq!(harness.cable("W1").unwrap().connections(), expected.as_slice());
}

#[test]
fn test_connect_mismatched_pin_count() {
    let mut harness = Harness::new();
    connectors(&mut harness, 4);
    harness
        .add_cable(CableSpec::new("W1").with_wires(3))
        .unwrap();

    let err = harness
        .connect(
            "W1",
            "X1",
            PinSelection::pins([1, 2, 3]),
            PinSelection::Auto,
            "X2",
            PinSelection::pins([1, 2]),
        )
        .unwrap_err();
    assert!(matches!(err, HarnessError::MismatchedPinCount { .. }));
}

#[test]
fn test_serialize_label_omissions() {
    let tree = vec![
        LabelTree::text(""),
        LabelTree::Group(vec![]),
        LabelTree::column(["a"]),
    ];
    assert_eq!(serialize_label(&tree), "{a}");
}

#[test]
fn test_ambiguous_loop_side() {
    let mut harness = Harness::new();
    harness
        .add_node(NodeSpec::new("X1").with_pins(4).with_ports(true, true))
        .unwrap();

    let err = harness.add_loop("X1", 1, 2, None).unwrap_err();
    assert!(matches!(err, HarnessError::AmbiguousLoopSide(_)));

    harness.add_loop("X1", 1, 2, Some(Side::Left)).unwrap();
    let graph = harness.create_graph().unwrap();
    let dot = graph.to_dot();
    assert!(dot.contains("\"X1\":\"p1\":w -- \"X1\":\"p2\":w"));
}

#[test]
fn test_conflicting_gauge_spec() {
    let mut harness = Harness::new();
    let err = harness
        .add_cable(CableSpec::new("W1").with_wires(2).with_mm2(0.5).with_awg(20))
        .unwrap_err();
    assert!(matches!(err, HarnessError::ConflictingSpec(_)));
}

#[test]
fn test_edge_colors_in_dot() {
    let mut harness = Harness::new();
    connectors(&mut harness, 2);
    harness
        .add_cable(CableSpec::new("W1").with_colors(["RD", "XX"]))
        .unwrap();
    harness.connect_all_straight("W1", "X1", "X2").unwrap();

    let dot = harness.create_graph().unwrap().to_dot();
    assert!(dot.contains(
        "\"X1\":\"p1\" -- \"W1\":\"w1\" [color=\"#000000:#ff0000:#000000\"]"
    ));
    assert!(dot.contains("\"W1\":\"w2\" -- \"X2\":\"p2\" [color=\"#000000\"]"));
}

#[test]
fn test_graph_counts() {
    let mut harness = Harness::new().with_color_mode(ColorMode::GerUpper);
    connectors(&mut harness, 3);
    harness
        .add_cable(
            CableSpec::new("W1")
                .with_wires(3)
                .with_color_code(ColorCode::Iec)
                .with_shield(true),
        )
        .unwrap();
    harness.connect_all_straight("W1", "X1", "X2").unwrap();

    let graph = harness.create_graph().unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 6);

    let label = &graph.node("W1").unwrap().label;
    assert!(label.contains("<w1>BR"));
    assert!(label.contains("<ws>Shield"));
    assert!(label.contains("+ S"));
}
