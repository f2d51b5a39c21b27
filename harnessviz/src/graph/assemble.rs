use crate::colors::{awg_equivalent, hex_for, translate_color, ColorMode, BLACK_HEX};
use crate::core::HarnessError;
use crate::label::{escape_field, LabelTree};
use crate::model::{Cable, Harness, Node, WireRef};

use super::{Endpoint, Graph};

/// Port name of a connector pin.
pub fn pin_port(pin: usize) -> String {
    format!("p{}", pin)
}

/// Port name of a cable conductor, with an optional `i`/`o` sub-port suffix.
pub fn wire_port(via: WireRef, subport: &str) -> String {
    format!("w{}{}", via, subport)
}

/// Build the layout graph for a harness: connectors first (with their
/// loops), then cables with their connection edges.
pub fn assemble(harness: &Harness) -> Result<Graph, HarnessError> {
    let mut graph = Graph::new();

    for node in harness.nodes() {
        graph.add_node(&node.name, node_label(node).serialize());

        for l in node.loops() {
            graph.add_edge(
                Endpoint::new(&node.name)
                    .with_port(pin_port(l.from_pin))
                    .with_compass(l.side.compass()),
                Endpoint::new(&node.name)
                    .with_port(pin_port(l.to_pin))
                    .with_compass(l.side.compass()),
                None,
            )?;
        }
    }

    for cable in harness.cables() {
        graph.add_node(&cable.name, cable_label(cable, harness.color_mode())?.serialize());

        let (in_suffix, out_suffix) = if cable.show_pinout { ("i", "o") } else { ("", "") };
        for c in cable.connections() {
            let color = edge_color(cable, c.via);
            if let Some(pin) = c.from_pin {
                graph.add_edge(
                    Endpoint::new(&c.from_node).with_port(pin_port(pin)),
                    Endpoint::new(&cable.name).with_port(wire_port(c.via, in_suffix)),
                    Some(color.clone()),
                )?;
            }
            if let Some(pin) = c.to_pin {
                graph.add_edge(
                    Endpoint::new(&cable.name).with_port(wire_port(c.via, out_suffix)),
                    Endpoint::new(&c.to_node).with_port(pin_port(pin)),
                    Some(color),
                )?;
            }
        }
    }

    tracing::debug!(
        "Assembled graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn node_label(node: &Node) -> LabelTree {
    let attributes = LabelTree::group([
        LabelTree::from(node.kind.as_deref().map(escape_field)),
        LabelTree::from(node.gender.as_deref().map(escape_field)),
        LabelTree::text(format!("{}-pin", node.pin_count())),
    ]);

    let ports = |enabled: bool| {
        if enabled {
            LabelTree::column((1..=node.pin_count()).map(|i| format!("<{}>{}", pin_port(i), i)))
        } else {
            LabelTree::Group(Vec::new())
        }
    };
    let pinout = LabelTree::group([
        ports(node.ports_left),
        LabelTree::column(node.pinout().iter().map(|p| escape_field(p))),
        ports(node.ports_right),
    ]);

    LabelTree::group([
        LabelTree::Leaf(node.show_name.then(|| escape_field(&node.name))),
        attributes,
        pinout,
    ])
}

fn cable_label(cable: &Cable, mode: ColorMode) -> Result<LabelTree, HarnessError> {
    let cross_section = cable.mm2.map(|mm2| {
        let equiv = cable
            .show_equiv
            .then(|| awg_equivalent(&mm2.to_string()))
            .flatten()
            .map(|awg| format!(" ({} AWG)", awg))
            .unwrap_or_default();
        format!("{} mm\u{00B2}{}", mm2, equiv)
    });

    let attributes = LabelTree::group([
        LabelTree::text(format!("{}x", cable.wire_count())),
        LabelTree::from(cross_section),
        LabelTree::from(cable.awg.map(|awg| format!("{} AWG", awg))),
        LabelTree::from(cable.shield.then(|| "+ S".to_string())),
        LabelTree::text(format!("{} m", cable.length)),
    ]);

    let mut left = Vec::new();
    let mut middle = Vec::new();
    let mut right = Vec::new();
    let conductors = (1..=cable.wire_count())
        .map(WireRef::Wire)
        .chain(cable.shield.then_some(WireRef::Shield));
    for via in conductors {
        let text = match via {
            WireRef::Wire(_) => {
                escape_field(&translate_color(cable.color_of(via).unwrap_or_default(), mode)?)
            }
            WireRef::Shield => "Shield".to_string(),
        };
        // Wire numbers are printed next to split anchors, the shield has none
        let number = match via {
            WireRef::Wire(n) => n.to_string(),
            WireRef::Shield => String::new(),
        };
        if cable.show_pinout {
            left.push(format!("<{}>{}", wire_port(via, "i"), number));
            middle.push(text);
            right.push(format!("<{}>{}", wire_port(via, "o"), number));
        } else {
            middle.push(format!("<{}>{}", wire_port(via, ""), text));
        }
    }

    let wires = LabelTree::group([
        LabelTree::column(left),
        LabelTree::column(middle),
        LabelTree::column(right),
    ]);

    Ok(LabelTree::group([
        LabelTree::Leaf(cable.show_name.then(|| escape_field(&cable.name))),
        attributes,
        wires,
    ]))
}

/// Edge color for a conductor: the wire color framed in black, or plain
/// black for the shield and for colors without a hex value.
pub fn edge_color(cable: &Cable, via: WireRef) -> String {
    match cable.color_of(via) {
        Some(code) => match hex_for(code) {
            Some(hex) => format!("{}:{}:{}", BLACK_HEX, hex, BLACK_HEX),
            None => {
                if !code.is_empty() {
                    tracing::warn!(
                        "Wire {} of {} has unknown color {}; drawing it black",
                        via,
                        cable.name,
                        code
                    );
                }
                BLACK_HEX.to_string()
            }
        },
        None => BLACK_HEX.to_string(),
    }
}
