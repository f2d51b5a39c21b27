//! Declarative harness descriptions.
//!
//! A JSON document listing connectors, cables, loops and connections. It is
//! applied to a [`Harness`] purely through the public builder API, in the
//! order nodes, cables, loops, connections.
//!
//! ```json
//! {
//!   "color_mode": "SHORT",
//!   "nodes": [
//!     { "name": "X1", "type": "D-Sub", "gender": "female", "pinout": ["GND", "RX", "TX"], "ports_right": true },
//!     { "name": "X2", "num_pins": 3, "ports_left": true }
//!   ],
//!   "cables": [
//!     { "name": "W1", "num_wires": 3, "color_code": "DIN", "mm2": 0.25, "shield": true }
//!   ],
//!   "connections": [
//!     { "cable": "W1", "from": "X1", "to": "X2" },
//!     { "cable": "W1", "from": "X1", "from_pin": [1], "via": ["s"], "to": "X2", "to_pin": [null] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::colors::{ColorCode, ColorMode};
use crate::core::HarnessError;
use crate::model::{CableSpec, Harness, NodeSpec, PinSelection, Side, WireRef};

/// Color mode and color code stay strings until the description is applied,
/// so unknown names fail with their own error variants.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessDescription {
    #[serde(default)]
    pub color_mode: Option<String>,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub cables: Vec<CableEntry>,
    #[serde(default)]
    pub loops: Vec<LoopSpec>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
}

/// A cable as written in a description file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CableEntry {
    pub name: String,
    #[serde(default)]
    pub mm2: Option<f64>,
    #[serde(default)]
    pub awg: Option<u32>,
    #[serde(default)]
    pub show_equiv: bool,
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub show_name: bool,
    #[serde(default)]
    pub show_pinout: bool,
    #[serde(default)]
    pub num_wires: Option<usize>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub color_code: Option<String>,
    #[serde(default)]
    pub shield: bool,
}

impl TryFrom<CableEntry> for CableSpec {
    type Error = HarnessError;

    fn try_from(entry: CableEntry) -> Result<Self, Self::Error> {
        let color_code = entry
            .color_code
            .as_deref()
            .map(str::parse::<ColorCode>)
            .transpose()?;
        Ok(CableSpec {
            name: entry.name,
            mm2: entry.mm2,
            awg: entry.awg,
            show_equiv: entry.show_equiv,
            length: entry.length,
            show_name: entry.show_name,
            show_pinout: entry.show_pinout,
            num_wires: entry.num_wires,
            colors: entry.colors,
            color_code,
            shield: entry.shield,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoopSpec {
    pub node: String,
    pub from_pin: usize,
    pub to_pin: usize,
    #[serde(default)]
    pub side: Option<Side>,
}

/// A `connect` call. Omitted selections mean `auto`; with all three omitted
/// the cable is connected straight through.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSpec {
    pub cable: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub from_pin: Option<PinSelection<Option<usize>>>,
    #[serde(default)]
    pub via: Option<PinSelection<WireRef>>,
    #[serde(default)]
    pub to_pin: Option<PinSelection<Option<usize>>>,
}

impl HarnessDescription {
    pub fn from_json(content: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| HarnessError::Description(format!("{}: {}", path.display(), e)))
    }
}

impl Harness {
    /// Build a harness from a description, stopping at the first error.
    pub fn from_description(description: &HarnessDescription) -> Result<Self, HarnessError> {
        let mut harness = Harness::new();
        if let Some(mode) = &description.color_mode {
            harness.set_color_mode(mode.parse::<ColorMode>()?);
        }

        for node in &description.nodes {
            harness.add_node(node.clone())?;
        }
        for cable in &description.cables {
            harness.add_cable(CableSpec::try_from(cable.clone())?)?;
        }
        for l in &description.loops {
            harness.add_loop(&l.node, l.from_pin, l.to_pin, l.side)?;
        }
        for c in &description.connections {
            match (&c.from_pin, &c.via, &c.to_pin) {
                (None, None, None) => harness.connect_all_straight(&c.cable, &c.from, &c.to)?,
                _ => harness.connect(
                    &c.cable,
                    &c.from,
                    c.from_pin.clone().unwrap_or(PinSelection::Auto),
                    c.via.clone().unwrap_or(PinSelection::Auto),
                    &c.to,
                    c.to_pin.clone().unwrap_or(PinSelection::Auto),
                )?,
            }
        }

        tracing::info!(
            "Loaded harness with {} nodes and {} cables",
            description.nodes.len(),
            description.cables.len()
        );
        Ok(harness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "color_mode": "full",
        "nodes": [
            { "name": "X1", "type": "D-Sub", "pinout": ["GND", "RX", "TX"], "ports_right": true },
            { "name": "X2", "num_pins": 3, "ports_left": true, "show_name": false }
        ],
        "cables": [
            { "name": "W1", "num_wires": 3, "color_code": "DIN", "shield": true }
        ],
        "loops": [
            { "node": "X2", "from_pin": 2, "to_pin": 3 }
        ],
        "connections": [
            { "cable": "W1", "from": "X1", "to": "X2" },
            { "cable": "W1", "from": "X1", "from_pin": [1], "via": ["s"], "to": "X2", "to_pin": [null] }
        ]
    }"#;

    #[test]
    fn test_sample_description() {
        let description = HarnessDescription::from_json(SAMPLE).unwrap();
        let harness = Harness::from_description(&description).unwrap();

        assert_eq!(harness.color_mode(), ColorMode::FullLower);
        let x2 = harness.node("X2").unwrap();
        assert!(!x2.show_name);
        assert_eq!(x2.loops()[0].side, Side::Left);

        let w1 = harness.cable("W1").unwrap();
        assert_eq!(w1.colors(), ["WH", "BN", "GN"]);
        assert_eq!(w1.connections().len(), 4);
        assert_eq!(w1.connections()[3].via, WireRef::Shield);
        assert_eq!(w1.connections()[3].to_pin, None);
    }

    #[test]
    fn test_partial_selection_defaults_to_auto() {
        let json = r#"{
            "nodes": [ { "name": "A", "num_pins": 2 }, { "name": "B", "num_pins": 2 } ],
            "cables": [ { "name": "W", "num_wires": 2 } ],
            "connections": [ { "cable": "W", "from": "A", "to": "B", "to_pin": [2, 1] } ]
        }"#;
        let harness = Harness::from_description(&HarnessDescription::from_json(json).unwrap()).unwrap();
        let connections = harness.cable("W").unwrap().connections();
        assert_eq!(connections[0].from_pin, Some(1));
        assert_eq!(connections[0].to_pin, Some(2));
        assert_eq!(connections[1].via, WireRef::Wire(2));
    }

    #[test]
    fn test_unknown_color_code_rejected() {
        let json = r#"{ "cables": [ { "name": "W", "num_wires": 2, "color_code": "XYZ" } ] }"#;
        let description = HarnessDescription::from_json(json).unwrap();
        let err = Harness::from_description(&description).unwrap_err();
        assert!(matches!(err, HarnessError::UnknownColorCode(code) if code == "XYZ"));
    }

    #[test]
    fn test_unknown_color_mode_rejected() {
        let description = HarnessDescription::from_json(r#"{ "color_mode": "Hex" }"#).unwrap();
        let err = Harness::from_description(&description).unwrap_err();
        assert!(matches!(err, HarnessError::UnknownDisplayMode(mode) if mode == "Hex"));
    }

    #[test]
    fn test_misspelled_entry_fields_rejected() {
        let cable = r#"{ "cables": [ { "name": "W", "num_wires": 2, "show_pinuot": true } ] }"#;
        assert!(matches!(
            HarnessDescription::from_json(cable),
            Err(HarnessError::Description(msg)) if msg.contains("show_pinuot")
        ));

        let node = r#"{ "nodes": [ { "name": "X1", "num_pins": 2, "port_left": true } ] }"#;
        assert!(matches!(
            HarnessDescription::from_json(node),
            Err(HarnessError::Description(msg)) if msg.contains("port_left")
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{ "nodes": [], "wires": [] }"#;
        assert!(matches!(
            HarnessDescription::from_json(json),
            Err(HarnessError::Description(_))
        ));
    }

    #[test]
    fn test_builder_errors_surface() {
        let json = r#"{ "nodes": [ { "name": "X1" } ] }"#;
        let description = HarnessDescription::from_json(json).unwrap();
        assert!(matches!(
            Harness::from_description(&description),
            Err(HarnessError::MissingPinout(_))
        ));
    }
}
