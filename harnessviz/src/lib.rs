//! HarnessViz - cable and wiring harness diagrams via Graphviz
//!
//! Describe connectors, cables and how their pins are wired; HarnessViz
//! resolves wire colors, expands straight-through connections, and builds a
//! Graphviz graph with record labels that the `dot` program renders.
//!
//! # Quick Start
//!
//! ```no_run
//! use harnessviz::prelude::*;
//!
//! let mut harness = Harness::new();
//! harness.add_node(NodeSpec::new("X1").with_pinout(["GND", "VCC"]).with_ports(false, true))?;
//! harness.add_node(NodeSpec::new("X2").with_pins(2).with_ports(true, false))?;
//! harness.add_cable(CableSpec::new("W1").with_wires(2).with_color_code(ColorCode::Din))?;
//! harness.connect_all_straight("W1", "X1", "X2")?;
//!
//! harness.output("harness", OutputFormat::Pdf, false)?;
//! # Ok::<(), HarnessError>(())
//! ```
//!
//! # Features
//!
//! - **Color codes**: DIN 47100, IEC 60757 and black/white palettes, eight display modes
//! - **Connectors**: pinouts, port sides, loops
//! - **Cables**: gauge with AWG equivalents, shields, split wire anchors
//! - **Descriptions**: JSON harness files applied through the same builder API

pub mod colors;
pub mod core;
pub mod description;
pub mod graph;
pub mod label;
pub mod model;
pub mod render;

// Re-export main types
pub use colors::{awg_equivalent, translate_color, ColorCode, ColorMode};
pub use crate::core::{default_output_name, HarnessError, HarnessVizCore, RenderOptions};
pub use description::HarnessDescription;
pub use graph::Graph;
pub use label::{escape_field, serialize_label, LabelTree};
pub use model::{
    Cable, CableSpec, Connection, Harness, Loop, Node, NodeSpec, PinSelection, Side, WireRef,
};
pub use render::{GraphvizRenderer, OutputFormat, Renderer};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CableSpec, ColorCode, ColorMode, Harness, HarnessError, NodeSpec, OutputFormat,
        PinSelection, Side, WireRef,
    };
}
