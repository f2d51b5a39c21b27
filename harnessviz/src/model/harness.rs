//! The harness aggregate and its builder API.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::colors::ColorMode;
use crate::core::HarnessError;
use crate::graph::{assemble, Graph};
use crate::render::{GraphvizRenderer, OutputFormat, Renderer};

use super::cable::{Cable, CableSpec, PinSelection, WireRef};
use super::node::{Node, NodeSpec, Side};

/// Connectors and cables being diagrammed.
///
/// Populated through `add_*`, `connect*` and `add_loop`, then turned into a
/// [`Graph`] by [`Harness::create_graph`]. Insertion order is kept so the
/// generated graph is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Harness {
    color_mode: ColorMode,
    nodes: Vec<Node>,
    cables: Vec<Cable>,
    node_indices: HashMap<String, usize>,
    cable_indices: HashMap<String, usize>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn cables(&self) -> impl Iterator<Item = &Cable> {
        self.cables.iter()
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_indices.get(name).map(|&i| &self.nodes[i])
    }

    pub fn cable(&self, name: &str) -> Option<&Cable> {
        self.cable_indices.get(name).map(|&i| &self.cables[i])
    }

    fn node_mut(&mut self, name: &str) -> Result<&mut Node, HarnessError> {
        let idx = *self
            .node_indices
            .get(name)
            .ok_or_else(|| HarnessError::UnknownNode(name.to_string()))?;
        Ok(&mut self.nodes[idx])
    }

    fn require_node(&self, name: &str) -> Result<&Node, HarnessError> {
        self.node(name)
            .ok_or_else(|| HarnessError::UnknownNode(name.to_string()))
    }

    /// Nodes and cables share one namespace in the graph.
    fn name_taken(&self, name: &str) -> bool {
        self.node_indices.contains_key(name) || self.cable_indices.contains_key(name)
    }

    /// Add a connector.
    pub fn add_node(&mut self, spec: NodeSpec) -> Result<&Node, HarnessError> {
        if self.name_taken(&spec.name) {
            return Err(HarnessError::DuplicateName(spec.name));
        }
        let node = Node::new(spec)?;
        tracing::debug!("Added node {} with {} pins", node.name, node.pin_count());

        let idx = self.nodes.len();
        self.node_indices.insert(node.name.clone(), idx);
        self.nodes.push(node);
        Ok(&self.nodes[idx])
    }

    /// Add a cable.
    pub fn add_cable(&mut self, spec: CableSpec) -> Result<&Cable, HarnessError> {
        if self.name_taken(&spec.name) {
            return Err(HarnessError::DuplicateName(spec.name));
        }
        let cable = Cable::new(spec)?;
        tracing::debug!("Added cable {} with {} wires", cable.name, cable.wire_count());

        let idx = self.cables.len();
        self.cable_indices.insert(cable.name.clone(), idx);
        self.cables.push(cable);
        Ok(&self.cables[idx])
    }

    /// Loop two pins of a connector back onto each other.
    pub fn add_loop(
        &mut self,
        node_name: &str,
        from_pin: usize,
        to_pin: usize,
        side: Option<Side>,
    ) -> Result<(), HarnessError> {
        self.node_mut(node_name)?.add_loop(from_pin, to_pin, side)
    }

    /// Wire `from_pin[i]` of `from_name` through wire `via[i]` of the cable
    /// to `to_pin[i]` of `to_name`.
    ///
    /// Either the whole call is recorded or nothing is.
    pub fn connect(
        &mut self,
        cable_name: &str,
        from_name: &str,
        from_pin: PinSelection<Option<usize>>,
        via: PinSelection<WireRef>,
        to_name: &str,
        to_pin: PinSelection<Option<usize>>,
    ) -> Result<(), HarnessError> {
        let cable_idx = *self
            .cable_indices
            .get(cable_name)
            .ok_or_else(|| HarnessError::UnknownCable(cable_name.to_string()))?;
        let from_node = self.require_node(from_name)?;
        let to_node = self.require_node(to_name)?;

        let connections = self.cables[cable_idx]
            .resolve_connections(from_name, from_pin, via, to_name, to_pin)?;

        for connection in &connections {
            if let Some(pin) = connection.from_pin {
                from_node.check_pin(pin)?;
            }
            if let Some(pin) = connection.to_pin {
                to_node.check_pin(pin)?;
            }
        }

        tracing::debug!(
            "Connected {} -> {} via {} ({} wires)",
            from_name,
            to_name,
            cable_name,
            connections.len()
        );
        self.cables[cable_idx].add_connections(connections);
        Ok(())
    }

    /// Straight-through connection of every wire: pin `i` to wire `i` to pin `i`.
    pub fn connect_all_straight(
        &mut self,
        cable_name: &str,
        from_name: &str,
        to_name: &str,
    ) -> Result<(), HarnessError> {
        self.connect(
            cable_name,
            from_name,
            PinSelection::Auto,
            PinSelection::Auto,
            to_name,
            PinSelection::Auto,
        )
    }

    /// Assemble the layout graph. The harness is left untouched.
    pub fn create_graph(&self) -> Result<Graph, HarnessError> {
        assemble(self)
    }

    /// Render through Graphviz to `filename.<format>`, optionally opening it.
    pub fn output(
        &self,
        filename: impl AsRef<Path>,
        format: OutputFormat,
        view: bool,
    ) -> Result<PathBuf, HarnessError> {
        self.output_with(&GraphvizRenderer::from_env(), filename, format, view)
    }

    pub fn output_with<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        filename: impl AsRef<Path>,
        format: OutputFormat,
        view: bool,
    ) -> Result<PathBuf, HarnessError> {
        let graph = self.create_graph()?;
        renderer.render(&graph, filename.as_ref(), format, view)
    }
}
