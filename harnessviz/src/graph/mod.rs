//! Layout Graph
//!
//! The graph handed to Graphviz: record-shaped nodes for connectors and
//! cables, and undirected edges between their named ports. Built once from a
//! [`Harness`](crate::model::Harness) and printed as DOT source.
//!
//! Storage uses petgraph so edges can be queried per node; the DOT printer
//! walks nodes and edges in insertion order.

mod assemble;

pub use assemble::{assemble, edge_color, pin_port, wire_port};

use std::collections::HashMap;
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::core::HarnessError;

pub const FONT: &str = "arial";

pub const GRAPH_ATTRS: &[(&str, &str)] = &[
    ("rankdir", "LR"),
    ("ranksep", "2"),
    ("bgcolor", "transparent"),
    ("fontname", FONT),
];

pub const NODE_ATTRS: &[(&str, &str)] = &[
    ("shape", "record"),
    ("style", "rounded,filled"),
    ("fillcolor", "white"),
    ("fontname", FONT),
];

pub const EDGE_ATTRS: &[(&str, &str)] = &[("style", "bold"), ("fontname", FONT)];

/// A record-shaped graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Record label in Graphviz syntax.
    pub label: String,
}

/// One end of an edge: a node, optionally a named port and a compass point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub node: String,
    pub port: Option<String>,
    pub compass: Option<String>,
}

impl Endpoint {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: None,
            compass: None,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn with_compass(mut self, compass: impl Into<String>) -> Self {
        self.compass = Some(compass.into());
        self
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.node))?;
        if let Some(port) = &self.port {
            write!(f, ":{}", quote(port))?;
        }
        if let Some(compass) = &self.compass {
            write!(f, ":{}", compass)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub tail: Endpoint,
    pub head: Endpoint,
    /// Graphviz color list, e.g. `#000000:#ff0000:#000000`.
    pub color: Option<String>,
}

/// Finished layout graph.
#[derive(Debug, Clone)]
pub struct Graph {
    graph: DiGraph<GraphNode, GraphEdge>,
    indices: HashMap<String, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, id: impl Into<String>, label: impl Into<String>) -> NodeIndex {
        let id = id.into();
        let idx = self.graph.add_node(GraphNode {
            id: id.clone(),
            label: label.into(),
        });
        self.indices.insert(id, idx);
        idx
    }

    /// Add an edge between two already declared nodes.
    pub fn add_edge(
        &mut self,
        tail: Endpoint,
        head: Endpoint,
        color: Option<String>,
    ) -> Result<(), HarnessError> {
        let from = self.index_of(&tail.node)?;
        let to = self.index_of(&head.node)?;
        tracing::debug!("Edge {} -- {}", tail, head);
        self.graph.add_edge(from, to, GraphEdge { tail, head, color });
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<NodeIndex, HarnessError> {
        self.indices
            .get(id)
            .copied()
            .ok_or_else(|| HarnessError::UnknownNode(id.to_string()))
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.indices
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.graph.edge_weights()
    }

    /// Edges touching a node at either end.
    pub fn edges_of(&self, id: &str) -> Vec<&GraphEdge> {
        let Some(&idx) = self.indices.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<&GraphEdge> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.weight())
            .collect();
        edges.extend(
            self.graph
                .edges_directed(idx, Direction::Incoming)
                .filter(|e| e.source() != idx)
                .map(|e| e.weight()),
        );
        edges
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// DOT source of this graph.
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

fn write_attrs<'a, I>(f: &mut fmt::Formatter<'_>, attrs: I) -> fmt::Result
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let attrs: Vec<String> = attrs
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, quote(v)))
        .collect();
    write!(f, "[{}]", attrs.join(" "))
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "graph {{")?;

        write!(f, "\tgraph ")?;
        write_attrs(f, GRAPH_ATTRS.iter().copied())?;
        write!(f, "\n\tnode ")?;
        write_attrs(f, NODE_ATTRS.iter().copied())?;
        write!(f, "\n\tedge ")?;
        write_attrs(f, EDGE_ATTRS.iter().copied())?;
        writeln!(f)?;

        for node in self.nodes() {
            write!(f, "\t{} ", quote(&node.id))?;
            write_attrs(f, [("label", node.label.as_str())])?;
            writeln!(f)?;
        }

        for edge in self.edges() {
            write!(f, "\t{} -- {}", edge.tail, edge.head)?;
            if let Some(color) = &edge.color {
                write!(f, " ")?;
                write_attrs(f, [("color", color.as_str())])?;
            }
            writeln!(f)?;
        }

        writeln!(f, "}}")
    }
}
