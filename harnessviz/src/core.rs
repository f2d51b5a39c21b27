//! Core entry points shared by the library API and the CLI.
//! No rendering-engine or viewer specifics live here.

use std::path::{Path, PathBuf};

use crate::colors::ColorMode;
use crate::description::HarnessDescription;
use crate::model::Harness;
use crate::render::{GraphvizRenderer, OutputFormat, Renderer};

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("Cable {0} cannot define both mm2 and awg")]
    ConflictingSpec(String),
    #[error("{0}: must provide a pin/wire count, a pinout or a color palette")]
    MissingPinout(String),
    #[error("Unknown color code: {0}")]
    UnknownColorCode(String),
    #[error("Unknown color mode: {0}")]
    UnknownDisplayMode(String),
    #[error("Color {code} has no entry for color mode {mode}")]
    UnresolvedColor { code: String, mode: &'static str },
    #[error("from_pin has {from} elements, to_pin has {to} and via has {via}")]
    MismatchedPinCount { from: usize, via: usize, to: usize },
    #[error("Node {0} exposes ports on both sides; the loop side must be specified")]
    AmbiguousLoopSide(String),
    #[error("Node {0} has no ports to loop between")]
    LoopWithoutPorts(String),
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("Unknown cable: {0}")]
    UnknownCable(String),
    #[error("Duplicate name: {0}")]
    DuplicateName(String),
    #[error("Pin {pin} is out of range for {node} ({count} pins)")]
    PinOutOfRange { node: String, pin: usize, count: usize },
    #[error("Wire {wire} is out of range for {cable} ({count} wires)")]
    WireOutOfRange { cable: String, wire: usize, count: usize },
    #[error("Cable {0} has no shield")]
    NoShield(String),
    #[error("Unknown output format: {0}")]
    UnknownOutputFormat(String),
    #[error("Invalid harness description: {0}")]
    Description(String),
    #[error("Graphviz failed: {0}")]
    Render(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        HarnessError::Description(e.to_string())
    }
}

/// Options for a render run (CLI or library).
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub view: bool,
    /// Overrides the color mode stored in the description.
    pub color_mode: Option<ColorMode>,
    /// Graphviz `dot` executable.
    pub program: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pdf,
            view: true,
            color_mode: None,
            program: GraphvizRenderer::from_env().program,
        }
    }
}

/// Core API used by the CLI.
pub struct HarnessVizCore;

impl HarnessVizCore {
    /// Load a description file and build its harness.
    pub fn load_harness(
        path: &Path,
        color_mode: Option<ColorMode>,
    ) -> Result<Harness, HarnessError> {
        let description = HarnessDescription::from_file(path)?;
        let mut harness = Harness::from_description(&description)?;
        if let Some(mode) = color_mode {
            harness.set_color_mode(mode);
        }
        Ok(harness)
    }

    /// DOT source for a description file.
    pub fn dot_source(path: &Path, color_mode: Option<ColorMode>) -> Result<String, HarnessError> {
        let harness = Self::load_harness(path, color_mode)?;
        Ok(harness.create_graph()?.to_dot())
    }

    /// Render a description file to `output.<format>`.
    ///
    /// Returns the path of the rendered file.
    pub fn render_file(
        path: &Path,
        output: &Path,
        options: RenderOptions,
    ) -> Result<PathBuf, HarnessError> {
        let harness = Self::load_harness(path, options.color_mode)?;
        let renderer = GraphvizRenderer::new(options.program);
        let graph = harness.create_graph()?;
        renderer.render(&graph, output, options.format, options.view)
    }
}

/// Default output name for a description file: the same path without extension.
pub fn default_output_name(input: &Path) -> PathBuf {
    input.with_extension("")
}
