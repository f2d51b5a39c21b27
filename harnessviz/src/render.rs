//! Rendering through Graphviz.
//!
//! The graph is written as DOT source next to the requested output and the
//! external `dot` program turns it into the final file. Engine failures are
//! reported unchanged as [`HarnessError::Render`].

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use crate::core::HarnessError;
use crate::graph::Graph;

/// Environment variable naming the `dot` executable.
pub const DOT_PROGRAM_ENV: &str = "HARNESSVIZ_DOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
    Svg,
    Jpg,
    Ps,
    Dot,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Pdf,
        OutputFormat::Png,
        OutputFormat::Svg,
        OutputFormat::Jpg,
        OutputFormat::Ps,
        OutputFormat::Dot,
    ];

    /// Graphviz `-T` name, also used as file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Ps => "ps",
            OutputFormat::Dot => "dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| HarnessError::UnknownOutputFormat(s.to_string()))
    }
}

/// Turns a finished graph into a file.
pub trait Renderer {
    /// Render `graph` to `filename.<format>` and return that path.
    fn render(
        &self,
        graph: &Graph,
        filename: &Path,
        format: OutputFormat,
        view: bool,
    ) -> Result<PathBuf, HarnessError>;
}

/// `filename.<format>`, appending rather than replacing any extension.
pub fn output_path(filename: &Path, format: OutputFormat) -> PathBuf {
    let mut name = OsString::from(filename.as_os_str());
    name.push(".");
    name.push(format.as_str());
    PathBuf::from(name)
}

/// Renderer backed by the Graphviz `dot` executable.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    pub program: PathBuf,
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `dot` from `HARNESSVIZ_DOT`, falling back to the one on `PATH`.
    pub fn from_env() -> Self {
        let program = std::env::var_os(DOT_PROGRAM_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("dot"));
        Self { program }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Renderer for GraphvizRenderer {
    fn render(
        &self,
        graph: &Graph,
        filename: &Path,
        format: OutputFormat,
        view: bool,
    ) -> Result<PathBuf, HarnessError> {
        if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(filename, graph.to_dot())?;

        let target = output_path(filename, format);
        tracing::info!(
            "Rendering {} with {} to {}",
            filename.display(),
            self.program.display(),
            target.display()
        );

        let output = Command::new(&self.program)
            .arg(format!("-T{}", format.as_str()))
            .arg("-o")
            .arg(&target)
            .arg(filename)
            .output()
            .map_err(|e| {
                HarnessError::Render(format!("cannot run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let msg = match output.status.code() {
                Some(code) => format!("{} exited with {}: {}", self.program.display(), code, stderr),
                None => format!("{} terminated by signal: {}", self.program.display(), stderr),
            };
            return Err(HarnessError::Render(msg));
        }

        if view {
            opener::open(&target).map_err(|e| {
                HarnessError::Render(format!("cannot open {}: {}", target.display(), e))
            })?;
        }

        Ok(target)
    }
}
