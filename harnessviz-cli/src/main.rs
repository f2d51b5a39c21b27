//! HarnessViz CLI - render cable harness descriptions with Graphviz.

use clap::{Parser, Subcommand, ValueEnum};
use harnessviz::colors::{ColorCode, ColorMode, AWG_EQUIVALENTS, WIRE_COLORS};
use harnessviz::{default_output_name, HarnessVizCore, OutputFormat, RenderOptions};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "harnessviz")]
#[command(about = "Cable harness diagram generator (Graphviz)", long_about = None)]
#[command(version)]
struct Cli {
    /// Log library events (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a harness description to a diagram file
    Render {
        /// Path to the .json harness description
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output name without extension (defaults to FILE without extension)
        #[arg(short, long, value_name = "NAME")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: FormatArg,

        /// Do not open the rendered file
        #[arg(long)]
        no_view: bool,

        /// Wire color notation (full, FULL, hex, HEX, ger, GER, short, SHORT)
        #[arg(long, value_name = "MODE")]
        color_mode: Option<String>,

        /// Graphviz dot executable
        #[arg(long, value_name = "PATH")]
        dot_program: Option<PathBuf>,
    },

    /// Print the DOT source of a harness description
    Dot {
        /// Path to the .json harness description
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Wire color notation (full, FULL, hex, HEX, ger, GER, short, SHORT)
        #[arg(long, value_name = "MODE")]
        color_mode: Option<String>,
    },

    /// List wire colors, color codes and gauge equivalents
    Colors {
        /// Also show hex values and the gauge table
        #[arg(short, long)]
        all: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum FormatArg {
    Pdf,
    Png,
    Svg,
    Jpg,
    Ps,
    Dot,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Jpg => OutputFormat::Jpg,
            FormatArg::Ps => OutputFormat::Ps,
            FormatArg::Dot => OutputFormat::Dot,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Render {
            file,
            output,
            format,
            no_view,
            color_mode,
            dot_program,
        } => handle_render(&file, output, format, no_view, color_mode, dot_program),
        Commands::Dot { file, color_mode } => handle_dot(&file, color_mode),
        Commands::Colors { all, json } => {
            handle_colors(all, json);
            0
        }
    };

    process::exit(exit_code);
}

fn parse_color_mode(mode: Option<String>) -> Result<Option<ColorMode>, i32> {
    match mode.map(|m| m.parse::<ColorMode>()).transpose() {
        Ok(mode) => Ok(mode),
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(1)
        }
    }
}

fn handle_render(
    file: &Path,
    output: Option<PathBuf>,
    format: FormatArg,
    no_view: bool,
    color_mode: Option<String>,
    dot_program: Option<PathBuf>,
) -> i32 {
    let color_mode = match parse_color_mode(color_mode) {
        Ok(mode) => mode,
        Err(code) => return code,
    };

    let mut options = RenderOptions {
        format: format.into(),
        view: !no_view,
        color_mode,
        ..RenderOptions::default()
    };
    if let Some(program) = dot_program {
        options.program = program;
    }

    let output = output.unwrap_or_else(|| default_output_name(file));
    tracing::info!("Rendering {} to {}", file.display(), output.display());
    match HarnessVizCore::render_file(file, &output, options) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_dot(file: &Path, color_mode: Option<String>) -> i32 {
    let color_mode = match parse_color_mode(color_mode) {
        Ok(mode) => mode,
        Err(code) => return code,
    };

    tracing::debug!("Building DOT source for {}", file.display());
    match HarnessVizCore::dot_source(file, color_mode) {
        Ok(dot) => {
            print!("{}", dot);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn handle_colors(all: bool, json: bool) {
    if json {
        output_colors_json();
        return;
    }

    println!("Wire colors:\n");
    for color in WIRE_COLORS {
        if all {
            println!("  {}  {:<10} {:<3} {}", color.code, color.name, color.ger, color.hex);
        } else {
            println!("  {}  {}", color.code, color.name);
        }
    }

    println!("\nColor codes:\n");
    for code in ColorCode::ALL {
        println!("  {:<4} {}", code.as_str(), code.palette().join(" "));
    }

    println!("\nColor modes:\n");
    let modes: Vec<&str> = ColorMode::ALL.iter().map(|m| m.as_str()).collect();
    println!("  {}", modes.join(", "));

    if all {
        println!("\nGauge equivalents:\n");
        for (mm2, awg) in AWG_EQUIVALENTS {
            println!("  {:>5} mm\u{00B2}  {} AWG", mm2, awg);
        }
    }
}

fn output_colors_json() {
    let output = serde_json::json!({
        "colors": WIRE_COLORS.iter().map(|c| {
            serde_json::json!({
                "code": c.code,
                "name": c.name,
                "ger": c.ger,
                "hex": c.hex,
            })
        }).collect::<Vec<_>>(),
        "color_codes": ColorCode::ALL.iter().map(|c| {
            serde_json::json!({
                "name": c.as_str(),
                "palette": c.palette(),
            })
        }).collect::<Vec<_>>(),
        "awg": AWG_EQUIVALENTS.iter().map(|(mm2, awg)| {
            serde_json::json!({ "mm2": mm2, "awg": awg })
        }).collect::<Vec<_>>(),
    });
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error: {}", e),
    }
}
