//! spiralsort: command-line front end.
//!
//! Reads a point cloud from a CSV or JSON file, orders it along an
//! outward counterclockwise spiral from a chosen start node, and writes
//! the result next to the input as `<stem>_spiralsorted.<ext>`.
//!
//! # Usage
//!
//! ```text
//! spiralsort sort [OPTIONS] <FILE_PATH> <START_NODE_ID>
//! spiralsort mock [OPTIONS] <OUTPUT>
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to follow slices and strides.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod mock;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand, ValueEnum};
use spiralsort::{Clock, SpiralConfig};
use spiralsort_format::{Format, SvgMetadata};

/// Order 3-D point clouds along an outward counterclockwise spiral.
#[derive(Parser)]
#[command(name = "spiralsort", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Spiral-sort a point-cloud file.
    Sort(SortArgs),
    /// Write a random hollow-shell point cloud for experimentation.
    Mock(MockArgs),
}

#[derive(Args)]
struct SortArgs {
    /// Input file (.csv or .json) with `node_id`, `x`, `y`, `z` columns.
    file_path: PathBuf,

    /// Id of the node the spiral starts from.
    start_node_id: String,

    /// Output format. Defaults to the format of the input file.
    #[arg(long, value_enum)]
    output_format: Option<OutputFormat>,

    /// Also write an SVG preview of the ordered path (XY projection).
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Print per-slice diagnostics after sorting.
    #[arg(long)]
    diagnostics: bool,

    /// Print diagnostics as JSON instead of a human-readable report.
    #[arg(long, requires = "diagnostics")]
    json: bool,

    /// Length of the first exponential slice.
    #[arg(long, default_value_t = SpiralConfig::DEFAULT_BASE, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    base: usize,

    /// Width of the fixed slices after the exponential ones.
    #[arg(long, default_value_t = SpiralConfig::DEFAULT_CONST_WINDOW, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    const_window: usize,

    /// Spiral window size of the first slice.
    #[arg(long, default_value_t = SpiralConfig::DEFAULT_SPIRAL_WINDOW, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    spiral_window: usize,

    /// Spiral window growth per slice.
    #[arg(long, default_value_t = SpiralConfig::DEFAULT_SPIRAL_WINDOW_GROWTH)]
    spiral_window_growth: usize,

    /// Nodes placed per spiral window.
    #[arg(long, default_value_t = SpiralConfig::DEFAULT_STRIDE, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    stride: usize,

    /// Placed-node count up to which the counterclockwise filter is off.
    #[arg(long, default_value_t = SpiralConfig::DEFAULT_WARMUP_NODES)]
    warmup_nodes: usize,

    /// Full spiral config as a JSON string.
    ///
    /// When provided, all other config flags are ignored. Missing fields
    /// take their default values.
    #[arg(long)]
    config_json: Option<String>,
}

#[derive(Args)]
struct MockArgs {
    /// Output file (.csv or .json).
    output: PathBuf,

    /// Number of candidate nodes drawn before the inner sphere is removed.
    #[arg(long, default_value_t = mock::DEFAULT_NODES)]
    nodes: usize,

    /// RNG seed.
    #[arg(long, default_value_t = mock::DEFAULT_SEED)]
    seed: u64,
}

/// Output format selection.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Build a [`SpiralConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual parameter flags are ignored.
fn config_from_args(args: &SortArgs) -> Result<SpiralConfig, String> {
    if let Some(ref json) = args.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(SpiralConfig {
        base: args.base,
        const_window: args.const_window,
        spiral_window: args.spiral_window,
        spiral_window_growth: args.spiral_window_growth,
        stride: args.stride,
        warmup_nodes: args.warmup_nodes,
    })
}

/// `<stem>_spiralsorted.<ext>` in the directory of `input`.
fn output_path(input: &Path, format: Format) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "cloud".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_spiralsorted.{}", format.extension()))
}

fn run_sort(args: &SortArgs) -> Result<(), String> {
    let config = config_from_args(args)?;
    let input_format = Format::from_path(&args.file_path).map_err(|e| e.to_string())?;
    let output_format = args.output_format.map_or(input_format, Format::from);

    let start = Instant::now();
    let text = std::fs::read_to_string(&args.file_path)
        .map_err(|e| format!("Error reading {}: {e}", args.file_path.display()))?;
    let cloud = input_format
        .parse(&text)
        .map_err(|e| format!("Error parsing {}: {e}", args.file_path.display()))?;
    log::info!("read {} nodes from {}", cloud.len(), args.file_path.display());
    log::debug!("config: {config:?}");

    let (sorted, diagnostics) =
        spiralsort::sort_with_diagnostics(&cloud, &args.start_node_id, &config, &StdClock)
            .map_err(|e| format!("Sort error: {e}"))?;

    let output = output_path(&args.file_path, output_format);
    let serialized = output_format
        .serialize(&sorted)
        .map_err(|e| format!("Error serializing output: {e}"))?;
    std::fs::write(&output, serialized)
        .map_err(|e| format!("Error writing {}: {e}", output.display()))?;

    println!("SpiralSorting completed. Duration: {:.3?}", start.elapsed());
    eprintln!("Output written to {}", output.display());

    if args.diagnostics {
        if args.json {
            let json = serde_json::to_string_pretty(&diagnostics)
                .map_err(|e| format!("Error serializing diagnostics: {e}"))?;
            println!("{json}");
        } else {
            println!("{}", diagnostics.report());
        }
    }

    if let Some(ref svg_path) = args.svg {
        let title = args
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("spiralsort");
        let desc = format!("start node {}, {config:?}", args.start_node_id);
        let metadata = SvgMetadata {
            title: Some(title),
            description: Some(&desc),
        };
        let svg = spiralsort_format::to_svg(&sorted, &metadata);
        std::fs::write(svg_path, &svg)
            .map_err(|e| format!("Error writing SVG to {}: {e}", svg_path.display()))?;
        eprintln!(
            "SVG written to {} ({} bytes)",
            svg_path.display(),
            svg.len(),
        );
    }

    Ok(())
}

fn run_mock(args: &MockArgs) -> Result<(), String> {
    let format = Format::from_path(&args.output).map_err(|e| e.to_string())?;
    let cloud = mock::mock_cloud(args.nodes, args.seed);
    let serialized = format
        .serialize(&cloud)
        .map_err(|e| format!("Error serializing mock cloud: {e}"))?;
    std::fs::write(&args.output, serialized)
        .map_err(|e| format!("Error writing {}: {e}", args.output.display()))?;

    eprintln!(
        "Mock cloud of {} nodes written to {}",
        cloud.len(),
        args.output.display(),
    );
    if let Some(top) = mock::top_node(&cloud) {
        println!("Suggested start node: {}", top.id);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Sort(ref args) => run_sort(args),
        Command::Mock(ref args) => run_mock(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}
