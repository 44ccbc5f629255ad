//! Cellplot: render rectangle collections as unit-cell images.
//!
//! Cellplot reads a brace-nested list of groups, each holding rectangle
//! tokens like `{{x1,y1},{x2,y2}}`. Every rectangle is decomposed into the
//! 1×1 cells it spans, cells of one group are merged into a deduplicated
//! collection, and each collection is drawn to its own PNG.
//!
//! # Modules
//!
//! - [`cells`]: Unit cells, collections, and the lenient text parser
//! - [`validation`]: Structural check that reports what the parser skipped
//! - [`render`]: Rendering capability and the PNG backend
//! - [`output`]: Output directory and file naming
//! - [`error`]: Error types for cellplot operations

pub mod cells;
pub mod error;
pub mod output;
pub mod render;
pub mod validation;

use std::fs;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

pub use error::CellplotError;

use render::{Capability, RenderEvent, RenderOptions};
use validation::CheckOptions;

/// Default input file, looked up in the working directory.
const DEFAULT_INPUT: &str = "input_collections.txt";

/// The cellplot CLI application.
#[derive(Parser)]
#[command(name = "cellplot")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Render every collection in a file to PNG images.
    Render(RenderArgs),
    /// Print the parsed collections.
    Parse(ParseArgs),
    /// Report input the lenient parser would skip.
    Check(CheckArgs),
}

/// Arguments for the render subcommand.
#[derive(clap::Args)]
struct RenderArgs {
    /// Input collections file.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write images directly into this directory.
    #[arg(long, env = "CELLPLOT_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Create a timestamped run directory under this directory
    /// (defaults to the input file's directory). Overrides
    /// CELLPLOT_OUT_DIR, but not --out-dir.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// File name prefix for images ('<prefix>_<n>.png').
    #[arg(long, env = "CELLPLOT_PREFIX", default_value = output::DEFAULT_PREFIX)]
    prefix: String,

    /// Refuse input with any check error or warning.
    #[arg(long)]
    strict: bool,
}

/// Arguments for the parse subcommand.
#[derive(clap::Args)]
struct ParseArgs {
    /// Input collections file.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// Input collections file.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

impl RenderArgs {
    /// Settle `--out-dir` against `--base-dir`.
    ///
    /// An explicit `--base-dir` drops an `out_dir` that came from
    /// `CELLPLOT_OUT_DIR`. Both flags on the command line is a usage error.
    fn settle_output_dirs(
        &mut self,
        out_dir_source: Option<ValueSource>,
    ) -> Result<(), &'static str> {
        if self.base_dir.is_none() || self.out_dir.is_none() {
            return Ok(());
        }
        if out_dir_source == Some(ValueSource::EnvVariable) {
            log::debug!("--base-dir given; ignoring CELLPLOT_OUT_DIR");
            self.out_dir = None;
            Ok(())
        } else {
            Err("the argument '--out-dir <OUT_DIR>' cannot be used with '--base-dir <BASE_DIR>'")
        }
    }
}

/// Run the cellplot CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CellplotError> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    match cli.command {
        Some(Commands::Render(mut args)) => {
            let out_dir_source = matches
                .subcommand_matches("render")
                .and_then(|sub| sub.value_source("out_dir"));
            if let Err(msg) = args.settle_output_dirs(out_dir_source) {
                Cli::command().error(ErrorKind::ArgumentConflict, msg).exit();
            }
            run_render(args)
        }
        Some(Commands::Parse(args)) => run_parse(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            println!("cellplot {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Render rectangle collections as unit-cell images.");
            println!();
            println!("Run 'cellplot --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the render subcommand.
fn run_render(args: RenderArgs) -> Result<(), CellplotError> {
    let text = read_input(&args.input)?;

    if args.strict {
        let report = validation::check_text(&text);
        if !report.passes(true) {
            print!("{}", report);
        }
        validation::enforce(report, &CheckOptions { strict: true })?;
    }

    let collections = cells::parse_collections(&text);
    println!("Parsing completed: {} collections found.", collections.len());

    let renderer = match render::detect(RenderOptions::default()) {
        Capability::Available(renderer) => renderer,
        Capability::Unavailable { reason } => {
            println!("Image rendering is unavailable ({reason}). Skipping image generation.");
            return Ok(());
        }
    };

    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => {
            let base = args
                .base_dir
                .unwrap_or_else(|| input_dir(&args.input).to_path_buf());
            output::timestamped_dir(&base)
        }
    };

    let summary = render::render_collections(
        renderer.as_ref(),
        &collections,
        &out_dir,
        &args.prefix,
        |event| match event {
            RenderEvent::Saved { path, .. } => println!("[OK] Saved image: {}", path.display()),
            RenderEvent::Skipped(failure) => {
                eprintln!("[SKIP] {}: {}", failure.path.display(), failure.error)
            }
        },
    )?;

    println!("[OK] Output folder: {}", summary.out_dir.display());

    Ok(())
}

/// Execute the parse subcommand.
fn run_parse(args: ParseArgs) -> Result<(), CellplotError> {
    let collections = cells::read_collections(&args.input)?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&collections)?),
        "text" => {
            println!("{} collection(s)", collections.len());
            for (idx, collection) in collections.iter().enumerate() {
                let cells: Vec<String> = collection
                    .iter()
                    .map(|c| format!("({},{})", c.x, c.y))
                    .collect();
                println!(
                    "  #{} [{} cell(s)]: {}",
                    idx + 1,
                    collection.len(),
                    cells.join(" ")
                );
            }
        }
        other => {
            return Err(CellplotError::UnsupportedOutput(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), CellplotError> {
    let report = validation::check_file(&args.input)?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print!("{}", report),
        other => {
            return Err(CellplotError::UnsupportedOutput(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    validation::enforce(
        report,
        &CheckOptions {
            strict: args.strict,
        },
    )?;
    Ok(())
}

/// `render` needs the raw text for both the strict check and parsing.
fn read_input(path: &Path) -> Result<String, CellplotError> {
    fs::read_to_string(path).map_err(|source| CellplotError::InputRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory holding the input file; `.` for a bare file name.
fn input_dir(input: &Path) -> &Path {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_args(out_dir: Option<&str>, base_dir: Option<&str>) -> RenderArgs {
        RenderArgs {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: out_dir.map(PathBuf::from),
            base_dir: base_dir.map(PathBuf::from),
            prefix: output::DEFAULT_PREFIX.to_string(),
            strict: false,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_dir_defaults_to_cwd() {
        assert_eq!(input_dir(Path::new("input.txt")), Path::new("."));
        assert_eq!(input_dir(Path::new("data/input.txt")), Path::new("data"));
    }

    #[test]
    fn base_dir_overrides_out_dir_from_env() {
        let mut args = render_args(Some("env_out"), Some("runs"));
        args.settle_output_dirs(Some(ValueSource::EnvVariable))
            .expect("env value yields");
        assert_eq!(args.out_dir, None);
        assert_eq!(args.base_dir, Some(PathBuf::from("runs")));
    }

    #[test]
    fn out_dir_and_base_dir_flags_conflict() {
        let mut args = render_args(Some("out"), Some("runs"));
        assert!(args
            .settle_output_dirs(Some(ValueSource::CommandLine))
            .is_err());
    }

    #[test]
    fn single_output_option_is_untouched() {
        let mut args = render_args(Some("env_out"), None);
        args.settle_output_dirs(Some(ValueSource::EnvVariable))
            .expect("nothing to settle");
        assert_eq!(args.out_dir, Some(PathBuf::from("env_out")));
    }
}
