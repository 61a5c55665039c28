//! onepager CLI - Status Report Synthesis
//!
//! Command-line interface for turning a sheet export and meeting notes into
//! a one-page status report.
//!
//! ## Exit Codes
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Report written |
//! | 1 | Missing dataset, unreadable input or invalid config |

mod config;
mod sources;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use onepager_core::{generate_report, ColumnMapping, Report, ReportRenderer};
use onepager_render::{JsonRenderer, MarkdownRenderer, SlideOutlineRenderer, TextRenderer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{Config, OutputFormat};

// ============================================================================
// Exit Code
// ============================================================================

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    /// Report generated (or sheet inspected)
    Success = 0,
    /// Validation or input failure
    Failure = 1,
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser)]
#[command(name = "onepager")]
#[command(author, version, about = "One-page status report generator", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a status report from a sheet export and meeting notes
    Generate(GenerateArgs),

    /// Show a sheet's name, row count and column titles
    Inspect {
        /// Sheet export (JSON)
        #[arg(long, value_name = "FILE", env = "ONEPAGER_SHEET")]
        sheet: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Sheet export (JSON)
    #[arg(long, value_name = "FILE", env = "ONEPAGER_SHEET")]
    sheet: Option<PathBuf>,

    /// Meeting notes text file
    #[arg(long, value_name = "FILE", env = "ONEPAGER_NOTES")]
    notes: Option<PathBuf>,

    /// Narrative tone: executive, team, detailed, custom (anything else: default)
    #[arg(long, env = "ONEPAGER_TONE")]
    tone: Option<String>,

    /// Opening phrase for the custom tone
    #[arg(long, value_name = "TEXT")]
    custom_tone: Option<String>,

    /// Topic to emphasize in the narrative
    #[arg(long, value_name = "TEXT")]
    emphasis: Option<String>,

    /// Column holding the key result (item name)
    #[arg(long, value_name = "COLUMN")]
    key_result: Option<String>,

    /// Column holding the status
    #[arg(long, value_name = "COLUMN")]
    status: Option<String>,

    /// Column holding the week-over-week delta
    #[arg(long, value_name = "COLUMN")]
    delta: Option<String>,

    /// Column holding blockers
    #[arg(long, value_name = "COLUMN")]
    blockers: Option<String>,

    /// Column holding the owner
    #[arg(long, value_name = "COLUMN")]
    owner: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Wrap text output at this width
    #[arg(long, value_name = "COLUMNS")]
    wrap: Option<usize>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to ./onepager.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Flags as the top settings layer
    fn to_config(&self) -> Config {
        Config {
            sheet: self.sheet.clone(),
            notes: self.notes.clone(),
            tone: self.tone.clone(),
            custom_tone: self.custom_tone.clone(),
            emphasis: self.emphasis.clone(),
            format: self.format,
            wrap: self.wrap,
            columns: ColumnMapping {
                key_result: self.key_result.clone(),
                status: self.status.clone(),
                delta: self.delta.clone(),
                blockers: self.blockers.clone(),
                owner: self.owner.clone(),
            },
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn main() -> process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate(args) => cmd_generate(&args),
        Commands::Inspect { sheet } => cmd_inspect(&sheet),
    };

    match result {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::Failure.into()
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn cmd_generate(args: &GenerateArgs) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Could not determine working directory")?;
    let settings = Config::discover(args.config.as_deref(), &cwd)?.merge(args.to_config());

    let dataset = settings
        .sheet
        .as_deref()
        .map(sources::load_dataset)
        .transpose()?;
    let notes = settings
        .notes
        .as_deref()
        .map(sources::load_notes)
        .transpose()?
        .unwrap_or_default();

    let report = generate_report(dataset.as_ref(), &settings.to_request(notes))?;
    let rendered = render(&report, &settings)?;

    match &args.output {
        Some(path) => write_output(path, &rendered)?,
        None => print!("{}", rendered),
    }

    Ok(ExitCode::Success)
}

fn render(report: &Report, settings: &Config) -> Result<String> {
    let output = match settings.format() {
        OutputFormat::Text => {
            let mut renderer = TextRenderer::new();
            if let Some(width) = settings.wrap {
                renderer = renderer.wrap_width(width);
            }
            renderer.render(report)?
        }
        OutputFormat::Markdown => MarkdownRenderer::new().render(report)?,
        OutputFormat::Slides => SlideOutlineRenderer::new().render(report)?,
        OutputFormat::Json => JsonRenderer::new().render(report)?,
    };
    Ok(output)
}

fn write_output(path: &Path, rendered: &str) -> Result<()> {
    std::fs::write(path, rendered).with_context(|| format!("Could not write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote report");
    println!("Wrote: {}", path.display());
    Ok(())
}

fn cmd_inspect(sheet: &Path) -> Result<ExitCode> {
    let dataset = sources::load_dataset(sheet)?;

    println!("{}", dataset.summary());
    println!("Top-level rows: {}", dataset.top_level_rows().count());
    println!("Columns:");
    for column in &dataset.columns {
        println!("  {}", column.title);
    }

    Ok(ExitCode::Success)
}
