//! CLI argument definitions.

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Lab sticker sheets: render up to ten stickers onto an A4 PDF and keep the
/// results in a dated document store.
///
/// Robot Mode: use --robot or --format json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "stickers", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "STICKERS_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Settings file (TOML or YAML)
    #[arg(long, short = 'c', global = true, env = "STICKERS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a sticker sheet from a JSON, YAML or TOML file
    Render(RenderArgs),

    // === Document store ===
    /// Store an existing PDF in the document store
    Save(SaveArgs),

    /// Read a stored document back
    Load(LoadArgs),

    /// Delete a stored document
    Delete(DeleteArgs),

    /// Issue the next lab reference number
    Refno(RefnoArgs),

    /// Show or create the settings file
    Config(ConfigArgs),

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

/// Arguments for rendering a sheet.
///
/// # Examples
///
/// ```bash
/// # Write the sheet next to the input
/// stickers render batch.yaml -o batch.pdf
///
/// # Render and keep it in the document store
/// stickers render batch.json --store
///
/// # Put the same logo on every sticker
/// stickers render batch.toml --logo lab.png -o out.pdf
/// ```
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Sticker list: a bare list of records or `{ stickers: [...] }`
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the PDF to this file ("-" for stdout)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save the PDF in the document store
    #[arg(long)]
    pub store: bool,

    /// Logo image applied to every sticker
    #[arg(long, value_name = "IMAGE")]
    pub logo: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// PDF file to store
    pub pdf: PathBuf,
}

#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Path relative to the storage root, as returned by save
    pub relative: String,

    /// Write the bytes to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Path relative to the storage root
    pub relative: String,
}

#[derive(Parser, Debug)]
pub struct RefnoArgs {
    /// Last issued number; omitted means none issued yet
    #[arg(long)]
    pub last: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Write a commented default settings file
    Init {
        /// Target file (defaults to the platform config location)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
    /// Print where settings are read from
    Path,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
