//! Clap derive structures for the `fabricmap` CLI.
//!
//! Defines the command tree, global flags, and shared types. Only clap and
//! clap_complete may be referenced here; `build.rs` includes this file
//! directly to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fabricmap -- deterministic topology layouts for network device graphs
#[derive(Debug, Parser)]
#[command(
    name = "fabricmap",
    version,
    about = "Lay out network device topologies from the command line",
    long_about = "Turns a network topology (a device/link graph) into a hierarchical,\n\
        non-overlapping drawing.\n\n\
        Input is a JSON document with `nodes` and `links`; output is node\n\
        positions, cubic link curves and canvas bounds.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "FABRICMAP_CONFIG", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "FABRICMAP_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute node positions and link curves for a graph
    #[command(alias = "l")]
    Layout(LayoutArgs),

    /// Print the spanning tree the layout is built from
    #[command(alias = "t")]
    Tree(TreeArgs),

    /// Show which device kind a record classifies as
    #[command(alias = "c")]
    Classify(ClassifyArgs),

    /// Inspect and initialize configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INPUT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GraphInput {
    /// Graph JSON file (`-` reads stdin)
    #[arg(value_name = "GRAPH")]
    pub graph: PathBuf,

    /// Device metadata JSON, keyed by serial
    #[arg(long, short = 'm', value_name = "FILE")]
    pub metadata: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LAYOUT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub input: GraphInput,

    /// Show link curves instead of nodes (table/plain output)
    #[arg(long)]
    pub links: bool,

    /// Canvas padding (overrides config)
    #[arg(long, value_name = "UNITS")]
    pub padding: Option<f64>,

    /// Disable the extra top margin for single-AP sites
    #[arg(long)]
    pub no_top_margin: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TREE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub input: GraphInput,

    /// Start printing at this node instead of the root
    #[arg(long, value_name = "ID")]
    pub from: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CLASSIFY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Classify every node of a graph file instead of a single record
    #[arg(long, value_name = "GRAPH", conflicts_with_all = ["model", "label", "name", "node_type", "product_type", "tags"])]
    pub graph: Option<PathBuf>,

    /// Model identifier (e.g. MR36, MS120-8)
    #[arg(long)]
    pub model: Option<String>,

    /// Display label
    #[arg(long)]
    pub label: Option<String>,

    /// Device name
    #[arg(long)]
    pub name: Option<String>,

    /// Declared node type
    #[arg(long = "type", value_name = "TYPE")]
    pub node_type: Option<String>,

    /// Product type hint (repeatable)
    #[arg(long, value_name = "HINT")]
    pub product_type: Vec<String>,

    /// Free-form tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
