//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fabricmap_config::ConfigError;
use fabricmap_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    /// Malformed input document (sysexits `EX_DATAERR`).
    pub const INPUT: i32 = 65;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────

    #[error("Could not read {path}")]
    #[diagnostic(
        code(fabricmap::read_failed),
        help("Check that the file exists and is readable, or pass `-` to read stdin.")
    )]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid graph in {path}: {message}")]
    #[diagnostic(
        code(fabricmap::invalid_graph),
        help(
            "Expected a JSON object with `nodes` and `links` arrays.\n\
             Each node needs an `id` (or `serial`); each link a `source` and `target`."
        )
    )]
    InvalidGraph { path: String, message: String },

    #[error("Invalid device metadata in {path}: {message}")]
    #[diagnostic(
        code(fabricmap::invalid_metadata),
        help(
            "Expected a JSON object keyed by device serial.\n\
             Each entry may carry `model`, `name` and `productType`."
        )
    )]
    InvalidMetadata { path: String, message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Node '{identifier}' not found in the graph")]
    #[diagnostic(
        code(fabricmap::not_found),
        help("Run: fabricmap classify --graph <GRAPH> -o plain to list node ids")
    )]
    NodeNotFound { identifier: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fabricmap::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(fabricmap::config_exists),
        help("Use --force to overwrite it, or edit the file directly.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(fabricmap::config),
        help("Check the config file and FABRICMAP_* environment variables.")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(fabricmap::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(fabricmap::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to encode config: {0}")]
    #[diagnostic(code(fabricmap::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ReadFailed { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                exit_code::NOT_FOUND
            }
            Self::NodeNotFound { .. } => exit_code::NOT_FOUND,
            Self::InvalidGraph { .. } | Self::InvalidMetadata { .. } => exit_code::INPUT,
            Self::Validation { .. }
            | Self::ConfigExists { .. }
            | Self::Config(ConfigError::Validation { .. }) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the source path to a core decoding error.
    pub fn from_core(err: CoreError, path: &str) -> Self {
        match err {
            CoreError::InvalidGraph { message } => Self::InvalidGraph {
                path: path.into(),
                message,
            },
            CoreError::InvalidMetadata { message } => Self::InvalidMetadata {
                path: path.into(),
                message,
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_core(err, "<input>")
    }
}
