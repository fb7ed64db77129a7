//! CLI configuration: thin wrapper around `fabricmap_config`.
//!
//! Re-exports the shared types and resolves the effective settings, with
//! command-line flags taking priority over config and environment.

use std::path::PathBuf;

use clap::ValueEnum;

use fabricmap_core::LayoutOptions;

use crate::cli::{ColorMode, GlobalOpts, LayoutArgs, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use fabricmap_config::{Config, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// `--config` / `FABRICMAP_CONFIG` if given, else the platform location.
pub fn active_config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(fabricmap_config::config_path)
}

/// Load config for the active path. A missing file yields defaults.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config_from(&active_config_path(global))?)
}

/// Effective output and color choices for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Presentation {
    pub output: OutputFormat,
    pub color: ColorMode,
    pub quiet: bool,
}

/// Merge global flags over config defaults.
pub fn presentation(global: &GlobalOpts, cfg: &Config) -> Result<Presentation, CliError> {
    let output = match global.output {
        Some(format) => format,
        None => parse_enum("defaults.output", &cfg.defaults.output)?,
    };
    let color = match global.color {
        Some(mode) => mode,
        None => parse_enum("defaults.color", &cfg.defaults.color)?,
    };
    Ok(Presentation {
        output,
        color,
        quiet: global.quiet,
    })
}

fn parse_enum<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("unrecognized value '{raw}'"),
    })
}

/// Engine options from config, overridden by `layout` flags.
pub fn layout_options(cfg: &Config, args: &LayoutArgs) -> Result<LayoutOptions, CliError> {
    let mut settings = cfg.layout.clone();
    if let Some(padding) = args.padding {
        settings.padding = padding;
    }
    if args.no_top_margin {
        settings.single_ap_top_margin = 0.0;
    }
    Ok(settings.to_options()?)
}
