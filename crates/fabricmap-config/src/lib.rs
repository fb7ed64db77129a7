//! Shared configuration for fabricmap tools.
//!
//! TOML settings merged with `FABRICMAP_*` environment overrides, plus the
//! translation to `fabricmap_core::LayoutOptions`. The CLI layers its own
//! flag overrides on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fabricmap_core::LayoutOptions;

/// Prefix for environment overrides; nested keys use `__`
/// (`FABRICMAP_LAYOUT__PADDING=24`).
pub const ENV_PREFIX: &str = "FABRICMAP_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Output and color defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,

    /// Canvas tunables handed to the layout engine.
    #[serde(default)]
    pub layout: LayoutSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayoutSettings {
    /// Canvas margin around the outermost node centers.
    #[serde(default = "default_padding")]
    pub padding: f64,

    /// Extra top margin for single-AP sites; `0` disables it.
    #[serde(default = "default_single_ap_top_margin")]
    pub single_ap_top_margin: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            single_ap_top_margin: default_single_ap_top_margin(),
        }
    }
}

fn default_padding() -> f64 {
    40.0
}
fn default_single_ap_top_margin() -> f64 {
    40.0
}

impl LayoutSettings {
    /// Validate and convert into engine options.
    pub fn to_options(&self) -> Result<LayoutOptions, ConfigError> {
        check_non_negative("layout.padding", self.padding)?;
        check_non_negative("layout.single_ap_top_margin", self.single_ap_top_margin)?;
        Ok(LayoutOptions {
            padding: self.padding,
            single_ap_top_margin: (self.single_ap_top_margin > 0.0)
                .then_some(self.single_ap_top_margin),
        })
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected a finite, non-negative number, got {value}"),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fabricmap", "fabricmap").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fabricmap");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file at `path` (if present), then environment.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from an explicit file + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [defaults]
                output = "json"

                [layout]
                padding = 12.5
                "#,
            )?;
            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.defaults.output, "json");
            assert_eq!(cfg.defaults.color, "auto");
            assert_eq!(cfg.layout.padding, 12.5);
            assert_eq!(cfg.layout.single_ap_top_margin, 40.0);
            Ok(())
        });
    }

    #[test]
    fn environment_beats_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[layout]\npadding = 12.5\n")?;
            jail.set_env("FABRICMAP_LAYOUT__PADDING", "64.0");
            jail.set_env("FABRICMAP_DEFAULTS__COLOR", "never");
            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.layout.padding, 64.0);
            assert_eq!(cfg.defaults.color, "never");
            Ok(())
        });
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            defaults: Defaults {
                output: "yaml".into(),
                color: "always".into(),
            },
            layout: LayoutSettings {
                padding: 8.0,
                single_ap_top_margin: 0.0,
            },
        };
        save_config_to(&path, &cfg).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[layout]"), "{text}");
        let loaded: Config = toml::from_str(&text).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn zero_margin_disables_the_nudge() {
        let settings = LayoutSettings {
            padding: 10.0,
            single_ap_top_margin: 0.0,
        };
        let options = settings.to_options().unwrap();
        assert_eq!(options.padding, 10.0);
        assert_eq!(options.single_ap_top_margin, None);

        let defaults = LayoutSettings::default().to_options().unwrap();
        assert_eq!(defaults, LayoutOptions::default());
    }

    #[test]
    fn negative_padding_is_rejected() {
        let settings = LayoutSettings {
            padding: -1.0,
            ..LayoutSettings::default()
        };
        let err = settings.to_options().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "layout.padding"));
    }
}
