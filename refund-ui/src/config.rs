//! Calculator settings.
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags. Every key is optional.
//!
//! ```toml
//! policy = "max-with-reason"
//! layout = "aligned"
//! theme = "dark"
//! confirm_quit = true
//! log_level = "info"
//! log_file = "refund.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use refund_core::PolicyVariant;
use serde::Deserialize;
use tracing::debug;

use crate::themes::ThemeMode;
use crate::views::SummaryLayout;

/// Log filter used when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Non-refundable policy to compute with.
    pub policy: PolicyVariant,

    /// Summary layout; follows the policy when unset.
    pub layout: Option<SummaryLayout>,

    pub theme: ThemeMode,

    /// Ask before closing the calculator.
    pub confirm_quit: bool,

    /// Any `EnvFilter` directive, e.g. `"info"` or `"refund_core=debug"`.
    pub log_level: String,

    /// Append log records to this file as well as the console.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            policy: PolicyVariant::default(),
            layout: None,
            theme: ThemeMode::default(),
            confirm_quit: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Parses settings from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid calculator settings")
    }

    /// Reads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("in config file '{}'", path.display()))?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// The layout to render with: the configured one, or the policy's own.
    pub fn effective_layout(&self) -> SummaryLayout {
        self.layout
            .unwrap_or_else(|| SummaryLayout::for_policy(self.policy))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.policy, PolicyVariant::MaxWithReason);
        assert!(config.confirm_quit);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn parses_every_key() {
        let config = AppConfig::from_toml_str(
            r#"
            policy = "threshold"
            layout = "columns"
            theme = "dark"
            confirm_quit = false
            log_level = "debug"
            log_file = "refund.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.policy, PolicyVariant::Threshold);
        assert_eq!(config.layout, Some(SummaryLayout::Columns));
        assert_eq!(config.theme, ThemeMode::Dark);
        assert!(!config.confirm_quit);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("refund.log")));
    }

    #[test]
    fn policy_accepts_release_tag() {
        let config = AppConfig::from_toml_str(r#"policy = "1.3.3""#).unwrap();

        assert_eq!(config.policy, PolicyVariant::Additive);
    }

    #[test]
    fn layout_defaults_to_policy_release() {
        let config = AppConfig::from_toml_str(r#"policy = "1.01""#).unwrap();

        assert_eq!(config.effective_layout(), SummaryLayout::Classic);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(AppConfig::from_toml_str("colour = \"red\"").is_err());
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(AppConfig::from_toml_str(r#"policy = "greedy""#).is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = \"teal\"").unwrap();

        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.theme, ThemeMode::Teal);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/refund.toml")).unwrap_err();

        assert!(err.to_string().contains("cannot read config file"));
    }
}
