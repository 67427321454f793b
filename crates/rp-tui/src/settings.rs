// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dashboard settings loaded from the user's configuration directory.
//!
//! Command-line flags overlay these values; the file only fills in what
//! the user left unset.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use rp_core::RangePreset;
use rp_logging::LoggingConfig;

/// Persistent dashboard configuration (`settings.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Server URL for the analytics REST API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Bearer token used when talking to the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Initial date-range preset label ("7d", "30d", "90d", "1y")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,

    /// Logging defaults, overridden by explicit CLI flags
    pub logging: LoggingConfig,
}

impl Settings {
    /// Standard settings path: `<config dir>/repopulse/settings.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("repopulse").join("settings.toml"))
    }

    /// Load settings from the standard location, falling back to defaults
    /// when the file does not exist.
    pub fn load_default() -> anyhow::Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Resolve the initial range preset, with default fallback
    pub fn initial_preset(&self) -> RangePreset {
        self.default_range
            .as_deref()
            .and_then(preset_from_label)
            .unwrap_or_default()
    }
}

/// Match a range preset by its display label.
pub fn preset_from_label(label: &str) -> Option<RangePreset> {
    RangePreset::ALL.iter().copied().find(|preset| preset.label() == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn loading_a_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn settings_parse_from_kebab_case_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "server-url = \"https://analytics.example.dev\"").unwrap();
        writeln!(file, "default-range = \"90d\"").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "log-level = \"debug\"").unwrap();
        drop(file);

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(
            settings.server_url.as_deref(),
            Some("https://analytics.example.dev")
        );
        assert_eq!(settings.initial_preset(), RangePreset::Days90);
        assert!(settings.auth_token.is_none());
        assert_eq!(
            settings.logging.log_level,
            Some(rp_logging::CliLogLevel::Debug)
        );
    }

    #[test]
    fn unknown_labels_fall_back_to_the_default_preset() {
        let settings = Settings {
            default_range: Some("two-fortnights".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.initial_preset(), RangePreset::Days30);
    }

    #[test]
    fn every_preset_label_round_trips() {
        for preset in RangePreset::ALL {
            assert_eq!(preset_from_label(preset.label()), Some(preset));
        }
    }
}
