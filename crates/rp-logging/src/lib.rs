// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized logging utilities for RepoPulse
//!
//! This crate provides standardized logging initialization and utilities
//! to ensure consistent logging behavior across all RepoPulse components.
//! The terminal dashboard always logs to a file so tracing output never
//! corrupts the alternate screen.

pub mod logging_config;

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Re-export clap for convenience when using CliLoggingArgs
pub use clap;

// Re-export Level for convenience
pub use tracing::Level;

pub use logging_config::LoggingConfig;

/// Output format for log messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable plaintext format
    #[default]
    Plaintext,
    /// Structured JSON format
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Plaintext => write!(f, "plaintext"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plaintext" => Ok(LogFormat::Plaintext),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Invalid log format: {}. Use 'plaintext' or 'json'",
                s
            )),
        }
    }
}

/// CLI log level enum for clap integration
///
/// This enum provides a standardized way to specify log levels via command-line arguments.
/// It integrates with clap's ValueEnum for automatic help text and validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliLogLevel {
    /// Only error conditions
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings, and informational messages
    Info,
    /// All above plus debug information
    Debug,
    /// All above plus detailed tracing
    Trace,
}

impl Default for CliLogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliLogLevel::Error => write!(f, "error"),
            CliLogLevel::Warn => write!(f, "warn"),
            CliLogLevel::Info => write!(f, "info"),
            CliLogLevel::Debug => write!(f, "debug"),
            CliLogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Standardized CLI logging arguments for clap integration
///
/// This struct provides logging-related command-line arguments that follow the RepoPulse
/// logging policy. Use this with `#[command(flatten)]` in your clap structs for consistent
/// logging CLI across all binaries.
///
/// TUI binaries automatically log to file. Other binaries log to console by default,
/// but log to file when --log-file or --log-dir is specified.
#[derive(Clone, Debug, Default, clap::Args, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliLoggingArgs {
    /// Log verbosity level
    #[arg(long, value_enum, help = "Log verbosity level (default: info)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<CliLogLevel>,

    /// Log output format
    #[arg(long, value_enum, help = "Log output format (default: plaintext)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,

    /// Directory for log files
    #[arg(long, help = "Directory for log files (default: platform specific)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Log filename
    #[arg(long, help = "Log filename")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Overlay settings-file values onto the parsed CLI arguments
    ///
    /// Explicit command-line flags always win; the settings file only fills
    /// fields the user left unset.
    pub fn merged_with(mut self, config: &LoggingConfig) -> Self {
        self.log_level = self.log_level.or(config.log_level);
        self.log_format = self.log_format.or(config.log_format);
        if self.log_dir.is_none() {
            self.log_dir = config.log_dir.clone();
        }
        if self.log_file.is_none() {
            self.log_file = config.log_file.clone();
        }
        self
    }

    /// Initialize logging based on the parsed CLI arguments
    ///
    /// This method automatically determines whether to log to console or file based on:
    /// - TUI binaries: Always log to file
    /// - Other binaries: Log to console, unless file options (--log-file or --log-dir) are provided
    ///
    /// # Arguments
    /// * `component` - The component name (e.g., "repopulse")
    /// * `is_tui` - Whether this is a TUI application (always logs to file)
    ///
    /// # Examples
    /// ```rust,no_run
    /// use rp_logging::CliLoggingArgs;
    /// use clap::Parser;
    ///
    /// #[derive(Parser)]
    /// struct Args {
    ///     #[command(flatten)]
    ///     logging: CliLoggingArgs,
    /// }
    ///
    /// fn main() -> anyhow::Result<()> {
    ///     let args = Args::parse();
    ///     // For TUI apps: always log to file
    ///     args.logging.init("my-tui", true)?;
    ///     Ok(())
    /// }
    /// ```
    pub fn init(self, component: &str, is_tui: bool) -> anyhow::Result<()> {
        self.init_with_default_level(component, is_tui, CliLogLevel::Info)
    }

    pub fn init_with_default_level(
        self,
        component: &str,
        is_tui: bool,
        default_level: CliLogLevel,
    ) -> anyhow::Result<()> {
        let level = self.log_level.unwrap_or(default_level).into();

        // Determine if we should log to file
        let should_log_to_file = is_tui || self.log_file.is_some() || self.log_dir.is_some();

        if should_log_to_file {
            // File logging
            let log_path = self.resolve_log_path(component);
            init_to_file(
                component,
                level,
                self.log_format.unwrap_or(LogFormat::Plaintext),
                &log_path,
            )
        } else {
            // Console logging
            init(
                component,
                level,
                self.log_format.unwrap_or(LogFormat::Plaintext),
            )
        }
    }

    /// Resolve the complete log file path based on CLI arguments
    ///
    /// Follows the RepoPulse policy for log path resolution:
    /// 1. If `log_file` contains absolute path, use it directly
    /// 2. If `log_file` contains relative path with directory, append to `log_dir`
    /// 3. If `log_file` is just a filename, combine with `log_dir`
    /// 4. If no custom path specified, use platform standard location
    fn resolve_log_path(&self, component: &str) -> std::path::PathBuf {
        if let Some(log_file) = &self.log_file {
            let log_file_path = std::path::Path::new(log_file);

            // If log_file contains a directory component
            if let Some(parent) = log_file_path.parent() {
                if parent.is_absolute() {
                    // If both log_file has absolute path and log_dir is set, use log_file's directory
                    log_file_path.to_path_buf()
                } else {
                    // log_file has relative directory component, append to log_dir
                    if let Some(log_dir) = &self.log_dir {
                        std::path::Path::new(log_dir).join(log_file_path)
                    } else {
                        log_file_path.to_path_buf()
                    }
                }
            } else {
                // log_file is just a filename, combine with log_dir
                if let Some(log_dir) = &self.log_dir {
                    std::path::Path::new(log_dir).join(log_file)
                } else {
                    get_standard_log_path_for_component(component)
                }
            }
        } else {
            // No log_file specified, use default based on log_dir
            if let Some(log_dir) = &self.log_dir {
                std::path::Path::new(log_dir).join(format!("{}.log", component))
            } else {
                get_standard_log_path_for_component(component)
            }
        }
    }
}

/// Get the standard log file path for a specific component
///
/// Similar to `get_standard_log_path()` but includes the component name in the filename.
pub fn get_standard_log_path_for_component(component: &str) -> std::path::PathBuf {
    let base_path = get_standard_log_path();
    let parent = base_path.parent().unwrap_or(std::path::Path::new("/tmp"));
    let filename = format!("{}.log", component);
    parent.join(filename)
}

/// Get the standard log file path for the current OS
///
/// This function provides platform-specific log file paths:
/// - Windows: %APPDATA%\repopulse\repopulse.log
/// - macOS: ~/Library/Logs/repopulse.log
/// - Linux: ~/.local/share/repopulse/repopulse.log
/// - Other: ~/repopulse.log (fallback)
///
/// # Returns
/// A PathBuf containing the appropriate log file path for the current platform
pub fn get_standard_log_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        // Windows: %APPDATA%\repopulse\repopulse.log
        let mut path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"));
        path.push("repopulse");
        path.push("repopulse.log");
        path
    }

    #[cfg(target_os = "macos")]
    {
        // macOS: ~/Library/Logs/repopulse.log
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push("Library");
        path.push("Logs");
        path.push("repopulse.log");
        path
    }

    #[cfg(target_os = "linux")]
    {
        // Linux: ~/.local/share/repopulse/repopulse.log
        let mut path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp")));
        path.push("repopulse");
        path.push("repopulse.log");
        path
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        // Fallback for other OSes
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push("repopulse.log");
        path
    }
}

/// Initialize logging with the specified component name, default level, and format
///
/// # Arguments
/// * `component` - The component name (e.g., "repopulse")
/// * `default_level` - Default log level when RUST_LOG is not set
/// * `format` - Output format for log messages
///
/// # Example
/// ```rust,no_run
/// use rp_logging::{init, Level, LogFormat};
///
/// fn main() -> anyhow::Result<()> {
///     init("repopulse", Level::INFO, LogFormat::Plaintext)?;
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init(component: &str, default_level: Level, format: LogFormat) -> anyhow::Result<()> {
    init_with_writer(component, default_level, format, io::stdout)
}

/// Initialize logging to a file with the specified component name, default level, and format
///
/// # Arguments
/// * `component` - The component name (e.g., "repopulse")
/// * `default_level` - Default log level when RUST_LOG is not set
/// * `format` - Output format for log messages
/// * `log_path` - Path to the log file
pub fn init_to_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
    log_path: &std::path::Path,
) -> anyhow::Result<()> {
    use std::fs;

    // Create parent directory if it doesn't exist
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Create or open the log file
    let log_file = fs::OpenOptions::new().create(true).append(true).open(log_path)?;

    init_with_writer(component, default_level, format, log_file)
}

/// Initialize logging with a custom writer
///
/// # Arguments
/// * `component` - The component name (e.g., "repopulse")
/// * `default_level` - Default log level when RUST_LOG is not set
/// * `format` - Output format for log messages
/// * `writer` - Where to write log output
pub fn init_with_writer<W>(
    component: &str,
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> anyhow::Result<()>
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},{}={}", default_level, component, default_level))
    });

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).json();
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Plaintext => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer);
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("plaintext".parse::<LogFormat>(), Ok(LogFormat::Plaintext));
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_cli_log_level_conversion() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(CliLogLevel::Info), Level::INFO);
        assert_eq!(Level::from(CliLogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_cli_log_level_display() {
        assert_eq!(format!("{}", CliLogLevel::Error), "error");
        assert_eq!(format!("{}", CliLogLevel::Warn), "warn");
        assert_eq!(format!("{}", CliLogLevel::Info), "info");
        assert_eq!(format!("{}", CliLogLevel::Debug), "debug");
        assert_eq!(format!("{}", CliLogLevel::Trace), "trace");
    }

    #[test]
    fn test_cli_log_level_default() {
        let default: CliLogLevel = Default::default();
        assert_eq!(default, CliLogLevel::Info);
    }

    #[test]
    fn test_cli_logging_args_defaults() {
        let args = CliLoggingArgs::default();

        // Non-TUI binary with no file options should log to console
        let is_tui = false;
        let should_log_to_file = is_tui || args.log_file.is_some() || args.log_dir.is_some();
        assert!(!should_log_to_file);

        // TUI binary should always log to file
        let is_tui = true;
        let should_log_to_file_tui = is_tui || args.log_file.is_some() || args.log_dir.is_some();
        assert!(should_log_to_file_tui);

        // Non-TUI with log_file should log to file
        let is_tui = false;
        let args_with_file = CliLoggingArgs {
            log_file: Some("test.log".to_string()),
            ..Default::default()
        };
        let should_log_to_file_with_file =
            is_tui || args_with_file.log_file.is_some() || args_with_file.log_dir.is_some();
        assert!(should_log_to_file_with_file);
    }

    #[test]
    fn test_resolve_log_path_combinations() {
        // Just a filename combines with log_dir
        let args = CliLoggingArgs {
            log_dir: Some("/var/log/repopulse".to_string()),
            log_file: Some("dash.log".to_string()),
            ..Default::default()
        };
        assert_eq!(
            args.resolve_log_path("repopulse"),
            std::path::PathBuf::from("/var/log/repopulse/dash.log")
        );

        // Absolute log_file wins over log_dir
        let args = CliLoggingArgs {
            log_dir: Some("/var/log/repopulse".to_string()),
            log_file: Some("/tmp/override.log".to_string()),
            ..Default::default()
        };
        assert_eq!(
            args.resolve_log_path("repopulse"),
            std::path::PathBuf::from("/tmp/override.log")
        );

        // log_dir alone derives the filename from the component
        let args = CliLoggingArgs {
            log_dir: Some("/var/log/repopulse".to_string()),
            ..Default::default()
        };
        assert_eq!(
            args.resolve_log_path("repopulse"),
            std::path::PathBuf::from("/var/log/repopulse/repopulse.log")
        );
    }

    #[test]
    fn test_merged_with_prefers_cli_flags() {
        let config = LoggingConfig {
            log_level: Some(CliLogLevel::Debug),
            log_format: Some(LogFormat::Json),
            log_dir: Some("/from/config".to_string()),
            log_file: None,
        };

        let args = CliLoggingArgs {
            log_level: Some(CliLogLevel::Warn),
            ..Default::default()
        };
        let merged = args.merged_with(&config);

        // Explicit flag survives, unset fields come from the file
        assert_eq!(merged.log_level, Some(CliLogLevel::Warn));
        assert_eq!(merged.log_format, Some(LogFormat::Json));
        assert_eq!(merged.log_dir.as_deref(), Some("/from/config"));
        assert_eq!(merged.log_file, None);
    }

    #[test]
    fn test_standard_log_path_for_component() {
        let path = get_standard_log_path_for_component("repopulse-demo");
        let path_str = path.to_string_lossy();

        // Should end with repopulse-demo.log
        assert!(path_str.ends_with("repopulse-demo.log"));

        // Should be in the standard log directory
        #[cfg(target_os = "macos")]
        assert!(path_str.contains("Library/Logs"));

        #[cfg(target_os = "linux")]
        assert!(path_str.contains(".local/share"));

        #[cfg(target_os = "windows")]
        assert!(path_str.contains("AppData"));
    }
}
