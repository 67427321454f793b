// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal Management - Shared terminal setup and cleanup procedures
//!
//! This module provides shared functionality for setting up and cleaning up
//! the terminal for the dashboard: raw mode, alternate screen and signal
//! handlers, with a single idempotent teardown path.

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io, panic,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

// External dependencies
use ctrlc;

// Global flag to ensure cleanup only happens once
static CLEANUP_DONE: AtomicBool = AtomicBool::new(false);

// Track what we modified so we can restore properly
static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALTERNATE_SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Terminal setup configuration
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Enable raw mode
    pub raw_mode: bool,
    /// Enter alternate screen
    pub alternate_screen: bool,
    /// Install signal handlers for graceful shutdown
    pub install_signal_handlers: bool,
    /// Running flag to control application lifecycle (used by signal handlers)
    pub running_flag: Option<Arc<AtomicBool>>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            raw_mode: true,
            alternate_screen: true,
            install_signal_handlers: true,
            running_flag: None,
        }
    }
}

impl TerminalConfig {
    /// Set the running flag for signal handlers
    pub fn with_running_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.running_flag = Some(flag);
        self
    }
}

/// Setup terminal for TUI with the specified configuration
pub fn setup_terminal(config: TerminalConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();

    if config.raw_mode {
        crossterm::terminal::enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);
    }

    if config.alternate_screen {
        stdout.execute(EnterAlternateScreen)?;
        ALTERNATE_SCREEN_ACTIVE.store(true, Ordering::SeqCst);
    }

    // Install signal handlers if requested
    if config.install_signal_handlers {
        if let Some(running_flag) = &config.running_flag {
            let r = running_flag.clone();
            ctrlc::set_handler(move || {
                cleanup_terminal();
                r.store(false, Ordering::SeqCst);
            })?;
        } else {
            ctrlc::set_handler(|| {
                cleanup_terminal();
            })?;
        }

        // Restore the terminal before the default hook prints the panic
        let default_panic = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            cleanup_terminal();
            default_panic(panic_info);
        }));
    }

    Ok(())
}

/// Cleanup terminal after TUI
pub fn cleanup_terminal() {
    if CLEANUP_DONE.swap(true, Ordering::SeqCst) {
        return; // Already cleaned up
    }

    let mut stdout = io::stdout();

    // Disable raw mode first
    if RAW_MODE_ENABLED.load(Ordering::SeqCst) {
        let _ = crossterm::terminal::disable_raw_mode();
        RAW_MODE_ENABLED.store(false, Ordering::SeqCst);
    }

    // Leave alternate screen last
    if ALTERNATE_SCREEN_ACTIVE.load(Ordering::SeqCst) {
        let _ = stdout.execute(LeaveAlternateScreen);
        ALTERNATE_SCREEN_ACTIVE.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enables_the_full_setup() {
        let config = TerminalConfig::default();
        assert!(config.raw_mode);
        assert!(config.alternate_screen);
        assert!(config.install_signal_handlers);
        assert!(config.running_flag.is_none());
    }

    #[test]
    fn running_flag_is_attached_by_the_builder() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = TerminalConfig::default().with_running_flag(flag.clone());
        assert!(Arc::ptr_eq(config.running_flag.as_ref().unwrap(), &flag));
    }
}
