// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dashboard Loop - Main application event loop and rendering
//!
//! This module contains the main event loop for the TUI dashboard. It
//! forwards user input and settled-query notifications to the view model
//! and redraws when the model marks itself dirty. Dependencies are
//! injected, making this module independent of a specific API client.

use crossbeam_channel as chan;
use crossterm::event::{Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};
use tracing::debug;

use crate::{
    terminal::{self, TerminalConfig},
    view::{self, TuiDependencies},
    view_model::{Msg, ViewModel},
};

/// Run the dashboard application with injected dependencies
pub async fn run_dashboard(deps: TuiDependencies) -> Result<(), Box<dyn std::error::Error>> {
    // Install signal handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));

    // Setup terminal with signal handlers
    terminal::setup_terminal(TerminalConfig::default().with_running_flag(running.clone()))?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

    // Queries settle through this channel; the view model owns the sender
    // and hands clones to every spawned fetch.
    let (tx_msg, rx_msg) = chan::unbounded::<Msg>();
    let mut view_model = ViewModel::new(deps.client, deps.cache, deps.initial_preset, tx_msg);

    // Create channels for event handling
    let (tx_ev, rx_ev) = chan::unbounded::<Event>();

    // Use coalescing tick channel that never builds a backlog
    let rx_tick = chan::tick(Duration::from_millis(16));

    // Event reader thread
    thread::spawn(move || {
        while let Ok(ev) = crossterm::event::read() {
            // Send event to main thread
            let _ = tx_ev.send(ev);
        }
    });

    // Main event loop
    loop {
        // Check if we should exit due to interrupt signal
        if !running.load(Ordering::SeqCst) {
            break;
        }

        // Use biased select to prefer input events over settlements and ticks
        chan::select_biased! {
            recv(rx_ev) -> msg => {
                let event = match msg {
                    Ok(event) => event,
                    Err(_) => break,
                };

                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        debug!(
                            key_code = ?key.code,
                            modifiers = ?key.modifiers,
                            "Key event received in dashboard"
                        );
                        view_model.update(Msg::Key(key));
                    }
                    Event::Resize(_width, _height) => {
                        let _ = terminal.autoresize();
                        view_model.needs_redraw = true; // Force redraw on resize
                    }
                    _ => {}
                }
            }
            recv(rx_msg) -> msg => {
                match msg {
                    Ok(msg) => view_model.update(msg),
                    Err(_) => break,
                }
            }
            recv(rx_tick) -> _ => {
                view_model.update(Msg::Tick);
            }
        }

        if view_model.take_exit_request() {
            break;
        }

        // Only redraw if the handled message actually changed something
        if view_model.needs_redraw {
            terminal.draw(|frame| {
                view::render(frame, &view_model);
            })?;
            view_model.needs_redraw = false;
        }
    }

    // Ensure cleanup happens
    terminal::cleanup_terminal();

    Ok(())
}
