// Loupe - Interactive Object Inspector
// Copyright (C) 2026 The Loupe Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Terminal User Interface for Loupe
//!
//! This crate provides a terminal-based object inspector: an objects panel
//! listing the backend's global bindings and an inspector panel that shows
//! the selected object through type-specific views.

mod app;
mod backend;
mod config;
mod data;
mod history;
mod inspectors;
mod panels;
mod ui;

pub use app::App;
pub use backend::{sample_heap, BackendHandle, Heap, LocalBackend, Value};
pub use config::Config;
pub use history::NavigationHistory;
pub use inspectors::{Inspector, InspectorKind, InspectorRegistry};
pub use panels::{EventResponse, PanelType};
pub use ui::{BorderPresets, EnhancedBorder, StatusBar};

use crossterm::{
    event::{Event, EventStream, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::Result;
use futures::StreamExt;
use loupe_common::WorkbenchEvent;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::{select, sync::mpsc, time::interval};
use tracing::{debug, info, warn};

use crate::data::DataManager;

/// Configuration for the TUI
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Terminal refresh interval
    pub refresh_interval: Duration,
    /// Explicit config file path, otherwise the default location is used
    pub config_path: Option<std::path::PathBuf>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { refresh_interval: Duration::from_millis(50), config_path: None }
    }
}

/// Main TUI runner that manages the terminal interface and event loop
pub struct Tui {
    /// The main application state and panel management
    app: App,
    /// Terminal backend for rendering and input handling
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    /// Configuration settings for the TUI behavior
    config: TuiConfig,
    /// Shared panel data and backend access
    dm: DataManager,
    /// Receiving end of the workbench event bus
    events: mpsc::UnboundedReceiver<WorkbenchEvent>,
}

impl Tui {
    /// Create a new TUI instance wired to a backend and an event bus.
    ///
    /// `bus` is the sending side handed out to event producers; the
    /// matching receiver is drained by [`Tui::run`].
    pub fn new(
        config: TuiConfig,
        backend: BackendHandle,
        bus: mpsc::UnboundedSender<WorkbenchEvent>,
        events: mpsc::UnboundedReceiver<WorkbenchEvent>,
    ) -> Result<Self> {
        info!("Initializing TUI with config: {:?}", config);

        let app_config = match &config.config_path {
            Some(path) => Config::load_from_path(path.clone())?,
            None => Config::load()?,
        };
        let dm = DataManager::new(&app_config, backend, bus);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self { app: App::new(), terminal, config, dm, events })
    }

    /// Run the main TUI event loop
    pub async fn run(mut self) -> Result<()> {
        info!("Starting TUI event loop");

        // ask for the initial globals listing
        self.dm.backend.get_globals();

        let mut event_stream = EventStream::new();
        let mut ticker = interval(self.config.refresh_interval);

        let result = loop {
            let render_result = self.terminal.draw(|frame| {
                self.app.render(frame, &mut self.dm);
            });
            if let Err(e) = render_result {
                break Err(e.into());
            }

            select! {
                // terminal events (keyboard, resize)
                event_result = event_stream.next() => {
                    if let Some(Ok(current_event)) = event_result {
                        debug!("Received event: {:?}", current_event);
                        match current_event {
                            Event::Key(key_event) => {
                                if self.handle_key_event(key_event)? {
                                    break Ok(());
                                }
                            }
                            Event::Resize(width, height) => {
                                debug!("Terminal resized: {}x{}", width, height);
                            }
                            _ => {}
                        }
                    }
                }

                // workbench events from the backend and the panels
                bus_event = self.events.recv() => {
                    match bus_event {
                        Some(event) => self.app.handle_workbench_event(&event, &mut self.dm)?,
                        None => {
                            warn!("Event bus closed, shutting down");
                            break Ok(());
                        }
                    }
                }

                // periodic refresh tick
                _ = ticker.tick() => {}
            }

            if self.app.should_exit() {
                info!("App requested exit");
                break Ok(());
            }
        };

        info!("TUI event loop ended");
        result
    }

    // Handle a single key event, returning true if the app should exit
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        match self.app.handle_key_event(key_event, &mut self.dm)? {
            EventResponse::Exit => {
                info!("Exit requested");
                return Ok(true);
            }
            EventResponse::Handled => {}
            EventResponse::NotHandled => {
                debug!("Unhandled key event: {:?}", key_event);
            }
            EventResponse::ChangeFocus(panel_type) => {
                debug!("Focus change requested to {:?}", panel_type);
            }
        }
        Ok(false)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Public API for the TUI module
pub mod api {
    use super::*;

    /// Start the TUI against a freshly spawned in-process backend
    pub async fn start_local_tui(config: TuiConfig) -> Result<()> {
        let (backend, commands) = BackendHandle::channel();
        let (bus, events) = mpsc::unbounded_channel();

        let backend_task = LocalBackend::new(sample_heap()).spawn(commands, bus.clone());
        let tui = Tui::new(config, backend, bus, events)?;
        let result = tui.run().await;

        backend_task.abort();
        result
    }

    /// Start the TUI with default configuration
    pub async fn start_default_tui() -> Result<()> {
        start_local_tui(TuiConfig::default()).await
    }
}
