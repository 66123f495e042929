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

//! Centralized state passed to every panel call
//!
//! A single [`DataManager`] instance is threaded as `&mut` through render
//! and event handling. It carries the resolved theme, the backend command
//! handle, the bus publisher, and workbench-level display options. All
//! mutation is synchronous and local; panels never block on it.

pub mod theme;

use loupe_common::WorkbenchEvent;
use tokio::sync::mpsc;
use tracing::warn;

use crate::backend::BackendHandle;
use crate::config::Config;
use crate::data::theme::Theme;

/// Central data manager handed to all panels.
pub struct DataManager {
    /// Resolved theme colors
    pub theme: Theme,
    /// Command channel to the execution backend
    pub backend: BackendHandle,
    /// Show value ids instead of reprs in sequence/mapping grids
    pub heap_mode: bool,
    /// Maximum rows rendered in element/entry/attribute grids
    pub max_grid_rows: usize,
    /// Maximum repr length shown per toplevel variable
    pub max_repr_length: usize,
    bus: mpsc::UnboundedSender<WorkbenchEvent>,
}

impl DataManager {
    /// Create a data manager from config plus the two channel endpoints
    pub fn new(
        config: &Config,
        backend: BackendHandle,
        bus: mpsc::UnboundedSender<WorkbenchEvent>,
    ) -> Self {
        Self {
            theme: Theme::from_config(config),
            backend,
            heap_mode: config.panels.inspector.heap_mode,
            max_grid_rows: config.panels.inspector.max_grid_rows,
            max_repr_length: config.panels.objects.max_repr_length,
            bus,
        }
    }

    /// Publish an event on the workbench bus.
    ///
    /// The bus closing means the event loop is gone; nothing to do but log.
    pub fn publish(&self, event: WorkbenchEvent) {
        if self.bus.send(event).is_err() {
            warn!("Workbench event bus closed, event dropped");
        }
    }
}
