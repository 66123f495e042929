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

//! Panel framework and implementations
//!
//! This module contains the panel trait and all panel implementations.

use crossterm::event::KeyEvent;
use eyre::Result;
use loupe_common::WorkbenchEvent;
use ratatui::{layout::Rect, Frame};
use std::fmt::Debug;

use crate::data::DataManager;

/// Panel types for identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelType {
    /// Objects panel listing the global bindings
    Objects,
    /// Inspector panel showing the selected object
    Inspector,
}

/// Response from panel event handling
#[derive(Debug)]
pub enum EventResponse {
    /// Event was handled, no further action needed
    Handled,
    /// Event was not handled, pass to next handler
    NotHandled,
    /// Request focus change to another panel
    ChangeFocus(PanelType),
    /// Request application exit
    Exit,
}

/// Trait for UI panels
pub trait PanelTr: Debug {
    /// Get the panel type
    fn panel_type(&self) -> PanelType;

    /// Get panel title for display
    fn title(&self, dm: &mut DataManager) -> String {
        let _ = dm;
        format!("{:?}", self.panel_type())
    }

    /// Render the panel content
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &mut DataManager);

    /// Handle keyboard events while focused
    fn handle_key_event(&mut self, event: KeyEvent, dm: &mut DataManager) -> Result<EventResponse> {
        let _ = (event, dm);
        Ok(EventResponse::NotHandled)
    }

    /// React to an event from the workbench bus
    fn handle_workbench_event(&mut self, event: &WorkbenchEvent, dm: &mut DataManager)
        -> Result<()> {
        let _ = (event, dm);
        Ok(())
    }

    /// Called when this panel gains focus
    fn on_focus(&mut self, dm: &mut DataManager) {
        let _ = dm;
    }

    /// Called when this panel loses focus
    fn on_blur(&mut self, dm: &mut DataManager) {
        let _ = dm;
    }
}

pub mod inspector;
pub mod objects;

pub use inspector::InspectorPanel;
pub use objects::ObjectsPanel;
