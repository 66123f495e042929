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

//! Application state and panel coordination

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use eyre::Result;
use loupe_common::WorkbenchEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use tracing::debug;

use crate::data::DataManager;
use crate::panels::{EventResponse, InspectorPanel, ObjectsPanel, PanelTr, PanelType};

/// Main application holding the panels and the focus state
#[derive(Debug)]
pub struct App {
    objects: ObjectsPanel,
    inspector: InspectorPanel,
    focused: PanelType,
    /// Whether the inspector pane is shown in the layout
    inspector_visible: bool,
    should_exit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            // the objects panel starts focused, see ObjectsPanel::new
            objects: ObjectsPanel::new(),
            inspector: InspectorPanel::new(),
            focused: PanelType::Objects,
            inspector_visible: true,
            should_exit: false,
        }
    }

    /// Whether the event loop should stop
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn focused_panel(&mut self) -> &mut dyn PanelTr {
        match self.focused {
            PanelType::Objects => &mut self.objects,
            PanelType::Inspector => &mut self.inspector,
        }
    }

    /// Move focus to another panel
    pub fn change_focus(&mut self, target: PanelType, dm: &mut DataManager) {
        if target == self.focused {
            return;
        }
        if target == PanelType::Inspector && !self.inspector_visible {
            return;
        }
        self.focused_panel().on_blur(dm);
        self.focused = target;
        self.focused_panel().on_focus(dm);
        debug!("Focus changed to {:?}", target);
    }

    fn cycle_focus(&mut self, dm: &mut DataManager) {
        let next = match self.focused {
            PanelType::Objects => PanelType::Inspector,
            PanelType::Inspector => PanelType::Objects,
        };
        self.change_focus(next, dm);
    }

    fn toggle_inspector(&mut self, dm: &mut DataManager) {
        if self.inspector_visible {
            dm.publish(WorkbenchEvent::HideView);
        } else {
            dm.publish(WorkbenchEvent::ShowView);
        }
    }

    /// Render all visible panels
    pub fn render(&mut self, frame: &mut Frame<'_>, dm: &mut DataManager) {
        if self.inspector_visible {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(frame.area());
            self.objects.render(frame, chunks[0], dm);
            self.inspector.render(frame, chunks[1], dm);
        } else {
            self.objects.render(frame, frame.area(), dm);
        }
    }

    /// Route a key event: global bindings first, then the focused panel
    pub fn handle_key_event(&mut self, key: KeyEvent, dm: &mut DataManager) -> Result<EventResponse> {
        if key.kind != KeyEventKind::Press {
            return Ok(EventResponse::NotHandled);
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_exit = true;
            return Ok(EventResponse::Exit);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_exit = true;
                return Ok(EventResponse::Exit);
            }
            KeyCode::Tab => {
                self.cycle_focus(dm);
                return Ok(EventResponse::Handled);
            }
            KeyCode::Char('i') => {
                self.toggle_inspector(dm);
                return Ok(EventResponse::Handled);
            }
            _ => {}
        }

        let response = self.focused_panel().handle_key_event(key, dm)?;
        if let EventResponse::ChangeFocus(target) = response {
            self.change_focus(target, dm);
            return Ok(EventResponse::Handled);
        }
        Ok(response)
    }

    /// Deliver a workbench event to every panel
    pub fn handle_workbench_event(
        &mut self,
        event: &WorkbenchEvent,
        dm: &mut DataManager,
    ) -> Result<()> {
        // layout bookkeeping happens here, the panels handle the rest
        match event {
            WorkbenchEvent::ShowView => self.inspector_visible = true,
            WorkbenchEvent::HideView => {
                self.inspector_visible = false;
                if self.focused == PanelType::Inspector {
                    self.change_focus(PanelType::Objects, dm);
                }
            }
            _ => {}
        }

        self.objects.handle_workbench_event(event, dm)?;
        self.inspector.handle_workbench_event(event, dm)?;
        Ok(())
    }
}
