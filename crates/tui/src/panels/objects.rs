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

//! Objects panel listing the toplevel global bindings
//!
//! Selecting a binding publishes an object-select event; the inspector
//! panel picks it up from the bus like any other interested party.

use super::{EventResponse, PanelTr, PanelType};
use crate::data::DataManager;
use crate::ui::borders::BorderPresets;
use crate::ui::status::StatusBar;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use eyre::Result;
use loupe_common::{format_object_id, shorten_repr, ValueSummary, WorkbenchEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use tracing::debug;

/// Panel listing global name/value pairs from the backend
#[derive(Debug, Default)]
pub struct ObjectsPanel {
    globals: Vec<(String, ValueSummary)>,
    selected: usize,
    scroll: usize,
    focused: bool,
}

impl ObjectsPanel {
    pub fn new() -> Self {
        // this panel has focus when the application starts
        Self { focused: true, ..Self::default() }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.globals.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.globals.len() as i32 - 1;
        self.selected = (self.selected as i32 + delta).clamp(0, max) as usize;
    }

    fn inspect_selected(&self, dm: &mut DataManager) {
        if let Some((name, summary)) = self.globals.get(self.selected) {
            debug!(name = %name, id = %summary.id, "Inspecting global");
            dm.publish(WorkbenchEvent::ObjectSelect { object_id: summary.id });
        }
    }

    fn render_list(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let visible = area.height as usize;
        if visible == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }

        let name_width = self
            .globals
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);

        let items: Vec<ListItem<'_>> = self
            .globals
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible)
            .map(|(idx, (name, summary))| {
                let mut spans = vec![
                    Span::styled(
                        format!("{name:name_width$}"),
                        Style::default().fg(dm.theme.accent_color),
                    ),
                    Span::raw(" = "),
                ];
                if dm.heap_mode {
                    spans.push(Span::styled(
                        format!("{:<10} ", format_object_id(summary.id)),
                        Style::default().fg(dm.theme.dimmed_color),
                    ));
                }
                spans.push(Span::styled(
                    shorten_repr(&summary.repr, dm.max_repr_length),
                    Style::default().fg(dm.theme.help_text_color),
                ));

                let item = ListItem::new(Line::from(spans));
                if idx == self.selected && self.focused {
                    item.style(
                        Style::default()
                            .bg(dm.theme.selection_bg)
                            .fg(dm.theme.selection_fg)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    item
                }
            })
            .collect();

        frame.render_widget(List::new(items), area);
    }

    fn render_status_and_help(&self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let status = StatusBar::new()
            .current_panel("Objects".to_string())
            .message(format!("{} globals", self.globals.len()))
            .message(if dm.heap_mode { "heap mode" } else { "values" })
            .build();
        let help = "↑/↓: navigate | Enter: inspect | r: refresh";

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(dm.theme.accent_color)),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(dm.theme.help_text_color)),
            chunks[1],
        );
    }
}

impl PanelTr for ObjectsPanel {
    fn panel_type(&self) -> PanelType {
        PanelType::Objects
    }

    fn title(&self, _dm: &mut DataManager) -> String {
        format!("Objects ({})", self.globals.len())
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &mut DataManager) {
        let border = BorderPresets::objects(
            self.focused,
            self.title(dm),
            dm.theme.focused_border,
            dm.theme.unfocused_border,
        );
        let inner = border.inner(area);
        frame.render_widget(border, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        self.render_list(frame, chunks[0], dm);
        self.render_status_and_help(frame, chunks[1], dm);
    }

    fn handle_key_event(&mut self, event: KeyEvent, dm: &mut DataManager) -> Result<EventResponse> {
        if event.kind != KeyEventKind::Press {
            return Ok(EventResponse::NotHandled);
        }

        match event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                Ok(EventResponse::Handled)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                Ok(EventResponse::Handled)
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
                Ok(EventResponse::Handled)
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.globals.len().saturating_sub(1);
                Ok(EventResponse::Handled)
            }
            KeyCode::Enter => {
                self.inspect_selected(dm);
                Ok(EventResponse::ChangeFocus(PanelType::Inspector))
            }
            KeyCode::Char('r') => {
                dm.backend.get_globals();
                Ok(EventResponse::Handled)
            }
            _ => Ok(EventResponse::NotHandled),
        }
    }

    fn handle_workbench_event(
        &mut self,
        event: &WorkbenchEvent,
        dm: &mut DataManager,
    ) -> Result<()> {
        match event {
            WorkbenchEvent::Globals { globals } => {
                self.globals = globals.clone();
                if !self.globals.is_empty() {
                    self.selected = self.selected.min(self.globals.len() - 1);
                } else {
                    self.selected = 0;
                }
            }
            // a finished command or debugger step may have changed the globals
            WorkbenchEvent::ToplevelResult | WorkbenchEvent::DebuggerProgress => {
                dm.backend.get_globals();
            }
            _ => {}
        }
        Ok(())
    }

    fn on_focus(&mut self, _dm: &mut DataManager) {
        self.focused = true;
    }

    fn on_blur(&mut self, _dm: &mut DataManager) {
        self.focused = false;
    }
}
