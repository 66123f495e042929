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

//! Inspector panel showing the currently selected object
//!
//! The panel owns the navigation history and the view registry. It reacts
//! to bus events: selections move the history, info replies refresh the
//! active view, and progress events trigger a re-request because the
//! object may have mutated. Replies for anything other than the current
//! history entry are stale and dropped.

use super::{EventResponse, PanelTr, PanelType};
use crate::data::DataManager;
use crate::history::NavigationHistory;
use crate::inspectors::{GridState, InspectorRegistry};
use crate::ui::borders::BorderPresets;
use crate::ui::status::StatusBar;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use eyre::Result;
use loupe_common::{
    format_object_id, shorten_repr, ObjectId, ObjectInfo, WorkbenchEvent,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

/// Pages of the inspector panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Identity and full repr
    Overview,
    /// Type-specific data view
    Data,
    /// Attribute grid
    Atts,
}

impl Page {
    fn name(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Data => "Data",
            Page::Atts => "Atts",
        }
    }
}

// below this the hint is useless to the backend
const MIN_FRAME_HINT: u16 = 5;

/// Panel controller for object inspection
#[derive(Debug)]
pub struct InspectorPanel {
    history: NavigationHistory,
    registry: InspectorRegistry,
    info: Option<ObjectInfo>,
    not_found: bool,
    page: Page,
    atts_grid: GridState,
    /// Data-page area from the last render, used as a size hint
    last_data_area: Option<Rect>,
    visible: bool,
    focused: bool,
}

impl Default for InspectorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectorPanel {
    pub fn new() -> Self {
        Self {
            history: NavigationHistory::new(),
            registry: InspectorRegistry::new(),
            info: None,
            not_found: false,
            page: Page::Data,
            atts_grid: GridState::default(),
            last_data_area: None,
            visible: true,
            focused: false,
        }
    }

    /// Ask the backend for fresh info on the current history entry.
    /// No-op while the panel is hidden or nothing is selected.
    fn request_info(&self, dm: &DataManager) {
        if !self.visible {
            return;
        }
        let Some(object_id) = self.history.current() else {
            return;
        };
        let (width, height) = self.frame_hints();
        dm.backend
            .get_object_info(object_id, self.page == Page::Atts, width, height);
    }

    /// Size hints for the backend, so it can limit child listings.
    /// Degenerate areas give no hint.
    fn frame_hints(&self) -> (Option<u16>, Option<u16>) {
        match self.last_data_area {
            Some(area) if area.width >= MIN_FRAME_HINT && area.height >= MIN_FRAME_HINT => {
                (Some(area.width), Some(area.height))
            }
            _ => (None, None),
        }
    }

    /// Jump to another object, recording the move in the history
    fn navigate_to(&mut self, object_id: ObjectId, dm: &mut DataManager) {
        dm.publish(WorkbenchEvent::ObjectSelect { object_id });
    }

    fn accept_info(&mut self, info: &ObjectInfo, not_found: bool, dm: &DataManager) {
        if !self.visible {
            return;
        }
        if self.history.current() != Some(info.id) {
            debug!(id = %info.id, "Discarding stale object info");
            return;
        }
        if not_found {
            debug!(id = %info.id, "Inspected object no longer exists");
            self.info = None;
            self.not_found = true;
            self.registry.clear();
            // the id is gone, so the same id arriving again is a new object
            self.history.clear_current();
            return;
        }
        self.not_found = false;
        self.info = Some(info.clone());
        self.registry.update(info, dm);
    }

    fn selected_attribute(&self) -> Option<ObjectId> {
        let info = self.info.as_ref()?;
        info.attributes
            .values()
            .nth(self.atts_grid.selected)
            .map(|summary| summary.id)
    }

    fn drill_down_target(&mut self) -> Option<ObjectId> {
        match self.page {
            Page::Data => self
                .registry
                .active_view()
                .and_then(|view| view.selected_object()),
            Page::Atts => self.selected_attribute(),
            Page::Overview => None,
        }
    }

    fn set_page(&mut self, page: Page, dm: &DataManager) {
        if self.page == page {
            return;
        }
        self.page = page;
        // the attribute page needs data the plain request leaves out
        if page == Page::Atts
            && self.info.as_ref().map_or(true, |info| info.attributes.is_empty())
        {
            self.request_info(dm);
        }
    }

    fn render_overview(&self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager, info: &ObjectInfo) {
        let id_style = Style::default().fg(dm.theme.dimmed_color);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("id      ", id_style),
                Span::raw(format_object_id(info.id)),
            ]),
            Line::from(vec![
                Span::styled("type    ", id_style),
                Span::styled(
                    info.type_name.clone(),
                    Style::default()
                        .fg(dm.theme.accent_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  @ {}", format_object_id(info.type_id)), id_style),
            ]),
            Line::from(""),
        ];
        lines.extend(info.repr.split('\n').map(|line| Line::from(line.to_string())));

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(dm.theme.help_text_color))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_data(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        self.last_data_area = Some(area);

        let label = self.registry.label().unwrap_or_default();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        frame.render_widget(
            Paragraph::new(label).style(
                Style::default()
                    .fg(dm.theme.accent_color)
                    .add_modifier(Modifier::ITALIC),
            ),
            chunks[0],
        );
        if let Some(view) = self.registry.active_view() {
            view.render(frame, chunks[1], dm);
        }
    }

    fn render_atts(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let Some(info) = &self.info else {
            return;
        };
        if info.attributes.is_empty() {
            frame.render_widget(
                Paragraph::new("(no attributes received yet)")
                    .style(Style::default().fg(dm.theme.dimmed_color)),
                area,
            );
            return;
        }

        let visible = area.height as usize;
        let window = self.atts_grid.window(info.attributes.len(), visible);
        let selected = self.atts_grid.selected;

        let name_width = info
            .attributes
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0);

        let items: Vec<ListItem<'_>> = info
            .attributes
            .iter()
            .enumerate()
            .skip(window.start)
            .take(window.len())
            .map(|(idx, (name, summary))| {
                let mut spans = vec![
                    Span::styled(
                        format!("{name:name_width$}"),
                        Style::default().fg(dm.theme.accent_color),
                    ),
                    Span::raw("  "),
                ];
                if dm.heap_mode {
                    spans.push(Span::styled(
                        format!("{:<10} ", format_object_id(summary.id)),
                        Style::default().fg(dm.theme.dimmed_color),
                    ));
                }
                spans.push(Span::raw(shorten_repr(&summary.repr, dm.max_repr_length)));

                let item = ListItem::new(Line::from(spans));
                if idx == selected && self.focused {
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
        let mut bar = StatusBar::new()
            .current_panel("Inspector".to_string())
            .message(format!("Page: {}", self.page.name()));
        if self.history.can_go_back() {
            bar = bar.message("◀ back");
        }
        if self.history.can_go_forward() {
            bar = bar.message("forward ▶");
        }
        let help = "o/d/a: page | [ ]: back/forward | Enter: drill down | t: type | h: heap ids";

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);
        frame.render_widget(
            Paragraph::new(bar.build()).style(Style::default().fg(dm.theme.accent_color)),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(dm.theme.help_text_color)),
            chunks[1],
        );
    }
}

impl PanelTr for InspectorPanel {
    fn panel_type(&self) -> PanelType {
        PanelType::Inspector
    }

    fn title(&self, _dm: &mut DataManager) -> String {
        match (&self.info, self.not_found) {
            (Some(info), _) => format!("Inspector: {}", info.type_name),
            (None, true) => "Inspector: object not found".to_string(),
            (None, false) => "Inspector".to_string(),
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &mut DataManager) {
        let border = BorderPresets::inspector(
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
        let body = chunks[0];

        if self.not_found {
            frame.render_widget(
                Paragraph::new("The inspected object no longer exists")
                    .style(Style::default().fg(dm.theme.warning_color)),
                body,
            );
        } else if let Some(info) = self.info.clone() {
            match self.page {
                Page::Overview => self.render_overview(frame, body, dm, &info),
                Page::Data => self.render_data(frame, body, dm),
                Page::Atts => self.render_atts(frame, body, dm),
            }
        } else {
            frame.render_widget(
                Paragraph::new("Select an object to inspect")
                    .style(Style::default().fg(dm.theme.dimmed_color)),
                body,
            );
        }

        self.render_status_and_help(frame, chunks[1], dm);
    }

    fn handle_key_event(&mut self, event: KeyEvent, dm: &mut DataManager) -> Result<EventResponse> {
        if event.kind != KeyEventKind::Press {
            return Ok(EventResponse::NotHandled);
        }

        match event.code {
            KeyCode::Char('o') => {
                self.set_page(Page::Overview, dm);
                Ok(EventResponse::Handled)
            }
            KeyCode::Char('d') => {
                self.set_page(Page::Data, dm);
                Ok(EventResponse::Handled)
            }
            KeyCode::Char('a') => {
                self.set_page(Page::Atts, dm);
                Ok(EventResponse::Handled)
            }
            KeyCode::Char('[') => {
                if self.history.go_back().is_some() {
                    self.request_info(dm);
                }
                Ok(EventResponse::Handled)
            }
            KeyCode::Char(']') => {
                if self.history.go_forward().is_some() {
                    self.request_info(dm);
                }
                Ok(EventResponse::Handled)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                match self.page {
                    Page::Data => {
                        if let Some(view) = self.registry.active_view() {
                            view.move_selection(-1);
                        }
                    }
                    Page::Atts => {
                        let len = self.info.as_ref().map_or(0, |info| info.attributes.len());
                        self.atts_grid.move_selection(-1, len);
                    }
                    Page::Overview => {}
                }
                Ok(EventResponse::Handled)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                match self.page {
                    Page::Data => {
                        if let Some(view) = self.registry.active_view() {
                            view.move_selection(1);
                        }
                    }
                    Page::Atts => {
                        let len = self.info.as_ref().map_or(0, |info| info.attributes.len());
                        self.atts_grid.move_selection(1, len);
                    }
                    Page::Overview => {}
                }
                Ok(EventResponse::Handled)
            }
            KeyCode::Enter => {
                if let Some(target) = self.drill_down_target() {
                    self.navigate_to(target, dm);
                }
                Ok(EventResponse::Handled)
            }
            KeyCode::Char('t') => {
                if let Some(type_id) = self.info.as_ref().map(|info| info.type_id) {
                    self.navigate_to(type_id, dm);
                }
                Ok(EventResponse::Handled)
            }
            KeyCode::Char('h') => {
                dm.heap_mode = !dm.heap_mode;
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
            WorkbenchEvent::ObjectSelect { object_id } => {
                // a hidden panel ignores selections entirely
                if self.visible && self.history.select(*object_id) {
                    self.info = None;
                    self.not_found = false;
                    self.registry.clear();
                    self.atts_grid.reset();
                    self.request_info(dm);
                }
            }
            WorkbenchEvent::ObjectInfo { info, not_found } => {
                self.accept_info(info, *not_found, dm);
            }
            // object state may have changed under us
            WorkbenchEvent::DebuggerProgress | WorkbenchEvent::ToplevelResult => {
                self.request_info(dm);
            }
            WorkbenchEvent::ShowView => {
                if !self.visible {
                    self.visible = true;
                    self.request_info(dm);
                }
            }
            WorkbenchEvent::HideView => {
                self.visible = false;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendHandle;
    use crate::config::Config;
    use loupe_common::BackendCommand;
    use tokio::sync::mpsc;

    fn harness() -> (
        InspectorPanel,
        DataManager,
        mpsc::UnboundedReceiver<BackendCommand>,
        mpsc::UnboundedReceiver<WorkbenchEvent>,
    ) {
        let (backend, commands) = BackendHandle::channel();
        let (bus, events) = mpsc::unbounded_channel();
        let dm = DataManager::new(&Config::default(), backend, bus);
        (InspectorPanel::new(), dm, commands, events)
    }

    fn select(panel: &mut InspectorPanel, dm: &mut DataManager, id: u64) {
        panel
            .handle_workbench_event(
                &WorkbenchEvent::ObjectSelect { object_id: ObjectId(id) },
                dm,
            )
            .unwrap();
    }

    fn info_for(id: u64) -> ObjectInfo {
        ObjectInfo::new(ObjectId(id), format!("<obj {id}>"), "object", ObjectId(999))
    }

    fn deliver(panel: &mut InspectorPanel, dm: &mut DataManager, info: ObjectInfo, not_found: bool) {
        panel
            .handle_workbench_event(&WorkbenchEvent::ObjectInfo { info, not_found }, dm)
            .unwrap();
    }

    #[test]
    fn selection_requests_info_for_the_new_object() {
        let (mut panel, mut dm, mut commands, _events) = harness();
        select(&mut panel, &mut dm, 100);

        match commands.try_recv().unwrap() {
            BackendCommand::GetObjectInfo {
                object_id,
                include_attributes,
                all_attributes,
                frame_width,
                frame_height,
            } => {
                assert_eq!(object_id, ObjectId(100));
                assert!(!include_attributes);
                assert!(!all_attributes);
                // nothing rendered yet, so no size hints
                assert_eq!(frame_width, None);
                assert_eq!(frame_height, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reselecting_the_current_object_is_a_no_op() {
        let (mut panel, mut dm, mut commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        commands.try_recv().unwrap();

        select(&mut panel, &mut dm, 100);
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn stale_replies_are_discarded() {
        let (mut panel, mut dm, _commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        select(&mut panel, &mut dm, 200);

        // the late reply for 100 must not clobber the wait for 200
        deliver(&mut panel, &mut dm, info_for(100), false);
        assert!(panel.info.is_none());

        deliver(&mut panel, &mut dm, info_for(200), false);
        assert_eq!(panel.info.as_ref().unwrap().id, ObjectId(200));
    }

    #[test]
    fn new_selection_drops_the_previous_object() {
        let (mut panel, mut dm, _commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        deliver(&mut panel, &mut dm, info_for(100), false);
        assert!(panel.info.is_some());

        // until the reply for 200 lands, nothing of 100 may linger
        select(&mut panel, &mut dm, 200);
        assert!(panel.info.is_none());
        assert_eq!(panel.registry.active_kind(), None);
    }

    #[test]
    fn selecting_again_after_not_found_requests_fresh_info() {
        let (mut panel, mut dm, mut commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        deliver(&mut panel, &mut dm, ObjectInfo::unresolved(ObjectId(100)), true);
        while commands.try_recv().is_ok() {}

        select(&mut panel, &mut dm, 100);
        assert!(!panel.not_found);
        assert!(matches!(
            commands.try_recv().unwrap(),
            BackendCommand::GetObjectInfo { object_id: ObjectId(100), .. }
        ));
    }

    #[test]
    fn not_found_clears_the_display() {
        let (mut panel, mut dm, _commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        deliver(&mut panel, &mut dm, info_for(100), false);
        assert!(panel.info.is_some());

        deliver(&mut panel, &mut dm, ObjectInfo::unresolved(ObjectId(100)), true);
        assert!(panel.info.is_none());
        assert!(panel.not_found);
        assert_eq!(panel.registry.active_kind(), None);
    }

    #[test]
    fn hidden_panel_ignores_selections() {
        let (mut panel, mut dm, mut commands, _events) = harness();
        panel
            .handle_workbench_event(&WorkbenchEvent::HideView, &mut dm)
            .unwrap();

        select(&mut panel, &mut dm, 100);
        assert!(commands.try_recv().is_err());
        assert_eq!(panel.history.current(), None);

        // nothing was ever selected, so showing requests nothing
        panel
            .handle_workbench_event(&WorkbenchEvent::ShowView, &mut dm)
            .unwrap();
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn hidden_panel_drops_info_replies() {
        let (mut panel, mut dm, mut commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        while commands.try_recv().is_ok() {}

        panel
            .handle_workbench_event(&WorkbenchEvent::HideView, &mut dm)
            .unwrap();
        deliver(&mut panel, &mut dm, info_for(100), false);
        assert!(panel.info.is_none());

        // showing the panel refreshes what was current before the hide
        panel
            .handle_workbench_event(&WorkbenchEvent::ShowView, &mut dm)
            .unwrap();
        assert!(matches!(
            commands.try_recv().unwrap(),
            BackendCommand::GetObjectInfo { object_id: ObjectId(100), .. }
        ));
    }

    #[test]
    fn back_and_forward_replay_the_history() {
        let (mut panel, mut dm, mut commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        select(&mut panel, &mut dm, 200);
        while commands.try_recv().is_ok() {}

        let back = KeyEvent::from(KeyCode::Char('['));
        panel.handle_key_event(back, &mut dm).unwrap();
        assert_eq!(panel.history.current(), Some(ObjectId(100)));
        assert!(matches!(
            commands.try_recv().unwrap(),
            BackendCommand::GetObjectInfo { object_id: ObjectId(100), .. }
        ));

        let forward = KeyEvent::from(KeyCode::Char(']'));
        panel.handle_key_event(forward, &mut dm).unwrap();
        assert_eq!(panel.history.current(), Some(ObjectId(200)));
    }

    #[test]
    fn attribute_page_requests_attributes() {
        let (mut panel, mut dm, mut commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        deliver(&mut panel, &mut dm, info_for(100), false);
        while commands.try_recv().is_ok() {}

        panel.set_page(Page::Atts, &dm);
        match commands.try_recv().unwrap() {
            BackendCommand::GetObjectInfo { include_attributes, .. } => {
                assert!(include_attributes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn progress_refreshes_the_current_object() {
        let (mut panel, mut dm, mut commands, _events) = harness();
        select(&mut panel, &mut dm, 100);
        while commands.try_recv().is_ok() {}

        panel
            .handle_workbench_event(&WorkbenchEvent::DebuggerProgress, &mut dm)
            .unwrap();
        assert!(matches!(
            commands.try_recv().unwrap(),
            BackendCommand::GetObjectInfo { object_id: ObjectId(100), .. }
        ));
    }

    #[test]
    fn goto_type_publishes_a_selection() {
        let (mut panel, mut dm, _commands, mut events) = harness();
        select(&mut panel, &mut dm, 100);
        deliver(&mut panel, &mut dm, info_for(100), false);

        let key = KeyEvent::from(KeyCode::Char('t'));
        panel.handle_key_event(key, &mut dm).unwrap();
        match events.try_recv().unwrap() {
            WorkbenchEvent::ObjectSelect { object_id } => assert_eq!(object_id, ObjectId(999)),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn small_areas_produce_no_frame_hints() {
        let (mut panel, _dm, _commands, _events) = harness();
        panel.last_data_area = Some(Rect::new(0, 0, 4, 4));
        assert_eq!(panel.frame_hints(), (None, None));

        panel.last_data_area = Some(Rect::new(0, 0, 80, 24));
        assert_eq!(panel.frame_hints(), (Some(80), Some(24)));
    }
}
