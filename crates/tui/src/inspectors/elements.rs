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

//! Grid view over the elements of a sequence or set

use loupe_common::{format_object_id, shorten_repr, ObjectId, ObjectInfo};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Row, Table},
    Frame,
};

use super::{pluralize, GridState, Inspector, InspectorKind};
use crate::data::DataManager;

#[derive(Debug, Clone)]
struct ElementRow {
    id: ObjectId,
    repr: String,
}

/// Sequences get an index column, unordered containers do not.
#[derive(Debug, Default)]
pub struct ElementsInspector {
    rows: Vec<ElementRow>,
    show_index: bool,
    grid: GridState,
}

impl ElementsInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inspector for ElementsInspector {
    fn kind(&self) -> InspectorKind {
        InspectorKind::Elements
    }

    fn applies_to(&self, info: &ObjectInfo) -> bool {
        info.elements.is_some()
    }

    fn set_object_info(&mut self, info: &ObjectInfo, dm: &DataManager) {
        self.show_index = matches!(info.type_name.as_str(), "list" | "tuple");
        self.rows = info
            .elements
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|summary| ElementRow {
                id: summary.id,
                repr: shorten_repr(&summary.repr, dm.max_repr_length),
            })
            .collect();
    }

    fn label(&self) -> String {
        pluralize(self.rows.len(), "element", "elements")
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let visible = (area.height.saturating_sub(1) as usize).min(dm.max_grid_rows);
        let window = self.grid.window(self.rows.len(), visible);
        let selected = self.grid.selected;

        let selected_style = Style::default()
            .bg(dm.theme.selection_bg)
            .fg(dm.theme.selection_fg)
            .add_modifier(Modifier::BOLD);

        let mut header = Vec::new();
        let mut widths = Vec::new();
        if self.show_index {
            header.push("index".to_string());
            widths.push(Constraint::Length(7));
        }
        if dm.heap_mode {
            header.push("id".to_string());
            widths.push(Constraint::Length(12));
        }
        header.push("value".to_string());
        widths.push(Constraint::Fill(1));

        let rows = window.map(|idx| {
            let element = &self.rows[idx];
            let mut cells = Vec::new();
            if self.show_index {
                cells.push(idx.to_string());
            }
            if dm.heap_mode {
                cells.push(format_object_id(element.id));
            }
            cells.push(element.repr.clone());
            let row = Row::new(cells);
            if idx == selected {
                row.style(selected_style)
            } else {
                row
            }
        });

        let table = Table::new(rows, widths).header(
            Row::new(header).style(
                Style::default()
                    .fg(dm.theme.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
        );
        frame.render_widget(table, area);
    }

    fn reset(&mut self) {
        self.rows.clear();
        self.grid.reset();
    }

    fn move_selection(&mut self, delta: i32) {
        self.grid.move_selection(delta, self.rows.len());
    }

    fn selected_object(&self) -> Option<ObjectId> {
        self.rows.get(self.grid.selected).map(|row| row.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspectors::tests::test_dm;
    use loupe_common::ValueSummary;

    fn list_info(reprs: &[&str]) -> ObjectInfo {
        let mut info = ObjectInfo::new(ObjectId(1), "[...]", "list", ObjectId(2));
        info.elements = Some(
            reprs
                .iter()
                .enumerate()
                .map(|(idx, repr)| ValueSummary::new(ObjectId(100 + idx as u64), *repr))
                .collect(),
        );
        info
    }

    #[test]
    fn sequences_show_indices_but_sets_do_not() {
        let dm = test_dm();
        let mut view = ElementsInspector::new();

        view.set_object_info(&list_info(&["1"]), &dm);
        assert!(view.show_index);

        let mut set_info = list_info(&["1"]);
        set_info.type_name = "set".into();
        view.set_object_info(&set_info, &dm);
        assert!(!view.show_index);
    }

    #[test]
    fn label_is_singular_for_one_element() {
        let dm = test_dm();
        let mut view = ElementsInspector::new();
        view.set_object_info(&list_info(&["1"]), &dm);
        assert_eq!(view.label(), "1 element");
        view.set_object_info(&list_info(&["1", "2"]), &dm);
        assert_eq!(view.label(), "2 elements");
    }

    #[test]
    fn selection_follows_the_rows() {
        let dm = test_dm();
        let mut view = ElementsInspector::new();
        view.set_object_info(&list_info(&["1", "2", "3"]), &dm);

        assert_eq!(view.selected_object(), Some(ObjectId(100)));
        view.move_selection(2);
        assert_eq!(view.selected_object(), Some(ObjectId(102)));
        view.move_selection(5);
        assert_eq!(view.selected_object(), Some(ObjectId(102)));
    }

    #[test]
    fn long_reprs_are_shortened_for_the_grid() {
        let dm = test_dm();
        let mut view = ElementsInspector::new();
        let long = "x".repeat(500);
        view.set_object_info(&list_info(&[long.as_str()]), &dm);
        assert!(view.rows[0].repr.chars().count() <= dm.max_repr_length);
        assert!(view.rows[0].repr.ends_with('…'));
    }
}
