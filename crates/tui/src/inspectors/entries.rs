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

//! Grid view over the key/value entries of a mapping

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
struct EntryRow {
    key_repr: String,
    value_id: ObjectId,
    value_repr: String,
}

/// Selection and drill-down follow the entry's value.
#[derive(Debug, Default)]
pub struct EntriesInspector {
    rows: Vec<EntryRow>,
    grid: GridState,
}

impl EntriesInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inspector for EntriesInspector {
    fn kind(&self) -> InspectorKind {
        InspectorKind::Entries
    }

    fn applies_to(&self, info: &ObjectInfo) -> bool {
        info.entries.is_some()
    }

    fn set_object_info(&mut self, info: &ObjectInfo, dm: &DataManager) {
        self.rows = info
            .entries
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|(key, value)| EntryRow {
                key_repr: shorten_repr(&key.repr, dm.max_repr_length),
                value_id: value.id,
                value_repr: shorten_repr(&value.repr, dm.max_repr_length),
            })
            .collect();
    }

    fn label(&self) -> String {
        pluralize(self.rows.len(), "entry", "entries")
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let visible = (area.height.saturating_sub(1) as usize).min(dm.max_grid_rows);
        let window = self.grid.window(self.rows.len(), visible);
        let selected = self.grid.selected;

        let selected_style = Style::default()
            .bg(dm.theme.selection_bg)
            .fg(dm.theme.selection_fg)
            .add_modifier(Modifier::BOLD);

        let mut header = vec!["key".to_string()];
        let mut widths = vec![Constraint::Percentage(30)];
        if dm.heap_mode {
            header.push("id".to_string());
            widths.push(Constraint::Length(12));
        }
        header.push("value".to_string());
        widths.push(Constraint::Fill(1));

        let rows = window.map(|idx| {
            let entry = &self.rows[idx];
            let mut cells = vec![entry.key_repr.clone()];
            if dm.heap_mode {
                cells.push(format_object_id(entry.value_id));
            }
            cells.push(entry.value_repr.clone());
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
        self.rows.get(self.grid.selected).map(|row| row.value_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspectors::tests::test_dm;
    use loupe_common::ValueSummary;

    fn dict_info(pairs: &[(&str, &str)]) -> ObjectInfo {
        let mut info = ObjectInfo::new(ObjectId(1), "{...}", "dict", ObjectId(2));
        info.entries = Some(
            pairs
                .iter()
                .enumerate()
                .map(|(idx, (key, value))| {
                    (
                        ValueSummary::new(ObjectId(200 + idx as u64), *key),
                        ValueSummary::new(ObjectId(300 + idx as u64), *value),
                    )
                })
                .collect(),
        );
        info
    }

    #[test]
    fn label_counts_entries() {
        let dm = test_dm();
        let mut view = EntriesInspector::new();
        view.set_object_info(&dict_info(&[("'a'", "1")]), &dm);
        assert_eq!(view.label(), "1 entry");
        view.set_object_info(&dict_info(&[("'a'", "1"), ("'b'", "2")]), &dm);
        assert_eq!(view.label(), "2 entries");
    }

    #[test]
    fn drill_down_targets_the_value() {
        let dm = test_dm();
        let mut view = EntriesInspector::new();
        view.set_object_info(&dict_info(&[("'a'", "1"), ("'b'", "2")]), &dm);
        view.move_selection(1);
        assert_eq!(view.selected_object(), Some(ObjectId(301)));
    }

    #[test]
    fn applies_to_an_empty_mapping() {
        let view = EntriesInspector::new();
        let info = dict_info(&[]);
        assert!(view.applies_to(&info));
    }
}
