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

//! Tabular view for DataFrame-style objects

use loupe_common::ObjectInfo;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Row, Table},
    Frame,
};

use super::{pluralize, GridState, Inspector, InspectorKind};
use crate::data::DataManager;

#[derive(Debug, Default)]
pub struct DataFrameInspector {
    columns: Vec<String>,
    index: Vec<String>,
    values: Vec<Vec<String>>,
    row_count: usize,
    grid: GridState,
}

impl DataFrameInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inspector for DataFrameInspector {
    fn kind(&self) -> InspectorKind {
        InspectorKind::DataFrame
    }

    fn applies_to(&self, info: &ObjectInfo) -> bool {
        info.is_data_frame
    }

    fn set_object_info(&mut self, info: &ObjectInfo, _dm: &DataManager) {
        self.columns = info.columns.clone().unwrap_or_default();
        self.index = info.index.clone().unwrap_or_default();
        self.values = info.values.clone().unwrap_or_default();
        self.row_count = info.row_count.unwrap_or(self.values.len());
    }

    fn label(&self) -> String {
        // the backend may ship only a prefix of the rows
        if self.row_count > self.values.len() {
            format!(
                "{} of {}",
                pluralize(self.values.len(), "row", "rows"),
                self.row_count
            )
        } else {
            pluralize(self.row_count, "row", "rows")
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let visible = (area.height.saturating_sub(1) as usize).min(dm.max_grid_rows);
        let window = self.grid.window(self.values.len(), visible);
        let selected = self.grid.selected;

        let selected_style = Style::default()
            .bg(dm.theme.selection_bg)
            .fg(dm.theme.selection_fg)
            .add_modifier(Modifier::BOLD);

        let mut header = vec![String::new()];
        header.extend(self.columns.iter().cloned());
        let mut widths = vec![Constraint::Length(8)];
        widths.extend(self.columns.iter().map(|_| Constraint::Fill(1)));

        let rows = window.map(|idx| {
            let mut cells =
                vec![self.index.get(idx).cloned().unwrap_or_else(|| idx.to_string())];
            cells.extend(self.values[idx].iter().cloned());
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
        self.columns.clear();
        self.index.clear();
        self.values.clear();
        self.row_count = 0;
        self.grid.reset();
    }

    fn move_selection(&mut self, delta: i32) {
        self.grid.move_selection(delta, self.values.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspectors::tests::test_dm;
    use loupe_common::ObjectId;

    fn frame_info() -> ObjectInfo {
        let mut info = ObjectInfo::new(ObjectId(1), "<DataFrame>", "DataFrame", ObjectId(2));
        info.is_data_frame = true;
        info.columns = Some(vec!["a".into(), "b".into()]);
        info.index = Some(vec!["0".into(), "1".into()]);
        info.values = Some(vec![
            vec!["1".into(), "2".into()],
            vec!["3".into(), "4".into()],
        ]);
        info.row_count = Some(2);
        info
    }

    #[test]
    fn applies_on_the_flag_alone() {
        let view = DataFrameInspector::new();
        let mut info = frame_info();
        assert!(view.applies_to(&info));
        info.is_data_frame = false;
        assert!(!view.applies_to(&info));
    }

    #[test]
    fn label_reports_truncated_row_sets() {
        let dm = test_dm();
        let mut view = DataFrameInspector::new();
        let mut info = frame_info();
        view.set_object_info(&info, &dm);
        assert_eq!(view.label(), "2 rows");

        info.row_count = Some(1000);
        view.set_object_info(&info, &dm);
        assert_eq!(view.label(), "2 rows of 1000");
    }
}
