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

//! Source-code view for callables

use loupe_common::ObjectInfo;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Paragraph,
    Frame,
};

use super::{repr::clip_lines, Inspector, InspectorKind};
use crate::data::DataManager;

const MAX_SOURCE_LINES: usize = 15;

#[derive(Debug, Default)]
pub struct FunctionInspector {
    source: String,
}

impl FunctionInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inspector for FunctionInspector {
    fn kind(&self) -> InspectorKind {
        InspectorKind::Function
    }

    fn applies_to(&self, info: &ObjectInfo) -> bool {
        info.source.is_some()
    }

    fn set_object_info(&mut self, info: &ObjectInfo, _dm: &DataManager) {
        self.source = info.source.clone().unwrap_or_default();
    }

    fn label(&self) -> String {
        "Code".to_string()
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let text = clip_lines(&self.source, MAX_SOURCE_LINES);
        let paragraph = Paragraph::new(text).style(Style::default().fg(dm.theme.help_text_color));
        frame.render_widget(paragraph, area);
    }

    fn reset(&mut self) {
        self.source.clear();
    }
}
