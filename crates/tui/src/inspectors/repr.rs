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

//! Generic fallback view showing the object's repr

use loupe_common::ObjectInfo;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{Inspector, InspectorKind};
use crate::data::DataManager;

const MAX_REPR_LINES: usize = 10;

#[derive(Debug, Default)]
pub struct ReprInspector {
    content: String,
}

impl ReprInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inspector for ReprInspector {
    fn kind(&self) -> InspectorKind {
        InspectorKind::Repr
    }

    fn applies_to(&self, _info: &ObjectInfo) -> bool {
        true
    }

    fn set_object_info(&mut self, info: &ObjectInfo, _dm: &DataManager) {
        self.content = info.repr.clone();
    }

    fn label(&self) -> String {
        String::new()
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let text = clip_lines(&self.content, MAX_REPR_LINES);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(dm.theme.help_text_color))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn reset(&mut self) {
        self.content.clear();
    }
}

/// Cap multi-line text at `max` lines, marking the cut
pub(crate) fn clip_lines(content: &str, max: usize) -> String {
    let mut lines: Vec<&str> = content.split('\n').collect();
    if lines.len() > max {
        lines.truncate(max);
        format!("{}\n…", lines.join("\n"))
    } else {
        content.to_string()
    }
}
