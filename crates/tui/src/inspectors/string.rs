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

//! String view showing the raw character content

use loupe_common::{decode_str_literal, ObjectInfo};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Paragraph,
    Frame,
};

use super::{line_count_terminated, pluralize, repr::clip_lines, Inspector, InspectorKind};
use crate::data::DataManager;

const MAX_STRING_LINES: usize = 10;

/// Renders the characters of a string object.
///
/// The backend sends the content as a dedicated field; when talking to an
/// older backend that only ships the repr, the quoted literal is decoded
/// instead. If neither works the raw repr is shown without a summary line.
#[derive(Debug, Default)]
pub struct StringInspector {
    content: Option<String>,
    fallback_repr: String,
}

impl StringInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inspector for StringInspector {
    fn kind(&self) -> InspectorKind {
        InspectorKind::Str
    }

    fn applies_to(&self, info: &ObjectInfo) -> bool {
        info.type_name == "str"
    }

    fn set_object_info(&mut self, info: &ObjectInfo, _dm: &DataManager) {
        self.content = info
            .string_content
            .clone()
            .or_else(|| decode_str_literal(&info.repr));
        if self.content.is_none() {
            tracing::warn!(repr = %info.repr, "Could not recover string content, showing repr");
            self.fallback_repr = info.repr.clone();
        }
    }

    fn label(&self) -> String {
        match &self.content {
            Some(content) => {
                let symbols = content.chars().count();
                // a trailing newline terminates the last line, it does not open a new one
                let lines = line_count_terminated(content);
                format!(
                    "{}, {}",
                    pluralize(symbols, "symbol", "symbols"),
                    pluralize(lines, "line", "lines")
                )
            }
            None => String::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let shown = self.content.as_deref().unwrap_or(&self.fallback_repr);
        let paragraph = Paragraph::new(clip_lines(shown, MAX_STRING_LINES))
            .style(Style::default().fg(dm.theme.help_text_color));
        frame.render_widget(paragraph, area);
    }

    fn reset(&mut self) {
        self.content = None;
        self.fallback_repr.clear();
    }
}
