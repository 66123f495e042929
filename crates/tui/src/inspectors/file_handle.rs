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

//! File-handle view with read-progress highlighting

use loupe_common::ObjectInfo;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use super::{line_count_terminated, Inspector, InspectorKind};
use crate::data::DataManager;

const MAX_FILE_LINES: usize = 10;

/// Progress through the file content, in characters and terminated lines
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ReadProgress {
    read_chars: usize,
    total_chars: usize,
    read_lines: usize,
    total_lines: usize,
    /// Byte offset into the content where the unread part begins
    split_at: usize,
}

impl ReadProgress {
    /// Derive progress from the content and the handle's tell position.
    ///
    /// The tell is a byte offset from the backend; it is clamped to the
    /// content and snapped back to the nearest char boundary so multi-byte
    /// characters are never split.
    fn compute(content: &str, tell: usize) -> Self {
        let mut split_at = tell.min(content.len());
        while split_at > 0 && !content.is_char_boundary(split_at) {
            split_at -= 1;
        }
        let total_lines = line_count_terminated(content);
        Self {
            read_chars: content[..split_at].chars().count(),
            total_chars: content.chars().count(),
            read_lines: total_lines - line_count_terminated(&content[split_at..]),
            total_lines,
            split_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct FileHandleInspector {
    content: String,
    error: Option<String>,
    progress: ReadProgress,
}

impl FileHandleInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inspector for FileHandleInspector {
    fn kind(&self) -> InspectorKind {
        InspectorKind::FileHandle
    }

    fn applies_to(&self, info: &ObjectInfo) -> bool {
        info.is_file_like()
    }

    fn set_object_info(&mut self, info: &ObjectInfo, _dm: &DataManager) {
        self.error = info.file_error.clone();
        if info.file_content.is_none() {
            tracing::warn!(
                id = %info.id,
                error = self.error.as_deref().unwrap_or("unknown"),
                "Backend could not read file content"
            );
        }
        self.content = info.file_content.clone().unwrap_or_default();
        let tell = info.file_tell.unwrap_or(0);
        self.progress = ReadProgress::compute(&self.content, tell);
    }

    fn label(&self) -> String {
        match &self.error {
            Some(error) => error.clone(),
            None => format!(
                "Read {}/{} symbols, {}/{} lines",
                self.progress.read_chars,
                self.progress.total_chars,
                self.progress.read_lines,
                self.progress.total_lines
            ),
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        if let Some(error) = &self.error {
            let paragraph =
                Paragraph::new(error.as_str()).style(Style::default().fg(dm.theme.error_color));
            frame.render_widget(paragraph, area);
            return;
        }

        // Already-read characters are dimmed, unread ones keep the normal
        // text color. The boundary can fall mid-line, so that line gets
        // two spans.
        let read_style = Style::default()
            .fg(dm.theme.dimmed_color)
            .add_modifier(Modifier::DIM);
        let unread_style = Style::default().fg(dm.theme.help_text_color);

        let mut lines = Vec::new();
        let mut offset = 0;
        for raw in self.content.split('\n') {
            if lines.len() >= MAX_FILE_LINES {
                lines.push(Line::from(Span::styled("…", unread_style)));
                break;
            }
            let start = offset;
            let end = offset + raw.len();
            let line = if end <= self.progress.split_at {
                Line::from(Span::styled(raw.to_string(), read_style))
            } else if start >= self.progress.split_at {
                Line::from(Span::styled(raw.to_string(), unread_style))
            } else {
                let cut = self.progress.split_at - start;
                Line::from(vec![
                    Span::styled(raw[..cut].to_string(), read_style),
                    Span::styled(raw[cut..].to_string(), unread_style),
                ])
            };
            lines.push(line);
            offset = end + 1;
        }

        frame.render_widget(Paragraph::new(Text::from(lines)), area);
    }

    fn reset(&mut self) {
        self.content.clear();
        self.error = None;
        self.progress = ReadProgress::default();
    }
}
