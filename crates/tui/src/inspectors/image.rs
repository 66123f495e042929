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

//! View for objects carrying an encoded image payload
//!
//! Terminals cannot show the pixels, so this view reports the payload
//! size and lets the repr describe the image.

use loupe_common::ObjectInfo;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Text,
    widgets::Paragraph,
    Frame,
};

use super::{Inspector, InspectorKind};
use crate::data::DataManager;

#[derive(Debug, Default)]
pub struct ImageInspector {
    repr: String,
    payload_bytes: usize,
}

impl ImageInspector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inspector for ImageInspector {
    fn kind(&self) -> InspectorKind {
        InspectorKind::Image
    }

    fn applies_to(&self, info: &ObjectInfo) -> bool {
        info.image_data.is_some()
    }

    fn set_object_info(&mut self, info: &ObjectInfo, _dm: &DataManager) {
        self.repr = info.repr.clone();
        self.payload_bytes = info.image_data.as_deref().map(str::len).unwrap_or(0);
    }

    fn label(&self) -> String {
        format!("Image data, {} bytes (base64)", self.payload_bytes)
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager) {
        let text = Text::from(vec![
            self.repr.as_str().into(),
            "".into(),
            "(image preview is not available in the terminal)".into(),
        ]);
        let paragraph = Paragraph::new(text).style(Style::default().fg(dm.theme.dimmed_color));
        frame.render_widget(paragraph, area);
    }

    fn reset(&mut self) {
        self.repr.clear();
        self.payload_bytes = 0;
    }
}
