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

//! Status line builder for the panels.

/// Composable status line for the bottom of a focused panel.
#[derive(Debug, Default)]
pub struct StatusBar {
    /// Current panel
    current_panel: Option<String>,
    /// Additional status messages
    messages: Vec<String>,
}

impl StatusBar {
    /// Create an empty status bar
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current panel name
    pub fn current_panel(mut self, panel: String) -> Self {
        self.current_panel = Some(panel);
        self
    }

    /// Add a status message
    pub fn message<S: Into<String>>(mut self, msg: S) -> Self {
        self.messages.push(msg.into());
        self
    }

    /// Build the complete status line
    pub fn build(&self) -> String {
        let mut parts = Vec::new();

        if let Some(panel) = &self.current_panel {
            parts.push(format!("Panel: {panel}"));
        }

        parts.extend(self.messages.clone());

        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_in_order() {
        let line = StatusBar::new()
            .current_panel("Inspector".to_string())
            .message("Page: Data")
            .message("3 elements")
            .build();
        assert_eq!(line, "Panel: Inspector | Page: Data | 3 elements");
    }
}
