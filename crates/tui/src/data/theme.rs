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

//! Resolved theme colors, direct `ratatui::Color` values without any
//! async wrapping.

use ratatui::style::Color;

use crate::config::Config;

/// Color set used by the panels.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Focused panel border color
    pub focused_border: Color,
    /// Unfocused panel border color
    pub unfocused_border: Color,
    /// Selected item background
    pub selection_bg: Color,
    /// Selected item foreground
    pub selection_fg: Color,
    /// Help text color
    pub help_text_color: Color,
    /// Accent color for labels and links
    pub accent_color: Color,
    /// Dimmed color for secondary text
    pub dimmed_color: Color,
    /// Success/positive color
    pub success_color: Color,
    /// Error/negative color
    pub error_color: Color,
    /// Warning color
    pub warning_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focused_border: Color::Cyan,
            unfocused_border: Color::Gray,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            help_text_color: Color::Yellow,
            accent_color: Color::Cyan,
            dimmed_color: Color::DarkGray,
            success_color: Color::Green,
            error_color: Color::Red,
            warning_color: Color::Yellow,
        }
    }
}

impl Theme {
    /// Resolve the active theme from config, falling back to the built-in
    /// defaults when the active name does not resolve.
    pub fn from_config(config: &Config) -> Self {
        let Some(theme) = config.get_active_theme() else {
            return Self::default();
        };
        let colors = &theme.colors;
        Self {
            focused_border: Config::parse_color(&colors.focused_border),
            unfocused_border: Config::parse_color(&colors.unfocused_border),
            selection_bg: Config::parse_color(&colors.selected_bg),
            selection_fg: Config::parse_color(&colors.selected_fg),
            help_text_color: Config::parse_color(&colors.help_text),
            accent_color: Config::parse_color(&colors.accent),
            dimmed_color: Config::parse_color(&colors.dimmed),
            success_color: Config::parse_color(&colors.success),
            error_color: Config::parse_color(&colors.error),
            warning_color: Config::parse_color(&colors.warning),
        }
    }
}
