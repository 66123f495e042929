//! Configuration system for the Loupe TUI
//!
//! Manages user preferences including color schemes and panel settings.

use eyre::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current theme configuration
    pub theme: ThemeConfig,
    /// Panel-specific settings
    pub panels: PanelConfig,
}

/// Theme configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Current active theme name
    pub active: String,
    /// Available themes
    pub themes: std::collections::HashMap<String, Theme>,
}

/// Individual theme definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Theme display name
    pub name: String,
    /// Theme description
    pub description: String,
    /// Color scheme for different UI elements
    pub colors: ColorScheme,
}

/// Color scheme definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Focused panel border color
    pub focused_border: String,
    /// Unfocused panel border color
    pub unfocused_border: String,
    /// Selected item background
    pub selected_bg: String,
    /// Selected item foreground
    pub selected_fg: String,
    /// Help text color
    pub help_text: String,
    /// Accent color for labels and links
    pub accent: String,
    /// Dimmed color for secondary text
    pub dimmed: String,
    /// Success/positive color
    pub success: String,
    /// Error/negative color
    pub error: String,
    /// Warning color
    pub warning: String,
}

/// Panel-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Objects panel settings
    pub objects: ObjectsPanelConfig,
    /// Inspector panel settings
    pub inspector: InspectorPanelConfig,
}

/// Objects panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectsPanelConfig {
    /// Maximum repr length shown per variable
    pub max_repr_length: usize,
}

/// Inspector panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorPanelConfig {
    /// Show value ids instead of reprs in sequence/mapping grids
    pub heap_mode: bool,
    /// Maximum rows rendered in element/entry/attribute grids
    pub max_grid_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { theme: ThemeConfig::default(), panels: PanelConfig::default() }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let mut themes = std::collections::HashMap::new();

        // Default theme
        themes.insert(
            "default".to_string(),
            Theme {
                name: "Default".to_string(),
                description: "Default Loupe theme with cyan accents".to_string(),
                colors: ColorScheme {
                    focused_border: "cyan".to_string(),
                    unfocused_border: "gray".to_string(),
                    selected_bg: "blue".to_string(),
                    selected_fg: "white".to_string(),
                    help_text: "yellow".to_string(),
                    accent: "cyan".to_string(),
                    dimmed: "dark_gray".to_string(),
                    success: "green".to_string(),
                    error: "red".to_string(),
                    warning: "yellow".to_string(),
                },
            },
        );

        // Dark theme
        themes.insert(
            "dark".to_string(),
            Theme {
                name: "Dark".to_string(),
                description: "Dark theme with minimal colors".to_string(),
                colors: ColorScheme {
                    focused_border: "white".to_string(),
                    unfocused_border: "dark_gray".to_string(),
                    selected_bg: "dark_gray".to_string(),
                    selected_fg: "white".to_string(),
                    help_text: "gray".to_string(),
                    accent: "white".to_string(),
                    dimmed: "dark_gray".to_string(),
                    success: "green".to_string(),
                    error: "red".to_string(),
                    warning: "yellow".to_string(),
                },
            },
        );

        // Light theme
        themes.insert(
            "light".to_string(),
            Theme {
                name: "Light".to_string(),
                description: "Light theme with dark text on light backgrounds".to_string(),
                colors: ColorScheme {
                    focused_border: "blue".to_string(),
                    unfocused_border: "gray".to_string(),
                    selected_bg: "light_blue".to_string(),
                    selected_fg: "black".to_string(),
                    help_text: "dark_gray".to_string(),
                    accent: "blue".to_string(),
                    dimmed: "gray".to_string(),
                    success: "green".to_string(),
                    error: "red".to_string(),
                    warning: "yellow".to_string(),
                },
            },
        );

        Self { active: "default".to_string(), themes }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            objects: ObjectsPanelConfig { max_repr_length: loupe_common::MAX_REPR_LENGTH_IN_GRID },
            inspector: InspectorPanelConfig { heap_mode: false, max_grid_rows: 10 },
        }
    }
}

impl Config {
    /// Get the config file path (~/.loupe.toml)
    pub fn config_path() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| eyre::eyre!("Unable to determine home directory"))?;
        Ok(home.join(".loupe.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("Config file not found, creating default at {:?}", config_path);
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from_path(config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(config_path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {config_path:?}"))?;

        let config: Self =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        debug!("Loaded configuration from {:?}", config_path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {config_path:?}"))?;

        debug!("Saved configuration to {:?}", config_path);
        Ok(())
    }

    /// Get the currently active theme
    pub fn get_active_theme(&self) -> Option<&Theme> {
        self.theme.themes.get(&self.theme.active)
    }

    /// Switch to a different theme
    pub fn set_theme(&mut self, theme_name: &str) -> Result<()> {
        if !self.theme.themes.contains_key(theme_name) {
            return Err(eyre::eyre!("Theme '{}' not found", theme_name));
        }

        self.theme.active = theme_name.to_string();
        info!("Switched to theme: {}", theme_name);
        Ok(())
    }

    /// Convert color string to ratatui Color
    pub fn parse_color(color_str: &str) -> Color {
        match color_str.to_lowercase().as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "gray" | "light_gray" => Color::Gray,
            "dark_gray" => Color::DarkGray,
            "light_red" => Color::LightRed,
            "light_green" => Color::LightGreen,
            "light_yellow" => Color::LightYellow,
            "light_blue" => Color::LightBlue,
            "light_magenta" => Color::LightMagenta,
            "light_cyan" => Color::LightCyan,
            "white" => Color::White,
            _ => {
                warn!("Unknown color '{}', using default gray", color_str);
                Color::Gray
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_all_builtin_themes() {
        let config = Config::default();
        for name in ["default", "dark", "light"] {
            assert!(config.theme.themes.contains_key(name), "missing theme {name}");
        }
        assert!(config.get_active_theme().is_some());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.theme.active, config.theme.active);
        assert_eq!(back.panels.inspector.max_grid_rows, 10);
    }

    #[test]
    fn unknown_colors_fall_back_to_gray() {
        assert_eq!(Config::parse_color("mauve"), Color::Gray);
        assert_eq!(Config::parse_color("Cyan"), Color::Cyan);
    }
}
