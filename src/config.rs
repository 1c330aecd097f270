use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default = "default_mouse")]
    pub mouse: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_next_focus")]
    pub next_focus: String,
    #[serde(default = "default_submit")]
    pub submit: String,
    #[serde(default = "default_toggle_complete")]
    pub toggle_complete: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_help")]
    pub help: String,
}

/// Colour scheme for the card. Values are colour strings understood by `parse_color`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_backdrop")]
    pub backdrop: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_muted")]
    pub muted: String,
    #[serde(default = "default_error")]
    pub error: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    /// Empty means "pick black or white against highlight_bg"
    #[serde(default)]
    pub highlight_fg: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            card_width: default_card_width(),
            date_format: default_date_format(),
            time_format: default_time_format(),
            mouse: default_mouse(),
            log_level: default_log_level(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            next_focus: default_next_focus(),
            submit: default_submit(),
            toggle_complete: default_toggle_complete(),
            delete: default_delete(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            help: default_help(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            backdrop: default_backdrop(),
            accent: default_accent(),
            muted: default_muted(),
            error: default_error(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: String::new(),
        }
    }
}

impl Theme {
    /// Get preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("rose".to_string(), Theme::default());

        themes.insert("dark".to_string(), Theme {
            fg: "white".to_string(),
            bg: "black".to_string(),
            backdrop: "darkgray".to_string(),
            accent: "cyan".to_string(),
            muted: "gray".to_string(),
            error: "lightred".to_string(),
            highlight_bg: "blue".to_string(),
            highlight_fg: String::new(),
        });

        themes.insert("light".to_string(), Theme {
            fg: "black".to_string(),
            bg: "white".to_string(),
            backdrop: "gray".to_string(),
            accent: "blue".to_string(),
            muted: "darkgray".to_string(),
            error: "red".to_string(),
            highlight_bg: "lightblue".to_string(),
            highlight_fg: "black".to_string(),
        });

        themes.insert("monochrome".to_string(), Theme {
            fg: "white".to_string(),
            bg: "black".to_string(),
            backdrop: "black".to_string(),
            accent: "white".to_string(),
            muted: "gray".to_string(),
            error: "white".to_string(),
            highlight_bg: "white".to_string(),
            highlight_fg: "black".to_string(),
        });

        themes
    }
}

// Default value functions
fn default_card_width() -> u16 {
    60
}

fn default_date_format() -> String {
    "%a, %b %d, %Y".to_string()
}

fn default_time_format() -> String {
    "%I:%M %p".to_string()
}

fn default_mouse() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_quit() -> String {
    "Ctrl+q".to_string()
}

fn default_next_focus() -> String {
    "Tab".to_string()
}

fn default_submit() -> String {
    "Enter".to_string()
}

fn default_toggle_complete() -> String {
    "Space".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_current_theme() -> String {
    "rose".to_string()
}

fn default_fg() -> String {
    "#1F2937".to_string()
}

fn default_bg() -> String {
    "#FFFFFF".to_string()
}

fn default_backdrop() -> String {
    "#FECDD3".to_string()
}

fn default_accent() -> String {
    "#2563EB".to_string()
}

fn default_muted() -> String {
    "#6B7280".to_string()
}

fn default_error() -> String {
    "#DC2626".to_string()
}

fn default_highlight_bg() -> String {
    "#DBEAFE".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),
    #[error("Invalid {field} '{value}': not a valid strftime format")]
    InvalidFormat { field: &'static str, value: String },
}

impl Config {
    /// Load the per-user configuration, creating it with defaults if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            let mut config = Config::default();
            config.save_to_path(&config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file; a missing file is an error
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !utils::is_valid_time_format(&self.date_format) {
            return Err(ConfigError::InvalidFormat {
                field: "date_format",
                value: self.date_format.clone(),
            });
        }
        if !utils::is_valid_time_format(&self.time_format) {
            return Err(ConfigError::InvalidFormat {
                field: "time_format",
                value: self.time_format.clone(),
            });
        }
        if !self.has_theme(&self.current_theme) {
            return Err(ConfigError::ThemeNotFound(self.current_theme.clone()));
        }
        Ok(())
    }

    /// Save configuration to the given file, creating parent directories
    pub fn save_to_path(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Directory for rotating log files
    pub fn get_log_dir(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let data_dir = utils::get_data_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("logs"))
    }

    /// Get the currently active theme
    /// If highlight_fg is not set (empty string), it will be calculated from highlight_bg
    pub fn get_active_theme(&self) -> Theme {
        use crate::tui::widgets::color::{format_color_for_display, get_contrast_text_color, parse_color};

        let mut theme = if let Some(theme) = self.themes.get(&self.current_theme) {
            theme.clone()
        } else if let Some(theme) = Theme::get_preset_themes().get(&self.current_theme) {
            theme.clone()
        } else {
            Theme::default()
        };

        if theme.highlight_fg.is_empty() {
            let calculated_fg = get_contrast_text_color(parse_color(&theme.highlight_bg));
            theme.highlight_fg = format_color_for_display(&calculated_fg);
        }

        theme
    }

    fn has_theme(&self, name: &str) -> bool {
        self.themes.contains_key(name) || Theme::get_preset_themes().contains_key(name)
    }

    /// Get all available theme names (presets + user-defined), sorted
    pub fn get_available_themes(&self) -> Vec<String> {
        let mut themes: Vec<String> = Theme::get_preset_themes().keys().cloned().collect();

        for theme_name in self.themes.keys() {
            if !themes.contains(theme_name) {
                themes.push(theme_name.clone());
            }
        }

        themes.sort();
        themes
    }
}
