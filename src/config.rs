//! Dropdown configuration.
//!
//! [`DropdownConfig`] is the serializable part of a dropdown's props: every
//! option that is plain data. Handlers and content are attached separately on
//! [`DropdownProps`](crate::DropdownProps). Keys are camelCase and every
//! field is optional in JSON.

use std::path::Path;

use popdown_ui::{builder_field, builder_option, Style};
use serde::{Deserialize, Serialize};

use crate::placements::{Align, Placement};
use crate::trigger::Action;

/// Default class-name prefix.
pub const DEFAULT_PREFIX: &str = "rc-dropdown";

/// Log level setting for the demo binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Plain-data options of a dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DropdownConfig {
    /// Class-name prefix for the popup and derived classes
    #[serde(rename = "prefixCls")]
    pub prefix: String,

    /// Interactions that open the overlay
    pub trigger: Vec<Action>,

    /// Explicit show interactions
    pub show_action: Vec<Action>,

    /// Explicit hide interactions; derived from `trigger` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_action: Option<Vec<Action>>,

    pub placement: Placement,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,

    pub overlay_class_name: String,

    pub overlay_style: Style,

    /// Class added to the trigger while open; `{prefix}-open` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_class_name: Option<String>,

    /// Whether the overlay is at least as wide as the trigger; derived when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_overlay_width_match_trigger: Option<bool>,

    /// Align to the pointer instead of the trigger box
    pub align_point: bool,

    /// Controlled visibility; uncontrolled when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    /// Initial visibility in uncontrolled mode
    pub default_visible: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            trigger: vec![Action::Hover],
            show_action: Vec::new(),
            hide_action: None,
            placement: Placement::default(),
            align: None,
            overlay_class_name: String::new(),
            overlay_style: Style::default(),
            open_class_name: None,
            min_overlay_width_match_trigger: None,
            align_point: false,
            visible: None,
            default_visible: false,
            transition_name: None,
            animation: None,
        }
    }
}

impl DropdownConfig {
    pub fn new() -> Self {
        Self::default()
    }

    builder_field!(prefix, String);
    builder_field!(trigger, Vec<Action>);
    builder_field!(show_action, Vec<Action>);
    builder_option!(hide_action, Vec<Action>);
    builder_field!(placement, Placement);
    builder_option!(align, Align);
    builder_field!(overlay_class_name, String);
    builder_field!(overlay_style, Style);
    builder_option!(open_class_name, String);
    builder_option!(min_overlay_width_match_trigger, bool);
    builder_field!(align_point, bool);
    builder_option!(visible, bool);
    builder_field!(default_visible, bool);
    builder_option!(transition_name, String);
    builder_option!(animation, String);

    /// Hide interactions after applying the context-menu default.
    ///
    /// A context-menu dropdown with no explicit hide actions closes on click.
    pub fn resolved_hide_action(&self) -> Vec<Action> {
        match &self.hide_action {
            Some(actions) => actions.clone(),
            None if self.trigger.contains(&Action::ContextMenu) => vec![Action::Click],
            None => Vec::new(),
        }
    }

    /// Parse configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded dropdown configuration from {}", path.display());
        Ok(config)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
