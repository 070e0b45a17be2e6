//! Configuration system for yamlgrab.
//!
//! Settings have sensible defaults and can be overridden from
//! `~/.config/yamlgrab/config.toml`. Command-line flags take precedence over
//! both.
//!
//! # Example
//!
//! ```
//! use yamlgrab::config::{Config, OutputFormat, PathStyle};
//!
//! let config = Config::default();
//! assert_eq!(config.path_style, PathStyle::GoPatch);
//! assert_eq!(config.output_format, OutputFormat::Yaml);
//! assert!(config.ordered_json);
//!
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     ..Config::default()
//! };
//! assert_eq!(custom.identifier_fields, vec!["name", "key", "id"]);
//! ```

use serde::{Deserialize, Serialize};

/// How paths are rendered in messages and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PathStyle {
    #[default]
    GoPatch,
    Dot,
}

/// How grabbed values are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Configuration for yamlgrab.
///
/// # Fields
///
/// * `path_style` - Rendering of paths: "go-patch" or "dot" (default: "go-patch")
/// * `ordered_json` - Keep the key order of JSON input (default: true)
/// * `output_format` - Printing of results: "yaml" or "json" (default: "yaml")
/// * `identifier_fields` - Fields that name complex list entries (default: name, key, id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rendering of paths
    #[serde(default)]
    pub path_style: PathStyle,

    /// Keep the key order of JSON input instead of sorting keys
    #[serde(default = "default_ordered_json")]
    pub ordered_json: bool,

    /// Printing of grabbed values
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Fields tried, in order, to name complex list entries
    #[serde(default = "default_identifier_fields")]
    pub identifier_fields: Vec<String>,
}

fn default_ordered_json() -> bool {
    true
}

fn default_identifier_fields() -> Vec<String> {
    crate::yamlpath::DEFAULT_IDENTIFIERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path_style: PathStyle::default(),
            ordered_json: default_ordered_json(),
            output_format: OutputFormat::default(),
            identifier_fields: default_identifier_fields(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlgrab/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlgrab");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Identifier fields as string slices, for the path parser.
    pub fn identifiers(&self) -> Vec<&str> {
        self.identifier_fields.iter().map(String::as_str).collect()
    }
}
