//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treenav/treenav.toml`
//! 3. Local config: `<dir>/.treenav.toml` (working directory or `-C`)
//! 4. Environment variables: `TREENAV_*` prefix, `__` as section separator

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::TreeBuilder;

/// Shape of the `generate` demo tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenerateConfig {
    /// Nodes per level
    pub breadth: usize,
    /// Number of levels
    pub depth: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            breadth: 5,
            depth: 3,
        }
    }
}

impl GenerateConfig {
    pub fn builder(&self) -> TreeBuilder {
        TreeBuilder::new()
            .with_breadth(self.breadth)
            .with_depth(self.depth)
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub show_hidden: Option<bool>,
    pub scan_depth: Option<usize>,
    pub show_status: Option<bool>,
    pub label: Option<String>,
    pub generate: RawGenerateConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawGenerateConfig {
    pub breadth: Option<usize>,
    pub depth: Option<usize>,
}

/// Unified configuration for treenav.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Include dot-files when scanning directories
    pub show_hidden: bool,
    /// Directory levels expanded and loaded below the top level when scanning
    pub scan_depth: usize,
    /// Render trailing status markers
    pub show_status: bool,
    /// Root label for rendered TOML trees
    pub label: String,
    /// Demo tree shape
    pub generate: GenerateConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hidden: false,
            scan_depth: 1,
            show_status: true,
            label: "Files".into(),
            generate: GenerateConfig::default(),
        }
    }
}

/// Get the XDG config directory for treenav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treenav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treenav.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".treenav.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            show_hidden: overlay.show_hidden.unwrap_or(self.show_hidden),
            scan_depth: overlay.scan_depth.unwrap_or(self.scan_depth),
            show_status: overlay.show_status.unwrap_or(self.show_status),
            label: overlay.label.clone().unwrap_or_else(|| self.label.clone()),
            generate: GenerateConfig {
                breadth: overlay.generate.breadth.unwrap_or(self.generate.breadth),
                depth: overlay.generate.depth.unwrap_or(self.generate.depth),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.treenav.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local_dir)
    }

    /// Load settings from an explicit global config file instead of the XDG location.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply TREENAV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREENAV")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("show_hidden") {
            settings.show_hidden = val;
        }
        if let Ok(val) = config.get::<usize>("scan_depth") {
            settings.scan_depth = val;
        }
        if let Ok(val) = config.get_bool("show_status") {
            settings.show_status = val;
        }
        if let Ok(val) = config.get_string("label") {
            settings.label = val;
        }
        if let Ok(val) = config.get::<usize>("generate.breadth") {
            settings.generate.breadth = val;
        }
        if let Ok(val) = config.get::<usize>("generate.depth") {
            settings.generate.depth = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treenav configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treenav/treenav.toml
#   Local:  <dir>/.treenav.toml
#   Env:    TREENAV_* environment variables (TREENAV_GENERATE__DEPTH=4)

# Include dot-files when scanning directories
# show_hidden = false

# Directory levels expanded below the top level when scanning
# scan_depth = 1

# Render trailing status markers ([added], [modified], ...)
# show_status = true

# Root label for rendered tree files
# label = "Files"

[generate]
# breadth = 5
# depth = 3
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
