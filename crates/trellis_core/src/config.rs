//! Trellis configuration file handling
//!
//! The configuration is read once at startup and handed to [`UiContext`];
//! widget constructors consult it when building [`WidgetOptions`].
//!
//! [`UiContext`]: crate::context::UiContext
//! [`WidgetOptions`]: crate::toolkit::WidgetOptions

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::kind::ComponentKind;

/// Default configuration file name
pub const CONFIG_FILE: &str = "trellis.toml";

/// Top-level Trellis configuration (trellis.toml)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrellisConfig {
    /// Verbose logging
    #[serde(default)]
    pub debug: bool,
    /// Toolkit skin / theme identifier
    #[serde(default = "default_skin")]
    pub skin: String,
    /// Icon locations
    #[serde(default)]
    pub icons: IconPaths,
}

fn default_skin() -> String {
    "material".to_string()
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            debug: false,
            skin: default_skin(),
            icons: IconPaths::default(),
        }
    }
}

/// Icon paths handed to the toolkit
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct IconPaths {
    /// Fallback for widgets without a dedicated path
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_menu")]
    pub menu: String,
    #[serde(default = "default_toolbar")]
    pub toolbar: String,
    #[serde(default = "default_tree")]
    pub tree: String,
}

fn default_base() -> String {
    "imgs/".to_string()
}

fn default_menu() -> String {
    "imgs/menu/".to_string()
}

fn default_toolbar() -> String {
    "imgs/toolbar/".to_string()
}

fn default_tree() -> String {
    "imgs/tree/".to_string()
}

impl Default for IconPaths {
    fn default() -> Self {
        Self {
            base: default_base(),
            menu: default_menu(),
            toolbar: default_toolbar(),
            tree: default_tree(),
        }
    }
}

impl IconPaths {
    /// The icon path a widget of `kind` should use, if any
    pub fn for_kind(&self, kind: ComponentKind) -> Option<&str> {
        let path = match kind {
            ComponentKind::Menu => &self.menu,
            ComponentKind::Toolbar => &self.toolbar,
            ComponentKind::Tree => &self.tree,
            _ => &self.base,
        };
        (!path.is_empty()).then_some(path.as_str())
    }
}

impl TrellisConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `trellis.toml` from `dir`, falling back to defaults when absent
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TrellisConfig::from_toml_str("").unwrap();
        assert_eq!(config, TrellisConfig::default());
        assert!(!config.debug);
        assert_eq!(config.skin, "material");
    }

    #[test]
    fn test_partial_config() {
        let config = TrellisConfig::from_toml_str(
            r#"
            debug = true
            skin = "terrace"

            [icons]
            tree = "assets/tree/"
            "#,
        )
        .unwrap();

        assert!(config.debug);
        assert_eq!(config.skin, "terrace");
        assert_eq!(config.icons.tree, "assets/tree/");
        assert_eq!(config.icons.menu, "imgs/menu/");
    }

    #[test]
    fn test_invalid_config() {
        let err = TrellisConfig::from_toml_str("debug = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_icon_path_per_kind() {
        let mut icons = IconPaths::default();
        assert_eq!(icons.for_kind(ComponentKind::Menu), Some("imgs/menu/"));
        assert_eq!(icons.for_kind(ComponentKind::Grid), Some("imgs/"));

        icons.base.clear();
        assert_eq!(icons.for_kind(ComponentKind::Grid), None);
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let mut config = TrellisConfig::default();
        config.debug = true;
        config.icons.toolbar = "icons/".into();

        let text = config.to_toml_string().unwrap();
        assert_eq!(TrellisConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TrellisConfig::load("/nonexistent/trellis.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
