//! Run configuration
//!
//! Defaults can be overridden by an optional TOML file, which the CLI in turn
//! overrides with its flags:
//!
//! ```toml
//! output_dir = "output"
//! checker = "ampersand/ampersand"
//! model_file = "model.adl"
//! rules_file = "rules.adl"
//! standalone_file = "standalone.adl"
//! foreign_include = "model.archimate"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CapValError, Result};

/// Configuration of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapValConfig {
    /// Directory the generated files are written to
    pub output_dir: PathBuf,

    /// Checker executable
    pub checker: PathBuf,

    /// Population file name
    pub model_file: String,

    /// Rules file name
    pub rules_file: String,

    /// Standalone rules file name
    pub standalone_file: String,

    /// File the standalone rules `INCLUDE`
    pub foreign_include: String,
}

impl Default for CapValConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            checker: PathBuf::from("ampersand/ampersand"),
            model_file: "model.adl".to_string(),
            rules_file: "rules.adl".to_string(),
            standalone_file: "standalone.adl".to_string(),
            foreign_include: "model.archimate".to_string(),
        }
    }
}

impl CapValConfig {
    /// Parse a TOML configuration; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for malformed TOML, unknown keys or invalid
    /// file names.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CapValError::InvalidConfig {
            message: format!("{}: {}", origin, e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CapValError::InvalidConfig {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Check that every output file name is a plain, non-empty file name
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        for (key, name) in [
            ("model_file", &self.model_file),
            ("rules_file", &self.rules_file),
            ("standalone_file", &self.standalone_file),
        ] {
            let is_plain = Path::new(name).file_name().map(|f| f == name.as_str()) == Some(true);
            if !is_plain {
                return Err(CapValError::InvalidConfig {
                    message: format!("{} must be a plain file name, got {:?}", key, name),
                });
            }
        }

        if self.foreign_include.is_empty() {
            return Err(CapValError::InvalidConfig {
                message: "foreign_include must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
