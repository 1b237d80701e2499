//! Runtime configuration shared by all actions.

use crate::error::{ErrorExt, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Shell used when `%ComSpec%` is not set.
pub const DEFAULT_SHELL: &str = r"C:\Windows\System32\cmd.exe";

/// File name prefix of the scratch uninstaller copy.
pub const DEFAULT_UNINSTALLER_PREFIX: &str = "nsis-uninstaller-";

/// Configuration for custom action execution
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Command interpreter used to start GUI programs and wait for them
    pub shell: PathBuf,
    /// Directory for the scratch uninstaller copy (system temp dir when unset)
    pub temp_dir: Option<PathBuf>,
    /// File name prefix of the scratch uninstaller copy
    pub uninstaller_prefix: String,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            shell: std::env::var_os("ComSpec")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SHELL)),
            temp_dir: None,
            uninstaller_prefix: DEFAULT_UNINSTALLER_PREFIX.to_string(),
        }
    }
}

impl ActionConfig {
    /// Directory the scratch uninstaller copy is created in.
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Property assignments read by the console host.
///
/// Every top-level key is a property name; values must be strings, the
/// same as the installer engine would hand over.
#[derive(Debug, Deserialize)]
pub struct PropertiesFile {
    #[serde(flatten)]
    properties: BTreeMap<String, String>,
}

impl PropertiesFile {
    /// Parse the TOML text of a properties file.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// The assignments, keyed by property name.
    pub fn into_properties(self) -> BTreeMap<String, String> {
        self.properties
    }
}

/// Load a TOML file of `NAME = "value"` property assignments.
pub fn load_properties(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path).fs_context("reading properties file", path)?;
    PropertiesFile::parse(&contents).map(PropertiesFile::into_properties)
}
