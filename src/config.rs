//! Stage configuration.
//!
//! The config names the package-level metadata files that get relocated into
//! `data/metadata/` and the SIP layout the stage reads from. Every field has a
//! default, so an absent config file means "digitized SIP as delivered".
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_MANIFEST_PATH: &str = "header/metadata.xml";

/// Process documentation files shipped by digitization vendors.
pub const DEFAULT_PACKAGE_METADATA_NAMES: &[&str] =
    &["Prozess_Digitalisierung_PREMIS.xml", "Process_PREMIS.xml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    pub schema_version: u32,
    #[serde(default = "default_package_metadata_names")]
    pub package_metadata_names: Vec<String>,
    #[serde(default = "default_content_dir")]
    pub content_dir: String,
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        default_config()
    }
}

fn default_package_metadata_names() -> Vec<String> {
    DEFAULT_PACKAGE_METADATA_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_content_dir() -> String {
    DEFAULT_CONTENT_DIR.to_string()
}

fn default_manifest_path() -> String {
    DEFAULT_MANIFEST_PATH.to_string()
}

/// Build the config used when no config file is given.
pub fn default_config() -> StageConfig {
    StageConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        package_metadata_names: default_package_metadata_names(),
        content_dir: default_content_dir(),
        manifest_path: default_manifest_path(),
    }
}

/// Render the default config as pretty JSON.
pub fn config_stub() -> Result<String> {
    serde_json::to_string_pretty(&default_config()).context("serialize config stub")
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<StageConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: StageConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject configs the stage cannot honor.
pub fn validate_config(config: &StageConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    for name in &config.package_metadata_names {
        if name.trim().is_empty() {
            return Err(anyhow!("package_metadata_names contains an empty name"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(anyhow!(
                "package metadata name {name:?} must be a base name, not a path"
            ));
        }
    }
    validate_layout_path("content_dir", &config.content_dir)?;
    validate_layout_path("manifest_path", &config.manifest_path)?;
    Ok(())
}

fn validate_layout_path(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field} must not be empty"));
    }
    if Path::new(value).is_absolute() {
        return Err(anyhow!("{field} must be relative to the SIP root: {value}"));
    }
    Ok(())
}
