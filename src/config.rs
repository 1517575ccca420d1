//! Settings file for deprecheck.
//!
//! Settings are optional; every field has a default and command-line flags
//! take precedence over the file.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::metadata::MetadataNames;

/// Default settings file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["deprecheck.yaml", ".deprecheck.yaml"];

/// Top-level settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Settings {
    /// Path to the metadata module.
    #[serde(default)]
    pub reference: Option<PathBuf>,
    /// Target SDK version, e.g. "7.0".
    #[serde(default)]
    pub version: Option<String>,
    /// Names of the required metadata types.
    #[serde(default)]
    pub metadata: MetadataNames,
    /// Glob patterns for tree file paths to skip (e.g. "**/Generated/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

impl Settings {
    /// Parse settings from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Compile `excluded_paths`, or `None` when there are no patterns.
    pub fn exclusion_set(&self) -> anyhow::Result<Option<GlobSet>> {
        if self.excluded_paths.is_empty() {
            return Ok(None);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Some(builder.build()?))
    }
}

/// Discover a settings file in `dir`.
pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.as_ref().join(name))
        .find(|path| path.is_file())
}

/// Validate settings.
pub fn validate(settings: &Settings) -> anyhow::Result<()> {
    let names = &settings.metadata;
    for (field, value) in [
        ("root_type", &names.root_type),
        ("attribute_type", &names.attribute_type),
        ("platform_type", &names.platform_type),
        ("platform_prefix", &names.platform_prefix),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("metadata.{} must not be empty", field);
        }
    }
    Ok(())
}
