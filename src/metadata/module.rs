//! Metadata module loaded from a JSON or YAML description.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ExternalType, ModuleBridge};
use crate::error::{AnalyzerError, Result};

#[derive(Debug, Clone, Deserialize)]
struct ModuleRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    types: Vec<ExternalType>,
}

/// A loaded metadata module.
#[derive(Debug, Clone)]
pub struct MetadataModule {
    title: Option<String>,
    types: Vec<ExternalType>,
    by_name: HashMap<String, usize>,
    location: PathBuf,
}

impl MetadataModule {
    /// Build a module from its title and types.
    pub fn new(title: Option<String>, types: Vec<ExternalType>) -> Self {
        let by_name = types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.full_name.clone(), i))
            .collect();
        Self {
            title,
            types,
            by_name,
            location: PathBuf::new(),
        }
    }

    /// Load a module description. YAML is used for `.yaml`/`.yml` files,
    /// JSON for everything else.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AnalyzerError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let record: ModuleRecord = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            _ => serde_json::from_str(&content).map_err(|e| e.to_string()),
        }
        .map_err(|message| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        let mut module = Self::new(record.title, record.types);
        module.location = path.to_path_buf();
        tracing::debug!(
            path = %path.display(),
            types = module.types.len(),
            "loaded metadata module"
        );
        Ok(module)
    }

    /// Path the module was loaded from (empty for in-memory modules).
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn types(&self) -> &[ExternalType] {
        &self.types
    }
}

impl ModuleBridge for MetadataModule {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn resolve_type(&self, full_name: &str) -> Option<&ExternalType> {
        self.by_name.get(full_name).map(|&i| &self.types[i])
    }

    fn resolve_type_ignore_case(&self, full_name: &str) -> Option<&ExternalType> {
        self.resolve_type(full_name).or_else(|| {
            self.types
                .iter()
                .find(|t| t.full_name.eq_ignore_ascii_case(full_name))
        })
    }
}
