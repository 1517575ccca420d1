//! Target context shared read-only by every scanner and resolver.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Enumerant, ModuleBridge, DEPRECATED_FIELD};
use crate::error::{AnalyzerError, Result};

/// `major.minor` style version arguments.
static VERSION_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*$").unwrap());

/// Names of the metadata types the analysis depends on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataNames {
    /// Root managed-object type every checked symbol must descend from.
    pub root_type: String,
    /// Attribute type carrying the deprecation version.
    pub attribute_type: String,
    /// Enumeration of platform versions.
    pub platform_type: String,
    /// Prefix of the platform enumerants, e.g. "iOS_" in "iOS_7_0".
    pub platform_prefix: String,
}

impl Default for MetadataNames {
    fn default() -> Self {
        Self {
            root_type: "Foundation.NSObject".to_string(),
            attribute_type: "ObjCRuntime.AvailabilityAttribute".to_string(),
            platform_type: "ObjCRuntime.Platform".to_string(),
            platform_prefix: "iOS_".to_string(),
        }
    }
}

/// The root base type, as resolved in the metadata module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootType {
    pub name: String,
    pub full_name: String,
}

/// Platform versions enumerated by the metadata module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformVersions {
    prefix: String,
    /// Every enumerant, used for formatting.
    all: Vec<Enumerant>,
    /// Enumerants of the form `<prefix><digit>...`.
    versions: Vec<Enumerant>,
}

impl PlatformVersions {
    pub fn new(prefix: &str, enumerants: &[Enumerant]) -> Self {
        let versions = enumerants
            .iter()
            .filter(|e| {
                e.name.starts_with(prefix)
                    && e.name[prefix.len()..]
                        .chars()
                        .next()
                        .map(|c| c.is_ascii_digit())
                        .unwrap_or(false)
            })
            .cloned()
            .collect();
        Self {
            prefix: prefix.to_string(),
            all: enumerants.to_vec(),
            versions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Highest enumerated version.
    pub fn max(&self) -> Option<u64> {
        self.versions.iter().map(|e| e.value).max()
    }

    /// Resolve a `major.minor` argument, e.g. "7.0" to the value of
    /// `iOS_7_0`.
    pub fn parse(&self, version: &str) -> Option<u64> {
        if !VERSION_ARG.is_match(version) {
            return None;
        }
        let name = format!("{}{}", self.prefix, version.replace('.', "_"));
        let mut matches = self.versions.iter().filter(|e| e.name == name);
        match (matches.next(), matches.next()) {
            (Some(e), None) => Some(e.value),
            _ => None,
        }
    }

    /// Render a version value through its enumerant name: the prefix is
    /// stripped and `_` becomes `.`. Values without a name render as the
    /// raw number.
    pub fn format(&self, value: u64) -> String {
        let named = self
            .versions
            .iter()
            .chain(self.all.iter())
            .find(|e| e.value == value);
        match named {
            Some(e) => e
                .name
                .get(self.prefix.len()..)
                .unwrap_or("")
                .replace('_', "."),
            None => value.to_string(),
        }
    }
}

/// Everything the scanners need to know about the analysis target.
///
/// Built once per run and passed by reference to every component.
pub struct TargetContext<'m> {
    pub module: &'m dyn ModuleBridge,
    pub root: RootType,
    /// Fully qualified name of the deprecation attribute type.
    pub attribute_type: String,
    /// Identity of the metadata module, matched against symbol modules.
    pub module_identity: String,
    pub platform: PlatformVersions,
    pub target_version: u64,
    /// Whether the target version was defaulted to the maximum.
    pub defaulted_version: bool,
}

impl<'m> TargetContext<'m> {
    /// Resolve the required metadata types and the target version.
    ///
    /// Fails when any required type is missing, the module has no title,
    /// the attribute type has no `Deprecated` member, the platform type
    /// enumerates no versions, or `version` is not one of them.
    pub fn new(
        module: &'m dyn ModuleBridge,
        names: &MetadataNames,
        version: Option<&str>,
    ) -> Result<Self> {
        let root = module
            .resolve_type_ignore_case(&names.root_type)
            .ok_or_else(|| AnalyzerError::MissingType(names.root_type.clone()))?;
        let attribute = module
            .resolve_type_ignore_case(&names.attribute_type)
            .ok_or_else(|| AnalyzerError::MissingType(names.attribute_type.clone()))?;
        let platform_type = module
            .resolve_type_ignore_case(&names.platform_type)
            .ok_or_else(|| AnalyzerError::MissingType(names.platform_type.clone()))?;

        let module_identity = module
            .title()
            .filter(|t| !t.is_empty())
            .ok_or(AnalyzerError::MissingTitle)?
            .to_string();

        if !attribute.has_member(DEPRECATED_FIELD) {
            return Err(AnalyzerError::MissingDeprecatedMember(
                attribute.full_name.clone(),
            ));
        }

        let platform = PlatformVersions::new(&names.platform_prefix, &platform_type.enumerants);
        if platform.is_empty() {
            return Err(AnalyzerError::NoPlatformVersions(platform_type.full_name.clone()));
        }
        let (target_version, defaulted_version) = match version {
            Some(v) => (
                platform
                    .parse(v)
                    .ok_or_else(|| AnalyzerError::InvalidVersion(v.to_string()))?,
                false,
            ),
            None => (
                platform
                    .max()
                    .ok_or_else(|| AnalyzerError::NoPlatformVersions(platform_type.full_name.clone()))?,
                true,
            ),
        };

        tracing::debug!(
            root = %root.full_name,
            attribute = %attribute.full_name,
            module = %module_identity,
            target_version,
            "resolved target context"
        );

        Ok(Self {
            module,
            root: RootType {
                name: root.name().to_string(),
                full_name: root.full_name.clone(),
            },
            attribute_type: attribute.full_name.clone(),
            module_identity,
            platform,
            target_version,
            defaulted_version,
        })
    }

    /// The target version, formatted like "7.0".
    pub fn target_version_display(&self) -> String {
        self.platform.format(self.target_version)
    }

    /// Whether a deprecation version is reportable against the target.
    pub fn is_reportable(&self, version: u64) -> bool {
        version != 0 && version <= self.target_version
    }
}
