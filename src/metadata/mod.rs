//! External metadata module: the platform binding's reflective description.
//!
//! The symbols under analysis and the metadata module live in different
//! type universes. Types are matched across them by module identity and
//! name, then re-resolved by fully qualified name through `ModuleBridge`.

mod context;
mod locate;
mod module;

pub use context::{MetadataNames, PlatformVersions, RootType, TargetContext};
pub use locate::{auto_locate, DEFAULT_MODULE_NAMES};
pub use module::MetadataModule;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the payload field holding the deprecation version.
pub const DEPRECATED_FIELD: &str = "Deprecated";

/// Cross-domain lookup into the metadata module.
pub trait ModuleBridge {
    /// Identity string the module declares for itself (its title).
    fn title(&self) -> Option<&str>;

    /// Resolve a type by fully qualified name.
    fn resolve_type(&self, full_name: &str) -> Option<&ExternalType>;

    /// Resolve a type by fully qualified name, ignoring ASCII case.
    fn resolve_type_ignore_case(&self, full_name: &str) -> Option<&ExternalType>;
}

/// Kind of member declared on an external type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Property,
    Field,
    Constructor,
    Event,
}

/// An attribute instance attached to an external declaration.
///
/// Only the `Deprecated` field is ever read; everything else is carried
/// opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePayload {
    /// Fully qualified attribute type name.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl AttributePayload {
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }
}

/// A member of an external type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalMember {
    pub name: String,
    pub kind: MemberKind,
    #[serde(default)]
    pub attributes: Vec<AttributePayload>,
}

/// A named enumerant of an external enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumerant {
    pub name: String,
    pub value: u64,
}

/// A type declared in the metadata module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalType {
    /// Fully qualified name, e.g. "Foundation.NSObject".
    pub full_name: String,
    /// Fully qualified name of the base type, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributePayload>,
    #[serde(default)]
    pub members: Vec<ExternalMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enumerants: Vec<Enumerant>,
}

impl ExternalType {
    /// Simple name: the last segment of the qualified name.
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.full_name)
    }

    /// A member declared directly on this type.
    pub fn member(&self, name: &str, kind: MemberKind) -> Option<&ExternalMember> {
        self.members
            .iter()
            .find(|m| m.name == name && m.kind == kind)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_type_name() {
        let ty = ExternalType {
            full_name: "Foundation.NSObject".to_string(),
            base: None,
            attributes: vec![],
            members: vec![ExternalMember {
                name: "Dispose".to_string(),
                kind: MemberKind::Method,
                attributes: vec![],
            }],
            enumerants: vec![],
        };
        assert_eq!(ty.name(), "NSObject");
        assert!(ty.member("Dispose", MemberKind::Method).is_some());
        assert!(ty.member("Dispose", MemberKind::Property).is_none());
        assert!(ty.has_member("Dispose"));
    }
}
