//! Symbol-level analysis against the metadata module.
//!
//! - `hierarchy`: is a type a descendant of the root managed-object type
//! - `attributes`: which deprecation attribute applies to a symbol, and
//!   which version it carries

mod attributes;
mod hierarchy;

pub use attributes::{
    deprecated_version, member_attribute, member_deprecation, member_kind_for, type_attribute,
    type_deprecation,
};
pub use hierarchy::{base_chain, is_descendant_of, BaseChain};
