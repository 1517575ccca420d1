//! Deprecation attribute resolution and version extraction.
//!
//! Symbols are bound in the analyzed compilation, but their deprecation
//! metadata lives in the metadata module. Resolution finds the closest type
//! in the symbol's hierarchy that the metadata module declares, re-resolves
//! it there by qualified name, and reads the attribute off the matching
//! declaration.
//!
//! Every miss along the way is `None`: most symbols have no metadata.

use std::collections::HashSet;

use super::hierarchy::base_chain;
use crate::error::{AnalyzerError, Result};
use crate::metadata::{AttributePayload, ExternalType, MemberKind, TargetContext, DEPRECATED_FIELD};
use crate::semantic::{SemanticModel, Symbol, SymbolId, SymbolKind};

/// Member kind to look up in the metadata module for a symbol kind.
pub fn member_kind_for(kind: SymbolKind) -> Option<MemberKind> {
    match kind {
        SymbolKind::Method => Some(MemberKind::Method),
        SymbolKind::Property => Some(MemberKind::Property),
        _ => None,
    }
}

/// Deprecation attribute for a method or property symbol.
///
/// Walks the containing type's base chain to the first type declared in
/// the metadata module, then looks the member up by name and kind there.
/// A re-declaration without the attribute inherits it from the nearest
/// external base declaring the same member.
pub fn member_attribute<'m>(
    model: &dyn SemanticModel,
    symbol: SymbolId,
    kind: MemberKind,
    ctx: &TargetContext<'m>,
) -> Option<&'m AttributePayload> {
    let symbol = model.symbol(symbol)?;
    let owner = closest_module_type(model, symbol.containing_type, ctx)?;
    let external = ctx.module.resolve_type(owner.display_name())?;

    external_chain(ctx, external)
        .filter_map(|t| t.member(&symbol.name, kind))
        .find_map(|m| first_attribute(&m.attributes, ctx))
}

/// Deprecation attribute for a type symbol.
///
/// The type's own chain is walked (the type included) to the first type
/// declared in the metadata module. Attributes of that type's external
/// bases are inherited; its own attributes come first.
pub fn type_attribute<'m>(
    model: &dyn SemanticModel,
    ty: SymbolId,
    ctx: &TargetContext<'m>,
) -> Option<&'m AttributePayload> {
    let owner = closest_module_type(model, Some(ty), ctx)?;
    let external = ctx.module.resolve_type(owner.display_name())?;

    external_chain(ctx, external).find_map(|t| first_attribute(&t.attributes, ctx))
}

/// Read the deprecation version off a payload.
///
/// A payload without an unsigned `Deprecated` field means the metadata has
/// the wrong shape, which aborts the run.
pub fn deprecated_version(payload: &AttributePayload) -> Result<u64> {
    payload
        .field(DEPRECATED_FIELD)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| AnalyzerError::MissingVersionField {
            attribute: payload.type_name.clone(),
        })
}

/// Resolve the reportable deprecation version of a member symbol, if any.
pub fn member_deprecation(
    model: &dyn SemanticModel,
    symbol: SymbolId,
    ctx: &TargetContext<'_>,
) -> Result<Option<u64>> {
    let Some(kind) = model.symbol(symbol).and_then(|s| member_kind_for(s.kind)) else {
        return Ok(None);
    };
    reportable(member_attribute(model, symbol, kind, ctx), ctx)
}

/// Resolve the reportable deprecation version of a type symbol, if any.
pub fn type_deprecation(
    model: &dyn SemanticModel,
    ty: SymbolId,
    ctx: &TargetContext<'_>,
) -> Result<Option<u64>> {
    reportable(type_attribute(model, ty, ctx), ctx)
}

fn reportable(payload: Option<&AttributePayload>, ctx: &TargetContext<'_>) -> Result<Option<u64>> {
    let Some(payload) = payload else {
        return Ok(None);
    };
    let version = deprecated_version(payload)?;
    Ok(ctx.is_reportable(version).then_some(version))
}

/// First type in the chain starting at `start` declared in the metadata
/// module.
fn closest_module_type<'a>(
    model: &'a dyn SemanticModel,
    start: Option<SymbolId>,
    ctx: &TargetContext<'_>,
) -> Option<&'a Symbol> {
    base_chain(model, start).find(|t| t.module == ctx.module_identity)
}

fn first_attribute<'m>(
    attributes: &'m [AttributePayload],
    ctx: &TargetContext<'_>,
) -> Option<&'m AttributePayload> {
    attributes.iter().find(|a| a.type_name == ctx.attribute_type)
}

/// An external type followed by its external bases.
fn external_chain<'m>(
    ctx: &TargetContext<'m>,
    start: &'m ExternalType,
) -> impl Iterator<Item = &'m ExternalType> {
    let module = ctx.module;
    let mut seen = HashSet::new();
    std::iter::successors(Some(start), move |t| {
        t.base.as_deref().and_then(|base| module.resolve_type(base))
    })
    .take_while(move |t| seen.insert(t.full_name.as_str()))
}
