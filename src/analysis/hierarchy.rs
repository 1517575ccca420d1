//! Base-type chain walking.

use std::collections::HashSet;

use crate::metadata::TargetContext;
use crate::semantic::{SemanticModel, Symbol, SymbolId, SymbolKind};

/// Iterator over a type and its successive base types.
///
/// Stops at the end of the chain, at an id missing from the model, or when
/// a type repeats (a malformed, cyclic chain).
pub struct BaseChain<'a> {
    model: &'a dyn SemanticModel,
    next: Option<SymbolId>,
    seen: HashSet<SymbolId>,
}

impl<'a> Iterator for BaseChain<'a> {
    type Item = &'a Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        if !self.seen.insert(id) {
            return None;
        }
        let symbol = self.model.symbol(id)?;
        self.next = symbol.base_type;
        Some(symbol)
    }
}

/// Walk `start` and its bases, `start` included.
pub fn base_chain(model: &dyn SemanticModel, start: Option<SymbolId>) -> BaseChain<'_> {
    BaseChain {
        model,
        next: start,
        seen: HashSet::new(),
    }
}

/// Whether `ty` is the root managed-object type or derives from it.
///
/// Identity is name plus module identity: the root type comes from the
/// metadata module, not from the model the symbols were bound in. Absent
/// and array types never match.
pub fn is_descendant_of(
    model: &dyn SemanticModel,
    ty: Option<SymbolId>,
    ctx: &TargetContext<'_>,
) -> bool {
    let Some(symbol) = ty.and_then(|id| model.symbol(id)) else {
        return false;
    };
    if symbol.kind == SymbolKind::ArrayType {
        return false;
    }

    base_chain(model, ty)
        .any(|t| t.module == ctx.module_identity && t.name == ctx.root.name)
}
