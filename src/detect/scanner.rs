//! Node-pattern scanners.
//!
//! All four scanners share one algorithm: pick candidate nodes, bind each
//! to a symbol, keep it if the relevant type descends from the root type
//! and a reportable deprecation resolves. They differ only in which nodes
//! they visit and how the symbol is obtained, selected by `ScanKind`.

use std::fmt;

use super::{Finding, Findings};
use crate::analysis::{is_descendant_of, member_deprecation, type_deprecation};
use crate::error::Result;
use crate::metadata::TargetContext;
use crate::semantic::{NodeId, SemanticModel, SymbolId, SymbolKind, SyntaxKind, SyntaxTree};

/// Which node pattern a scanner visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanKind {
    /// Overriding property and method declarations.
    TypeDeclaration,
    /// Locals and fields whose declared type is deprecated.
    VariableDeclaration,
    /// Qualified member references (`obj.Member`).
    MemberAccess,
    /// Bare identifier references to properties and methods.
    Identifier,
}

impl ScanKind {
    /// All scanners, in reporting order.
    pub const ALL: [ScanKind; 4] = [
        ScanKind::TypeDeclaration,
        ScanKind::VariableDeclaration,
        ScanKind::MemberAccess,
        ScanKind::Identifier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanKind::TypeDeclaration => "type_declaration",
            ScanKind::VariableDeclaration => "variable_declaration",
            ScanKind::MemberAccess => "member_access",
            ScanKind::Identifier => "identifier",
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// Member attribute via the containing type's chain.
    Member,
    /// Attribute on the type itself.
    Type,
}

/// A node bound to the symbol it would be reported under.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: NodeId,
    symbol: SymbolId,
    /// Type that must descend from the root type.
    owner: Option<SymbolId>,
    lookup: Lookup,
}

/// One scanner over a (tree, model) pair.
pub struct Scanner<'c, 'm> {
    kind: ScanKind,
    ctx: &'c TargetContext<'m>,
}

impl<'c, 'm> Scanner<'c, 'm> {
    pub fn new(kind: ScanKind, ctx: &'c TargetContext<'m>) -> Self {
        Self { kind, ctx }
    }

    /// Scan a tree. The tree and model are only read, so scanning the same
    /// pair twice yields the same findings.
    pub fn scan(&self, tree: &dyn SyntaxTree, model: &dyn SemanticModel) -> Result<Findings> {
        let candidates = match self.kind {
            ScanKind::TypeDeclaration => type_declarations(tree, model),
            ScanKind::VariableDeclaration => variable_declarations(tree, model),
            ScanKind::MemberAccess => member_references(tree, model, SyntaxKind::MemberAccessExpression),
            ScanKind::Identifier => member_references(tree, model, SyntaxKind::IdentifierName),
        };

        let mut findings = Findings::new();
        for candidate in candidates {
            if !is_descendant_of(model, candidate.owner, self.ctx) {
                continue;
            }
            let version = match candidate.lookup {
                Lookup::Member => member_deprecation(model, candidate.symbol, self.ctx)?,
                Lookup::Type => type_deprecation(model, candidate.symbol, self.ctx)?,
            };
            if let Some(version) = version {
                findings.push(Finding {
                    node: candidate.node,
                    symbol: candidate.symbol,
                    version,
                });
            }
        }

        tracing::debug!(
            scanner = %self.kind,
            file = tree.file_path(),
            findings = findings.len(),
            "scan complete"
        );
        Ok(findings)
    }
}

/// Overriding declarations grouped by containing type. Groups are ordered
/// by type name; properties come before methods within a group.
fn type_declarations(tree: &dyn SyntaxTree, model: &dyn SemanticModel) -> Vec<Candidate> {
    let overrides = |node_kind: SyntaxKind, symbol_kind: SymbolKind| -> Vec<(Candidate, SymbolId)> {
        tree.nodes_of_kind(node_kind)
            .into_iter()
            .filter_map(|node| {
                let id = model.declared_symbol(node)?;
                let symbol = model.symbol(id)?;
                if symbol.kind != symbol_kind || !symbol.is_override {
                    return None;
                }
                let owner = symbol.containing_type?;
                let candidate = Candidate {
                    node,
                    symbol: id,
                    owner: Some(owner),
                    lookup: Lookup::Member,
                };
                Some((candidate, owner))
            })
            .collect()
    };
    let properties = overrides(SyntaxKind::PropertyDeclaration, SymbolKind::Property);
    let methods = overrides(SyntaxKind::MethodDeclaration, SymbolKind::Method);

    let mut owners: Vec<SymbolId> = Vec::new();
    for (_, owner) in properties.iter().chain(methods.iter()) {
        if !owners.contains(owner) {
            owners.push(*owner);
        }
    }
    let name_of = |id: &SymbolId| model.symbol(*id).map(|s| s.name.as_str()).unwrap_or("");
    owners.sort_by(|a, b| name_of(a).cmp(name_of(b)));

    owners
        .into_iter()
        .flat_map(|owner| {
            properties
                .iter()
                .chain(methods.iter())
                .filter(move |(_, o)| *o == owner)
                .map(|(candidate, _)| *candidate)
        })
        .collect()
}

/// Variable declarators, reported under their declared type.
fn variable_declarations(tree: &dyn SyntaxTree, model: &dyn SemanticModel) -> Vec<Candidate> {
    tree.nodes_of_kind(SyntaxKind::VariableDeclarator)
        .into_iter()
        .filter_map(|node| {
            let variable = model.symbol(model.declared_symbol(node)?)?;
            if !variable.kind.is_variable() {
                return None;
            }
            let ty = variable.declared_type?;
            Some(Candidate {
                node,
                symbol: ty,
                owner: Some(ty),
                lookup: Lookup::Type,
            })
        })
        .collect()
}

/// References to properties and methods. Member accesses only take a
/// resolved symbol; bare identifiers fall back to the first candidate.
fn member_references(
    tree: &dyn SyntaxTree,
    model: &dyn SemanticModel,
    node_kind: SyntaxKind,
) -> Vec<Candidate> {
    tree.nodes_of_kind(node_kind)
        .into_iter()
        .filter_map(|node| {
            let info = model.symbol_info(node);
            let id = match node_kind {
                SyntaxKind::IdentifierName => info.best(),
                _ => info.symbol,
            }?;
            let symbol = model.symbol(id)?;
            if !symbol.kind.is_member() {
                return None;
            }
            Some(Candidate {
                node,
                symbol: id,
                owner: symbol.containing_type,
                lookup: Lookup::Member,
            })
        })
        .collect()
}
