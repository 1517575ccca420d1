//! Semantic model interface consumed by the scanners.
//!
//! Parsing and binding happen in an external front end. This module only
//! describes what the analysis needs to ask of it:
//!
//! - `SyntaxTree`: immutable nodes with kind, span and parent, plus a
//!   line index for positioning findings
//! - `SemanticModel`: declared and referenced symbols for nodes, and the
//!   symbol table itself
//!
//! `snapshot` provides the serialized implementation the CLI loads.

mod line_index;
pub mod snapshot;

pub use line_index::LineIndex;
pub use snapshot::{ProjectSnapshot, SnapshotTree, SolutionSnapshot, SymbolTable, TreeModel};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node within one syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Identifier of a symbol within one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// Node kinds the scanners care about. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    PropertyDeclaration,
    MethodDeclaration,
    VariableDeclarator,
    MemberAccessExpression,
    IdentifierName,
    #[serde(other)]
    Other,
}

/// Byte range of a node in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}

/// A node as seen by the scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub span: TextSpan,
    pub parent: Option<NodeId>,
}

/// Kind of declared entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    NamedType,
    ArrayType,
    Method,
    Property,
    Field,
    Local,
    #[serde(other)]
    Other,
}

impl SymbolKind {
    /// Properties and methods are the only member kinds that carry
    /// deprecation metadata worth reporting.
    pub fn is_member(&self) -> bool {
        matches!(self, SymbolKind::Method | SymbolKind::Property)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, SymbolKind::Local | SymbolKind::Field)
    }
}

/// A bound symbol. Owned by the semantic model and never mutated by the
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    /// Simple name (e.g. "NSObject", "ViewDidLoad").
    pub name: String,
    /// Fully qualified name used to re-resolve types in the metadata
    /// module (e.g. "Foundation.NSObject"). Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub kind: SymbolKind,
    /// Identity of the module (assembly) that declares this symbol.
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containing_type: Option<SymbolId>,
    /// Base type, for type symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<SymbolId>,
    /// Declared type, for fields and locals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<SymbolId>,
    #[serde(default)]
    pub is_override: bool,
}

impl Symbol {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Result of binding a reference: the resolved symbol, or a ranked list of
/// candidates when resolution was ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolInfo {
    pub symbol: Option<SymbolId>,
    pub candidates: Vec<SymbolId>,
}

impl SymbolInfo {
    /// The resolved symbol, falling back to the first candidate.
    pub fn best(&self) -> Option<SymbolId> {
        self.symbol.or_else(|| self.candidates.first().copied())
    }
}

/// An immutable syntax tree.
pub trait SyntaxTree {
    /// Path of the source file this tree was parsed from.
    fn file_path(&self) -> &str;

    /// All nodes in document order.
    fn descendant_nodes(&self) -> Vec<NodeId>;

    /// Look up a node. Returns `None` for ids not in this tree.
    fn node(&self, id: NodeId) -> Option<SyntaxNode>;

    /// 0-based line containing the given byte offset.
    fn line_of(&self, offset: usize) -> usize;

    /// Nodes of one kind, in document order.
    fn nodes_of_kind(&self, kind: SyntaxKind) -> Vec<NodeId> {
        self.descendant_nodes()
            .into_iter()
            .filter(|id| self.node(*id).map(|n| n.kind == kind).unwrap_or(false))
            .collect()
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }
}

/// Symbol binding for one syntax tree.
pub trait SemanticModel {
    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    /// Symbol declared by a declaration node.
    fn declared_symbol(&self, node: NodeId) -> Option<SymbolId>;

    /// Symbol referenced by an expression node.
    fn symbol_info(&self, node: NodeId) -> SymbolInfo;
}
