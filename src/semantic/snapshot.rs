//! Serialized semantic snapshots produced by an external front end.
//!
//! A snapshot holds one or more projects. Each project carries its symbol
//! table and its syntax trees; every tree node records its kind, span,
//! parent and bindings:
//!
//! ```json
//! {
//!   "projects": [{
//!     "name": "App",
//!     "symbols": [{ "id": 1, "name": "NSObject", "kind": "named_type", "module": "Xamarin.iOS" }],
//!     "trees": [{
//!       "path": "src/Foo.cs",
//!       "text": "...",
//!       "nodes": [{ "id": 0, "kind": "compilation_unit", "start": 0, "length": 120 }]
//!     }]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{
    LineIndex, NodeId, SemanticModel, Symbol, SymbolId, SymbolInfo, SyntaxKind, SyntaxNode,
    SyntaxTree, TextSpan,
};
use crate::error::{AnalyzerError, Result};

/// A whole solution: every project handed over by the front end.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolutionSnapshot {
    #[serde(default)]
    pub projects: Vec<ProjectSnapshot>,
}

impl SolutionSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AnalyzerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Number of trees across all projects.
    pub fn tree_count(&self) -> usize {
        self.projects.iter().map(|p| p.trees.len()).sum()
    }
}

/// One compilation: a symbol table and the trees bound against it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSnapshot {
    pub name: String,
    #[serde(default)]
    pub symbols: SymbolTable,
    #[serde(default)]
    pub trees: Vec<SnapshotTree>,
}

impl ProjectSnapshot {
    /// Semantic model for one of this project's trees.
    pub fn model<'a>(&'a self, tree: &'a SnapshotTree) -> TreeModel<'a> {
        TreeModel::new(&self.symbols, tree)
    }
}

/// Symbols of one compilation, indexed by id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<Symbol>")]
pub struct SymbolTable {
    symbols: HashMap<SymbolId, Symbol>,
}

impl SymbolTable {
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(&id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<Vec<Symbol>> for SymbolTable {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self {
            symbols: symbols.into_iter().map(|s| (s.id, s)).collect(),
        }
    }
}

/// A node record as serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub kind: SyntaxKind,
    pub start: usize,
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    /// Symbol declared by this node (declarations only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared: Option<SymbolId>,
    /// Symbol this node references (expressions only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<SymbolId>,
}

#[derive(Debug, Clone, Deserialize)]
struct TreeRecord {
    path: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    nodes: Vec<NodeRecord>,
}

/// A syntax tree loaded from a snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "TreeRecord")]
pub struct SnapshotTree {
    path: String,
    nodes: Vec<NodeRecord>,
    positions: HashMap<NodeId, usize>,
    line_index: LineIndex,
}

impl SnapshotTree {
    /// Build a tree from its path, source text and nodes in document order.
    pub fn new(path: impl Into<String>, text: &str, nodes: Vec<NodeRecord>) -> Self {
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();
        Self {
            path: path.into(),
            nodes,
            positions,
            line_index: LineIndex::new(text),
        }
    }

    fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.positions.get(&id).map(|&i| &self.nodes[i])
    }
}

impl From<TreeRecord> for SnapshotTree {
    fn from(record: TreeRecord) -> Self {
        Self::new(record.path, &record.text, record.nodes)
    }
}

impl SyntaxTree for SnapshotTree {
    fn file_path(&self) -> &str {
        &self.path
    }

    fn descendant_nodes(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    fn node(&self, id: NodeId) -> Option<SyntaxNode> {
        self.record(id).map(|r| SyntaxNode {
            kind: r.kind,
            span: TextSpan::new(r.start, r.length),
            parent: r.parent,
        })
    }

    fn line_of(&self, offset: usize) -> usize {
        self.line_index.line_of(offset)
    }
}

/// Semantic model over one snapshot tree and its project's symbols.
#[derive(Debug, Clone, Copy)]
pub struct TreeModel<'a> {
    symbols: &'a SymbolTable,
    tree: &'a SnapshotTree,
}

impl<'a> TreeModel<'a> {
    pub fn new(symbols: &'a SymbolTable, tree: &'a SnapshotTree) -> Self {
        Self { symbols, tree }
    }
}

impl SemanticModel for TreeModel<'_> {
    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    fn declared_symbol(&self, node: NodeId) -> Option<SymbolId> {
        self.tree.record(node).and_then(|r| r.declared)
    }

    fn symbol_info(&self, node: NodeId) -> SymbolInfo {
        self.tree
            .record(node)
            .map(|r| SymbolInfo {
                symbol: r.symbol,
                candidates: r.candidates.clone(),
            })
            .unwrap_or_default()
    }
}
