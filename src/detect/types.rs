//! Core types for scan results.

use crate::semantic::{NodeId, SymbolId};

/// One reportable use of a deprecated API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Finding {
    pub node: NodeId,
    pub symbol: SymbolId,
    /// Deprecation version; always non-zero and at most the target.
    pub version: u64,
}

/// Findings of one scanner over one tree, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    items: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.items.push(finding);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.items.iter()
    }

    /// Whether any finding sits on `node`.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.items.iter().any(|f| f.node == node)
    }

    pub fn retain<F: FnMut(&Finding) -> bool>(&mut self, f: F) {
        self.items.retain(f);
    }
}

impl<'a> IntoIterator for &'a Findings {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Finding> for Findings {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
