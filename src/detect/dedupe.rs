//! Pruning of identifier findings already reported by another scanner.

use super::Findings;
use crate::semantic::SyntaxTree;

/// Drop every `noisy` finding whose node's direct parent is the node of a
/// `base` finding. Returns the number of findings removed.
///
/// Only the direct parent is compared; an identifier nested deeper inside
/// a reported expression is kept.
pub fn remove_duplicates(base: &Findings, noisy: &mut Findings, tree: &dyn SyntaxTree) -> usize {
    let before = noisy.len();
    noisy.retain(|f| {
        tree.parent(f.node)
            .map(|parent| !base.contains_node(parent))
            .unwrap_or(true)
    });
    before - noisy.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Finding;
    use crate::semantic::snapshot::NodeRecord;
    use crate::semantic::{NodeId, SnapshotTree, SymbolId, SyntaxKind};

    fn record(id: u32, parent: Option<u32>) -> NodeRecord {
        NodeRecord {
            id: NodeId(id),
            kind: SyntaxKind::Other,
            start: 0,
            length: 0,
            parent: parent.map(NodeId),
            declared: None,
            symbol: None,
            candidates: vec![],
        }
    }

    fn finding(node: u32) -> Finding {
        Finding {
            node: NodeId(node),
            symbol: SymbolId(1),
            version: 1,
        }
    }

    // 0
    // └── 1 (base finding)
    //     └── 2
    //         └── 3
    // └── 4
    fn tree() -> SnapshotTree {
        SnapshotTree::new(
            "a.cs",
            "",
            vec![
                record(0, None),
                record(1, Some(0)),
                record(2, Some(1)),
                record(3, Some(2)),
                record(4, Some(0)),
            ],
        )
    }

    #[test]
    fn test_removes_direct_children_only() {
        let base: Findings = [finding(1)].into_iter().collect();
        let mut noisy: Findings = [finding(2), finding(3), finding(4), finding(0)]
            .into_iter()
            .collect();

        let removed = remove_duplicates(&base, &mut noisy, &tree());

        assert_eq!(removed, 1);
        let kept: Vec<_> = noisy.iter().map(|f| f.node.0).collect();
        assert_eq!(kept, vec![3, 4, 0]);
    }

    #[test]
    fn test_empty_base_keeps_everything() {
        let mut noisy: Findings = [finding(2), finding(3)].into_iter().collect();
        assert_eq!(remove_duplicates(&Findings::new(), &mut noisy, &tree()), 0);
        assert_eq!(noisy.len(), 2);
    }
}
