//! Detection runner that orchestrates all scanners.

use globset::GlobSet;
use std::io::Write;

use super::{remove_duplicates, Finding, Findings, ScanKind, Scanner};
use crate::error::Result;
use crate::metadata::TargetContext;
use crate::report;
use crate::semantic::{SemanticModel, SolutionSnapshot, SyntaxTree};

/// Findings of all scanners over one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeFindings {
    pub type_declarations: Findings,
    pub variable_declarations: Findings,
    pub member_accesses: Findings,
    /// Identifier findings after de-duplication.
    pub identifiers: Findings,
}

impl TreeFindings {
    pub fn by_kind(&self, kind: ScanKind) -> &Findings {
        match kind {
            ScanKind::TypeDeclaration => &self.type_declarations,
            ScanKind::VariableDeclaration => &self.variable_declarations,
            ScanKind::MemberAccess => &self.member_accesses,
            ScanKind::Identifier => &self.identifiers,
        }
    }

    /// All findings in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        ScanKind::ALL.into_iter().flat_map(move |kind| self.by_kind(kind).iter())
    }

    pub fn len(&self) -> usize {
        ScanKind::ALL.iter().map(|k| self.by_kind(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Totals for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub projects: usize,
    pub trees_scanned: usize,
    pub trees_skipped: usize,
    pub findings: usize,
}

impl RunSummary {
    pub fn merge(&mut self, other: RunSummary) {
        self.projects += other.projects;
        self.trees_scanned += other.trees_scanned;
        self.trees_skipped += other.trees_skipped;
        self.findings += other.findings;
    }
}

/// Runs every scanner over each tree and reports the findings.
pub struct Runner<'c, 'm> {
    ctx: &'c TargetContext<'m>,
    excluded: Option<GlobSet>,
}

impl<'c, 'm> Runner<'c, 'm> {
    pub fn new(ctx: &'c TargetContext<'m>) -> Self {
        Self {
            ctx,
            excluded: None,
        }
    }

    /// Skip trees whose file path matches any of these globs.
    pub fn exclude(mut self, excluded: Option<GlobSet>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Analyze one tree: run the four scanners, then prune identifier
    /// findings already covered by member-access and variable findings.
    pub fn analyze_tree(
        &self,
        tree: &dyn SyntaxTree,
        model: &dyn SemanticModel,
    ) -> Result<TreeFindings> {
        let scan = |kind| Scanner::new(kind, self.ctx).scan(tree, model);

        let type_declarations = scan(ScanKind::TypeDeclaration)?;
        let variable_declarations = scan(ScanKind::VariableDeclaration)?;
        let member_accesses = scan(ScanKind::MemberAccess)?;
        let mut identifiers = scan(ScanKind::Identifier)?;

        let pruned = remove_duplicates(&member_accesses, &mut identifiers, tree)
            + remove_duplicates(&variable_declarations, &mut identifiers, tree);
        if pruned > 0 {
            tracing::debug!(file = tree.file_path(), pruned, "pruned duplicate identifier findings");
        }

        Ok(TreeFindings {
            type_declarations,
            variable_declarations,
            member_accesses,
            identifiers,
        })
    }

    /// Analyze and report one tree.
    pub fn run_tree<W: Write + ?Sized>(
        &self,
        tree: &dyn SyntaxTree,
        model: &dyn SemanticModel,
        out: &mut W,
    ) -> Result<usize> {
        let findings = self.analyze_tree(tree, model)?;
        report::write_warnings(out, findings.iter(), tree, model, self.ctx)?;
        Ok(findings.len())
    }

    /// Analyze every tree of every project in snapshot order.
    pub fn run<W: Write + ?Sized>(
        &self,
        solution: &SolutionSnapshot,
        out: &mut W,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for project in &solution.projects {
            writeln!(out, "Analyzing project {}", project.name)?;
            summary.projects += 1;
            if project.symbols.is_empty() && !project.trees.is_empty() {
                tracing::warn!(project = %project.name, "project carries no symbols");
            }
            tracing::debug!(
                project = %project.name,
                symbols = project.symbols.len(),
                trees = project.trees.len(),
                "analyzing project"
            );

            for tree in &project.trees {
                if self.is_excluded(tree.file_path()) {
                    tracing::debug!(file = tree.file_path(), "skipping excluded tree");
                    summary.trees_skipped += 1;
                    continue;
                }
                let model = project.model(tree);
                summary.findings += self.run_tree(tree, &model, out)?;
                summary.trees_scanned += 1;
            }
        }

        tracing::info!(
            projects = summary.projects,
            trees = summary.trees_scanned,
            findings = summary.findings,
            "analysis complete"
        );
        Ok(summary)
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.excluded
            .as_ref()
            .map(|set| set.is_match(path))
            .unwrap_or(false)
    }
}
