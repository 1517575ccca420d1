//! Output formatting for analysis results.
//!
//! Each finding becomes one line:
//!
//! ```text
//! {Foo.cs, 12} WARNING: ViewDidUnload has been deprecated in 6.0
//! ```
//!
//! The line number is the 0-based start line of the reported node.

use std::io::{self, Write};
use std::path::Path;

use crate::detect::Finding;
use crate::metadata::TargetContext;
use crate::semantic::{SemanticModel, SyntaxTree};

/// Width of the banner separator line.
const SEPARATOR_WIDTH: usize = 90;

/// Format one finding as a warning line (without trailing newline).
pub fn format_warning(
    finding: &Finding,
    tree: &dyn SyntaxTree,
    model: &dyn SemanticModel,
    ctx: &TargetContext<'_>,
) -> String {
    let path = tree.file_path();
    let file = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let line = tree
        .node(finding.node)
        .map(|n| tree.line_of(n.span.start))
        .unwrap_or(0);
    let name = model
        .symbol(finding.symbol)
        .map(|s| s.name.as_str())
        .unwrap_or("<unknown>");

    format!(
        "{{{}, {}}} WARNING: {} has been deprecated in {}",
        file,
        line,
        name,
        ctx.platform.format(finding.version)
    )
}

/// Write one warning line per finding, in the order given.
pub fn write_warnings<'a, W, I>(
    out: &mut W,
    findings: I,
    tree: &dyn SyntaxTree,
    model: &dyn SemanticModel,
    ctx: &TargetContext<'_>,
) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a Finding>,
{
    for finding in findings {
        writeln!(out, "{}", format_warning(finding, tree, model, ctx))?;
    }
    Ok(())
}

/// Write the session banner listing the parameters in use.
pub fn write_banner<W: Write + ?Sized>(
    out: &mut W,
    module_path: &Path,
    solution_path: &Path,
    ctx: &TargetContext<'_>,
) -> io::Result<()> {
    writeln!(out, "The following parameters will be used for this session:")?;
    writeln!(out, "\tDLL='{}'", module_path.display())?;
    writeln!(out, "\tSLN='{}'", solution_path.display())?;
    writeln!(out, "\tSDK={}", ctx.target_version_display())?;
    writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    Ok(())
}
