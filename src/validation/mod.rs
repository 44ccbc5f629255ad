//! Structural check for collection files.
//!
//! Parsing is deliberately lenient: malformed tokens and unbalanced braces
//! just yield fewer cells. This module re-runs the same scan and reports
//! every place where input was dropped, so callers who want strict input
//! can refuse it:
//! - Structural integrity (balanced braces, at least one collection)
//! - Group content (rectangle tokens present, at least one cell spanned,
//!   no more than [`MAX_GROUP_CELLS`] cells spanned)
//! - Rectangle shape (non-zero width and height, no overlap)

mod report;

pub use report::{CheckIssue, CheckReport, IssueCode, IssueContext, Severity};

use std::fs;
use std::path::Path;

use crate::cells::{find_rectangles, scan_groups, spanned_cells, Collection, MAX_GROUP_CELLS};
use crate::error::CellplotError;

/// Options for check behavior.
#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Read a file and check its contents.
pub fn check_file(path: &Path) -> Result<CheckReport, CellplotError> {
    let text = fs::read_to_string(path).map_err(|source| CellplotError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(check_text(&text))
}

/// Checks collection text and returns a report of all issues found.
pub fn check_text(text: &str) -> CheckReport {
    let scan = scan_groups(text);
    let mut report = CheckReport::new();
    report.groups = scan.groups.len();

    if scan.min_depth < 0 {
        report.add(CheckIssue::error(
            IssueCode::UnbalancedBraces,
            "closing brace without a matching opening brace",
            IssueContext::Input,
        ));
    }
    if scan.final_depth > 0 {
        report.add(CheckIssue::error(
            IssueCode::UnbalancedBraces,
            format!("{} brace(s) still open at end of input", scan.final_depth),
            IssueContext::Input,
        ));
    }

    for (idx, group) in scan.groups.iter().enumerate() {
        if check_group(group, idx + 1, &mut report) {
            report.collections += 1;
        }
    }

    if report.collections == 0 {
        report.add(CheckIssue::error(
            IssueCode::EmptyInput,
            "input produces no collections",
            IssueContext::Input,
        ));
    }

    report
}

/// Enforce a report against the options.
///
/// Returns the report unchanged when it passes, or wraps it in
/// [`CellplotError::CheckFailed`].
pub fn enforce(report: CheckReport, opts: &CheckOptions) -> Result<CheckReport, CellplotError> {
    if report.passes(opts.strict) {
        Ok(report)
    } else {
        Err(CellplotError::CheckFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    }
}

/// Checks one group. Returns true if it produces a collection.
fn check_group(group: &str, index: usize, report: &mut CheckReport) -> bool {
    let rects = find_rectangles(group);
    if rects.is_empty() {
        report.add(CheckIssue::warning(
            IssueCode::NoRectangles,
            format!("no rectangle token in '{}'", preview(group)),
            IssueContext::Group { index },
        ));
        return false;
    }

    for (rect_idx, rect) in rects.iter().enumerate() {
        if rect.is_degenerate() {
            report.add(CheckIssue::warning(
                IssueCode::DegenerateRectangle,
                format!(
                    "corners ({},{}) and ({},{}) span no cells",
                    rect.x1, rect.y1, rect.x2, rect.y2
                ),
                IssueContext::Rectangle {
                    group: index,
                    index: rect_idx + 1,
                },
            ));
        }
    }

    let spanned = spanned_cells(&rects);
    if spanned > MAX_GROUP_CELLS {
        report.add(CheckIssue::error(
            IssueCode::TooManyCells,
            format!(
                "rectangles span {} cell(s), above the limit of {}",
                spanned,
                MAX_GROUP_CELLS
            ),
            IssueContext::Group { index },
        ));
        return false;
    }

    let collection = Collection::from_rectangles(&rects);
    if collection.is_empty() {
        report.add(CheckIssue::warning(
            IssueCode::EmptyGroup,
            format!("{} rectangle(s) but no cells", rects.len()),
            IssueContext::Group { index },
        ));
        return false;
    }

    if spanned > collection.len() as u64 {
        report.add(CheckIssue::warning(
            IssueCode::OverlappingCells,
            format!(
                "rectangles span {} cell(s) but only {} are distinct",
                spanned,
                collection.len()
            ),
            IssueContext::Group { index },
        ));
    }

    true
}

/// Shortens group text for messages.
fn preview(group: &str) -> String {
    const MAX_CHARS: usize = 40;
    let mut out: String = group.chars().take(MAX_CHARS).collect();
    if group.chars().nth(MAX_CHARS).is_some() {
        out.push_str("...");
    }
    out
}
