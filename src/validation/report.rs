//! What `check` found in a collections file.
//!
//! The report prints as a short summary for the terminal and serializes to
//! JSON for `check --output json`.

use std::fmt;

use serde::Serialize;

/// Group and collection counts for one input, plus every spot where the
/// lenient parser dropped something.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CheckReport {
    /// Top-level groups the brace scan split the input into.
    pub groups: usize,
    /// How many of those groups yield a non-empty collection.
    pub collections: usize,
    /// Issues in input order.
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    /// A report with zero groups and no issues; `check_text` fills it in.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: CheckIssue) {
        self.issues.push(issue);
    }

    /// Issues that make `check` fail even without `--strict`.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Issues where input was skipped but rendering can still go ahead.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// The input renders: braces balance and at least one collection exists.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Every group and rectangle contributed cells; nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether the input is accepted, treating warnings as errors when
    /// `strict`.
    pub fn passes(&self, strict: bool) -> bool {
        if strict {
            self.is_clean()
        } else {
            self.is_ok()
        }
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Found {} group(s) producing {} collection(s)",
            self.groups, self.collections
        )?;

        if self.issues.is_empty() {
            return writeln!(f, "Check passed: no issues found");
        }

        writeln!(
            f,
            "Check completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// One skipped or broken piece of input, located by group and rectangle.
#[derive(Clone, Debug, Serialize)]
pub struct CheckIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    pub context: IssueContext,
}

impl CheckIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Input was parsed, but part of it contributed nothing.
    Warning,
    /// The input is structurally broken, or part of it cannot be turned
    /// into cells at all.
    Error,
}

/// Issue kinds, printed by name in text output and stable in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Structure
    /// Braces do not balance over the whole input.
    UnbalancedBraces,
    /// The input produces no collections.
    EmptyInput,

    // Groups
    /// A group contains no rectangle token.
    NoRectangles,
    /// A group has rectangles, but none of them spans a cell.
    EmptyGroup,
    /// Rectangles in a group cover some cells more than once.
    OverlappingCells,
    /// A group spans more cells than the parser will decompose.
    TooManyCells,

    // Rectangles
    /// A rectangle has zero width or zero height.
    DegenerateRectangle,
}

/// Where in the input an issue sits. Indexes are 1-based.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    Input,
    Group { index: usize },
    Rectangle { group: usize, index: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Input => write!(f, "input"),
            IssueContext::Group { index } => write!(f, "group {}", index),
            IssueContext::Rectangle { group, index } => {
                write!(f, "group {} rectangle {}", group, index)
            }
        }
    }
}
