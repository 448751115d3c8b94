//! Rule findings and the report that collects them.
//!
//! Checkers never fail. They collect human-readable details into a
//! [`FindingCollector`] per category and hand it to the [`Report`], which
//! drops empty categories and keeps running error/warning totals.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Breaks a rule of four-part writing
    Error,
    /// Allowed, but worth a second look
    Warning,
}

/// What a finding is about. Each category has a fixed severity and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    VoiceRange,
    RestrictedLeaps,
    VoiceDistanceErrors,
    VoiceDistanceWarnings,
    ConsecutiveIntervals,
    UnknownChords,
    ForeignNotes,
    ChordsInContext,
}

impl Category {
    pub fn title(&self) -> &'static str {
        match self {
            Category::VoiceRange => "Voice range errors",
            Category::RestrictedLeaps => "Restricted leaps",
            Category::VoiceDistanceErrors => "Voice distance errors",
            Category::VoiceDistanceWarnings => "Voice distance warnings",
            Category::ConsecutiveIntervals => "Consecutive intervals",
            Category::UnknownChords => "Unknown chords",
            Category::ForeignNotes => "Foreign notes in chords and wrong doubling",
            Category::ChordsInContext => "Checking chords in context",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Category::VoiceDistanceWarnings
            | Category::ForeignNotes
            | Category::ChordsInContext => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// One category's worth of results from a single checker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    pub title: String,
    pub count: usize,
    pub details: Vec<String>,
}

impl Finding {
    pub fn new(category: Category, details: Vec<String>) -> Self {
        Finding {
            category,
            title: category.title().to_string(),
            count: details.len(),
            details,
        }
    }

    pub fn severity(&self) -> Severity {
        self.category.severity()
    }
}

/// Accumulates detail lines for one category while a checker runs.
#[derive(Debug)]
pub struct FindingCollector {
    category: Category,
    details: Vec<String>,
}

impl FindingCollector {
    pub fn new(category: Category) -> Self {
        FindingCollector {
            category,
            details: Vec::new(),
        }
    }

    pub fn push(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Order details lexically (range and leap findings are reported sorted)
    pub fn sort(&mut self) {
        self.details.sort();
    }

    pub fn into_finding(self) -> Finding {
        Finding::new(self.category, self.details)
    }
}

/// Everything the selected checkers found, errors and warnings kept apart
/// in the order the checkers recorded them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
    error_count: usize,
    warning_count: usize,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    /// Record a finding. Empty findings are dropped.
    pub fn add(&mut self, finding: Finding) {
        if finding.count == 0 {
            return;
        }
        match finding.severity() {
            Severity::Error => {
                self.error_count += finding.count;
                self.errors.push(finding);
            }
            Severity::Warning => {
                self.warning_count += finding.count;
                self.warnings.push(finding);
            }
        }
    }

    pub fn record(&mut self, collector: FindingCollector) {
        self.add(collector.into_finding());
    }

    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// No errors and no warnings
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// All findings, errors first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Look up a finding by category.
    pub fn finding(&self, category: Category) -> Option<&Finding> {
        self.findings().find(|f| f.category == category)
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, heading: &str, findings: &[Finding]) -> fmt::Result {
    let total: usize = findings.iter().map(|finding| finding.count).sum();
    writeln!(f, "{} ({}):", heading, total)?;
    for finding in findings {
        writeln!(f, "  {} ({}):", finding.title, finding.count)?;
        for detail in &finding.details {
            writeln!(f, "    {}", detail)?;
        }
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(f, "Errors", &self.errors)?;
        write_section(f, "Warnings", &self.warnings)
    }
}
