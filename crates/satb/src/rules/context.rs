use tracing::debug;

use crate::piece::Piece;
use crate::report::{Category, Finding, Report};
use crate::rules::{Checker, Rule};

/// Placeholder for chord progression checks. Always leaves a single
/// warning so a caller asking for it knows nothing was checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChordsInContextChecker;

impl Checker for ChordsInContextChecker {
    fn rule(&self) -> Rule {
        Rule::ChordsInContext
    }

    fn check(&self, piece: &Piece, report: &mut Report) {
        debug!(chords = piece.chords().len(), "chords in context check skipped");
        report.add(Finding::new(
            Category::ChordsInContext,
            vec!["Checking chords in context not yet implemented!".to_string()],
        ));
    }
}
