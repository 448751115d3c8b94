use tracing::debug;

use crate::piece::Piece;
use crate::report::{Category, FindingCollector, Report};
use crate::rules::{Checker, Rule};
use crate::voice::Voice;

/// Every note must sit inside its voice's singable range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeChecker;

impl Checker for RangeChecker {
    fn rule(&self) -> Rule {
        Rule::Range
    }

    fn check(&self, piece: &Piece, report: &mut Report) {
        let mut errors = FindingCollector::new(Category::VoiceRange);

        for voice in Voice::ALL {
            let (low, high) = voice.range();
            for (idx, pitch) in piece.line(voice).iter().enumerate() {
                let n = pitch.number();
                if n > high {
                    errors.push(format!("Chord {}: {} too high", idx + 1, voice));
                } else if n < low {
                    errors.push(format!("Chord {}: {} too low", idx + 1, voice));
                }
            }
        }

        errors.sort();
        debug!(count = errors.len(), "range check");
        report.record(errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(s: &str, a: &str, t: &str, b: &str) -> Report {
        let piece = Piece::new("range", s, a, t, b).unwrap();
        let mut report = Report::new();
        RangeChecker.check(&piece, &mut report);
        report
    }

    #[test]
    fn test_in_range_piece_is_clean() {
        let report = check("G' A' B'", "E' F' G'", "C' C' D'", "C, F, G,");
        assert!(report.is_clean());
    }

    #[test]
    fn test_single_soprano_too_high() {
        // B'' is 83, above the soprano limit of 81
        let report = check("G' B'' G'", "E' F' E'", "C' D' C'", "C, D, C,");
        assert_eq!(report.error_count(), 1);
        let finding = report.finding(Category::VoiceRange).unwrap();
        assert_eq!(finding.details, vec!["Chord 2: S too high"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        // A'' = 81 and E,, = 40 sit exactly on the limits
        let report = check("A''", "D''", "A'", "E,,");
        assert!(report.is_clean());
    }

    #[test]
    fn test_details_are_sorted() {
        let report = check("G' G'", "E' E'", "C' C'", "D,, C''");
        let finding = report.finding(Category::VoiceRange).unwrap();
        assert_eq!(
            finding.details,
            vec!["Chord 1: B too low", "Chord 2: B too high"]
        );
    }
}
