use tracing::debug;

use crate::piece::Piece;
use crate::report::{Category, FindingCollector, Report};
use crate::rules::{Checker, Rule};
use crate::voice::Voice;

/// No melodic sevenths and nothing wider than an octave.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeapsChecker;

fn leap_label(distance: i32) -> Option<&'static str> {
    match distance {
        10 => Some("7"),
        11 => Some("7<"),
        d if d > 12 => Some("over an octave"),
        _ => None,
    }
}

impl Checker for LeapsChecker {
    fn rule(&self) -> Rule {
        Rule::Leaps
    }

    fn check(&self, piece: &Piece, report: &mut Report) {
        let mut errors = FindingCollector::new(Category::RestrictedLeaps);

        for voice in Voice::ALL {
            for (idx, step) in piece.line(voice).pitches().windows(2).enumerate() {
                let distance = (step[1].number() - step[0].number()).abs();
                if let Some(label) = leap_label(distance) {
                    errors.push(format!(
                        "Chords {}/{}: Restricted leap in {} - {}",
                        idx + 1,
                        idx + 2,
                        voice,
                        label
                    ));
                }
            }
        }

        errors.sort();
        debug!(count = errors.len(), "leaps check");
        report.record(errors);
    }
}
