use tracing::debug;

use crate::chord::Chord;
use crate::piece::Piece;
use crate::report::{Category, FindingCollector, Report};
use crate::rules::{Checker, Rule};
use crate::voice::Voice;

/// Spacing between neighbouring voices within each chord.
///
/// Upper voices may be at most an octave apart (alto/tenor strictly less);
/// tenor and bass get up to two octaves, with a warning past a twelfth.
/// A lower voice above its upper neighbour is an overlap.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistancesChecker;

enum Spacing {
    Fine,
    Overlap,
    TooWide,
    Wide,
}

fn spacing(upper: Voice, gap: i32) -> Spacing {
    if gap < 0 {
        return Spacing::Overlap;
    }
    match upper {
        Voice::Soprano if gap > 12 => Spacing::TooWide,
        Voice::Alto if gap >= 12 => Spacing::TooWide,
        Voice::Tenor if gap > 24 => Spacing::TooWide,
        Voice::Tenor if gap > 19 => Spacing::Wide,
        _ => Spacing::Fine,
    }
}

fn gap(chord: &Chord, upper: Voice, lower: Voice) -> i32 {
    chord.pitch(upper).number() - chord.pitch(lower).number()
}

impl Checker for DistancesChecker {
    fn rule(&self) -> Rule {
        Rule::Distances
    }

    fn check(&self, piece: &Piece, report: &mut Report) {
        let mut errors = FindingCollector::new(Category::VoiceDistanceErrors);
        let mut warnings = FindingCollector::new(Category::VoiceDistanceWarnings);

        let neighbours = [
            (Voice::Soprano, Voice::Alto),
            (Voice::Alto, Voice::Tenor),
            (Voice::Tenor, Voice::Bass),
        ];

        for (idx, chord) in piece.chords().iter().enumerate() {
            let n = idx + 1;
            for (upper, lower) in neighbours {
                match spacing(upper, gap(chord, upper, lower)) {
                    Spacing::Fine => {}
                    Spacing::Overlap => {
                        errors.push(format!("Chord {}: {}/{} overlap", n, upper, lower))
                    }
                    Spacing::TooWide => errors.push(format!(
                        "Chord {}: {}/{} interval too wide",
                        n, upper, lower
                    )),
                    Spacing::Wide => warnings.push(format!(
                        "Chord {}: {}/{} interval too wide",
                        n, upper, lower
                    )),
                }
            }
        }

        debug!(
            errors = errors.len(),
            warnings = warnings.len(),
            "distances check"
        );
        report.record(errors);
        report.record(warnings);
    }
}
