use tracing::debug;

use crate::chord::Chord;
use crate::piece::Piece;
use crate::report::{Category, FindingCollector, Report};
use crate::rules::{Checker, Rule};
use crate::voice::Voice;

/// Forbidden consecutive unisons, octaves and fifths between any two voices.
///
/// Only checked when both voices move. Fifths are matched on the exact
/// distance (and its compounds), so a fourth with the voices crossed is not
/// a fifth.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelsChecker;

const FIFTHS_CLOSE: &[i32] = &[7, 19, 31];
const FIFTHS_WIDE: &[i32] = &[7, 19, 31, 43];

#[derive(Debug, PartialEq, Eq)]
enum Consecutive {
    Octaves,
    Fifths,
}

fn consecutive(upper: Voice, lower: Voice, from: &Chord, to: &Chord) -> Option<Consecutive> {
    let before = from.pitch(upper).number() - from.pitch(lower).number();
    let after = to.pitch(upper).number() - to.pitch(lower).number();

    let fifths = if upper.is_adjacent(lower) {
        FIFTHS_CLOSE
    } else {
        FIFTHS_WIDE
    };

    if before.rem_euclid(12) == 0 && after.rem_euclid(12) == 0 {
        Some(Consecutive::Octaves)
    } else if fifths.contains(&before) && fifths.contains(&after) {
        Some(Consecutive::Fifths)
    } else {
        None
    }
}

impl Checker for ParallelsChecker {
    fn rule(&self) -> Rule {
        Rule::Parallels
    }

    fn check(&self, piece: &Piece, report: &mut Report) {
        let mut errors = FindingCollector::new(Category::ConsecutiveIntervals);

        for (idx, pair) in piece.chords().windows(2).enumerate() {
            let (from, to) = (&pair[0], &pair[1]);
            for (upper, lower) in Voice::PAIRS {
                let moves = |voice: Voice| from.pitch(voice) != to.pitch(voice);
                if !(moves(upper) && moves(lower)) {
                    continue;
                }
                let what = match consecutive(upper, lower, from, to) {
                    Some(Consecutive::Octaves) => "Unison/Octave",
                    Some(Consecutive::Fifths) => "Fifths",
                    None => continue,
                };
                errors.push(format!(
                    "Chords {}/{}: {}/{} consecutive {}",
                    idx + 1,
                    idx + 2,
                    upper,
                    lower,
                    what
                ));
            }
        }

        debug!(count = errors.len(), "parallels check");
        report.record(errors);
    }
}
