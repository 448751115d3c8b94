use tracing::debug;

use crate::chord::{Chord, ChordTone, HarmonicFunction};
use crate::key::Key;
use crate::piece::Piece;
use crate::report::{Category, FindingCollector, Report};
use crate::rules::{Checker, Rule};

/// Chord legality: a known mode, no foreign notes, sensible doubling.
///
/// A chord with an unknown mode gets one error and nothing else; the other
/// checks only make sense once the chord is recognised.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChordsChecker;

#[derive(Debug, Default, PartialEq, Eq)]
struct ToneCounts {
    thirds: usize,
    fifths: usize,
    sevenths: usize,
}

impl ToneCounts {
    fn of(chord: &Chord) -> Self {
        let mut counts = ToneCounts::default();
        for tone in chord.structure().values() {
            match tone {
                t if t.is_third() => counts.thirds += 1,
                ChordTone::Fifth => counts.fifths += 1,
                ChordTone::MinorSeventh => counts.sevenths += 1,
                _ => {}
            }
        }
        counts
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Doubling {
    Third,
    Fifth,
    Seventh,
}

/// Only the first doubling problem is reported. A doubled third is normal
/// in the submediant.
fn doubling(counts: &ToneCounts, function: Option<HarmonicFunction>) -> Option<Doubling> {
    if counts.thirds > 1 && function != Some(HarmonicFunction::Submediant) {
        Some(Doubling::Third)
    } else if counts.fifths > 1 {
        Some(Doubling::Fifth)
    } else if counts.sevenths > 1 {
        Some(Doubling::Seventh)
    } else {
        None
    }
}

fn check_chord(
    n: usize,
    chord: &Chord,
    key: &Key,
    errors: &mut FindingCollector,
    warnings: &mut FindingCollector,
) {
    if chord.mode().is_none() {
        errors.push(format!("Chord {}: Chord mode unknown", n));
        return;
    }

    for (voice, tone) in chord.structure().iter() {
        if *tone == ChordTone::Unrecognized {
            warnings.push(format!(
                "Chord {}: {} note doesn't belong to the chord",
                n, voice
            ));
        }
    }

    match doubling(&ToneCounts::of(chord), chord.harmonic_function(key)) {
        Some(Doubling::Third) => {
            warnings.push(format!("Chord {}: more than one third in the chord", n))
        }
        Some(Doubling::Fifth) => {
            warnings.push(format!("Chord {}: more than one fifth in the chord", n))
        }
        Some(Doubling::Seventh) => {
            errors.push(format!("Chord {}: more than one seventh in the chord", n))
        }
        None => {}
    }
}

impl Checker for ChordsChecker {
    fn rule(&self) -> Rule {
        Rule::Chords
    }

    fn check(&self, piece: &Piece, report: &mut Report) {
        let mut errors = FindingCollector::new(Category::UnknownChords);
        let mut warnings = FindingCollector::new(Category::ForeignNotes);

        for (idx, chord) in piece.chords().iter().enumerate() {
            check_chord(idx + 1, chord, piece.key(), &mut errors, &mut warnings);
        }

        debug!(
            errors = errors.len(),
            warnings = warnings.len(),
            key = %piece.key(),
            "chords check"
        );
        report.record(errors);
        report.record(warnings);
    }
}
