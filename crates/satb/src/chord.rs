//! Vertical chords: root finding, structure, mode, and harmonic function.
//!
//! A chord is one pitch per voice at a single time step. Everything else is
//! derived once at construction, in order: root (from pairwise distances
//! between the four absolute pitches), structure (each voice's interval
//! above the root), then mode (from the structure).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::key::{Key, KeyMode};
use crate::parser::parse_pitch;
use crate::pitch::{Pitch, PitchClass};
use crate::voice::{PerVoice, Voice};

/// Interval of a chord member above the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordTone {
    Root,
    MinorThird,
    MajorThird,
    Fifth,
    MinorSeventh,
    Unrecognized,
}

impl ChordTone {
    /// Classify a 0-11 interval above the root.
    pub fn from_interval(semitones: u8) -> Self {
        match semitones {
            0 => ChordTone::Root,
            3 => ChordTone::MinorThird,
            4 => ChordTone::MajorThird,
            7 => ChordTone::Fifth,
            10 => ChordTone::MinorSeventh,
            _ => ChordTone::Unrecognized,
        }
    }

    /// Figured label: `1`, `3>`, `3`, `5`, `7`, or `?`.
    pub fn label(&self) -> &'static str {
        match self {
            ChordTone::Root => "1",
            ChordTone::MinorThird => "3>",
            ChordTone::MajorThird => "3",
            ChordTone::Fifth => "5",
            ChordTone::MinorSeventh => "7",
            ChordTone::Unrecognized => "?",
        }
    }

    pub fn is_third(&self) -> bool {
        matches!(self, ChordTone::MinorThird | ChordTone::MajorThird)
    }
}

/// Chord quality. `Major7` is the dominant-seventh shape (major triad plus
/// a minor seventh); sevenths are always minor sevenths above the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordMode {
    Major,
    Minor,
    Major7,
    Minor7,
}

impl ChordMode {
    pub fn label(&self) -> &'static str {
        match self {
            ChordMode::Major => "M",
            ChordMode::Minor => "m",
            ChordMode::Major7 => "M7",
            ChordMode::Minor7 => "m7",
        }
    }

    /// Suffix for chord symbol display
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordMode::Major => "",
            ChordMode::Minor => "m",
            ChordMode::Major7 => "7",
            ChordMode::Minor7 => "m7",
        }
    }
}

/// Function of a chord relative to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
    Dominant7,
    /// Chord on the sixth degree in the opposite mode of the tonic (TVI).
    Submediant,
}

impl HarmonicFunction {
    pub fn label(&self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "T",
            HarmonicFunction::Subdominant => "S",
            HarmonicFunction::Dominant => "D",
            HarmonicFunction::Dominant7 => "D7",
            HarmonicFunction::Submediant => "TVI",
        }
    }
}

impl fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One tier of the root-finding cascade: the candidate voice is the root if
/// any listed voice sits at one of the given distances from it.
struct RootRule {
    candidate: Voice,
    distances: &'static [(Voice, &'static [i32])],
}

/// Tier I: a fifth (or compound fifth) above the candidate, `other - candidate`.
/// Wider voice pairs get more octave multiples.
const FIFTH_ABOVE: [RootRule; 4] = [
    RootRule {
        candidate: Voice::Bass,
        distances: &[
            (Voice::Tenor, &[7, 19, 31]),
            (Voice::Alto, &[7, 19, 31, 43]),
            (Voice::Soprano, &[7, 19, 31, 43]),
        ],
    },
    RootRule {
        candidate: Voice::Tenor,
        distances: &[
            (Voice::Bass, &[7]),
            (Voice::Alto, &[7, 19, 31]),
            (Voice::Soprano, &[7, 19, 31, 43]),
        ],
    },
    RootRule {
        candidate: Voice::Alto,
        distances: &[
            (Voice::Bass, &[7]),
            (Voice::Tenor, &[7, 19]),
            (Voice::Soprano, &[7, 19, 31]),
        ],
    },
    RootRule {
        candidate: Voice::Soprano,
        distances: &[
            (Voice::Bass, &[7]),
            (Voice::Tenor, &[7]),
            (Voice::Alto, &[7]),
        ],
    },
];

/// Tier II: a fourth (inverted fifth) below the candidate, `candidate - other`.
const FOURTH_BELOW: [RootRule; 4] = [
    RootRule {
        candidate: Voice::Bass,
        distances: &[
            (Voice::Tenor, &[5]),
            (Voice::Alto, &[5]),
            (Voice::Soprano, &[5]),
        ],
    },
    RootRule {
        candidate: Voice::Tenor,
        distances: &[
            (Voice::Bass, &[5, 17, 29, 41]),
            (Voice::Alto, &[5, 17]),
            (Voice::Soprano, &[5]),
        ],
    },
    RootRule {
        candidate: Voice::Alto,
        distances: &[
            (Voice::Bass, &[5, 17, 29, 41]),
            (Voice::Tenor, &[5, 17, 29, 41]),
            (Voice::Soprano, &[5]),
        ],
    },
    RootRule {
        candidate: Voice::Soprano,
        distances: &[
            (Voice::Bass, &[5, 17, 29, 41, 53]),
            (Voice::Tenor, &[5, 17, 29, 41]),
            (Voice::Alto, &[5, 17, 29, 41]),
        ],
    },
];

/// Tier III candidates for a doubled pitch class, lowest voice first.
const DOUBLING_ORDER: [Voice; 3] = [Voice::Bass, Voice::Tenor, Voice::Alto];

/// Find the root pitch class of four voiced pitches.
///
/// First match wins: a fifth above a candidate (bass, tenor, alto, soprano),
/// then a fourth below one, then a doubled pitch class (lowest voice
/// first), and finally the bass itself.
pub fn find_root(pitches: &PerVoice<Pitch>) -> PitchClass {
    let n = |voice: Voice| pitches[voice].number();

    let fifth = FIFTH_ABOVE.iter().find(|rule| {
        rule.distances
            .iter()
            .any(|(other, spans)| spans.contains(&(n(*other) - n(rule.candidate))))
    });
    if let Some(rule) = fifth {
        return pitches[rule.candidate].class();
    }

    let fourth = FOURTH_BELOW.iter().find(|rule| {
        rule.distances
            .iter()
            .any(|(other, spans)| spans.contains(&(n(rule.candidate) - n(*other))))
    });
    if let Some(rule) = fourth {
        return pitches[rule.candidate].class();
    }

    // Voices above the candidate are the ones earlier in S, A, T, B order.
    let doubled = DOUBLING_ORDER.iter().find(|&&candidate| {
        Voice::ALL[..candidate.index()]
            .iter()
            .any(|&upper| pitches[upper].class() == pitches[candidate].class())
    });
    if let Some(&candidate) = doubled {
        return pitches[candidate].class();
    }

    pitches[Voice::Bass].class()
}

/// One vertical slice of the piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Chord {
    pitches: PerVoice<Pitch>,
    root: PitchClass,
    structure: PerVoice<ChordTone>,
    mode: Option<ChordMode>,
}

impl Chord {
    pub fn new(soprano: Pitch, alto: Pitch, tenor: Pitch, bass: Pitch) -> Self {
        Chord::from_voices(PerVoice::new(soprano, alto, tenor, bass))
    }

    pub fn from_voices(pitches: PerVoice<Pitch>) -> Self {
        let root = find_root(&pitches);
        let structure = pitches.map(|_, pitch| {
            ChordTone::from_interval(pitch.class().interval_above(root))
        });
        let mode = mode_of(&structure);
        Chord {
            pitches,
            root,
            structure,
            mode,
        }
    }

    /// Build from four note tokens in S, A, T, B order.
    pub fn from_tokens(tokens: [&str; 4]) -> Result<Self, ParseError> {
        let pitches = PerVoice::try_from_fn(|voice| parse_pitch(tokens[voice.index()]))?;
        Ok(Chord::from_voices(pitches))
    }

    pub fn pitch(&self, voice: Voice) -> Pitch {
        self.pitches[voice]
    }

    pub fn pitches(&self) -> &PerVoice<Pitch> {
        &self.pitches
    }

    /// Root pitch class. Always resolved: the cascade falls back to the bass.
    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn structure(&self) -> &PerVoice<ChordTone> {
        &self.structure
    }

    /// `None` when the chord has both thirds or no third at all.
    pub fn mode(&self) -> Option<ChordMode> {
        self.mode
    }

    /// Chord symbol such as `C`, `Am`, `G7`; `?` marks an unknown mode.
    pub fn symbol(&self) -> String {
        match self.mode {
            Some(mode) => format!("{}{}", self.root, mode.suffix()),
            None => format!("{}?", self.root),
        }
    }

    /// Classify this chord against `key`.
    ///
    /// Foreign notes don't prevent a match (C E F# G is still a tonic in
    /// C major) but an unexpected seventh does. Sevenths are only accepted
    /// on the dominant.
    pub fn harmonic_function(&self, key: &Key) -> Option<HarmonicFunction> {
        use ChordMode::*;
        use HarmonicFunction::*;

        let mode = self.mode?;
        match (self.root.interval_above(key.tonic), key.mode, mode) {
            (0, KeyMode::Major, Major) | (0, KeyMode::Minor, Minor) => Some(Tonic),
            (5, _, Major | Minor) => Some(Subdominant),
            (7, KeyMode::Major, Major) => Some(Dominant),
            (7, KeyMode::Major, Major7) => Some(Dominant7),
            (7, KeyMode::Minor, Major | Minor) => Some(Dominant),
            (7, KeyMode::Minor, Major7 | Minor7) => Some(Dominant7),
            // sixth degree of a minor key, or of a major key
            (8, _, Major) | (9, _, Minor) => Some(Submediant),
            _ => None,
        }
    }
}

fn mode_of(structure: &PerVoice<ChordTone>) -> Option<ChordMode> {
    let has = |tone: ChordTone| structure.values().any(|t| *t == tone);
    let seventh = has(ChordTone::MinorSeventh);

    match (has(ChordTone::MinorThird), has(ChordTone::MajorThird)) {
        (true, true) | (false, false) => None,
        (true, false) if seventh => Some(ChordMode::Minor7),
        (true, false) => Some(ChordMode::Minor),
        (false, true) if seventh => Some(ChordMode::Major7),
        (false, true) => Some(ChordMode::Major),
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S:{}, A:{}, T:{}, B:{}",
            self.pitches.soprano, self.pitches.alto, self.pitches.tenor, self.pitches.bass
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chord(tokens: [&str; 4]) -> Chord {
        Chord::from_tokens(tokens).unwrap()
    }

    fn root(tokens: [&str; 4]) -> u8 {
        chord(tokens).root().value()
    }

    #[test]
    fn test_chord_keeps_given_pitches() {
        let c = chord(["G'", "E'", "C'", "C,"]);
        assert_eq!(c.pitch(Voice::Soprano).number(), 67);
        assert_eq!(c.pitch(Voice::Alto).number(), 64);
        assert_eq!(c.pitch(Voice::Tenor).number(), 60);
        assert_eq!(c.pitch(Voice::Bass).number(), 48);
        assert_eq!(c.to_string(), "S:G', A:E', T:C', B:C,");
    }

    #[test]
    fn test_from_tokens_rejects_bad_note() {
        assert!(Chord::from_tokens(["G'", "E'", "X", "C,"]).is_err());
    }

    #[test]
    fn test_root_simple_chords() {
        assert_eq!(root(["G'", "E'", "C'", "C,"]), 0);
        assert_eq!(root(["A'", "F#'", "D'", "D,"]), 2);
        assert_eq!(root(["B'", "G'", "E'", "E,"]), 4);
        assert_eq!(root(["C''", "Ab'", "F'", "F,"]), 5);
    }

    #[test]
    fn test_root_inversions() {
        assert_eq!(root(["C''", "C'", "G,", "E,"]), 0);
        assert_eq!(root(["F#'", "D'", "D'", "A,"]), 2);
        assert_eq!(root(["E''", "B'", "E'", "G,"]), 4);
        assert_eq!(root(["F'", "F'", "Ab,", "C,"]), 5);
    }

    #[test]
    fn test_root_dominant_sevenths() {
        assert_eq!(root(["G'", "C#'", "E,", "A,,"]), 9);
        assert_eq!(root(["F'", "D'", "Ab,", "Bb,,"]), 10);
        assert_eq!(root(["D#'", "A,", "F#,", "B,,"]), 11);
    }

    #[test]
    fn test_root_dominant_seventh_inversions() {
        assert_eq!(root(["F#'", "E'", "C#'", "A#,"]), 6);
        assert_eq!(root(["F'", "B,", "G,", "D,"]), 7);
        assert_eq!(root(["Eb'", "C'", "Ab,", "Gb,"]), 8);
    }

    #[test]
    fn test_root_ninth_chords_in_root_position() {
        assert_eq!(root(["D''", "E'", "Bb,", "C,"]), 0);
        assert_eq!(root(["E#'", "D'", "B,", "C#,"]), 1);
        assert_eq!(root(["Eb'", "C'", "F#,", "D,"]), 2);
        assert_eq!(root(["Db''", "F'", "G,", "Eb,"]), 3);
    }

    #[test]
    fn test_root_incomplete_chords() {
        // 1 1 1 3
        assert_eq!(root(["Ab'", "F'", "F,", "F,,"]), 5);
        assert_eq!(root(["G'", "B,", "G,", "G,,"]), 7);
        assert_eq!(root(["A'", "A'", "A,", "C#,"]), 9);
        // 1 1 3 7
        assert_eq!(root(["F'", "Db'", "Cb'", "Db,"]), 1);
        assert_eq!(root(["Db''", "Db'", "Cb'", "F,"]), 1);
        assert_eq!(root(["Db''", "F'", "Db'", "Cb'"]), 1);
        // 1 5
        assert_eq!(root(["F#'", "C#'", "C#'", "F#,"]), 6);
        assert_eq!(root(["F#'", "C#'", "F#,", "C#,"]), 6);
        // 1 1 1 1
        assert_eq!(root(["Db'", "Db'", "Db'", "Db'"]), 1);
    }

    #[test]
    fn test_root_ignores_spelling() {
        assert_eq!(
            chord(["Ab'", "F'", "F,", "F,,"]),
            chord(["G#'", "E#'", "F,", "F,,"])
        );
    }

    #[test]
    fn test_structure_and_mode_major() {
        let c = chord(["G'", "E'", "C'", "C,"]);
        let labels: Vec<_> = c.structure().values().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["5", "3", "1", "1"]);
        assert_eq!(c.mode(), Some(ChordMode::Major));
        assert_eq!(c.symbol(), "C");
    }

    #[test]
    fn test_structure_and_mode_minor() {
        let e = chord(["B'", "G'", "E'", "E,"]);
        assert_eq!(e.structure().alto, ChordTone::MinorThird);
        assert_eq!(e.mode(), Some(ChordMode::Minor));
        assert_eq!(e.symbol(), "Em");
    }

    #[test]
    fn test_mode_sevenths() {
        let a7 = chord(["G'", "C#'", "E,", "A,,"]);
        assert_eq!(a7.structure().soprano, ChordTone::MinorSeventh);
        assert_eq!(a7.mode(), Some(ChordMode::Major7));
        assert_eq!(a7.symbol(), "A7");

        // D F A C, root found through the fifth D-A in the bass/tenor
        let dm7 = chord(["C''", "F'", "A,", "D,"]);
        assert_eq!(dm7.root().value(), 2);
        assert_eq!(dm7.mode(), Some(ChordMode::Minor7));
    }

    #[test]
    fn test_mode_unknown() {
        // both thirds
        let ambiguous = chord(["G'", "E'", "Eb'", "C,"]);
        assert_eq!(ambiguous.mode(), None);
        assert_eq!(ambiguous.symbol(), "C?");

        // no third
        let bare = chord(["G'", "C'", "G,", "C,"]);
        assert_eq!(bare.mode(), None);
    }

    #[test]
    fn test_foreign_note_is_unrecognized() {
        let c = chord(["D''", "E'", "G,", "C,"]);
        assert_eq!(c.root().value(), 0);
        assert_eq!(c.structure().soprano, ChordTone::Unrecognized);
        assert_eq!(c.mode(), Some(ChordMode::Major));
    }

    #[test]
    fn test_harmonic_functions_in_c_major() {
        let key = Key::new(PitchClass::C, KeyMode::Major);
        let f = |tokens| chord(tokens).harmonic_function(&key);

        assert_eq!(f(["G'", "E'", "C'", "C,"]), Some(HarmonicFunction::Tonic));
        assert_eq!(f(["C''", "A'", "F'", "F,"]), Some(HarmonicFunction::Subdominant));
        // minor subdominant
        assert_eq!(f(["C''", "Ab'", "F'", "F,"]), Some(HarmonicFunction::Subdominant));
        assert_eq!(f(["D''", "B'", "G'", "G,"]), Some(HarmonicFunction::Dominant));
        assert_eq!(f(["F'", "B,", "G,", "G,,"]), Some(HarmonicFunction::Dominant7));
        assert_eq!(f(["E''", "C''", "A'", "A,"]), Some(HarmonicFunction::Submediant));
        // Ab major, borrowed sixth degree
        assert_eq!(f(["Eb''", "C''", "Ab'", "Ab,"]), Some(HarmonicFunction::Submediant));
        // minor dominant is not allowed in a major key
        assert_eq!(f(["D''", "Bb'", "G'", "G,"]), None);
        // minor tonic in a major key
        assert_eq!(f(["G'", "Eb'", "C'", "C,"]), None);
    }

    #[test]
    fn test_harmonic_functions_in_a_minor() {
        let key = Key::new(PitchClass::new(9), KeyMode::Minor);
        let f = |tokens| chord(tokens).harmonic_function(&key);

        assert_eq!(f(["E''", "C''", "A'", "A,"]), Some(HarmonicFunction::Tonic));
        assert_eq!(f(["D''", "Bb'", "G'", "G,"]), None);
        assert_eq!(f(["A'", "F'", "D'", "D,"]), Some(HarmonicFunction::Subdominant));
        assert_eq!(f(["B'", "G'", "E'", "E,"]), Some(HarmonicFunction::Dominant));
        assert_eq!(f(["B'", "G#'", "E'", "E,"]), Some(HarmonicFunction::Dominant));
        assert_eq!(f(["D''", "G#'", "E'", "E,"]), Some(HarmonicFunction::Dominant7));
        // E G B D
        assert_eq!(f(["D''", "G'", "B,", "E,"]), Some(HarmonicFunction::Dominant7));
        assert_eq!(f(["C''", "A'", "F'", "F,"]), Some(HarmonicFunction::Submediant));
    }

    #[test]
    fn test_harmonic_function_requires_known_mode() {
        let key = Key::default();
        assert_eq!(chord(["G'", "C'", "G,", "C,"]).harmonic_function(&key), None);
    }
}
