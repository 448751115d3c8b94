//! The four vocal parts and the per-voice containers built on them.
//!
//! Every per-voice collection is array-indexed and iterates in S, A, T, B
//! order, so rule output is deterministic.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::parser;
use crate::pitch::Pitch;

/// Voice index in SATB order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Voice {
    Soprano = 0,
    Alto = 1,
    Tenor = 2,
    Bass = 3,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Soprano, Voice::Alto, Voice::Tenor, Voice::Bass];

    pub fn index(self) -> usize {
        self as usize
    }

    /// One-letter label used in findings (`S`, `A`, `T`, `B`).
    pub fn letter(self) -> &'static str {
        match self {
            Voice::Soprano => "S",
            Voice::Alto => "A",
            Voice::Tenor => "T",
            Voice::Bass => "B",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Voice::Soprano => "Soprano",
            Voice::Alto => "Alto",
            Voice::Tenor => "Tenor",
            Voice::Bass => "Bass",
        }
    }

    /// Singable range as inclusive absolute numbers (C4 = 60).
    pub fn range(self) -> (i32, i32) {
        match self {
            Voice::Soprano => (58, 81), // A#3–A5
            Voice::Alto => (53, 74),    // F3–D5
            Voice::Tenor => (46, 69),   // A#2–A4
            Voice::Bass => (40, 62),    // E2–D4
        }
    }

    /// Every unordered voice pair, upper voice first.
    pub const PAIRS: [(Voice, Voice); 6] = [
        (Voice::Soprano, Voice::Alto),
        (Voice::Soprano, Voice::Tenor),
        (Voice::Soprano, Voice::Bass),
        (Voice::Alto, Voice::Tenor),
        (Voice::Alto, Voice::Bass),
        (Voice::Tenor, Voice::Bass),
    ];

    /// True for neighbouring parts (S/A, A/T, T/B).
    pub fn is_adjacent(self, other: Voice) -> bool {
        self.index().abs_diff(other.index()) == 1
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Exactly one value per voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PerVoice<T> {
    pub soprano: T,
    pub alto: T,
    pub tenor: T,
    pub bass: T,
}

impl<T> PerVoice<T> {
    pub fn new(soprano: T, alto: T, tenor: T, bass: T) -> Self {
        PerVoice {
            soprano,
            alto,
            tenor,
            bass,
        }
    }

    /// Build by calling `f` for each voice in S, A, T, B order.
    pub fn from_fn(mut f: impl FnMut(Voice) -> T) -> Self {
        PerVoice {
            soprano: f(Voice::Soprano),
            alto: f(Voice::Alto),
            tenor: f(Voice::Tenor),
            bass: f(Voice::Bass),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Voice, &T) -> U) -> PerVoice<U> {
        PerVoice::from_fn(|voice| f(voice, &self[voice]))
    }

    /// `(voice, value)` pairs in S, A, T, B order.
    pub fn iter(&self) -> impl Iterator<Item = (Voice, &T)> {
        Voice::ALL.into_iter().map(move |voice| (voice, &self[voice]))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, value)| value)
    }

    /// Fallible construction; the first error in S, A, T, B order wins.
    pub fn try_from_fn<E>(mut f: impl FnMut(Voice) -> Result<T, E>) -> Result<Self, E> {
        Ok(PerVoice {
            soprano: f(Voice::Soprano)?,
            alto: f(Voice::Alto)?,
            tenor: f(Voice::Tenor)?,
            bass: f(Voice::Bass)?,
        })
    }
}

impl<T> Index<Voice> for PerVoice<T> {
    type Output = T;

    fn index(&self, voice: Voice) -> &T {
        match voice {
            Voice::Soprano => &self.soprano,
            Voice::Alto => &self.alto,
            Voice::Tenor => &self.tenor,
            Voice::Bass => &self.bass,
        }
    }
}

impl<T> IndexMut<Voice> for PerVoice<T> {
    fn index_mut(&mut self, voice: Voice) -> &mut T {
        match voice {
            Voice::Soprano => &mut self.soprano,
            Voice::Alto => &mut self.alto,
            Voice::Tenor => &mut self.tenor,
            Voice::Bass => &mut self.bass,
        }
    }
}

/// One melodic line: an ordered, non-empty sequence of pitches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceLine {
    pitches: Vec<Pitch>,
}

impl VoiceLine {
    /// Parse whitespace-separated note tokens.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(VoiceLine {
            pitches: parser::parse_line(text)?,
        })
    }

    /// Wrap already-parsed pitches; fails on an empty list.
    pub fn from_pitches(pitches: Vec<Pitch>) -> Result<Self, ParseError> {
        if pitches.is_empty() {
            return Err(ParseError::EmptyVoice);
        }
        Ok(VoiceLine { pitches })
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// Whether the line has no notes.
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pitch> {
        self.pitches.get(index)
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pitch> {
        self.pitches.iter()
    }

    /// Canonical token form, space separated (`C' E' G'`).
    pub fn tokens(&self) -> String {
        self.pitches
            .iter()
            .map(Pitch::token)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Score-aligned human form: `|C4  E4  G#4||`, four columns per note.
    pub fn human(&self) -> String {
        let notes = self
            .pitches
            .iter()
            .map(Pitch::human)
            .collect::<Vec<_>>()
            .join(" ");
        format!("|{}||", notes)
    }
}

impl Index<usize> for VoiceLine {
    type Output = Pitch;

    fn index(&self, index: usize) -> &Pitch {
        &self.pitches[index]
    }
}

impl<'a> IntoIterator for &'a VoiceLine {
    type Item = &'a Pitch;
    type IntoIter = std::slice::Iter<'a, Pitch>;

    fn into_iter(self) -> Self::IntoIter {
        self.pitches.iter()
    }
}
