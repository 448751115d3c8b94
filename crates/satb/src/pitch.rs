//! Pitch values: pitch class, octave, and absolute chromatic number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Sharp spelling, used whenever a pitch is rendered.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Octave of an unmarked note token (the alto/tenor octave, C = 60).
pub const REFERENCE_OCTAVE: i8 = 5;

/// Chromatic note identity modulo octave (C=0 .. B=11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Wrap any semitone offset from C into 0-11.
    pub fn new(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }

    /// Ascending interval from `base` up to `self`, 0-11.
    pub fn interval_above(self, base: PitchClass) -> u8 {
        (self.0 as i32 - base.0 as i32).rem_euclid(12) as u8
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 12 {
            Ok(PitchClass(value))
        } else {
            Err(format!("pitch class {} out of range 0-11", value))
        }
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single sung note.
///
/// The absolute number is `pitch_class + 12 * octave`; with the octave
/// convention of the note grammar, middle C (`C'`) is 60, so absolute
/// numbers line up with MIDI note numbers. Range legality is a rule check,
/// not a construction invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    class: PitchClass,
    octave: i8,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: i8) -> Self {
        Pitch { class, octave }
    }

    /// Build the pitch whose absolute number is `number`.
    pub fn from_number(number: i32) -> Self {
        Pitch {
            class: PitchClass::new(number),
            octave: number.div_euclid(12) as i8,
        }
    }

    pub fn class(&self) -> PitchClass {
        self.class
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// Absolute chromatic number.
    pub fn number(&self) -> i32 {
        self.class.value() as i32 + 12 * self.octave as i32
    }

    /// Absolute number clamped into the MIDI note range.
    pub fn midi_note(&self) -> u8 {
        self.number().clamp(0, 127) as u8
    }

    /// Canonical token form: sharp spelling plus octave marks.
    ///
    /// Octave 5 renders as `'`, so an unmarked input token comes back with
    /// one mark (`C` -> `C'`).
    pub fn token(&self) -> String {
        let marks = if self.octave < REFERENCE_OCTAVE {
            ",".repeat((REFERENCE_OCTAVE - self.octave) as usize)
        } else {
            "'".repeat((self.octave - REFERENCE_OCTAVE + 1) as usize)
        };
        format!("{}{}", self.class.name(), marks)
    }

    /// Scientific pitch name. Natural names get one trailing space so they
    /// line up with sharps (`C'` -> `"C4 "`, `C#'` -> `"C#4"`).
    pub fn human(&self) -> String {
        let name = self.class.name();
        let pad = if name.len() == 1 { " " } else { "" };
        format!("{}{}{}", name, self.octave as i32 - 1, pad)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl FromStr for Pitch {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_pitch(s)
    }
}
