//! Key of a piece: tonic pitch class and major/minor mode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chord::{Chord, ChordMode};
use crate::pitch::PitchClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    Major,
    Minor,
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Major => write!(f, "major"),
            KeyMode::Minor => write!(f, "minor"),
        }
    }
}

/// Tonic and mode used to classify harmonic functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub tonic: PitchClass,
    pub mode: KeyMode,
}

impl Default for Key {
    /// C major, the fallback whenever the opening chord says nothing useful.
    fn default() -> Self {
        Key {
            tonic: PitchClass::C,
            mode: KeyMode::Major,
        }
    }
}

impl Key {
    pub fn new(tonic: PitchClass, mode: KeyMode) -> Self {
        Key { tonic, mode }
    }

    /// Infer the key from the opening chord of a piece.
    pub fn infer(first: &Chord) -> Self {
        Key::from_parts(Some(first.root()), first.mode())
    }

    /// Build a key from a possibly unknown root and chord mode.
    ///
    /// Unknown root falls back to C; unknown mode falls back to major.
    pub fn from_parts(root: Option<PitchClass>, mode: Option<ChordMode>) -> Self {
        let tonic = root.unwrap_or(PitchClass::C);
        let mode = match mode {
            Some(ChordMode::Minor | ChordMode::Minor7) => KeyMode::Minor,
            Some(ChordMode::Major | ChordMode::Major7) | None => KeyMode::Major,
        };
        Key { tonic, mode }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}
