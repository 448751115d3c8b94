//! Score-aligned text rows for showing a piece next to its report.
//!
//! Every column is four characters wide so note names, function labels and
//! chord numbers line up:
//!
//! ```text
//!  1   2   3
//! |G4  A4  G4 ||
//! |T   S   D  ||
//! ```

use std::fmt;

use serde::Serialize;

use crate::chord::HarmonicFunction;
use crate::piece::Piece;
use crate::voice::{PerVoice, Voice};

/// `|T   S   D7 ||`; chords without a function leave a blank column.
pub fn functions_row(functions: &[Option<HarmonicFunction>]) -> String {
    let mut row: String = functions
        .iter()
        .map(|function| format!("{:<4}", function.map(|f| f.label()).unwrap_or("")))
        .collect();
    row.pop();
    format!("|{}||", row)
}

/// ` 1   2   3   ` numbering the chord columns from 1.
pub fn index_row(len: usize) -> String {
    let numbers: String = (1..=len).map(|n| format!("{:<4}", n)).collect();
    format!(" {}", numbers)
}

/// Everything needed to print a piece as a small score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreView {
    pub title: String,
    pub key: String,
    pub index: String,
    pub tokens: PerVoice<String>,
    pub human: PerVoice<String>,
    pub functions: String,
}

impl ScoreView {
    pub fn of(piece: &Piece) -> Self {
        ScoreView {
            title: piece.title().to_string(),
            key: piece.key().to_string(),
            index: index_row(piece.len()),
            tokens: piece.lines().map(|_, line| line.tokens()),
            human: piece.lines().map(|_, line| line.human()),
            functions: functions_row(&piece.functions()),
        }
    }
}

impl fmt::Display for ScoreView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.key)?;
        writeln!(f, "   {}", self.index.trim_end())?;
        for voice in Voice::ALL {
            writeln!(f, "{}: {}", voice, self.human[voice])?;
        }
        writeln!(f, "F: {}", self.functions)
    }
}
