//! Four-part (SATB) harmony analysis.
//!
//! This crate parses soprano, alto, tenor and bass lines written in a compact
//! note notation, finds the root and quality of every chord they form, infers
//! the key from the opening chord, and checks the piece against the classic
//! rules of four-part writing: voice ranges, melodic leaps, spacing,
//! consecutive fifths and octaves, and chord doubling.
//!
//! # Example
//!
//! ```
//! use satb::{Piece, RuleSet};
//!
//! let piece = Piece::new(
//!     "Plagal cadence",
//!     "C'' C''",
//!     "A' G'",
//!     "F' E'",
//!     "F, C,",
//! )
//! .unwrap();
//!
//! assert_eq!(piece.key().to_string(), "F major");
//!
//! let report = piece.check(&RuleSet::parse(["RANGE", "PARALELS"]).unwrap());
//! assert_eq!(report.error_count(), 0);
//! ```

pub mod chord;
pub mod error;
pub mod export;
pub mod key;
pub mod parser;
pub mod piece;
pub mod pitch;
pub mod record;
pub mod render;
pub mod report;
pub mod rules;
pub mod voice;

pub use chord::{Chord, ChordMode, ChordTone, HarmonicFunction};
pub use error::{CheckError, ParseError, PieceError, RuleError, ValidationError};
pub use export::{MidiExport, MidiTrack, NoteEvent};
pub use key::{Key, KeyMode};
pub use piece::Piece;
pub use pitch::{Pitch, PitchClass};
pub use record::PieceRecord;
pub use render::ScoreView;
pub use report::{Category, Finding, Report, Severity};
pub use rules::{Checker, Rule, RuleSet};
pub use voice::{PerVoice, Voice, VoiceLine};

/// Build a piece from a stored record and run the named rules on it.
///
/// Rule names are matched case-insensitively; `ALL` selects every rule.
pub fn check_record<S: AsRef<str>>(
    record: &PieceRecord,
    rules: &[S],
) -> Result<(Piece, Report), CheckError> {
    let rules = RuleSet::parse(rules)?;
    let piece = Piece::from_record(record)?;
    let report = piece.check(&rules);
    Ok((piece, report))
}
