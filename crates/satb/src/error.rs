//! Error types for note parsing, piece construction, and rule selection.
//!
//! Rule findings are not errors: a checker always succeeds and records what
//! it found in a [`Report`](crate::report::Report). The types here cover the
//! input that can't be analyzed at all.

use thiserror::Error;

use crate::voice::Voice;

/// A note token or voice line that doesn't follow the note grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty note token")]
    EmptyToken,

    #[error("invalid character {ch:?} in note {token:?}")]
    InvalidCharacter { token: String, ch: char },

    #[error("malformed note {token:?}")]
    Malformed { token: String },

    #[error("note {position}: {source}")]
    AtNote {
        /// 1-based position of the offending token in its line
        position: usize,
        #[source]
        source: Box<ParseError>,
    },

    #[error("voice contains no notes")]
    EmptyVoice,
}

/// A stored record whose voice text can't be a piece, with a hint at why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{voice}: use English note names (B, not H)")]
    GermanNotation { voice: Voice },

    #[error("{voice}: rests are not allowed")]
    Rest { voice: Voice },

    #[error("{voice}: wrong notation, only A-G, a-g, #, ', and , are allowed")]
    WrongNotation { voice: Voice },
}

/// Failure to build a [`Piece`](crate::piece::Piece) from raw voice text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("{voice}: {source}")]
    Parse {
        voice: Voice,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(
        "all voices must have the same length (S={soprano}, A={alto}, T={tenor}, B={bass})"
    )]
    LengthMismatch {
        soprano: usize,
        alto: usize,
        tenor: usize,
        bass: usize,
    },
}

/// Unrecognized rule name passed to [`RuleSet::parse`](crate::rules::RuleSet::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown rule {0:?} (expected ALL, RANGE, LEAPS, DISTANCES, PARALELS, CHORDS or CHORDS_IN_CTX)")]
    Unknown(String),
}

/// Anything that stops [`check_record`](crate::check_record) before rules run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Piece(#[from] PieceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_parse_error_message() {
        let err = PieceError::Parse {
            voice: Voice::Alto,
            source: ParseError::AtNote {
                position: 3,
                source: Box::new(ParseError::InvalidCharacter {
                    token: "Hb".to_string(),
                    ch: 'H',
                }),
            },
        };
        assert_eq!(
            err.to_string(),
            "A: note 3: invalid character 'H' in note \"Hb\""
        );
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: PieceError = ValidationError::Rest { voice: Voice::Bass }.into();
        assert_eq!(err.to_string(), "B: rests are not allowed");
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = PieceError::LengthMismatch {
            soprano: 4,
            alto: 4,
            tenor: 3,
            bass: 4,
        };
        assert!(err.to_string().contains("T=3"));
    }
}
