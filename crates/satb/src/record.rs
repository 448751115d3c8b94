//! Stored piece records, as kept by whatever persists pieces.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::voice::{PerVoice, Voice};

/// A piece as stored: a title and four raw voice strings.
///
/// `is_public` is carried for the storage side and ignored by analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub title: String,
    pub soprano: String,
    pub alto: String,
    pub tenor: String,
    pub bass: String,
    #[serde(default)]
    pub is_public: bool,
}

impl PieceRecord {
    pub fn new(
        title: impl Into<String>,
        soprano: impl Into<String>,
        alto: impl Into<String>,
        tenor: impl Into<String>,
        bass: impl Into<String>,
    ) -> Self {
        PieceRecord {
            title: title.into(),
            soprano: soprano.into(),
            alto: alto.into(),
            tenor: tenor.into(),
            bass: bass.into(),
            is_public: false,
        }
    }

    pub fn voices(&self) -> PerVoice<&str> {
        PerVoice::new(
            self.soprano.as_str(),
            self.alto.as_str(),
            self.tenor.as_str(),
            self.bass.as_str(),
        )
    }

    /// Cheap character-level screening of the voice strings, with friendlier
    /// messages than the note parser gives for the usual mistakes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (voice, text) in self.voices().iter() {
            validate_voice(voice, text)?;
        }
        Ok(())
    }
}

fn validate_voice(voice: Voice, text: &str) -> Result<(), ValidationError> {
    if text.contains(['h', 'H']) {
        return Err(ValidationError::GermanNotation { voice });
    }
    if text.contains(['r', 'R']) {
        return Err(ValidationError::Rest { voice });
    }
    let allowed = |c: char| matches!(c, 'a'..='g' | 'A'..='G' | '#' | '\'' | ',') || c.is_whitespace();
    if !text.chars().all(allowed) {
        return Err(ValidationError::WrongNotation { voice });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(bass: &str) -> PieceRecord {
        PieceRecord::new("Chorale", "G' A'", "E' F'", "C' C'", bass)
    }

    #[test]
    fn test_valid_record() {
        assert_eq!(record("C, F,").validate(), Ok(()));
    }

    #[test]
    fn test_german_notation() {
        assert_eq!(
            record("H, C,").validate(),
            Err(ValidationError::GermanNotation { voice: Voice::Bass })
        );
    }

    #[test]
    fn test_rests() {
        assert_eq!(
            record("C, r").validate(),
            Err(ValidationError::Rest { voice: Voice::Bass })
        );
    }

    #[test]
    fn test_wrong_notation() {
        assert_eq!(
            record("C3 F3").validate(),
            Err(ValidationError::WrongNotation { voice: Voice::Bass })
        );
    }

    #[test]
    fn test_is_public_defaults_to_false() {
        let text = r#"
title = "Chorale"
soprano = "G'"
alto = "E'"
tenor = "C'"
bass = "C,"
"#;
        let parsed: PieceRecord = toml::from_str(text).unwrap();
        assert!(!parsed.is_public);
        assert_eq!(parsed.voices().bass, "C,");
    }
}
