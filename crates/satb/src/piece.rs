//! A four-part piece: voice lines, the chords they form, and the key.

use serde::Serialize;
use tracing::{debug, info};

use crate::chord::{Chord, HarmonicFunction};
use crate::error::PieceError;
use crate::export::MidiExport;
use crate::key::Key;
use crate::record::PieceRecord;
use crate::report::Report;
use crate::rules::RuleSet;
use crate::voice::{PerVoice, Voice, VoiceLine};

/// An analyzed piece. Chords and key are computed once, on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    title: String,
    lines: PerVoice<VoiceLine>,
    chords: Vec<Chord>,
    key: Key,
}

impl Piece {
    /// Parse four voice strings into a piece.
    ///
    /// The first voice (in S, A, T, B order) that fails to parse is
    /// reported; all voices must have the same number of notes.
    pub fn new(
        title: impl Into<String>,
        soprano: &str,
        alto: &str,
        tenor: &str,
        bass: &str,
    ) -> Result<Self, PieceError> {
        let texts = PerVoice::new(soprano, alto, tenor, bass);
        let lines = PerVoice::try_from_fn(|voice| {
            VoiceLine::parse(texts[voice]).map_err(|source| PieceError::Parse { voice, source })
        })?;
        Piece::from_lines(title, lines)
    }

    pub fn from_lines(
        title: impl Into<String>,
        lines: PerVoice<VoiceLine>,
    ) -> Result<Self, PieceError> {
        let title = title.into();
        let len = lines.soprano.len();
        if lines.values().any(|line| line.len() != len) {
            return Err(PieceError::LengthMismatch {
                soprano: lines.soprano.len(),
                alto: lines.alto.len(),
                tenor: lines.tenor.len(),
                bass: lines.bass.len(),
            });
        }

        let chords: Vec<Chord> = (0..len)
            .map(|i| Chord::from_voices(lines.map(|_, line| line[i])))
            .collect();

        // A voice line is never empty, so there is always a first chord.
        let key = chords.first().map(Key::infer).unwrap_or_default();

        info!(title = %title, chords = chords.len(), key = %key, "piece built");
        Ok(Piece {
            title,
            lines,
            chords,
            key,
        })
    }

    /// Build from a stored record, screening the raw text first.
    pub fn from_record(record: &PieceRecord) -> Result<Self, PieceError> {
        record.validate()?;
        Piece::new(
            record.title.as_str(),
            &record.soprano,
            &record.alto,
            &record.tenor,
            &record.bass,
        )
    }

    /// Run the selected rules. Each call starts from an empty report.
    pub fn check(&self, rules: &RuleSet) -> Report {
        let mut report = Report::new();
        for checker in rules.checkers() {
            debug!(rule = %checker.rule(), "running checker");
            checker.check(self, &mut report);
        }
        info!(
            title = %self.title,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "piece checked"
        );
        report
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &PerVoice<VoiceLine> {
        &self.lines
    }

    pub fn line(&self, voice: Voice) -> &VoiceLine {
        &self.lines[voice]
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    /// Number of chords (equal to the length of every voice).
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Harmonic function of every chord against the piece's key.
    pub fn functions(&self) -> Vec<Option<HarmonicFunction>> {
        self.chords
            .iter()
            .map(|chord| chord.harmonic_function(&self.key))
            .collect()
    }

    pub fn midi_export(&self, tempo_bpm: u32) -> MidiExport {
        MidiExport::new(self.title.as_str(), &self.lines, tempo_bpm)
    }
}
