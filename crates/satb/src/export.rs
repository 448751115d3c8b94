//! Playback model for a piece: one MIDI track per voice.
//!
//! This is the data a Standard MIDI File writer needs, not the file itself.
//! Every chord gets the same length, so note `i` of each track starts at
//! `i * note_ticks`.

use serde::{Deserialize, Serialize};

use crate::voice::{PerVoice, Voice, VoiceLine};

pub const DEFAULT_TEMPO_BPM: u32 = 90;
pub const DEFAULT_TICKS_PER_BEAT: u16 = 480;
pub const DEFAULT_VELOCITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub note: u8,
    pub start_tick: u32,
    pub duration_ticks: u32,
    pub velocity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiTrack {
    pub voice: Voice,
    /// MIDI channel, one per voice in S, A, T, B order
    pub channel: u8,
    pub notes: Vec<u8>,
}

impl MidiTrack {
    /// Timed events, one beat per note.
    pub fn events(&self, ticks_per_beat: u16, velocity: u8) -> Vec<NoteEvent> {
        let length = ticks_per_beat as u32;
        self.notes
            .iter()
            .enumerate()
            .map(|(i, &note)| NoteEvent {
                note,
                start_tick: i as u32 * length,
                duration_ticks: length,
                velocity,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiExport {
    pub title: String,
    pub tempo_bpm: u32,
    pub ticks_per_beat: u16,
    pub tracks: Vec<MidiTrack>,
}

impl MidiExport {
    pub fn new(title: impl Into<String>, lines: &PerVoice<VoiceLine>, tempo_bpm: u32) -> Self {
        let tracks = lines
            .iter()
            .map(|(voice, line)| MidiTrack {
                voice,
                channel: voice.index() as u8,
                notes: line.iter().map(|pitch| pitch.midi_note()).collect(),
            })
            .collect();

        MidiExport {
            title: title.into(),
            tempo_bpm,
            ticks_per_beat: DEFAULT_TICKS_PER_BEAT,
            tracks,
        }
    }

    /// Microseconds per quarter note, as carried by a MIDI tempo meta event.
    pub fn micros_per_beat(&self) -> u32 {
        60_000_000 / self.tempo_bpm.max(1)
    }

    /// Suggested file name: the title with anything unsafe replaced by `_`.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        let stem = if stem.is_empty() { "piece".to_string() } else { stem };
        format!("{}.mid", stem)
    }
}
