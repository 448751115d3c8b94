//! Note token and voice line parsing using winnow combinators.
//!
//! A token is a letter, optional accidentals, and optional octave marks:
//! `C`, `F#'`, `Bb,,`, `f##''`. Unmarked notes sit in the reference octave
//! (C = 60); `'` x n selects octave 4+n and `,` x n selects octave 5-n.

use winnow::combinator::repeat;
use winnow::prelude::*;
use winnow::token::any;

use crate::error::ParseError;
use crate::pitch::{Pitch, PitchClass, REFERENCE_OCTAVE};

type PResult<T> = winnow::ModalResult<T>;

/// Octave marks beyond this many on one token are rejected.
const MAX_OCTAVE_MARKS: usize = 8;

fn letter_semitones(c: char) -> Option<i32> {
    match c.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Parse a note letter (either case) into its semitone offset from C.
pub fn parse_letter(input: &mut &str) -> PResult<i32> {
    any.verify_map(letter_semitones).parse_next(input)
}

/// Parse a run of sharps (`#`) or flats (`b`) into a semitone adjustment.
pub fn parse_accidentals(input: &mut &str) -> PResult<i32> {
    let sharps: Vec<_> = repeat(0.., '#').parse_next(input)?;
    if !sharps.is_empty() {
        return Ok(sharps.len() as i32);
    }
    let flats: Vec<_> = repeat(0.., 'b').parse_next(input)?;
    Ok(-(flats.len() as i32))
}

/// Parse octave marks (`'` or `,`, never mixed) into an absolute octave.
pub fn parse_octave(input: &mut &str) -> PResult<i8> {
    let ups: Vec<_> = repeat(0..=MAX_OCTAVE_MARKS, '\'').parse_next(input)?;
    if !ups.is_empty() {
        return Ok(REFERENCE_OCTAVE - 1 + ups.len() as i8);
    }
    let downs: Vec<_> = repeat(0..=MAX_OCTAVE_MARKS, ',').parse_next(input)?;
    Ok(REFERENCE_OCTAVE - downs.len() as i8)
}

/// Parse a complete note.
///
/// Accidentals move the pitch class only; the octave written on the token
/// is kept, so `Cb'` is B in octave 5.
pub fn parse_note(input: &mut &str) -> PResult<Pitch> {
    let letter = parse_letter(input)?;
    let accidental = parse_accidentals(input)?;
    let octave = parse_octave(input)?;
    Ok(Pitch::new(PitchClass::new(letter + accidental), octave))
}

fn is_note_char(c: char) -> bool {
    matches!(c, 'A'..='G' | 'a'..='g' | '#' | '\'' | ',')
}

/// Parse one whitespace-free note token.
pub fn parse_pitch(token: &str) -> Result<Pitch, ParseError> {
    if token.is_empty() {
        return Err(ParseError::EmptyToken);
    }
    if let Some(ch) = token.chars().find(|c| !is_note_char(*c)) {
        return Err(ParseError::InvalidCharacter {
            token: token.to_string(),
            ch,
        });
    }
    parse_note.parse(token).map_err(|_| ParseError::Malformed {
        token: token.to_string(),
    })
}

/// Parse a whitespace-separated line of note tokens.
///
/// The first bad token aborts the whole line; there is no partial recovery.
pub fn parse_line(text: &str) -> Result<Vec<Pitch>, ParseError> {
    let pitches = text
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            parse_pitch(token).map_err(|e| ParseError::AtNote {
                position: i + 1,
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if pitches.is_empty() {
        return Err(ParseError::EmptyVoice);
    }
    Ok(pitches)
}
