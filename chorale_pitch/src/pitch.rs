// Spelled pitch: a point in tonal pitch space.
//
// Stored in the internal (fifths, octaves) basis. Construct from corpus data
// with `from_independent(tpc, octave)` and read back the written octave with
// `octave()`. Names follow scientific pitch notation with ASCII accidentals:
// `C4`, `F#3`, `Bb2`, `Ebb5`, `B#-1`.

use crate::{COORDINATE_LIMIT, coordinate_in_range, diatonic_octave_span};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Natural letter names in line-of-fifths order, starting at F (fifths = -1).
const LETTERS_BY_FIFTHS: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];

/// A spelled (enharmonically distinct) pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpelledPitch {
    fifths: i64,
    internal_octaves: i64,
}

impl SpelledPitch {
    /// Build directly from internal coordinates.
    pub fn new(fifths: i64, internal_octaves: i64) -> Self {
        SpelledPitch {
            fifths,
            internal_octaves,
        }
    }

    /// Build from a tonal pitch class and the octave number as written in
    /// scientific pitch notation.
    pub fn from_independent(tpc: i64, octave: i64) -> Self {
        SpelledPitch {
            fifths: tpc,
            internal_octaves: octave - diatonic_octave_span(tpc),
        }
    }

    /// Position on the line of fifths (the tonal pitch class).
    pub fn fifths(self) -> i64 {
        self.fifths
    }

    /// Octave component after factoring out the line-of-fifths position.
    pub fn internal_octaves(self) -> i64 {
        self.internal_octaves
    }

    /// Octave number as written (scientific pitch notation).
    pub fn octave(self) -> i64 {
        self.internal_octaves + diatonic_octave_span(self.fifths)
    }

    /// MIDI key number under 12-TET (C4 = 60). Unbounded: very high or low
    /// spellings fall outside 0..=127.
    pub fn midi(self) -> i64 {
        self.fifths * 7 + (self.internal_octaves + 1) * 12
    }

    /// Natural letter name, ignoring accidentals.
    pub fn letter(self) -> char {
        LETTERS_BY_FIFTHS[(self.fifths + 1).rem_euclid(7) as usize]
    }

    /// Signed accidental count: +1 per sharp, -1 per flat.
    pub fn accidentals(self) -> i64 {
        (self.fifths + 1).div_euclid(7)
    }
}

impl fmt::Display for SpelledPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acc = self.accidentals();
        let symbol = if acc >= 0 { "#" } else { "b" };
        write!(
            f,
            "{}{}{}",
            self.letter(),
            symbol.repeat(acc.unsigned_abs() as usize),
            self.octave()
        )
    }
}

/// Failure to parse a pitch name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchParseError {
    #[error("empty pitch name")]
    Empty,

    #[error("unknown letter '{0}' (expected A-G)")]
    UnknownLetter(char),

    #[error("pitch name '{0}' mixes sharps and flats")]
    MixedAccidentals(String),

    #[error("pitch name '{0}' has no octave number")]
    MissingOctave(String),

    #[error("invalid octave '{octave}' in pitch name '{name}'")]
    InvalidOctave { name: String, octave: String },

    #[error("octave in pitch name '{0}' is beyond +/-{limit}", limit = COORDINATE_LIMIT)]
    OctaveOutOfRange(String),
}

impl FromStr for SpelledPitch {
    type Err = PitchParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let mut chars = name.chars();
        let letter = chars.next().ok_or(PitchParseError::Empty)?;
        let natural = LETTERS_BY_FIFTHS
            .iter()
            .position(|&l| l == letter.to_ascii_uppercase())
            .ok_or(PitchParseError::UnknownLetter(letter))? as i64
            - 1;

        let rest = chars.as_str();
        let acc_len = rest.find(|c| c != '#' && c != 'b').unwrap_or(rest.len());
        let (acc, octave) = rest.split_at(acc_len);
        let sharps = acc.matches('#').count() as i64;
        let flats = acc.matches('b').count() as i64;
        if sharps > 0 && flats > 0 {
            return Err(PitchParseError::MixedAccidentals(name.to_string()));
        }
        if octave.is_empty() {
            return Err(PitchParseError::MissingOctave(name.to_string()));
        }
        let octave: i64 = octave
            .parse()
            .map_err(|_| PitchParseError::InvalidOctave {
                name: name.to_string(),
                octave: octave.to_string(),
            })?;
        if !coordinate_in_range(octave) {
            return Err(PitchParseError::OctaveOutOfRange(name.to_string()));
        }

        Ok(SpelledPitch::from_independent(
            natural + 7 * (sharps - flats),
            octave,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(name: &str) -> SpelledPitch {
        name.parse().unwrap()
    }

    #[test]
    fn midi_of_middle_octave() {
        assert_eq!(p("C4").midi(), 60);
        assert_eq!(p("D4").midi(), 62);
        assert_eq!(p("E4").midi(), 64);
        assert_eq!(p("F4").midi(), 65);
        assert_eq!(p("G4").midi(), 67);
        assert_eq!(p("A4").midi(), 69);
        assert_eq!(p("B4").midi(), 71);
        assert_eq!(p("Bb3").midi(), 58);
        assert_eq!(p("C-1").midi(), 0);
    }

    #[test]
    fn enharmonics_share_midi_but_not_identity() {
        let cs = p("C#4");
        let db = p("Db4");
        assert_eq!(cs.midi(), db.midi());
        assert_ne!(cs, db);
        assert_eq!(cs.fifths(), 7);
        assert_eq!(db.fifths(), -5);
    }

    #[test]
    fn written_octave_is_kept_across_the_octave_boundary() {
        // B#4 sounds as C5 and Cb4 as B3, but both keep their written octave.
        let bs = p("B#4");
        assert_eq!(bs.octave(), 4);
        assert_eq!(bs.midi(), 72);
        let cb = p("Cb4");
        assert_eq!(cb.octave(), 4);
        assert_eq!(cb.midi(), 59);
    }

    #[test]
    fn internal_octaves_of_naturals() {
        assert_eq!(p("C4").internal_octaves(), 4);
        assert_eq!(p("G4").internal_octaves(), 4);
        assert_eq!(p("D4").internal_octaves(), 3);
        assert_eq!(p("F4").internal_octaves(), 5);
    }

    #[test]
    fn letters_and_accidentals() {
        assert_eq!(p("F#3").letter(), 'F');
        assert_eq!(p("F#3").accidentals(), 1);
        assert_eq!(p("Ebb5").letter(), 'E');
        assert_eq!(p("Ebb5").accidentals(), -2);
        assert_eq!(p("A0").accidentals(), 0);
    }

    #[test]
    fn display_names() {
        assert_eq!(SpelledPitch::from_independent(0, 4).to_string(), "C4");
        assert_eq!(SpelledPitch::from_independent(6, 3).to_string(), "F#3");
        assert_eq!(SpelledPitch::from_independent(-2, 2).to_string(), "Bb2");
        assert_eq!(SpelledPitch::from_independent(-10, 5).to_string(), "Ebb5");
        assert_eq!(SpelledPitch::from_independent(12, -1).to_string(), "B#-1");
    }

    #[test]
    fn lowercase_letter_is_accepted() {
        assert_eq!(p("bb3"), p("Bb3"));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<SpelledPitch>(), Err(PitchParseError::Empty));
        assert_eq!(
            "H4".parse::<SpelledPitch>(),
            Err(PitchParseError::UnknownLetter('H'))
        );
        assert!(matches!(
            "C#b4".parse::<SpelledPitch>(),
            Err(PitchParseError::MixedAccidentals(_))
        ));
        assert!(matches!(
            "C#".parse::<SpelledPitch>(),
            Err(PitchParseError::MissingOctave(_))
        ));
        assert!(matches!(
            "Cx4".parse::<SpelledPitch>(),
            Err(PitchParseError::InvalidOctave { .. })
        ));
    }

    #[test]
    fn huge_octave_is_rejected() {
        assert!(matches!(
            "C3000000000000000000".parse::<SpelledPitch>(),
            Err(PitchParseError::OctaveOutOfRange(_))
        ));
        let edge = format!("C{COORDINATE_LIMIT}");
        assert_eq!(p(&edge).octave(), COORDINATE_LIMIT);
    }

    #[test]
    fn serde_roundtrip_keeps_internal_coordinates() {
        let pitch = p("F#3");
        let json = serde_json::to_string(&pitch).unwrap();
        assert_eq!(json, r#"{"fifths":6,"internal_octaves":0}"#);
        let back: SpelledPitch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pitch);
    }

    proptest! {
        #[test]
        fn independent_coordinates_roundtrip(tpc in -40i64..40, octave in -5i64..12) {
            let pitch = SpelledPitch::from_independent(tpc, octave);
            prop_assert_eq!(pitch.fifths(), tpc);
            prop_assert_eq!(pitch.octave(), octave);
        }

        #[test]
        fn height_decomposes_into_fifths_and_octaves(tpc in -40i64..40, octave in -5i64..12) {
            // The written height `tpc*7 + (octave+1)*12` overshoots the sounding
            // pitch by exactly the octaves the fifths already climbed.
            let pitch = SpelledPitch::from_independent(tpc, octave);
            prop_assert_eq!(
                pitch.midi(),
                tpc * 7 + (octave + 1) * 12 - 12 * diatonic_octave_span(tpc)
            );
            prop_assert_eq!(
                pitch.midi(),
                pitch.fifths() * 7 + (pitch.internal_octaves() + 1) * 12
            );
        }

        #[test]
        fn octave_shift_only_moves_internal_octaves(tpc in -40i64..40, octave in -5i64..12) {
            let low = SpelledPitch::from_independent(tpc, octave);
            let high = SpelledPitch::from_independent(tpc, octave + 1);
            prop_assert_eq!(high.fifths(), low.fifths());
            prop_assert_eq!(high.internal_octaves(), low.internal_octaves() + 1);
            prop_assert_eq!(high.midi(), low.midi() + 12);
        }

        #[test]
        fn name_roundtrip(tpc in -25i64..25, octave in -3i64..10) {
            let pitch = SpelledPitch::from_independent(tpc, octave);
            prop_assert_eq!(pitch.to_string().parse::<SpelledPitch>().unwrap(), pitch);
        }
    }
}
