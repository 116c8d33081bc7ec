// Spelled interval: a directed distance in tonal pitch space.
//
// Same (fifths, internal octaves) basis as `SpelledPitch`, so subtracting two
// pitches subtracts coordinates component-wise. A major second is (2, -1):
// two fifths up, one octave down.

use crate::pitch::SpelledPitch;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A directed spelled interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpelledInterval {
    fifths: i64,
    internal_octaves: i64,
}

impl SpelledInterval {
    pub fn new(fifths: i64, internal_octaves: i64) -> Self {
        SpelledInterval {
            fifths,
            internal_octaves,
        }
    }

    /// The perfect unison (zero interval).
    pub fn unison() -> Self {
        SpelledInterval::new(0, 0)
    }

    /// Steps along the line of fifths.
    pub fn fifths(self) -> i64 {
        self.fifths
    }

    /// Octave component of the interval.
    pub fn internal_octaves(self) -> i64 {
        self.internal_octaves
    }

    /// Size in 12-TET semitones: `fifths * 7 + octaves * 12`.
    pub fn semitones(self) -> i64 {
        self.fifths * 7 + self.internal_octaves * 12
    }

    /// Signed number of diatonic (letter-name) steps: 0 for unisons, 1 for
    /// seconds, 7 for octaves, negative when descending.
    pub fn diatonic_steps(self) -> i64 {
        self.fifths * 4 + self.internal_octaves * 7
    }
}

impl Neg for SpelledInterval {
    type Output = SpelledInterval;

    fn neg(self) -> SpelledInterval {
        SpelledInterval::new(-self.fifths, -self.internal_octaves)
    }
}

impl Add for SpelledInterval {
    type Output = SpelledInterval;

    fn add(self, rhs: SpelledInterval) -> SpelledInterval {
        SpelledInterval::new(
            self.fifths + rhs.fifths,
            self.internal_octaves + rhs.internal_octaves,
        )
    }
}

impl Sub for SpelledInterval {
    type Output = SpelledInterval;

    fn sub(self, rhs: SpelledInterval) -> SpelledInterval {
        self + -rhs
    }
}

/// `to - from` is the interval that leads from `from` up to `to`.
impl Sub for SpelledPitch {
    type Output = SpelledInterval;

    fn sub(self, rhs: SpelledPitch) -> SpelledInterval {
        SpelledInterval::new(
            self.fifths() - rhs.fifths(),
            self.internal_octaves() - rhs.internal_octaves(),
        )
    }
}

impl Add<SpelledInterval> for SpelledPitch {
    type Output = SpelledPitch;

    fn add(self, rhs: SpelledInterval) -> SpelledPitch {
        SpelledPitch::new(
            self.fifths() + rhs.fifths,
            self.internal_octaves() + rhs.internal_octaves,
        )
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
    fn perfect_fifth_above_middle_c() {
        let iv = p("G4") - p("C4");
        assert_eq!(iv.fifths(), 1);
        assert_eq!(iv.internal_octaves(), 0);
        assert_eq!(iv.semitones(), 7);
        assert_eq!(iv.diatonic_steps(), 4);
    }

    #[test]
    fn major_second_folds_an_octave() {
        let iv = p("D4") - p("C4");
        assert_eq!(iv, SpelledInterval::new(2, -1));
        assert_eq!(iv.semitones(), 2);
        assert_eq!(iv.diatonic_steps(), 1);
    }

    #[test]
    fn descending_minor_third() {
        let iv = p("C5") - p("Eb5");
        assert_eq!(iv.fifths(), 3);
        assert_eq!(iv.semitones(), -3);
        assert_eq!(iv.diatonic_steps(), -2);
    }

    #[test]
    fn augmented_unison_differs_from_minor_second() {
        let aug1 = p("C#4") - p("C4");
        let min2 = p("Db4") - p("C4");
        assert_eq!(aug1.semitones(), 1);
        assert_eq!(min2.semitones(), 1);
        assert_ne!(aug1, min2);
        assert_eq!(aug1.diatonic_steps(), 0);
        assert_eq!(min2.diatonic_steps(), 1);
    }

    #[test]
    fn octave_leap() {
        let iv = p("A5") - p("A3");
        assert_eq!(iv, SpelledInterval::new(0, 2));
        assert_eq!(iv.semitones(), 24);
    }

    #[test]
    fn repeated_note_is_unison() {
        let iv = p("F#3") - p("F#3");
        assert_eq!(iv, SpelledInterval::unison());
        assert_eq!(iv.semitones(), 0);
    }

    proptest! {
        #[test]
        fn semitones_match_midi_difference(
            t0 in -30i64..30, o0 in -2i64..10, t1 in -30i64..30, o1 in -2i64..10,
        ) {
            let a = SpelledPitch::from_independent(t0, o0);
            let b = SpelledPitch::from_independent(t1, o1);
            prop_assert_eq!((b - a).semitones(), b.midi() - a.midi());
        }

        #[test]
        fn reversed_interval_is_negated(
            t0 in -30i64..30, o0 in -2i64..10, t1 in -30i64..30, o1 in -2i64..10,
        ) {
            let a = SpelledPitch::from_independent(t0, o0);
            let b = SpelledPitch::from_independent(t1, o1);
            prop_assert_eq!(a - b, -(b - a));
        }

        #[test]
        fn adding_the_interval_reaches_the_target(
            t0 in -30i64..30, o0 in -2i64..10, t1 in -30i64..30, o1 in -2i64..10,
        ) {
            let a = SpelledPitch::from_independent(t0, o0);
            let b = SpelledPitch::from_independent(t1, o1);
            prop_assert_eq!(a + (b - a), b);
        }

        #[test]
        fn intervals_compose(
            t0 in -30i64..30, t1 in -30i64..30, t2 in -30i64..30, o in -2i64..10,
        ) {
            let a = SpelledPitch::from_independent(t0, o);
            let b = SpelledPitch::from_independent(t1, o);
            let c = SpelledPitch::from_independent(t2, o);
            prop_assert_eq!((b - a) + (c - b), c - a);
            prop_assert_eq!((c - a) - (b - a), c - b);
        }
    }
}
