// Interval calculator: bigram → distance row.
//
// Each note is lifted into tonal pitch space with
// `SpelledPitch::from_independent(tpc, octave)`, which folds the written
// octave into an internal octave (`octave - floor(4 * tpc / 7)`) so that the
// fifths axis and the octave axis are orthogonal. The directed interval
// n1 - n0 is then read off component-wise:
//
//   interval_fifths    = n1.tpc - n0.tpc
//   interval_octaves   = internal_octave(n1) - internal_octave(n0)
//   interval_semitones = interval_fifths * 7 + interval_octaves * 12
//   n0_pitch_code      = n0.tpc * 7 + (internal_octave(n0) + 1) * 12
//
// With the folding, the pitch code is the MIDI key number and the semitone
// count is exactly the MIDI difference of the two notes. Total over the
// integers; no error paths.

use crate::bigram::Bigram;
use chorale_pitch::SpelledInterval;

/// One output row: a bigram plus its tonal-pitch-space distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceRow {
    pub piece_id: String,
    pub voice_id: String,
    pub bigram_index: usize,
    pub n0_tpc: i64,
    pub n0_octave: i64,
    pub n1_tpc: i64,
    pub n1_octave: i64,
    pub n0_pitch_code: i64,
    pub interval_fifths: i64,
    pub interval_octaves: i64,
    pub interval_semitones: i64,
}

/// The spelled interval leading from the bigram's first note to its second.
pub fn bigram_interval(bigram: &Bigram) -> SpelledInterval {
    bigram.n1.pitch() - bigram.n0.pitch()
}

/// Compute the distance row for one bigram.
pub fn distance_row(bigram: &Bigram) -> DistanceRow {
    let interval = bigram_interval(bigram);
    DistanceRow {
        piece_id: bigram.key.piece.clone(),
        voice_id: bigram.key.voice.as_str().to_string(),
        bigram_index: bigram.index,
        n0_tpc: bigram.n0.tpc,
        n0_octave: bigram.n0.octave,
        n1_tpc: bigram.n1.tpc,
        n1_octave: bigram.n1.octave,
        n0_pitch_code: bigram.n0.pitch().midi(),
        interval_fifths: interval.fifths(),
        interval_octaves: interval.internal_octaves(),
        interval_semitones: interval.semitones(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{Note, PartitionKey};
    use proptest::prelude::*;

    fn bigram(n0: (i64, i64), n1: (i64, i64)) -> Bigram {
        Bigram {
            key: PartitionKey::new("chor001", "1"),
            index: 0,
            n0: Note::new(n0.0, n0.1),
            n1: Note::new(n1.0, n1.1),
        }
    }

    #[test]
    fn middle_c_up_to_g() {
        let row = distance_row(&bigram((0, 4), (1, 4)));
        assert_eq!(row.n0_pitch_code, 60);
        assert_eq!(row.interval_fifths, 1);
        assert_eq!(row.interval_octaves, 0);
        assert_eq!(row.interval_semitones, 7);
    }

    #[test]
    fn step_up_a_major_second() {
        // C4 -> D4: two fifths up, one octave down.
        let row = distance_row(&bigram((0, 4), (2, 4)));
        assert_eq!(row.interval_fifths, 2);
        assert_eq!(row.interval_octaves, -1);
        assert_eq!(row.interval_semitones, 2);
    }

    #[test]
    fn step_down_a_minor_second() {
        // C5 -> B4
        let row = distance_row(&bigram((0, 5), (5, 4)));
        assert_eq!(row.n0_pitch_code, 72);
        assert_eq!(row.interval_fifths, 5);
        assert_eq!(row.interval_octaves, -3);
        assert_eq!(row.interval_semitones, -1);
    }

    #[test]
    fn flat_first_note_pitch_code() {
        // Bb3 -> F4
        let row = distance_row(&bigram((-2, 3), (-1, 4)));
        assert_eq!(row.n0_pitch_code, 58);
        assert_eq!(row.interval_semitones, 7);
        assert_eq!(row.interval_fifths, 1);
    }

    #[test]
    fn octave_leap_down() {
        let row = distance_row(&bigram((3, 5), (3, 3)));
        assert_eq!(row.interval_fifths, 0);
        assert_eq!(row.interval_octaves, -2);
        assert_eq!(row.interval_semitones, -24);
    }

    #[test]
    fn enharmonic_pair_is_a_diminished_second() {
        // C#4 -> Db4 is 12 fifths down and 7 octaves up, zero semitones.
        let row = distance_row(&bigram((7, 4), (-5, 4)));
        assert_eq!(row.interval_fifths, -12);
        assert_eq!(row.interval_octaves, 7);
        assert_eq!(row.interval_semitones, 0);
    }

    #[test]
    fn row_carries_bigram_fields() {
        let mut bg = bigram((4, 4), (6, 3));
        bg.index = 17;
        bg.key = PartitionKey::new("chor042", "3");
        let row = distance_row(&bg);
        assert_eq!(row.piece_id, "chor042");
        assert_eq!(row.voice_id, "3");
        assert_eq!(row.bigram_index, 17);
        assert_eq!((row.n0_tpc, row.n0_octave), (4, 4));
        assert_eq!((row.n1_tpc, row.n1_octave), (6, 3));
    }

    proptest! {
        #[test]
        fn repeated_note_has_zero_distance(tpc in -30i64..30, octave in -2i64..10) {
            let row = distance_row(&bigram((tpc, octave), (tpc, octave)));
            prop_assert_eq!(row.interval_fifths, 0);
            prop_assert_eq!(row.interval_octaves, 0);
            prop_assert_eq!(row.interval_semitones, 0);
        }

        #[test]
        fn distance_is_antisymmetric(
            t0 in -30i64..30, o0 in -2i64..10, t1 in -30i64..30, o1 in -2i64..10,
        ) {
            let forward = distance_row(&bigram((t0, o0), (t1, o1)));
            let backward = distance_row(&bigram((t1, o1), (t0, o0)));
            prop_assert_eq!(forward.interval_fifths, -backward.interval_fifths);
            prop_assert_eq!(forward.interval_octaves, -backward.interval_octaves);
            prop_assert_eq!(forward.interval_semitones, -backward.interval_semitones);
        }

        #[test]
        fn pitch_code_ignores_piece_and_voice(
            tpc in -30i64..30, octave in -2i64..10, piece in "[a-z]{1,8}", voice in "[0-9]{1,2}",
        ) {
            let mut relabeled = bigram((tpc, octave), (0, 4));
            relabeled.key = PartitionKey::new(piece, voice);
            let baseline = bigram((tpc, octave), (0, 4));
            prop_assert_eq!(
                distance_row(&relabeled).n0_pitch_code,
                distance_row(&baseline).n0_pitch_code
            );
        }

        #[test]
        fn semitones_equal_pitch_code_difference(
            t0 in -30i64..30, o0 in -2i64..10, t1 in -30i64..30, o1 in -2i64..10,
        ) {
            let forward = distance_row(&bigram((t0, o0), (t1, o1)));
            let backward = distance_row(&bigram((t1, o1), (t0, o0)));
            prop_assert_eq!(
                forward.interval_semitones,
                backward.n0_pitch_code - forward.n0_pitch_code
            );
        }
    }
}
