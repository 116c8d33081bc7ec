// Spelled pitches and intervals on the line of fifths.
//
// A spelled pitch keeps its enharmonic identity: C#4 and Db4 share a MIDI key
// but are different points of tonal pitch space. Every pitch and interval is
// stored as two orthogonal integer coordinates:
//
// - fifths: position on the line of fifths (0 = C, 1 = G, -1 = F, 7 = C#, ...)
// - internal octaves: the octaves left over once the fifths are factored out
//
// so that a pitch is `fifths * P5 + internal_octaves * P8` above C0. In that
// basis interval arithmetic is plain vector arithmetic, and the linear
// embedding `fifths * 7 + octaves * 12` gives the 12-TET semitone count.
//
// Notation corpora write pitches the "independent" way instead: a tonal pitch
// class plus the scientific octave number printed on the page (B#4 sounds as
// C5 but is written in octave 4). `SpelledPitch::from_independent` does the
// folding between the two; see `diatonic_octave_span`.
//
// Architecture:
// - `pitch.rs`: `SpelledPitch`, naming (`Display`/`FromStr`), MIDI key
// - `interval.rs`: `SpelledInterval` and the pitch/interval operators
//
// Used by `chorale_bigrams` to compute melodic bigram distances.

pub mod interval;
pub mod pitch;

pub use interval::SpelledInterval;
pub use pitch::{PitchParseError, SpelledPitch};

/// Largest magnitude accepted for a tonal pitch class or written octave.
///
/// Pitches built from coordinates in `-COORDINATE_LIMIT..=COORDINATE_LIMIT`,
/// and intervals between them, stay far inside `i64` for every derived
/// quantity (internal octave, MIDI key, semitones, diatonic steps).
pub const COORDINATE_LIMIT: i64 = 1 << 40;

/// Whether `value` is a usable tonal pitch class or octave number.
pub fn coordinate_in_range(value: i64) -> bool {
    (-COORDINATE_LIMIT..=COORDINATE_LIMIT).contains(&value)
}

/// Number of whole octaves climbed by `fifths` steps along the line of fifths.
///
/// A perfect fifth spans 4 diatonic steps, so a tonal pitch class `t` sits
/// `4t` steps above C. Every 7 steps is one octave; the floor keeps negative
/// pitch classes (F, Bb, ...) consistent with positive ones.
pub fn diatonic_octave_span(fifths: i64) -> i64 {
    (fifths * 4).div_euclid(7)
}
