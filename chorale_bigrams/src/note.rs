// Core value types: notes and the (piece, voice) partition key.
//
// A `Note` is exactly what a corpus row says about pitch: a tonal pitch class
// and a written octave. Its identity is that pair; conversion to a spelled
// pitch (and from there to MIDI or intervals) goes through `chorale_pitch`.

use chorale_pitch::SpelledPitch;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One note of a voice: tonal pitch class plus written octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Position on the line of fifths (0 = C, 1 = G, -1 = F).
    pub tpc: i64,
    /// Scientific pitch-notation octave (middle C is octave 4).
    pub octave: i64,
}

impl Note {
    pub fn new(tpc: i64, octave: i64) -> Self {
        Note { tpc, octave }
    }

    /// The note as a point in tonal pitch space.
    pub fn pitch(self) -> SpelledPitch {
        SpelledPitch::from_independent(self.tpc, self.octave)
    }
}

/// Voice (staff) identifier as written in the corpus.
///
/// Ordered numerically when both ids are integers (staff `2` before staff
/// `10`, and `2.0` before `10.0` in float exports), lexicographically
/// otherwise; integers sort before non-integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(pub String);

impl VoiceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<i64> {
        parse_integer(&self.0)
    }
}

impl From<&str> for VoiceId {
    fn from(s: &str) -> Self {
        VoiceId(s.to_string())
    }
}

impl Ord for VoiceId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for VoiceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse an integer cell. Integral floats (`4.0`) are accepted because
/// pandas writes nullable integer columns that way.
pub fn parse_integer(value: &str) -> Option<i64> {
    if let Ok(i) = value.parse::<i64>() {
        return Some(i);
    }
    let f: f64 = value.parse().ok()?;
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= EXACT_LIMIT {
        Some(f as i64)
    } else {
        None
    }
}

/// The partitioning key: notes of one voice in one piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionKey {
    pub piece: String,
    pub voice: VoiceId,
}

impl PartitionKey {
    pub fn new(piece: impl Into<String>, voice: impl Into<String>) -> Self {
        PartitionKey {
            piece: piece.into(),
            voice: VoiceId(voice.into()),
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.piece, self.voice)
    }
}
