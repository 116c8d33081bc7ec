// Bigram extraction: consecutive note pairs within one voice.
//
// A voice of L notes yields exactly max(L - 1, 0) bigrams, the i-th pairing
// note i with note i + 1. Extraction is lazy (`voice_bigrams` returns an
// iterator over `windows(2)`) and never looks across partition boundaries,
// because it only ever sees one voice's slice. Rests, ties and repeats are
// not modelled: a voice is one flat sequence.

use crate::note::{Note, PartitionKey};
use crate::voices::VoiceTable;

/// Two consecutive notes of one voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bigram {
    pub key: PartitionKey,
    /// 0-based position of the pair within its voice.
    pub index: usize,
    pub n0: Note,
    pub n1: Note,
}

/// Bigrams of a single voice, in sequence order.
pub fn voice_bigrams<'a>(
    key: &'a PartitionKey,
    notes: &'a [Note],
) -> impl Iterator<Item = Bigram> + 'a {
    notes.windows(2).enumerate().map(move |(index, pair)| Bigram {
        key: key.clone(),
        index,
        n0: pair[0],
        n1: pair[1],
    })
}

/// Bigrams of every voice in the table, voice by voice in key order.
pub fn table_bigrams(table: &VoiceTable) -> impl Iterator<Item = Bigram> + '_ {
    table
        .iter()
        .flat_map(|(key, notes)| voice_bigrams(key, notes))
}
