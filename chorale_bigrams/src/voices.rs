// Explicit (piece, voice) partitioning of a note corpus.
//
// `VoiceTable` maps each `PartitionKey` to its ordered note sequence. Notes
// are appended in the order the records arrive, so within-voice order is the
// source order; keys iterate in `PartitionKey` order (piece, then voice).
// Partitions share no state, which is what lets `pipeline.rs` process them
// in parallel.

use crate::corpus::NoteRecord;
use crate::note::{Note, PartitionKey};
use std::collections::BTreeMap;
use std::collections::btree_map;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceTable {
    voices: BTreeMap<PartitionKey, Vec<Note>>,
}

impl VoiceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note to the end of its voice.
    pub fn push(&mut self, key: PartitionKey, note: Note) {
        self.voices.entry(key).or_default().push(note);
    }

    /// Notes of one voice, in source order.
    pub fn voice(&self, key: &PartitionKey) -> Option<&[Note]> {
        self.voices.get(key).map(Vec::as_slice)
    }

    /// All voices in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, PartitionKey, Vec<Note>> {
        self.voices.iter()
    }

    /// Number of (piece, voice) partitions.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Number of distinct pieces.
    pub fn piece_count(&self) -> usize {
        let mut pieces: Vec<&str> = self.voices.keys().map(|k| k.piece.as_str()).collect();
        pieces.dedup();
        pieces.len()
    }

    /// Total number of notes across all voices.
    pub fn note_count(&self) -> usize {
        self.voices.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl FromIterator<NoteRecord> for VoiceTable {
    fn from_iter<I: IntoIterator<Item = NoteRecord>>(records: I) -> Self {
        let mut table = VoiceTable::new();
        for record in records {
            table.push(record.key, record.note);
        }
        table
    }
}

impl<'a> IntoIterator for &'a VoiceTable {
    type Item = (&'a PartitionKey, &'a Vec<Note>);
    type IntoIter = btree_map::Iter<'a, PartitionKey, Vec<Note>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
