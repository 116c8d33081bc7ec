// End-to-end run: load → partition → extract + measure → write.
//
// Loading and writing are sequential I/O at either end. In between, each
// (piece, voice) partition is turned into distance rows independently on the
// rayon pool; the per-voice results are concatenated in partition order, so
// the output is identical to a sequential run.

use crate::bigram::voice_bigrams;
use crate::config::PipelineConfig;
use crate::corpus::{NoteRecord, load_corpus};
use crate::distance::{DistanceRow, distance_row};
use crate::error::Result;
use crate::table::write_table;
use crate::voices::VoiceTable;
use rayon::prelude::*;
use tracing::{debug, info};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pieces: usize,
    pub voices: usize,
    pub notes: usize,
    pub bigrams: usize,
    /// Voices with fewer than two notes (no bigrams).
    pub short_voices: usize,
}

/// Partition note records by (piece, voice), preserving source order.
pub fn partition(records: Vec<NoteRecord>) -> VoiceTable {
    let table: VoiceTable = records.into_iter().collect();
    for (key, notes) in &table {
        if notes.len() < 2 {
            debug!(voice = %key, notes = notes.len(), "voice too short for bigrams");
        }
    }
    table
}

/// Distance rows for every bigram of every voice, in partition order.
pub fn compute_distances(table: &VoiceTable) -> Vec<DistanceRow> {
    let voices: Vec<_> = table.iter().collect();
    voices
        .par_iter()
        .map(|(key, notes)| {
            voice_bigrams(key, notes)
                .map(|bigram| distance_row(&bigram))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .concat()
}

/// Summarize a partitioned table and its computed rows.
pub fn summarize(table: &VoiceTable, rows: &[DistanceRow]) -> RunSummary {
    RunSummary {
        pieces: table.piece_count(),
        voices: table.voice_count(),
        notes: table.note_count(),
        bigrams: rows.len(),
        short_voices: table.iter().filter(|(_, notes)| notes.len() < 2).count(),
    }
}

/// Run the whole pipeline described by `config`. Writes the output table
/// only if every stage succeeds.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;

    let records = load_corpus(&config.corpus, &config.columns)?;
    info!(notes = records.len(), "corpus loaded");

    let table = partition(records);
    info!(
        pieces = table.piece_count(),
        voices = table.voice_count(),
        "partitioned by piece and voice"
    );

    let rows = compute_distances(&table);
    info!(bigrams = rows.len(), "bigram distances computed");

    write_table(&config.output.path, &rows, config.output.delimiter)?;
    info!(path = %config.output.path.display(), "distance table written");

    Ok(summarize(&table, &rows))
}
