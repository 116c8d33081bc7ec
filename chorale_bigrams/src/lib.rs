// Chorale Bigrams
//
// Turns a corpus of symbolic transcriptions (notes spelled as tonal pitch
// class + octave, grouped by piece and staff) into a table of melodic bigram
// distances in tonal pitch space. The reference corpus is the aligned Bach
// chorale dataset; any table with piece/voice/tpc/octave columns works.
//
// Architecture:
// - config.rs: PipelineConfig (JSON, all-default): corpus layout, column names, output
// - corpus.rs: delimited note-table loader (per-piece files or one combined table)
// - note.rs: Note, VoiceId, PartitionKey
// - voices.rs: VoiceTable, the explicit (piece, voice) → notes partitioning
// - bigram.rs: lazy consecutive-pair extraction within one voice
// - distance.rs: interval calculator (fifths, octaves, semitones, pitch code)
// - table.rs: delimited output with an atomic rename into place
// - pipeline.rs: the end-to-end run and its summary
// - error.rs: PipelineError
//
// The pitch arithmetic itself lives in the `chorale_pitch` crate. Output is
// deterministic: the same corpus and config always yield the same bytes.

pub mod bigram;
pub mod config;
pub mod corpus;
pub mod distance;
pub mod error;
pub mod note;
pub mod pipeline;
pub mod table;
pub mod voices;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{RunSummary, run};
