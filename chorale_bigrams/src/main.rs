// Chorale Bigrams: CLI entry point.
//
// Builds the melodic bigram distance table for a chorale corpus.
// The pipeline: load note tables → partition by (piece, voice) → bigram
// distances → delimited table.
//
// Usage:
//   cargo run -p chorale_bigrams -- [--config FILE] [--notes-dir DIR]
//     [--all-pieces | --piece NAME ...] [--table FILE] [--voice-column NAME]
//     [--output FILE]
//
// With no arguments this reads bach/data/craigsapp_krn/notes/chor001..100.tsv
// and writes bigrams.tsv. Log verbosity follows RUST_LOG (default: info).

use anyhow::{Context, Result};
use chorale_bigrams::config::{
    CorpusSource, DEFAULT_NOTES_DIR, PieceSelection, PipelineConfig,
};
use chorale_bigrams::run;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bigrams")]
#[command(about = "Compute melodic bigram distances in tonal pitch space")]
struct Args {
    /// JSON pipeline config; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding one note table per piece
    #[arg(long, value_name = "DIR", conflicts_with = "table")]
    notes_dir: Option<PathBuf>,

    /// Read every .tsv table in the notes directory
    #[arg(long, conflicts_with_all = ["table", "piece"])]
    all_pieces: bool,

    /// Read only the named piece (repeatable, each name at most once)
    #[arg(long, value_name = "NAME", conflicts_with = "table")]
    piece: Vec<String>,

    /// Read a single combined note table with a piece column
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,

    /// Name of the voice/staff column
    #[arg(long, value_name = "NAME")]
    voice_column: Option<String>,

    /// Output table path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Args {
    /// Layer command-line overrides on top of a loaded config.
    fn apply(self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(table) = self.table {
            config.corpus.source = CorpusSource::Combined { table };
        } else if self.notes_dir.is_some() || self.all_pieces || !self.piece.is_empty() {
            let (mut notes_dir, mut pieces) = match config.corpus.source {
                CorpusSource::PerPiece { notes_dir, pieces } => (notes_dir, pieces),
                CorpusSource::Combined { .. } => (
                    PathBuf::from(DEFAULT_NOTES_DIR),
                    PieceSelection::bach_chorales(),
                ),
            };
            if let Some(dir) = self.notes_dir {
                notes_dir = dir;
            }
            if self.all_pieces {
                pieces = PieceSelection::All;
            } else if !self.piece.is_empty() {
                pieces = PieceSelection::Listed { names: self.piece };
            }
            config.corpus.source = CorpusSource::PerPiece { notes_dir, pieces };
        }
        if let Some(voice) = self.voice_column {
            config.columns.voice = voice;
        }
        if let Some(output) = self.output {
            config.output.path = output;
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            PipelineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };
    let config = args.apply(config);

    match &config.corpus.source {
        CorpusSource::PerPiece { notes_dir, pieces } => {
            info!("Corpus: {} ({:?})", notes_dir.display(), pieces);
        }
        CorpusSource::Combined { table } => info!("Corpus: {}", table.display()),
    }
    info!("Voice column: {}", config.columns.voice);
    info!("Output: {}", config.output.path.display());

    let summary = run(&config).context("bigram pipeline failed")?;

    info!(
        "Done: {} pieces, {} voices, {} notes -> {} bigrams ({} voices too short)",
        summary.pieces, summary.voices, summary.notes, summary.bigrams, summary.short_voices
    );
    Ok(())
}
