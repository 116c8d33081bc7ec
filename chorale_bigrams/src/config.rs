// Pipeline configuration.
//
// All tunable inputs of a run live in `PipelineConfig`: where the note tables
// are, which pieces to read, how their columns are named, and where the
// bigram table goes. Loaded from JSON; every field has a default, so `{}`
// (or no config file at all) reproduces the Bach chorale preparation: pieces
// `chor001`..`chor100` from `bach/data/craigsapp_krn/notes`, voices keyed by
// the `staff` column, output to `bigrams.tsv`.
//
// The binary (`main.rs`) layers command-line overrides on top of the loaded
// config; `run` calls `validate()` before touching the corpus. A listed piece
// may appear only once, since loading it twice would splice two copies of
// each voice into one sequence.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Corpus input
// ---------------------------------------------------------------------------

/// Notes directory of the aligned Bach chorale dataset, relative to the
/// working directory.
pub const DEFAULT_NOTES_DIR: &str = "bach/data/craigsapp_krn/notes";

/// Which pieces of a per-piece corpus to load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PieceSelection {
    /// `{prefix}{index}` for `first..=last`, index zero-padded to `width`.
    Numbered {
        prefix: String,
        first: u32,
        last: u32,
        width: usize,
    },
    /// An explicit list of piece names (file stems).
    Listed { names: Vec<String> },
    /// Every `.tsv` file in the notes directory, sorted by name.
    All,
}

impl PieceSelection {
    /// The 100 chorales of the aligned Bach chorale dataset.
    pub fn bach_chorales() -> Self {
        PieceSelection::Numbered {
            prefix: "chor".into(),
            first: 1,
            last: 100,
            width: 3,
        }
    }
}

/// Where the note tables come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum CorpusSource {
    /// One note table per piece; the piece id is the file stem.
    PerPiece {
        notes_dir: PathBuf,
        pieces: PieceSelection,
    },
    /// A single table holding every piece, with a piece column.
    Combined { table: PathBuf },
}

impl Default for CorpusSource {
    fn default() -> Self {
        CorpusSource::PerPiece {
            notes_dir: PathBuf::from(DEFAULT_NOTES_DIR),
            pieces: PieceSelection::bach_chorales(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub source: CorpusSource,
    /// Field delimiter of the note tables.
    pub delimiter: char,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        CorpusConfig {
            source: CorpusSource::default(),
            delimiter: '\t',
        }
    }
}

/// Header names of the note-table columns the pipeline reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Piece id column. Only read for `CorpusSource::Combined`.
    pub piece: String,
    /// Voice/staff column; notes are partitioned by (piece, voice).
    pub voice: String,
    /// Tonal pitch class column (line-of-fifths position).
    pub tpc: String,
    /// Scientific octave number column.
    pub octave: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            piece: "piece".into(),
            voice: "staff".into(),
            tpc: "tpc".into(),
            octave: "octave".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from("bigrams.tsv"),
            delimiter: '\t',
        }
    }
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub corpus: CorpusConfig,
    pub columns: ColumnConfig,
    pub output: OutputConfig,
}

impl PipelineConfig {
    /// Parse a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Self::from_json(&data).map_err(|source| PipelineError::ConfigJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject configs that cannot produce a well-formed run.
    pub fn validate(&self) -> Result<()> {
        let columns = [
            ("voice", &self.columns.voice),
            ("tpc", &self.columns.tpc),
            ("octave", &self.columns.octave),
        ];
        for (role, name) in columns {
            if name.trim().is_empty() {
                return Err(PipelineError::Config(format!("{role} column name is empty")));
            }
        }

        match &self.corpus.source {
            CorpusSource::Combined { .. } => {
                if self.columns.piece.trim().is_empty() {
                    return Err(PipelineError::Config(
                        "combined corpus needs a piece column name".into(),
                    ));
                }
            }
            CorpusSource::PerPiece { pieces, .. } => match pieces {
                PieceSelection::Numbered { first, last, .. } if first > last => {
                    return Err(PipelineError::Config(format!(
                        "empty piece range {first}..={last}"
                    )));
                }
                PieceSelection::Listed { names } => {
                    if names.is_empty() {
                        return Err(PipelineError::Config("piece list is empty".into()));
                    }
                    let mut seen = HashSet::new();
                    if let Some(dup) = names.iter().find(|name| !seen.insert(name.as_str())) {
                        return Err(PipelineError::Config(format!(
                            "piece {dup:?} is listed more than once"
                        )));
                    }
                }
                _ => {}
            },
        }

        for (role, delimiter) in [
            ("corpus", self.corpus.delimiter),
            ("output", self.output.delimiter),
        ] {
            if !delimiter.is_ascii() || delimiter == '\n' || delimiter == '\r' {
                return Err(PipelineError::Config(format!(
                    "{role} delimiter {delimiter:?} must be a single ASCII character other than a line break"
                )));
            }
        }
        Ok(())
    }
}
