// Corpus loader: delimited note tables → note records.
//
// Two layouts (see `config::CorpusSource`):
// - per-piece: one table per piece in a notes directory, the piece id being
//   the file stem. This is the layout of the aligned Bach chorale dataset,
//   whose `notes/chorNNN.tsv` tables carry a `staff` column.
// - combined: one table with an explicit piece column.
//
// Columns are located by header name and everything else in the table is
// ignored. Row order is the note order of the voice; the loader never sorts.
// A missing, non-integer or out-of-range pitch field aborts the load with the
// file and line. Fields may be wrapped in double quotes, but quoting is not a
// CSV escape: a quoted field containing the delimiter is rejected.

use crate::config::{ColumnConfig, CorpusConfig, CorpusSource, PieceSelection};
use crate::error::{PipelineError, Result};
use crate::note::{Note, PartitionKey, parse_integer};
use chorale_pitch::{COORDINATE_LIMIT, coordinate_in_range};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension of per-piece note tables.
pub const NOTE_TABLE_EXTENSION: &str = "tsv";

/// Cell contents that pandas-style exports use for absent values.
const MISSING_MARKERS: [&str; 5] = ["", "nan", "NaN", "NA", "<NA>"];

/// One corpus row, reduced to what bigram extraction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub key: PartitionKey,
    pub note: Note,
}

/// Load every note of the configured corpus, in source order.
pub fn load_corpus(corpus: &CorpusConfig, columns: &ColumnConfig) -> Result<Vec<NoteRecord>> {
    match &corpus.source {
        CorpusSource::PerPiece { notes_dir, pieces } => {
            let names = piece_names(notes_dir, pieces)?;
            if names.is_empty() {
                return Err(PipelineError::NoPieces(notes_dir.clone()));
            }
            info!(pieces = names.len(), dir = %notes_dir.display(), "loading per-piece note tables");
            let mut records = Vec::new();
            for name in &names {
                let path = piece_path(notes_dir, name);
                let table = read_note_file(&path, Some(name), columns, corpus.delimiter)?;
                debug!(piece = %name, notes = table.len(), "loaded note table");
                records.extend(table);
            }
            Ok(records)
        }
        CorpusSource::Combined { table } => {
            info!(table = %table.display(), "loading combined note table");
            read_note_file(table, None, columns, corpus.delimiter)
        }
    }
}

/// Path of a piece's note table inside the notes directory.
pub fn piece_path(notes_dir: &Path, name: &str) -> PathBuf {
    notes_dir.join(format!("{name}.{NOTE_TABLE_EXTENSION}"))
}

/// Resolve a piece selection to piece names, in load order.
pub fn piece_names(notes_dir: &Path, selection: &PieceSelection) -> Result<Vec<String>> {
    match selection {
        PieceSelection::Numbered {
            prefix,
            first,
            last,
            width,
        } => Ok((*first..=*last)
            .map(|i| format!("{prefix}{i:0width$}", width = *width))
            .collect()),
        PieceSelection::Listed { names } => Ok(names.clone()),
        PieceSelection::All => {
            let entries =
                std::fs::read_dir(notes_dir).map_err(|e| PipelineError::io(notes_dir, e))?;
            let mut names = Vec::new();
            for entry in entries {
                let path = entry.map_err(|e| PipelineError::io(notes_dir, e))?.path();
                if path.extension().and_then(|e| e.to_str()) != Some(NOTE_TABLE_EXTENSION) {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
            names.sort();
            Ok(names)
        }
    }
}

fn read_note_file(
    path: &Path,
    piece: Option<&str>,
    columns: &ColumnConfig,
    delimiter: char,
) -> Result<Vec<NoteRecord>> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    read_note_table(BufReader::new(file), path, piece, columns, delimiter)
}

/// Parse one delimited note table.
///
/// `path` is only used in error messages. With `piece = Some(id)` every row
/// belongs to that piece and no piece column is needed; with `None` the
/// piece is read from the `columns.piece` column.
pub fn read_note_table<R: BufRead>(
    reader: R,
    path: &Path,
    piece: Option<&str>,
    columns: &ColumnConfig,
    delimiter: char,
) -> Result<Vec<NoteRecord>> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((idx, line)) => {
                let line = line.map_err(|e| PipelineError::io(path, e))?;
                if !line.trim().is_empty() {
                    break split_fields(&line, delimiter).ok_or_else(|| {
                        PipelineError::QuotedDelimiter {
                            path: path.to_path_buf(),
                            line: idx + 1,
                        }
                    })?;
                }
            }
            None => {
                return Err(PipelineError::MissingHeader {
                    path: path.to_path_buf(),
                });
            }
        }
    };

    let find = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PipelineError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let piece_source = match piece {
        Some(id) => PieceSource::Fixed(id),
        None => PieceSource::Column(find(columns.piece.as_str())?),
    };
    let voice_col = find(columns.voice.as_str())?;
    let tpc_col = find(columns.tpc.as_str())?;
    let octave_col = find(columns.octave.as_str())?;

    let mut records = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line.map_err(|e| PipelineError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let fields =
            split_fields(&line, delimiter).ok_or_else(|| PipelineError::QuotedDelimiter {
                path: path.to_path_buf(),
                line: line_no,
            })?;
        if fields.len() != header.len() {
            return Err(PipelineError::RaggedRow {
                path: path.to_path_buf(),
                line: line_no,
                expected: header.len(),
                found: fields.len(),
            });
        }
        let row = Row {
            fields: &fields,
            path,
            line: line_no,
        };

        let piece_id = match piece_source {
            PieceSource::Fixed(id) => id,
            PieceSource::Column(col) => row.text(col, &columns.piece)?,
        };
        let voice = row.text(voice_col, &columns.voice)?;
        let note = Note::new(
            row.integer(tpc_col, &columns.tpc)?,
            row.integer(octave_col, &columns.octave)?,
        );

        records.push(NoteRecord {
            key: PartitionKey::new(piece_id, voice),
            note,
        });
    }
    Ok(records)
}

#[derive(Clone, Copy)]
enum PieceSource<'a> {
    Fixed(&'a str),
    Column(usize),
}

/// One split data row plus its location, for error reporting.
struct Row<'a> {
    fields: &'a [String],
    path: &'a Path,
    line: usize,
}

impl<'a> Row<'a> {
    fn text(&self, col: usize, column: &str) -> Result<&'a str> {
        let value = self.fields[col].as_str();
        if MISSING_MARKERS.contains(&value) {
            return Err(PipelineError::MissingValue {
                path: self.path.to_path_buf(),
                line: self.line,
                column: column.to_string(),
            });
        }
        Ok(value)
    }

    /// An integer pitch coordinate, within `chorale_pitch::COORDINATE_LIMIT`.
    fn integer(&self, col: usize, column: &str) -> Result<i64> {
        let text = self.text(col, column)?;
        let value = parse_integer(text).ok_or_else(|| PipelineError::InvalidInteger {
            path: self.path.to_path_buf(),
            line: self.line,
            column: column.to_string(),
            value: text.to_string(),
        })?;
        if !coordinate_in_range(value) {
            return Err(PipelineError::OutOfRange {
                path: self.path.to_path_buf(),
                line: self.line,
                column: column.to_string(),
                value,
                limit: COORDINATE_LIMIT,
            });
        }
        Ok(value)
    }
}

/// Split a line on the delimiter, trimming whitespace and surrounding quotes.
///
/// `None` if a field opens or closes a quote without the other end, which is
/// what a quoted value containing the delimiter looks like after splitting.
fn split_fields(line: &str, delimiter: char) -> Option<Vec<String>> {
    line.trim_end_matches(['\r', '\n'])
        .split(delimiter)
        .map(|f| {
            let f = f.trim();
            let opens = f.starts_with('"');
            let closes = f.len() >= 2 && f.ends_with('"');
            match (opens, closes) {
                (true, true) => Some(f[1..f.len() - 1].to_string()),
                (false, false) => Some(f.to_string()),
                _ => None,
            }
        })
        .collect()
}
