// Delimited text output of distance rows.
//
// One header row, then one line per bigram, columns in `COLUMNS` order. The
// file is written to a temporary sibling and renamed into place only after
// every row has been flushed, so a failed run leaves any previous table
// untouched and never produces a truncated one.

use crate::distance::DistanceRow;
use crate::error::{PipelineError, Result};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Output column names, in order.
pub const COLUMNS: [&str; 11] = [
    "piece_id",
    "voice_id",
    "bigram_index",
    "n0_tpc",
    "n0_octave",
    "n1_tpc",
    "n1_octave",
    "n0_pitch_code",
    "interval_fifths",
    "interval_octaves",
    "interval_semitones",
];

/// Write the header and all rows to `writer`.
pub fn write_rows<W: Write>(
    writer: &mut W,
    rows: &[DistanceRow],
    delimiter: char,
) -> std::io::Result<()> {
    let sep = delimiter.to_string();
    writeln!(writer, "{}", COLUMNS.join(sep.as_str()))?;
    for row in rows {
        writeln!(
            writer,
            "{piece}{d}{voice}{d}{index}{d}{n0_tpc}{d}{n0_oct}{d}{n1_tpc}{d}{n1_oct}{d}{code}{d}{fifths}{d}{octaves}{d}{semitones}",
            d = delimiter,
            piece = row.piece_id,
            voice = row.voice_id,
            index = row.bigram_index,
            n0_tpc = row.n0_tpc,
            n0_oct = row.n0_octave,
            n1_tpc = row.n1_tpc,
            n1_oct = row.n1_octave,
            code = row.n0_pitch_code,
            fifths = row.interval_fifths,
            octaves = row.interval_octaves,
            semitones = row.interval_semitones,
        )?;
    }
    Ok(())
}

/// Atomically write the distance table to `path`.
pub fn write_table(path: &Path, rows: &[DistanceRow], delimiter: char) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut writer = BufWriter::new(tmp);
    write_rows(&mut writer, rows, delimiter).map_err(|e| PipelineError::io(path, e))?;
    let tmp = writer
        .into_inner()
        .map_err(|e| PipelineError::io(path, e.into_error()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PipelineError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| PipelineError::io(path, e.error))?;
    Ok(())
}
