//src/fasta.rs

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::diamond::AnnotationMap;
use crate::types::{AnnotationError, FileStats};

/// Opens a text file for line-wise reading, transparently decoding
/// `.gz` inputs.
pub(crate) fn open_text(path: &Path) -> Result<Box<dyn BufRead>, AnnotationError> {
    let f = File::open(path).map_err(|source| AnnotationError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;

    let is_gz = path.extension().map(|ext| ext == "gz").unwrap_or(false);
    Ok(if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    })
}

/// Writes one pending record: the header looked up in the map, then
/// the buffered sequence text verbatim.
///
/// The identifier is always present by now; a miss inserts it at
/// header-read time.
fn flush_record(
    writer: &mut impl Write,
    annotations: &AnnotationMap,
    seq_id: &str,
    sequence: &str,
) -> Result<(), AnnotationError> {
    if let Some(header) = annotations.get(seq_id) {
        writeln!(writer, "{header}")?;
        writer.write_all(sequence.as_bytes())?;
    }
    Ok(())
}

/// Rewrites every record header in `input` with its annotation from
/// `annotations`, writing the result to `output`.
///
/// Identifiers missing from the map are counted as unannotated and
/// inserted pointing at themselves, so the record (and any later
/// occurrence of the same identifier) is written with its bare
/// identifier. That mutation is per-pass bookkeeping; callers hand
/// each pass its own clone of the base map.
///
/// Every input record produces exactly one output record: the final
/// pending record is flushed explicitly once the input is exhausted,
/// and a record with no sequence body is written with an empty body.
pub fn annotate_fasta_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    annotations: &mut AnnotationMap,
    label: &str,
) -> Result<FileStats, AnnotationError> {
    let mut reader = open_text(input.as_ref())?;
    let out_file = File::create(output.as_ref()).map_err(|source| AnnotationError::OpenFile {
        path: output.as_ref().to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(out_file);

    let mut stats = FileStats::default();
    // Pending record: identifier plus its sequence lines, written out
    // when the next header (or end of input) is reached.
    let mut pending_id: Option<String> = None;
    let mut sequence = String::new();

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        if line.starts_with('>') {
            if let Some(seq_id) = pending_id.take() {
                flush_record(&mut writer, annotations, &seq_id, &sequence)?;
                sequence.clear();
            }

            // Identifier: first whitespace-delimited token, ">" stripped.
            let seq_id = line[1..]
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_string();

            if annotations.contains_key(&seq_id) {
                stats.annotated += 1;
            } else {
                stats.unannotated += 1;
                annotations.insert(seq_id.clone(), seq_id.clone());
            }
            pending_id = Some(seq_id);
        } else {
            // Sequence line, kept verbatim with its line terminator.
            sequence.push_str(&line);
        }
    }

    // No header follows the last record, so flush it explicitly.
    if let Some(seq_id) = pending_id.take() {
        flush_record(&mut writer, annotations, &seq_id, &sequence)?;
    }
    writer.flush()?;

    log::info!(
        "{label}: {} annotated, {} unannotated",
        stats.annotated,
        stats.unannotated
    );
    Ok(stats)
}
