use super::edge_row::{EdgeRow, RawEdgeRecord};
use super::DatasetError;
use kdam::{Bar, BarExt};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// outcome of reading the unified dataset: the validated rows plus the
/// number of rows that were rejected with a diagnostic.
#[derive(Debug)]
pub struct EdgeRowsReadResult {
    pub rows: Vec<EdgeRow>,
    pub rejected: usize,
}

/// reads the unified street dataset CSV into validated [`EdgeRow`]s.
///
/// rows that fail validation (malformed coordinates or WKT, missing
/// required fields) are logged with their row number and skipped; the file
/// itself failing to open or parse is an error. progress is reported on a
/// bar sized by a line-count pre-pass.
pub fn read_edge_rows<P: AsRef<Path>>(filepath: P) -> Result<EdgeRowsReadResult, DatasetError> {
    let count = line_count(&filepath)?.saturating_sub(1);

    let mut pb = Bar::builder()
        .total(count)
        .animation("fillup")
        .desc("unified edge dataset")
        .build()
        .ok();

    let mut reader = csv::Reader::from_path(&filepath)?;
    let mut rows: Vec<EdgeRow> = Vec::with_capacity(count);
    let mut rejected: usize = 0;

    for (idx, record) in reader.deserialize::<RawEdgeRecord>().enumerate() {
        let row_number = idx + 1;
        match record {
            Err(e) => {
                log::warn!("rejecting row {}: {}", row_number, e);
                rejected += 1;
            }
            Ok(raw) => match EdgeRow::try_from(raw) {
                Ok(row) => rows.push(row),
                Err(message) => {
                    log::warn!("rejecting row {}: {}", row_number, message);
                    rejected += 1;
                }
            },
        }
        if let Some(ref mut bar) = pb {
            let _ = bar.update(1);
        }
    }

    log::info!(
        "read {} edge rows from {} ({} rejected)",
        rows.len(),
        filepath.as_ref().to_string_lossy(),
        rejected
    );

    Ok(EdgeRowsReadResult { rows, rejected })
}

fn line_count<P: AsRef<Path>>(filepath: P) -> Result<usize, std::io::Error> {
    let reader = BufReader::new(File::open(filepath)?);
    Ok(reader.lines().count())
}
