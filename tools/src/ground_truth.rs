//! Append-only `ground-truth.csv` under the destination root.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::Path;

use cisterns_contracts::{GroundTruthRecord, SideClassifier, HEADER};
use tracing::debug;

use crate::config::PrepConfig;
use crate::dataset::{classify_entry, ensure_source_root, resolve_entry};
use crate::error::{io_at, PrepError, PrepResult};
use crate::report::{Stage, StageReport};

const LINE_END: &str = "\r\n";

/// Write the header if the table does not exist yet. Returns whether it was created.
pub fn ensure_table(path: &Path) -> PrepResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, format!("{HEADER}{LINE_END}")).map_err(io_at(path))?;
    Ok(true)
}

/// Open, append one row, close.
pub fn append_record(path: &Path, record: &GroundTruthRecord) -> PrepResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_at(path))?;
    write!(file, "{}{LINE_END}", record.to_csv_row()).map_err(io_at(path))
}

/// Read every data row back, in file order.
pub fn read_ground_truth(path: &Path) -> PrepResult<Vec<GroundTruthRecord>> {
    let raw = fs::read_to_string(path).map_err(io_at(path))?;
    let mut out = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() || (idx == 0 && line.trim() == HEADER) {
            continue;
        }
        let record = GroundTruthRecord::parse_csv_row(line).map_err(|source| PrepError::Record {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        out.push(record);
    }
    Ok(out)
}

/// Classify both sides of each id and append a row. Re-running appends again.
pub fn write_range<C: SideClassifier + ?Sized>(
    cfg: &PrepConfig,
    classifier: &C,
    ids: RangeInclusive<u32>,
) -> PrepResult<StageReport> {
    ensure_source_root(cfg)?;
    fs::create_dir_all(&cfg.dest_root).map_err(io_at(&cfg.dest_root))?;
    let table = cfg.ground_truth_path();
    if ensure_table(&table)? {
        debug!("created {}", table.display());
    }

    let mut report = StageReport::new(Stage::GroundTruth);
    for id in ids {
        let Some(entry) = resolve_entry(cfg, id) else {
            debug!(id = id, "no source folder");
            report.missing_folder += 1;
            continue;
        };
        let record = classify_entry(classifier, &entry);
        append_record(&table, &record)?;
        println!("Wrote: {}", record.to_csv_row());
        report.written += 1;
    }
    Ok(report)
}
