use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use filetime::FileTime;
use tracing::debug;

use crate::config::PrepConfig;
use crate::dataset::{copied_image_path, ensure_source_root, resolve_entry};
use crate::error::{io_at, PrepResult};
use crate::report::{Stage, StageReport};

/// Copy each id's image into `dest_root/<id>/`. Ids without a folder or image are skipped.
pub fn copy_range(cfg: &PrepConfig, ids: RangeInclusive<u32>) -> PrepResult<StageReport> {
    ensure_source_root(cfg)?;
    let mut report = StageReport::new(Stage::Copy);

    for id in ids {
        let Some(entry) = resolve_entry(cfg, id) else {
            debug!(id = id, "no source folder");
            report.missing_folder += 1;
            continue;
        };
        if !entry.image_present(cfg) {
            debug!(id = id, "no {} in {}", cfg.image_filename, entry.dir.display());
            report.missing_image += 1;
            continue;
        }

        let src = entry.source_image(cfg);
        let dest = copied_image_path(cfg, id);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_at(parent))?;
        }
        copy_preserving_times(&src, &dest)?;
        println!("Copied {} -> {}", src.display(), dest.display());
        report.written += 1;
    }

    Ok(report)
}

/// Byte copy plus access/modification times. Times are set by path, so a
/// read-only copy is fine.
fn copy_preserving_times(src: &Path, dest: &Path) -> PrepResult<()> {
    // A read-only copy from an earlier run cannot be opened for writing.
    if dest.is_file() {
        fs::remove_file(dest).map_err(io_at(dest))?;
    }
    fs::copy(src, dest).map_err(io_at(dest))?;
    let meta = fs::metadata(src).map_err(io_at(src))?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
    .map_err(io_at(dest))
}
