//! Maps numeric ids to entry folders under the source root.

use std::path::PathBuf;

use cisterns_contracts::{GroundTruthRecord, Side, SideClassifier};

use crate::config::PrepConfig;
use crate::error::{PrepError, PrepResult};

/// An id whose source folder exists. Built on demand, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    pub id: u32,
    pub dir: PathBuf,
}

impl DatasetEntry {
    pub fn source_image(&self, cfg: &PrepConfig) -> PathBuf {
        self.dir.join(&cfg.image_filename)
    }

    pub fn image_present(&self, cfg: &PrepConfig) -> bool {
        self.source_image(cfg).is_file()
    }

    pub fn metadata_path(&self, side: Side) -> PathBuf {
        self.dir.join(side.metadata_file_name())
    }
}

/// `<src_root>/<folder_prefix><id>`, whether or not it exists.
pub fn entry_dir(cfg: &PrepConfig, id: u32) -> PathBuf {
    cfg.src_root.join(format!("{}{}", cfg.folder_prefix, id))
}

/// `None` when the id has no folder; gaps in the range are expected.
pub fn resolve_entry(cfg: &PrepConfig, id: u32) -> Option<DatasetEntry> {
    let dir = entry_dir(cfg, id);
    dir.is_dir().then_some(DatasetEntry { id, dir })
}

pub fn ensure_source_root(cfg: &PrepConfig) -> PrepResult<()> {
    if cfg.src_root.is_dir() {
        Ok(())
    } else {
        Err(PrepError::MissingSourceRoot {
            path: cfg.src_root.clone(),
        })
    }
}

/// Where the copier puts the image for `id`.
pub fn copied_image_path(cfg: &PrepConfig, id: u32) -> PathBuf {
    cfg.dest_root.join(id.to_string()).join(&cfg.image_filename)
}

pub fn labeled_image_path(cfg: &PrepConfig, id: u32) -> PathBuf {
    cfg.labeled_dest_root
        .join(id.to_string())
        .join(&cfg.image_filename)
}

/// Classify both sides of an entry.
pub fn classify_entry<C: SideClassifier + ?Sized>(
    classifier: &C,
    entry: &DatasetEntry,
) -> GroundTruthRecord {
    GroundTruthRecord::new(
        entry.id,
        classifier.classify(&entry.metadata_path(Side::Right)),
        classifier.classify(&entry.metadata_path(Side::Left)),
    )
}
