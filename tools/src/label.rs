use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use cisterns_contracts::{GroundTruthRecord, SideClassifier};
use cisterns_overlay::{load_label_font, LabelRenderer, LabelStyle};
use tracing::debug;

use crate::config::PrepConfig;
use crate::dataset::{
    classify_entry, copied_image_path, ensure_source_root, labeled_image_path, resolve_entry,
};
use crate::error::{image_at, io_at, PrepResult};
use crate::report::{Stage, StageReport};

/// Renderer using the configured font (or a system fallback) and size.
pub fn renderer_for(cfg: &PrepConfig) -> LabelRenderer {
    let style = LabelStyle {
        font_size: cfg.font_size,
        ..LabelStyle::default()
    };
    LabelRenderer::new(load_label_font(&cfg.font_path), style)
}

/// Render `record`'s label over `src` and save it to `dest`.
pub fn label_image(
    renderer: &LabelRenderer,
    record: &GroundTruthRecord,
    src: &Path,
    dest: &Path,
) -> PrepResult<()> {
    let base = image::open(src).map_err(image_at(src))?;
    let labeled = renderer.render(&base, &record.label_text());
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_at(parent))?;
    }
    labeled.save(dest).map_err(image_at(dest))
}

/// Label every id whose folder exists and whose image was already copied.
pub fn label_range<C: SideClassifier + ?Sized>(
    cfg: &PrepConfig,
    classifier: &C,
    ids: RangeInclusive<u32>,
) -> PrepResult<StageReport> {
    ensure_source_root(cfg)?;
    fs::create_dir_all(&cfg.labeled_dest_root).map_err(io_at(&cfg.labeled_dest_root))?;
    let renderer = renderer_for(cfg);

    let mut report = StageReport::new(Stage::Label);
    for id in ids {
        let Some(entry) = resolve_entry(cfg, id) else {
            debug!(id = id, "no source folder");
            report.missing_folder += 1;
            continue;
        };
        let src: PathBuf = copied_image_path(cfg, id);
        if !src.is_file() {
            debug!(id = id, "not copied yet: {}", src.display());
            report.missing_image += 1;
            continue;
        }

        let record = classify_entry(classifier, &entry);
        let dest = labeled_image_path(cfg, id);
        label_image(&renderer, &record, &src, &dest)?;
        println!("Labeled image saved: {}", dest.display());
        report.written += 1;
    }
    Ok(report)
}
