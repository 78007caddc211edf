//! Image listing for a prepared dataset tree (`<root>/<entry>/<image>`).

use std::fs;
use std::path::Path;

use crate::error::{io_at, PrepResult};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub fn is_image_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

/// `<entry>/<file>` keys for every image one level below each entry folder of
/// `root`, sorted. A missing root lists nothing.
pub fn list_images(root: &Path) -> PrepResult<Vec<String>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut keys = Vec::new();
    for entry in fs::read_dir(root).map_err(io_at(root))? {
        let entry = entry.map_err(io_at(root))?;
        let entry_dir = entry.path();
        if !entry_dir.is_dir() {
            continue;
        }
        let entry_name = entry.file_name().to_string_lossy().into_owned();
        for file in fs::read_dir(&entry_dir).map_err(io_at(&entry_dir))? {
            let file = file.map_err(io_at(&entry_dir))?;
            if is_image_file(&file.path()) {
                keys.push(format!(
                    "{entry_name}/{}",
                    file.file_name().to_string_lossy()
                ));
            }
        }
    }
    keys.sort();
    Ok(keys)
}
