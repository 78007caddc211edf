#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use cisterns_tools::PrepConfig;
use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// Source/destination trees inside one temp dir.
pub struct Fixture {
    pub tmp: TempDir,
    pub cfg: PrepConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        let src = root.join("cq500");
        fs::create_dir_all(&src).expect("create src root");
        let cfg = PrepConfig::with_roots(
            src,
            root.join("out/cisterns-data"),
            root.join("out/cisterns-data-with-labels"),
        );
        Self { tmp, cfg }
    }

    pub fn entry(&self, id: u32) -> PathBuf {
        let dir = self
            .cfg
            .src_root
            .join(format!("{}{}", self.cfg.folder_prefix, id));
        fs::create_dir_all(&dir).expect("create entry");
        dir
    }

    pub fn entry_with_image(&self, id: u32) -> PathBuf {
        self.entry_with_image_sized(id, 96, 64)
    }

    pub fn entry_with_image_sized(&self, id: u32, width: u32, height: u32) -> PathBuf {
        let dir = self.entry(id);
        write_image(&dir.join(&self.cfg.image_filename), width, height);
        dir
    }

    pub fn horn(&self, id: u32, file: &str, area: f64) {
        write_horn(&self.entry(id).join(file), area);
    }
}

pub fn write_image(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 128) as u8, (y % 128) as u8, 128])
    })
    .save(path)
    .expect("write image");
}

pub fn write_horn(path: &Path, area: f64) {
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>DataSummary</key>
    <dict>
        <key>AreaCM2</key>
        <real>{area}</real>
    </dict>
</dict>
</plist>
"#
    );
    fs::write(path, body).expect("write horn metadata");
}
