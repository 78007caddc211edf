use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

const DEFAULT_CONFIG_NAME: &str = "cisterns-prep.toml";
const CONFIG_ENV: &str = "CISTERNS_PREP_CONFIG";

/// Paths and constants shared by every stage. Built once and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepConfig {
    pub src_root: PathBuf,
    pub dest_root: PathBuf,
    pub labeled_dest_root: PathBuf,
    /// Entry folders are named `<folder_prefix><id>`.
    pub folder_prefix: String,
    pub image_filename: String,
    /// File name of the ground-truth table inside `dest_root`.
    pub ground_truth_file: String,
    pub area_threshold_cm2: f64,
    pub font_path: PathBuf,
    pub font_size: f32,
    /// JSON store of per-image human classifications.
    pub classifications_file: PathBuf,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            src_root: PathBuf::from("datasets/cq500"),
            dest_root: PathBuf::from("data/cisterns-data"),
            labeled_dest_root: PathBuf::from("data/cisterns-data-with-labels"),
            folder_prefix: "CQ500-CT-".to_string(),
            image_filename: "cisterns-segment.jpg".to_string(),
            ground_truth_file: "ground-truth.csv".to_string(),
            area_threshold_cm2: cisterns_contracts::COMPRESSION_THRESHOLD_CM2,
            font_path: PathBuf::from("arial.ttf"),
            font_size: 42.0,
            classifications_file: PathBuf::from("classifications.json"),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct PrepConfigFile {
    src_root: Option<String>,
    dest_root: Option<String>,
    labeled_dest_root: Option<String>,
    folder_prefix: Option<String>,
    image_filename: Option<String>,
    ground_truth_file: Option<String>,
    area_threshold_cm2: Option<f64>,
    classifications_file: Option<String>,
    label: Option<LabelSection>,
}

#[derive(Debug, Deserialize, Default)]
struct LabelSection {
    font_path: Option<String>,
    font_size: Option<f32>,
}

impl PrepConfig {
    /// Load from `$CISTERNS_PREP_CONFIG` or `./cisterns-prep.toml`, falling back to defaults.
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME));
        let cfg = Self::from_path(&path).unwrap_or_default();
        cfg.warn_if_invalid();
        cfg
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let raw = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<PrepConfigFile>(&raw) {
            Ok(file) => Some(Self::from_file(file)),
            Err(err) => {
                warn!("ignoring config {}: {err}", path.display());
                None
            }
        }
    }

    fn from_file(file: PrepConfigFile) -> Self {
        let defaults = Self::default();
        let label = file.label.unwrap_or_default();
        PrepConfig {
            src_root: file
                .src_root
                .map(|v| expand_path(&v))
                .unwrap_or(defaults.src_root),
            dest_root: file
                .dest_root
                .map(|v| expand_path(&v))
                .unwrap_or(defaults.dest_root),
            labeled_dest_root: file
                .labeled_dest_root
                .map(|v| expand_path(&v))
                .unwrap_or(defaults.labeled_dest_root),
            folder_prefix: file.folder_prefix.unwrap_or(defaults.folder_prefix),
            image_filename: file.image_filename.unwrap_or(defaults.image_filename),
            ground_truth_file: file
                .ground_truth_file
                .unwrap_or(defaults.ground_truth_file),
            area_threshold_cm2: file
                .area_threshold_cm2
                .unwrap_or(defaults.area_threshold_cm2),
            font_path: label
                .font_path
                .map(|v| expand_path(&v))
                .unwrap_or(defaults.font_path),
            font_size: label.font_size.unwrap_or(defaults.font_size),
            classifications_file: file
                .classifications_file
                .map(|v| expand_path(&v))
                .unwrap_or(defaults.classifications_file),
        }
    }

    /// Config rooted at temporary or test directories, other settings default.
    pub fn with_roots(
        src_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        labeled_dest_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            src_root: src_root.into(),
            dest_root: dest_root.into(),
            labeled_dest_root: labeled_dest_root.into(),
            ..Self::default()
        }
    }

    pub fn ground_truth_path(&self) -> PathBuf {
        self.dest_root.join(&self.ground_truth_file)
    }

    /// Human-readable problems with this config. Empty when it looks usable.
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.folder_prefix.is_empty() {
            out.push("folder_prefix is empty; entry folders will be bare ids".to_string());
        }
        if self.image_filename.trim().is_empty() {
            out.push("image_filename is empty; no images will be found".to_string());
        }
        if self.ground_truth_file.trim().is_empty() {
            out.push("ground_truth_file is empty".to_string());
        }
        if !self.area_threshold_cm2.is_finite() || self.area_threshold_cm2 <= 0.0 {
            out.push(format!(
                "area_threshold_cm2 = {} is not a positive number",
                self.area_threshold_cm2
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            out.push(format!("label.font_size = {} is not positive", self.font_size));
        }
        out
    }

    fn warn_if_invalid(&self) {
        for problem in self.problems() {
            warn!("prep config: {problem}");
        }
    }
}

fn expand_path(raw: &str) -> PathBuf {
    let mut out = raw.to_string();
    if let Some(stripped) = out.strip_prefix('~') {
        if let Ok(home) = std::env::var("HOME") {
            out = format!("{home}{stripped}");
        }
    }
    PathBuf::from(expand_env(&out))
}

/// Replace `${VAR}` with its value; unknown variables are left as written.
fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match std::env::var(key) {
                    Ok(val) => out.push_str(&val),
                    Err(_) => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
