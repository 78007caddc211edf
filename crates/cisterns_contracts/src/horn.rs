use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

/// Areas strictly below this (in cm²) count as a compressed horn.
pub const COMPRESSION_THRESHOLD_CM2: f64 = 3.0;

const SUMMARY_KEY: &str = "DataSummary";
const AREA_KEY: &str = "AreaCM2";

/// One of the two anatomical sides measured per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Right,
    Left,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Right, Side::Left];

    /// Column / label name, e.g. `right-horn`.
    pub fn label(self) -> &'static str {
        match self {
            Side::Right => "right-horn",
            Side::Left => "left-horn",
        }
    }

    /// Metadata file name inside an entry folder.
    pub fn metadata_file_name(self) -> &'static str {
        match self {
            Side::Right => "right-horn.xml",
            Side::Left => "left-horn.xml",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideClassification {
    /// Metadata missing or unreadable.
    Absent,
    Compressed,
    Normal,
}

impl SideClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            SideClassification::Absent => "absent",
            SideClassification::Compressed => "compressed",
            SideClassification::Normal => "normal",
        }
    }

    /// `Compressed` when `area_cm2 < threshold_cm2`, `Normal` otherwise.
    pub fn from_area(area_cm2: f64, threshold_cm2: f64) -> Self {
        if area_cm2 < threshold_cm2 {
            SideClassification::Compressed
        } else {
            SideClassification::Normal
        }
    }
}

impl fmt::Display for SideClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown side classification: {0:?}")]
pub struct UnknownClassification(pub String);

impl FromStr for SideClassification {
    type Err = UnknownClassification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "absent" => Ok(SideClassification::Absent),
            "compressed" => Ok(SideClassification::Compressed),
            "normal" => Ok(SideClassification::Normal),
            other => Err(UnknownClassification(other.to_string())),
        }
    }
}

/// Why a horn metadata file did not yield an area.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata file not found: {path}")]
    NotFound { path: PathBuf },
    #[error("plist parse error at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },
    #[error("missing {field} in {path}")]
    MissingField { path: PathBuf, field: &'static str },
    #[error("{field} in {path} is not numeric")]
    NotNumeric { path: PathBuf, field: &'static str },
}

/// Read `DataSummary.AreaCM2` from a plist metadata file.
pub fn read_area_cm2(path: &Path) -> Result<f64, MetadataError> {
    if !path.is_file() {
        return Err(MetadataError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let root = plist::Value::from_file(path).map_err(|source| MetadataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let summary = root
        .as_dictionary()
        .and_then(|d| d.get(SUMMARY_KEY))
        .and_then(|v| v.as_dictionary())
        .ok_or_else(|| MetadataError::MissingField {
            path: path.to_path_buf(),
            field: SUMMARY_KEY,
        })?;
    let area = summary
        .get(AREA_KEY)
        .ok_or_else(|| MetadataError::MissingField {
            path: path.to_path_buf(),
            field: AREA_KEY,
        })?;
    value_as_f64(area).ok_or_else(|| MetadataError::NotNumeric {
        path: path.to_path_buf(),
        field: AREA_KEY,
    })
}

fn value_as_f64(value: &plist::Value) -> Option<f64> {
    match value {
        plist::Value::Real(v) => Some(*v),
        plist::Value::Integer(i) => i
            .as_signed()
            .map(|v| v as f64)
            .or_else(|| i.as_unsigned().map(|v| v as f64)),
        plist::Value::String(s) => s.trim().parse().ok(),
        plist::Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Classify one side's metadata file. Every failure collapses to `Absent`.
pub fn classify_metadata(path: &Path, threshold_cm2: f64) -> SideClassification {
    match read_area_cm2(path) {
        Ok(area) => SideClassification::from_area(area, threshold_cm2),
        Err(MetadataError::NotFound { .. }) => SideClassification::Absent,
        Err(err) => {
            debug!("treating metadata as absent: {err}");
            SideClassification::Absent
        }
    }
}

/// Maps a side's metadata file to a classification.
pub trait SideClassifier {
    fn classify(&self, metadata_path: &Path) -> SideClassification;
}

/// Plist `AreaCM2` against a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaThresholdClassifier {
    pub threshold_cm2: f64,
}

impl AreaThresholdClassifier {
    pub fn new(threshold_cm2: f64) -> Self {
        Self { threshold_cm2 }
    }
}

impl Default for AreaThresholdClassifier {
    fn default() -> Self {
        Self::new(COMPRESSION_THRESHOLD_CM2)
    }
}

impl SideClassifier for AreaThresholdClassifier {
    fn classify(&self, metadata_path: &Path) -> SideClassification {
        classify_metadata(metadata_path, self.threshold_cm2)
    }
}

impl<T: SideClassifier + ?Sized> SideClassifier for &T {
    fn classify(&self, metadata_path: &Path) -> SideClassification {
        (**self).classify(metadata_path)
    }
}
