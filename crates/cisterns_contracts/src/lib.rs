//! Shared vocabulary for the cisterns dataset tooling.
//!
//! - [`horn`]: anatomical sides, per-side classification, and the plist
//!   metadata reader behind it.
//! - [`record`]: ground-truth rows as written to `ground-truth.csv`.

pub mod horn;
pub mod record;

pub use horn::{
    classify_metadata, read_area_cm2, AreaThresholdClassifier, MetadataError, Side,
    SideClassification, SideClassifier, UnknownClassification, COMPRESSION_THRESHOLD_CM2,
};
pub use record::{GroundTruthRecord, RecordError, HEADER};
