//! Dataset preparation for the CQ500 basal-cisterns images.
//!
//! Three stages share one id range and one classifier:
//! - [`copy`]: copy each entry's segment image into `dest_root/<id>/`.
//! - [`ground_truth`]: append `id,right-horn,left-horn` rows to `ground-truth.csv`.
//! - [`label`]: write a copy of each image with its classification overlaid.
//!
//! [`index`] and [`store`] support reviewing the prepared images by hand.

pub mod config;
pub mod copy;
pub mod dataset;
pub mod error;
pub mod ground_truth;
pub mod index;
pub mod label;
pub mod pipeline;
pub mod report;
pub mod store;

pub use config::PrepConfig;
pub use copy::copy_range;
pub use dataset::{classify_entry, resolve_entry, DatasetEntry};
pub use error::{PrepError, PrepResult};
pub use ground_truth::{read_ground_truth, write_range};
pub use index::list_images;
pub use label::label_range;
pub use pipeline::{run_all, run_stages};
pub use report::{Stage, StageReport};
pub use store::ClassificationStore;

/// Install a fmt subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
