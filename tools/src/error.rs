use std::path::{Path, PathBuf};

use cisterns_contracts::RecordError;
use thiserror::Error;

pub type PrepResult<T> = Result<T, PrepError>;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("source root does not exist: {path}")]
    MissingSourceRoot { path: PathBuf },
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image error at {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("json error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("image key must not be empty")]
    EmptyImageKey,
    #[error("bad ground-truth row {line} in {path}: {source}")]
    Record {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordError,
    },
}

pub(crate) fn io_at(path: &Path) -> impl FnOnce(std::io::Error) -> PrepError + '_ {
    move |source| PrepError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn image_at(path: &Path) -> impl FnOnce(image::ImageError) -> PrepError + '_ {
    move |source| PrepError::Image {
        path: path.to_path_buf(),
        source,
    }
}
