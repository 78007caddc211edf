//! Human classifications keyed by image path, persisted as
//! `{"classifications": {"<image>": "<label>"}}`.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{io_at, PrepError, PrepResult};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    classifications: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct ClassificationStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ClassificationStore {
    /// Open the store, creating an empty file if none exists. Unparsable
    /// content is treated as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> PrepResult<Self> {
        let path = path.into();
        if !path.exists() {
            let store = Self {
                path,
                entries: BTreeMap::new(),
            };
            store.save()?;
            return Ok(store);
        }
        let raw = fs::read(&path).map_err(io_at(&path))?;
        let entries = match serde_json::from_slice::<StoreFile>(&raw) {
            Ok(file) => file.classifications,
            Err(err) => {
                warn!("ignoring unreadable {}: {err}", path.display());
                BTreeMap::new()
            }
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, image: &str) -> Option<&str> {
        self.entries.get(image).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set `image`'s label, or clear it when `label` is `None` or empty. Saves immediately.
    pub fn set(&mut self, image: &str, label: Option<&str>) -> PrepResult<()> {
        if image.trim().is_empty() {
            return Err(PrepError::EmptyImageKey);
        }
        match label.filter(|l| !l.is_empty()) {
            Some(label) => {
                self.entries.insert(image.to_string(), label.to_string());
            }
            None => {
                self.entries.remove(image);
            }
        }
        self.save()
    }

    /// Drop every classification. Saves immediately.
    pub fn reset(&mut self) -> PrepResult<()> {
        self.entries.clear();
        self.save()
    }

    fn save(&self) -> PrepResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_at(parent))?;
        }
        let file = StoreFile {
            classifications: self.entries.clone(),
        };
        let mut writer = BufWriter::new(fs::File::create(&self.path).map_err(io_at(&self.path))?);
        serde_json::to_writer_pretty(&mut writer, &file).map_err(|source| PrepError::Json {
            path: self.path.clone(),
            source,
        })?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(io_at(&self.path))
    }
}
