//! # Info Registry
//!
//! Read-only mapping from piece identifier to the title and description shown
//! in the overlay. A hovered piece with no entry is normal; the overlay falls
//! back to a placeholder.
//!
//! Registries can be built in code or loaded from JSON shaped like:
//!
//! ```json
//! {
//!   "Bed":  { "title": "Bed",  "description": "Where the magic (sleep) happens." },
//!   "Desk": { "title": "Desk", "description": "Workspace with a lamp and plants." }
//! }
//! ```

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::error::{Result, ViewerError};
use crate::isolate::PieceId;

/// Details shown for one piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRecord {
    pub id: PieceId,
    pub title: String,
    pub description: String,
}

impl InfoRecord {
    pub fn new(id: impl Into<PieceId>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<String>,
    title: String,
    description: String,
}

#[derive(Debug, Clone, Default)]
pub struct InfoRegistry {
    records: HashMap<PieceId, InfoRecord>,
}

impl InfoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, replacing any record with the same id
    pub fn insert(&mut self, record: InfoRecord) -> Option<InfoRecord> {
        self.records.insert(record.id.clone(), record)
    }

    /// Builder pattern: Add a record
    pub fn with_record(mut self, record: InfoRecord) -> Self {
        self.insert(record);
        self
    }

    pub fn get(&self, id: &PieceId) -> Option<&InfoRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &PieceId) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record ids in sorted order
    pub fn ids(&self) -> Vec<&PieceId> {
        let mut ids: Vec<&PieceId> = self.records.keys().collect();
        ids.sort();
        ids
    }

    /// Parses a JSON object of `id -> { title, description }`
    ///
    /// The map key is authoritative. A record whose own `id` field disagrees
    /// is kept under its key; blank keys are skipped.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, RawRecord> = serde_json::from_str(json)?;

        let mut registry = Self::new();
        for (key, record) in raw {
            if key.trim().is_empty() {
                log::warn!("Skipping info record with a blank id");
                continue;
            }
            if let Some(inner) = record.id.as_deref() {
                if inner != key {
                    log::warn!("Info record '{}' declares id '{}', using the key", key, inner);
                }
            }
            registry.insert(InfoRecord::new(key, record.title, record.description));
        }

        log::info!("Loaded {} info records", registry.len());
        Ok(registry)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ViewerError::RegistryIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl FromIterator<InfoRecord> for InfoRegistry {
    fn from_iter<T: IntoIterator<Item = InfoRecord>>(iter: T) -> Self {
        let mut registry = Self::new();
        for record in iter {
            registry.insert(record);
        }
        registry
    }
}
