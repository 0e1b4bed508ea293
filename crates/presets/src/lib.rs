//! pipedash-presets — durable local store for named op batches.
//!
//! A preset is a reusable batch of `set`/`unset` ops ("my caption style"),
//! created from the editor's diff-against-base, applied to any edit target,
//! and deleted when stale. Presets are entirely user-owned: no server sync.
//!
//! Persistence is a single JSON file with load-on-open and
//! write-through-on-every-change semantics, held behind the
//! [`PresetRepository`] trait so the UI layer takes an injected service
//! object rather than reaching for process-wide state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use pipedash_leaf_patch::PatchOp;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset store I/O: {0}")]
    Io(#[from] io::Error),
    #[error("preset store data: {0}")]
    Data(#[from] serde_json::Error),
    #[error("preset not found: {0}")]
    NotFound(Uuid),
}

// ── Data model ────────────────────────────────────────────────────────────

/// A named, reusable batch of patch ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub ops: Vec<PatchOp>,
}

/// Storage surface for presets. Lifecycle is user-driven: create, apply
/// (read `ops` and feed them to the editor), delete.
pub trait PresetRepository {
    fn list(&self) -> &[Preset];
    fn get(&self, id: Uuid) -> Option<&Preset>;
    fn save(&mut self, name: &str, ops: Vec<PatchOp>) -> Result<Preset, PresetError>;
    fn delete(&mut self, id: Uuid) -> Result<(), PresetError>;
}

// ── File-backed store ─────────────────────────────────────────────────────

/// JSON-file-backed preset store.
///
/// The file is read once at [`FilePresetStore::open`]; every mutation
/// rewrites it before returning, so a crash never loses an acknowledged
/// change. A missing file is an empty store, not an error.
#[derive(Debug)]
pub struct FilePresetStore {
    path: PathBuf,
    presets: Vec<Preset>,
}

impl FilePresetStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PresetError> {
        let path = path.into();
        let presets = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), count = presets.len(), "opened preset store");
        Ok(Self { path, presets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_through(&self) -> Result<(), PresetError> {
        let data = serde_json::to_string_pretty(&self.presets)?;
        fs::write(&self.path, data)?;
        debug!(path = %self.path.display(), count = self.presets.len(), "preset store written");
        Ok(())
    }
}

impl PresetRepository for FilePresetStore {
    fn list(&self) -> &[Preset] {
        &self.presets
    }

    fn get(&self, id: Uuid) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    fn save(&mut self, name: &str, ops: Vec<PatchOp>) -> Result<Preset, PresetError> {
        let preset = Preset {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            ops,
        };
        self.presets.push(preset.clone());
        self.write_through()?;
        Ok(preset)
    }

    fn delete(&mut self, id: Uuid) -> Result<(), PresetError> {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        if self.presets.len() == before {
            return Err(PresetError::NotFound(id));
        }
        self.write_through()
    }
}
