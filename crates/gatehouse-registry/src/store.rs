//! Registry persistence: whole-document read and atomic-replace write.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use gatehouse_core::result::AppResult;
use gatehouse_entity::user::UserRecord;

/// On-disk registry document: a single top-level list of user records.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// All known user records.
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// File-backed registry store.
///
/// Every mutation re-serializes the entire registry. Writes go to a
/// temporary file in the same directory followed by a rename, so a crash
/// mid-write never corrupts previously durable state.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    /// Path of the registry document.
    path: PathBuf,
}

impl RegistryStore {
    /// Create a store for the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all user records from disk.
    ///
    /// A missing file is an empty registry. An unreadable or malformed
    /// document is logged and also treated as empty, so a damaged file
    /// does not take the whole service down.
    pub fn load(&self) -> Vec<UserRecord> {
        if !self.path.exists() {
            return Vec::new();
        }

        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<RegistryDocument>(&contents) {
                Ok(doc) => doc.users,
                Err(e) => {
                    error!(path = %self.path.display(), error = %e, "Failed to parse registry document");
                    Vec::new()
                }
            },
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to read registry document");
                Vec::new()
            }
        }
    }

    /// Persist all user records to disk with atomic-replace semantics.
    pub fn save(&self, users: &[UserRecord]) -> AppResult<()> {
        let doc = RegistryDocument {
            users: users.to_vec(),
        };
        let contents = serde_json::to_string_pretty(&doc)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write to a sibling temp file, then swap it into place.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        info!(path = %self.path.display(), count = users.len(), "Registry document saved");
        Ok(())
    }
}
