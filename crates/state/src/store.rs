//! Per-user preference records keyed by user id.

use std::path::{Path, PathBuf};

use anyhow::Result;
use busters_model::{Constraints, FeedbackRecord, Mood, PreferenceRecord};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::persistence::{read_json_or_default, write_json_atomic};
use crate::{user_store_path, StoreError};

/// The whole user document, in insertion order.
pub type UserDocument = IndexMap<String, PreferenceRecord>;

/// JSON-file-backed user store. Every operation reads the whole document
/// and, when mutating, rewrites it.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(user_store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document; missing or undecodable files read as empty.
    pub fn load(&self) -> UserDocument {
        read_json_or_default(&self.path, "user store")
    }

    pub fn save(&self, doc: &UserDocument) -> Result<(), StoreError> {
        write_json_atomic(&self.path, doc)?;
        debug!(target: "busters::state", path = %self.path.display(), users = doc.len(), "saved user store");
        Ok(())
    }

    pub fn get(&self, user_id: &str) -> Option<PreferenceRecord> {
        self.load().shift_remove(user_id.trim())
    }

    /// Create or update a user's preferences.
    ///
    /// Scalars are overwritten; an existing feedback history is kept.
    pub fn save_preferences(
        &self,
        user_id: &str,
        mood: Mood,
        constraints: Constraints,
    ) -> Result<PreferenceRecord, StoreError> {
        let user_id = normalize_id(user_id)?;
        constraints.validate().map_err(StoreError::Invalid)?;

        let mut doc = self.load();
        let record = match doc.get_mut(user_id) {
            Some(existing) => {
                existing.update(mood, constraints);
                existing.clone()
            }
            None => {
                let record = PreferenceRecord::new(mood, constraints);
                doc.insert(user_id.to_string(), record.clone());
                record
            }
        };
        self.save(&doc)?;
        info!(target: "busters::state", user = user_id, %mood, "saved preferences");
        Ok(record)
    }

    /// Append one rated round to a user's history, returning its new length.
    pub fn append_feedback(
        &self,
        user_id: &str,
        record: FeedbackRecord,
    ) -> Result<usize, StoreError> {
        let user_id = normalize_id(user_id)?;
        let mut doc = self.load();
        let prefs = doc
            .get_mut(user_id)
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))?;
        prefs.history.push(record);
        let len = prefs.history.len();
        self.save(&doc)?;
        info!(target: "busters::state", user = user_id, entries = len, "appended feedback");
        Ok(len)
    }

    /// A user's feedback history, newest first, at most `limit` entries.
    pub fn history(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        let user_id = normalize_id(user_id)?;
        let prefs = self
            .get(user_id)
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))?;
        let limit = limit.unwrap_or(usize::MAX);
        Ok(prefs.history.into_iter().rev().take(limit).collect())
    }
}

fn normalize_id(user_id: &str) -> Result<&str, StoreError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        Err(StoreError::EmptyUserId)
    } else {
        Ok(trimmed)
    }
}
