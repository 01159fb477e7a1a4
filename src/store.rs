// Copyright 2025 The flashdeck contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::types::confidence::Confidence;
use crate::types::record::ProgressRecord;
use crate::types::theme::Theme;
use crate::types::timestamp::Timestamp;

/// Name of the store file inside the deck directory.
pub const STORE_FILE: &str = "flashdeck.json";

type ProgressMap = HashMap<String, HashMap<usize, ProgressRecord>>;

/// The durable store. Holds the three persistent entries: the theme
/// preference, the progress map, and the session counter. Every mutation
/// rewrites the whole store file (write-through, no batching).
///
/// Storage faults are never fatal: if the file cannot be read or written,
/// the in-memory state stays authoritative for the session and the fault
/// is logged.
pub struct Store {
    path: Option<PathBuf>,
    data: StoreData,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoreData {
    theme: Theme,
    progress: ProgressMap,
    sessions: u64,
}

impl Store {
    /// Open the store backed by `directory`. A missing file yields the
    /// defaults (light theme, empty progress, zero sessions); so does an
    /// unreadable one.
    pub fn open(directory: &Path) -> Self {
        let path = directory.join(STORE_FILE);
        let data = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(data) => data,
                    Err(e) => {
                        log::error!("could not parse {}: {e}", path.display());
                        StoreData::default()
                    }
                },
                Err(e) => {
                    log::error!("could not read {}: {e}", path.display());
                    StoreData::default()
                }
            }
        } else {
            log::debug!("Using empty store.");
            StoreData::default()
        };
        Self {
            path: Some(path),
            data,
        }
    }

    /// An in-memory store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: StoreData::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.data.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.data.theme = theme;
        self.persist();
    }

    pub fn sessions(&self) -> u64 {
        self.data.sessions
    }

    pub fn increment_sessions(&mut self) {
        self.data.sessions += 1;
        self.persist();
    }

    /// The progress record for one card. Absent records read as fresh
    /// ones; this never fails.
    pub fn progress(&self, deck_id: &str, index: usize) -> ProgressRecord {
        self.data
            .progress
            .get(deck_id)
            .and_then(|deck| deck.get(&index))
            .cloned()
            .unwrap_or_default()
    }

    /// Apply one rating to a card. Progress is keyed by (deck id, card
    /// index): card identity is positional, so reordering a deck's source
    /// data orphans its history. Persists before returning.
    pub fn record(&mut self, deck_id: &str, index: usize, confidence: Confidence) -> ProgressRecord {
        let updated = self
            .progress(deck_id, index)
            .rated(confidence, Timestamp::now());
        log::debug!(
            "{deck_id}[{index}] {} -> {}",
            confidence.as_str(),
            updated.status.as_str()
        );
        self.data
            .progress
            .entry(deck_id.to_string())
            .or_default()
            .insert(index, updated.clone());
        self.persist();
        updated
    }

    /// Discard every progress record for every deck. Irreversible. The
    /// theme and session counter survive.
    pub fn reset_all(&mut self) {
        self.data.progress.clear();
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let content = match serde_json::to_string_pretty(&self.data) {
            Ok(content) => content,
            Err(e) => {
                log::error!("could not serialize store: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(path, content) {
            log::error!("could not write {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::types::status::Status;

    #[test]
    fn test_absent_record_reads_as_new() {
        let store = Store::in_memory();
        let record = store.progress("scrum", 7);
        assert_eq!(record.status, Status::New);
        assert_eq!(record.reviews, 0);
    }

    #[test]
    fn test_record_counts_reviews_per_key() {
        let mut store = Store::in_memory();
        store.record("scrum", 0, Confidence::Again);
        store.record("scrum", 0, Confidence::Good);
        store.record("scrum", 1, Confidence::Easy);
        assert_eq!(store.progress("scrum", 0).reviews, 2);
        assert_eq!(store.progress("scrum", 1).reviews, 1);
        assert_eq!(store.progress("scrum", 2).reviews, 0);
    }

    #[test]
    fn test_record_follows_transition_table() {
        let mut store = Store::in_memory();
        assert_eq!(
            store.record("apis", 0, Confidence::Good).status,
            Status::Learning
        );
        assert_eq!(
            store.record("apis", 0, Confidence::Good).status,
            Status::Mastered
        );
        assert_eq!(
            store.record("apis", 0, Confidence::Again).status,
            Status::Learning
        );
        assert_eq!(
            store.record("apis", 0, Confidence::Easy).status,
            Status::Mastered
        );
    }

    #[test]
    fn test_reset_all_clears_progress_only() {
        let mut store = Store::in_memory();
        store.record("apis", 0, Confidence::Easy);
        store.set_theme(Theme::Dark);
        store.increment_sessions();
        store.reset_all();
        assert_eq!(store.progress("apis", 0), ProgressRecord::new());
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.sessions(), 1);
    }

    #[test]
    fn test_write_through_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = Store::open(dir.path());
            store.record("scrum", 3, Confidence::Hard);
            store.increment_sessions();
            store.set_theme(Theme::Dark);
        }
        let store = Store::open(dir.path());
        assert_eq!(store.progress("scrum", 3).status, Status::Learning);
        assert_eq!(store.progress("scrum", 3).reviews, 1);
        assert_eq!(store.sessions(), 1);
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_store_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(STORE_FILE), "not json").unwrap();
        let store = Store::open(dir.path());
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(store.sessions(), 0);
        assert_eq!(store.progress("scrum", 0), ProgressRecord::new());
    }
}
