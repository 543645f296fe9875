// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! JSON file record store
//!
//! Keeps every record in memory and rewrites `records.json` in the data
//! directory after each mutation. The previous snapshot is kept next to it as
//! `records.json.bak`, and new contents go through a temporary file that is
//! renamed into place so a crash never leaves a half-written snapshot.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use string_analyzer_core::{FilterSet, StoredRecord};
use tracing::{debug, info, warn};

use crate::index::RecordIndex;
use crate::{RecordStore, StoreError};

const RECORDS_FILE: &str = "records.json";

/// Record store persisted as a JSON snapshot
#[derive(Debug)]
pub struct FileRecordStore {
    index: RwLock<RecordIndex>,
    file_path: PathBuf,
}

impl FileRecordStore {
    /// Open the store in `data_dir`, loading any existing snapshot
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        let file_path = data_dir.join(RECORDS_FILE);

        let records = if file_path.exists() {
            let contents = std::fs::read_to_string(&file_path)?;
            serde_json::from_str::<Vec<StoredRecord>>(&contents)?
        } else {
            Vec::new()
        };

        info!("Loaded {} records from {:?}", records.len(), file_path);

        Ok(Self {
            index: RwLock::new(RecordIndex::from_records(records)),
            file_path,
        })
    }

    /// Location of the snapshot file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn save(&self, index: &RecordIndex) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&index.snapshot())?;

        if self.file_path.exists() {
            let backup_path = self.file_path.with_extension("json.bak");
            std::fs::copy(&self.file_path, backup_path)?;
        }

        let tmp_path = self.file_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        debug!(records = index.len(), "saved record snapshot");
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn put(&self, record: StoredRecord) -> Result<(), StoreError> {
        let mut index = self.index.write();
        let value = record.value.clone();
        index.insert(record)?;

        if let Err(e) = self.save(&index) {
            warn!("Failed to persist new record, rolling back: {}", e);
            index.remove(&value);
            return Err(e);
        }
        Ok(())
    }

    fn get_by_value(&self, value: &str) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.index.read().get(value).cloned())
    }

    fn query(&self, filters: &FilterSet) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self.index.read().query(filters))
    }

    fn delete(&self, value: &str) -> Result<bool, StoreError> {
        let mut index = self.index.write();
        let Some(removed) = index.remove(value) else {
            return Ok(false);
        };

        if let Err(e) = self.save(&index) {
            warn!("Failed to persist deletion, restoring record: {}", e);
            index.insert(removed)?;
            return Err(e);
        }
        Ok(true)
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.index.read().len())
    }
}
