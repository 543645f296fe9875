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

//! Record map shared by the store backends.

use std::collections::HashMap;
use string_analyzer_core::{content_hash, FilterSet, StoredRecord};

use crate::StoreError;

/// Records keyed by content hash
#[derive(Debug, Default)]
pub(crate) struct RecordIndex {
    records: HashMap<String, StoredRecord>,
}

impl RecordIndex {
    pub(crate) fn from_records(records: Vec<StoredRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    pub(crate) fn insert(&mut self, record: StoredRecord) -> Result<(), StoreError> {
        if self.records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.value));
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub(crate) fn get(&self, value: &str) -> Option<&StoredRecord> {
        self.records
            .get(&content_hash(value))
            .filter(|record| record.value == value)
    }

    pub(crate) fn remove(&mut self, value: &str) -> Option<StoredRecord> {
        self.get(value)?;
        self.records.remove(&content_hash(value))
    }

    /// Matching records ordered by creation time, then id
    pub(crate) fn query(&self, filters: &FilterSet) -> Vec<StoredRecord> {
        let mut matches: Vec<StoredRecord> = self
            .records
            .values()
            .filter(|record| filters.matches(&record.value, &record.analysis))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        matches
    }

    /// Every record, in query order
    pub(crate) fn snapshot(&self) -> Vec<StoredRecord> {
        self.query(&FilterSet::default())
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}
