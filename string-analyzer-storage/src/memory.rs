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

//! In-memory record store (for testing and lightweight use)

use parking_lot::RwLock;
use string_analyzer_core::{FilterSet, StoredRecord};
use tracing::debug;

use crate::index::RecordIndex;
use crate::{RecordStore, StoreError};

/// Record store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    index: RwLock<RecordIndex>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn put(&self, record: StoredRecord) -> Result<(), StoreError> {
        debug!(id = %record.id, "storing record");
        self.index.write().insert(record)
    }

    fn get_by_value(&self, value: &str) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.index.read().get(value).cloned())
    }

    fn query(&self, filters: &FilterSet) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self.index.read().query(filters))
    }

    fn delete(&self, value: &str) -> Result<bool, StoreError> {
        Ok(self.index.write().remove(value).is_some())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.index.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use string_analyzer_core::analyze;

    #[test]
    fn test_put_and_get() {
        let store = MemoryRecordStore::new();
        let record = StoredRecord::new("hello world");
        store.put(record.clone()).unwrap();

        assert_eq!(store.get_by_value("hello world").unwrap(), Some(record));
        assert_eq!(store.get_by_value("hello").unwrap(), None);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let store = MemoryRecordStore::new();
        store.put(StoredRecord::new("twice")).unwrap();

        let err = store.put(StoredRecord::new("twice")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref v) if v == "twice"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_delete() {
        let store = MemoryRecordStore::new();
        store.put(StoredRecord::new("gone soon")).unwrap();

        assert!(store.delete("gone soon").unwrap());
        assert!(!store.delete("gone soon").unwrap());
        assert_eq!(store.get_by_value("gone soon").unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_query_filters_and_orders_by_creation() {
        let store = MemoryRecordStore::new();
        let start = Utc::now();
        for (i, value) in ["racecar", "hello world", "level", "zigzag"].iter().enumerate() {
            let record = StoredRecord::from_analysis(
                value.to_string(),
                analyze(value),
                start + Duration::seconds(i as i64),
            );
            store.put(record).unwrap();
        }

        let palindromes = FilterSet {
            is_palindrome: Some(true),
            ..Default::default()
        };
        let values: Vec<String> = store
            .query(&palindromes)
            .unwrap()
            .into_iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(values, vec!["racecar", "level"]);

        let with_z = FilterSet {
            contains_character: Some('z'),
            max_length: Some(6),
            ..Default::default()
        };
        let matches = store.query(&with_z).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "zigzag");

        assert_eq!(store.query(&FilterSet::default()).unwrap().len(), 4);
    }
}
