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

//! String service
//!
//! Ties the analyzer, the translator and the record store together. Every
//! operation returns an explicit [`ServiceError`] kind; the HTTP layer only
//! maps kinds to status codes.

use std::sync::Arc;
use string_analyzer_core::{FilterSet, StoredRecord};
use string_analyzer_query::{validate_conflicts, FilterConflict, InterpretedQuery};
use string_analyzer_storage::{RecordStore, StoreError};
use thiserror::Error;
use tracing::{debug, info};

/// Service operation outcomes other than success
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("String already exists in the system")]
    Conflict,

    #[error("String does not exist in the system")]
    NotFound,

    #[error("Unable to parse natural language query")]
    UnparseableQuery,

    #[error("Query parsed but resulted in conflicting filters: {0}")]
    ConflictingFilters(FilterConflict),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Result of a natural-language search
#[derive(Debug, Clone)]
pub struct NaturalLanguageMatches {
    pub interpreted: InterpretedQuery,
    pub records: Vec<StoredRecord>,
}

/// String analysis service over a record store
pub struct StringService {
    store: Arc<dyn RecordStore>,
}

impl StringService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Analyze and store a new value
    pub fn create(&self, value: String) -> Result<StoredRecord, ServiceError> {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation("value cannot be empty".to_string()));
        }
        if self.store.get_by_value(&value)?.is_some() {
            return Err(ServiceError::Conflict);
        }

        let record = StoredRecord::new(value);
        match self.store.put(record.clone()) {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => return Err(ServiceError::Conflict),
            Err(e) => return Err(e.into()),
        }

        info!(
            id = %record.id,
            length = record.analysis.length,
            is_palindrome = record.analysis.is_palindrome,
            "Stored new string"
        );
        Ok(record)
    }

    /// Fetch the record for an exact value
    pub fn get(&self, value: &str) -> Result<StoredRecord, ServiceError> {
        self.store
            .get_by_value(value)?
            .ok_or(ServiceError::NotFound)
    }

    /// Records matching structured filters
    pub fn list(&self, filters: &FilterSet) -> Result<Vec<StoredRecord>, ServiceError> {
        let records = self.store.query(filters)?;
        debug!(filters = ?filters, count = records.len(), "Listed strings");
        Ok(records)
    }

    /// Translate a natural-language query and run it.
    ///
    /// An unrecognized query and a contradictory one are reported as different
    /// errors.
    pub fn search_natural_language(&self, query: &str) -> Result<NaturalLanguageMatches, ServiceError> {
        let interpreted = InterpretedQuery::new(query);

        if interpreted.parsed_filters.is_empty() {
            debug!(query, "Natural language query not understood");
            return Err(ServiceError::UnparseableQuery);
        }
        if let Some(conflict) = validate_conflicts(&interpreted.parsed_filters) {
            return Err(ServiceError::ConflictingFilters(conflict));
        }

        let records = self.store.query(&interpreted.parsed_filters)?;
        debug!(query, count = records.len(), "Natural language search");
        Ok(NaturalLanguageMatches {
            interpreted,
            records,
        })
    }

    /// Delete the record for `value`
    pub fn delete(&self, value: &str) -> Result<(), ServiceError> {
        if !self.store.delete(value)? {
            return Err(ServiceError::NotFound);
        }
        info!("Deleted string ({} chars)", value.chars().count());
        Ok(())
    }

    /// Number of stored records
    pub fn record_count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.len()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use string_analyzer_storage::MemoryRecordStore;

    fn service() -> StringService {
        StringService::new(Arc::new(MemoryRecordStore::new()))
    }

    #[test]
    fn test_create_then_conflict() {
        let service = service();
        let record = service.create("racecar".to_string()).unwrap();
        assert!(record.analysis.is_palindrome);

        assert!(matches!(
            service.create("racecar".to_string()),
            Err(ServiceError::Conflict)
        ));
    }

    #[test]
    fn test_blank_value_rejected() {
        let service = service();
        assert!(matches!(
            service.create("   ".to_string()),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.create(String::new()),
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(service.record_count().unwrap(), 0);
    }

    #[test]
    fn test_get_and_delete() {
        let service = service();
        assert!(matches!(service.get("missing"), Err(ServiceError::NotFound)));
        assert!(matches!(service.delete("missing"), Err(ServiceError::NotFound)));

        service.create("hello world".to_string()).unwrap();
        assert_eq!(service.get("hello world").unwrap().analysis.word_count, 2);
        service.delete("hello world").unwrap();
        assert_eq!(service.record_count().unwrap(), 0);
    }

    #[test]
    fn test_natural_language_outcomes() {
        let service = service();
        for value in ["level", "hello world", "noon", "zebra"] {
            service.create(value.to_string()).unwrap();
        }

        let found = service
            .search_natural_language("all single word palindromic strings")
            .unwrap();
        let mut values: Vec<&str> = found.records.iter().map(|r| r.value.as_str()).collect();
        values.sort();
        assert_eq!(values, vec!["level", "noon"]);

        assert!(matches!(
            service.search_natural_language("gibberish query"),
            Err(ServiceError::UnparseableQuery)
        ));
        assert!(matches!(
            service.search_natural_language("longer than 10 and shorter than 5"),
            Err(ServiceError::ConflictingFilters(_))
        ));
    }
}
