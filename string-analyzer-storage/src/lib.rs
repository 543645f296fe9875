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

//! String Analyzer Storage Layer
//!
//! Keyed persistence for analyzed strings. The service only ever talks to the
//! [`RecordStore`] trait; the engine behind it is interchangeable.
//!
//! ## Backends
//!
//! - [`MemoryRecordStore`]: process-local map, lost on restart
//! - [`FileRecordStore`]: the same map snapshotted to a JSON file after every write
//!
//! ## Usage
//!
//! ```rust
//! use string_analyzer_core::{FilterSet, StoredRecord};
//! use string_analyzer_storage::{MemoryRecordStore, RecordStore};
//!
//! let store = MemoryRecordStore::new();
//! store.put(StoredRecord::new("level")).unwrap();
//!
//! let palindromes = FilterSet { is_palindrome: Some(true), ..Default::default() };
//! assert_eq!(store.query(&palindromes).unwrap().len(), 1);
//! ```

mod error;
mod file;
mod index;
mod memory;

pub use error::StoreError;
pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

use string_analyzer_core::{FilterSet, StoredRecord};

/// Keyed persistence of analysis records
///
/// Records are keyed by content hash and unique by value. There is no update
/// operation: a record lives from `put` until `delete`.
pub trait RecordStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::Duplicate`] if the value is already stored.
    fn put(&self, record: StoredRecord) -> Result<(), StoreError>;

    /// Look up a record by its original value
    fn get_by_value(&self, value: &str) -> Result<Option<StoredRecord>, StoreError>;

    /// All records matching `filters`, oldest first
    fn query(&self, filters: &FilterSet) -> Result<Vec<StoredRecord>, StoreError>;

    /// Remove the record for `value`. Returns whether a record was removed.
    fn delete(&self, value: &str) -> Result<bool, StoreError>;

    /// Number of stored records
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
