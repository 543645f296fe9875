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

//! Persisted analysis records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze, AnalysisResult};

/// An analyzed string as kept by a record store
///
/// Records are immutable once created. The `id` is the content hash of
/// `value`, which makes `value` unique as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Primary key (content hash of `value`)
    pub id: String,
    /// Original string
    pub value: String,
    /// Derived properties
    pub analysis: AnalysisResult,
    /// When the record was first created
    pub created_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Analyze `value` and stamp the record with the current time
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let analysis = analyze(&value);
        Self::from_analysis(value, analysis, Utc::now())
    }

    /// Build a record from an existing analysis
    pub fn from_analysis(value: String, analysis: AnalysisResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id: analysis.content_hash.clone(),
            value,
            analysis,
            created_at,
        }
    }
}
