use crate::domain::model::Record;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// Records produced by one ingestion run. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    built_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            built_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct faculty names, for facet choices.
    pub fn faculties(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.faculty.as_str())
            .filter(|f| !f.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Highest fee in the dataset, the natural upper bound of a range filter.
    pub fn max_fee(&self) -> Option<u64> {
        self.records.iter().map(|r| r.tuition_fee_numeric).max()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Shared handle to the current dataset.
///
/// Queries take an `Arc` snapshot; re-ingestion builds a complete new
/// [`Dataset`] and swaps the pointer, so a reader never observes a half-built one.
#[derive(Debug, Default)]
pub struct SharedDataset {
    current: RwLock<Arc<Dataset>>,
}

impl SharedDataset {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    pub fn snapshot(&self) -> Arc<Dataset> {
        // 寫入端只會整個替換指標，中毒的鎖內容仍然完整
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Installs `dataset` and returns the snapshot it replaced.
    pub fn replace(&self, dataset: impl Into<Arc<Dataset>>) -> Arc<Dataset> {
        let next = dataset.into();
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}
