//! The current record set of an interactive session.
//!
//! A [`SessionStore`] holds one immutable [`Dataset`] behind a lock and
//! swaps it whole on every change. Readers take an `Arc` snapshot and keep
//! using it while a new batch is being stored, so they never see records
//! from one batch next to metadata from another.
//!
//! ```
//! use rmfpack::core::aggregate::Aggregator;
//! use rmfpack::core::filter::FilterCriteria;
//! use rmfpack::session::SessionStore;
//!
//! let report = "\
//! START 01/15/2024-08.30.00 INTERVAL
//! WORKLOAD=BATCH SERVICE CLASS=PROD PERIOD=1
//! AVG 1.00 TOTAL 45.67
//! ";
//!
//! let store = SessionStore::new();
//! store.replace(Aggregator::new().scan_texts([("RMFW0001.txt", report)]));
//!
//! let snapshot = store.current();
//! assert_eq!(snapshot.metadata.service_classes, ["PROD"]);
//! assert_eq!(snapshot.view(&FilterCriteria::new().with_service_class("TEST")).len(), 0);
//! ```

use std::borrow::Cow;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Record;
use crate::core::aggregate::{Batch, ParseStats};
use crate::core::filter::{FilterCriteria, apply_filters};
use crate::core::metadata::{Metadata, derive_metadata};

/// An immutable record set with its run statistics and derived metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub stats: ParseStats,
    pub metadata: Metadata,
}

impl Dataset {
    /// Builds a dataset from a batch, deriving metadata once.
    pub fn from_batch(batch: Batch) -> Self {
        let metadata = derive_metadata(&batch.records, batch.stats.clone());
        Self {
            records: batch.records,
            stats: batch.stats,
            metadata,
        }
    }

    /// Returns the records matching `criteria`; borrowed when no filter is set.
    pub fn view(&self, criteria: &FilterCriteria) -> Cow<'_, [Record]> {
        apply_filters(&self.records, criteria)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Single-writer, many-reader owner of the current [`Dataset`].
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Arc<Dataset>>,
}

impl SessionStore {
    /// Creates a store holding an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    // The guarded value is an Arc that is only ever swapped whole, so a
    // poisoned lock still holds a valid dataset.
    fn read(&self) -> RwLockReadGuard<'_, Arc<Dataset>> {
        match self.current.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Dataset>> {
        match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns a consistent snapshot of the current dataset.
    pub fn current(&self) -> Arc<Dataset> {
        Arc::clone(&self.read())
    }

    /// Replaces the current dataset with `batch`.
    pub fn replace(&self, batch: Batch) -> Arc<Dataset> {
        let next = Arc::new(Dataset::from_batch(batch));
        *self.write() = Arc::clone(&next);
        tracing::debug!(records = next.len(), "Session dataset replaced");
        next
    }

    /// Appends `batch` after the current records.
    pub fn append(&self, batch: Batch) -> Arc<Dataset> {
        let mut guard = self.write();
        let mut merged = Batch {
            records: guard.records.clone(),
            stats: guard.stats.clone(),
        };
        merged.extend(batch);

        let next = Arc::new(Dataset::from_batch(merged));
        *guard = Arc::clone(&next);
        tracing::debug!(records = next.len(), "Session dataset appended");
        next
    }

    /// Drops all records.
    pub fn clear(&self) {
        *self.write() = Arc::new(Dataset::default());
        tracing::debug!("Session dataset cleared");
    }
}
