//! In-memory record store, for tests and one-shot queries against a records file

use super::{RecordStore, SeedInfo, SeedOutcome};
use crate::error::StorageError;
use crate::record::FlatRecord;
use crate::types::RecordId;
use parking_lot::RwLock;
use std::collections::HashMap;

struct Seeded {
    records: Vec<FlatRecord>,
    by_name: HashMap<String, usize>,
    info: SeedInfo,
}

impl Seeded {
    fn build(records: &[FlatRecord]) -> Result<Self, StorageError> {
        let by_name = records
            .iter()
            .enumerate()
            .map(|(index, record)| (record.name.clone(), index))
            .collect();
        Ok(Self {
            records: records.to_vec(),
            by_name,
            info: SeedInfo::for_records(records)?,
        })
    }

    fn index_of(&self, id: RecordId) -> Option<usize> {
        let base = self.records.first()?.id;
        let index = usize::try_from(id.checked_sub(base)?).ok()?;
        (index < self.records.len()).then_some(index)
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Option<Seeded>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `records`
    pub fn with_records(records: &[FlatRecord]) -> Result<Self, StorageError> {
        let store = Self::new();
        store.seed(records)?;
        Ok(store)
    }
}

impl RecordStore for MemoryRecordStore {
    fn is_seeded(&self) -> Result<bool, StorageError> {
        Ok(self.inner.read().is_some())
    }

    fn seed(&self, records: &[FlatRecord]) -> Result<SeedOutcome, StorageError> {
        if records.is_empty() {
            return Err(StorageError::EmptySeed);
        }
        // Check and write under one guard
        let mut guard = self.inner.write();
        if let Some(existing) = guard.as_ref() {
            return Ok(SeedOutcome::AlreadySeeded(Some(existing.info.clone())));
        }
        let seeded = Seeded::build(records)?;
        let info = seeded.info.clone();
        *guard = Some(seeded);
        Ok(SeedOutcome::Seeded(info))
    }

    fn reseed(&self, records: &[FlatRecord]) -> Result<SeedInfo, StorageError> {
        if records.is_empty() {
            return Err(StorageError::EmptySeed);
        }
        let seeded = Seeded::build(records)?;
        let info = seeded.info.clone();
        *self.inner.write() = Some(seeded);
        Ok(info)
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.inner.read().as_ref().map_or(0, |s| s.records.len()))
    }

    fn all(&self) -> Result<Vec<FlatRecord>, StorageError> {
        Ok(self
            .inner
            .read()
            .as_ref()
            .map(|s| s.records.to_vec())
            .unwrap_or_default())
    }

    fn root(&self) -> Result<Option<FlatRecord>, StorageError> {
        Ok(self
            .inner
            .read()
            .as_ref()
            .and_then(|s| s.records.first().cloned()))
    }

    fn get_by_name(&self, name: &str) -> Result<Option<FlatRecord>, StorageError> {
        let guard = self.inner.read();
        Ok(guard.as_ref().and_then(|s| {
            s.by_name
                .get(name)
                .and_then(|&index| s.records.get(index).cloned())
        }))
    }

    fn range(&self, first: RecordId, last: RecordId) -> Result<Vec<FlatRecord>, StorageError> {
        let guard = self.inner.read();
        let Some(seeded) = guard.as_ref() else {
            return Ok(Vec::new());
        };
        let Some(base) = seeded.records.first().map(|r| r.id) else {
            return Ok(Vec::new());
        };
        if first > last || last < base {
            return Ok(Vec::new());
        }
        let start = seeded.index_of(first.max(base));
        let end = seeded
            .index_of(last)
            .unwrap_or(seeded.records.len().saturating_sub(1));
        match start {
            Some(start) if start <= end => Ok(seeded.records[start..=end].to_vec()),
            _ => Ok(Vec::new()),
        }
    }

    fn seed_info(&self) -> Result<Option<SeedInfo>, StorageError> {
        Ok(self.inner.read().as_ref().map(|s| s.info.clone()))
    }
}
