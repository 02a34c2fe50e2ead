//! Record Store
//!
//! Persists the flattened sequence once and serves it read-only afterwards.
//! Seeding is guarded: a store that already holds records is never seeded
//! again, and the guard check and the write happen atomically.

pub mod memory;
pub mod persistence;

use crate::error::StorageError;
use crate::record::FlatRecord;
use crate::types::{Digest, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::MemoryRecordStore;
pub use persistence::SledRecordStore;

/// Metadata written alongside a successful seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedInfo {
    pub record_count: u64,
    /// Hex blake3 digest of the canonical records JSON
    pub digest: String,
    pub seeded_at: DateTime<Utc>,
}

impl SeedInfo {
    pub fn for_records(records: &[FlatRecord]) -> Result<Self, StorageError> {
        Ok(Self {
            record_count: records.len() as u64,
            digest: hex::encode(records_digest(records)?),
            seeded_at: Utc::now(),
        })
    }
}

/// Result of a seed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(SeedInfo),
    /// The store was already populated; nothing was written
    AlreadySeeded(Option<SeedInfo>),
}

impl SeedOutcome {
    pub fn is_seeded(&self) -> bool {
        matches!(self, SeedOutcome::Seeded(_))
    }
}

/// Digest of the canonical JSON encoding of a record sequence
pub fn records_digest(records: &[FlatRecord]) -> Result<Digest, StorageError> {
    let mut hasher = blake3::Hasher::new();
    for record in records {
        hasher.update(&serde_json::to_vec(record)?);
        hasher.update(b"\n");
    }
    Ok(*hasher.finalize().as_bytes())
}

/// Storage seam between the codec and whatever holds the records
pub trait RecordStore: Send + Sync {
    fn is_seeded(&self) -> Result<bool, StorageError>;

    /// Write the whole sequence, unless the store is already populated.
    ///
    /// An empty sequence is refused so it can never set the seed marker.
    fn seed(&self, records: &[FlatRecord]) -> Result<SeedOutcome, StorageError>;

    /// Replace whatever the store holds with `records` in one atomic step.
    ///
    /// On failure the previous contents are left in place.
    fn reseed(&self, records: &[FlatRecord]) -> Result<SeedInfo, StorageError>;

    fn len(&self) -> Result<usize, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Every record in id order
    fn all(&self) -> Result<Vec<FlatRecord>, StorageError>;

    fn root(&self) -> Result<Option<FlatRecord>, StorageError>;

    /// Exact lookup by materialized path
    fn get_by_name(&self, name: &str) -> Result<Option<FlatRecord>, StorageError>;

    /// Records with `first <= id <= last`, in id order
    fn range(&self, first: RecordId, last: RecordId) -> Result<Vec<FlatRecord>, StorageError>;

    fn seed_info(&self) -> Result<Option<SeedInfo>, StorageError>;

    /// A node and all of its descendants, which are contiguous in id order
    fn subtree(&self, anchor: &FlatRecord) -> Result<Vec<FlatRecord>, StorageError> {
        self.range(anchor.id, anchor.last_descendant_id())
    }
}
